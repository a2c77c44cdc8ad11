pub mod flatten;
pub mod queries;
pub mod transport;
pub mod types;
pub mod wire;
