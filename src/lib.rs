//! Fork discovery and ranking for GitHub repositories.
//!
//! `tine` walks the public forks of an upstream repository, computes commit
//! divergence for the candidates a caller selects, and keeps a registry of
//! forks ranked by a caller-supplied score.

pub mod config;
pub mod discovery;
pub mod error;
pub mod github;
pub mod score;
#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use discovery::DiscoveryEngine;
pub use error::{Result, TineError};
pub use github::transport::{GitHubTransport, Transport};
pub use github::types::{Diff, DiffCommit, ExtendedForkInfo, Fork, PageInfo, Repository};
pub use score::ForkScorer;
