use crate::github::types::{Fork, Repository};

/// Scores a fork's interesting-ness relative to its upstream. Implementations
/// must be pure and total; the engine calls this once per fork each time the
/// fork is merged from a divergence batch.
pub trait ForkScorer {
    fn score(&self, fork: &Fork, upstream: &Repository) -> f64;
}

impl<F> ForkScorer for F
where
    F: Fn(&Fork, &Repository) -> f64,
{
    fn score(&self, fork: &Fork, upstream: &Repository) -> f64 {
        self(fork, upstream)
    }
}
