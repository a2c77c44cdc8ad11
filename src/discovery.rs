use std::collections::HashMap;

use itertools::Itertools;
use tracing::debug;

use crate::error::{Result, TineError};
use crate::github::flatten;
use crate::github::queries::{
    divergence_query, HeadRef, QueryVariables, FORKS_QUERY, REPOSITORY_QUERY,
};
use crate::github::transport::Transport;
use crate::github::types::{Fork, PageInfo, Repository};
use crate::score::ForkScorer;

/// Walks one upstream repository's public forks: loads the upstream once,
/// pages through fork metadata, batch-diffs caller-selected forks, and keeps
/// a registry of scored forks deduplicated by global node id.
///
/// Every operation takes `&mut self` and performs at most one awaited round
/// trip; callers drive operations one at a time.
pub struct DiscoveryEngine<T, S> {
    transport: T,
    scorer: S,
    owner: String,
    name: String,
    upstream: Option<Repository>,
    page_info: Option<PageInfo>,
    registry: HashMap<String, Fork>,
}

impl<T: Transport, S: ForkScorer> DiscoveryEngine<T, S> {
    pub fn new(transport: T, scorer: S, owner: &str, name: &str) -> Self {
        Self {
            transport,
            scorer,
            owner: owner.to_string(),
            name: name.to_string(),
            upstream: None,
            page_info: None,
            registry: HashMap::new(),
        }
    }

    /// Loads the upstream repository with its branch list fully merged
    /// across ref pages. The snapshot is cached; only the first call
    /// queries.
    pub async fn fetch_repository(&mut self) -> Result<Repository> {
        if let Some(repo) = &self.upstream {
            return Ok(repo.clone());
        }

        let vars = QueryVariables::new(&self.owner, &self.name);
        let data = self
            .transport
            .execute_paginated_query(REPOSITORY_QUERY, &vars)
            .await
            .map_err(upstream_err)?;
        let repo = flatten::repository(&data)?;
        debug!(
            repo = %repo.full_name(),
            branches = repo.branches.len(),
            public_forks = repo.public_fork_count,
            "fetched upstream repository"
        );
        self.upstream = Some(repo.clone());
        Ok(repo)
    }

    /// Whether another fork page may be fetched. True until a page comes
    /// back with no next page; from then on false for this engine's
    /// lifetime.
    pub fn can_load_more(&self) -> bool {
        self.page_info.as_ref().map_or(true, |p| p.has_next_page)
    }

    /// Fetches the next page of public fork snapshots, advancing the stored
    /// cursor. Returns an empty page without querying when the upstream has
    /// no public forks or the listing is exhausted. Snapshots are not merged
    /// into the registry; that happens through [`Self::compute_diffs`].
    pub async fn fetch_fork_page(&mut self, page_size: u32) -> Result<Vec<Repository>> {
        let upstream = self.fetch_repository().await?;
        if upstream.public_fork_count == 0 {
            debug!(repo = %upstream.full_name(), "no public forks to list");
            return Ok(Vec::new());
        }
        if !self.can_load_more() {
            return Ok(Vec::new());
        }

        let vars = QueryVariables {
            cursor: self.page_info.as_ref().and_then(|p| p.end_cursor.clone()),
            count: Some(page_size),
            ..QueryVariables::new(&self.owner, &self.name)
        };
        let data = self
            .transport
            .execute_query(FORKS_QUERY, &vars)
            .await
            .map_err(upstream_err)?;
        let (forks, page_info) = flatten::fork_page(&data)?;
        debug!(
            count = forks.len(),
            has_next = page_info.has_next_page,
            "fetched fork page"
        );
        self.page_info = Some(page_info);
        Ok(forks)
    }

    /// Computes divergence for the given fork snapshots in one batched
    /// query, scores each fork against the cached upstream, and merges the
    /// results into the registry (last write wins per id). Output order and
    /// length mirror the input. The batch is atomic: on any failure the
    /// registry is left untouched.
    pub async fn compute_diffs(&mut self, forks: &[Repository]) -> Result<Vec<Fork>> {
        if forks.is_empty() {
            return Ok(Vec::new());
        }

        let upstream = self.fetch_repository().await.map_err(diff_err)?;
        let base_branch = upstream.default_branch.clone().ok_or_else(|| {
            TineError::DiffFetch(format!("{} has no default branch", upstream.full_name()))
        })?;

        let heads = forks
            .iter()
            .map(|fork| {
                let branch = fork.default_branch.clone().ok_or_else(|| {
                    TineError::DiffFetch(format!("{} has no default branch", fork.full_name()))
                })?;
                Ok(HeadRef {
                    owner: fork.owner.clone(),
                    name: fork.name.clone(),
                    branch,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let query = divergence_query(&heads);
        let vars = QueryVariables {
            base_branch: Some(base_branch),
            ..QueryVariables::new(&self.owner, &self.name)
        };
        let data = self
            .transport
            .execute_query(&query.document, &vars)
            .await
            .map_err(diff_err)?;
        let diffs = flatten::divergence(&data, &query.aliases)?;

        // The whole batch decoded; only now touch the registry
        let mut merged = Vec::with_capacity(forks.len());
        for (repo, diff) in forks.iter().zip(diffs) {
            let mut fork = Fork::unscored(repo.clone());
            fork.extended = Some(flatten::extended_info(repo, &upstream));
            fork.diff = Some(diff);
            fork.score = Some(self.scorer.score(&fork, &upstream));
            self.registry.insert(fork.repo.id.clone(), fork.clone());
            merged.push(fork);
        }
        debug!(count = merged.len(), "merged divergence batch");
        Ok(merged)
    }

    /// Registry snapshot, most interesting first. A fork without a score
    /// orders as if it scored zero.
    pub fn ranked_forks(&self) -> Vec<Fork> {
        self.registry
            .values()
            .cloned()
            .sorted_by(|a, b| {
                let sa = a.score.unwrap_or(0.0);
                let sb = b.score.unwrap_or(0.0);
                sb.total_cmp(&sa)
            })
            .collect()
    }
}

fn upstream_err(err: TineError) -> TineError {
    match err {
        TineError::GitHub(msg) => TineError::UpstreamFetch(msg),
        other => other,
    }
}

fn diff_err(err: TineError) -> TineError {
    match err {
        TineError::GitHub(msg) | TineError::UpstreamFetch(msg) => TineError::DiffFetch(msg),
        other => other,
    }
}
