//! Pure mappings from decoded response JSON to the entity shapes.

use std::collections::HashSet;

use itertools::Itertools;
use serde_json::Value;

use crate::error::{Result, TineError};

use super::types::{Diff, DiffCommit, ExtendedForkInfo, PageInfo, Repository};
use super::wire;

pub fn repository(data: &Value) -> Result<Repository> {
    let node = data
        .get("repository")
        .filter(|v| !v.is_null())
        .ok_or_else(|| TineError::Decode("repository node missing".to_string()))?;

    let node: wire::RepositoryNode =
        serde_json::from_value(node.clone()).map_err(|e| TineError::Decode(e.to_string()))?;

    Ok(repo_node(node))
}

pub fn fork_page(data: &Value) -> Result<(Vec<Repository>, PageInfo)> {
    let forks = data
        .get("repository")
        .and_then(|r| r.get("forks"))
        .filter(|v| !v.is_null())
        .ok_or_else(|| TineError::Decode("fork connection missing".to_string()))?;

    let forks: wire::ForkConnection =
        serde_json::from_value(forks.clone()).map_err(|e| TineError::Decode(e.to_string()))?;

    let page_info = page_info(forks.page_info);
    let repos = forks.nodes.into_iter().map(repo_node).collect();
    Ok((repos, page_info))
}

/// Decodes one divergence batch back into diffs, one per alias in input
/// order. A null ref or compare means the compared branch does not exist
/// and fails the whole batch.
pub fn divergence(data: &Value, aliases: &[String]) -> Result<Vec<Diff>> {
    let repo = data
        .get("repository")
        .filter(|v| v.is_object())
        .ok_or_else(|| TineError::Decode("repository node missing".to_string()))?;

    let mut diffs = Vec::with_capacity(aliases.len());
    for alias in aliases {
        let value = repo
            .get(alias)
            .ok_or_else(|| TineError::Decode(format!("alias {alias} missing from response")))?;
        if value.is_null() {
            return Err(TineError::DiffFetch(format!(
                "base branch not found for {alias}"
            )));
        }
        let ref_node: wire::RefNode =
            serde_json::from_value(value.clone()).map_err(|e| TineError::Decode(e.to_string()))?;
        let compare = ref_node.compare.ok_or_else(|| {
            TineError::DiffFetch(format!("head branch not found for {alias}"))
        })?;
        diffs.push(diff(compare));
    }
    Ok(diffs)
}

pub fn extended_info(fork: &Repository, upstream: &Repository) -> ExtendedForkInfo {
    let upstream_branches: HashSet<&str> =
        upstream.branches.iter().map(String::as_str).collect();

    let new_branches = fork
        .branches
        .iter()
        .filter(|b| !upstream_branches.contains(b.as_str()))
        .cloned()
        .collect();

    ExtendedForkInfo {
        description_differs: fork.description != upstream.description,
        new_branches,
    }
}

fn repo_node(node: wire::RepositoryNode) -> Repository {
    Repository {
        id: node.id,
        owner: node.owner.login,
        name: node.name,
        url: node.url,
        description: node.description,
        pushed_at: node.pushed_at,
        stargazer_count: node.stargazer_count,
        watcher_count: node.watchers.total_count,
        fork_count: node.fork_count,
        public_fork_count: node.public_forks.total_count,
        default_branch: node.default_branch_ref.map(|r| r.name),
        branches: node.refs.nodes.into_iter().map(|n| n.name).unique().collect(),
    }
}

fn diff(compare: wire::CompareNode) -> Diff {
    Diff {
        ahead_by: compare.ahead_by,
        behind_by: compare.behind_by,
        commits: compare
            .commits
            .nodes
            .into_iter()
            .map(|c| DiffCommit {
                oid: c.oid,
                message: c.message_headline,
                additions: c.additions,
                deletions: c.deletions,
                time: c.committed_date,
            })
            .collect(),
    }
}

fn page_info(node: wire::PageInfoNode) -> PageInfo {
    PageInfo {
        has_next_page: node.has_next_page,
        end_cursor: node.end_cursor,
    }
}
