//! Serde shapes mirroring the nested GraphQL response JSON.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub id: String,
    pub name: String,
    pub owner: OwnerNode,
    pub url: String,
    pub description: Option<String>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub stargazer_count: u32,
    pub watchers: CountNode,
    pub fork_count: u32,
    pub public_forks: CountNode,
    pub default_branch_ref: Option<NameNode>,
    pub refs: RefConnection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerNode {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountNode {
    pub total_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NameNode {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefConnection {
    pub page_info: PageInfoNode,
    pub nodes: Vec<NameNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoNode {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForkConnection {
    pub page_info: PageInfoNode,
    pub nodes: Vec<RepositoryNode>,
}

// Divergence sub-query value: the aliased base ref, null when the base
// branch does not exist, with a null compare when the head ref is missing.
#[derive(Debug, Clone, Deserialize)]
pub struct RefNode {
    pub compare: Option<CompareNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareNode {
    pub ahead_by: u32,
    pub behind_by: u32,
    pub commits: CommitConnection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitConnection {
    pub nodes: Vec<CommitNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitNode {
    pub oid: String,
    pub message_headline: String,
    pub additions: u32,
    pub deletions: u32,
    pub committed_date: DateTime<Utc>,
}
