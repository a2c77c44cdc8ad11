#![cfg(test)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use crate::error::{Result, TineError};
use crate::github::queries::QueryVariables;
use crate::github::transport::Transport;
use crate::github::types::Repository;

pub fn make_repo(id: &str, owner: &str, name: &str) -> Repository {
    Repository {
        id: id.to_string(),
        owner: owner.to_string(),
        name: name.to_string(),
        url: format!("https://github.com/{owner}/{name}"),
        description: Some("widgets for all".to_string()),
        pushed_at: Some(Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap()),
        stargazer_count: 0,
        watcher_count: 0,
        fork_count: 0,
        public_fork_count: 0,
        default_branch: Some("main".to_string()),
        branches: vec!["main".to_string()],
    }
}

pub fn repo_json(id: &str, owner: &str, name: &str, branches: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "owner": { "login": owner },
        "url": format!("https://github.com/{owner}/{name}"),
        "description": "widgets for all",
        "pushedAt": "2026-01-10T12:00:00Z",
        "stargazerCount": 10,
        "watchers": { "totalCount": 4 },
        "forkCount": 5,
        "publicForks": { "totalCount": 3 },
        "defaultBranchRef": branches.first().map(|b| json!({ "name": b })).unwrap_or(Value::Null),
        "refs": {
            "pageInfo": { "hasNextPage": false, "endCursor": Value::Null },
            "nodes": branches.iter().map(|b| json!({ "name": b })).collect::<Vec<_>>()
        }
    })
}

pub fn repo_response(node: Value) -> Value {
    json!({ "repository": node })
}

pub fn fork_page_response(
    nodes: Vec<Value>,
    has_next_page: bool,
    end_cursor: Option<&str>,
) -> Value {
    json!({
        "repository": {
            "forks": {
                "pageInfo": { "hasNextPage": has_next_page, "endCursor": end_cursor },
                "nodes": nodes
            }
        }
    })
}

pub fn commit_json(oid: &str, message: &str) -> Value {
    json!({
        "oid": oid,
        "messageHeadline": message,
        "additions": 1,
        "deletions": 0,
        "committedDate": "2026-01-10T12:00:00Z"
    })
}

pub fn divergence_response(compares: &[(u32, u32)]) -> Value {
    let mut repository = serde_json::Map::new();
    for (i, (ahead, behind)) in compares.iter().enumerate() {
        repository.insert(
            format!("fork{i}"),
            json!({
                "compare": {
                    "aheadBy": ahead,
                    "behindBy": behind,
                    "commits": { "nodes": [] }
                }
            }),
        );
    }
    json!({ "repository": repository })
}

#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub document: String,
    pub variables: Value,
    pub paginated: bool,
}

/// In-memory transport: pops queued responses in order and records every
/// call it sees.
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<Value>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn new(responses: Vec<Value>) -> Self {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    pub fn with_results(responses: Vec<Result<Value>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(
        &self,
        document: &str,
        variables: &QueryVariables,
        paginated: bool,
    ) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            document: document.to_string(),
            variables: serde_json::to_value(variables).expect("variables serialize"),
            paginated,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TineError::GitHub("no queued response".to_string())))
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute_query(&self, document: &str, variables: &QueryVariables) -> Result<Value> {
        self.respond(document, variables, false)
    }

    async fn execute_paginated_query(
        &self,
        document: &str,
        variables: &QueryVariables,
    ) -> Result<Value> {
        self.respond(document, variables, true)
    }
}
