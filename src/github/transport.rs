use async_trait::async_trait;
use octocrab::Octocrab;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, TineError};

use super::queries::QueryVariables;

/// Executes query documents against the GraphQL API. The engine only ever
/// talks to this trait; tests swap in an in-memory fake.
#[async_trait]
pub trait Transport {
    /// Runs one document and returns the response's data payload.
    async fn execute_query(&self, document: &str, variables: &QueryVariables) -> Result<Value>;

    /// Runs the repository document, following the branch-ref cursor until
    /// exhausted, and returns one data payload with all branch pages merged.
    async fn execute_paginated_query(
        &self,
        document: &str,
        variables: &QueryVariables,
    ) -> Result<Value>;
}

pub struct GitHubTransport {
    octo: Octocrab,
}

impl GitHubTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(token) = &config.github_token {
            builder = builder.personal_token(token.clone());
        }
        let octo = builder
            .build()
            .map_err(|e| TineError::GitHub(e.to_string()))?;
        Ok(Self { octo })
    }

    pub async fn rate_limit(&self) -> Option<u32> {
        self.octo
            .ratelimit()
            .get()
            .await
            .ok()
            .map(|r| r.rate.remaining as u32)
    }

    async fn post(&self, document: &str, variables: Value) -> Result<Value> {
        let payload = json!({ "query": document, "variables": variables });
        let response: Value = self
            .octo
            .graphql(&payload)
            .await
            .map_err(|e| TineError::GitHub(e.to_string()))?;
        extract_data(response)
    }
}

#[async_trait]
impl Transport for GitHubTransport {
    async fn execute_query(&self, document: &str, variables: &QueryVariables) -> Result<Value> {
        let vars =
            serde_json::to_value(variables).map_err(|e| TineError::Decode(e.to_string()))?;
        self.post(document, vars).await
    }

    async fn execute_paginated_query(
        &self,
        document: &str,
        variables: &QueryVariables,
    ) -> Result<Value> {
        let mut vars = variables.clone();
        let mut data = self
            .post(
                document,
                serde_json::to_value(&vars).map_err(|e| TineError::Decode(e.to_string()))?,
            )
            .await?;

        loop {
            let (has_next, cursor) = ref_page_info(&data)?;
            if !has_next {
                break;
            }
            debug!(?cursor, "following branch-ref cursor");
            vars.cursor = cursor;
            let next = self
                .post(
                    document,
                    serde_json::to_value(&vars).map_err(|e| TineError::Decode(e.to_string()))?,
                )
                .await?;
            merge_ref_page(&mut data, next)?;
        }

        Ok(data)
    }
}

// GraphQL transports errors in-band; a response with an errors array is a
// failure even when partial data is present.
fn extract_data(mut response: Value) -> Result<Value> {
    if let Some(errors) = response.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let messages: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect();
            return Err(TineError::GitHub(messages.join("; ")));
        }
    }
    match response.get_mut("data") {
        Some(data) if !data.is_null() => Ok(data.take()),
        _ => Err(TineError::Decode("data payload missing".to_string())),
    }
}

fn ref_page_info(data: &Value) -> Result<(bool, Option<String>)> {
    let page_info = data
        .pointer("/repository/refs/pageInfo")
        .ok_or_else(|| TineError::Decode("refs pageInfo missing".to_string()))?;
    let has_next = page_info
        .get("hasNextPage")
        .and_then(Value::as_bool)
        .ok_or_else(|| TineError::Decode("hasNextPage missing".to_string()))?;
    let cursor = page_info
        .get("endCursor")
        .and_then(Value::as_str)
        .map(String::from);
    Ok((has_next, cursor))
}

// Appends the next page's branch nodes onto the accumulated node and adopts
// the next page's pageInfo, so the caller sees one fully merged repository.
fn merge_ref_page(data: &mut Value, next: Value) -> Result<()> {
    let next_refs = next
        .pointer("/repository/refs")
        .cloned()
        .ok_or_else(|| TineError::Decode("refs connection missing".to_string()))?;
    let refs = data
        .pointer_mut("/repository/refs")
        .ok_or_else(|| TineError::Decode("refs connection missing".to_string()))?;

    let next_nodes = next_refs
        .get("nodes")
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| TineError::Decode("refs nodes missing".to_string()))?;
    let nodes = refs
        .get_mut("nodes")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| TineError::Decode("refs nodes missing".to_string()))?;
    nodes.extend(next_nodes);

    let page_info = next_refs
        .get("pageInfo")
        .cloned()
        .ok_or_else(|| TineError::Decode("refs pageInfo missing".to_string()))?;
    refs["pageInfo"] = page_info;

    Ok(())
}
