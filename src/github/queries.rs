use serde::Serialize;

pub const DIFF_COMMIT_LIMIT: usize = 20;

pub const REPOSITORY_QUERY: &str = r#"
query Repository($owner: String!, $name: String!, $cursor: String) {
  repository(owner: $owner, name: $name) {
    id
    name
    owner { login }
    url
    description
    pushedAt
    stargazerCount
    watchers { totalCount }
    forkCount
    publicForks: forks(privacy: PUBLIC) { totalCount }
    defaultBranchRef { name }
    refs(refPrefix: "refs/heads/", first: 100, after: $cursor) {
      pageInfo { hasNextPage endCursor }
      nodes { name }
    }
  }
}
"#;

pub const FORKS_QUERY: &str = r#"
query ForkPage($owner: String!, $name: String!, $count: Int!, $cursor: String) {
  repository(owner: $owner, name: $name) {
    forks(privacy: PUBLIC, first: $count, after: $cursor, orderBy: {field: STARGAZERS, direction: DESC}) {
      pageInfo { hasNextPage endCursor }
      nodes {
        id
        name
        owner { login }
        url
        description
        pushedAt
        stargazerCount
        watchers { totalCount }
        forkCount
        publicForks: forks(privacy: PUBLIC) { totalCount }
        defaultBranchRef { name }
        refs(refPrefix: "refs/heads/", first: 100) {
          pageInfo { hasNextPage endCursor }
          nodes { name }
        }
      }
    }
  }
}
"#;

/// Variables accepted by the catalog documents. Absent options are omitted
/// from the serialized JSON so the server sees them as null.
#[derive(Clone, Debug, Default, Serialize)]
pub struct QueryVariables {
    pub owner: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "baseBranch", skip_serializing_if = "Option::is_none")]
    pub base_branch: Option<String>,
}

impl QueryVariables {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// One head of a divergence comparison: the fork's default branch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadRef {
    pub owner: String,
    pub name: String,
    pub branch: String,
}

/// A divergence batch document plus the alias bound to each input index.
/// `aliases[i]` names the sub-query comparing `heads[i]`; decoding looks
/// aliases up here instead of re-parsing the document.
#[derive(Clone, Debug)]
pub struct DivergenceQuery {
    pub document: String,
    pub aliases: Vec<String>,
}

pub fn divergence_query(heads: &[HeadRef]) -> DivergenceQuery {
    let mut body = String::new();
    let mut aliases = Vec::with_capacity(heads.len());

    for (i, head) in heads.iter().enumerate() {
        let alias = format!("fork{i}");
        let head_ref = escape_string(&format!("{}:{}:{}", head.owner, head.name, head.branch));
        body.push_str(&format!(
            "    {alias}: ref(qualifiedName: $baseBranch) {{\n      \
             compare(headRef: \"{head_ref}\") {{\n        \
             aheadBy\n        behindBy\n        \
             commits(last: {DIFF_COMMIT_LIMIT}) {{\n          \
             nodes {{ oid messageHeadline additions deletions committedDate }}\n        \
             }}\n      }}\n    }}\n"
        ));
        aliases.push(alias);
    }

    let document = format!(
        "query Divergence($owner: String!, $name: String!, $baseBranch: String!) {{\n  \
         repository(owner: $owner, name: $name) {{\n{body}  }}\n}}\n"
    );

    DivergenceQuery { document, aliases }
}

// Head refs are embedded as string literals inside the document
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
