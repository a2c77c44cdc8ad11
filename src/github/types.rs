use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq)]
pub struct Repository {
    pub id: String,
    pub owner: String,
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub stargazer_count: u32,
    pub watcher_count: u32,
    pub fork_count: u32,
    pub public_fork_count: u32,
    pub default_branch: Option<String>,
    pub branches: Vec<String>,
}

impl Repository {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    // forkCount includes private forks the API will never list
    pub fn private_fork_count(&self) -> u32 {
        self.fork_count.saturating_sub(self.public_fork_count)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fork {
    pub repo: Repository,
    pub score: Option<f64>,
    pub diff: Option<Diff>,
    pub extended: Option<ExtendedForkInfo>,
}

impl Fork {
    pub fn unscored(repo: Repository) -> Self {
        Self {
            repo,
            score: None,
            diff: None,
            extended: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.repo.id
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Diff {
    pub ahead_by: u32,
    pub behind_by: u32,
    pub commits: Vec<DiffCommit>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiffCommit {
    pub oid: String,
    pub message: String,
    pub additions: u32,
    pub deletions: u32,
    pub time: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExtendedForkInfo {
    pub description_differs: bool,
    pub new_branches: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}
