//! GraphQL documents and the response shapes they decode into

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Commits fetched per history page.
pub const HISTORY_PAGE_SIZE: u32 = 100;
/// Repositories fetched per page when building the LOC cache.
pub const LOC_REPOS_PAGE_SIZE: u32 = 60;
/// Repositories fetched per page when counting stars.
pub const STARS_PAGE_SIZE: u32 = 100;

pub const ACCOUNT_QUERY: &str = r#"
query($login: String!) {
    user(login: $login) {
        id
        createdAt
    }
}"#;

pub const FOLLOWERS_QUERY: &str = r#"
query($login: String!) {
    user(login: $login) {
        followers {
            totalCount
        }
    }
}"#;

pub const REPO_STATS_QUERY: &str = r#"
query($owner_affiliation: [RepositoryAffiliation], $login: String!, $cursor: String, $first: Int!) {
    user(login: $login) {
        repositories(first: $first, after: $cursor, ownerAffiliations: $owner_affiliation) {
            totalCount
            edges {
                node {
                    ... on Repository {
                        nameWithOwner
                        stargazers {
                            totalCount
                        }
                    }
                }
            }
            pageInfo {
                endCursor
                hasNextPage
            }
        }
    }
}"#;

pub const LOC_REPOS_QUERY: &str = r#"
query($owner_affiliation: [RepositoryAffiliation], $login: String!, $cursor: String, $first: Int!) {
    user(login: $login) {
        repositories(first: $first, after: $cursor, ownerAffiliations: $owner_affiliation) {
            totalCount
            edges {
                node {
                    ... on Repository {
                        nameWithOwner
                        defaultBranchRef {
                            target {
                                ... on Commit {
                                    history {
                                        totalCount
                                    }
                                }
                            }
                        }
                    }
                }
            }
            pageInfo {
                endCursor
                hasNextPage
            }
        }
    }
}"#;

pub const HISTORY_QUERY: &str = r#"
query($repo_name: String!, $owner: String!, $cursor: String, $first: Int!) {
    repository(name: $repo_name, owner: $owner) {
        defaultBranchRef {
            target {
                ... on Commit {
                    history(first: $first, after: $cursor) {
                        totalCount
                        edges {
                            node {
                                ... on Commit {
                                    committedDate
                                }
                                author {
                                    user {
                                        id
                                    }
                                }
                                deletions
                                additions
                            }
                        }
                        pageInfo {
                            endCursor
                            hasNextPage
                        }
                    }
                }
            }
        }
    }
}"#;

#[derive(Debug, Deserialize)]
pub struct Envelope<D> {
    pub data: Option<D>,
    #[serde(default)]
    pub errors: Vec<GraphqlMessage>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlMessage {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct UserData<U> {
    pub user: Option<U>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountNode {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    #[serde(default)]
    pub total_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct FollowersNode {
    pub followers: TotalCount,
}

#[derive(Debug, Deserialize)]
pub struct RepositoriesNode {
    pub repositories: RepositoryConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryConnection {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub edges: Vec<RepositoryEdge>,
    #[serde(default)]
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryEdge {
    pub node: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub name_with_owner: String,
    pub stargazers: Option<TotalCount>,
    pub default_branch_ref: Option<BranchRef>,
}

impl RepositoryNode {
    /// Commit count of the default branch, `None` for an empty repository.
    pub fn total_commits(&self) -> Option<u64> {
        self.default_branch_ref
            .as_ref()
            .and_then(|branch| branch.target.as_ref())
            .and_then(|target| target.history.as_ref())
            .map(|history| history.total_count)
    }
}

#[derive(Debug, Deserialize)]
pub struct BranchRef {
    pub target: Option<BranchTarget>,
}

#[derive(Debug, Deserialize)]
pub struct BranchTarget {
    pub history: Option<CommitHistory>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitHistory {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub edges: Vec<CommitEdge>,
    #[serde(default)]
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct CommitEdge {
    pub node: Option<CommitNode>,
}

#[derive(Debug, Deserialize)]
pub struct CommitNode {
    pub author: Option<CommitAuthor>,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

impl CommitNode {
    /// Node id of the GitHub account the commit is attributed to.
    pub fn author_id(&self) -> Option<&str> {
        self.author.as_ref()?.user.as_ref().map(|user| user.id.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct CommitAuthor {
    pub user: Option<UserRef>,
}

#[derive(Debug, Deserialize)]
pub struct UserRef {
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryData {
    pub repository: Option<RepositoryHistoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryHistoryNode {
    pub default_branch_ref: Option<BranchRef>,
}
