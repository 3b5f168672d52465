//! Core domain types shared across modules

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";
pub const DEFAULT_REST_URL: &str = "https://api.github.com";
pub const DEFAULT_COMMENT_SIZE: usize = 7;

/// Relationship used to filter which repositories a query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Affiliation {
    Owner,
    Collaborator,
    OrganizationMember,
}

impl Affiliation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Affiliation::Owner => "OWNER",
            Affiliation::Collaborator => "COLLABORATOR",
            Affiliation::OrganizationMember => "ORGANIZATION_MEMBER",
        }
    }

    pub fn all() -> Vec<Affiliation> {
        vec![Affiliation::Owner, Affiliation::Collaborator, Affiliation::OrganizationMember]
    }
}

impl std::str::FromStr for Affiliation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "OWNER" => Ok(Affiliation::Owner),
            "COLLABORATOR" => Ok(Affiliation::Collaborator),
            "ORGANIZATION_MEMBER" | "ORG" | "ORGANIZATION" => Ok(Affiliation::OrganizationMember),
            other => anyhow::bail!(
                "Invalid affiliation '{other}'. Expected OWNER, COLLABORATOR or ORGANIZATION_MEMBER"
            ),
        }
    }
}

/// How cache rows are realigned when the repository set changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResyncPolicy {
    /// Reset every row to zero whenever the repository count differs.
    Wipe,
    /// Keep rows whose repository hash is still present; only new repositories start at zero.
    #[default]
    Keyed,
}

/// Optional archive of repositories that can no longer be queried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    pub path: PathBuf,
    /// GraphQL node id of the only account the archive belongs to.
    pub account_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub access_token: Option<String>,
    pub user_name: Option<String>,
    pub cache_dir: PathBuf,
    pub comment_size: usize,
    pub affiliations: Vec<Affiliation>,
    pub resync: ResyncPolicy,
    pub force_refresh: bool,
    pub templates: Vec<PathBuf>,
    pub birthday: Option<NaiveDate>,
    pub graphql_url: String,
    pub rest_url: String,
    pub archive: Option<ArchiveConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: None,
            user_name: None,
            cache_dir: PathBuf::from("cache"),
            comment_size: DEFAULT_COMMENT_SIZE,
            affiliations: Affiliation::all(),
            resync: ResyncPolicy::default(),
            force_refresh: false,
            templates: vec![PathBuf::from("dark-mode.svg"), PathBuf::from("light-mode.svg")],
            birthday: None,
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            rest_url: DEFAULT_REST_URL.to_string(),
            archive: None,
        }
    }
}

/// A repository as seen by the affiliation query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSnapshot {
    /// `owner/name`
    pub name_with_owner: String,
    /// Total commits on the default branch, `None` when the repository has no default branch.
    pub total_commits: Option<u64>,
}

impl RepoSnapshot {
    pub fn new(name_with_owner: impl Into<String>, total_commits: Option<u64>) -> Self {
        Self { name_with_owner: name_with_owner.into(), total_commits }
    }

    pub fn owner_and_name(&self) -> Option<(&str, &str)> {
        self.name_with_owner.split_once('/')
    }
}

/// Lines-of-code and commit totals attributed to the tracked account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocTotals {
    pub added: u64,
    pub deleted: u64,
    pub commits: u64,
}

impl LocTotals {
    pub fn net(&self) -> i64 {
        self.added as i64 - self.deleted as i64
    }
}

/// Everything rendered into the badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeStats {
    pub age: String,
    pub commits: u64,
    pub stars: u64,
    pub repos: u64,
    pub contributed: u64,
    pub followers: u64,
    pub loc: LocTotals,
    pub pull_requests: u64,
    pub issues: u64,
}
