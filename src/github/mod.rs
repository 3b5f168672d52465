//! GitHub GraphQL and REST access
//!
//! Every call goes through a [`Transport`] so the walker and cache can be driven by
//! scripted responses in tests. Query counts are kept per client in a [`QueryCounter`];
//! they only feed diagnostics.

pub mod client;
pub mod queries;
pub mod rest;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{Account, GithubClient, RepoStats};
pub use transport::{HttpResponse, Transport, UreqTransport};

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors raised while talking to GitHub
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("GitHub API failed with a {status}: {body} (queries: {counts})")]
    Transport { status: u16, body: String, counts: String },

    #[error(
        "Too many requests in a short amount of time! \
         You've hit the non-documented anti-abuse limit (queries: {counts})"
    )]
    RateLimited { counts: String },

    #[error("Failed to parse GitHub response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Which operation issued a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QueryKind {
    Account,
    Followers,
    RepoStats,
    LocRepos,
    LocHistory,
    Search,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Account => "account",
            QueryKind::Followers => "followers",
            QueryKind::RepoStats => "repo_stats",
            QueryKind::LocRepos => "loc_repos",
            QueryKind::LocHistory => "loc_history",
            QueryKind::Search => "search",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request counts for one client.
#[derive(Debug, Default)]
pub struct QueryCounter {
    counts: RefCell<BTreeMap<QueryKind, u64>>,
}

impl QueryCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, kind: QueryKind) {
        *self.counts.borrow_mut().entry(kind).or_insert(0) += 1;
    }

    pub fn get(&self, kind: QueryKind) -> u64 {
        self.counts.borrow().get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.borrow().values().sum()
    }

    pub fn snapshot(&self) -> Vec<(QueryKind, u64)> {
        self.counts.borrow().iter().map(|(k, v)| (*k, *v)).collect()
    }
}

impl fmt::Display for QueryCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> =
            self.snapshot().iter().map(|(kind, count)| format!("{kind}={count}")).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
