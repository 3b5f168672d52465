//! Lines-of-code aggregation
//!
//! Fetches every repository visible through the requested affiliations, reconciles them
//! against the per-user cache file (walking history only for repositories whose commit
//! count changed) and adds the optional archive of repositories that are gone.

pub mod archive;
pub mod cache;
pub mod walker;

pub use archive::{load_archive, ArchiveError, ArchiveTotals};
pub use cache::{CacheFile, CacheRow, Reconciled};
pub use walker::{CommitWalker, LocTally};

use crate::domain::{Affiliation, ArchiveConfig, LocTotals, ResyncPolicy};
use crate::github::{ApiError, GithubClient, Transport};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Cache file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Repository name '{0}' is not in owner/name form")]
    InvalidRepoName(String),

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

impl LocError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        LocError::Io { path: path.to_path_buf(), source }
    }
}

/// Result of a LOC aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocReport {
    /// Cache totals plus the archive, if it applied.
    pub totals: LocTotals,
    pub fully_cached: bool,
    /// Repositories contributed by the archive.
    pub archived_repos: u64,
}

pub struct LocAggregator<'a, T: Transport> {
    client: &'a GithubClient<T>,
    account_id: &'a str,
    cache_dir: PathBuf,
    comment_size: usize,
    policy: ResyncPolicy,
    force_refresh: bool,
    archive: Option<&'a ArchiveConfig>,
}

impl<'a, T: Transport> LocAggregator<'a, T> {
    pub fn new(client: &'a GithubClient<T>, account_id: &'a str, cache_dir: &Path) -> Self {
        Self {
            client,
            account_id,
            cache_dir: cache_dir.to_path_buf(),
            comment_size: crate::domain::DEFAULT_COMMENT_SIZE,
            policy: ResyncPolicy::default(),
            force_refresh: false,
            archive: None,
        }
    }

    pub fn comment_size(mut self, comment_size: usize) -> Self {
        self.comment_size = comment_size;
        self
    }

    pub fn policy(mut self, policy: ResyncPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn force_refresh(mut self, force: bool) -> Self {
        self.force_refresh = force;
        self
    }

    pub fn archive(mut self, archive: Option<&'a ArchiveConfig>) -> Self {
        self.archive = archive;
        self
    }

    pub fn cache_path(&self) -> PathBuf {
        CacheFile::path_for(&self.cache_dir, self.client.login())
    }

    pub fn run(&self, affiliations: &[Affiliation]) -> Result<LocReport, LocError> {
        let repos = self.client.repositories(affiliations)?;
        tracing::info!(repositories = repos.len(), "Fetched repository list");

        let mut file = CacheFile::open_or_create(&self.cache_path(), self.comment_size)?;
        let walker = CommitWalker::new(self.client, self.account_id);
        let reconciled = file.reconcile(&repos, &walker, self.policy, self.force_refresh)?;

        let mut report = LocReport {
            totals: reconciled.totals,
            fully_cached: reconciled.fully_cached,
            archived_repos: 0,
        };
        if let Some(archived) = self.archive_totals()? {
            report.totals.added += archived.added;
            report.totals.deleted += archived.deleted;
            report.totals.commits += archived.commits;
            report.archived_repos = archived.contributed_repos;
        }
        Ok(report)
    }

    /// Archive totals, only when an archive is configured for this very account.
    fn archive_totals(&self) -> Result<Option<ArchiveTotals>, LocError> {
        match self.archive {
            Some(archive) if archive.account_id == self.account_id => {
                let totals = load_archive(&archive.path)?;
                tracing::info!(repos = totals.contributed_repos, "Added archived repositories");
                Ok(Some(totals))
            }
            Some(_) => {
                tracing::debug!("Archive belongs to another account, skipping");
                Ok(None)
            }
            None => Ok(None),
        }
    }
}
