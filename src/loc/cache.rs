//! Per-user repository cache file
//!
//! Layout: `comment_size` free-form comment lines, then one row per repository:
//!
//! ```text
//! <sha256(owner/name)> <total_commits> <my_commits> <additions> <deletions>
//! ```
//!
//! Rows are kept in the same order as the repository list of the last run. A row is
//! re-walked only when the live commit count differs from the stored one.

use super::walker::CommitWalker;
use super::LocError;
use crate::domain::{LocTotals, RepoSnapshot, ResyncPolicy};
use crate::github::Transport;
use crate::utils::{repo_hash, sha256_hex};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const COMMENT_PLACEHOLDER: &str =
    "This line is a comment block. Write whatever you want here.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRow {
    pub repo_hash: String,
    pub total_commits: u64,
    pub my_commits: u64,
    pub additions: u64,
    pub deletions: u64,
}

impl CacheRow {
    pub fn zeroed(repo_hash: impl Into<String>) -> Self {
        Self { repo_hash: repo_hash.into(), total_commits: 0, my_commits: 0, additions: 0, deletions: 0 }
    }

    fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let repo_hash = fields.next()?.to_string();
        let mut number = || fields.next()?.parse::<u64>().ok();
        let row = Self {
            repo_hash,
            total_commits: number()?,
            my_commits: number()?,
            additions: number()?,
            deletions: number()?,
        };
        Some(row)
    }
}

impl fmt::Display for CacheRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.repo_hash, self.total_commits, self.my_commits, self.additions, self.deletions
        )
    }
}

/// In-memory copy of a cache file.
#[derive(Debug, Clone)]
pub struct CacheFile {
    path: PathBuf,
    comment: Vec<String>,
    rows: Vec<CacheRow>,
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    pub totals: LocTotals,
    /// No repository had to be walked and the repository set was unchanged.
    pub fully_cached: bool,
}

impl CacheFile {
    /// `<cache_dir>/<sha256(user_name)>.txt`
    pub fn path_for(cache_dir: &Path, user_name: &str) -> PathBuf {
        cache_dir.join(format!("{}.txt", sha256_hex(user_name)))
    }

    /// Load the cache file, creating it with placeholder comment lines if it does not exist.
    pub fn open_or_create(path: &Path, comment_size: usize) -> Result<Self, LocError> {
        if !path.exists() {
            let file = Self {
                path: path.to_path_buf(),
                comment: vec![COMMENT_PLACEHOLDER.to_string(); comment_size],
                rows: Vec::new(),
            };
            file.save()?;
            tracing::info!(path = %path.display(), "Created cache file");
            return Ok(file);
        }
        Self::load(path, comment_size)
    }

    /// Load an existing cache file.
    ///
    /// A short comment block is padded with placeholder lines. Lines that do not parse as
    /// rows become rows with an empty hash, which never match a repository and are
    /// replaced on the next realignment.
    pub fn load(path: &Path, comment_size: usize) -> Result<Self, LocError> {
        let content = fs::read_to_string(path).map_err(|e| LocError::io(path, e))?;
        let mut lines = content.lines();
        let mut comment: Vec<String> =
            lines.by_ref().take(comment_size).map(str::to_string).collect();
        comment.resize(comment_size, COMMENT_PLACEHOLDER.to_string());

        let mut rows = Vec::new();
        for (offset, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = CacheRow::parse(line).unwrap_or_else(|| {
                tracing::warn!(
                    path = %path.display(),
                    line = comment_size + offset + 1,
                    "Unreadable cache row, it will be rebuilt"
                );
                CacheRow::zeroed("")
            });
            rows.push(row);
        }
        Ok(Self { path: path.to_path_buf(), comment, rows })
    }

    pub fn comment(&self) -> &[String] {
        &self.comment
    }

    pub fn rows(&self) -> &[CacheRow] {
        &self.rows
    }

    /// Write the comment block and every row back to disk.
    pub fn save(&self) -> Result<(), LocError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LocError::io(parent, e))?;
        }
        let mut out = String::new();
        for line in &self.comment {
            out.push_str(line);
            out.push('\n');
        }
        for row in &self.rows {
            out.push_str(&row.to_string());
            out.push('\n');
        }
        fs::write(&self.path, out).map_err(|e| LocError::io(&self.path, e))
    }

    pub fn totals(&self) -> LocTotals {
        self.rows.iter().fold(LocTotals::default(), |acc, row| LocTotals {
            added: acc.added + row.additions,
            deleted: acc.deleted + row.deletions,
            commits: acc.commits + row.my_commits,
        })
    }

    /// Rebuild the rows so that row `i` belongs to `repos[i]`.
    fn realign(&mut self, repos: &[RepoSnapshot], policy: ResyncPolicy) {
        let mut previous: HashMap<String, CacheRow> = match policy {
            ResyncPolicy::Wipe => HashMap::new(),
            ResyncPolicy::Keyed => {
                self.rows.drain(..).map(|row| (row.repo_hash.clone(), row)).collect()
            }
        };
        self.rows = repos
            .iter()
            .map(|repo| {
                let hash = repo_hash(&repo.name_with_owner);
                previous.remove(&hash).unwrap_or_else(|| CacheRow::zeroed(hash))
            })
            .collect();
    }

    fn is_aligned(&self, repos: &[RepoSnapshot]) -> bool {
        self.rows.len() == repos.len()
            && self
                .rows
                .iter()
                .zip(repos)
                .all(|(row, repo)| row.repo_hash == repo_hash(&repo.name_with_owner))
    }

    /// Bring the cache up to date with `repos`, walking history only where the commit
    /// count changed, and persist the result.
    ///
    /// If a walk fails, the rows reconciled so far are flushed to disk before the error
    /// is returned, so the next run resumes from there.
    pub fn reconcile<T: Transport>(
        &mut self,
        repos: &[RepoSnapshot],
        walker: &CommitWalker<'_, T>,
        policy: ResyncPolicy,
        force_refresh: bool,
    ) -> Result<Reconciled, LocError> {
        let mut fully_cached = true;

        if force_refresh || self.rows.len() != repos.len() {
            fully_cached = false;
            let policy = if force_refresh { ResyncPolicy::Wipe } else { policy };
            tracing::info!(
                cached = self.rows.len(),
                live = repos.len(),
                ?policy,
                "Repository set changed, resyncing cache rows"
            );
            self.realign(repos, policy);
        } else if policy == ResyncPolicy::Keyed && !self.is_aligned(repos) {
            fully_cached = false;
            tracing::info!("Repository order changed, realigning cache rows");
            self.realign(repos, policy);
        }

        for (index, repo) in repos.iter().enumerate() {
            let hash = repo_hash(&repo.name_with_owner);
            if self.rows[index].repo_hash.is_empty() {
                self.rows[index] = CacheRow::zeroed(hash.clone());
            }
            if self.rows[index].repo_hash != hash {
                tracing::debug!(repo = %repo.name_with_owner, "Cache row belongs to another repository");
                continue;
            }

            let Some(live_commits) = repo.total_commits else {
                self.rows[index] = CacheRow::zeroed(hash);
                continue;
            };
            if self.rows[index].total_commits == live_commits {
                continue;
            }

            fully_cached = false;
            let (owner, name) = repo
                .owner_and_name()
                .ok_or_else(|| LocError::InvalidRepoName(repo.name_with_owner.clone()))?;
            tracing::debug!(
                repo = %repo.name_with_owner,
                cached = self.rows[index].total_commits,
                live = live_commits,
                "Commit count changed, walking history"
            );
            match walker.walk(owner, name) {
                Ok(tally) => {
                    self.rows[index] = CacheRow {
                        repo_hash: hash,
                        total_commits: live_commits,
                        my_commits: tally.my_commits,
                        additions: tally.additions,
                        deletions: tally.deletions,
                    };
                }
                Err(err) => {
                    self.flush_partial();
                    return Err(err.into());
                }
            }
        }

        self.save()?;
        Ok(Reconciled { totals: self.totals(), fully_cached })
    }

    fn flush_partial(&self) {
        match self.save() {
            Ok(()) => tracing::warn!(
                path = %self.path.display(),
                "There was an error while updating the cache; partial data has been saved"
            ),
            Err(err) => tracing::error!(error = %err, "Failed to save partial cache data"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::testing::{self, ScriptedTransport};
    use crate::github::{GithubClient, HttpResponse, QueryKind};
    use crate::loc::LocError;
    use tempfile::TempDir;

    const ME: &str = "U_me";

    fn client(replies: Vec<HttpResponse>) -> GithubClient<ScriptedTransport> {
        testing::client(ScriptedTransport::new(replies))
    }

    fn single_page(additions: u64, deletions: u64) -> HttpResponse {
        testing::ok(testing::history_body(&[(Some(ME), additions, deletions)], None))
    }

    fn cache_path(tmp: &TempDir) -> PathBuf {
        CacheFile::path_for(&tmp.path().join("cache"), "octo")
    }

    #[test]
    fn creates_file_with_comment_placeholders() {
        let tmp = TempDir::new().expect("tmp");
        let path = cache_path(&tmp);
        let file = CacheFile::open_or_create(&path, 7).expect("create");
        assert_eq!(file.comment().len(), 7);
        assert!(file.rows().is_empty());

        let on_disk = fs::read_to_string(&path).expect("read");
        assert_eq!(on_disk.lines().count(), 7);
        assert!(on_disk.lines().all(|l| l == COMMENT_PLACEHOLDER));
        assert!(path.file_name().and_then(|n| n.to_str()).expect("name").ends_with(".txt"));
    }

    #[test]
    fn first_pass_walks_every_repository() {
        let tmp = TempDir::new().expect("tmp");
        let repos = vec![RepoSnapshot::new("o/a", Some(2)), RepoSnapshot::new("o/b", Some(1))];
        let gh = client(vec![single_page(10, 3), single_page(5, 1)]);
        let walker = CommitWalker::new(&gh, ME);

        let mut file = CacheFile::open_or_create(&cache_path(&tmp), 7).expect("open");
        let result = file.reconcile(&repos, &walker, ResyncPolicy::Keyed, false).expect("pass");

        assert!(!result.fully_cached);
        assert_eq!(result.totals, LocTotals { added: 15, deleted: 4, commits: 2 });
        assert_eq!(result.totals.net(), 11);
        assert_eq!(file.rows()[0].to_string(), format!("{} 2 1 10 3", repo_hash("o/a")));
    }

    #[test]
    fn unchanged_repositories_are_fully_cached() {
        let tmp = TempDir::new().expect("tmp");
        let path = cache_path(&tmp);
        let repos = vec![RepoSnapshot::new("o/a", Some(2)), RepoSnapshot::new("o/b", Some(1))];
        let gh = client(vec![single_page(10, 3), single_page(5, 1)]);
        let walker = CommitWalker::new(&gh, ME);
        let mut file = CacheFile::open_or_create(&path, 7).expect("open");
        let first = file.reconcile(&repos, &walker, ResyncPolicy::Keyed, false).expect("first");

        for policy in [ResyncPolicy::Keyed, ResyncPolicy::Wipe] {
            let gh = client(vec![]);
            let walker = CommitWalker::new(&gh, ME);
            let mut file = CacheFile::load(&path, 7).expect("reload");
            let again = file.reconcile(&repos, &walker, policy, false).expect("again");
            assert!(again.fully_cached);
            assert_eq!(again.totals, first.totals);
            assert_eq!(gh.counter().total(), 0);
        }
    }

    #[test]
    fn grown_repository_is_rewalked_alone() {
        let tmp = TempDir::new().expect("tmp");
        let path = cache_path(&tmp);
        let mut file = CacheFile::open_or_create(&path, 2).expect("open");
        let gh = client(vec![single_page(10, 0), single_page(20, 0)]);
        let walker = CommitWalker::new(&gh, ME);
        let repos = vec![RepoSnapshot::new("o/a", Some(1)), RepoSnapshot::new("o/b", Some(1))];
        file.reconcile(&repos, &walker, ResyncPolicy::Keyed, false).expect("first");

        let grown = vec![RepoSnapshot::new("o/a", Some(1)), RepoSnapshot::new("o/b", Some(2))];
        let gh = client(vec![testing::ok(testing::history_body(
            &[(Some(ME), 20, 0), (Some(ME), 7, 2)],
            None,
        ))]);
        let walker = CommitWalker::new(&gh, ME);
        let result = file.reconcile(&grown, &walker, ResyncPolicy::Keyed, false).expect("second");

        assert!(!result.fully_cached);
        assert_eq!(gh.counter().get(QueryKind::LocHistory), 1);
        assert_eq!(result.totals, LocTotals { added: 37, deleted: 2, commits: 3 });
    }

    #[test]
    fn wipe_policy_resets_rows_when_repository_count_changes() {
        let tmp = TempDir::new().expect("tmp");
        let path = cache_path(&tmp);
        let mut file = CacheFile::open_or_create(&path, 7).expect("open");
        let gh = client(vec![single_page(10, 1)]);
        let walker = CommitWalker::new(&gh, ME);
        file.reconcile(&[RepoSnapshot::new("o/a", Some(1))], &walker, ResyncPolicy::Wipe, false)
            .expect("first");

        // o/a is unchanged but gets walked again because the set grew; o/empty has no commits.
        let repos = vec![
            RepoSnapshot::new("o/a", Some(1)),
            RepoSnapshot::new("o/empty", None),
            RepoSnapshot::new("o/zero", Some(0)),
        ];
        let gh = client(vec![single_page(10, 1)]);
        let walker = CommitWalker::new(&gh, ME);
        let result = file.reconcile(&repos, &walker, ResyncPolicy::Wipe, false).expect("second");

        assert!(!result.fully_cached);
        assert_eq!(gh.counter().get(QueryKind::LocHistory), 1);
        assert_eq!(result.totals, LocTotals { added: 10, deleted: 1, commits: 1 });
        assert_eq!(file.rows()[1], CacheRow::zeroed(repo_hash("o/empty")));
        assert_eq!(file.rows()[2], CacheRow::zeroed(repo_hash("o/zero")));
    }

    #[test]
    fn keyed_policy_keeps_known_rows_when_repository_set_changes() {
        let tmp = TempDir::new().expect("tmp");
        let path = cache_path(&tmp);
        let mut file = CacheFile::open_or_create(&path, 7).expect("open");
        let gh = client(vec![single_page(10, 1), single_page(3, 3)]);
        let walker = CommitWalker::new(&gh, ME);
        let before = vec![RepoSnapshot::new("o/a", Some(1)), RepoSnapshot::new("o/gone", Some(1))];
        file.reconcile(&before, &walker, ResyncPolicy::Keyed, false).expect("first");

        let after = vec![RepoSnapshot::new("o/new", Some(1)), RepoSnapshot::new("o/a", Some(1))];
        let gh = client(vec![single_page(4, 0)]);
        let walker = CommitWalker::new(&gh, ME);
        let result = file.reconcile(&after, &walker, ResyncPolicy::Keyed, false).expect("second");

        assert_eq!(gh.counter().get(QueryKind::LocHistory), 1);
        assert_eq!(result.totals, LocTotals { added: 14, deleted: 1, commits: 2 });
        assert_eq!(file.rows()[0].repo_hash, repo_hash("o/new"));
        assert_eq!(file.rows()[1].repo_hash, repo_hash("o/a"));
    }

    #[test]
    fn force_refresh_rewalks_everything() {
        let tmp = TempDir::new().expect("tmp");
        let path = cache_path(&tmp);
        let mut file = CacheFile::open_or_create(&path, 7).expect("open");
        let repos = vec![RepoSnapshot::new("o/a", Some(1))];
        let gh = client(vec![single_page(10, 1)]);
        file.reconcile(&repos, &CommitWalker::new(&gh, ME), ResyncPolicy::Keyed, false)
            .expect("first");

        let gh = client(vec![single_page(10, 1)]);
        let result = file
            .reconcile(&repos, &CommitWalker::new(&gh, ME), ResyncPolicy::Keyed, true)
            .expect("forced");
        assert!(!result.fully_cached);
        assert_eq!(gh.counter().get(QueryKind::LocHistory), 1);
    }

    #[test]
    fn comment_block_is_preserved() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("user.txt");
        let stale = format!("{} 1 1 1 1", repo_hash("o/old"));
        fs::write(&path, format!("my notes\nsecond line\n{stale}\n")).expect("write");

        let mut file = CacheFile::load(&path, 2).expect("load");
        let gh = client(vec![single_page(2, 1)]);
        let repos = vec![RepoSnapshot::new("o/a", Some(1)), RepoSnapshot::new("o/b", None)];
        file.reconcile(&repos, &CommitWalker::new(&gh, ME), ResyncPolicy::Wipe, false)
            .expect("pass");

        let on_disk = fs::read_to_string(&path).expect("read");
        let lines: Vec<&str> = on_disk.lines().collect();
        assert_eq!(lines[..2], ["my notes", "second line"]);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], format!("{} 1 1 2 1", repo_hash("o/a")));
        assert_eq!(lines[3], format!("{} 0 0 0 0", repo_hash("o/b")));
    }

    #[test]
    fn failed_walk_flushes_partial_progress() {
        let tmp = TempDir::new().expect("tmp");
        let path = cache_path(&tmp);
        let repos = vec![
            RepoSnapshot::new("o/a", Some(1)),
            RepoSnapshot::new("o/b", Some(300)),
            RepoSnapshot::new("o/c", Some(4)),
        ];
        let gh = client(vec![
            single_page(10, 2),
            testing::ok(testing::history_body(&[(Some(ME), 50, 5)], Some("page-2"))),
            testing::status(502, "upstream error"),
        ]);
        let walker = CommitWalker::new(&gh, ME);
        let mut file = CacheFile::open_or_create(&path, 7).expect("open");
        let err = file.reconcile(&repos, &walker, ResyncPolicy::Keyed, false).expect_err("fail");
        assert!(matches!(err, LocError::Api(_)));
        assert!(err.to_string().contains("502"));

        let saved = CacheFile::load(&path, 7).expect("reload");
        assert_eq!(saved.comment(), vec![COMMENT_PLACEHOLDER.to_string(); 7].as_slice());
        assert_eq!(saved.rows().len(), 3);
        assert_eq!(saved.rows()[0].to_string(), format!("{} 1 1 10 2", repo_hash("o/a")));
        assert_eq!(saved.rows()[1], CacheRow::zeroed(repo_hash("o/b")));
        assert_eq!(saved.rows()[2], CacheRow::zeroed(repo_hash("o/c")));

        // Resuming only walks what was not finished.
        let gh = client(vec![single_page(60, 6), single_page(1, 0)]);
        let walker = CommitWalker::new(&gh, ME);
        let mut file = CacheFile::load(&path, 7).expect("reload");
        let result = file.reconcile(&repos, &walker, ResyncPolicy::Keyed, false).expect("resume");
        assert_eq!(gh.counter().get(QueryKind::LocHistory), 2);
        assert_eq!(result.totals, LocTotals { added: 71, deleted: 8, commits: 3 });
    }

    #[test]
    fn rate_limit_also_flushes() {
        let tmp = TempDir::new().expect("tmp");
        let path = cache_path(&tmp);
        let gh = client(vec![single_page(1, 1), testing::status(403, "abuse")]);
        let walker = CommitWalker::new(&gh, ME);
        let repos = vec![RepoSnapshot::new("o/a", Some(1)), RepoSnapshot::new("o/b", Some(1))];
        let mut file = CacheFile::open_or_create(&path, 7).expect("open");
        let err = file.reconcile(&repos, &walker, ResyncPolicy::Keyed, false).expect_err("fail");
        assert!(err.to_string().contains("anti-abuse"));

        let saved = CacheFile::load(&path, 7).expect("reload");
        assert_eq!(saved.rows()[0].total_commits, 1);
        assert_eq!(saved.rows()[1].total_commits, 0);
    }

    #[test]
    fn unreadable_rows_load_as_blank_rows() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.txt");
        fs::write(&path, "c1\nc2\nabc 1 2 x 4\n").expect("write");
        let file = CacheFile::load(&path, 2).expect("load");
        assert_eq!(file.rows(), [CacheRow::zeroed("")].as_slice());
    }

    #[test]
    fn truncated_last_row_is_rebuilt() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("user.txt");
        let good = format!("{} 1 1 10 2", repo_hash("o/a"));
        let cut = &repo_hash("o/b")[..20];
        fs::write(&path, format!("c1\n{good}\n{cut}\n")).expect("write");

        let repos = vec![RepoSnapshot::new("o/a", Some(1)), RepoSnapshot::new("o/b", Some(3))];
        let gh = client(vec![single_page(4, 1)]);
        let mut file = CacheFile::load(&path, 1).expect("load");
        let result = file
            .reconcile(&repos, &CommitWalker::new(&gh, ME), ResyncPolicy::Keyed, false)
            .expect("pass");

        assert_eq!(gh.counter().get(QueryKind::LocHistory), 1);
        assert_eq!(result.totals, LocTotals { added: 14, deleted: 3, commits: 2 });
        assert_eq!(file.rows()[1].to_string(), format!("{} 3 1 4 1", repo_hash("o/b")));
    }

    #[test]
    fn wipe_policy_rebuilds_unreadable_row_in_place() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("user.txt");
        let good = format!("{} 1 1 10 2", repo_hash("o/a"));
        fs::write(&path, format!("c1\n{good}\ngarbage\n")).expect("write");

        let repos = vec![RepoSnapshot::new("o/a", Some(1)), RepoSnapshot::new("o/b", Some(2))];
        let gh = client(vec![single_page(4, 1)]);
        let mut file = CacheFile::load(&path, 1).expect("load");
        let result = file
            .reconcile(&repos, &CommitWalker::new(&gh, ME), ResyncPolicy::Wipe, false)
            .expect("pass");

        assert_eq!(gh.counter().get(QueryKind::LocHistory), 1);
        assert_eq!(result.totals, LocTotals { added: 14, deleted: 3, commits: 2 });
        assert_eq!(file.rows()[1].to_string(), format!("{} 2 1 4 1", repo_hash("o/b")));
    }

    #[test]
    fn shrinking_comment_size_keeps_running() {
        let tmp = TempDir::new().expect("tmp");
        let path = cache_path(&tmp);
        let repos = vec![RepoSnapshot::new("o/a", Some(1))];
        let gh = client(vec![single_page(10, 1)]);
        let mut file = CacheFile::open_or_create(&path, 7).expect("open");
        file.reconcile(&repos, &CommitWalker::new(&gh, ME), ResyncPolicy::Keyed, false)
            .expect("first");

        // Four placeholder comment lines are now read as rows.
        let gh = client(vec![]);
        let mut file = CacheFile::load(&path, 3).expect("load");
        assert_eq!(file.rows().len(), 5);
        let result = file
            .reconcile(&repos, &CommitWalker::new(&gh, ME), ResyncPolicy::Keyed, false)
            .expect("resync");

        assert_eq!(result.totals, LocTotals { added: 10, deleted: 1, commits: 1 });
        assert_eq!(gh.counter().get(QueryKind::LocHistory), 0);
        let on_disk = fs::read_to_string(&path).expect("read");
        assert_eq!(on_disk.lines().count(), 4);
    }

    #[test]
    fn short_comment_block_is_padded() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("user.txt");
        fs::write(&path, "only note\n").expect("write");

        let file = CacheFile::load(&path, 3).expect("load");
        assert_eq!(file.comment()[0], "only note");
        assert_eq!(file.comment()[1..], [COMMENT_PLACEHOLDER, COMMENT_PLACEHOLDER]);
        assert!(file.rows().is_empty());

        file.save().expect("save");
        let on_disk = fs::read_to_string(&path).expect("read");
        assert_eq!(on_disk.lines().count(), 3);
    }
}
