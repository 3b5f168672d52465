//! Commit history walker
//!
//! Pages through a repository's default-branch history and sums the additions and
//! deletions of commits attributed to one account.

use crate::github::queries::CommitHistory;
use crate::github::{ApiResult, GithubClient, Transport};

/// Lines and commits attributed to the tracked account in one repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocTally {
    pub additions: u64,
    pub deletions: u64,
    pub my_commits: u64,
}

pub struct CommitWalker<'a, T: Transport> {
    client: &'a GithubClient<T>,
    author_id: &'a str,
}

impl<'a, T: Transport> CommitWalker<'a, T> {
    pub fn new(client: &'a GithubClient<T>, author_id: &'a str) -> Self {
        Self { client, author_id }
    }

    /// Sum the tracked author's changes over the whole default branch.
    ///
    /// An empty repository yields a zero tally after a single request.
    pub fn walk(&self, owner: &str, name: &str) -> ApiResult<LocTally> {
        let mut tally = LocTally::default();
        for page in self.pages(owner, name) {
            let page = page?;
            for commit in page.edges.iter().filter_map(|edge| edge.node.as_ref()) {
                if commit.author_id() == Some(self.author_id) {
                    tally.my_commits += 1;
                    tally.additions += commit.additions;
                    tally.deletions += commit.deletions;
                }
            }
        }
        tracing::debug!(
            repo = %format!("{owner}/{name}"),
            additions = tally.additions,
            deletions = tally.deletions,
            commits = tally.my_commits,
            "Walked commit history"
        );
        Ok(tally)
    }

    pub fn pages<'p>(&'p self, owner: &'p str, name: &'p str) -> HistoryPages<'p, T> {
        HistoryPages { client: self.client, owner, name, cursor: None, done: false }
    }
}

/// Lazy sequence of history pages, driven by the continuation cursor.
///
/// Stops after an empty page, a page without a successor, an empty repository, or the
/// first error.
pub struct HistoryPages<'a, T: Transport> {
    client: &'a GithubClient<T>,
    owner: &'a str,
    name: &'a str,
    cursor: Option<String>,
    done: bool,
}

impl<T: Transport> Iterator for HistoryPages<'_, T> {
    type Item = ApiResult<CommitHistory>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.client.history_page(self.owner, self.name, self.cursor.as_deref()) {
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Ok(Some(page)) => {
                self.cursor = page.page_info.end_cursor.clone();
                if page.edges.is_empty() || !page.page_info.has_next_page || self.cursor.is_none()
                {
                    self.done = true;
                }
                Some(Ok(page))
            }
        }
    }
}
