//! Archived repository data
//!
//! Repositories that were deleted (or otherwise can no longer be queried) are kept in a
//! hand-maintained text file: a 7-line header, rows in the cache row format, and a
//! 3-line footer whose last line carries the commit total accumulated before the
//! archive was started.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ARCHIVE_HEADER_LINES: usize = 7;
pub const ARCHIVE_FOOTER_LINES: usize = 3;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Failed reading archive file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed archive row {line}: '{content}'")]
    MalformedRow { line: usize, content: String },

    #[error("Archive footer has no commit total: '{0}'")]
    MissingCommitTotal(String),
}

/// Totals contributed by archived repositories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveTotals {
    pub added: u64,
    pub deleted: u64,
    pub commits: u64,
    pub contributed_repos: u64,
}

pub fn load_archive(path: &Path) -> Result<ArchiveTotals, ArchiveError> {
    let content = fs::read_to_string(path)
        .map_err(|source| ArchiveError::Io { path: path.to_path_buf(), source })?;
    parse_archive(&content)
}

pub fn parse_archive(content: &str) -> Result<ArchiveTotals, ArchiveError> {
    let lines: Vec<&str> = content.lines().collect();
    let Some(last) = lines.last() else {
        return Ok(ArchiveTotals::default());
    };

    let end = lines.len().saturating_sub(ARCHIVE_FOOTER_LINES);
    let start = ARCHIVE_HEADER_LINES.min(end);
    let rows = &lines[start..end];

    let mut totals = ArchiveTotals { contributed_repos: rows.len() as u64, ..Default::default() };
    for (offset, line) in rows.iter().enumerate() {
        let malformed =
            || ArchiveError::MalformedRow { line: start + offset + 1, content: line.to_string() };
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 {
            return Err(malformed());
        }
        totals.added += fields[3].parse::<u64>().map_err(|_| malformed())?;
        totals.deleted += fields[4].parse::<u64>().map_err(|_| malformed())?;
        // Rows whose own commit count is unknown carry a placeholder such as "N/A".
        if let Ok(commits) = fields[2].parse::<u64>() {
            totals.commits += commits;
        }
    }

    totals.commits += footer_commit_total(last)?;
    Ok(totals)
}

fn footer_commit_total(line: &str) -> Result<u64, ArchiveError> {
    line.split_whitespace()
        .nth(4)
        .map(|field| field.trim_matches(|c: char| !c.is_ascii_digit()))
        .and_then(|digits| digits.parse::<u64>().ok())
        .ok_or_else(|| ArchiveError::MissingCommitTotal(line.to_string()))
}
