use std::fmt;

use crate::error::{ProfileError, Result};

/// One kernel row on a competition leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelSummary {
    pub name: String,
    pub url: String,
    pub author_name: String,
    pub author_id: String,
    pub thumbnail_src: String,
    pub tier_src: Option<String>,
    pub votes: String,
    pub comments: String,
    pub last_updated: String,
    pub best_score: String,
    pub language: Option<String>,
    /// Empty when the kernel has no medal.
    pub medal_src: String,
}

impl KernelSummary {
    pub fn has_medal(&self) -> bool {
        !self.medal_src.is_empty()
    }

    pub fn best_score_value(&self) -> Result<f64> {
        self.best_score.trim().parse::<f64>().map_err(|_| {
            ProfileError::malformed(format!(
                "best score {:?} of {} is not a number",
                self.best_score, self.name
            ))
        })
    }
}

/// A commit row as read from the versions table, before any filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCommitRow {
    pub version: String,
    pub href: Option<String>,
    pub status_icon: Option<String>,
    pub committed_at: String,
    pub run_time: String,
    pub added: String,
    pub deleted: String,
}

impl RawCommitRow {
    pub fn is_failed(&self) -> bool {
        self.status_icon.as_deref() == Some(FAILED_ICON)
    }
}

pub const FAILED_ICON: &str = "times-circle";

#[derive(Debug, Clone, PartialEq)]
pub enum Version {
    Number(u64),
    Text(String),
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Number(n) => write!(f, "{}", n),
            Version::Text(t) => f.write_str(t),
        }
    }
}

/// A scored, successful commit.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    pub version: Version,
    pub score: String,
    pub committed_at: String,
    pub run_time: String,
    pub added: String,
    pub deleted: String,
    pub link: String,
}

pub const COMMIT_HEADERS: [&str; 7] = [
    "Version",
    "Score",
    "Committed at",
    "Run Time",
    "Added",
    "Deleted",
    "Link",
];

impl CommitRecord {
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.version.to_string(),
            self.score.clone(),
            self.committed_at.clone(),
            self.run_time.clone(),
            self.added.clone(),
            self.deleted.clone(),
            self.link.clone(),
        ]
    }

    pub fn score_value(&self) -> Option<f64> {
        self.score.trim().parse::<f64>().ok()
    }
}

/// Header row plus data rows, all rows as wide as the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.headers.len() {
            return Err(ProfileError::ShapeMismatch {
                expected: self.headers.len(),
                row: self.rows.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }
}
