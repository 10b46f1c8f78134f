use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use crate::error::Result;
use crate::fetch::PageLoader;
use crate::model::{CommitRecord, RawCommitRow, Table, Version, COMMIT_HEADERS};
use crate::parser::fields::{extract_integer, extract_public_score, format_duration};
use crate::render::html;
use crate::TOP_URL;

/// Turn the raw versions table into scored commits, newest first.
///
/// Rows without a link, failed runs and commits without a public score are
/// dropped. A commit page that fails to load is logged and dropped too; one
/// dead link does not cost the rest of the history.
pub fn normalize_commits<L: PageLoader + ?Sized>(
    rows: &[RawCommitRow],
    loader: &L,
) -> Vec<CommitRecord> {
    let pb = ProgressBar::new(rows.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} commits")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let mut commits = Vec::new();
    for row in rows {
        if let Some(commit) = normalize_row(row, loader) {
            commits.push(commit);
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    debug!("Kept {} of {} commits", commits.len(), rows.len());
    commits
}

fn normalize_row<L: PageLoader + ?Sized>(row: &RawCommitRow, loader: &L) -> Option<CommitRecord> {
    let Some(href) = row.href.as_deref() else {
        debug!("Skipping {:?}: no link", row.version);
        return None;
    };
    if row.is_failed() {
        debug!("Skipping {:?}: run failed", row.version);
        return None;
    }

    let url = format!("{}{}", TOP_URL, href);
    let page = match loader.fetch(&url) {
        Ok(page) => page,
        Err(e) => {
            warn!("Skipping {:?}: {}", row.version, e);
            return None;
        }
    };
    let Some(score) = extract_public_score(&page) else {
        debug!("Skipping {:?}: no public score", row.version);
        return None;
    };

    let version = match extract_integer(&row.version) {
        Some(n) => Version::Number(n),
        None => Version::Text(row.version.clone()),
    };

    Some(CommitRecord {
        version,
        score,
        committed_at: row.committed_at.clone(),
        run_time: format_duration(&row.run_time),
        added: row.added.clone(),
        deleted: row.deleted.clone(),
        link: html::anchor_tag("Open", &[("href", &url)]),
    })
}

/// Which commits hit the kernel's best score. Scores that don't parse never do.
pub fn best_rows(commits: &[CommitRecord], best_score: f64) -> Vec<bool> {
    commits
        .iter()
        .map(|c| c.score_value() == Some(best_score))
        .collect()
}

pub fn commit_table(commits: &[CommitRecord]) -> Result<Table> {
    let mut table = Table::new(COMMIT_HEADERS);
    for commit in commits {
        table.push(commit.cells())?;
    }
    Ok(table)
}

/// The commit history as an HTML table with the best rows highlighted.
pub fn render_commit_table(commits: &[CommitRecord], best_score: f64) -> Result<String> {
    let table = commit_table(commits)?;
    Ok(html::styled_table(&table, &best_rows(commits, best_score)))
}
