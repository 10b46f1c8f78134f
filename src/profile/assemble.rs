use chrono::{DateTime, Utc};

use super::commits::render_commit_table;
use super::metadata::{author_url, normalize_metadata};
use crate::error::Result;
use crate::model::{CommitRecord, KernelSummary};
use crate::render::{html, markdown};

pub const DESCRIPTION: &str = "\
## My GitHub repository: [harupy/kernel-profiler][kernel-profiler] automatically updates this \
notebook by using [GitHub Actions][actions] and [Kaggle API][kaggle-api]. Any feedback would \
be appreciated.

[kernel-profiler]: https://github.com/harupy/kernel-profiler
[actions]: https://github.com/features/actions
[kaggle-api]: https://github.com/Kaggle/kaggle-api";

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S (UTC)";

/// One kernel's section of the report.
pub fn assemble_profile(
    kernel_link: &str,
    thumbnail: &str,
    metadata_table: &str,
    commit_table: &str,
) -> String {
    format!(
        "<br>

# {kernel_link}

{thumbnail}

### Kernel Information

{metadata_table}

### Commit History

The highlighted row(s) corresponds to the best score.

{commit_table}"
    )
}

/// Render a kernel and its scored commits into a profile section.
pub fn render_profile(kernel: &KernelSummary, commits: &[CommitRecord]) -> Result<String> {
    let best_score = kernel.best_score_value()?;
    let metadata_table = normalize_metadata(kernel)?.to_markdown()?;
    let commit_table = render_commit_table(commits, best_score)?;
    let thumbnail = html::thumbnail(
        &kernel.thumbnail_src,
        kernel.tier_src.as_deref(),
        &author_url(&kernel.author_id),
    );
    let kernel_link = markdown::link(&kernel.name, &kernel.url);

    Ok(assemble_profile(
        &kernel_link,
        &thumbnail,
        &metadata_table,
        &commit_table,
    ))
}

pub fn timestamp_line(now: DateTime<Utc>) -> String {
    format!("## Last Updated: {}", now.format(TIMESTAMP_FORMAT))
}

/// The whole report: description, timestamp, then every profile in order.
pub fn assemble_document(profiles: &[String], now: DateTime<Utc>) -> String {
    let mut parts = vec![DESCRIPTION.to_string(), timestamp_line(now)];
    parts.extend(profiles.iter().cloned());
    parts.join("\n\n")
}
