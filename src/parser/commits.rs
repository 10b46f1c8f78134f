use std::sync::LazyLock;

use regex::{Captures, Regex};
use scraper::{ElementRef, Html, Selector};

use super::listing::{first, text};
use crate::error::{ProfileError, Result};
use crate::model::RawCommitRow;

/// Class prefix of the versions table; the suffix is a generated hash.
const VERSIONS_TABLE_CLASS: &str = "VersionsPaneContent_IdeVersionsTable";

static TABLE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(table|thead|tbody)\b").unwrap());
static TABLE_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(table|thead|tbody)\s*>").unwrap());

static TABLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&format!(
        r#"div[data-tag="table"][class*="{}"]"#,
        VERSIONS_TABLE_CLASS
    ))
    .unwrap()
});
static ROWS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[data-tag="tbody"] > div"#).unwrap());
static STATUS_ICON: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a:nth-of-type(1) > svg").unwrap());
static VERSION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a:nth-of-type(2)").unwrap());
static RUN_TIME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a:nth-of-type(4)").unwrap());
static ADDED: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span:nth-of-type(2)").unwrap());
static DELETED: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span:nth-of-type(3)").unwrap());

/// Read every row of the versions table on a kernel page, in page order.
///
/// The table is missing only when the versions pane never opened, which is
/// reported as malformed markup.
pub fn extract_commit_rows(markup: &str) -> Result<Vec<RawCommitRow>> {
    let doc = Html::parse_document(&detable(markup));
    let table = doc
        .select(&TABLE)
        .next()
        .ok_or_else(|| ProfileError::malformed("versions table not found"))?;

    table
        .select(&ROWS)
        .enumerate()
        .map(|(i, row)| extract_row(row).map_err(|e| at_row(e, i)))
        .collect()
}

fn extract_row(row: ElementRef<'_>) -> Result<RawCommitRow> {
    let version = first(row, &VERSION, "version link")?;
    let committed_at = row
        .children()
        .filter_map(ElementRef::wrap)
        .find(|c| c.value().name() == "span")
        .map(text)
        .ok_or_else(|| ProfileError::malformed("missing commit date"))?;

    Ok(RawCommitRow {
        version: text(version),
        href: version.value().attr("href").map(str::to_string),
        status_icon: row
            .select(&STATUS_ICON)
            .next()
            .and_then(|svg| svg.value().attr("data-icon"))
            .map(str::to_string),
        committed_at,
        run_time: text(first(row, &RUN_TIME, "run time")?),
        added: text(first(row, &ADDED, "added lines")?),
        deleted: text(first(row, &DELETED, "deleted lines")?),
    })
}

fn at_row(err: ProfileError, i: usize) -> ProfileError {
    match err {
        ProfileError::Malformed(m) => ProfileError::Malformed(format!("commit row {}: {}", i, m)),
        other => other,
    }
}

/// The versions table holds `<div>` rows directly under `<tbody>`. An HTML5
/// parser would hoist those out of the table, so table tags are rewritten to
/// tagged `<div>`s before parsing.
fn detable(markup: &str) -> String {
    let opened = TABLE_OPEN_RE.replace_all(markup, |c: &Captures<'_>| {
        format!(r#"<div data-tag="{}""#, c[1].to_ascii_lowercase())
    });
    TABLE_CLOSE_RE.replace_all(&opened, "</div>").into_owned()
}
