use crate::error::{ProfileError, Result};
use crate::model::Table;

/// Column alignment marker used in the separator row.
const ALIGN_LEFT: &str = " :-- ";

pub fn link(text: &str, url: &str) -> String {
    format!("[{}]({})", text, url)
}

/// `|a|b|c|`
pub fn table_row<S: AsRef<str>>(cells: &[S]) -> String {
    let mut out = String::from("|");
    for cell in cells {
        out.push_str(cell.as_ref());
        out.push('|');
    }
    out
}

/// Render a pipe table. Every row must be exactly as wide as `headers`.
pub fn markdown_table<S: AsRef<str>>(rows: &[Vec<S>], headers: &[S]) -> Result<String> {
    if let Some((i, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, r)| r.len() != headers.len())
    {
        return Err(ProfileError::ShapeMismatch {
            expected: headers.len(),
            row: i,
            found: row.len(),
        });
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(table_row(headers));
    lines.push(table_row(&vec![ALIGN_LEFT; headers.len()]));
    lines.extend(rows.iter().map(|r| table_row(r)));
    Ok(lines.join("\n"))
}

impl Table {
    pub fn to_markdown(&self) -> Result<String> {
        markdown_table(&self.rows, &self.headers)
    }
}
