use crate::model::Table;

/// Inline style applied to every cell of a highlighted row.
pub const HIGHLIGHT_STYLE: &str = "background-color: #d5fdd5";

const THUMBNAIL_WIDTH: &str = "72";

/// `a="b" c="d"`, in the order given.
pub fn format_attributes(attrs: &[(&str, &str)]) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, v))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn image_tag(attrs: &[(&str, &str)]) -> String {
    format!("<img {}>", format_attributes(attrs))
}

pub fn anchor_tag(content: &str, attrs: &[(&str, &str)]) -> String {
    format!("<a {}>{}</a>", format_attributes(attrs), content)
}

/// Author avatar (and tier badge when known) linking to the author's profile.
pub fn thumbnail(thumbnail_src: &str, tier_src: Option<&str>, author_url: &str) -> String {
    let mut inner = image_tag(&[("src", thumbnail_src), ("width", THUMBNAIL_WIDTH)]);
    if let Some(tier) = tier_src {
        inner.push_str(&image_tag(&[("src", tier), ("width", THUMBNAIL_WIDTH)]));
    }
    anchor_tag(
        &inner,
        &[("href", author_url), ("style", "display: inline-block")],
    )
}

/// Render `table` as an HTML table, inlining [`HIGHLIGHT_STYLE`] on every
/// cell of the rows flagged in `highlighted`. Missing flags count as false.
///
/// Markdown cannot style a single row, so tables that need highlighting go
/// through this pass instead of [`crate::render::markdown::markdown_table`].
/// The output contains no blank lines so it stays one HTML block.
pub fn styled_table(table: &Table, highlighted: &[bool]) -> String {
    let mut out = String::from("<table>\n<thead>\n<tr>");
    for h in &table.headers {
        out.push_str(&format!("<th>{}</th>", h));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for (i, row) in table.rows.iter().enumerate() {
        let open = if highlighted.get(i).copied().unwrap_or(false) {
            format!("<td style=\"{}\">", HIGHLIGHT_STYLE)
        } else {
            "<td>".to_string()
        };
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&open);
            out.push_str(cell);
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>");
    out
}
