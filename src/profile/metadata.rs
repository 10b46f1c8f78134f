use crate::error::Result;
use crate::model::{KernelSummary, Table};
use crate::render::{html, markdown};
use crate::TOP_URL;

pub const METADATA_HEADERS: [&str; 2] = ["Key", "Value"];

/// Placeholder for a kernel without a medal.
pub const NO_MEDAL: &str = "-";

pub fn author_url(author_id: &str) -> String {
    format!("{}/{}", TOP_URL, author_id)
}

/// Key/value table describing a kernel, in display order.
pub fn normalize_metadata(kernel: &KernelSummary) -> Result<Table> {
    let mut rows: Vec<(&str, String)> = vec![(
        "Author",
        markdown::link(&kernel.author_name, &author_url(&kernel.author_id)),
    )];
    if let Some(language) = &kernel.language {
        rows.push(("Language", language.clone()));
    }
    rows.extend([
        ("Best Score", kernel.best_score.clone()),
        ("Votes", kernel.votes.clone()),
        ("Medal", medal(kernel)),
        ("Comments", kernel.comments.clone()),
        ("Last Updated", kernel.last_updated.clone()),
    ]);

    let mut table = Table::new(METADATA_HEADERS);
    for (key, value) in rows {
        table.push(vec![key.to_string(), value])?;
    }
    Ok(table)
}

fn medal(kernel: &KernelSummary) -> String {
    if kernel.has_medal() {
        html::image_tag(&[
            ("alt", "medal"),
            ("src", &kernel.medal_src),
            ("align", "left"),
        ])
    } else {
        NO_MEDAL.to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn kernel() -> KernelSummary {
        KernelSummary {
            name: "Titanic Top 4% with ensemble modeling".into(),
            url: "https://www.kaggle.com/yassineghouzam/titanic-top-4-with-ensemble-modeling"
                .into(),
            author_name: "Yassine Ghouzam".into(),
            author_id: "yassineghouzam".into(),
            thumbnail_src: "https://avatars/yassine.jpg".into(),
            tier_src: Some("https://www.kaggle.com/static/images/tiers/expert.png".into()),
            votes: "4,012".into(),
            comments: "431".into(),
            last_updated: "2y ago".into(),
            best_score: "0.79425".into(),
            language: Some("Python".into()),
            medal_src: String::new(),
        }
    }

    fn value<'a>(t: &'a Table, key: &str) -> Option<&'a str> {
        t.rows.iter().find(|r| r[0] == key).map(|r| r[1].as_str())
    }

    #[test]
    fn rows_in_order() {
        let t = normalize_metadata(&kernel()).unwrap();
        let keys: Vec<&str> = t.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(
            keys,
            ["Author", "Language", "Best Score", "Votes", "Medal", "Comments", "Last Updated"]
        );
        assert_eq!(t.headers, ["Key", "Value"]);
        assert_eq!(
            value(&t, "Author"),
            Some("[Yassine Ghouzam](https://www.kaggle.com/yassineghouzam)")
        );
        assert_eq!(value(&t, "Best Score"), Some("0.79425"));
    }

    #[test]
    fn language_row_omitted_when_absent() {
        let mut k = kernel();
        k.language = None;
        let t = normalize_metadata(&k).unwrap();
        assert_eq!(t.rows.len(), 6);
        assert_eq!(value(&t, "Language"), None);
    }

    #[test]
    fn medal_placeholder() {
        let t = normalize_metadata(&kernel()).unwrap();
        assert_eq!(value(&t, "Medal"), Some("-"));
    }

    #[test]
    fn medal_image() {
        let mut k = kernel();
        k.medal_src = "https://x/y.png".into();
        let t = normalize_metadata(&k).unwrap();
        assert_eq!(
            value(&t, "Medal"),
            Some(r#"<img alt="medal" src="https://x/y.png" align="left">"#)
        );
    }
}
