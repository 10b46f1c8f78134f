use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::{ProfileError, Result};
use crate::model::KernelSummary;
use crate::TOP_URL;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

selector!(ITEM, "div.block-link--bordered");
selector!(SCORE, "div.kernel-list-item__score");
selector!(NAME, "div.kernel-list-item__name");
selector!(ANCHOR, "a.block-link__anchor");
selector!(TOOLTIP, "span.tooltip-container");
selector!(AVATAR, "a.avatar");
selector!(THUMBNAIL, "img.avatar__thumbnail");
selector!(TIER, "img.avatar__tier");
selector!(VOTES, "span.vote-button__vote-count");
selector!(COMMENTS, "a.kernel-list-item__info-block--comment");
selector!(UPDATED, "div.kernel-list-item__details > span");
selector!(MEDAL, "img.kernel-list-item__medals");

/// Parse every scored kernel on a competition's notebook listing, in page order.
///
/// Items without a score (unsubmitted notebooks) are skipped; a scored item
/// missing any required field makes the whole listing malformed.
pub fn extract_kernels(markup: &str) -> Result<Vec<KernelSummary>> {
    let doc = Html::parse_document(markup);
    doc.select(&ITEM)
        .filter(|item| item.select(&SCORE).next().is_some())
        .map(extract_kernel)
        .collect()
}

fn extract_kernel(item: ElementRef<'_>) -> Result<KernelSummary> {
    let name = text(first(item, &NAME, "kernel name")?);
    let href = attr(first(item, &ANCHOR, "kernel anchor")?, "href")?;
    let ctx = |what: &str| format!("{} of {}", what, name);

    let tooltips: Vec<ElementRef<'_>> = item.select(&TOOLTIP).collect();
    let author_name = tooltips
        .first()
        .and_then(|t| t.value().attr("data-tooltip"))
        .map(|s| s.trim().to_string())
        .ok_or_else(|| ProfileError::malformed(ctx("author name")))?;
    let language = tooltips
        .get(2)
        .map(|t| text(*t))
        .filter(|l| !l.is_empty());

    let author_id = attr(first(item, &AVATAR, &ctx("avatar"))?, "href")?
        .trim_matches('/')
        .to_string();
    let thumbnail_src = attr(first(item, &THUMBNAIL, &ctx("thumbnail"))?, "src")?;
    let tier_src = item
        .select(&TIER)
        .next()
        .and_then(|t| t.value().attr("src"))
        .map(|src| format!("{}{}", TOP_URL, src));

    let medal_src = item
        .select(&MEDAL)
        .next()
        .and_then(|m| m.value().attr("src"))
        // The discussion medal is the larger rendering of the same badge.
        .map(|src| format!("{}{}", TOP_URL, src.replace("notebooks", "discussion")))
        .unwrap_or_default();

    Ok(KernelSummary {
        url: format!("{}{}", TOP_URL, href),
        author_name,
        author_id,
        thumbnail_src,
        tier_src,
        votes: text(first(item, &VOTES, &ctx("vote count"))?),
        comments: text(first(item, &COMMENTS, &ctx("comment count"))?),
        last_updated: text(first(item, &UPDATED, &ctx("last updated"))?),
        best_score: text(first(item, &SCORE, &ctx("score"))?),
        language,
        medal_src,
        name,
    })
}

pub(crate) fn first<'a>(
    el: ElementRef<'a>,
    sel: &Selector,
    what: &str,
) -> Result<ElementRef<'a>> {
    el.select(sel)
        .next()
        .ok_or_else(|| ProfileError::malformed(format!("missing {}", what)))
}

pub(crate) fn attr(el: ElementRef<'_>, name: &str) -> Result<String> {
    el.value()
        .attr(name)
        .map(str::to_string)
        .ok_or_else(|| {
            ProfileError::malformed(format!("<{}> has no {} attribute", el.value().name(), name))
        })
}

pub(crate) fn text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> String {
        std::fs::read_to_string("tests/fixtures/listing.html").unwrap()
    }

    #[test]
    fn listing_fixture() {
        let kernels = extract_kernels(&fixture()).unwrap();
        // The third item has no score and is skipped.
        assert_eq!(kernels.len(), 3);

        let k = &kernels[0];
        assert_eq!(k.name, "Titanic Top 4% with ensemble modeling");
        assert_eq!(
            k.url,
            "https://www.kaggle.com/yassineghouzam/titanic-top-4-with-ensemble-modeling"
        );
        assert_eq!(k.author_name, "Yassine Ghouzam");
        assert_eq!(k.author_id, "yassineghouzam");
        assert_eq!(
            k.thumbnail_src,
            "https://storage.googleapis.com/kaggle-avatars/thumbnails/yassine.jpg"
        );
        assert_eq!(
            k.tier_src.as_deref(),
            Some("https://www.kaggle.com/static/images/tiers/expert.png")
        );
        assert_eq!(k.votes, "4,012");
        assert_eq!(k.comments, "431");
        assert_eq!(k.last_updated, "2y ago");
        assert_eq!(k.best_score, "0.79425");
        assert_eq!(k.language.as_deref(), Some("Python"));
        assert_eq!(
            k.medal_src,
            "https://www.kaggle.com/static/images/medals/discussion/goldl@1x.png"
        );
    }

    #[test]
    fn kernel_without_medal_or_language() {
        let kernels = extract_kernels(&fixture()).unwrap();
        let k = &kernels[1];
        assert_eq!(k.name, "A Data Science Framework");
        assert_eq!(k.medal_src, "");
        assert!(!k.has_medal());
        assert_eq!(k.language, None);
        assert_eq!(k.tier_src, None);
    }

    #[test]
    fn page_order_kept() {
        let kernels = extract_kernels(&fixture()).unwrap();
        let scores: Vec<&str> = kernels.iter().map(|k| k.best_score.as_str()).collect();
        assert_eq!(scores, ["0.79425", "0.77990", "0.80382"]);
    }

    #[test]
    fn missing_avatar_is_malformed() {
        let markup = r#"<div class="block-link--bordered">
            <a class="block-link__anchor" href="/u/k"></a>
            <div class="kernel-list-item__name">K</div>
            <div class="kernel-list-item__score">0.5</div>
            <span class="tooltip-container" data-tooltip="U">U</span>
        </div>"#;
        let err = extract_kernels(markup).unwrap_err();
        assert!(matches!(err, ProfileError::Malformed(m) if m.contains("avatar")));
    }

    #[test]
    fn empty_page() {
        assert!(extract_kernels("<html></html>").unwrap().is_empty());
    }
}
