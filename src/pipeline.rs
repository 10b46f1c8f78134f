use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::error::ProfileError;
use crate::fetch::{KernelPage, PageFetcher, PageLoader};
use crate::notebook::DocumentConverter;
use crate::parser::commits::extract_commit_rows;
use crate::parser::fields::extract_best_public_score;
use crate::profile::assemble::{assemble_document, render_profile};
use crate::profile::commits::normalize_commits;
use crate::settings::Settings;

/// Raw markup of the page being processed when a failure happened.
pub const DIAGNOSTIC_FILE: &str = "error.html";

#[derive(Debug)]
pub struct RunOutput {
    pub markdown_path: PathBuf,
    pub notebook_path: PathBuf,
    pub profiled: usize,
    pub failed: usize,
}

/// Profile the top kernels of a competition and write the report.
///
/// A kernel that fails is logged, its page saved to [`DIAGNOSTIC_FILE`], and
/// skipped. A listing that fails aborts the run.
pub fn run(
    settings: &Settings,
    fetcher: &dyn PageFetcher,
    loader: &dyn PageLoader,
    converter: &dyn DocumentConverter,
    now: DateTime<Utc>,
) -> Result<RunOutput> {
    let out_dir = &settings.out_dir;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let kernels = match fetcher.list_top_kernels(&settings.comp_slug, settings.max_num_kernels) {
        Ok(kernels) => kernels,
        Err(failure) => {
            if let Some(markup) = &failure.markup {
                dump_diagnostic(out_dir, markup);
            }
            return Err(failure).context("Failed to list kernels");
        }
    };

    let mut profiles = Vec::new();
    let mut failed = 0;
    for (i, item) in kernels.enumerate() {
        let page = match item {
            Ok(page) => page,
            Err(failure) => {
                error!("Kernel {} could not be loaded: {}", i + 1, failure.error);
                if let Some(markup) = &failure.markup {
                    dump_diagnostic(out_dir, markup);
                }
                failed += 1;
                continue;
            }
        };

        info!("Processing ({}) {}", i + 1, page.summary.name);
        match profile_kernel(&page, loader) {
            Ok(profile) => profiles.push(profile),
            Err(e) => {
                error!("Skipping {}: {}", page.summary.url, e);
                dump_diagnostic(out_dir, &page.markup);
                failed += 1;
            }
        }
    }

    let markdown_path = out_dir.join(format!("{}.md", settings.comp_slug));
    fs::write(&markdown_path, assemble_document(&profiles, now))
        .with_context(|| format!("Failed to write {}", markdown_path.display()))?;
    info!("Wrote {}", markdown_path.display());

    let notebook_path = converter
        .convert(&markdown_path)
        .context("Failed to convert the report to a notebook")?;

    Ok(RunOutput {
        markdown_path,
        notebook_path,
        profiled: profiles.len(),
        failed,
    })
}

/// Build the profile section of one kernel from its page.
pub fn profile_kernel(page: &KernelPage, loader: &dyn PageLoader) -> Result<String, ProfileError> {
    let rows = extract_commit_rows(&page.markup)?;

    let listed = page.summary.best_score_value()?;
    if let Some(best) = extract_best_public_score(&page.markup) {
        if best.parse::<f64>().ok() != Some(listed) {
            warn!(
                "{}: listing shows best score {} but the kernel page has {}",
                page.summary.name, page.summary.best_score, best
            );
        }
    }

    let commits = normalize_commits(&rows, loader);
    render_profile(&page.summary, &commits)
}

fn dump_diagnostic(out_dir: &Path, markup: &str) {
    let path = out_dir.join(DIAGNOSTIC_FILE);
    match fs::write(&path, markup) {
        Ok(()) => info!("Saved page source to {}", path.display()),
        Err(e) => warn!("Could not save page source to {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::fetch::tests::FakeLoader;
    use crate::fetch::{listing_url, ListingFetcher};
    use crate::notebook::JupyterConverter;

    const YASSINE: &str =
        "https://www.kaggle.com/yassineghouzam/titanic-top-4-with-ensemble-modeling";
    const CDEOTTE: &str = "https://www.kaggle.com/cdeotte/titanic-using-name-only-0-81818";

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
    }

    fn loader() -> FakeLoader {
        FakeLoader::default()
            .with(&listing_url("titanic"), &fixture("listing.html"))
            .with(CDEOTTE, "<html><body>versions pane did not open</body></html>")
            .with(YASSINE, &fixture("kernel.html"))
            .with(&format!("{}?scriptVersionId=700", YASSINE), r#""publicScore":"0.79425""#)
            .with(&format!("{}?scriptVersionId=300", YASSINE), r#""publicScore":"0.77511""#)
    }

    fn settings(out_dir: &Path, max: usize) -> Settings {
        Settings {
            comp_slug: "titanic".into(),
            max_num_kernels: max,
            out_dir: out_dir.to_path_buf(),
        }
    }

    #[test]
    fn end_to_end_with_one_broken_kernel() {
        let dir = tempfile::tempdir().unwrap();
        let loader = loader();
        let fetcher = ListingFetcher::new(&loader);
        let now = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();

        let out = run(
            &settings(dir.path(), 2),
            &fetcher,
            &loader,
            &JupyterConverter,
            now,
        )
        .unwrap();
        assert_eq!(out.profiled, 1);
        assert_eq!(out.failed, 1);
        assert_eq!(out.markdown_path, dir.path().join("titanic.md"));
        assert_eq!(out.notebook_path, dir.path().join("titanic.ipynb"));
        assert!(out.notebook_path.exists());

        let md = fs::read_to_string(&out.markdown_path).unwrap();
        assert!(md.contains(
            "\n\n## Last Updated: 2020/01/02 03:04:05 (UTC)\n\n<br>\n\n# [Titanic Top 4%"
        ));
        assert!(!md.contains("Titanic using Name only"));
        let commit_link = format!(r#"<a href="{}?scriptVersionId=700">Open</a>"#, YASSINE);
        assert!(md.contains(&commit_link));
        let medal = format!(
            r#"|Medal|<img alt="medal" src="{}/static/images/medals/discussion/goldl@1x.png" align="left">|"#,
            crate::TOP_URL
        );
        assert!(md.contains(&medal));

        let dumped = fs::read_to_string(dir.path().join(DIAGNOSTIC_FILE)).unwrap();
        assert!(dumped.contains("versions pane did not open"));
    }

    #[test]
    fn rerun_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let loader = loader();
        let fetcher = ListingFetcher::new(&loader);
        let now = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        let s = settings(dir.path(), 2);

        let first = run(&s, &fetcher, &loader, &JupyterConverter, now).unwrap();
        let a = fs::read_to_string(&first.markdown_path).unwrap();
        let second = run(&s, &fetcher, &loader, &JupyterConverter, now).unwrap();
        assert_eq!(a, fs::read_to_string(&second.markdown_path).unwrap());
    }

    #[test]
    fn missing_listing_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FakeLoader::default();
        let fetcher = ListingFetcher::new(&loader);
        let err = run(&settings(dir.path(), 2), &fetcher, &loader, &JupyterConverter, Utc::now());
        assert!(err.is_err());
        assert!(!dir.path().join("titanic.md").exists());
    }

    #[test]
    fn profile_kernel_fixture() {
        let loader = loader();
        let summary = crate::parser::listing::extract_kernels(&fixture("listing.html"))
            .unwrap()
            .remove(0);
        let page = KernelPage {
            summary,
            markup: fixture("kernel.html"),
        };
        let profile = profile_kernel(&page, &loader).unwrap();
        assert_eq!(profile.matches("<tr><td").count(), 2);
        assert_eq!(profile.matches(crate::render::html::HIGHLIGHT_STYLE).count(), 7);
    }
}
