mod error;
mod fetch;
mod github_action;
mod model;
mod notebook;
mod parser;
mod pipeline;
mod profile;
mod render;
mod settings;

use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use fetch::{HttpLoader, ListingFetcher};
use notebook::JupyterConverter;
use settings::{Cli, Settings};

pub const TOP_URL: &str = "https://www.kaggle.com";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let on_action = github_action::on_github_action();
    let settings = if on_action {
        Settings::from_action_inputs(None)?
    } else {
        Settings::from(Cli::parse())
    };

    let loader = HttpLoader::new().context("Failed to create HTTP client")?;
    let fetcher = ListingFetcher::new(&loader);
    let out = pipeline::run(
        &settings,
        &fetcher,
        &loader,
        &JupyterConverter,
        chrono::Utc::now(),
    )?;

    println!(
        "Profiled {} kernels of {} ({} skipped) in {:.1}s",
        out.profiled,
        settings.comp_slug,
        out.failed,
        t0.elapsed().as_secs_f64()
    );
    println!("Markdown: {}", out.markdown_path.display());
    println!("Notebook: {}", out.notebook_path.display());

    if on_action {
        github_action::set_action_outputs(&[
            ("markdown_path", out.markdown_path.display().to_string()),
            ("markdown_name", file_name(&out.markdown_path)),
            ("notebook_path", out.notebook_path.display().to_string()),
            ("notebook_name", file_name(&out.notebook_path)),
        ]);
    }

    Ok(())
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
