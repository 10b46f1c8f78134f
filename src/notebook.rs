use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// Turns a markdown file into another document format beside it.
pub trait DocumentConverter {
    fn convert(&self, md_path: &Path) -> Result<PathBuf>;
}

/// Writes a Jupyter notebook (nbformat 4.4) holding the markdown as one cell.
pub struct JupyterConverter;

#[derive(Serialize)]
struct Notebook<'a> {
    cells: Vec<Cell<'a>>,
    metadata: serde_json::Map<String, serde_json::Value>,
    nbformat: u32,
    nbformat_minor: u32,
}

#[derive(Serialize)]
struct Cell<'a> {
    cell_type: &'static str,
    metadata: serde_json::Map<String, serde_json::Value>,
    source: Vec<&'a str>,
}

impl DocumentConverter for JupyterConverter {
    fn convert(&self, md_path: &Path) -> Result<PathBuf> {
        let markdown = fs::read_to_string(md_path)?;
        let nb_path = replace_ext(md_path, "ipynb");
        fs::write(&nb_path, markdown_to_notebook(&markdown)?)?;
        info!("Wrote {}", nb_path.display());
        Ok(nb_path)
    }
}

pub fn markdown_to_notebook(markdown: &str) -> Result<String> {
    let notebook = Notebook {
        cells: vec![Cell {
            cell_type: "markdown",
            metadata: Default::default(),
            source: markdown.split_inclusive('\n').collect(),
        }],
        metadata: Default::default(),
        nbformat: 4,
        nbformat_minor: 4,
    };
    let mut json = serde_json::to_string_pretty(&notebook)?;
    json.push('\n');
    Ok(json)
}

/// Swap the extension of `path`; `ext` may start with a dot.
pub fn replace_ext(path: &Path, ext: &str) -> PathBuf {
    path.with_extension(ext.trim_start_matches('.'))
}
