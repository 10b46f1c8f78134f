use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Config, Environment};
use serde::Deserialize;

const DEFAULT_MAX_NUM_KERNELS: usize = 20;
const DEFAULT_OUT_DIR: &str = "output";

#[derive(Parser, Debug)]
#[command(name = "kernel_profiler", about = "Profile the top notebooks of a Kaggle competition")]
pub struct Cli {
    /// Competition slug (e.g. titanic)
    #[arg(short = 'c', long)]
    pub comp_slug: String,

    /// Maximum number of kernels to profile
    #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_NUM_KERNELS)]
    pub max_num_kernels: usize,

    /// Directory to store the output
    #[arg(short = 'o', long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub comp_slug: String,
    pub max_num_kernels: usize,
    pub out_dir: PathBuf,
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Self {
            comp_slug: cli.comp_slug,
            max_num_kernels: cli.max_num_kernels,
            out_dir: cli.out_dir,
        }
    }
}

impl Settings {
    /// Read `INPUT_COMP_SLUG`, `INPUT_MAX_NUM_KERNELS` and `INPUT_OUT_DIR`, the
    /// way a GitHub Action passes its `with:` inputs. `env` replaces the
    /// process environment when given.
    pub fn from_action_inputs(env: Option<HashMap<String, String>>) -> Result<Self> {
        let settings = Config::builder()
            .set_default("max_num_kernels", DEFAULT_MAX_NUM_KERNELS as i64)?
            .set_default("out_dir", DEFAULT_OUT_DIR)?
            .add_source(Environment::with_prefix("INPUT").try_parsing(true).source(env))
            .build()
            .context("Failed to read action inputs")?;
        settings
            .try_deserialize()
            .context("Invalid action inputs (INPUT_COMP_SLUG is required)")
    }
}
