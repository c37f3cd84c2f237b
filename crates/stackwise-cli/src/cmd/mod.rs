pub mod analyze;
pub mod config;
pub mod integrations;
pub mod preferences;
pub mod prompt;
pub mod recommend;
pub mod reset;
pub mod validate;

use anyhow::Context;
use stackwise_core::{paths, store::FileStore, Advisor};
use std::path::{Path, PathBuf};

pub fn resolve_home(home: Option<&Path>) -> anyhow::Result<PathBuf> {
    paths::resolve_home(home).context("failed to locate home directory")
}

pub fn open_advisor(home: Option<&Path>) -> anyhow::Result<Advisor<FileStore>> {
    let home = resolve_home(home)?;
    Advisor::open(&home).context("failed to open advisor")
}
