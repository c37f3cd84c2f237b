use super::resolve_home;
use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use stackwise_core::config::{AdvisorConfig, WarnLevel};
use stackwise_core::paths;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration
    Show,

    /// Validate the config for common mistakes
    Validate,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(home: Option<&Path>, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    let home = resolve_home(home)?;
    match subcmd {
        ConfigSubcommand::Show => show(&home, json),
        ConfigSubcommand::Validate => validate(&home, json),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(home: &Path, json: bool) -> anyhow::Result<()> {
    let config = AdvisorConfig::load(home).context("failed to load config")?;
    let path = paths::config_path(home);

    if json {
        let value = serde_json::json!({
            "path": path,
            "exists": path.exists(),
            "config": config,
        });
        return print_json(&value);
    }

    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# {} (not present, showing defaults)", path.display());
    }
    let yaml = serde_yaml::to_string(&config).context("failed to render config")?;
    print!("{yaml}");
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(home: &Path, json: bool) -> anyhow::Result<()> {
    let config = AdvisorConfig::load(home).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    let has_errors = warnings.iter().any(|w| w.level == WarnLevel::Error);
    if has_errors {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}
