use super::resolve_home;
use crate::output::print_json;
use anyhow::Context;
use stackwise_core::store::{AdvisorStore, FileStore};
use std::path::Path;

pub fn run(home: Option<&Path>, yes: bool, json: bool) -> anyhow::Result<()> {
    if !yes {
        anyhow::bail!(
            "reset deletes all learned preferences, patterns and compatibility rules; \
             re-run with --yes to confirm"
        );
    }

    let home = resolve_home(home)?;
    let mut store = FileStore::new(&home);
    store.reset().context("failed to reset advisor state")?;

    if json {
        let value = serde_json::json!({
            "reset": true,
            "files": store.paths(),
        });
        print_json(&value)?;
    } else {
        println!("Advisor state reset. Defaults will be restored on next use.");
    }
    Ok(())
}
