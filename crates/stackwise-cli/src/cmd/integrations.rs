use super::open_advisor;
use crate::output::{print_json, print_table};
use std::path::Path;

pub fn run(home: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let advisor = open_advisor(home)?;
    let enabled = advisor.config().validation.enabled;
    let statuses = advisor.integrations();

    if json {
        let value = serde_json::json!({
            "enabled": enabled,
            "integrations": statuses,
        });
        return print_json(&value);
    }

    if statuses.is_empty() {
        println!("No integrations configured.");
        return Ok(());
    }

    let rows = statuses
        .iter()
        .map(|s| {
            let status = if s.available { "available" } else { "not available" };
            vec![s.name.clone(), status.to_string()]
        })
        .collect();
    print_table(&["INTEGRATION", "STATUS"], rows);

    let active = statuses.iter().filter(|s| s.available).count();
    println!();
    println!("{active}/{} integrations active", statuses.len());
    if !enabled {
        println!("External validation is disabled in config (validation.enabled = false).");
    } else if active == 0 {
        println!(
            "Install semgrep or put an mcp-context7 / mcp-mcpref server on PATH to enable validation."
        );
    }
    Ok(())
}
