use super::open_advisor;
use crate::output::{print_json, print_store_warnings};
use crate::project::resolve_project;
use anyhow::Context;
use stackwise_core::context::ProjectContext;
use stackwise_core::requirements::ProjectRequest;
use stackwise_core::types::ProjectType;
use std::path::Path;

pub fn run(
    home: Option<&Path>,
    project: Option<&Path>,
    learn: bool,
    json: bool,
) -> anyhow::Result<()> {
    let dir = resolve_project(project);
    if !dir.is_dir() {
        anyhow::bail!("project directory '{}' does not exist", dir.display());
    }
    let dir = dir.canonicalize().unwrap_or(dir);

    let context = ProjectContext::scan(&dir);
    let name = context
        .name
        .clone()
        .unwrap_or_else(|| dir.display().to_string());
    let request = ProjectRequest::new(
        ProjectType::Webapp,
        format!("Analyzing existing project in {name}"),
    );

    let mut advisor = open_advisor(home)?;
    let rec = advisor
        .recommend(&request, &context, learn)
        .with_context(|| format!("failed to analyze '{}'", dir.display()))?;

    if json {
        let value = serde_json::json!({
            "project": dir,
            "context": context,
            "recommendation": rec,
        });
        return print_json(&value);
    }

    print_store_warnings(&rec.store_warnings);
    println!("Project:    {name}");
    println!("Path:       {}", dir.display());
    if !context.detected_languages.is_empty() {
        let langs: Vec<&str> = context.detected_languages.iter().map(String::as_str).collect();
        println!("Languages:  {}", langs.join(", "));
    }
    if !context.package_managers.is_empty() {
        let pms: Vec<&str> = context.package_managers.iter().map(String::as_str).collect();
        println!("Packaging:  {}", pms.join(", "));
    }
    println!();
    super::recommend::render(&rec);
    Ok(())
}
