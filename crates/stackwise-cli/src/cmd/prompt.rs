use crate::output::print_json;
use anyhow::Context;
use stackwise_core::context::ProjectContext;
use stackwise_core::prompt::analysis_prompt;
use stackwise_core::requirements::ProjectRequest;
use stackwise_core::types::ProjectType;
use std::path::Path;

pub fn run(
    description: &str,
    project_type: ProjectType,
    project: Option<&Path>,
    output: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let context = match project {
        Some(dir) => {
            if !dir.is_dir() {
                anyhow::bail!("project directory '{}' does not exist", dir.display());
            }
            ProjectContext::scan(dir)
        }
        None => ProjectContext::default(),
    };

    let request = ProjectRequest::new(project_type, description);
    let prompt = analysis_prompt(&request, &context);

    if let Some(path) = output {
        std::fs::write(path, &prompt)
            .with_context(|| format!("failed to write {}", path.display()))?;
        if json {
            print_json(&serde_json::json!({ "written": path }))?;
        } else {
            println!("Prompt written to {}", path.display());
        }
    } else if json {
        print_json(&serde_json::json!({ "prompt": prompt }))?;
    } else {
        print!("{prompt}");
    }
    Ok(())
}
