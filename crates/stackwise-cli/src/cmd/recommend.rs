use super::open_advisor;
use crate::output::{print_json, print_section, print_store_warnings, title};
use crate::project::resolve_project;
use anyhow::Context;
use stackwise_core::context::ProjectContext;
use stackwise_core::requirements::ProjectRequest;
use stackwise_core::types::{Device, ProjectType};
use stackwise_core::validation::{ValidationReport, ValidationStatus};
use stackwise_core::Recommendation;
use std::path::{Path, PathBuf};

pub struct RecommendArgs {
    pub description: String,
    pub project_type: ProjectType,
    pub devices: Vec<Device>,
    pub project: Option<PathBuf>,
    pub learn: bool,
}

pub fn run(home: Option<&Path>, args: RecommendArgs, json: bool) -> anyhow::Result<()> {
    if args.description.trim().is_empty() {
        anyhow::bail!("--description must not be empty");
    }

    let dir = resolve_project(args.project.as_deref());
    if !dir.is_dir() {
        anyhow::bail!("project directory '{}' does not exist", dir.display());
    }
    let context = ProjectContext::scan(&dir);

    let mut request = ProjectRequest::new(args.project_type, args.description);
    if !args.devices.is_empty() {
        request = request.with_devices(args.devices);
    }

    let mut advisor = open_advisor(home)?;
    let rec = advisor
        .recommend(&request, &context, args.learn)
        .context("failed to build recommendation")?;

    if json {
        print_json(&rec)?;
    } else {
        print_store_warnings(&rec.store_warnings);
        render(&rec);
    }
    Ok(())
}

pub fn render(rec: &Recommendation) {
    let stack = &rec.recommended_stack;

    println!("Recommended stack:");
    for (category, tech) in stack.entries() {
        let label = title(category.as_str());
        match stack.confidence(category) {
            Some(c) => println!("  {label:<18} {tech} ({:.0}%)", c * 100.0),
            None => println!("  {label:<18} {tech}"),
        }
    }
    for (key, tech) in &stack.extra {
        println!("  {:<18} {tech}", title(key));
    }
    if !stack.tools.is_empty() {
        println!();
        println!("Tools: {}", stack.tools.join(", "));
    }

    print_section("Compatibility issues", &stack.compatibility_issues);
    print_section("Open source replacements", &stack.open_source_replacements);
    print_section("Reasoning", &rec.reasoning);
    print_section("Warnings", &rec.warnings);

    if !rec.alternatives.is_empty() {
        println!();
        println!("Alternatives:");
        for (category, alts) in &rec.alternatives {
            println!("  {:<18} {}", title(category), alts.join(", "));
        }
    }

    let c = &rec.estimated_complexity;
    println!();
    println!(
        "Complexity: {} (score {:.1}), estimated {}",
        c.level.as_str(),
        c.score,
        c.estimated_dev_time
    );

    render_validation(&rec.mcp_validation);
}

fn render_validation(report: &ValidationReport) {
    match report.status {
        ValidationStatus::Success if !report.validated_by.is_empty() => {
            println!();
            println!("Validated by: {}", report.validated_by.join(", "));
            let findings = &report.findings;
            print_section("Security", &findings.security_issues);
            print_section("Validation warnings", &findings.compatibility_warnings);
            print_section("Validation recommendations", &findings.recommendations);
            print_section("License issues", &findings.license_issues);
        }
        ValidationStatus::NoIntegrations => {
            println!();
            println!("External validation: no integrations available (see `stackwise integrations`)");
        }
        _ => {}
    }
}
