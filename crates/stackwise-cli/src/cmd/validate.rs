use super::open_advisor;
use crate::output::{print_json, print_section, print_store_warnings, title};
use anyhow::Context;
use stackwise_core::stack::RecommendedStack;
use stackwise_core::types::Category;
use std::path::Path;

pub struct StackArgs {
    pub frontend: Option<String>,
    pub backend: Option<String>,
    pub database: Option<String>,
    pub hosting: Option<String>,
}

impl StackArgs {
    fn into_stack(self) -> RecommendedStack {
        let mut stack = RecommendedStack::new();
        let given = [
            (Category::Frontend, self.frontend),
            (Category::Backend, self.backend),
            (Category::Database, self.database),
            (Category::Hosting, self.hosting),
        ];
        for (category, tech) in given {
            if let Some(tech) = tech {
                let tech = tech.trim().to_lowercase();
                if !tech.is_empty() {
                    stack.set(category, tech);
                }
            }
        }
        stack
    }
}

pub fn run(home: Option<&Path>, args: StackArgs, json: bool) -> anyhow::Result<()> {
    let stack = args.into_stack();
    if stack.entries().next().is_none() {
        anyhow::bail!(
            "specify at least one of --frontend, --backend, --database or --hosting \
             (e.g. stackwise validate --frontend react --backend fastapi)"
        );
    }

    let advisor = open_advisor(home)?;
    let check = advisor
        .validate_stack(stack)
        .context("failed to validate stack")?;

    if json {
        return print_json(&check);
    }

    print_store_warnings(&check.store_warnings);
    println!("Stack:");
    for (category, tech) in check.stack.entries() {
        println!("  {:<18} {tech}", title(category.as_str()));
    }

    if check.compatibility_issues.is_empty() {
        println!();
        println!("No compatibility issues found.");
    } else {
        print_section("Compatibility issues", &check.compatibility_issues);
    }
    print_section("Warnings", &check.warnings);

    let additions: Vec<String> = check
        .suggested_additions
        .iter()
        .map(|(category, tech)| format!("{}: {tech}", title(category.as_str())))
        .collect();
    print_section("Suggested additions", &additions);
    Ok(())
}
