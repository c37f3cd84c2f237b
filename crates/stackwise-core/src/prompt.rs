//! XML-structured analysis request for handing a project to an external LLM.

use crate::context::ProjectContext;
use crate::requirements::ProjectRequest;
use crate::types::Device;
use std::fmt::Write;

const ANALYSIS_SWITCHES: &[&str] = &[
    "recommend_stack",
    "consider_compatibility",
    "apply_open_source_bias",
    "provide_reasoning",
    "include_alternatives",
    "estimate_complexity",
];

const OUTPUT_SECTIONS: &[&str] = &[
    "Recommended technology stack with justification",
    "Compatibility warnings (if any)",
    "Alternative options for each component",
    "Security considerations",
    "Development complexity estimate",
    "Learning curve assessment",
];

/// Escape the five XML special characters.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn join_escaped<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    escape_xml(&items.into_iter().collect::<Vec<_>>().join(", "))
}

pub fn analysis_prompt(request: &ProjectRequest, context: &ProjectContext) -> String {
    let devices: Vec<&str> = if request.devices.is_empty() {
        vec![Device::Web.as_str()]
    } else {
        request.devices.iter().map(|d| d.as_str()).collect()
    };

    let mut out = String::new();
    out.push_str("<tech_analysis_request>\n<project_context>\n");
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "<project_name>{}</project_name>",
        escape_xml(context.name.as_deref().unwrap_or("Unknown"))
    );
    let _ = writeln!(out, "<project_type>{}</project_type>", request.project_type);
    let _ = writeln!(out, "<target_devices>{}</target_devices>", join_escaped(devices));
    let _ = writeln!(
        out,
        "<description>{}</description>",
        escape_xml(&request.description)
    );
    let _ = writeln!(
        out,
        "<existing_tech>{}</existing_tech>",
        join_escaped(context.detected_languages.iter().map(String::as_str))
    );
    let _ = writeln!(
        out,
        "<package_managers>{}</package_managers>",
        join_escaped(context.package_managers.iter().map(String::as_str))
    );
    out.push_str("</project_context>\n\n<analysis_requirements>\n");
    for switch in ANALYSIS_SWITCHES {
        let _ = writeln!(out, "<{switch}>true</{switch}>");
    }
    out.push_str("</analysis_requirements>\n\n<output_format>\n");
    out.push_str(
        "Please analyze the project context and provide recommendations in the following structure:\n",
    );
    for (i, section) in OUTPUT_SECTIONS.iter().enumerate() {
        let _ = writeln!(out, "{}. {section}", i + 1);
    }
    out.push_str("</output_format>\n</tech_analysis_request>\n");
    out
}
