//! Draft stack generation.
//!
//! Each primary category is chosen in order frontend → backend → database →
//! hosting: an explicit mention in the description wins outright, otherwise a
//! category-specific fallback applies. Confidence records which path was
//! taken.

use crate::context::ProjectContext;
use crate::error::Result;
use crate::preferences::Preferences;
use crate::requirements::Requirements;
use crate::stack::RecommendedStack;
use crate::types::{Category, Device};
use std::collections::BTreeSet;

pub const CONFIDENCE_USER_SPECIFIED: f64 = 0.9;
pub const CONFIDENCE_FRONTEND_FALLBACK: f64 = 0.8;
pub const CONFIDENCE_BACKEND_FALLBACK: f64 = 0.7;
pub const CONFIDENCE_DATABASE_FALLBACK: f64 = 0.7;
pub const CONFIDENCE_HOSTING_FALLBACK: f64 = 0.6;

const MOBILE_FRONTEND: &str = "react-native";
const REALTIME_DATABASE: &str = "postgresql";

/// Existing project language → canonical backend framework, checked in order.
const LANGUAGE_BACKENDS: &[(&str, &str)] = &[
    ("python", "fastapi"),
    ("typescript", "express"),
    ("javascript", "express"),
];

/// Build the draft stack for `reqs`.
///
/// Fails only when a fallback needs a preference table that is empty.
pub fn generate(
    reqs: &Requirements,
    prefs: &Preferences,
    context: &ProjectContext,
) -> Result<RecommendedStack> {
    let mut stack = RecommendedStack::new();

    for &category in Category::primary() {
        if let Some(tech) = reqs.first_specified(category) {
            stack.set(category, tech);
            stack
                .confidence_scores
                .insert(category, CONFIDENCE_USER_SPECIFIED);
            continue;
        }
        if let Some((tech, confidence)) = fallback(category, reqs, prefs, context)? {
            stack.set(category, tech);
            stack.confidence_scores.insert(category, confidence);
        }
    }

    stack.tools = suggest_tools(&stack);
    tracing::debug!(signature = %stack.signature(), "generated draft stack");
    Ok(stack)
}

fn fallback(
    category: Category,
    reqs: &Requirements,
    prefs: &Preferences,
    context: &ProjectContext,
) -> Result<Option<(String, f64)>> {
    let choice = match category {
        Category::Frontend => {
            if !reqs.project_type.has_client() {
                return Ok(None);
            }
            let tech = if reqs.targets(Device::Mobile) {
                MOBILE_FRONTEND.to_string()
            } else {
                prefs.top_choice(category)?.to_string()
            };
            (tech, CONFIDENCE_FRONTEND_FALLBACK)
        }
        Category::Backend => {
            let detected = LANGUAGE_BACKENDS
                .iter()
                .find(|(lang, _)| context.has_language(lang))
                .map(|(_, backend)| backend.to_string());
            let tech = match detected {
                Some(tech) => tech,
                None => prefs.top_choice(category)?.to_string(),
            };
            (tech, CONFIDENCE_BACKEND_FALLBACK)
        }
        Category::Database => {
            let tech = if reqs.constraints.realtime {
                REALTIME_DATABASE.to_string()
            } else {
                prefs.top_choice(category)?.to_string()
            };
            (tech, CONFIDENCE_DATABASE_FALLBACK)
        }
        Category::Hosting => (
            prefs.top_choice(category)?.to_string(),
            CONFIDENCE_HOSTING_FALLBACK,
        ),
        _ => return Ok(None),
    };
    Ok(Some(choice))
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

const JS_FRONTENDS: &[&str] = &[
    "react",
    "nextjs",
    "vue",
    "svelte",
    "angular",
    "remix",
    "solid",
    "react-native",
];
const NPM_FRONTENDS: &[&str] = &["react", "nextjs", "vue", "svelte"];
const NODE_BACKENDS: &[&str] = &["express", "nestjs"];
const PYTHON_BACKENDS: &[&str] = &["fastapi", "django", "flask"];
const TYPESCRIPT_FIRST: &[&str] = &["nextjs", "angular", "nestjs"];

/// Development tools implied by the chosen technologies. Sorted, no
/// duplicates.
pub fn suggest_tools(stack: &RecommendedStack) -> Vec<String> {
    let mut tools = BTreeSet::from(["git"]);
    let frontend = |techs: &[&str]| stack.is_one_of(Category::Frontend, techs);
    let backend = |techs: &[&str]| stack.is_one_of(Category::Backend, techs);

    if frontend(NPM_FRONTENDS) || backend(NODE_BACKENDS) {
        tools.insert("npm");
    }
    if backend(PYTHON_BACKENDS) {
        tools.extend(["pip", "black", "flake8"]);
    }
    if frontend(JS_FRONTENDS) || backend(NODE_BACKENDS) {
        tools.extend(["eslint", "prettier"]);
    }
    if frontend(TYPESCRIPT_FIRST) || backend(TYPESCRIPT_FIRST) {
        tools.insert("typescript");
    }

    if frontend(&["react", "nextjs"]) {
        tools.extend(["jest", "testing-library"]);
    }
    if backend(&["fastapi", "django"]) {
        tools.insert("pytest");
    }
    if backend(NODE_BACKENDS) {
        tools.insert("jest");
    }

    match stack.get(Category::Hosting) {
        Some("vercel") => {
            tools.insert("vercel-cli");
        }
        Some("railway") => {
            tools.insert("railway-cli");
        }
        _ => {}
    }
    match stack.get(Category::Database) {
        Some("postgresql") => {
            tools.insert("psql");
        }
        Some("mongodb") => {
            tools.insert("mongosh");
        }
        _ => {}
    }

    tools.into_iter().map(str::to_string).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdvisorError;
    use crate::preferences::ScoreTable;
    use crate::requirements::{parse, ProjectRequest};
    use crate::types::ProjectType;

    fn draft(project_type: ProjectType, text: &str) -> RecommendedStack {
        let reqs = parse(&ProjectRequest::new(project_type, text));
        generate(&reqs, &Preferences::default(), &ProjectContext::default()).unwrap()
    }

    #[test]
    fn user_specified_gets_top_confidence() {
        let stack = draft(ProjectType::Webapp, "a react and fastapi app with postgres");
        assert_eq!(stack.get(Category::Frontend), Some("react"));
        assert_eq!(stack.get(Category::Backend), Some("fastapi"));
        assert_eq!(stack.get(Category::Database), Some("postgresql"));
        for c in [Category::Frontend, Category::Backend, Category::Database] {
            assert_eq!(stack.confidence(c), Some(CONFIDENCE_USER_SPECIFIED));
        }
        assert_eq!(stack.confidence(Category::Hosting), Some(CONFIDENCE_HOSTING_FALLBACK));
    }

    #[test]
    fn explicit_choice_outranks_every_fallback() {
        let explicit = draft(ProjectType::Webapp, "svelte with django on netlify using mysql");
        let inferred = draft(ProjectType::Webapp, "");
        for &c in Category::primary() {
            assert!(explicit.confidence(c).unwrap() > inferred.confidence(c).unwrap());
        }
    }

    #[test]
    fn fallbacks_follow_preferences() {
        let stack = draft(ProjectType::Webapp, "a shop");
        assert_eq!(stack.get(Category::Frontend), Some("react"));
        assert_eq!(stack.get(Category::Backend), Some("fastapi"));
        assert_eq!(stack.get(Category::Database), Some("postgresql"));
        assert_eq!(stack.get(Category::Hosting), Some("vercel"));
        assert_eq!(stack.confidence(Category::Frontend), Some(0.8));
        assert_eq!(stack.confidence(Category::Backend), Some(0.7));
        assert_eq!(stack.confidence(Category::Database), Some(0.7));
    }

    #[test]
    fn mobile_target_forces_cross_platform_frontend() {
        let stack = draft(ProjectType::Mobile, "an android app");
        assert_eq!(stack.get(Category::Frontend), Some("react-native"));
    }

    #[test]
    fn api_projects_get_no_frontend() {
        let stack = draft(ProjectType::Api, "a billing service");
        assert_eq!(stack.get(Category::Frontend), None);
        assert_eq!(stack.confidence(Category::Frontend), None);
        assert!(stack.get(Category::Backend).is_some());
    }

    #[test]
    fn realtime_forces_postgresql() {
        let mut prefs = Preferences::default();
        prefs.database_preferences = ScoreTable::from_pairs(&[("mongodb", 1.0)]);
        let reqs = parse(&ProjectRequest::new(ProjectType::Webapp, "real-time dashboard"));
        let stack = generate(&reqs, &prefs, &ProjectContext::default()).unwrap();
        assert_eq!(stack.get(Category::Database), Some("postgresql"));
    }

    #[test]
    fn existing_language_picks_backend() {
        let mut ctx = ProjectContext::default();
        ctx.detected_languages.insert("javascript".into());
        let reqs = parse(&ProjectRequest::new(ProjectType::Webapp, ""));
        let stack = generate(&reqs, &Preferences::default(), &ctx).unwrap();
        assert_eq!(stack.get(Category::Backend), Some("express"));

        ctx.detected_languages.insert("python".into());
        let stack = generate(&reqs, &Preferences::default(), &ctx).unwrap();
        assert_eq!(stack.get(Category::Backend), Some("fastapi"));
    }

    #[test]
    fn tie_break_is_deterministic() {
        let mut prefs = Preferences::default();
        prefs.framework_preferences.frontend =
            ScoreTable::from_pairs(&[("svelte", 0.9), ("react", 0.9)]);
        let reqs = parse(&ProjectRequest::new(ProjectType::Webapp, ""));
        for _ in 0..20 {
            let stack = generate(&reqs, &prefs, &ProjectContext::default()).unwrap();
            assert_eq!(stack.get(Category::Frontend), Some("svelte"));
        }
    }

    #[test]
    fn empty_table_is_a_config_error() {
        let mut prefs = Preferences::default();
        prefs.database_preferences = ScoreTable::new();
        let reqs = parse(&ProjectRequest::new(ProjectType::Webapp, ""));
        let err = generate(&reqs, &prefs, &ProjectContext::default()).unwrap_err();
        assert!(matches!(err, AdvisorError::EmptyPreferences { .. }));
    }

    #[test]
    fn empty_table_is_fine_when_not_consulted() {
        let mut prefs = Preferences::default();
        prefs.database_preferences = ScoreTable::new();
        let reqs = parse(&ProjectRequest::new(ProjectType::Webapp, "uses sqlite"));
        let stack = generate(&reqs, &prefs, &ProjectContext::default()).unwrap();
        assert_eq!(stack.get(Category::Database), Some("sqlite"));
    }

    #[test]
    fn tools_cover_python_and_react() {
        let stack = draft(ProjectType::Webapp, "react and django with postgres on railway");
        let tools = stack.tools;
        for t in [
            "git", "npm", "pip", "jest", "testing-library", "pytest", "eslint", "prettier",
            "black", "flake8", "psql", "railway-cli",
        ] {
            assert!(tools.iter().any(|x| x == t), "missing {t} in {tools:?}");
        }
        assert!(!tools.iter().any(|x| x == "typescript"));
    }

    #[test]
    fn tools_are_sorted_and_unique() {
        let stack = draft(ProjectType::Webapp, "nextjs with nestjs");
        let mut sorted = stack.tools.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(stack.tools, sorted);
        assert!(stack.tools.iter().any(|t| t == "typescript"));
    }
}
