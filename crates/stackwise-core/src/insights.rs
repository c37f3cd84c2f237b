//! Human-facing commentary on a finished stack: reasoning, alternatives,
//! cross-tier warnings and a rough complexity estimate.

use crate::requirements::Requirements;
use crate::stack::RecommendedStack;
use crate::types::{Category, Device};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Reasoning
// ---------------------------------------------------------------------------

pub fn reasoning(stack: &RecommendedStack, reqs: &Requirements) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(frontend) = stack.get(Category::Frontend) {
        if reqs.targets(Device::Mobile) {
            out.push(format!("Chose {frontend} for cross-platform mobile development"));
        } else {
            out.push(format!(
                "Selected {frontend} based on your past preferences and project requirements"
            ));
        }
    }
    if let Some(backend) = stack.get(Category::Backend) {
        out.push(format!(
            "Recommended {backend} for optimal performance and developer experience"
        ));
    }
    if let Some(db) = stack.get(Category::Database) {
        if reqs.constraints.realtime {
            out.push(format!("Selected {db} for real-time capabilities"));
        } else {
            out.push(format!("Chose {db} for reliability and ecosystem support"));
        }
    }
    if !stack.open_source_replacements.is_empty() {
        out.push("Favored open source alternatives based on your preferences".to_string());
    }
    out
}

// ---------------------------------------------------------------------------
// Alternatives
// ---------------------------------------------------------------------------

const ALTERNATIVES: &[(&str, &[&str])] = &[
    ("react", &["vue", "svelte", "angular"]),
    ("nextjs", &["remix", "gatsby", "sveltekit"]),
    ("fastapi", &["django", "flask", "express"]),
    ("express", &["fastapi", "nestjs", "koa"]),
    ("postgresql", &["mysql", "sqlite", "supabase"]),
    ("mongodb", &["postgresql", "mysql", "firebase"]),
    ("vercel", &["netlify", "railway", "fly.io"]),
    ("tailwindcss", &["styled-components", "emotion", "chakra-ui"]),
];

/// Alternatives per filled category, keyed by category name.
pub fn alternatives(stack: &RecommendedStack) -> BTreeMap<String, Vec<String>> {
    let known = stack.entries().map(|(c, t)| (c.to_string(), t));
    let extra = stack.extra.iter().map(|(k, v)| (k.clone(), v.as_str()));

    known
        .chain(extra)
        .filter_map(|(category, tech)| {
            ALTERNATIVES
                .iter()
                .find(|(name, _)| *name == tech)
                .map(|(_, alts)| (category, alts.iter().map(|a| a.to_string()).collect()))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Cross-tier advisories that the compatibility rules do not express.
pub fn warnings(stack: &RecommendedStack) -> Vec<String> {
    let mut out = Vec::new();

    if stack.is_set(Category::Frontend, "react") && stack.is_set(Category::Backend, "django") {
        out.push("React + Django requires careful CORS configuration".to_string());
    }
    if stack.is_set(Category::Database, "mongodb") && stack.is_set(Category::Backend, "django") {
        out.push("Django has limited native MongoDB support - consider PostgreSQL".to_string());
    }
    if stack.is_set(Category::Hosting, "netlify")
        && stack.is_one_of(Category::Backend, &["fastapi", "django"])
    {
        out.push(
            "Netlify is optimized for static sites - consider Vercel or Railway for full-stack apps"
                .to_string(),
        );
    }
    out
}

// ---------------------------------------------------------------------------
// Complexity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Simple,
    Medium,
    Complex,
}

impl ComplexityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplexityLevel::Simple => "simple",
            ComplexityLevel::Medium => "medium",
            ComplexityLevel::Complex => "complex",
        }
    }

    pub fn estimated_dev_time(self) -> &'static str {
        match self {
            ComplexityLevel::Simple => "2-4 weeks",
            ComplexityLevel::Medium => "6-10 weeks",
            ComplexityLevel::Complex => "12+ weeks",
        }
    }

    fn from_score(score: f64) -> Self {
        if score <= 2.0 {
            ComplexityLevel::Simple
        } else if score <= 3.5 {
            ComplexityLevel::Medium
        } else {
            ComplexityLevel::Complex
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityEstimate {
    pub level: ComplexityLevel,
    pub score: f64,
    pub estimated_dev_time: String,
}

const COMPLEXITY_SCORES: &[(Category, &[(&str, u32)])] = &[
    (
        Category::Frontend,
        &[
            ("react", 3),
            ("nextjs", 4),
            ("vue", 3),
            ("svelte", 2),
            ("angular", 5),
        ],
    ),
    (
        Category::Backend,
        &[
            ("fastapi", 3),
            ("django", 4),
            ("flask", 2),
            ("express", 3),
            ("nestjs", 4),
        ],
    ),
    (
        Category::Database,
        &[("sqlite", 1), ("postgresql", 3), ("mysql", 3), ("mongodb", 4)],
    ),
];

/// Average complexity of the scored frontend/backend/database choices.
/// Unscored technologies do not count towards the average.
pub fn estimate_complexity(stack: &RecommendedStack) -> ComplexityEstimate {
    let scores: Vec<u32> = COMPLEXITY_SCORES
        .iter()
        .filter_map(|(category, table)| {
            let tech = stack.get(*category)?;
            table.iter().find(|(name, _)| *name == tech).map(|(_, s)| *s)
        })
        .collect();

    let total: u32 = scores.iter().sum();
    let score = f64::from(total) / scores.len().max(1) as f64;
    let level = ComplexityLevel::from_score(score);

    ComplexityEstimate {
        level,
        score,
        estimated_dev_time: level.estimated_dev_time().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProjectType;

    fn stack(pairs: &[(Category, &str)]) -> RecommendedStack {
        let mut s = RecommendedStack::new();
        for (c, t) in pairs {
            s.set(*c, *t);
        }
        s
    }

    #[test]
    fn react_django_warns_about_cors() {
        let w = warnings(&stack(&[
            (Category::Frontend, "react"),
            (Category::Backend, "django"),
        ]));
        assert!(w.iter().any(|m| m.contains("CORS")));
    }

    #[test]
    fn netlify_with_python_backend_warns() {
        let w = warnings(&stack(&[
            (Category::Backend, "fastapi"),
            (Category::Hosting, "netlify"),
        ]));
        assert_eq!(w.len(), 1);
        assert!(w[0].starts_with("Netlify"));
    }

    #[test]
    fn alternatives_keyed_by_category() {
        let mut s = stack(&[
            (Category::Frontend, "react"),
            (Category::Backend, "rails"),
            (Category::Css, "tailwindcss"),
        ]);
        s.extra.insert("cache".into(), "postgresql".into());
        let alts = alternatives(&s);
        assert_eq!(alts["frontend"], ["vue", "svelte", "angular"]);
        assert_eq!(alts["css"].len(), 3);
        assert_eq!(alts["cache"][0], "mysql");
        assert!(!alts.contains_key("backend"));
    }

    #[test]
    fn reasoning_mentions_mobile_and_open_source() {
        let mut reqs = Requirements::for_project(ProjectType::Mobile);
        reqs.target_devices.insert(Device::Mobile);
        let mut s = stack(&[(Category::Frontend, "react-native")]);
        s.open_source_replacements.push("x".into());
        let r = reasoning(&s, &reqs);
        assert!(r[0].contains("cross-platform"));
        assert!(r.last().unwrap().contains("open source"));
    }

    #[test]
    fn complexity_averages_scored_components() {
        let est = estimate_complexity(&stack(&[
            (Category::Frontend, "svelte"),
            (Category::Backend, "flask"),
            (Category::Database, "sqlite"),
        ]));
        assert!((est.score - 5.0 / 3.0).abs() < 1e-9);
        assert_eq!(est.level, ComplexityLevel::Simple);
        assert_eq!(est.estimated_dev_time, "2-4 weeks");

        let est = estimate_complexity(&stack(&[
            (Category::Frontend, "angular"),
            (Category::Backend, "nestjs"),
            (Category::Database, "mongodb"),
        ]));
        assert_eq!(est.level, ComplexityLevel::Complex);
    }

    #[test]
    fn complexity_of_unscored_stack_is_zero() {
        let est = estimate_complexity(&stack(&[(Category::Backend, "rails")]));
        assert_eq!(est.score, 0.0);
        assert_eq!(est.level, ComplexityLevel::Simple);
    }

    #[test]
    fn medium_boundary_is_inclusive() {
        let est = estimate_complexity(&stack(&[
            (Category::Frontend, "react"),
            (Category::Backend, "nestjs"),
        ]));
        assert_eq!(est.score, 3.5);
        assert_eq!(est.level, ComplexityLevel::Medium);
    }
}
