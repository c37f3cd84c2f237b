//! Compatibility rules and the advisory validator that applies them.
//!
//! Rules are reference data: materialized from defaults into
//! `compatibility.json` on first use and read back afterwards. Issues found
//! here are advisory and never stop a stack from being produced.

use crate::stack::RecommendedStack;
use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityRules {
    /// `frontend+backend` pairs known to be awkward together.
    #[serde(default)]
    pub incompatible_combinations: Vec<String>,
    /// Backend name → databases it supports well.
    #[serde(default)]
    pub backend_database_support: BTreeMap<String, Vec<String>>,
    /// Hosting platform → frontends/backends it serves well.
    #[serde(default)]
    pub hosting_compatibility: BTreeMap<String, Vec<String>>,
    /// Known-good full-stack signatures. Reference only; the validator does
    /// not consult it.
    #[serde(default)]
    pub successful_combinations: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for CompatibilityRules {
    fn default() -> Self {
        let backend_database_support = [
            ("fastapi", &["postgresql", "mysql", "sqlite", "mongodb"][..]),
            ("django", &["postgresql", "mysql", "sqlite"][..]),
            ("flask", &["postgresql", "mysql", "sqlite", "mongodb"][..]),
            ("express", &["postgresql", "mysql", "mongodb", "sqlite"][..]),
            ("nestjs", &["postgresql", "mysql", "mongodb", "sqlite"][..]),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), strings(v)))
        .collect();

        let hosting_compatibility = [
            ("vercel", &["nextjs", "react", "vue", "svelte", "express"][..]),
            ("netlify", &["react", "vue", "svelte", "gatsby"][..]),
            ("railway", &["fastapi", "django", "express", "nestjs"][..]),
            (
                "fly.io",
                &["fastapi", "django", "express", "nestjs", "rust", "go"][..],
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), strings(v)))
        .collect();

        Self {
            incompatible_combinations: strings(&["react+django", "vue+flask"]),
            backend_database_support,
            hosting_compatibility,
            successful_combinations: strings(&[
                "react+fastapi+postgresql+vercel",
                "nextjs+postgresql+vercel",
                "svelte+fastapi+sqlite+railway",
                "vue+express+mongodb+netlify",
            ]),
        }
    }
}

impl CompatibilityRules {
    pub fn is_incompatible(&self, frontend: &str, backend: &str) -> bool {
        let key = format!("{frontend}+{backend}");
        self.incompatible_combinations.iter().any(|c| *c == key)
    }

    /// `None` when the backend has no entry (nothing to check against).
    pub fn supports_database(&self, backend: &str, database: &str) -> Option<bool> {
        self.backend_database_support
            .get(backend)
            .map(|dbs| dbs.iter().any(|d| d == database))
    }

    /// Check `stack` against the rules and return the advisory issues found.
    pub fn check(&self, stack: &RecommendedStack) -> Vec<String> {
        let mut issues = Vec::new();
        let frontend = stack.get(Category::Frontend);
        let backend = stack.get(Category::Backend);
        let database = stack.get(Category::Database);

        if let (Some(fe), Some(be)) = (frontend, backend) {
            if self.is_incompatible(fe, be) {
                issues.push(format!("{fe} and {be} have known compatibility issues"));
            }
        }

        if let (Some(be), Some(db)) = (backend, database) {
            if self.supports_database(be, db) == Some(false) {
                issues.push(format!("{be} has limited support for {db}"));
            }
        }

        issues
    }
}

/// Validate `stack`, returning it with `compatibility_issues` populated.
pub fn validate(mut stack: RecommendedStack, rules: &CompatibilityRules) -> RecommendedStack {
    stack.compatibility_issues = rules.check(&stack);
    if !stack.compatibility_issues.is_empty() {
        tracing::debug!(issues = stack.compatibility_issues.len(), "compatibility issues found");
    }
    stack
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(pairs: &[(Category, &str)]) -> RecommendedStack {
        let mut s = RecommendedStack::new();
        for (c, t) in pairs {
            s.set(*c, *t);
        }
        s
    }

    #[test]
    fn flags_incompatible_pair() {
        let rules = CompatibilityRules::default();
        let out = validate(
            stack(&[(Category::Frontend, "vue"), (Category::Backend, "flask")]),
            &rules,
        );
        assert_eq!(out.compatibility_issues, ["vue and flask have known compatibility issues"]);
    }

    #[test]
    fn pair_order_matters() {
        let rules = CompatibilityRules::default();
        assert!(rules.is_incompatible("react", "django"));
        assert!(!rules.is_incompatible("django", "react"));
    }

    #[test]
    fn flags_unsupported_database() {
        let rules = CompatibilityRules::default();
        let out = validate(
            stack(&[(Category::Backend, "django"), (Category::Database, "mongodb")]),
            &rules,
        );
        assert_eq!(out.compatibility_issues, ["django has limited support for mongodb"]);
    }

    #[test]
    fn unknown_backend_is_not_an_issue() {
        let rules = CompatibilityRules::default();
        let out = validate(
            stack(&[(Category::Backend, "rails"), (Category::Database, "redis")]),
            &rules,
        );
        assert!(out.compatibility_issues.is_empty());
    }

    #[test]
    fn clean_stack_has_no_issues() {
        let rules = CompatibilityRules::default();
        let out = validate(
            stack(&[
                (Category::Frontend, "react"),
                (Category::Backend, "fastapi"),
                (Category::Database, "postgresql"),
            ]),
            &rules,
        );
        assert!(out.compatibility_issues.is_empty());
    }

    #[test]
    fn revalidation_replaces_previous_issues() {
        let rules = CompatibilityRules::default();
        let mut s = stack(&[(Category::Frontend, "react"), (Category::Backend, "django")]);
        s = validate(s, &rules);
        s = validate(s, &rules);
        assert_eq!(s.compatibility_issues.len(), 1);
    }
}
