//! Learned usage patterns: how often each stack combination was recommended.
//!
//! Persisted as `patterns.json`. Counts only ever grow; the only way back to
//! zero is a reset, which deletes the file.

use crate::stack::RecommendedStack;
use crate::types::ProjectType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearnedPatterns {
    #[serde(default)]
    pub usage_frequency: BTreeMap<String, u64>,
    #[serde(default)]
    pub project_type_associations: BTreeMap<ProjectType, BTreeMap<String, u64>>,
    /// Keys this file may carry from older writers; kept so a rewrite does
    /// not drop them.
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl LearnedPatterns {
    /// Record one recommendation of `stack` for a `project_type` project.
    /// Returns the signature that was counted.
    pub fn record(&mut self, project_type: ProjectType, stack: &RecommendedStack) -> String {
        let signature = stack.signature();
        *self.usage_frequency.entry(signature.clone()).or_insert(0) += 1;
        *self
            .project_type_associations
            .entry(project_type)
            .or_default()
            .entry(signature.clone())
            .or_insert(0) += 1;
        signature
    }

    pub fn count(&self, signature: &str) -> u64 {
        self.usage_frequency.get(signature).copied().unwrap_or(0)
    }

    /// Most used combinations, highest count first; equal counts sort by
    /// signature.
    pub fn top_combinations(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut combos: Vec<(&str, u64)> = self
            .usage_frequency
            .iter()
            .map(|(sig, n)| (sig.as_str(), *n))
            .collect();
        combos.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        combos.truncate(limit);
        combos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn stack(frontend: &str, backend: &str) -> RecommendedStack {
        let mut s = RecommendedStack::new();
        s.set(Category::Frontend, frontend);
        s.set(Category::Backend, backend);
        s
    }

    #[test]
    fn record_increments_both_maps() {
        let mut patterns = LearnedPatterns::default();
        let sig = patterns.record(ProjectType::Webapp, &stack("react", "fastapi"));
        assert_eq!(sig, "react+fastapi+none");
        patterns.record(ProjectType::Webapp, &stack("react", "fastapi"));
        patterns.record(ProjectType::Api, &stack("react", "fastapi"));

        assert_eq!(patterns.count(&sig), 3);
        assert_eq!(patterns.project_type_associations[&ProjectType::Webapp][&sig], 2);
        assert_eq!(patterns.project_type_associations[&ProjectType::Api][&sig], 1);
    }

    #[test]
    fn top_combinations_orders_by_count() {
        let mut patterns = LearnedPatterns::default();
        for _ in 0..3 {
            patterns.record(ProjectType::Webapp, &stack("vue", "express"));
        }
        patterns.record(ProjectType::Webapp, &stack("react", "fastapi"));
        let top = patterns.top_combinations(5);
        assert_eq!(top[0], ("vue+express+none", 3));
        assert_eq!(top[1], ("react+fastapi+none", 1));
        assert_eq!(patterns.top_combinations(1).len(), 1);
    }

    #[test]
    fn legacy_keys_survive_roundtrip() {
        let json = r#"{"successful_combinations": {}, "usage_frequency": {"a+b+c": 4}}"#;
        let patterns: LearnedPatterns = serde_json::from_str(json).unwrap();
        assert_eq!(patterns.count("a+b+c"), 4);
        let back = serde_json::to_value(&patterns).unwrap();
        assert!(back.get("successful_combinations").is_some());
    }
}
