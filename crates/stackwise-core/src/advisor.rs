//! The recommendation pipeline.
//!
//! `Advisor` owns a store, the loaded config and the validation adapters.
//! A call runs: load stores → parse → generate → compatibility check → gap
//! fill → open-source filter → external validation → learn. Only learning
//! writes, and only the pattern store.

use crate::compatibility;
use crate::config::AdvisorConfig;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::gaps;
use crate::insights::{self, ComplexityEstimate};
use crate::open_source;
use crate::paths;
use crate::preferences::ComplexityPreference;
use crate::recommend;
use crate::requirements::{self, ProjectRequest, Requirements};
use crate::stack::RecommendedStack;
use crate::store::{AdvisorStore, FileStore, Loaded, StoreWarning};
use crate::types::{Category, ProjectType};
use crate::validation::{self, StackValidator, ValidationReport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommended_stack: RecommendedStack,
    pub reasoning: Vec<String>,
    pub alternatives: BTreeMap<String, Vec<String>>,
    pub warnings: Vec<String>,
    pub estimated_complexity: ComplexityEstimate,
    pub mcp_validation: ValidationReport,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub store_warnings: Vec<StoreWarning>,
}

/// Outcome of checking a hand-assembled stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackCheck {
    pub stack: RecommendedStack,
    pub compatibility_issues: Vec<String>,
    pub warnings: Vec<String>,
    /// Components the gap filler would add, keyed by category.
    pub suggested_additions: BTreeMap<Category, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub store_warnings: Vec<StoreWarning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceSummary {
    pub top_languages: Vec<(String, f64)>,
    pub top_frontends: Vec<(String, f64)>,
    pub top_backends: Vec<(String, f64)>,
    pub top_combinations: Vec<(String, u64)>,
    pub open_source_bias: f64,
    pub complexity_preference: ComplexityPreference,
    pub license_preferences: Vec<String>,
    pub learning_rate: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub store_warnings: Vec<StoreWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationStatus {
    pub name: String,
    pub available: bool,
}

const SUMMARY_TOP_LANGUAGES: usize = 5;
const SUMMARY_TOP_FRAMEWORKS: usize = 3;
const SUMMARY_TOP_COMBINATIONS: usize = 5;

fn collect_warning<T>(loaded: Loaded<T>, warnings: &mut Vec<StoreWarning>) -> T {
    warnings.extend(loaded.warning);
    loaded.value
}

fn top_scores(ranked: Vec<(&str, f64)>, limit: usize) -> Vec<(String, f64)> {
    ranked
        .into_iter()
        .take(limit)
        .map(|(name, score)| (name.to_string(), score))
        .collect()
}

// ---------------------------------------------------------------------------
// Advisor
// ---------------------------------------------------------------------------

pub struct Advisor<S: AdvisorStore> {
    store: S,
    config: AdvisorConfig,
    validators: Vec<Arc<dyn StackValidator>>,
}

impl Advisor<FileStore> {
    /// File-backed advisor rooted at `home`, with config from
    /// `<home>/.stackwise/config.yaml`.
    pub fn open(home: &Path) -> Result<Self> {
        let config = AdvisorConfig::load(home)?;
        config.ensure_valid()?;
        tracing::debug!(
            home = %home.display(),
            store = %paths::advisor_dir(home).display(),
            "opening advisor"
        );
        Ok(Self::new(FileStore::new(home), config))
    }
}

impl<S: AdvisorStore> Advisor<S> {
    /// Advisor with the built-in validators named in `config`.
    pub fn new(store: S, config: AdvisorConfig) -> Self {
        let validators = validation::builtin_validators(&config.validation.integrations);
        Self {
            store,
            config,
            validators,
        }
    }

    pub fn with_validators(mut self, validators: Vec<Arc<dyn StackValidator>>) -> Self {
        self.validators = validators;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Run the full pipeline. With `learn`, and learning enabled in config,
    /// the stack's signature is recorded in the pattern store.
    pub fn recommend(
        &mut self,
        request: &ProjectRequest,
        context: &ProjectContext,
        learn: bool,
    ) -> Result<Recommendation> {
        let mut store_warnings = Vec::new();
        let prefs = collect_warning(self.store.load_preferences()?, &mut store_warnings);
        let rules = collect_warning(self.store.load_rules()?, &mut store_warnings);

        let reqs = requirements::parse(request);

        let stack = recommend::generate(&reqs, &prefs, context)?;
        let stack = compatibility::validate(stack, &rules);
        let stack = gaps::fill_gaps(stack, &reqs);
        let stack = open_source::apply_open_source_bias(stack, &prefs);
        let mcp_validation =
            validation::validate_stack(&self.validators, &stack, &self.config.validation);

        if learn && self.config.learning.enabled {
            let mut patterns = collect_warning(self.store.load_patterns()?, &mut store_warnings);
            let signature = patterns.record(reqs.project_type, &stack);
            self.store.save_patterns(&patterns)?;
            tracing::debug!(%signature, count = patterns.count(&signature), "recorded pattern");
        }

        Ok(Recommendation {
            reasoning: insights::reasoning(&stack, &reqs),
            alternatives: insights::alternatives(&stack),
            warnings: insights::warnings(&stack),
            estimated_complexity: insights::estimate_complexity(&stack),
            recommended_stack: stack,
            mcp_validation,
            store_warnings,
        })
    }

    /// Check a hand-assembled stack and list what the gap filler would add
    /// for a web application. Nothing is learned from the check.
    pub fn validate_stack(&self, stack: RecommendedStack) -> Result<StackCheck> {
        let mut store_warnings = Vec::new();
        let rules = collect_warning(self.store.load_rules()?, &mut store_warnings);

        let checked = compatibility::validate(stack, &rules);
        let filled = gaps::fill_gaps(
            checked.clone(),
            &Requirements::for_project(ProjectType::Webapp),
        );
        let suggested_additions = Category::all()
            .iter()
            .filter(|&&c| checked.get(c).is_none())
            .filter_map(|&c| filled.get(c).map(|tech| (c, tech.to_string())))
            .collect();

        Ok(StackCheck {
            compatibility_issues: checked.compatibility_issues.clone(),
            warnings: insights::warnings(&checked),
            stack: checked,
            suggested_additions,
            store_warnings,
        })
    }

    pub fn preferences_summary(&self) -> Result<PreferenceSummary> {
        let mut store_warnings = Vec::new();
        let prefs = collect_warning(self.store.load_preferences()?, &mut store_warnings);
        let patterns = collect_warning(self.store.load_patterns()?, &mut store_warnings);

        Ok(PreferenceSummary {
            top_languages: top_scores(
                prefs.language_preferences.ranked(),
                SUMMARY_TOP_LANGUAGES,
            ),
            top_frontends: top_scores(
                prefs.framework_preferences.frontend.ranked(),
                SUMMARY_TOP_FRAMEWORKS,
            ),
            top_backends: top_scores(
                prefs.framework_preferences.backend.ranked(),
                SUMMARY_TOP_FRAMEWORKS,
            ),
            top_combinations: patterns
                .top_combinations(SUMMARY_TOP_COMBINATIONS)
                .into_iter()
                .map(|(sig, n)| (sig.to_string(), n))
                .collect(),
            open_source_bias: prefs.open_source_bias,
            complexity_preference: prefs.complexity_preference,
            license_preferences: prefs.license_preferences.clone(),
            learning_rate: prefs.learning_rate,
            store_warnings,
        })
    }

    /// Availability of each configured integration.
    pub fn integrations(&self) -> Vec<IntegrationStatus> {
        validation::availability(&self.validators, self.config.validation.timeout())
            .into_iter()
            .map(|(name, available)| IntegrationStatus { name, available })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::LearnedPatterns;
    use crate::preferences::{Preferences, ScoreTable};
    use crate::recommend::CONFIDENCE_USER_SPECIFIED;
    use crate::store::MemoryStore;
    use crate::types::Device;
    use crate::validation::ValidationStatus;

    fn advisor(store: MemoryStore) -> Advisor<MemoryStore> {
        Advisor::new(store, AdvisorConfig::default()).with_validators(Vec::new())
    }

    fn webapp(description: &str) -> ProjectRequest {
        ProjectRequest::new(ProjectType::Webapp, description)
    }

    #[test]
    fn react_fastapi_postgres_is_taken_verbatim() {
        let mut adv = advisor(MemoryStore::new());
        let rec = adv
            .recommend(
                &webapp("a react and fastapi app with postgres"),
                &ProjectContext::default(),
                true,
            )
            .unwrap();
        let stack = &rec.recommended_stack;

        assert_eq!(stack.get(Category::Frontend), Some("react"));
        assert_eq!(stack.get(Category::Backend), Some("fastapi"));
        assert_eq!(stack.get(Category::Database), Some("postgresql"));
        for c in [Category::Frontend, Category::Backend, Category::Database] {
            assert_eq!(stack.confidence(c), Some(CONFIDENCE_USER_SPECIFIED));
        }
        assert!(stack.compatibility_issues.is_empty());
        assert_eq!(stack.get(Category::Orm), Some("sqlalchemy"));
        // Fallback hosting (vercel) is swapped by the default bias.
        assert_eq!(stack.get(Category::Hosting), Some("railway"));
        assert_eq!(rec.mcp_validation.status, ValidationStatus::NoIntegrations);
    }

    #[test]
    fn vue_flask_gets_compatibility_advisory() {
        let mut adv = advisor(MemoryStore::new());
        let rec = adv
            .recommend(&webapp("vue and flask app"), &ProjectContext::default(), false)
            .unwrap();
        assert!(rec
            .recommended_stack
            .compatibility_issues
            .iter()
            .any(|i| i.contains("vue") && i.contains("flask")));
    }

    #[test]
    fn react_django_check_warns_and_suggests_css() {
        let adv = advisor(MemoryStore::new());
        let mut stack = RecommendedStack::new();
        stack.set(Category::Frontend, "react");
        stack.set(Category::Backend, "django");

        let check = adv.validate_stack(stack).unwrap();
        assert!(check.warnings.iter().any(|w| w.contains("CORS")));
        assert_eq!(
            check.suggested_additions.get(&Category::Css).map(String::as_str),
            Some("tailwindcss")
        );
        assert_eq!(check.compatibility_issues.len(), 1);
        assert!(!check.suggested_additions.contains_key(&Category::Frontend));
    }

    #[test]
    fn firebase_request_becomes_supabase() {
        let mut adv = advisor(MemoryStore::new());
        let rec = adv
            .recommend(
                &webapp("svelte app on firebase"),
                &ProjectContext::default(),
                false,
            )
            .unwrap();
        let stack = &rec.recommended_stack;
        assert_eq!(stack.get(Category::Database), Some("supabase"));
        assert!(!stack.open_source_replacements.is_empty());
        assert!(rec.reasoning.iter().any(|r| r.contains("open source")));
    }

    #[test]
    fn learning_accumulates_per_call() {
        let mut adv = advisor(MemoryStore::new());
        let req = webapp("a react and fastapi app with postgres");
        let mut signature = String::new();
        for _ in 0..3 {
            let rec = adv.recommend(&req, &ProjectContext::default(), true).unwrap();
            signature = rec.recommended_stack.signature();
        }
        let patterns = &adv.store().patterns;
        assert_eq!(patterns.count(&signature), 3);
        assert_eq!(patterns.project_type_associations[&ProjectType::Webapp][&signature], 3);
    }

    #[test]
    fn learning_can_be_switched_off() {
        let mut config = AdvisorConfig::default();
        config.learning.enabled = false;
        let mut adv = Advisor::new(MemoryStore::new(), config).with_validators(Vec::new());
        adv.recommend(&webapp("react"), &ProjectContext::default(), true)
            .unwrap();
        assert_eq!(adv.store().patterns, LearnedPatterns::default());

        let mut adv = advisor(MemoryStore::new());
        adv.recommend(&webapp("react"), &ProjectContext::default(), false)
            .unwrap();
        assert!(adv.store().patterns.usage_frequency.is_empty());
    }

    #[test]
    fn mobile_device_picks_react_native() {
        let mut adv = advisor(MemoryStore::new());
        let req = ProjectRequest::new(ProjectType::Mobile, "a fitness tracker")
            .with_devices(vec![Device::Mobile]);
        let rec = adv.recommend(&req, &ProjectContext::default(), false).unwrap();
        assert_eq!(
            rec.recommended_stack.get(Category::Frontend),
            Some("react-native")
        );
        assert!(rec.reasoning[0].contains("cross-platform"));
    }

    #[test]
    fn empty_preference_table_fails_fast() {
        let prefs = Preferences {
            hosting_preferences: ScoreTable::new(),
            ..Preferences::default()
        };
        let mut adv = advisor(MemoryStore::new().with_preferences(prefs));
        let err = adv
            .recommend(&webapp("react"), &ProjectContext::default(), true)
            .unwrap_err();
        assert!(err.to_string().contains("hosting"));
        assert!(adv.store().patterns.usage_frequency.is_empty());
    }

    #[test]
    fn summary_lists_top_choices_and_combinations() {
        let mut adv = advisor(MemoryStore::new());
        adv.recommend(&webapp("react fastapi sqlite"), &ProjectContext::default(), true)
            .unwrap();
        let summary = adv.preferences_summary().unwrap();
        assert_eq!(summary.top_languages.len(), 5);
        assert_eq!(summary.top_frontends.len(), 3);
        assert_eq!(summary.top_languages[0].0, "python");
        assert_eq!(summary.top_frontends[0].0, "react");
        assert_eq!(summary.top_combinations, [("react+fastapi+sqlite".to_string(), 1)]);
    }

    #[test]
    fn no_validators_means_empty_integration_list() {
        let adv = advisor(MemoryStore::new());
        assert!(adv.integrations().is_empty());
    }
}
