use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The advisor's output stack.
///
/// Known categories are fixed fields; anything else a caller or a future
/// rule adds lives in `extra` and is flattened into the same JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendedStack {
    pub frontend: Option<String>,
    pub backend: Option<String>,
    pub database: Option<String>,
    pub hosting: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_management: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realtime: Option<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub confidence_scores: BTreeMap<Category, f64>,
    #[serde(default)]
    pub compatibility_issues: Vec<String>,
    #[serde(default)]
    pub open_source_replacements: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl RecommendedStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> Option<&str> {
        self.slot(category).as_deref()
    }

    pub fn set(&mut self, category: Category, tech: impl Into<String>) {
        *self.slot_mut(category) = Some(tech.into());
    }

    /// Set `category` only if it is still empty. Returns true if written.
    pub fn fill(&mut self, category: Category, tech: impl Into<String>) -> bool {
        let slot = self.slot_mut(category);
        if slot.is_some() {
            return false;
        }
        *slot = Some(tech.into());
        true
    }

    pub fn is_set(&self, category: Category, tech: &str) -> bool {
        self.get(category) == Some(tech)
    }

    pub fn is_one_of(&self, category: Category, techs: &[&str]) -> bool {
        self.get(category).is_some_and(|t| techs.contains(&t))
    }

    pub fn confidence(&self, category: Category) -> Option<f64> {
        self.confidence_scores.get(&category).copied()
    }

    /// Signature used to aggregate usage statistics:
    /// `frontend+backend+database`, with `none` for empty slots.
    pub fn signature(&self) -> String {
        let part = |c: Category| self.get(c).unwrap_or("none").to_string();
        format!(
            "{}+{}+{}",
            part(Category::Frontend),
            part(Category::Backend),
            part(Category::Database)
        )
    }

    /// Filled category slots in category order.
    pub fn entries(&self) -> impl Iterator<Item = (Category, &str)> {
        Category::all()
            .iter()
            .filter_map(move |c| self.get(*c).map(|t| (*c, t)))
    }

    fn slot(&self, category: Category) -> &Option<String> {
        match category {
            Category::Frontend => &self.frontend,
            Category::Backend => &self.backend,
            Category::Database => &self.database,
            Category::Hosting => &self.hosting,
            Category::Css => &self.css,
            Category::StateManagement => &self.state_management,
            Category::Orm => &self.orm,
            Category::Auth => &self.auth,
            Category::Realtime => &self.realtime,
        }
    }

    pub(crate) fn slot_mut(&mut self, category: Category) -> &mut Option<String> {
        match category {
            Category::Frontend => &mut self.frontend,
            Category::Backend => &mut self.backend,
            Category::Database => &mut self.database,
            Category::Hosting => &mut self.hosting,
            Category::Css => &mut self.css,
            Category::StateManagement => &mut self.state_management,
            Category::Orm => &mut self.orm,
            Category::Auth => &mut self.auth,
            Category::Realtime => &mut self.realtime,
        }
    }
}
