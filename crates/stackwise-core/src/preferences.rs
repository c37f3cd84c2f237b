//! User preference weights. Read-only input to ranking.
//!
//! Persisted as `preferences.json`. Score tables keep the key order of the
//! JSON document so that ties on the maximum score resolve to the first key
//! written, not to whatever a hash map happens to yield.

use crate::error::{AdvisorError, Result};
use crate::types::Category;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Below this bias the open-source filter leaves a stack untouched.
pub const OPEN_SOURCE_THRESHOLD: f64 = 0.5;

// ---------------------------------------------------------------------------
// ScoreTable
// ---------------------------------------------------------------------------

/// Insertion-ordered map of technology name to a score in `[0.0, 1.0]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable(Vec<(String, f64)>);

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        let mut table = Self::new();
        for (name, score) in pairs {
            table.insert(*name, *score);
        }
        table
    }

    /// Insert or update a score. Updating keeps the key's original position.
    pub fn insert(&mut self, name: impl Into<String>, score: f64) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = score,
            None => self.0.push((name, score)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, s)| *s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(n, s)| (n.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest-scored entry; on an exact tie the first key seen wins.
    pub fn best(&self) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (name, score) in self.iter() {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((name, score)),
            }
        }
        best.map(|(name, _)| name)
    }

    /// Entries sorted by descending score, ties kept in insertion order.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        entries
    }
}

impl Serialize for ScoreTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, score) in &self.0 {
            map.serialize_entry(name, score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ScoreTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = ScoreTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of technology name to score")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<ScoreTable, A::Error> {
                let mut table = ScoreTable::new();
                while let Some((name, score)) = access.next_entry::<String, f64>()? {
                    table.insert(name, score);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

// ---------------------------------------------------------------------------
// ComplexityPreference
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityPreference {
    Simple,
    #[default]
    Medium,
    Complex,
}

impl ComplexityPreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplexityPreference::Simple => "simple",
            ComplexityPreference::Medium => "medium",
            ComplexityPreference::Complex => "complex",
        }
    }
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameworkPreferences {
    #[serde(default)]
    pub frontend: ScoreTable,
    #[serde(default)]
    pub backend: ScoreTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub language_preferences: ScoreTable,
    #[serde(default)]
    pub framework_preferences: FrameworkPreferences,
    #[serde(default)]
    pub database_preferences: ScoreTable,
    #[serde(default)]
    pub hosting_preferences: ScoreTable,
    #[serde(default = "default_open_source_bias")]
    pub open_source_bias: f64,
    #[serde(default = "default_license_preferences")]
    pub license_preferences: Vec<String>,
    #[serde(default = "default_avoid_licenses")]
    pub avoid_licenses: Vec<String>,
    #[serde(default)]
    pub complexity_preference: ComplexityPreference,
    /// Persisted for future score adaptation; not applied by the pipeline.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

fn default_open_source_bias() -> f64 {
    0.9
}

fn default_license_preferences() -> Vec<String> {
    vec!["MIT".into(), "Apache-2.0".into(), "BSD-3-Clause".into()]
}

fn default_avoid_licenses() -> Vec<String> {
    vec!["GPL".into(), "AGPL".into()]
}

fn default_learning_rate() -> f64 {
    0.1
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language_preferences: ScoreTable::from_pairs(&[
                ("python", 0.9),
                ("typescript", 0.8),
                ("javascript", 0.7),
                ("rust", 0.6),
                ("go", 0.5),
            ]),
            framework_preferences: FrameworkPreferences {
                frontend: ScoreTable::from_pairs(&[
                    ("react", 0.9),
                    ("nextjs", 0.8),
                    ("svelte", 0.7),
                    ("vue", 0.6),
                ]),
                backend: ScoreTable::from_pairs(&[
                    ("fastapi", 0.9),
                    ("express", 0.8),
                    ("nestjs", 0.7),
                    ("django", 0.6),
                ]),
            },
            database_preferences: ScoreTable::from_pairs(&[
                ("postgresql", 0.9),
                ("sqlite", 0.8),
                ("mongodb", 0.6),
            ]),
            hosting_preferences: ScoreTable::from_pairs(&[
                ("vercel", 0.9),
                ("railway", 0.8),
                ("fly.io", 0.7),
                ("render", 0.7),
                ("netlify", 0.6),
            ]),
            open_source_bias: default_open_source_bias(),
            license_preferences: default_license_preferences(),
            avoid_licenses: default_avoid_licenses(),
            complexity_preference: ComplexityPreference::default(),
            learning_rate: default_learning_rate(),
        }
    }
}

impl Preferences {
    /// Score table consulted for a primary category. Secondary categories
    /// are derived by the gap filler and have no table.
    pub fn table(&self, category: Category) -> Option<&ScoreTable> {
        match category {
            Category::Frontend => Some(&self.framework_preferences.frontend),
            Category::Backend => Some(&self.framework_preferences.backend),
            Category::Database => Some(&self.database_preferences),
            Category::Hosting => Some(&self.hosting_preferences),
            _ => None,
        }
    }

    /// The highest-scored technology for `category`.
    ///
    /// An empty (or missing) table is a configuration error, never a silent
    /// null.
    pub fn top_choice(&self, category: Category) -> Result<&str> {
        self.table(category)
            .and_then(ScoreTable::best)
            .ok_or_else(|| AdvisorError::EmptyPreferences {
                table: category.to_string(),
            })
    }

    pub fn prefers_open_source(&self) -> bool {
        self.open_source_bias >= OPEN_SOURCE_THRESHOLD
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
