//! Persistence for the advisor's cross-call state.
//!
//! The pipeline talks to an [`AdvisorStore`] rather than to files, so the
//! same code runs against `~/.stackwise/advisor/*.json` ([`FileStore`]) or
//! plain values ([`MemoryStore`]).
//!
//! A store file that is missing or not valid JSON is replaced by defaults.
//! Corruption additionally yields a [`StoreWarning`] so callers can tell the
//! user that learned state was discarded.

use crate::compatibility::CompatibilityRules;
use crate::error::Result;
use crate::io;
use crate::paths;
use crate::patterns::LearnedPatterns;
use crate::preferences::Preferences;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    Preferences,
    Patterns,
    Compatibility,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreKind::Preferences => "preferences",
            StoreKind::Patterns => "patterns",
            StoreKind::Compatibility => "compatibility",
        })
    }
}

/// Emitted when a store could not be parsed and was reset to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreWarning {
    pub store: StoreKind,
    pub message: String,
}

/// A value read from a store, with a warning if it had to be recovered.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub value: T,
    pub warning: Option<StoreWarning>,
}

impl<T> Loaded<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }
}

pub trait AdvisorStore {
    fn load_preferences(&self) -> Result<Loaded<Preferences>>;
    fn load_patterns(&self) -> Result<Loaded<LearnedPatterns>>;
    fn load_rules(&self) -> Result<Loaded<CompatibilityRules>>;
    fn save_patterns(&mut self, patterns: &LearnedPatterns) -> Result<()>;
    /// Forget everything; the next loads return defaults.
    fn reset(&mut self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// JSON files under `<home>/.stackwise/advisor/`.
#[derive(Debug, Clone)]
pub struct FileStore {
    home: PathBuf,
}

impl FileStore {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn paths(&self) -> [PathBuf; 3] {
        [
            paths::preferences_path(&self.home),
            paths::patterns_path(&self.home),
            paths::compatibility_path(&self.home),
        ]
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_json::to_string_pretty(value)?;
    io::atomic_write(path, data.as_bytes())
}

/// Read `path` as JSON. Missing → default; invalid JSON → default plus a
/// warning. With `materialize`, the default is written back to disk.
fn load_or_default<T>(path: &Path, kind: StoreKind, materialize: bool) -> Result<Loaded<T>>
where
    T: DeserializeOwned + Serialize + Default,
{
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let value = T::default();
            if materialize {
                write_json(path, &value)?;
            }
            return Ok(Loaded::clean(value));
        }
        Err(e) => return Err(e.into()),
    };

    // Bytes, not a String: invalid UTF-8 is corruption like any other.
    match serde_json::from_slice(&data) {
        Ok(value) => Ok(Loaded::clean(value)),
        Err(e) => {
            tracing::warn!(
                store = %kind,
                path = %path.display(),
                error = %e,
                "store is corrupt; falling back to defaults"
            );
            let value = T::default();
            if materialize {
                write_json(path, &value)?;
            }
            Ok(Loaded {
                value,
                warning: Some(StoreWarning {
                    store: kind,
                    message: format!(
                        "{} was unreadable ({e}); defaults restored and previous contents discarded",
                        path.display()
                    ),
                }),
            })
        }
    }
}

impl AdvisorStore for FileStore {
    fn load_preferences(&self) -> Result<Loaded<Preferences>> {
        load_or_default(
            &paths::preferences_path(&self.home),
            StoreKind::Preferences,
            true,
        )
    }

    fn load_patterns(&self) -> Result<Loaded<LearnedPatterns>> {
        // Only ever written by learning; no point materializing an empty file.
        load_or_default(&paths::patterns_path(&self.home), StoreKind::Patterns, false)
    }

    fn load_rules(&self) -> Result<Loaded<CompatibilityRules>> {
        load_or_default(
            &paths::compatibility_path(&self.home),
            StoreKind::Compatibility,
            true,
        )
    }

    fn save_patterns(&mut self, patterns: &LearnedPatterns) -> Result<()> {
        write_json(&paths::patterns_path(&self.home), patterns)
    }

    fn reset(&mut self) -> Result<()> {
        for path in self.paths() {
            if io::remove_if_exists(&path)? {
                tracing::debug!(path = %path.display(), "removed store file");
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Store held in memory; starts from defaults.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub preferences: Preferences,
    pub patterns: LearnedPatterns,
    pub rules: CompatibilityRules,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }
}

impl AdvisorStore for MemoryStore {
    fn load_preferences(&self) -> Result<Loaded<Preferences>> {
        Ok(Loaded::clean(self.preferences.clone()))
    }

    fn load_patterns(&self) -> Result<Loaded<LearnedPatterns>> {
        Ok(Loaded::clean(self.patterns.clone()))
    }

    fn load_rules(&self) -> Result<Loaded<CompatibilityRules>> {
        Ok(Loaded::clean(self.rules.clone()))
    }

    fn save_patterns(&mut self, patterns: &LearnedPatterns) -> Result<()> {
        self.patterns = patterns.clone();
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        *self = Self::default();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
