//! Requirement parsing: free-text project description to a normalized
//! requirement record.
//!
//! Detection is plain substring matching over fixed keyword tables. Detected
//! technologies are listed in table order, not in the order they appear in
//! the text, so "first mentioned" means "first in the table".

use crate::types::{Category, Device, ProjectType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// Keyword tables
// ---------------------------------------------------------------------------

type KeywordTable = &'static [(&'static str, &'static [&'static str])];

const FRONTEND_KEYWORDS: KeywordTable = &[
    ("react", &["react", "jsx", "tsx"]),
    ("vue", &["vue", "nuxt"]),
    ("svelte", &["svelte", "sveltekit"]),
    ("angular", &["angular", "@angular"]),
    ("nextjs", &["next.js", "nextjs", "next"]),
    ("remix", &["remix"]),
    ("solid", &["solidjs", "solid"]),
];

const BACKEND_KEYWORDS: KeywordTable = &[
    ("fastapi", &["fastapi", "fast api"]),
    ("django", &["django"]),
    ("flask", &["flask"]),
    ("express", &["express", "node.js", "nodejs"]),
    ("nestjs", &["nest.js", "nestjs"]),
    ("spring", &["spring", "spring boot"]),
    ("rails", &["rails", "ruby on rails"]),
    ("laravel", &["laravel"]),
    ("rust", &["rust", "actix", "warp", "axum"]),
    ("go", &["golang", "go", "gin", "echo"]),
];

const DATABASE_KEYWORDS: KeywordTable = &[
    ("postgresql", &["postgres", "postgresql", "pg"]),
    ("mysql", &["mysql"]),
    ("mongodb", &["mongo", "mongodb"]),
    ("sqlite", &["sqlite"]),
    ("redis", &["redis"]),
    ("supabase", &["supabase"]),
    ("firebase", &["firebase", "firestore"]),
    ("planetscale", &["planetscale"]),
    ("turso", &["turso"]),
    ("neon", &["neon"]),
];

const HOSTING_KEYWORDS: KeywordTable = &[
    ("vercel", &["vercel"]),
    ("netlify", &["netlify"]),
    ("aws", &["aws", "amazon web services"]),
    ("gcp", &["google cloud", "gcp"]),
    ("azure", &["azure"]),
    ("railway", &["railway"]),
    ("fly.io", &["fly.io", "fly"]),
    ("render", &["render"]),
    ("cloudflare", &["cloudflare", "workers"]),
];

const MOBILE_KEYWORDS: &[&str] = &["mobile", "ios", "android"];
const DESKTOP_KEYWORDS: &[&str] = &["desktop", "electron", "tauri"];
const REALTIME_KEYWORDS: &[&str] = &["real-time", "websocket"];
const OFFLINE_KEYWORDS: &[&str] = &["offline"];

fn keyword_table(category: Category) -> KeywordTable {
    match category {
        Category::Frontend => FRONTEND_KEYWORDS,
        Category::Backend => BACKEND_KEYWORDS,
        Category::Database => DATABASE_KEYWORDS,
        Category::Hosting => HOSTING_KEYWORDS,
        _ => &[],
    }
}

fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A caller's request for a recommendation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRequest {
    #[serde(rename = "type", default)]
    pub project_type: ProjectType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub devices: Vec<Device>,
}

impl ProjectRequest {
    pub fn new(project_type: ProjectType, description: impl Into<String>) -> Self {
        Self {
            project_type,
            description: description.into(),
            devices: vec![Device::Web],
        }
    }

    pub fn with_devices(mut self, devices: Vec<Device>) -> Self {
        self.devices = devices;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default)]
    pub realtime: bool,
    #[serde(default)]
    pub offline: bool,
}

/// Normalized requirements for one recommendation call. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    pub project_type: ProjectType,
    pub target_devices: BTreeSet<Device>,
    pub user_specified: BTreeMap<Category, Vec<String>>,
    pub constraints: Constraints,
}

impl Requirements {
    /// Requirements with nothing detected, used when validating a stack the
    /// caller assembled by hand.
    pub fn for_project(project_type: ProjectType) -> Self {
        Self {
            project_type,
            target_devices: BTreeSet::from([Device::Web]),
            user_specified: BTreeMap::new(),
            constraints: Constraints::default(),
        }
    }

    pub fn targets(&self, device: Device) -> bool {
        self.target_devices.contains(&device)
    }

    /// First detected technology for `category`, if any.
    pub fn first_specified(&self, category: Category) -> Option<&str> {
        self.user_specified
            .get(&category)
            .and_then(|techs| techs.first())
            .map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

pub fn parse(request: &ProjectRequest) -> Requirements {
    let text = request.description.to_lowercase();
    let mut reqs = Requirements::for_project(request.project_type);
    reqs.target_devices.extend(request.devices.iter().copied());

    for &category in Category::primary() {
        let detected: Vec<String> = keyword_table(category)
            .iter()
            .filter(|(_, keywords)| mentions_any(&text, keywords))
            .map(|(tech, _)| tech.to_string())
            .collect();
        if !detected.is_empty() {
            reqs.user_specified.insert(category, detected);
        }
    }

    if mentions_any(&text, MOBILE_KEYWORDS) {
        reqs.target_devices.insert(Device::Mobile);
    }
    if mentions_any(&text, DESKTOP_KEYWORDS) {
        reqs.target_devices.insert(Device::Desktop);
    }
    reqs.constraints.realtime = mentions_any(&text, REALTIME_KEYWORDS);
    reqs.constraints.offline = mentions_any(&text, OFFLINE_KEYWORDS);

    tracing::debug!(
        project_type = %reqs.project_type,
        detected = reqs.user_specified.values().map(Vec::len).sum::<usize>(),
        realtime = reqs.constraints.realtime,
        "parsed requirements"
    );
    reqs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_text(text: &str) -> Requirements {
        parse(&ProjectRequest::new(ProjectType::Webapp, text))
    }

    #[test]
    fn detects_named_technologies() {
        let reqs = parse_text("A React and FastAPI app with Postgres");
        assert_eq!(reqs.first_specified(Category::Frontend), Some("react"));
        assert_eq!(reqs.first_specified(Category::Backend), Some("fastapi"));
        assert_eq!(reqs.first_specified(Category::Database), Some("postgresql"));
        assert_eq!(reqs.first_specified(Category::Hosting), None);
    }

    #[test]
    fn table_order_beats_text_order() {
        let reqs = parse_text("svelte front, maybe vue later");
        assert_eq!(
            reqs.user_specified[&Category::Frontend],
            vec!["vue".to_string(), "svelte".to_string()]
        );
    }

    #[test]
    fn substring_keywords_match_inside_words() {
        // "mongo" contains "go", so the go backend is detected too.
        let reqs = parse_text("store data in mongo");
        assert_eq!(reqs.first_specified(Category::Database), Some("mongodb"));
        assert_eq!(reqs.first_specified(Category::Backend), Some("go"));
    }

    #[test]
    fn web_is_always_targeted() {
        let request = ProjectRequest {
            project_type: ProjectType::Desktop,
            description: "an electron tool".into(),
            devices: vec![],
        };
        let reqs = parse(&request);
        assert!(reqs.targets(Device::Web));
        assert!(reqs.targets(Device::Desktop));
        assert!(!reqs.targets(Device::Mobile));
    }

    #[test]
    fn detects_devices_and_constraints() {
        let reqs = parse_text("iOS and Android chat with websocket updates, works offline");
        assert!(reqs.targets(Device::Mobile));
        assert!(reqs.constraints.realtime);
        assert!(reqs.constraints.offline);
    }

    #[test]
    fn empty_description_detects_nothing() {
        let reqs = parse_text("");
        assert!(reqs.user_specified.is_empty());
        assert_eq!(reqs.constraints, Constraints::default());
        assert_eq!(reqs.target_devices.len(), 1);
    }

    #[test]
    fn request_deserializes_type_field() {
        let json = r#"{"type": "api", "description": "x", "devices": ["web", "mobile"]}"#;
        let request: ProjectRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.project_type, ProjectType::Api);
        assert_eq!(request.devices, vec![Device::Web, Device::Mobile]);
    }
}
