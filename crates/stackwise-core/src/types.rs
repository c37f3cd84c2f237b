use crate::error::AdvisorError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// A technology slot in a recommended stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Frontend,
    Backend,
    Database,
    Hosting,
    Css,
    StateManagement,
    Orm,
    Auth,
    Realtime,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Frontend,
            Category::Backend,
            Category::Database,
            Category::Hosting,
            Category::Css,
            Category::StateManagement,
            Category::Orm,
            Category::Auth,
            Category::Realtime,
        ]
    }

    /// The four categories chosen by the recommendation generator, in
    /// selection order.
    pub fn primary() -> &'static [Category] {
        &[
            Category::Frontend,
            Category::Backend,
            Category::Database,
            Category::Hosting,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Frontend => "frontend",
            Category::Backend => "backend",
            Category::Database => "database",
            Category::Hosting => "hosting",
            Category::Css => "css",
            Category::StateManagement => "state_management",
            Category::Orm => "orm",
            Category::Auth => "auth",
            Category::Realtime => "realtime",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AdvisorError::InvalidCategory(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ProjectType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    #[default]
    Webapp,
    Api,
    Mobile,
    Desktop,
    Ai,
    Custom,
}

impl ProjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Webapp => "webapp",
            ProjectType::Api => "api",
            ProjectType::Mobile => "mobile",
            ProjectType::Desktop => "desktop",
            ProjectType::Ai => "ai",
            ProjectType::Custom => "custom",
        }
    }

    /// Project types that ship a user-facing client (frontend + auth).
    pub fn has_client(self) -> bool {
        matches!(self, ProjectType::Webapp | ProjectType::Mobile)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectType {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "webapp" => Ok(ProjectType::Webapp),
            "api" => Ok(ProjectType::Api),
            "mobile" => Ok(ProjectType::Mobile),
            "desktop" => Ok(ProjectType::Desktop),
            "ai" => Ok(ProjectType::Ai),
            "custom" => Ok(ProjectType::Custom),
            _ => Err(AdvisorError::InvalidProjectType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Device
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    Web,
    Mobile,
    Desktop,
}

impl Device {
    pub fn as_str(self) -> &'static str {
        match self {
            Device::Web => "web",
            Device::Mobile => "mobile",
            Device::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Device {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web" => Ok(Device::Web),
            "mobile" => Ok(Device::Mobile),
            "desktop" => Ok(Device::Desktop),
            _ => Err(AdvisorError::InvalidDevice(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_matches_as_str() {
        for c in Category::all() {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), *c);
        }
        assert!("tools".parse::<Category>().is_err());
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&Category::StateManagement).unwrap();
        assert_eq!(json, "\"state_management\"");
    }

    #[test]
    fn project_type_parse() {
        assert_eq!("api".parse::<ProjectType>().unwrap(), ProjectType::Api);
        assert!("simple".parse::<ProjectType>().is_err());
        assert!(ProjectType::Mobile.has_client());
        assert!(!ProjectType::Api.has_client());
    }

    #[test]
    fn device_parse() {
        assert_eq!("desktop".parse::<Device>().unwrap(), Device::Desktop);
        assert!("watch".parse::<Device>().is_err());
    }
}
