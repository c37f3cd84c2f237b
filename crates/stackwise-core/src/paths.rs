use crate::error::{AdvisorError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const ADVISOR_DIR: &str = ".stackwise/advisor";

pub const CONFIG_FILE: &str = ".stackwise/config.yaml";

pub const PREFERENCES_FILE: &str = "preferences.json";
pub const PATTERNS_FILE: &str = "patterns.json";
pub const COMPATIBILITY_FILE: &str = "compatibility.json";

/// Environment variable overriding the home directory used for all state.
pub const HOME_ENV: &str = "STACKWISE_HOME";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Resolve the base directory that holds `.stackwise/`.
///
/// Priority: explicit path, then `STACKWISE_HOME`, then the user's home.
pub fn resolve_home(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    if let Some(p) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    home::home_dir().ok_or(AdvisorError::HomeNotFound)
}

pub fn advisor_dir(home: &Path) -> PathBuf {
    home.join(ADVISOR_DIR)
}

pub fn preferences_path(home: &Path) -> PathBuf {
    advisor_dir(home).join(PREFERENCES_FILE)
}

pub fn patterns_path(home: &Path) -> PathBuf {
    advisor_dir(home).join(PATTERNS_FILE)
}

pub fn compatibility_path(home: &Path) -> PathBuf {
    advisor_dir(home).join(COMPATIBILITY_FILE)
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_home_wins() {
        let home = resolve_home(Some(Path::new("/tmp/someone"))).unwrap();
        assert_eq!(home, PathBuf::from("/tmp/someone"));
    }

    #[test]
    fn path_helpers() {
        let home = Path::new("/home/dev");
        assert_eq!(
            preferences_path(home),
            PathBuf::from("/home/dev/.stackwise/advisor/preferences.json")
        );
        assert_eq!(
            patterns_path(home),
            PathBuf::from("/home/dev/.stackwise/advisor/patterns.json")
        );
        assert_eq!(
            compatibility_path(home),
            PathBuf::from("/home/dev/.stackwise/advisor/compatibility.json")
        );
        assert_eq!(
            config_path(home),
            PathBuf::from("/home/dev/.stackwise/config.yaml")
        );
    }
}
