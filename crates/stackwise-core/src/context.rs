//! Project context: what an existing project directory already uses.
//!
//! The scan walks the tree below the project root, skipping every path
//! component that starts with `.`, and maps file extensions to languages and
//! root manifests to package managers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const LANGUAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("py", "python"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("rs", "rust"),
    ("go", "go"),
    ("java", "java"),
    ("rb", "ruby"),
    ("php", "php"),
];

const PACKAGE_MANIFESTS: &[(&str, &str)] = &[
    ("package.json", "npm"),
    ("requirements.txt", "pip"),
    ("Cargo.toml", "cargo"),
    ("go.mod", "go"),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub existing_files: Vec<String>,
    pub detected_languages: BTreeSet<String>,
    pub package_managers: BTreeSet<String>,
}

impl ProjectContext {
    pub fn has_language(&self, language: &str) -> bool {
        self.detected_languages.contains(language)
    }

    /// Scan `root`. A missing or unreadable root yields an empty context.
    pub fn scan(root: &Path) -> Self {
        let mut ctx = ProjectContext {
            name: root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned()),
            ..Default::default()
        };

        let mut files = Vec::new();
        walk(root, &mut files);
        files.sort();

        for path in &files {
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if let Some((_, lang)) = LANGUAGE_EXTENSIONS.iter().find(|(e, _)| *e == ext) {
                ctx.detected_languages.insert(lang.to_string());
            }
            if let Ok(rel) = path.strip_prefix(root) {
                ctx.existing_files.push(rel.to_string_lossy().into_owned());
            }
        }

        for (manifest, manager) in PACKAGE_MANIFESTS {
            if root.join(manifest).exists() {
                ctx.package_managers.insert(manager.to_string());
            }
        }

        tracing::debug!(
            files = ctx.existing_files.len(),
            languages = ?ctx.detected_languages,
            "scanned project context"
        );
        ctx
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if is_hidden(&path) {
            continue;
        }
        match entry.file_type() {
            Ok(ft) if ft.is_dir() => walk(&path, out),
            Ok(ft) if ft.is_file() => out.push(path),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn detects_languages_and_package_managers() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("api")).unwrap();
        std::fs::write(dir.path().join("api/main.py"), "").unwrap();
        std::fs::write(dir.path().join("App.TSX"), "").unwrap();
        std::fs::write(dir.path().join("requirements.txt"), "").unwrap();

        let ctx = ProjectContext::scan(dir.path());
        assert!(ctx.has_language("python"));
        assert!(ctx.has_language("typescript"));
        assert!(!ctx.has_language("rust"));
        assert!(ctx.package_managers.contains("pip"));
        assert_eq!(ctx.existing_files.len(), 3);
    }

    #[test]
    fn hidden_paths_are_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".venv/lib")).unwrap();
        std::fs::write(dir.path().join(".venv/lib/site.py"), "").unwrap();
        std::fs::write(dir.path().join(".eslintrc.js"), "").unwrap();

        let ctx = ProjectContext::scan(dir.path());
        assert!(ctx.detected_languages.is_empty());
        assert!(ctx.existing_files.is_empty());
    }

    #[test]
    fn missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let ctx = ProjectContext::scan(&dir.path().join("nope"));
        assert!(ctx.existing_files.is_empty());
        assert!(ctx.package_managers.is_empty());
    }
}
