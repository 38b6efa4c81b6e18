//! Fixed project skeleton
//!
//! Embedded at compile time so a project can always be produced, even when
//! every renderer fails.

use crate::types::ProjectFile;

/// Skeleton files embedded at compile time
mod embedded {
    pub const PACKAGE_JSON: &str = include_str!("../../templates/skeleton/package.json");
    pub const INDEX_HTML: &str = include_str!("../../templates/skeleton/index.html");
    pub const VITE_CONFIG: &str = include_str!("../../templates/skeleton/vite.config.js");
    pub const MAIN_JS: &str = include_str!("../../templates/skeleton/src/main.js");
    pub const STYLES_CSS: &str = include_str!("../../templates/skeleton/src/styles.css");
    pub const README: &str = include_str!("../../templates/skeleton/README.md");
    pub const GITIGNORE: &str = include_str!("../../templates/skeleton/.gitignore");
    pub const ROBOTS: &str = include_str!("../../templates/skeleton/public/robots.txt");
    pub const FAVICON: &str = include_str!("../../templates/skeleton/public/favicon.svg");
}

/// Skeleton paths and contents in project order
const SKELETON: &[(&str, &str)] = &[
    ("package.json", embedded::PACKAGE_JSON),
    ("index.html", embedded::INDEX_HTML),
    ("vite.config.js", embedded::VITE_CONFIG),
    ("src/main.js", embedded::MAIN_JS),
    ("src/styles.css", embedded::STYLES_CSS),
    ("README.md", embedded::README),
    (".gitignore", embedded::GITIGNORE),
    ("public/robots.txt", embedded::ROBOTS),
    ("public/favicon.svg", embedded::FAVICON),
];

/// The baseline project every generation starts from
pub fn skeleton_files() -> Vec<ProjectFile> {
    SKELETON
        .iter()
        .map(|(path, content)| ProjectFile::new(*path, *content))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileLanguage;
    use std::collections::HashSet;

    #[test]
    fn test_skeleton_is_a_viable_project() {
        let files = skeleton_files();
        let paths: HashSet<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths.len(), files.len());
        for required in ["package.json", "index.html", "src/main.js", "src/styles.css"] {
            assert!(paths.contains(required), "{required}");
        }
        assert!(files.iter().all(|f| !f.content.trim().is_empty()));
    }

    #[test]
    fn test_skeleton_package_json_parses() {
        let files = skeleton_files();
        let package = files.iter().find(|f| f.path == "package.json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&package.content).unwrap();
        assert_eq!(value["scripts"]["dev"], "vite");
        assert_eq!(package.language, FileLanguage::Json);
    }
}
