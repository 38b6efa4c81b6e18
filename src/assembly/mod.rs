//! Project assembly
//!
//! A project is the fixed skeleton with design-driven files laid over it.
//! A rendered file replaces the skeleton file at the same path in place;
//! paths the skeleton does not have are appended in render order. When a
//! render fails the skeleton version survives, so assembly never fails.

pub mod render;
pub mod skeleton;

pub use render::{CssTokens, DynamicFile, RenderInput, SiteRenderer};
pub use skeleton::skeleton_files;

use crate::design::{DesignSystem, StyleVariation};
use crate::types::{ProjectFile, WebsiteContent};
use tracing::{debug, warn};

/// Overlay `overrides` on `base`: same path replaces in place, new paths append
pub fn merge_files(base: Vec<ProjectFile>, overrides: Vec<ProjectFile>) -> Vec<ProjectFile> {
    let mut merged = base;
    for file in overrides {
        match merged.iter_mut().find(|existing| existing.path == file.path) {
            Some(existing) => *existing = file,
            None => merged.push(file),
        }
    }
    merged
}

/// Renders dynamic files and merges them onto a skeleton
#[derive(Debug)]
pub struct Assembler {
    renderer: Option<SiteRenderer>,
}

impl Assembler {
    /// Assembler with the embedded templates
    pub fn new() -> Self {
        let renderer = match SiteRenderer::new() {
            Ok(renderer) => Some(renderer),
            Err(e) => {
                warn!("Site templates unavailable, using skeleton only: {}", e);
                None
            }
        };
        Self { renderer }
    }

    /// Assembler that only ever returns the skeleton
    pub fn skeleton_only() -> Self {
        Self { renderer: None }
    }

    /// Build the final file list
    pub fn assemble(
        &self,
        design: &DesignSystem,
        variation: &StyleVariation,
        content: &WebsiteContent,
        skeleton: Vec<ProjectFile>,
    ) -> Vec<ProjectFile> {
        let Some(renderer) = &self.renderer else {
            return skeleton;
        };

        let input = RenderInput {
            design,
            variation,
            content,
        };

        let rendered: Vec<ProjectFile> = renderer
            .render_all(&input)
            .into_iter()
            .filter_map(|(file, result)| match result {
                Ok(contents) => Some(ProjectFile::new(file.path(), contents)),
                Err(e) => {
                    warn!(file = file.path(), "Keeping skeleton file: {}", e);
                    None
                }
            })
            .collect();

        debug!(
            skeleton = skeleton.len(),
            rendered = rendered.len(),
            "Merging project files"
        );
        merge_files(skeleton, rendered)
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble with the embedded templates
pub fn assemble(
    design: &DesignSystem,
    variation: &StyleVariation,
    content: &WebsiteContent,
    skeleton: Vec<ProjectFile>,
) -> Vec<ProjectFile> {
    Assembler::new().assemble(design, variation, content, skeleton)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::DesignResolver;
    use crate::types::{ContentSection, SectionType, SiteType};
    use std::collections::HashSet;

    fn content() -> WebsiteContent {
        WebsiteContent {
            business_name: "Harbor Table".to_string(),
            tagline: "Seasonal plates by the water".to_string(),
            description: "A neighbourhood restaurant cooking what the boats bring in.".to_string(),
            industry: "food".to_string(),
            site_type: SiteType::Restaurant,
            navigation: vec!["Menu".to_string(), "Contact".to_string()],
            sections: vec![
                ContentSection::new(SectionType::Hero, "Seasonal plates", "Cooked daily.")
                    .with_cta("Book a Table", "#menu"),
                ContentSection::new(SectionType::Menu, "Menu", "Tonight")
                    .with_items(vec!["Grilled hake: lemon butter".to_string()]),
                ContentSection::new(SectionType::Contact, "Contact", "Open Tuesday to Sunday."),
            ],
        }
    }

    #[test]
    fn test_merge_replaces_in_place_and_appends() {
        let base = vec![
            ProjectFile::new("package.json", "{}"),
            ProjectFile::new("index.html", "<html></html>"),
        ];
        let overrides = vec![
            ProjectFile::new("index.html", "<html>new</html>"),
            ProjectFile::new("content.json", "{}"),
        ];
        let merged = merge_files(base, overrides);
        let paths: Vec<&str> = merged.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["package.json", "index.html", "content.json"]);
        assert_eq!(merged[1].content, "<html>new</html>");
    }

    #[test]
    fn test_assembled_package_json_keeps_skeleton_position() {
        let (design, variation) = DesignResolver::new().resolve("seafood restaurant");
        let skeleton = skeleton_files();
        let position = skeleton.iter().position(|f| f.path == "package.json").unwrap();

        let files = assemble(&design, &variation, &content(), skeleton);
        assert_eq!(files[position].path, "package.json");
        assert!(files[position].content.contains("harbor-table"));
    }

    #[test]
    fn test_assembly_is_superset_without_duplicates() {
        let (design, variation) = DesignResolver::new().resolve("seafood restaurant");
        let skeleton = skeleton_files();
        let skeleton_paths: HashSet<String> = skeleton.iter().map(|f| f.path.clone()).collect();

        let files = assemble(&design, &variation, &content(), skeleton);
        let paths: HashSet<String> = files.iter().map(|f| f.path.clone()).collect();

        assert_eq!(paths.len(), files.len());
        assert!(skeleton_paths.is_subset(&paths));
        assert!(paths.contains("design-tokens.json"));
        assert!(paths.contains("content.json"));
    }

    #[test]
    fn test_skeleton_only_assembler_returns_skeleton() {
        let (design, variation) = DesignResolver::new().resolve("seafood restaurant");
        let files =
            Assembler::skeleton_only().assemble(&design, &variation, &content(), skeleton_files());
        assert_eq!(files, skeleton_files());
    }

    #[test]
    fn test_rendered_index_replaces_skeleton_index() {
        let (design, variation) = DesignResolver::new().resolve("seafood restaurant");
        let files = assemble(&design, &variation, &content(), skeleton_files());
        let index = files.iter().find(|f| f.path == "index.html").unwrap();
        assert!(index.content.contains("Harbor Table"));
        assert!(index.content.contains("Grilled hake"));
    }
}
