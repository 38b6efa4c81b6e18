//! Core type definitions for SITESMITH

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Kind of website a prompt asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    /// Personal or creative showcase
    Portfolio,
    /// General company site
    Business,
    /// Restaurant, cafe or food service
    Restaurant,
    /// Online store
    Ecommerce,
    /// Blog or publication
    Blog,
}

impl SiteType {
    /// All site types in declaration order
    pub const ALL: [SiteType; 5] = [
        SiteType::Portfolio,
        SiteType::Business,
        SiteType::Restaurant,
        SiteType::Ecommerce,
        SiteType::Blog,
    ];

    /// Human-readable label used in fallback copy
    pub fn label(&self) -> &'static str {
        match self {
            SiteType::Portfolio => "Studio",
            SiteType::Business => "Group",
            SiteType::Restaurant => "Kitchen",
            SiteType::Ecommerce => "Shop",
            SiteType::Blog => "Journal",
        }
    }
}

impl std::fmt::Display for SiteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteType::Portfolio => write!(f, "portfolio"),
            SiteType::Business => write!(f, "business"),
            SiteType::Restaurant => write!(f, "restaurant"),
            SiteType::Ecommerce => write!(f, "ecommerce"),
            SiteType::Blog => write!(f, "blog"),
        }
    }
}

impl std::str::FromStr for SiteType {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "portfolio" => Ok(SiteType::Portfolio),
            "business" => Ok(SiteType::Business),
            "restaurant" => Ok(SiteType::Restaurant),
            "ecommerce" | "e-commerce" | "store" => Ok(SiteType::Ecommerce),
            "blog" => Ok(SiteType::Blog),
            other => Err(crate::error::Error::Parse(format!(
                "Unknown site type: {}",
                other
            ))),
        }
    }
}

/// Kind of section rendered on the generated page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionType {
    /// Top-of-page banner
    Hero,
    /// Story / about us
    About,
    /// Offered services
    Services,
    /// Product catalogue highlights
    Products,
    /// Food and drink menu
    Menu,
    /// Portfolio projects
    Projects,
    /// Blog posts
    Posts,
    /// Selling points
    Features,
    /// Customer quotes
    Testimonials,
    /// Closing call to action
    CallToAction,
    /// Contact details
    Contact,
}

impl SectionType {
    /// Anchor id used for in-page navigation
    pub fn anchor(&self) -> &'static str {
        match self {
            SectionType::Hero => "home",
            SectionType::About => "about",
            SectionType::Services => "services",
            SectionType::Products => "products",
            SectionType::Menu => "menu",
            SectionType::Projects => "work",
            SectionType::Posts => "posts",
            SectionType::Features => "features",
            SectionType::Testimonials => "testimonials",
            SectionType::CallToAction => "get-started",
            SectionType::Contact => "contact",
        }
    }

    /// Whether the section gets a navigation entry
    pub fn in_navigation(&self) -> bool {
        !matches!(
            self,
            SectionType::Hero | SectionType::CallToAction | SectionType::Testimonials
        )
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SectionType::Hero => "hero",
            SectionType::About => "about",
            SectionType::Services => "services",
            SectionType::Products => "products",
            SectionType::Menu => "menu",
            SectionType::Projects => "projects",
            SectionType::Posts => "posts",
            SectionType::Features => "features",
            SectionType::Testimonials => "testimonials",
            SectionType::CallToAction => "call-to-action",
            SectionType::Contact => "contact",
        };
        write!(f, "{}", name)
    }
}

/// Button or link attached to a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    /// Button label
    pub label: String,
    /// Link target
    pub href: String,
}

/// One section of generated page content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSection {
    /// Section kind
    #[serde(rename = "type")]
    pub section_type: SectionType,
    /// Heading
    pub title: String,
    /// Body text or inner markup
    pub content: String,
    /// List entries for list-style sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    /// Optional button
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<CallToAction>,
}

impl ContentSection {
    /// Create a section without items or call to action
    pub fn new(section_type: SectionType, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            section_type,
            title: title.into(),
            content: content.into(),
            items: None,
            cta: None,
        }
    }

    /// Builder method to attach list items
    pub fn with_items(mut self, items: Vec<String>) -> Self {
        self.items = Some(items);
        self
    }

    /// Builder method to attach a call to action
    pub fn with_cta(mut self, label: impl Into<String>, href: impl Into<String>) -> Self {
        self.cta = Some(CallToAction {
            label: label.into(),
            href: href.into(),
        });
        self
    }

    /// True when the title, body and every item carry text
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.content.trim().is_empty()
            && self
                .items
                .as_ref()
                .map(|items| !items.is_empty() && items.iter().all(|i| !i.trim().is_empty()))
                .unwrap_or(true)
    }
}

/// Generated business content for one website
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsiteContent {
    /// Business name
    pub business_name: String,
    /// Short slogan
    pub tagline: String,
    /// One-paragraph description
    pub description: String,
    /// Industry the content was written for
    pub industry: String,
    /// Site type the content was written for
    pub site_type: SiteType,
    /// Navigation labels in page order
    pub navigation: Vec<String>,
    /// Page sections in page order
    pub sections: Vec<ContentSection>,
}

impl WebsiteContent {
    /// Find the first section of a given type
    pub fn section(&self, section_type: SectionType) -> Option<&ContentSection> {
        self.sections.iter().find(|s| s.section_type == section_type)
    }

    /// Every field non-empty and every section complete
    pub fn is_complete(&self) -> bool {
        !self.business_name.trim().is_empty()
            && !self.tagline.trim().is_empty()
            && !self.description.trim().is_empty()
            && !self.industry.trim().is_empty()
            && !self.navigation.is_empty()
            && !self.sections.is_empty()
            && self.sections.iter().all(ContentSection::is_complete)
    }
}

/// Language of a project file, inferred from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileLanguage {
    /// HTML markup
    Html,
    /// Stylesheet
    Css,
    /// JavaScript source
    JavaScript,
    /// JSON document
    Json,
    /// Markdown document
    Markdown,
    /// Anything else
    Text,
}

impl FileLanguage {
    /// Infer the language from a file path
    pub fn from_path(path: &str) -> Self {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some("html") | Some("htm") => FileLanguage::Html,
            Some("css") => FileLanguage::Css,
            Some("js") | Some("mjs") | Some("cjs") => FileLanguage::JavaScript,
            Some("json") => FileLanguage::Json,
            Some("md") => FileLanguage::Markdown,
            _ => FileLanguage::Text,
        }
    }
}

impl std::fmt::Display for FileLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileLanguage::Html => write!(f, "html"),
            FileLanguage::Css => write!(f, "css"),
            FileLanguage::JavaScript => write!(f, "javascript"),
            FileLanguage::Json => write!(f, "json"),
            FileLanguage::Markdown => write!(f, "markdown"),
            FileLanguage::Text => write!(f, "text"),
        }
    }
}

/// One file of the virtual project; `path` is the unique key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Project-relative path
    pub path: String,
    /// File contents
    pub content: String,
    /// Inferred language
    pub language: FileLanguage,
}

impl ProjectFile {
    /// Create a file, inferring its language from the path
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let language = FileLanguage::from_path(&path);
        Self {
            path,
            content: content.into(),
            language,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_type_round_trip_names() {
        for site_type in SiteType::ALL {
            let parsed: SiteType = site_type.to_string().parse().unwrap();
            assert_eq!(parsed, site_type);
        }
        assert!("wiki".parse::<SiteType>().is_err());
    }

    #[test]
    fn test_file_language_inference() {
        assert_eq!(FileLanguage::from_path("index.html"), FileLanguage::Html);
        assert_eq!(FileLanguage::from_path("src/styles.css"), FileLanguage::Css);
        assert_eq!(FileLanguage::from_path("src/main.js"), FileLanguage::JavaScript);
        assert_eq!(FileLanguage::from_path("package.json"), FileLanguage::Json);
        assert_eq!(FileLanguage::from_path("README.md"), FileLanguage::Markdown);
        assert_eq!(FileLanguage::from_path(".gitignore"), FileLanguage::Text);
    }

    #[test]
    fn test_section_completeness() {
        let section = ContentSection::new(SectionType::Services, "Services", "What we do")
            .with_items(vec!["Fitting".to_string(), String::new()]);
        assert!(!section.is_complete());

        let section = ContentSection::new(SectionType::About, "About", "Since 1998")
            .with_cta("Visit us", "#contact");
        assert!(section.is_complete());
    }

    #[test]
    fn test_section_serializes_type_field() {
        let section = ContentSection::new(SectionType::CallToAction, "Ready?", "Come in today");
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["type"], "call-to-action");
        assert!(json.get("items").is_none());
    }
}
