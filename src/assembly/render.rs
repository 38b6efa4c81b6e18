//! Design-driven file rendering
//!
//! Every dynamic file is rendered from one shared [`tera::Context`] built out
//! of the design system, the style variation and the page content. The
//! templates are embedded in the binary and registered once per renderer.

use crate::design::variation::{
    AnimationLevel, ButtonStyle, CardStyle, LayoutVariant, SpacingScale,
};
use crate::design::{DesignSystem, StyleVariation, Typography};
use crate::error::{Error, Result};
use crate::types::{CallToAction, ContentSection, SectionType, WebsiteContent};
use crate::utils::slugify;
use serde::Serialize;
use std::error::Error as StdError;
use tera::{Context, Tera};
use tracing::debug;

mod embedded {
    pub const INDEX_HTML: &str = include_str!("../../templates/site/index.html.tera");
    pub const STYLES_CSS: &str = include_str!("../../templates/site/styles.css.tera");
    pub const MAIN_JS: &str = include_str!("../../templates/site/main.js.tera");
    pub const PACKAGE_JSON: &str = include_str!("../../templates/site/package.json.tera");
    pub const README: &str = include_str!("../../templates/site/README.md.tera");
}

/// Files produced from the design and content, in project order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DynamicFile {
    /// Page markup
    IndexHtml,
    /// Stylesheet with the design tokens applied
    Styles,
    /// Interaction script
    MainJs,
    /// Package manifest named after the business
    PackageJson,
    /// Project readme
    Readme,
    /// Machine-readable design tokens
    DesignTokens,
    /// Machine-readable page copy
    ContentJson,
}

impl DynamicFile {
    /// Every dynamic file
    pub const ALL: [DynamicFile; 7] = [
        DynamicFile::PackageJson,
        DynamicFile::IndexHtml,
        DynamicFile::MainJs,
        DynamicFile::Styles,
        DynamicFile::Readme,
        DynamicFile::DesignTokens,
        DynamicFile::ContentJson,
    ];

    /// Project-relative path
    pub fn path(&self) -> &'static str {
        match self {
            DynamicFile::IndexHtml => "index.html",
            DynamicFile::Styles => "src/styles.css",
            DynamicFile::MainJs => "src/main.js",
            DynamicFile::PackageJson => "package.json",
            DynamicFile::Readme => "README.md",
            DynamicFile::DesignTokens => "design-tokens.json",
            DynamicFile::ContentJson => "content.json",
        }
    }

    /// Registered template, `None` for files serialized directly
    fn template(&self) -> Option<&'static str> {
        match self {
            DynamicFile::IndexHtml => Some("index.html"),
            DynamicFile::Styles => Some("styles.css"),
            DynamicFile::MainJs => Some("main.js"),
            DynamicFile::PackageJson => Some("package.json"),
            DynamicFile::Readme => Some("README.md"),
            DynamicFile::DesignTokens | DynamicFile::ContentJson => None,
        }
    }
}

impl std::fmt::Display for DynamicFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Everything a render needs
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    /// Resolved design system
    pub design: &'a DesignSystem,
    /// Resolved style variation
    pub variation: &'a StyleVariation,
    /// Assembled page content
    pub content: &'a WebsiteContent,
}

/// CSS values derived from the closed style enums
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CssTokens {
    /// Button corner radius
    pub button_radius: &'static str,
    /// Card corner radius
    pub card_radius: &'static str,
    /// Card box-shadow
    pub card_shadow: &'static str,
    /// Card border
    pub card_border: &'static str,
    /// Vertical section padding
    pub section_padding: &'static str,
    /// Grid and flex gap
    pub gap: &'static str,
    /// Transition duration
    pub transition: &'static str,
    /// Minimum card column width
    pub card_min_width: &'static str,
}

impl CssTokens {
    /// Map a variation onto concrete CSS values
    pub fn from_variation(variation: &StyleVariation) -> Self {
        let styles = &variation.component_styles;

        let button_radius = match styles.buttons {
            ButtonStyle::Rounded | ButtonStyle::Outline => "0.5rem",
            ButtonStyle::Pill => "999px",
            ButtonStyle::Sharp => "0",
        };

        let (card_radius, card_shadow, card_border) = match styles.cards {
            CardStyle::Flat => ("0.5rem", "none", "0"),
            CardStyle::Elevated => ("0.75rem", "0 10px 30px rgba(0, 0, 0, 0.08)", "0"),
            CardStyle::Bordered => (
                "0.5rem",
                "none",
                "1px solid color-mix(in srgb, var(--color-muted) 35%, transparent)",
            ),
            CardStyle::Glass => (
                "1rem",
                "0 8px 32px rgba(0, 0, 0, 0.12)",
                "1px solid rgba(255, 255, 255, 0.25)",
            ),
        };

        let (section_padding, gap) = match variation.spacing_scale {
            SpacingScale::Compact => ("3rem", "1rem"),
            SpacingScale::Comfortable => ("5rem", "1.5rem"),
            SpacingScale::Spacious => ("7rem", "2rem"),
        };

        let transition = match variation.animation_level {
            AnimationLevel::None => "0ms",
            AnimationLevel::Subtle => "150ms",
            AnimationLevel::Moderate => "250ms",
            AnimationLevel::Dynamic => "400ms",
        };

        let card_min_width = match variation.layout_variant {
            LayoutVariant::Grid | LayoutVariant::Magazine => "220px",
            LayoutVariant::Minimal | LayoutVariant::Centered => "300px",
            _ => "260px",
        };

        Self {
            button_radius,
            card_radius,
            card_shadow,
            card_border,
            section_padding,
            gap,
            transition,
            card_min_width,
        }
    }
}

#[derive(Debug, Serialize)]
struct SiteView<'a> {
    name: &'a str,
    slug: String,
    tagline: &'a str,
    description: &'a str,
    industry: &'a str,
    industry_name: &'static str,
    site_type: String,
}

#[derive(Debug, Serialize)]
struct NavLink<'a> {
    label: &'a str,
    anchor: String,
}

#[derive(Debug, Serialize)]
struct ItemView<'a> {
    title: &'a str,
    detail: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SectionView<'a> {
    kind: String,
    anchor: &'static str,
    title: &'a str,
    content: &'a str,
    is_html: bool,
    items: Option<Vec<ItemView<'a>>>,
    cta: Option<&'a CallToAction>,
}

#[derive(Debug, Serialize)]
struct TokenView {
    name: &'static str,
    value: &'static str,
}

#[derive(Debug, Serialize)]
struct TypographyView {
    heading_font: &'static str,
    body_font: &'static str,
    heading_family: String,
    body_family: String,
    base_size_px: u8,
    heading_weight: u16,
    h1_rem: String,
    h2_rem: String,
    h3_rem: String,
}

#[derive(Debug, Serialize)]
struct StyleView {
    layout: &'static str,
    buttons: &'static str,
    cards: &'static str,
    navigation: &'static str,
    hero: &'static str,
    spacing: &'static str,
    animation: &'static str,
    image: &'static str,
    interactions: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct DesignTokens<'a> {
    industry: &'static str,
    palette: &'a crate::design::ColorPalette,
    personality: &'a crate::design::DesignPersonality,
    typography: &'a Typography,
    style: &'a StyleVariation,
    css: CssTokens,
}

/// Renders the dynamic project files
#[derive(Debug)]
pub struct SiteRenderer {
    tera: Tera,
}

impl SiteRenderer {
    /// Register the embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("index.html", embedded::INDEX_HTML),
            ("styles.css", embedded::STYLES_CSS),
            ("main.js", embedded::MAIN_JS),
            ("package.json", embedded::PACKAGE_JSON),
            ("README.md", embedded::README),
        ])
        .map_err(|e| render_error("templates", &e))?;

        Ok(Self { tera })
    }

    /// Render one file
    pub fn render(&self, file: DynamicFile, input: &RenderInput<'_>) -> Result<String> {
        match file.template() {
            Some(name) => {
                let context = build_context(input)?;
                self.render_template(file, name, &context)
            }
            None => serialize(file, input),
        }
    }

    /// Render every dynamic file, stopping at the first failure per file
    pub fn render_all(&self, input: &RenderInput<'_>) -> Vec<(DynamicFile, Result<String>)> {
        let context = build_context(input);

        DynamicFile::ALL
            .iter()
            .map(|file| {
                let rendered = match (file.template(), &context) {
                    (Some(name), Ok(context)) => self.render_template(*file, name, context),
                    (Some(_), Err(e)) => Err(Error::Render {
                        file: file.path().to_string(),
                        message: e.to_string(),
                    }),
                    (None, _) => serialize(*file, input),
                };
                (*file, rendered)
            })
            .collect()
    }

    fn render_template(&self, file: DynamicFile, name: &str, context: &Context) -> Result<String> {
        let rendered = self
            .tera
            .render(name, context)
            .map_err(|e| render_error(file.path(), &e))?;
        debug!(file = file.path(), bytes = rendered.len(), "Rendered file");
        Ok(rendered)
    }
}

fn serialize(file: DynamicFile, input: &RenderInput<'_>) -> Result<String> {
    let json = match file {
        DynamicFile::DesignTokens => serde_json::to_string_pretty(&DesignTokens {
            industry: input.design.industry.id,
            palette: &input.design.colors,
            personality: &input.design.personality,
            typography: &input.design.typography,
            style: input.variation,
            css: CssTokens::from_variation(input.variation),
        }),
        _ => serde_json::to_string_pretty(input.content),
    };

    json.map(|mut s| {
        s.push('\n');
        s
    })
    .map_err(|e| Error::Render {
        file: file.path().to_string(),
        message: e.to_string(),
    })
}

/// Tera nests the useful message in the error source chain
fn render_error(file: &str, err: &tera::Error) -> Error {
    let mut message = err.to_string();
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    Error::Render {
        file: file.to_string(),
        message,
    }
}

fn build_context(input: &RenderInput<'_>) -> Result<Context> {
    let RenderInput {
        design,
        variation,
        content,
    } = *input;

    let site = SiteView {
        name: &content.business_name,
        slug: package_name(&content.business_name),
        tagline: &content.tagline,
        description: &content.description,
        industry: &content.industry,
        industry_name: design.industry.name,
        site_type: content.site_type.to_string(),
    };

    let nav: Vec<NavLink<'_>> = content
        .navigation
        .iter()
        .map(|label| NavLink {
            label,
            anchor: content
                .sections
                .iter()
                .find(|s| &s.title == label)
                .map(|s| s.section_type.anchor().to_string())
                .unwrap_or_else(|| slugify(label)),
        })
        .collect();

    let sections: Vec<SectionView<'_>> = content.sections.iter().map(section_view).collect();

    let palette_vars: Vec<TokenView> = design
        .colors
        .css_variables()
        .into_iter()
        .map(|(name, value)| TokenView { name, value })
        .collect();

    let typography = typography_view(&design.typography);
    let style = style_view(variation);
    let interactions_json = serde_json::to_string(&style.interactions)?;

    let mut context = Context::new();
    context.insert("site", &site);
    context.insert("nav", &nav);
    context.insert("sections", &sections);
    context.insert("palette_vars", &palette_vars);
    context.insert("colors", &design.colors);
    context.insert("typography", &typography);
    context.insert("css", &CssTokens::from_variation(variation));
    context.insert("fonts_url", &fonts_url(&design.typography));
    context.insert("interactions_json", &interactions_json);
    context.insert("style", &style);
    Ok(context)
}

fn section_view(section: &ContentSection) -> SectionView<'_> {
    let split = splits_items(section.section_type);
    let items = section.items.as_ref().map(|items| {
        items
            .iter()
            .map(|item| match item.split_once(": ") {
                Some((title, detail)) if split && !title.trim().is_empty() => ItemView {
                    title: title.trim(),
                    detail: Some(detail.trim()),
                },
                _ => ItemView {
                    title: item,
                    detail: None,
                },
            })
            .collect()
    });

    SectionView {
        kind: section.section_type.to_string(),
        anchor: section.section_type.anchor(),
        title: &section.title,
        content: &section.content,
        is_html: section.content.trim_start().starts_with('<'),
        items,
        cta: section.cta.as_ref(),
    }
}

/// Testimonials keep their colons; everything else reads "Title: detail"
fn splits_items(section: SectionType) -> bool {
    !matches!(section, SectionType::Testimonials)
}

fn style_view(variation: &StyleVariation) -> StyleView {
    let styles = &variation.component_styles;
    StyleView {
        layout: variation.layout_variant.as_str(),
        buttons: styles.buttons.as_str(),
        cards: styles.cards.as_str(),
        navigation: styles.navigation.as_str(),
        hero: styles.hero.as_str(),
        spacing: variation.spacing_scale.as_str(),
        animation: variation.animation_level.as_str(),
        image: variation.image_style.as_str(),
        interactions: variation
            .interaction_patterns
            .iter()
            .map(|p| p.as_str())
            .collect(),
    }
}

fn typography_view(typography: &Typography) -> TypographyView {
    TypographyView {
        heading_font: typography.heading_font,
        body_font: typography.body_font,
        heading_family: primary_family(typography.heading_font),
        body_family: primary_family(typography.body_font),
        base_size_px: typography.base_size_px,
        heading_weight: typography.heading_weight,
        h1_rem: format!("{:.2}", typography.heading_size_rem(1)),
        h2_rem: format!("{:.2}", typography.heading_size_rem(2)),
        h3_rem: format!("{:.2}", typography.heading_size_rem(3)),
    }
}

/// First family of a CSS font stack, unquoted
fn primary_family(stack: &str) -> String {
    stack
        .split(',')
        .next()
        .unwrap_or(stack)
        .trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .to_string()
}

/// Web font stylesheet for the heading and body families
pub fn fonts_url(typography: &Typography) -> String {
    let heading = primary_family(typography.heading_font);
    let body = primary_family(typography.body_font);

    let mut families = vec![format!(
        "family={}:wght@400;{}",
        heading.replace(' ', "+"),
        typography.heading_weight.max(500)
    )];
    if body != heading {
        families.push(format!("family={}:wght@400;600", body.replace(' ', "+")));
    }

    format!(
        "https://fonts.googleapis.com/css2?{}&display=swap",
        families.join("&")
    )
}

/// npm package name for a business
pub fn package_name(business_name: &str) -> String {
    let slug = slugify(business_name);
    if slug.is_empty() {
        "website".to_string()
    } else {
        slug
    }
}
