//! Design resolution
//!
//! Maps a prompt to a concrete design system (industry profile, palette,
//! personality, typography) and a [`StyleVariation`]. Everything here is pure
//! and deterministic: the only source of variety is the seed string, which
//! defaults to the raw prompt.

pub mod industry;
pub mod palette;
pub mod personality;
pub mod seed;
pub mod variation;

use serde::Serialize;
use tracing::debug;

pub use industry::{classify_industry, IndustryProfile, Typography, DEFAULT_PROFILE};
pub use palette::ColorPalette;
pub use personality::{derive_personality, DesignPersonality, Energy, Mood, Sophistication, TrustLevel};
pub use seed::{seed_hash, seed_to_unit, SeededSelector};
pub use variation::{resolve_style_variation, StyleVariation};

/// Resolved design system for one request
#[derive(Debug, Clone, Serialize)]
pub struct DesignSystem {
    /// Matched industry profile
    pub industry: &'static IndustryProfile,
    /// Chosen palette
    pub colors: ColorPalette,
    /// Personality derived from the prompt
    pub personality: DesignPersonality,
    /// Typography of the industry
    pub typography: Typography,
}

/// Resolves design systems, optionally with a fixed seed
#[derive(Debug, Clone, Default)]
pub struct DesignResolver {
    seed_override: Option<String>,
}

impl DesignResolver {
    /// Resolver seeded by each prompt
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver that uses `seed` instead of the prompt
    pub fn with_seed(seed: impl Into<String>) -> Self {
        Self {
            seed_override: Some(seed.into()),
        }
    }

    /// Seed used for a prompt
    pub fn seed_for<'a>(&'a self, prompt: &'a str) -> &'a str {
        self.seed_override.as_deref().unwrap_or(prompt)
    }

    /// Resolve industry, palette, personality and typography
    pub fn resolve_design_system(&self, prompt: &str) -> DesignSystem {
        let industry = classify_industry(prompt);
        let personality = derive_personality(prompt, industry.personality);
        let colors = pick_palette(industry, &personality, &SeededSelector::new(self.seed_for(prompt)));

        debug!(
            industry = industry.id,
            palette = colors.name,
            mood = ?personality.mood,
            "Resolved design system"
        );

        DesignSystem {
            industry,
            colors,
            personality,
            typography: industry.typography,
        }
    }

    /// Resolve both the design system and its style variation
    pub fn resolve(&self, prompt: &str) -> (DesignSystem, StyleVariation) {
        let design = self.resolve_design_system(prompt);
        let variation =
            resolve_style_variation(design.industry, &design.personality, self.seed_for(prompt));
        (design, variation)
    }
}

/// Resolve a design system seeded by the prompt itself
pub fn resolve_design_system(prompt: &str) -> DesignSystem {
    DesignResolver::new().resolve_design_system(prompt)
}

/// Palettes tagged with the personality's mood are preferred; the seed picks
/// among whichever set remains
fn pick_palette(
    industry: &IndustryProfile,
    personality: &DesignPersonality,
    selector: &SeededSelector,
) -> ColorPalette {
    let suited: Vec<ColorPalette> = industry
        .palettes
        .iter()
        .filter(|p| p.suits(personality.mood))
        .copied()
        .collect();

    let candidates: &[ColorPalette] = if suited.is_empty() {
        industry.palettes
    } else {
        &suited
    };

    selector
        .pick("palette", candidates)
        .or_else(|| industry.palettes.first())
        .or_else(|| DEFAULT_PROFILE.palettes.first())
        .copied()
        .unwrap_or(palette::GENERAL[0])
}
