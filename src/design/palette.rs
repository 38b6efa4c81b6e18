//! Color palettes
//!
//! Palettes are static data. A palette may be tagged with moods it suits; the
//! resolver prefers tagged palettes when the personality asks for that mood.

use super::personality::Mood;
use serde::Serialize;

/// A named set of brand colors (CSS hex strings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorPalette {
    /// Palette name, stable across releases
    pub name: &'static str,
    /// Main brand color
    pub primary: &'static str,
    /// Supporting color
    pub secondary: &'static str,
    /// Highlight color for calls to action
    pub accent: &'static str,
    /// Page background
    pub background: &'static str,
    /// Card and panel background
    pub surface: &'static str,
    /// Body text
    pub text: &'static str,
    /// Secondary text
    pub muted: &'static str,
    /// Moods this palette suits
    #[serde(skip)]
    pub moods: &'static [Mood],
}

impl ColorPalette {
    /// Whether the palette is tagged for a mood
    pub fn suits(&self, mood: Mood) -> bool {
        self.moods.contains(&mood)
    }

    /// CSS custom property declarations for this palette
    pub fn css_variables(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("--color-primary", self.primary),
            ("--color-secondary", self.secondary),
            ("--color-accent", self.accent),
            ("--color-background", self.background),
            ("--color-surface", self.surface),
            ("--color-text", self.text),
            ("--color-muted", self.muted),
        ]
    }
}

macro_rules! palette {
    ($name:expr, $primary:expr, $secondary:expr, $accent:expr, $bg:expr, $surface:expr, $text:expr, $muted:expr, [$($mood:ident),*]) => {
        ColorPalette {
            name: $name,
            primary: $primary,
            secondary: $secondary,
            accent: $accent,
            background: $bg,
            surface: $surface,
            text: $text,
            muted: $muted,
            moods: &[$(Mood::$mood),*],
        }
    };
}

/// Footwear and athletic retail
pub const FOOTWEAR: &[ColorPalette] = &[
    palette!("track-day", "#E63946", "#1D3557", "#F4A261", "#FFFFFF", "#F1F5F9", "#0F172A", "#64748B", [Bold]),
    palette!("court-classic", "#0F172A", "#F97316", "#22C55E", "#FAFAFA", "#F4F4F5", "#18181B", "#71717A", [Professional]),
    palette!("trail-runner", "#2F855A", "#744210", "#ECC94B", "#FFFDF7", "#F7F3E8", "#1A202C", "#718096", [Friendly]),
    palette!("midnight-sole", "#111111", "#C9A227", "#E5E5E5", "#0B0B0B", "#1C1C1C", "#F5F5F5", "#A3A3A3", [Luxury]),
];

/// Fashion and apparel
pub const FASHION: &[ColorPalette] = &[
    palette!("atelier", "#1C1917", "#B45309", "#F5D0A9", "#FAF7F2", "#F1ECE4", "#1C1917", "#78716C", [Luxury]),
    palette!("runway-pop", "#DB2777", "#7C3AED", "#FACC15", "#FFFFFF", "#FDF2F8", "#111827", "#6B7280", [Playful, Bold]),
    palette!("linen", "#57534E", "#A8A29E", "#D97706", "#FAFAF9", "#F5F5F4", "#292524", "#78716C", [Friendly, Professional]),
];

/// Gyms, studios and sport coaching
pub const FITNESS: &[ColorPalette] = &[
    palette!("high-intensity", "#EF4444", "#111827", "#FACC15", "#FFFFFF", "#F3F4F6", "#111827", "#6B7280", [Bold]),
    palette!("recovery", "#0EA5E9", "#14B8A6", "#F59E0B", "#F8FAFC", "#E0F2FE", "#0F172A", "#64748B", [Friendly]),
    palette!("iron", "#18181B", "#84CC16", "#F4F4F5", "#09090B", "#18181B", "#FAFAFA", "#A1A1AA", [Professional]),
];

/// Restaurants, cafes, bakeries
pub const FOOD: &[ColorPalette] = &[
    palette!("trattoria", "#9B2226", "#BB3E03", "#E9D8A6", "#FFFBF2", "#FAF0DC", "#2B2118", "#7F6A58", [Friendly]),
    palette!("fresh-market", "#2D6A4F", "#95D5B2", "#F4A261", "#FFFFFF", "#F0FDF4", "#1B4332", "#52796F", [Professional]),
    palette!("noir-dining", "#1F1F1F", "#B08D57", "#E8DCC4", "#121212", "#1E1E1E", "#F2EDE4", "#A89F91", [Luxury]),
];

/// Software, SaaS, startups
pub const TECHNOLOGY: &[ColorPalette] = &[
    palette!("electric", "#4F46E5", "#06B6D4", "#F472B6", "#FFFFFF", "#F5F7FF", "#0F172A", "#64748B", [Bold, Creative]),
    palette!("slate-cloud", "#0F172A", "#3B82F6", "#10B981", "#F8FAFC", "#F1F5F9", "#0F172A", "#64748B", [Professional]),
    palette!("terminal", "#22C55E", "#0EA5E9", "#EAB308", "#0B1120", "#111827", "#E2E8F0", "#94A3B8", [Creative]),
];

/// Clinics, practices, wellness
pub const HEALTHCARE: &[ColorPalette] = &[
    palette!("clinical-blue", "#0369A1", "#0891B2", "#22C55E", "#FFFFFF", "#F0F9FF", "#0C4A6E", "#64748B", [Professional]),
    palette!("soft-care", "#0D9488", "#5EEAD4", "#FB923C", "#FFFFFF", "#F0FDFA", "#134E4A", "#5F7D7A", [Friendly]),
];

/// Salons, spas, cosmetics
pub const BEAUTY: &[ColorPalette] = &[
    palette!("blush", "#BE185D", "#F9A8D4", "#D4A373", "#FFF7FA", "#FCE7F3", "#3F1D2B", "#8B6B78", [Friendly, Playful]),
    palette!("gilded", "#3F3F46", "#C9A227", "#F5E6C8", "#FCFBF8", "#F4F1EA", "#27272A", "#71717A", [Luxury]),
];

/// Property and realty
pub const REAL_ESTATE: &[ColorPalette] = &[
    palette!("estate-navy", "#1E3A8A", "#B8860B", "#10B981", "#FFFFFF", "#F1F5F9", "#0F172A", "#64748B", [Professional]),
    palette!("coastal", "#0E7490", "#F59E0B", "#F97316", "#FFFFFF", "#ECFEFF", "#164E63", "#5B7C86", [Friendly]),
    palette!("penthouse", "#111827", "#D4AF37", "#E5E7EB", "#FAFAFA", "#F3F4F6", "#111827", "#6B7280", [Luxury]),
];

/// Finance, accounting, insurance
pub const FINANCE: &[ColorPalette] = &[
    palette!("ledger", "#14532D", "#1E3A8A", "#CA8A04", "#FFFFFF", "#F8FAFC", "#0F172A", "#475569", [Professional]),
    palette!("vault", "#0F172A", "#2563EB", "#F59E0B", "#F8FAFC", "#E2E8F0", "#0F172A", "#64748B", [Bold]),
];

/// Law firms
pub const LEGAL: &[ColorPalette] = &[
    palette!("counsel", "#1F2937", "#7F1D1D", "#B45309", "#FFFFFF", "#F9FAFB", "#111827", "#6B7280", [Professional]),
    palette!("chambers", "#0B1F3A", "#8C6D46", "#D6C7A1", "#FBFAF7", "#F2EFE8", "#0B1F3A", "#6B6B6B", [Luxury]),
];

/// Schools, tutoring, courses
pub const EDUCATION: &[ColorPalette] = &[
    palette!("campus", "#1D4ED8", "#F59E0B", "#10B981", "#FFFFFF", "#EFF6FF", "#1E293B", "#64748B", [Professional, Friendly]),
    palette!("crayon", "#F97316", "#8B5CF6", "#22C55E", "#FFFDF5", "#FEF3C7", "#1F2937", "#6B7280", [Playful]),
];

/// Photographers, artists, studios
pub const CREATIVE: &[ColorPalette] = &[
    palette!("gallery-white", "#111111", "#EF4444", "#3B82F6", "#FFFFFF", "#F5F5F5", "#111111", "#737373", [Creative, Luxury]),
    palette!("risograph", "#FF5F5F", "#2563EB", "#FFD23F", "#FFF8F0", "#FFEFD6", "#1F1F1F", "#6B6B6B", [Playful, Creative]),
    palette!("darkroom", "#E5E5E5", "#F97316", "#A855F7", "#0A0A0A", "#171717", "#FAFAFA", "#A3A3A3", [Bold]),
];

/// Anything else
pub const GENERAL: &[ColorPalette] = &[
    palette!("ocean", "#2563EB", "#0EA5E9", "#F59E0B", "#FFFFFF", "#F8FAFC", "#0F172A", "#64748B", [Professional]),
    palette!("sunrise", "#EA580C", "#DB2777", "#FACC15", "#FFFBF5", "#FFF1E6", "#1F2937", "#6B7280", [Playful, Friendly]),
    palette!("graphite", "#27272A", "#6366F1", "#14B8A6", "#FAFAFA", "#F4F4F5", "#18181B", "#71717A", [Bold, Creative]),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn all_palettes() -> Vec<&'static ColorPalette> {
        [
            FOOTWEAR, FASHION, FITNESS, FOOD, TECHNOLOGY, HEALTHCARE, BEAUTY, REAL_ESTATE, FINANCE,
            LEGAL, EDUCATION, CREATIVE, GENERAL,
        ]
        .iter()
        .flat_map(|group| group.iter())
        .collect()
    }

    #[test]
    fn test_palette_names_are_unique() {
        let palettes = all_palettes();
        let mut names: Vec<&str> = palettes.iter().map(|p| p.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), palettes.len());
    }

    #[test]
    fn test_colors_are_hex() {
        for palette in all_palettes() {
            for (var, value) in palette.css_variables() {
                assert!(
                    value.len() == 7 && value.starts_with('#'),
                    "{} {} = {}",
                    palette.name,
                    var,
                    value
                );
                assert!(value[1..].chars().all(|c| c.is_ascii_hexdigit()));
            }
        }
    }

    #[test]
    fn test_mood_tags() {
        assert!(FOOTWEAR[3].suits(Mood::Luxury));
        assert!(!FOOTWEAR[0].suits(Mood::Luxury));
    }
}
