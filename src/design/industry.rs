//! Industry profiles
//!
//! Static reference data looked up by keyword overlap with the prompt. Profile
//! ids share their vocabulary with the prompt analyzer so that a prompt lands
//! in the same industry in both places.

use super::palette::{self, ColorPalette};
use super::personality::{DesignPersonality, Energy, Mood, Sophistication, TrustLevel};
use super::variation::{ImageStyle, LayoutVariant};
use crate::utils::tokenize;
use serde::Serialize;
use std::collections::HashSet;

/// Font pairing and type scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Typography {
    /// Heading font family stack
    pub heading_font: &'static str,
    /// Body font family stack
    pub body_font: &'static str,
    /// Base font size in pixels
    pub base_size_px: u8,
    /// Modular scale ratio between heading levels
    pub scale_ratio: f32,
    /// CSS font-weight for headings
    pub heading_weight: u16,
}

impl Typography {
    /// Font size in rem for a heading level (1 = largest)
    pub fn heading_size_rem(&self, level: u8) -> f32 {
        let steps = 6u8.saturating_sub(level.clamp(1, 6)) as i32;
        self.scale_ratio.powi(steps)
    }
}

/// Reference data for one industry
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndustryProfile {
    /// Stable identifier (`footwear`, `food`, ...)
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Keywords scored against prompt tokens
    pub keywords: &'static [&'static str],
    /// Compatible palettes
    pub palettes: &'static [ColorPalette],
    /// Typography profile
    pub typography: Typography,
    /// Compatible layouts
    pub layouts: &'static [LayoutVariant],
    /// Compatible imagery
    pub image_styles: &'static [ImageStyle],
    /// Features every site in the industry gets
    pub required_features: &'static [&'static str],
    /// Personality used where the prompt gives no signal
    pub personality: DesignPersonality,
}

impl IndustryProfile {
    /// Number of profile keywords present in a token set
    pub fn overlap(&self, tokens: &HashSet<String>) -> usize {
        self.keywords.iter().filter(|k| tokens.contains(**k)).count()
    }

    /// Whether this is the fallback profile
    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_PROFILE.id
    }
}

const SANS: &str = "'Inter', system-ui, -apple-system, 'Segoe UI', sans-serif";
const SERIF: &str = "'Playfair Display', Georgia, 'Times New Roman', serif";
const DISPLAY: &str = "'Bebas Neue', 'Oswald', Impact, sans-serif";
const GEOMETRIC: &str = "'Poppins', 'Montserrat', system-ui, sans-serif";
const HUMANIST: &str = "'Source Sans 3', 'Open Sans', system-ui, sans-serif";

const fn typography(
    heading_font: &'static str,
    body_font: &'static str,
    scale_ratio: f32,
    heading_weight: u16,
) -> Typography {
    Typography {
        heading_font,
        body_font,
        base_size_px: 16,
        scale_ratio,
        heading_weight,
    }
}

use LayoutVariant as L;

/// Profile used when no industry keyword matches
pub const DEFAULT_PROFILE: IndustryProfile = IndustryProfile {
    id: "general",
    name: "General",
    keywords: &[],
    palettes: palette::GENERAL,
    typography: typography(SANS, SANS, 1.25, 700),
    layouts: &[L::Classic, L::Split, L::Centered, L::Grid],
    image_styles: &[ImageStyle::Photography, ImageStyle::Abstract],
    required_features: &["contact"],
    personality: DesignPersonality::new(
        Mood::Professional,
        Energy::Balanced,
        Sophistication::Polished,
        TrustLevel::Standard,
    ),
};

/// Industry table, in tie-break order
pub const PROFILES: &[IndustryProfile] = &[
    IndustryProfile {
        id: "footwear",
        name: "Footwear",
        keywords: &[
            "shoe", "shoes", "sneaker", "sneakers", "footwear", "boots", "athletic", "running",
            "trainers", "sandals", "heels", "kicks",
        ],
        palettes: palette::FOOTWEAR,
        typography: typography(DISPLAY, SANS, 1.333, 700),
        layouts: &[L::Grid, L::FullBleed, L::Split],
        image_styles: &[ImageStyle::Product, ImageStyle::Photography],
        required_features: &["shop", "gallery", "contact"],
        personality: DesignPersonality::new(
            Mood::Bold,
            Energy::Energetic,
            Sophistication::Polished,
            TrustLevel::Standard,
        ),
    },
    IndustryProfile {
        id: "fashion",
        name: "Fashion",
        keywords: &[
            "fashion", "clothing", "apparel", "boutique", "dresses", "style", "wear",
            "accessories", "jewelry", "designer",
        ],
        palettes: palette::FASHION,
        typography: typography(SERIF, SANS, 1.414, 500),
        layouts: &[L::Magazine, L::FullBleed, L::Asymmetric],
        image_styles: &[ImageStyle::Photography, ImageStyle::Product],
        required_features: &["shop", "gallery", "newsletter", "contact"],
        personality: DesignPersonality::new(
            Mood::Creative,
            Energy::Balanced,
            Sophistication::Refined,
            TrustLevel::Standard,
        ),
    },
    IndustryProfile {
        id: "fitness",
        name: "Fitness",
        keywords: &[
            "gym", "fitness", "workout", "training", "yoga", "pilates", "crossfit", "trainer",
            "sports", "coach",
        ],
        palettes: palette::FITNESS,
        typography: typography(DISPLAY, GEOMETRIC, 1.333, 800),
        layouts: &[L::FullBleed, L::Split, L::Grid],
        image_styles: &[ImageStyle::Photography],
        required_features: &["booking", "testimonials", "contact"],
        personality: DesignPersonality::new(
            Mood::Bold,
            Energy::Energetic,
            Sophistication::Casual,
            TrustLevel::Standard,
        ),
    },
    IndustryProfile {
        id: "food",
        name: "Food & Dining",
        keywords: &[
            "restaurant", "food", "cafe", "coffee", "bakery", "pizza", "menu", "dining", "chef",
            "kitchen", "bistro", "catering",
        ],
        palettes: palette::FOOD,
        typography: typography(SERIF, HUMANIST, 1.25, 600),
        layouts: &[L::Classic, L::FullBleed, L::Centered],
        image_styles: &[ImageStyle::Photography],
        required_features: &["menu", "booking", "map", "contact"],
        personality: DesignPersonality::new(
            Mood::Friendly,
            Energy::Balanced,
            Sophistication::Polished,
            TrustLevel::Standard,
        ),
    },
    IndustryProfile {
        id: "technology",
        name: "Technology",
        keywords: &[
            "tech", "technology", "software", "app", "saas", "startup", "ai", "cloud", "digital",
            "platform", "developer",
        ],
        palettes: palette::TECHNOLOGY,
        typography: typography(GEOMETRIC, SANS, 1.25, 700),
        layouts: &[L::Split, L::Centered, L::Grid],
        image_styles: &[ImageStyle::Abstract, ImageStyle::Illustration],
        required_features: &["features", "testimonials", "contact"],
        personality: DesignPersonality::new(
            Mood::Professional,
            Energy::Energetic,
            Sophistication::Polished,
            TrustLevel::Elevated,
        ),
    },
    IndustryProfile {
        id: "healthcare",
        name: "Healthcare",
        keywords: &[
            "health", "medical", "clinic", "doctor", "dental", "dentist", "hospital", "therapy",
            "wellness", "care", "patients",
        ],
        palettes: palette::HEALTHCARE,
        typography: typography(HUMANIST, HUMANIST, 1.2, 600),
        layouts: &[L::Classic, L::Centered, L::Split],
        image_styles: &[ImageStyle::Photography, ImageStyle::Illustration],
        required_features: &["booking", "team", "contact"],
        personality: DesignPersonality::new(
            Mood::Professional,
            Energy::Calm,
            Sophistication::Polished,
            TrustLevel::High,
        ),
    },
    IndustryProfile {
        id: "beauty",
        name: "Beauty",
        keywords: &[
            "beauty", "salon", "spa", "hair", "nails", "makeup", "skincare", "cosmetics",
            "barber",
        ],
        palettes: palette::BEAUTY,
        typography: typography(SERIF, SANS, 1.333, 500),
        layouts: &[L::Centered, L::Asymmetric, L::FullBleed],
        image_styles: &[ImageStyle::Photography],
        required_features: &["booking", "gallery", "contact"],
        personality: DesignPersonality::new(
            Mood::Friendly,
            Energy::Calm,
            Sophistication::Refined,
            TrustLevel::Standard,
        ),
    },
    IndustryProfile {
        id: "real-estate",
        name: "Real Estate",
        keywords: &[
            "real", "estate", "property", "properties", "homes", "realtor", "housing", "rental",
            "apartments",
        ],
        palettes: palette::REAL_ESTATE,
        typography: typography(SERIF, SANS, 1.25, 600),
        layouts: &[L::Grid, L::FullBleed, L::Split],
        image_styles: &[ImageStyle::Photography],
        required_features: &["gallery", "map", "contact"],
        personality: DesignPersonality::new(
            Mood::Professional,
            Energy::Balanced,
            Sophistication::Refined,
            TrustLevel::Elevated,
        ),
    },
    IndustryProfile {
        id: "finance",
        name: "Finance",
        keywords: &[
            "finance", "financial", "bank", "investment", "accounting", "insurance", "tax",
            "wealth", "advisor",
        ],
        palettes: palette::FINANCE,
        typography: typography(SANS, HUMANIST, 1.2, 600),
        layouts: &[L::Classic, L::Split],
        image_styles: &[ImageStyle::Abstract, ImageStyle::Photography],
        required_features: &["team", "testimonials", "contact"],
        personality: DesignPersonality::new(
            Mood::Professional,
            Energy::Calm,
            Sophistication::Refined,
            TrustLevel::High,
        ),
    },
    IndustryProfile {
        id: "legal",
        name: "Legal",
        keywords: &["law", "legal", "lawyer", "attorney", "firm", "litigation", "counsel"],
        palettes: palette::LEGAL,
        typography: typography(SERIF, HUMANIST, 1.2, 600),
        layouts: &[L::Classic, L::Centered],
        image_styles: &[ImageStyle::Photography],
        required_features: &["team", "contact"],
        personality: DesignPersonality::new(
            Mood::Professional,
            Energy::Calm,
            Sophistication::Refined,
            TrustLevel::High,
        ),
    },
    IndustryProfile {
        id: "education",
        name: "Education",
        keywords: &[
            "school", "education", "learning", "courses", "tutoring", "academy", "teacher",
            "students",
        ],
        palettes: palette::EDUCATION,
        typography: typography(GEOMETRIC, HUMANIST, 1.25, 700),
        layouts: &[L::Classic, L::Grid, L::Split],
        image_styles: &[ImageStyle::Illustration, ImageStyle::Photography],
        required_features: &["blog", "testimonials", "contact"],
        personality: DesignPersonality::new(
            Mood::Friendly,
            Energy::Balanced,
            Sophistication::Casual,
            TrustLevel::Elevated,
        ),
    },
    IndustryProfile {
        id: "creative",
        name: "Creative",
        keywords: &[
            "photography", "photographer", "art", "artist", "design", "designer", "studio",
            "gallery", "creative", "music",
        ],
        palettes: palette::CREATIVE,
        typography: typography(GEOMETRIC, SANS, 1.5, 800),
        layouts: &[L::Asymmetric, L::Magazine, L::Minimal],
        image_styles: &[ImageStyle::Photography, ImageStyle::Abstract],
        required_features: &["gallery", "contact"],
        personality: DesignPersonality::new(
            Mood::Creative,
            Energy::Balanced,
            Sophistication::Polished,
            TrustLevel::Standard,
        ),
    },
];

/// Look up a profile by id; `general` maps to the default profile
pub fn profile(id: &str) -> Option<&'static IndustryProfile> {
    if id == DEFAULT_PROFILE.id {
        return Some(&DEFAULT_PROFILE);
    }
    PROFILES.iter().find(|p| p.id == id)
}

/// Pick the profile with the largest keyword overlap
///
/// Ties go to the profile declared first; no overlap at all yields
/// [`DEFAULT_PROFILE`]. One keyword is enough, so this may pick a profile for
/// a prompt the analyzer still reports as `general`.
pub fn classify_industry(prompt: &str) -> &'static IndustryProfile {
    let tokens: HashSet<String> = tokenize(prompt).into_iter().collect();

    let mut best: Option<(&'static IndustryProfile, usize)> = None;
    for profile in PROFILES {
        let score = profile.overlap(&tokens);
        if score > 0 && best.map(|(_, s)| score > s).unwrap_or(true) {
            best = Some((profile, score));
        }
    }

    best.map(|(profile, _)| profile).unwrap_or(&DEFAULT_PROFILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shoe_store_is_footwear() {
        let profile = classify_industry("Build a website for my athletic shoe store");
        assert_eq!(profile.id, "footwear");
    }

    #[test]
    fn test_single_keyword_selects_profile() {
        assert_eq!(classify_industry("a shoe shop").id, "footwear");
        assert_eq!(crate::analysis::analyze("a shoe shop").industry, "general");
    }

    #[test]
    fn test_unmatched_prompt_uses_explicit_default() {
        let profile = classify_industry("something entirely unrelated");
        assert!(profile.is_default());
        assert_eq!(profile.id, "general");
        assert!(!profile.palettes.is_empty());
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        // one keyword each for fashion ("designer") and creative ("designer")
        let profile = classify_industry("designer");
        assert_eq!(profile.id, "fashion");
    }

    #[test]
    fn test_larger_overlap_wins_over_order() {
        let profile = classify_industry("a photography studio and art gallery for a designer");
        assert_eq!(profile.id, "creative");
    }

    #[test]
    fn test_every_profile_is_usable() {
        for profile in PROFILES.iter().chain(std::iter::once(&DEFAULT_PROFILE)) {
            assert!(!profile.palettes.is_empty(), "{}", profile.id);
            assert!(!profile.layouts.is_empty(), "{}", profile.id);
            assert!(!profile.image_styles.is_empty(), "{}", profile.id);
            assert!(profile.required_features.contains(&"contact"), "{}", profile.id);
        }
    }

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(profile("food").map(|p| p.name), Some("Food & Dining"));
        assert!(profile("general").map(|p| p.is_default()).unwrap_or(false));
        assert!(profile("unknown").is_none());
    }

    #[test]
    fn test_heading_scale_decreases() {
        let t = DEFAULT_PROFILE.typography;
        assert!(t.heading_size_rem(1) > t.heading_size_rem(2));
        assert_eq!(t.heading_size_rem(6), 1.0);
    }
}
