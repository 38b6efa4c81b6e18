//! Design personality derived from prompt wording

use crate::utils::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Overall emotional tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Trustworthy and businesslike
    Professional,
    /// Warm and approachable
    Friendly,
    /// Light-hearted and colourful
    Playful,
    /// Premium and restrained
    Luxury,
    /// Expressive and unconventional
    Creative,
    /// Loud and confident
    Bold,
}

/// Amount of motion and contrast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Energy {
    /// Quiet, slow, spacious
    Calm,
    /// Neither calm nor energetic
    Balanced,
    /// Fast, high-contrast, lively
    Energetic,
}

/// How polished the presentation should feel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sophistication {
    /// Relaxed, informal
    Casual,
    /// Neat and considered
    Polished,
    /// High-end
    Refined,
}

/// How strongly the design must signal reliability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustLevel {
    /// No special emphasis
    Standard,
    /// Credentials and reviews up front
    Elevated,
    /// Regulated or sensitive domains
    High,
}

/// Personality of a design, independent of the industry palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DesignPersonality {
    /// Tone
    pub mood: Mood,
    /// Motion level
    pub energy: Energy,
    /// Polish level
    pub sophistication: Sophistication,
    /// Reliability emphasis
    pub trust_level: TrustLevel,
}

impl DesignPersonality {
    /// Create a personality from its four dimensions
    pub const fn new(
        mood: Mood,
        energy: Energy,
        sophistication: Sophistication,
        trust_level: TrustLevel,
    ) -> Self {
        Self {
            mood,
            energy,
            sophistication,
            trust_level,
        }
    }

    /// Short description of the voice copy should use
    pub fn tone(&self) -> String {
        let mood = match self.mood {
            Mood::Professional => "professional",
            Mood::Friendly => "warm and friendly",
            Mood::Playful => "playful",
            Mood::Luxury => "refined and understated",
            Mood::Creative => "creative and expressive",
            Mood::Bold => "bold and confident",
        };
        let energy = match self.energy {
            Energy::Calm => "calm",
            Energy::Balanced => "balanced",
            Energy::Energetic => "energetic",
        };
        let mut tone = format!("{}, {}", mood, energy);
        if self.trust_level == TrustLevel::High {
            tone.push_str(", reassuring");
        }
        tone
    }
}

impl Default for DesignPersonality {
    fn default() -> Self {
        Self::new(
            Mood::Professional,
            Energy::Balanced,
            Sophistication::Polished,
            TrustLevel::Standard,
        )
    }
}

const MOOD_KEYWORDS: &[(Mood, &[&str])] = &[
    (
        Mood::Luxury,
        &["luxury", "luxurious", "elegant", "premium", "upscale", "exclusive", "bespoke"],
    ),
    (
        Mood::Playful,
        &["playful", "fun", "kids", "colorful", "colourful", "quirky", "whimsical", "toys"],
    ),
    (
        Mood::Creative,
        &["creative", "artistic", "art", "unique", "experimental", "studio", "handmade"],
    ),
    (Mood::Bold, &["bold", "edgy", "urban", "street", "loud", "fearless"]),
    (
        Mood::Friendly,
        &["friendly", "cozy", "family", "local", "welcoming", "community", "neighborhood"],
    ),
    (
        Mood::Professional,
        &["professional", "corporate", "expert", "experts", "consulting", "b2b"],
    ),
];

const ENERGY_KEYWORDS: &[(Energy, &[&str])] = &[
    (
        Energy::Energetic,
        &[
            "energetic", "dynamic", "athletic", "sport", "sports", "active", "fast", "running",
            "vibrant", "exciting", "extreme",
        ],
    ),
    (
        Energy::Calm,
        &["calm", "relaxing", "peaceful", "zen", "serene", "quiet", "spa", "gentle", "mindful"],
    ),
];

const SOPHISTICATION_KEYWORDS: &[(Sophistication, &[&str])] = &[
    (
        Sophistication::Refined,
        &["luxury", "elegant", "premium", "upscale", "exclusive", "sophisticated", "fine"],
    ),
    (
        Sophistication::Casual,
        &["casual", "fun", "relaxed", "laid", "simple", "kids", "cheap", "affordable"],
    ),
];

const TRUST_KEYWORDS: &[(TrustLevel, &[&str])] = &[
    (
        TrustLevel::High,
        &[
            "bank", "banking", "medical", "legal", "law", "secure", "security", "insurance",
            "clinic", "health", "financial", "hospital", "pharmacy",
        ],
    ),
    (
        TrustLevel::Elevated,
        &["trusted", "certified", "licensed", "established", "reliable", "accredited"],
    ),
];

fn first_hit<T: Copy>(tokens: &HashSet<String>, table: &[(T, &[&str])]) -> Option<T> {
    table
        .iter()
        .find(|(_, words)| words.iter().any(|w| tokens.contains(*w)))
        .map(|(value, _)| *value)
}

/// Derive a personality from prompt wording; dimensions without a keyword
/// signal take the supplied defaults
pub fn derive_personality(prompt: &str, defaults: DesignPersonality) -> DesignPersonality {
    let tokens: HashSet<String> = tokenize(prompt).into_iter().collect();

    DesignPersonality {
        mood: first_hit(&tokens, MOOD_KEYWORDS).unwrap_or(defaults.mood),
        energy: first_hit(&tokens, ENERGY_KEYWORDS).unwrap_or(defaults.energy),
        sophistication: first_hit(&tokens, SOPHISTICATION_KEYWORDS)
            .unwrap_or(defaults.sophistication),
        trust_level: first_hit(&tokens, TRUST_KEYWORDS).unwrap_or(defaults.trust_level),
    }
}
