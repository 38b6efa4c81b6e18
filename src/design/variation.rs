//! Style variation
//!
//! A [`StyleVariation`] is a pure function of `(IndustryProfile,
//! DesignPersonality, seed)`. Each facet is chosen with the precedence
//!
//! 1. a personality override (mood or energy forces the value),
//! 2. a seeded pick among the remaining candidates,
//! 3. the first candidate.
//!
//! Every field comes from a closed enum, so a resolved variation is never
//! partial.

use super::industry::IndustryProfile;
use super::personality::{DesignPersonality, Energy, Mood, TrustLevel};
use super::seed::SeededSelector;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! closed_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stable kebab-case name, also used as a CSS class suffix
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_enum!(
    /// Page-level layout
    LayoutVariant {
        /// Stacked full-width sections
        Classic => "classic",
        /// Two-column hero and alternating sections
        Split => "split",
        /// Narrow centered column
        Centered => "centered",
        /// Offset blocks and overlapping media
        Asymmetric => "asymmetric",
        /// Editorial columns
        Magazine => "magazine",
        /// Card grid heavy
        Grid => "grid",
        /// Sparse with generous whitespace
        Minimal => "minimal",
        /// Edge-to-edge imagery
        FullBleed => "full-bleed",
    }
);

closed_enum!(
    /// Button shape
    ButtonStyle {
        /// Slightly rounded corners
        Rounded => "rounded",
        /// Fully rounded ends
        Pill => "pill",
        /// Square corners
        Sharp => "sharp",
        /// Border only
        Outline => "outline",
    }
);

closed_enum!(
    /// Card treatment
    CardStyle {
        /// No shadow, no border
        Flat => "flat",
        /// Drop shadow
        Elevated => "elevated",
        /// Thin border
        Bordered => "bordered",
        /// Translucent background
        Glass => "glass",
    }
);

closed_enum!(
    /// Header navigation
    NavigationStyle {
        /// Logo left, links right
        Standard => "standard",
        /// Logo and links centered
        Centered => "centered",
        /// Logo with a compact link row
        Minimal => "minimal",
        /// Fixed to the top while scrolling
        Sticky => "sticky",
    }
);

closed_enum!(
    /// Hero section treatment
    HeroStyle {
        /// Copy beside media
        Split => "split",
        /// Copy over a full-width image
        FullImage => "full-image",
        /// Centered copy on a plain background
        Centered => "centered",
        /// Headline only
        Minimal => "minimal",
        /// Copy over a brand gradient
        Gradient => "gradient",
    }
);

closed_enum!(
    /// Vertical rhythm of the page
    SpacingScale {
        /// Dense
        Compact => "compact",
        /// Default
        Comfortable => "comfortable",
        /// Airy
        Spacious => "spacious",
    }
);

closed_enum!(
    /// Amount of motion
    AnimationLevel {
        /// No animation
        None => "none",
        /// Fades only
        Subtle => "subtle",
        /// Fades and slides
        Moderate => "moderate",
        /// Pronounced motion
        Dynamic => "dynamic",
    }
);

closed_enum!(
    /// Preferred imagery
    ImageStyle {
        /// People and places
        Photography => "photography",
        /// Drawn artwork
        Illustration => "illustration",
        /// Shapes and gradients
        Abstract => "abstract",
        /// Product shots on plain backgrounds
        Product => "product",
    }
);

closed_enum!(
    /// Interaction behaviour wired up by the generated script
    InteractionPattern {
        /// Cards rise on hover
        HoverLift => "hover-lift",
        /// Sections fade in when scrolled into view
        ScrollReveal => "scroll-reveal",
        /// Background moves slower than content
        Parallax => "parallax",
        /// Small feedback animations on buttons
        Microinteractions => "microinteractions",
        /// Call to action stays visible on mobile
        StickyCta => "sticky-cta",
    }
);

/// Styles of individual components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentStyles {
    /// Buttons
    pub buttons: ButtonStyle,
    /// Cards
    pub cards: CardStyle,
    /// Navigation bar
    pub navigation: NavigationStyle,
    /// Hero section
    pub hero: HeroStyle,
}

/// Fully resolved visual variation for one request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleVariation {
    /// Page layout
    pub layout_variant: LayoutVariant,
    /// Component styles
    pub component_styles: ComponentStyles,
    /// Spacing
    pub spacing_scale: SpacingScale,
    /// Motion
    pub animation_level: AnimationLevel,
    /// Imagery
    pub image_style: ImageStyle,
    /// Interactions, no duplicates, stable order
    pub interaction_patterns: Vec<InteractionPattern>,
}

/// Values a personality forces regardless of the seed
#[derive(Debug, Default, Clone, Copy)]
struct Overrides {
    layout: Option<LayoutVariant>,
    buttons: Option<ButtonStyle>,
    cards: Option<CardStyle>,
    navigation: Option<NavigationStyle>,
    hero: Option<HeroStyle>,
    spacing: Option<SpacingScale>,
    animation: Option<AnimationLevel>,
    image: Option<ImageStyle>,
}

impl Overrides {
    /// Mood overrides first; energy only fills facets the mood left open
    fn for_personality(personality: &DesignPersonality) -> Self {
        let mut o = Self::default();

        match personality.mood {
            Mood::Luxury => {
                o.layout = Some(LayoutVariant::Minimal);
                o.buttons = Some(ButtonStyle::Sharp);
                o.cards = Some(CardStyle::Flat);
                o.spacing = Some(SpacingScale::Spacious);
            }
            Mood::Creative => {
                o.layout = Some(LayoutVariant::Asymmetric);
                o.cards = Some(CardStyle::Glass);
                o.image = Some(ImageStyle::Illustration);
            }
            Mood::Playful => {
                o.buttons = Some(ButtonStyle::Pill);
                o.cards = Some(CardStyle::Elevated);
                o.hero = Some(HeroStyle::Gradient);
            }
            Mood::Professional | Mood::Friendly | Mood::Bold => {}
        }

        match personality.energy {
            Energy::Energetic => {
                o.animation = Some(AnimationLevel::Dynamic);
                o.hero = o.hero.or(Some(HeroStyle::FullImage));
                o.navigation = Some(NavigationStyle::Sticky);
            }
            Energy::Calm => {
                o.animation = Some(AnimationLevel::Subtle);
                o.spacing = o.spacing.or(Some(SpacingScale::Spacious));
            }
            Energy::Balanced => {}
        }

        o
    }
}

/// Override, else seeded pick from `candidates`, else the first candidate,
/// else `default` for an empty candidate list
fn choose<T: Copy>(
    forced: Option<T>,
    candidates: &[T],
    selector: &SeededSelector,
    facet: &str,
    default: T,
) -> T {
    if let Some(value) = forced {
        return value;
    }
    selector
        .pick(facet, candidates)
        .or_else(|| candidates.first())
        .copied()
        .unwrap_or(default)
}

const BALANCED_ANIMATION: &[AnimationLevel] = &[AnimationLevel::Subtle, AnimationLevel::Moderate];

const SEEDED_EXTRAS: &[InteractionPattern] =
    &[InteractionPattern::Parallax, InteractionPattern::StickyCta];

fn interaction_patterns(
    personality: &DesignPersonality,
    animation: AnimationLevel,
    selector: &SeededSelector,
) -> Vec<InteractionPattern> {
    let mut patterns = match personality.energy {
        Energy::Energetic => vec![
            InteractionPattern::HoverLift,
            InteractionPattern::ScrollReveal,
            InteractionPattern::Microinteractions,
        ],
        Energy::Balanced => vec![InteractionPattern::HoverLift, InteractionPattern::ScrollReveal],
        Energy::Calm => vec![InteractionPattern::ScrollReveal],
    };

    if animation == AnimationLevel::Dynamic {
        patterns.push(InteractionPattern::Microinteractions);
    }

    if personality.mood == Mood::Luxury {
        patterns.push(InteractionPattern::Parallax);
    } else if let Some(extra) = selector.pick("interactions", SEEDED_EXTRAS) {
        patterns.push(*extra);
    }

    let mut seen = Vec::with_capacity(patterns.len());
    patterns.retain(|p| {
        if seen.contains(p) {
            false
        } else {
            seen.push(*p);
            true
        }
    });
    patterns
}

/// Resolve the style variation for an industry, personality and seed
pub fn resolve_style_variation(
    industry: &IndustryProfile,
    personality: &DesignPersonality,
    seed: &str,
) -> StyleVariation {
    let selector = SeededSelector::new(seed);
    let forced = Overrides::for_personality(personality);

    let buttons = choose(forced.buttons, ButtonStyle::ALL, &selector, "buttons", ButtonStyle::Rounded);
    let cards = choose(forced.cards, CardStyle::ALL, &selector, "cards", CardStyle::Elevated);
    let navigation = choose(
        forced.navigation,
        NavigationStyle::ALL,
        &selector,
        "navigation",
        NavigationStyle::Standard,
    );
    let hero = choose(forced.hero, HeroStyle::ALL, &selector, "hero", HeroStyle::Split);

    // Regulated industries never get pronounced motion without an energy signal
    let animation_candidates = if personality.trust_level == TrustLevel::High {
        &BALANCED_ANIMATION[..1]
    } else {
        BALANCED_ANIMATION
    };
    let animation_level = choose(
        forced.animation,
        animation_candidates,
        &selector,
        "animation",
        AnimationLevel::Subtle,
    );

    StyleVariation {
        layout_variant: choose(
            forced.layout,
            industry.layouts,
            &selector,
            "layout",
            LayoutVariant::Classic,
        ),
        component_styles: ComponentStyles {
            buttons,
            cards,
            navigation,
            hero,
        },
        spacing_scale: choose(
            forced.spacing,
            SpacingScale::ALL,
            &selector,
            "spacing",
            SpacingScale::Comfortable,
        ),
        animation_level,
        image_style: choose(
            forced.image,
            industry.image_styles,
            &selector,
            "image",
            ImageStyle::Photography,
        ),
        interaction_patterns: interaction_patterns(personality, animation_level, &selector),
    }
}
