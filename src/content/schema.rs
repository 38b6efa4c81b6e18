//! Content slots per site type
//!
//! A slot is one independently generated piece of copy. The schema lists the
//! slots a site type needs, in page order, and maps each to the page section
//! it fills.

use crate::analysis::PromptAnalysis;
use crate::types::{SectionType, SiteType};
use serde::{Deserialize, Serialize};

/// How a slot's raw output is parsed and checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// Exactly one bare business name
    Name,
    /// Plain text
    Text,
    /// Inner HTML markup, no document wrapper
    Html,
    /// A list of short strings
    List,
}

/// A parsed slot value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    /// Name, text or markup
    Text(String),
    /// List entries
    List(Vec<String>),
}

impl SlotValue {
    /// Text content; list entries joined with newlines
    pub fn as_text(&self) -> String {
        match self {
            SlotValue::Text(text) => text.clone(),
            SlotValue::List(items) => items.join("\n"),
        }
    }

    /// List entries; text becomes a single entry
    pub fn into_items(self) -> Vec<String> {
        match self {
            SlotValue::Text(text) => vec![text],
            SlotValue::List(items) => items,
        }
    }

    /// True when nothing but whitespace is present
    pub fn is_blank(&self) -> bool {
        match self {
            SlotValue::Text(text) => text.trim().is_empty(),
            SlotValue::List(items) => items.iter().all(|i| i.trim().is_empty()),
        }
    }
}

/// One content slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSlot {
    /// Stable key (`business_name`, `tagline`, `products`, ...)
    pub key: &'static str,
    /// Parsing rules
    pub kind: SlotKind,
    /// Section the slot fills; `None` for page-level fields
    pub section: Option<SectionType>,
    /// What the copy should say
    pub guidance: &'static str,
    /// Word limit for text, per-item limit for lists
    pub max_words: usize,
    /// Inclusive item count for list slots
    pub items: Option<(usize, usize)>,
}

/// Key of the business name slot
pub const BUSINESS_NAME: &str = "business_name";
/// Key of the tagline slot
pub const TAGLINE: &str = "tagline";
/// Key of the description slot
pub const DESCRIPTION: &str = "description";

const NAME_SLOT: ContentSlot = ContentSlot {
    key: BUSINESS_NAME,
    kind: SlotKind::Name,
    section: None,
    guidance: "A distinctive, memorable business name that fits the industry",
    max_words: 4,
    items: None,
};

const TAGLINE_SLOT: ContentSlot = ContentSlot {
    key: TAGLINE,
    kind: SlotKind::Text,
    section: None,
    guidance: "A short, punchy tagline for the hero banner",
    max_words: 12,
    items: None,
};

const DESCRIPTION_SLOT: ContentSlot = ContentSlot {
    key: DESCRIPTION,
    kind: SlotKind::Text,
    section: Some(SectionType::Hero),
    guidance: "Two sentences introducing what the business offers and who it serves",
    max_words: 50,
    items: None,
};

const ABOUT_SLOT: ContentSlot = ContentSlot {
    key: "about",
    kind: SlotKind::Html,
    section: Some(SectionType::About),
    guidance: "Two short paragraphs about the story, values and people behind the business",
    max_words: 140,
    items: None,
};

const HIGHLIGHTS_SLOT: ContentSlot = ContentSlot {
    key: "highlights",
    kind: SlotKind::List,
    section: Some(SectionType::Features),
    guidance: "Reasons customers choose this business, each a short phrase",
    max_words: 10,
    items: Some((3, 4)),
};

const TESTIMONIALS_SLOT: ContentSlot = ContentSlot {
    key: "testimonials",
    kind: SlotKind::List,
    section: Some(SectionType::Testimonials),
    guidance: "Customer quotes, each one sentence followed by ' - ' and a first name",
    max_words: 30,
    items: Some((2, 3)),
};

const CTA_SLOT: ContentSlot = ContentSlot {
    key: "call_to_action",
    kind: SlotKind::Text,
    section: Some(SectionType::CallToAction),
    guidance: "One persuasive sentence inviting visitors to take the next step",
    max_words: 25,
    items: None,
};

const CONTACT_SLOT: ContentSlot = ContentSlot {
    key: "contact",
    kind: SlotKind::Text,
    section: Some(SectionType::Contact),
    guidance: "One or two friendly sentences inviting visitors to get in touch",
    max_words: 40,
    items: None,
};

fn offerings_slot(site_type: SiteType) -> ContentSlot {
    let (key, section, guidance) = match site_type {
        SiteType::Business => (
            "services",
            SectionType::Services,
            "Services offered, each a name followed by ': ' and one short sentence",
        ),
        SiteType::Ecommerce => (
            "products",
            SectionType::Products,
            "Featured products or collections, each a name followed by ': ' and one short sentence",
        ),
        SiteType::Restaurant => (
            "menu",
            SectionType::Menu,
            "Signature dishes, each a dish name followed by ': ' and a short description",
        ),
        SiteType::Portfolio => (
            "projects",
            SectionType::Projects,
            "Selected projects, each a title followed by ': ' and one short sentence",
        ),
        SiteType::Blog => (
            "posts",
            SectionType::Posts,
            "Recent article titles, each followed by ': ' and a one-sentence summary",
        ),
    };

    ContentSlot {
        key,
        kind: SlotKind::List,
        section: Some(section),
        guidance,
        max_words: 25,
        items: Some((3, 6)),
    }
}

/// Slots required for one site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSchema {
    /// Site type the schema was built for
    pub site_type: SiteType,
    /// Slots in page order; the name slot is always first
    pub slots: Vec<ContentSlot>,
}

impl ContentSchema {
    /// Default slots for a site type
    pub fn for_site_type(site_type: SiteType) -> Self {
        let mut slots = vec![
            NAME_SLOT,
            TAGLINE_SLOT,
            DESCRIPTION_SLOT,
            ABOUT_SLOT,
            offerings_slot(site_type),
        ];

        match site_type {
            SiteType::Portfolio => slots.push(TESTIMONIALS_SLOT),
            SiteType::Blog => slots.push(HIGHLIGHTS_SLOT),
            SiteType::Business | SiteType::Ecommerce | SiteType::Restaurant => {
                slots.push(HIGHLIGHTS_SLOT);
                slots.push(TESTIMONIALS_SLOT);
            }
        }

        slots.push(CTA_SLOT);
        slots.push(CONTACT_SLOT);

        Self { site_type, slots }
    }

    /// Slots for an analysis; a requested testimonials feature adds the
    /// testimonials slot where the site type lacks it
    pub fn for_analysis(analysis: &PromptAnalysis) -> Self {
        let mut schema = Self::for_site_type(analysis.site_type);
        if analysis.has_feature("testimonials") && schema.slot("testimonials").is_none() {
            let position = schema
                .slots
                .iter()
                .position(|s| s.key == CTA_SLOT.key)
                .unwrap_or(schema.slots.len());
            schema.slots.insert(position, TESTIMONIALS_SLOT);
        }
        schema
    }

    /// Look up a slot by key
    pub fn slot(&self, key: &str) -> Option<&ContentSlot> {
        self.slots.iter().find(|s| s.key == key)
    }

    /// The list slot holding the main offerings
    pub fn offerings(&self) -> Option<&ContentSlot> {
        self.slots.iter().find(|s| {
            matches!(
                s.section,
                Some(
                    SectionType::Services
                        | SectionType::Products
                        | SectionType::Menu
                        | SectionType::Projects
                        | SectionType::Posts
                )
            )
        })
    }
}

/// Heading for a section on a given site type
pub fn section_title(section: SectionType, site_type: SiteType) -> &'static str {
    match section {
        SectionType::Hero => "Home",
        SectionType::About => match site_type {
            SiteType::Portfolio => "About Me",
            SiteType::Blog => "About",
            _ => "About Us",
        },
        SectionType::Services => "Services",
        SectionType::Products => "Products",
        SectionType::Menu => "Menu",
        SectionType::Projects => "Work",
        SectionType::Posts => "Latest Posts",
        SectionType::Features => "Why Choose Us",
        SectionType::Testimonials => "What People Say",
        SectionType::CallToAction => match site_type {
            SiteType::Ecommerce => "Ready to Shop?",
            SiteType::Restaurant => "Reserve Your Table",
            SiteType::Portfolio => "Let's Work Together",
            SiteType::Blog => "Stay in the Loop",
            SiteType::Business => "Get Started",
        },
        SectionType::Contact => "Contact",
    }
}

/// Button label of the call to action for a site type
pub fn action_label(site_type: SiteType) -> &'static str {
    match site_type {
        SiteType::Ecommerce => "Shop Now",
        SiteType::Restaurant => "Book a Table",
        SiteType::Portfolio => "Start a Project",
        SiteType::Blog => "Subscribe",
        SiteType::Business => "Get in Touch",
    }
}
