//! Static keyword tables used by the prompt analyzer
//!
//! Table order matters: ties are resolved in favour of the entry declared first.

use crate::types::SiteType;

/// A weighted keyword list voting for one site type
#[derive(Debug, Clone, Copy)]
pub struct TypePattern {
    /// Site type this pattern votes for
    pub site_type: SiteType,
    /// Keywords; entries containing a space match as phrases
    pub keywords: &'static [&'static str],
    /// Multiplier applied to the match ratio
    pub weight: f64,
}

/// Keyword list identifying an industry
#[derive(Debug, Clone, Copy)]
pub struct IndustryPattern {
    /// Industry identifier
    pub industry: &'static str,
    /// Keywords; at least two must match
    pub keywords: &'static [&'static str],
}

/// Keyword list for a named category (features, styles)
#[derive(Debug, Clone, Copy)]
pub struct KeywordCategory {
    /// Category name
    pub name: &'static str,
    /// Keywords that select the category
    pub keywords: &'static [&'static str],
}

/// Minimum keyword matches for an industry pattern to apply
pub const INDUSTRY_MIN_MATCHES: usize = 2;

/// Industry used when no pattern reaches the threshold
pub const DEFAULT_INDUSTRY: &str = "general";

/// Style used when no style keyword is present
pub const DEFAULT_STYLE: &str = "modern";

/// Feature that is always requested
pub const FORCED_FEATURE: &str = "contact";

/// Words removed before scoring
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "for", "to", "of", "in", "on", "at", "by", "with",
    "from", "my", "our", "your", "me", "we", "i", "us", "it", "its", "is", "are", "be", "that",
    "this", "these", "those", "want", "need", "like", "would", "could", "please", "make",
    "create", "build", "website", "site", "web", "page", "webpage", "new", "some", "can", "will",
    "just", "get", "have", "has", "about", "also", "very", "so", "do",
];

/// Site type patterns in tie-break order
pub const TYPE_PATTERNS: &[TypePattern] = &[
    TypePattern {
        site_type: SiteType::Portfolio,
        keywords: &[
            "portfolio", "personal", "resume", "cv", "showcase", "artist", "photographer",
            "designer", "freelance", "freelancer", "gallery", "illustrator",
        ],
        weight: 1.0,
    },
    TypePattern {
        site_type: SiteType::Business,
        keywords: &[
            "business", "company", "corporate", "agency", "consulting", "services",
            "professional", "firm", "startup", "enterprise", "clinic", "office",
        ],
        weight: 0.8,
    },
    TypePattern {
        site_type: SiteType::Restaurant,
        keywords: &[
            "restaurant", "cafe", "menu", "dining", "bistro", "bakery", "bar", "kitchen", "chef",
            "catering", "pizzeria", "coffee", "food",
        ],
        weight: 1.0,
    },
    TypePattern {
        site_type: SiteType::Ecommerce,
        keywords: &[
            "store", "shop", "ecommerce", "e-commerce", "sell", "selling", "products", "buy",
            "cart", "retail", "boutique", "marketplace", "online store",
        ],
        weight: 1.0,
    },
    TypePattern {
        site_type: SiteType::Ecommerce,
        keywords: &["merchandise", "inventory", "checkout", "catalog", "orders"],
        weight: 0.9,
    },
    TypePattern {
        site_type: SiteType::Blog,
        keywords: &[
            "blog", "articles", "posts", "writing", "news", "journal", "magazine", "stories",
            "newsletter",
        ],
        weight: 0.9,
    },
];

/// Industry patterns in tie-break order
pub const INDUSTRY_PATTERNS: &[IndustryPattern] = &[
    IndustryPattern {
        industry: "footwear",
        keywords: &[
            "shoe", "shoes", "sneaker", "sneakers", "footwear", "boots", "athletic", "running",
            "trainers", "sandals", "heels",
        ],
    },
    IndustryPattern {
        industry: "fashion",
        keywords: &[
            "fashion", "clothing", "apparel", "boutique", "dresses", "style", "wear",
            "accessories", "jewelry", "designer",
        ],
    },
    IndustryPattern {
        industry: "fitness",
        keywords: &[
            "gym", "fitness", "workout", "training", "yoga", "pilates", "crossfit", "athletic",
            "trainer", "sports",
        ],
    },
    IndustryPattern {
        industry: "food",
        keywords: &[
            "restaurant", "food", "cafe", "coffee", "bakery", "pizza", "menu", "dining", "chef",
            "kitchen", "bistro", "catering",
        ],
    },
    IndustryPattern {
        industry: "technology",
        keywords: &[
            "tech", "technology", "software", "app", "saas", "startup", "ai", "cloud", "digital",
            "platform", "developer",
        ],
    },
    IndustryPattern {
        industry: "healthcare",
        keywords: &[
            "health", "medical", "clinic", "doctor", "dental", "dentist", "hospital", "therapy",
            "wellness", "care", "patients",
        ],
    },
    IndustryPattern {
        industry: "beauty",
        keywords: &[
            "beauty", "salon", "spa", "hair", "nails", "makeup", "skincare", "cosmetics",
            "barber",
        ],
    },
    IndustryPattern {
        industry: "real-estate",
        keywords: &[
            "real", "estate", "property", "properties", "homes", "realtor", "housing", "rental",
            "apartments",
        ],
    },
    IndustryPattern {
        industry: "finance",
        keywords: &[
            "finance", "financial", "bank", "investment", "accounting", "insurance", "tax",
            "wealth", "advisor",
        ],
    },
    IndustryPattern {
        industry: "legal",
        keywords: &["law", "legal", "lawyer", "attorney", "firm", "litigation", "counsel"],
    },
    IndustryPattern {
        industry: "education",
        keywords: &[
            "school", "education", "learning", "courses", "tutoring", "academy", "teacher",
            "students", "training",
        ],
    },
    IndustryPattern {
        industry: "creative",
        keywords: &[
            "photography", "photographer", "art", "artist", "design", "designer", "studio",
            "gallery", "creative", "music",
        ],
    },
];

/// Feature categories; every category whose keywords intersect the prompt is requested
pub const FEATURE_CATEGORIES: &[KeywordCategory] = &[
    KeywordCategory {
        name: "contact",
        keywords: &["contact", "email", "phone", "form", "reach"],
    },
    KeywordCategory {
        name: "gallery",
        keywords: &["gallery", "photos", "images", "portfolio", "showcase", "pictures"],
    },
    KeywordCategory {
        name: "booking",
        keywords: &["booking", "book", "appointment", "appointments", "reservation", "reservations", "schedule"],
    },
    KeywordCategory {
        name: "shop",
        keywords: &["shop", "store", "buy", "cart", "checkout", "products", "sell"],
    },
    KeywordCategory {
        name: "blog",
        keywords: &["blog", "articles", "posts", "news", "stories"],
    },
    KeywordCategory {
        name: "testimonials",
        keywords: &["testimonials", "reviews", "feedback", "clients"],
    },
    KeywordCategory {
        name: "newsletter",
        keywords: &["newsletter", "subscribe", "subscription", "mailing"],
    },
    KeywordCategory {
        name: "map",
        keywords: &["map", "location", "directions", "address", "visit"],
    },
    KeywordCategory {
        name: "menu",
        keywords: &["menu", "dishes", "drinks", "food"],
    },
    KeywordCategory {
        name: "team",
        keywords: &["team", "staff", "people", "founders"],
    },
];

/// Style categories in tie-break order
pub const STYLE_CATEGORIES: &[KeywordCategory] = &[
    KeywordCategory {
        name: "minimal",
        keywords: &["minimal", "minimalist", "clean", "simple"],
    },
    KeywordCategory {
        name: "luxury",
        keywords: &["luxury", "elegant", "premium", "upscale", "high-end", "exclusive"],
    },
    KeywordCategory {
        name: "playful",
        keywords: &["playful", "fun", "colorful", "vibrant", "quirky", "kids"],
    },
    KeywordCategory {
        name: "bold",
        keywords: &["bold", "energetic", "dynamic", "athletic", "sporty", "strong"],
    },
    KeywordCategory {
        name: "classic",
        keywords: &["classic", "traditional", "vintage", "rustic", "timeless"],
    },
    KeywordCategory {
        name: "modern",
        keywords: &["modern", "sleek", "contemporary", "futuristic"],
    },
];
