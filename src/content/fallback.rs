//! Deterministic fallback copy
//!
//! Every slot can be filled without a provider from the analysis alone. The
//! same analysis always produces the same fallback values.

use super::schema::{ContentSlot, SlotKind, SlotValue};
use crate::ai::validator::ContentValidator;
use crate::analysis::PromptAnalysis;
use crate::types::SiteType;
use crate::utils::{escape_html, title_case};

/// Offerings per industry, `title: description`
const INDUSTRY_OFFERINGS: &[(&str, &[&str])] = &[
    (
        "footwear",
        &[
            "Running Shoes: Lightweight pairs tuned for road and track",
            "Trail Collection: Grippy, weatherproof shoes for rough ground",
            "Everyday Sneakers: Comfortable classics for daily wear",
            "Gait Fitting: A quick in-store analysis to find your fit",
        ],
    ),
    (
        "fashion",
        &[
            "New Arrivals: Fresh pieces added every week",
            "Essentials: Wardrobe staples that never go out of style",
            "Accessories: Finishing touches for every outfit",
            "Personal Styling: One-to-one advice on building your look",
        ],
    ),
    (
        "fitness",
        &[
            "Personal Training: Coaching built around your goals",
            "Group Classes: High-energy sessions for every level",
            "Strength Programs: Structured plans to build real strength",
            "Recovery Sessions: Mobility and stretching to keep you moving",
        ],
    ),
    (
        "food",
        &[
            "Seasonal Plates: Dishes built around what is fresh this week",
            "House Favourites: The recipes our regulars keep ordering",
            "Fresh Bakes: Bread and pastries made every morning",
            "Private Dining: Space and a set menu for your celebration",
        ],
    ),
    (
        "technology",
        &[
            "Product Development: From first prototype to stable release",
            "Cloud Platform: Reliable hosting that scales with demand",
            "Integrations: Connect the tools your team already uses",
            "Support: Responsive help from engineers who know the product",
        ],
    ),
    (
        "healthcare",
        &[
            "Check-ups: Thorough routine visits for the whole family",
            "Preventive Care: Screening and advice to stay healthy",
            "Specialist Treatment: Focused care when you need it most",
            "Same-week Appointments: Prompt visits without the long wait",
        ],
    ),
    (
        "beauty",
        &[
            "Cut and Style: Precision cuts finished to suit you",
            "Colour: Natural tones to bold transformations",
            "Skin Treatments: Facials tailored to your skin",
            "Nail Care: Manicures and pedicures with lasting finishes",
        ],
    ),
    (
        "real-estate",
        &[
            "Buying: Guidance from first viewing to final keys",
            "Selling: Accurate valuations and marketing that works",
            "Lettings: Reliable tenants and hands-off management",
            "Market Advice: Honest insight into local prices",
        ],
    ),
    (
        "finance",
        &[
            "Financial Planning: Clear plans for the years ahead",
            "Tax Preparation: Accurate returns filed on time",
            "Investment Advice: Portfolios matched to your goals",
            "Bookkeeping: Tidy accounts so you can focus on growth",
        ],
    ),
    (
        "legal",
        &[
            "Consultations: Straight answers to your legal questions",
            "Contracts: Drafting and review that protects your interests",
            "Disputes: Firm representation when disagreements escalate",
            "Estate Planning: Wills and trusts arranged with care",
        ],
    ),
    (
        "education",
        &[
            "Courses: Structured learning with clear outcomes",
            "Tutoring: One-to-one support at your own pace",
            "Workshops: Hands-on sessions led by experienced teachers",
            "Exam Preparation: Focused practice for test day",
        ],
    ),
    (
        "creative",
        &[
            "Portraits: Natural, relaxed portraits with real character",
            "Brand Identity: Visual systems that make you recognisable",
            "Commissions: Original work made to your brief",
            "Workshops: Small-group sessions to sharpen your craft",
        ],
    ),
];

/// Fallback values for one analysis
#[derive(Debug, Clone)]
pub struct FallbackContent<'a> {
    analysis: &'a PromptAnalysis,
    business_name: String,
    subject: String,
}

impl<'a> FallbackContent<'a> {
    /// Fallback values for an analysis
    ///
    /// A company name from the prompt is kept when it passes the validator.
    pub fn new(analysis: &'a PromptAnalysis, validator: &ContentValidator) -> Self {
        let subject = subject(analysis, validator);
        let derived = format!("{} {}", title_case(&subject), analysis.site_type.label());

        let business_name = analysis
            .entities
            .company_name
            .as_deref()
            .filter(|name| validator.is_acceptable_name(name))
            .map(str::to_string)
            .unwrap_or(derived);

        Self {
            analysis,
            business_name,
            subject: subject.to_lowercase(),
        }
    }

    /// Fallback business name
    pub fn business_name(&self) -> &str {
        &self.business_name
    }

    /// Fallback value for a slot
    pub fn value(&self, slot: &ContentSlot) -> SlotValue {
        match slot.kind {
            SlotKind::Name => SlotValue::Text(self.business_name.clone()),
            SlotKind::List => SlotValue::List(self.list(slot)),
            SlotKind::Text | SlotKind::Html => SlotValue::Text(self.text(slot)),
        }
    }

    fn location_suffix(&self) -> String {
        self.analysis
            .entities
            .location
            .as_deref()
            .map(|location| format!(" in {}", location))
            .unwrap_or_default()
    }

    fn text(&self, slot: &ContentSlot) -> String {
        let name = &self.business_name;
        let subject = &self.subject;
        let site_type = self.analysis.site_type;

        match slot.key {
            "tagline" => match site_type {
                SiteType::Ecommerce => format!("Quality {} picked with care", subject),
                SiteType::Restaurant => "Good food, made with care".to_string(),
                SiteType::Portfolio => format!("Thoughtful {} work, made with intent", subject),
                SiteType::Blog => format!("Stories and ideas about {}", subject),
                SiteType::Business => format!("Trusted {} expertise, close to home", subject),
            },
            "description" => format!(
                "{} is an independent {} {}{} built on quality and friendly service. \
                 We help every visitor find exactly what they need.",
                name,
                subject,
                site_noun(site_type),
                self.location_suffix()
            ),
            "about" => format!(
                "<p>{} started with a simple idea: {} done properly, by people who care about the details.</p>\n\
                 <p>Today we bring that same attention to everyone we work with{}, and we are proud of the community we have built along the way.</p>",
                escape_html(name),
                escape_html(subject),
                escape_html(&self.location_suffix())
            ),
            "call_to_action" => match site_type {
                SiteType::Ecommerce => "Browse the collection and find your new favourite today.".to_string(),
                SiteType::Restaurant => "Book a table and join us for your next meal.".to_string(),
                SiteType::Portfolio => "Have a project in mind? Let's talk about what we can make together.".to_string(),
                SiteType::Blog => "Subscribe to get new posts delivered straight to your inbox.".to_string(),
                SiteType::Business => format!("Get in touch today and see how {} can help.", name),
            },
            "contact" => "Have a question or want to plan something together? Send us a message and \
                          we will get back to you within one working day."
                .to_string(),
            _ => format!("{} brings care and experience to every detail.", name),
        }
    }

    fn list(&self, slot: &ContentSlot) -> Vec<String> {
        let entities = &self.analysis.entities;
        let max = slot.items.map(|(_, max)| max).unwrap_or(4);

        match slot.key {
            "highlights" => vec![
                "Friendly, knowledgeable people".to_string(),
                "Quality you can count on".to_string(),
                "Fair and transparent pricing".to_string(),
                "Independent and locally run".to_string(),
            ],
            "testimonials" => vec![
                format!("\"{} made everything easy from start to finish.\" - Sam", self.business_name),
                "\"Exactly what I was looking for, and friendly service too.\" - Priya".to_string(),
                "\"I have recommended them to all of my friends.\" - Jordan".to_string(),
            ],
            _ => {
                let mentioned = if self.analysis.site_type == SiteType::Ecommerce {
                    &entities.products
                } else {
                    &entities.services
                };
                if !mentioned.is_empty() {
                    return mentioned.iter().take(max).map(|s| title_case(s)).collect();
                }

                INDUSTRY_OFFERINGS
                    .iter()
                    .find(|(industry, _)| *industry == self.analysis.industry)
                    .map(|(_, items)| items.iter().map(|s| s.to_string()).collect())
                    .unwrap_or_else(|| self.generic_offerings())
            }
        }
    }

    fn generic_offerings(&self) -> Vec<String> {
        let subject = title_case(&self.subject);
        match self.analysis.site_type {
            SiteType::Blog => vec![
                format!("Getting Started with {}: The basics, explained simply", subject),
                "Lessons Learned: What a year of experiments taught us".to_string(),
                "Behind the Scenes: How we plan and make our work".to_string(),
            ],
            SiteType::Portfolio => vec![
                "Selected Work: A few projects we are proud of".to_string(),
                "Collaborations: Work made together with partners".to_string(),
                "Personal Projects: Experiments that shaped our style".to_string(),
            ],
            _ => vec![
                format!("{} Consultations: Advice tailored to your situation", subject),
                format!("Everyday {}: Reliable help whenever you need it", subject),
                "Custom Projects: Work shaped around your goals".to_string(),
            ],
        }
    }
}

/// Word describing the site owner for a site type
fn site_noun(site_type: SiteType) -> &'static str {
    match site_type {
        SiteType::Ecommerce => "shop",
        SiteType::Restaurant => "kitchen",
        SiteType::Portfolio => "studio",
        SiteType::Blog => "journal",
        SiteType::Business => "team",
    }
}

/// Industry wording, or the first usable prompt keyword when the industry is
/// unknown
fn subject(analysis: &PromptAnalysis, validator: &ContentValidator) -> String {
    if analysis.industry != "general" {
        return analysis.industry.replace('-', " ");
    }

    let generic = &validator.config().generic_name_words;
    analysis
        .keywords
        .iter()
        .find(|k| k.chars().count() >= 4 && !generic.iter().any(|g| g.eq_ignore_ascii_case(k)))
        .cloned()
        .unwrap_or_else(|| "local".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::content::schema::ContentSchema;

    #[test]
    fn test_name_from_industry_and_type() {
        let analysis = analyze("An online store selling athletic shoes and sneakers");
        let fallback = FallbackContent::new(&analysis, &ContentValidator::default());
        assert_eq!(fallback.business_name(), "Footwear Shop");
    }

    #[test]
    fn test_name_from_prompt_entity() {
        let analysis = analyze("A bakery website called Copper Kettle");
        let fallback = FallbackContent::new(&analysis, &ContentValidator::default());
        assert_eq!(fallback.business_name(), "Copper Kettle");
    }

    #[test]
    fn test_every_slot_has_a_passing_value() {
        let validator = ContentValidator::default();
        let prompts = [
            "An athletic shoe store",
            "A portfolio for a wedding photographer",
            "A cozy Italian restaurant in Boston",
            "A law firm website",
            "A blog about urban gardening",
            "something nice",
        ];

        for prompt in prompts {
            let analysis = analyze(prompt);
            let schema = ContentSchema::for_analysis(&analysis);
            let fallback = FallbackContent::new(&analysis, &validator);
            for slot in &schema.slots {
                let value = fallback.value(slot);
                assert!(!value.is_blank(), "{prompt}: {}", slot.key);
                assert!(
                    validator.check(slot.key, slot.kind, &value).is_ok(),
                    "{prompt}: {} -> {:?}",
                    slot.key,
                    value
                );
            }
        }
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let analysis = analyze("A yoga studio in Denver");
        let validator = ContentValidator::default();
        let schema = ContentSchema::for_analysis(&analysis);
        let a = FallbackContent::new(&analysis, &validator);
        let b = FallbackContent::new(&analysis, &validator);
        for slot in &schema.slots {
            assert_eq!(a.value(slot), b.value(slot));
        }
    }

    #[test]
    fn test_mentioned_products_become_offerings() {
        let analysis = analyze("An online shop selling scented candles, soap bars.");
        let schema = ContentSchema::for_analysis(&analysis);
        let fallback = FallbackContent::new(&analysis, &ContentValidator::default());
        let offerings = schema.offerings().map(|slot| fallback.value(slot));
        if !analysis.entities.products.is_empty() {
            assert_eq!(
                offerings,
                Some(SlotValue::List(
                    analysis.entities.products.iter().take(6).map(|p| title_case(p)).collect()
                ))
            );
        }
    }
}
