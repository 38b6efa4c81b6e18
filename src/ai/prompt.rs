//! Prompt building for content slots
//!
//! Every slot gets its own prompt: the shared business context first, then
//! what the slot should say, then strict output rules for the slot's kind so
//! the parser has as little cleanup to do as possible.

use crate::analysis::PromptAnalysis;
use crate::content::schema::{ContentSlot, SlotKind};
use crate::utils::title_case;

const SYSTEM_PROMPT: &str = "You are an expert copywriter who writes website copy for small \
businesses. You write specific, concrete copy that fits the business. You never use placeholder \
text, square brackets, lorem ipsum or generic filler, and you never explain your answer.";

/// What the prompts know about the site being generated
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    /// The user's original request
    pub prompt: &'a str,
    /// Analysis of the request
    pub analysis: &'a PromptAnalysis,
    /// Business name once it is known
    pub business_name: Option<&'a str>,
    /// Tone derived from the design personality
    pub tone: Option<&'a str>,
}

impl<'a> PromptContext<'a> {
    /// Context without a known name or tone
    pub fn new(prompt: &'a str, analysis: &'a PromptAnalysis) -> Self {
        Self {
            prompt,
            analysis,
            business_name: None,
            tone: None,
        }
    }

    /// Same context with the business name filled in
    pub fn with_business_name(self, name: &'a str) -> Self {
        Self {
            business_name: Some(name),
            ..self
        }
    }

    /// Same context with a tone
    pub fn with_tone(self, tone: &'a str) -> Self {
        Self {
            tone: Some(tone),
            ..self
        }
    }
}

/// Prompt builder for slot generation
#[derive(Debug, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    /// Create a new PromptBuilder
    pub fn new() -> Self {
        Self
    }

    /// System instruction sent with every slot
    pub fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    /// Full prompt for one slot
    pub fn build_slot_prompt(&self, slot: &ContentSlot, context: &PromptContext<'_>) -> String {
        let analysis = context.analysis;
        let industry = title_case(&analysis.industry);
        let site_type = analysis.site_type.to_string();

        let name_line = match (slot.kind, context.business_name) {
            (SlotKind::Name, _) => String::new(),
            (_, Some(name)) => format!("Business name: {}\n", name),
            (_, None) => String::new(),
        };
        let tone_line = context
            .tone
            .map(|tone| format!("Tone: {}\n", tone))
            .unwrap_or_default();
        let features_line = if analysis.features.is_empty() {
            String::new()
        } else {
            let features: Vec<&str> = analysis.features.iter().map(String::as_str).collect();
            format!("Requested features: {}\n", features.join(", "))
        };
        let location_line = analysis
            .entities
            .location
            .as_deref()
            .map(|location| format!("Location: {}\n", location))
            .unwrap_or_default();

        format!(
            r#"Write website copy for a {industry} {site_type} website.

# Business
Original request: "{request}"
Industry: {industry}
Style: {style}
{name_line}{tone_line}{location_line}{features_line}
# What to write
{guidance}

# Output rules
{rules}"#,
            industry = industry,
            site_type = site_type,
            request = context.prompt.trim(),
            style = analysis.style,
            name_line = name_line,
            tone_line = tone_line,
            location_line = location_line,
            features_line = features_line,
            guidance = slot.guidance,
            rules = Self::output_rules(slot),
        )
    }

    /// Strict formatting rules for a slot's kind
    fn output_rules(slot: &ContentSlot) -> String {
        match slot.kind {
            SlotKind::Name => format!(
                "- Return exactly one name of 1 to {} words\n\
                 - Do not use the words business, company or services\n\
                 - No quotes, no punctuation around the name, no explanation",
                slot.max_words
            ),
            SlotKind::Text => format!(
                "- Return only the text, at most {} words\n\
                 - No quotes, no labels, no markdown",
                slot.max_words
            ),
            SlotKind::Html => format!(
                "- Return only inner HTML, at most {} words\n\
                 - Use only <p>, <strong>, <em>, <ul> and <li> tags\n\
                 - Do not include <html>, <head> or <body> tags and no markdown",
                slot.max_words
            ),
            SlotKind::List => {
                let (min, max) = slot.items.unwrap_or((3, 5));
                format!(
                    "- Return a JSON array of {} to {} strings and nothing else\n\
                     - Each string at most {} words\n\
                     - No numbering, no markdown, no explanation",
                    min, max, slot.max_words
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::content::schema::ContentSchema;

    #[test]
    fn test_slot_prompt_includes_context() {
        let prompt = "An athletic shoe store in Portland";
        let analysis = analyze(prompt);
        let schema = ContentSchema::for_analysis(&analysis);
        let slot = schema.slot("tagline").unwrap();

        let context = PromptContext::new(prompt, &analysis)
            .with_business_name("Stride Lab")
            .with_tone("energetic");
        let built = PromptBuilder::new().build_slot_prompt(slot, &context);

        assert!(built.contains("Original request: \"An athletic shoe store in Portland\""));
        assert!(built.contains("Business name: Stride Lab"));
        assert!(built.contains("Tone: energetic"));
        assert!(built.contains("at most 12 words"));
    }

    #[test]
    fn test_name_prompt_omits_known_name() {
        let analysis = analyze("A bakery called Maria's Bakery");
        let schema = ContentSchema::for_analysis(&analysis);
        let slot = schema.slot("business_name").unwrap();

        let context = PromptContext::new("A bakery", &analysis).with_business_name("Other");
        let built = PromptBuilder::new().build_slot_prompt(slot, &context);
        assert!(!built.contains("Business name: Other"));
        assert!(built.contains("Do not use the words business, company or services"));
    }

    #[test]
    fn test_list_prompt_asks_for_json_array() {
        let analysis = analyze("An online store for handmade candles");
        let schema = ContentSchema::for_analysis(&analysis);
        let slot = schema.offerings().unwrap();
        let built = PromptBuilder::new().build_slot_prompt(slot, &PromptContext::new("x", &analysis));
        assert!(built.contains("JSON array of 3 to 6 strings"));
    }
}
