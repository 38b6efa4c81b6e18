//! Generic-content detection
//!
//! Generated copy that still looks like an unfilled template is treated as a
//! failed generation. The phrase denylist and the business-name heuristics
//! come from [`DetectorConfig`] so they can be tuned without code changes.

use crate::content::schema::{SlotKind, SlotValue};
use crate::error::{Error, Result};
use crate::utils::tokenize;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunable generic-content heuristics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Case-insensitive phrases that mark text as boilerplate
    pub denylist: Vec<String>,
    /// Words a business name must not contain
    pub generic_name_words: Vec<String>,
    /// Minimum business name length in characters
    pub min_name_length: usize,
    /// Maximum business name length in words
    pub max_name_words: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        let denylist = [
            "lorem ipsum",
            "placeholder",
            "your business",
            "your company",
            "business name",
            "company name",
            "insert ",
            "sample text",
            "example.com",
            "coming soon",
            "{{",
            "[",
            "]",
        ];
        Self {
            denylist: denylist.iter().map(|s| s.to_string()).collect(),
            generic_name_words: vec![
                "business".to_string(),
                "company".to_string(),
                "services".to_string(),
            ],
            min_name_length: 3,
            max_name_words: 6,
        }
    }
}

/// Rejects generated values that resemble template boilerplate
#[derive(Debug, Clone, Default)]
pub struct ContentValidator {
    config: DetectorConfig,
}

impl ContentValidator {
    /// Validator with the given heuristics
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Heuristics in use
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Check a parsed slot value; `GenericContent` when it looks generic
    pub fn check(&self, slot: &str, kind: SlotKind, value: &SlotValue) -> Result<()> {
        let outcome = match (kind, value) {
            (SlotKind::Name, SlotValue::Text(name)) => self.check_name(name),
            (_, SlotValue::Text(text)) => self.check_text(text),
            (_, SlotValue::List(items)) => items.iter().try_for_each(|item| self.check_text(item)),
        };

        outcome.map_err(|reason| {
            debug!(slot, %reason, "Generic content detected");
            Error::GenericContent {
                slot: slot.to_string(),
                reason,
            }
        })
    }

    /// Whether a business name passes every heuristic
    pub fn is_acceptable_name(&self, name: &str) -> bool {
        self.check_name(name).is_ok()
    }

    fn check_text(&self, text: &str) -> std::result::Result<(), String> {
        if text.trim().is_empty() {
            return Err("blank value".to_string());
        }

        let lowered = text.to_lowercase();
        match self
            .config
            .denylist
            .iter()
            .find(|phrase| !phrase.is_empty() && lowered.contains(&phrase.to_lowercase()))
        {
            Some(phrase) => Err(format!("contains '{}'", phrase.trim())),
            None => Ok(()),
        }
    }

    fn check_name(&self, name: &str) -> std::result::Result<(), String> {
        self.check_text(name)?;

        let trimmed = name.trim();
        if trimmed.chars().count() < self.config.min_name_length {
            return Err(format!("name '{}' is too short", trimmed));
        }

        let words = tokenize(trimmed);
        if words.len() > self.config.max_name_words {
            return Err(format!("name '{}' has too many words", trimmed));
        }

        match words.iter().find(|word| {
            self.config
                .generic_name_words
                .iter()
                .any(|generic| generic.eq_ignore_ascii_case(word))
        }) {
            Some(word) => Err(format!("name uses generic word '{}'", word)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> SlotValue {
        SlotValue::Text(s.to_string())
    }

    #[test]
    fn test_lorem_ipsum_rejected() {
        let validator = ContentValidator::default();
        let result = validator.check("about", SlotKind::Html, &text("<p>Lorem Ipsum dolor</p>"));
        assert!(matches!(result, Err(Error::GenericContent { .. })));
    }

    #[test]
    fn test_business_co_rejected() {
        let validator = ContentValidator::default();
        assert!(validator
            .check("business_name", SlotKind::Name, &text("Business Co"))
            .is_err());
        assert!(!validator.is_acceptable_name("Acme Services"));
        assert!(!validator.is_acceptable_name("Jo"));
    }

    #[test]
    fn test_specific_name_accepted() {
        let validator = ContentValidator::default();
        assert!(validator.is_acceptable_name("Stride Lab"));
        assert!(validator.is_acceptable_name("Maria's Bakery"));
    }

    #[test]
    fn test_brackets_rejected_in_lists() {
        let validator = ContentValidator::default();
        let value = SlotValue::List(vec![
            "Custom insoles".to_string(),
            "[Product name]".to_string(),
        ]);
        let err = validator.check("products", SlotKind::List, &value).unwrap_err();
        assert!(err.to_string().contains("products"));
    }

    #[test]
    fn test_configurable_denylist() {
        let validator = ContentValidator::new(DetectorConfig {
            denylist: vec!["synergy".to_string()],
            ..DetectorConfig::default()
        });
        assert!(validator
            .check("tagline", SlotKind::Text, &text("Synergy for everyone"))
            .is_err());
        // brackets are no longer on the list
        assert!(validator
            .check("tagline", SlotKind::Text, &text("Shoes [and more]"))
            .is_ok());
    }

    #[test]
    fn test_real_copy_passes() {
        let validator = ContentValidator::default();
        let value = text("Hand-stitched running shoes built for Portland's rainy trails.");
        assert!(validator.check("description", SlotKind::Text, &value).is_ok());
    }
}
