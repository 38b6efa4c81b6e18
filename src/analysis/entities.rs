//! Best-effort entity extraction from free-text prompts
//!
//! Nothing here is allowed to fail: a missing entity is simply `None` or an
//! empty list.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Entities mentioned in a prompt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    /// Explicit business name ("called Stride Lab")
    pub company_name: Option<String>,
    /// City or region ("in Portland")
    pub location: Option<String>,
    /// Services offered ("offering repairs and fittings")
    pub services: Vec<String>,
    /// Products sold ("selling trail shoes, socks")
    pub products: Vec<String>,
}

impl Entities {
    /// True when nothing was extracted
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.location.is_none()
            && self.services.is_empty()
            && self.products.is_empty()
    }
}

/// Regex-driven entity extractor
#[derive(Debug)]
pub struct EntityExtractor {
    named: Regex,
    quoted: Regex,
    possessive: Regex,
    location: Regex,
    services: Regex,
    products: Regex,
}

impl EntityExtractor {
    /// Create an extractor with compiled patterns
    pub fn new() -> Self {
        Self {
            named: Regex::new(
                r#"(?:called|named)\s+"?([A-Z0-9][\w&'.-]*(?:\s+[A-Z0-9&][\w&'.-]*)*)"?"#,
            )
            .unwrap(),
            quoted: Regex::new(r#"["“]([^"”]{3,60})["”]"#).unwrap(),
            possessive: Regex::new(r"\b([A-Z][a-zA-Z]+'s(?:\s+[A-Z][a-zA-Z]+)+)").unwrap(),
            location: Regex::new(
                r"\b(?:in|based in|located in|near)\s+([A-Z][a-zA-Z]+(?:(?:\s+|,\s*)[A-Z][a-zA-Z]+)*)",
            )
            .unwrap(),
            services: Regex::new(
                r"(?i)\b(?:offering|offers|offer|providing|provides|provide|specializing in|specialising in)\s+([^.;!?]+)",
            )
            .unwrap(),
            products: Regex::new(r"(?i)\b(?:selling|sells|sell)\s+([^.;!?]+)").unwrap(),
        }
    }

    /// Extract entities from the raw (case-preserving) prompt
    pub fn extract(&self, prompt: &str) -> Entities {
        let company_name = self
            .named
            .captures(prompt)
            .or_else(|| self.quoted.captures(prompt))
            .or_else(|| self.possessive.captures(prompt))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().trim_end_matches('.').to_string())
            .filter(|name| !name.is_empty());

        let location = self
            .location
            .captures(prompt)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string());

        let services = self
            .services
            .captures(prompt)
            .and_then(|c| c.get(1))
            .map(|m| split_list(m.as_str()))
            .unwrap_or_default();

        let products = self
            .products
            .captures(prompt)
            .and_then(|c| c.get(1))
            .map(|m| split_list(m.as_str()))
            .unwrap_or_default();

        Entities {
            company_name,
            location,
            services,
            products,
        }
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Split "a, b and c" into items, cutting at trailing clauses
fn split_list(fragment: &str) -> Vec<String> {
    let fragment = fragment.lines().next().unwrap_or_default();
    let lowered = fragment.to_ascii_lowercase();

    let cut_markers = [" in ", " for ", " with ", " that ", " which ", " to "];
    let end = cut_markers
        .iter()
        .filter_map(|m| lowered.find(m))
        .min()
        .unwrap_or(fragment.len());

    fragment[..end]
        .split(',')
        .flat_map(|part| part.split(" and "))
        .map(|item| item.trim().trim_start_matches("and ").trim().to_string())
        .filter(|item| !item.is_empty() && item.len() <= 60)
        .take(8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_company() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract("Build a site for a running store called Stride Lab in Portland");
        assert_eq!(entities.company_name.as_deref(), Some("Stride Lab"));
        assert_eq!(entities.location.as_deref(), Some("Portland"));
    }

    #[test]
    fn test_possessive_company() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract("Website for Maria's Bakery");
        assert_eq!(entities.company_name.as_deref(), Some("Maria's Bakery"));
    }

    #[test]
    fn test_services_and_products() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract(
            "A shop selling trail shoes, socks and insoles. We also offer gait analysis and fittings for runners",
        );
        assert_eq!(entities.products, vec!["trail shoes", "socks", "insoles"]);
        assert_eq!(entities.services, vec!["gait analysis", "fittings"]);
    }

    #[test]
    fn test_absent_entities_are_not_errors() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract("build a website for my athletic shoe store");
        assert!(entities.is_empty());
        assert!(extractor.extract("").is_empty());
    }
}
