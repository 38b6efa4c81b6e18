//! Prompt classification
//!
//! Turns a free-text request into a [`PromptAnalysis`]: site type, industry,
//! requested features, visual style, a confidence score and the ordered set of
//! meaningful keywords. Classification is pure keyword scoring, so the same
//! prompt always yields the same analysis.
//!
//! # Tie-break rule
//!
//! When two type patterns produce the same score, the pattern declared first in
//! [`patterns::TYPE_PATTERNS`] wins. The same first-declared rule applies to
//! industries and styles.

pub mod entities;
pub mod patterns;

use crate::types::SiteType;
use crate::utils::{normalize_text, tokenize};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

pub use entities::{Entities, EntityExtractor};
use patterns::{
    IndustryPattern, KeywordCategory, TypePattern, DEFAULT_INDUSTRY, DEFAULT_STYLE,
    FEATURE_CATEGORIES, FORCED_FEATURE, INDUSTRY_MIN_MATCHES, INDUSTRY_PATTERNS,
    STOP_WORDS, STYLE_CATEGORIES, TYPE_PATTERNS,
};

/// Classification of one prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptAnalysis {
    /// Site type
    #[serde(rename = "type")]
    pub site_type: SiteType,
    /// Industry identifier (`general` when unknown)
    pub industry: String,
    /// Requested feature categories (always contains `contact`)
    pub features: BTreeSet<String>,
    /// Visual style keyword
    pub style: String,
    /// Score of the winning type pattern, in `[0, 1]`
    pub confidence: f64,
    /// Meaningful prompt words, first occurrence order, no duplicates
    pub keywords: Vec<String>,
    /// Best-effort named entities
    #[serde(default)]
    pub entities: Entities,
}

impl PromptAnalysis {
    /// Whether a feature category was requested
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }
}

/// Keyword-pattern prompt classifier
#[derive(Debug, Default)]
pub struct PromptAnalyzer {
    extractor: EntityExtractor,
}

/// Tokens of a prompt plus the normalized text used for phrase matching
struct PromptTokens {
    padded: String,
    set: HashSet<String>,
    ordered: Vec<String>,
}

impl PromptTokens {
    fn new(prompt: &str) -> Self {
        let stop_words: HashSet<&str> = STOP_WORDS.iter().copied().collect();

        let mut seen = HashSet::new();
        let ordered: Vec<String> = tokenize(prompt)
            .into_iter()
            .filter(|t| !stop_words.contains(t.as_str()) && t.chars().any(char::is_alphanumeric))
            .filter(|t| seen.insert(t.clone()))
            .collect();

        Self {
            padded: format!(" {} ", normalize_text(prompt)),
            set: ordered.iter().cloned().collect(),
            ordered,
        }
    }

    /// A single word must be a token; a phrase must appear in the normalized text
    fn matches(&self, keyword: &str) -> bool {
        if keyword.contains(' ') || keyword.contains('-') {
            let phrase = normalize_text(keyword);
            !phrase.is_empty() && self.padded.contains(&format!(" {} ", phrase))
        } else {
            self.set.contains(keyword)
        }
    }

    fn count_matches(&self, keywords: &[&str]) -> usize {
        keywords.iter().filter(|k| self.matches(k)).count()
    }
}

impl PromptAnalyzer {
    /// Create an analyzer
    pub fn new() -> Self {
        Self {
            extractor: EntityExtractor::new(),
        }
    }

    /// Classify a prompt. Never fails; empty input yields the defaults.
    pub fn analyze(&self, prompt: &str) -> PromptAnalysis {
        let tokens = PromptTokens::new(prompt);

        let (site_type, confidence) = classify_type(&tokens, TYPE_PATTERNS);
        let industry = classify_industry(&tokens, INDUSTRY_PATTERNS);
        let features = collect_features(&tokens, FEATURE_CATEGORIES);
        let style = first_category(&tokens, STYLE_CATEGORIES).unwrap_or(DEFAULT_STYLE);
        let entities = self.extractor.extract(prompt);

        debug!(
            site_type = %site_type,
            industry,
            style,
            confidence,
            keywords = tokens.ordered.len(),
            "Analyzed prompt"
        );

        PromptAnalysis {
            site_type,
            industry: industry.to_string(),
            features,
            style: style.to_string(),
            confidence,
            keywords: tokens.ordered,
            entities,
        }
    }
}

/// Classify a prompt with a fresh analyzer
pub fn analyze(prompt: &str) -> PromptAnalysis {
    PromptAnalyzer::new().analyze(prompt)
}

/// `matches / keyword_count * weight`; strict `>` keeps the first declared winner
fn classify_type(tokens: &PromptTokens, patterns: &[TypePattern]) -> (SiteType, f64) {
    let mut best: Option<(SiteType, f64)> = None;

    for pattern in patterns {
        if pattern.keywords.is_empty() {
            continue;
        }
        let matched = tokens.count_matches(pattern.keywords);
        if matched == 0 {
            continue;
        }
        let score = matched as f64 / pattern.keywords.len() as f64 * pattern.weight;
        if best.map(|(_, s)| score > s).unwrap_or(true) {
            best = Some((pattern.site_type, score));
        }
    }

    match best {
        Some((site_type, score)) => (site_type, score.clamp(0.0, 1.0)),
        None => (SiteType::Business, 0.0),
    }
}

/// First pattern with at least [`INDUSTRY_MIN_MATCHES`] keyword hits
///
/// Independent of [`crate::design::classify_industry`], which picks a design
/// profile from a single hit; the two may disagree on weak prompts.
fn classify_industry(tokens: &PromptTokens, patterns: &[IndustryPattern]) -> &'static str {
    patterns
        .iter()
        .find(|p| tokens.count_matches(p.keywords) >= INDUSTRY_MIN_MATCHES)
        .map(|p| p.industry)
        .unwrap_or(DEFAULT_INDUSTRY)
}

fn collect_features(tokens: &PromptTokens, categories: &[KeywordCategory]) -> BTreeSet<String> {
    let mut features: BTreeSet<String> = categories
        .iter()
        .filter(|c| tokens.count_matches(c.keywords) > 0)
        .map(|c| c.name.to_string())
        .collect();
    features.insert(FORCED_FEATURE.to_string());
    features
}

fn first_category(tokens: &PromptTokens, categories: &[KeywordCategory]) -> Option<&'static str> {
    categories
        .iter()
        .find(|c| tokens.count_matches(c.keywords) > 0)
        .map(|c| c.name)
}
