//! Content generation
//!
//! Fills every slot of a [`ContentSchema`] through the [`AIClient`], then
//! merges the values into a [`WebsiteContent`]. The business name is generated
//! first so the remaining slots can mention it; the rest fan out concurrently.
//!
//! A slot never fails the request. When no provider is available, every
//! attempt fails, the output is unparseable, or it looks like template
//! boilerplate, the slot takes its deterministic fallback value and the
//! [`GenerationReport`] records why.

pub mod fallback;
pub mod schema;

use crate::ai::client::{AIClient, GenerationResponse};
use crate::ai::failover::FailoverScope;
use crate::ai::parser::ResponseParser;
use crate::ai::prompt::{PromptBuilder, PromptContext};
use crate::ai::providers::GenerationOptions;
use crate::ai::validator::ContentValidator;
use crate::analysis::PromptAnalysis;
use crate::error::{Error, Result};
use crate::types::{ContentSection, SectionType, SiteType, WebsiteContent};
use crate::utils::slugify;
use fallback::FallbackContent;
use futures::stream::{self, StreamExt};
use schema::{action_label, section_title, ContentSchema, ContentSlot, SlotKind, SlotValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default number of slots requested at once
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Why a slot took its fallback value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No provider has a usable key
    NoProviderAvailable,
    /// Every attempt failed
    ProvidersFailed,
    /// The output could not be parsed
    Unparseable,
    /// The output looked like template boilerplate
    GenericContent,
    /// The request was cancelled
    Cancelled,
}

impl FallbackReason {
    fn from_error(error: &Error) -> Self {
        match error.root() {
            Error::NoProviderAvailable => FallbackReason::NoProviderAvailable,
            Error::GenericContent { .. } => FallbackReason::GenericContent,
            Error::Parse(_) => FallbackReason::Unparseable,
            Error::Cancelled => FallbackReason::Cancelled,
            _ => FallbackReason::ProvidersFailed,
        }
    }
}

/// Where a slot's value came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SlotSource {
    /// Produced by a provider
    Generated {
        /// Provider name
        provider: String,
        /// Attempts made, including the successful one
        attempts: usize,
    },
    /// Deterministic fallback
    Fallback {
        /// Why the fallback was used
        reason: FallbackReason,
        /// Error detail, when there was one
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
}

/// Outcome of one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotReport {
    /// Slot key
    pub slot: String,
    /// Value provenance
    #[serde(flatten)]
    pub source: SlotSource,
}

impl SlotReport {
    fn generated(slot: &ContentSlot, response: &GenerationResponse) -> Self {
        Self {
            slot: slot.key.to_string(),
            source: SlotSource::Generated {
                provider: response.provider.clone(),
                attempts: response.attempts,
            },
        }
    }

    fn fallback(slot: &ContentSlot, reason: FallbackReason, detail: Option<String>) -> Self {
        Self {
            slot: slot.key.to_string(),
            source: SlotSource::Fallback { reason, detail },
        }
    }

    /// Whether a provider produced the value
    pub fn is_generated(&self) -> bool {
        matches!(self.source, SlotSource::Generated { .. })
    }
}

/// Per-slot provenance of one generation request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Slot outcomes in schema order
    pub slots: Vec<SlotReport>,
}

impl GenerationReport {
    /// Slots produced by a provider
    pub fn generated_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_generated()).count()
    }

    /// Slots that took their fallback value
    pub fn fallback_count(&self) -> usize {
        self.slots.len() - self.generated_count()
    }

    /// True when no slot was generated
    pub fn is_full_fallback(&self) -> bool {
        self.generated_count() == 0
    }

    /// Providers that produced at least one slot
    pub fn providers_used(&self) -> BTreeSet<String> {
        self.slots
            .iter()
            .filter_map(|s| match &s.source {
                SlotSource::Generated { provider, .. } => Some(provider.clone()),
                SlotSource::Fallback { .. } => None,
            })
            .collect()
    }

    /// Outcome of a slot
    pub fn slot(&self, key: &str) -> Option<&SlotReport> {
        self.slots.iter().find(|s| s.slot == key)
    }
}

/// Content plus its provenance
#[derive(Debug, Clone)]
pub struct GeneratedContent {
    /// Merged page content
    pub content: WebsiteContent,
    /// Per-slot provenance
    pub report: GenerationReport,
}

/// Fills content slots through the AI client with fallbacks
#[derive(Debug)]
pub struct ContentGenerator {
    client: Option<Arc<AIClient>>,
    prompts: PromptBuilder,
    parser: ResponseParser,
    validator: ContentValidator,
    concurrency: usize,
    cancel: CancellationToken,
}

impl ContentGenerator {
    /// Generator over a client; `None` always uses fallback content
    pub fn new(client: Option<Arc<AIClient>>) -> Self {
        Self {
            client,
            prompts: PromptBuilder::new(),
            parser: ResponseParser::new(),
            validator: ContentValidator::default(),
            concurrency: DEFAULT_CONCURRENCY,
            cancel: CancellationToken::new(),
        }
    }

    /// Generator that never calls a provider
    pub fn offline() -> Self {
        Self::new(None)
    }

    /// Replace the generic-content validator
    pub fn with_validator(mut self, validator: ContentValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Slots requested at once (at least one)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Use an external cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that cancels outstanding slot requests
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether any provider could be called
    pub fn has_provider(&self) -> bool {
        self.available_client().is_some()
    }

    fn available_client(&self) -> Option<&AIClient> {
        self.client
            .as_deref()
            .filter(|client| client.has_available_provider())
    }

    /// Generate content for every slot of a schema
    pub async fn generate(
        &self,
        prompt: &str,
        schema: &ContentSchema,
        analysis: &PromptAnalysis,
    ) -> GeneratedContent {
        self.generate_with(prompt, schema, analysis, None, |_| {}).await
    }

    /// Generate content, reporting each slot as it resolves (in schema order)
    pub async fn generate_with<F>(
        &self,
        prompt: &str,
        schema: &ContentSchema,
        analysis: &PromptAnalysis,
        tone: Option<&str>,
        mut on_slot: F,
    ) -> GeneratedContent
    where
        F: FnMut(&SlotReport),
    {
        let fallback = FallbackContent::new(analysis, &self.validator);
        let scope = FailoverScope::new();
        let mut context = PromptContext::new(prompt, analysis);
        if let Some(tone) = tone {
            context = context.with_tone(tone);
        }

        if self.available_client().is_none() {
            info!("No AI provider available, using fallback content");
        }

        let mut values: HashMap<&'static str, SlotValue> = HashMap::new();
        let mut report = GenerationReport::default();

        let (name_slots, other_slots): (Vec<&ContentSlot>, Vec<&ContentSlot>) =
            schema.slots.iter().partition(|s| s.kind == SlotKind::Name);

        for slot in name_slots {
            let (value, slot_report) = self.resolve_slot(slot, &context, &scope, &fallback).await;
            on_slot(&slot_report);
            values.insert(slot.key, value);
            report.slots.push(slot_report);
        }

        let business_name = values
            .get(schema::BUSINESS_NAME)
            .map(SlotValue::as_text)
            .unwrap_or_else(|| fallback.business_name().to_string());
        let context = context.with_business_name(&business_name);

        let mut resolved = stream::iter(other_slots)
            .map(|slot| {
                let context = &context;
                let scope = &scope;
                let fallback = &fallback;
                async move {
                    let outcome = self.resolve_slot(slot, context, scope, fallback).await;
                    (slot.key, outcome)
                }
            })
            .buffered(self.concurrency);

        while let Some((key, (value, slot_report))) = resolved.next().await {
            on_slot(&slot_report);
            values.insert(key, value);
            report.slots.push(slot_report);
        }

        info!(
            generated = report.generated_count(),
            fallback = report.fallback_count(),
            "Content slots resolved"
        );

        let content = build_website_content(schema, analysis, &business_name, &values, &fallback);
        GeneratedContent { content, report }
    }

    /// Resolve one slot to a value, falling back on any failure
    async fn resolve_slot(
        &self,
        slot: &ContentSlot,
        context: &PromptContext<'_>,
        scope: &FailoverScope,
        fallback: &FallbackContent<'_>,
    ) -> (SlotValue, SlotReport) {
        if self.available_client().is_none() {
            let report = SlotReport::fallback(slot, FallbackReason::NoProviderAvailable, None);
            return (fallback.value(slot), report);
        }
        if self.cancel.is_cancelled() {
            let report = SlotReport::fallback(slot, FallbackReason::Cancelled, None);
            return (fallback.value(slot), report);
        }

        let outcome = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Error::Cancelled),
            result = self.generate_slot(slot, context, scope) => result,
        };

        match outcome {
            Ok((value, response)) => {
                debug!(slot = slot.key, provider = %response.provider, "Slot generated");
                let report = SlotReport::generated(slot, &response);
                (value, report)
            }
            Err(error) => {
                let reason = FallbackReason::from_error(&error);
                warn!(slot = slot.key, ?reason, error = %error, "Using fallback content for slot");
                let report = SlotReport::fallback(slot, reason, Some(error.to_string()));
                (fallback.value(slot), report)
            }
        }
    }

    /// Generate, parse and validate one slot without fallback
    pub async fn generate_slot(
        &self,
        slot: &ContentSlot,
        context: &PromptContext<'_>,
        scope: &FailoverScope,
    ) -> Result<(SlotValue, GenerationResponse)> {
        let client = self.available_client().ok_or(Error::NoProviderAvailable)?;

        let prompt = self.prompts.build_slot_prompt(slot, context);
        let options = GenerationOptions {
            max_tokens: Some(token_budget(slot)),
            temperature: None,
            system: Some(self.prompts.system_prompt().to_string()),
        };

        let response = client.generate(&prompt, &options, Some(scope)).await?;
        let value = self
            .parser
            .parse(&response.completion.content, slot.kind)
            .map_err(|e| e.context(format!("slot {} from {}", slot.key, response.provider)))?;

        let value = match (value, slot.items) {
            (SlotValue::List(mut items), Some((_, max))) => {
                items.truncate(max);
                SlotValue::List(items)
            }
            (value, _) => value,
        };

        self.validator.check(slot.key, slot.kind, &value)?;
        Ok((value, response))
    }
}

/// Completion tokens requested for a slot
fn token_budget(slot: &ContentSlot) -> u32 {
    let words = slot.max_words * slot.items.map(|(_, max)| max).unwrap_or(1);
    // roughly two tokens per word plus room for markup
    (words as u32 * 2 + 64).min(1024)
}

/// Intro line for list sections
fn section_intro(section: SectionType, site_type: SiteType, business_name: &str) -> String {
    match section {
        SectionType::Services => "What we can do for you.".to_string(),
        SectionType::Products => "A few favourites from the collection.".to_string(),
        SectionType::Menu => "Dishes our guests keep coming back for.".to_string(),
        SectionType::Projects => "A selection of recent work.".to_string(),
        SectionType::Posts => "Fresh from the journal.".to_string(),
        SectionType::Features => format!("What sets {} apart.", business_name),
        SectionType::Testimonials => match site_type {
            SiteType::Blog => "What readers are saying.".to_string(),
            _ => "Kind words from the people we work with.".to_string(),
        },
        _ => String::new(),
    }
}

/// Merge slot values into page content in schema order
pub fn build_website_content(
    schema: &ContentSchema,
    analysis: &PromptAnalysis,
    business_name: &str,
    values: &HashMap<&'static str, SlotValue>,
    fallback: &FallbackContent<'_>,
) -> WebsiteContent {
    let site_type = schema.site_type;
    let value_of = |slot: &ContentSlot| {
        values
            .get(slot.key)
            .cloned()
            .unwrap_or_else(|| fallback.value(slot))
    };
    let text_of = |key: &str| {
        schema
            .slot(key)
            .map(|slot| value_of(slot).as_text())
            .unwrap_or_default()
    };

    let tagline = text_of(schema::TAGLINE);
    let description = text_of(schema::DESCRIPTION);

    let primary_target = schema
        .offerings()
        .and_then(|slot| slot.section)
        .unwrap_or(SectionType::Contact)
        .anchor();

    let mut sections = Vec::new();
    for slot in &schema.slots {
        let Some(section_type) = slot.section else {
            continue;
        };
        let title = section_title(section_type, site_type);

        let section = match section_type {
            SectionType::Hero => ContentSection::new(section_type, tagline.clone(), description.clone())
                .with_cta(action_label(site_type), format!("#{}", primary_target)),
            SectionType::CallToAction => ContentSection::new(section_type, title, value_of(slot).as_text())
                .with_cta(action_label(site_type), "#contact"),
            SectionType::Contact => ContentSection::new(section_type, title, value_of(slot).as_text())
                .with_cta("Send a Message", format!("mailto:hello@{}.com", slugify(business_name))),
            _ if slot.kind == SlotKind::List => ContentSection::new(
                section_type,
                title,
                section_intro(section_type, site_type, business_name),
            )
            .with_items(value_of(slot).into_items()),
            _ => ContentSection::new(section_type, title, value_of(slot).as_text()),
        };
        sections.push(section);
    }

    let navigation = sections
        .iter()
        .filter(|s| s.section_type.in_navigation())
        .map(|s| s.title.clone())
        .collect();

    WebsiteContent {
        business_name: business_name.to_string(),
        tagline,
        description,
        industry: analysis.industry.clone(),
        site_type,
        navigation,
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::providers::{Completion, LLMProvider};
    use crate::ai::registry::ProviderRegistry;
    use crate::ai::retry::RetryConfig;
    use crate::analysis::analyze;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers every slot in the shape its prompt asks for
    struct CopywriterProvider {
        name: &'static str,
        business_name: &'static str,
        calls: AtomicUsize,
    }

    impl CopywriterProvider {
        fn new(business_name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name: "openai",
                business_name,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl LLMProvider for CopywriterProvider {
        fn name(&self) -> &str {
            self.name
        }

        fn is_available(&self) -> bool {
            true
        }

        async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> Result<Completion> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let text = if prompt.contains("Return exactly one name") {
                self.business_name.to_string()
            } else if prompt.contains("JSON array") {
                "```json\n[\"Trail runners: Grip for wet paths\", \"Road racers: Light and quick\", \"Kids range: Built to last\"]\n```".to_string()
            } else if prompt.contains("inner HTML") {
                "<p>Founded by two runners who wanted better shoes.</p>".to_string()
            } else {
                "Shoes that keep up with every run.".to_string()
            };
            Ok(Completion::text(text))
        }
    }

    /// Returns boilerplate for everything
    struct LazyProvider;

    #[async_trait]
    impl LLMProvider for LazyProvider {
        fn name(&self) -> &str {
            "lazy"
        }

        fn is_available(&self) -> bool {
            true
        }

        async fn generate(&self, _prompt: &str, _options: &GenerationOptions) -> Result<Completion> {
            Ok(Completion::text("Lorem ipsum dolor sit amet"))
        }
    }

    fn generator(provider: Arc<dyn LLMProvider>) -> ContentGenerator {
        let registry = ProviderRegistry::new().with_provider(provider);
        let client = AIClient::new(Arc::new(registry), RetryConfig::immediate());
        ContentGenerator::new(Some(Arc::new(client)))
    }

    const PROMPT: &str = "An athletic shoe store";

    #[tokio::test]
    async fn test_offline_uses_fallback_everywhere() {
        let analysis = analyze(PROMPT);
        let schema = ContentSchema::for_analysis(&analysis);
        let generated = ContentGenerator::offline().generate(PROMPT, &schema, &analysis).await;

        assert!(generated.report.is_full_fallback());
        assert_eq!(generated.report.slots.len(), schema.slots.len());
        assert!(generated.content.is_complete());
        assert_eq!(generated.content.business_name, "Footwear Shop");
        assert!(generated
            .report
            .slots
            .iter()
            .all(|s| matches!(s.source, SlotSource::Fallback { reason: FallbackReason::NoProviderAvailable, .. })));
    }

    #[tokio::test]
    async fn test_generated_content_in_schema_order() {
        let analysis = analyze(PROMPT);
        let schema = ContentSchema::for_analysis(&analysis);
        let provider = CopywriterProvider::new("Stride Lab");
        let generated = generator(provider.clone())
            .with_concurrency(8)
            .generate(PROMPT, &schema, &analysis)
            .await;

        assert_eq!(generated.report.generated_count(), schema.slots.len());
        assert_eq!(provider.calls.load(Ordering::SeqCst), schema.slots.len());
        assert_eq!(generated.content.business_name, "Stride Lab");
        assert!(generated.content.is_complete());

        let report_keys: Vec<&str> = generated.report.slots.iter().map(|s| s.slot.as_str()).collect();
        let schema_keys: Vec<&str> = schema.slots.iter().map(|s| s.key).collect();
        assert_eq!(report_keys, schema_keys);

        let section_types: Vec<SectionType> =
            generated.content.sections.iter().map(|s| s.section_type).collect();
        let expected: Vec<SectionType> = schema.slots.iter().filter_map(|s| s.section).collect();
        assert_eq!(section_types, expected);

        let products = generated.content.section(SectionType::Products).unwrap();
        assert_eq!(products.items.as_ref().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_generic_output_replaced_by_fallback() {
        let analysis = analyze(PROMPT);
        let schema = ContentSchema::for_analysis(&analysis);
        let generated = generator(Arc::new(LazyProvider)).generate(PROMPT, &schema, &analysis).await;

        assert!(generated.report.is_full_fallback());
        assert!(generated.report.slots.iter().all(|s| matches!(
            s.source,
            SlotSource::Fallback { reason: FallbackReason::GenericContent, .. }
        )));
        assert!(!generated.content.tagline.to_lowercase().contains("lorem"));
        assert!(generated.content.is_complete());
    }

    #[tokio::test]
    async fn test_generic_business_name_rejected() {
        let analysis = analyze(PROMPT);
        let schema = ContentSchema::for_analysis(&analysis);
        let generated = generator(CopywriterProvider::new("Business Co"))
            .generate(PROMPT, &schema, &analysis)
            .await;

        assert_eq!(generated.content.business_name, "Footwear Shop");
        let name = generated.report.slot(schema::BUSINESS_NAME).unwrap();
        assert!(!name.is_generated());
        assert_eq!(generated.report.fallback_count(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_request_issues_no_calls() {
        let analysis = analyze(PROMPT);
        let schema = ContentSchema::for_analysis(&analysis);
        let provider = CopywriterProvider::new("Stride Lab");
        let generator = generator(provider.clone());
        generator.cancellation_token().cancel();

        let generated = generator.generate(PROMPT, &schema, &analysis).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert!(generated.report.slots.iter().all(|s| matches!(
            s.source,
            SlotSource::Fallback { reason: FallbackReason::Cancelled, .. }
        )));
        assert!(generated.content.is_complete());
    }

    #[tokio::test]
    async fn test_progress_callback_sees_every_slot() {
        let analysis = analyze(PROMPT);
        let schema = ContentSchema::for_analysis(&analysis);
        let mut seen = Vec::new();
        ContentGenerator::offline()
            .generate_with(PROMPT, &schema, &analysis, Some("energetic"), |r| seen.push(r.slot.clone()))
            .await;
        assert_eq!(seen.len(), schema.slots.len());
        assert_eq!(seen.first().map(String::as_str), Some(schema::BUSINESS_NAME));
    }

    #[test]
    fn test_report_serializes_flat() {
        let report = SlotReport {
            slot: "tagline".to_string(),
            source: SlotSource::Fallback {
                reason: FallbackReason::GenericContent,
                detail: None,
            },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["slot"], "tagline");
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["reason"], "generic_content");
    }
}
