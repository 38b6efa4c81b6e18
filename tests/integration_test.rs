//! End-to-end tests for SITESMITH

use async_trait::async_trait;
use sitesmith::ai::{AIClient, Completion, GenerationOptions, LLMProvider, ProviderRegistry, RetryConfig};
use sitesmith::assembly::{merge_files, skeleton_files};
use sitesmith::content::{FallbackReason, SlotSource};
use sitesmith::design::DesignResolver;
use sitesmith::pipeline::{GenerationStep, NoProgress, Pipeline, PipelineOptions, StepKind};
use sitesmith::types::{ProjectFile, SiteType};
use sitesmith::Result;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

const SHOE_PROMPT: &str = "Build a website for my athletic shoe store";

/// Writes template boilerplate no matter what it is asked
struct BoilerplateProvider;

#[async_trait]
impl LLMProvider for BoilerplateProvider {
    fn name(&self) -> &str {
        "boilerplate"
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> Result<Completion> {
        let text = if prompt.contains("Return exactly one name") {
            "Business Co"
        } else {
            "Lorem ipsum dolor sit amet, consectetur adipiscing elit."
        };
        Ok(Completion::text(text))
    }
}

fn pipeline_with(provider: Arc<dyn LLMProvider>) -> Pipeline {
    let registry = ProviderRegistry::new().with_provider(provider);
    let client = AIClient::new(Arc::new(registry), RetryConfig::immediate());
    Pipeline::new(Some(Arc::new(client)), PipelineOptions::default())
}

#[tokio::test]
async fn test_shoe_store_offline() {
    let output = Pipeline::offline(PipelineOptions::default())
        .generate(SHOE_PROMPT, &NoProgress)
        .await;

    assert_eq!(output.analysis.industry, "footwear");
    assert_eq!(output.content.industry, "footwear");
    assert!(output.report.is_full_fallback());
    assert!(output.content.is_complete());
    assert!(output
        .content
        .sections
        .iter()
        .all(|s| !s.title.trim().is_empty() && !s.content.trim().is_empty()));

    let paths: Vec<&str> = output.files.iter().map(|f| f.path.as_str()).collect();
    for expected in ["package.json", "index.html", "src/styles.css", "src/main.js"] {
        assert!(paths.contains(&expected), "missing {}", expected);
    }
    let unique: HashSet<&str> = paths.iter().copied().collect();
    assert_eq!(unique.len(), paths.len());

    let index = output.files.iter().find(|f| f.path == "index.html").unwrap();
    assert!(index.content.contains("<html"));
    assert!(output.files.iter().any(|f| f.path == "content.json"));
}

#[tokio::test]
async fn test_progress_sequence() {
    let steps: Mutex<Vec<GenerationStep>> = Mutex::new(Vec::new());
    let sink = |step: &GenerationStep| steps.lock().push(step.clone());

    Pipeline::offline(PipelineOptions::default())
        .generate("a cozy family bakery in Lisbon", &sink)
        .await;

    let steps = steps.into_inner();
    assert_eq!(steps.first().map(|s| s.kind), Some(StepKind::Planning));
    let last = steps.last().unwrap();
    assert_eq!(last.kind, StepKind::Complete);
    assert_eq!(last.progress, Some(100));
    assert!(steps.iter().any(|s| s.kind == StepKind::File));

    let progress: Vec<u8> = steps.iter().filter_map(|s| s.progress).collect();
    assert!(progress.windows(2).all(|w| w[0] <= w[1]), "{:?}", progress);
}

#[test]
fn test_design_is_deterministic() {
    let resolver = DesignResolver::new();
    let (first_design, first_variation) = resolver.resolve(SHOE_PROMPT);
    let (second_design, second_variation) = resolver.resolve(SHOE_PROMPT);

    assert_eq!(first_variation, second_variation);
    assert_eq!(
        serde_json::to_value(&first_design).unwrap(),
        serde_json::to_value(&second_design).unwrap()
    );
    assert_eq!(
        serde_json::to_value(sitesmith::design::resolve_design_system(SHOE_PROMPT)).unwrap(),
        serde_json::to_value(&first_design).unwrap()
    );
}

#[test]
fn test_same_industry_differs_only_by_personality() {
    let resolver = DesignResolver::new();
    let sneakers = resolver.resolve_design_system("A luxury sneaker and shoe store");
    let runners = resolver.resolve_design_system("Premium luxury running shoes");
    let kids = resolver.resolve_design_system("A fun shoe store for kids");

    for design in [&sneakers, &runners, &kids] {
        assert_eq!(design.industry.id, "footwear");
        assert!(design
            .industry
            .palettes
            .iter()
            .any(|p| p.name == design.colors.name));
    }

    // Same wording signal, same palette even though the prompts differ
    assert_eq!(sneakers.personality, runners.personality);
    assert_eq!(sneakers.colors.name, runners.colors.name);
    assert_eq!(sneakers.colors.name, "midnight-sole");

    assert_ne!(sneakers.personality.mood, kids.personality.mood);
    assert_ne!(sneakers.personality.sophistication, kids.personality.sophistication);
}

#[test]
fn test_assembly_overrides_skeleton() {
    let skeleton = skeleton_files();
    let original_len = skeleton.len();
    let package_position = skeleton.iter().position(|f| f.path == "package.json").unwrap();

    let overrides = vec![
        ProjectFile::new("package.json", "{\"name\": \"stride-lab\"}\n"),
        ProjectFile::new("content.json", "{}\n"),
    ];
    let merged = merge_files(skeleton, overrides);

    assert_eq!(merged.len(), original_len + 1);
    assert_eq!(merged[package_position].path, "package.json");
    assert!(merged[package_position].content.contains("stride-lab"));
    assert_eq!(merged.last().map(|f| f.path.as_str()), Some("content.json"));
}

#[tokio::test]
async fn test_boilerplate_copy_replaced() {
    let output = pipeline_with(Arc::new(BoilerplateProvider))
        .generate(SHOE_PROMPT, &NoProgress)
        .await;

    assert!(output.report.is_full_fallback());
    assert!(output.report.slots.iter().all(|s| matches!(
        s.source,
        SlotSource::Fallback {
            reason: FallbackReason::GenericContent,
            ..
        }
    )));
    assert_ne!(output.content.business_name, "Business Co");
    assert!(output.content.is_complete());
    assert!(output
        .files
        .iter()
        .all(|f| !f.content.to_lowercase().contains("lorem ipsum")));
}

#[tokio::test]
async fn test_store_prompt_classified_as_ecommerce() {
    let output = Pipeline::offline(PipelineOptions::default())
        .generate("online store selling handmade candles with a shopping cart", &NoProgress)
        .await;
    assert_eq!(output.analysis.site_type, SiteType::Ecommerce);
    assert!(output.analysis.features.contains("contact"));
}
