//! Generation pipeline
//!
//! Sequences analysis, design resolution, content generation and assembly
//! for one prompt. [`Pipeline::generate`] never fails: every stage either
//! succeeds or degrades to deterministic fallback output, and the caller
//! always receives a usable project.
//!
//! Progress is reported as an ordered stream of [`GenerationStep`] events
//! through a [`ProgressSink`]. `error` steps are advisory only.

use crate::ai::{AIClient, AIConfig, ContentValidator, DetectorConfig};
use crate::analysis::{PromptAnalysis, PromptAnalyzer};
use crate::assembly::{skeleton_files, Assembler};
use crate::config::Config;
use crate::content::schema::ContentSchema;
use crate::content::{ContentGenerator, GenerationReport, SlotSource, DEFAULT_CONCURRENCY};
use crate::design::{DesignResolver, DesignSystem, StyleVariation};
use crate::types::{ProjectFile, WebsiteContent};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Kind of progress event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Analysis, design and content work
    Planning,
    /// A project file was produced
    File,
    /// Generation finished
    Complete,
    /// Something degraded; generation continues
    Error,
}

/// One progress event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStep {
    /// Event kind
    #[serde(rename = "type")]
    pub kind: StepKind,
    /// Human-readable description
    pub message: String,
    /// Overall progress, 0 to 100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

impl GenerationStep {
    fn new(kind: StepKind, message: impl Into<String>, progress: Option<u8>) -> Self {
        Self {
            kind,
            message: message.into(),
            progress: progress.map(|p| p.min(100)),
        }
    }

    /// Planning step
    pub fn planning(message: impl Into<String>, progress: u8) -> Self {
        Self::new(StepKind::Planning, message, Some(progress))
    }

    /// File step
    pub fn file(message: impl Into<String>, progress: u8) -> Self {
        Self::new(StepKind::File, message, Some(progress))
    }

    /// Final step
    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(StepKind::Complete, message, Some(100))
    }

    /// Advisory error step
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(StepKind::Error, message, None)
    }
}

/// Receives progress events
pub trait ProgressSink: Send + Sync {
    /// Called once per event, in order
    fn on_step(&self, step: &GenerationStep);
}

impl<F> ProgressSink for F
where
    F: Fn(&GenerationStep) + Send + Sync,
{
    fn on_step(&self, step: &GenerationStep) {
        self(step)
    }
}

/// Sink that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_step(&self, _step: &GenerationStep) {}
}

/// Everything produced for one prompt
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutput {
    /// Prompt classification
    pub analysis: PromptAnalysis,
    /// Resolved design system
    pub design: DesignSystem,
    /// Resolved style variation
    pub variation: StyleVariation,
    /// Business content
    pub content: WebsiteContent,
    /// Per-slot provenance
    pub report: GenerationReport,
    /// Assembled project
    pub files: Vec<ProjectFile>,
}

/// Tunables of a pipeline
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Design seed used instead of the prompt
    pub seed: Option<String>,
    /// Slots requested at once
    pub concurrency: usize,
    /// Generic-content heuristics
    pub detector: DetectorConfig,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            seed: None,
            concurrency: DEFAULT_CONCURRENCY,
            detector: DetectorConfig::default(),
        }
    }
}

impl From<&Config> for PipelineOptions {
    fn from(config: &Config) -> Self {
        Self {
            seed: config.generation.seed.clone(),
            concurrency: config.generation.concurrency,
            detector: config.detector.clone(),
        }
    }
}

/// Prompt-to-project orchestrator
#[derive(Debug)]
pub struct Pipeline {
    analyzer: PromptAnalyzer,
    resolver: DesignResolver,
    generator: ContentGenerator,
    assembler: Assembler,
}

impl Pipeline {
    /// Pipeline over an optional AI client
    pub fn new(client: Option<Arc<AIClient>>, options: PipelineOptions) -> Self {
        let resolver = match options.seed {
            Some(seed) => DesignResolver::with_seed(seed),
            None => DesignResolver::new(),
        };

        let generator = ContentGenerator::new(client)
            .with_validator(ContentValidator::new(options.detector))
            .with_concurrency(options.concurrency);

        Self {
            analyzer: PromptAnalyzer::new(),
            resolver,
            generator,
            assembler: Assembler::new(),
        }
    }

    /// Pipeline that never calls a provider
    pub fn offline(options: PipelineOptions) -> Self {
        Self::new(None, options)
    }

    /// Pipeline built from configuration files
    ///
    /// A provider catalog that fails to build is logged and treated as having
    /// no providers, so the pipeline still produces fallback content.
    pub fn from_config(config: &Config, ai_config: &AIConfig) -> Self {
        let options = PipelineOptions::from(config);
        if config.generation.offline {
            return Self::offline(options);
        }

        let client = match AIClient::from_config(ai_config) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                warn!("AI providers unavailable: {}", e);
                None
            }
        };
        Self::new(client, options)
    }

    /// Stop issuing slot requests; pending slots take fallback values
    pub fn cancellation_token(&self) -> CancellationToken {
        self.generator.cancellation_token()
    }

    /// Use an external cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.generator = self.generator.with_cancellation(token);
        self
    }

    /// Generate a project for a prompt
    pub async fn generate(&self, prompt: &str, progress: &dyn ProgressSink) -> GenerationOutput {
        progress.on_step(&GenerationStep::planning("Analyzing prompt", 5));
        let analysis = self.analyzer.analyze(prompt);
        progress.on_step(&GenerationStep::planning(
            format!(
                "Detected a {} site for the {} industry",
                analysis.site_type, analysis.industry
            ),
            10,
        ));

        let (design, variation) = self.resolver.resolve(prompt);
        progress.on_step(&GenerationStep::planning(
            format!(
                "Design system: {} palette, {} layout",
                design.colors.name, variation.layout_variant
            ),
            20,
        ));

        let schema = ContentSchema::for_analysis(&analysis);
        if !self.generator.has_provider() {
            progress.on_step(&GenerationStep::error(
                "No AI provider available, using fallback content",
            ));
        }

        let tone = design.personality.tone();
        let total_slots = schema.slots.len().max(1);
        let mut done = 0usize;
        let generated = self
            .generator
            .generate_with(prompt, &schema, &analysis, Some(&tone), |slot| {
                done += 1;
                let percent = 20 + (50 * done / total_slots) as u8;
                match &slot.source {
                    SlotSource::Generated { provider, .. } => progress.on_step(
                        &GenerationStep::planning(format!("Wrote {} with {}", slot.slot, provider), percent),
                    ),
                    SlotSource::Fallback { reason, detail } => {
                        if let Some(detail) = detail {
                            progress.on_step(&GenerationStep::error(format!(
                                "Using fallback for {}: {}",
                                slot.slot, detail
                            )));
                        }
                        progress.on_step(&GenerationStep::planning(
                            format!("Filled {} ({:?})", slot.slot, reason),
                            percent,
                        ));
                    }
                }
            })
            .await;

        let files = self.assembler.assemble(
            &design,
            &variation,
            &generated.content,
            skeleton_files(),
        );

        let total_files = files.len().max(1);
        for (index, file) in files.iter().enumerate() {
            let percent = 70 + (25 * (index + 1) / total_files) as u8;
            progress.on_step(&GenerationStep::file(format!("Created {}", file.path), percent));
        }

        info!(
            business = %generated.content.business_name,
            files = files.len(),
            generated = generated.report.generated_count(),
            fallback = generated.report.fallback_count(),
            "Generation complete"
        );
        progress.on_step(&GenerationStep::complete(format!(
            "Generated {} files for {}",
            files.len(),
            generated.content.business_name
        )));

        GenerationOutput {
            analysis,
            design,
            variation,
            content: generated.content,
            report: generated.report,
            files,
        }
    }
}

/// Generate with no providers and default options
pub async fn generate_offline(prompt: &str) -> GenerationOutput {
    Pipeline::offline(PipelineOptions::default())
        .generate(prompt, &NoProgress)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn collect() -> (Arc<Mutex<Vec<GenerationStep>>>, impl Fn(&GenerationStep) + Send + Sync) {
        let steps = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let steps = Arc::clone(&steps);
            move |step: &GenerationStep| steps.lock().push(step.clone())
        };
        (steps, sink)
    }

    #[tokio::test]
    async fn test_offline_generation_completes_with_fallback() {
        let (steps, sink) = collect();
        let output = Pipeline::offline(PipelineOptions::default())
            .generate("Build a website for my athletic shoe store", &sink)
            .await;

        assert!(output.content.is_complete());
        assert!(output.report.is_full_fallback());
        assert!(output.files.iter().any(|f| f.path == "index.html"));

        let steps = steps.lock();
        assert_eq!(steps.first().map(|s| s.kind), Some(StepKind::Planning));
        assert_eq!(steps.last().map(|s| s.kind), Some(StepKind::Complete));
        assert!(steps.iter().any(|s| s.kind == StepKind::Error));
    }

    #[tokio::test]
    async fn test_progress_is_monotonic() {
        let (steps, sink) = collect();
        Pipeline::offline(PipelineOptions::default())
            .generate("a cozy family bakery", &sink)
            .await;

        let values: Vec<u8> = steps.lock().iter().filter_map(|s| s.progress).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "{:?}", values);
        assert_eq!(values.last(), Some(&100));
    }

    #[tokio::test]
    async fn test_seed_override_fixes_design() {
        let options = PipelineOptions {
            seed: Some("fixed".to_string()),
            ..PipelineOptions::default()
        };
        let a = Pipeline::offline(options.clone())
            .generate("modern shoe shop", &NoProgress)
            .await;
        let b = Pipeline::offline(options)
            .generate("shoe shop with a modern look", &NoProgress)
            .await;
        assert_eq!(a.variation, b.variation);
        assert_eq!(a.design.colors.name, b.design.colors.name);
    }

    #[test]
    fn test_step_serializes_with_type_field() {
        let json = serde_json::to_value(GenerationStep::file("Created index.html", 80)).unwrap();
        assert_eq!(json["type"], "file");
        assert_eq!(json["progress"], 80);

        let json = serde_json::to_value(GenerationStep::error("degraded")).unwrap();
        assert!(json.get("progress").is_none());
    }
}
