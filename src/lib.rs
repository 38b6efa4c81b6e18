// SITESMITH: Prompt-to-Website Generator
// Copyright (c) 2024 SITESMITH Core Team

//! # SITESMITH Library
//!
//! Turns a free-text website request into a complete static site project:
//! prompt classification, a deterministic design system, AI-written business
//! copy with multi-provider failover and generic-content detection, and
//! assembly over a fixed project skeleton.
//!
//! ```no_run
//! use sitesmith::pipeline::{NoProgress, Pipeline, PipelineOptions};
//!
//! # async fn example() {
//! let pipeline = Pipeline::offline(PipelineOptions::default());
//! let output = pipeline
//!     .generate("Build a website for my athletic shoe store", &NoProgress)
//!     .await;
//! println!("{} files for {}", output.files.len(), output.content.business_name);
//! # }
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_qualifications,
    missing_debug_implementations
)]
#![forbid(unsafe_code)]

// Core modules
pub mod ai;
pub mod analysis;
pub mod assembly;
pub mod banner;
pub mod config;
pub mod content;
pub mod design;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use crate::ai::{AIClient, AIConfig, ContentValidator, DetectorConfig, GenerationOptions};
pub use crate::analysis::{analyze, PromptAnalysis};
pub use crate::config::Config;
pub use crate::design::{DesignResolver, DesignSystem, StyleVariation};
pub use crate::error::{Error, Result};
pub use crate::pipeline::{GenerationOutput, GenerationStep, Pipeline, PipelineOptions};
pub use crate::types::{ContentSection, ProjectFile, SiteType, WebsiteContent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    pub use crate::ai::{AIClient, AIConfig, LLMProvider};
    pub use crate::analysis::{analyze, PromptAnalysis};
    pub use crate::config::Config;
    pub use crate::content::schema::ContentSchema;
    pub use crate::content::ContentGenerator;
    pub use crate::design::{DesignResolver, DesignSystem, StyleVariation};
    pub use crate::error::{Error, Result};
    pub use crate::pipeline::{GenerationStep, NoProgress, Pipeline, PipelineOptions, ProgressSink};
    pub use crate::types::{ContentSection, ProjectFile, SectionType, SiteType, WebsiteContent};
    pub use async_trait::async_trait;
}
