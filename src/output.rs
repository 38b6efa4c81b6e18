//! Writing generated projects and reporting on them

use crate::content::{GenerationReport, SlotSource};
use crate::error::{Error, Result};
use crate::pipeline::GenerationOutput;
use crate::types::ProjectFile;
use chrono::{DateTime, Utc};
use console::{style, StyledObject};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Writes a project file set to disk
#[derive(Debug, Clone)]
pub struct ProjectWriter {
    root: PathBuf,
    force: bool,
}

impl ProjectWriter {
    /// Writer rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            force: false,
        }
    }

    /// Allow writing into a non-empty directory
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Target directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write every file, returning the paths written
    pub fn write(&self, files: &[ProjectFile]) -> Result<Vec<PathBuf>> {
        if !self.force && is_non_empty_dir(&self.root)? {
            return Err(Error::Validation(format!(
                "{} is not empty; use --force to write into it",
                self.root.display()
            )));
        }

        let mut written = Vec::with_capacity(files.len());
        for file in files {
            let relative = safe_relative_path(&file.path)?;
            let target = self.root.join(relative);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&target, &file.content)?;
            tracing::debug!(path = %target.display(), bytes = file.content.len(), "Wrote file");
            written.push(target);
        }

        tracing::info!(
            "Wrote {} files to {}",
            written.len(),
            self.root.display()
        );
        Ok(written)
    }
}

fn is_non_empty_dir(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    if !path.is_dir() {
        return Err(Error::Validation(format!(
            "{} exists and is not a directory",
            path.display()
        )));
    }
    Ok(std::fs::read_dir(path)?.next().is_some())
}

/// Project paths must stay inside the output directory
fn safe_relative_path(path: &str) -> Result<&Path> {
    let relative = Path::new(path);
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if path.is_empty() || escapes {
        return Err(Error::Validation(format!("Refusing to write unsafe path '{}'", path)));
    }
    Ok(relative)
}

/// Serializable overview of one generation
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    /// Unique id of this run
    pub id: Uuid,
    /// When the run finished
    pub generated_at: DateTime<Utc>,
    /// Input prompt
    pub prompt: String,
    /// Business name used in the site
    pub business_name: String,
    /// Detected site type
    pub site_type: String,
    /// Detected industry
    pub industry: String,
    /// Analyzer confidence
    pub confidence: f64,
    /// Palette name
    pub palette: &'static str,
    /// Layout variant
    pub layout: String,
    /// Project paths in order
    pub files: Vec<String>,
    /// Per-slot provenance
    pub report: GenerationReport,
}

impl GenerationSummary {
    /// Summarize a pipeline output
    pub fn new(prompt: &str, output: &GenerationOutput) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            prompt: prompt.to_string(),
            business_name: output.content.business_name.clone(),
            site_type: output.analysis.site_type.to_string(),
            industry: output.analysis.industry.clone(),
            confidence: output.analysis.confidence,
            palette: output.design.colors.name,
            layout: output.variation.layout_variant.to_string(),
            files: output.files.iter().map(|f| f.path.clone()).collect(),
            report: output.report.clone(),
        }
    }
}

/// Summary output formatter
pub trait SummaryFormatter: Send + Sync {
    /// Get format name
    fn name(&self) -> &str;

    /// Format a summary
    fn format(&self, summary: &GenerationSummary) -> Result<String>;
}

/// JSON summary
#[derive(Debug)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl SummaryFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn format(&self, summary: &GenerationSummary) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(summary)?
        } else {
            serde_json::to_string(summary)?
        };
        Ok(json)
    }
}

/// Human-readable summary
#[derive(Debug, Default)]
pub struct TextFormatter {
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint<F>(&self, text: String, apply: F) -> String
    where
        F: Fn(StyledObject<String>) -> StyledObject<String>,
    {
        if self.color {
            apply(style(text)).to_string()
        } else {
            text
        }
    }
}

impl SummaryFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn format(&self, summary: &GenerationSummary) -> Result<String> {
        let mut out = String::new();
        let heading = self.paint(summary.business_name.clone(), |s| s.cyan().bold());

        // fmt::Write into a String cannot fail
        let _ = writeln!(out, "{}", heading);
        let _ = writeln!(
            out,
            "  {} site, {} industry (confidence {:.2})",
            summary.site_type, summary.industry, summary.confidence
        );
        let _ = writeln!(out, "  Palette {}, layout {}", summary.palette, summary.layout);
        let _ = writeln!(out);

        let _ = writeln!(
            out,
            "Content: {} generated, {} fallback",
            summary.report.generated_count(),
            summary.report.fallback_count()
        );
        for slot in &summary.report.slots {
            let line = match &slot.source {
                SlotSource::Generated { provider, attempts } => self.paint(
                    format!("  ✓ {} ({}, {} attempt(s))", slot.slot, provider, attempts),
                    |s| s.green(),
                ),
                SlotSource::Fallback { reason, .. } => self.paint(
                    format!("  • {} (fallback: {:?})", slot.slot, reason),
                    |s| s.yellow(),
                ),
            };
            let _ = writeln!(out, "{}", line);
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Files ({}):", summary.files.len());
        for path in &summary.files {
            let _ = writeln!(out, "  {}", path);
        }

        Ok(out)
    }
}

/// Formatter by name
pub fn formatter(name: &str, color: bool) -> Option<Box<dyn SummaryFormatter>> {
    match name {
        "json" => Some(Box::new(JsonFormatter::new(true))),
        "text" => Some(Box::new(TextFormatter::new(color))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::generate_offline;
    use tempfile::TempDir;

    fn files() -> Vec<ProjectFile> {
        vec![
            ProjectFile::new("index.html", "<html></html>"),
            ProjectFile::new("src/styles.css", "body {}"),
        ]
    }

    #[test]
    fn test_writer_creates_nested_files() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("site");
        let written = ProjectWriter::new(&root).write(&files()).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(std::fs::read_to_string(root.join("src/styles.css")).unwrap(), "body {}");
    }

    #[test]
    fn test_writer_refuses_non_empty_dir_unless_forced() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("keep.txt"), "mine").unwrap();

        assert!(ProjectWriter::new(dir.path()).write(&files()).is_err());
        assert!(ProjectWriter::new(dir.path()).force(true).write(&files()).is_ok());
        assert!(dir.path().join("keep.txt").exists());
    }

    #[test]
    fn test_writer_rejects_escaping_paths() {
        let dir = TempDir::new().unwrap();
        let bad = vec![ProjectFile::new("../outside.txt", "x")];
        assert!(ProjectWriter::new(dir.path().join("site")).write(&bad).is_err());
    }

    #[tokio::test]
    async fn test_summary_formats() {
        let prompt = "Build a website for my athletic shoe store";
        let output = generate_offline(prompt).await;
        let summary = GenerationSummary::new(prompt, &output);

        let json = JsonFormatter::new(false).format(&summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["prompt"], prompt);
        assert_eq!(value["files"].as_array().unwrap().len(), output.files.len());

        let text = TextFormatter::new(false).format(&summary).unwrap();
        assert!(text.contains(&output.content.business_name));
        assert!(text.contains("fallback"));
    }

    #[test]
    fn test_formatter_lookup() {
        assert_eq!(formatter("json", false).unwrap().name(), "json");
        assert_eq!(formatter("text", true).unwrap().name(), "text");
        assert!(formatter("sarif", false).is_none());
    }
}
