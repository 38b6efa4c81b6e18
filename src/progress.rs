// SITESMITH: Prompt-to-Website Generator
// Copyright (c) 2024 SITESMITH Core Team
//! Progress bar for generation runs

use crate::pipeline::{GenerationStep, ProgressSink, StepKind};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Terminal progress for one generation
#[derive(Debug)]
pub struct ProgressTracker {
    /// Multi-progress container for multiple bars
    multi: Arc<MultiProgress>,
    /// Overall percentage bar, created on init()
    main_bar: RwLock<Option<ProgressBar>>,
    /// Latest step message, created on init()
    status: RwLock<Option<ProgressBar>>,
    /// Whether progress is enabled
    enabled: AtomicBool,
    /// Advisory errors seen
    warnings: AtomicU64,
    /// Files produced
    files: AtomicU64,
}

impl ProgressTracker {
    /// Create a new progress tracker (bars are created when init() is called)
    pub fn new(enabled: bool) -> Self {
        Self {
            multi: Arc::new(MultiProgress::new()),
            main_bar: RwLock::new(None),
            status: RwLock::new(None),
            enabled: AtomicBool::new(enabled),
            warnings: AtomicU64::new(0),
            files: AtomicU64::new(0),
        }
    }

    /// Create a disabled progress tracker
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Check if progress is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Create and show the bars
    pub fn init(&self, prompt: &str) {
        if !self.is_enabled() {
            return;
        }

        let main_style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░  ");

        let status_style = ProgressStyle::default_bar()
            .template("  {prefix:.bold.dim} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());

        let main_bar = self.multi.add(ProgressBar::new(100));
        main_bar.set_style(main_style);
        main_bar.set_message(crate::utils::truncate_words(prompt, 8));
        main_bar.enable_steady_tick(Duration::from_millis(100));
        *self.main_bar.write() = Some(main_bar);

        let status = self.multi.add(ProgressBar::new(0));
        status.set_style(status_style);
        status.set_prefix("Step");
        *self.status.write() = Some(status);
    }

    /// Apply one generation step
    pub fn step(&self, step: &GenerationStep) {
        if !self.is_enabled() {
            return;
        }

        match step.kind {
            StepKind::Error => {
                self.warnings.fetch_add(1, Ordering::Relaxed);
            }
            StepKind::File => {
                self.files.fetch_add(1, Ordering::Relaxed);
            }
            StepKind::Planning | StepKind::Complete => {}
        }

        if let Some(bar) = self.main_bar.read().as_ref() {
            if let Some(progress) = step.progress {
                bar.set_position(u64::from(progress));
            }
        }
        if let Some(bar) = self.status.read().as_ref() {
            bar.set_message(step.message.clone());
        }

        if step.kind == StepKind::Complete {
            self.finish();
        }
    }

    /// Mark generation as complete
    pub fn finish(&self) {
        if !self.is_enabled() {
            return;
        }

        let files = self.files.load(Ordering::Relaxed);
        let warnings = self.warnings.load(Ordering::Relaxed);
        if let Some(bar) = self.main_bar.read().as_ref() {
            bar.finish_with_message(format!(
                "✓ Generated {} files ({} warnings)",
                files, warnings
            ));
        }
        if let Some(bar) = self.status.read().as_ref() {
            bar.finish_and_clear();
        }
    }

    /// Finish with an error
    pub fn finish_with_error(&self, msg: &str) {
        if !self.is_enabled() {
            return;
        }

        if let Some(bar) = self.main_bar.read().as_ref() {
            bar.abandon_with_message(format!("✗ {}", msg));
        }
        if let Some(bar) = self.status.read().as_ref() {
            bar.finish_and_clear();
        }
    }

    /// Suspend progress for logging output
    pub fn suspend<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if self.is_enabled() {
            self.multi.suspend(f)
        } else {
            f()
        }
    }

    /// Advisory errors seen so far
    pub fn warning_count(&self) -> u64 {
        self.warnings.load(Ordering::Relaxed)
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::disabled()
    }
}

impl ProgressSink for ProgressTracker {
    fn on_step(&self, step: &GenerationStep) {
        self.step(step)
    }
}

/// Global progress state for use across modules
pub static PROGRESS: std::sync::OnceLock<ProgressTracker> = std::sync::OnceLock::new();

/// Initialize global progress tracker
pub fn init_progress(enabled: bool) -> &'static ProgressTracker {
    PROGRESS.get_or_init(|| ProgressTracker::new(enabled))
}

/// Get global progress tracker
pub fn get_progress() -> Option<&'static ProgressTracker> {
    PROGRESS.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_tracker_ignores_steps() {
        let tracker = ProgressTracker::disabled();
        tracker.init("a bakery");
        tracker.on_step(&GenerationStep::error("degraded"));
        assert_eq!(tracker.warning_count(), 0);
    }

    #[test]
    fn test_enabled_tracker_counts_warnings() {
        let tracker = ProgressTracker::new(true);
        tracker.init("a bakery");
        tracker.on_step(&GenerationStep::planning("Analyzing prompt", 5));
        tracker.on_step(&GenerationStep::error("degraded"));
        tracker.on_step(&GenerationStep::complete("done"));
        assert_eq!(tracker.warning_count(), 1);
    }
}
