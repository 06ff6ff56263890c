//! Stage-boundary observer for pipeline progress.
//!
//! Inject an [`Arc<dyn PipelineObserver>`] via
//! [`crate::config::SummarizeConfigBuilder::observer`] to receive events as
//! the pipeline moves through its stages.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers
//! can forward events to a terminal spinner, a log, or a GUI without the
//! library knowing anything about how the host application communicates.
//! All methods have default no-op implementations so callers only override
//! what they care about.

use std::sync::Arc;

/// The pipeline's stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the document and extracting its text.
    Extract,
    /// Resolving the credential and constructing the generative backend.
    ResolveBackend,
    /// The generative-model call and response parsing.
    Generate,
    /// The bibliographic lookup.
    Citation,
    /// Rendering the Markdown document.
    Render,
}

impl Stage {
    /// Human-readable progress label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Extract => "Extracting text",
            Stage::ResolveBackend => "Preparing model",
            Stage::Generate => "Generating summary",
            Stage::Citation => "Looking up citation",
            Stage::Render => "Rendering output",
        }
    }
}

/// Called by the pipeline driver at each stage boundary.
///
/// Implementations must be `Send + Sync`; the driver itself is strictly
/// sequential, so no two methods are ever called concurrently.
pub trait PipelineObserver: Send + Sync {
    /// Called when a stage begins.
    fn on_stage_start(&self, stage: Stage) {
        let _ = stage;
    }

    /// Called when a stage finishes successfully.
    fn on_stage_complete(&self, stage: Stage) {
        let _ = stage;
    }

    /// Called when a non-fatal stage is skipped or degrades
    /// (currently only [`Stage::Citation`]).
    fn on_stage_skipped(&self, stage: Stage, reason: &str) {
        let _ = (stage, reason);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Convenience alias matching the type stored in [`crate::config::SummarizeConfig`].
pub type Observer = Arc<dyn PipelineObserver>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingObserver {
        starts: AtomicUsize,
        completes: AtomicUsize,
        skips: AtomicUsize,
    }

    impl PipelineObserver for TrackingObserver {
        fn on_stage_start(&self, _stage: Stage) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }
        fn on_stage_complete(&self, _stage: Stage) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }
        fn on_stage_skipped(&self, _stage: Stage, _reason: &str) {
            self.skips.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_observer_does_not_panic() {
        let obs = NoopObserver;
        obs.on_stage_start(Stage::Extract);
        obs.on_stage_complete(Stage::Extract);
        obs.on_stage_skipped(Stage::Citation, "no title");
    }

    #[test]
    fn tracking_observer_receives_events() {
        let obs = TrackingObserver {
            starts: AtomicUsize::new(0),
            completes: AtomicUsize::new(0),
            skips: AtomicUsize::new(0),
        };

        obs.on_stage_start(Stage::Extract);
        obs.on_stage_complete(Stage::Extract);
        obs.on_stage_start(Stage::Generate);
        obs.on_stage_complete(Stage::Generate);
        obs.on_stage_skipped(Stage::Citation, "lookup disabled");

        assert_eq!(obs.starts.load(Ordering::SeqCst), 2);
        assert_eq!(obs.completes.load(Ordering::SeqCst), 2);
        assert_eq!(obs.skips.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stage_labels_are_distinct() {
        let stages = [
            Stage::Extract,
            Stage::ResolveBackend,
            Stage::Generate,
            Stage::Citation,
            Stage::Render,
        ];
        for (i, a) in stages.iter().enumerate() {
            for b in &stages[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }
}
