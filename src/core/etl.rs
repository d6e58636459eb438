use crate::core::{Extracted, Pipeline, RunSummary, Storage};
use crate::utils::logger::ActivityLog;

pub const COMPLETION_MARKER: &str = "filtering finished";

/// Drives one pipeline run. Load and save failures end up in the activity log;
/// `run` itself cannot fail.
pub struct EtlEngine<P: Pipeline, S: Storage> {
    pipeline: P,
    journal: ActivityLog<S>,
}

impl<P: Pipeline, S: Storage> EtlEngine<P, S> {
    pub fn new(pipeline: P, journal: ActivityLog<S>) -> Self {
        Self { pipeline, journal }
    }

    pub fn run(&self) -> RunSummary {
        tracing::info!("Starting delivery filter run");

        // Extract
        let extracted = match self.pipeline.extract() {
            Ok(extracted) => extracted,
            Err(e) => {
                tracing::error!("Loading orders failed: {}", e);
                self.journal.log(format!("load failed: {}", e));
                Extracted::default()
            }
        };
        tracing::info!(
            "Loaded {} orders, skipped {} lines",
            extracted.store.len(),
            extracted.rejected
        );

        // Transform
        let matched = self.pipeline.transform(&extracted.store);
        tracing::info!("{} orders match the filter", matched.len());

        // Load
        let written = match self.pipeline.load(&matched) {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::error!("Saving results failed: {}", e);
                self.journal.log(format!("write failed: {}", e));
                None
            }
        };
        self.journal.log(COMPLETION_MARKER);

        RunSummary {
            loaded: extracted.store.len(),
            rejected: extracted.rejected,
            matched: matched.len(),
            written,
        }
    }
}
