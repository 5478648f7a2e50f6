//! Progress handler trait and events

use std::time::Duration;

/// Events emitted while a contract moves through the analysis pipeline
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Analysis started
    Started { contract_path: String },

    /// Contract text loaded from disk
    ContractLoaded { chars: usize },

    /// Clause segmentation finished
    SegmentationComplete { clauses: usize },

    /// A clause entered the analysis ladder
    ClauseAnalysisStarted { index: usize, total: usize },

    /// A clause left the analysis ladder
    ClauseAnalysisComplete {
        index: usize,
        total: usize,
        is_risky: bool,
        duration: Duration,
    },

    /// Full report assembled
    Completed {
        total_clauses: usize,
        risky_clauses: usize,
        total_time: Duration,
    },

    /// Analysis failed
    Failed { error: String },
}

/// Trait for handling progress events during analysis
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {
        // Intentionally empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandler {
        count: Arc<AtomicUsize>,
    }

    impl ProgressHandler for CountingHandler {
        fn on_progress(&self, _event: &ProgressEvent) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_noop_handler() {
        let handler = NoOpHandler;
        handler.on_progress(&ProgressEvent::Started {
            contract_path: "/test/contract.txt".to_string(),
        });
        // Should not panic or do anything
    }

    #[test]
    fn test_progress_events() {
        let count = Arc::new(AtomicUsize::new(0));
        let handler = CountingHandler {
            count: count.clone(),
        };

        handler.on_progress(&ProgressEvent::Started {
            contract_path: "/test/contract.txt".to_string(),
        });
        handler.on_progress(&ProgressEvent::SegmentationComplete { clauses: 12 });
        handler.on_progress(&ProgressEvent::Completed {
            total_clauses: 12,
            risky_clauses: 3,
            total_time: Duration::from_secs(5),
        });

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_event_debug() {
        let event = ProgressEvent::ClauseAnalysisStarted { index: 1, total: 9 };
        let debug_str = format!("{:?}", event);
        assert!(debug_str.contains("ClauseAnalysisStarted"));
        assert!(debug_str.contains("index: 1"));
    }
}
