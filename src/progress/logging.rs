//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { contract_path } => {
                info!(contract = %contract_path, "Starting analysis");
            }
            ProgressEvent::ContractLoaded { chars } => {
                info!(chars, "Contract loaded");
            }
            ProgressEvent::SegmentationComplete { clauses } => {
                info!(clauses, "Contract segmented");
            }
            ProgressEvent::ClauseAnalysisStarted { index, total } => {
                debug!(
                    progress = format!("{}/{}", index, total),
                    "Analyzing clause"
                );
            }
            ProgressEvent::ClauseAnalysisComplete {
                index,
                total,
                is_risky,
                duration,
            } => {
                info!(
                    progress = format!("{}/{}", index, total),
                    risky = is_risky,
                    duration_ms = duration.as_millis(),
                    "Clause analysis complete"
                );
            }
            ProgressEvent::Completed {
                total_clauses,
                risky_clauses,
                total_time,
            } => {
                info!(
                    clauses = total_clauses,
                    risky = risky_clauses,
                    total_time_ms = total_time.as_millis(),
                    "Analysis complete"
                );
            }
            ProgressEvent::Failed { error } => {
                warn!(error = %error, "Analysis failed");
            }
        }
    }
}
