use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::llm::{BackendError, LLMClient, LLMRequest};
use crate::loader::{self, LoadError};
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use crate::segmenter;

use super::prompts;
use super::report::{ClauseAnalysis, ContractReport};
use super::risk::parse_risk_response;

/// Sampling temperature for every analysis request. Low on purpose:
/// contract review wants stable wording over variety.
const TEMPERATURE: f32 = 0.1;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Failed to load contract: {0}")]
    Load(#[from] LoadError),

    #[error("No clauses found in contract text")]
    NoClauses,
}

/// Runs a contract through the full pipeline: load, segment, the
/// three-step analysis per clause, then report assembly.
///
/// Backend failures never abort a run. A clause whose analysis fails gets
/// a placeholder entry and the pipeline moves on.
pub struct ContractAnalyzer {
    client: Arc<dyn LLMClient>,
    max_clauses: usize,
}

impl ContractAnalyzer {
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self {
            client,
            max_clauses: 0,
        }
    }

    /// Caps how many clauses are analyzed per contract; 0 means no cap.
    pub fn with_max_clauses(mut self, max_clauses: usize) -> Self {
        self.max_clauses = max_clauses;
        self
    }

    /// Loads a contract from disk and analyzes it.
    pub async fn analyze_file(
        &self,
        path: &Path,
        progress: Option<Arc<dyn ProgressHandler>>,
    ) -> Result<ContractReport, PipelineError> {
        let progress = progress.unwrap_or_else(|| Arc::new(NoOpHandler));

        progress.on_progress(&ProgressEvent::Started {
            contract_path: path.display().to_string(),
        });

        info!("Starting contract analysis for {}", path.display());

        let text = loader::load_contract(path)?;
        progress.on_progress(&ProgressEvent::ContractLoaded {
            chars: text.chars().count(),
        });

        self.run(&text, &progress).await
    }

    /// Analyzes contract text that is already in memory.
    pub async fn analyze_text(
        &self,
        text: &str,
        progress: Option<Arc<dyn ProgressHandler>>,
    ) -> Result<ContractReport, PipelineError> {
        let progress = progress.unwrap_or_else(|| Arc::new(NoOpHandler));
        self.run(text, &progress).await
    }

    async fn run(
        &self,
        text: &str,
        progress: &Arc<dyn ProgressHandler>,
    ) -> Result<ContractReport, PipelineError> {
        let start_time = Instant::now();

        let mut clauses = segmenter::segment(text);
        if clauses.is_empty() {
            let error_msg = "No clauses found in contract text".to_string();
            error!("{}", error_msg);
            progress.on_progress(&ProgressEvent::Failed { error: error_msg });
            return Err(PipelineError::NoClauses);
        }

        if self.max_clauses > 0 && clauses.len() > self.max_clauses {
            warn!(
                "Contract has {} clauses, analyzing only the first {}",
                clauses.len(),
                self.max_clauses
            );
            clauses.truncate(self.max_clauses);
        }

        progress.on_progress(&ProgressEvent::SegmentationComplete {
            clauses: clauses.len(),
        });

        let total = clauses.len();
        let mut analyses = Vec::with_capacity(total);

        for (index, clause) in clauses.into_iter().enumerate() {
            let index = index + 1;
            progress.on_progress(&ProgressEvent::ClauseAnalysisStarted { index, total });

            let clause_start = Instant::now();
            let analysis = match self.analyze_clause(&clause).await {
                Ok(analysis) => analysis,
                Err(e) => {
                    warn!("Error analyzing clause {}/{}: {}", index, total, e);
                    ClauseAnalysis::failed(clause)
                }
            };

            progress.on_progress(&ProgressEvent::ClauseAnalysisComplete {
                index,
                total,
                is_risky: analysis.is_risky,
                duration: clause_start.elapsed(),
            });

            analyses.push(analysis);
        }

        let report = ContractReport::from_analyses(analyses);

        progress.on_progress(&ProgressEvent::Completed {
            total_clauses: report.total_clauses,
            risky_clauses: report.risky_clauses_count,
            total_time: start_time.elapsed(),
        });

        info!(
            "Analysis completed: {} clauses, {} risky, {} suggestions",
            report.total_clauses, report.risky_clauses_count, report.suggestions_count
        );

        Ok(report)
    }

    /// The three-step ladder for one clause: summary, risk verdict, then a
    /// negotiation suggestion grounded in that verdict. Any backend error
    /// aborts the ladder; the caller substitutes a placeholder.
    async fn analyze_clause(&self, clause: &str) -> Result<ClauseAnalysis, BackendError> {
        let summary = self
            .ask(prompts::SUMMARY_SYSTEM, &prompts::summary_user(clause))
            .await?;

        let risk_raw = self
            .ask(prompts::RISK_SYSTEM, &prompts::risk_user(clause))
            .await?;
        let verdict = parse_risk_response(&risk_raw);

        let suggestion = self
            .ask(
                prompts::SUGGESTION_SYSTEM,
                &prompts::suggestion_user(clause, verdict.is_risky, &verdict.risk_reason),
            )
            .await?;

        Ok(ClauseAnalysis::new(
            clause.to_string(),
            summary,
            verdict.is_risky,
            verdict.risk_reason,
            suggestion,
        ))
    }

    async fn ask(&self, system: &str, user: &str) -> Result<String, BackendError> {
        let request = LLMRequest::from_prompts(system, user).with_temperature(TEMPERATURE);
        let response = self.client.chat(request).await?;
        Ok(response.content.trim().to_string())
    }
}
