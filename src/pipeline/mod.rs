pub mod analysis;
pub mod prompts;
pub mod report;
pub mod risk;

pub use analysis::{ContractAnalyzer, PipelineError};
pub use report::{ClauseAnalysis, ContractReport};
pub use risk::{parse_risk_response, RiskVerdict};
