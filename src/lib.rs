//! redline - AI-assisted contract review
//!
//! This library splits contracts into clauses and runs each clause through a
//! three-step LLM analysis: a plain-English summary, a risk verdict, and a
//! negotiation suggestion. The per-clause results are aggregated into a report
//! with risk statistics.
//!
//! # Core Concepts
//!
//! - **Clause Segmentation**: Pattern-driven splitting of contract text into
//!   analyzable clauses, with a sentence-grouping fallback for unstructured
//!   documents
//! - **Analysis Pipeline**: Sequential per-clause LLM ladder where the risk
//!   verdict feeds the suggestion step
//! - **LLM Backends**: Pluggable AI providers (Ollama, OpenAI, Anthropic,
//!   Gemini, Grok, Groq) behind a common client trait
//!
//! # Example Usage
//!
//! ```ignore
//! use redline::config::RedlineConfig;
//! use redline::llm::select_llm_client;
//! use redline::pipeline::ContractAnalyzer;
//! use std::path::Path;
//!
//! async fn review(path: &Path) -> anyhow::Result<()> {
//!     let config = RedlineConfig::default();
//!     let selected = select_llm_client(&config).await?;
//!
//!     let analyzer = ContractAnalyzer::new(selected.client);
//!     let report = analyzer.analyze_file(path, None).await?;
//!
//!     println!(
//!         "{} of {} clauses flagged as risky",
//!         report.risky_clauses_count, report.total_clauses
//!     );
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`segmenter`]: Clause boundary detection and sentence grouping
//! - [`pipeline`]: Per-clause analysis ladder and report assembly
//! - [`loader`]: Contract file loading (PDF and plain text)
//! - [`llm`]: LLM client abstractions and backend selection
//!
//! # Features
//!
//! - Multi-backend LLM support with automatic selection
//! - Structure-aware clause segmentation with sentence fallback
//! - Per-clause failure isolation (one bad clause never sinks the report)
//! - Progress reporting hooks for long-running analyses

// Public modules
pub mod cli;
pub mod config;
pub mod llm;
pub mod loader;
pub mod pipeline;
pub mod progress;
pub mod segmenter;
pub mod util;

// Re-export key types for convenient access
pub use config::{ConfigError, RedlineConfig};
pub use llm::{BackendError, GenAIClient, LLMClient, MockLLMClient};
pub use loader::{load_contract, LoadError};
pub use pipeline::{ClauseAnalysis, ContractAnalyzer, ContractReport, PipelineError};
pub use progress::{LoggingHandler, NoOpHandler, ProgressEvent, ProgressHandler};
pub use segmenter::segment;
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
