//! LLM client abstraction layer
//!
//! This module provides a trait-based abstraction for LLM communication,
//! allowing different backends (GenAI, Mock) to be used interchangeably.

mod client;
mod error;
mod genai;
mod mock;
mod selector;
mod types;

pub use client::LLMClient;
pub use error::BackendError;
pub use genai::GenAIClient;
pub use mock::{MockLLMClient, MockResponse};
pub use selector::{is_ollama_available, select_llm_client, SelectedClient};
pub use types::{ChatMessage, LLMRequest, LLMResponse, MessageRole};
