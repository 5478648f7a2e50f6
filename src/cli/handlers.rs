//! Command handlers for the redline CLI
//!
//! Handlers return process exit codes instead of errors so `main` can stay a
//! thin dispatcher. User-facing messages go to stdout/stderr, diagnostics to
//! the tracing subscriber.

use genai::adapter::AdapterKind;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::commands::{AnalyzeArgs, HealthArgs, InteractiveArgs};
use super::output::{EnvVarInfo, HealthStatus, OutputFormat, OutputFormatter};
use crate::config::{self, RedlineConfig};
use crate::llm::{select_llm_client, GenAIClient, LLMClient};
use crate::pipeline::{ContractAnalyzer, ContractReport};
use crate::progress::{LoggingHandler, ProgressHandler};

pub async fn handle_analyze(args: &AnalyzeArgs, quiet: bool) -> i32 {
    info!("Starting contract analysis");

    let contract_path = &args.contract_path;
    debug!("Contract path: {}", contract_path.display());

    if !contract_path.exists() {
        error!("Contract file does not exist: {}", contract_path.display());
        return 1;
    }

    let config = merge_config(args.backend, args.model.clone(), args.timeout);
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your environment variables and command-line arguments.");
        return 1;
    }

    let client = match build_client(args.backend, &config).await {
        Some(client) => client,
        None => return 1,
    };

    let analyzer = ContractAnalyzer::new(client).with_max_clauses(config.max_clauses);
    let progress: Arc<dyn ProgressHandler> = Arc::new(LoggingHandler);

    let report = match analyzer.analyze_file(contract_path, Some(progress)).await {
        Ok(report) => report,
        Err(e) => {
            error!("Analysis failed: {}", e);
            return 1;
        }
    };

    let format: OutputFormat = args.format.into();
    let formatter = OutputFormatter::new(format);

    let output = match formatter.format(&report) {
        Ok(out) => out,
        Err(e) => {
            error!("Failed to format output: {}", e);
            return 1;
        }
    };

    if let Some(output_file) = &args.output {
        match fs::write(output_file, &output) {
            Ok(_) => {
                info!("Report written to: {}", output_file.display());
                if !quiet {
                    println!("Report written to: {}", output_file.display());
                }
            }
            Err(e) => {
                error!("Failed to write report to file: {}", e);
                return 1;
            }
        }
    } else {
        println!("{}", output);
    }

    0
}

pub async fn handle_interactive(args: &InteractiveArgs) -> i32 {
    let config = merge_config(args.backend, args.model.clone(), args.timeout);
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your environment variables and command-line arguments.");
        return 1;
    }

    let client = match build_client(args.backend, &config).await {
        Some(client) => client,
        None => return 1,
    };

    let analyzer = ContractAnalyzer::new(client).with_max_clauses(config.max_clauses);
    let progress: Arc<dyn ProgressHandler> = Arc::new(LoggingHandler);
    let formatter = OutputFormatter::new(OutputFormat::Human);

    println!("Contract Analyzer & Negotiation Advisor");
    println!("{}", "\u{2501}".repeat(42));

    loop {
        let line = match prompt("\nContract file path (PDF or text, 'quit' to exit): ") {
            Some(line) => line,
            // stdin closed
            None => break,
        };

        if matches!(line.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }

        if line.is_empty() {
            println!("Please provide a file path");
            continue;
        }

        let path = Path::new(&line);
        if !path.exists() {
            println!("File not found: {}", line);
            continue;
        }

        println!("\nAnalyzing contract: {}", line);
        println!("{}", "\u{2501}".repeat(42));

        let report = match analyzer.analyze_file(path, Some(progress.clone())).await {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Error analyzing contract: {}", e);
                eprintln!("Please check that the file is a valid PDF or text file.");
                continue;
            }
        };

        match formatter.format(&report) {
            Ok(out) => println!("\n{}", out),
            Err(e) => {
                error!("Failed to format report: {}", e);
                continue;
            }
        }

        if ask_yes_no("Save detailed report to JSON? (y/n): ") {
            let default_name = default_report_filename(path);
            let chosen = prompt(&format!("Output filename (default: {}): ", default_name))
                .unwrap_or_default();
            let output_file = if chosen.is_empty() { default_name } else { chosen };
            save_report(&report, Path::new(&output_file));
        }

        if !ask_yes_no("\nAnalyze another contract? (y/n): ") {
            break;
        }
    }

    println!("Goodbye!");
    0
}

pub async fn handle_health(args: &HealthArgs) -> i32 {
    info!("Checking backend health");

    let config = RedlineConfig::default();
    let mut health_results = HashMap::new();

    let providers_to_check: Vec<AdapterKind> = if let Some(provider) = args.backend {
        vec![provider]
    } else {
        vec![
            AdapterKind::Ollama,
            AdapterKind::OpenAI,
            AdapterKind::Anthropic,
            AdapterKind::Gemini,
            AdapterKind::Xai,
            AdapterKind::Groq,
        ]
    };

    for provider in providers_to_check {
        let provider_name = format!("{:?}", provider);
        debug!("Checking {} provider", provider_name);

        let status = match provider {
            AdapterKind::Ollama => check_ollama(&config).await,
            other => check_api_key(other),
        };

        health_results.insert(provider_name, status);
    }

    let env_vars = collect_env_var_info();

    let format: OutputFormat = args.format.into();
    let formatter = OutputFormatter::new(format);

    let output = match formatter.format_health(&health_results, &env_vars) {
        Ok(out) => out,
        Err(e) => {
            error!("Failed to format health output: {}", e);
            return 1;
        }
    };

    println!("{}", output);

    let all_available = health_results.values().all(|status| status.available);
    if all_available {
        0
    } else {
        1
    }
}

/// Merges command-line overrides into the environment-derived configuration.
/// An explicit `--backend` without `--model` must not inherit another
/// provider's default model.
fn merge_config(
    backend: Option<AdapterKind>,
    model: Option<String>,
    timeout_secs: u64,
) -> RedlineConfig {
    let default_config = RedlineConfig::default();
    let provider = backend.unwrap_or(default_config.provider);

    let model = model
        .or_else(|| env::var("REDLINE_MODEL").ok())
        .unwrap_or_else(|| config::default_model(provider));

    let config = RedlineConfig {
        provider,
        model,
        request_timeout_secs: timeout_secs,
        ..default_config
    };

    if backend.is_some() {
        debug!("Provider explicitly set to: {:?}", config.provider);
    }
    debug!("Model: {}", config.model);

    config
}

/// Resolves the LLM client: an explicitly requested backend, or auto-selection
/// across the configured provider and local Ollama. Prints setup hints and
/// returns `None` when nothing is usable.
async fn build_client(
    backend: Option<AdapterKind>,
    config: &RedlineConfig,
) -> Option<Arc<dyn LLMClient>> {
    if let Some(provider) = backend {
        debug!("Using explicitly specified backend: {:?}", provider);

        match GenAIClient::new(provider, config.model.clone(), config.request_timeout()).await {
            Ok(client) => {
                info!("Using backend: {} ({})", provider, config.model);
                Some(Arc::new(client) as Arc<dyn LLMClient>)
            }
            Err(e) => {
                error!("Failed to initialize backend: {}", e);
                eprintln!("\nPossible solutions:");
                match provider {
                    AdapterKind::Ollama => {
                        eprintln!("  - Ensure Ollama is running: ollama serve");
                        eprintln!("  - Check OLLAMA_HOST environment variable (default: http://localhost:11434)");
                        eprintln!(
                            "  - Try a different provider: --backend openai, --backend anthropic, etc."
                        );
                    }
                    AdapterKind::OpenAI => {
                        eprintln!("  - Set OPENAI_API_KEY environment variable");
                        eprintln!("  - Optionally set REDLINE_API_BASE_URL for custom endpoints (e.g., Azure OpenAI)");
                    }
                    AdapterKind::Anthropic => {
                        eprintln!("  - Set ANTHROPIC_API_KEY environment variable");
                    }
                    AdapterKind::Gemini => {
                        eprintln!("  - Set GEMINI_API_KEY environment variable");
                    }
                    AdapterKind::Xai => {
                        eprintln!("  - Set XAI_API_KEY environment variable");
                    }
                    AdapterKind::Groq => {
                        eprintln!("  - Set GROQ_API_KEY environment variable");
                    }
                    _ => {
                        eprintln!("  - Check provider-specific environment variables");
                        eprintln!("  - Refer to provider documentation for setup instructions");
                    }
                }
                eprintln!("  - Run 'redline health' to check backend availability");
                eprintln!("  - Or omit --backend to automatically select an available backend");
                None
            }
        }
    } else {
        match select_llm_client(config).await {
            Ok(selected) => {
                info!("Using backend: {}", selected.description);
                Some(selected.client)
            }
            Err(e) => {
                error!("No LLM backend available: {}", e);
                eprintln!("\n{}", e);
                eprintln!("\nRun 'redline health' to check backend availability.");
                None
            }
        }
    }
}

async fn check_ollama(config: &RedlineConfig) -> HealthStatus {
    let ollama_host =
        env::var("OLLAMA_HOST").unwrap_or_else(|_| "http://localhost:11434".to_string());
    let url = format!("{}/api/tags", ollama_host);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());

    let model = if config.provider == AdapterKind::Ollama {
        config.model.clone()
    } else {
        config::default_model(AdapterKind::Ollama)
    };

    match client.get(&url).send().await {
        Ok(response) if response.status().is_success() => {
            info!("Ollama is available at {}", ollama_host);
            HealthStatus::available(format!("Connected to {}", ollama_host))
                .with_details(format!("Model: {}", model))
        }
        _ => {
            warn!("Ollama is not available at {}", ollama_host);
            HealthStatus::unavailable(format!("Cannot connect to {}", ollama_host))
                .with_details("Ensure Ollama is running: ollama serve".to_string())
        }
    }
}

fn check_api_key(provider: AdapterKind) -> HealthStatus {
    match provider.default_key_env_name() {
        Some(key_name) => match env::var(key_name) {
            Ok(_) => {
                info!("{} API key is configured", provider);
                HealthStatus::available("API key is configured".to_string())
            }
            Err(_) => {
                warn!("{} API key is not configured", provider);
                HealthStatus::unavailable("API key not configured".to_string())
                    .with_details(format!("Set {} environment variable", key_name))
            }
        },
        None => HealthStatus::unavailable(format!(
            "Provider {:?} is not supported by redline",
            provider
        )),
    }
}

fn mask_api_key(value: &str) -> String {
    if value.len() <= 8 {
        "*".repeat(value.len())
    } else {
        format!("{}...{}", &value[..4], &value[value.len() - 4..])
    }
}

fn collect_env_var_info() -> HashMap<String, Vec<EnvVarInfo>> {
    let mut env_vars = HashMap::new();

    let ollama_host = env::var("OLLAMA_HOST");
    env_vars.insert(
        "Ollama".to_string(),
        vec![EnvVarInfo {
            name: "OLLAMA_HOST".to_string(),
            value: Some(
                ollama_host.unwrap_or_else(|_| "http://localhost:11434 (default)".to_string()),
            ),
            default: Some("http://localhost:11434".to_string()),
            required: false,
            description: "Ollama server endpoint".to_string(),
        }],
    );

    for provider in [
        AdapterKind::OpenAI,
        AdapterKind::Anthropic,
        AdapterKind::Gemini,
        AdapterKind::Xai,
        AdapterKind::Groq,
    ] {
        let key_name = match provider.default_key_env_name() {
            Some(name) => name,
            None => continue,
        };

        env_vars.insert(
            format!("{:?}", provider),
            vec![EnvVarInfo {
                name: key_name.to_string(),
                value: env::var(key_name).ok().map(|k| mask_api_key(&k)),
                default: None,
                required: true,
                description: format!("{} API key for authentication", provider),
            }],
        );
    }

    env_vars.insert(
        "Redline".to_string(),
        vec![
            EnvVarInfo {
                name: "REDLINE_PROVIDER".to_string(),
                value: Some(
                    env::var("REDLINE_PROVIDER").unwrap_or_else(|_| "openai (default)".to_string()),
                ),
                default: Some("openai".to_string()),
                required: false,
                description: "Preferred LLM provider".to_string(),
            },
            EnvVarInfo {
                name: "REDLINE_MODEL".to_string(),
                value: env::var("REDLINE_MODEL").ok(),
                default: None,
                required: false,
                description: "Model override (defaults are provider-specific)".to_string(),
            },
            EnvVarInfo {
                name: "REDLINE_REQUEST_TIMEOUT".to_string(),
                value: Some(
                    env::var("REDLINE_REQUEST_TIMEOUT")
                        .unwrap_or_else(|_| "120 (default)".to_string()),
                ),
                default: Some("120".to_string()),
                required: false,
                description: "LLM request timeout in seconds".to_string(),
            },
            EnvVarInfo {
                name: "REDLINE_MAX_CLAUSES".to_string(),
                value: Some(
                    env::var("REDLINE_MAX_CLAUSES").unwrap_or_else(|_| "0 (default)".to_string()),
                ),
                default: Some("0".to_string()),
                required: false,
                description: "Cap on analyzed clauses per contract (0 = unlimited)".to_string(),
            },
            EnvVarInfo {
                name: "REDLINE_LOG_LEVEL".to_string(),
                value: Some(
                    env::var("REDLINE_LOG_LEVEL").unwrap_or_else(|_| "info (default)".to_string()),
                ),
                default: Some("info".to_string()),
                required: false,
                description: "Logging level (trace, debug, info, warn, error)".to_string(),
            },
            EnvVarInfo {
                name: "REDLINE_API_BASE_URL".to_string(),
                value: env::var("REDLINE_API_BASE_URL").ok(),
                default: None,
                required: false,
                description: "Custom API endpoint (e.g., for Azure OpenAI)".to_string(),
            },
        ],
    );

    env_vars
}

fn default_report_filename(contract_path: &Path) -> String {
    let stem = contract_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("contract");
    format!("contract_analysis_{}.json", stem)
}

fn save_report(report: &ContractReport, path: &Path) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => match fs::write(path, json) {
            Ok(_) => println!("Report saved to: {}", path.display()),
            Err(e) => eprintln!("Error saving report: {}", e),
        },
        Err(e) => eprintln!("Error saving report: {}", e),
    }
}

fn prompt(message: &str) -> Option<String> {
    print!("{}", message);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

fn ask_yes_no(message: &str) -> bool {
    match prompt(message) {
        Some(answer) => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_api_key_short() {
        assert_eq!(mask_api_key("abc"), "***");
        assert_eq!(mask_api_key("12345678"), "********");
    }

    #[test]
    fn test_mask_api_key_long() {
        assert_eq!(mask_api_key("sk-1234567890abcdef"), "sk-1...cdef");
    }

    #[test]
    fn test_default_report_filename() {
        assert_eq!(
            default_report_filename(Path::new("contracts/nda.pdf")),
            "contract_analysis_nda.json"
        );
        assert_eq!(
            default_report_filename(Path::new("service_agreement.txt")),
            "contract_analysis_service_agreement.json"
        );
    }

    #[test]
    fn test_default_report_filename_without_stem() {
        assert_eq!(
            default_report_filename(Path::new("..")),
            "contract_analysis_contract.json"
        );
    }

    #[test]
    fn test_collect_env_var_info_covers_all_groups() {
        let env_vars = collect_env_var_info();

        assert!(env_vars.contains_key("Ollama"));
        assert!(env_vars.contains_key("OpenAI"));
        assert!(env_vars.contains_key("Anthropic"));
        assert!(env_vars.contains_key("Redline"));

        let redline_vars = &env_vars["Redline"];
        assert!(redline_vars.iter().any(|v| v.name == "REDLINE_PROVIDER"));
        assert!(redline_vars.iter().any(|v| v.name == "REDLINE_MAX_CLAUSES"));
    }
}
