//! Output formatting for analysis reports
//!
//! This module provides formatters for different output formats including JSON, YAML,
//! and human-readable text. Each formatter implements consistent styling and structure.
//!
//! # Example
//!
//! ```ignore
//! use redline::cli::output::{OutputFormat, OutputFormatter};
//! use redline::pipeline::ContractReport;
//!
//! let report = ContractReport::from_analyses(vec![/* ... */]);
//! let formatter = OutputFormatter::new(OutputFormat::Json);
//! let output = formatter.format(&report)?;
//! println!("{}", output);
//! ```

use anyhow::{Context, Result};
use std::collections::HashMap;

use crate::pipeline::ContractReport;

/// Characters of the original clause text shown in human-readable output
const CLAUSE_PREVIEW_CHARS: usize = 200;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Output formatter for contract reports
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Creates a new output formatter with the specified format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a contract report according to the configured format
    pub fn format(&self, report: &ContractReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_json(report),
            OutputFormat::Yaml => self.format_yaml(report),
            OutputFormat::Human => self.format_human(report),
        }
    }

    /// Formats health check results with environment variable information
    pub fn format_health(
        &self,
        health_results: &HashMap<String, HealthStatus>,
        env_vars: &HashMap<String, Vec<EnvVarInfo>>,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_health_json(health_results, env_vars),
            OutputFormat::Yaml => self.format_health_yaml(health_results, env_vars),
            OutputFormat::Human => self.format_health_human(health_results, env_vars),
        }
    }

    // JSON formatting methods

    fn format_json(&self, report: &ContractReport) -> Result<String> {
        serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
    }

    fn format_health_json(
        &self,
        health_results: &HashMap<String, HealthStatus>,
        env_vars: &HashMap<String, Vec<EnvVarInfo>>,
    ) -> Result<String> {
        let output = serde_json::json!({
            "health_status": health_results,
            "environment_variables": env_vars,
        });
        serde_json::to_string_pretty(&output).context("Failed to serialize health status to JSON")
    }

    // YAML formatting methods

    fn format_yaml(&self, report: &ContractReport) -> Result<String> {
        serde_yaml::to_string(report).context("Failed to serialize report to YAML")
    }

    fn format_health_yaml(
        &self,
        health_results: &HashMap<String, HealthStatus>,
        env_vars: &HashMap<String, Vec<EnvVarInfo>>,
    ) -> Result<String> {
        let output = serde_json::json!({
            "health_status": health_results,
            "environment_variables": env_vars,
        });
        serde_yaml::to_string(&output).context("Failed to serialize health status to YAML")
    }

    // Human-readable formatting methods

    fn format_human(&self, report: &ContractReport) -> Result<String> {
        let mut output = String::new();

        // Header with check mark or warning
        if report.risky_clauses_count == 0 {
            output.push_str("\u{2713} Contract Analysis Report\n");
        } else {
            output.push_str("\u{26A0} Contract Analysis Report\n");
        }
        output.push_str(&rule());
        output.push_str("\n\n");

        for (i, analysis) in report.clauses.iter().enumerate() {
            output.push_str(&format!("Clause {} of {}\n", i + 1, report.total_clauses));
            output.push_str(&format!(
                "\u{251C}\u{2500} Original:   {}\n",
                clause_preview(&analysis.clause)
            ));
            output.push_str(&format!(
                "\u{251C}\u{2500} Summary:    {}\n",
                analysis.summary
            ));
            if analysis.is_risky {
                output.push_str(&format!(
                    "\u{251C}\u{2500} Risk:       \u{26A0} {}\n",
                    analysis.risk_reason
                ));
            } else {
                output.push_str(&format!(
                    "\u{251C}\u{2500} Risk:       \u{2713} {}\n",
                    analysis.risk_reason
                ));
            }
            if analysis.has_suggestion() {
                output.push_str(&format!(
                    "\u{2514}\u{2500} Suggestion: {}\n",
                    analysis.suggestion
                ));
            } else {
                output.push_str("\u{2514}\u{2500} Suggestion: (none)\n");
            }
            output.push('\n');
        }

        output.push_str("Summary:\n");
        output.push_str(&format!(
            "\u{251C}\u{2500} Total Clauses:        {}\n",
            report.total_clauses
        ));
        output.push_str(&format!(
            "\u{251C}\u{2500} Risky Clauses:        {}\n",
            report.risky_clauses_count
        ));
        output.push_str(&format!(
            "\u{2514}\u{2500} Suggestions Provided: {}\n",
            report.suggestions_count
        ));

        match report.risk_percentage() {
            Some(percentage) => output.push_str(&format!(
                "\n\u{26A0} Risk Level: {:.1}% of clauses flagged as risky\n",
                percentage
            )),
            None => output.push_str("\n\u{2713} Risk Level: No risky clauses detected\n"),
        }

        Ok(output)
    }

    fn format_health_human(
        &self,
        health_results: &HashMap<String, HealthStatus>,
        env_vars: &HashMap<String, Vec<EnvVarInfo>>,
    ) -> Result<String> {
        let mut output = String::new();

        output.push_str("Backend Health Status\n");
        output.push_str(&rule());
        output.push_str("\n\n");

        // Sort backends for consistent output
        let mut backends: Vec<_> = health_results.keys().collect();
        backends.sort();

        for backend in backends {
            if let Some(status) = health_results.get(backend) {
                let status_symbol = if status.available {
                    "\u{2713}"
                } else {
                    "\u{2717}"
                };

                output.push_str(&format!("{} {}\n", status_symbol, backend));
                output.push_str(&format!(
                    "  Status: {}\n",
                    if status.available {
                        "Available"
                    } else {
                        "Unavailable"
                    }
                ));
                output.push_str(&format!("  Message: {}\n", status.message));

                if let Some(ref details) = status.details {
                    output.push_str(&format!("  Details: {}\n", details));
                }
                output.push('\n');
            }
        }

        output.push_str("Environment Variables\n");
        output.push_str(&rule());
        output.push_str("\n\n");

        let mut groups: Vec<_> = env_vars.keys().collect();
        groups.sort();

        for group in groups {
            if let Some(vars) = env_vars.get(group) {
                output.push_str(&format!("{}:\n", group));
                for var in vars {
                    let required_marker = if var.required { "*" } else { " " };
                    output.push_str(&format!("  {} {}\n", required_marker, var.name));

                    // Show current value
                    if let Some(ref value) = var.value {
                        output.push_str(&format!("    Current: {}\n", value));
                    } else {
                        output.push_str("    Current: not set\n");
                    }

                    // Show default if available
                    if let Some(ref default) = var.default {
                        output.push_str(&format!("    Default: {}\n", default));
                    }

                    // Show description
                    output.push_str(&format!("    Info: {}\n", var.description));
                }
                output.push('\n');
            }
        }

        output.push_str("* = required\n");

        Ok(output)
    }
}

fn rule() -> String {
    "\u{2501}".repeat(42)
}

/// Cuts a clause down to a one-line preview. Counted in characters so
/// multi-byte text never splits mid-character.
fn clause_preview(clause: &str) -> String {
    let flat = clause.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > CLAUSE_PREVIEW_CHARS {
        let preview: String = flat.chars().take(CLAUSE_PREVIEW_CHARS).collect();
        format!("{}...", preview)
    } else {
        flat
    }
}

/// Health status for a backend
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthStatus {
    /// Whether the backend is available
    pub available: bool,
    /// Status message
    pub message: String,
    /// Optional additional details
    pub details: Option<String>,
}

impl HealthStatus {
    /// Creates a new health status indicating availability
    pub fn available(message: String) -> Self {
        Self {
            available: true,
            message,
            details: None,
        }
    }

    /// Creates a new health status indicating unavailability
    pub fn unavailable(message: String) -> Self {
        Self {
            available: false,
            message,
            details: None,
        }
    }

    /// Adds additional details to the health status
    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

/// Environment variable information
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EnvVarInfo {
    /// Variable name
    pub name: String,
    /// Current value (masked for secrets)
    pub value: Option<String>,
    /// Default value if not set
    pub default: Option<String>,
    /// Whether this is a required variable
    pub required: bool,
    /// Description of what this variable does
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ClauseAnalysis;

    fn create_test_report() -> ContractReport {
        ContractReport::from_analyses(vec![
            ClauseAnalysis::new(
                "1. The Client shall pay all invoices within 30 days of receipt.".to_string(),
                "Payment is due within 30 days.".to_string(),
                false,
                "Standard payment terms".to_string(),
                "None".to_string(),
            ),
            ClauseAnalysis::new(
                "2. The Supplier accepts unlimited liability for all damages.".to_string(),
                "The supplier is liable without any cap.".to_string(),
                true,
                "Uncapped liability exposure".to_string(),
                "Negotiate a liability cap tied to fees paid.".to_string(),
            ),
        ])
    }

    #[test]
    fn test_json_format() {
        let report = create_test_report();
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format(&report).unwrap();

        assert!(output.contains("total_clauses"));
        assert!(output.contains("Uncapped liability exposure"));

        // Verify it's valid JSON and round-trips
        let parsed: ContractReport = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.total_clauses, 2);
        assert_eq!(parsed.risky_clauses_count, 1);
        assert_eq!(parsed.suggestions_count, 1);
    }

    #[test]
    fn test_yaml_format() {
        let report = create_test_report();
        let formatter = OutputFormatter::new(OutputFormat::Yaml);
        let output = formatter.format(&report).unwrap();

        assert!(output.contains("total_clauses"));
        assert!(output.contains("Uncapped liability exposure"));

        // Verify it's valid YAML
        let parsed: ContractReport = serde_yaml::from_str(&output).unwrap();
        assert_eq!(parsed.total_clauses, 2);
    }

    #[test]
    fn test_human_format() {
        let report = create_test_report();
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format(&report).unwrap();

        assert!(output.contains("Contract Analysis Report"));
        assert!(output.contains("Clause 1 of 2"));
        assert!(output.contains("Clause 2 of 2"));
        assert!(output.contains("Payment is due within 30 days."));
        assert!(output.contains("Uncapped liability exposure"));
        assert!(output.contains("Negotiate a liability cap tied to fees paid."));
        assert!(output.contains("Total Clauses:        2"));
        assert!(output.contains("Risky Clauses:        1"));
        assert!(output.contains("Suggestions Provided: 1"));
        assert!(output.contains("50.0% of clauses flagged as risky"));
    }

    #[test]
    fn test_human_format_no_risky_clauses() {
        let report = ContractReport::from_analyses(vec![ClauseAnalysis::new(
            "1. Notices shall be sent by registered mail.".to_string(),
            "Notices go by registered mail.".to_string(),
            false,
            "Routine notice clause".to_string(),
            "None".to_string(),
        )]);

        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format(&report).unwrap();

        assert!(output.contains("No risky clauses detected"));
        assert!(output.contains("Suggestion: (none)"));
        assert!(!output.contains("flagged as risky"));
    }

    #[test]
    fn test_clause_preview_truncates_long_clauses() {
        let long = "indemnification ".repeat(40);
        let preview = clause_preview(&long);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), CLAUSE_PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_clause_preview_flattens_whitespace() {
        let preview = clause_preview("Short clause\n  spread over\tlines.");
        assert_eq!(preview, "Short clause spread over lines.");
    }

    #[test]
    fn test_health_status_creation() {
        let status = HealthStatus::available("Ollama is running".to_string());
        assert!(status.available);
        assert_eq!(status.message, "Ollama is running");

        let status = HealthStatus::unavailable("Cannot connect".to_string())
            .with_details("Connection refused on localhost:11434".to_string());
        assert!(!status.available);
        assert!(status.details.is_some());
    }

    #[test]
    fn test_health_format_human() {
        let mut health_results = HashMap::new();
        health_results.insert(
            "Ollama".to_string(),
            HealthStatus::available("Connected successfully".to_string()),
        );
        health_results.insert(
            "OpenAI".to_string(),
            HealthStatus::unavailable("API key not configured".to_string()),
        );

        let mut env_vars = HashMap::new();
        env_vars.insert(
            "OpenAI".to_string(),
            vec![EnvVarInfo {
                name: "OPENAI_API_KEY".to_string(),
                value: None,
                default: None,
                required: true,
                description: "OpenAI API key for authentication".to_string(),
            }],
        );

        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format_health(&health_results, &env_vars).unwrap();

        assert!(output.contains("Backend Health Status"));
        assert!(output.contains("Ollama"));
        assert!(output.contains("OpenAI"));
        assert!(output.contains("Available"));
        assert!(output.contains("Unavailable"));
        assert!(output.contains("Environment Variables"));
        assert!(output.contains("OPENAI_API_KEY"));
        assert!(output.contains("Current: not set"));
        assert!(output.contains("* = required"));
    }

    #[test]
    fn test_health_format_json() {
        let mut health_results = HashMap::new();
        health_results.insert(
            "Ollama".to_string(),
            HealthStatus::available("Connected".to_string()),
        );
        let env_vars = HashMap::new();

        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format_health(&health_results, &env_vars).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed.get("health_status").is_some());
        assert!(parsed.get("environment_variables").is_some());
        assert_eq!(parsed["health_status"]["Ollama"]["available"], true);
    }
}
