use clap::{Parser, Subcommand, ValueEnum};
use genai::adapter::AdapterKind;
use std::path::PathBuf;

/// AI-assisted contract review: clause segmentation, risk analysis, and negotiation suggestions
#[derive(Parser, Debug)]
#[command(
    name = "redline",
    about = "AI-assisted contract review: clause segmentation, risk analysis, and negotiation suggestions",
    version,
    author,
    long_about = "redline splits a contract into clauses and runs each clause through an LLM \
                  ladder that summarizes it in plain English, flags risky language, and drafts \
                  negotiation suggestions. It supports multiple AI backends (Ollama, OpenAI, \
                  Anthropic, Gemini, Grok, Groq) and output formats."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Verbose output - show per-clause progress"
    )]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Analyze a contract file and print the report",
        long_about = "Loads a contract (PDF or plain text), splits it into clauses, and runs \
                      the three-step analysis (summary, risk, suggestion) on each clause.\n\n\
                      Examples:\n  \
                      redline analyze contract.pdf\n  \
                      redline analyze nda.txt --format json -o report.json\n  \
                      redline analyze contract.pdf --backend ollama --model llama3.2"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Review contracts in an interactive session",
        long_about = "Starts a prompt loop that analyzes one contract after another and \
                      offers to save each report as JSON. Type 'quit' to leave.\n\n\
                      Examples:\n  \
                      redline interactive\n  \
                      redline interactive --backend ollama"
    )]
    Interactive(InteractiveArgs),

    #[command(
        about = "Check backend availability",
        long_about = "Checks the availability and health of configured AI backends.\n\n\
                      Examples:\n  \
                      redline health\n  \
                      redline health --backend ollama"
    )]
    Health(HealthArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(value_name = "FILE", help = "Path to the contract file (PDF or plain text)")]
    pub contract_path: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'b',
        long,
        value_parser = parse_adapter_kind,
        help = "Force a specific AI backend provider (by default, the best available is auto-selected)"
    )]
    pub backend: Option<AdapterKind>,

    #[arg(
        short = 'm',
        long,
        value_name = "MODEL",
        help = "Model name to use (provider-specific, e.g., 'llama3.2' for Ollama)"
    )]
    pub model: Option<String>,

    #[arg(
        long,
        value_name = "SECONDS",
        default_value = "120",
        help = "Request timeout in seconds"
    )]
    pub timeout: u64,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write the report to a file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct InteractiveArgs {
    #[arg(
        short = 'b',
        long,
        value_parser = parse_adapter_kind,
        help = "Force a specific AI backend provider (by default, the best available is auto-selected)"
    )]
    pub backend: Option<AdapterKind>,

    #[arg(
        short = 'm',
        long,
        value_name = "MODEL",
        help = "Model name to use (provider-specific, e.g., 'llama3.2' for Ollama)"
    )]
    pub model: Option<String>,

    #[arg(
        long,
        value_name = "SECONDS",
        default_value = "120",
        help = "Request timeout in seconds"
    )]
    pub timeout: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct HealthArgs {
    #[arg(
        short = 'b',
        long,
        value_parser = parse_adapter_kind,
        help = "Specific backend to check (omit to check all)"
    )]
    pub backend: Option<AdapterKind>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

fn parse_adapter_kind(s: &str) -> Result<AdapterKind, String> {
    crate::config::parse_provider(s).ok_or_else(|| {
        format!(
            "Invalid provider: {}. Valid options: ollama, openai, anthropic, gemini, xai, groq",
            s
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        // Verify that CLI structure is valid
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_analyze_args() {
        let args = CliArgs::parse_from(&["redline", "analyze", "contract.pdf"]);
        match args.command {
            Commands::Analyze(analyze_args) => {
                assert_eq!(analyze_args.contract_path, PathBuf::from("contract.pdf"));
                assert_eq!(analyze_args.format, OutputFormatArg::Human);
                assert!(analyze_args.backend.is_none()); // Auto-selection by default
                assert_eq!(analyze_args.timeout, 120);
                assert!(analyze_args.output.is_none());
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_with_options() {
        let args = CliArgs::parse_from(&[
            "redline",
            "analyze",
            "nda.txt",
            "--format",
            "json",
            "--backend",
            "ollama",
            "--model",
            "llama3.2",
            "--timeout",
            "300",
            "--output",
            "report.json",
        ]);

        match args.command {
            Commands::Analyze(analyze_args) => {
                assert_eq!(analyze_args.format, OutputFormatArg::Json);
                assert_eq!(analyze_args.backend, Some(AdapterKind::Ollama));
                assert_eq!(analyze_args.model, Some("llama3.2".to_string()));
                assert_eq!(analyze_args.timeout, 300);
                assert_eq!(analyze_args.output, Some(PathBuf::from("report.json")));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_requires_contract_path() {
        let result = CliArgs::try_parse_from(&["redline", "analyze"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_interactive_command() {
        let args = CliArgs::parse_from(&["redline", "interactive"]);
        match args.command {
            Commands::Interactive(interactive_args) => {
                assert!(interactive_args.backend.is_none());
                assert!(interactive_args.model.is_none());
                assert_eq!(interactive_args.timeout, 120);
            }
            _ => panic!("Expected Interactive command"),
        }
    }

    #[test]
    fn test_health_command() {
        let args = CliArgs::parse_from(&["redline", "health"]);
        match args.command {
            Commands::Health(health_args) => {
                assert!(health_args.backend.is_none());
                assert_eq!(health_args.format, OutputFormatArg::Human);
            }
            _ => panic!("Expected Health command"),
        }
    }

    #[test]
    fn test_health_with_backend() {
        let args = CliArgs::parse_from(&["redline", "health", "--backend", "anthropic"]);
        match args.command {
            Commands::Health(health_args) => {
                assert_eq!(health_args.backend, Some(AdapterKind::Anthropic));
            }
            _ => panic!("Expected Health command"),
        }
    }

    #[test]
    fn test_global_verbose_flag() {
        let args = CliArgs::parse_from(&["redline", "-v", "interactive"]);
        assert!(args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_global_quiet_flag() {
        let args = CliArgs::parse_from(&["redline", "-q", "analyze", "contract.pdf"]);
        assert!(!args.verbose);
        assert!(args.quiet);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = CliArgs::try_parse_from(&["redline", "-v", "-q", "interactive"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level_flag() {
        let args = CliArgs::parse_from(&["redline", "--log-level", "debug", "interactive"]);
        assert_eq!(args.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_adapter_kind_parsing() {
        assert!(parse_adapter_kind("ollama").is_ok());
        assert!(parse_adapter_kind("openai").is_ok());
        assert!(parse_adapter_kind("anthropic").is_ok());
        assert!(parse_adapter_kind("claude").is_ok());
        assert!(parse_adapter_kind("gemini").is_ok());
        assert!(parse_adapter_kind("xai").is_ok());
        assert!(parse_adapter_kind("groq").is_ok());
        assert!(parse_adapter_kind("invalid").is_err());
    }
}
