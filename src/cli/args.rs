//! Command line argument parsing for the sarissa-analyze CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analyze::request::StageSpec;
use crate::error::{AnalysisError, Result};

/// sarissa-analyze - Run text through analysis pipelines
#[derive(Parser, Debug, Clone)]
#[command(name = "sarissa-analyze")]
#[command(about = "Show the tokens an analysis pipeline produces for some text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SarissaAnalyzeArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Global configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", env = "SARISSA_ANALYZE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SarissaAnalyzeArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze one or more texts
    Analyze(AnalyzeArgs),

    /// List the stages known to the registry
    Stages(StagesArgs),
}

/// Arguments for analyzing text
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Texts to analyze
    #[arg(value_name = "TEXT")]
    pub texts: Vec<String>,

    /// Read the whole request from a JSON file; other flags override it
    #[arg(short, long, value_name = "REQUEST_FILE")]
    pub request: Option<PathBuf>,

    /// Index settings file (JSON) providing analyzers, normalizers and mappings
    #[arg(short, long, value_name = "SETTINGS_FILE")]
    pub index_settings: Option<PathBuf>,

    /// Name under which the index settings are registered
    #[arg(long, default_value = "index")]
    pub index_name: String,

    /// Analyzer name
    #[arg(short, long)]
    pub analyzer: Option<String>,

    /// Normalizer name (requires index settings)
    #[arg(short, long)]
    pub normalizer: Option<String>,

    /// Field whose mapping selects the analyzer (requires index settings)
    #[arg(long)]
    pub field: Option<String>,

    /// Tokenizer name or JSON definition
    #[arg(short, long)]
    pub tokenizer: Option<String>,

    /// Char filter name or JSON definition (repeatable)
    #[arg(long = "char-filter")]
    pub char_filters: Vec<String>,

    /// Token filter name or JSON definition (repeatable)
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Report the output of every stage
    #[arg(short, long)]
    pub explain: bool,

    /// Token attributes to include in explain output (repeatable)
    #[arg(long = "attributes", value_delimiter = ',')]
    pub attributes: Vec<String>,

    /// Override the maximum number of tokens per token list
    #[arg(long)]
    pub max_token_count: Option<usize>,
}

/// Arguments for listing stages
#[derive(Parser, Debug, Clone)]
pub struct StagesArgs {
    /// Only list stages of this kind
    #[arg(short, long)]
    pub kind: Option<StageKindArg>,
}

/// Stage kinds accepted by `stages --kind`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageKindArg {
    Tokenizer,
    CharFilter,
    TokenFilter,
    Analyzer,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

/// Parse a stage given on the command line.
///
/// A value starting with `{` is an inline JSON definition, anything else a
/// stage name.
pub fn parse_stage_spec(value: &str) -> Result<StageSpec> {
    let trimmed = value.trim();
    if trimmed.starts_with('{') {
        serde_json::from_str(trimmed).map_err(|e| {
            AnalysisError::invalid_request(format!("invalid stage definition [{value}]: {e}"))
        })
    } else {
        Ok(StageSpec::from(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_command() {
        let args = SarissaAnalyzeArgs::try_parse_from([
            "sarissa-analyze",
            "analyze",
            "Hello World",
            "second",
            "--tokenizer",
            "whitespace",
            "--filter",
            "lowercase",
            "--filter",
            "stop",
            "--explain",
            "--attributes",
            "keyword,flags",
        ])
        .unwrap();

        if let Command::Analyze(analyze_args) = args.command {
            assert_eq!(analyze_args.texts, vec!["Hello World", "second"]);
            assert_eq!(analyze_args.tokenizer.as_deref(), Some("whitespace"));
            assert_eq!(analyze_args.filters, vec!["lowercase", "stop"]);
            assert!(analyze_args.explain);
            assert_eq!(analyze_args.attributes, vec!["keyword", "flags"]);
            assert_eq!(analyze_args.index_name, "index");
        } else {
            panic!("Expected Analyze command");
        }
    }

    #[test]
    fn test_stages_command() {
        let args =
            SarissaAnalyzeArgs::try_parse_from(["sarissa-analyze", "stages", "--kind", "token-filter"])
                .unwrap();

        if let Command::Stages(stages_args) = args.command {
            assert_eq!(stages_args.kind, Some(StageKindArg::TokenFilter));
        } else {
            panic!("Expected Stages command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = SarissaAnalyzeArgs::try_parse_from(["sarissa-analyze", "stages"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = SarissaAnalyzeArgs::try_parse_from(["sarissa-analyze", "-vv", "stages"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args =
            SarissaAnalyzeArgs::try_parse_from(["sarissa-analyze", "--quiet", "-vvv", "stages"])
                .unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            SarissaAnalyzeArgs::try_parse_from(["sarissa-analyze", "--format", "json", "stages"])
                .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_stage_spec() {
        assert_eq!(parse_stage_spec("lowercase").unwrap().name(), "lowercase");

        let spec = parse_stage_spec(r#"{"type": "stop", "stopwords": ["a"]}"#).unwrap();
        assert_eq!(spec.name(), "stop");
        assert!(spec.params().unwrap().contains_key("stopwords"));

        assert!(parse_stage_spec(r#"{"stopwords": ["a"]}"#).is_err());
    }
}
