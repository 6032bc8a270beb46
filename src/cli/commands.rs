//! Command implementations for the sarissa-analyze CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};

use log::{debug, info};

use crate::analyze::registry::BuiltinRegistry;
use crate::analyze::request::AnalyzeRequest;
use crate::analyze::service::AnalyzeService;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{AnalyzeConfig, IndexSettings};
use crate::error::{AnalysisError, Result};

/// Execute a CLI command.
pub fn execute_command(args: SarissaAnalyzeArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &args.command {
        Command::Analyze(analyze_args) => run_analyze(&mut out, analyze_args, &args),
        Command::Stages(stages_args) => list_stages(&mut out, stages_args, &args),
    }
}

/// Load the global configuration, applying a command line override.
fn load_config(
    cli_args: &SarissaAnalyzeArgs,
    max_token_count: Option<usize>,
) -> Result<AnalyzeConfig> {
    let mut config = match &cli_args.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            AnalyzeConfig::from_file(path)?
        }
        None => AnalyzeConfig::default(),
    };
    if let Some(max_token_count) = max_token_count {
        config.max_token_count = max_token_count;
    }
    config.validate()?;
    Ok(config)
}

/// Build the request from the request file and command line flags.
pub fn build_request(args: &AnalyzeArgs) -> Result<AnalyzeRequest> {
    let mut request = match &args.request {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            serde_json::from_reader(reader)?
        }
        None => AnalyzeRequest::default(),
    };

    if !args.texts.is_empty() {
        request.texts = args.texts.clone();
    }
    if args.index_settings.is_some() && request.index.is_none() {
        request.index = Some(args.index_name.clone());
    }
    if let Some(analyzer) = &args.analyzer {
        request.analyzer = Some(analyzer.clone());
    }
    if let Some(normalizer) = &args.normalizer {
        request.normalizer = Some(normalizer.clone());
    }
    if let Some(field) = &args.field {
        request.field = Some(field.clone());
    }
    if let Some(tokenizer) = &args.tokenizer {
        request.tokenizer = Some(parse_stage_spec(tokenizer)?);
    }
    if !args.char_filters.is_empty() {
        request.char_filters = args
            .char_filters
            .iter()
            .map(|s| parse_stage_spec(s))
            .collect::<Result<_>>()?;
    }
    if !args.filters.is_empty() {
        request.token_filters = args
            .filters
            .iter()
            .map(|s| parse_stage_spec(s))
            .collect::<Result<_>>()?;
    }
    if args.explain {
        request.explain = true;
    }
    if !args.attributes.is_empty() {
        request.attributes = args.attributes.clone();
    }

    Ok(request)
}

/// Analyze the given texts and print the tokens.
fn run_analyze<W: Write>(
    out: &mut W,
    args: &AnalyzeArgs,
    cli_args: &SarissaAnalyzeArgs,
) -> Result<()> {
    let config = load_config(cli_args, args.max_token_count)?;
    let service = AnalyzeService::with_builtins(config)?;

    let request = build_request(args)?;

    if let Some(path) = &args.index_settings {
        info!("loading index settings from {}", path.display());
        let settings = IndexSettings::from_file(path)?;
        let name = request
            .index
            .clone()
            .unwrap_or_else(|| args.index_name.clone());
        service.add_index(name, &settings)?;
    } else if let Some(index) = &request.index {
        return Err(AnalysisError::invalid_request(format!(
            "request names index [{index}] but no index settings were given"
        )));
    }

    debug!("request: {request:?}");
    let result = service.analyze(&request)?;
    output_analysis(out, &result, cli_args)
}

/// List the stages known to the built-in registry.
fn list_stages<W: Write>(
    out: &mut W,
    args: &StagesArgs,
    cli_args: &SarissaAnalyzeArgs,
) -> Result<()> {
    let listing = BuiltinRegistry::new()?.listing();

    let sections = [
        (StageKindArg::Tokenizer, "tokenizers", &listing.tokenizers),
        (StageKindArg::CharFilter, "char_filters", &listing.char_filters),
        (StageKindArg::TokenFilter, "token_filters", &listing.token_filters),
        (StageKindArg::Analyzer, "analyzers", &listing.analyzers),
    ];
    let selected = sections
        .iter()
        .filter(|(kind, _, _)| args.kind.is_none_or(|wanted| wanted == *kind));

    match cli_args.output_format {
        OutputFormat::Json => match args.kind {
            Some(_) => {
                let names: Vec<&String> = selected.flat_map(|(_, _, names)| names.iter()).collect();
                output_json(out, &names, cli_args)
            }
            None => output_json(out, &listing, cli_args),
        },
        OutputFormat::Human => {
            for (_, title, names) in selected {
                write_names(out, title, names)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::Parser;
    use tempfile::TempDir;

    use crate::analyze::request::StageSpec;

    fn parse(argv: &[&str]) -> (SarissaAnalyzeArgs, AnalyzeArgs) {
        let args = SarissaAnalyzeArgs::try_parse_from(argv).unwrap();
        let Command::Analyze(analyze_args) = args.command.clone() else {
            panic!("Expected Analyze command");
        };
        (args, analyze_args)
    }

    #[test]
    fn test_build_request_from_flags() {
        let (_, args) = parse(&[
            "sarissa-analyze",
            "analyze",
            "A b",
            "--tokenizer",
            "whitespace",
            "--filter",
            r#"{"type": "limit", "max_token_count": 1}"#,
        ]);
        let request = build_request(&args).unwrap();

        assert_eq!(request.texts, vec!["A b"]);
        assert_eq!(request.tokenizer, Some(StageSpec::from("whitespace")));
        assert_eq!(request.token_filters[0].name(), "limit");
        assert!(request.is_custom());
    }

    #[test]
    fn test_flags_override_request_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, r#"{"text": ["from file"], "analyzer": "keyword"}"#).unwrap();

        let (_, args) = parse(&[
            "sarissa-analyze",
            "analyze",
            "--request",
            path.to_str().unwrap(),
            "--analyzer",
            "whitespace",
        ]);
        let request = build_request(&args).unwrap();

        assert_eq!(request.texts, vec!["from file"]);
        assert_eq!(request.analyzer.as_deref(), Some("whitespace"));
    }

    #[test]
    fn test_run_analyze_with_index_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{
                "analysis": {
                    "analyzer": {
                        "my_analyzer": {"tokenizer": "whitespace", "filter": ["uppercase"]}
                    }
                }
            }"#,
        )
        .unwrap();

        let (cli_args, args) = parse(&[
            "sarissa-analyze",
            "--format",
            "json",
            "analyze",
            "quick fox",
            "--index-settings",
            path.to_str().unwrap(),
            "--analyzer",
            "my_analyzer",
        ]);

        let mut out = Vec::new();
        run_analyze(&mut out, &args, &cli_args).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["tokens"][0]["token"], "QUICK");
        assert_eq!(value["tokens"][1]["position"], 1);
    }

    #[test]
    fn test_run_analyze_max_token_count_override() {
        let (cli_args, args) = parse(&[
            "sarissa-analyze",
            "analyze",
            "a b c",
            "--analyzer",
            "whitespace",
            "--max-token-count",
            "2",
        ]);

        let mut out = Vec::new();
        assert!(matches!(
            run_analyze(&mut out, &args, &cli_args),
            Err(AnalysisError::TokenCountExceeded { .. })
        ));
    }

    #[test]
    fn test_list_stages() {
        let args = SarissaAnalyzeArgs::try_parse_from([
            "sarissa-analyze",
            "--format",
            "json",
            "stages",
            "--kind",
            "analyzer",
        ])
        .unwrap();
        let Command::Stages(stages_args) = &args.command else {
            panic!("Expected Stages command");
        };

        let mut out = Vec::new();
        list_stages(&mut out, stages_args, &args).unwrap();

        let names: Vec<String> = serde_json::from_slice(&out).unwrap();
        assert_eq!(names, vec!["keyword", "standard", "stop", "whitespace"]);
    }
}
