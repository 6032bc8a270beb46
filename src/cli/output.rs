//! Output formatting for CLI commands.

use std::io::Write;

use serde::Serialize;

use crate::analyze::response::{AnalysisResult, AnalyzeToken, AnalyzeTokenList, DetailResult};
use crate::cli::args::{OutputFormat, SarissaAnalyzeArgs};
use crate::error::Result;

/// Output an analysis result in the selected format.
pub fn output_analysis<W: Write>(
    out: &mut W,
    result: &AnalysisResult,
    args: &SarissaAnalyzeArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => match result {
            AnalysisResult::Simple(tokens) => write_tokens(out, tokens, ""),
            AnalysisResult::Detail(detail) => write_detail(out, detail),
        },
        OutputFormat::Json => output_json(out, result, args),
    }
}

/// Output any serializable value as JSON.
pub fn output_json<W: Write, T: Serialize>(
    out: &mut W,
    value: &T,
    args: &SarissaAnalyzeArgs,
) -> Result<()> {
    if args.pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Output a titled list of names in human format.
pub fn write_names<W: Write>(out: &mut W, title: &str, names: &[String]) -> Result<()> {
    writeln!(out, "{title}:")?;
    for name in names {
        writeln!(out, "  {name}")?;
    }
    Ok(())
}

fn write_detail<W: Write>(out: &mut W, detail: &DetailResult) -> Result<()> {
    if let Some(analyzer) = &detail.analyzer {
        write_list(out, "analyzer", analyzer)?;
    }

    for char_filter in &detail.char_filters {
        writeln!(out, "charfilter [{}]", char_filter.name)?;
        for (i, text) in char_filter.texts.iter().enumerate() {
            writeln!(out, "  [{i}] {text:?}")?;
        }
    }

    if let Some(tokenizer) = &detail.tokenizer {
        write_list(out, "tokenizer", tokenizer)?;
    }

    for filter in &detail.token_filters {
        write_list(out, "tokenfilter", filter)?;
    }
    Ok(())
}

fn write_list<W: Write>(out: &mut W, label: &str, list: &AnalyzeTokenList) -> Result<()> {
    writeln!(out, "{label} [{}]", list.name)?;
    write_tokens(out, &list.tokens, "  ")
}

fn write_tokens<W: Write>(out: &mut W, tokens: &[AnalyzeToken], indent: &str) -> Result<()> {
    for token in tokens {
        writeln!(out, "{indent}{}", format_token(token))?;
    }
    Ok(())
}

/// One line per token: position, term, offsets and type.
pub fn format_token(token: &AnalyzeToken) -> String {
    let mut line = format!(
        "{:>4}  {:?}  {}..{}  {}",
        token.position, token.term, token.start_offset, token.end_offset, token.token_type
    );
    if token.position_length != 1 {
        line.push_str(&format!("  positionLength={}", token.position_length));
    }
    if let Some(attributes) = &token.attributes {
        for (name, value) in attributes {
            let value = serde_json::to_string(value).unwrap_or_default();
            line.push_str(&format!("  {name}={value}"));
        }
    }
    line
}
