//! # scanpdf
//!
//! A CLI tool that turns security-scan summaries into PDF reports.
//!
//! ## Overview
//!
//! scanpdf is built on top of scanpdflib. It reads a scan summary (controls,
//! frameworks, resource counters and the overall risk score) as JSON and
//! writes a paginated report: branding header with the report date, the
//! framework score line, the control table and the resource totals.
//!
//! ## Usage
//!
//! ```bash
//! # Render results.json to report.pdf
//! scanpdf results.json
//!
//! # Choose the output name (".pdf" is appended when missing)
//! scanpdf render results.json -o cluster-posture
//!
//! # Highest-severity controls first
//! scanpdf results.json --sort severity
//!
//! # Read from stdin and preview in the terminal instead of writing a PDF
//! cat results.json | scanpdf preview -
//!
//! # Dump the composed document as JSON
//! scanpdf preview results.json --mode json
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).

mod pdf;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;
use outstanding::cli::{App, CommandContext, HandlerResult, Output, RunResult};
use outstanding::OutputMode;
use scanpdflib::{
    format_risk_score_line, load_summary, normalize_output_path, render_report, BrandingAsset,
    DocumentComposer, ImageFormat, LookupCriteria, ReportOptions, ScanPdfError, SortPolicy,
    SummaryDetails,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::pdf::PdfBackend;
use crate::render::{create_theme, preview_value, PREVIEW_TEMPLATE};

/// Name of the output mode flag outstanding adds to every command
const MODE_FLAG: &str = "mode";

/// Branding image shown in every report header
pub(crate) static LOGO: BrandingAsset =
    BrandingAsset::from_static(include_bytes!("../assets/logo.png"), ImageFormat::Png);

/// Arguments shared by every command that composes a report
fn report_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("input")
            .help("Scan summary JSON file ('-' reads stdin)")
            .required(true),
    )
    .arg(
        Arg::new("sort")
            .short('s')
            .long("sort")
            .value_parser(["lexical", "severity"])
            .default_value("lexical")
            .help("Control table ordering"),
    )
    .arg(
        Arg::new("by")
            .long("by")
            .value_parser(["id", "name"])
            .default_value("name")
            .help("Identify controls by id or by name"),
    )
}

fn render_args(cmd: Command) -> Command {
    report_args(cmd)
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file name (defaults to report.pdf)"),
        )
        .arg(
            Arg::new("no-logo")
                .long("no-logo")
                .action(ArgAction::SetTrue)
                .help("Leave the branding image out of the header"),
        )
}

/// Build the clap Command structure
fn build_command() -> Command {
    render_args(
        Command::new("scanpdf")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Render security-scan summaries as PDF reports")
            .args_conflicts_with_subcommands(true)
            .subcommand_negates_reqs(true),
    )
    .subcommand(render_args(
        Command::new("render").about("Write the report as a PDF (default command)"),
    ))
    .subcommand(report_args(
        Command::new("preview").about("Show the composed report in the terminal"),
    ))
}

/// Build report options from matches
fn report_options(matches: &ArgMatches) -> anyhow::Result<ReportOptions> {
    let mut options = ReportOptions::new();
    if let Some(sort) = matches.get_one::<String>("sort") {
        options = options.sort_policy(SortPolicy::from_str(sort).map_err(anyhow::Error::msg)?);
    }
    if let Some(by) = matches.get_one::<String>("by") {
        options = options.criteria(LookupCriteria::from_str(by).map_err(anyhow::Error::msg)?);
    }
    Ok(options)
}

fn load_input(matches: &ArgMatches) -> anyhow::Result<SummaryDetails> {
    let input = matches
        .get_one::<String>("input")
        .context("no scan summary given")?;
    Ok(load_summary(input)?)
}

/// Extract the output mode outstanding injects (`_output_mode`)
fn output_mode(matches: &ArgMatches) -> OutputMode {
    matches
        .try_get_one::<String>("_output_mode")
        .ok()
        .flatten()
        .map(|s| match s.as_str() {
            "json" => OutputMode::Json,
            "text" => OutputMode::Text,
            "term-debug" => OutputMode::TermDebug,
            "term" => OutputMode::Term,
            _ => OutputMode::Auto,
        })
        .unwrap_or(OutputMode::Auto)
}

/// Handler for render command
fn render_handler(matches: &ArgMatches, _ctx: &CommandContext) -> HandlerResult<()> {
    let summary = load_input(matches)?;
    let options = report_options(matches)?;
    let path = normalize_output_path(
        matches
            .get_one::<String>("output")
            .map(|s| s.as_str())
            .unwrap_or(""),
    );
    let logo = (!matches.get_flag("no-logo")).then_some(&LOGO);

    let data = render_report(&summary, &options, logo, &PdfBackend)?;

    eprintln!(
        "\n{}",
        Style::new().bold().apply_to(format_risk_score_line(summary.score))
    );
    Ok(Output::Binary {
        data,
        filename: path.to_string_lossy().into_owned(),
    })
}

/// Handler for preview command
fn preview_handler(
    matches: &ArgMatches,
    ctx: &CommandContext,
) -> HandlerResult<serde_json::Value> {
    let summary = load_input(matches)?;
    let options = report_options(matches)?;
    let document = DocumentComposer::new(&options).compose(&summary, Some(&LOGO));
    Ok(Output::Render(preview_value(&document, ctx.output_mode)?))
}

/// Write a finished report. Only called once the whole document exists.
fn write_report(data: &[u8], filename: &str) -> Result<PathBuf, ScanPdfError> {
    let path = PathBuf::from(filename);
    std::fs::write(&path, data).map_err(|source| ScanPdfError::OutputWrite {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), bytes = data.len(), "report written");
    Ok(path)
}

fn finish_binary(data: &[u8], filename: &str) -> ExitCode {
    match write_report(data, filename) {
        Ok(path) => {
            eprintln!("Report saved to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cmd = build_command();

    // Build the outstanding app with command handlers and run
    let result = App::builder()
        .theme(create_theme())
        .output_flag(Some(MODE_FLAG))
        .command("render", render_handler, "")
        .command("preview", preview_handler, PREVIEW_TEMPLATE)
        .run_to_string(cmd, std::env::args());

    match result {
        RunResult::Handled(output) => {
            // Handler failures come back as "Error: ...", clap usage errors as "error: ..."
            if output.starts_with("Error:") || output.starts_with("error:") {
                eprint!("{}", output.trim_end());
                eprintln!();
                return ExitCode::FAILURE;
            }
            print!("{}", output);
            ExitCode::SUCCESS
        }
        RunResult::Binary(data, filename) => finish_binary(&data, &filename),
        RunResult::NoMatch(matches) => {
            // No subcommand - treat as render
            let ctx = CommandContext {
                output_mode: output_mode(&matches),
                command_path: vec![],
            };
            match render_handler(&matches, &ctx) {
                Ok(Output::Binary { data, filename }) => finish_binary(&data, &filename),
                Ok(_) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
