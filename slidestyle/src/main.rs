//! # slidestyle
//!
//! A CLI tool for applying conditional formatting rules and color palettes
//! to report tables.
//!
//! ## Overview
//!
//! slidestyle is built on top of slidestylelib. It reads a job file (a
//! table plus an ordered list of rules), computes the attributes of every
//! styled cell, and prints them either as a readable table or as JSON for
//! a slide renderer to consume. It also exposes the color tools directly.
//!
//! ## Usage
//!
//! ```bash
//! # Apply the rules of a job file, skipping a header row
//! slidestyle apply job.json --start-row 1
//!
//! # Styled cells as JSON
//! slidestyle apply job.json --output json
//!
//! # Five colors around a base
//! slidestyle palette 4472C4 --count 5 --mode analogous
//!
//! # Seven steps from red through yellow to green
//! slidestyle scale F8696B 63BE7B --mid FFEB84 --steps 7
//!
//! # Hex, RGB and HSL readings of a color
//! slidestyle convert "#63BE7B"
//!
//! # Built-in schemes
//! slidestyle scheme
//! slidestyle scheme financial
//! ```
//!
//! ## Job file
//!
//! ```json
//! {
//!   "table": {"columns": [
//!     {"name": "region", "type": "text", "values": ["North", "South"]},
//!     {"name": "profit", "type": "currency", "values": [300000, 500000]}
//!   ]},
//!   "rules": [{"type": "color_scale", "column": "profit"}],
//!   "start_row": 0,
//!   "number_format": {"dollars": {"scaling": "K"}}
//! }
//! ```

mod render;

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use outstanding::cli::{App, CommandContext, HandlerResult, Output, RunResult};
use outstanding::Theme;
use serde::Deserialize;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use slidestylelib::{
    apply, generate, scheme, scheme_names, Color, ColorScale, NumberFormats, PaletteMode, Rule,
    Table,
};

use render::{
    apply_context, ConvertContext, PaletteContext, ScaleContext, SchemeContext, SchemeEntry,
};

/// Include templates at compile time
const APPLY_TEMPLATE: &str = include_str!("../templates/apply.jinja");
const PALETTE_TEMPLATE: &str = include_str!("../templates/palette.jinja");
const SCALE_TEMPLATE: &str = include_str!("../templates/scale.jinja");
const CONVERT_TEMPLATE: &str = include_str!("../templates/convert.jinja");
const SCHEME_TEMPLATE: &str = include_str!("../templates/scheme.jinja");

/// Contents of a job file
#[derive(Debug, Deserialize)]
struct Job {
    table: Table,
    /// Rule specifications, checked one by one so errors keep their kind
    #[serde(default)]
    rules: Vec<serde_json::Value>,
    #[serde(default)]
    start_row: Option<usize>,
    #[serde(default)]
    number_format: NumberFormats,
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("slidestyle")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Conditional formatting and color palettes for report tables")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Log progress to stderr (-v debug, -vv trace)"),
        )
        .subcommand(
            Command::new("apply")
                .about("Apply the rules of a job file to its table")
                .arg(
                    Arg::new("job")
                        .required(true)
                        .help("Job file: JSON with table, rules and options"),
                )
                .arg(
                    Arg::new("start-row")
                        .short('s')
                        .long("start-row")
                        .value_parser(clap::value_parser!(usize))
                        .help("First data row; earlier rows are left unstyled (overrides the job file)"),
                ),
        )
        .subcommand(
            Command::new("palette")
                .about("Generate a palette from a base color")
                .arg(Arg::new("base").required(true).help("Base color (hex)"))
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("5")
                        .help("Number of colors"),
                )
                .arg(
                    Arg::new("mode")
                        .short('m')
                        .long("mode")
                        .value_parser(PaletteMode::ALL.map(|m| m.as_str()))
                        .default_value("monochromatic")
                        .help("Color harmony"),
                ),
        )
        .subcommand(
            Command::new("scale")
                .about("Show evenly spaced colors along a color scale")
                .arg(Arg::new("min").required(true).help("Color at the low end (hex)"))
                .arg(Arg::new("max").required(true).help("Color at the high end (hex)"))
                .arg(
                    Arg::new("mid")
                        .long("mid")
                        .help("Optional midpoint color (hex)"),
                )
                .arg(
                    Arg::new("steps")
                        .long("steps")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("5")
                        .help("Number of colors to show"),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Show hex, RGB and HSL readings of a color")
                .arg(Arg::new("color").required(true).help("Color (hex)")),
        )
        .subcommand(
            Command::new("scheme")
                .about("List the built-in color schemes, or print one")
                .arg(Arg::new("name").help("Scheme name")),
        )
}

/// Install the stderr logger at the level picked by `-v`.
fn init_logging(matches: &ArgMatches) {
    let level = match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // A logger may already be set when handlers run more than once in-process
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| anyhow::anyhow!("missing argument <{}>", name))
}

/// Handler for apply command
fn apply_handler(matches: &ArgMatches, ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    init_logging(matches);
    let path = required(matches, "job")?;

    let text = fs::read_to_string(path).with_context(|| format!("cannot read job file {}", path))?;
    let job: Job =
        serde_json::from_str(&text).with_context(|| format!("invalid job file {}", path))?;
    let rules = Rule::from_values(&job.rules)?;
    let start_row = matches
        .get_one::<usize>("start-row")
        .copied()
        .or(job.start_row)
        .unwrap_or(0);

    log::debug!(
        "{}: {} rows, {} rules, start row {}",
        path,
        job.table.row_count(),
        rules.len(),
        start_row
    );
    let formats = apply(&job.table, &rules, start_row)?;

    // For JSON mode, return raw data
    if ctx.output_mode.is_structured() {
        return Ok(Output::Render(serde_json::to_value(&formats)?));
    }

    let context = apply_context(&job.table, &formats, &job.number_format);
    Ok(Output::Render(serde_json::to_value(&context)?))
}

/// Handler for palette command
fn palette_handler(
    matches: &ArgMatches,
    ctx: &CommandContext,
) -> HandlerResult<serde_json::Value> {
    init_logging(matches);
    let base = Color::parse(required(matches, "base")?)?;
    let count = matches.get_one::<usize>("count").copied().unwrap_or(5);
    let mode: PaletteMode = required(matches, "mode")?.parse()?;

    let palette = generate(base, count, mode)?;

    if ctx.output_mode.is_structured() {
        return Ok(Output::Render(serde_json::to_value(&palette)?));
    }
    Ok(Output::Render(serde_json::to_value(PaletteContext::from(
        &palette,
    ))?))
}

/// Handler for scale command
fn scale_handler(matches: &ArgMatches, _ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    init_logging(matches);
    let min = Color::parse(required(matches, "min")?)?;
    let max = Color::parse(required(matches, "max")?)?;
    let mid = matches
        .get_one::<String>("mid")
        .map(|s| Color::parse(s))
        .transpose()?;
    let steps = matches.get_one::<usize>("steps").copied().unwrap_or(5);

    let (scale, stops) = match mid {
        Some(mid) => (ColorScale::three(min, mid, max), vec![min, mid, max]),
        None => (ColorScale::two(min, max), vec![min, max]),
    };
    let colors = scale.steps(steps);

    Ok(Output::Render(serde_json::to_value(ScaleContext::new(
        &stops, &colors,
    ))?))
}

/// Handler for convert command
fn convert_handler(
    matches: &ArgMatches,
    _ctx: &CommandContext,
) -> HandlerResult<serde_json::Value> {
    init_logging(matches);
    let input = required(matches, "color")?;
    let color = Color::parse(input)?;

    Ok(Output::Render(serde_json::to_value(ConvertContext::new(
        input, color,
    ))?))
}

/// Handler for scheme command
fn scheme_handler(matches: &ArgMatches, _ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    init_logging(matches);
    let names: Vec<String> = match matches.get_one::<String>("name") {
        Some(name) => vec![name.clone()],
        None => scheme_names().into_iter().map(String::from).collect(),
    };

    let schemes = names
        .into_iter()
        .map(|name| {
            let colors = scheme(&name)?.iter().map(Color::to_hex).collect();
            Ok(SchemeEntry { name, colors })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Output::Render(serde_json::to_value(SchemeContext {
        schemes,
    })?))
}

fn main() -> ExitCode {
    let cmd = build_command();
    // Templates are plain text, so the theme carries no styles
    let theme = Theme::new();

    // Build the outstanding app with command handlers and run
    let result = App::builder()
        .theme(theme)
        .command("apply", apply_handler, APPLY_TEMPLATE)
        .command("palette", palette_handler, PALETTE_TEMPLATE)
        .command("scale", scale_handler, SCALE_TEMPLATE)
        .command("convert", convert_handler, CONVERT_TEMPLATE)
        .command("scheme", scheme_handler, SCHEME_TEMPLATE)
        .run_to_string(cmd, std::env::args());

    match result {
        RunResult::Handled(output) => {
            if !output.is_empty() {
                // Check if it's an error message from handler
                if output.starts_with("Error:") {
                    eprintln!("{}", output);
                    return ExitCode::FAILURE;
                }
                print!("{}", output);
            }
            ExitCode::SUCCESS
        }
        RunResult::Binary(_, _) => {
            // Not used in slidestyle
            ExitCode::SUCCESS
        }
        RunResult::NoMatch(_) => {
            // Every command is registered, so this only happens without a subcommand
            if let Err(e) = build_command().print_help() {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
    }
}
