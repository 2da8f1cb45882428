//! Command-line interface for regexplore
//! This binary exposes the pattern authoring engine: token breakdown, inference from sample
//! text, and live matching.
//!
//! Usage:
//!   regexplore tokenize `<pattern>`                         - Token breakdown of a pattern
//!   regexplore classify `<text>` [--with `<id>`]             - Whole-span classification
//!   regexplore generalize `<text>` [--name `<n>`] [--segments] - Infer a fragment from sample text
//!   regexplore match `<pattern>` --text `<s>` | --file `<path>` - Run a pattern against sample text
//!   regexplore classifiers                                  - List the classifier catalogue
//!
//! Every command accepts `--format text|json|yaml` and `--config <file>`.

mod logging;
mod output;

use clap::{Arg, ArgAction, ArgMatches, Command};
use regexplore_config::{ConfigError, Loader, OutputFormat, RegexploreConfig};
use regexplore_core::classifying::{classify_whole_span, classify_with, describe_catalogue};
use regexplore_core::generalizing::{
    fragment_for_selection, generalize_segments, wrap_named, Segment,
};
use regexplore_core::matching::{
    execute_with_budget, highlight, Flags, HighlightSpan, MatchRecord,
};
use regexplore_core::tokenizing::tokenize;
use regexplore_core::PatternError;
use serde::Serialize;
use std::io::Read;

fn cli() -> Command {
    Command::new("regexplore")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build, inspect and test patterns from sample text")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .global(true)
                .value_parser(["text", "json", "yaml"])
                .help("Output format (default from configuration: text)"),
        )
        .subcommand(
            Command::new("tokenize")
                .about("Show the token breakdown of a pattern")
                .arg(
                    Arg::new("pattern")
                        .required(true)
                        .allow_hyphen_values(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("classify")
                .about("Classify a whole selected span")
                .arg(Arg::new("text").required(true).allow_hyphen_values(true).index(1))
                .arg(
                    Arg::new("with")
                        .long("with")
                        .help("Apply one catalogue entry by id (e.g. 'literal')"),
                ),
        )
        .subcommand(
            Command::new("generalize")
                .about("Infer a pattern fragment from sample text")
                .arg(Arg::new("text").required(true).allow_hyphen_values(true).index(1))
                .arg(
                    Arg::new("name")
                        .long("name")
                        .short('n')
                        .help("Wrap the fragment in a named capture group"),
                )
                .arg(
                    Arg::new("segments")
                        .long("segments")
                        .help("Also show how the text was segmented")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("match")
                .about("Run a pattern against sample text")
                .arg(
                    Arg::new("pattern")
                        .required(true)
                        .allow_hyphen_values(true)
                        .index(1),
                )
                .arg(
                    Arg::new("text")
                        .long("text")
                        .short('t')
                        .allow_hyphen_values(true)
                        .conflicts_with("file")
                        .required_unless_present("file")
                        .help("Sample text"),
                )
                .arg(
                    Arg::new("file")
                        .long("file")
                        .help("Read sample text from a file ('-' for stdin)"),
                )
                .arg(
                    Arg::new("flags")
                        .long("flags")
                        .help("Flag letters: g(lobal) i(gnore case) m(ultiline) s(dot all)"),
                )
                .arg(
                    Arg::new("highlight")
                        .long("highlight")
                        .help("Also show the sample with matches marked")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("classifiers").about("List the classifier catalogue"))
}

fn main() {
    logging::init();
    let matches = cli().get_matches();

    let config = load_config(matches.get_one::<String>("config")).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    let format = match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => OutputFormat::Json,
        Some("yaml") => OutputFormat::Yaml,
        Some(_) => OutputFormat::Text,
        None => config.output.format,
    };

    match matches.subcommand() {
        Some(("tokenize", sub)) => handle_tokenize_command(sub, format),
        Some(("classify", sub)) => handle_classify_command(sub, format),
        Some(("generalize", sub)) => handle_generalize_command(sub, format),
        Some(("match", sub)) => handle_match_command(sub, &config, format),
        Some(("classifiers", _)) => handle_classifiers_command(format),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn load_config(path: Option<&String>) -> Result<RegexploreConfig, ConfigError> {
    let loader = match path {
        Some(path) => {
            tracing::debug!(%path, "layering configuration file");
            Loader::new().with_file(path)
        }
        None => Loader::new(),
    };
    loader.build()
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .expect("clap enforces required arguments")
}

/// Handle the tokenize command
fn handle_tokenize_command(matches: &ArgMatches, format: OutputFormat) {
    let tokens = tokenize(required(matches, "pattern"));
    output::emit(format, &tokens, |tokens| output::tokens_text(tokens));
}

#[derive(Serialize)]
struct FragmentReport {
    fragment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    segments: Option<Vec<Segment>>,
}

/// Handle the classify command
fn handle_classify_command(matches: &ArgMatches, format: OutputFormat) {
    let text = required(matches, "text");
    let fragment = match matches.get_one::<String>("with") {
        Some(id) => classify_with(id, text).unwrap_or_else(|| {
            eprintln!("Unknown classifier '{}'", id);
            eprintln!("\nAvailable classifiers:");
            for info in describe_catalogue() {
                eprintln!("  {} - {}", info.id, info.label);
            }
            std::process::exit(1);
        }),
        None => classify_whole_span(text).unwrap_or_else(|| {
            eprintln!("No classifier matched the whole text; try 'generalize'");
            std::process::exit(1);
        }),
    };
    let report = FragmentReport {
        fragment,
        segments: None,
    };
    output::emit(format, &report, |report| report.fragment.clone());
}

/// Handle the generalize command
fn handle_generalize_command(matches: &ArgMatches, format: OutputFormat) {
    let text = required(matches, "text");
    let mut fragment = fragment_for_selection(text);
    if let Some(name) = matches.get_one::<String>("name") {
        fragment = wrap_named(&fragment, name).unwrap_or_else(|e| fail(&e));
    }
    let segments = matches
        .get_flag("segments")
        .then(|| generalize_segments(text));

    let report = FragmentReport { fragment, segments };
    output::emit(format, &report, |report| match &report.segments {
        Some(segments) => format!("{}\n\n{}", report.fragment, output::segments_text(segments)),
        None => report.fragment.clone(),
    });
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchReport {
    pattern: String,
    flags: Flags,
    matches: Vec<MatchRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    highlight: Option<Vec<HighlightSpan>>,
}

#[derive(Serialize)]
struct ErrorReport {
    error: String,
    budget_exceeded: bool,
}

/// Handle the match command
fn handle_match_command(matches: &ArgMatches, config: &RegexploreConfig, format: OutputFormat) {
    let pattern = required(matches, "pattern");
    let flags = match matches.get_one::<String>("flags") {
        Some(letters) => Flags::parse(letters).unwrap_or_else(|e| fail(&e)),
        None => config.flags.flags(),
    };
    let sample = read_sample(matches);

    match execute_with_budget(pattern, flags, &sample, &config.matcher.budget()) {
        Ok(records) => {
            let highlight = matches
                .get_flag("highlight")
                .then(|| highlight(&sample, &records));
            let report = MatchReport {
                pattern: pattern.to_string(),
                flags,
                matches: records,
                highlight,
            };
            output::emit(format, &report, |report| {
                let mut text = output::matches_text(&report.matches);
                if let Some(spans) = &report.highlight {
                    text.push_str("\n\n");
                    text.push_str(&output::highlight_text(spans));
                }
                text
            });
        }
        Err(e) if format != OutputFormat::Text => {
            let report = ErrorReport {
                error: e.to_string(),
                budget_exceeded: e.is_budget(),
            };
            output::emit(format, &report, |report| report.error.clone());
            std::process::exit(exit_code(&e));
        }
        Err(e) => fail(&e),
    }
}

/// Handle the classifiers command
fn handle_classifiers_command(format: OutputFormat) {
    let catalogue = describe_catalogue();
    output::emit(format, &catalogue, |catalogue| {
        catalogue
            .iter()
            .map(|info| {
                let auto = if info.auto_select { "" } else { " (explicit only)" };
                format!("  {:<10} {}{}", info.id, info.label, auto)
            })
            .collect::<Vec<_>>()
            .join("\n")
    });
}

fn read_sample(matches: &ArgMatches) -> String {
    if let Some(text) = matches.get_one::<String>("text") {
        return text.clone();
    }
    let path = required(matches, "file");
    let read = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).map(|_| buffer)
    } else {
        std::fs::read_to_string(path)
    };
    read.unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    })
}

fn exit_code(error: &PatternError) -> i32 {
    if error.is_budget() {
        2
    } else {
        1
    }
}

fn fail(error: &PatternError) -> ! {
    eprintln!("{}", error);
    std::process::exit(exit_code(error));
}
