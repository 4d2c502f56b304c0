//! Command-line interface for nyanplate
//! This binary renders data-bound templates and extracts contexts back out of rendered markup.
//!
//! Usage:
//!   nyanplate render [`<template>`] [--context `<file>`]   - Render a template against a context
//!   nyanplate extract `<markup>` [--format `<format>`]     - Extract the context from rendered markup
//!   nyanplate directives                                  - List the directive grammar
//!
//! Paths may be `-` to read from stdin.

mod transforms;

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use nyan_config::{Loader, NyanConfig};
use nyan_plate::plate::grammar::{Binding, DIRECTIVES};
use nyan_plate::plate::loader::{FileSource, LoaderError, TemplateLoader, TemplateSource};
use nyan_plate::Context;
use std::io::Read;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn build_cli() -> Command {
    Command::new("nyanplate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render data-bound markup templates and extract their context back")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults")
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log filter (e.g. 'debug', 'nyan_plate=trace')")
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render a template against a context")
                .arg(
                    Arg::new("template")
                        .help("Template file (default: render.default_template)")
                        .index(1),
                )
                .arg(
                    Arg::new("context")
                        .long("context")
                        .short('x')
                        .help("Context file, JSON or YAML (.yaml/.yml)"),
                ),
        )
        .subcommand(
            Command::new("extract")
                .about("Extract the context from rendered markup")
                .arg(
                    Arg::new("markup")
                        .help("Rendered markup file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (default: extract.format)")
                        .value_parser(PossibleValuesParser::new(
                            transforms::AVAILABLE_FORMATS.iter().copied(),
                        )),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .help("Single-line JSON output")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("directives").about("List the directive grammar"))
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_config(&matches);
    init_tracing(&config.log.level);

    match matches.subcommand() {
        Some(("render", sub)) => handle_render_command(&config, sub),
        Some(("extract", sub)) => handle_extract_command(&config, sub),
        Some(("directives", _)) => handle_directives_command(),
        _ => {
            eprintln!("Unknown command. Run 'nyanplate --help' for usage.");
            std::process::exit(1);
        }
    }
}

/// Defaults, then `nyanplate.toml` in the working directory, then `--config`, then flags
fn load_config(matches: &ArgMatches) -> NyanConfig {
    let mut loader = Loader::new().with_optional_file("nyanplate.toml");
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        loader = loader
            .set_override("log.level", level.as_str())
            .unwrap_or_else(|e| {
                eprintln!("Invalid log level: {}", e);
                std::process::exit(1);
            });
    }

    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|e| {
        eprintln!("Invalid log filter '{}': {}", level, e);
        EnvFilter::new("warn")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read a file, or stdin for `-`
fn read_source(path: &str) -> String {
    let result = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).map(|_| buffer)
    } else {
        std::fs::read_to_string(path)
    };

    result.unwrap_or_else(|e| {
        eprintln!("Error reading '{}': {}", path, e);
        std::process::exit(1);
    })
}

/// The configured default template, if there is one
struct ConfiguredTemplate(Option<String>);

impl TemplateSource for ConfiguredTemplate {
    fn load(&self) -> Result<String, LoaderError> {
        match &self.0 {
            Some(path) => {
                debug!(path = %path, "rendering the configured default template");
                FileSource::new(path).load()
            }
            None => Err(LoaderError::IoError(
                "no template given and render.default_template is not set".to_string(),
            )),
        }
    }
}

/// Handle the render command
fn handle_render_command(config: &NyanConfig, matches: &ArgMatches) {
    let context = match matches.get_one::<String>("context") {
        Some(path) => {
            let text = read_source(path);
            transforms::parse_context(&text, Path::new(path)).unwrap_or_else(|e| {
                eprintln!("Error in '{}': {}", path, e);
                std::process::exit(1);
            })
        }
        None => Context::new(),
    };

    let template = matches
        .get_one::<String>("template")
        .map(|path| read_source(path));
    let fallback = ConfiguredTemplate(config.render.default_template.clone());

    let rendered = TemplateLoader::render_or_default(&context, template.as_deref(), &fallback)
        .unwrap_or_else(|e| {
            eprintln!("Render error: {}", e);
            std::process::exit(1);
        });

    print!("{}", rendered);
}

/// Handle the extract command
fn handle_extract_command(config: &NyanConfig, matches: &ArgMatches) {
    let path = matches
        .get_one::<String>("markup")
        .expect("markup is a required argument");
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or_else(|| config.extract.format.name());
    let pretty = config.extract.pretty && !matches.get_flag("compact");

    let source = read_source(path);
    let output = transforms::execute_format(&source, format, pretty).unwrap_or_else(|e| {
        eprintln!("Extract error: {}", e);
        std::process::exit(1);
    });

    print!("{}", output);
}

/// Handle the directives command
fn handle_directives_command() {
    println!("{:<18} {:<22} BINDING", "DIRECTIVE", "MARKER");
    for directive in DIRECTIVES.iter() {
        let binding = match directive.binding {
            Binding::Attribute(name) | Binding::Boolean(name) => {
                format!("{} ({})", directive.binding.label(), name)
            }
            other => other.label().to_string(),
        };
        println!(
            "{:<18} {:<22} {}",
            directive.attribute, directive.marker, binding
        );
    }
}
