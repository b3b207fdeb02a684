use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use drop_section::{Extraction, SectionKind, Strategy};
use extract_drop::{DropExtractor, ExtractConfig};
use persist_sections::{save_sections, save_sections_in_subdirs, HeaderContext};

// Characters of each section shown by --debug.
const PREVIEW_CHARS: usize = 200;

fn build_cli() -> Command {
    Command::new("extract_drop")
        .version("0.1.0")
        .about("Extracts requirements, design, implementation and testing sections from a drop file")
        .arg(
            Arg::new("file")
                .required(true)
                .help("Path to the drop file"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .required(true)
                .num_args(1)
                .help("Output directory for extracted sections"),
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .num_args(1)
                .help("Base name for output files (default: derived from input file)"),
        )
        .arg(
            Arg::new("subdirs")
                .long("subdirs")
                .help("Create subdirectories for each section type (e.g. requirements/, implementation/)")
                .action(clap::ArgAction::SetTrue)
                .default_value("false"),
        )
        .arg(
            Arg::new("html")
                .long("html")
                .help("Force markup parsing even for non-HTML files")
                .action(clap::ArgAction::SetTrue)
                .default_value("false"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Print debug information")
                .action(clap::ArgAction::SetTrue)
                .default_value("false"),
        )
        .arg(
            Arg::new("section")
                .short('s')
                .long("section")
                .num_args(1)
                .value_parser(SectionKind::KNOWN.map(SectionKind::as_str))
                .help("Print only the given section instead of writing files"),
        )
        .arg(
            Arg::new("marker")
                .long("marker")
                .action(clap::ArgAction::Append)
                .help("Extra section marker as KIND=REGEX (repeatable)"),
        )
}

fn config_from_matches(matches: &ArgMatches) -> Result<ExtractConfig> {
    let mut config = ExtractConfig {
        input: PathBuf::from(matches.get_one::<String>("file").cloned().unwrap_or_default()),
        output_dir: PathBuf::from(matches.get_one::<String>("output").cloned().unwrap_or_default()),
        base_name: matches.get_one::<String>("name").cloned(),
        subdirs: matches.get_flag("subdirs"),
        force_markup: matches.get_flag("html"),
        debug: matches.get_flag("debug"),
        section: matches
            .get_one::<String>("section")
            .map(|name| name.parse::<SectionKind>())
            .transpose()?,
        markers: Vec::new(),
    };

    let cli_markers: Vec<String> = matches
        .get_many::<String>("marker")
        .unwrap_or_default()
        .cloned()
        .collect();
    config
        .add_marker_specs(cli_markers)
        .context("Invalid --marker")?;
    config
        .add_env_markers()
        .context("Invalid marker in EXTRACT_DROP_MARKERS")?;
    Ok(config)
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    let input = matches.get_one::<String>("file").cloned().unwrap_or_default();

    let result = config_from_matches(&matches).and_then(|config| {
        init_logging(config.debug);
        run(&config)
    });

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error processing {}: {:#}", input, err);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &ExtractConfig) -> Result<ExitCode> {
    let extractor = DropExtractor::with_markers(config.markers.iter().cloned())?;

    if config.debug {
        let shown = config
            .input
            .canonicalize()
            .unwrap_or_else(|_| config.input.clone());
        println!("Processing drop file: {}", shown.display());
    }

    let extraction = extractor.extract_from_file(&config.input, config.force_markup)?;

    if config.debug {
        print_debug(&extraction);
    }

    // A single section goes to stdout; nothing is written.
    if let Some(kind) = config.section {
        return match extraction.get(kind) {
            Some(content) => {
                println!("{}", content);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("Section '{}' not found in {}", kind, config.input.display());
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let ctx = HeaderContext::now(&config.base_name(), &config.source_file());
    let saved = if config.subdirs {
        save_sections_in_subdirs(&extraction.sections, &config.output_dir, &ctx)
    } else {
        save_sections(&extraction.sections, &config.output_dir, &ctx)
    };
    let written = saved
        .with_context(|| format!("Failed to save sections to {}", config.output_dir.display()))?;

    println!(
        "Extracted {} sections from {}",
        extraction.sections.len(),
        config.input.display()
    );
    for (kind, path) in &written {
        println!("  - {}: {}", kind, path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn print_debug(extraction: &Extraction) {
    match &extraction.strategy {
        Strategy::PlainText => println!("Strategy: marker scan"),
        Strategy::Markup => println!("Strategy: markup"),
        Strategy::MarkupFallback { reason } => {
            println!("Strategy: marker scan (markup fallback: {})", reason)
        }
    }
    println!("\nExtracted sections:");
    for (kind, content) in &extraction.sections {
        println!("\n--- {} ---", kind);
        println!("{}", preview(content));
    }
}

fn preview(content: &str) -> String {
    if content.chars().count() > PREVIEW_CHARS {
        let head: String = content.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}
