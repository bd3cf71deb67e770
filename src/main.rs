//! # fgtree
//!
//! A FortiGate configuration navigator with hierarchical section extraction.
//!
//! ## Usage
//!
//! List all section paths:
//! ```sh
//! fgtree backup.conf
//! ```
//!
//! Show the section hierarchy:
//! ```sh
//! fgtree --tree backup.conf
//! ```
//!
//! Search and export:
//! ```sh
//! fgtree -f "firewall *" -e exports/ backup.conf
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, OutputFormat};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use fgtree::export::{self, ExportPayload};
use fgtree::input::{self, InputError, InputSource};
use fgtree::parser::{self, ParsedConfig, SectionIndex, SectionTree};
use fgtree::{Config, search, suggest};
use std::path::{Path, PathBuf};
use std::process;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use unicode_width::UnicodeWidthStr;

fn main() -> Result<()> {
    color_eyre::install()?;

    // Handle dynamic shell completions
    #[cfg(feature = "unstable-dynamic")]
    clap_complete::CompleteEnv::with_factory(|| {
        use clap::CommandFactory;
        Cli::command()
    })
    .complete();

    let args = Cli::parse();
    initialize_logging(&args)?;

    if args.setup_completions {
        cli::setup::print_completion_instructions("fgtree");
        return Ok(());
    }

    let config = Config::load();

    if args.init_config {
        config.save().map_err(|e| eyre!("failed to save config: {e}"))?;
        if let Some(path) = Config::config_path() {
            println!("Wrote {}", path.display());
        }
        return Ok(());
    }

    let source = match input::determine_input_source(args.file.as_deref()) {
        Ok(source) => source,
        Err(InputError::NoInput) => {
            eprintln!("Error: configuration file argument is required");
            eprintln!("\nUsage: fgtree [OPTIONS] <FILE>");
            eprintln!("       fgtree [OPTIONS] -");
            eprintln!("       cat backup.conf | fgtree [OPTIONS]\n");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let parsed = match read_and_parse(&source, &config) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error reading {}: {}", source.label(), e);
            process::exit(1);
        }
    };

    let format = args
        .output
        .or_else(|| OutputFormat::from_config(&config.output.format))
        .unwrap_or(OutputFormat::Plain);

    handle_cli_mode(&args, &config, &parsed, &source, format)
}

fn initialize_logging(args: &Cli) -> Result<()> {
    // Keep stderr quiet for machine-readable output unless asked otherwise
    let level = if args.verbose {
        Level::DEBUG
    } else if args.quiet || args.output == Some(OutputFormat::Json) {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn read_and_parse(source: &InputSource, config: &Config) -> Result<ParsedConfig, InputError> {
    let bytes = input::read_source(source, config.max_input_bytes())?;
    parser::parse_bytes(&bytes)
}

fn handle_cli_mode(
    args: &Cli,
    config: &Config,
    parsed: &ParsedConfig,
    source: &InputSource,
    format: OutputFormat,
) -> Result<()> {
    if args.count {
        print_counts(parsed);
        return Ok(());
    }

    if let Some(ref path) = args.section {
        return show_section(args, config, parsed, path);
    }

    if let Some(ref name) = args.interface {
        show_interface(parsed, name);
        return Ok(());
    }

    if args.interfaces {
        print_interfaces(args, parsed, format)?;
        return Ok(());
    }

    // Listing modes: --list (default), --tree, json
    let query = args
        .search
        .as_deref()
        .unwrap_or(config.search.default_query.as_str());
    let results = search(&parsed.sections, query);

    if let Some(dir) = export_dir(args, config) {
        export_sections(&results, &dir)?;
        return Ok(());
    }

    if args.tree || format == OutputFormat::Tree {
        if format == OutputFormat::Json {
            let nodes = SectionTree::from_index(&results).to_nodes();
            println!("{}", serde_json::to_string_pretty(&nodes)?);
        } else {
            print!("{}", SectionTree::from_index(&results).render_box_tree());
        }
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let output = parser::build_json_output(parsed, &results, Some(source.label()));
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain | OutputFormat::Tree => {
            let show_lines = config.output.show_lines && !args.no_lines;
            print_paths(&results, show_lines);
        }
    }
    Ok(())
}

fn export_dir(args: &Cli, config: &Config) -> Option<PathBuf> {
    args.export
        .as_ref()
        .map(|dir| dir.clone().unwrap_or_else(|| config.export.directory.clone()))
}

fn print_paths(sections: &SectionIndex, show_lines: bool) {
    if !show_lines {
        for path in sections.paths() {
            println!("{}", path);
        }
        return;
    }

    let width = sections.paths().map(UnicodeWidthStr::width).max().unwrap_or(0);
    for section in sections.sections() {
        let pad = width - section.path.width();
        println!(
            "{}{}  {}-{}",
            section.path,
            " ".repeat(pad),
            section.start_line,
            section.end_line
        );
    }
}

fn print_interfaces(args: &Cli, parsed: &ParsedConfig, format: OutputFormat) -> Result<()> {
    let interfaces = match args.search {
        Some(ref query) => search::search_interfaces(&parsed.interfaces, query),
        None => parsed.interfaces.clone(),
    };

    match format {
        OutputFormat::Json => {
            let names: Vec<_> = interfaces.names().collect();
            println!("{}", serde_json::to_string_pretty(&names)?);
        }
        OutputFormat::Plain | OutputFormat::Tree => {
            for name in interfaces.names() {
                println!("{}", name);
            }
        }
    }
    Ok(())
}

fn print_counts(parsed: &ParsedConfig) {
    let stats = parsed.stats();
    println!("Sections:   {}", stats.sections);
    println!("Top level:  {}", stats.top_level);
    println!("Max depth:  {}", stats.max_depth);
    println!("Interfaces: {}", stats.interfaces);
}

fn show_section(args: &Cli, config: &Config, parsed: &ParsedConfig, path: &str) -> Result<()> {
    let Some(section) = parsed.sections.get(path) else {
        eprintln!("Section '{}' not found", path);
        print_suggestions(path, parsed.sections.paths());
        process::exit(1);
    };

    match export_dir(args, config) {
        Some(dir) => {
            let written = export::write_export(&dir, &ExportPayload::from_section(section))?;
            println!("{}", written.display());
        }
        None => println!("{}", section.body),
    }
    Ok(())
}

fn show_interface(parsed: &ParsedConfig, name: &str) {
    match parsed.interfaces.body(name) {
        Some(body) => println!("{}", body),
        None => {
            eprintln!("Interface '{}' not found", name);
            print_suggestions(name, parsed.interfaces.names());
            process::exit(1);
        }
    }
}

fn print_suggestions<'a>(query: &str, candidates: impl IntoIterator<Item = &'a str>) {
    let suggestions = suggest::suggest(query, candidates, 3);
    if !suggestions.is_empty() {
        eprintln!("\nDid you mean:");
        for candidate in suggestions {
            eprintln!("  {}", candidate);
        }
    }
}

fn export_sections(results: &SectionIndex, dir: &Path) -> Result<()> {
    if results.is_empty() {
        eprintln!("No sections matched, nothing exported");
        return Ok(());
    }

    for section in results.sections() {
        let payload = ExportPayload::from_section(section);
        match export::write_export(dir, &payload) {
            Ok(written) => println!("{}", written.display()),
            // One bad name should not stop the rest of the export
            Err(e @ export::ExportError::InvalidFilename(_)) => {
                tracing::warn!(path = %section.path, error = %e, "skipping section");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
