//! # Windvane CLI Application
//!
//! Terminal front end for the conversion engine: one-shot conversions,
//! registry and Beaufort listings, conversion history, and an interactive
//! prompt mode (the default when no subcommand is given).
//!
//! Usage:
//! ```bash
//! windvane convert wind kt bf 23
//! windvane convert temperature c f -- -40
//! windvane history --limit 5
//! windvane units pressure
//! windvane            # interactive prompt
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use conv_core::beaufort::BEAUFORT_SCALE;
use conv_core::convert::{calculate, ConversionInput, ConversionResult};
use conv_core::errors::ConvError;
use conv_core::file_io::FileHistory;
use conv_core::format::format_result;
use conv_core::history::HistoryStore;
use conv_core::settings::Settings;
use conv_core::units::{units_for, Category, Unit};

/// Shown in place of a result when the input cannot be converted
const PLACEHOLDER: &str = "—";

#[derive(Parser)]
#[command(
    name = "windvane",
    version,
    about = "Windvane unit converter",
    long_about = "Convert length, weight, speed, pressure, temperature and wind units, including the Beaufort scale"
)]
struct Cli {
    /// History file override
    #[arg(long, global = true)]
    history_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a value between two units of a category
    Convert {
        /// Category (length, weight, speed, pressure, temperature, wind)
        category: String,

        /// Source unit code (e.g. "km")
        from: String,

        /// Target unit code (e.g. "m")
        to: String,

        /// Value to convert
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Do not record this conversion in history
        #[arg(long)]
        no_record: bool,
    },

    /// List categories and their units
    Units {
        /// Only list this category
        category: Option<String>,
    },

    /// Print the Beaufort wind-force table
    Beaufort,

    /// Show recent conversions, newest first
    History {
        /// Number of records to show (at least 1)
        #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        limit: Option<usize>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete all recorded conversions
    ClearHistory,

    /// Prompt for conversions until a blank category is entered
    Interactive,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(conv_error) = e.downcast_ref::<ConvError>() {
                if let Ok(json) = serde_json::to_string_pretty(conv_error) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut settings = Settings::from_env()?;
    if let Some(path) = cli.history_file {
        settings.history_path = path;
    }
    debug!(history = %settings.history_path.display(), "settings loaded");

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Convert {
            category,
            from,
            to,
            value,
            json,
            no_record,
        } => {
            let category: Category = category.parse()?;
            let input = ConversionInput::new(category, from, to, value);
            run_convert(&settings, &input, json, !no_record)
        }
        Command::Units { category } => {
            let categories = match category {
                Some(name) => vec![name.parse::<Category>()?],
                None => Category::ALL.to_vec(),
            };
            print_units(&categories);
            Ok(ExitCode::SUCCESS)
        }
        Command::Beaufort => {
            print_beaufort_table();
            Ok(ExitCode::SUCCESS)
        }
        Command::History { limit, json } => {
            let limit = limit.unwrap_or(settings.history_limit);
            print_history(&settings, limit, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::ClearHistory => {
            let mut store = FileHistory::new(&settings.history_path);
            let removed = store.clear()?;
            println!("Removed {} record(s) from {}", removed, settings.history_path.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Interactive => {
            run_interactive(&settings)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// Convert
// ============================================================================

fn run_convert(settings: &Settings, input: &ConversionInput, json: bool, record: bool) -> Result<ExitCode> {
    let result = match calculate(input) {
        Ok(result) => result,
        Err(e) if e.is_input_error() => {
            println!("{}", PLACEHOLDER);
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    if record && settings.record_history {
        record_conversion(settings, &result);
    }

    Ok(ExitCode::SUCCESS)
}

/// History is best effort: a failed write never fails the conversion.
fn record_conversion(settings: &Settings, result: &ConversionResult) {
    let mut store = FileHistory::new(&settings.history_path);
    if let Err(e) = store.record(result) {
        warn!(error = %e, path = %settings.history_path.display(), "could not record conversion");
    }
}

fn unit_label(category: Category, code: &str) -> String {
    category
        .find_unit(code)
        .map(|unit| unit.label.to_string())
        .unwrap_or_else(|| code.to_string())
}

fn print_result(result: &ConversionResult) {
    println!(
        "{} {} = {} {}",
        format_result(result.input_value),
        unit_label(result.category, &result.from_unit),
        result.formatted,
        unit_label(result.category, &result.to_unit),
    );

    if let Some(force) = &result.beaufort {
        println!("  Force {}: {} ({})", force.level, force.description, force.sea_effect);
    }
}

// ============================================================================
// Listings
// ============================================================================

fn print_units(categories: &[Category]) {
    for category in categories {
        println!("{} ({})", category.display_name(), category.as_str());
        for unit in units_for(*category) {
            let marker = if unit.factor() == Some(1.0) { "  [base]" } else { "" };
            println!("  {:<6} {}{}", unit.code, unit.label, marker);
        }
        println!();
    }
}

fn print_beaufort_table() {
    println!("{:<6} {:>7} {:>8}  {:<16} {}", "Force", "Min kt", "Min km/h", "Description", "Sea");
    for entry in BEAUFORT_SCALE.iter() {
        println!(
            "{:<6} {:>7} {:>8}  {:<16} {}",
            entry.level,
            format_result(entry.min_kt),
            format_result(entry.min_kmh()),
            entry.description,
            entry.sea_effect
        );
    }
}

fn print_history(settings: &Settings, limit: usize, json: bool) -> Result<()> {
    let store = FileHistory::new(&settings.history_path);
    let records = store.recent(limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No conversions recorded.");
        return Ok(());
    }

    for record in &records {
        println!(
            "{}  {:<11} {} {} = {} {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.category.as_str(),
            format_result(record.input_value),
            record.from_unit,
            format_result(record.output_value),
            record.to_unit
        );
    }
    Ok(())
}

// ============================================================================
// Interactive
// ============================================================================

/// Prompt and read one trimmed line. `None` on EOF or I/O failure.
fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

/// Prompt for a unit code, falling back to `default` on blank input.
fn prompt_unit(label: &str, default: &Unit) -> Option<String> {
    let answer = prompt_line(&format!("{} unit [{}]: ", label, default.code))?;
    if answer.is_empty() {
        Some(default.code.to_string())
    } else {
        Some(answer)
    }
}

fn run_interactive(settings: &Settings) -> Result<()> {
    println!("Windvane - Unit Converter");
    println!("=========================");
    println!("Categories: {}", Category::ALL.map(|c| c.as_str()).join(", "));
    println!("Leave the category blank to quit.");
    println!();

    loop {
        let Some(name) = prompt_line("Category: ") else {
            break;
        };
        if name.is_empty() {
            break;
        }

        let category = match name.parse::<Category>() {
            Ok(category) => category,
            Err(e) => {
                println!("  {}", e);
                continue;
            }
        };

        let codes: Vec<&str> = units_for(category).iter().map(|u| u.code).collect();
        println!("  Units: {}", codes.join(", "));

        let (default_from, default_to) = category.default_pair();
        let Some(from) = prompt_unit("From", default_from) else {
            break;
        };
        let Some(to) = prompt_unit("To", default_to) else {
            break;
        };
        let Some(value) = prompt_line("Value: ") else {
            break;
        };

        let input = ConversionInput::new(category, from, to, value);
        match calculate(&input) {
            Ok(result) => {
                print!("  ");
                print_result(&result);
                if settings.record_history {
                    record_conversion(settings, &result);
                }
            }
            Err(e) if e.is_input_error() => {
                debug!(error = %e, "no result");
                println!("  {}", PLACEHOLDER);
            }
            Err(e) => return Err(e.into()),
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_limit_must_be_positive() {
        assert!(Cli::try_parse_from(["windvane", "history", "--limit", "0"]).is_err());
        assert!(Cli::try_parse_from(["windvane", "history", "--limit", "-3"]).is_err());

        let cli = Cli::try_parse_from(["windvane", "history", "--limit", "3"]).unwrap();
        assert!(matches!(cli.command, Some(Command::History { limit: Some(3), json: false })));
    }

    #[test]
    fn test_history_limit_defaults_to_settings() {
        let cli = Cli::try_parse_from(["windvane", "history"]).unwrap();
        assert!(matches!(cli.command, Some(Command::History { limit: None, .. })));
    }
}
