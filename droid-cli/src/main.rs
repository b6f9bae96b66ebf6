//! droid CLI
//!
//! Converts a rendered source tree (JSON from the measuring engine) into an
//! Android layout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use droid_dom::SourceTree;
use droid_layout::{ConversionConfig, LayoutDocument, convert};
use droid_xml::write_layout;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// droid - rendered HTML/CSS boxes to Android XML layouts
#[derive(Parser, Debug)]
#[command(name = "droid")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Convert to layout XML on stdout
    droid page.json

    # Write the layout to a file, targeting API 21
    droid page.json -o activity_main.xml --api 21

    # Inspect the converted view tree as JSON
    droid page.json --format json

    # Read settings from a file, keep left/right attributes
    droid page.json --config droid.json --no-rtl
"#)]
struct Cli {
    /// Source tree JSON
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Write output here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Conversion config JSON
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Target Android API level (14-30)
    #[arg(long, value_name = "LEVEL")]
    api: Option<u32>,

    /// Keep left/right attributes instead of start/end
    #[arg(long)]
    no_rtl: bool,

    /// Decimal places for bias, percent and weight values
    #[arg(long, value_name = "DIGITS")]
    precision: Option<u8>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Xml)]
    format: Format,

    /// Log level, overridden by RUST_LOG
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Format {
    Xml,
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(cli.log_level).into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = load_config(&cli)?;
    let json = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let source = SourceTree::from_json(&json)
        .with_context(|| format!("parsing {}", cli.input.display()))?;
    tracing::info!(nodes = source.len(), api = config.target_api, "converting");

    let document = convert(&source, config);
    let rendered = match cli.format {
        Format::Xml => write_layout(&document),
        Format::Json => document.to_json().context("serializing document")?,
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &rendered).with_context(|| format!("writing {}", path.display()))?;
            print_summary(&document, Some(path));
        }
        None => {
            print!("{rendered}");
            print_summary(&document, None);
        }
    }
    Ok(())
}

/// Config file (or defaults) with command line overrides applied.
fn load_config(cli: &Cli) -> Result<ConversionConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ConversionConfig::from_json(&json)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => ConversionConfig::default(),
    };
    if let Some(api) = cli.api {
        config.target_api = api;
    }
    if let Some(precision) = cli.precision {
        config.float_precision = precision;
    }
    if cli.no_rtl {
        config.support_rtl = false;
    }
    config.validated().context("invalid command line settings")
}

/// Summary on stderr, so stdout stays the layout.
fn print_summary(document: &LayoutDocument, output: Option<&Path>) {
    let views = document.views().len();
    let target = output.map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
    eprintln!(
        "{} {views} views for API {} -> {target}",
        "converted".green().bold(),
        document.target_api
    );
    for warning in &document.warnings {
        eprintln!("  {} {warning}", "warning:".yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("droid").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_defaults() {
        let parsed = cli(&["page.json"]);
        assert_eq!(parsed.input, PathBuf::from("page.json"));
        assert_eq!(parsed.format, Format::Xml);
        assert_eq!(parsed.log_level, LogLevel::Warn);
        assert_eq!(load_config(&parsed).expect("config"), ConversionConfig::default());
    }

    #[test]
    fn test_overrides_are_validated() {
        let parsed = cli(&["page.json", "--api", "99", "--precision", "9", "--no-rtl"]);
        let config = load_config(&parsed).expect("config");
        assert_eq!(config.target_api, 30);
        assert_eq!(config.float_precision, 6);
        assert!(!config.support_rtl);
    }

    #[test]
    fn test_json_format_flag() {
        let parsed = cli(&["page.json", "--format", "json", "-o", "out.json"]);
        assert_eq!(parsed.format, Format::Json);
        assert_eq!(parsed.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let parsed = cli(&["page.json", "--config", "/nonexistent/droid.json"]);
        let error = load_config(&parsed).expect_err("missing file");
        assert!(error.to_string().contains("reading config"));
    }
}
