//! StatForge CLI: fetch Canadian economic statistics from the command line.
//!
//! Commands:
//! - `boc observations|series`: Bank of Canada Valet
//! - `statcan info|data`: Statistics Canada WDS by vector id
//! - `cmhc`: download and parse a CMHC CSV
//! - `health`: probe the StatForge health API
//! - `config`: print the resolved settings (secrets redacted)

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use statforge_core::domain::{Row, Table};
use statforge_core::explore;
use statforge_core::providers::{boc, statcan, BankOfCanada, Cmhc, StatCan, VectorId};
use statforge_core::{Fetcher, RetryPolicy, Settings};

#[derive(Parser)]
#[command(
    name = "statforge",
    about = "StatForge CLI: Canadian economic statistics from BoC, StatCan and CMHC"
)]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Table, global = true)]
    format: Format,

    /// Settings file. Defaults to $STATFORGE_CONFIG, then ./statforge.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Bank of Canada Valet series.
    Boc {
        #[command(subcommand)]
        action: BocAction,
    },
    /// Statistics Canada vectors.
    Statcan {
        #[command(subcommand)]
        action: StatCanAction,
    },
    /// Download a CMHC CSV and print it.
    Cmhc {
        /// Direct CSV URL.
        url: String,
    },
    /// Probe {API_BASE_URL}/health.
    Health,
    /// Print the resolved settings.
    Config,
}

#[derive(Subcommand)]
enum BocAction {
    /// Observations for a series (e.g. FXUSDCAD).
    Observations {
        series: String,

        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD).
        #[arg(long)]
        end: Option<String>,
    },
    /// Series metadata.
    Series { series: String },
}

#[derive(Subcommand)]
enum StatCanAction {
    /// Series metadata for each vector (e.g. v41690973).
    Info {
        #[arg(required = true)]
        vectors: Vec<VectorId>,
    },
    /// Data points for each vector.
    Data {
        #[arg(required = true)]
        vectors: Vec<VectorId>,

        /// Start of the reference period (YYYY-MM-DD). Defaults to 2000-01-01.
        #[arg(long)]
        start: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("load settings")?;
    let format = cli.format;

    match cli.command {
        Commands::Boc { action } => run_boc(&settings, action, format),
        Commands::Statcan { action } => run_statcan(&settings, action, format),
        Commands::Cmhc { url } => run_cmhc(&url, format),
        Commands::Health => run_health(&settings, format),
        Commands::Config => run_config(&settings, format),
    }
}

fn run_boc(settings: &Settings, action: BocAction, format: Format) -> Result<()> {
    let fetcher = Fetcher::new(RetryPolicy::default())?;
    let client = BankOfCanada::with_base_url(&fetcher, settings.boc_base_url.as_str());

    match action {
        BocAction::Observations { series, start, end } => {
            let start = parse_date(start.as_deref())?;
            let end = parse_date(end.as_deref())?;
            let raw = client.series_observations(&series, start, end)?;
            let records = boc::observation_records(&raw, &series);
            match format {
                Format::Json => print_json(&records),
                Format::Table => print_table(&Table::from_records(&records)),
            }
        }
        BocAction::Series { series } => {
            let raw = client.series_details(&series)?;
            let meta = boc::series_metadata(&raw);
            match format {
                Format::Json => print_json(&meta),
                Format::Table => print_table(&Table::transposed(&meta)),
            }
        }
    }
}

fn run_statcan(settings: &Settings, action: StatCanAction, format: Format) -> Result<()> {
    let fetcher = Fetcher::new(RetryPolicy::default())?;
    let client = StatCan::with_base_url(&fetcher, settings.statcan_base_url.as_str());

    match action {
        StatCanAction::Info { vectors } => {
            let objects = client.series_info(&vectors)?;
            match format {
                Format::Json => print_json(&objects),
                Format::Table => print_table(&Table::from_rows(&statcan::info_rows(&objects))),
            }
        }
        StatCanAction::Data { vectors, start } => {
            let start = parse_date(start.as_deref())?;
            let objects = client.data_from_vectors(&vectors, start)?;
            let records = statcan::data_point_records(&objects);
            match format {
                Format::Json => print_json(&records),
                Format::Table => print_table(&Table::from_records(&records)),
            }
        }
    }
}

fn run_cmhc(url: &str, format: Format) -> Result<()> {
    let fetcher = Fetcher::new(RetryPolicy::default())?;
    let csv = Cmhc::new(&fetcher).download_csv(url)?;
    match format {
        Format::Json => print_json(&csv.records()),
        Format::Table => print_table(&csv.to_table()),
    }
}

fn run_health(settings: &Settings, format: Format) -> Result<()> {
    let fetcher = Fetcher::new(RetryPolicy::no_retry())?;
    let health = explore::probe_api(&fetcher, &settings.api_base_url);
    match format {
        Format::Json => print_json(&health)?,
        Format::Table => {
            println!("API URL:    {}", settings.api_base_url);
            println!("API Health: {health}");
        }
    }
    if !explore::health_ok(&health) {
        std::process::exit(1);
    }
    Ok(())
}

fn run_config(settings: &Settings, format: Format) -> Result<()> {
    let redacted = settings.redacted();
    match format {
        Format::Json => print_json(&redacted),
        Format::Table => {
            let value = serde_json::to_value(&redacted)?;
            print_table(&Table::transposed(&Row::from_json(&value)))
        }
    }
}

fn parse_date(s: Option<&str>) -> Result<Option<NaiveDate>> {
    s.map(|s| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
    })
    .transpose()
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_table(table: &Table) -> Result<()> {
    if table.columns.is_empty() {
        println!("(no rows)");
        return Ok(());
    }
    print!("{}", render_table(table));
    println!("({} rows)", table.len());
    Ok(())
}

/// Plain-text table: padded header, dashed rule, padded rows.
fn render_table(table: &Table) -> String {
    let widths = table.column_widths();
    let mut out = String::new();

    let line = |cells: Vec<String>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    out.push_str(&line(table.columns.clone()));
    out.push_str(&line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in &table.rows {
        out.push_str(&line(row.iter().map(ToString::to_string).collect()));
    }
    out
}
