use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use tracing::info;
use tracing_subscriber::EnvFilter;
use zipnet_core::config::PipelineConfig;
use zipnet_core::ordering::OrderingPolicy;
use zipnet_core::outputs::{write_records, OutputFormat};
use zipnet_core::pipeline::{run_pipeline, PipelineOutput};
use zipnet_core::summary::{summarize, CaseSummary, UNKNOWN_LABEL};
use zipnet_parser::DateConstruction;

const DEFAULT_INPUT_FILE: &str = "zipnet_data.csv";

#[derive(Parser, Debug)]
#[command(author, version, about = "Zipnet missing-person case report processor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enrich, order and emit case records
    Process(ProcessArgs),
    /// Print case counts by age group, reporting year and tracing status
    Summary(InputArgs),
}

#[derive(Args, Debug, Default)]
struct InputArgs {
    /// Case report file (defaults to zipnet_data.csv next to the executable)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Date treated as today when computing ages (YYYY-MM-DD)
    #[arg(long)]
    reference_date: Option<NaiveDate>,
    /// absent-first (default), absent-last or literal
    #[arg(long)]
    ordering: Option<OrderingPolicy>,
    /// normalize or strict
    #[arg(long)]
    date_construction: Option<DateConstruction>,
    /// Field delimiter for input and CSV output
    #[arg(long)]
    delimiter: Option<char>,
}

#[derive(Args, Debug, Default)]
struct ProcessArgs {
    #[command(flatten)]
    source: InputArgs,
    /// Write records to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// csv or json
    #[arg(long)]
    format: Option<OutputFormat>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Process(args) => handle_process(args),
        Command::Summary(args) => handle_summary(args),
    }
}

fn handle_process(args: ProcessArgs) -> Result<()> {
    let mut config = resolve_config(&args.source)?;
    if let Some(format) = args.format {
        config.format = format;
    }

    let output = load_records(&config)?;
    let delimiter = config.delimiter_byte()?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output '{}'", path.display()))?;
            write_records(BufWriter::new(file), &output.records, config.format, delimiter)?;
            info!(path = %path.display(), rows = output.records.len(), "wrote output file");
        }
        None => {
            let stdout = io::stdout();
            write_records(
                BufWriter::new(stdout.lock()),
                &output.records,
                config.format,
                delimiter,
            )?;
        }
    }

    Ok(())
}

fn handle_summary(args: InputArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let output = load_records(&config)?;
    println!("{}", render_summary(&summarize(&output.records)));
    Ok(())
}

fn resolve_config(args: &InputArgs) -> Result<PipelineConfig> {
    let file_config = match &args.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => PipelineConfig::default(),
    };
    let config = file_config
        .overlay_process_env()
        .context("invalid ZIPNET_* environment variable")?;
    Ok(apply_overrides(config, args))
}

fn apply_overrides(mut config: PipelineConfig, args: &InputArgs) -> PipelineConfig {
    if let Some(input) = &args.input {
        config.input = Some(input.clone());
    }
    if let Some(date) = args.reference_date {
        config.reference_date = Some(date);
    }
    if let Some(ordering) = args.ordering {
        config.ordering = ordering;
    }
    if let Some(construction) = args.date_construction {
        config.date_construction = construction;
    }
    if let Some(delimiter) = args.delimiter {
        config.delimiter = delimiter;
    }
    config
}

fn default_input_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to locate the running executable")?;
    let dir = exe
        .parent()
        .context("executable path has no parent directory")?;
    Ok(dir.join(DEFAULT_INPUT_FILE))
}

fn load_records(config: &PipelineConfig) -> Result<PipelineOutput> {
    let path = match &config.input {
        Some(path) => path.clone(),
        None => default_input_path()?,
    };
    info!(path = %path.display(), "reading case reports");
    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read input '{}'", path.display()))?;

    let options = config.pipeline_options(Local::now().date_naive())?;
    run_pipeline(&content, &options).context("failed to process case reports")
}

fn count_table(header: &str, rows: impl IntoIterator<Item = (String, usize)>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![header, "Cases"]);
    for (label, count) in rows {
        table.add_row(vec![label, count.to_string()]);
    }
    table
}

fn render_summary(summary: &CaseSummary) -> String {
    let age = count_table("Age group", summary.by_age_group.iter().cloned());
    let years = count_table(
        "Reporting year",
        summary.by_reporting_year.iter().map(|(year, count)| {
            let label = year.map_or_else(|| UNKNOWN_LABEL.to_string(), |y| y.to_string());
            (label, *count)
        }),
    );
    let status = count_table("Tracing status", summary.by_tracing_status.iter().cloned());

    format!(
        "Total cases: {}\n\n{age}\n\n{years}\n\n{status}",
        summary.total
    )
}
