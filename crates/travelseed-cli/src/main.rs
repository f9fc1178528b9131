mod config;
mod logging;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use schemars::schema_for;
use thiserror::Error;
use travelseed_core::{EntityIdStrategy, TravelDomain};
use travelseed_generate::{FsSink, GenerationEngine, GenerationError};

use config::{OptionOverrides, load_options};
use logging::init_logging;

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "travelseed", version, about = "Travel sample data generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate SQL event and MongoDB snapshot scripts from a domain file.
    Generate(GenerateArgs),
    /// Print the JSON schema of the domain input file.
    Schema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Domain description (JSON).
    input_file: PathBuf,
    /// Root directory for the generated script trees.
    output_dir: PathBuf,
    /// Optional TOML file with generation options.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Entity id strategy, overriding the config file.
    #[arg(long, value_enum)]
    entity_ids: Option<EntityIdsArg>,
    /// First file ordinal, overriding the config file.
    #[arg(long)]
    ordinal_base: Option<u32>,
    /// Log file receiving debug-level JSON logs.
    #[arg(long, default_value = "generator.log")]
    log_file: PathBuf,
    /// Write generation_report.json into the output directory.
    #[arg(long, default_value_t = false)]
    report: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EntityIdsArg {
    Random,
    Sequential,
}

impl From<EntityIdsArg> for EntityIdStrategy {
    fn from(value: EntityIdsArg) -> Self {
        match value {
            EntityIdsArg::Random => EntityIdStrategy::Random,
            EntityIdsArg::Sequential => EntityIdStrategy::Sequential,
        }
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Schema => print_schema(),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        input_file,
        output_dir,
        config,
        entity_ids,
        ordinal_base,
        log_file,
        report,
    } = args;

    init_logging(&log_file)?;

    let overrides = OptionOverrides {
        entity_ids: entity_ids.map(EntityIdStrategy::from),
        ordinal_base,
    };
    let options = load_options(config.as_deref(), overrides)?;

    tracing::info!(event = "input_loading", path = %input_file.display());
    let domain: TravelDomain = serde_json::from_str(&fs::read_to_string(&input_file)?)?;

    let mut sink = FsSink::prepare(&output_dir, &options)?;

    let timer = Instant::now();
    let result = GenerationEngine::new(options).run(&domain, &mut sink)?;

    if report {
        let report_path = output_dir.join("generation_report.json");
        fs::write(&report_path, serde_json::to_vec_pretty(&result.report)?)?;
        tracing::info!(event = "report_written", path = %report_path.display());
    }

    tracing::info!(
        event = "run_finished",
        status = "success",
        events = result.report.events_emitted,
        duration_ms = timer.elapsed().as_millis() as u64
    );

    Ok(())
}

fn print_schema() -> Result<(), CliError> {
    let schema = schema_for!(TravelDomain);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
