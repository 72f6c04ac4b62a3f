use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use icd11_classifier::report::{
    render_chapters, render_classifications, render_records, render_summary, to_json,
    write_records_csv, write_summary_csv,
};
use icd11_classifier::{
    ClassifierConfig, CodeClassifier, CodeQuery, DiagnosisCollection, Session, chapters, load_files,
};
use log::info;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "icd11")]
#[command(about = "Classify diagnosis codes into ICD-11 chapters", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Maximum rows shown in tables
    #[arg(long, global = true)]
    limit: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// List the ICD-11 chapter ranges
    Chapters,
    /// Classify individual codes
    Classify {
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Load diagnosis files and preview the first rows
    Load {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Count diagnoses per ICD-11 chapter
    Summary {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Find diagnoses whose code lies between two codes (inclusive)
    Range {
        /// Start code, e.g. 2A00
        #[arg(long)]
        start: String,
        /// End code, e.g. 2F9Z
        #[arg(long)]
        end: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Find diagnoses whose code starts with a prefix
    Prefix {
        /// Code prefix, e.g. 2A20
        prefix: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Chapters => match cli.format {
            OutputFormat::Json => println!("{}", to_json(chapters())?),
            _ => print!("{}", render_chapters(chapters())),
        },
        Commands::Classify { codes } => {
            let classifier = CodeClassifier::new();
            let results: Vec<_> = codes
                .iter()
                .map(|code| (code.clone(), classifier.resolve(code)))
                .collect();
            match cli.format {
                OutputFormat::Json => println!("{}", to_json(&results)?),
                _ => print!("{}", render_classifications(&results)),
            }
        }
        Commands::Load { files } => {
            let session = load_session(files, &config)?;
            println!("Loaded {} diagnoses.", session.collection().len());
            let limit = cli.limit.unwrap_or(config.preview_rows);
            emit_records(session.collection(), cli.format, Some(limit))?;
            if cli.format == OutputFormat::Table {
                print!("{}", session.summary());
            }
        }
        Commands::Summary { files } => {
            let session = load_session(files, &config)?;
            let summary = session.summary();
            match cli.format {
                OutputFormat::Table => print!("{}", render_summary(&summary)),
                OutputFormat::Json => println!("{}", to_json(&summary)?),
                OutputFormat::Csv => write_summary_csv(&summary, io::stdout().lock())?,
            }
        }
        Commands::Range { start, end, files } => {
            let query = CodeQuery::checked_range(start, end)?;
            let session = load_session(files, &config)?;
            let hits = session.run(&query);
            if cli.format == OutputFormat::Table {
                println!("Found {} diagnoses in range:", hits.len());
            }
            emit_records(&hits, cli.format, cli.limit)?;
        }
        Commands::Prefix { prefix, files } => {
            let session = load_session(files, &config)?;
            let hits = session.prefix_search(prefix);
            if cli.format == OutputFormat::Table {
                println!("Found {} diagnoses starting with '{prefix}':", hits.len());
            }
            emit_records(&hits, cli.format, cli.limit)?;
        }
    }

    io::stdout().flush().context("Failed to flush output")?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ClassifierConfig> {
    let config = match path {
        Some(path) => ClassifierConfig::from_json_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ClassifierConfig::default(),
    };
    Ok(config.with_env_overrides())
}

fn load_session(files: &[PathBuf], config: &ClassifierConfig) -> Result<Session> {
    let start = Instant::now();
    let sources = load_files(files, config).context("Failed to load diagnosis files")?;

    let mut session = Session::new(CodeClassifier::new());
    session
        .load(&sources)
        .context("Failed to classify diagnosis codes")?;

    info!(
        "Classified {} diagnoses from {} files in {:?}",
        session.collection().len(),
        session.sources().len(),
        start.elapsed()
    );
    Ok(session)
}

fn emit_records(
    records: &DiagnosisCollection,
    format: OutputFormat,
    limit: Option<usize>,
) -> Result<()> {
    match format {
        OutputFormat::Table => print!("{}", render_records(records, limit)),
        OutputFormat::Json => println!("{}", to_json(records)?),
        OutputFormat::Csv => write_records_csv(records, io::stdout().lock())?,
    }
    Ok(())
}
