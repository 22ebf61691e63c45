//! searchlog CLI
//!
//! Command-line interface for analyzing search-history exports:
//! - Print a text or JSON summary
//! - Browse the year/month/query tree interactively
//! - Generate a default config file

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use searchlog::aggregate::{aggregate_pattern, AggregateIndex, AnalysisOptions};
use searchlog::browse::{PatternSource, Session};
use searchlog::config::{generate_default_config, Config, DisplayMode, LoggingConfig};
use searchlog::ingest::{ErrorPolicy, TimeZoneMode};
use searchlog::report::{render_json, render_text};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "searchlog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Summarize and browse exported search history")]
#[command(long_about = "searchlog reads search-history export files, counts queries by type, \
year and month, ranks search terms, and lets you filter the query tree.\n\
Without a subcommand the display mode from the config file is used.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: ./searchlog.toml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a summary of the search history
    Report {
        #[command(flatten)]
        input: InputArgs,
        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<ReportFormat>,
        /// Number of top terms to list
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Browse and filter the query tree interactively
    Browse {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Input selection shared by the analysis commands
#[derive(Args, Default)]
pub struct InputArgs {
    /// Glob pattern for export files
    #[arg(short, long)]
    pub pattern: Option<String>,
    /// Bucket by UTC instead of local time
    #[arg(long)]
    pub utc: bool,
    /// Warn about unreadable files instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,
}

impl InputArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(pattern) = &self.pattern {
            config.ingest.pattern = pattern.clone();
        }
        if self.utc {
            config.ingest.timezone = TimeZoneMode::Utc;
        }
        if self.skip_invalid {
            config.ingest.on_error = ErrorPolicy::Skip;
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Logging is configured from the config file, so failures up to here
    // are only reported on stderr by main
    let config = load_config(&cli)?;

    init_logging(&config.logging);
    tracing::debug!("searchlog v{}", env!("CARGO_PKG_VERSION"));

    execute(cli.command, config).inspect_err(|e| tracing::error!("{:#}", e))
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    Ok(config)
}

fn execute(command: Option<Commands>, mut config: Config) -> anyhow::Result<()> {
    let command = command.unwrap_or_else(|| match config.display.mode {
        DisplayMode::Text => Commands::Report {
            input: InputArgs::default(),
            format: Some(ReportFormat::Text),
            top: None,
        },
        DisplayMode::Json => Commands::Report {
            input: InputArgs::default(),
            format: Some(ReportFormat::Json),
            top: None,
        },
        DisplayMode::Browse => Commands::Browse {
            input: InputArgs::default(),
        },
    });

    match command {
        Commands::Report { input, format, top } => {
            input.apply(&mut config);
            if let Some(top) = top {
                config.analysis.top_terms = top;
            }

            let index = load_index(&config)?;
            let top_n = config.analysis.top_terms;

            match format.unwrap_or(ReportFormat::Text) {
                ReportFormat::Text => print!("{}", render_text(&index, top_n)),
                ReportFormat::Json => println!("{}", render_json(&index, top_n)?),
            }
        }

        Commands::Browse { input } => {
            input.apply(&mut config);
            let index = load_index(&config)?;

            let source = PatternSource {
                pattern: config.ingest.pattern.clone(),
                options: AnalysisOptions::from(&config),
            };
            let mut session = Session::new(index, config.analysis.top_terms).with_source(source);

            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            session
                .run(stdin.lock(), stdout.lock())
                .context("browse session failed")?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)
                        .with_context(|| format!("cannot write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}

fn load_index(config: &Config) -> anyhow::Result<AggregateIndex> {
    let options = AnalysisOptions::from(config);
    let index = aggregate_pattern(&config.ingest.pattern, &options)?;
    Ok(index)
}

/// Initialize logging on stderr so stdout carries only report output
fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("searchlog={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
