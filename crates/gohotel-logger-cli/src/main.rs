//! gohotel-log - inspect and ship the GoHotel client log buffer

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};

use gohotel_logger::config::{ConfigLevel, ConfigSource, EnvConfigSource, FileConfigSource};
use gohotel_logger::console::{FileConsole, SharedConsole, StdConsole};
use gohotel_logger::probe::HostProbe;
use gohotel_logger::report::HttpTransport;
use gohotel_logger::storage::FileStorage;
use gohotel_logger::{
    resolve_config, BatchOutcome, Environment, LogData, LogEntry, LogFilter, LogLevel, Logger,
};

/// GoHotel client log tool
#[derive(Parser, Debug)]
#[command(name = "gohotel-log", author, version, about, long_about = None)]
struct Cli {
    /// YAML config file (defaults to the user config file)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the backend API; the report URL is resolved against it
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Directory holding the persisted log buffer
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Write console output to this file instead of stdout/stderr
    #[arg(long, global = true)]
    console_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Record an entry
    Log {
        /// DEBUG, INFO, WARN, ERROR or FATAL
        level: LogLevel,
        message: String,
        /// JSON object attached as entry data
        #[arg(long)]
        data: Option<String>,
        /// Page the entry belongs to
        #[arg(long)]
        page: Option<String>,
    },
    /// Show buffered entries
    List {
        /// Minimum level
        #[arg(long)]
        level: Option<LogLevel>,
        /// Earliest timestamp (RFC 3339)
        #[arg(long)]
        since: Option<DateTime<Utc>>,
        /// Latest timestamp (RFC 3339)
        #[arg(long)]
        until: Option<DateTime<Utc>>,
        #[arg(long)]
        page: Option<String>,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Summarize the buffer
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Send the whole buffer to the ingestion endpoint
    Report,
    /// Empty the buffer
    Clear,
    /// Print the effective configuration
    Config,
}

fn build_console(path: Option<&PathBuf>) -> SharedConsole {
    match path {
        Some(path) => Arc::new(FileConsole::new(path)),
        None => Arc::new(StdConsole::new()),
    }
}

fn build_logger(cli: &Cli, probe: Arc<HostProbe>) -> Result<Logger> {
    let file = match &cli.config {
        Some(path) => FileConfigSource::new(path, ConfigLevel::Workspace),
        None => FileConfigSource::user(),
    };
    let env = EnvConfigSource::new();
    let sources: [&dyn ConfigSource; 2] = [&file, &env];
    let config = resolve_config(Environment::detect(), &sources)
        .with_context(|| format!("Failed to load config from {}", file.path().display()))?;

    let api_base = cli
        .api_base
        .clone()
        .or_else(|| std::env::var("GOHOTEL_API_BASE").ok())
        .unwrap_or_default();
    let storage = match &cli.storage_dir {
        Some(dir) => FileStorage::new(dir),
        None => FileStorage::user(),
    };

    Ok(Logger::builder()
        .config(config)
        .storage(Arc::new(storage))
        .transport(Arc::new(HttpTransport::new(api_base)))
        .probe(probe)
        .console(build_console(cli.console_file.as_ref()))
        .build())
}

fn parse_data(raw: Option<&str>) -> Result<Option<LogData>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let data: LogData = serde_json::from_str(raw).context("--data must be a JSON object")?;
    Ok(Some(data))
}

fn print_entry(entry: &LogEntry) {
    let time = entry.timestamp().with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
    let mut line = format!(
        "{} {:<5} {} {}",
        time,
        entry.level_name(),
        entry.page(),
        entry.message()
    );
    if !entry.data().is_empty() {
        line.push(' ');
        line.push_str(&serde_json::Value::Object(entry.data().clone()).to_string());
    }
    println!("{}", line);
}

async fn run(cli: Cli) -> Result<()> {
    let probe = Arc::new(HostProbe::new().with_app_version(env!("CARGO_PKG_VERSION")));
    let logger = build_logger(&cli, probe.clone())?;

    match cli.command {
        Commands::Log {
            level,
            message,
            data,
            page,
        } => {
            if let Some(page) = page {
                probe.push_page(page);
            }
            let data = parse_data(data.as_deref())?;
            match logger.log(level, message, data) {
                Some(entry) => println!("Recorded {} entry at {}", entry.level_name(), entry.timestamp()),
                None => println!("Dropped: below the configured level {}", logger.config().level),
            }
        }
        Commands::List {
            level,
            since,
            until,
            page,
            json,
        } => {
            let filter = LogFilter {
                level,
                start_time: since,
                end_time: until,
                page,
            };
            let view = logger.get_logs(filter);
            if json {
                println!("{}", serde_json::to_string_pretty(&view.to_vec())?);
            } else {
                for entry in &view {
                    print_entry(entry);
                }
            }
        }
        Commands::Stats { json } => {
            let stats = logger.statistics();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Total: {}", stats.total);
                for (level, count) in &stats.by_level {
                    println!("  {:<5} {}", level, count);
                }
                println!("Pages:");
                for (page, count) in &stats.by_page {
                    println!("  {} {}", page, count);
                }
                if !stats.recent_errors.is_empty() {
                    println!("Recent errors:");
                    for entry in &stats.recent_errors {
                        print_entry(entry);
                    }
                }
            }
        }
        Commands::Report => match logger.report_logs(None).await {
            BatchOutcome::Skipped => println!("Nothing to report"),
            BatchOutcome::Delivered(count) => println!("Reported {} entries", count),
            BatchOutcome::Failed => {
                logger.flush_reports().await;
                bail!("Report failed");
            }
        },
        Commands::Clear => {
            let count = logger.len();
            logger.clear_logs();
            println!("Cleared {} entries", count);
        }
        Commands::Config => {
            print!("{}", serde_yaml::to_string(&logger.config())?);
        }
    }

    logger.flush_reports().await;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
