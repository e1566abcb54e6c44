use anyhow::{Context, Result};
use bkrldc_ingest::{FinalRecord, parse_table};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info};

mod config;
mod export;
mod fetch;
mod logging;
mod state;

use config::Config;
use state::DataLayout;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BKRLDC_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "bkrldc",
    version,
    long_version = LONG_VERSION,
    about = "Central bank deposit-rate bulletin to CSV"
)]
struct Cli {
    /// Log file, "-" for stderr (default: output.log_file from config)
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download today's bulletin, keep the raw text and write the table
    Fetch {
        /// Bulletin URL (default: source.url from config)
        #[arg(long)]
        url: Option<String>,

        /// Root of texts/ and tables/ (default: output.data_dir from config)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Parse a saved bulletin file
    Parse {
        file: PathBuf,

        /// Write here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Emit JSON lines instead of CSV
        #[arg(long)]
        json: bool,

        #[arg(long, value_enum, default_value_t = InputEncoding::Big5)]
        encoding: InputEncoding,
    },

    /// Manage ~/.bkrldc/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InputEncoding {
    Big5,
    Utf8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = config::load_config();

    let log_file = log_target(cli.log_file.as_deref(), loaded.as_ref().ok());
    logging::init(&log_file)?;

    let result = match loaded {
        Ok(cfg) => run(cli.command, &cfg).await,
        Err(e) => Err(e),
    };
    if let Err(e) = &result {
        error!("{e:#}");
    }
    result
}

/// `--log-file` wins, then the config. Without a readable config, log to stderr.
fn log_target(flag: Option<&str>, cfg: Option<&Config>) -> String {
    match (flag, cfg) {
        (Some(flag), _) => flag.to_string(),
        (None, Some(cfg)) => cfg.output.log_file.clone(),
        (None, None) => "-".to_string(),
    }
}

async fn run(command: Command, cfg: &Config) -> Result<()> {
    match command {
        Command::Fetch { url, data_dir } => {
            let url = url.unwrap_or_else(|| cfg.source.url.clone());
            let layout = DataLayout::new(data_dir.unwrap_or_else(|| cfg.output.data_dir.clone()));
            fetch_bulletin(cfg, &url, &layout).await?;
        }

        Command::Parse {
            file,
            out,
            json,
            encoding,
        } => {
            let bytes = fs::read(&file).with_context(|| format!("read {}", file.display()))?;
            let text = match encoding {
                InputEncoding::Big5 => fetch::decode_big5(&bytes),
                InputEncoding::Utf8 => String::from_utf8(bytes)
                    .with_context(|| format!("{} is not UTF-8", file.display()))?,
            };

            let (bulletin, table) =
                parse_table(&text).with_context(|| format!("parsing {}", file.display()))?;
            info!(
                reference_date = %bulletin.reference_date,
                rows = table.len(),
                "parsed {}",
                file.display()
            );

            let writer: Box<dyn Write> = match &out {
                Some(p) => Box::new(
                    fs::File::create(p).with_context(|| format!("create {}", p.display()))?,
                ),
                None => Box::new(std::io::stdout().lock()),
            };
            if json {
                export::write_json_lines(writer, &table)?;
            } else {
                export::write_csv(writer, &table)?;
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config(cfg)?,
        },
    }

    Ok(())
}

async fn fetch_bulletin(cfg: &Config, url: &str, layout: &DataLayout) -> Result<()> {
    layout.ensure()?;

    let today = state::today_in(&cfg.source.timezone)?;
    let raw_path = layout.raw_text_path(&cfg.source.filename, today);

    let client = reqwest::Client::new();
    let bytes = fetch::download_to(&client, url, &raw_path).await?;
    let text = fetch::decode_big5(&bytes);

    let (bulletin, table) =
        parse_table(&text).with_context(|| format!("parsing {}", raw_path.display()))?;

    let table_path = layout.table_path(&cfg.source.filename, bulletin.reference_date);
    export::write_csv_file(&table_path, &table)?;
    info!(rows = table.len(), "table saved as {}", table_path.display());

    println!(
        "Bulletin dated {}: {} rows from {} banks",
        bulletin.reference_date,
        table.len(),
        bank_count(&table)
    );
    println!("Raw text: {}", raw_path.display());
    println!("Table:    {}", table_path.display());
    println!("Data dir: {}", layout.root().display());

    Ok(())
}

fn bank_count(table: &[FinalRecord]) -> usize {
    table
        .iter()
        .map(|r| r.bank_code.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}
