use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use regex::Regex;
use std::path::{Path, PathBuf};
use tally_core::{MonthKey, today_in};
use tally_store::LedgerStore;

mod commands;
mod config;
mod state;

use commands::{AddArgs, ChartArgs, ChartKind, ChartOutput, ListArgs, Session, SortArg};

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Personal expense ledger")]
struct Cli {
    /// Ledger CSV to use instead of the configured one
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new expense at the end of the ledger
    Add {
        /// Amount spent; must be greater than 0
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,

        #[arg(long, default_value = "")]
        category: String,

        #[arg(long, default_value = "")]
        description: String,

        /// YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY, "Oct 05, 2025" or "05 Oct 2025" (default: today)
        #[arg(long)]
        date: Option<String>,

        #[arg(long, default_value = "Cash")]
        payment_mode: String,
    },

    /// List expenses, optionally filtered and sorted
    List {
        #[arg(long)]
        category: Option<String>,

        /// Calendar month as YYYY-MM
        #[arg(long, value_parser = parse_month)]
        month: Option<MonthKey>,

        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Largest / newest first
        #[arg(long)]
        desc: bool,
    },

    /// Total spent per month
    Monthly,

    /// Entries, total and average per category
    Categories,

    /// Month-wise totals per year, then yearly totals
    Yearly,

    /// Emit a chart dataset as JSON
    Chart {
        #[arg(value_enum)]
        kind: ChartKind,

        /// Histogram buckets for `distribution`
        #[arg(long, default_value_t = 20)]
        bins: usize,

        /// How many rows `top` returns
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Write `<out>/<kind>.json` instead of printing
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Inspect the ledger file and report row counts
    Check,

    /// Manage ~/.tally/config.toml
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

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let home = state::ensure_tally_home()?;
    let cfg = config::load_config(&home)?;

    let ledger = cli.ledger.unwrap_or_else(|| cfg.ledger_path(&home));
    let session = Session {
        store: LedgerStore::new(ledger),
        money: cfg.currency.money(),
        currency_code: cfg.currency.code.clone(),
        today: today_in(&cfg.general.timezone),
    };

    let output = match cli.command {
        Command::Add {
            amount,
            category,
            description,
            date,
            payment_mode,
        } => commands::add(
            &session,
            AddArgs {
                date,
                category,
                description,
                amount,
                payment_mode,
            },
        )?,

        Command::List {
            category,
            month,
            sort,
            desc,
        } => commands::list(
            &session,
            ListArgs {
                category,
                month,
                sort,
                descending: desc,
            },
        ),

        Command::Monthly => commands::monthly(&session),
        Command::Categories => commands::categories(&session),
        Command::Yearly => commands::yearly(&session),

        Command::Chart {
            kind,
            bins,
            top,
            out,
        } => commands::chart(
            &session,
            ChartArgs {
                kind,
                bins,
                top,
                output: out.map_or(ChartOutput::Stdout, ChartOutput::Dir),
            },
        )?,

        Command::Check => commands::check(&session),

        Command::Config { command } => config_command(&home, &cfg, command)?,
    };

    println!("{output}");
    Ok(())
}

fn config_command(home: &Path, cfg: &config::Config, command: ConfigCommand) -> Result<String> {
    let path = config::config_path(home);
    match command {
        ConfigCommand::Init => {
            if config::init_config(home)? {
                Ok(format!("Wrote {}", path.display()))
            } else {
                Ok(format!("Config already exists: {}", path.display()))
            }
        }
        ConfigCommand::Show => {
            let text = toml::to_string_pretty(cfg).context("serialize config")?;
            Ok(format!(
                "# {}\n# ledger resolves to {}\n{}",
                path.display(),
                cfg.ledger_path(home).display(),
                text.trim_end()
            ))
        }
    }
}

/// Logs go to stderr so report output on stdout stays clean.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tally=info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// `YYYY-MM`, month 01..=12
fn parse_month(s: &str) -> Result<MonthKey, String> {
    let shape = Regex::new(r"^\d{4}-\d{2}$").map_err(|e| e.to_string())?;
    let s = s.trim();
    if !shape.is_match(s) {
        return Err(format!("expected YYYY-MM, got {s:?}"));
    }
    s.parse::<MonthKey>().map_err(|e| e.to_string())
}
