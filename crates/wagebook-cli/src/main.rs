//! wagebook CLI: log hours worked per day and see what they pay.
//!
//! Commands: show, day, log, quick, currency, clear, session, completions

mod advice;
mod config;
mod render;
mod session_loop;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use wagebook_advice::{AdviceError, AdviceRequest};
use wagebook_core::{Currency, DateKey, Ledger, MonthCursor, MonthView};
use wagebook_store::FileStore;

use crate::advice::Advisor;
use crate::config::Config;
use crate::render::Format;

const LOG_ENV: &str = "WAGEBOOK_LOG";

#[derive(Parser)]
#[command(name = "wagebook")]
#[command(version)]
#[command(about = "Daily salary log with monthly totals")]
struct Cli {
    /// Where records are kept (default: $WAGEBOOK_HOME or ~/.wagebook)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: $WAGEBOOK_CONFIG or <data-dir>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show a month's calendar and total
    Show {
        /// Month to show, YYYY-MM (default: this month)
        #[arg(long)]
        month: Option<MonthCursor>,
        #[arg(long, value_enum, default_value = "table")]
        format: Format,
    },
    /// Show the record for one day
    Day {
        /// YYYY-MM-DD
        date: DateKey,
        #[arg(long, value_enum, default_value = "table")]
        format: Format,
    },
    /// Record (or overwrite) the pay for one day
    Log {
        /// YYYY-MM-DD
        date: DateKey,
        /// Hourly rate (default: the last logged rate)
        #[arg(long, allow_hyphen_values = true)]
        rate: Option<String>,
        /// Hours worked (default: the day's existing hours, or 0)
        #[arg(long, allow_hyphen_values = true)]
        hours: Option<String>,
    },
    /// Quick calculator, not tied to a date
    Quick {
        #[arg(long, allow_hyphen_values = true)]
        rate: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        hours: Option<String>,
        /// Ask the AI for advice on the result
        #[arg(long)]
        advice: bool,
    },
    /// Show or set the display currency
    Currency {
        /// TWD, USD, JPY or EUR
        code: Option<Currency>,
    },
    /// Delete every saved record
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Interactive session
    Session,
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "wagebook", &mut io::stdout());
        return Ok(());
    }

    let data_dir = config::resolve_data_dir(cli.data_dir.as_deref())?;
    let config = Config::load(cli.config.as_deref(), &data_dir)?;
    let store = FileStore::open(&data_dir)
        .with_context(|| format!("cannot open data directory {}", data_dir.display()))?;
    tracing::debug!(dir = %data_dir.display(), "opened store");

    let today = chrono::Local::now().date_naive();
    let mut ledger = Ledger::open(store, today).with_fallback_rate(config.fallback_rate);

    match cli.command {
        Some(Commands::Show { month, format }) => {
            if let Some(month) = month {
                ledger.show_month(month);
            }
            print_month(&ledger.month_view(), ledger.currency(), format)?;
        }
        Some(Commands::Day { date, format }) => {
            let currency = ledger.currency();
            match (ledger.records().get(&date), format) {
                (Some(record), Format::Table) => {
                    println!("{}", render::record_line(&date, record, currency));
                }
                (Some(record), Format::Json) => {
                    println!("{}", serde_json::to_string_pretty(&render::record_json(&date, record))?);
                }
                (None, Format::Table) => println!("{date}: no record"),
                (None, Format::Json) => println!("null"),
            }
        }
        Some(Commands::Log { date, rate, hours }) => {
            ledger.select_date(date)?;
            if let Some(rate) = rate {
                ledger.edit_rate(&rate)?;
            }
            if let Some(hours) = hours {
                ledger.edit_hours(&hours)?;
            }
            let (date, record) = ledger.save()?;
            println!("{}", render::record_line(&date, &record, ledger.currency()));
            ledger.show_month(MonthCursor::containing(date.date()));
            println!(
                "Monthly total for {}: {} {}",
                ledger.cursor(),
                ledger.currency(),
                wagebook_core::format_amount(ledger.monthly_total())
            );
        }
        Some(Commands::Quick { rate, hours, advice }) => {
            if let Some(rate) = rate {
                ledger.set_quick_rate(&rate);
            }
            if let Some(hours) = hours {
                ledger.set_quick_hours(&hours);
            }
            print!("{}", render::quick_block(&ledger.quick_inputs(), ledger.currency()));
            if advice {
                let advisor = Advisor::from_settings(&config.advice)?;
                let request = AdviceRequest::from_inputs(ledger.quick_inputs(), ledger.currency());
                match advisor.ask(&request) {
                    Ok(outcome) => println!("\nAI advice:\n{}", outcome.text()),
                    Err(AdviceError::NothingToAdvise) => {
                        eprintln!("Enter a rate and hours first; there is nothing to advise on.");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Some(Commands::Currency { code }) => match code {
            Some(currency) => {
                ledger.set_currency(currency);
                println!("Currency set to {currency}");
            }
            None => println!("{}", ledger.currency()),
        },
        Some(Commands::Clear { yes }) => {
            let confirmed = yes || confirm("Delete all saved records? This cannot be undone. [y/N] ")?;
            if ledger.clear_all(confirmed) {
                println!("All saved records cleared.");
            } else {
                println!("Nothing was deleted.");
            }
        }
        Some(Commands::Session) => {
            let advisor = Advisor::from_settings(&config.advice)?;
            let stdin = io::stdin();
            session_loop::run(&mut ledger, &advisor, stdin.lock(), io::stdout())?;
        }
        // Printed above, before the store is opened.
        Some(Commands::Completions { .. }) => {}
        None => {
            println!("wagebook v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "{}: {} {}",
                ledger.cursor(),
                ledger.currency(),
                wagebook_core::format_amount(ledger.monthly_total())
            );
            println!("Run `wagebook --help` for usage.");
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_month(view: &MonthView, currency: Currency, format: Format) -> Result<()> {
    match format {
        Format::Table => print!("{}", render::month_table(view, currency)),
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(&render::month_json(view, currency))?
        ),
    }
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{question}")?;
    stdout.flush()?;
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer)? == 0 {
        bail!("no answer on stdin; pass --yes to clear without asking");
    }
    Ok(session_loop::is_yes(&answer))
}
