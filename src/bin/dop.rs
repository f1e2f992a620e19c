//! dop - offline dopamine optimization CLI.
//!
//! Usage: dop [--data <FILE>] [--config <FILE>] <command>
//!
//!   e, entry     record today's entry
//!   s, summary   show today's report
//!   w, weekly    averages and correlations over the last 7 days
//!   o, optimal   optimal zone detection
//!   predict      predict focus and mood for hypothetical inputs
//!
//! Environment:
//!   DOP_DATA     data file (default ./data.json), same as `--data`
//!   DOP_CONFIG   analytics config JSON (optional), same as `--config`
//!   DOP_LOG      log filter, e.g. `dop_engine=debug`

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueHint};
use dop_engine::prompt::Prompter;
use dop_engine::report::{render_entry, render_prediction, render_weekly, render_zone};
use dop_engine::storage::DEFAULT_DATA_FILE;
use dop_engine::{AnalyticsConfig, DopModel, JsonStore, Record, Result};
use std::io::{self, StdinLock, Stdout, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Logs go to stderr so they never mix with the report on stdout.
fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("DOP_LOG").unwrap_or_else(|_| EnvFilter::new("dop_engine=warn"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .with(filter)
            .init();
    });
}

#[derive(Parser)]
#[command(name = "dop", version, about = "Offline dopamine optimization tracker")]
struct Cli {
    /// Data file with one entry per day
    #[arg(
        long,
        global = true,
        env = "DOP_DATA",
        default_value = DEFAULT_DATA_FILE,
        value_hint = ValueHint::FilePath
    )]
    data: PathBuf,

    /// Analytics configuration JSON
    #[arg(long, global = true, env = "DOP_CONFIG", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Record today's entry
    #[command(alias = "e")]
    Entry,

    /// Show today's report
    #[command(alias = "s")]
    Summary,

    /// Averages and correlations over the last 7 days
    #[command(alias = "w")]
    Weekly,

    /// Optimal zone detection
    #[command(alias = "o")]
    Optimal,

    /// Predict focus and mood for hypothetical inputs
    Predict,
}

struct App {
    store: JsonStore,
    model: DopModel,
    today: NaiveDate,
    prompter: Prompter<StdinLock<'static>, Stdout>,
}

impl App {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => AnalyticsConfig::from_json_file(path)?,
            None => AnalyticsConfig::default(),
        };

        Ok(Self {
            store: JsonStore::new(cli.data.clone()),
            model: DopModel::with_config(config),
            today: Local::now().date_naive(),
            prompter: Prompter::new(io::stdin().lock(), io::stdout()),
        })
    }

    fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Entry => self.entry(),
            Command::Summary => self.summary(),
            Command::Weekly => self.weekly(),
            Command::Optimal => self.optimal(),
            Command::Predict => self.predict(),
        }
    }

    fn print_entry(&self, record: &Record, title: &str) -> Result<()> {
        let history = self.store.load_all()?;
        let report = self.model.entry_report(record, &history);
        print!("{}", render_entry(record, &report, title));
        println!();
        Ok(())
    }

    /// `dop e`: view / overwrite / cancel when today already has an entry
    fn entry(&mut self) -> Result<()> {
        if let Some(existing) = self.store.get_by_date(self.today)? {
            println!("\nEntry already exists for date {}.", self.today);
            println!("1) View");
            println!("2) Overwrite");
            println!("3) Cancel");

            loop {
                let choice = self.prompter.read_line("Select (1-3): ")?;
                match choice.as_str() {
                    "1" => return self.print_entry(&existing, "Existing Entry"),
                    "2" => {
                        println!("\nOverwriting existing entry...\n");
                        break;
                    }
                    "3" => {
                        println!("Cancelled.");
                        return Ok(());
                    }
                    _ => println!("Invalid selection. Please choose 1, 2, or 3."),
                }
            }
        }

        println!("\nEnter today's data:\n");
        let inputs = self.prompter.stimulus_inputs()?;
        let ratings = self.prompter.behavioral_ratings()?;
        let record = Record::from_inputs(self.today, inputs, ratings)?;

        self.store.replace(record.clone())?;
        self.print_entry(&record, "Entry saved")
    }

    fn summary(&self) -> Result<()> {
        match self.store.get_by_date(self.today)? {
            Some(record) => self.print_entry(&record, "Today's summary"),
            None => {
                println!("No entry found for today. Use `dop e` first.");
                Ok(())
            }
        }
    }

    fn weekly(&self) -> Result<()> {
        let history = self.store.load_all()?;
        if history.is_empty() {
            println!("No data available for weekly analysis.");
            return Ok(());
        }
        match self.model.weekly_summary(&history, self.today) {
            Some(summary) => print!("{}", render_weekly(&summary)),
            None => println!("No entries in the last 7 days."),
        }
        Ok(())
    }

    fn optimal(&self) -> Result<()> {
        let history = self.store.load_all()?;
        if history.is_empty() {
            println!("No historical data available.");
            return Ok(());
        }
        print!("{}", render_zone(&self.model.optimal_zone(&history)));
        Ok(())
    }

    fn predict(&mut self) -> Result<()> {
        let history = self.store.load_all()?;
        println!("\nProvide hypothetical inputs:");
        let scenario = self.prompter.scenario()?;
        print!("{}", render_prediction(&self.model.predict(&history, &scenario)));
        Ok(())
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let result = App::from_cli(&cli).and_then(|mut app| app.run(cli.command));
    let _ = io::stdout().flush();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
