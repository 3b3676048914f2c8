//! Command-line front end for the organizer collections.

mod records;
mod render;

use std::io::Read as _;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use chrono::Local;
use chrono::NaiveDateTime;
use clap::Parser;
use organizer_core::KvBackend;
use organizer_core::MutationGateway;
use organizer_core::RecordStore;
use organizer_core::factory;
use organizer_core::factory::Backend;
use organizer_core::migrate;
use organizer_core::portfolio::PortfolioSummary;
use organizer_core::predicate::TaskStatus;
use organizer_core::predicate::TimeFilter;
use organizer_core::reminders;
use organizer_core::types::Appointment;
use organizer_core::types::Contact;
use organizer_core::types::Record;
use organizer_core::types::Stock;
use organizer_core::types::Task;
use organizer_core::types::Website;
use organizer_core::view::count_by_status;
use tracing::debug;

pub use records::AppointmentsCommand;
pub use records::ContactsCommand;
pub use records::StocksCommand;
pub use records::TasksCommand;
pub use records::WebsitesCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BackendArg {
    File,
    Sqlite,
}

/// Personal organizer: contacts, appointments, tasks, stocks and websites.
#[derive(Debug, Parser)]
#[command(name = "organizer", version)]
pub struct Cli {
    /// Data directory (defaults to `$ORGANIZER_DATA_DIR` or `./.organizer`).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Persistence backend (defaults to `$ORGANIZER_BACKEND` or `file`).
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendArg>,

    /// Evaluate time-dependent views as of this local time
    /// (`YYYY-MM-DD HH:MM[:SS]`).
    #[arg(long, global = true, hide = true)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Manage contacts.
    #[command(subcommand)]
    Contacts(ContactsCommand),
    /// Manage appointments.
    #[command(subcommand)]
    Appointments(AppointmentsCommand),
    /// Manage tasks.
    #[command(subcommand)]
    Tasks(TasksCommand),
    /// Manage the stock portfolio.
    #[command(subcommand)]
    Stocks(StocksCommand),
    /// Manage bookmarked websites.
    #[command(subcommand)]
    Websites(WebsitesCommand),
    /// Show appointments starting within the next 24 hours.
    Reminders {
        /// Show every appointment scheduled today instead.
        #[arg(long)]
        today: bool,
        /// Mark the listed reminders as sent.
        #[arg(long, conflicts_with = "today")]
        mark: bool,
    },
    /// Show portfolio totals.
    Portfolio {
        #[arg(long)]
        json: bool,
    },
    /// Write every collection as one JSON document.
    Export {
        /// Output file (stdout when omitted).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Replace collections from a document written by `export`.
    Import {
        /// Input file (stdin when omitted).
        input: Option<PathBuf>,
    },
    /// Copy the file-backed data directory into a SQLite database.
    Migrate {
        /// Destination SQLite file (defaults to `$ORGANIZER_DB` or
        /// `<data dir>/organizer.db`).
        #[arg(long)]
        sqlite: Option<PathBuf>,
    },
    /// Show record counts per collection.
    Stats,
}

/// Resolved backend and clock for one invocation.
pub struct Session {
    backend: Arc<dyn KvBackend>,
    now: NaiveDateTime,
}

impl Session {
    pub fn new(backend: Arc<dyn KvBackend>, now: NaiveDateTime) -> Self {
        Self { backend, now }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn store<R: Record>(&self) -> RecordStore<R> {
        RecordStore::new(Arc::clone(&self.backend))
    }

    pub fn gateway<R: Record>(&self) -> MutationGateway<R> {
        MutationGateway::new(self.store())
    }
}

fn parse_now(raw: &str) -> anyhow::Result<NaiveDateTime> {
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
        .with_context(|| format!("invalid --now value: {raw}"))
}

fn resolve_backend(arg: Option<BackendArg>) -> anyhow::Result<Option<Backend>> {
    match arg {
        None => Ok(None),
        Some(BackendArg::File) => Ok(Some(Backend::File)),
        Some(BackendArg::Sqlite) => Backend::parse("sqlite")
            .map(Some)
            .context("sqlite backend not compiled; rebuild with the `sqlite` feature"),
    }
}

/// Execute the parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| factory::data_dir_from_env(&cwd));
    debug!("data dir: {}", data_dir.display());
    let now = match &cli.now {
        Some(raw) => parse_now(raw)?,
        None => Local::now().naive_local(),
    };

    let cmd = match cli.cmd {
        Command::Migrate { sqlite } => {
            let dest = sqlite.unwrap_or_else(|| factory::sqlite_path(&data_dir));
            let n = migrate::migrate_file_to_sqlite(&data_dir, &dest)?;
            println!("Migrated {n} collections");
            return Ok(());
        }
        cmd => cmd,
    };

    let backend = factory::open_backend(&data_dir, resolve_backend(cli.backend)?)?;
    let session = Session::new(backend, now);
    match cmd {
        Command::Contacts(cmd) => records::contacts(&session, cmd),
        Command::Appointments(cmd) => records::appointments(&session, cmd),
        Command::Tasks(cmd) => records::tasks(&session, cmd),
        Command::Stocks(cmd) => records::stocks(&session, cmd),
        Command::Websites(cmd) => records::websites(&session, cmd),
        Command::Reminders { today, mark } => run_reminders(&session, today, mark),
        Command::Portfolio { json } => {
            let stocks = session.store::<Stock>().load()?;
            let summary = PortfolioSummary::from_stocks(&stocks);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render::portfolio(&stocks, &summary));
            }
            Ok(())
        }
        Command::Export { output } => {
            let doc = migrate::export_all(&session.backend)?;
            let text = serde_json::to_string_pretty(&doc)?;
            match output {
                Some(path) => std::fs::write(&path, text + "\n")
                    .with_context(|| format!("write {}", path.display()))?,
                None => println!("{text}"),
            }
            Ok(())
        }
        Command::Import { input } => {
            let mut data = String::new();
            match input {
                Some(path) => {
                    data = std::fs::read_to_string(&path)
                        .with_context(|| format!("read {}", path.display()))?;
                }
                None => {
                    std::io::stdin().read_to_string(&mut data)?;
                }
            }
            let doc: serde_json::Value =
                serde_json::from_str(&data).context("import document is not valid JSON")?;
            let n = migrate::import_all(session.backend.as_ref(), &doc)?;
            println!("Imported {n} collections");
            Ok(())
        }
        Command::Stats => run_stats(&session),
        Command::Migrate { .. } => unreachable!("handled before opening a backend"),
    }
}

fn run_reminders(session: &Session, today: bool, mark: bool) -> anyhow::Result<()> {
    let now = session.now();
    let appts = session.store::<Appointment>().load()?;
    let listed = if today {
        reminders::today(&appts, now)
    } else {
        reminders::pending_reminders(&appts, now)
    };
    if listed.is_empty() {
        println!("No reminders.");
        return Ok(());
    }
    for appt in &listed {
        println!("{}", render::appointment(appt, now));
    }
    if mark {
        let mut gw = session.gateway::<Appointment>();
        for appt in &listed {
            gw.mark_reminder_sent(&appt.id)?;
        }
        println!("Marked {} reminders as sent", listed.len());
    }
    Ok(())
}

fn run_stats(session: &Session) -> anyhow::Result<()> {
    let now = session.now();
    let contacts = session.store::<Contact>().load()?;
    let appts = session.store::<Appointment>().load()?;
    let tasks = session.store::<Task>().load()?;
    let stocks = session.store::<Stock>().load()?;
    let websites = session.store::<Website>().load()?;
    println!("contacts: {}", contacts.len());
    println!(
        "appointments: {} ({} upcoming, {} past)",
        appts.len(),
        count_by_status(&appts, TimeFilter::Upcoming, now),
        count_by_status(&appts, TimeFilter::Past, now),
    );
    println!(
        "tasks: {} ({} pending, {} completed)",
        tasks.len(),
        count_by_status(&tasks, TaskStatus::Pending, now),
        count_by_status(&tasks, TaskStatus::Completed, now),
    );
    println!("stocks: {}", stocks.len());
    println!("websites: {}", websites.len());
    Ok(())
}
