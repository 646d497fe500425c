use std::{error::Error, io, path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use engine::{
    DateFormat, DisplayOrder, EngineError, ExportFormat, JsonFileStore, Record, RecordId, Store,
    Summary, SyncStatus, Tracker, export,
};

mod settings;

#[derive(Parser, Debug)]
#[command(name = "habitlog")]
#[command(about = "Log daily coffee, books and trips")]
struct Cli {
    /// Config file path (TOML).
    #[arg(long, default_value = settings::DEFAULT_CONFIG_PATH)]
    config: String,

    /// Data file (also read from `HABITLOG_DATA_PATH`).
    #[arg(long)]
    data_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log a new entry.
    Add(Values),
    /// Change the values of an existing entry.
    Edit(EditArgs),
    /// Delete an entry by id.
    Delete(IdArgs),
    /// Print the entries.
    List(ListArgs),
    /// Print totals, averages and maxima.
    Stats,
    /// Write all entries to a file or stdout.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct Values {
    /// Accepts `.` or `,` as decimal separator.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    coffee: String,
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    books: String,
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    trips: String,
}

#[derive(Args, Debug)]
struct EditArgs {
    #[arg(long)]
    id: i64,
    #[command(flatten)]
    values: Values,
}

#[derive(Args, Debug)]
struct IdArgs {
    #[arg(long)]
    id: i64,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// recent or coffee; defaults to the configured order.
    #[arg(long)]
    order: Option<DisplayOrder>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(long, default_value = "json")]
    format: ExportFormat,
    /// Target file or directory; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    let mut settings = settings::Settings::new(&cli.config)?;
    if let Some(data_path) = cli.data_path {
        settings.data_path = data_path;
    }

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "habitlog={level},engine={level}",
            level = settings.level
        ))
        .with_writer(io::stderr)
        .init();

    let mut tracker = Tracker::builder(JsonFileStore::new(&settings.data_path))
        .date_format(DateFormat::new(&settings.timezone, &settings.date_format)?)
        .order(settings.order)
        .build();

    Ok(execute(&mut tracker, cli.command, &mut io::stdout())?)
}

fn execute<S: Store>(
    tracker: &mut Tracker<S>,
    command: Command,
    out: &mut impl io::Write,
) -> Result<ExitCode, EngineError> {
    match command {
        Command::Add(values) => {
            let ack = tracker.submit_entry(&values.coffee, &values.books, &values.trips)?;
            writeln!(out, "{} ({})", ack.message(), ack.id)?;
            Ok(sync_code(&ack.sync))
        }
        Command::Edit(args) => {
            let id = RecordId::new(args.id);
            if tracker.begin_edit(id).is_err() {
                eprintln!("cannot edit: entry {id} not found");
                return Ok(ExitCode::from(2));
            }
            let values = args.values;
            let ack = tracker.submit_entry(&values.coffee, &values.books, &values.trips)?;
            writeln!(out, "{} ({})", ack.message(), ack.id)?;
            Ok(sync_code(&ack.sync))
        }
        Command::Delete(args) => {
            let ack = tracker.delete_entry(RecordId::new(args.id));
            writeln!(out, "{} ({})", ack.message(), ack.id)?;
            Ok(sync_code(&ack.sync))
        }
        Command::List(args) => {
            if let Some(order) = args.order {
                tracker.set_order(order);
            }
            for record in tracker.ordered() {
                writeln!(out, "{}", format_record(record))?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Stats => {
            let summary = Summary::from_records(tracker.records());
            writeln!(out, "entries: {}", summary.count)?;
            for category in engine::Category::ALL {
                let stats = summary.category(category);
                writeln!(
                    out,
                    "{:<7} total {:>9.2}  avg {:>7.2}  max {:>7.2}",
                    category.label(),
                    stats.total,
                    stats.average,
                    stats.max
                )?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Export(args) => {
            let result = match &args.out {
                Some(path) => export::export_to_path(tracker.records(), args.format, path)
                    .map(|target| eprintln!("exported to {}", target.display())),
                None => export::export_to_writer(tracker.records(), args.format, &mut *out)
                    .map(|_| ()),
            };
            match result {
                Ok(()) => Ok(ExitCode::SUCCESS),
                Err(EngineError::NothingToExport) => {
                    eprintln!("nothing to export");
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => Err(err),
            }
        }
    }
}

/// A failed save keeps the change in memory only, which for a one-shot
/// command means it is lost.
fn sync_code(sync: &SyncStatus) -> ExitCode {
    match sync {
        SyncStatus::Saved => ExitCode::SUCCESS,
        SyncStatus::Failed(err) => {
            eprintln!("warning: change not saved: {err}");
            ExitCode::FAILURE
        }
    }
}

fn format_record(record: &Record) -> String {
    format!(
        "{:>14}  {:<12} coffee {:>7}  books {:>7}  trips {:>7}",
        record.id(),
        record.date(),
        record.coffee(),
        record.books(),
        record.trips()
    )
}
