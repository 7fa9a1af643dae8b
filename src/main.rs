use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::io::Write;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use poker_ledger::{
    check_ledger, compute_stats, cumulative_series, people_from_last_n_sessions, Baseline,
    CsvFileSource, Ledger, OverallStat, RowSource, Series,
};

/// Command-line arguments structure.
#[derive(Parser, Debug)]
#[clap(version, about = "Running results of a recurring poker game")]
struct Args {
    /// Path template of the sheet files, `{sheet}` is replaced with the sheet key.
    #[clap(long, env = "POKER_LEDGER_SOURCE", default_value = "sheets/{sheet}.csv")]
    source: String,

    /// Log filter, e.g. `warn` or `poker_ledger=debug`.
    #[clap(long, env = "POKER_LEDGER_LOG", default_value = "warn")]
    log_level: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug)]
struct Sheet {
    /// Sheet key, usually the year.
    sheet: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the normalized sessions as JSON.
    Ledger(Sheet),
    /// Print the per-player stats table as CSV.
    Stats {
        #[clap(flatten)]
        sheet: Sheet,
        /// Print the leaderboard records as JSON instead.
        #[clap(long)]
        overall: bool,
    },
    /// Print players by attendance over the last N sessions.
    Ranking {
        #[clap(flatten)]
        sheet: Sheet,
        /// Number of sessions, all of them by default.
        #[clap(short)]
        n: Option<usize>,
    },
    /// Print cumulative results over the last N sessions as CSV.
    Series {
        #[clap(flatten)]
        sheet: Sheet,
        /// Number of sessions, all of them by default.
        #[clap(short)]
        n: Option<usize>,
        /// Player to plot, repeatable. Defaults to who played the last session.
        #[clap(long = "person")]
        people: Vec<String>,
        /// Start the running sum at the first session of the window.
        #[clap(long)]
        from_window_start: bool,
    },
    /// Report sessions whose cash-outs do not match the buy-ins.
    Check(Sheet),
    /// Leaderboard, stats table, default series and consistency check.
    Report {
        #[clap(flatten)]
        sheet: Sheet,
        /// Number of sessions in the series, all of them by default.
        #[clap(short)]
        n: Option<usize>,
    },
}

fn setup_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn load(source: &dyn RowSource, sheet: &Sheet) -> Result<Ledger> {
    let rows = source.fetch(&sheet.sheet)?;
    let ledger = Ledger::build(&rows)
        .with_context(|| format!("Failed to build the ledger of sheet {}", sheet.sheet))?;
    tracing::info!(sheet = %sheet.sheet, sessions = ledger.len(), "ledger loaded");
    Ok(ledger)
}

fn write_overall(out: &mut impl Write, overall: &[OverallStat]) -> Result<()> {
    for stat in overall {
        writeln!(
            out,
            "{}: {} ({})",
            stat.desc,
            stat.amount,
            stat.person.as_deref().unwrap_or("nobody")
        )?;
    }
    Ok(())
}

fn write_series(out: impl Write, series: &[Series], n: usize) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    let mut header = vec!["Session".to_string()];
    header.extend(series.iter().map(|s| s.label.clone()));
    writer.write_record(&header)?;
    for i in 0..n {
        let mut record = vec![i.to_string()];
        record.extend(series.iter().map(|s| s.data[i].to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_table<T: serde::Serialize>(out: impl Write, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Attendees of the most recent session, most regular first.
fn default_selection(ledger: &Ledger) -> Vec<String> {
    people_from_last_n_sessions(ledger, 1)
}

fn run() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level);

    let source = CsvFileSource::new(args.source);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Ledger(sheet) => {
            let ledger = load(&source, &sheet)?;
            serde_json::to_writer_pretty(&mut out, &ledger)?;
            writeln!(out)?;
        }
        Command::Stats { sheet, overall } => {
            let stats = compute_stats(&load(&source, &sheet)?);
            if overall {
                serde_json::to_writer_pretty(&mut out, &stats.overall)?;
                writeln!(out)?;
            } else {
                write_table(&mut out, &stats.per_person)?;
            }
        }
        Command::Ranking { sheet, n } => {
            let ledger = load(&source, &sheet)?;
            let n = n.unwrap_or(ledger.len());
            for person in people_from_last_n_sessions(&ledger, n) {
                writeln!(out, "{}", person)?;
            }
        }
        Command::Series {
            sheet,
            n,
            people,
            from_window_start,
        } => {
            let ledger = load(&source, &sheet)?;
            let n = n.unwrap_or(ledger.len()).min(ledger.len());
            let people = if people.is_empty() {
                default_selection(&ledger)
            } else {
                people
            };
            let baseline = if from_window_start {
                Baseline::WindowStart
            } else {
                Baseline::Ledger
            };
            let series = cumulative_series(&ledger, &people, n, baseline);
            write_series(&mut out, &series, n)?;
        }
        Command::Check(sheet) => {
            let discrepancies = check_ledger(&load(&source, &sheet)?);
            if discrepancies.is_empty() {
                writeln!(out, "All sessions add up")?;
            } else {
                write_table(&mut out, &discrepancies)?;
            }
        }
        Command::Report { sheet, n } => {
            let ledger = load(&source, &sheet)?;
            let n = n.unwrap_or(ledger.len()).min(ledger.len());
            let stats = compute_stats(&ledger);

            write_overall(&mut out, &stats.overall)?;
            writeln!(out)?;
            write_table(&mut out, &stats.per_person)?;
            writeln!(out)?;
            let series = cumulative_series(&ledger, &default_selection(&ledger), n, Baseline::Ledger);
            write_series(&mut out, &series, n)?;

            let discrepancies = check_ledger(&ledger);
            if !discrepancies.is_empty() {
                eprintln!(
                    "{} session(s) of sheet {} do not add up",
                    discrepancies.len(),
                    sheet.sheet
                );
            }
        }
    }

    Ok(())
}

fn main() {
    // Use proper error handling; exit with non-zero code on fatal error.
    if let Err(err) = run() {
        eprintln!("Fatal error: {:?}", err);
        std::process::exit(1);
    }
}
