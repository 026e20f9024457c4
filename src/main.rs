//! Letterhead Billing CLI
//!
//! `calculate` turns a case export into template records for the renderer,
//! `stamp` puts rendered invoices onto the letterhead.

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use letterhead_billing::batch::{BatchRunner, BatchSummary, InvoiceJob, OutcomeStatus};
use letterhead_billing::case::{load_cases, parse_date};
use letterhead_billing::{AmountFormat, Calculator, FeeSchedule, InvoiceData, LetterheadTemplate};
use log::info;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "letterhead-billing", version, about = "Case billing: fee calculation and letterhead stamping")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute amounts for every case and write one template record per invoice
    Calculate {
        /// Semicolon-separated case export
        #[arg(long)]
        cases: PathBuf,

        /// Fee schedule override (Name,Value CSV)
        #[arg(long)]
        schedule: Option<PathBuf>,

        /// Output directory for JSON records
        #[arg(long, default_value = "records")]
        out: PathBuf,

        /// Invoice date for cases without one (DD.MM.YYYY, default today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Put rendered invoices onto the letterhead
    Stamp {
        /// Two-page letterhead PDF; documents stay unstamped if it cannot be read
        #[arg(long)]
        letterhead: Option<PathBuf>,

        /// Output directory for final documents
        #[arg(long, default_value = "invoices")]
        out: PathBuf,

        /// Rendered invoice PDFs
        #[arg(required = true)]
        documents: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Calculate { cases, schedule, out, date } => {
            calculate(&cases, schedule.as_deref(), &out, date.as_deref())
        }
        Command::Stamp { letterhead, out, documents } => stamp(letterhead.as_deref(), &out, &documents),
    }
}

fn calculate(cases: &Path, schedule: Option<&Path>, out: &Path, date: Option<&str>) -> Result<()> {
    let schedule = match schedule {
        Some(path) => FeeSchedule::from_csv_path(path)
            .with_context(|| format!("loading fee schedule {}", path.display()))?,
        None => FeeSchedule::default_schedule(),
    };
    let fallback_date = match date {
        Some(text) => parse_date(text).with_context(|| format!("invalid --date {:?}", text))?,
        None => Local::now().date_naive(),
    };

    let records = load_cases(cases).with_context(|| format!("loading cases {}", cases.display()))?;
    info!("loaded {} cases from {}", records.len(), cases.display());

    fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    let calculator = Calculator::new(schedule);
    let format = AmountFormat::german();

    for record in &records {
        let amounts = calculator.compute(record);
        let invoice = InvoiceData::new(record, amounts, fallback_date);
        write_record(out, &invoice, &format)?;

        let marker = if invoice.dispute_value_valid { "" } else { "  (dispute value unreadable, taken as 0)" };
        println!(
            "{}  {:<20} band {:>3}  net {:>14}  gross {:>14}{}",
            invoice.invoice_number,
            invoice.case_reference,
            amounts.band,
            format.format(amounts.totals.pre_tax_total),
            format.format(amounts.totals.post_tax_total),
            marker,
        );
    }

    println!("\n{} records written to {}", records.len(), out.display());
    Ok(())
}

fn write_record(out: &Path, invoice: &InvoiceData, format: &AmountFormat) -> Result<()> {
    let path = out.join(format!("{}.json", invoice.invoice_number));
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &invoice.template_record(format))
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn stamp(letterhead: Option<&Path>, out: &Path, documents: &[PathBuf]) -> Result<()> {
    let letterhead = letterhead.and_then(LetterheadTemplate::locate);

    let ids = document_ids(documents)?;
    let jobs = documents
        .iter()
        .zip(ids)
        .map(|(path, id)| {
            let content = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            Ok(InvoiceJob::new(id, content))
        })
        .collect::<Result<Vec<_>>>()?;

    let outcomes = BatchRunner::new(letterhead).run(&jobs);

    fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    for outcome in &outcomes {
        let path = out.join(format!("{}.pdf", outcome.invoice_id));
        fs::write(&path, &outcome.bytes).with_context(|| format!("writing {}", path.display()))?;

        match &outcome.status {
            OutcomeStatus::Stamped => println!("{}  stamped", outcome.invoice_id),
            OutcomeStatus::Unstamped => println!("{}  unstamped (no letterhead)", outcome.invoice_id),
            OutcomeStatus::Fallback { error } => {
                println!("{}  unstamped after error: {}", outcome.invoice_id, error.source)
            }
        }
    }

    let summary = BatchSummary::from_outcomes(&outcomes);
    println!(
        "\n{} documents: {} stamped, {} unstamped, {} fallback",
        summary.total(),
        summary.stamped,
        summary.unstamped,
        summary.fallback
    );
    Ok(())
}

fn document_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Output ids for all documents; two inputs may not share an id
fn document_ids(documents: &[PathBuf]) -> Result<Vec<String>> {
    let mut seen: HashMap<String, &Path> = HashMap::new();
    let mut ids = Vec::with_capacity(documents.len());
    for path in documents {
        let id = document_id(path);
        if let Some(previous) = seen.insert(id.clone(), path) {
            bail!(
                "{} and {} would both be written as {}.pdf",
                previous.display(),
                path.display(),
                id
            );
        }
        ids.push(id);
    }
    Ok(ids)
}
