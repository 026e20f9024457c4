//! Print the banded fee and totals for a range of dispute values
//!
//! Usage: cargo run --bin fee_table -- --from 450000 --to 800000 --step 25000

use anyhow::{ensure, Context, Result};
use clap::Parser;
use letterhead_billing::{AmountFormat, Calculator, FeeSchedule};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fee_table", about = "Fee bands over a range of dispute values")]
struct Args {
    #[arg(long, default_value_t = 450_000.0)]
    from: f64,

    #[arg(long, default_value_t = 800_000.0)]
    to: f64,

    #[arg(long, default_value_t = 25_000.0)]
    step: f64,

    /// Fee schedule override (Name,Value CSV)
    #[arg(long)]
    schedule: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    ensure!(args.step > 0.0, "--step must be positive");

    let schedule = match &args.schedule {
        Some(path) => FeeSchedule::from_csv_path(path)
            .with_context(|| format!("loading fee schedule {}", path.display()))?,
        None => FeeSchedule::default_schedule(),
    };
    let calculator = Calculator::new(schedule);
    let fmt = AmountFormat::german().without_suffix();

    println!("{:>16} {:>5} {:>14} {:>14} {:>12} {:>14}",
        "DisputeValue", "Band", "DisputeFee", "PreTax", "Tax", "PostTax");
    println!("{}", "-".repeat(80));

    let mut value = args.from;
    while value <= args.to {
        let b = calculator.compute_value(value);
        println!("{:>16} {:>5} {:>14} {:>14} {:>12} {:>14}",
            fmt.format(value),
            b.band,
            fmt.format(b.fees.dispute_fee),
            fmt.format(b.totals.pre_tax_total),
            fmt.format(b.totals.tax),
            fmt.format(b.totals.post_tax_total),
        );
        value += args.step;
    }

    Ok(())
}
