// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # hm-ledger
//!
//! Command-line access to the HM back-office calculators. Every subcommand
//! prints its result as JSON on stdout.
//!
//! - `hm-ledger tier 1200000` - fidelity tier for a cumulative spend
//! - `hm-ledger price --line Repair:150000x2 --discount 15` - price an invoice
//! - `hm-ledger payroll week.json` - payroll and tax for a week of activity
//! - `hm-ledger invoice-number --date 2026-10-16` - generate an invoice number
//! - `hm-ledger check-invoice-number HM-20261016-A1B2` - validate one
//! - `hm-ledger capabilities patron` - what a role may do
//! - `hm-ledger transitions en_attente chef_equipe` - reachable candidature statuses
//!
//! `--rules <file.json>` overrides the default business constants.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod commands;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::Result;
use hm_ledger_domain::BusinessRules;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

use crate::commands::{Command, load_rules};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match args.run() {
        Ok(output) => println!("{output}"),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(name = "hm-ledger", author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// JSON file overriding the default business rules
    #[arg(long, global = true, value_name = "FILE")]
    rules: Option<PathBuf>,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<String> {
        let rules: BusinessRules = load_rules(self.rules.as_deref())?;
        self.command.run(&rules)
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}
