// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use color_eyre::{Result, eyre::Context};
use hm_ledger_api::{RoleCapabilities, compute_role_capabilities};
use hm_ledger_domain::{
    BusinessRules, CandidatureStatus, FidelityTier, InvoiceAmounts, InvoiceNumber, ReviewerTier,
    Role, ServiceLine, WeeklyPayrollSummary, WorkerWeeklyActivity, allowed_targets, compute_tier,
    compute_weekly_payroll, price_invoice,
};
use serde::Serialize;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing::{debug, info};

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Compute the fidelity tier for a cumulative spend
    #[command(visible_alias = "t")]
    Tier {
        /// Cumulative spend
        total_spent: u64,
    },

    /// Price an invoice from service lines
    #[command(visible_alias = "p")]
    Price {
        /// Service line as NAME:PRICE or NAME:PRICExQTY; repeatable
        #[arg(long = "line", required = true, value_parser = parse_service_line)]
        lines: Vec<ServiceLine>,

        /// Discount percentage
        #[arg(long, default_value_t = 0)]
        discount: u8,
    },

    /// Compute payroll and tax from a JSON array of weekly worker activity
    Payroll {
        /// Path to the activity file
        file: PathBuf,
    },

    /// Generate an invoice number
    #[command(visible_alias = "inv")]
    InvoiceNumber {
        /// Invoice date as YYYY-MM-DD; defaults to today (UTC)
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },

    /// Validate an invoice number
    CheckInvoiceNumber {
        /// The invoice number to check
        value: String,
    },

    /// List what a role may do
    #[command(visible_alias = "caps")]
    Capabilities {
        /// Role name, e.g. `chef_equipe`
        role: Role,
    },

    /// List the statuses a reviewer may move a candidature to
    Transitions {
        /// Current status, e.g. `en_attente`
        from: CandidatureStatus,
        /// Reviewer role
        role: Role,
    },
}

#[derive(Debug, Serialize)]
struct TierReport {
    total_spent: u64,
    #[serde(flatten)]
    tier: FidelityTier,
}

#[derive(Debug, Serialize)]
struct InvoiceNumberReport {
    invoice_number: String,
    date: Option<String>,
}

impl From<InvoiceNumber> for InvoiceNumberReport {
    fn from(number: InvoiceNumber) -> Self {
        Self {
            date: number.date().map(|d| d.to_string()),
            invoice_number: number.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TransitionReport {
    from: CandidatureStatus,
    role: Role,
    allowed: Vec<CandidatureStatus>,
}

impl Command {
    /// Runs the command and returns its JSON output.
    pub fn run(self, rules: &BusinessRules) -> Result<String> {
        match self {
            Self::Tier { total_spent } => to_json(&TierReport {
                total_spent,
                tier: compute_tier(total_spent, rules),
            }),
            Self::Price { lines, discount } => {
                let amounts: InvoiceAmounts = price_invoice(&lines, discount)?;
                to_json(&amounts)
            }
            Self::Payroll { file } => payroll(&file, rules),
            Self::InvoiceNumber { date } => {
                let date: Date = date.unwrap_or_else(|| OffsetDateTime::now_utc().date());
                to_json(&InvoiceNumberReport::from(InvoiceNumber::generate(date)))
            }
            Self::CheckInvoiceNumber { value } => {
                let number: InvoiceNumber = InvoiceNumber::parse(&value)?;
                to_json(&InvoiceNumberReport::from(number))
            }
            Self::Capabilities { role } => {
                let caps: RoleCapabilities = compute_role_capabilities(role);
                to_json(&caps)
            }
            Self::Transitions { from, role } => to_json(&TransitionReport {
                from,
                role,
                allowed: allowed_targets(from, ReviewerTier::of(role)).to_vec(),
            }),
        }
    }
}

fn payroll(file: &Path, rules: &BusinessRules) -> Result<String> {
    let raw: String = std::fs::read_to_string(file)
        .wrap_err_with(|| format!("Failed to read {}", file.display()))?;
    let activities: Vec<WorkerWeeklyActivity> = serde_json::from_str(&raw)
        .wrap_err_with(|| format!("Failed to parse activity from {}", file.display()))?;
    debug!(workers = activities.len(), "loaded weekly activity");

    let summary: WeeklyPayrollSummary = compute_weekly_payroll(&activities, rules)?;
    info!(
        total_ca = summary.total_ca,
        total_pay = summary.total_pay,
        "computed payroll"
    );
    to_json(&summary)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).wrap_err("Failed to serialize output")
}

/// Loads business rules from a JSON file, or the defaults when no file is given.
///
/// Missing keys take their default value.
pub fn load_rules(path: Option<&Path>) -> Result<BusinessRules> {
    let Some(path) = path else {
        return Ok(BusinessRules::default());
    };

    let raw: String = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read rules from {}", path.display()))?;
    let rules: BusinessRules = serde_json::from_str(&raw)
        .wrap_err_with(|| format!("Invalid rules in {}", path.display()))?;
    debug!(path = %path.display(), ?rules, "loaded business rules");
    Ok(rules)
}

/// Parses `NAME:PRICE` or `NAME:PRICExQTY`.
pub fn parse_service_line(value: &str) -> Result<ServiceLine, String> {
    let (name, amount) = value
        .rsplit_once(':')
        .ok_or_else(|| format!("expected NAME:PRICE[xQTY], got '{value}'"))?;
    if name.trim().is_empty() {
        return Err(format!("missing service name in '{value}'"));
    }

    let (price, quantity) = amount.split_once('x').unwrap_or((amount, "1"));
    let unit_price: u64 = price
        .trim()
        .parse()
        .map_err(|e| format!("invalid price '{price}': {e}"))?;
    let quantity: u32 = quantity
        .trim()
        .parse()
        .map_err(|e| format!("invalid quantity '{quantity}': {e}"))?;

    Ok(ServiceLine::new(name.trim(), unit_price, quantity))
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<Date, String> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value, &format).map_err(|e| format!("invalid date '{value}': {e}"))
}
