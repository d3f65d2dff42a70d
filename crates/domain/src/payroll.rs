// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly payroll, tax and CA statistics.
//!
//! ## Invariants
//!
//! - Weeks start on Sunday at midnight in the offset of the reference timestamp
//! - "This week" means created at or after the week start and not archived
//! - Commission and tax amounts are floored
//! - Net profit is reported as computed, including negative values
//! - Weekly archival marks exactly the invoices the payroll was computed from

use crate::error::DomainError;
use crate::invoice::InvoiceRecord;
use crate::role::{Member, Role};
use crate::rules::BusinessRules;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::{Duration, OffsetDateTime};

/// One worker's activity over the current week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerWeeklyActivity {
    pub worker_id: String,
    pub display_name: String,
    pub role: Role,
    /// Sum of final amounts of this week's non-archived invoices.
    pub ca_week: u64,
    pub invoice_count: u32,
}

/// One worker's pay for the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLine {
    pub worker_id: String,
    pub display_name: String,
    pub role: Role,
    pub ca_week: u64,
    pub invoice_count: u32,
    /// Commission percentage of the worker's role.
    pub pay_percentage: u8,
    /// `floor(ca_week × pay_percentage / 100)`.
    pub pay_amount: u64,
}

/// Payroll and tax totals for one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPayrollSummary {
    pub total_ca: u64,
    pub total_pay: u64,
    pub tax_amount: u64,
    /// `total_ca - total_pay - tax_amount`; may be negative.
    pub net_profit: i64,
    /// Workers with a non-zero CA, highest CA first.
    pub workers: Vec<PayrollLine>,
}

/// CA totals for one archived week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedWeek {
    pub week_start: OffsetDateTime,
    pub total_ca: u64,
    pub invoice_count: u32,
}

/// CA statistics for one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerStats {
    pub ca_total: u64,
    pub ca_month: u64,
    pub ca_week: u64,
    pub invoice_count: u32,
    /// Percentage of the weekly objective reached, capped at 100.
    pub objective_progress: u8,
}

/// One staff member's statistics, as listed to management.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberStats {
    pub worker_id: String,
    pub display_name: String,
    pub role: Role,
    pub stats: WorkerStats,
}

/// Returns `floor(amount × percent / 100)`.
fn floored_percentage(amount: u64, percent: u8) -> Result<u64, DomainError> {
    let scaled: u128 = u128::from(amount) * u128::from(percent);
    u64::try_from(scaled / 100).map_err(|_| DomainError::ArithmeticOverflow {
        operation: "computing a percentage",
    })
}

fn checked_sum(total: u64, amount: u64, operation: &'static str) -> Result<u64, DomainError> {
    total
        .checked_add(amount)
        .ok_or(DomainError::ArithmeticOverflow { operation })
}

fn count_one(count: u32) -> Result<u32, DomainError> {
    count.checked_add(1).ok_or(DomainError::ArithmeticOverflow {
        operation: "counting invoices",
    })
}

/// Computes one worker's payroll line.
///
/// # Errors
///
/// Returns `DomainError::ArithmeticOverflow` if the pay does not fit.
pub fn compute_payroll_line(activity: &WorkerWeeklyActivity) -> Result<PayrollLine, DomainError> {
    let pay_percentage: u8 = activity.role.commission_percentage();
    let pay_amount: u64 = floored_percentage(activity.ca_week, pay_percentage)?;

    Ok(PayrollLine {
        worker_id: activity.worker_id.clone(),
        display_name: activity.display_name.clone(),
        role: activity.role,
        ca_week: activity.ca_week,
        invoice_count: activity.invoice_count,
        pay_percentage,
        pay_amount,
    })
}

/// Computes the weekly payroll and tax summary.
///
/// Workers with no CA are left out of the returned list. Remaining workers
/// are sorted by CA, highest first; ties keep their input order.
///
/// # Errors
///
/// Returns `DomainError::ArithmeticOverflow` if a total does not fit.
pub fn compute_weekly_payroll(
    activities: &[WorkerWeeklyActivity],
    rules: &BusinessRules,
) -> Result<WeeklyPayrollSummary, DomainError> {
    let mut workers: Vec<PayrollLine> = activities
        .iter()
        .filter(|activity| activity.ca_week > 0)
        .map(compute_payroll_line)
        .collect::<Result<_, _>>()?;
    workers.sort_by(|a, b| b.ca_week.cmp(&a.ca_week));

    let mut total_ca: u64 = 0;
    let mut total_pay: u64 = 0;
    for line in &workers {
        total_ca = checked_sum(total_ca, line.ca_week, "summing weekly CA")?;
        total_pay = checked_sum(total_pay, line.pay_amount, "summing weekly pay")?;
    }

    let tax_amount: u64 = floored_percentage(total_ca, rules.tax_rate_percent())?;
    let net_profit: i128 =
        i128::from(total_ca) - i128::from(total_pay) - i128::from(tax_amount);
    let net_profit: i64 = i64::try_from(net_profit).map_err(|_| DomainError::ArithmeticOverflow {
        operation: "computing net profit",
    })?;

    Ok(WeeklyPayrollSummary {
        total_ca,
        total_pay,
        tax_amount,
        net_profit,
        workers,
    })
}

/// Returns the Sunday midnight that starts the week containing `at`.
///
/// The result keeps the offset of `at`.
///
/// # Errors
///
/// Returns `DomainError::DateOutOfRange` at the edge of the supported calendar.
pub fn start_of_week(at: OffsetDateTime) -> Result<OffsetDateTime, DomainError> {
    let days_since_sunday: i64 = i64::from(at.weekday().number_days_from_sunday());
    let sunday = at
        .date()
        .checked_sub(Duration::days(days_since_sunday))
        .ok_or(DomainError::DateOutOfRange {
            operation: "computing the start of the week",
        })?;
    Ok(sunday.midnight().assume_offset(at.offset()))
}

/// Returns midnight on the first day of the month containing `at`.
///
/// # Errors
///
/// Returns `DomainError::DateOutOfRange` if the date cannot be built.
pub fn start_of_month(at: OffsetDateTime) -> Result<OffsetDateTime, DomainError> {
    let first = at
        .date()
        .replace_day(1)
        .map_err(|_| DomainError::DateOutOfRange {
            operation: "computing the start of the month",
        })?;
    Ok(first.midnight().assume_offset(at.offset()))
}

/// Aggregates this week's invoices per staff member.
///
/// Clients are skipped. Every staff member gets an entry, including those
/// with no invoices.
///
/// # Errors
///
/// Returns `DomainError::ArithmeticOverflow` if a total does not fit.
pub fn weekly_activities(
    invoices: &[InvoiceRecord],
    members: &[Member],
    week_start: OffsetDateTime,
) -> Result<Vec<WorkerWeeklyActivity>, DomainError> {
    let mut activities: Vec<WorkerWeeklyActivity> = Vec::new();

    for member in members.iter().filter(|m| m.role.is_staff()) {
        let mut ca_week: u64 = 0;
        let mut invoice_count: u32 = 0;
        for invoice in invoices
            .iter()
            .filter(|i| i.worker_id == member.id && is_payroll_invoice(i, members, week_start))
        {
            ca_week = checked_sum(ca_week, invoice.final_amount(), "summing weekly CA")?;
            invoice_count = count_one(invoice_count)?;
        }

        activities.push(WorkerWeeklyActivity {
            worker_id: member.id.clone(),
            display_name: member.display_name.clone(),
            role: member.role,
            ca_week,
            invoice_count,
        });
    }

    Ok(activities)
}

/// Returns true if `invoice` is counted in the payroll of the week starting at `week_start`.
///
/// The invoice must belong to the current week and its worker must still be
/// staff. Weekly archival marks exactly these invoices.
#[must_use]
pub fn is_payroll_invoice(
    invoice: &InvoiceRecord,
    members: &[Member],
    week_start: OffsetDateTime,
) -> bool {
    invoice.is_in_current_week(week_start)
        && members
            .iter()
            .any(|m| m.id == invoice.worker_id && m.role.is_staff())
}

/// Groups archived invoices into weekly totals, most recent week first.
///
/// # Errors
///
/// Returns an error if a week start cannot be computed or a total overflows.
pub fn summarize_archived_weeks(
    invoices: &[InvoiceRecord],
    limit: usize,
) -> Result<Vec<ArchivedWeek>, DomainError> {
    let mut weeks: BTreeMap<OffsetDateTime, (u64, u32)> = BTreeMap::new();

    for invoice in invoices.iter().filter(|i| i.is_weekly_archived) {
        let week_start: OffsetDateTime = start_of_week(invoice.created_at)?;
        let entry = weeks.entry(week_start).or_insert((0, 0));
        entry.0 = checked_sum(entry.0, invoice.final_amount(), "summing archived CA")?;
        entry.1 = count_one(entry.1)?;
    }

    Ok(weeks
        .into_iter()
        .rev()
        .take(limit)
        .map(|(week_start, (total_ca, invoice_count))| ArchivedWeek {
            week_start,
            total_ca,
            invoice_count,
        })
        .collect())
}

/// Returns the share of the weekly objective reached, floored and capped at 100.
#[must_use]
pub fn objective_progress(ca_week: u64, rules: &BusinessRules) -> u8 {
    let percent: u128 = u128::from(ca_week) * 100 / u128::from(rules.weekly_objective());
    u8::try_from(percent.min(100)).unwrap_or(100)
}

/// Computes CA statistics for one worker as of `now`.
///
/// # Errors
///
/// Returns an error if period boundaries cannot be computed or a total overflows.
pub fn worker_stats(
    invoices: &[InvoiceRecord],
    worker_id: &str,
    now: OffsetDateTime,
    rules: &BusinessRules,
) -> Result<WorkerStats, DomainError> {
    let week_start: OffsetDateTime = start_of_week(now)?;
    let month_start: OffsetDateTime = start_of_month(now)?;

    let mut stats: WorkerStats = WorkerStats {
        ca_total: 0,
        ca_month: 0,
        ca_week: 0,
        invoice_count: 0,
        objective_progress: 0,
    };

    for invoice in invoices.iter().filter(|i| i.worker_id == worker_id) {
        let amount: u64 = invoice.final_amount();
        stats.ca_total = checked_sum(stats.ca_total, amount, "summing total CA")?;
        if invoice.created_at >= month_start {
            stats.ca_month = checked_sum(stats.ca_month, amount, "summing monthly CA")?;
        }
        if invoice.is_in_current_week(week_start) {
            stats.ca_week = checked_sum(stats.ca_week, amount, "summing weekly CA")?;
        }
        stats.invoice_count = count_one(stats.invoice_count)?;
    }
    stats.objective_progress = objective_progress(stats.ca_week, rules);

    Ok(stats)
}

/// Computes [`WorkerStats`] for every staff member, highest weekly CA first.
///
/// Members with equal weekly CA keep their order in `members`.
///
/// # Errors
///
/// Returns an error if period boundaries cannot be computed or a total overflows.
pub fn team_stats(
    invoices: &[InvoiceRecord],
    members: &[Member],
    now: OffsetDateTime,
    rules: &BusinessRules,
) -> Result<Vec<TeamMemberStats>, DomainError> {
    let mut team: Vec<TeamMemberStats> = members
        .iter()
        .filter(|m| m.role.is_staff())
        .map(|m| {
            Ok(TeamMemberStats {
                worker_id: m.id.clone(),
                display_name: m.display_name.clone(),
                role: m.role,
                stats: worker_stats(invoices, &m.id, now, rules)?,
            })
        })
        .collect::<Result<_, DomainError>>()?;
    team.sort_by(|a, b| b.stats.ca_week.cmp(&a.stats.ca_week));
    Ok(team)
}
