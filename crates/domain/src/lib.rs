// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod candidature;
mod error;
mod fidelity;
mod invoice;
mod payroll;
mod permissions;
mod pricing;
mod role;
mod rules;

#[cfg(test)]
mod tests;

pub use candidature::{
    Candidature, CandidatureForm, CandidatureNote, CandidatureStatus, ReviewerTier,
    StatusHistoryEntry, allowed_targets, ensure_no_pending_candidature, validate_transition,
};
pub use error::{DomainError, ErrorKind};
pub use fidelity::{
    FidelityAccount, FidelityOperation, FidelityTier, compute_tier, validate_fidelity_amount,
};
pub use invoice::{
    DEFAULT_ALLOCATION_ATTEMPTS, InvoiceNumber, InvoiceRecord, allocate_invoice_number,
    allocate_invoice_number_with,
};
pub use payroll::{
    ArchivedWeek, PayrollLine, TeamMemberStats, WeeklyPayrollSummary, WorkerStats,
    WorkerWeeklyActivity, compute_payroll_line, compute_weekly_payroll, is_payroll_invoice,
    objective_progress, start_of_month, start_of_week, summarize_archived_weeks, team_stats,
    weekly_activities, worker_stats,
};
pub use permissions::{PermissionAction, Requirement, authorize, can_perform};
pub use pricing::{
    Collaboration, InvoiceAmounts, ServiceLine, price_invoice, price_invoice_with_collaboration,
    validate_discount_percent,
};
pub use role::{Member, Role, RoleProfile, ROLE_TABLE, assignable_roles, validate_role_change};
pub use rules::{
    BusinessRules, BusinessRulesConfig, DEFAULT_BONUS_DISCOUNT_PERCENT, DEFAULT_BONUS_THRESHOLD,
    DEFAULT_POINTS_PER_AMOUNT, DEFAULT_TAX_RATE_PERCENT, DEFAULT_WEEKLY_OBJECTIVE,
};
