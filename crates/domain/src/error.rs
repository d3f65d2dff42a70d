// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::candidature::CandidatureStatus;
use crate::permissions::{PermissionAction, Requirement};
use crate::role::Role;
use thiserror::Error;

/// Broad classification of a [`DomainError`].
///
/// Callers map these onto user-facing messages; the domain only classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input failed a validation rule.
    Validation,
    /// The actor is not allowed to perform the action.
    PermissionDenied,
    /// The requested status change is not defined from the current state.
    InvalidTransition,
    /// The request conflicts with existing state.
    Conflict,
    /// A referenced record does not exist.
    NotFound,
}

/// Errors that can occur while evaluating business rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// An invoice was priced without any service line.
    #[error("An invoice must contain at least one service line")]
    EmptyInvoice,
    /// A service line quantity is below one.
    #[error("Invalid quantity {quantity} for service '{service}': must be at least 1")]
    InvalidQuantity {
        /// The service the line refers to.
        service: String,
        /// The rejected quantity.
        quantity: u32,
    },
    /// A discount percentage is outside `0..=100`.
    #[error("Invalid discount percent {percent}: must be between 0 and 100")]
    InvalidDiscountPercent {
        /// The rejected percentage.
        percent: u8,
    },
    /// A fidelity amount is zero or negative.
    #[error("Amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The rejected amount.
        amount: i64,
    },
    /// A free-form field failed validation.
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        /// The field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// A string does not follow the `HM-YYYYMMDD-XXXX` format.
    #[error("Invalid invoice number '{value}': {reason}")]
    InvalidInvoiceNumber {
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// Business rule configuration is unusable.
    #[error("Invalid business rules: {reason}")]
    InvalidBusinessRules {
        /// Why the configuration was rejected.
        reason: &'static str,
    },
    /// A role string did not match any known role.
    #[error("Unknown role '{0}'")]
    UnknownRole(String),
    /// A status string did not match any known candidature status.
    #[error("Unknown candidature status '{0}'")]
    UnknownStatus(String),
    /// An intermediate amount does not fit the integer type.
    #[error("Arithmetic overflow while {operation}")]
    ArithmeticOverflow {
        /// Description of the operation that overflowed.
        operation: &'static str,
    },
    /// Date arithmetic left the supported range.
    #[error("Date arithmetic out of range while {operation}")]
    DateOutOfRange {
        /// Description of the operation that failed.
        operation: &'static str,
    },
    /// The actor's role does not satisfy the rule guarding an action.
    #[error("Permission denied for '{action}': {requirement}")]
    PermissionDenied {
        /// The action that was attempted.
        action: PermissionAction,
        /// The rule that was not satisfied.
        requirement: Requirement,
    },
    /// An actor tried to change their own role.
    #[error("Actor '{actor_id}' cannot change their own role")]
    SelfRoleChange {
        /// The actor and target identity.
        actor_id: String,
    },
    /// A role change would touch a role at or above the actor's level.
    #[error("A {actor} cannot change a {target} to {requested}: {reason}")]
    RoleHierarchy {
        /// The actor's role.
        actor: Role,
        /// The target's current role.
        target: Role,
        /// The role the actor tried to assign.
        requested: Role,
        /// Which hierarchy rule failed.
        reason: &'static str,
    },
    /// A candidature status change is not defined.
    #[error("Invalid status transition from {from} to {to}: {reason}")]
    InvalidTransition {
        /// The current status.
        from: CandidatureStatus,
        /// The requested status.
        to: CandidatureStatus,
        /// Why the transition is not defined.
        reason: &'static str,
    },
    /// The candidate already has an application under review.
    #[error("Candidate '{candidate_id}' already has a candidature in status {existing}")]
    DuplicatePendingCandidature {
        /// The candidate identity.
        candidate_id: String,
        /// The status of the outstanding application.
        existing: CandidatureStatus,
    },
    /// Every generated invoice number was already taken.
    #[error("Invoice number collision after {attempts} attempts")]
    InvoiceNumberCollision {
        /// How many numbers were tried.
        attempts: u32,
    },
    /// State changed between the caller's read and its write.
    #[error("Stale revision: expected {expected}, current is {actual}")]
    StaleRevision {
        /// The revision the caller read.
        expected: u64,
        /// The revision actually stored.
        actual: u64,
    },
    /// A referenced record does not exist.
    #[error("{resource} '{id}' not found")]
    NotFound {
        /// The kind of record.
        resource: &'static str,
        /// The identifier that was looked up.
        id: String,
    },
}

impl DomainError {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInvoice
            | Self::InvalidQuantity { .. }
            | Self::InvalidDiscountPercent { .. }
            | Self::NonPositiveAmount { .. }
            | Self::InvalidField { .. }
            | Self::InvalidInvoiceNumber { .. }
            | Self::InvalidBusinessRules { .. }
            | Self::UnknownRole(_)
            | Self::UnknownStatus(_)
            | Self::ArithmeticOverflow { .. }
            | Self::DateOutOfRange { .. } => ErrorKind::Validation,
            Self::PermissionDenied { .. }
            | Self::SelfRoleChange { .. }
            | Self::RoleHierarchy { .. } => ErrorKind::PermissionDenied,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::DuplicatePendingCandidature { .. }
            | Self::InvoiceNumberCollision { .. }
            | Self::StaleRevision { .. } => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// Returns true if the request may succeed when sent again.
    ///
    /// An invoice number collision may be resent as is, since a new number
    /// is drawn. A stale revision only succeeds after the caller re-reads
    /// state and resends with the current revision.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InvoiceNumberCollision { .. } | Self::StaleRevision { .. }
        )
    }
}
