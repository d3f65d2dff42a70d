// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use hm_ledger::CoreError;
use hm_ledger_domain::DomainError;

/// Authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The actor is not a known member.
    UnknownActor {
        /// The identity that was presented.
        actor_id: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The rule the actor's role did not satisfy.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownActor { actor_id } => {
                write!(f, "Unknown actor '{actor_id}'")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' {required_role}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The actor could not be identified.
    UnknownActor {
        /// The identity that was presented.
        actor_id: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The rule the actor's role did not satisfy.
        required_role: String,
    },
    /// A business rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource.
        resource_type: String,
        /// A human-readable description.
        message: String,
    },
    /// The request conflicts with current state.
    Conflict {
        /// The rule that detected the conflict.
        rule: String,
        /// A human-readable description.
        message: String,
        /// Whether the same request may succeed if sent again.
        retryable: bool,
    },
    /// An internal error occurred.
    Internal {
        /// A human-readable description.
        message: String,
    },
}

impl ApiError {
    /// Returns true if the request may succeed when sent again.
    ///
    /// A conflict on a stale revision needs a fresh read first; the retry
    /// must carry the current revision.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { retryable: true, .. })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownActor { actor_id } => write!(f, "Unknown actor '{actor_id}'"),
            Self::Unauthorized {
                action,
                required_role,
            } => write!(f, "Unauthorized: '{action}' {required_role}"),
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => write!(f, "{resource_type} not found: {message}"),
            Self::Conflict { rule, message, .. } => write!(f, "Conflict ({rule}): {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UnknownActor { actor_id } => Self::UnknownActor { actor_id },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// Every variant is mapped explicitly so domain types never cross the API
/// boundary.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::EmptyInvoice => ApiError::InvalidInput {
            field: String::from("lines"),
            message,
        },
        DomainError::InvalidQuantity { .. } => ApiError::InvalidInput {
            field: String::from("quantity"),
            message,
        },
        DomainError::InvalidDiscountPercent { .. } => ApiError::InvalidInput {
            field: String::from("discount_percent"),
            message,
        },
        DomainError::NonPositiveAmount { .. } => ApiError::InvalidInput {
            field: String::from("amount"),
            message,
        },
        DomainError::InvalidField { field, .. } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        DomainError::InvalidInvoiceNumber { .. } => ApiError::InvalidInput {
            field: String::from("invoice_number"),
            message,
        },
        DomainError::InvalidBusinessRules { .. } => ApiError::InvalidInput {
            field: String::from("rules"),
            message,
        },
        DomainError::UnknownRole(_) => ApiError::InvalidInput {
            field: String::from("role"),
            message,
        },
        DomainError::UnknownStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message,
        },
        DomainError::ArithmeticOverflow { .. } | DomainError::DateOutOfRange { .. } => {
            ApiError::Internal { message }
        }
        DomainError::PermissionDenied {
            action,
            requirement,
        } => ApiError::Unauthorized {
            action: action.to_string(),
            required_role: requirement.to_string(),
        },
        DomainError::SelfRoleChange { .. } => ApiError::DomainRuleViolation {
            rule: String::from("self_role_change"),
            message,
        },
        DomainError::RoleHierarchy { .. } => ApiError::DomainRuleViolation {
            rule: String::from("role_hierarchy"),
            message,
        },
        DomainError::InvalidTransition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("candidature_transition"),
            message,
        },
        DomainError::DuplicatePendingCandidature { .. } => ApiError::Conflict {
            rule: String::from("one_pending_candidature"),
            message,
            retryable: false,
        },
        DomainError::InvoiceNumberCollision { .. } => ApiError::Conflict {
            rule: String::from("unique_invoice_number"),
            message,
            retryable: true,
        },
        DomainError::StaleRevision { .. } => ApiError::Conflict {
            rule: String::from("stale_revision"),
            message,
            retryable: true,
        },
        DomainError::NotFound { resource, .. } => ApiError::ResourceNotFound {
            resource_type: resource.to_string(),
            message,
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}
