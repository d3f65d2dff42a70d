// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The permission table.
//!
//! Every action the application gates is a variant of [`PermissionAction`],
//! and every variant maps to exactly one [`Requirement`]. The mapping is an
//! exhaustive `match`, so adding an action without a rule does not compile.

use crate::error::DomainError;
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// Named actions guarded by role checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    CreateInvoice,
    ViewAllInvoices,
    ExportInvoices,
    ViewOwnFidelity,
    AddFidelityOperation,
    EditFidelityOperation,
    ViewAllFidelity,
    SubmitCandidature,
    ViewCandidatures,
    AddCandidatureNote,
    ChangeCandidatureStatus,
    ViewCollaborations,
    ManageCollaborations,
    ViewPay,
    ManagePay,
    ViewTaxes,
    ManageTaxes,
    ViewOwnStats,
    ViewTeamStats,
    ViewAllStats,
    ManageUserRoles,
    AccessAdmin,
    ManageServices,
    ManageVehicles,
    ManageTheme,
    ResetData,
}

/// The rule a role must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any role, including client.
    Anyone,
    /// The role's level must be at least this role's level.
    AtLeast(Role),
    /// The role must be exactly this role.
    Exactly(Role),
}

impl Requirement {
    /// Returns true if `role` satisfies this requirement.
    #[must_use]
    pub const fn is_satisfied_by(self, role: Role) -> bool {
        match self {
            Self::Anyone => true,
            Self::AtLeast(min) => role.has_minimum_role(min),
            Self::Exactly(required) => role.level() == required.level(),
        }
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anyone => write!(f, "open to every role"),
            Self::AtLeast(role) => write!(f, "requires at least the {role} role"),
            Self::Exactly(role) => write!(f, "requires exactly the {role} role"),
        }
    }
}

impl PermissionAction {
    /// Every action, in declaration order.
    pub const ALL: [Self; 26] = [
        Self::CreateInvoice,
        Self::ViewAllInvoices,
        Self::ExportInvoices,
        Self::ViewOwnFidelity,
        Self::AddFidelityOperation,
        Self::EditFidelityOperation,
        Self::ViewAllFidelity,
        Self::SubmitCandidature,
        Self::ViewCandidatures,
        Self::AddCandidatureNote,
        Self::ChangeCandidatureStatus,
        Self::ViewCollaborations,
        Self::ManageCollaborations,
        Self::ViewPay,
        Self::ManagePay,
        Self::ViewTaxes,
        Self::ManageTaxes,
        Self::ViewOwnStats,
        Self::ViewTeamStats,
        Self::ViewAllStats,
        Self::ManageUserRoles,
        Self::AccessAdmin,
        Self::ManageServices,
        Self::ManageVehicles,
        Self::ManageTheme,
        Self::ResetData,
    ];

    /// Returns the rule guarding this action.
    ///
    /// `ChangeCandidatureStatus` is the coarse gate only; the per-edge rule
    /// lives in the candidature transition table.
    #[must_use]
    pub const fn requirement(self) -> Requirement {
        match self {
            Self::ViewOwnFidelity => Requirement::Anyone,
            Self::SubmitCandidature => Requirement::Exactly(Role::Client),
            Self::CreateInvoice | Self::AddFidelityOperation | Self::ViewOwnStats => {
                Requirement::AtLeast(Role::Recrue)
            }
            Self::EditFidelityOperation => Requirement::AtLeast(Role::Experimente),
            Self::ViewAllInvoices
            | Self::ViewCandidatures
            | Self::AddCandidatureNote
            | Self::ChangeCandidatureStatus
            | Self::ViewCollaborations
            | Self::ViewTeamStats => Requirement::AtLeast(Role::ChefEquipe),
            Self::ExportInvoices
            | Self::ViewAllFidelity
            | Self::ManageCollaborations
            | Self::ViewPay
            | Self::ManagePay
            | Self::ViewTaxes
            | Self::ManageTaxes
            | Self::ViewAllStats
            | Self::ManageUserRoles => Requirement::AtLeast(Role::Patron),
            Self::AccessAdmin
            | Self::ManageServices
            | Self::ManageVehicles
            | Self::ManageTheme
            | Self::ResetData => Requirement::Exactly(Role::Superadmin),
        }
    }

    /// Returns the string representation of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateInvoice => "create_invoice",
            Self::ViewAllInvoices => "view_all_invoices",
            Self::ExportInvoices => "export_invoices",
            Self::ViewOwnFidelity => "view_own_fidelity",
            Self::AddFidelityOperation => "add_fidelity_operation",
            Self::EditFidelityOperation => "edit_fidelity_operation",
            Self::ViewAllFidelity => "view_all_fidelity",
            Self::SubmitCandidature => "submit_candidature",
            Self::ViewCandidatures => "view_candidatures",
            Self::AddCandidatureNote => "add_candidature_note",
            Self::ChangeCandidatureStatus => "change_candidature_status",
            Self::ViewCollaborations => "view_collaborations",
            Self::ManageCollaborations => "manage_collaborations",
            Self::ViewPay => "view_pay",
            Self::ManagePay => "manage_pay",
            Self::ViewTaxes => "view_taxes",
            Self::ManageTaxes => "manage_taxes",
            Self::ViewOwnStats => "view_own_stats",
            Self::ViewTeamStats => "view_team_stats",
            Self::ViewAllStats => "view_all_stats",
            Self::ManageUserRoles => "manage_user_roles",
            Self::AccessAdmin => "access_admin",
            Self::ManageServices => "manage_services",
            Self::ManageVehicles => "manage_vehicles",
            Self::ManageTheme => "manage_theme",
            Self::ResetData => "reset_data",
        }
    }
}

impl std::fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns true if `role` may perform `action`.
#[must_use]
pub const fn can_perform(action: PermissionAction, role: Role) -> bool {
    action.requirement().is_satisfied_by(role)
}

/// Checks that `role` may perform `action`.
///
/// # Errors
///
/// Returns `DomainError::PermissionDenied` naming the action and the rule
/// that was not satisfied.
pub fn authorize(action: PermissionAction, role: Role) -> Result<(), DomainError> {
    let requirement: Requirement = action.requirement();
    if requirement.is_satisfied_by(role) {
        Ok(())
    } else {
        Err(DomainError::PermissionDenied {
            action,
            requirement,
        })
    }
}
