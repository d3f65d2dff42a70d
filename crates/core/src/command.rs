// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hm_ledger_domain::{CandidatureForm, CandidatureStatus, Role, ServiceLine};

/// A command represents user intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add an amount to a client's cumulative spend.
    RecordFidelityOperation {
        /// The client credited.
        client_id: String,
        /// The amount spent; must be positive.
        amount: i64,
    },
    /// Create or replace a collaboration, keyed by name.
    SaveCollaboration {
        /// The collaboration name.
        name: String,
        /// Discount granted to invoices using it.
        discount_percent: u8,
        /// Whether new invoices may use it.
        is_active: bool,
    },
    /// Price and record an invoice for the acting worker.
    CreateInvoice {
        /// The billed services.
        lines: Vec<ServiceLine>,
        /// Name of the collaboration to apply, if any.
        collaboration: Option<String>,
    },
    /// Settle the current week: compute payroll and archive its invoices.
    ArchiveWeek,
    /// Submit a candidature as the acting client.
    SubmitCandidature {
        /// The candidate's answers.
        form: CandidatureForm,
    },
    /// Move a candidature to another status.
    ChangeCandidatureStatus {
        /// The candidature to update.
        candidature_id: u64,
        /// The requested status.
        new_status: CandidatureStatus,
    },
    /// Append a reviewer note to a candidature.
    AddCandidatureNote {
        /// The candidature to annotate.
        candidature_id: u64,
        /// The note text.
        content: String,
    },
    /// Change another member's role.
    ChangeUserRole {
        /// The member whose role changes.
        target_id: String,
        /// The role to assign.
        new_role: Role,
    },
}

impl Command {
    /// Returns the command name recorded in audit events and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RecordFidelityOperation { .. } => "RecordFidelityOperation",
            Self::SaveCollaboration { .. } => "SaveCollaboration",
            Self::CreateInvoice { .. } => "CreateInvoice",
            Self::ArchiveWeek => "ArchiveWeek",
            Self::SubmitCandidature { .. } => "SubmitCandidature",
            Self::ChangeCandidatureStatus { .. } => "ChangeCandidatureStatus",
            Self::AddCandidatureNote { .. } => "AddCandidatureNote",
            Self::ChangeUserRole { .. } => "ChangeUserRole",
        }
    }
}
