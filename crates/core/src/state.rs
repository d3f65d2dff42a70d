// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hm_ledger_audit::{AuditEvent, StateSnapshot};
use hm_ledger_domain::{
    Candidature, Collaboration, FidelityAccount, FidelityOperation, FidelityTier, InvoiceRecord,
    Member, Role, StatusHistoryEntry, WeeklyPayrollSummary,
};

/// The complete back-office state.
///
/// Every successful transition produces a new `State` whose revision is one
/// higher than its predecessor's. Callers use the revision to detect writes
/// made against a stale read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    revision: u64,
    /// Every known member, clients included.
    pub members: Vec<Member>,
    /// Cumulative spend per client.
    pub fidelity_accounts: Vec<FidelityAccount>,
    /// Every recorded fidelity operation, oldest first.
    pub fidelity_operations: Vec<FidelityOperation>,
    /// Partner discounts, keyed by name.
    pub collaborations: Vec<Collaboration>,
    /// Every invoice, oldest first.
    pub invoices: Vec<InvoiceRecord>,
    /// Every candidature, oldest first.
    pub candidatures: Vec<Candidature>,
}

impl State {
    /// Creates an empty state at revision 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            revision: 0,
            members: Vec::new(),
            fidelity_accounts: Vec::new(),
            fidelity_operations: Vec::new(),
            collaborations: Vec::new(),
            invoices: Vec::new(),
            candidatures: Vec::new(),
        }
    }

    /// Creates a state at revision 0 seeded with members.
    ///
    /// Members come from the identity provider; the ledger never creates them.
    #[must_use]
    pub const fn with_members(members: Vec<Member>) -> Self {
        Self {
            revision: 0,
            members,
            fidelity_accounts: Vec::new(),
            fidelity_operations: Vec::new(),
            collaborations: Vec::new(),
            invoices: Vec::new(),
            candidatures: Vec::new(),
        }
    }

    /// Returns the revision of this state.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) const fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }

    /// Looks up a member.
    #[must_use]
    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Looks up a client's fidelity account.
    #[must_use]
    pub fn fidelity_account(&self, client_id: &str) -> Option<&FidelityAccount> {
        self.fidelity_accounts
            .iter()
            .find(|a| a.client_id() == client_id)
    }

    /// Looks up a collaboration by name.
    #[must_use]
    pub fn collaboration(&self, name: &str) -> Option<&Collaboration> {
        self.collaborations.iter().find(|c| c.name() == name)
    }

    /// Looks up a candidature.
    #[must_use]
    pub fn candidature(&self, id: u64) -> Option<&Candidature> {
        self.candidatures.iter().find(|c| c.id == id)
    }

    /// Returns the identifier the next submitted candidature receives.
    #[must_use]
    pub fn next_candidature_id(&self) -> u64 {
        self.candidatures
            .iter()
            .map(|c| c.id)
            .max()
            .map_or(1, |id| id.saturating_add(1))
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let archived: usize = self
            .invoices
            .iter()
            .filter(|i| i.is_weekly_archived)
            .count();
        StateSnapshot::new(
            self.revision,
            format!(
                "members={},fidelity_accounts={},collaborations={},invoices={},archived_invoices={},candidatures={}",
                self.members.len(),
                self.fidelity_accounts.len(),
                self.collaborations.len(),
                self.invoices.len(),
                archived,
                self.candidatures.len()
            ),
        )
    }
}

/// What a successful transition produced, for the caller to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A fidelity operation was recorded.
    FidelityRecorded {
        /// The client credited.
        client_id: String,
        /// The new cumulative spend.
        total_spent: u64,
        /// The tier derived from the new spend.
        tier: FidelityTier,
    },
    /// A collaboration was created or replaced.
    CollaborationSaved {
        /// The collaboration.
        collaboration: Collaboration,
    },
    /// An invoice was created.
    InvoiceCreated {
        /// The stored invoice.
        invoice: InvoiceRecord,
    },
    /// The current week was settled.
    WeekArchived {
        /// Payroll computed from the invoices that were archived.
        summary: WeeklyPayrollSummary,
        /// How many invoices were archived.
        archived_invoices: u32,
    },
    /// A candidature was submitted.
    CandidatureSubmitted {
        /// The new candidature's identifier.
        candidature_id: u64,
    },
    /// A candidature changed status.
    CandidatureStatusChanged {
        /// The candidature.
        candidature_id: u64,
        /// The history entry appended.
        entry: StatusHistoryEntry,
    },
    /// A note was added to a candidature.
    CandidatureNoteAdded {
        /// The candidature.
        candidature_id: u64,
    },
    /// A member's role changed.
    UserRoleChanged {
        /// The member.
        target_id: String,
        /// The role before the change.
        old_role: Role,
        /// The role after the change.
        new_role: Role,
    },
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// What the transition produced.
    pub outcome: Outcome,
}
