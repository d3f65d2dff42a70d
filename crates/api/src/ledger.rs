// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The in-memory ledger: command execution and read models.

use hm_ledger::{Command, Outcome, State, TransitionResult, apply};
use hm_ledger_audit::{AuditTrail, Cause};
use hm_ledger_domain::{
    ArchivedWeek, BusinessRules, Candidature, Collaboration, DomainError, FidelityAccount,
    FidelityOperation, FidelityTier, InvoiceRecord, PermissionAction, TeamMemberStats,
    WeeklyPayrollSummary, WorkerStats, WorkerWeeklyActivity, compute_tier,
    compute_weekly_payroll, start_of_week, summarize_archived_weeks, team_stats,
    weekly_activities, worker_stats,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService, authenticate};
use crate::error::{ApiError, translate_core_error, translate_domain_error};

/// What a successfully executed command returns to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReceipt {
    /// The state revision after the command.
    pub revision: u64,
    /// Sequence number of the audit event recorded for the command.
    pub audit_sequence: u64,
    /// What the command produced.
    pub outcome: Outcome,
}

/// A client's fidelity card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FidelityCard {
    /// Cumulative spend.
    pub total_spent: u64,
    /// Tier data derived from the spend.
    pub tier: FidelityTier,
}

/// The back office: current state, its audit trail and the business rules.
///
/// Every write goes through [`Ledger::execute`], which rejects commands
/// built against an outdated read.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    state: State,
    audit_trail: AuditTrail,
    rules: BusinessRules,
}

impl Ledger {
    /// Creates a ledger over an initial state.
    #[must_use]
    pub const fn new(state: State, rules: BusinessRules) -> Self {
        Self {
            state,
            audit_trail: AuditTrail::new(),
            rules,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// Returns the current revision.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.state.revision()
    }

    /// Returns the audit trail.
    #[must_use]
    pub const fn audit_trail(&self) -> &AuditTrail {
        &self.audit_trail
    }

    /// Returns the business rules in force.
    #[must_use]
    pub const fn rules(&self) -> &BusinessRules {
        &self.rules
    }

    /// Resolves an identity against the current member list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::UnknownActor` if no member has this identity.
    pub fn authenticate(&self, actor_id: &str) -> Result<AuthenticatedActor, ApiError> {
        authenticate(&self.state.members, actor_id).map_err(ApiError::from)
    }

    /// Executes a command.
    ///
    /// The command is applied only if `expected_revision` matches the
    /// current revision. The actor is resolved again against the current
    /// members, so a handle obtained before a role change carries the new
    /// role. On success the new state replaces the old one and the audit
    /// event is appended; on failure nothing changes.
    ///
    /// # Arguments
    ///
    /// * `actor` - The acting member
    /// * `expected_revision` - The revision the caller's read was based on
    /// * `command` - The command to apply
    /// * `cause` - Why the command was issued
    /// * `at` - When the command takes effect
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Conflict` for a stale revision,
    /// `ApiError::UnknownActor` if the actor is no longer a member, or the
    /// translated core error if the command is rejected.
    pub fn execute(
        &mut self,
        actor: &AuthenticatedActor,
        expected_revision: u64,
        command: Command,
        cause: Cause,
        at: OffsetDateTime,
    ) -> Result<CommandReceipt, ApiError> {
        let current: u64 = self.state.revision();
        if expected_revision != current {
            warn!(
                actor_id = %actor.id,
                expected_revision,
                current,
                "stale revision"
            );
            return Err(translate_domain_error(DomainError::StaleRevision {
                expected: expected_revision,
                actual: current,
            }));
        }

        let actor: AuthenticatedActor = self.authenticate(&actor.id)?;
        let command_name: &'static str = command.name();
        let result: TransitionResult = apply(
            &self.state,
            command,
            actor.to_audit_actor(),
            cause,
            at,
            &self.rules,
        )
        .map_err(|err| {
            warn!(actor_id = %actor.id, command = command_name, error = %err, "command rejected");
            translate_core_error(err)
        })?;

        self.state = result.new_state;
        let audit_sequence: u64 = self.audit_trail.append(result.audit_event);
        let revision: u64 = self.state.revision();

        info!(
            actor_id = %actor.id,
            command = command_name,
            revision,
            audit_sequence,
            "command applied"
        );

        Ok(CommandReceipt {
            revision,
            audit_sequence,
            outcome: result.outcome,
        })
    }

    /// Returns a client's fidelity card.
    ///
    /// Clients read their own card; staff may look up any card. A member
    /// with no recorded spend gets an empty card.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if the actor may not read the card,
    /// or `ApiError::ResourceNotFound` if `client_id` is not a member.
    pub fn fidelity_card(
        &self,
        actor: &AuthenticatedActor,
        client_id: &str,
    ) -> Result<FidelityCard, ApiError> {
        AuthorizationService::authorize_owned(
            actor,
            client_id,
            PermissionAction::ViewOwnFidelity,
            PermissionAction::AddFidelityOperation,
        )?;
        self.require_member(client_id)?;

        let total_spent: u64 = self
            .state
            .fidelity_account(client_id)
            .map_or(0, FidelityAccount::total_spent);

        Ok(FidelityCard {
            total_spent,
            tier: compute_tier(total_spent, &self.rules),
        })
    }

    /// Returns the fidelity operations recorded for a client, oldest first.
    ///
    /// Clients read their own; reading another's needs `ViewAllFidelity`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if the actor may not read them,
    /// or `ApiError::ResourceNotFound` if `client_id` is not a member.
    pub fn fidelity_operations(
        &self,
        actor: &AuthenticatedActor,
        client_id: &str,
    ) -> Result<Vec<&FidelityOperation>, ApiError> {
        AuthorizationService::authorize_owned(
            actor,
            client_id,
            PermissionAction::ViewOwnFidelity,
            PermissionAction::ViewAllFidelity,
        )?;
        self.require_member(client_id)?;

        Ok(self
            .state
            .fidelity_operations
            .iter()
            .filter(|op| op.client_id == client_id)
            .collect())
    }

    fn require_member(&self, member_id: &str) -> Result<(), ApiError> {
        if self.state.member(member_id).is_none() {
            return Err(translate_domain_error(DomainError::NotFound {
                resource: "member",
                id: member_id.to_string(),
            }));
        }
        Ok(())
    }

    /// Computes the payroll of the week containing `now` without archiving.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` without `ViewPay`, or an internal
    /// error if a total overflows.
    pub fn weekly_payroll(
        &self,
        actor: &AuthenticatedActor,
        now: OffsetDateTime,
    ) -> Result<WeeklyPayrollSummary, ApiError> {
        AuthorizationService::authorize(actor, PermissionAction::ViewPay)?;

        let week_start: OffsetDateTime = start_of_week(now).map_err(translate_domain_error)?;
        let activities: Vec<WorkerWeeklyActivity> =
            weekly_activities(&self.state.invoices, &self.state.members, week_start)
                .map_err(translate_domain_error)?;
        compute_weekly_payroll(&activities, &self.rules).map_err(translate_domain_error)
    }

    /// Returns the most recent archived weeks, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` without `ViewPay`.
    pub fn payroll_history(
        &self,
        actor: &AuthenticatedActor,
        limit: usize,
    ) -> Result<Vec<ArchivedWeek>, ApiError> {
        AuthorizationService::authorize(actor, PermissionAction::ViewPay)?;
        summarize_archived_weeks(&self.state.invoices, limit).map_err(translate_domain_error)
    }

    /// Returns CA statistics for a worker.
    ///
    /// Workers read their own; reading another's needs `ViewAllStats`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if the actor may not read them.
    pub fn worker_stats(
        &self,
        actor: &AuthenticatedActor,
        worker_id: &str,
        now: OffsetDateTime,
    ) -> Result<WorkerStats, ApiError> {
        AuthorizationService::authorize_owned(
            actor,
            worker_id,
            PermissionAction::ViewOwnStats,
            PermissionAction::ViewAllStats,
        )?;
        worker_stats(&self.state.invoices, worker_id, now, &self.rules)
            .map_err(translate_domain_error)
    }

    /// Returns CA statistics for every staff member, highest weekly CA first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` without `ViewTeamStats`, or an
    /// internal error if a total overflows.
    pub fn team_stats(
        &self,
        actor: &AuthenticatedActor,
        now: OffsetDateTime,
    ) -> Result<Vec<TeamMemberStats>, ApiError> {
        AuthorizationService::authorize(actor, PermissionAction::ViewTeamStats)?;
        team_stats(&self.state.invoices, &self.state.members, now, &self.rules)
            .map_err(translate_domain_error)
    }

    /// Returns every invoice, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` without `ViewAllInvoices`.
    pub fn invoices(&self, actor: &AuthenticatedActor) -> Result<&[InvoiceRecord], ApiError> {
        AuthorizationService::authorize(actor, PermissionAction::ViewAllInvoices)?;
        Ok(&self.state.invoices)
    }

    /// Returns the invoices the actor created, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` unless the actor may create invoices.
    pub fn own_invoices(&self, actor: &AuthenticatedActor) -> Result<Vec<&InvoiceRecord>, ApiError> {
        AuthorizationService::authorize(actor, PermissionAction::CreateInvoice)?;
        Ok(self
            .state
            .invoices
            .iter()
            .filter(|i| actor.is(&i.worker_id))
            .collect())
    }

    /// Returns every collaboration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` without `ViewCollaborations`.
    pub fn collaborations(&self, actor: &AuthenticatedActor) -> Result<&[Collaboration], ApiError> {
        AuthorizationService::authorize(actor, PermissionAction::ViewCollaborations)?;
        Ok(&self.state.collaborations)
    }

    /// Returns every candidature, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` without `ViewCandidatures`.
    pub fn candidatures(&self, actor: &AuthenticatedActor) -> Result<&[Candidature], ApiError> {
        AuthorizationService::authorize(actor, PermissionAction::ViewCandidatures)?;
        Ok(&self.state.candidatures)
    }

    /// Returns one candidature.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` without `ViewCandidatures`, checked
    /// before the lookup, or `ApiError::ResourceNotFound`.
    pub fn candidature(
        &self,
        actor: &AuthenticatedActor,
        candidature_id: u64,
    ) -> Result<&Candidature, ApiError> {
        AuthorizationService::authorize(actor, PermissionAction::ViewCandidatures)?;
        self.state.candidature(candidature_id).ok_or_else(|| {
            translate_domain_error(DomainError::NotFound {
                resource: "candidature",
                id: candidature_id.to_string(),
            })
        })
    }

    /// Returns the candidatures the actor submitted, oldest first.
    #[must_use]
    pub fn own_candidatures(&self, actor: &AuthenticatedActor) -> Vec<&Candidature> {
        self.state
            .candidatures
            .iter()
            .filter(|c| actor.is(&c.candidate_id))
            .collect()
    }
}
