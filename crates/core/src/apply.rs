// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{Outcome, State, TransitionResult};
use hm_ledger_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use hm_ledger_domain::{
    BusinessRules, Candidature, CandidatureForm, CandidatureStatus, Collaboration,
    DEFAULT_ALLOCATION_ATTEMPTS, DomainError, FidelityAccount, FidelityOperation, InvoiceAmounts,
    InvoiceNumber, InvoiceRecord, Member, PermissionAction, Role, ServiceLine,
    WeeklyPayrollSummary, WorkerWeeklyActivity, allocate_invoice_number, authorize,
    compute_weekly_payroll, ensure_no_pending_candidature, is_payroll_invoice,
    price_invoice_with_collaboration, start_of_week, validate_fidelity_amount,
    validate_role_change, weekly_activities,
};
use time::OffsetDateTime;

/// Who is acting, why, and when.
struct Context<'a> {
    actor: Actor,
    cause: Cause,
    at: OffsetDateTime,
    rules: &'a BusinessRules,
}

/// Applies a command to the current state, producing a new state and audit event.
///
/// The permission check for the command's action class runs before any
/// record is looked up, so a denied actor cannot learn whether a record
/// exists.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `at` - When the command is applied
/// * `rules` - Business constants
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state, audit event and outcome
/// * `Err(CoreError)` if the command is invalid; the input state is unchanged
///
/// # Errors
///
/// Returns an error if:
/// - The actor's role does not allow the command
/// - A referenced record does not exist
/// - The command violates domain rules
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
    at: OffsetDateTime,
    rules: &BusinessRules,
) -> Result<TransitionResult, CoreError> {
    let ctx: Context<'_> = Context {
        actor,
        cause,
        at,
        rules,
    };

    match command {
        Command::RecordFidelityOperation { client_id, amount } => {
            record_fidelity_operation(state, ctx, &client_id, amount)
        }
        Command::SaveCollaboration {
            name,
            discount_percent,
            is_active,
        } => save_collaboration(state, ctx, &name, discount_percent, is_active),
        Command::CreateInvoice {
            lines,
            collaboration,
        } => create_invoice(state, ctx, &lines, collaboration.as_deref()),
        Command::ArchiveWeek => archive_week(state, ctx),
        Command::SubmitCandidature { form } => submit_candidature(state, ctx, form),
        Command::ChangeCandidatureStatus {
            candidature_id,
            new_status,
        } => change_candidature_status(state, ctx, candidature_id, new_status),
        Command::AddCandidatureNote {
            candidature_id,
            content,
        } => add_candidature_note(state, ctx, candidature_id, &content),
        Command::ChangeUserRole {
            target_id,
            new_role,
        } => change_user_role(state, ctx, &target_id, new_role),
    }
}

/// Stamps the next revision onto `new_state` and builds the audit event.
fn finish(
    state: &State,
    mut new_state: State,
    ctx: Context<'_>,
    action: Action,
    outcome: Outcome,
) -> Result<TransitionResult, CoreError> {
    let revision: u64 =
        state
            .revision()
            .checked_add(1)
            .ok_or(DomainError::ArithmeticOverflow {
                operation: "advancing the state revision",
            })?;
    new_state.set_revision(revision);

    let before: StateSnapshot = state.to_snapshot();
    let after: StateSnapshot = new_state.to_snapshot();
    let audit_event: AuditEvent =
        AuditEvent::new(ctx.actor, ctx.cause, action, before, after, ctx.at);

    Ok(TransitionResult {
        new_state,
        audit_event,
        outcome,
    })
}

fn not_found(resource: &'static str, id: impl ToString) -> DomainError {
    DomainError::NotFound {
        resource,
        id: id.to_string(),
    }
}

fn find_candidature(state: &State, candidature_id: u64) -> Result<usize, DomainError> {
    state
        .candidatures
        .iter()
        .position(|c| c.id == candidature_id)
        .ok_or_else(|| not_found("candidature", candidature_id))
}

fn record_fidelity_operation(
    state: &State,
    ctx: Context<'_>,
    client_id: &str,
    amount: i64,
) -> Result<TransitionResult, CoreError> {
    authorize(PermissionAction::AddFidelityOperation, ctx.actor.role)?;
    let credited: u64 = validate_fidelity_amount(amount)?;
    if state.member(client_id).is_none() {
        return Err(not_found("member", client_id).into());
    }

    let account: FidelityAccount = state
        .fidelity_account(client_id)
        .cloned()
        .unwrap_or_else(|| FidelityAccount::open(client_id))
        .record(amount)?;

    let mut new_state: State = state.clone();
    match new_state
        .fidelity_accounts
        .iter_mut()
        .find(|a| a.client_id() == client_id)
    {
        Some(existing) => *existing = account.clone(),
        None => new_state.fidelity_accounts.push(account.clone()),
    }
    new_state.fidelity_operations.push(FidelityOperation {
        client_id: client_id.to_string(),
        recorded_by: ctx.actor.id.clone(),
        amount: credited,
        recorded_at: ctx.at,
    });

    let action: Action = Action::new(
        String::from("RecordFidelityOperation"),
        Some(format!(
            "Recorded {credited} for client '{client_id}', total {}",
            account.total_spent()
        )),
    );
    let outcome: Outcome = Outcome::FidelityRecorded {
        client_id: client_id.to_string(),
        total_spent: account.total_spent(),
        tier: account.tier(ctx.rules),
    };
    finish(state, new_state, ctx, action, outcome)
}

fn save_collaboration(
    state: &State,
    ctx: Context<'_>,
    name: &str,
    discount_percent: u8,
    is_active: bool,
) -> Result<TransitionResult, CoreError> {
    authorize(PermissionAction::ManageCollaborations, ctx.actor.role)?;
    let collaboration: Collaboration = Collaboration::new(name, discount_percent, is_active)?;

    let mut new_state: State = state.clone();
    match new_state
        .collaborations
        .iter_mut()
        .find(|c| c.name() == collaboration.name())
    {
        Some(existing) => *existing = collaboration.clone(),
        None => new_state.collaborations.push(collaboration.clone()),
    }

    let action: Action = Action::new(
        String::from("SaveCollaboration"),
        Some(format!(
            "Saved collaboration '{}' ({} %, active: {})",
            collaboration.name(),
            collaboration.discount_percent(),
            collaboration.is_active()
        )),
    );
    finish(
        state,
        new_state,
        ctx,
        action,
        Outcome::CollaborationSaved { collaboration },
    )
}

fn create_invoice(
    state: &State,
    ctx: Context<'_>,
    lines: &[ServiceLine],
    collaboration_name: Option<&str>,
) -> Result<TransitionResult, CoreError> {
    authorize(PermissionAction::CreateInvoice, ctx.actor.role)?;

    let collaboration: Option<&Collaboration> = collaboration_name
        .map(|name| {
            state
                .collaboration(name)
                .ok_or_else(|| not_found("collaboration", name))
        })
        .transpose()?;
    let amounts: InvoiceAmounts = price_invoice_with_collaboration(lines, collaboration)?;
    let invoice_number: InvoiceNumber =
        allocate_invoice_number(ctx.at.date(), DEFAULT_ALLOCATION_ATTEMPTS, |candidate| {
            state
                .invoices
                .iter()
                .any(|i| &i.invoice_number == candidate)
        })?;

    let invoice: InvoiceRecord = InvoiceRecord {
        invoice_number,
        worker_id: ctx.actor.id.clone(),
        amounts,
        collaboration_name: collaboration
            .filter(|c| c.is_active())
            .map(|c| c.name().to_string()),
        created_at: ctx.at,
        is_weekly_archived: false,
    };
    let mut new_state: State = state.clone();
    new_state.invoices.push(invoice.clone());

    let action: Action = Action::new(
        String::from("CreateInvoice"),
        Some(format!(
            "Created invoice {} for {}",
            invoice.invoice_number,
            invoice.final_amount()
        )),
    );
    finish(
        state,
        new_state,
        ctx,
        action,
        Outcome::InvoiceCreated { invoice },
    )
}

/// Computes payroll and archives the invoices it was computed from.
///
/// Both steps read the same input state and select invoices with
/// [`is_payroll_invoice`], so no invoice is counted without being archived
/// or archived without being counted. Invoices by members who are no longer
/// staff stay unarchived.
fn archive_week(state: &State, ctx: Context<'_>) -> Result<TransitionResult, CoreError> {
    authorize(PermissionAction::ManagePay, ctx.actor.role)?;

    let week_start: OffsetDateTime = start_of_week(ctx.at)?;
    let activities: Vec<WorkerWeeklyActivity> =
        weekly_activities(&state.invoices, &state.members, week_start)?;
    let summary: WeeklyPayrollSummary = compute_weekly_payroll(&activities, ctx.rules)?;

    let mut new_state: State = state.clone();
    let mut archived_invoices: u32 = 0;
    let members: &[Member] = &state.members;
    for invoice in new_state
        .invoices
        .iter_mut()
        .filter(|i| is_payroll_invoice(i, members, week_start))
    {
        invoice.is_weekly_archived = true;
        archived_invoices = archived_invoices.saturating_add(1);
    }

    let action: Action = Action::new(
        String::from("ArchiveWeek"),
        Some(format!(
            "Archived {archived_invoices} invoices for the week of {}: CA {}, pay {}, tax {}",
            week_start.date(),
            summary.total_ca,
            summary.total_pay,
            summary.tax_amount
        )),
    );
    finish(
        state,
        new_state,
        ctx,
        action,
        Outcome::WeekArchived {
            summary,
            archived_invoices,
        },
    )
}

fn submit_candidature(
    state: &State,
    ctx: Context<'_>,
    form: CandidatureForm,
) -> Result<TransitionResult, CoreError> {
    authorize(PermissionAction::SubmitCandidature, ctx.actor.role)?;
    ensure_no_pending_candidature(&ctx.actor.id, &state.candidatures)?;

    let candidature_id: u64 = state.next_candidature_id();
    let candidature: Candidature =
        Candidature::submit(candidature_id, &ctx.actor.id, ctx.actor.role, form, ctx.at)?;
    let mut new_state: State = state.clone();
    new_state.candidatures.push(candidature);

    let action: Action = Action::new(
        String::from("SubmitCandidature"),
        Some(format!("Submitted candidature {candidature_id}")),
    );
    finish(
        state,
        new_state,
        ctx,
        action,
        Outcome::CandidatureSubmitted { candidature_id },
    )
}

fn change_candidature_status(
    state: &State,
    ctx: Context<'_>,
    candidature_id: u64,
    new_status: CandidatureStatus,
) -> Result<TransitionResult, CoreError> {
    authorize(PermissionAction::ChangeCandidatureStatus, ctx.actor.role)?;
    let index: usize = find_candidature(state, candidature_id)?;

    let current: &Candidature = &state.candidatures[index];
    let old_status: CandidatureStatus = current.status();
    let (updated, entry) = current.transition(new_status, &ctx.actor.id, ctx.actor.role, ctx.at)?;
    let mut new_state: State = state.clone();
    new_state.candidatures[index] = updated;

    let action: Action = Action::new(
        String::from("ChangeCandidatureStatus"),
        Some(format!(
            "Candidature {candidature_id}: {old_status} -> {new_status}"
        )),
    );
    finish(
        state,
        new_state,
        ctx,
        action,
        Outcome::CandidatureStatusChanged {
            candidature_id,
            entry,
        },
    )
}

fn add_candidature_note(
    state: &State,
    ctx: Context<'_>,
    candidature_id: u64,
    content: &str,
) -> Result<TransitionResult, CoreError> {
    authorize(PermissionAction::AddCandidatureNote, ctx.actor.role)?;
    let index: usize = find_candidature(state, candidature_id)?;

    let updated: Candidature =
        state.candidatures[index].with_note(&ctx.actor.id, ctx.actor.role, content, ctx.at)?;
    let mut new_state: State = state.clone();
    new_state.candidatures[index] = updated;

    let action: Action = Action::new(
        String::from("AddCandidatureNote"),
        Some(format!("Added a note to candidature {candidature_id}")),
    );
    finish(
        state,
        new_state,
        ctx,
        action,
        Outcome::CandidatureNoteAdded { candidature_id },
    )
}

fn change_user_role(
    state: &State,
    ctx: Context<'_>,
    target_id: &str,
    new_role: Role,
) -> Result<TransitionResult, CoreError> {
    authorize(PermissionAction::ManageUserRoles, ctx.actor.role)?;
    let old_role: Role = state
        .member(target_id)
        .map(|m| m.role)
        .ok_or_else(|| not_found("member", target_id))?;
    validate_role_change(&ctx.actor.id, ctx.actor.role, target_id, old_role, new_role)?;

    let mut new_state: State = state.clone();
    for member in new_state.members.iter_mut().filter(|m| m.id == target_id) {
        member.role = new_role;
    }

    let action: Action = Action::new(
        String::from("ChangeUserRole"),
        Some(format!("Changed '{target_id}' from {old_role} to {new_role}")),
    );
    finish(
        state,
        new_state,
        ctx,
        action,
        Outcome::UserRoleChanged {
            target_id: target_id.to_string(),
            old_role,
            new_role,
        },
    )
}
