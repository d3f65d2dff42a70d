// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, CoreError, State, TransitionResult, apply};
use hm_ledger_audit::{Actor, Cause};
use hm_ledger_domain::{BusinessRules, CandidatureForm, Member, Role, ServiceLine};
use time::OffsetDateTime;
use time::macros::datetime;

/// A Friday.
pub const NOW: OffsetDateTime = datetime!(2026-10-16 12:00 UTC);

pub fn create_test_actor(id: &str, role: Role) -> Actor {
    Actor::new(id.to_string(), role)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Back office request"))
}

pub fn create_test_state() -> State {
    State::with_members(vec![
        Member::new("admin", "Admin", Role::Superadmin),
        Member::new("boss", "Boss", Role::Patron),
        Member::new("lead", "Lead", Role::ChefEquipe),
        Member::new("senior", "Senior", Role::Experimente),
        Member::new("rookie", "Rookie", Role::Recrue),
        Member::new("client-1", "Client One", Role::Client),
        Member::new("client-2", "Client Two", Role::Client),
    ])
}

pub fn create_test_form() -> CandidatureForm {
    CandidatureForm {
        pseudo: String::from("Tony Wrench"),
        age: 24,
        availabilities: String::from("Evenings and weekends"),
        roleplay_experience: String::from("Three years on a city roleplay server"),
        mechanic_experience: String::from("Ran a tuning shop for two seasons"),
        motivations: String::from("I want to join a serious and friendly garage"),
        roleplay_vision: String::from("Immersive roleplay with consistent characters"),
        conflict_handling: String::from("Talk it through calmly, then escalate to a lead"),
        accepts_rules: true,
    }
}

pub fn invoice_command(unit_price: u64) -> Command {
    Command::CreateInvoice {
        lines: vec![ServiceLine::new("Repair", unit_price, 1)],
        collaboration: None,
    }
}

/// Applies a command as `actor_id` (looked up in `state`) at `at` with default rules.
pub fn apply_as(
    state: &State,
    actor_id: &str,
    command: Command,
    at: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let role: Role = state.member(actor_id).map_or(Role::Client, |m| m.role);
    apply(
        state,
        command,
        create_test_actor(actor_id, role),
        create_test_cause(),
        at,
        &BusinessRules::default(),
    )
}
