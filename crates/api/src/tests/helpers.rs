// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use hm_ledger::{Command, State};
use hm_ledger_audit::Cause;
use hm_ledger_domain::{BusinessRules, CandidatureForm, Member, Role, ServiceLine};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{AuthenticatedActor, CommandReceipt, Ledger};

/// A Friday; the week started on Sunday 2026-10-11.
pub const NOW: OffsetDateTime = datetime!(2026-10-16 12:00 UTC);

pub fn create_test_ledger() -> Ledger {
    Ledger::new(
        State::with_members(vec![
            Member::new("admin", "Admin", Role::Superadmin),
            Member::new("boss", "Boss", Role::Patron),
            Member::new("lead", "Lead", Role::ChefEquipe),
            Member::new("senior", "Senior", Role::Experimente),
            Member::new("rookie", "Rookie", Role::Recrue),
            Member::new("client-1", "Client One", Role::Client),
            Member::new("client-2", "Client Two", Role::Client),
        ]),
        BusinessRules::default(),
    )
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn actor(ledger: &Ledger, id: &str) -> AuthenticatedActor {
    ledger.authenticate(id).unwrap()
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

/// Executes a command as `actor_id` against the ledger's current revision.
pub fn execute_as(ledger: &mut Ledger, actor_id: &str, command: Command) -> CommandReceipt {
    let acting: AuthenticatedActor = actor(ledger, actor_id);
    let revision: u64 = ledger.revision();
    ledger
        .execute(&acting, revision, command, create_test_cause(), NOW)
        .unwrap()
}
