// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CandidatureForm, InvoiceAmounts, InvoiceNumber, InvoiceRecord, ServiceLine, price_invoice,
};
use time::OffsetDateTime;
use time::macros::date;

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

pub fn create_test_invoice(
    worker_id: &str,
    amount: u64,
    created_at: OffsetDateTime,
    is_weekly_archived: bool,
) -> InvoiceRecord {
    let amounts: InvoiceAmounts = price_invoice(&[ServiceLine::new("Repair", amount, 1)], 0).unwrap();
    InvoiceRecord {
        invoice_number: InvoiceNumber::from_parts(date!(2026 - 10 - 16), "TEST").unwrap(),
        worker_id: worker_id.to_string(),
        amounts,
        collaboration_name: None,
        created_at,
        is_weekly_archived,
    }
}
