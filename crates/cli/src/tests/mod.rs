// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for argument parsing and command output.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;

use clap::Parser;
use hm_ledger_domain::{BusinessRules, CandidatureStatus, Role, ServiceLine};
use serde_json::Value;
use time::macros::date;

use crate::Args;
use crate::commands::{Command, load_rules, parse_date, parse_service_line};

fn run(args: &[&str]) -> Value {
    let args: Args = Args::try_parse_from(args).unwrap();
    serde_json::from_str(&args.run().unwrap()).unwrap()
}

fn write_temp_file(name: &str, contents: &str) -> PathBuf {
    let path: PathBuf = std::env::temp_dir().join(format!(
        "hm-ledger-cli-{}-{name}",
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_parse_service_line_with_quantity() {
    assert_eq!(
        parse_service_line("Repair:150000x2"),
        Ok(ServiceLine::new("Repair", 150_000, 2))
    );
}

#[test]
fn test_parse_service_line_defaults_quantity_to_one() {
    assert_eq!(
        parse_service_line("Full tune: 300000"),
        Ok(ServiceLine::new("Full tune", 300_000, 1))
    );
}

#[test]
fn test_parse_service_line_rejects_garbage() {
    assert!(parse_service_line("Repair").is_err());
    assert!(parse_service_line(":100").is_err());
    assert!(parse_service_line("Repair:abc").is_err());
    assert!(parse_service_line("Repair:100x-1").is_err());
}

#[test]
fn test_parse_date() {
    assert_eq!(parse_date("2026-10-16"), Ok(date!(2026 - 10 - 16)));
    assert!(parse_date("2026-02-30").is_err());
}

#[test]
fn test_price_arguments_parse() {
    let args: Args = Args::try_parse_from([
        "hm-ledger",
        "price",
        "--line",
        "Repair:100x2",
        "--line",
        "Paint:50",
        "--discount",
        "10",
    ])
    .unwrap();

    match args.command {
        Command::Price { lines, discount } => {
            assert_eq!(lines.len(), 2);
            assert_eq!(discount, 10);
        }
        other => panic!("expected price, got {other:?}"),
    }
}

#[test]
fn test_price_requires_a_line() {
    assert!(Args::try_parse_from(["hm-ledger", "price"]).is_err());
}

#[test]
fn test_unknown_role_is_rejected() {
    assert!(Args::try_parse_from(["hm-ledger", "capabilities", "mayor"]).is_err());
}

#[test]
fn test_transitions_arguments_parse() {
    let args: Args =
        Args::try_parse_from(["hm-ledger", "transitions", "en_attente", "chef_equipe"]).unwrap();

    match args.command {
        Command::Transitions { from, role } => {
            assert_eq!(from, CandidatureStatus::EnAttente);
            assert_eq!(role, Role::ChefEquipe);
        }
        other => panic!("expected transitions, got {other:?}"),
    }
}

#[test]
fn test_tier_output() {
    let output: Value = run(&["hm-ledger", "tier", "1000000"]);

    assert_eq!(output["total_spent"], 1_000_000);
    assert_eq!(output["points"], 2);
    assert_eq!(output["amount_to_next_point"], 500_000);
}

#[test]
fn test_price_output_rounds_discount() {
    let output: Value = run(&["hm-ledger", "price", "--line", "Bolt:3", "--discount", "50"]);

    assert_eq!(output["base_amount"], 3);
    assert_eq!(output["discount_amount"], 2);
    assert_eq!(output["final_amount"], 1);
}

#[test]
fn test_check_invoice_number_output() {
    let output: Value = run(&["hm-ledger", "check-invoice-number", "HM-20261016-A1B2"]);

    assert_eq!(output["invoice_number"], "HM-20261016-A1B2");
    assert_eq!(output["date"], "2026-10-16");
}

#[test]
fn test_check_invoice_number_rejects_bad_value() {
    let args: Args =
        Args::try_parse_from(["hm-ledger", "check-invoice-number", "HM-2026-XYZ"]).unwrap();
    assert!(args.run().is_err());
}

#[test]
fn test_generated_invoice_number_uses_date() {
    let output: Value = run(&["hm-ledger", "invoice-number", "--date", "2026-10-16"]);

    let number: &str = output["invoice_number"].as_str().unwrap();
    assert!(number.starts_with("HM-20261016-"));
    assert_eq!(number.len(), 16);
}

#[test]
fn test_transitions_output() {
    let output: Value = run(&["hm-ledger", "transitions", "en_attente", "chef_equipe"]);

    assert_eq!(output["allowed"], serde_json::json!(["a_tester", "refuse"]));
}

#[test]
fn test_capabilities_output() {
    let output: Value = run(&["hm-ledger", "capabilities", "recrue"]);

    assert_eq!(output["role"], "recrue");
    assert_eq!(output["assignable_roles"], serde_json::json!([]));
}

#[test]
fn test_payroll_from_file() {
    let path: PathBuf = write_temp_file(
        "activity.json",
        r#"[
            {"worker_id": "w1", "display_name": "Rookie", "role": "recrue", "ca_week": 1000000, "invoice_count": 1},
            {"worker_id": "w2", "display_name": "Idle", "role": "experimente", "ca_week": 0, "invoice_count": 0}
        ]"#,
    );

    let output: Value = run(&["hm-ledger", "payroll", path.to_str().unwrap()]);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(output["total_ca"], 1_000_000);
    assert_eq!(output["total_pay"], 550_000);
    assert_eq!(output["tax_amount"], 60_000);
    assert_eq!(output["workers"].as_array().unwrap().len(), 1);
}

#[test]
fn test_rules_file_overrides_defaults() {
    let path: PathBuf = write_temp_file("rules.json", r#"{"points_per_amount": 100}"#);

    let output: Value = run(&[
        "hm-ledger",
        "tier",
        "250",
        "--rules",
        path.to_str().unwrap(),
    ]);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(output["points"], 2);
}

#[test]
fn test_invalid_rules_file_is_rejected() {
    let path: PathBuf = write_temp_file("bad-rules.json", r#"{"weekly_objective": 0}"#);

    let result = load_rules(Some(&path));
    std::fs::remove_file(&path).unwrap();

    assert!(result.is_err());
}

#[test]
fn test_no_rules_file_uses_defaults() {
    assert_eq!(load_rules(None).unwrap(), BusinessRules::default());
}
