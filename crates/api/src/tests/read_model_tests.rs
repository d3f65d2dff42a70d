// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hm_ledger::Command;
use hm_ledger_domain::{FidelityOperation, TeamMemberStats, WorkerStats};

use super::helpers::{
    NOW, actor, create_test_form, create_test_ledger, execute_as, invoice_command,
};
use crate::{ApiError, AuthenticatedActor, FidelityCard, Ledger};

#[test]
fn test_client_reads_own_fidelity_card() {
    let mut ledger: Ledger = create_test_ledger();
    execute_as(
        &mut ledger,
        "rookie",
        Command::RecordFidelityOperation {
            client_id: String::from("client-1"),
            amount: 1_200_000,
        },
    );
    let client: AuthenticatedActor = actor(&ledger, "client-1");

    let card: FidelityCard = ledger.fidelity_card(&client, "client-1").unwrap();

    assert_eq!(card.total_spent, 1_200_000);
    assert_eq!(card.tier.points, 2);
    assert_eq!(card.tier.amount_to_next_point, 300_000);
    assert_eq!(card.tier.current_discount_percent, 0);
}

#[test]
fn test_member_without_spend_has_empty_card() {
    let ledger: Ledger = create_test_ledger();
    let client: AuthenticatedActor = actor(&ledger, "client-2");

    let card: FidelityCard = ledger.fidelity_card(&client, "client-2").unwrap();

    assert_eq!(card.total_spent, 0);
    assert_eq!(card.tier.points, 0);
}

#[test]
fn test_client_cannot_read_another_card() {
    let ledger: Ledger = create_test_ledger();
    let client: AuthenticatedActor = actor(&ledger, "client-1");

    let result: Result<FidelityCard, ApiError> = ledger.fidelity_card(&client, "client-2");

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_staff_look_up_any_client_card() {
    let mut ledger: Ledger = create_test_ledger();
    execute_as(
        &mut ledger,
        "senior",
        Command::RecordFidelityOperation {
            client_id: String::from("client-2"),
            amount: 500_000,
        },
    );
    let rookie: AuthenticatedActor = actor(&ledger, "rookie");

    let card: FidelityCard = ledger.fidelity_card(&rookie, "client-2").unwrap();

    assert_eq!(card.total_spent, 500_000);
    assert!(matches!(
        ledger.fidelity_card(&rookie, "ghost"),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_fidelity_operations_visibility() {
    let mut ledger: Ledger = create_test_ledger();
    for amount in [200_000, 300_000] {
        execute_as(
            &mut ledger,
            "rookie",
            Command::RecordFidelityOperation {
                client_id: String::from("client-1"),
                amount,
            },
        );
    }
    execute_as(
        &mut ledger,
        "rookie",
        Command::RecordFidelityOperation {
            client_id: String::from("client-2"),
            amount: 100_000,
        },
    );
    let client: AuthenticatedActor = actor(&ledger, "client-1");
    let rookie: AuthenticatedActor = actor(&ledger, "rookie");
    let boss: AuthenticatedActor = actor(&ledger, "boss");

    let own: Vec<&FidelityOperation> = ledger.fidelity_operations(&client, "client-1").unwrap();
    assert_eq!(own.len(), 2);
    assert_eq!(own[0].amount, 200_000);
    assert_eq!(own[1].recorded_by, "rookie");

    assert!(matches!(
        ledger.fidelity_operations(&client, "client-2"),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        ledger.fidelity_operations(&rookie, "client-1"),
        Err(ApiError::Unauthorized { .. })
    ));
    assert_eq!(ledger.fidelity_operations(&boss, "client-2").unwrap().len(), 1);
    assert!(matches!(
        ledger.fidelity_operations(&boss, "ghost"),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_patron_reads_any_card_but_not_unknown_members() {
    let ledger: Ledger = create_test_ledger();
    let boss: AuthenticatedActor = actor(&ledger, "boss");

    assert!(ledger.fidelity_card(&boss, "client-2").is_ok());
    assert!(matches!(
        ledger.fidelity_card(&boss, "ghost"),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_worker_stats_visibility() {
    let mut ledger: Ledger = create_test_ledger();
    execute_as(&mut ledger, "senior", invoice_command(10_000_000));
    let rookie: AuthenticatedActor = actor(&ledger, "rookie");
    let senior: AuthenticatedActor = actor(&ledger, "senior");
    let boss: AuthenticatedActor = actor(&ledger, "boss");

    let own: WorkerStats = ledger.worker_stats(&senior, "senior", NOW).unwrap();
    assert_eq!(own.ca_week, 10_000_000);
    assert_eq!(own.invoice_count, 1);
    assert_eq!(own.objective_progress, 20);

    assert!(matches!(
        ledger.worker_stats(&rookie, "senior", NOW),
        Err(ApiError::Unauthorized { .. })
    ));
    assert_eq!(ledger.worker_stats(&boss, "senior", NOW).unwrap(), own);
}

#[test]
fn test_team_stats_for_management() {
    let mut ledger: Ledger = create_test_ledger();
    execute_as(&mut ledger, "rookie", invoice_command(1_000_000));
    execute_as(&mut ledger, "senior", invoice_command(4_000_000));
    let lead: AuthenticatedActor = actor(&ledger, "lead");
    let senior: AuthenticatedActor = actor(&ledger, "senior");

    let team: Vec<TeamMemberStats> = ledger.team_stats(&lead, NOW).unwrap();

    assert_eq!(team.len(), 5);
    assert_eq!(team[0].worker_id, "senior");
    assert_eq!(team[0].stats.ca_week, 4_000_000);
    assert_eq!(team[1].worker_id, "rookie");
    assert!(team.iter().all(|t| t.role.is_staff()));
    assert!(matches!(
        ledger.team_stats(&senior, NOW),
        Err(ApiError::Unauthorized { .. })
    ));
}

#[test]
fn test_invoice_listings() {
    let mut ledger: Ledger = create_test_ledger();
    execute_as(&mut ledger, "rookie", invoice_command(1_000_000));
    execute_as(&mut ledger, "senior", invoice_command(2_000_000));
    let rookie: AuthenticatedActor = actor(&ledger, "rookie");
    let lead: AuthenticatedActor = actor(&ledger, "lead");

    assert_eq!(ledger.own_invoices(&rookie).unwrap().len(), 1);
    assert!(matches!(
        ledger.invoices(&rookie),
        Err(ApiError::Unauthorized { .. })
    ));
    assert_eq!(ledger.invoices(&lead).unwrap().len(), 2);
}

#[test]
fn test_collaborations_need_chef_equipe() {
    let mut ledger: Ledger = create_test_ledger();
    execute_as(
        &mut ledger,
        "boss",
        Command::SaveCollaboration {
            name: String::from("Benny's"),
            discount_percent: 15,
            is_active: true,
        },
    );
    let senior: AuthenticatedActor = actor(&ledger, "senior");
    let lead: AuthenticatedActor = actor(&ledger, "lead");

    assert!(ledger.collaborations(&senior).is_err());
    assert_eq!(ledger.collaborations(&lead).unwrap().len(), 1);
}

#[test]
fn test_candidature_lookup_checks_permission_first() {
    let mut ledger: Ledger = create_test_ledger();
    execute_as(
        &mut ledger,
        "client-1",
        Command::SubmitCandidature {
            form: create_test_form(),
        },
    );
    let client: AuthenticatedActor = actor(&ledger, "client-1");
    let lead: AuthenticatedActor = actor(&ledger, "lead");

    assert!(matches!(
        ledger.candidature(&client, 999),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        ledger.candidature(&lead, 999),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert_eq!(ledger.candidature(&lead, 1).unwrap().candidate_id, "client-1");
    assert_eq!(ledger.own_candidatures(&client).len(), 1);
    assert_eq!(ledger.candidatures(&lead).unwrap().len(), 1);
}
