// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BusinessRules, BusinessRulesConfig, DomainError, FidelityAccount, FidelityTier, compute_tier,
    validate_fidelity_amount,
};

#[test]
fn test_tier_for_new_client() {
    let tier: FidelityTier = compute_tier(0, &BusinessRules::default());

    assert_eq!(tier.points, 0);
    assert_eq!(tier.current_discount_percent, 0);
    assert_eq!(tier.amount_to_next_point, 500_000);
    assert_eq!(tier.points_to_next_bonus, 20);
}

#[test]
fn test_amount_to_next_point_is_full_step_at_exact_multiple() {
    let tier: FidelityTier = compute_tier(500_000, &BusinessRules::default());

    assert_eq!(tier.points, 1);
    assert_eq!(tier.amount_to_next_point, 500_000);
    assert_eq!(tier.points_to_next_bonus, 19);
}

#[test]
fn test_points_to_next_bonus_rounds_up_partial_points() {
    let tier: FidelityTier = compute_tier(750_000, &BusinessRules::default());

    assert_eq!(tier.points, 1);
    assert_eq!(tier.amount_to_next_point, 250_000);
    // 9_250_000 left is 18.5 points
    assert_eq!(tier.points_to_next_bonus, 19);
}

#[test]
fn test_first_bonus_threshold() {
    let tier: FidelityTier = compute_tier(10_000_000, &BusinessRules::default());

    assert_eq!(tier.points, 20);
    assert_eq!(tier.current_discount_percent, 20);
    assert_eq!(tier.points_to_next_bonus, 20);
}

#[test]
fn test_bonus_discounts_stack() {
    let rules: BusinessRules = BusinessRules::default();

    assert_eq!(compute_tier(9_999_999, &rules).current_discount_percent, 0);
    assert_eq!(compute_tier(20_000_000, &rules).current_discount_percent, 40);
    assert_eq!(compute_tier(100_000_000, &rules).current_discount_percent, 200);
}

#[test]
fn test_tier_uses_configured_rules() {
    let rules: BusinessRules = BusinessRules::new(BusinessRulesConfig {
        points_per_amount: 1_000,
        bonus_threshold: 10_000,
        bonus_discount_percent: 5,
        ..BusinessRulesConfig::default()
    })
    .unwrap();

    let tier: FidelityTier = compute_tier(25_500, &rules);
    assert_eq!(tier.points, 25);
    assert_eq!(tier.current_discount_percent, 10);
    assert_eq!(tier.amount_to_next_point, 500);
    assert_eq!(tier.points_to_next_bonus, 5);
}

#[test]
fn test_tier_is_monotonic() {
    let rules: BusinessRules = BusinessRules::default();
    let mut previous: FidelityTier = compute_tier(0, &rules);

    for spent in (0..=30_000_000_u64).step_by(250_000) {
        let tier: FidelityTier = compute_tier(spent, &rules);
        assert!(tier.points >= previous.points);
        assert!(tier.current_discount_percent >= previous.current_discount_percent);
        previous = tier;
    }
}

#[test]
fn test_non_positive_amounts_are_rejected() {
    assert_eq!(
        validate_fidelity_amount(0),
        Err(DomainError::NonPositiveAmount { amount: 0 })
    );
    assert_eq!(
        validate_fidelity_amount(-100),
        Err(DomainError::NonPositiveAmount { amount: -100 })
    );
    assert_eq!(validate_fidelity_amount(100), Ok(100));
}

#[test]
fn test_account_record_accumulates() {
    let account: FidelityAccount = FidelityAccount::open("client-1");
    let account: FidelityAccount = account.record(300_000).unwrap();
    let account: FidelityAccount = account.record(200_000).unwrap();

    assert_eq!(account.client_id(), "client-1");
    assert_eq!(account.total_spent(), 500_000);
    assert_eq!(account.tier(&BusinessRules::default()).points, 1);
}

#[test]
fn test_account_record_rejects_zero_and_leaves_total() {
    let account: FidelityAccount = FidelityAccount::open("client-1").record(1_000).unwrap();

    let result: Result<FidelityAccount, DomainError> = account.record(0);
    assert!(matches!(result, Err(DomainError::NonPositiveAmount { .. })));
    assert_eq!(account.total_spent(), 1_000);
}
