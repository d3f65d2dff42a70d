// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fidelity points and cumulative discount tiers.
//!
//! Tier data is derived from a client's cumulative spend and never stored.
//! Bonus discounts stack: every full bonus threshold adds another
//! `bonus_discount_percent`, with no cap.

use crate::error::DomainError;
use crate::rules::BusinessRules;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Tier data derived from a cumulative spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FidelityTier {
    /// One point per full `points_per_amount` spent.
    pub points: u64,
    /// Stacked bonus discount.
    pub current_discount_percent: u64,
    /// Spend left until the next point, in `(0, points_per_amount]`.
    pub amount_to_next_point: u64,
    /// Points left until the next bonus.
    pub points_to_next_bonus: u64,
}

/// Computes tier data from a cumulative spend.
///
/// At an exact multiple of `points_per_amount` the amount to the next point
/// is the full `points_per_amount`, never zero.
#[must_use]
pub fn compute_tier(total_spent: u64, rules: &BusinessRules) -> FidelityTier {
    let per_point: u64 = rules.points_per_amount();
    let threshold: u64 = rules.bonus_threshold();

    let points: u64 = total_spent / per_point;
    let bonus_count: u64 = total_spent / threshold;
    let current_discount_percent: u64 =
        bonus_count.saturating_mul(u64::from(rules.bonus_discount_percent()));
    let amount_to_next_point: u64 = per_point - (total_spent % per_point);
    let amount_to_next_bonus: u64 = threshold - (total_spent % threshold);
    let points_to_next_bonus: u64 = amount_to_next_bonus.div_ceil(per_point);

    FidelityTier {
        points,
        current_discount_percent,
        amount_to_next_point,
        points_to_next_bonus,
    }
}

/// Validates an amount submitted for a fidelity operation.
///
/// # Errors
///
/// Returns `DomainError::NonPositiveAmount` if `amount <= 0`.
pub fn validate_fidelity_amount(amount: i64) -> Result<u64, DomainError> {
    if amount <= 0 {
        return Err(DomainError::NonPositiveAmount { amount });
    }
    u64::try_from(amount).map_err(|_| DomainError::NonPositiveAmount { amount })
}

/// A client's cumulative spend.
///
/// The total only ever grows through [`FidelityAccount::record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FidelityAccount {
    client_id: String,
    total_spent: u64,
}

impl FidelityAccount {
    /// Opens an empty account.
    #[must_use]
    pub fn open(client_id: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            total_spent: 0,
        }
    }

    /// Returns the client identity.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the cumulative spend.
    #[must_use]
    pub const fn total_spent(&self) -> u64 {
        self.total_spent
    }

    /// Returns the account after recording a positive amount.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NonPositiveAmount` if `amount <= 0`, or
    /// `DomainError::ArithmeticOverflow` if the total would overflow.
    pub fn record(&self, amount: i64) -> Result<Self, DomainError> {
        let amount: u64 = validate_fidelity_amount(amount)?;
        let total_spent: u64 =
            self.total_spent
                .checked_add(amount)
                .ok_or(DomainError::ArithmeticOverflow {
                    operation: "adding to cumulative spend",
                })?;

        Ok(Self {
            client_id: self.client_id.clone(),
            total_spent,
        })
    }

    /// Computes the current tier.
    #[must_use]
    pub fn tier(&self, rules: &BusinessRules) -> FidelityTier {
        compute_tier(self.total_spent, rules)
    }
}

/// One recorded fidelity operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FidelityOperation {
    /// The client credited.
    pub client_id: String,
    /// The staff member who recorded the operation.
    pub recorded_by: String,
    /// Amount added to the cumulative spend.
    pub amount: u64,
    /// When the operation was recorded.
    pub recorded_at: OffsetDateTime,
}
