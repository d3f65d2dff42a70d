// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Deployment-level business constants.
//!
//! Calculators never read literals for these values; they receive a
//! validated [`BusinessRules`] instead.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Default spend per fidelity point.
pub const DEFAULT_POINTS_PER_AMOUNT: u64 = 500_000;
/// Default cumulative spend per fidelity bonus.
pub const DEFAULT_BONUS_THRESHOLD: u64 = 10_000_000;
/// Default discount earned per fidelity bonus.
pub const DEFAULT_BONUS_DISCOUNT_PERCENT: u32 = 20;
/// Default tax rate on weekly CA.
pub const DEFAULT_TAX_RATE_PERCENT: u8 = 6;
/// Default weekly CA objective per worker.
pub const DEFAULT_WEEKLY_OBJECTIVE: u64 = 50_000_000;

/// Raw, unvalidated form of [`BusinessRules`] as it appears in configuration files.
///
/// Missing keys fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessRulesConfig {
    pub points_per_amount: u64,
    pub bonus_threshold: u64,
    pub bonus_discount_percent: u32,
    pub tax_rate_percent: u8,
    pub weekly_objective: u64,
}

impl Default for BusinessRulesConfig {
    fn default() -> Self {
        Self {
            points_per_amount: DEFAULT_POINTS_PER_AMOUNT,
            bonus_threshold: DEFAULT_BONUS_THRESHOLD,
            bonus_discount_percent: DEFAULT_BONUS_DISCOUNT_PERCENT,
            tax_rate_percent: DEFAULT_TAX_RATE_PERCENT,
            weekly_objective: DEFAULT_WEEKLY_OBJECTIVE,
        }
    }
}

/// Validated business constants.
///
/// Every divisor is non-zero and the tax rate is at most 100 %.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BusinessRulesConfig", into = "BusinessRulesConfig")]
pub struct BusinessRules {
    points_per_amount: u64,
    bonus_threshold: u64,
    bonus_discount_percent: u32,
    tax_rate_percent: u8,
    weekly_objective: u64,
}

impl BusinessRules {
    /// Validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBusinessRules` if a divisor is zero or
    /// the tax rate exceeds 100.
    pub fn new(config: BusinessRulesConfig) -> Result<Self, DomainError> {
        if config.points_per_amount == 0 {
            return Err(DomainError::InvalidBusinessRules {
                reason: "points_per_amount must be greater than 0",
            });
        }
        if config.bonus_threshold == 0 {
            return Err(DomainError::InvalidBusinessRules {
                reason: "bonus_threshold must be greater than 0",
            });
        }
        if config.weekly_objective == 0 {
            return Err(DomainError::InvalidBusinessRules {
                reason: "weekly_objective must be greater than 0",
            });
        }
        if config.tax_rate_percent > 100 {
            return Err(DomainError::InvalidBusinessRules {
                reason: "tax_rate_percent must be at most 100",
            });
        }

        Ok(Self {
            points_per_amount: config.points_per_amount,
            bonus_threshold: config.bonus_threshold,
            bonus_discount_percent: config.bonus_discount_percent,
            tax_rate_percent: config.tax_rate_percent,
            weekly_objective: config.weekly_objective,
        })
    }

    /// Spend required for one fidelity point.
    #[must_use]
    pub const fn points_per_amount(&self) -> u64 {
        self.points_per_amount
    }

    /// Cumulative spend required for each fidelity bonus.
    #[must_use]
    pub const fn bonus_threshold(&self) -> u64 {
        self.bonus_threshold
    }

    /// Discount percentage earned per bonus.
    #[must_use]
    pub const fn bonus_discount_percent(&self) -> u32 {
        self.bonus_discount_percent
    }

    /// Tax rate applied to total weekly CA.
    #[must_use]
    pub const fn tax_rate_percent(&self) -> u8 {
        self.tax_rate_percent
    }

    /// Weekly CA objective per worker.
    #[must_use]
    pub const fn weekly_objective(&self) -> u64 {
        self.weekly_objective
    }
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            points_per_amount: DEFAULT_POINTS_PER_AMOUNT,
            bonus_threshold: DEFAULT_BONUS_THRESHOLD,
            bonus_discount_percent: DEFAULT_BONUS_DISCOUNT_PERCENT,
            tax_rate_percent: DEFAULT_TAX_RATE_PERCENT,
            weekly_objective: DEFAULT_WEEKLY_OBJECTIVE,
        }
    }
}

impl TryFrom<BusinessRulesConfig> for BusinessRules {
    type Error = DomainError;

    fn try_from(config: BusinessRulesConfig) -> Result<Self, Self::Error> {
        Self::new(config)
    }
}

impl From<BusinessRules> for BusinessRulesConfig {
    fn from(rules: BusinessRules) -> Self {
        Self {
            points_per_amount: rules.points_per_amount,
            bonus_threshold: rules.bonus_threshold,
            bonus_discount_percent: rules.bonus_discount_percent,
            tax_rate_percent: rules.tax_rate_percent,
            weekly_objective: rules.weekly_objective,
        }
    }
}
