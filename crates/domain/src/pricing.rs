// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invoice pricing.
//!
//! All amounts are integer currency units. Line totals and the base amount
//! are exact; the only rounding step is the discount, which rounds half
//! away from zero.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Minimum length of a collaboration name, in characters.
const MIN_COLLABORATION_NAME_CHARS: usize = 2;

/// One billed service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLine {
    /// Name of the service, copied onto the invoice.
    pub service_name: String,
    /// Price of one unit.
    pub unit_price: u64,
    /// Number of units; at least 1.
    pub quantity: u32,
}

impl ServiceLine {
    /// Creates a new `ServiceLine`.
    #[must_use]
    pub fn new(service_name: &str, unit_price: u64, quantity: u32) -> Self {
        Self {
            service_name: service_name.to_string(),
            unit_price,
            quantity,
        }
    }

    /// Returns `unit_price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuantity` if the quantity is zero, or
    /// `DomainError::ArithmeticOverflow` if the product overflows.
    pub fn total(&self) -> Result<u64, DomainError> {
        if self.quantity == 0 {
            return Err(DomainError::InvalidQuantity {
                service: self.service_name.clone(),
                quantity: self.quantity,
            });
        }
        self.unit_price
            .checked_mul(u64::from(self.quantity))
            .ok_or(DomainError::ArithmeticOverflow {
                operation: "computing a service line total",
            })
    }
}

/// A partner agreement granting a discount on invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaboration {
    name: String,
    discount_percent: u8,
    is_active: bool,
}

impl Collaboration {
    /// Creates a validated collaboration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidField` if the name is shorter than two
    /// characters, or `DomainError::InvalidDiscountPercent` if the percentage
    /// exceeds 100.
    pub fn new(name: &str, discount_percent: u8, is_active: bool) -> Result<Self, DomainError> {
        if name.trim().chars().count() < MIN_COLLABORATION_NAME_CHARS {
            return Err(DomainError::InvalidField {
                field: "collaboration name",
                reason: format!("must contain at least {MIN_COLLABORATION_NAME_CHARS} characters"),
            });
        }
        validate_discount_percent(discount_percent)?;

        Ok(Self {
            name: name.trim().to_string(),
            discount_percent,
            is_active,
        })
    }

    /// Returns the collaboration name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the configured discount.
    #[must_use]
    pub const fn discount_percent(&self) -> u8 {
        self.discount_percent
    }

    /// Returns whether the collaboration currently applies.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the discount to apply on a new invoice: zero when inactive.
    #[must_use]
    pub const fn applicable_discount(&self) -> u8 {
        if self.is_active {
            self.discount_percent
        } else {
            0
        }
    }
}

/// Amounts derived from an invoice's lines and discount.
///
/// `final_amount + discount_amount == base_amount` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceAmounts {
    pub base_amount: u64,
    pub discount_percent: u8,
    pub discount_amount: u64,
    pub final_amount: u64,
}

/// Validates that a discount percentage lies in `0..=100`.
///
/// # Errors
///
/// Returns `DomainError::InvalidDiscountPercent` otherwise.
pub fn validate_discount_percent(percent: u8) -> Result<(), DomainError> {
    if percent > 100 {
        return Err(DomainError::InvalidDiscountPercent { percent });
    }
    Ok(())
}

/// Returns `round(amount × percent / 100)`, rounding half away from zero.
fn rounded_percentage(amount: u64, percent: u8) -> Result<u64, DomainError> {
    let scaled: u128 = u128::from(amount) * u128::from(percent) + 50;
    u64::try_from(scaled / 100).map_err(|_| DomainError::ArithmeticOverflow {
        operation: "rounding a discount",
    })
}

/// Prices an invoice.
///
/// # Errors
///
/// Returns an error if:
/// - `lines` is empty
/// - a line has a zero quantity
/// - `discount_percent` exceeds 100
/// - the base amount overflows
pub fn price_invoice(
    lines: &[ServiceLine],
    discount_percent: u8,
) -> Result<InvoiceAmounts, DomainError> {
    if lines.is_empty() {
        return Err(DomainError::EmptyInvoice);
    }
    validate_discount_percent(discount_percent)?;

    let mut base_amount: u64 = 0;
    for line in lines {
        base_amount =
            base_amount
                .checked_add(line.total()?)
                .ok_or(DomainError::ArithmeticOverflow {
                    operation: "summing service lines",
                })?;
    }

    let discount_amount: u64 = rounded_percentage(base_amount, discount_percent)?;
    // discount_percent <= 100 keeps the discount at or below the base amount
    let final_amount: u64 = base_amount - discount_amount;

    Ok(InvoiceAmounts {
        base_amount,
        discount_percent,
        discount_amount,
        final_amount,
    })
}

/// Prices an invoice with an optional collaboration.
///
/// An inactive collaboration contributes no discount.
///
/// # Errors
///
/// Same as [`price_invoice`].
pub fn price_invoice_with_collaboration(
    lines: &[ServiceLine],
    collaboration: Option<&Collaboration>,
) -> Result<InvoiceAmounts, DomainError> {
    let discount_percent: u8 = collaboration.map_or(0, Collaboration::applicable_discount);
    price_invoice(lines, discount_percent)
}
