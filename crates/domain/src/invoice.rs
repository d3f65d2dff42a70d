// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invoice records and invoice numbering.
//!
//! Invoice numbers follow `HM-YYYYMMDD-XXXX`: the creation date followed by
//! four random characters from `[0-9A-Z]`. The suffix space is small, so a
//! number is a human-facing reference, not a unique key. Allocation checks
//! against existing numbers and retries with a fresh suffix.

use crate::error::DomainError;
use crate::pricing::InvoiceAmounts;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Month, OffsetDateTime};

const PREFIX: &str = "HM";
const SUFFIX_LEN: usize = 4;
const SUFFIX_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHABET_LEN: u64 = 36;

/// Default number of suffixes tried before reporting a collision.
pub const DEFAULT_ALLOCATION_ATTEMPTS: u32 = 8;

/// A formatted invoice number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InvoiceNumber {
    value: String,
}

impl InvoiceNumber {
    /// Builds an invoice number from a date and an explicit suffix.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInvoiceNumber` if the suffix is not four
    /// characters from `[0-9A-Z]`.
    pub fn from_parts(date: Date, suffix: &str) -> Result<Self, DomainError> {
        let value: String = format!(
            "{PREFIX}-{:04}{:02}{:02}-{suffix}",
            date.year(),
            u8::from(date.month()),
            date.day()
        );
        if !is_valid_suffix(suffix) {
            return Err(DomainError::InvalidInvoiceNumber {
                value,
                reason: "suffix must be 4 characters from 0-9 and A-Z",
            });
        }
        Ok(Self { value })
    }

    /// Generates an invoice number with a random suffix.
    #[must_use]
    pub fn generate(date: Date) -> Self {
        let suffix: String = random_suffix();
        Self {
            value: format!(
                "{PREFIX}-{:04}{:02}{:02}-{suffix}",
                date.year(),
                u8::from(date.month()),
                date.day()
            ),
        }
    }

    /// Parses and validates an invoice number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInvoiceNumber` if the value does not
    /// follow `HM-YYYYMMDD-XXXX` or names an impossible date.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &'static str| DomainError::InvalidInvoiceNumber {
            value: value.to_string(),
            reason,
        };

        let mut parts = value.split('-');
        let (Some(prefix), Some(date_part), Some(suffix), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid("expected three dash-separated parts"));
        };

        if prefix != PREFIX {
            return Err(invalid("prefix must be HM"));
        }
        let date: Date = parse_compact_date(date_part).ok_or_else(|| invalid("invalid date"))?;
        Self::from_parts(date, suffix).map_err(|_| invalid("invalid suffix"))
    }

    /// Returns the creation date encoded in the number.
    #[must_use]
    pub fn date(&self) -> Option<Date> {
        self.value.get(3..11).and_then(parse_compact_date)
    }

    /// Returns the formatted value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for InvoiceNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for InvoiceNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<InvoiceNumber> for String {
    fn from(number: InvoiceNumber) -> Self {
        number.value
    }
}

fn is_valid_suffix(suffix: &str) -> bool {
    suffix.len() == SUFFIX_LEN && suffix.bytes().all(|b| SUFFIX_ALPHABET.contains(&b))
}

fn parse_compact_date(digits: &str) -> Option<Date> {
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = digits.get(0..4)?.parse().ok()?;
    let month: u8 = digits.get(4..6)?.parse().ok()?;
    let day: u8 = digits.get(6..8)?.parse().ok()?;
    Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
}

fn random_suffix() -> String {
    let mut seed: u64 = rand::random::<u64>();
    let mut suffix: String = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        let idx: usize = usize::try_from(seed % ALPHABET_LEN).unwrap_or_default();
        suffix.push(char::from(SUFFIX_ALPHABET[idx]));
        seed /= ALPHABET_LEN;
    }
    suffix
}

/// Allocates an invoice number not reported as taken.
///
/// # Errors
///
/// Returns `DomainError::InvoiceNumberCollision` if every attempt produced a
/// taken number. The error is retryable.
pub fn allocate_invoice_number(
    date: Date,
    max_attempts: u32,
    is_taken: impl FnMut(&InvoiceNumber) -> bool,
) -> Result<InvoiceNumber, DomainError> {
    allocate_invoice_number_with(date, max_attempts, random_suffix, is_taken)
}

/// Allocates an invoice number using a caller-supplied suffix source.
///
/// # Errors
///
/// Returns `DomainError::InvoiceNumberCollision` if every attempt produced a
/// taken number, or `DomainError::InvalidInvoiceNumber` if the source yields
/// a malformed suffix.
pub fn allocate_invoice_number_with(
    date: Date,
    max_attempts: u32,
    mut next_suffix: impl FnMut() -> String,
    mut is_taken: impl FnMut(&InvoiceNumber) -> bool,
) -> Result<InvoiceNumber, DomainError> {
    for _ in 0..max_attempts {
        let candidate: InvoiceNumber = InvoiceNumber::from_parts(date, &next_suffix())?;
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
    }
    Err(DomainError::InvoiceNumberCollision {
        attempts: max_attempts,
    })
}

/// A created invoice, as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Human-facing reference.
    pub invoice_number: InvoiceNumber,
    /// The worker who created the invoice.
    pub worker_id: String,
    /// Priced amounts.
    pub amounts: InvoiceAmounts,
    /// Name of the applied collaboration, if any.
    pub collaboration_name: Option<String>,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
    /// Set once the week containing this invoice has been settled.
    pub is_weekly_archived: bool,
}

impl InvoiceRecord {
    /// Returns the invoice's contribution to CA.
    #[must_use]
    pub const fn final_amount(&self) -> u64 {
        self.amounts.final_amount
    }

    /// Returns true if this invoice counts toward the week starting at `week_start`.
    #[must_use]
    pub fn is_in_current_week(&self, week_start: OffsetDateTime) -> bool {
        !self.is_weekly_archived && self.created_at >= week_start
    }
}
