// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod capabilities;
mod error;
mod ledger;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, authenticate};
pub use capabilities::{
    ActionCapability, Capability, RoleCapabilities, compute_capabilities,
    compute_role_capabilities,
};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use ledger::{CommandReceipt, FidelityCard, Ledger};
