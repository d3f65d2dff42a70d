// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what actions an actor is permitted to perform
//! without leaking domain internals. They are advisory only and do not
//! replace backend authorization checks.

use hm_ledger_domain::{PermissionAction, Role, assignable_roles, can_perform};
use serde::{Deserialize, Serialize};

use crate::auth::AuthenticatedActor;

/// Whether an action is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let b: bool = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(b))
    }
}

/// One action and whether the actor may perform it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCapability {
    /// The action.
    pub action: PermissionAction,
    /// Whether it is permitted.
    pub capability: Capability,
}

/// Everything a role may do, for menu and screen gating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCapabilities {
    /// The role evaluated.
    pub role: Role,
    /// One entry per known action, in declaration order.
    pub actions: Vec<ActionCapability>,
    /// Roles this role may assign to others. Empty without `ManageUserRoles`.
    pub assignable_roles: Vec<Role>,
}

impl RoleCapabilities {
    /// Returns the capability for one action.
    #[must_use]
    pub fn get(&self, action: PermissionAction) -> Capability {
        self.actions
            .iter()
            .find(|a| a.action == action)
            .map_or(Capability::Denied, |a| a.capability)
    }
}

/// Computes the capabilities of a role.
///
/// # Arguments
///
/// * `role` - The role to evaluate
///
/// # Returns
///
/// A `RoleCapabilities` with one flag per action.
#[must_use]
pub fn compute_role_capabilities(role: Role) -> RoleCapabilities {
    let actions: Vec<ActionCapability> = PermissionAction::ALL
        .iter()
        .map(|&action| ActionCapability {
            action,
            capability: Capability::from_bool(can_perform(action, role)),
        })
        .collect();

    let assignable_roles: Vec<Role> = if can_perform(PermissionAction::ManageUserRoles, role) {
        assignable_roles(role)
    } else {
        Vec::new()
    };

    RoleCapabilities {
        role,
        actions,
        assignable_roles,
    }
}

/// Computes the capabilities of an authenticated actor.
#[must_use]
pub fn compute_capabilities(actor: &AuthenticatedActor) -> RoleCapabilities {
    compute_role_capabilities(actor.role)
}
