// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor resolution and authorization checks.

use hm_ledger_audit::Actor;
use hm_ledger_domain::{DomainError, Member, PermissionAction, Role, authorize};
use tracing::{debug, warn};

use crate::error::AuthError;

/// A member whose identity has been resolved against the ledger.
///
/// The role is the one held at resolution time. Identity verification
/// itself happens upstream of this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this actor into the audit representation.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role)
    }

    /// Returns true if this actor is `member_id`.
    #[must_use]
    pub fn is(&self, member_id: &str) -> bool {
        self.id == member_id
    }
}

/// Resolves an identity to an actor using the current member list.
///
/// # Errors
///
/// Returns `AuthError::UnknownActor` if no member has this identity.
pub fn authenticate(members: &[Member], actor_id: &str) -> Result<AuthenticatedActor, AuthError> {
    members
        .iter()
        .find(|m| m.id == actor_id)
        .map(|m| AuthenticatedActor::new(m.id.clone(), m.role))
        .ok_or_else(|| {
            warn!(actor_id, "unknown actor");
            AuthError::UnknownActor {
                actor_id: actor_id.to_string(),
            }
        })
}

/// Authorization service for enforcing role-based access control.
///
/// Every check defers to the permission table in the domain crate; this
/// service only adds logging and the API error shape.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may perform an action.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The action being attempted
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` naming the action and the rule the
    /// actor's role did not satisfy.
    pub fn authorize(actor: &AuthenticatedActor, action: PermissionAction) -> Result<(), AuthError> {
        match authorize(action, actor.role) {
            Ok(()) => {
                debug!(actor_id = %actor.id, role = %actor.role, %action, "authorized");
                Ok(())
            }
            Err(DomainError::PermissionDenied {
                action,
                requirement,
            }) => {
                warn!(actor_id = %actor.id, role = %actor.role, %action, "permission denied");
                Err(AuthError::Unauthorized {
                    action: action.to_string(),
                    required_role: requirement.to_string(),
                })
            }
            Err(other) => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: other.to_string(),
            }),
        }
    }

    /// Checks if an actor may read data owned by `owner_id`.
    ///
    /// Owners pass with `own_action`; everyone else needs `all_action`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the applicable check fails.
    pub fn authorize_owned(
        actor: &AuthenticatedActor,
        owner_id: &str,
        own_action: PermissionAction,
        all_action: PermissionAction,
    ) -> Result<(), AuthError> {
        if actor.is(owner_id) {
            Self::authorize(actor, own_action)
        } else {
            Self::authorize(actor, all_action)
        }
    }
}
