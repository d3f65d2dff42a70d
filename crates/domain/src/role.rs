// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role hierarchy and role assignment rules.
//!
//! Every role maps to exactly one row of [`ROLE_TABLE`]: an integer level,
//! a display label and a commission percentage. All comparisons go through
//! the level column; the declaration order of [`Role`] carries no meaning.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Roles a member of the business can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Customer. Can submit a candidature and view their own fidelity card.
    Client,
    /// Newly hired mechanic.
    Recrue,
    /// Junior mechanic.
    MecanoNovice,
    /// Experienced mechanic.
    Experimente,
    /// Team lead.
    ChefEquipe,
    /// Owner.
    Patron,
    /// Application administrator.
    Superadmin,
}

/// One row of the role table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleProfile {
    /// The role this row describes.
    pub role: Role,
    /// Rank in the hierarchy; higher means more privileges.
    pub level: u8,
    /// Human-facing label.
    pub label: &'static str,
    /// Share of the weekly CA paid to a worker holding this role.
    pub commission_percentage: u8,
}

/// The role table, ordered by level.
pub const ROLE_TABLE: [RoleProfile; 7] = [
    RoleProfile {
        role: Role::Client,
        level: 0,
        label: "Client",
        commission_percentage: 0,
    },
    RoleProfile {
        role: Role::Recrue,
        level: 1,
        label: "Recrue",
        commission_percentage: 55,
    },
    RoleProfile {
        role: Role::MecanoNovice,
        level: 2,
        label: "Mécano Novice",
        commission_percentage: 65,
    },
    RoleProfile {
        role: Role::Experimente,
        level: 3,
        label: "Expérimenté",
        commission_percentage: 75,
    },
    RoleProfile {
        role: Role::ChefEquipe,
        level: 4,
        label: "Chef d'équipe",
        commission_percentage: 80,
    },
    RoleProfile {
        role: Role::Patron,
        level: 5,
        label: "Patron",
        commission_percentage: 85,
    },
    RoleProfile {
        role: Role::Superadmin,
        level: 6,
        label: "Super Admin",
        commission_percentage: 85,
    },
];

impl Role {
    /// All roles, lowest level first.
    pub const ALL: [Self; 7] = [
        Self::Client,
        Self::Recrue,
        Self::MecanoNovice,
        Self::Experimente,
        Self::ChefEquipe,
        Self::Patron,
        Self::Superadmin,
    ];

    /// Returns this role's row of the role table.
    #[must_use]
    pub const fn profile(self) -> &'static RoleProfile {
        match self {
            Self::Client => &ROLE_TABLE[0],
            Self::Recrue => &ROLE_TABLE[1],
            Self::MecanoNovice => &ROLE_TABLE[2],
            Self::Experimente => &ROLE_TABLE[3],
            Self::ChefEquipe => &ROLE_TABLE[4],
            Self::Patron => &ROLE_TABLE[5],
            Self::Superadmin => &ROLE_TABLE[6],
        }
    }

    /// Returns the hierarchy level.
    #[must_use]
    pub const fn level(self) -> u8 {
        self.profile().level
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.profile().label
    }

    /// Returns the commission percentage paid on weekly CA.
    #[must_use]
    pub const fn commission_percentage(self) -> u8 {
        self.profile().commission_percentage
    }

    /// Returns the string representation used for persistence and serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Recrue => "recrue",
            Self::MecanoNovice => "mecano_novice",
            Self::Experimente => "experimente",
            Self::ChefEquipe => "chef_equipe",
            Self::Patron => "patron",
            Self::Superadmin => "superadmin",
        }
    }

    /// Returns true if this role ranks at or above `min`.
    #[must_use]
    pub const fn has_minimum_role(self, min: Self) -> bool {
        self.level() >= min.level()
    }

    /// Returns true if this role is one of `allowed`.
    #[must_use]
    pub fn is_one_of(self, allowed: &[Self]) -> bool {
        allowed.contains(&self)
    }

    /// Any role above client.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        self.has_minimum_role(Self::Recrue)
    }

    /// Team lead and above.
    #[must_use]
    pub const fn is_management(self) -> bool {
        self.has_minimum_role(Self::ChefEquipe)
    }

    /// Owner and above.
    #[must_use]
    pub const fn is_patron_tier(self) -> bool {
        self.has_minimum_role(Self::Patron)
    }

    /// The single top level.
    #[must_use]
    pub const fn is_superadmin(self) -> bool {
        self.level() == Self::Superadmin.level()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| DomainError::UnknownRole(s.to_string()))
    }
}

/// A person known to the back office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Stable identity supplied by the identity provider.
    pub id: String,
    /// Name shown in listings.
    pub display_name: String,
    /// Current role.
    pub role: Role,
}

impl Member {
    /// Creates a new `Member`.
    #[must_use]
    pub fn new(id: &str, display_name: &str, role: Role) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            role,
        }
    }
}

/// Returns the roles an actor may hand out: every role strictly below their own.
#[must_use]
pub fn assignable_roles(actor: Role) -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|role| role.level() < actor.level())
        .collect()
}

/// Validates a role change against the hierarchy.
///
/// The self-change rule is checked first and independently of levels.
/// The target must rank strictly below the actor, and so must the new role.
///
/// # Errors
///
/// Returns `DomainError::SelfRoleChange` if actor and target are the same
/// identity, or `DomainError::RoleHierarchy` if either role is not strictly
/// below the actor.
pub fn validate_role_change(
    actor_id: &str,
    actor_role: Role,
    target_id: &str,
    target_role: Role,
    new_role: Role,
) -> Result<(), DomainError> {
    if actor_id == target_id {
        return Err(DomainError::SelfRoleChange {
            actor_id: actor_id.to_string(),
        });
    }

    if target_role.level() >= actor_role.level() {
        return Err(DomainError::RoleHierarchy {
            actor: actor_role,
            target: target_role,
            requested: new_role,
            reason: "target must rank strictly below the actor",
        });
    }

    if new_role.level() >= actor_role.level() {
        return Err(DomainError::RoleHierarchy {
            actor: actor_role,
            target: target_role,
            requested: new_role,
            reason: "assigned role must rank strictly below the actor",
        });
    }

    Ok(())
}
