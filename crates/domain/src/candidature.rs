// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recruitment candidatures and their status lifecycle.
//!
//! Status changes are reviewer-initiated only. Which changes a reviewer may
//! make depends on the current status and the reviewer's tier, and is read
//! from one explicit table ([`allowed_targets`]). `accepte` and `refuse` are
//! terminal.
//!
//! A candidature's status and its history only change together, through
//! [`Candidature::transition`].

use crate::error::DomainError;
use crate::permissions::{PermissionAction, Requirement, authorize};
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

const MAX_NOTE_CHARS: usize = 2000;

/// Review status of a candidature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidatureStatus {
    /// Submitted, awaiting a first review.
    EnAttente,
    /// Selected for a practical test.
    ATester,
    /// Hired.
    Accepte,
    /// Rejected.
    Refuse,
}

impl CandidatureStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 4] = [Self::EnAttente, Self::ATester, Self::Accepte, Self::Refuse];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EnAttente => "en_attente",
            Self::ATester => "a_tester",
            Self::Accepte => "accepte",
            Self::Refuse => "refuse",
        }
    }

    /// Returns true if no transition leaves this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepte | Self::Refuse)
    }

    /// Returns true while the candidature is still under review.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.is_terminal()
    }
}

impl std::fmt::Display for CandidatureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CandidatureStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en_attente" => Ok(Self::EnAttente),
            "a_tester" => Ok(Self::ATester),
            "accepte" => Ok(Self::Accepte),
            "refuse" => Ok(Self::Refuse),
            _ => Err(DomainError::UnknownStatus(s.to_string())),
        }
    }
}

/// How much of the status table a reviewer may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewerTier {
    /// Patron and above.
    Top,
    /// Team leads.
    Mid,
    /// Everyone else.
    Unprivileged,
}

impl ReviewerTier {
    /// Returns the tier of a role.
    #[must_use]
    pub const fn of(role: Role) -> Self {
        if role.is_patron_tier() {
            Self::Top
        } else if role.is_management() {
            Self::Mid
        } else {
            Self::Unprivileged
        }
    }
}

/// Returns the statuses a reviewer of `tier` may move a candidature to from `from`.
#[must_use]
pub const fn allowed_targets(
    from: CandidatureStatus,
    tier: ReviewerTier,
) -> &'static [CandidatureStatus] {
    use CandidatureStatus::{ATester, Accepte, EnAttente, Refuse};

    match (from, tier) {
        (EnAttente, ReviewerTier::Top) => &[ATester, Accepte, Refuse],
        (EnAttente, ReviewerTier::Mid) => &[ATester, Refuse],
        (ATester, ReviewerTier::Top) => &[Accepte, Refuse],
        (ATester, ReviewerTier::Mid)
        | (_, ReviewerTier::Unprivileged)
        | (Accepte | Refuse, _) => &[],
    }
}

/// Returns true if any tier may move a candidature from `from` to `to`.
fn is_defined_edge(from: CandidatureStatus, to: CandidatureStatus) -> bool {
    allowed_targets(from, ReviewerTier::Top).contains(&to)
}

/// Validates a status change requested by a reviewer holding `role`.
///
/// Checks run in this order:
/// 1. a role with no reviewing rights is denied outright
/// 2. changes out of a terminal status, or along no edge of the table, are invalid
/// 3. defined changes the reviewer's tier may not make are denied
///
/// # Errors
///
/// Returns `DomainError::PermissionDenied` or `DomainError::InvalidTransition`.
pub fn validate_transition(
    from: CandidatureStatus,
    to: CandidatureStatus,
    role: Role,
) -> Result<(), DomainError> {
    let tier: ReviewerTier = ReviewerTier::of(role);
    if tier == ReviewerTier::Unprivileged {
        return Err(DomainError::PermissionDenied {
            action: PermissionAction::ChangeCandidatureStatus,
            requirement: Requirement::AtLeast(Role::ChefEquipe),
        });
    }

    if from.is_terminal() {
        return Err(DomainError::InvalidTransition {
            from,
            to,
            reason: "cannot transition from terminal state",
        });
    }
    if !is_defined_edge(from, to) {
        return Err(DomainError::InvalidTransition {
            from,
            to,
            reason: "transition not permitted by status lifecycle rules",
        });
    }

    if !allowed_targets(from, tier).contains(&to) {
        let minimum: Role = if allowed_targets(from, ReviewerTier::Mid).contains(&to) {
            Role::ChefEquipe
        } else {
            Role::Patron
        };
        return Err(DomainError::PermissionDenied {
            action: PermissionAction::ChangeCandidatureStatus,
            requirement: Requirement::AtLeast(minimum),
        });
    }

    Ok(())
}

/// One recorded status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub old_status: CandidatureStatus,
    pub new_status: CandidatureStatus,
    pub actor_id: String,
    pub at: OffsetDateTime,
}

/// A reviewer's note on a candidature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatureNote {
    pub author_id: String,
    pub content: String,
    pub at: OffsetDateTime,
}

/// Answers submitted with a candidature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatureForm {
    /// In-game name.
    pub pseudo: String,
    pub age: u8,
    pub availabilities: String,
    pub roleplay_experience: String,
    pub mechanic_experience: String,
    pub motivations: String,
    pub roleplay_vision: String,
    pub conflict_handling: String,
    /// The candidate accepted the house rules.
    pub accepts_rules: bool,
}

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), DomainError> {
    let chars: usize = value.chars().count();
    if chars < min || chars > max {
        return Err(DomainError::InvalidField {
            field,
            reason: format!("must contain between {min} and {max} characters, got {chars}"),
        });
    }
    Ok(())
}

impl CandidatureForm {
    /// Validates every answer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidField` naming the first field that fails.
    pub fn validate(&self) -> Result<(), DomainError> {
        check_length("pseudo", &self.pseudo, 2, 50)?;
        if !(16..=99).contains(&self.age) {
            return Err(DomainError::InvalidField {
                field: "age",
                reason: format!("must be between 16 and 99, got {}", self.age),
            });
        }
        check_length("availabilities", &self.availabilities, 10, 1000)?;
        check_length("roleplay_experience", &self.roleplay_experience, 20, 2000)?;
        check_length("mechanic_experience", &self.mechanic_experience, 20, 2000)?;
        check_length("motivations", &self.motivations, 20, 2000)?;
        check_length("roleplay_vision", &self.roleplay_vision, 20, 2000)?;
        check_length("conflict_handling", &self.conflict_handling, 20, 2000)?;
        if !self.accepts_rules {
            return Err(DomainError::InvalidField {
                field: "accepts_rules",
                reason: String::from("the rules must be accepted"),
            });
        }
        Ok(())
    }
}

/// Rejects a new submission while the candidate has one under review.
///
/// # Errors
///
/// Returns `DomainError::DuplicatePendingCandidature` if any of `existing`
/// is still pending.
pub fn ensure_no_pending_candidature<'a>(
    candidate_id: &str,
    existing: impl IntoIterator<Item = &'a Candidature>,
) -> Result<(), DomainError> {
    match existing
        .into_iter()
        .find(|c| c.candidate_id == candidate_id && c.status.is_pending())
    {
        Some(pending) => Err(DomainError::DuplicatePendingCandidature {
            candidate_id: candidate_id.to_string(),
            existing: pending.status,
        }),
        None => Ok(()),
    }
}

/// A candidature and its review trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidature {
    pub id: u64,
    pub candidate_id: String,
    pub form: CandidatureForm,
    status: CandidatureStatus,
    pub submitted_at: OffsetDateTime,
    history: Vec<StatusHistoryEntry>,
    notes: Vec<CandidatureNote>,
}

impl Candidature {
    /// Submits a new candidature in `en_attente`.
    ///
    /// Only clients may apply. The uniqueness of pending applications is
    /// checked separately with [`ensure_no_pending_candidature`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PermissionDenied` if `candidate_role` is not
    /// client, or `DomainError::InvalidField` if the form is invalid.
    pub fn submit(
        id: u64,
        candidate_id: &str,
        candidate_role: Role,
        form: CandidatureForm,
        submitted_at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        authorize(PermissionAction::SubmitCandidature, candidate_role)?;
        form.validate()?;

        Ok(Self {
            id,
            candidate_id: candidate_id.to_string(),
            form,
            status: CandidatureStatus::EnAttente,
            submitted_at,
            history: Vec::new(),
            notes: Vec::new(),
        })
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> CandidatureStatus {
        self.status
    }

    /// Returns the status history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[StatusHistoryEntry] {
        &self.history
    }

    /// Returns the notes, oldest first.
    #[must_use]
    pub fn notes(&self) -> &[CandidatureNote] {
        &self.notes
    }

    /// Returns the candidature after a status change, along with the history
    /// entry recording it.
    ///
    /// # Errors
    ///
    /// Returns an error if [`validate_transition`] rejects the change.
    pub fn transition(
        &self,
        new_status: CandidatureStatus,
        actor_id: &str,
        actor_role: Role,
        at: OffsetDateTime,
    ) -> Result<(Self, StatusHistoryEntry), DomainError> {
        validate_transition(self.status, new_status, actor_role)?;

        let entry: StatusHistoryEntry = StatusHistoryEntry {
            old_status: self.status,
            new_status,
            actor_id: actor_id.to_string(),
            at,
        };
        let mut next: Self = self.clone();
        next.status = new_status;
        next.history.push(entry.clone());
        Ok((next, entry))
    }

    /// Returns the candidature with a note appended.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PermissionDenied` if `author_role` may not add
    /// notes, or `DomainError::InvalidField` if the content is empty or longer
    /// than 2000 characters.
    pub fn with_note(
        &self,
        author_id: &str,
        author_role: Role,
        content: &str,
        at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        authorize(PermissionAction::AddCandidatureNote, author_role)?;
        check_length("note", content, 1, MAX_NOTE_CHARS)?;

        let mut next: Self = self.clone();
        next.notes.push(CandidatureNote {
            author_id: author_id.to_string(),
            content: content.to_string(),
            at,
        });
        Ok(next)
    }
}
