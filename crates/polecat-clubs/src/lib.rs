//! # polecat-clubs
//!
//! The club core: who may do what to which membership, application or match.
//!
//! Every operation takes the acting user explicitly, re-reads that user's role inside
//! its own transaction and either commits the whole transition or nothing. Refusals are
//! returned as [`PolecatError`] values for the boundary to turn into messages.
//!
//! - [`registry`]: accounts and clubs
//! - [`membership`]: promote, demote, remove, transfer ownership, leave
//! - [`applications`]: join requests
//! - [`matches`]: scheduling and results

pub mod applications;
pub mod matches;
pub mod membership;
pub mod password;
pub mod registry;

mod guard;

use polecat_common::error::PolecatError;
use polecat_db::constraint::{self, Violation};

/// Translate a failed write into the error taxonomy. Constraint violations become the
/// message a pre-check would have produced; anything else stays a database error.
pub(crate) fn storage_error(err: sqlx::Error) -> PolecatError {
    match constraint::classify(&err) {
        Some(violation) => violation_error(violation),
        None => PolecatError::Database(err),
    }
}

fn violation_error(violation: Violation) -> PolecatError {
    match violation {
        Violation::EmailTaken => PolecatError::field("email", "A user with that email already exists."),
        Violation::UsernameTaken => {
            PolecatError::field("username", "A user with that username already exists.")
        }
        Violation::ClubNameTaken => PolecatError::field("name", "This club name is taken!"),
        Violation::DuplicateMembership => PolecatError::AlreadyExists {
            resource: "Membership".into(),
        },
        Violation::SecondOwner => PolecatError::conflict("This club already has an owner."),
        Violation::ActiveApplicationExists => {
            PolecatError::conflict("Application for this club has already been submitted")
        }
        Violation::DuplicateMatchSlot | Violation::SchedulingConflict => PolecatError::field(
            "date_time",
            "One or both players have a scheduled match at this date/time!",
        ),
        Violation::PlayersNotMembers => {
            PolecatError::field("player_1", "Both players must be members of this club!")
        }
        Violation::SamePlayers => PolecatError::field("player_2", "Both players cannot be the same!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_constraint_errors_stay_database_errors() {
        assert!(matches!(
            storage_error(sqlx::Error::RowNotFound),
            PolecatError::Database(_)
        ));
    }

    #[test]
    fn scheduling_violations_share_the_conflict_message() {
        let slot = violation_error(Violation::DuplicateMatchSlot).to_string();
        let conflict = violation_error(Violation::SchedulingConflict).to_string();
        assert_eq!(slot, conflict);
    }

    #[test]
    fn unique_user_fields_are_field_errors() {
        match violation_error(Violation::UsernameTaken) {
            PolecatError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("username")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
