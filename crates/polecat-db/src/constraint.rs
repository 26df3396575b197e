//! Classification of storage-level constraint violations.
//!
//! SQLite reports unique, check and trigger failures as plain database errors. The
//! workflow layer needs to tell them apart to answer with the right message, so the
//! table/column text SQLite puts in the error is mapped to a [`Violation`] here.

/// A schema rule that rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    EmailTaken,
    UsernameTaken,
    ClubNameTaken,
    /// `memberships (user_id, club_id)`
    DuplicateMembership,
    /// A second owner row for the same club.
    SecondOwner,
    /// A second pending or accepted application for the same (user, club).
    ActiveApplicationExists,
    /// Identical pending `(player_1, player_2, club, location, date_time)`.
    DuplicateMatchSlot,
    /// A player already has a match at that `date_time`.
    SchedulingConflict,
    /// A player is not a member of the match's club.
    PlayersNotMembers,
    SamePlayers,
}

/// Map a sqlx error to the rule it violated, if it was a constraint violation at all.
pub fn classify(err: &sqlx::Error) -> Option<Violation> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    classify_message(db_err.message())
}

fn classify_message(message: &str) -> Option<Violation> {
    // Trigger aborts carry the literal text given to RAISE().
    if message.contains("match_scheduling_conflict") {
        return Some(Violation::SchedulingConflict);
    }
    if message.contains("match_players_not_members") {
        return Some(Violation::PlayersNotMembers);
    }
    if message.contains("matches_distinct_players") {
        return Some(Violation::SamePlayers);
    }

    let columns = message.strip_prefix("UNIQUE constraint failed: ")?;
    let violation = match columns {
        "users.email" => Violation::EmailTaken,
        "users.username" => Violation::UsernameTaken,
        "clubs.name" => Violation::ClubNameTaken,
        "memberships.user_id, memberships.club_id" => Violation::DuplicateMembership,
        "memberships.club_id" => Violation::SecondOwner,
        "applications.user_id, applications.club_id" => Violation::ActiveApplicationExists,
        c if c.starts_with("matches.") => Violation::DuplicateMatchSlot,
        _ => return None,
    };
    Some(violation)
}
