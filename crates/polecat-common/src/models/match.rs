//! Match model — a scheduled game between two members of the same club.
//!
//! Lifecycle: `Pending` → `Player1Win` | `Player2Win` | `Draw` | `Cancelled`, all terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Match {
    pub id: Uuid,
    pub player_1_id: Uuid,
    pub player_2_id: Uuid,
    pub club_id: Uuid,

    /// Board or venue (up to 100 chars)
    pub location: String,

    /// Scheduled start
    pub date_time: DateTime<Utc>,

    pub status: MatchStatus,

    pub created_at: DateTime<Utc>,
}

impl Match {
    pub fn is_pending(&self) -> bool {
        self.status == MatchStatus::Pending
    }

    /// Pending and the scheduled time has been reached.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_pending() && self.date_time <= now
    }

    /// The status that results from `user_id` forfeiting: the opponent wins.
    /// `None` when the user is not playing in this match.
    pub fn forfeited_by(&self, user_id: Uuid) -> Option<MatchStatus> {
        if self.player_1_id == user_id {
            Some(MatchStatus::Player2Win)
        } else if self.player_2_id == user_id {
            Some(MatchStatus::Player1Win)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    #[sqlx(rename = "player1_win")]
    #[serde(rename = "player1_win")]
    Player1Win,
    #[sqlx(rename = "player2_win")]
    #[serde(rename = "player2_win")]
    Player2Win,
    Draw,
    Cancelled,
}

impl MatchStatus {
    pub fn is_terminal(self) -> bool {
        self != Self::Pending
    }

    /// Which player slot won, if the match was decided.
    pub fn winner_slot(self) -> Option<u8> {
        match self {
            Self::Player1Win => Some(1),
            Self::Player2Win => Some(2),
            _ => None,
        }
    }
}

/// The results an officer may record. `Cancelled` has its own operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    #[serde(rename = "player1_win")]
    Player1Win,
    #[serde(rename = "player2_win")]
    Player2Win,
    Draw,
}

impl From<MatchOutcome> for MatchStatus {
    fn from(outcome: MatchOutcome) -> Self {
        match outcome {
            MatchOutcome::Player1Win => Self::Player1Win,
            MatchOutcome::Player2Win => Self::Player2Win,
            MatchOutcome::Draw => Self::Draw,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScheduleMatchRequest {
    pub player_1: Uuid,
    pub player_2: Uuid,

    #[validate(length(min = 1, max = 100, message = "Location must be 1-100 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub location: String,

    pub date_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RecordOutcomeRequest {
    pub outcome: MatchOutcome,
}

/// Win/loss/draw tally for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchRecord {
    /// Tally the decided matches `user_id` played in. Pending and cancelled matches
    /// count for nothing.
    pub fn tally<'a>(user_id: Uuid, matches: impl IntoIterator<Item = &'a Match>) -> Self {
        let mut record = Self::default();
        for m in matches {
            let slot = if m.player_1_id == user_id {
                1
            } else if m.player_2_id == user_id {
                2
            } else {
                continue;
            };
            match m.status.winner_slot() {
                Some(winner) if winner == slot => record.wins += 1,
                Some(_) => record.losses += 1,
                None if m.status == MatchStatus::Draw => record.draws += 1,
                None => {}
            }
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn game(p1: Uuid, p2: Uuid, status: MatchStatus, date_time: DateTime<Utc>) -> Match {
        Match {
            id: Uuid::now_v7(),
            player_1_id: p1,
            player_2_id: p2,
            club_id: Uuid::now_v7(),
            location: "Board 1".into(),
            date_time,
            status,
            created_at: date_time,
        }
    }

    #[test]
    fn overdue_only_while_pending_and_elapsed() {
        let now = Utc::now();
        let (a, b) = (Uuid::now_v7(), Uuid::now_v7());
        assert!(game(a, b, MatchStatus::Pending, now - Duration::hours(1)).is_overdue(now));
        assert!(game(a, b, MatchStatus::Pending, now).is_overdue(now));
        assert!(!game(a, b, MatchStatus::Pending, now + Duration::hours(1)).is_overdue(now));
        assert!(!game(a, b, MatchStatus::Draw, now - Duration::hours(1)).is_overdue(now));
    }

    #[test]
    fn forfeit_awards_the_opponent() {
        let (a, b, c) = (Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7());
        let m = game(a, b, MatchStatus::Pending, Utc::now());
        assert_eq!(m.forfeited_by(a), Some(MatchStatus::Player2Win));
        assert_eq!(m.forfeited_by(b), Some(MatchStatus::Player1Win));
        assert_eq!(m.forfeited_by(c), None);
    }

    #[test]
    fn tally_counts_from_the_players_side() {
        let (a, b) = (Uuid::now_v7(), Uuid::now_v7());
        let now = Utc::now();
        let games = vec![
            game(a, b, MatchStatus::Player1Win, now),
            game(b, a, MatchStatus::Player1Win, now),
            game(b, a, MatchStatus::Player2Win, now),
            game(a, b, MatchStatus::Draw, now),
            game(a, b, MatchStatus::Cancelled, now),
            game(a, b, MatchStatus::Pending, now),
        ];
        assert_eq!(
            MatchRecord::tally(a, &games),
            MatchRecord { wins: 2, losses: 1, draws: 1 }
        );
        assert_eq!(
            MatchRecord::tally(b, &games),
            MatchRecord { wins: 1, losses: 2, draws: 1 }
        );
    }

    #[test]
    fn cancelled_is_not_a_recordable_outcome() {
        let parsed: Result<MatchOutcome, _> = serde_json::from_str("\"cancelled\"");
        assert!(parsed.is_err());
        let parsed: MatchOutcome = serde_json::from_str("\"player2_win\"").unwrap();
        assert_eq!(MatchStatus::from(parsed), MatchStatus::Player2Win);
    }
}
