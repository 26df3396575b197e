//! Application model — a user's request to join a club.
//!
//! Lifecycle: `Pending` → `Accepted` | `Rejected`. Both outcomes are terminal for the
//! application row itself; an accepted application is later flipped to `Rejected` when
//! the member leaves or is removed, which is a membership event and not a review.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_not_blank;

/// Personal statement recorded for the application a club creator gets.
pub const OWNER_STATEMENT: &str = "Club owner";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub club_id: Uuid,

    /// Why the applicant wants to join (up to 500 chars)
    pub personal_statement: String,

    pub status: ApplicationStatus,

    pub created_at: DateTime<Utc>,
}

impl Application {
    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateApplicationRequest {
    #[validate(length(min = 1, max = 500, message = "Personal statement must be 1-500 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub personal_statement: String,
}

/// Pending application as an officer sees it in the review queue.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ApplicationReview {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub experience_level: crate::models::ExperienceLevel,
    pub personal_statement: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_serialize_snake_case() {
        assert_eq!(
            serde_json::to_value(ApplicationStatus::Accepted).unwrap(),
            serde_json::json!("accepted")
        );
    }
}
