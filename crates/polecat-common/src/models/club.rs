//! Club model — the container for memberships, applications and matches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_not_blank;

/// A chess club.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Club {
    pub id: Uuid,

    /// Club name (unique, up to 30 chars)
    pub name: String,

    /// Where the club meets (up to 180 chars)
    pub location: String,

    /// Club description (up to 520 chars)
    pub description: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClubRequest {
    #[validate(length(min = 1, max = 30, message = "Club name must be 1-30 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    #[validate(length(min = 1, max = 180, message = "Location must be 1-180 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub location: String,

    #[validate(length(min = 1, max = 520, message = "Description must be 1-520 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,
}

/// Club list entry with its member count.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ClubSummary {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub description: String,
    pub member_count: i64,
}
