//! Membership model — the authoritative record of a user's role in a club.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ExperienceLevel;
use crate::role::Role;

/// Exactly one row per (user, club).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Membership {
    pub id: Uuid,
    pub user_id: Uuid,
    pub club_id: Uuid,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}

/// A member row joined with the user's public profile.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MemberEntry {
    pub user_id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub experience_level: ExperienceLevel,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}
