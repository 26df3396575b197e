//! Club roles: a strict three-tier ladder.
//!
//! Every authorization decision in Polecat is a rank comparison against this ladder.
//! A user without a membership has no role at all, which is modelled as `None`
//! (`Option<Role>` orders `None` below every `Some`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A user's role inside one club. Declaration order is rank order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Member,
    Officer,
    Owner,
}

/// Whether an optional role clears `minimum`.
pub fn meets(role: Option<Role>, minimum: Role) -> bool {
    role.is_some_and(|r| r >= minimum)
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Member => "Member",
            Self::Officer => "Officer",
            Self::Owner => "Owner",
        })
    }
}
