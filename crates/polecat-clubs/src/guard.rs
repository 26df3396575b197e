//! Preconditions shared by every workflow: the club exists, and the actor's current
//! role in it clears a threshold.

use polecat_common::error::{PolecatError, PolecatResult};
use polecat_common::models::Club;
use polecat_common::role::{self, Role};
use polecat_db::repository::{clubs, memberships};
use sqlx::SqliteConnection;
use uuid::Uuid;

/// Load the club or fail with NotFound.
pub(crate) async fn club(conn: &mut SqliteConnection, club_id: Uuid) -> PolecatResult<Club> {
    clubs::find_by_id(&mut *conn, club_id)
        .await?
        .ok_or_else(|| PolecatError::not_found("Club"))
}

/// Re-read the actor's role and require at least `minimum`.
pub(crate) async fn require_role(
    conn: &mut SqliteConnection,
    actor: Uuid,
    club_id: Uuid,
    minimum: Role,
) -> PolecatResult<Role> {
    let current = memberships::role_of(&mut *conn, actor, club_id).await?;
    match current {
        Some(found) if role::meets(current, minimum) => Ok(found),
        _ => {
            tracing::warn!(%actor, %club_id, ?current, required = %minimum, "Insufficient club role");
            Err(PolecatError::forbidden(refusal(minimum)))
        }
    }
}

fn refusal(minimum: Role) -> &'static str {
    match minimum {
        Role::Member => {
            "You are not in that club please apply or wait for application approval first!"
        }
        Role::Officer => "You need to be an officer to access that page!",
        Role::Owner => "You need to be the owner to access that page!",
    }
}
