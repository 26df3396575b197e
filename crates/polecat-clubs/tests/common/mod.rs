//! Shared fixtures for the workflow suites: a fresh in-memory database per test and
//! factories for users, clubs and members.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use polecat_clubs::{applications, membership, registry};
use polecat_common::models::{
    CreateApplicationRequest, CreateClubRequest, ExperienceLevel, Match, User,
};
use polecat_common::role::Role;
use polecat_db::Database;
use polecat_db::repository::{matches, users};
use sqlx::SqlitePool;
use uuid::Uuid;

pub async fn setup() -> SqlitePool {
    Database::in_memory()
        .await
        .expect("in-memory database")
        .pool
}

/// Insert a user directly. The password hash is a placeholder; suites that log in go
/// through `registry::sign_up` instead.
pub async fn user(pool: &SqlitePool, username: &str) -> User {
    let email = format!("{username}@example.org");
    let new = users::NewUser {
        email: &email,
        username,
        first_name: username,
        last_name: "Tester",
        bio: "",
        experience_level: ExperienceLevel::Beginner,
        password_hash: "unused",
    };
    users::create_user(pool, Uuid::now_v7(), &new)
        .await
        .expect("create user")
}

pub async fn club(pool: &SqlitePool, owner: &User, name: &str) -> Uuid {
    let body = CreateClubRequest {
        name: name.into(),
        location: "Kings Cross".into(),
        description: "Weekly blitz and a long-play ladder".into(),
    };
    registry::create_club(pool, owner.id, &body)
        .await
        .expect("create club")
        .id
}

/// Bring `user` into the club through apply + accept by `owner`, then promote when an
/// officer is wanted.
pub async fn join(pool: &SqlitePool, owner: &User, club_id: Uuid, user: &User, role: Role) {
    let body = CreateApplicationRequest {
        personal_statement: "Hi".into(),
    };
    let application = applications::apply(pool, user.id, club_id, &body)
        .await
        .expect("apply");
    applications::accept(pool, owner.id, club_id, application.id)
        .await
        .expect("accept");
    if role == Role::Officer {
        membership::promote(pool, owner.id, club_id, user.id)
            .await
            .expect("promote");
    }
}

pub fn in_days(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

/// Insert a pending match without the scheduling checks, e.g. one already in the past.
pub async fn pending_match(
    pool: &SqlitePool,
    club_id: Uuid,
    player_1: &User,
    player_2: &User,
    date_time: DateTime<Utc>,
) -> Match {
    let new = matches::NewMatch {
        player_1_id: player_1.id,
        player_2_id: player_2.id,
        club_id,
        location: "Board 1",
        date_time,
    };
    matches::create_match(pool, Uuid::now_v7(), &new)
        .await
        .expect("create match")
}
