//! API route modules, one per aggregate.

pub mod applications;
pub mod auth;
pub mod clubs;
pub mod health;
pub mod matches;
pub mod members;
pub mod users;
