//! Core domain models shared across all Polecat crates.
//!
//! These are the "truth" types: what the database stores and the API serializes.
//! Ids are UUID v7, so rows sort by creation time.

pub mod application;
pub mod club;
pub mod membership;
pub mod r#match;
pub mod user;

/// Re-export all model types for convenience.
pub use application::*;
pub use club::*;
pub use membership::*;
pub use r#match::*;
pub use user::*;
