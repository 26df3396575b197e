//! # polecat-common
//!
//! Shared types, configuration, error handling, and validation used across all Polecat crates.
//! No persistence and no workflow logic lives here, only the vocabulary the other crates speak.

pub mod config;
pub mod error;
pub mod models;
pub mod role;
pub mod validation;
