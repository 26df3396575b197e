//! Repository layer — query functions organized by table.
//!
//! Every function takes any SQLite executor, so the workflow layer can run several of
//! them inside one transaction (`&mut *tx`) while read paths pass the pool directly.

pub mod applications;
pub mod clubs;
pub mod matches;
pub mod memberships;
pub mod users;
