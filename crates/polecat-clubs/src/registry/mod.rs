//! Identity & club registry: accounts, clubs, and the read models built on them.

pub mod accounts;
pub mod clubs;

pub use accounts::*;
pub use clubs::*;
