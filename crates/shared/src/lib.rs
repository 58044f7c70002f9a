//! Wire types shared by the admin console crates.

pub mod domain;
pub mod protocol;
