//! Shared types and pure business rules of the televendas console.
//!
//! Nothing in this crate touches the browser: everything here can be
//! exercised with `cargo test` on the host.

pub mod domain;
pub mod projections;
pub mod shared;
pub mod system;
