//! Metadata lookups cached per company, and the dropdown that shows them.

pub mod api;
pub mod store;
pub mod ui;
