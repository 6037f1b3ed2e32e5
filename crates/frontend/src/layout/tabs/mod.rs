//! Tab management
//!
//! - `page`: TabPage, the mounted content of one tab
//! - `registry`: tab key -> view
//! - `tab_labels`: tab keys and their titles

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::*;
