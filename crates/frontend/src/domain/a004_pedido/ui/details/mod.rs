//! Order editor tab
//! - view_model.rs: header form, lines, totals, load/copy/save
//! - view.rs: Leptos component
//! - lines.rs: editable lines table

mod lines;
mod view;
mod view_model;

pub use view::OrderDetails;
pub use view_model::OrderDetailsViewModel;
