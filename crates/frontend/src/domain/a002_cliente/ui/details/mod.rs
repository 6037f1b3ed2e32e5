//! Client form, split the same way as the other detail screens:
//! - view_model.rs: form state, CNPJ enrichment and save
//! - view.rs: Leptos component

mod view;
mod view_model;

pub use view::ClientDetails;
pub use view_model::ClientDetailsViewModel;
