//! Pedido: order composition, totals and backend payloads.

pub mod aggregate;
pub mod composition;
pub mod export;
pub mod list_state;
pub mod payload;
