//! App-wide order list: loaded items, multi-selection and the active order.
//!
//! The list page, the details tab and the bulk actions all read and write
//! the same store so a save or delete shows up everywhere.

use contracts::domain::a004_pedido::aggregate::Order;
use contracts::domain::a004_pedido::list_state::OrderListState;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct OrderStore {
    pub state: RwSignal<OrderListState>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(OrderListState::default()),
        }
    }

    pub fn items(&self) -> Vec<Order> {
        self.state.with(|s| s.items.clone())
    }

    pub fn set_items(&self, items: Vec<Order>) {
        self.state.update(|s| s.set_items(items));
    }

    pub fn toggle(&self, id: i64) {
        self.state.update(|s| s.toggle(id));
    }

    pub fn toggle_all(&self) {
        self.state.update(|s| s.toggle_all());
    }

    pub fn clear_selection(&self) {
        self.state.update(|s| s.clear_selection());
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.state.with(|s| s.is_selected(id))
    }

    pub fn selected_count(&self) -> usize {
        self.state.with(|s| s.selected_ids.len())
    }

    pub fn all_selected(&self) -> bool {
        self.state
            .with(|s| !s.items.is_empty() && s.selected_ids.len() == s.items.len())
    }

    pub fn selected_untracked(&self) -> Vec<Order> {
        self.state
            .with_untracked(|s| s.selected_orders().into_iter().cloned().collect())
    }

    pub fn set_active(&self, id: Option<i64>) {
        self.state.update(|s| s.set_active(id));
    }

    pub fn active_id(&self) -> Option<i64> {
        self.state.with(|s| s.active_id)
    }

    pub fn upsert(&self, order: Order) {
        self.state.update(|s| s.upsert(order));
    }

    pub fn remove(&self, id: i64) {
        self.state.update(|s| s.remove(id));
    }

    /// Forget everything; the company changed.
    pub fn reset(&self) {
        self.state.set(OrderListState::default());
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_order_store() -> OrderStore {
    use_context::<OrderStore>().expect("OrderStore not provided in context")
}
