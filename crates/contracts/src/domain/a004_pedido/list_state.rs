//! Order list, multi-selection and active order of the console.

use super::aggregate::Order;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderListState {
    pub items: Vec<Order>,
    pub selected_ids: BTreeSet<i64>,
    pub active_id: Option<i64>,
}

impl OrderListState {
    /// Replaces the list; selections and the active order that vanished are dropped.
    pub fn set_items(&mut self, items: Vec<Order>) {
        self.items = items;
        let present: BTreeSet<i64> = self.items.iter().map(|o| o.id).collect();
        self.selected_ids.retain(|id| present.contains(id));
        if let Some(active) = self.active_id {
            if !present.contains(&active) {
                self.active_id = None;
            }
        }
    }

    pub fn select(&mut self, id: i64) {
        self.selected_ids.insert(id);
    }

    pub fn deselect(&mut self, id: i64) {
        self.selected_ids.remove(&id);
    }

    pub fn toggle(&mut self, id: i64) {
        if !self.selected_ids.remove(&id) {
            self.selected_ids.insert(id);
        }
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected_ids.contains(&id)
    }

    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
    }

    /// Selects every listed order, or clears when all already are.
    pub fn toggle_all(&mut self) {
        let all_selected = !self.items.is_empty()
            && self.items.iter().all(|o| self.selected_ids.contains(&o.id));
        if all_selected {
            self.clear_selection();
        } else {
            self.selected_ids = self.items.iter().map(|o| o.id).collect();
        }
    }

    pub fn set_active(&mut self, id: Option<i64>) {
        self.active_id = id;
    }

    pub fn active(&self) -> Option<&Order> {
        let id = self.active_id?;
        self.items.iter().find(|o| o.id == id)
    }

    pub fn selected_orders(&self) -> Vec<&Order> {
        self.items
            .iter()
            .filter(|o| self.selected_ids.contains(&o.id))
            .collect()
    }

    /// Replaces one order in place after an edit.
    pub fn upsert(&mut self, order: Order) {
        match self.items.iter_mut().find(|o| o.id == order.id) {
            Some(existing) => *existing = order,
            None => self.items.insert(0, order),
        }
    }

    pub fn remove(&mut self, id: i64) {
        self.items.retain(|o| o.id != id);
        self.selected_ids.remove(&id);
        if self.active_id == Some(id) {
            self.active_id = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: i64) -> Order {
        Order {
            id,
            ..Default::default()
        }
    }

    fn state() -> OrderListState {
        let mut state = OrderListState::default();
        state.set_items(vec![order(1), order(2), order(3)]);
        state
    }

    #[test]
    fn test_select_then_deselect_is_noop() {
        let mut s = state();
        s.select(2);
        let before = s.clone();
        s.select(1);
        s.deselect(1);
        assert_eq!(s, before);

        s.toggle(3);
        s.toggle(3);
        assert_eq!(s, before);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut s = state();
        s.select(1);
        s.clear_selection();
        let once = s.clone();
        s.clear_selection();
        assert_eq!(s, once);
        assert!(s.selected_ids.is_empty());
    }

    #[test]
    fn test_set_items_drops_stale_selection() {
        let mut s = state();
        s.select(1);
        s.select(3);
        s.set_active(Some(3));
        s.set_items(vec![order(1), order(2)]);
        assert_eq!(s.selected_ids.iter().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(s.active_id, None);
    }

    #[test]
    fn test_toggle_all() {
        let mut s = state();
        s.toggle_all();
        assert_eq!(s.selected_orders().len(), 3);
        s.toggle_all();
        assert!(s.selected_ids.is_empty());
    }

    #[test]
    fn test_upsert_and_remove() {
        let mut s = state();
        s.set_active(Some(2));
        let mut edited = order(2);
        edited.numero = "X".to_string();
        s.upsert(edited);
        assert_eq!(s.active().map(|o| o.numero.as_str()), Some("X"));
        s.upsert(order(9));
        assert_eq!(s.items[0].id, 9);
        s.select(2);
        s.remove(2);
        assert!(!s.is_selected(2));
        assert_eq!(s.active_id, None);
    }
}
