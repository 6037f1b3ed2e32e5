use super::api::fetch_lookup;
use crate::shared::api_client::ApiClient;
use contracts::domain::lookups::{LookupItem, LookupKind};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::{HashMap, HashSet};

/// Lookup lists fetched once per company and shared by every form.
#[derive(Clone, Copy)]
pub struct LookupStore {
    lists: RwSignal<HashMap<LookupKind, Vec<LookupItem>>>,
    loading: StoredValue<HashSet<LookupKind>>,
}

impl LookupStore {
    pub fn new() -> Self {
        Self {
            lists: RwSignal::new(HashMap::new()),
            loading: StoredValue::new(HashSet::new()),
        }
    }

    /// Reactive list for `kind`; empty until loaded.
    pub fn items(&self, kind: LookupKind) -> Vec<LookupItem> {
        self.lists
            .with(|lists| lists.get(&kind).cloned().unwrap_or_default())
    }

    /// Starts loading `kind` unless it is cached or already in flight.
    pub fn ensure(&self, client: &ApiClient, kind: LookupKind) {
        if self.lists.with_untracked(|lists| lists.contains_key(&kind)) {
            return;
        }
        let mut started = false;
        self.loading.update_value(|loading| started = loading.insert(kind));
        if !started {
            return;
        }

        let this = *self;
        let client = client.clone();
        spawn_local(async move {
            match fetch_lookup(&client, kind).await {
                Ok(items) => {
                    log::debug!("lookup {:?}: {} items", kind, items.len());
                    this.lists.update(|lists| {
                        lists.insert(kind, items);
                    });
                }
                // Not cached, so the next form that needs it retries.
                Err(e) => log::warn!("lookup {:?} failed: {}", kind, e),
            }
            this.loading.update_value(|loading| {
                loading.remove(&kind);
            });
        });
    }

    /// Lists belong to the company; drop them when it changes.
    pub fn clear(&self) {
        self.lists.set(HashMap::new());
    }
}

impl Default for LookupStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_lookups() -> LookupStore {
    use_context::<LookupStore>().expect("LookupStore not provided in context")
}
