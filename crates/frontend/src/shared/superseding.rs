//! Shared generation counters for latest-wins requests.
//!
//! Each search box, lookup or load key begins a generation before its
//! request; a response is applied only while its token is still current.

use contracts::shared::request_generation::{GenerationToken, RequestGenerations};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct Superseding {
    generations: StoredValue<RequestGenerations>,
}

impl Superseding {
    pub fn new() -> Self {
        Self {
            generations: StoredValue::new(RequestGenerations::new()),
        }
    }

    pub fn begin(&self, key: &str) -> GenerationToken {
        let mut token = GenerationToken::default();
        self.generations.update_value(|g| token = g.begin(key));
        token
    }

    pub fn is_current(&self, key: &str, token: GenerationToken) -> bool {
        self.generations.with_value(|g| g.is_current(key, token))
    }

    /// Supersedes whatever is in flight for `key` without starting a new request.
    pub fn cancel(&self, key: &str) {
        self.generations.update_value(|g| g.cancel(key));
    }
}

impl Default for Superseding {
    fn default() -> Self {
        Self::new()
    }
}
