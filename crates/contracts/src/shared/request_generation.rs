//! Generation counters that let a newer request supersede an older one.
//!
//! Each search box or lookup field owns a key. Starting a request bumps the
//! key's generation; a response is applied only if its token is still the
//! latest for that key.

use std::collections::HashMap;

/// The default token is never current.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationToken {
    generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct RequestGenerations {
    current: HashMap<String, u64>,
}

impl RequestGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request for `key`, invalidating every earlier token.
    pub fn begin(&mut self, key: &str) -> GenerationToken {
        let generation = self.current.entry(key.to_string()).or_insert(0);
        *generation += 1;
        GenerationToken {
            generation: *generation,
        }
    }

    pub fn is_current(&self, key: &str, token: GenerationToken) -> bool {
        self.current.get(key).copied() == Some(token.generation)
    }

    /// Invalidates the in-flight request for `key` without starting another.
    pub fn cancel(&mut self, key: &str) {
        if let Some(generation) = self.current.get_mut(key) {
            *generation += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_request_supersedes_earlier() {
        let mut gens = RequestGenerations::new();
        let slow = gens.begin("clientes");
        let fast = gens.begin("clientes");
        assert!(!gens.is_current("clientes", slow));
        assert!(gens.is_current("clientes", fast));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut gens = RequestGenerations::new();
        let a = gens.begin("cnpj");
        let _b = gens.begin("produtos");
        assert!(gens.is_current("cnpj", a));
    }

    #[test]
    fn test_cancel() {
        let mut gens = RequestGenerations::new();
        let token = gens.begin("cnpj");
        gens.cancel("cnpj");
        assert!(!gens.is_current("cnpj", token));
        gens.cancel("unknown");
        assert!(!gens.is_current("unknown", token));
    }

    #[test]
    fn test_default_token_never_current() {
        let mut gens = RequestGenerations::new();
        gens.begin("pedidos");
        assert!(!gens.is_current("pedidos", GenerationToken::default()));
        assert!(!gens.is_current("outro", GenerationToken::default()));
    }
}
