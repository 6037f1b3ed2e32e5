use std::hash::Hash;

/// Identifier assigned by the backend.
///
/// The backend uses numeric keys for most records and string codes for a few
/// (products are addressed by code).
pub trait AggregateId: Clone + PartialEq + Eq + Hash + std::fmt::Debug {
    /// Преобразовать ID в строку
    fn as_string(&self) -> String;

    /// Создать ID из строки
    fn from_string(s: &str) -> Result<Self, String>;

    /// A record the backend has not assigned an id to yet.
    fn is_unassigned(&self) -> bool;
}

impl AggregateId for i64 {
    fn as_string(&self) -> String {
        ToString::to_string(self)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map_err(|e| format!("Invalid i64: {}", e))
    }

    fn is_unassigned(&self) -> bool {
        *self <= 0
    }
}

impl AggregateId for String {
    fn as_string(&self) -> String {
        self.clone()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Err("Empty identifier".to_string())
        } else {
            Ok(trimmed.to_string())
        }
    }

    fn is_unassigned(&self) -> bool {
        self.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ids() {
        assert_eq!(<i64 as AggregateId>::from_string(" 42 "), Ok(42));
        assert!(<i64 as AggregateId>::from_string("x").is_err());
        assert!(0i64.is_unassigned());
        assert!(!7i64.is_unassigned());
    }

    #[test]
    fn test_string_ids() {
        assert_eq!(<String as AggregateId>::from_string(" P-01 "), Ok("P-01".to_string()));
        assert!(<String as AggregateId>::from_string("  ").is_err());
    }
}
