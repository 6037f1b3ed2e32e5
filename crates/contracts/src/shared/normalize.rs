//! Нормализация ответов backend через таблицы синонимов полей.
//!
//! The backend answers with snake_case, camelCase and several historical
//! names for the same field. Every entity declares an alias table per field
//! and reads it through [`RawFields`]; a missing or null field always falls
//! back to an empty string, zero or `false`.

use chrono::NaiveDate;
use serde_json::Value;

/// Ordered list of field names that carry the same value.
pub type Aliases = &'static [&'static str];

/// Conversion from an arbitrary backend object into a canonical shape.
///
/// Implementations must be total: `Value::Null`, scalars and objects with
/// unexpected fields all produce a fully defaulted value.
pub trait FromRaw: Sized {
    fn from_raw(raw: &Value) -> Self;
}

/// Returns the first alias holding a non-null, non-blank value.
///
/// A dotted alias such as `"cliente.nome"` descends into nested objects.
pub fn lookup<'a>(raw: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|alias| {
        let mut current = raw;
        for segment in alias.split('.') {
            current = current.get(segment)?;
        }
        let blank = match current {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        };
        (!blank).then_some(current)
    })
}

/// Typed accessors over alias tables.
pub trait RawFields {
    fn text(&self, aliases: &[&str]) -> String;
    fn opt_text(&self, aliases: &[&str]) -> Option<String>;
    fn number(&self, aliases: &[&str]) -> f64;
    fn opt_number(&self, aliases: &[&str]) -> Option<f64>;
    fn int(&self, aliases: &[&str]) -> i64;
    fn opt_int(&self, aliases: &[&str]) -> Option<i64>;
    fn flag(&self, aliases: &[&str]) -> bool;
    fn flag_or(&self, aliases: &[&str], default: bool) -> bool;
    fn records(&self, aliases: &[&str]) -> Vec<Value>;
}

/// First alias whose value `convert` accepts.
fn first_of<T>(raw: &Value, aliases: &[&str], convert: impl Fn(&Value) -> Option<T>) -> Option<T> {
    aliases
        .iter()
        .find_map(|alias| lookup(raw, &[*alias]).and_then(&convert))
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64)),
        Value::String(s) => parse_int(s),
        _ => None,
    }
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "s" | "sim" | "y" | "yes" | "t" | "true" | "1" => Some(true),
            "n" | "nao" | "não" | "no" | "f" | "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

impl RawFields for Value {
    fn text(&self, aliases: &[&str]) -> String {
        self.opt_text(aliases).unwrap_or_default()
    }

    fn opt_text(&self, aliases: &[&str]) -> Option<String> {
        first_of(self, aliases, as_text)
    }

    fn number(&self, aliases: &[&str]) -> f64 {
        self.opt_number(aliases).unwrap_or(0.0)
    }

    fn opt_number(&self, aliases: &[&str]) -> Option<f64> {
        first_of(self, aliases, as_number)
    }

    fn int(&self, aliases: &[&str]) -> i64 {
        self.opt_int(aliases).unwrap_or(0)
    }

    fn opt_int(&self, aliases: &[&str]) -> Option<i64> {
        first_of(self, aliases, as_int)
    }

    fn flag(&self, aliases: &[&str]) -> bool {
        self.flag_or(aliases, false)
    }

    fn flag_or(&self, aliases: &[&str], default: bool) -> bool {
        first_of(self, aliases, as_flag).unwrap_or(default)
    }

    fn records(&self, aliases: &[&str]) -> Vec<Value> {
        first_of(self, aliases, |v| v.as_array().cloned())
            .map(|items| items.into_iter().filter(Value::is_object).collect())
            .unwrap_or_default()
    }
}

/// Parses "1234.56", "1234,56" and "1.234,56".
pub fn parse_decimal(input: &str) -> Option<f64> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    let normalized = if s.contains(',') {
        s.replace('.', "").replace(',', ".")
    } else {
        s.to_string()
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_int(input: &str) -> Option<i64> {
    let s = input.trim();
    s.parse::<i64>()
        .ok()
        .or_else(|| parse_decimal(s).map(|v| v.trunc() as i64))
}

/// Coerces a form field into an identifier; blank or garbage becomes 0.
pub fn coerce_id(input: &str) -> i64 {
    parse_int(input).unwrap_or(0)
}

/// Accepts `YYYY-MM-DD`, ISO datetimes and `DD/MM/YYYY`.
pub fn parse_backend_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    let date_part = s.split(['T', ' ']).next().unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d/%m/%Y"))
        .ok()
}

/// Extracts the record array from the envelopes the backend uses.
///
/// Accepted: a bare array, `{ "data": [...] }` and `{ "data": { "data": [...] } }`.
/// Anything else is an empty collection.
pub fn list_envelope(payload: &Value) -> Vec<Value> {
    let array = match payload {
        Value::Array(items) => Some(items),
        Value::Object(_) => match payload.get("data") {
            Some(Value::Array(items)) => Some(items),
            Some(inner @ Value::Object(_)) => inner.get("data").and_then(Value::as_array),
            _ => None,
        },
        _ => None,
    };
    array.cloned().unwrap_or_default()
}

/// Unwraps `{ "data": {...} }` around a single record.
pub fn record_envelope(payload: &Value) -> &Value {
    match payload.get("data") {
        Some(inner @ Value::Object(_)) => inner,
        _ => payload,
    }
}

pub fn normalize_list<T: FromRaw>(payload: &Value) -> Vec<T> {
    list_envelope(payload).iter().map(T::from_raw).collect()
}

pub fn normalize_one<T: FromRaw>(payload: &Value) -> T {
    T::from_raw(record_envelope(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOME: Aliases = &["nome", "razao_social", "razaoSocial", "cliente.nome"];

    #[test]
    fn test_lookup_skips_blanks_and_follows_order() {
        let raw = json!({ "nome": null, "razaoSocial": "ACME LTDA", "razao_social": "" });
        assert_eq!(raw.opt_text(NOME), Some("ACME LTDA".to_string()));
    }

    #[test]
    fn test_nested_alias() {
        let raw = json!({ "cliente": { "nome": "Mercado Sol" } });
        assert_eq!(raw.text(NOME), "Mercado Sol");
    }

    #[test]
    fn test_object_valued_alias_falls_through() {
        let raw = json!({ "endereco": { "logradouro": "Rua A" } });
        assert_eq!(raw.text(&["endereco", "endereco.logradouro"]), "Rua A");
    }

    #[test]
    fn test_numbers_from_strings() {
        let raw = json!({ "a": "1.234,56", "b": "10.5", "c": "abc", "d": 7 });
        assert_eq!(raw.number(&["a"]), 1234.56);
        assert_eq!(raw.number(&["b"]), 10.5);
        assert_eq!(raw.number(&["c"]), 0.0);
        assert_eq!(raw.int(&["d"]), 7);
        assert_eq!(raw.int(&["b"]), 10);
    }

    #[test]
    fn test_flags() {
        let raw = json!({ "a": "S", "b": 0, "c": "N", "d": true });
        assert!(raw.flag(&["a"]));
        assert!(!raw.flag(&["b"]));
        assert!(!raw.flag(&["c"]));
        assert!(raw.flag(&["d"]));
        assert!(raw.flag_or(&["missing"], true));
    }

    #[test]
    fn test_null_input_is_total() {
        let raw = Value::Null;
        assert_eq!(raw.text(NOME), "");
        assert_eq!(raw.number(&["x"]), 0.0);
        assert_eq!(raw.int(&["x"]), 0);
        assert!(!raw.flag(&["x"]));
        assert!(raw.records(&["itens"]).is_empty());
    }

    #[test]
    fn test_list_envelopes() {
        let bare = json!([{ "id": 1 }, { "id": 2 }]);
        let wrapped = json!({ "data": [{ "id": 1 }, { "id": 2 }] });
        let double = json!({ "data": { "data": [{ "id": 1 }, { "id": 2 }] } });
        assert_eq!(list_envelope(&bare).len(), 2);
        assert_eq!(list_envelope(&wrapped).len(), 2);
        assert_eq!(list_envelope(&double).len(), 2);
        assert!(list_envelope(&json!({ "rows": [1] })).is_empty());
        assert!(list_envelope(&json!("oops")).is_empty());
        assert!(list_envelope(&Value::Null).is_empty());
    }

    #[test]
    fn test_coerce_id() {
        assert_eq!(coerce_id("12"), 12);
        assert_eq!(coerce_id(" 7 "), 7);
        assert_eq!(coerce_id(""), 0);
        assert_eq!(coerce_id("abc"), 0);
    }

    #[test]
    fn test_parse_backend_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(parse_backend_date("2024-03-15"), expected);
        assert_eq!(parse_backend_date("2024-03-15T10:00:00Z"), expected);
        assert_eq!(parse_backend_date("15/03/2024"), expected);
        assert_eq!(parse_backend_date("ontem"), None);
    }
}
