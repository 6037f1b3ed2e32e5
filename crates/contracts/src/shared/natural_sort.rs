//! Numeric-aware, accent-insensitive ordering for lookup lists.
//!
//! "2" sorts before "10", "Água" sorts next to "agua", and equal keys are
//! broken by code, then id, so repeated loads always render the same order.

use std::cmp::Ordering;

enum Chunk<'a> {
    Digits(&'a str),
    Text(String),
}

fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'u',
        'ç' | 'Ç' => 'c',
        'ñ' | 'Ñ' => 'n',
        other => other.to_lowercase().next().unwrap_or(other),
    }
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits: Option<bool> = None;

    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != is_digit => {
                out.push(make_chunk(&s[start..i], prev));
                start = i;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }
    if let Some(prev) = in_digits {
        out.push(make_chunk(&s[start..], prev));
    }
    out
}

fn make_chunk(part: &str, digits: bool) -> Chunk<'_> {
    if digits {
        Chunk::Digits(part)
    } else {
        Chunk::Text(part.chars().map(fold_char).collect())
    }
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
}

/// Compares the folded forms only: case, accents and leading zeros are
/// ignored, so "Água" and "agua" are `Equal`.
pub fn folded_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a.trim());
    let right = chunks(b.trim());

    for (l, r) in left.iter().zip(right.iter()) {
        let ord = match (l, r) {
            (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digits(x, y),
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
            (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    left.len().cmp(&right.len())
}

/// Compares two strings the way a person reads them.
///
/// Falls back to a plain byte comparison when the folded forms are equal, so
/// the relation stays a total order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    folded_cmp(a, b).then_with(|| a.cmp(b))
}

/// Anything that appears in a lookup dropdown.
pub trait LookupEntry {
    fn sort_label(&self) -> &str;
    fn sort_code(&self) -> &str;
    fn sort_id(&self) -> String;
}

/// Sorts by folded label, then folded code, then id. Labels equal in every
/// key but spelling are finally ordered byte-wise.
pub fn sort_lookup<T: LookupEntry>(items: &mut [T]) {
    items.sort_by(|a, b| {
        folded_cmp(a.sort_label(), b.sort_label())
            .then_with(|| folded_cmp(a.sort_code(), b.sort_code()))
            .then_with(|| natural_cmp(&a.sort_id(), &b.sort_id()))
            .then_with(|| a.sort_label().cmp(b.sort_label()))
            .then_with(|| a.sort_code().cmp(b.sort_code()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_aware() {
        let mut ids = vec!["2", "10", "1"];
        ids.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(ids, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_mixed_text_and_numbers() {
        let mut terms = vec!["30 dias", "7 dias", "Rota 10", "Rota 2", "28/35/42"];
        terms.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(terms, vec!["7 dias", "28/35/42", "30 dias", "Rota 2", "Rota 10"]);
    }

    #[test]
    fn test_accent_and_case_insensitive() {
        assert_eq!(natural_cmp("ÁGUA MINERAL", "agua z"), Ordering::Less);
        assert_eq!(natural_cmp("cacau", "Ção"), Ordering::Less);
        assert_eq!(natural_cmp("Banana", "abacaxi"), Ordering::Greater);
    }

    #[test]
    fn test_total_order_on_equivalent_forms() {
        assert_ne!(natural_cmp("Água", "agua"), Ordering::Equal);
        assert_eq!(natural_cmp("abc", "abc"), Ordering::Equal);
        assert_ne!(natural_cmp("007", "7"), Ordering::Equal);
    }

    struct Entry(&'static str, &'static str, &'static str);

    impl LookupEntry for Entry {
        fn sort_label(&self) -> &str {
            self.0
        }

        fn sort_code(&self) -> &str {
            self.1
        }

        fn sort_id(&self) -> String {
            self.2.to_string()
        }
    }

    #[test]
    fn test_folded_forms_compare_equal() {
        assert_eq!(folded_cmp("Água", "agua"), Ordering::Equal);
        assert_eq!(folded_cmp("ITEM 007", "item 7"), Ordering::Equal);
        assert_eq!(folded_cmp("item", "itens"), Ordering::Less);
    }

    #[test]
    fn test_case_variants_tie_break_by_code_then_id() {
        let mut items = vec![
            Entry("Item", "10", "10"),
            Entry("item", "2", "2"),
            Entry("ítem", "1", "1"),
        ];
        sort_lookup(&mut items);
        let ids: Vec<&str> = items.iter().map(|e| e.2).collect();
        assert_eq!(ids, vec!["1", "2", "10"]);

        let mut same_code = vec![Entry("Rota", "R", "12"), Entry("ROTA", "r", "3")];
        sort_lookup(&mut same_code);
        assert_eq!(same_code[0].2, "3");
    }
}
