//! Page categories for tab pages.
//!
//! Every page rendered in a tab carries an `id` in the form
//! `{entity}--{category}` (for example `"a004_pedidos--list"`) and a
//! `data-page-category` attribute with one of the constants below.

/// Table of records with filters.
pub const PAGE_CAT_LIST: &str = "list";

/// Edit form for a single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Read-only consultation (receivables, purchase history).
pub const PAGE_CAT_REPORT: &str = "report";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_DETAIL, PAGE_CAT_REPORT];

/// `{entity}--{category}` with both halves present.
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && !category.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("a004_pedidos--list"));
        assert!(is_valid_page_id("p901_contas_receber--report"));
        assert!(!is_valid_page_id("a004_pedidos"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a004--"));
    }

    #[test]
    fn test_categories_are_distinct() {
        let mut all = ALL_CATEGORIES.to_vec();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), ALL_CATEGORIES.len());
    }
}
