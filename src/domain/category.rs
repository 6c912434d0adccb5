//! Category names are addressed by index into a closed table of ten entries.
//!
//! Products store the raw index; anything outside the table resolves to
//! [`UNKNOWN_CATEGORY`] when displayed.

/// The product categories, in index order.
pub const CATEGORIES: [&str; 10] = [
    "Electronics",
    "Clothing",
    "Home",
    "Grocery",
    "Books",
    "Toys",
    "Sports",
    "Beauty",
    "Automotive",
    "Others",
];

/// Display name for an index outside the category table.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Returns the name of the category at `index`.
///
/// Negative indices and indices past the end of [`CATEGORIES`] resolve to
/// [`UNKNOWN_CATEGORY`].
#[must_use]
pub fn name_for(index: i64) -> &'static str {
    usize::try_from(index)
        .ok()
        .and_then(|i| CATEGORIES.get(i))
        .copied()
        .unwrap_or(UNKNOWN_CATEGORY)
}

/// Whether `index` addresses an entry of the category table.
#[must_use]
pub fn is_valid(index: i64) -> bool {
    usize::try_from(index).is_ok_and(|i| i < CATEGORIES.len())
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(0, "Electronics")]
    #[test_case(1, "Clothing")]
    #[test_case(2, "Home")]
    #[test_case(3, "Grocery")]
    #[test_case(4, "Books")]
    #[test_case(5, "Toys")]
    #[test_case(6, "Sports")]
    #[test_case(7, "Beauty")]
    #[test_case(8, "Automotive")]
    #[test_case(9, "Others")]
    fn known_indices_resolve_to_table_entries(index: i64, expected: &str) {
        assert_eq!(name_for(index), expected);
        assert!(is_valid(index));
    }

    #[test_case(-1)]
    #[test_case(10)]
    #[test_case(999)]
    #[test_case(i64::MIN)]
    #[test_case(i64::MAX)]
    fn out_of_range_indices_are_unknown(index: i64) {
        assert_eq!(name_for(index), UNKNOWN_CATEGORY);
        assert!(!is_valid(index));
    }
}
