//! Case-insensitive substring search.

use super::item::CatalogItem;

/// Whether `text` occurs, ignoring case, in any of the item's search fields.
///
/// Empty text matches every item. There is no tokenization or ranking: the
/// whole input, including surrounding whitespace, must appear as one
/// contiguous substring.
pub fn matches_search<T: CatalogItem + ?Sized>(item: &T, text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    matches_folded(item, &fold_case(text))
}

/// Lowercase `text` one character at a time.
///
/// `str::to_lowercase` maps a word-final capital sigma differently from one
/// inside a word, so appending text could change how a prefix folds. Folding
/// per character keeps a substring a substring.
pub(crate) fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Same as [`matches_search`] for a needle already passed through [`fold_case`].
pub(crate) fn matches_folded<T: CatalogItem + ?Sized>(item: &T, needle: &str) -> bool {
    needle.is_empty()
        || item
            .search_fields()
            .iter()
            .any(|field| fold_case(field).contains(needle))
}

#[cfg(test)]
mod tests {
    use super::super::item::testing::med;
    use super::*;

    #[test]
    fn test_empty_text_matches_everything() {
        assert!(matches_search(&med(1, "Aspirin", "Pain Relief", 1000), ""));
    }

    #[test]
    fn test_case_insensitive_substring() {
        let amox = med(2, "Amoxicillin", "Antibiotics", 1875);
        assert!(matches_search(&amox, "am"));
        assert!(matches_search(&amox, "CILL"));
        assert!(!matches_search(&med(1, "Aspirin", "Pain Relief", 1000), "am"));
    }

    #[test]
    fn test_matches_any_field() {
        let item = med(1, "Paracetamol", "Pain Relief", 1250);
        assert!(matches_search(&item, "relief"));
        assert!(!matches_search(&item, "antibiotic"));
    }

    #[test]
    fn test_no_tokenization() {
        let item = med(1, "Vitamin D3 1000IU", "Supplements", 1500);
        assert!(matches_search(&item, "d3 1000"));
        assert!(!matches_search(&item, "vitamin 1000"));
        assert!(!matches_search(&item, " vitamin"));
    }

    #[test]
    fn test_extending_the_text_never_widens_matches() {
        // A trailing capital sigma would fold to the final form on its own
        let item = med(1, "ΑΣΒ", "Greek", 1000);
        assert!(matches_search(&item, "ΑΣΒ"));
        assert!(matches_search(&item, "ΑΣ"));
        assert!(matches_search(&item, "ασ"));
        assert_eq!(fold_case("ΑΣ"), "ασ");
    }
}
