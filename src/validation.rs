/// Title rules and input coercion for manga entries

use crate::store::MangaStore;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    TitleRequired,
    #[error("title is already in the list")]
    TitleNotUnique,
}

/// Check a candidate title against the store.
///
/// When editing, `original_title` is the entry's current title and is not
/// treated as a collision.
pub fn validate(title: &str, store: &MangaStore, original_title: Option<&str>) -> Result<(), ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }

    let taken = store
        .titles()
        .any(|existing| existing == title && Some(existing) != original_title);
    if taken {
        return Err(ValidationError::TitleNotUnique);
    }

    Ok(())
}

/// Parse the chapter field. Fractions are truncated and values past `u32::MAX`
/// saturate; text without digits, negatives and NaN read as 0.
pub fn coerce_chapters(input: &str) -> u32 {
    let input = input.trim();
    if let Ok(chapters) = input.parse::<u32>() {
        return chapters;
    }
    // "inf" and "NaN" parse as floats but are not numbers a user typed
    if !input.bytes().any(|b| b.is_ascii_digit()) {
        return 0;
    }
    match input.parse::<f64>() {
        // Float to int casts saturate
        Ok(value) if value >= 0.0 => value.trunc() as u32,
        _ => 0,
    }
}

/// Return `title`, or `"title (n)"` with the smallest `n` not already taken
pub fn disambiguate_title(title: &str, store: &MangaStore) -> String {
    if !store.contains(title) {
        return title.to_string();
    }

    (1..)
        .map(|n| format!("{} ({})", title, n))
        .find(|candidate| !store.contains(candidate))
        .unwrap_or_else(|| title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manga_data::Manga;
    use chrono::Utc;

    fn store_with(titles: &[&str]) -> MangaStore {
        let mut store = MangaStore::new();
        for title in titles {
            store
                .add(Manga::new(title.to_string(), String::new(), String::new(), 0, false, Utc::now()))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_title_required() {
        let store = store_with(&[]);
        assert_eq!(validate("", &store, None), Err(ValidationError::TitleRequired));
        assert_eq!(validate("   ", &store, None), Err(ValidationError::TitleRequired));
    }

    #[test]
    fn test_title_not_unique() {
        let store = store_with(&["A"]);
        assert_eq!(validate("A", &store, None), Err(ValidationError::TitleNotUnique));
        assert_eq!(validate(" A ", &store, None), Err(ValidationError::TitleNotUnique));
        assert_eq!(validate("a", &store, None), Ok(()));
    }

    #[test]
    fn test_edit_excludes_own_title() {
        let store = store_with(&["A", "B"]);
        assert_eq!(validate("A", &store, Some("A")), Ok(()));
        assert_eq!(validate("B", &store, Some("A")), Err(ValidationError::TitleNotUnique));
    }

    #[test]
    fn test_coerce_chapters() {
        assert_eq!(coerce_chapters("12"), 12);
        assert_eq!(coerce_chapters(" 7 "), 7);
        assert_eq!(coerce_chapters("-3"), 0);
        assert_eq!(coerce_chapters("abc"), 0);
        assert_eq!(coerce_chapters(""), 0);
    }

    #[test]
    fn test_coerce_chapters_truncates_and_saturates() {
        assert_eq!(coerce_chapters("4.5"), 4);
        assert_eq!(coerce_chapters("0.99"), 0);
        assert_eq!(coerce_chapters("99999999999"), u32::MAX);
        assert_eq!(coerce_chapters("1e3"), 1000);
        assert_eq!(coerce_chapters("-4.5"), 0);
        assert_eq!(coerce_chapters("inf"), 0);
        assert_eq!(coerce_chapters("NaN"), 0);
    }

    #[test]
    fn test_disambiguate_title() {
        let store = store_with(&["Chapter 1 - Reader", "Chapter 1 - Reader (1)", "Other"]);

        assert_eq!(disambiguate_title("Fresh", &store), "Fresh");
        assert_eq!(disambiguate_title("Other", &store), "Other (1)");
        assert_eq!(disambiguate_title("Chapter 1 - Reader", &store), "Chapter 1 - Reader (2)");
    }

    #[test]
    fn test_disambiguate_fills_lowest_gap() {
        let store = store_with(&["T", "T (2)"]);
        assert_eq!(disambiguate_title("T", &store), "T (1)");
    }
}
