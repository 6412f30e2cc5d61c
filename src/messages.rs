/// Translation keys for user-facing text

use crate::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    TitleRequired,
    TitleNotUnique,
    ConfirmDelete,
    ConfirmReload,
    EmptyList,
    AddManga,
    EditManga,
    Save,
    Cancel,
    Confirm,
    Dismiss,
    Close,
    FieldImage,
    FieldTitle,
    FieldLink,
    FieldReadChapters,
    FieldFavorite,
    TrackedCount,
    SortLastRead,
    SortAlphabetical,
    SortDayAdded,
    SortChapters,
    SortFavorites,
    ToggleFavorite,
    DeleteManga,
    EditEntry,
    AddChapter,
    RemoveChapter,
    ToggleTheme,
}

impl MessageKey {
    pub const ALL: [MessageKey; 29] = [
        MessageKey::TitleRequired,
        MessageKey::TitleNotUnique,
        MessageKey::ConfirmDelete,
        MessageKey::ConfirmReload,
        MessageKey::EmptyList,
        MessageKey::AddManga,
        MessageKey::EditManga,
        MessageKey::Save,
        MessageKey::Cancel,
        MessageKey::Confirm,
        MessageKey::Dismiss,
        MessageKey::Close,
        MessageKey::FieldImage,
        MessageKey::FieldTitle,
        MessageKey::FieldLink,
        MessageKey::FieldReadChapters,
        MessageKey::FieldFavorite,
        MessageKey::TrackedCount,
        MessageKey::SortLastRead,
        MessageKey::SortAlphabetical,
        MessageKey::SortDayAdded,
        MessageKey::SortChapters,
        MessageKey::SortFavorites,
        MessageKey::ToggleFavorite,
        MessageKey::DeleteManga,
        MessageKey::EditEntry,
        MessageKey::AddChapter,
        MessageKey::RemoveChapter,
        MessageKey::ToggleTheme,
    ];

    /// Key looked up in the extension's `_locales` message files
    pub fn key(self) -> &'static str {
        match self {
            MessageKey::TitleRequired => "titleRequired",
            MessageKey::TitleNotUnique => "titleNotUnique",
            MessageKey::ConfirmDelete => "confirmDelete",
            MessageKey::ConfirmReload => "confirmReload",
            MessageKey::EmptyList => "emptyList",
            MessageKey::AddManga => "addManga",
            MessageKey::EditManga => "editManga",
            MessageKey::Save => "save",
            MessageKey::Cancel => "cancel",
            MessageKey::Confirm => "confirm",
            MessageKey::Dismiss => "dismiss",
            MessageKey::Close => "close",
            MessageKey::FieldImage => "fieldImage",
            MessageKey::FieldTitle => "fieldTitle",
            MessageKey::FieldLink => "fieldLink",
            MessageKey::FieldReadChapters => "fieldReadChapters",
            MessageKey::FieldFavorite => "fieldFavorite",
            MessageKey::TrackedCount => "trackedCount",
            MessageKey::SortLastRead => "sortLastRead",
            MessageKey::SortAlphabetical => "sortAlphabetical",
            MessageKey::SortDayAdded => "sortDayAdded",
            MessageKey::SortChapters => "sortChapters",
            MessageKey::SortFavorites => "sortFavorites",
            MessageKey::ToggleFavorite => "toggleFavorite",
            MessageKey::DeleteManga => "deleteManga",
            MessageKey::EditEntry => "editEntry",
            MessageKey::AddChapter => "addChapter",
            MessageKey::RemoveChapter => "removeChapter",
            MessageKey::ToggleTheme => "toggleTheme",
        }
    }

    pub fn fallback(self) -> &'static str {
        match self {
            MessageKey::TitleRequired => "Please enter a title.",
            MessageKey::TitleNotUnique => "A manga with this title is already in your list.",
            MessageKey::ConfirmDelete => "Remove this manga from your list?",
            MessageKey::ConfirmReload => "Nothing changed. Replace the saved link with the current tab?",
            MessageKey::EmptyList => "No manga tracked yet.",
            MessageKey::AddManga => "Add manga",
            MessageKey::EditManga => "Edit manga",
            MessageKey::Save => "Save",
            MessageKey::Cancel => "Cancel",
            MessageKey::Confirm => "Confirm",
            MessageKey::Dismiss => "OK",
            MessageKey::Close => "Close",
            MessageKey::FieldImage => "Image",
            MessageKey::FieldTitle => "Title",
            MessageKey::FieldLink => "Link",
            MessageKey::FieldReadChapters => "Read chapters",
            MessageKey::FieldFavorite => "Favorite",
            MessageKey::TrackedCount => "manga tracked",
            MessageKey::SortLastRead => "Last read",
            MessageKey::SortAlphabetical => "Alphabetical",
            MessageKey::SortDayAdded => "Date added",
            MessageKey::SortChapters => "Most chapters",
            MessageKey::SortFavorites => "Favorites only",
            MessageKey::ToggleFavorite => "Toggle favorite",
            MessageKey::DeleteManga => "Delete",
            MessageKey::EditEntry => "Edit",
            MessageKey::AddChapter => "Add a chapter",
            MessageKey::RemoveChapter => "Remove a chapter",
            MessageKey::ToggleTheme => "Switch theme",
        }
    }
}

impl From<ValidationError> for MessageKey {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::TitleRequired => MessageKey::TitleRequired,
            ValidationError::TitleNotUnique => MessageKey::TitleNotUnique,
        }
    }
}

/// Use `translated` unless the lookup came back empty
pub fn or_fallback(key: MessageKey, translated: String) -> String {
    if translated.trim().is_empty() {
        key.fallback().to_string()
    } else {
        translated
    }
}

/// Footer line, e.g. "12 manga tracked"
pub fn tracked_count(count: usize, translated: &str) -> String {
    format!("{} {}", count, translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_validation_errors_map_to_keys() {
        assert_eq!(MessageKey::from(ValidationError::TitleRequired).key(), "titleRequired");
        assert_eq!(MessageKey::from(ValidationError::TitleNotUnique).key(), "titleNotUnique");
    }

    #[test]
    fn test_or_fallback() {
        assert_eq!(or_fallback(MessageKey::Save, String::new()), "Save");
        assert_eq!(or_fallback(MessageKey::Save, "Guardar".to_string()), "Guardar");
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<&str> = MessageKey::ALL.iter().map(|k| k.key()).collect();
        assert_eq!(keys.len(), MessageKey::ALL.len());
    }

    #[test]
    fn test_every_key_has_an_english_message() {
        let messages: serde_json::Value =
            serde_json::from_str(include_str!("../_locales/en/messages.json")).unwrap();

        for key in MessageKey::ALL {
            assert_eq!(
                messages[key.key()]["message"].as_str(),
                Some(key.fallback()),
                "message for {}",
                key.key()
            );
        }
    }

    #[test]
    fn test_tracked_count() {
        assert_eq!(tracked_count(3, MessageKey::TrackedCount.fallback()), "3 manga tracked");
    }
}
