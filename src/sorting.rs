/// Sort and filter options for the manga list

use crate::manga_data::Manga;
use crate::messages::MessageKey;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Most recently read first
    #[default]
    LastRead,
    Alphabetical,
    /// Most recently added first
    DayAdded,
    /// Highest chapter count first
    Chapters,
    /// Only favorites, most recently read first
    Favorites,
}

impl SortOrder {
    pub const ALL: [SortOrder; 5] = [
        SortOrder::LastRead,
        SortOrder::Alphabetical,
        SortOrder::DayAdded,
        SortOrder::Chapters,
        SortOrder::Favorites,
    ];

    /// Value used by the `<select>` options
    pub fn value(self) -> &'static str {
        match self {
            SortOrder::LastRead => "lastRead",
            SortOrder::Alphabetical => "alphabetical",
            SortOrder::DayAdded => "dayAdded",
            SortOrder::Chapters => "chapters",
            SortOrder::Favorites => "favorites",
        }
    }

    pub fn from_value(value: &str) -> Option<SortOrder> {
        SortOrder::ALL.into_iter().find(|order| order.value() == value)
    }

    /// Text shown for the option
    pub fn label_key(self) -> MessageKey {
        match self {
            SortOrder::LastRead => MessageKey::SortLastRead,
            SortOrder::Alphabetical => MessageKey::SortAlphabetical,
            SortOrder::DayAdded => MessageKey::SortDayAdded,
            SortOrder::Chapters => MessageKey::SortChapters,
            SortOrder::Favorites => MessageKey::SortFavorites,
        }
    }
}

/// Entries to display for `order`, in display order
pub fn visible(records: &[Manga], order: SortOrder) -> Vec<&Manga> {
    let mut shown: Vec<&Manga> = records
        .iter()
        .filter(|m| order != SortOrder::Favorites || m.favorite)
        .collect();

    match order {
        SortOrder::LastRead | SortOrder::Favorites => {
            shown.sort_by(|a, b| b.last_read.cmp(&a.last_read));
        }
        SortOrder::Alphabetical => {
            shown.sort_by(|a, b| {
                a.title
                    .to_lowercase()
                    .cmp(&b.title.to_lowercase())
                    .then_with(|| a.title.cmp(&b.title))
            });
        }
        SortOrder::DayAdded => {
            shown.sort_by(|a, b| b.day_added.cmp(&a.day_added));
        }
        SortOrder::Chapters => {
            shown.sort_by(|a, b| b.read_chapters.cmp(&a.read_chapters));
        }
    }

    shown
}
