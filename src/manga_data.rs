/// Data structures for Manga Tracker
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A tracked manga entry as stored in extension storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Manga {
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub read_chapters: u32,
    #[serde(default)]
    pub favorite: bool,
    pub day_added: DateTime<Utc>,
    pub last_read: DateTime<Utc>,
    /// Cleared once the cover failed to load and the placeholder took over
    #[serde(skip_serializing, default = "image_working_default")]
    pub is_image_working: bool,
}

fn image_working_default() -> bool {
    true
}

impl Manga {
    pub fn new(title: String, link: String, image: String, read_chapters: u32, favorite: bool, now: DateTime<Utc>) -> Manga {
        Manga {
            title,
            link,
            image,
            read_chapters,
            favorite,
            day_added: now,
            last_read: now,
            is_image_working: true,
        }
    }
}

/// Keep the records that decoded. Each failure is logged and skipped, so one
/// malformed entry in storage does not cost the rest of the list.
pub fn readable_records<E: Display>(decoded: impl IntoIterator<Item = Result<Manga, E>>) -> Vec<Manga> {
    decoded
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match record {
            Ok(manga) => Some(manga),
            Err(e) => {
                log::warn!("Skipping unreadable stored entry #{}: {}", index, e);
                None
            }
        })
        .collect()
}

/// Title and URL of the active browser tab
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TabInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

impl TabInfo {
    pub fn new(title: &str, url: &str) -> TabInfo {
        TabInfo {
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}
