/// In-memory manga list, the single source of truth during a popup session

use crate::manga_data::Manga;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("a manga titled \"{0}\" already exists")]
    DuplicateTitle(String),
    #[error("no manga titled \"{0}\"")]
    NotFound(String),
}

/// Direction of a chapter counter change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterStep {
    Increment,
    Decrement,
}

/// Partial update applied by `MangaStore::update`. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MangaPatch {
    pub title: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
    pub read_chapters: Option<u32>,
    pub favorite: Option<bool>,
    pub last_read: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MangaStore {
    mangas: Vec<Manga>,
}

impl MangaStore {
    pub fn new() -> Self {
        MangaStore { mangas: Vec::new() }
    }

    /// Rebuild from persisted records. Later duplicates of a title are dropped.
    pub fn from_records(records: Vec<Manga>) -> Self {
        let mut store = MangaStore::new();
        for manga in records {
            if let Err(e) = store.add(manga) {
                log::warn!("Skipping stored entry: {}", e);
            }
        }
        store
    }

    pub fn records(&self) -> &[Manga] {
        &self.mangas
    }

    pub fn into_records(self) -> Vec<Manga> {
        self.mangas
    }

    pub fn len(&self) -> usize {
        self.mangas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mangas.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.mangas.iter().map(|m| m.title.as_str())
    }

    pub fn contains(&self, title: &str) -> bool {
        self.find(title).is_some()
    }

    pub fn find(&self, title: &str) -> Option<&Manga> {
        self.mangas.iter().find(|m| m.title == title)
    }

    fn find_mut(&mut self, title: &str) -> Result<&mut Manga, StoreError> {
        self.mangas
            .iter_mut()
            .find(|m| m.title == title)
            .ok_or_else(|| StoreError::NotFound(title.to_string()))
    }

    pub fn add(&mut self, manga: Manga) -> Result<(), StoreError> {
        if self.contains(&manga.title) {
            return Err(StoreError::DuplicateTitle(manga.title));
        }
        self.mangas.push(manga);
        Ok(())
    }

    pub fn update(&mut self, title: &str, patch: MangaPatch) -> Result<&Manga, StoreError> {
        if let Some(new_title) = &patch.title {
            if new_title != title && self.contains(new_title) {
                return Err(StoreError::DuplicateTitle(new_title.clone()));
            }
        }

        let manga = self.find_mut(title)?;
        if let Some(new_title) = patch.title {
            manga.title = new_title;
        }
        if let Some(link) = patch.link {
            manga.link = link;
        }
        if let Some(image) = patch.image {
            if image != manga.image {
                manga.is_image_working = true;
            }
            manga.image = image;
        }
        if let Some(read_chapters) = patch.read_chapters {
            manga.read_chapters = read_chapters;
        }
        if let Some(favorite) = patch.favorite {
            manga.favorite = favorite;
        }
        if let Some(last_read) = patch.last_read {
            manga.last_read = last_read;
        }
        Ok(manga)
    }

    /// Remove every entry matching `predicate`, returning how many were dropped
    pub fn remove<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Manga) -> bool,
    {
        let original_len = self.mangas.len();
        self.mangas.retain(|m| !predicate(m));
        original_len - self.mangas.len()
    }

    pub fn remove_title(&mut self, title: &str) -> bool {
        self.remove(|m| m.title == title) > 0
    }

    pub fn toggle_favorite(&mut self, title: &str) -> Result<bool, StoreError> {
        let manga = self.find_mut(title)?;
        manga.favorite = !manga.favorite;
        Ok(manga.favorite)
    }

    /// Move the read-chapter counter by `amount`, clamping at zero
    pub fn update_chapters(&mut self, title: &str, step: ChapterStep, amount: u32, now: DateTime<Utc>) -> Result<u32, StoreError> {
        let manga = self.find_mut(title)?;
        manga.read_chapters = match step {
            ChapterStep::Increment => manga.read_chapters.saturating_add(amount),
            ChapterStep::Decrement => manga.read_chapters.saturating_sub(amount),
        };
        manga.last_read = now;
        Ok(manga.read_chapters)
    }

    /// Record a failed cover load. Returns `true` only for the first failure,
    /// so the placeholder swap happens at most once per entry.
    pub fn mark_image_broken(&mut self, title: &str) -> Result<bool, StoreError> {
        let manga = self.find_mut(title)?;
        let first_failure = manga.is_image_working;
        manga.is_image_working = false;
        Ok(first_failure)
    }

    pub fn set_link(&mut self, title: &str, link: String, now: DateTime<Utc>) -> Result<(), StoreError> {
        let manga = self.find_mut(title)?;
        manga.link = link;
        manga.last_read = now;
        Ok(())
    }
}
