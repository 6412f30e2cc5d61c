/// List item actions and their dispatch table

use crate::dialog::PendingConfirm;
use crate::manga_data::Manga;
use crate::messages::MessageKey;
use crate::store::{ChapterStep, MangaStore};
use chrono::{DateTime, Utc};

/// Controls rendered on every list item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Favorite,
    Delete,
    Edit,
    AddChapter,
    RemoveChapter,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Favorite,
        Action::Delete,
        Action::Edit,
        Action::AddChapter,
        Action::RemoveChapter,
    ];

    /// Element identifier carried by the control in the DOM
    pub fn id(self) -> &'static str {
        match self {
            Action::Favorite => "favorite",
            Action::Delete => "delete",
            Action::Edit => "edit",
            Action::AddChapter => "addCap",
            Action::RemoveChapter => "removeCap",
        }
    }

    pub fn from_id(id: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|action| action.id() == id)
    }

    /// Visible symbol of the control. `active` only matters for the favorite star.
    pub fn glyph(self, active: bool) -> &'static str {
        match self {
            Action::Favorite if active => "★",
            Action::Favorite => "☆",
            Action::Delete => "🗑",
            Action::Edit => "✎",
            Action::AddChapter => "+",
            Action::RemoveChapter => "−",
        }
    }

    /// Accessible name of the control
    pub fn label_key(self) -> MessageKey {
        match self {
            Action::Favorite => MessageKey::ToggleFavorite,
            Action::Delete => MessageKey::DeleteManga,
            Action::Edit => MessageKey::EditEntry,
            Action::AddChapter => MessageKey::AddChapter,
            Action::RemoveChapter => MessageKey::RemoveChapter,
        }
    }
}

/// What the UI has to do after an action ran
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Store changed: persist and redraw
    Changed,
    /// Ask before running the action
    Confirm(PendingConfirm),
    OpenEdit(Manga),
    Ignored,
}

/// Run `action` against the entry titled `title`
pub fn dispatch(store: &mut MangaStore, action: Action, title: &str, now: DateTime<Utc>) -> Dispatch {
    let result = match action {
        Action::Favorite => store.toggle_favorite(title).map(|_| Dispatch::Changed),
        Action::AddChapter => store
            .update_chapters(title, ChapterStep::Increment, 1, now)
            .map(|_| Dispatch::Changed),
        Action::RemoveChapter => store
            .update_chapters(title, ChapterStep::Decrement, 1, now)
            .map(|_| Dispatch::Changed),
        Action::Delete => {
            return if store.contains(title) {
                Dispatch::Confirm(PendingConfirm::Delete { title: title.to_string() })
            } else {
                log::warn!("Delete requested for unknown manga \"{}\"", title);
                Dispatch::Ignored
            };
        }
        Action::Edit => {
            return match store.find(title) {
                Some(manga) => Dispatch::OpenEdit(manga.clone()),
                None => {
                    log::warn!("Edit requested for unknown manga \"{}\"", title);
                    Dispatch::Ignored
                }
            };
        }
    };

    result.unwrap_or_else(|e| {
        log::warn!("{:?} ignored: {}", action, e);
        Dispatch::Ignored
    })
}

/// Dispatch from a raw element identifier; unknown identifiers do nothing
pub fn dispatch_id(store: &mut MangaStore, id: &str, title: &str, now: DateTime<Utc>) -> Dispatch {
    match Action::from_id(id) {
        Some(action) => dispatch(store, action, title, now),
        None => Dispatch::Ignored,
    }
}

/// Apply an action the user confirmed in a dialog
pub fn apply_confirmed(store: &mut MangaStore, confirmed: PendingConfirm, now: DateTime<Utc>) -> Dispatch {
    match confirmed {
        PendingConfirm::Delete { title } => {
            if store.remove_title(&title) {
                Dispatch::Changed
            } else {
                log::warn!("Manga \"{}\" vanished before deletion", title);
                Dispatch::Ignored
            }
        }
        PendingConfirm::ReloadLink { title, link } => match store.set_link(&title, link, now) {
            Ok(()) => Dispatch::Changed,
            Err(e) => {
                log::warn!("Link reload ignored: {}", e);
                Dispatch::Ignored
            }
        },
    }
}
