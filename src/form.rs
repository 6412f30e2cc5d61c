/// Add/edit form state machine

use crate::dialog::PendingConfirm;
use crate::manga_data::{Manga, TabInfo};
use crate::store::{MangaPatch, MangaStore, StoreError};
use crate::validation::{ValidationError, coerce_chapters, disambiguate_title, validate};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { original_title: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Closed,
    Open(FormMode),
    Submitting(FormMode),
}

/// Raw field values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub image: String,
    pub title: String,
    pub link: String,
    pub read_chapters: String,
    pub favorite: bool,
}

impl FormFields {
    pub fn from_manga(manga: &Manga) -> FormFields {
        FormFields {
            image: manga.image.clone(),
            title: manga.title.clone(),
            link: manga.link.clone(),
            read_chapters: manga.read_chapters.to_string(),
            favorite: manga.favorite,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Entry stored under this title
    Saved(String),
    /// Form stays open; the error is reported to the user
    Invalid(ValidationError),
    /// Nothing but possibly the link changed; ask before replacing the link
    ConfirmReload(PendingConfirm),
    /// The entry being edited no longer exists
    NotFound,
    /// Submit while the form was closed
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormController {
    state: FormState,
    pub fields: FormFields,
}

impl FormController {
    pub fn new() -> Self {
        FormController::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, FormState::Closed)
    }

    pub fn is_editing(&self) -> bool {
        matches!(
            self.state,
            FormState::Open(FormMode::Edit { .. }) | FormState::Submitting(FormMode::Edit { .. })
        )
    }

    pub fn open_create(&mut self) {
        self.fields = FormFields::default();
        self.state = FormState::Open(FormMode::Create);
    }

    pub fn open_edit(&mut self, manga: &Manga) {
        self.fields = FormFields::from_manga(manga);
        self.state = FormState::Open(FormMode::Edit {
            original_title: manga.title.clone(),
        });
    }

    pub fn close(&mut self) {
        self.state = FormState::Closed;
        self.fields = FormFields::default();
    }

    /// Lock the form while the active tab is being queried.
    /// Returns `false` if there is nothing to submit.
    pub fn begin_submit(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            FormState::Open(mode) | FormState::Submitting(mode) => {
                self.state = FormState::Submitting(mode);
                true
            }
            FormState::Closed => false,
        }
    }

    /// Validate and apply the form against `store`. `tab` fills empty title
    /// and link fields.
    pub fn submit(&mut self, store: &mut MangaStore, tab: &TabInfo, now: DateTime<Utc>) -> SubmitOutcome {
        let mode = match &self.state {
            FormState::Open(mode) | FormState::Submitting(mode) => mode.clone(),
            FormState::Closed => return SubmitOutcome::Ignored,
        };

        let original_title = match &mode {
            FormMode::Create => None,
            FormMode::Edit { original_title } => Some(original_title.as_str()),
        };
        let fields = self.filled_fields(store, tab, original_title);

        if let Err(e) = validate(&fields.title, store, original_title) {
            self.fields.title = fields.title;
            self.state = FormState::Open(mode);
            return SubmitOutcome::Invalid(e);
        }

        let outcome = match original_title {
            None => create(store, fields, now),
            Some(original_title) => edit(store, original_title, fields, tab, now),
        };

        match &outcome {
            SubmitOutcome::Invalid(_) => self.state = FormState::Open(mode),
            _ => self.close(),
        }
        outcome
    }

    fn filled_fields(&self, store: &MangaStore, tab: &TabInfo, original_title: Option<&str>) -> FormFields {
        let mut fields = self.fields.clone();
        fields.title = fields.title.trim().to_string();
        fields.link = fields.link.trim().to_string();

        if fields.title.is_empty() {
            let tab_title = tab.title.trim();
            fields.title = if Some(tab_title) == original_title {
                tab_title.to_string()
            } else {
                disambiguate_title(tab_title, store)
            };
        }
        if fields.link.is_empty() {
            fields.link = tab.url.clone();
        }
        fields
    }
}

fn create(store: &mut MangaStore, fields: FormFields, now: DateTime<Utc>) -> SubmitOutcome {
    let manga = Manga::new(
        fields.title,
        fields.link,
        fields.image.trim().to_string(),
        coerce_chapters(&fields.read_chapters),
        fields.favorite,
        now,
    );
    let title = manga.title.clone();

    match store.add(manga) {
        Ok(()) => {
            log::info!("Added manga \"{}\"", title);
            SubmitOutcome::Saved(title)
        }
        Err(_) => SubmitOutcome::Invalid(ValidationError::TitleNotUnique),
    }
}

fn edit(store: &mut MangaStore, original_title: &str, fields: FormFields, tab: &TabInfo, now: DateTime<Utc>) -> SubmitOutcome {
    let Some(current) = store.find(original_title) else {
        log::warn!("Manga \"{}\" vanished while being edited", original_title);
        return SubmitOutcome::NotFound;
    };

    let image = fields.image.trim().to_string();
    let read_chapters = coerce_chapters(&fields.read_chapters);

    let unchanged = fields.title == current.title
        && image == current.image
        && read_chapters == current.read_chapters
        && fields.favorite == current.favorite;
    if unchanged {
        let link = if tab.url.is_empty() { fields.link } else { tab.url.clone() };
        return SubmitOutcome::ConfirmReload(PendingConfirm::ReloadLink {
            title: original_title.to_string(),
            link,
        });
    }

    let patch = MangaPatch {
        title: Some(fields.title),
        link: Some(fields.link),
        image: Some(image),
        read_chapters: Some(read_chapters),
        favorite: Some(fields.favorite),
        last_read: Some(now),
    };
    match store.update(original_title, patch) {
        Ok(manga) => {
            log::info!("Updated manga \"{}\"", manga.title);
            SubmitOutcome::Saved(manga.title.clone())
        }
        Err(StoreError::DuplicateTitle(_)) => SubmitOutcome::Invalid(ValidationError::TitleNotUnique),
        Err(StoreError::NotFound(_)) => SubmitOutcome::NotFound,
    }
}
