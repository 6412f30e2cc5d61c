/// User preferences persisted next to the manga list

use crate::sorting::SortOrder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Cover shown when an entry's image fails to load
    pub fn placeholder_image(self) -> &'static str {
        match self {
            Theme::Light => "images/placeholder-light.svg",
            Theme::Dark => "images/placeholder-dark.svg",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Symbol on the theme switch: the theme a click switches to
    pub fn toggle_glyph(self) -> &'static str {
        match self {
            Theme::Light => "☾",
            Theme::Dark => "☀",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub sort_order: SortOrder,
    pub theme: Theme,
}
