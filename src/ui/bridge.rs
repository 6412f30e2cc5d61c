/// Storage, tab and translation access through the extension's JS bridge.
///
/// Every wrapper swallows failures: errors are logged and the caller gets an
/// empty or default value so the popup keeps working with degraded data.

use crate::manga_data::{Manga, TabInfo, readable_records};
use crate::messages::{MessageKey, or_fallback};
use crate::settings::Settings;
use js_sys::Array;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::prelude::*;

const MANGA_LIST_KEY: &str = "mangaList";
const SETTINGS_KEY: &str = "settings";

#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = translate)]
    fn translateKey(key: &str) -> Result<String, JsValue>;
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("browser API call failed: {0}")]
    Js(String),
    #[error("unexpected data shape: {0}")]
    Decode(#[from] serde_wasm_bindgen::Error),
}

impl From<JsValue> for BridgeError {
    fn from(value: JsValue) -> Self {
        BridgeError::Js(format!("{:?}", value))
    }
}

async fn get_value<T: DeserializeOwned>(key: &str) -> Result<Option<T>, BridgeError> {
    let value_js = getStorage(key).await?;

    if value_js.is_null() || value_js.is_undefined() {
        Ok(None)
    } else {
        Ok(Some(serde_wasm_bindgen::from_value(value_js)?))
    }
}

async fn set_value<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<(), BridgeError> {
    let value_js = serde_wasm_bindgen::to_value(value)?;
    setStorage(key, value_js).await?;
    Ok(())
}

/// Records are decoded one at a time; malformed entries are dropped with a
/// warning instead of emptying the whole list.
pub async fn load_mangas() -> Vec<Manga> {
    let list_js = match getStorage(MANGA_LIST_KEY).await {
        Ok(list_js) => list_js,
        Err(e) => {
            log::error!("Failed to load manga list: {}", BridgeError::from(e));
            return Vec::new();
        }
    };

    if list_js.is_null() || list_js.is_undefined() {
        return Vec::new();
    }
    if !Array::is_array(&list_js) {
        log::error!("Stored manga list is not an array, ignoring it");
        return Vec::new();
    }

    readable_records(Array::from(&list_js).iter().map(serde_wasm_bindgen::from_value::<Manga>))
}

/// Last write wins; a failed write leaves the in-memory list as it is.
pub async fn save_mangas(mangas: &[Manga]) {
    match set_value(MANGA_LIST_KEY, mangas).await {
        Ok(()) => log::debug!("Saved {} manga", mangas.len()),
        Err(e) => log::error!("Failed to save manga list: {}", e),
    }
}

pub async fn load_settings() -> Settings {
    match get_value::<Settings>(SETTINGS_KEY).await {
        Ok(settings) => settings.unwrap_or_default(),
        Err(e) => {
            log::error!("Failed to load settings: {}", e);
            Settings::default()
        }
    }
}

pub async fn save_settings(settings: &Settings) {
    if let Err(e) = set_value(SETTINGS_KEY, settings).await {
        log::error!("Failed to save settings: {}", e);
    }
}

/// Active tab, or empty title and URL when none is available
pub async fn active_tab() -> TabInfo {
    let result = match getActiveTab().await {
        Ok(tab_js) => serde_wasm_bindgen::from_value::<TabInfo>(tab_js).map_err(BridgeError::from),
        Err(e) => Err(BridgeError::from(e)),
    };

    result.unwrap_or_else(|e| {
        log::error!("Failed to query active tab: {}", e);
        TabInfo::default()
    })
}

pub fn translate(key: MessageKey) -> String {
    let translated = translateKey(key.key()).unwrap_or_else(|e| {
        log::warn!("Translation lookup for {} failed: {:?}", key.key(), e);
        String::new()
    });
    or_fallback(key, translated)
}
