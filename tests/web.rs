//! Browser-only checks, run with `wasm-pack test --headless --chrome`
#![cfg(target_arch = "wasm32")]

use chrono::Utc;
use js_sys::{Array, Promise};
use manga_tracker::actions::{Action, Dispatch, dispatch};
use manga_tracker::manga_data::{Manga, readable_records};
use manga_tracker::render::RenderConfig;
use manga_tracker::settings::Theme;
use manga_tracker::store::MangaStore;
use manga_tracker::ui::list::{MangaList, MangaListProps};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Element, MutationObserver, MutationObserverInit, MutationRecord};
use yew::{AppHandle, Callback};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn clock_is_available_in_browser() {
    let now = Utc::now();
    assert!(now.timestamp() > 1_600_000_000);
}

#[wasm_bindgen_test]
fn chapter_update_uses_browser_clock() {
    let before = Utc::now();
    let mut store = MangaStore::new();
    store
        .add(Manga::new("A".to_string(), String::new(), String::new(), 5, false, before))
        .unwrap();

    let outcome = dispatch(&mut store, Action::RemoveChapter, "A", Utc::now());

    assert_eq!(outcome, Dispatch::Changed);
    let manga = store.find("A").unwrap();
    assert_eq!(manga.read_chapters, 4);
    assert!(manga.last_read >= before);
}

#[wasm_bindgen_test]
fn stored_list_crosses_the_js_boundary() {
    let mut store = MangaStore::new();
    store
        .add(Manga::new("Mushishi".to_string(), String::new(), String::new(), 3, true, Utc::now()))
        .unwrap();

    let value = serde_wasm_bindgen::to_value(store.records()).unwrap();
    let restored: Vec<Manga> = serde_wasm_bindgen::from_value(value).unwrap();

    assert_eq!(restored[0].title, "Mushishi");
    assert_eq!(restored[0].read_chapters, 3);
    assert!(restored[0].favorite);
}

#[wasm_bindgen_test]
fn malformed_stored_entry_keeps_the_rest() {
    let stored = js_sys::JSON::parse(
        r#"[
            {"title": "Kept", "dayAdded": "2024-10-28T10:30:00Z", "lastRead": "2024-10-28T11:30:00Z"},
            {"title": "No last read", "dayAdded": "2024-10-28T10:30:00Z"},
            {"title": "Also kept", "dayAdded": "2024-10-28T10:30:00Z", "lastRead": "2024-10-28T11:30:00Z"}
        ]"#,
    )
    .unwrap();

    let mangas = readable_records(Array::from(&stored).iter().map(serde_wasm_bindgen::from_value::<Manga>));

    let titles: Vec<&str> = mangas.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Kept", "Also kept"]);
}

fn numbered_mangas(count: usize) -> Vec<Manga> {
    (1..=count)
        .map(|i| Manga::new(format!("Manga {}", i), String::new(), String::new(), i as u32, false, Utc::now()))
        .collect()
}

fn list_props(mangas: Vec<Manga>, generation: u32, config: RenderConfig) -> MangaListProps {
    MangaListProps {
        mangas,
        theme: Theme::Light,
        generation,
        empty_message: "empty".to_string(),
        config,
        on_action: Callback::from(|_| ()),
        on_image_error: Callback::from(|_| ()),
    }
}

fn host() -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let root = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&root).unwrap();
    root
}

fn mount(root: &Element, props: MangaListProps) -> AppHandle<MangaList> {
    yew::Renderer::<MangaList>::with_root_and_props(root.clone(), props).render()
}

async fn next_frame() {
    let frame = Promise::new(&mut |resolve, _reject| {
        web_sys::window().unwrap().request_animation_frame(&resolve).unwrap();
    });
    JsFuture::from(frame).await.unwrap();
}

fn rendered_titles(root: &Element) -> Vec<String> {
    let items = root.query_selector_all("li.manga-item").unwrap();
    (0..items.length())
        .filter_map(|i| items.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .filter_map(|item| item.get_attribute("data-title"))
        .collect()
}

/// Records how many list items each DOM update appended
struct AppendLog {
    batches: Rc<RefCell<Vec<usize>>>,
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(Array, MutationObserver)>,
}

impl AppendLog {
    fn watch(root: &Element) -> AppendLog {
        let batches = Rc::new(RefCell::new(Vec::new()));
        let sink = batches.clone();
        let callback = Closure::<dyn FnMut(Array, MutationObserver)>::new(move |records: Array, _: MutationObserver| {
            let appended: usize = records
                .iter()
                .map(|record| {
                    let added = record.unchecked_into::<MutationRecord>().added_nodes();
                    (0..added.length())
                        .filter_map(|i| added.item(i))
                        .filter(|node| node.node_name() == "LI")
                        .count()
                })
                .sum();
            if appended > 0 {
                sink.borrow_mut().push(appended);
            }
        });

        let observer = MutationObserver::new(callback.as_ref().unchecked_ref()).unwrap();
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer.observe_with_options(root, &options).unwrap();

        AppendLog {
            batches,
            observer,
            _callback: callback,
        }
    }

    fn stop(self) -> Vec<usize> {
        self.observer.disconnect();
        self.batches.take()
    }
}

#[wasm_bindgen_test]
async fn list_appends_one_batch_per_frame() {
    let mangas = numbered_mangas(7);
    let expected: Vec<String> = mangas.iter().map(|m| m.title.clone()).collect();
    let root = host();
    let appends = AppendLog::watch(&root);

    let app = mount(&root, list_props(mangas, 0, RenderConfig::default()));
    for _ in 0..20 {
        next_frame().await;
        if rendered_titles(&root).len() == expected.len() {
            break;
        }
    }
    // One more frame so a stray extra batch would show up
    next_frame().await;

    assert_eq!(appends.stop(), vec![3, 3, 1]);
    assert_eq!(rendered_titles(&root), expected);

    let controls = root.query_selector_all("button[data-action]").unwrap();
    assert_eq!(controls.length(), 7 * 5);
    for control in (0..controls.length()).filter_map(|i| controls.item(i)) {
        let control = control.dyn_into::<Element>().unwrap();
        assert!(!control.text_content().unwrap_or_default().trim().is_empty());
        assert!(!control.get_attribute("aria-label").unwrap_or_default().is_empty());
    }
    app.destroy();
    root.remove();
}

#[wasm_bindgen_test]
async fn rebuild_mid_load_drops_the_older_run() {
    let mangas = numbered_mangas(7);
    let expected: Vec<String> = mangas.iter().map(|m| m.title.clone()).collect();
    let one_per_frame = RenderConfig {
        batch_size: 1,
        ..RenderConfig::default()
    };
    let root = host();

    let mut app = mount(&root, list_props(mangas.clone(), 0, one_per_frame));
    let mut partial = 0;
    for _ in 0..20 {
        next_frame().await;
        partial = rendered_titles(&root).len();
        if partial >= 2 {
            break;
        }
    }
    assert!((2..7).contains(&partial), "list should be half loaded, got {}", partial);

    // The new run fills the list in one batch; the older run still has a
    // frame callback queued that would cut it back to `partial + 1` items
    let all_at_once = RenderConfig {
        batch_size: 7,
        ..RenderConfig::default()
    };
    app.update(list_props(mangas, 1, all_at_once));

    for _ in 0..5 {
        next_frame().await;
        assert_eq!(rendered_titles(&root), expected);
    }
    app.destroy();
    root.remove();
}

#[wasm_bindgen_test]
async fn rebuild_with_shorter_list_shows_only_new_entries() {
    let root = host();
    let slow = RenderConfig {
        batch_size: 1,
        ..RenderConfig::default()
    };

    let mut app = mount(&root, list_props(numbered_mangas(7), 0, slow));
    next_frame().await;
    next_frame().await;

    // Shorter list under a new generation: restart with default batches
    let appends = AppendLog::watch(&root);
    let shorter = numbered_mangas(5);
    let expected: Vec<String> = shorter.iter().map(|m| m.title.clone()).collect();
    app.update(list_props(shorter, 1, RenderConfig::default()));
    for _ in 0..20 {
        next_frame().await;
        if rendered_titles(&root).len() == expected.len() {
            break;
        }
    }
    next_frame().await;
    next_frame().await;

    assert_eq!(rendered_titles(&root), expected);
    // Never more items than the new list has, whatever the old run queued
    assert!(appends.stop().iter().sum::<usize>() <= expected.len());
    app.destroy();
    root.remove();
}
