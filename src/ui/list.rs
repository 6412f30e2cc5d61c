/// Manga list: batched rendering, cover fallback, scroll-edge blur and
/// delegated action clicks

use crate::actions::Action;
use crate::manga_data::Manga;
use crate::render::{
    BatchLoader, BlurState, RenderConfig, ScrollMetrics, chapter_label, cover_src, format_date, truncate_title,
};
use crate::settings::Theme;
use crate::ui::bridge;
use crate::ui::components::BlurIndicators;
use chrono::Local;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MangaListProps {
    /// Entries in display order
    pub mangas: Vec<Manga>,
    pub theme: Theme,
    /// Bumped by the parent whenever the list must be rebuilt from scratch
    pub generation: u32,
    pub empty_message: String,
    #[prop_or_default]
    pub config: RenderConfig,
    pub on_action: Callback<(Action, String)>,
    pub on_image_error: Callback<String>,
}

/// Keeps only the latest scheduled callback alive
#[derive(Default)]
struct Debouncer {
    pending: Option<Timeout>,
}

impl Debouncer {
    fn schedule<F: FnOnce() + 'static>(&mut self, millis: u32, callback: F) {
        // Dropping a Timeout cancels it
        self.pending = Some(Timeout::new(millis, callback));
    }
}

#[function_component(MangaList)]
pub fn manga_list(props: &MangaListProps) -> Html {
    let loaded = use_state(|| 0usize);
    let blur = use_state_eq(BlurState::default);
    let list_ref = use_node_ref();
    let rebuild_token = use_mut_ref(|| 0u32);
    let debouncer = use_mut_ref(Debouncer::default);
    let config = props.config;
    let total = props.mangas.len();

    // Full rebuild: clear, then append one batch per animation frame
    {
        let loaded = loaded.clone();
        let rebuild_token = rebuild_token.clone();
        use_effect_with((props.generation, total), move |deps| {
            let total = deps.1;
            let run = {
                let mut token = rebuild_token.borrow_mut();
                *token = token.wrapping_add(1);
                *token
            };
            loaded.set(0);
            load_next_batch(BatchLoader::new(total, config.batch_size), loaded, rebuild_token, run);
            || ()
        });
    }

    // Re-measure once more entries are in the DOM
    {
        let list_ref = list_ref.clone();
        let blur = blur.clone();
        use_effect_with(*loaded, move |_| {
            if let Some(metrics) = measure(&list_ref) {
                blur.set(BlurState::compute(metrics, total, &config));
            }
            || ()
        });
    }

    let onscroll = {
        let list_ref = list_ref.clone();
        let blur = blur.clone();
        let debouncer = debouncer.clone();
        Callback::from(move |_: Event| {
            let list_ref = list_ref.clone();
            let blur = blur.clone();
            debouncer.borrow_mut().schedule(config.debounce_ms, move || {
                if let Some(metrics) = measure(&list_ref) {
                    blur.set(BlurState::compute(metrics, total, &config));
                }
            });
        })
    };

    let onclick = {
        let on_action = props.on_action.clone();
        Callback::from(move |e: MouseEvent| {
            if let Some(target) = e.target_dyn_into::<Element>() {
                if let Some((action, title)) = resolve_action(&target) {
                    on_action.emit((action, title));
                }
            }
        })
    };

    if props.mangas.is_empty() {
        return html! {
            <div class="empty-state">
                <p>{&props.empty_message}</p>
            </div>
        };
    }

    html! {
        <div class="list-container">
            <BlurIndicators state={*blur} />
            <ul class="manga-list" ref={list_ref} onscroll={onscroll} onclick={onclick}>
                {for props.mangas.iter().take(*loaded).map(|manga| {
                    render_item(manga, props.theme, &config, &props.on_image_error)
                })}
            </ul>
        </div>
    }
}

fn render_item(manga: &Manga, theme: Theme, config: &RenderConfig, on_image_error: &Callback<String>) -> Html {
    let onerror = {
        let title = manga.title.clone();
        on_image_error.reform(move |_: Event| title.clone())
    };
    let short_title = truncate_title(&manga.title, config.title_max_chars);

    html! {
        <li
            key={manga.title.clone()}
            class={classes!("manga-item", manga.favorite.then_some("favorite"))}
            data-title={manga.title.clone()}
        >
            <img class="manga-cover" src={cover_src(manga, theme)} alt="" loading="lazy" onerror={onerror} />
            <div class="manga-info">
                if manga.link.is_empty() {
                    <span class="manga-title" title={manga.title.clone()}>{short_title}</span>
                } else {
                    <a class="manga-title" href={manga.link.clone()} target="_blank" title={manga.title.clone()}>
                        {short_title}
                    </a>
                }
                <span class="manga-last-read">{format_date(&manga.last_read.with_timezone(&Local))}</span>
            </div>
            <div class="manga-chapters">
                {action_button(Action::RemoveChapter, false)}
                <span class="chapter-label">{chapter_label(manga.read_chapters)}</span>
                {action_button(Action::AddChapter, false)}
            </div>
            <div class="manga-actions">
                {action_button(Action::Favorite, manga.favorite)}
                {action_button(Action::Edit, false)}
                {action_button(Action::Delete, false)}
            </div>
        </li>
    }
}

fn action_button(action: Action, active: bool) -> Html {
    let label = bridge::translate(action.label_key());
    html! {
        <button
            type="button"
            class={classes!("icon-button", active.then_some("active"))}
            data-action={action.id()}
            aria-label={label.clone()}
            title={label}
        >
            <span class="icon" aria-hidden="true">{action.glyph(active)}</span>
        </button>
    }
}

/// Find the action control that was clicked (possibly via its icon) and the
/// title of the list item owning it
fn resolve_action(target: &Element) -> Option<(Action, String)> {
    let control = target.closest("[data-action]").ok().flatten()?;
    let action = Action::from_id(&control.get_attribute("data-action")?)?;
    let item = control.closest("li[data-title]").ok().flatten()?;
    Some((action, item.get_attribute("data-title")?))
}

fn measure(list_ref: &NodeRef) -> Option<ScrollMetrics> {
    let element = list_ref.cast::<Element>()?;
    Some(ScrollMetrics {
        scroll_top: element.scroll_top() as f64,
        scroll_height: element.scroll_height() as f64,
        client_height: element.client_height() as f64,
    })
}

/// Append the next batch, then yield to the browser before the following one.
/// A newer rebuild bumps `token`, which turns older continuations into no-ops.
fn load_next_batch(mut loader: BatchLoader, loaded: UseStateHandle<usize>, token: Rc<RefCell<u32>>, run: u32) {
    if *token.borrow() != run {
        return;
    }
    let Some(batch) = loader.next() else {
        return;
    };

    log::trace!("Rendering entries {:?}", batch);
    loaded.set(batch.end);

    if !loader.is_done() {
        request_frame(move || load_next_batch(loader, loaded, token, run));
    }
}

fn request_frame<F: FnOnce() + 'static>(callback: F) {
    let Some(window) = web_sys::window() else {
        log::error!("No window to schedule rendering on");
        return;
    };

    let callback = Closure::once_into_js(callback);
    if let Err(e) = window.request_animation_frame(callback.unchecked_ref::<js_sys::Function>()) {
        log::error!("requestAnimationFrame failed: {:?}", e);
    }
}
