/// Popup UI for Manga Tracker extension

use crate::actions::{Action, Dispatch, apply_confirmed, dispatch};
use crate::dialog::{CancelSource, DialogController, PendingConfirm};
use crate::form::{FormController, FormFields, SubmitOutcome};
use crate::messages::{MessageKey, tracked_count};
use crate::settings::Settings;
use crate::sorting::{SortOrder, visible};
use crate::store::MangaStore;
use crate::ui::bridge;
use crate::ui::components::{ConfirmDialog, NoticeDialog};
use crate::ui::form::MangaForm;
use crate::ui::list::MangaList;
use chrono::Utc;
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum AppState {
    Loading,
    Idle,
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Loading);
    let store = use_state(MangaStore::new);
    let settings = use_state(Settings::default);
    let form = use_state(FormController::new);
    let dialog = use_state(DialogController::new);
    let generation = use_state(|| 0u32);

    // Load list and settings on mount
    {
        let state = state.clone();
        let store = store.clone();
        let settings = settings.clone();
        let generation = generation.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let records = bridge::load_mangas().await;
                settings.set(bridge::load_settings().await);
                let loaded = MangaStore::from_records(records);
                log::info!("Loaded {} manga", loaded.len());
                store.set(loaded);
                generation.set(*generation + 1);
                state.set(AppState::Idle);
            });
            || ()
        });
    }

    // List item clicks
    let on_action = {
        let store = store.clone();
        let form = form.clone();
        let dialog = dialog.clone();

        Callback::from(move |(action, title): (Action, String)| {
            let mut new_store = (*store).clone();
            match dispatch(&mut new_store, action, &title, Utc::now()) {
                Dispatch::Changed => commit(&store, new_store),
                Dispatch::Confirm(pending) => {
                    let mut new_dialog = (*dialog).clone();
                    new_dialog.open(pending);
                    dialog.set(new_dialog);
                }
                Dispatch::OpenEdit(manga) => {
                    let mut controller = (*form).clone();
                    controller.open_edit(&manga);
                    form.set(controller);
                }
                Dispatch::Ignored => {}
            }
        })
    };

    // Broken cover: swap in the placeholder once
    let on_image_error = {
        let store = store.clone();

        Callback::from(move |title: String| {
            let mut new_store = (*store).clone();
            match new_store.mark_image_broken(&title) {
                Ok(true) => store.set(new_store),
                Ok(false) => {}
                Err(e) => log::warn!("Image error for unknown entry: {}", e),
            }
        })
    };

    let on_open_create = {
        let form = form.clone();

        Callback::from(move |_| {
            let mut controller = (*form).clone();
            controller.open_create();
            form.set(controller);
        })
    };

    let on_form_change = {
        let form = form.clone();

        Callback::from(move |fields: FormFields| {
            let mut controller = (*form).clone();
            controller.fields = fields;
            form.set(controller);
        })
    };

    let on_form_cancel = {
        let form = form.clone();

        Callback::from(move |_| {
            let mut controller = (*form).clone();
            controller.close();
            form.set(controller);
        })
    };

    let on_form_submit = {
        let store = store.clone();
        let form = form.clone();
        let dialog = dialog.clone();
        let generation = generation.clone();

        Callback::from(move |_| {
            let mut controller = (*form).clone();
            if !controller.begin_submit() {
                return;
            }
            form.set(controller.clone());

            let store = store.clone();
            let form = form.clone();
            let dialog = dialog.clone();
            let generation = generation.clone();

            spawn_local(async move {
                let tab = bridge::active_tab().await;
                let mut new_store = (*store).clone();
                let outcome = controller.submit(&mut new_store, &tab, Utc::now());
                form.set(controller);

                match outcome {
                    SubmitOutcome::Saved(title) => {
                        log::debug!("Form saved \"{}\"", title);
                        commit(&store, new_store);
                        generation.set(*generation + 1);
                    }
                    SubmitOutcome::Invalid(e) => {
                        log::debug!("Form rejected: {}", e);
                        let mut new_dialog = (*dialog).clone();
                        new_dialog.notify(e.into());
                        dialog.set(new_dialog);
                    }
                    SubmitOutcome::ConfirmReload(pending) => {
                        let mut new_dialog = (*dialog).clone();
                        new_dialog.open(pending);
                        dialog.set(new_dialog);
                    }
                    SubmitOutcome::NotFound | SubmitOutcome::Ignored => {}
                }
            });
        })
    };

    let on_dialog_confirm = {
        let store = store.clone();
        let dialog = dialog.clone();
        let generation = generation.clone();

        Callback::from(move |_| {
            let mut new_dialog = (*dialog).clone();
            let confirmed = new_dialog.confirm();
            dialog.set(new_dialog);

            if let Some(confirmed) = confirmed {
                let mut new_store = (*store).clone();
                if apply_confirmed(&mut new_store, confirmed, Utc::now()) == Dispatch::Changed {
                    commit(&store, new_store);
                    generation.set(*generation + 1);
                }
            }
        })
    };

    let on_dialog_cancel = {
        let dialog = dialog.clone();

        Callback::from(move |source: CancelSource| {
            let mut new_dialog = (*dialog).clone();
            new_dialog.cancel(source);
            dialog.set(new_dialog);
        })
    };

    let on_notice_dismiss = {
        let dialog = dialog.clone();

        Callback::from(move |_| {
            let mut new_dialog = (*dialog).clone();
            new_dialog.dismiss_notice();
            dialog.set(new_dialog);
        })
    };

    let on_sort_change = {
        let settings = settings.clone();
        let generation = generation.clone();

        Callback::from(move |e: Event| {
            let Some(select) = e.target_dyn_into::<HtmlSelectElement>() else {
                return;
            };
            let Some(sort_order) = SortOrder::from_value(&select.value()) else {
                log::warn!("Unknown sort option {}", select.value());
                return;
            };

            let new_settings = Settings {
                sort_order,
                ..(*settings).clone()
            };
            settings.set(new_settings.clone());
            generation.set(*generation + 1);
            spawn_local(async move {
                bridge::save_settings(&new_settings).await;
            });
        })
    };

    let on_theme_toggle = {
        let settings = settings.clone();

        Callback::from(move |_| {
            let new_settings = Settings {
                theme: settings.theme.toggled(),
                ..(*settings).clone()
            };
            settings.set(new_settings.clone());
            spawn_local(async move {
                bridge::save_settings(&new_settings).await;
            });
        })
    };

    let shown: Vec<_> = visible(store.records(), settings.sort_order)
        .into_iter()
        .cloned()
        .collect();
    let is_busy = !matches!(*state, AppState::Idle);

    let dialog_message = match dialog.pending() {
        Some(PendingConfirm::Delete { .. }) => bridge::translate(MessageKey::ConfirmDelete),
        Some(PendingConfirm::ReloadLink { .. }) => bridge::translate(MessageKey::ConfirmReload),
        None => String::new(),
    };
    let toggle_theme_label = bridge::translate(MessageKey::ToggleTheme);

    html! {
        <div class={classes!("padding-20", settings.theme.class())}>
            <div class="header">
                <h1 class="popup-title">{"Manga Tracker"}</h1>
                <button
                    type="button"
                    class="icon-button"
                    aria-label={toggle_theme_label.clone()}
                    title={toggle_theme_label}
                    onclick={on_theme_toggle}
                >
                    <span class="icon" aria-hidden="true">{settings.theme.toggle_glyph()}</span>
                </button>
            </div>

            if form.is_open() {
                <MangaForm
                    fields={form.fields.clone()}
                    heading={bridge::translate(if form.is_editing() { MessageKey::EditManga } else { MessageKey::AddManga })}
                    busy={matches!(form.state(), crate::form::FormState::Submitting(_))}
                    submit_label={bridge::translate(MessageKey::Save)}
                    cancel_label={bridge::translate(MessageKey::Cancel)}
                    on_change={on_form_change}
                    on_submit={on_form_submit}
                    on_cancel={on_form_cancel}
                />
            } else {
                <div class="toolbar">
                    <select class="sort-select" onchange={on_sort_change} disabled={is_busy}>
                        {for SortOrder::ALL.iter().map(|order| html! {
                            <option value={order.value()} selected={*order == settings.sort_order}>
                                {bridge::translate(order.label_key())}
                            </option>
                        })}
                    </select>
                    <Button onclick={on_open_create} disabled={is_busy} variant={ButtonVariant::Primary}>
                        {bridge::translate(MessageKey::AddManga)}
                    </Button>
                </div>

                if is_busy {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                } else {
                    <MangaList
                        mangas={shown}
                        theme={settings.theme}
                        generation={*generation}
                        empty_message={bridge::translate(MessageKey::EmptyList)}
                        on_action={on_action}
                        on_image_error={on_image_error}
                    />
                }
            }

            <ConfirmDialog
                open={dialog.is_open()}
                message={dialog_message}
                confirm_label={bridge::translate(MessageKey::Confirm)}
                cancel_label={bridge::translate(MessageKey::Cancel)}
                close_label={bridge::translate(MessageKey::Close)}
                on_confirm={on_dialog_confirm}
                on_cancel={on_dialog_cancel}
            />

            if let Some(notice) = dialog.notice() {
                <NoticeDialog
                    message={bridge::translate(notice)}
                    dismiss_label={bridge::translate(MessageKey::Dismiss)}
                    close_label={bridge::translate(MessageKey::Close)}
                    on_dismiss={on_notice_dismiss}
                />
            }

            <p class="footer-popup">
                {tracked_count(store.len(), &bridge::translate(MessageKey::TrackedCount))}
            </p>
        </div>
    }
}

/// Publish the new list to the view and flush it to storage.
/// A failed write is logged by the bridge; memory state is kept either way.
fn commit(store: &UseStateHandle<MangaStore>, new_store: MangaStore) {
    let records = new_store.records().to_vec();
    store.set(new_store);
    spawn_local(async move {
        bridge::save_mangas(&records).await;
    });
}
