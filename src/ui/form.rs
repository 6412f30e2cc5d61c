/// Add/edit form view

use crate::form::FormFields;
use crate::messages::MessageKey;
use crate::ui::bridge;
use patternfly_yew::prelude::*;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MangaFormProps {
    pub fields: FormFields,
    pub heading: String,
    pub busy: bool,
    pub submit_label: String,
    pub cancel_label: String,
    pub on_change: Callback<FormFields>,
    pub on_submit: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(MangaForm)]
pub fn manga_form(props: &MangaFormProps) -> Html {
    // Builds an input handler that writes the typed value into one field
    let text_input = |apply: fn(&mut FormFields, String)| {
        let fields = props.fields.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut fields = fields.clone();
                apply(&mut fields, input.value());
                on_change.emit(fields);
            }
        })
    };

    let on_favorite = {
        let fields = props.fields.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut fields = fields.clone();
                fields.favorite = input.checked();
                on_change.emit(fields);
            }
        })
    };

    // Submission goes through the save button only
    let onsubmit = Callback::from(|e: SubmitEvent| e.prevent_default());

    html! {
        <form class="manga-form" onsubmit={onsubmit}>
            <h2 class="form-title">{&props.heading}</h2>

            <label class="form-field">
                <span>{bridge::translate(MessageKey::FieldImage)}</span>
                <input
                    type="url"
                    value={props.fields.image.clone()}
                    oninput={text_input(|f, v| f.image = v)}
                />
            </label>
            <label class="form-field">
                <span>{bridge::translate(MessageKey::FieldTitle)}</span>
                <input
                    type="text"
                    value={props.fields.title.clone()}
                    oninput={text_input(|f, v| f.title = v)}
                />
            </label>
            <label class="form-field">
                <span>{bridge::translate(MessageKey::FieldLink)}</span>
                <input
                    type="url"
                    value={props.fields.link.clone()}
                    oninput={text_input(|f, v| f.link = v)}
                />
            </label>
            <label class="form-field">
                <span>{bridge::translate(MessageKey::FieldReadChapters)}</span>
                <input
                    type="number"
                    min="0"
                    value={props.fields.read_chapters.clone()}
                    oninput={text_input(|f, v| f.read_chapters = v)}
                />
            </label>
            <label class="form-field form-field-inline">
                <input type="checkbox" checked={props.fields.favorite} onchange={on_favorite} />
                <span>{bridge::translate(MessageKey::FieldFavorite)}</span>
            </label>

            if props.busy {
                <div class="loading-text-center">
                    <Spinner />
                </div>
            }

            <div class="form-actions">
                <Button
                    onclick={props.on_cancel.reform(|_| ())}
                    variant={ButtonVariant::Secondary}
                    disabled={props.busy}
                >
                    {&props.cancel_label}
                </Button>
                <Button
                    onclick={props.on_submit.reform(|_| ())}
                    variant={ButtonVariant::Primary}
                    disabled={props.busy}
                >
                    {&props.submit_label}
                </Button>
            </div>
        </form>
    }
}
