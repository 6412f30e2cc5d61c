/// Reusable UI components

use crate::dialog::CancelSource;
use crate::render::BlurState;
use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub open: bool,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
    pub close_label: String,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<CancelSource>,
}

/// Modal asking the user to confirm a gated action
#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    if !props.open {
        return html! {};
    }

    html! {
        <div class="dialog-backdrop">
            <div class="dialog" role="alertdialog" aria-modal="true">
                <button
                    type="button"
                    class="dialog-close"
                    aria-label={props.close_label.clone()}
                    onclick={props.on_cancel.reform(|_| CancelSource::CloseIcon)}
                >
                    {"×"}
                </button>
                <p class="dialog-message">{&props.message}</p>
                <div class="dialog-actions">
                    <Button
                        onclick={props.on_cancel.reform(|_| CancelSource::Button)}
                        variant={ButtonVariant::Secondary}
                    >
                        {&props.cancel_label}
                    </Button>
                    <Button
                        onclick={props.on_confirm.reform(|_| ())}
                        variant={ButtonVariant::Danger}
                    >
                        {&props.confirm_label}
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeDialogProps {
    pub message: String,
    pub dismiss_label: String,
    pub close_label: String,
    pub on_dismiss: Callback<()>,
}

/// Modal reporting a problem the user has to acknowledge
#[function_component(NoticeDialog)]
pub fn notice_dialog(props: &NoticeDialogProps) -> Html {
    html! {
        <div class="dialog-backdrop">
            <div class="dialog" role="alertdialog" aria-modal="true">
                <button
                    type="button"
                    class="dialog-close"
                    aria-label={props.close_label.clone()}
                    onclick={props.on_dismiss.reform(|_| ())}
                >
                    {"×"}
                </button>
                <p class="dialog-message">{&props.message}</p>
                <div class="dialog-actions">
                    <Button onclick={props.on_dismiss.reform(|_| ())} variant={ButtonVariant::Primary}>
                        {&props.dismiss_label}
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BlurIndicatorsProps {
    pub state: BlurState,
}

/// Gradients hinting that more entries are scrolled out of view
#[function_component(BlurIndicators)]
pub fn blur_indicators(props: &BlurIndicatorsProps) -> Html {
    html! {
        <>
            <div class={classes!("blur-edge", "blur-top", props.state.top.then_some("visible"))}></div>
            <div class={classes!("blur-edge", "blur-bottom", props.state.bottom.then_some("visible"))}></div>
        </>
    }
}
