/// Confirmation dialogs gating destructive or conflicting actions, and the
/// modal notice used to report rejected input

use crate::messages::MessageKey;

/// Action waiting for the user's confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirm {
    Delete { title: String },
    ReloadLink { title: String, link: String },
}

/// How a dialog was dismissed without confirming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelSource {
    Button,
    CloseIcon,
}

/// Holds at most one pending action. Confirming or cancelling consumes it,
/// so a handler can never fire twice for one opening.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogController {
    pending: Option<PendingConfirm>,
    notice: Option<MessageKey>,
}

impl DialogController {
    pub fn new() -> Self {
        DialogController {
            pending: None,
            notice: None,
        }
    }

    /// Show an informational modal; it only needs acknowledging
    pub fn notify(&mut self, message: MessageKey) {
        self.notice = Some(message);
    }

    pub fn notice(&self) -> Option<MessageKey> {
        self.notice
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn open(&mut self, action: PendingConfirm) {
        if let Some(previous) = self.pending.replace(action) {
            log::debug!("Replacing unanswered dialog for {:?}", previous);
        }
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingConfirm> {
        self.pending.as_ref()
    }

    /// Hide the dialog and hand back the gated action, if any
    pub fn confirm(&mut self) -> Option<PendingConfirm> {
        self.pending.take()
    }

    pub fn cancel(&mut self, source: CancelSource) {
        if let Some(action) = self.pending.take() {
            log::debug!("Dialog for {:?} dismissed via {:?}", action, source);
        }
    }
}
