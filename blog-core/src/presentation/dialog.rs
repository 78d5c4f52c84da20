//! The single modal of the board.
//!
//! A dialog is a tagged variant: the action set and the bound confirm action
//! are derived from the variant, so replacing the dialog replaces them too.

use tracing::debug;

use crate::domain::post::PostId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Confirm,
    Success,
    Error,
}

impl DialogMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogMode::Confirm => "confirm",
            DialogMode::Success => "success",
            DialogMode::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Cancel,
    Confirm,
    Acknowledge,
}

impl DialogAction {
    pub fn label(&self) -> &'static str {
        match self {
            DialogAction::Cancel => "Cancel",
            DialogAction::Confirm => "Delete",
            DialogAction::Acknowledge => "OK",
        }
    }
}

/// Ways of closing a dialog without pressing one of its buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    EscapeKey,
    OverlayClick,
}

/// Work carried by a confirm dialog and run only when it is confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundAction {
    DeletePost { id: PostId, title: String },
}

const CONFIRM_ACTIONS: [DialogAction; 2] = [DialogAction::Cancel, DialogAction::Confirm];
const NOTICE_ACTIONS: [DialogAction; 1] = [DialogAction::Acknowledge];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Dialog {
    #[default]
    Closed,
    Confirm {
        title: String,
        message: String,
        on_confirm: BoundAction,
    },
    Success {
        title: String,
        message: String,
    },
    Error {
        title: String,
        message: String,
    },
}

impl Dialog {
    pub fn confirm(
        title: impl Into<String>,
        message: impl Into<String>,
        on_confirm: BoundAction,
    ) -> Self {
        Dialog::Confirm {
            title: title.into(),
            message: message.into(),
            on_confirm,
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Dialog::Success {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Dialog::Error {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::Closed)
    }

    pub fn mode(&self) -> Option<DialogMode> {
        match self {
            Dialog::Closed => None,
            Dialog::Confirm { .. } => Some(DialogMode::Confirm),
            Dialog::Success { .. } => Some(DialogMode::Success),
            Dialog::Error { .. } => Some(DialogMode::Error),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Dialog::Closed => None,
            Dialog::Confirm { title, .. }
            | Dialog::Success { title, .. }
            | Dialog::Error { title, .. } => Some(title),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Dialog::Closed => None,
            Dialog::Confirm { message, .. }
            | Dialog::Success { message, .. }
            | Dialog::Error { message, .. } => Some(message),
        }
    }

    pub fn actions(&self) -> &'static [DialogAction] {
        match self {
            Dialog::Closed => &[],
            Dialog::Confirm { .. } => &CONFIRM_ACTIONS,
            Dialog::Success { .. } | Dialog::Error { .. } => &NOTICE_ACTIONS,
        }
    }

    /// The negative action, run by escape and overlay clicks.
    pub fn default_action(&self) -> Option<DialogAction> {
        match self {
            Dialog::Closed => None,
            Dialog::Confirm { .. } => Some(DialogAction::Cancel),
            Dialog::Success { .. } | Dialog::Error { .. } => Some(DialogAction::Acknowledge),
        }
    }
}

/// What invoking a dialog action led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// The action is not offered by the current dialog; nothing changed.
    Ignored,
    /// The dialog closed without side effects.
    Closed,
    /// The dialog closed and handed back its bound action for the caller to run.
    Confirmed(BoundAction),
}

#[derive(Debug, Default)]
pub struct DialogController {
    current: Dialog,
}

impl DialogController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Dialog {
        &self.current
    }

    pub fn is_open(&self) -> bool {
        self.current.is_open()
    }

    /// Shows `dialog`, replacing whatever was open. Last request wins.
    pub fn open(&mut self, dialog: Dialog) -> &Dialog {
        if let Some(previous) = self.current.mode() {
            debug!(replaced = previous.as_str(), "dialog replaced");
        }
        self.current = dialog;
        &self.current
    }

    pub fn close(&mut self) {
        self.current = Dialog::Closed;
    }

    pub fn invoke(&mut self, action: DialogAction) -> Invocation {
        if !self.current.actions().contains(&action) {
            debug!(?action, "dialog action not offered, ignoring");
            return Invocation::Ignored;
        }

        match (action, std::mem::take(&mut self.current)) {
            (DialogAction::Confirm, Dialog::Confirm { on_confirm, .. }) => {
                Invocation::Confirmed(on_confirm)
            }
            _ => Invocation::Closed,
        }
    }

    /// Escape and overlay clicks go through [`invoke`](Self::invoke) with the
    /// dialog's default action, exactly like pressing that button.
    pub fn dismiss(&mut self, how: Dismissal) -> Invocation {
        match self.current.default_action() {
            Some(action) => {
                debug!(?how, ?action, "dialog dismissed");
                self.invoke(action)
            }
            None => Invocation::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delete_confirm(id: PostId) -> Dialog {
        Dialog::confirm(
            "Delete post",
            "Are you sure?",
            BoundAction::DeletePost {
                id,
                title: "Title".to_string(),
            },
        )
    }

    #[test]
    fn starts_closed_without_actions() {
        let controller = DialogController::new();

        assert!(!controller.is_open());
        assert!(controller.current().actions().is_empty());
        assert_eq!(controller.current().mode(), None);
    }

    #[test]
    fn confirm_offers_cancel_and_confirm() {
        let mut controller = DialogController::new();
        controller.open(delete_confirm(1));

        assert_eq!(controller.current().mode(), Some(DialogMode::Confirm));
        assert_eq!(
            controller.current().actions(),
            &[DialogAction::Cancel, DialogAction::Confirm]
        );
    }

    #[test]
    fn notices_offer_only_acknowledge() {
        let mut controller = DialogController::new();

        controller.open(Dialog::success("Done", "ok"));
        assert_eq!(controller.current().actions(), &[DialogAction::Acknowledge]);

        controller.open(Dialog::error("Oops", "bad"));
        assert_eq!(controller.current().actions(), &[DialogAction::Acknowledge]);
    }

    #[test]
    fn cancel_closes_without_bound_action() {
        let mut controller = DialogController::new();
        controller.open(delete_confirm(1));

        assert_eq!(controller.invoke(DialogAction::Cancel), Invocation::Closed);
        assert!(!controller.is_open());
    }

    #[test]
    fn confirm_hands_back_bound_action_and_closes() {
        let mut controller = DialogController::new();
        controller.open(delete_confirm(5));

        let invocation = controller.invoke(DialogAction::Confirm);
        assert_eq!(
            invocation,
            Invocation::Confirmed(BoundAction::DeletePost {
                id: 5,
                title: "Title".to_string()
            })
        );
        assert!(!controller.is_open());
    }

    #[test]
    fn escape_and_overlay_match_cancel_on_confirm() {
        for how in [Dismissal::EscapeKey, Dismissal::OverlayClick] {
            let mut controller = DialogController::new();
            controller.open(delete_confirm(1));

            assert_eq!(controller.dismiss(how), Invocation::Closed);
            assert!(!controller.is_open());
        }
    }

    #[test]
    fn escape_acknowledges_notices() {
        let mut controller = DialogController::new();
        controller.open(Dialog::error("Oops", "bad"));

        assert_eq!(controller.dismiss(Dismissal::EscapeKey), Invocation::Closed);
        assert!(!controller.is_open());
    }

    #[test]
    fn dismiss_while_closed_is_ignored() {
        let mut controller = DialogController::new();

        assert_eq!(controller.dismiss(Dismissal::OverlayClick), Invocation::Ignored);
    }

    #[test]
    fn stale_confirm_never_fires_after_replacement() {
        let mut controller = DialogController::new();
        controller.open(delete_confirm(1));
        controller.open(Dialog::success("Saved", "ok"));

        assert_eq!(controller.invoke(DialogAction::Confirm), Invocation::Ignored);
        assert_eq!(controller.current().mode(), Some(DialogMode::Success));
    }

    #[test]
    fn replacing_confirm_binds_only_the_latest_action() {
        let mut controller = DialogController::new();
        controller.open(delete_confirm(1));
        controller.open(delete_confirm(2));

        match controller.invoke(DialogAction::Confirm) {
            Invocation::Confirmed(BoundAction::DeletePost { id, .. }) => assert_eq!(id, 2),
            other => panic!("expected confirmed delete, got {other:?}"),
        }
    }

    #[test]
    fn close_drops_bound_action() {
        let mut controller = DialogController::new();
        controller.open(delete_confirm(1));
        controller.close();

        assert_eq!(controller.invoke(DialogAction::Confirm), Invocation::Ignored);
        assert_eq!(controller.current(), &Dialog::Closed);
    }
}
