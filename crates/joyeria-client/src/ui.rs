//! Hooks through which the cart client talks to whatever front end hosts it.

use crate::error::{CartError, ErrorKind};
use crate::view::CartView;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

/// A transient, non-blocking notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }

    /// The toast shown for a failed operation.
    pub fn for_error(err: &CartError) -> Self {
        match err.kind() {
            ErrorKind::Busy => Self::info(err.user_message()),
            _ => Self::error(err.user_message()),
        }
    }
}

/// Asks the shopper to confirm a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Shows toasts.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Draws the cart after every reload.
pub trait CartRenderer: Send + Sync {
    fn render(&self, view: &CartView);
}

/// Answers every confirmation with a fixed value.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Default for AutoConfirm {
    fn default() -> Self {
        AutoConfirm(true)
    }
}

impl Confirm for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Drops toasts after logging them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: Toast) {
        tracing::debug!(level = ?toast.level, message = %toast.message, "toast");
    }
}

/// Renders nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRender;

impl CartRenderer for NoRender {
    fn render(&self, _view: &CartView) {}
}
