//! Collaborators the state manager drives but does not own.

use serde::Serialize;
use std::rc::Rc;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// Options for a single toast notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastOptions {
    pub title: String,
    pub message: String,
    /// Whether the toast shows a close control.
    pub dismissible: bool,
    pub timeout_ms: u64,
    pub theme: String,
}

/// Shows toast notifications.
pub trait Notifier {
    fn notify(&self, severity: Severity, options: ToastOptions);
}

/// Performs client-side route transitions.
pub trait Navigator {
    fn navigate(&self, route: &str);
}

impl<N: Notifier + ?Sized> Notifier for Rc<N> {
    fn notify(&self, severity: Severity, options: ToastOptions) {
        (**self).notify(severity, options)
    }
}

impl<N: Navigator + ?Sized> Navigator for Rc<N> {
    fn navigate(&self, route: &str) {
        (**self).navigate(route)
    }
}
