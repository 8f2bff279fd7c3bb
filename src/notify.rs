//! User-facing toast notifications.
//!
//! Workflow actions (publish, unpublish) produce a [`Toast`] describing what
//! happened. Toasts are data — an embedding application can render them in
//! its own UI, or use [`print_toast`] for a colored terminal line.

use colored::Colorize;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

/// A one-line, user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
}

impl Toast {
    /// Build an informational toast.
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            title: title.into(),
        }
    }

    /// Build an error toast.
    pub fn error(title: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            title: title.into(),
        }
    }
}

impl std::fmt::Display for Toast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Print a toast to stdout with severity coloring.
pub fn print_toast(toast: &Toast) {
    match toast.kind {
        ToastKind::Info => println!("{}", toast.title.cyan()),
        ToastKind::Error => println!("{}", toast.title.red()),
    }
}
