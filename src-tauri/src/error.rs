//! Error type shared by the shell's commands and host plumbing.
//!
//! Serializes as its display string so commands can hand it straight back
//! over Tauri IPC.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum ShellError {
    #[error("Main window is not available")]
    WindowMissing,

    #[error("Unknown view: {0}")]
    UnknownView(String),

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Invalid webhook URL: {0}")]
    InvalidWebhookUrl(String),

    #[error("Webhook request failed: {0}")]
    Webhook(#[from] reqwest::Error),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tauri error: {0}")]
    Tauri(#[from] tauri::Error),

    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },
}

impl Serialize for ShellError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub(crate) type ShellResult<T> = Result<T, ShellError>;

pub(crate) trait LockResultExt<T> {
    fn map_lock_err(self, context: &str) -> ShellResult<T>;
}

impl<T> LockResultExt<T> for Result<T, std::sync::PoisonError<T>> {
    fn map_lock_err(self, context: &str) -> ShellResult<T> {
        self.map_err(|_| ShellError::LockPoisoned {
            context: context.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_message() {
        let json = serde_json::to_string(&ShellError::UnknownView("mail".into())).unwrap();
        assert_eq!(json, "\"Unknown view: mail\"");
    }

    #[test]
    fn io_errors_convert() {
        let err: ShellError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, ShellError::Io(_)));
    }

    #[test]
    fn poisoned_lock_keeps_context() {
        use std::sync::Mutex;

        let mutex = Mutex::new(0);
        let _ = std::panic::catch_unwind(|| {
            let _guard = mutex.lock().unwrap();
            panic!("poison");
        });

        match mutex.lock().map_lock_err("views") {
            Err(ShellError::LockPoisoned { context }) => assert_eq!(context, "views"),
            other => panic!("unexpected: {other:?}"),
        };
    }
}
