use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager};
use tracing::debug;

use crate::{
    consts::EVENT_SHELL_DIAGNOSTICS,
    error::{LockResultExt, ShellError, ShellResult},
    model::{AppState, SurfacePrivilege, ViewKind},
    settings::read_settings,
    views::ChatAuthState,
};

#[derive(Debug, Serialize, Clone, PartialEq)]
pub(crate) struct ShellDiagnostics {
    pub(crate) current_view: ViewKind,
    pub(crate) chat_authenticated: bool,
    pub(crate) chat_privilege: SurfacePrivilege,
    pub(crate) messages_attached: bool,
    pub(crate) chat_attached: bool,
    pub(crate) chat_unread: bool,
    pub(crate) hide_notification_content: bool,
    pub(crate) webhook_configured: bool,
}

pub(crate) fn snapshot_shell(app: &AppHandle) -> ShellResult<ShellDiagnostics> {
    let state = app.state::<AppState>();
    let chat_unread = *state.chat_unread.lock().map_lock_err("chat_unread")?;
    let settings = read_settings(app).unwrap_or_default();

    let views = state.views.lock().map_lock_err("views")?;
    let manager = views.as_ref().ok_or(ShellError::WindowMissing)?;

    Ok(ShellDiagnostics {
        current_view: manager.current(),
        chat_authenticated: manager.chat_auth() == ChatAuthState::Authenticated,
        chat_privilege: manager.privilege(ViewKind::Chat),
        messages_attached: manager.is_attached(ViewKind::Messages),
        chat_attached: manager.is_attached(ViewKind::Chat),
        chat_unread,
        hide_notification_content: settings.hide_notification_content,
        webhook_configured: settings.webhook_url.is_some(),
    })
}

pub(crate) fn emit_shell_diagnostics(app: &AppHandle) {
    match snapshot_shell(app) {
        Ok(diag) => {
            let _ = app.emit(EVENT_SHELL_DIAGNOSTICS, diag);
        }
        Err(error) => {
            debug!(%error, "failed to snapshot shell");
        }
    }
}
