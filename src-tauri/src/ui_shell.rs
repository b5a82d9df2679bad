use tauri::image::Image;
use tauri::{AppHandle, LogicalSize, Manager, Runtime, UserAttentionType, WindowEvent};
use tracing::{debug, warn};

use crate::{
    bridge,
    consts::MAIN_WINDOW_LABEL,
    diagnostics,
    error::{LockResultExt, ShellError, ShellResult},
    model::{AppState, ViewKind},
};

pub(crate) fn show_main_window<R: Runtime>(app: &AppHandle<R>) {
    if let Some(window) = app.get_window(MAIN_WINDOW_LABEL) {
        let _ = window.show();
        let _ = window.unminimize();
        let _ = window.set_focus();
    }
}

pub(crate) fn toggle_main_window<R: Runtime>(app: &AppHandle<R>) {
    if let Some(window) = app.get_window(MAIN_WINDOW_LABEL) {
        if window.is_visible().unwrap_or(false) {
            let _ = window.hide();
        } else {
            let _ = window.show();
            let _ = window.unminimize();
            let _ = window.set_focus();
        }
    }
}

pub(crate) fn flash_main_window_if_not_focused<R: Runtime>(app: &AppHandle<R>) {
    let Some(window) = app.get_window(MAIN_WINDOW_LABEL) else {
        return;
    };
    if window.is_focused().unwrap_or(false) {
        return;
    }
    if let Err(error) = window.request_user_attention(Some(UserAttentionType::Informational)) {
        debug!(%error, "attention request failed");
    }
}

pub(crate) fn switch_view(app: &AppHandle, view: ViewKind) -> ShellResult<bool> {
    let state = app.state::<AppState>();
    let changed = {
        let mut views = state.views.lock().map_lock_err("views")?;
        let manager = views.as_mut().ok_or(ShellError::WindowMissing)?;
        manager.switch_to(view)?
    };
    if changed {
        diagnostics::emit_shell_diagnostics(app);
    }
    Ok(changed)
}

/// Brings `view` forward and tells its page it regained focus.
pub(crate) fn focus_view(app: &AppHandle, view: ViewKind) {
    if let Err(error) = switch_view(app, view) {
        warn!(%view, %error, "failed to switch to notification source");
    }
    eval_in_view(app, view, bridge::focus_event_script());
}

pub(crate) fn focus_conversation(app: &AppHandle, index: usize) -> ShellResult<()> {
    show_main_window(app);
    switch_view(app, ViewKind::Messages)?;
    eval_in_view(app, ViewKind::Messages, &bridge::focus_conversation_script(index));
    Ok(())
}

pub(crate) fn eval_in_view(app: &AppHandle, view: ViewKind, script: &str) {
    let state = app.state::<AppState>();
    let Ok(views) = state.views.lock() else {
        return;
    };
    if let Some(manager) = views.as_ref() {
        if let Err(error) = manager.eval_in(view, script) {
            debug!(%view, %error, "script evaluation dropped");
        }
    }
}

pub(crate) fn handle_window_event(window: &tauri::Window, event: &WindowEvent) {
    if window.label() != MAIN_WINDOW_LABEL {
        return;
    }
    match event {
        WindowEvent::CloseRequested { api, .. } => {
            api.prevent_close();
            let _ = window.hide();
        }
        WindowEvent::Resized(size) => {
            let scale = window.scale_factor().unwrap_or(1.0);
            resize_views(window, size.to_logical(scale));
        }
        WindowEvent::ScaleFactorChanged {
            scale_factor,
            new_inner_size,
            ..
        } => {
            resize_views(window, new_inner_size.to_logical(*scale_factor));
        }
        _ => {}
    }
}

/// The size is read from the event before the views lock is taken.
fn resize_views(window: &tauri::Window, size: LogicalSize<f64>) {
    let state = window.app_handle().state::<AppState>();
    let Ok(mut views) = state.views.lock() else {
        return;
    };
    if let Some(manager) = views.as_mut() {
        if let Err(error) = manager.resize(size.width, size.height) {
            debug!(%error, "failed to update view bounds");
        }
    }
}

pub(crate) fn tray_icon_for_unread(unread: bool) -> Option<Image<'static>> {
    let bytes = if unread {
        include_bytes!("../icons/tray-unread.png").as_slice()
    } else {
        include_bytes!("../icons/tray-idle.png").as_slice()
    };
    Image::from_bytes(bytes).ok().map(|icon| icon.to_owned())
}
