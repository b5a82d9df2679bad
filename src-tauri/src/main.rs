#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod bridge;
mod consts;
mod diagnostics;
mod error;
mod model;
mod notifications;
mod settings;
mod support;
mod surface;
mod tray;
mod ui_shell;
mod unread;
mod views;
mod webhook;

use std::sync::atomic::AtomicU64;

use tauri::{AppHandle, Manager, Webview};
use tracing::{info, warn};

use crate::{
    consts::{MAIN_WINDOW_LABEL, MAIN_WINDOW_TITLE},
    diagnostics::ShellDiagnostics,
    error::{LockResultExt, ShellError, ShellResult},
    model::{AppState, NotificationRequest},
    settings::{read_settings, SettingsResponse, SettingsUpdate},
    support::{app_icon_base64, init_logging, restrict_file_permissions, settings_file},
    surface::TauriSurfaceHost,
    unread::UnreadReport,
    views::{ShellUrls, ViewManager},
};

/// Monotonic counter for generating unique temp file suffixes.
static FILE_SUFFIX_COUNTER: AtomicU64 = AtomicU64::new(0);

#[tauri::command]
fn show_main_window(app: AppHandle) {
    ui_shell::show_main_window(&app);
}

#[tauri::command]
fn flash_main_window_if_not_focused(app: AppHandle) {
    ui_shell::flash_main_window_if_not_focused(&app);
}

#[tauri::command]
fn should_hide_notification_content(app: AppHandle) -> bool {
    settings::should_hide_notification_content(&app)
}

#[tauri::command]
fn get_icon() -> &'static str {
    app_icon_base64()
}

#[tauri::command]
fn switch_view(app: AppHandle, view: String) -> ShellResult<bool> {
    ui_shell::switch_view(&app, view.parse()?)
}

#[tauri::command]
fn set_chat_unread_status(app: AppHandle, report: UnreadReport) {
    unread::set_chat_unread(&app, report.has_unread());
}

#[tauri::command]
fn show_notification(
    app: AppHandle,
    webview: Webview,
    request: NotificationRequest,
) -> ShellResult<()> {
    let source = {
        let state = app.state::<AppState>();
        let views = state.views.lock().map_lock_err("views")?;
        let manager = views.as_ref().ok_or(ShellError::WindowMissing)?;
        manager
            .view_for_label(webview.label())
            .ok_or_else(|| ShellError::UnknownView(webview.label().to_string()))?
    };
    notifications::show_notification(&app, source, request);
    Ok(())
}

#[tauri::command]
fn set_recent_conversations(app: AppHandle, titles: Vec<String>) -> ShellResult<()> {
    tray::set_recent_conversations(&app, titles)
}

#[tauri::command]
fn focus_conversation(app: AppHandle, index: usize) -> ShellResult<()> {
    ui_shell::focus_conversation(&app, index)
}

#[tauri::command]
fn send_chat_message(app: AppHandle, text: String) -> ShellResult<()> {
    webhook::send_chat_message(&app, text)
}

#[tauri::command]
fn load_settings(app: AppHandle) -> ShellResult<SettingsResponse> {
    settings::load_settings(&app)
}

#[tauri::command]
fn save_settings(app: AppHandle, update: SettingsUpdate) -> ShellResult<SettingsResponse> {
    let saved = settings::save_settings(&app, update)?;
    tray::apply_hide_content_to_tray(&app, saved.hide_notification_content);
    diagnostics::emit_shell_diagnostics(&app);
    Ok(saved.into())
}

#[tauri::command]
fn get_shell_diagnostics(app: AppHandle) -> ShellResult<ShellDiagnostics> {
    diagnostics::snapshot_shell(&app)
}

fn main() {
    init_logging();
    info!(pid = std::process::id(), "messages-shell starting");

    tauri::Builder::default()
        .manage(AppState::new())
        .invoke_handler(tauri::generate_handler![
            show_main_window,
            flash_main_window_if_not_focused,
            should_hide_notification_content,
            get_icon,
            switch_view,
            set_chat_unread_status,
            show_notification,
            set_recent_conversations,
            focus_conversation,
            send_chat_message,
            load_settings,
            save_settings,
            get_shell_diagnostics
        ])
        .setup(|app| {
            let settings_path = settings_file(app.handle())?;
            restrict_file_permissions(&settings_path);
            let startup_settings = read_settings(app.handle()).unwrap_or_else(|error| {
                warn!(%error, "startup settings unreadable, using defaults");
                Default::default()
            });

            tauri::window::WindowBuilder::new(app, MAIN_WINDOW_LABEL)
                .title(MAIN_WINDOW_TITLE)
                .inner_size(1100.0, 800.0)
                .min_inner_size(480.0, 360.0)
                .visible(!startup_settings.start_minimized_to_tray)
                .build()?;

            let manager = ViewManager::new(
                TauriSurfaceHost::new(app.handle().clone()),
                ShellUrls::defaults()?,
                startup_settings.default_view,
            )?;
            {
                let state = app.state::<AppState>();
                let mut views = state.views.lock().map_lock_err("views")?;
                *views = Some(manager);
            }

            tray::create_tray(app.handle())?;
            if !startup_settings.start_minimized_to_tray {
                ui_shell::show_main_window(app.handle());
            }
            info!(view = %startup_settings.default_view, "setup complete");
            Ok(())
        })
        .on_window_event(ui_shell::handle_window_event)
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
