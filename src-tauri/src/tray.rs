use tauri::menu::{
    CheckMenuItem, IsMenuItem, Menu, MenuEvent, MenuItem, PredefinedMenuItem, Submenu,
};
use tauri::tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};
use tauri::{AppHandle, Manager, Wry};
use tracing::{debug, info, warn};

use crate::{
    consts::{MAX_RECENT_CONVERSATIONS, RECENT_TITLE_MAX_CHARS, TRAY_ID},
    diagnostics,
    error::{LockResultExt, ShellResult},
    model::{AppState, TrayMenuState, ViewKind},
    settings::{read_settings, save_settings, SettingsUpdate},
    support::truncate_message,
    ui_shell,
};

const RECENT_ITEM_PREFIX: &str = "recent_";
const UNTITLED_CONVERSATION: &str = "(Untitled conversation)";

pub(crate) fn status_label(unread: bool) -> &'static str {
    if unread {
        "Chat: Unread messages"
    } else {
        "Chat: No unread messages"
    }
}

fn tooltip(unread: bool) -> &'static str {
    if unread {
        "Messages (unread chat)"
    } else {
        "Messages"
    }
}

/// Trims, shortens and caps the titles scraped from the conversation list.
/// Position `i` stays conversation `i` on the page, so blank titles get a
/// placeholder instead of being dropped.
pub(crate) fn normalize_recent_titles(titles: Vec<String>) -> Vec<String> {
    titles
        .into_iter()
        .take(MAX_RECENT_CONVERSATIONS)
        .map(|title| match title.trim() {
            "" => UNTITLED_CONVERSATION.to_string(),
            trimmed => truncate_message(trimmed, RECENT_TITLE_MAX_CHARS),
        })
        .collect()
}

pub(crate) fn recent_index(menu_id: &str) -> Option<usize> {
    menu_id.strip_prefix(RECENT_ITEM_PREFIX)?.parse().ok()
}

fn build_menu(
    app: &AppHandle,
    unread: bool,
    hide_content: bool,
    recent: &[String],
) -> ShellResult<(Menu<Wry>, TrayMenuState)> {
    let status_item = MenuItem::with_id(app, "status", status_label(unread), false, None::<&str>)?;
    let open_messages_item =
        MenuItem::with_id(app, "open_messages", "Open Messages", true, None::<&str>)?;
    let open_chat_item = MenuItem::with_id(app, "open_chat", "Open Chat", true, None::<&str>)?;

    let mut recent_items = Vec::with_capacity(recent.len().max(1));
    for (index, title) in recent.iter().enumerate() {
        recent_items.push(MenuItem::with_id(
            app,
            format!("{RECENT_ITEM_PREFIX}{index}"),
            title,
            true,
            None::<&str>,
        )?);
    }
    if recent_items.is_empty() {
        recent_items.push(MenuItem::with_id(
            app,
            "recent_empty",
            "No recent conversations",
            false,
            None::<&str>,
        )?);
    }
    let recent_refs: Vec<&dyn IsMenuItem<Wry>> = recent_items
        .iter()
        .map(|item| item as &dyn IsMenuItem<Wry>)
        .collect();
    let recent_menu =
        Submenu::with_id_and_items(app, "recent", "Recent Conversations", true, &recent_refs)?;

    let hide_content_item = CheckMenuItem::with_id(
        app,
        "hide_content",
        "Hide Notification Content",
        true,
        hide_content,
        None::<&str>,
    )?;
    let separator = PredefinedMenuItem::separator(app)?;
    let quit_item = MenuItem::with_id(app, "quit", "Quit", true, None::<&str>)?;

    let menu = Menu::with_items(
        app,
        &[
            &status_item,
            &open_messages_item,
            &open_chat_item,
            &recent_menu,
            &separator,
            &hide_content_item,
            &quit_item,
        ],
    )?;

    Ok((
        menu,
        TrayMenuState {
            status_item,
            hide_content_item,
        },
    ))
}

fn install_menu_state(app: &AppHandle, handles: TrayMenuState) {
    let state = app.state::<AppState>();
    if let Ok(mut tray_menu) = state.tray_menu.lock() {
        *tray_menu = Some(handles);
    };
}

pub(crate) fn create_tray(app: &AppHandle) -> ShellResult<()> {
    let hide_content = read_settings(app)
        .map(|settings| settings.hide_notification_content)
        .unwrap_or(false);
    let (menu, handles) = build_menu(app, false, hide_content, &[])?;
    install_menu_state(app, handles);

    let mut tray_builder = TrayIconBuilder::with_id(TRAY_ID)
        .menu(&menu)
        .tooltip(tooltip(false))
        .show_menu_on_left_click(false)
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                ui_shell::toggle_main_window(tray.app_handle());
            }
        })
        .on_menu_event(handle_menu_event);
    if let Some(icon) =
        ui_shell::tray_icon_for_unread(false).or_else(|| app.default_window_icon().cloned())
    {
        tray_builder = tray_builder.icon(icon);
    }
    tray_builder.build(app)?;
    Ok(())
}

fn handle_menu_event(app: &AppHandle, event: MenuEvent) {
    let id = event.id().as_ref();
    match id {
        "open_messages" | "open_chat" => {
            let view = if id == "open_chat" {
                ViewKind::Chat
            } else {
                ViewKind::Messages
            };
            ui_shell::show_main_window(app);
            if let Err(error) = ui_shell::switch_view(app, view) {
                warn!(%view, %error, "tray view switch failed");
            }
        }
        "hide_content" => toggle_hide_content(app),
        "quit" => {
            info!("quit requested from tray");
            app.exit(0);
        }
        other => {
            if let Some(index) = recent_index(other) {
                if let Err(error) = ui_shell::focus_conversation(app, index) {
                    warn!(index, %error, "failed to open recent conversation");
                }
            }
        }
    }
}

fn toggle_hide_content(app: &AppHandle) {
    let current = read_settings(app)
        .map(|settings| settings.hide_notification_content)
        .unwrap_or(false);
    let update = SettingsUpdate {
        hide_notification_content: Some(!current),
        ..SettingsUpdate::default()
    };
    match save_settings(app, update) {
        Ok(saved) => {
            apply_hide_content_to_tray(app, saved.hide_notification_content);
            diagnostics::emit_shell_diagnostics(app);
        }
        Err(error) => {
            warn!(%error, "failed to toggle notification content hiding");
            apply_hide_content_to_tray(app, current);
        }
    }
}

pub(crate) fn apply_hide_content_to_tray(app: &AppHandle, hide_content: bool) {
    let state = app.state::<AppState>();
    let handles = state.tray_menu.lock().ok().and_then(|guard| guard.clone());
    if let Some(handles) = handles {
        let _ = handles.hide_content_item.set_checked(hide_content);
    }
}

pub(crate) fn apply_unread_to_tray(app: &AppHandle, unread: bool) {
    let state = app.state::<AppState>();
    let handles = state.tray_menu.lock().ok().and_then(|guard| guard.clone());
    if let Some(handles) = handles {
        let _ = handles.status_item.set_text(status_label(unread));
    }

    if let Some(tray) = app.tray_by_id(TRAY_ID) {
        let _ = tray.set_icon(ui_shell::tray_icon_for_unread(unread));
        let _ = tray.set_tooltip(Some(tooltip(unread)));
    }
}

/// Stores the latest conversation titles and rebuilds the tray menu when
/// they changed.
pub(crate) fn set_recent_conversations(app: &AppHandle, titles: Vec<String>) -> ShellResult<()> {
    let titles = normalize_recent_titles(titles);
    let state = app.state::<AppState>();
    {
        let mut recent = state
            .recent_conversations
            .lock()
            .map_lock_err("recent_conversations")?;
        if *recent == titles {
            return Ok(());
        }
        recent.clone_from(&titles);
    }
    debug!(count = titles.len(), "recent conversations changed");

    let unread = *state.chat_unread.lock().map_lock_err("chat_unread")?;
    let hide_content = read_settings(app)
        .map(|settings| settings.hide_notification_content)
        .unwrap_or(false);
    let (menu, handles) = build_menu(app, unread, hide_content, &titles)?;
    install_menu_state(app, handles);
    if let Some(tray) = app.tray_by_id(TRAY_ID) {
        tray.set_menu(Some(menu))?;
    }
    Ok(())
}
