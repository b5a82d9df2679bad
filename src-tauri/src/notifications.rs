use std::{fs, path::PathBuf, thread};

use tauri::{AppHandle, Emitter};
use tracing::{debug, warn};

use crate::{
    bridge,
    consts::{
        EVENT_NOTIFICATION_CLICKED, HIDDEN_NOTIFICATION_BODY, HIDDEN_NOTIFICATION_TITLE,
        NOTIFICATION_ICON_MAX_BYTES, NOTIFICATION_ICON_SLOTS,
    },
    error::{ShellError, ShellResult},
    model::{DisplayedNotification, NotificationIcon, NotificationRequest, ViewKind},
    settings::should_hide_notification_content,
    support::{app_icon_png, decode_data_url_bytes, notification_icon_cache_dir, unique_suffix},
    ui_shell,
};

pub(crate) fn apply_hide_policy(request: NotificationRequest, hide: bool) -> DisplayedNotification {
    if hide {
        return DisplayedNotification {
            title: HIDDEN_NOTIFICATION_TITLE.to_string(),
            body: HIDDEN_NOTIFICATION_BODY.to_string(),
            icon: NotificationIcon::AppIcon,
        };
    }

    let icon = match request.icon {
        Some(icon) if !icon.trim().is_empty() => NotificationIcon::Supplied(icon),
        _ => NotificationIcon::None,
    };
    DisplayedNotification {
        title: request.title,
        body: request.body,
        icon,
    }
}

/// Shows a page notification natively. Failures are logged, never returned:
/// the page keeps working without its notification.
pub(crate) fn show_notification(app: &AppHandle, source: ViewKind, request: NotificationRequest) {
    let notification_id = request.id;
    let hide = should_hide_notification_content(app);
    let displayed = apply_hide_policy(request, hide);
    debug!(%source, hide, ?notification_id, "showing page notification");
    let icon_path = resolve_icon_path(app, &displayed.icon);

    let app = app.clone();
    thread::spawn(move || match display_native(&displayed, icon_path) {
        Ok(true) => {
            let handle = app.clone();
            let dispatched = app.run_on_main_thread(move || {
                on_notification_clicked(&handle, source, notification_id)
            });
            if let Err(error) = dispatched {
                warn!(%error, "failed to dispatch notification click");
            }
        }
        Ok(false) => {}
        Err(error) => warn!(%error, "failed to show notification"),
    });
}

/// Title and body exactly as handed to the OS notifier.
pub(crate) fn native_content(notification: &DisplayedNotification) -> (&str, &str) {
    (&notification.title, &notification.body)
}

/// Runs on the event loop: the view switch takes the views lock and moves
/// webviews.
fn on_notification_clicked(app: &AppHandle, source: ViewKind, notification_id: Option<u64>) {
    ui_shell::show_main_window(app);
    ui_shell::focus_view(app, source);
    if let Some(script) = bridge::notification_click_script(notification_id) {
        ui_shell::eval_in_view(app, source, &script);
    }
    let _ = app.emit(EVENT_NOTIFICATION_CLICKED, source);
}

fn resolve_icon_path(app: &AppHandle, icon: &NotificationIcon) -> Option<PathBuf> {
    let icons_dir = notification_icon_cache_dir(app)?;
    match icon {
        NotificationIcon::AppIcon => {
            let path = icons_dir.join("app-icon.png");
            if !path.exists() {
                if let Err(error) = fs::write(&path, app_icon_png()) {
                    debug!(%error, "failed caching app icon");
                    return None;
                }
            }
            Some(path)
        }
        NotificationIcon::Supplied(value) if value.trim_start().starts_with("data:") => {
            let bytes = match decode_data_url_bytes(value, NOTIFICATION_ICON_MAX_BYTES) {
                Ok(bytes) if !bytes.is_empty() => bytes,
                Ok(_) => return None,
                Err(error) => {
                    debug!(%error, "ignoring notification icon");
                    return None;
                }
            };
            let slot = unique_suffix() % NOTIFICATION_ICON_SLOTS;
            let path = icons_dir.join(format!("page-{slot}.png"));
            if let Err(error) = fs::write(&path, &bytes) {
                debug!(%error, "failed writing notification icon");
                return None;
            }
            Some(path)
        }
        NotificationIcon::Supplied(_) | NotificationIcon::None => None,
    }
}

#[cfg(target_os = "macos")]
fn display_native(
    notification: &DisplayedNotification,
    icon_path: Option<PathBuf>,
) -> ShellResult<bool> {
    use mac_notification_sys::{MainButton, Notification, NotificationResponse};

    ensure_macos_notification_application();
    let (title, body) = native_content(notification);
    let icon_path = icon_path.map(|path| path.to_string_lossy().to_string());

    let mut native = Notification::new();
    native
        .title(title)
        .message(body)
        .main_button(MainButton::SingleAction("Open"))
        .close_button("Dismiss")
        .default_sound()
        .wait_for_click(true)
        .asynchronous(false);
    if let Some(icon_path) = icon_path.as_deref() {
        native.content_image(icon_path);
    }

    match native.send() {
        Ok(NotificationResponse::Click) | Ok(NotificationResponse::ActionButton(_)) => Ok(true),
        Ok(_) => Ok(false),
        Err(error) => Err(ShellError::Notification(error.to_string())),
    }
}

#[cfg(target_os = "macos")]
fn ensure_macos_notification_application() {
    static INIT_NOTIFICATION_APP: std::sync::Once = std::sync::Once::new();
    INIT_NOTIFICATION_APP.call_once(|| {
        for bundle_id in [crate::consts::NOTIFICATION_BUNDLE_ID, "com.apple.Terminal"] {
            match mac_notification_sys::set_application(bundle_id) {
                Ok(_) => return,
                Err(error) => {
                    debug!(bundle_id, %error, "failed to set notification bundle id");
                }
            }
        }
    });
}

#[cfg(all(unix, not(target_os = "macos")))]
fn display_native(
    notification: &DisplayedNotification,
    icon_path: Option<PathBuf>,
) -> ShellResult<bool> {
    let (title, body) = native_content(notification);
    let mut native = notify_rust::Notification::new();
    native.summary(title).body(body).action("default", "Open");
    if let Some(icon_path) = icon_path.as_deref() {
        native.icon(&icon_path.to_string_lossy());
    }

    let handle = native
        .show()
        .map_err(|error| ShellError::Notification(error.to_string()))?;
    let mut clicked = false;
    handle.wait_for_action(|action| {
        clicked = action == "default";
    });
    Ok(clicked)
}

/// notify-rust reports no activation on Windows, so clicks never come back.
#[cfg(target_os = "windows")]
fn display_native(
    notification: &DisplayedNotification,
    icon_path: Option<PathBuf>,
) -> ShellResult<bool> {
    let (title, body) = native_content(notification);
    let mut native = notify_rust::Notification::new();
    native.summary(title).body(body);
    if let Some(icon_path) = icon_path.as_deref() {
        native.icon(&icon_path.to_string_lossy());
    }
    native
        .show()
        .map(|_| false)
        .map_err(|error| ShellError::Notification(error.to_string()))
}
