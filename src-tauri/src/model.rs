use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Mutex};
use tauri::menu::{CheckMenuItem, MenuItem};

use crate::{
    error::ShellError,
    surface::TauriSurfaceHost,
    views::ViewManager,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ViewKind {
    #[default]
    Messages,
    Chat,
}

impl ViewKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ViewKind::Messages => "messages",
            ViewKind::Chat => "chat",
        }
    }

    pub(crate) fn other(self) -> ViewKind {
        match self {
            ViewKind::Messages => ViewKind::Chat,
            ViewKind::Chat => ViewKind::Messages,
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = ShellError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "messages" => Ok(ViewKind::Messages),
            "chat" => Ok(ViewKind::Chat),
            other => Err(ShellError::UnknownView(other.to_string())),
        }
    }
}

/// Whether a surface runs the notification bridge and may talk to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SurfacePrivilege {
    Sandboxed,
    Bridged,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct Bounds {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct NotificationRequest {
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) body: String,
    #[serde(default)]
    pub(crate) icon: Option<String>,
    /// Page-side handle of the returned notification object, echoed back on
    /// click.
    #[serde(default)]
    pub(crate) id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub(crate) enum NotificationIcon {
    AppIcon,
    Supplied(String),
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct DisplayedNotification {
    pub(crate) title: String,
    pub(crate) body: String,
    pub(crate) icon: NotificationIcon,
}

#[derive(Clone)]
pub(crate) struct TrayMenuState {
    pub(crate) status_item: MenuItem<tauri::Wry>,
    pub(crate) hide_content_item: CheckMenuItem<tauri::Wry>,
}

pub(crate) struct AppState {
    pub(crate) views: Mutex<Option<ViewManager<TauriSurfaceHost>>>,
    pub(crate) chat_unread: Mutex<bool>,
    pub(crate) recent_conversations: Mutex<Vec<String>>,
    pub(crate) tray_menu: Mutex<Option<TrayMenuState>>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            views: Mutex::new(None),
            chat_unread: Mutex::new(false),
            recent_conversations: Mutex::new(Vec::new()),
            tray_menu: Mutex::new(None),
        }
    }
}
