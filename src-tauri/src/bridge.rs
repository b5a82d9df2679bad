//! Scripts the host evaluates inside its surfaces.

use serde::Serialize;
use tracing::warn;

use crate::{
    consts::{MAIN_WINDOW_TITLE, MAX_RECENT_CONVERSATIONS},
    model::ViewKind,
    views::ShellUrls,
};

const NOTIFICATION_BRIDGE_JS: &str = include_str!("../scripts/notification_bridge.js");

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BridgeConfig<'a> {
    view: ViewKind,
    host: &'a str,
    max_recent: usize,
    page_title: Option<&'a str>,
}

/// The notification bridge for `view`. Safe to evaluate repeatedly; the
/// script installs itself once per document and only on the view's host.
pub(crate) fn bridge_script(view: ViewKind, urls: &ShellUrls) -> String {
    let config = BridgeConfig {
        view,
        host: urls.host_for(view),
        max_recent: MAX_RECENT_CONVERSATIONS,
        page_title: (view == ViewKind::Messages).then_some(MAIN_WINDOW_TITLE),
    };
    let config = match serde_json::to_string(&config) {
        Ok(json) => json,
        Err(error) => {
            warn!(%error, "failed to encode bridge config");
            "{}".to_string()
        }
    };
    format!("(function (config) {{\n{NOTIFICATION_BRIDGE_JS}\n}})({config});")
}

pub(crate) fn tab_bar_active_script(view: ViewKind) -> String {
    format!(
        "window.shellTabBar && window.shellTabBar.setActive({});",
        js_string(view.as_str())
    )
}

pub(crate) fn tab_bar_unread_script(view: ViewKind, unread: bool) -> String {
    format!(
        "window.shellTabBar && window.shellTabBar.setUnread({}, {unread});",
        js_string(view.as_str())
    )
}

pub(crate) fn focus_conversation_script(index: usize) -> String {
    format!("window.__shellFocusConversation && window.__shellFocusConversation({index});")
}

/// Replays a native click on the page's notification object, if the page
/// got one back.
pub(crate) fn notification_click_script(notification_id: Option<u64>) -> Option<String> {
    notification_id.map(|id| {
        format!("window.__shellNotificationClicked && window.__shellNotificationClicked({id});")
    })
}

pub(crate) fn focus_event_script() -> &'static str {
    "document.dispatchEvent(new Event(\"focus\"));"
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}
