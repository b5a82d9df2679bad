use serde::Deserialize;
use tauri::{AppHandle, Manager};
use tracing::{debug, warn};

use crate::{
    bridge, diagnostics,
    error::LockResultExt,
    model::{AppState, ViewKind},
    tray,
};

/// Payload of `set_chat_unread_status`: either the already-derived flag or
/// the raw `data-unread-count` attribute values seen in the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum UnreadReport {
    Flag(bool),
    Counts(Vec<Option<String>>),
}

impl UnreadReport {
    pub(crate) fn has_unread(&self) -> bool {
        match self {
            UnreadReport::Flag(flag) => *flag,
            UnreadReport::Counts(counts) => any_unread(counts.iter().map(Option::as_deref)),
        }
    }
}

pub(crate) fn any_unread<'a, I>(values: I) -> bool
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    values
        .into_iter()
        .any(|value| parse_unread_count(value.unwrap_or("0")).is_some_and(|count| count > 0))
}

/// Integer prefix of `raw`, read the way a browser's `parseInt` reads it:
/// leading whitespace, an optional sign, an optional `0x` prefix, then digits
/// up to the first non-digit. `None` when no digit is found.
pub(crate) fn parse_unread_count(raw: &str) -> Option<i64> {
    // parseInt also skips a leading byte order mark, which `trim_start` keeps.
    let mut rest = raw.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    let negative = match rest.as_bytes().first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let radix = if rest.len() >= 2 && (rest.starts_with("0x") || rest.starts_with("0X")) {
        rest = &rest[2..];
        16
    } else {
        10
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for ch in rest.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            break;
        };
        seen_digit = true;
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(digit));
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

pub(crate) fn set_chat_unread(app: &AppHandle, unread: bool) {
    let state = app.state::<AppState>();
    let changed = match state.chat_unread.lock().map_lock_err("chat_unread") {
        Ok(mut current) => {
            let changed = *current != unread;
            *current = unread;
            changed
        }
        Err(error) => {
            warn!(%error, "failed to record chat unread status");
            return;
        }
    };
    if !changed {
        return;
    }

    debug!(unread, "chat unread status changed");
    tray::apply_unread_to_tray(app, unread);
    sync_tab_bar_unread(app, unread);
    diagnostics::emit_shell_diagnostics(app);
}

pub(crate) fn sync_tab_bar_unread(app: &AppHandle, unread: bool) {
    let state = app.state::<AppState>();
    let Ok(views) = state.views.lock() else {
        return;
    };
    if let Some(manager) = views.as_ref() {
        let script = bridge::tab_bar_unread_script(ViewKind::Chat, unread);
        if let Err(error) = manager.eval_tab_bar(&script) {
            debug!(%error, "tab bar unread update skipped");
        }
    }
}
