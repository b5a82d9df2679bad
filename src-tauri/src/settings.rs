use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tauri::{AppHandle, Runtime};
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    error::{ShellError, ShellResult},
    model::ViewKind,
    support::{restrict_file_permissions, settings_file},
};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct StoredSettings {
    pub(crate) hide_notification_content: bool,
    pub(crate) webhook_url: Option<String>,
    pub(crate) start_minimized_to_tray: bool,
    pub(crate) default_view: ViewKind,
}

impl Default for StoredSettings {
    fn default() -> Self {
        Self {
            hide_notification_content: false,
            webhook_url: None,
            start_minimized_to_tray: false,
            default_view: ViewKind::Messages,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SettingsResponse {
    pub(crate) hide_notification_content: bool,
    pub(crate) webhook_url: Option<String>,
    pub(crate) start_minimized_to_tray: bool,
    pub(crate) default_view: ViewKind,
}

impl From<StoredSettings> for SettingsResponse {
    fn from(stored: StoredSettings) -> Self {
        Self {
            hide_notification_content: stored.hide_notification_content,
            webhook_url: stored.webhook_url,
            start_minimized_to_tray: stored.start_minimized_to_tray,
            default_view: stored.default_view,
        }
    }
}

/// Fields left as `None` keep their stored value. An empty webhook URL
/// clears it.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SettingsUpdate {
    pub(crate) hide_notification_content: Option<bool>,
    pub(crate) webhook_url: Option<String>,
    pub(crate) start_minimized_to_tray: Option<bool>,
    pub(crate) default_view: Option<ViewKind>,
}

pub(crate) fn load_settings<R: Runtime>(app: &AppHandle<R>) -> ShellResult<SettingsResponse> {
    Ok(read_settings(app)?.into())
}

pub(crate) fn save_settings<R: Runtime>(
    app: &AppHandle<R>,
    update: SettingsUpdate,
) -> ShellResult<StoredSettings> {
    let path = settings_file(app)?;
    let current = read_settings_from(&path).unwrap_or_else(|error| {
        warn!(%error, "stored settings unreadable, starting from defaults");
        StoredSettings::default()
    });
    let next = merge_settings(current, update)?;
    write_settings_to(&path, &next)?;
    info!(
        hide_notification_content = next.hide_notification_content,
        webhook_configured = next.webhook_url.is_some(),
        "settings saved"
    );
    Ok(next)
}

pub(crate) fn read_settings<R: Runtime>(app: &AppHandle<R>) -> ShellResult<StoredSettings> {
    read_settings_from(&settings_file(app)?)
}

pub(crate) fn should_hide_notification_content<R: Runtime>(app: &AppHandle<R>) -> bool {
    match read_settings(app) {
        Ok(settings) => settings.hide_notification_content,
        Err(error) => {
            warn!(%error, "failed to read settings for hide policy");
            false
        }
    }
}

pub(crate) fn merge_settings(
    current: StoredSettings,
    update: SettingsUpdate,
) -> ShellResult<StoredSettings> {
    let webhook_url = match update.webhook_url {
        Some(raw) if raw.trim().is_empty() => None,
        Some(raw) => Some(normalize_webhook_url(&raw)?),
        None => current.webhook_url,
    };

    Ok(StoredSettings {
        hide_notification_content: update
            .hide_notification_content
            .unwrap_or(current.hide_notification_content),
        webhook_url,
        start_minimized_to_tray: update
            .start_minimized_to_tray
            .unwrap_or(current.start_minimized_to_tray),
        default_view: update.default_view.unwrap_or(current.default_view),
    })
}

pub(crate) fn read_settings_from(path: &Path) -> ShellResult<StoredSettings> {
    if !path.exists() {
        debug!(?path, "no settings file, using defaults");
        return Ok(StoredSettings::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|error| ShellError::Settings(format!("Failed to read settings: {error}")))?;
    serde_json::from_str::<StoredSettings>(&content)
        .map_err(|error| ShellError::Settings(format!("Failed to parse settings: {error}")))
}

pub(crate) fn write_settings_to(path: &Path, settings: &StoredSettings) -> ShellResult<()> {
    let content = serde_json::to_string_pretty(settings)?;
    fs::write(path, content)
        .map_err(|error| ShellError::Settings(format!("Failed to write settings: {error}")))?;
    restrict_file_permissions(path);
    Ok(())
}

pub(crate) fn normalize_webhook_url(input: &str) -> ShellResult<String> {
    let trimmed = input.trim();
    let url = Url::parse(trimmed)
        .map_err(|error| ShellError::InvalidWebhookUrl(format!("{trimmed}: {error}")))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => {
            return Err(ShellError::InvalidWebhookUrl(
                "URL must start with http:// or https://".to_string(),
            ))
        }
    }
    if url.host_str().is_none() {
        return Err(ShellError::InvalidWebhookUrl(format!("{trimmed}: missing host")));
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = read_settings_from(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, StoredSettings::default());
    }

    #[test]
    fn partial_documents_fill_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"hide_notification_content":true,"default_view":"chat"}"#).unwrap();

        let settings = read_settings_from(&path).unwrap();
        assert!(settings.hide_notification_content);
        assert_eq!(settings.default_view, ViewKind::Chat);
        assert_eq!(settings.webhook_url, None);
    }

    #[test]
    fn corrupt_file_is_a_settings_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(read_settings_from(&path), Err(ShellError::Settings(_))));
    }

    #[test]
    fn write_then_read_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = StoredSettings {
            hide_notification_content: true,
            webhook_url: Some("https://chat.googleapis.com/v1/spaces/x/messages".to_string()),
            start_minimized_to_tray: true,
            default_view: ViewKind::Chat,
        };

        write_settings_to(&path, &settings).unwrap();
        assert_eq!(read_settings_from(&path).unwrap(), settings);
    }

    #[test]
    fn merge_keeps_unspecified_fields() {
        let current = StoredSettings {
            hide_notification_content: true,
            webhook_url: Some("https://hooks.example.com/a".to_string()),
            ..StoredSettings::default()
        };
        let merged = merge_settings(
            current,
            SettingsUpdate {
                start_minimized_to_tray: Some(true),
                ..SettingsUpdate::default()
            },
        )
        .unwrap();

        assert!(merged.hide_notification_content);
        assert!(merged.start_minimized_to_tray);
        assert_eq!(merged.webhook_url.as_deref(), Some("https://hooks.example.com/a"));
    }

    #[test]
    fn blank_webhook_clears_and_bad_webhook_rejects() {
        let current = StoredSettings {
            webhook_url: Some("https://hooks.example.com/a".to_string()),
            ..StoredSettings::default()
        };
        let cleared = merge_settings(
            current.clone(),
            SettingsUpdate {
                webhook_url: Some("  ".to_string()),
                ..SettingsUpdate::default()
            },
        )
        .unwrap();
        assert_eq!(cleared.webhook_url, None);

        let rejected = merge_settings(
            current,
            SettingsUpdate {
                webhook_url: Some("ftp://hooks.example.com".to_string()),
                ..SettingsUpdate::default()
            },
        );
        assert!(matches!(rejected, Err(ShellError::InvalidWebhookUrl(_))));
    }

    #[test]
    fn webhook_url_is_normalized() {
        assert_eq!(
            normalize_webhook_url(" https://Hooks.Example.com/x?key=1 ").unwrap(),
            "https://hooks.example.com/x?key=1"
        );
        assert!(normalize_webhook_url("not a url").is_err());
    }
}
