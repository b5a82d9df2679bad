use base64::Engine as _;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt as _;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{atomic::Ordering, OnceLock},
};
use tauri::{AppHandle, Manager, Runtime};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{
    consts::APP_NAME,
    error::{ShellError, ShellResult},
    FILE_SUFFIX_COUNTER,
};

const APP_ICON_PNG: &[u8] = include_bytes!("../icons/icon.png");

pub(crate) fn init_logging() {
    let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };
    let crate_target = APP_NAME.replace('-', "_");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{crate_target}={default_level},warn")));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    #[cfg(debug_assertions)]
    {
        use tracing_subscriber::fmt::writer::MakeWriterExt as _;

        let log_path = std::env::temp_dir().join(format!("{APP_NAME}.log"));
        if let Ok(file) = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
        {
            let writer = std::io::stderr.and(std::sync::Mutex::new(file));
            let _ = builder.with_ansi(false).with_writer(writer).try_init();
            return;
        }
    }

    let _ = builder.try_init();
}

pub(crate) fn config_dir<R: Runtime>(app: &AppHandle<R>) -> ShellResult<PathBuf> {
    let config_dir = app
        .path()
        .app_config_dir()
        .map_err(|error| {
            ShellError::Settings(format!("Failed to resolve app config dir: {error}"))
        })?;
    fs::create_dir_all(&config_dir)?;
    Ok(config_dir)
}

pub(crate) fn settings_file<R: Runtime>(app: &AppHandle<R>) -> ShellResult<PathBuf> {
    Ok(config_dir(app)?.join("settings.json"))
}

pub(crate) fn notification_icon_cache_dir<R: Runtime>(app: &AppHandle<R>) -> Option<PathBuf> {
    let base_cache_dir = app
        .path()
        .app_cache_dir()
        .or_else(|_| app.path().app_config_dir())
        .ok()?;
    let icons_dir = base_cache_dir.join("notification-icons");
    if fs::create_dir_all(&icons_dir).is_err() {
        return None;
    }
    Some(icons_dir)
}

pub(crate) fn restrict_file_permissions(path: &Path) {
    #[cfg(unix)]
    if path.exists() {
        if let Err(error) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
            debug!(?path, %error, "failed to restrict file permissions");
        }
    }
    #[cfg(not(unix))]
    let _ = path;
}

pub(crate) fn app_icon_png() -> &'static [u8] {
    APP_ICON_PNG
}

/// Base64 of the bundled app icon, encoded once.
pub(crate) fn app_icon_base64() -> &'static str {
    static ENCODED: OnceLock<String> = OnceLock::new();
    ENCODED.get_or_init(|| base64::engine::general_purpose::STANDARD.encode(APP_ICON_PNG))
}

pub(crate) fn decode_data_url_bytes(data_url: &str, max_bytes: usize) -> Result<Vec<u8>, String> {
    let trimmed = data_url.trim();
    if !trimmed.starts_with("data:") {
        return Err("Not a data URL".to_string());
    }
    let (meta, payload) = trimmed
        .split_once(',')
        .ok_or_else(|| "Malformed data URL".to_string())?;
    let meta_lower = meta.to_ascii_lowercase();
    if !meta_lower.starts_with("data:image/") {
        return Err("Data URL is not an image".to_string());
    }
    if !meta_lower.contains(";base64") {
        return Err("Data URL is not base64 encoded".to_string());
    }
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|error| format!("Invalid base64 payload: {error}"))?;
    if bytes.len() > max_bytes {
        return Err(format!(
            "Data URL image too large ({} bytes > {max_bytes})",
            bytes.len()
        ));
    }
    Ok(bytes)
}

pub(crate) fn truncate_message(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }

    let truncated: String = input.chars().take(max_chars).collect();
    format!("{truncated}...")
}

pub(crate) fn unique_suffix() -> u64 {
    FILE_SUFFIX_COUNTER.fetch_add(1, Ordering::Relaxed)
}
