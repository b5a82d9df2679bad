use serde::Serialize;
use tauri::AppHandle;
use tracing::{debug, info, warn};

use crate::{
    error::ShellResult,
    settings::{normalize_webhook_url, read_settings},
};

#[derive(Debug, Serialize)]
pub(crate) struct WebhookPayload<'a> {
    pub(crate) text: &'a str,
}

/// Posts `{"text": ...}` to `url`. Only the response status is looked at.
pub(crate) async fn post_webhook(
    client: &reqwest::Client,
    url: &str,
    text: &str,
) -> ShellResult<reqwest::StatusCode> {
    let response = client
        .post(url)
        .json(&WebhookPayload { text })
        .send()
        .await?;
    Ok(response.status())
}

/// Fire-and-forget send to the configured webhook. A missing webhook URL
/// makes this a no-op.
pub(crate) fn send_chat_message(app: &AppHandle, text: String) -> ShellResult<()> {
    let Some(raw_url) = read_settings(app)?.webhook_url else {
        debug!("no webhook configured, dropping chat message");
        return Ok(());
    };
    let url = normalize_webhook_url(&raw_url)?;

    tauri::async_runtime::spawn(async move {
        let client = reqwest::Client::new();
        match post_webhook(&client, &url, &text).await {
            Ok(status) if status.is_success() => {
                info!(%status, "webhook message delivered");
            }
            Ok(status) => {
                warn!(%status, "webhook rejected message");
            }
            Err(error) => {
                warn!(%error, "webhook request failed");
            }
        }
    });
    Ok(())
}
