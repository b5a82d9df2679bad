pub(crate) const APP_NAME: &str = "messages-shell";
#[cfg(target_os = "macos")]
pub(crate) const NOTIFICATION_BUNDLE_ID: &str = "net.messages-shell.desktop";

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const MAIN_WINDOW_TITLE: &str = "Messages";
pub(crate) const TRAY_ID: &str = "main-tray";

pub(crate) const TAB_BAR_LABEL: &str = "tabbar";
pub(crate) const TAB_BAR_PAGE: &str = "tabbar.html";
pub(crate) const TAB_BAR_HEIGHT: f64 = 40.0;

pub(crate) const MESSAGES_URL: &str = "https://messages.google.com/web/";
pub(crate) const CHAT_URL: &str = "https://chat.google.com/";
pub(crate) const IDENTITY_PROVIDER_HOST: &str = "accounts.google.com";

pub(crate) const HIDDEN_NOTIFICATION_TITLE: &str = "New Message";
pub(crate) const HIDDEN_NOTIFICATION_BODY: &str = "Click to open";
pub(crate) const NOTIFICATION_ICON_MAX_BYTES: usize = 256_000;
pub(crate) const NOTIFICATION_ICON_SLOTS: u64 = 16;

pub(crate) const MAX_RECENT_CONVERSATIONS: usize = 5;
pub(crate) const RECENT_TITLE_MAX_CHARS: usize = 48;

pub(crate) const EVENT_SHELL_DIAGNOSTICS: &str = "shell-diagnostics";
pub(crate) const EVENT_NOTIFICATION_CLICKED: &str = "notification-clicked";
