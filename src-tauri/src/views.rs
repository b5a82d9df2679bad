//! Owns the embedded web surfaces and decides which one is attached.
//!
//! The manager talks to the windowing layer only through [`SurfaceHost`] and
//! [`Surface`], so the switching rules and the one-shot chat privilege upgrade
//! can be exercised without a running webview.

use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    bridge,
    consts::{
        CHAT_URL, IDENTITY_PROVIDER_HOST, MESSAGES_URL, TAB_BAR_HEIGHT, TAB_BAR_LABEL,
        TAB_BAR_PAGE,
    },
    error::{ShellError, ShellResult},
    model::{Bounds, SurfacePrivilege, ViewKind},
};

pub(crate) trait Surface {
    fn label(&self) -> &str;
    fn show(&self) -> ShellResult<()>;
    fn hide(&self) -> ShellResult<()>;
    fn set_bounds(&self, bounds: Bounds) -> ShellResult<()>;
    fn eval(&self, script: &str) -> ShellResult<()>;
    fn close(&self) -> ShellResult<()>;
}

pub(crate) trait SurfaceHost {
    type Surface: Surface;

    /// Creates and attaches a new surface. It starts visible; the manager
    /// places it.
    fn create_surface(&self, spec: &SurfaceSpec) -> ShellResult<Self::Surface>;

    /// Logical width and height of the window content area. Read once at
    /// startup; afterwards sizes arrive through [`ViewManager::resize`].
    fn content_size(&self) -> ShellResult<(f64, f64)>;
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SurfaceSource {
    Bundled(&'static str),
    Remote(Url),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SurfaceSpec {
    pub(crate) label: String,
    pub(crate) source: SurfaceSource,
    pub(crate) privilege: SurfacePrivilege,
    pub(crate) initialization_script: Option<String>,
}

impl SurfaceSpec {
    fn tab_bar() -> Self {
        Self {
            label: TAB_BAR_LABEL.to_string(),
            source: SurfaceSource::Bundled(TAB_BAR_PAGE),
            privilege: SurfacePrivilege::Bridged,
            initialization_script: None,
        }
    }

    fn content(kind: ViewKind, url: Url, privilege: SurfacePrivilege, urls: &ShellUrls) -> Self {
        let initialization_script = match privilege {
            SurfacePrivilege::Bridged => Some(bridge::bridge_script(kind, urls)),
            SurfacePrivilege::Sandboxed => None,
        };
        Self {
            label: surface_label(kind, privilege).to_string(),
            source: SurfaceSource::Remote(url),
            privilege,
            initialization_script,
        }
    }
}

/// Labels double as capability selectors, so the sandboxed and bridged chat
/// surfaces must never share one.
pub(crate) fn surface_label(kind: ViewKind, privilege: SurfacePrivilege) -> &'static str {
    match (kind, privilege) {
        (ViewKind::Messages, _) => "messages",
        (ViewKind::Chat, SurfacePrivilege::Sandboxed) => "chat",
        (ViewKind::Chat, SurfacePrivilege::Bridged) => "chat-bridged",
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ShellUrls {
    pub(crate) messages: Url,
    pub(crate) chat: Url,
    pub(crate) identity_provider_host: String,
}

impl ShellUrls {
    pub(crate) fn defaults() -> ShellResult<Self> {
        let parse = |raw: &str| {
            Url::parse(raw).map_err(|error| ShellError::Surface(format!("bad URL {raw}: {error}")))
        };
        Ok(Self {
            messages: parse(MESSAGES_URL)?,
            chat: parse(CHAT_URL)?,
            identity_provider_host: IDENTITY_PROVIDER_HOST.to_string(),
        })
    }

    pub(crate) fn for_view(&self, kind: ViewKind) -> &Url {
        match kind {
            ViewKind::Messages => &self.messages,
            ViewKind::Chat => &self.chat,
        }
    }

    pub(crate) fn host_for(&self, kind: ViewKind) -> &str {
        self.for_view(kind).host_str().unwrap_or_default()
    }

    pub(crate) fn is_view_host(&self, kind: ViewKind, url: &Url) -> bool {
        host_matches(url, self.host_for(kind))
    }

    /// A finished load on the chat host that is not the sign-in page.
    pub(crate) fn is_authenticated_chat_url(&self, url: &Url) -> bool {
        self.is_view_host(ViewKind::Chat, url) && !host_matches(url, &self.identity_provider_host)
    }
}

fn host_matches(url: &Url, expected: &str) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    if expected.is_empty() {
        return false;
    }
    host.eq_ignore_ascii_case(expected)
        || host
            .to_ascii_lowercase()
            .ends_with(&format!(".{}", expected.to_ascii_lowercase()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ChatAuthState {
    Unauthenticated,
    Authenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageLoadOutcome {
    Ignored,
    TabBarReady,
    BridgeInjected(ViewKind),
    BridgeInjectionFailed(ViewKind),
    ChatUpgraded,
    ChatUpgradeFailed,
    Stale,
}

struct ViewSlot<S> {
    surface: S,
    attached: bool,
    privilege: SurfacePrivilege,
}

pub(crate) struct ViewManager<H: SurfaceHost> {
    host: H,
    urls: ShellUrls,
    tab_bar: H::Surface,
    messages: ViewSlot<H::Surface>,
    chat: ViewSlot<H::Surface>,
    current: ViewKind,
    chat_auth: ChatAuthState,
    content_size: (f64, f64),
}

/// Tab strip across the top, content filling the rest.
pub(crate) fn layout(width: f64, height: f64) -> (Bounds, Bounds) {
    let width = width.max(0.0);
    let tab_bar = Bounds {
        x: 0.0,
        y: 0.0,
        width,
        height: TAB_BAR_HEIGHT,
    };
    let content = Bounds {
        x: 0.0,
        y: TAB_BAR_HEIGHT,
        width,
        height: (height - TAB_BAR_HEIGHT).max(0.0),
    };
    (tab_bar, content)
}

impl<H: SurfaceHost> ViewManager<H> {
    pub(crate) fn new(host: H, urls: ShellUrls, initial: ViewKind) -> ShellResult<Self> {
        let content_size = host.content_size()?;
        let tab_bar = host.create_surface(&SurfaceSpec::tab_bar())?;
        let messages = host.create_surface(&SurfaceSpec::content(
            ViewKind::Messages,
            urls.messages.clone(),
            SurfacePrivilege::Bridged,
            &urls,
        ))?;
        let chat = host.create_surface(&SurfaceSpec::content(
            ViewKind::Chat,
            urls.chat.clone(),
            SurfacePrivilege::Sandboxed,
            &urls,
        ))?;

        let mut manager = Self {
            host,
            urls,
            tab_bar,
            messages: ViewSlot {
                surface: messages,
                attached: true,
                privilege: SurfacePrivilege::Bridged,
            },
            chat: ViewSlot {
                surface: chat,
                attached: true,
                privilege: SurfacePrivilege::Sandboxed,
            },
            current: initial,
            chat_auth: ChatAuthState::Unauthenticated,
            content_size,
        };

        let hidden = manager.slot_mut(initial.other());
        hidden.surface.hide()?;
        hidden.attached = false;
        manager.update_bounds()?;
        manager.sync_tab_bar();
        info!(view = %initial, "view manager ready");
        Ok(manager)
    }

    pub(crate) fn current(&self) -> ViewKind {
        self.current
    }

    pub(crate) fn chat_auth(&self) -> ChatAuthState {
        self.chat_auth
    }

    pub(crate) fn is_attached(&self, kind: ViewKind) -> bool {
        self.slot(kind).attached
    }

    pub(crate) fn privilege(&self, kind: ViewKind) -> SurfacePrivilege {
        self.slot(kind).privilege
    }

    pub(crate) fn view_for_label(&self, label: &str) -> Option<ViewKind> {
        [ViewKind::Messages, ViewKind::Chat]
            .into_iter()
            .find(|kind| self.slot(*kind).surface.label() == label)
    }

    /// Returns `Ok(false)` when `view` was already the attached view.
    pub(crate) fn switch_to(&mut self, view: ViewKind) -> ShellResult<bool> {
        if self.current == view && self.slot(view).attached {
            debug!(%view, "switch ignored, view already attached");
            return Ok(false);
        }

        let outgoing = self.slot_mut(view.other());
        if outgoing.attached {
            outgoing.surface.hide()?;
            outgoing.attached = false;
        }

        let incoming = self.slot_mut(view);
        if !incoming.attached {
            incoming.surface.show()?;
            incoming.attached = true;
        }

        self.current = view;
        self.update_bounds()?;
        self.sync_tab_bar();
        info!(%view, "switched view");
        Ok(true)
    }

    /// Records the new logical content size and re-lays out the surfaces.
    pub(crate) fn resize(&mut self, width: f64, height: f64) -> ShellResult<()> {
        self.content_size = (width, height);
        self.update_bounds()
    }

    /// Lays out with the last known content size. Never queries the window,
    /// so it is safe while the caller holds the views lock.
    pub(crate) fn update_bounds(&self) -> ShellResult<()> {
        let (width, height) = self.content_size;
        let (tab_bar, content) = layout(width, height);
        self.tab_bar.set_bounds(tab_bar)?;
        self.slot(self.current).surface.set_bounds(content)
    }

    pub(crate) fn eval_in(&self, view: ViewKind, script: &str) -> ShellResult<()> {
        self.slot(view).surface.eval(script)
    }

    pub(crate) fn eval_tab_bar(&self, script: &str) -> ShellResult<()> {
        self.tab_bar.eval(script)
    }

    pub(crate) fn on_page_load(&mut self, label: &str, url: &Url) -> PageLoadOutcome {
        if label == self.tab_bar.label() {
            self.sync_tab_bar();
            return PageLoadOutcome::TabBarReady;
        }
        let Some(kind) = self.view_for_label(label) else {
            debug!(label, "page load from a discarded surface");
            return PageLoadOutcome::Stale;
        };

        if kind == ViewKind::Chat
            && self.chat_auth == ChatAuthState::Unauthenticated
            && self.urls.is_authenticated_chat_url(url)
        {
            self.chat_auth = ChatAuthState::Authenticated;
            return match self.upgrade_chat(url) {
                Ok(()) => PageLoadOutcome::ChatUpgraded,
                Err(error) => {
                    warn!(%error, "chat surface upgrade failed, keeping sandboxed surface");
                    PageLoadOutcome::ChatUpgradeFailed
                }
            };
        }

        let slot = self.slot(kind);
        if slot.privilege != SurfacePrivilege::Bridged || !self.urls.is_view_host(kind, url) {
            return PageLoadOutcome::Ignored;
        }
        match slot.surface.eval(&bridge::bridge_script(kind, &self.urls)) {
            Ok(()) => PageLoadOutcome::BridgeInjected(kind),
            Err(error) => {
                warn!(%kind, %error, "bridge injection failed");
                PageLoadOutcome::BridgeInjectionFailed(kind)
            }
        }
    }

    fn upgrade_chat(&mut self, url: &Url) -> ShellResult<()> {
        let spec = SurfaceSpec::content(
            ViewKind::Chat,
            url.clone(),
            SurfacePrivilege::Bridged,
            &self.urls,
        );
        let replacement = self.host.create_surface(&spec)?;
        let attached = self.chat.attached;
        let previous = std::mem::replace(
            &mut self.chat,
            ViewSlot {
                surface: replacement,
                attached,
                privilege: SurfacePrivilege::Bridged,
            },
        );
        if let Err(error) = previous.surface.close() {
            warn!(%error, "failed to close sandboxed chat surface");
        }

        let placed = if attached {
            self.update_bounds()
        } else {
            self.chat.surface.hide()
        };
        if let Err(error) = placed {
            warn!(%error, "failed to place upgraded chat surface");
        }
        info!(%url, "chat surface upgraded after sign-in");
        Ok(())
    }

    fn sync_tab_bar(&self) {
        if let Err(error) = self.tab_bar.eval(&bridge::tab_bar_active_script(self.current)) {
            debug!(%error, "tab bar not ready for active state");
        }
    }

    fn slot(&self, kind: ViewKind) -> &ViewSlot<H::Surface> {
        match kind {
            ViewKind::Messages => &self.messages,
            ViewKind::Chat => &self.chat,
        }
    }

    fn slot_mut(&mut self, kind: ViewKind) -> &mut ViewSlot<H::Surface> {
        match kind {
            ViewKind::Messages => &mut self.messages,
            ViewKind::Chat => &mut self.chat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    type Log = Rc<RefCell<Vec<String>>>;

    struct RecordingSurface {
        label: String,
        log: Log,
        failing_eval: Rc<RefCell<Option<String>>>,
    }

    impl RecordingSurface {
        fn record(&self, op: &str) {
            self.log.borrow_mut().push(format!("{op}:{}", self.label));
        }
    }

    impl Surface for RecordingSurface {
        fn label(&self) -> &str {
            &self.label
        }

        fn show(&self) -> ShellResult<()> {
            self.record("show");
            Ok(())
        }

        fn hide(&self) -> ShellResult<()> {
            self.record("hide");
            Ok(())
        }

        fn set_bounds(&self, bounds: Bounds) -> ShellResult<()> {
            self.log.borrow_mut().push(format!(
                "bounds:{}:{},{},{},{}",
                self.label, bounds.x, bounds.y, bounds.width, bounds.height
            ));
            Ok(())
        }

        fn eval(&self, _script: &str) -> ShellResult<()> {
            if self.failing_eval.borrow().as_deref() == Some(self.label.as_str()) {
                return Err(ShellError::Surface(format!("eval rejected by {}", self.label)));
            }
            self.record("eval");
            Ok(())
        }

        fn close(&self) -> ShellResult<()> {
            self.record("close");
            Ok(())
        }
    }

    #[derive(Clone)]
    struct RecordingHost {
        log: Log,
        size: Rc<RefCell<(f64, f64)>>,
        specs: Rc<RefCell<Vec<SurfaceSpec>>>,
        refuse: Rc<RefCell<Option<String>>>,
        failing_eval: Rc<RefCell<Option<String>>>,
        size_queries: Rc<Cell<usize>>,
    }

    impl RecordingHost {
        fn new() -> Self {
            Self {
                log: Rc::default(),
                size: Rc::new(RefCell::new((800.0, 600.0))),
                specs: Rc::default(),
                refuse: Rc::default(),
                failing_eval: Rc::default(),
                size_queries: Rc::default(),
            }
        }

        fn take_log(&self) -> Vec<String> {
            std::mem::take(&mut *self.log.borrow_mut())
        }

        fn created(&self, label: &str) -> usize {
            self.specs.borrow().iter().filter(|spec| spec.label == label).count()
        }
    }

    impl SurfaceHost for RecordingHost {
        type Surface = RecordingSurface;

        fn create_surface(&self, spec: &SurfaceSpec) -> ShellResult<RecordingSurface> {
            if self.refuse.borrow().as_deref() == Some(spec.label.as_str()) {
                return Err(ShellError::Surface(format!("refused {}", spec.label)));
            }
            self.specs.borrow_mut().push(spec.clone());
            self.log.borrow_mut().push(format!("create:{}", spec.label));
            Ok(RecordingSurface {
                label: spec.label.clone(),
                log: self.log.clone(),
                failing_eval: self.failing_eval.clone(),
            })
        }

        fn content_size(&self) -> ShellResult<(f64, f64)> {
            self.size_queries.set(self.size_queries.get() + 1);
            Ok(*self.size.borrow())
        }
    }

    fn manager(initial: ViewKind) -> (ViewManager<RecordingHost>, RecordingHost) {
        let host = RecordingHost::new();
        let manager =
            ViewManager::new(host.clone(), ShellUrls::defaults().unwrap(), initial).unwrap();
        host.take_log();
        (manager, host)
    }

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn layout_reserves_tab_strip() {
        let (tab_bar, content) = layout(1024.0, 768.0);
        assert_eq!(tab_bar, Bounds { x: 0.0, y: 0.0, width: 1024.0, height: 40.0 });
        assert_eq!(content, Bounds { x: 0.0, y: 40.0, width: 1024.0, height: 728.0 });

        let (_, squashed) = layout(300.0, 10.0);
        assert_eq!(squashed.height, 0.0);
    }

    #[test]
    fn startup_attaches_only_the_initial_view() {
        let host = RecordingHost::new();
        let urls = ShellUrls::defaults().unwrap();
        let manager = ViewManager::new(host.clone(), urls, ViewKind::Messages).unwrap();

        assert!(manager.is_attached(ViewKind::Messages));
        assert!(!manager.is_attached(ViewKind::Chat));
        let log = host.take_log();
        assert!(log.contains(&"hide:chat".to_string()));
        assert!(log.contains(&"bounds:tabbar:0,0,800,40".to_string()));
        assert!(log.contains(&"bounds:messages:0,40,800,560".to_string()));

        let specs = host.specs.borrow();
        let chat = specs.iter().find(|spec| spec.label == "chat").unwrap();
        assert_eq!(chat.privilege, SurfacePrivilege::Sandboxed);
        assert!(chat.initialization_script.is_none());
        let messages = specs.iter().find(|spec| spec.label == "messages").unwrap();
        assert!(messages.initialization_script.is_some());
    }

    #[test]
    fn switching_to_current_view_is_a_no_op() {
        let (mut manager, host) = manager(ViewKind::Messages);

        assert!(!manager.switch_to(ViewKind::Messages).unwrap());
        assert!(host.take_log().is_empty());
    }

    #[test]
    fn switching_swaps_attached_surface() {
        let (mut manager, host) = manager(ViewKind::Messages);

        assert!(manager.switch_to(ViewKind::Chat).unwrap());
        assert_eq!(
            host.take_log(),
            vec![
                "hide:messages",
                "show:chat",
                "bounds:tabbar:0,0,800,40",
                "bounds:chat:0,40,800,560",
                "eval:tabbar",
            ]
        );
        assert_eq!(manager.current(), ViewKind::Chat);
        assert!(!manager.is_attached(ViewKind::Messages));

        assert!(!manager.switch_to(ViewKind::Chat).unwrap());
        assert!(manager.switch_to(ViewKind::Messages).unwrap());
        let attached = [ViewKind::Messages, ViewKind::Chat]
            .into_iter()
            .filter(|kind| manager.is_attached(*kind))
            .count();
        assert_eq!(attached, 1);
    }

    #[test]
    fn resize_repositions_current_view() {
        let (mut manager, host) = manager(ViewKind::Messages);

        manager.resize(1280.0, 900.0).unwrap();
        assert_eq!(
            host.take_log(),
            vec!["bounds:tabbar:0,0,1280,40", "bounds:messages:0,40,1280,860"]
        );

        manager.switch_to(ViewKind::Chat).unwrap();
        assert!(host.take_log().contains(&"bounds:chat:0,40,1280,860".to_string()));
    }

    #[test]
    fn window_size_is_read_only_at_startup() {
        let (mut manager, host) = manager(ViewKind::Messages);
        assert_eq!(host.size_queries.get(), 1);

        *host.size.borrow_mut() = (1.0, 1.0);
        manager.switch_to(ViewKind::Chat).unwrap();
        manager.on_page_load("chat", &url("https://chat.google.com/"));
        manager.switch_to(ViewKind::Messages).unwrap();
        manager.update_bounds().unwrap();

        assert_eq!(host.size_queries.get(), 1);
        assert!(host.take_log().contains(&"bounds:messages:0,40,800,560".to_string()));
    }

    #[test]
    fn failed_bridge_injection_leaves_state_alone() {
        let (mut manager, host) = manager(ViewKind::Messages);
        *host.failing_eval.borrow_mut() = Some("messages".to_string());

        let outcome = manager.on_page_load(
            "messages",
            &url("https://messages.google.com/web/conversations"),
        );
        assert_eq!(outcome, PageLoadOutcome::BridgeInjectionFailed(ViewKind::Messages));
        assert_eq!(manager.current(), ViewKind::Messages);
        assert!(manager.is_attached(ViewKind::Messages));
        assert!(!manager.is_attached(ViewKind::Chat));
        assert_eq!(manager.privilege(ViewKind::Messages), SurfacePrivilege::Bridged);
        assert_eq!(manager.chat_auth(), ChatAuthState::Unauthenticated);
        assert!(host.take_log().is_empty());
        assert_eq!(host.created("messages"), 1);
    }

    #[test]
    fn sign_in_page_does_not_authenticate_chat() {
        let (mut manager, host) = manager(ViewKind::Chat);

        let outcome = manager.on_page_load(
            "chat",
            &url("https://accounts.google.com/signin?continue=https%3A%2F%2Fchat.google.com"),
        );
        assert_eq!(outcome, PageLoadOutcome::Ignored);
        assert_eq!(manager.chat_auth(), ChatAuthState::Unauthenticated);
        assert_eq!(host.created("chat-bridged"), 0);
    }

    #[test]
    fn chat_upgrade_happens_exactly_once() {
        let (mut manager, host) = manager(ViewKind::Chat);
        let signed_in = url("https://chat.google.com/u/0/");

        assert_eq!(manager.on_page_load("chat", &signed_in), PageLoadOutcome::ChatUpgraded);
        assert_eq!(manager.chat_auth(), ChatAuthState::Authenticated);
        assert_eq!(manager.privilege(ViewKind::Chat), SurfacePrivilege::Bridged);

        let log = host.take_log();
        assert_eq!(log[0], "create:chat-bridged");
        assert!(log.contains(&"close:chat".to_string()));
        assert!(log.contains(&"bounds:chat-bridged:0,40,800,560".to_string()));

        let spec = host.specs.borrow().last().cloned().unwrap();
        assert_eq!(spec.source, SurfaceSource::Remote(signed_in.clone()));

        assert_eq!(
            manager.on_page_load("chat-bridged", &signed_in),
            PageLoadOutcome::BridgeInjected(ViewKind::Chat)
        );
        assert_eq!(
            manager.on_page_load("chat-bridged", &url("https://chat.google.com/room/abc")),
            PageLoadOutcome::BridgeInjected(ViewKind::Chat)
        );
        assert_eq!(host.created("chat-bridged"), 1);
    }

    #[test]
    fn upgrade_of_detached_chat_stays_hidden() {
        let (mut manager, host) = manager(ViewKind::Messages);

        manager.on_page_load("chat", &url("https://chat.google.com/"));
        let log = host.take_log();
        assert!(log.contains(&"hide:chat-bridged".to_string()));
        assert!(!manager.is_attached(ViewKind::Chat));
        assert!(manager.is_attached(ViewKind::Messages));
    }

    #[test]
    fn events_from_discarded_surface_are_stale() {
        let (mut manager, _host) = manager(ViewKind::Chat);
        manager.on_page_load("chat", &url("https://chat.google.com/"));

        assert_eq!(
            manager.on_page_load("chat", &url("https://chat.google.com/")),
            PageLoadOutcome::Stale
        );
    }

    #[test]
    fn failed_upgrade_is_not_retried() {
        let (mut manager, host) = manager(ViewKind::Chat);
        *host.refuse.borrow_mut() = Some("chat-bridged".to_string());

        let signed_in = url("https://chat.google.com/");
        assert_eq!(manager.on_page_load("chat", &signed_in), PageLoadOutcome::ChatUpgradeFailed);
        assert_eq!(manager.on_page_load("chat", &signed_in), PageLoadOutcome::Ignored);
        assert_eq!(manager.privilege(ViewKind::Chat), SurfacePrivilege::Sandboxed);
        assert_eq!(manager.view_for_label("chat"), Some(ViewKind::Chat));
    }

    #[test]
    fn messages_bridge_injected_only_on_messages_host() {
        let (mut manager, host) = manager(ViewKind::Messages);

        assert_eq!(
            manager.on_page_load("messages", &url("https://messages.google.com/web/conversations")),
            PageLoadOutcome::BridgeInjected(ViewKind::Messages)
        );
        assert_eq!(
            manager.on_page_load("messages", &url("https://accounts.google.com/")),
            PageLoadOutcome::Ignored
        );
        assert_eq!(host.take_log(), vec!["eval:messages"]);
    }

    #[test]
    fn tab_bar_load_resyncs_active_state() {
        let (mut manager, host) = manager(ViewKind::Messages);

        assert_eq!(
            manager.on_page_load("tabbar", &url("tauri://localhost/tabbar.html")),
            PageLoadOutcome::TabBarReady
        );
        assert_eq!(host.take_log(), vec!["eval:tabbar"]);
    }

    #[test]
    fn chat_host_matching_accepts_subdomains_only() {
        let urls = ShellUrls::defaults().unwrap();
        assert!(urls.is_authenticated_chat_url(&url("https://chat.google.com/")));
        assert!(urls.is_authenticated_chat_url(&url("https://mail.chat.google.com/x")));
        assert!(!urls.is_authenticated_chat_url(&url("https://notchat.google.com/")));
        assert!(!urls.is_authenticated_chat_url(&url("https://accounts.google.com/")));
        assert!(!urls.is_authenticated_chat_url(&url("data:text/html,hi")));
    }
}
