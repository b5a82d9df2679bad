//! Child webviews of the main window, driven by the view manager.

use tauri::{
    webview::PageLoadEvent, AppHandle, LogicalPosition, LogicalSize, Manager, Webview,
    WebviewBuilder, WebviewUrl,
};
use tracing::{debug, info};
use url::Url;

use crate::{
    consts::MAIN_WINDOW_LABEL,
    diagnostics,
    error::{ShellError, ShellResult},
    model::{AppState, Bounds},
    unread,
    views::{PageLoadOutcome, Surface, SurfaceHost, SurfaceSource, SurfaceSpec},
};

pub(crate) struct TauriSurface {
    webview: Webview,
}

impl Surface for TauriSurface {
    fn label(&self) -> &str {
        self.webview.label()
    }

    fn show(&self) -> ShellResult<()> {
        Ok(self.webview.show()?)
    }

    fn hide(&self) -> ShellResult<()> {
        Ok(self.webview.hide()?)
    }

    fn set_bounds(&self, bounds: Bounds) -> ShellResult<()> {
        self.webview
            .set_position(LogicalPosition::new(bounds.x, bounds.y))?;
        self.webview
            .set_size(LogicalSize::new(bounds.width, bounds.height))?;
        Ok(())
    }

    fn eval(&self, script: &str) -> ShellResult<()> {
        Ok(self.webview.eval(script)?)
    }

    fn close(&self) -> ShellResult<()> {
        Ok(self.webview.close()?)
    }
}

pub(crate) struct TauriSurfaceHost {
    app: AppHandle,
}

impl TauriSurfaceHost {
    pub(crate) fn new(app: AppHandle) -> Self {
        Self { app }
    }

    fn main_window(&self) -> ShellResult<tauri::Window> {
        self.app
            .get_window(MAIN_WINDOW_LABEL)
            .ok_or(ShellError::WindowMissing)
    }
}

impl SurfaceHost for TauriSurfaceHost {
    type Surface = TauriSurface;

    fn create_surface(&self, spec: &SurfaceSpec) -> ShellResult<TauriSurface> {
        let window = self.main_window()?;
        let url = match &spec.source {
            SurfaceSource::Bundled(page) => WebviewUrl::App((*page).into()),
            SurfaceSource::Remote(url) => WebviewUrl::External(url.clone()),
        };

        let mut builder =
            WebviewBuilder::new(&spec.label, url).on_page_load(|webview, payload| {
                if matches!(payload.event(), PageLoadEvent::Finished) {
                    handle_page_load(webview.app_handle(), webview.label(), payload.url());
                }
            });
        if let Some(script) = spec.initialization_script.as_deref() {
            builder = builder.initialization_script(script);
        }

        let webview = window.add_child(
            builder,
            LogicalPosition::new(0.0, 0.0),
            LogicalSize::new(1.0, 1.0),
        )?;
        info!(label = %spec.label, privilege = ?spec.privilege, "surface created");
        Ok(TauriSurface { webview })
    }

    fn content_size(&self) -> ShellResult<(f64, f64)> {
        let window = self.main_window()?;
        let scale = window.scale_factor()?;
        let size = window.inner_size()?.to_logical::<f64>(scale);
        Ok((size.width, size.height))
    }
}

/// Routes a finished page load into the view manager.
pub(crate) fn handle_page_load(app: &AppHandle, label: &str, url: &Url) {
    let state = app.state::<AppState>();
    let outcome = {
        let Ok(mut views) = state.views.lock() else {
            return;
        };
        let Some(manager) = views.as_mut() else {
            debug!(label, "page load before view manager is ready");
            return;
        };
        manager.on_page_load(label, url)
    };
    debug!(label, %url, ?outcome, "page load handled");

    match outcome {
        PageLoadOutcome::TabBarReady => {
            let unread = state.chat_unread.lock().map(|flag| *flag).unwrap_or(false);
            unread::sync_tab_bar_unread(app, unread);
        }
        PageLoadOutcome::ChatUpgraded | PageLoadOutcome::ChatUpgradeFailed => {
            diagnostics::emit_shell_diagnostics(app);
        }
        _ => {}
    }
}
