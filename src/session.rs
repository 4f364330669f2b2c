//! The alerting session: configuration, launcher and hooks for one process.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::alert::{AlertRequest, AlertStatus};
use crate::config::Config;
use crate::hook::{self, ErrorDisplay};
use crate::launcher::{AlertSink, Launcher};

/// Set by Jupyter servers for each kernel to the notebook's path.
const JUPYTER_SESSION_ENV: &str = "JPY_SESSION_NAME";

pub struct Session {
    sink: Arc<dyn AlertSink>,
    title: Option<String>,
    max_message_chars: usize,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let title = if config.launcher.detect_session_name {
            detect_session_name()
        } else {
            None
        };
        if let Some(name) = &title {
            debug!("Alert title: {name}");
        }

        Self {
            sink: Arc::new(Launcher::new(&config.launcher)),
            title,
            max_message_chars: config.launcher.max_message_chars,
        }
    }

    /// Session delivering to an arbitrary sink.
    pub fn with_sink(sink: Arc<dyn AlertSink>, title: Option<String>, max_message_chars: usize) -> Self {
        Self {
            sink,
            title,
            max_message_chars,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Success alert with `message`, or the default when `None`.
    pub fn done(&self, message: Option<&str>) -> bool {
        let request = AlertRequest::success(message.unwrap_or_default());
        self.announce(&request);
        self.submit(request)
    }

    pub fn error(&self, message: &str) -> bool {
        let request = AlertRequest::error(message);
        self.announce(&request);
        self.submit(request)
    }

    /// Raise an error alert for every panic in this process.
    pub fn install_panic_hook(self: &Arc<Self>) -> bool {
        let installed = hook::install_panic_hook(self.clone(), self.max_message_chars);
        if installed {
            info!("{} Auto-error detection enabled", AlertStatus::Success.glyph());
        }
        installed
    }

    /// Raise an error alert for every error shown through `display`.
    pub fn attach(self: &Arc<Self>, display: &ErrorDisplay) -> bool {
        hook::install(display, self.clone(), self.max_message_chars)
    }

    /// Echo to the cell output, which an embedding kernel shows even
    /// without a tracing subscriber.
    fn announce(&self, request: &AlertRequest) {
        let line = echo_line(request);
        println!("{line}");
        info!("{line}");
    }
}

impl AlertSink for Session {
    fn submit(&self, request: AlertRequest) -> bool {
        let request = match (&request.title, &self.title) {
            (None, Some(title)) => request.with_title(title.clone()),
            _ => request,
        };
        self.sink.submit(request)
    }
}

/// `✓ <message>` / `✗ <message>`.
fn echo_line(request: &AlertRequest) -> String {
    format!("{} {}", request.status.glyph(), request.message)
}

/// Name of the notebook driving this process, if one can be found.
pub fn detect_session_name() -> Option<String> {
    if let Some(path) = std::env::var_os(JUPYTER_SESSION_ENV) {
        if let Some(name) = notebook_stem(&path.to_string_lossy()) {
            return Some(name);
        }
    }
    parent_notebook()
}

/// `/home/u/analysis.ipynb` → `analysis`.
fn notebook_stem(path: &str) -> Option<String> {
    let stem = Path::new(path.trim()).file_stem()?.to_string_lossy();
    if stem.is_empty() {
        None
    } else {
        Some(stem.into_owned())
    }
}

/// First `*.ipynb` argument in a NUL-separated command line.
fn notebook_in_cmdline(cmdline: &[u8]) -> Option<String> {
    cmdline
        .split(|b| *b == 0)
        .filter_map(|arg| std::str::from_utf8(arg).ok())
        .find(|arg| arg.ends_with(".ipynb"))
        .and_then(notebook_stem)
}

#[cfg(target_os = "linux")]
fn parent_notebook() -> Option<String> {
    let ppid = std::os::unix::process::parent_id();
    let cmdline = std::fs::read(format!("/proc/{ppid}/cmdline")).ok()?;
    notebook_in_cmdline(&cmdline)
}

#[cfg(not(target_os = "linux"))]
fn parent_notebook() -> Option<String> {
    None
}
