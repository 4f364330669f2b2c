//! notebook-alert: flashing desktop alerts for interactive sessions.
//!
//! ```no_run
//! notebook_alert::enable();
//! // ... long-running work; any panic now raises a red alert ...
//! notebook_alert::done(Some("Processed 1000 rows"));
//! ```
//!
//! The first call to [`enable`], [`done`] or [`error`] creates the process
//! session and installs the panic-hook wrapper. Alerts are shown by the
//! `show-alert` renderer, launched as a detached process; nothing here ever
//! blocks on it or reports its failures as errors.

pub mod alert;
pub mod config;
pub mod hook;
pub mod launcher;
#[cfg(feature = "renderer-gui")]
pub mod renderer;
pub mod session;

#[cfg(test)]
mod test_support;

use std::sync::{Arc, OnceLock};

pub use alert::{AlertRequest, AlertStatus};
pub use config::Config;
pub use hook::{ErrorDisplay, UncaughtError};
pub use launcher::{AlertSink, Launcher};
pub use session::Session;

static SESSION: OnceLock<Arc<Session>> = OnceLock::new();

/// Create the process session from `config` unless one already exists.
///
/// Returns `false` when a session was already running; its configuration
/// is kept.
pub fn configure(config: Config) -> bool {
    let mut created = false;
    SESSION.get_or_init(|| {
        created = true;
        start(&config)
    });
    if created {
        session().install_panic_hook();
    }
    created
}

/// The process session, created from the default config search on first use.
pub fn session() -> &'static Arc<Session> {
    SESSION.get_or_init(|| start(&Config::load(None)))
}

fn start(config: &Config) -> Arc<Session> {
    Arc::new(Session::new(config))
}

/// Install the panic-hook wrapper. Safe to call any number of times.
pub fn enable() -> bool {
    session().install_panic_hook()
}

/// Success alert with `message`, or the default message when `None`.
pub fn done(message: Option<&str>) {
    ensure_enabled().done(message);
}

/// Error alert for manual use outside the automatic hook.
pub fn error(message: &str) {
    ensure_enabled().error(message);
}

fn ensure_enabled() -> &'static Arc<Session> {
    let session = session();
    if !hook::panic_hook_installed() {
        session.install_panic_hook();
    }
    session
}
