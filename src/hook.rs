//! Error alerts for uncaught errors.
//!
//! Wraps an existing uncaught-error display routine so that it still runs
//! first, unchanged, and an error alert is submitted after it. Two hosts:
//!
//! - the process panic hook (`std::panic::take_hook` / `set_hook`);
//! - [`ErrorDisplay`], a display slot an interactive shell routes its
//!   uncaught errors through.
//!
//! Both are wrapped at most once; later installs are no-ops. When a shell
//! shows a panic that the panic hook already alerted for, the display wrapper
//! leaves it at that one alert.

use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, PanicHookInfo};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

use crate::alert::{truncate, AlertRequest};
use crate::launcher::AlertSink;

/// Shown when neither a type name nor a message is known.
const UNKNOWN_ERROR: &str = "An error occurred during execution";

/// What the hook knows about the error that reached it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncaughtError {
    pub type_name: String,
    pub message: String,
}

impl UncaughtError {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Describe any error value by its short Rust type name and `Display`.
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        Self::new(short_type_name(std::any::type_name::<E>()), error.to_string())
    }

    pub fn from_panic(info: &PanicHookInfo<'_>) -> Self {
        Self::new("panic", payload_message(info.payload()))
    }

    /// `"<Type>: <message>"`, with the message cut to `max_chars` characters.
    pub fn alert_message(&self, max_chars: usize) -> String {
        let type_name = self.type_name.trim();
        let message = self.message.trim();
        match (type_name.is_empty(), message.is_empty()) {
            (true, true) => UNKNOWN_ERROR.to_string(),
            (false, true) => type_name.to_string(),
            (true, false) => truncate(message, max_chars),
            (false, false) => format!("{type_name}: {}", truncate(message, max_chars)),
        }
    }
}

/// `alloc::string::String` → `String`, `Foo<Bar>` → `Foo`.
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

thread_local! {
    /// Payload of the last panic on this thread that raised an alert.
    static PANIC_ALERTED: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn note_panic_alert(message: &str) {
    let _ = PANIC_ALERTED.try_with(|alerted| alerted.replace(Some(message.to_string())));
}

/// Consume this thread's panic marker; `true` if `error` is that panic.
fn already_alerted(error: &UncaughtError) -> bool {
    let Ok(Some(payload)) = PANIC_ALERTED.try_with(|alerted| alerted.take()) else {
        return false;
    };
    error.message.trim().contains(payload.trim())
}

pub type DisplayRoutine = Arc<dyn Fn(&UncaughtError) + Send + Sync>;

/// An interactive shell's uncaught-error display slot.
pub struct ErrorDisplay {
    routine: Mutex<DisplayRoutine>,
    hooked: AtomicBool,
}

impl ErrorDisplay {
    pub fn new(routine: impl Fn(&UncaughtError) + Send + Sync + 'static) -> Self {
        Self {
            routine: Mutex::new(Arc::new(routine)),
            hooked: AtomicBool::new(false),
        }
    }

    /// Render one uncaught error through the current routine.
    pub fn show(&self, error: &UncaughtError) {
        // Clone out of the lock so the routine may itself touch the slot.
        let routine = self.current();
        routine(error);
    }

    pub fn is_hooked(&self) -> bool {
        self.hooked.load(Ordering::SeqCst)
    }

    fn current(&self) -> DisplayRoutine {
        self.routine
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Wrap `display` so every uncaught error also raises an error alert.
///
/// Returns `true` only on the call that installed the wrapper.
pub fn install(display: &ErrorDisplay, sink: Arc<dyn AlertSink>, max_chars: usize) -> bool {
    if display.hooked.swap(true, Ordering::SeqCst) {
        debug!("Error display already hooked");
        return false;
    }

    let mut slot = display
        .routine
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let original = Arc::clone(&slot);
    *slot = Arc::new(move |error: &UncaughtError| {
        original(error);
        if already_alerted(error) {
            debug!("Panic already alerted: {}", error.message);
            return;
        }
        sink.submit(AlertRequest::error(error.alert_message(max_chars)));
    });
    debug!("Error display hooked");
    true
}

static PANIC_HOOK_INSTALLED: Mutex<bool> = Mutex::new(false);

/// Wrap the process panic hook so every panic also raises an error alert.
///
/// Returns `true` only on the call that installed the wrapper. Calls made
/// while the current thread is panicking are skipped and leave the hook
/// uninstalled.
pub fn install_panic_hook(sink: Arc<dyn AlertSink>, max_chars: usize) -> bool {
    let mut installed = PANIC_HOOK_INSTALLED
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if *installed {
        debug!("Panic hook already installed");
        return false;
    }
    // take_hook panics on a panicking thread.
    if std::thread::panicking() {
        warn!("Cannot install panic alerts while panicking");
        return false;
    }

    let original = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        original(info);
        let error = UncaughtError::from_panic(info);
        sink.submit(AlertRequest::error(error.alert_message(max_chars)));
        note_panic_alert(&error.message);
    }));
    *installed = true;
    debug!("Panic hook installed");
    true
}

pub fn panic_hook_installed() -> bool {
    *PANIC_HOOK_INSTALLED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}
