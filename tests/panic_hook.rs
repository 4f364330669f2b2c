//! Panic-hook wrapping is process-global, so it lives in its own test binary
//! with a single test.

use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use notebook_alert::hook::{install_panic_hook, panic_hook_installed};
use notebook_alert::{AlertRequest, AlertSink, AlertStatus};

#[derive(Default)]
struct Recorder {
    requests: Mutex<Vec<AlertRequest>>,
}

impl AlertSink for Recorder {
    fn submit(&self, request: AlertRequest) -> bool {
        self.requests.lock().unwrap().push(request);
        true
    }
}

static ORIGINAL_CALLS: AtomicUsize = AtomicUsize::new(0);

#[test]
fn panics_alert_once_and_keep_original_hook() {
    panic::set_hook(Box::new(|_| {
        ORIGINAL_CALLS.fetch_add(1, Ordering::SeqCst);
    }));

    let recorder = Arc::new(Recorder::default());
    assert!(!panic_hook_installed());
    assert!(install_panic_hook(recorder.clone(), 100));
    assert!(!install_panic_hook(recorder.clone(), 100));
    assert!(!install_panic_hook(recorder.clone(), 100));
    assert!(panic_hook_installed());

    let result = panic::catch_unwind(|| {
        panic!("division by zero");
    });
    assert!(result.is_err());

    assert_eq!(ORIGINAL_CALLS.load(Ordering::SeqCst), 1);
    let requests = recorder.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].status, AlertStatus::Error);
    assert_eq!(requests[0].message, "panic: division by zero");

    let result = panic::catch_unwind(|| {
        let detail = format!("index {} out of range", 7);
        panic!("{detail}");
    });
    assert!(result.is_err());

    assert_eq!(ORIGINAL_CALLS.load(Ordering::SeqCst), 2);
    let requests = recorder.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].message, "panic: index 7 out of range");
}
