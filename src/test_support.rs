use std::sync::{Arc, Mutex};

use crate::alert::AlertRequest;
use crate::launcher::AlertSink;

/// Sink that keeps every request instead of launching anything.
#[derive(Default)]
pub struct RecordingSink {
    requests: Mutex<Vec<AlertRequest>>,
    log: Option<Arc<Mutex<Vec<String>>>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Also appends `"alert <status>"` to a shared event log.
    pub fn with_log(log: Arc<Mutex<Vec<String>>>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            log: Some(log),
        })
    }

    pub fn requests(&self) -> Vec<AlertRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingSink {
    fn submit(&self, request: AlertRequest) -> bool {
        if let Some(log) = &self.log {
            log.lock().unwrap().push(format!("alert {}", request.status));
        }
        self.requests.lock().unwrap().push(request);
        true
    }
}
