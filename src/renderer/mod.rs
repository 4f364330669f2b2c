//! Alert renderer: what the `show-alert` process does with one request.
//!
//! - `schedule`: flash/close timing
//! - `sound`: one system sound or synthesized cue (rodio)
//! - `notifier`: one OS notification banner (notify-rust)
//! - `window`: the flashing always-on-top window (eframe)
//!
//! Sound and notification are best-effort and run on their own threads; the
//! window is the channel that must appear. Built only with the
//! `renderer-gui` feature.

pub mod notifier;
pub mod schedule;
pub mod sound;
pub mod window;

use std::thread::{self, JoinHandle};

use chrono::Local;
use tracing::{debug, warn};

use crate::alert::{truncate, AlertRequest};
use crate::config::Config;
use notifier::Notifier;
use schedule::FlashSchedule;

/// Longest notification body, in characters.
const BANNER_BODY_CHARS: usize = 100;

/// Text shown under the headline: the title, then the message, or the
/// completion time when there is no message.
pub fn display_body(request: &AlertRequest) -> String {
    let mut body = String::new();
    if let Some(title) = request.title.as_deref().filter(|t| !t.trim().is_empty()) {
        body.push_str(title);
        body.push_str("\n\n");
    }
    if request.message.trim().is_empty() {
        body.push_str(&format!("Completed at {}", Local::now().format("%I:%M:%S %p")));
    } else {
        body.push_str(&request.message);
    }
    body
}

/// Fire the sound and notification according to config. Never blocks.
pub fn start_side_channels(
    request: &AlertRequest,
    body: &str,
    config: &Config,
    schedule: &FlashSchedule,
) -> Vec<JoinHandle<()>> {
    let mut handles = Vec::new();
    if config.feedback.sounds {
        handles.extend(sound::spawn(request.status));
    } else {
        debug!("Sounds disabled");
    }

    let notifier = Notifier::new(config.feedback.notifications);
    if !notifier.is_enabled() {
        debug!("Notifications disabled");
        return handles;
    }
    let status = request.status;
    let summary = status.headline().to_string();
    let banner = truncate(body, BANNER_BODY_CHARS);
    let timeout_ms = u32::try_from(schedule.duration().as_millis()).unwrap_or(u32::MAX);
    match thread::Builder::new()
        .name("alert-notification".into())
        .spawn(move || notifier.notify(status, &summary, &banner, timeout_ms))
    {
        Ok(handle) => handles.push(handle),
        Err(e) => warn!("Failed to start notification thread: {e}"),
    }
    handles
}

/// Present one alert: side channels first, then the window until it closes.
pub fn render(request: AlertRequest, config: &Config) -> Result<(), String> {
    let schedule = FlashSchedule::from_config(&config.timing);
    let body = display_body(&request);
    let side_channels = start_side_channels(&request, &body, config, &schedule);

    let shown = window::run(request, body, schedule, &config.window);
    if shown.is_err() {
        // No window; let the sound and banner finish before the process exits.
        for handle in side_channels {
            let _ = handle.join();
        }
    }
    shown
}
