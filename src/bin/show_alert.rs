//! show-alert: renders one notebook alert and exits.
//!
//! Launched detached by the notebook-alert launcher as
//! `show-alert -- <success|error> [message] [title]`. Flashes a colored
//! window, plays one sound, posts one notification, and closes itself after
//! the configured display duration.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use clap::Parser;
use notebook_alert::renderer::{self, schedule::FlashSchedule};
use notebook_alert::{AlertRequest, AlertStatus, Config};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "show-alert", about = "Show a flashing notebook alert window")]
struct Args {
    /// success or error
    status: AlertStatus,

    /// Message shown under the headline
    #[arg(default_value = "", allow_hyphen_values = true)]
    message: String,

    /// Session name shown above the message
    #[arg(allow_hyphen_values = true)]
    title: Option<String>,

    /// Path to config.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not play a sound
    #[arg(long)]
    no_sound: bool,

    /// Do not post a desktop notification
    #[arg(long)]
    no_notification: bool,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info,eframe=warn,egui_glow=warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(args.config.as_deref());
    if args.no_sound {
        config.feedback.sounds = false;
    }
    if args.no_notification {
        config.feedback.notifications = false;
    }

    // The event loop can stop delivering frames (minimized, hidden
    // workspace); this bounds the process lifetime regardless.
    let deadline = FlashSchedule::from_config(&config.timing).watchdog_deadline();
    if let Err(e) = thread::Builder::new()
        .name("alert-watchdog".into())
        .spawn(move || {
            thread::sleep(deadline);
            warn!("Alert window still open after {deadline:?}, exiting");
            std::process::exit(0);
        })
    {
        warn!("Failed to start watchdog: {e}");
    }

    let request = AlertRequest {
        status: args.status,
        message: args.message,
        title: args.title.filter(|t| !t.trim().is_empty()),
    };

    match renderer::render(request, &config) {
        Ok(()) => {
            info!("Alert closed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
