//! notebook-alert: raise notebook alerts from a shell or a `!` cell.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use notebook_alert::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "notebook-alert", about = "Flashing desktop alerts for long-running work")]
struct Args {
    /// Path to config.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Green alert: the work finished
    Done {
        #[arg(allow_hyphen_values = true)]
        message: Option<String>,
    },
    /// Red alert: the work failed
    Error {
        #[arg(allow_hyphen_values = true)]
        message: String,
    },
    /// Show a success alert, pause, then an error alert
    Test {
        /// Seconds between the two alerts
        #[arg(long, default_value_t = 3)]
        pause: u64,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    notebook_alert::configure(Config::load(args.config.as_deref()));
    let session = notebook_alert::session();

    let submitted = match args.command {
        Command::Done { message } => session.done(message.as_deref()),
        Command::Error { message } => session.error(&message),
        Command::Test { pause } => {
            info!("Testing notebook alert system...");
            let first = session.done(Some("Test success alert!"));
            info!("Error alert in {pause} seconds...");
            std::thread::sleep(Duration::from_secs(pause));
            let second = session.error("Test error alert!");
            first && second
        }
    };

    if submitted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
