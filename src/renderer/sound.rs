//! One-shot alert sound through rodio.
//!
//! Plays the platform's stock sound for the status when one is installed and
//! decodable, otherwise a short synthesized two-note cue. Either way exactly
//! one cue is queued per alert.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::alert::AlertStatus;

const SUCCESS_SOUNDS: &[&str] = &[
    "/usr/share/sounds/freedesktop/stereo/complete.oga",
    "/System/Library/Sounds/Glass.aiff",
    r"C:\Windows\Media\tada.wav",
];

const ERROR_SOUNDS: &[&str] = &[
    "/usr/share/sounds/freedesktop/stereo/dialog-error.oga",
    "/System/Library/Sounds/Basso.aiff",
    r"C:\Windows\Media\Windows Critical Stop.wav",
];

/// Notes of the fallback cue: rising for success, falling for error.
fn cue_notes(status: AlertStatus) -> [f32; 2] {
    match status {
        AlertStatus::Success => [659.25, 987.77],
        AlertStatus::Error => [392.00, 261.63],
    }
}

fn system_sound(status: AlertStatus) -> Option<PathBuf> {
    let candidates = match status {
        AlertStatus::Success => SUCCESS_SOUNDS,
        AlertStatus::Error => ERROR_SOUNDS,
    };
    candidates.iter().map(PathBuf::from).find(|p| p.is_file())
}

fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>, String> {
    let file = File::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    Decoder::new(BufReader::new(file))
        .map_err(|e| format!("Failed to decode {}: {e}", path.display()))
}

fn append_cue(sink: &Sink, status: AlertStatus) {
    for freq in cue_notes(status) {
        sink.append(
            SineWave::new(freq)
                .take_duration(Duration::from_millis(160))
                .amplify(0.25),
        );
    }
}

/// Play the sound for `status` and block until it finishes.
pub fn play(status: AlertStatus) -> Result<(), String> {
    let stream = OutputStreamBuilder::open_default_stream()
        .map_err(|e| format!("Failed to open audio output: {e}"))?;
    let sink = Sink::connect_new(stream.mixer());

    match system_sound(status).map(|p| open_decoder(&p)) {
        Some(Ok(decoder)) => sink.append(decoder),
        Some(Err(e)) => {
            debug!("{e}, using synthesized cue");
            append_cue(&sink, status);
        }
        None => append_cue(&sink, status),
    }

    sink.sleep_until_end();
    Ok(())
}

/// Play on a background thread; failures are logged only.
pub fn spawn(status: AlertStatus) -> Option<JoinHandle<()>> {
    thread::Builder::new()
        .name("alert-sound".into())
        .spawn(move || {
            if let Err(e) = play(status) {
                warn!("Alert sound failed: {e}");
            }
        })
        .map_err(|e| warn!("Failed to start sound thread: {e}"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cues_rise_for_success_and_fall_for_error() {
        let [a, b] = cue_notes(AlertStatus::Success);
        assert!(b > a);
        let [a, b] = cue_notes(AlertStatus::Error);
        assert!(b < a);
    }

    #[test]
    fn undecodable_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"not audio at all").unwrap();
        assert!(open_decoder(file.path()).is_err());
    }
}
