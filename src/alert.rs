//! Alert requests and their per-status presentation.

use std::fmt;
use std::str::FromStr;

/// Outcome an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    Success,
    Error,
}

impl AlertStatus {
    /// Wire form passed to the renderer as its first argument.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Window and banner heading. The marks are ones egui's bundled fonts
    /// can draw.
    pub fn headline(self) -> &'static str {
        match self {
            Self::Success => "✔ NOTEBOOK COMPLETE ✔",
            Self::Error => "✖ NOTEBOOK ERROR ✖",
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            Self::Success => "Notebook completed successfully!",
            Self::Error => "Notebook encountered an error!",
        }
    }

    /// Background color as RGB.
    pub fn background(self) -> [u8; 3] {
        match self {
            Self::Success => [0x90, 0xEE, 0x90],
            Self::Error => [0xFF, 0xB6, 0xC1],
        }
    }

    /// OK button color as RGB, dark enough to read against the background.
    pub fn button(self) -> [u8; 3] {
        match self {
            Self::Success => [0x2C, 0x3E, 0x50],
            Self::Error => [0x8B, 0x00, 0x00],
        }
    }

    /// Marker printed next to messages in terminal output.
    pub fn glyph(self) -> char {
        match self {
            Self::Success => '✓',
            Self::Error => '✗',
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown alert status '{other}' (expected success or error)")),
        }
    }
}

/// One alert event, built fresh per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRequest {
    pub status: AlertStatus,
    pub message: String,
    /// Session name shown above the message, e.g. a notebook's file stem.
    pub title: Option<String>,
}

impl AlertRequest {
    /// Build a request. An empty or blank message becomes the status default.
    pub fn new(status: AlertStatus, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            status.default_message().to_string()
        } else {
            message
        };
        Self {
            status,
            message,
            title: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertStatus::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertStatus::Error, message)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = if title.trim().is_empty() { None } else { Some(title) };
        self
    }

    /// Positional arguments for the renderer: `<status> <message> [title]`.
    ///
    /// Each value is a single argv entry and is never interpreted by a shell.
    /// NUL bytes cannot cross an exec boundary, so they become U+FFFD.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            self.status.as_str().to_string(),
            scrub_nul(&self.message),
        ];
        if let Some(title) = &self.title {
            args.push(scrub_nul(title));
        }
        args
    }
}

fn scrub_nul(text: &str) -> String {
    text.replace('\0', "\u{FFFD}")
}

/// Truncate to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars).collect();
    format!("{kept}...")
}
