//! Fire-and-forget launch of the `show-alert` renderer.
//!
//! The renderer runs as an independent process in its own process group with
//! null stdio. A short-lived reaper thread collects its exit status; nothing
//! is ever read back from it.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, info, warn};

use crate::alert::AlertRequest;
use crate::config::LauncherConfig;

/// Environment variable naming the renderer executable.
pub const RENDERER_ENV: &str = "NOTEBOOK_ALERT_RENDERER";

/// File name of the renderer binary.
pub const RENDERER_NAME: &str = "show-alert";

/// Anything that accepts alert requests.
///
/// `submit` reports whether the request was handed off. It must not panic:
/// it is called from inside panic hooks.
pub trait AlertSink: Send + Sync {
    fn submit(&self, request: AlertRequest) -> bool;
}

pub struct Launcher {
    /// Configured renderer location, consulted after the environment.
    configured: Option<PathBuf>,
    /// Fixed renderer location; skips resolution entirely.
    pinned: Option<PathBuf>,
}

impl Launcher {
    pub fn new(config: &LauncherConfig) -> Self {
        Self {
            configured: config.renderer_path.clone(),
            pinned: None,
        }
    }

    /// Launcher that always runs the given executable.
    pub fn with_renderer(path: impl Into<PathBuf>) -> Self {
        Self {
            configured: None,
            pinned: Some(path.into()),
        }
    }

    /// Start a renderer for `request` and return without waiting for it.
    pub fn notify(&self, request: &AlertRequest) -> bool {
        let Some(renderer) = self.resolve_renderer() else {
            warn!("{RENDERER_NAME} not found, cannot show desktop alert");
            info!("{} {}", request.status.glyph(), request.message);
            return false;
        };

        match spawn_detached(&renderer, request) {
            Ok(()) => true,
            Err(e) => {
                warn!("Could not launch alert: {e}");
                info!("{} {}", request.status.glyph(), request.message);
                false
            }
        }
    }

    /// Locate the renderer. The working directory is never consulted.
    pub fn resolve_renderer(&self) -> Option<PathBuf> {
        if let Some(path) = &self.pinned {
            return path.is_file().then(|| path.clone());
        }

        let from_env = std::env::var_os(RENDERER_ENV).map(PathBuf::from);
        first_renderer(from_env, self.configured.clone(), installed_candidates)
    }
}

/// A renderer named in the environment is authoritative: when it is not a
/// file, no other location is tried.
fn first_renderer(
    from_env: Option<PathBuf>,
    configured: Option<PathBuf>,
    installed: impl FnOnce() -> Vec<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = from_env {
        if path.is_file() {
            return Some(path);
        }
        debug!("${RENDERER_ENV} is not a file: {}", path.display());
        return None;
    }

    configured
        .into_iter()
        .chain(installed())
        .find(|p| p.is_file())
}

impl AlertSink for Launcher {
    fn submit(&self, request: AlertRequest) -> bool {
        self.notify(&request)
    }
}

/// Renderer locations derived from the running executable: its own directory,
/// then the parent of that (`target/<profile>/deps` → `target/<profile>`).
pub fn installed_candidates() -> Vec<PathBuf> {
    let file_name = format!("{RENDERER_NAME}{}", std::env::consts::EXE_SUFFIX);
    let Ok(exe) = std::env::current_exe() else {
        return Vec::new();
    };
    exe.parent()
        .into_iter()
        .flat_map(|dir| [Some(dir), dir.parent()])
        .flatten()
        .map(|dir| dir.join(&file_name))
        .collect()
}

fn spawn_detached(renderer: &Path, request: &AlertRequest) -> Result<(), String> {
    let mut command = Command::new(renderer);
    command
        .arg("--")
        .args(request.to_args())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    detach(&mut command);

    let mut child = command
        .spawn()
        .map_err(|e| format!("Failed to spawn {}: {e}", renderer.display()))?;
    let pid = child.id();
    debug!("Launched {} (pid {pid}) for {} alert", renderer.display(), request.status);

    let reaper = thread::Builder::new()
        .name("show-alert-reaper".into())
        .spawn(move || match child.wait() {
            Ok(status) => debug!("Renderer {pid} exited: {status}"),
            Err(e) => debug!("Failed to wait for renderer {pid}: {e}"),
        });
    if let Err(e) = reaper {
        debug!("Renderer {pid} left unreaped: {e}");
    }

    Ok(())
}

#[cfg(unix)]
fn detach(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(windows)]
fn detach(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_command: &mut Command) {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn missing_renderer_is_not_submitted() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = Launcher::with_renderer(dir.path().join("show-alert"));
        assert!(!launcher.notify(&AlertRequest::error("boom")));
        assert!(!launcher.submit(AlertRequest::success("")));
    }

    #[test]
    fn directory_is_not_a_renderer() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = Launcher::with_renderer(dir.path());
        assert!(launcher.resolve_renderer().is_none());
    }

    #[test]
    fn installed_candidates_follow_the_executable() {
        let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
        let candidates = installed_candidates();
        assert!(!candidates.is_empty());
        assert!(candidates[0].starts_with(&exe_dir));
        assert!(candidates.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn env_renderer_that_is_missing_stops_the_search() {
        let dir = tempfile::tempdir().unwrap();
        let configured = dir.path().join("configured");
        std::fs::write(&configured, "").unwrap();
        let installed = dir.path().join("installed");
        std::fs::write(&installed, "").unwrap();

        let missing = dir.path().join("show-alert");
        let found = first_renderer(Some(missing), Some(configured.clone()), || {
            vec![installed.clone()]
        });
        assert_eq!(found, None);

        let found = first_renderer(None, Some(configured.clone()), || vec![installed.clone()]);
        assert_eq!(found, Some(configured.clone()));

        let found = first_renderer(Some(installed.clone()), Some(configured), Vec::new);
        assert_eq!(found, Some(installed));
    }

    #[test]
    fn installed_renderer_is_the_last_resort() {
        let dir = tempfile::tempdir().unwrap();
        let installed = dir.path().join("show-alert");
        std::fs::write(&installed, "").unwrap();

        let found = first_renderer(None, Some(dir.path().join("gone")), || {
            vec![dir.path().join("also-gone"), installed.clone()]
        });
        assert_eq!(found, Some(installed));
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("show-alert");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    fn wait_for(path: &Path) -> String {
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline {
            if let Ok(contents) = std::fs::read_to_string(path) {
                return contents;
            }
            thread::sleep(Duration::from_millis(20));
        }
        panic!("renderer never wrote {}", path.display());
    }

    #[cfg(unix)]
    #[test]
    fn renderer_receives_status_message_and_title() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(
            dir.path(),
            r#"printf '%s\n' "$@" > "$0.tmp" && mv "$0.tmp" "$0.args""#,
        );
        let launcher = Launcher::with_renderer(&script);

        let request = AlertRequest::error("ValueError: bad $(id) \"quote\" -x")
            .with_title("analysis");
        assert!(launcher.notify(&request));

        let args = wait_for(&dir.path().join("show-alert.args"));
        let lines: Vec<&str> = args.lines().collect();
        assert_eq!(
            lines,
            vec!["--", "error", "ValueError: bad $(id) \"quote\" -x", "analysis"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn notify_does_not_wait_for_renderer() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "sleep 5");
        let launcher = Launcher::with_renderer(&script);

        let started = Instant::now();
        assert!(launcher.notify(&AlertRequest::success("done")));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[cfg(unix)]
    #[test]
    fn failing_renderer_still_counts_as_submitted() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "exit 3");
        let launcher = Launcher::with_renderer(&script);
        assert!(launcher.notify(&AlertRequest::error("boom")));
    }

    #[cfg(unix)]
    #[test]
    fn configured_path_wins_without_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "exit 0");
        let launcher = Launcher::new(&LauncherConfig {
            renderer_path: Some(script.clone()),
            ..LauncherConfig::default()
        });
        if std::env::var_os(RENDERER_ENV).is_none() {
            assert_eq!(launcher.resolve_renderer(), Some(script));
        }
    }
}
