//! The crate-root entry points share one process session, so they get a test
//! binary of their own. The renderer is pointed at a missing file: every
//! launch fails, and none of the calls may notice beyond logging.

use notebook_alert::config::CONFIG_ENV;
use notebook_alert::hook::panic_hook_installed;
use notebook_alert::launcher::RENDERER_ENV;

#[test]
fn entry_points_survive_a_missing_renderer() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var(RENDERER_ENV, dir.path().join("show-alert"));
    std::env::set_var(CONFIG_ENV, dir.path().join("config.yaml"));

    assert!(!panic_hook_installed());
    assert!(notebook_alert::enable());
    assert!(!notebook_alert::enable());
    assert!(!notebook_alert::enable());
    assert!(panic_hook_installed());

    notebook_alert::done(None);
    notebook_alert::done(Some("Analysis complete"));
    notebook_alert::error("x");

    let session = notebook_alert::session();
    assert!(!session.done(Some("still no renderer")));
    assert!(!session.error("still no renderer"));
    assert!(!notebook_alert::configure(notebook_alert::Config::default()));
    assert!(panic_hook_installed());
}
