// zapgen-common/src/model/action.rs
use serde::{Deserialize, Serialize};

/// One cleanup step derived from a cask record. A list of these is ordered
/// and may contain repeats: the same target discovered through several
/// metadata paths is emitted once per discovery, and the rendered script
/// guards every stanza against already-absent targets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RemovalAction {
    /// The main application bundle, already rooted at /Applications.
    AppBundle { path: String },
    /// A generic file or directory to delete. The path is kept literal;
    /// a leading `~` is expanded at render time, not here.
    File { path: String },
    /// A macOS package receipt ID managed by pkgutil.
    PkgutilReceipt { id: String },
    /// A launchd service (Agent/Daemon) label.
    LaunchService { label: String },
    /// A bundle id or process name to force-terminate.
    ProcessSignal { id: String },
    /// A command-line executable. `appdir_relative` marks paths starting
    /// with the `$APPDIR` placeholder, resolved against the application's
    /// own bundle at render time.
    Binary { path: String, appdir_relative: bool },
}
