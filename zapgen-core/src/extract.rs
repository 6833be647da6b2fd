// zapgen-core/src/extract.rs
//! Turns one semi-structured cask record into an ordered list of removal
//! actions. The artifacts sequence is scanned first, in array order, then
//! the top-level pkgutil/launchctl/quit fields. Nothing is deduplicated:
//! the rendered script guards every stanza, so a target discovered through
//! several metadata paths is harmless to repeat.

use serde_json::Value;
use tracing::debug;
use zapgen_common::model::{string_list, CaskRecord, RemovalAction};

/// Where string artifacts and `app` bundle names are rooted.
pub const APPLICATIONS_DIR: &str = "/Applications";
/// Where bare `binary` names are rooted.
pub const BIN_DIR: &str = "/usr/local/bin";
/// Placeholder casks use for "inside the installed application bundle".
/// Resolved at render time against the application's own name.
pub const APPDIR_PLACEHOLDER: &str = "$APPDIR";

const APP_BUNDLE_SUFFIX: &str = ".app";

/// Extract every removal action a record describes. An empty result is
/// valid and means "nothing to clean"; the caller decides whether to skip
/// script generation. Malformed or unrecognized shapes are skipped, never
/// an error.
pub fn extract(record: &CaskRecord) -> Vec<RemovalAction> {
    let mut actions = Vec::new();

    if let Some(artifacts) = &record.artifacts {
        for artifact in artifacts {
            match artifact {
                Value::String(s) if s.ends_with(APP_BUNDLE_SUFFIX) => {
                    actions.push(RemovalAction::AppBundle {
                        path: format!("{APPLICATIONS_DIR}/{s}"),
                    });
                }
                Value::Object(map) => {
                    if let Some(app) = map.get("app") {
                        for name in string_list(app) {
                            actions.push(RemovalAction::AppBundle {
                                path: format!("{APPLICATIONS_DIR}/{name}"),
                            });
                        }
                    }
                    if let Some(binary) = map.get("binary") {
                        for path in string_list(binary) {
                            actions.push(binary_action(path));
                        }
                    }
                    if let Some(uninstall) = map.get("uninstall") {
                        scan_uninstall_stanzas(uninstall, &mut actions);
                    }
                    if let Some(zap) = map.get("zap") {
                        scan_zap_stanzas(zap, &mut actions);
                    }
                }
                _ => {
                    debug!("Skipping unrecognized artifact shape: {artifact}");
                }
            }
        }
    }

    if let Some(ids) = &record.pkgutil {
        for id in ids.to_vec() {
            actions.push(RemovalAction::PkgutilReceipt { id });
        }
    }
    if let Some(labels) = &record.launchctl {
        for label in labels.to_vec() {
            actions.push(RemovalAction::LaunchService { label });
        }
    }
    if let Some(ids) = &record.quit {
        for id in ids.to_vec() {
            actions.push(RemovalAction::ProcessSignal { id });
        }
    }

    actions
}

fn binary_action(path: String) -> RemovalAction {
    if path.starts_with(APPDIR_PLACEHOLDER) {
        RemovalAction::Binary {
            path,
            appdir_relative: true,
        }
    } else if path.starts_with('/') {
        RemovalAction::Binary {
            path,
            appdir_relative: false,
        }
    } else {
        // Bare name, rooted where cask binaries get linked.
        RemovalAction::Binary {
            path: format!("{BIN_DIR}/{path}"),
            appdir_relative: false,
        }
    }
}

/// Normalize a nested stanza value (a map, or a list of maps) into its
/// map items. Anything else yields nothing.
fn stanza_items(value: &Value) -> Vec<&serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => vec![map],
        Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
        _ => Vec::new(),
    }
}

fn scan_uninstall_stanzas(value: &Value, actions: &mut Vec<RemovalAction>) {
    for item in stanza_items(value) {
        if let Some(labels) = item.get("launchctl") {
            for label in string_list(labels) {
                actions.push(RemovalAction::LaunchService { label });
            }
        }
        if let Some(ids) = item.get("quit") {
            for id in string_list(ids) {
                actions.push(RemovalAction::ProcessSignal { id });
            }
        }
    }
}

fn scan_zap_stanzas(value: &Value, actions: &mut Vec<RemovalAction>) {
    for item in stanza_items(value) {
        // Paths are kept literal; `~` expansion happens at render time.
        for key in ["trash", "delete", "rmdir"] {
            if let Some(paths) = item.get(key) {
                for path in string_list(paths) {
                    actions.push(RemovalAction::File { path });
                }
            }
        }
        if let Some(Value::Object(signals)) = item.get("signal") {
            for id in signals.keys() {
                actions.push(RemovalAction::ProcessSignal { id: id.clone() });
            }
        }
    }
}
