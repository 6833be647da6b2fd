// zapgen-core/src/script.rs
//! Renders an ordered list of removal actions into an executable bash
//! script. The scaffolding runs under `set -e`; every individual cleanup
//! command is suffixed `2>/dev/null || true` so an already-absent target
//! never aborts the rest of the script.

use std::fmt::Write;

use lazy_static::lazy_static;
use regex::Regex;
use zapgen_common::model::RemovalAction;

use crate::extract::APPDIR_PLACEHOLDER;

lazy_static! {
    static ref NON_WORD_RE: Regex = Regex::new(r"[^\w]").unwrap();
}

/// Render the full uninstall script for one application. Deterministic:
/// identical inputs produce byte-identical text, Unix line endings only.
pub fn render(app_name: &str, actions: &[RemovalAction]) -> String {
    let mut script = ScriptBuilder::new(app_name);
    for action in actions {
        script.push_action(action);
    }
    script.finish()
}

/// Sanitize an application name for use as a filename stem:
/// spaces become underscores, everything outside `\w` is stripped,
/// and the result is lowercased.
pub fn sanitize_name(name: &str) -> String {
    let underscored = name.replace(' ', "_");
    NON_WORD_RE.replace_all(&underscored, "").to_lowercase()
}

/// File name the rendered script is written under.
pub fn script_filename(app_name: &str) -> String {
    format!("uninstall_{}.sh", sanitize_name(app_name))
}

/// Appends one stanza per removal action, keeping the action-kind to
/// shell-text mapping in a single place.
struct ScriptBuilder {
    app_name: String,
    buf: String,
}

impl ScriptBuilder {
    fn new(app_name: &str) -> Self {
        let mut buf = String::new();
        let _ = write!(
            buf,
            "#!/bin/bash\n\
             # Uninstall script for {app_name}\n\
             # Generated by zapgen\n\
             \n\
             # Exit on error\n\
             set -e\n\
             \n\
             echo \"Uninstalling {app_name}...\"\n\
             \n\
             # Check if running as root\n\
             if [ \"$EUID\" -ne 0 ]; then\n\
             \x20\x20echo \"Please run as root\"\n\
             \x20\x20exit 1\n\
             fi\n\
             \n\
             # Kill application process if running\n\
             echo \"Stopping {app_name} if running...\"\n\
             pkill -f \"{app_name}\" 2>/dev/null || true\n"
        );
        Self {
            app_name: app_name.to_string(),
            buf,
        }
    }

    fn push_action(&mut self, action: &RemovalAction) {
        match action {
            RemovalAction::PkgutilReceipt { id } => {
                let _ = write!(
                    self.buf,
                    "\n\
                     # Remove package {id}\n\
                     echo \"Removing package {id}...\"\n\
                     pkgutil --forget {id} 2>/dev/null || true\n"
                );
            }
            RemovalAction::LaunchService { label } => {
                let _ = write!(
                    self.buf,
                    "\n\
                     # Unload service {label}\n\
                     echo \"Unloading service {label}...\"\n\
                     launchctl unload -w /Library/LaunchAgents/{label}.plist 2>/dev/null || true\n\
                     launchctl unload -w /Library/LaunchDaemons/{label}.plist 2>/dev/null || true\n\
                     launchctl unload -w ~/Library/LaunchAgents/{label}.plist 2>/dev/null || true\n"
                );
            }
            RemovalAction::ProcessSignal { id } => {
                let _ = write!(
                    self.buf,
                    "\n\
                     # Kill application {id} if running\n\
                     echo \"Stopping {id} if running...\"\n\
                     killall -9 \"{id}\" 2>/dev/null || true\n"
                );
            }
            RemovalAction::Binary {
                path,
                appdir_relative,
            } => {
                if *appdir_relative {
                    let app_dir = format!("/Applications/{}.app", self.app_name);
                    let resolved = path.replacen(APPDIR_PLACEHOLDER, &app_dir, 1);
                    let _ = write!(
                        self.buf,
                        "\n\
                         # Remove binary {resolved}\n\
                         echo \"Removing binary {resolved}...\"\n\
                         if [ -e \"{resolved}\" ]; then\n\
                         \x20\x20\x20\x20rm -f \"{resolved}\" 2>/dev/null || true\n\
                         fi\n"
                    );
                } else {
                    let _ = write!(
                        self.buf,
                        "\n\
                         # Remove binary {path}\n\
                         echo \"Removing binary {path}...\"\n\
                         rm -f \"{path}\" 2>/dev/null || true\n"
                    );
                }
            }
            RemovalAction::AppBundle { path } | RemovalAction::File { path } => {
                let expanded = expand_tilde(path);
                let _ = write!(
                    self.buf,
                    "\n\
                     # Remove {expanded}\n\
                     echo \"Removing {expanded}...\"\n\
                     if [ -d \"{expanded}\" ]; then\n\
                     \x20\x20\x20\x20rm -rf \"{expanded}\" 2>/dev/null || true\n\
                     elif [ -f \"{expanded}\" ]; then\n\
                     \x20\x20\x20\x20rm -f \"{expanded}\" 2>/dev/null || true\n\
                     fi\n"
                );
            }
        }
    }

    fn finish(mut self) -> String {
        self.buf.push_str(
            "\n\
             echo \"Uninstallation complete!\"\n\
             exit 0\n",
        );
        self.buf
    }
}

/// A leading `~` refers to the invoking user's home directory; the script
/// resolves it at run time through `$HOME`.
fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some(rest) => format!("$HOME{rest}"),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use zapgen_common::model::RemovalAction;

    use super::*;

    #[test]
    fn sanitize_lowercases_and_strips() {
        assert_eq!(sanitize_name("Adobe Acrobat Reader"), "adobe_acrobat_reader");
        assert_eq!(sanitize_name("1Password 7"), "1password_7");
        assert_eq!(sanitize_name("Microsoft OneNote (beta)"), "microsoft_onenote_beta");
    }

    #[test]
    fn script_filename_has_fixed_prefix_and_suffix() {
        assert_eq!(
            script_filename("Adobe Acrobat Reader"),
            "uninstall_adobe_acrobat_reader.sh"
        );
    }

    #[test]
    fn render_is_idempotent() {
        let actions = vec![
            RemovalAction::PkgutilReceipt {
                id: "com.sample.pkg".to_string(),
            },
            RemovalAction::File {
                path: "~/Library/Sample".to_string(),
            },
        ];
        assert_eq!(render("Sample", &actions), render("Sample", &actions));
    }

    #[test]
    fn header_aborts_without_root_and_kills_by_app_name() {
        let script = render("Sample", &[]);
        assert!(script.starts_with("#!/bin/bash\n"));
        assert!(script.contains("set -e\n"));
        assert!(script.contains("if [ \"$EUID\" -ne 0 ]; then\n  echo \"Please run as root\"\n  exit 1\nfi"));
        assert!(script.contains("pkill -f \"Sample\" 2>/dev/null || true"));
        assert!(script.ends_with("echo \"Uninstallation complete!\"\nexit 0\n"));
        assert!(!script.contains('\r'));
    }

    #[test]
    fn pkgutil_stanza_ignores_failure() {
        let script = render(
            "Sample",
            &[RemovalAction::PkgutilReceipt {
                id: "com.sample.pkg".to_string(),
            }],
        );
        assert!(script.contains("pkgutil --forget com.sample.pkg 2>/dev/null || true"));
    }

    #[test]
    fn launch_service_unloads_all_three_locations() {
        let script = render(
            "Sample",
            &[RemovalAction::LaunchService {
                label: "com.sample.agent".to_string(),
            }],
        );
        for location in [
            "/Library/LaunchAgents/com.sample.agent.plist",
            "/Library/LaunchDaemons/com.sample.agent.plist",
            "~/Library/LaunchAgents/com.sample.agent.plist",
        ] {
            assert!(
                script.contains(&format!("launchctl unload -w {location} 2>/dev/null || true")),
                "missing unload for {location}"
            );
        }
    }

    #[test]
    fn placeholder_binary_resolves_against_app_name() {
        let script = render(
            "Foo",
            &[RemovalAction::Binary {
                path: "$APPDIR/bin/tool".to_string(),
                appdir_relative: true,
            }],
        );
        assert!(script.contains("if [ -e \"/Applications/Foo.app/bin/tool\" ]; then"));
        assert!(script.contains("rm -f \"/Applications/Foo.app/bin/tool\" 2>/dev/null || true"));
        assert!(!script.contains("$APPDIR"));
    }

    #[test]
    fn absolute_binary_is_removed_directly() {
        let script = render(
            "Foo",
            &[RemovalAction::Binary {
                path: "/usr/local/bin/foo".to_string(),
                appdir_relative: false,
            }],
        );
        assert!(script.contains("rm -f \"/usr/local/bin/foo\" 2>/dev/null || true"));
    }

    #[test]
    fn file_paths_expand_home_and_guard_on_type() {
        let script = render(
            "Sample",
            &[RemovalAction::File {
                path: "~/Library/Sample".to_string(),
            }],
        );
        assert!(script.contains("if [ -d \"$HOME/Library/Sample\" ]; then"));
        assert!(script.contains("rm -rf \"$HOME/Library/Sample\" 2>/dev/null || true"));
        assert!(script.contains("elif [ -f \"$HOME/Library/Sample\" ]; then"));
        assert!(!script.contains("~/Library/Sample"));
    }

    #[test]
    fn stanzas_keep_input_order_including_repeats() {
        let actions = vec![
            RemovalAction::ProcessSignal {
                id: "com.sample".to_string(),
            },
            RemovalAction::ProcessSignal {
                id: "com.sample".to_string(),
            },
        ];
        let script = render("Sample", &actions);
        assert_eq!(
            script.matches("killall -9 \"com.sample\" 2>/dev/null || true").count(),
            2
        );
    }
}
