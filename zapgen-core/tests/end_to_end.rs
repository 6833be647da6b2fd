// zapgen-core/tests/end_to_end.rs
//! Record-to-script pipeline checks: extraction and rendering chained the
//! way the driver chains them.

use serde_json::json;
use zapgen_common::model::{CaskRecord, RemovalAction};
use zapgen_core::{extract, render, script_filename};

#[test]
fn sample_record_renders_complete_script() {
    let record: CaskRecord = serde_json::from_value(json!({
        "name": ["Sample"],
        "pkgutil": "com.sample.pkg",
        "artifacts": [{"zap": [{"trash": ["~/Library/Sample"]}]}]
    }))
    .unwrap();

    let app_name = record.display_name();
    assert_eq!(app_name, "Sample");

    let actions = extract(&record);
    assert_eq!(
        actions,
        vec![
            RemovalAction::File {
                path: "~/Library/Sample".to_string()
            },
            RemovalAction::PkgutilReceipt {
                id: "com.sample.pkg".to_string()
            },
        ]
    );

    let script = render(&app_name, &actions);
    assert!(script.contains("pkgutil --forget com.sample.pkg 2>/dev/null || true"));
    assert!(script.contains("rm -rf \"$HOME/Library/Sample\" 2>/dev/null || true"));
    assert!(script.ends_with("echo \"Uninstallation complete!\"\nexit 0\n"));

    assert_eq!(script_filename(&app_name), "uninstall_sample.sh");
}

#[test]
fn record_without_cleanup_hints_extracts_nothing() {
    let record: CaskRecord = serde_json::from_value(json!({
        "token": "sample",
        "name": ["Sample"],
        "version": "2.1.0",
        "artifacts": [{"pkg": "Sample.pkg"}]
    }))
    .unwrap();
    assert!(extract(&record).is_empty());
}

#[test]
fn full_cask_shape_round_trips_through_the_pipeline() {
    let record: CaskRecord = serde_json::from_value(json!({
        "token": "sample",
        "name": ["Sample App"],
        "artifacts": [
            "Sample App.app",
            {"binary": "$APPDIR/Sample App.app/Contents/MacOS/sample-cli"},
            {"uninstall": [{"launchctl": ["com.sample.agent"], "quit": "com.sample.app"}]},
            {"zap": [{"trash": ["~/Library/Caches/com.sample"], "signal": {"com.sample.helper": "TERM"}}]}
        ],
        "pkgutil": ["com.sample.pkg"]
    }))
    .unwrap();

    let actions = extract(&record);
    assert_eq!(actions.len(), 7);

    let script = render(&record.display_name(), &actions);
    assert!(script.contains("rm -rf \"/Applications/Sample App.app\""));
    // Placeholder resolves against the application's own name.
    assert!(script
        .contains("/Applications/Sample App.app/Sample App.app/Contents/MacOS/sample-cli"));
    assert!(script.contains("launchctl unload -w /Library/LaunchDaemons/com.sample.agent.plist"));
    assert!(script.contains("killall -9 \"com.sample.app\""));
    assert!(script.contains("killall -9 \"com.sample.helper\""));
    assert!(script.contains("pkgutil --forget com.sample.pkg"));
}
