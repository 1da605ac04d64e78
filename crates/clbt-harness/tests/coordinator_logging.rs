#![forbid(unsafe_code)]

//! Refusals are logged at the right level and never panic.

use clbt_harness::{capture, venue_coordinator};
use clbt_overlay::ConfigPatch;
use tracing::Level;

#[test]
fn unknown_surface_warns() {
    let mut c = venue_coordinator();
    let (opened, logs) = capture(|| c.open("unknownId"));
    assert!(!opened);

    let warning = logs.warnings().next().expect("one warning");
    assert_eq!(warning.target, "clbt_overlay");
    assert_eq!(warning.field("op"), Some("open"));
    assert!(warning.field("err").unwrap().contains("unknownId"));
    assert_eq!(logs.errors().count(), 0);
}

#[test]
fn blocked_and_sequence_refusals_warn() {
    let mut c = venue_coordinator();
    c.block("ageGateModal");
    let ((), logs) = capture(|| {
        assert!(!c.open("ageGateModal"));
        assert!(!c.open("reportModal"));
    });
    let messages: Vec<&str> = logs
        .warnings()
        .filter_map(|e| e.field("err"))
        .collect();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("blocked"));
    assert!(messages[1].contains("first step"));
}

#[test]
fn overlay_policy_refusal_warns() {
    let mut c = venue_coordinator();
    c.configure(ConfigPatch::new().allow_modal_over_overlay(false));
    assert!(c.open("fullMapOverlay"));
    let (opened, logs) = capture(|| c.open("pointsModal"));
    assert!(!opened);
    assert_eq!(logs.warnings().count(), 1);
}

#[test]
fn missing_element_is_an_error() {
    let mut c = venue_coordinator();
    c.host_mut().remove_element("pointsModal");
    let (opened, logs) = capture(|| c.open("pointsModal"));
    assert!(!opened);
    assert_eq!(logs.warnings().count(), 0);
    let error = logs.errors().next().expect("one error");
    assert!(error.field("err").unwrap().contains("pointsModal"));
}

#[test]
fn unknown_view_warns() {
    let mut c = venue_coordinator();
    let (switched, logs) = capture(|| c.toggle_internal_view("resultsOverlay", "grid"));
    assert!(!switched);
    assert_eq!(logs.warnings().count(), 1);
    assert_eq!(c.get_internal_view("resultsOverlay"), Some("list"));
}

#[test]
fn debug_mode_traces_state_after_mutations() {
    let mut c = venue_coordinator();
    c.configure(ConfigPatch::new().debug_mode(true));
    let ((), logs) = capture(|| {
        c.open("nameModal");
        c.close("nameModal");
    });
    let states: Vec<&str> = logs
        .at(Level::DEBUG)
        .filter_map(|e| e.field("state"))
        .collect();
    assert_eq!(states.len(), 2);
    assert!(states[0].contains("modals=[nameModal@1000]"));
    assert!(states[1].contains("scroll_locked=false"));
}

#[test]
fn quiet_by_default() {
    let mut c = venue_coordinator();
    let ((), logs) = capture(|| {
        c.open("nameModal");
        c.close("nameModal");
        c.close("nameModal");
    });
    assert!(logs.events().iter().all(|e| e.level == Level::DEBUG));
    assert!(logs.events().iter().all(|e| e.field("state").is_none()));
}
