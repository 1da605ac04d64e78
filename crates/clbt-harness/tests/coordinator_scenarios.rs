//! End-to-end scenarios over the venue finder catalog.
//!
//! Each test drives the coordinator the way a page module would and checks
//! both the coordinator's own state and what it projected onto the document.

#![forbid(unsafe_code)]

use std::cell::Cell;
use std::rc::Rc;

use clbt_harness::{check_invariants, venue_coordinator};
use clbt_overlay::testing::HostCall;
use clbt_overlay::{ConfigPatch, InputEvent, OpenOptions, OverlayError};
use pretty_assertions::assert_eq;

#[test]
fn search_inputs_replace_each_other() {
    let mut c = venue_coordinator();

    assert!(c.open("nameModal"));
    assert_eq!(c.active().modals, vec!["nameModal"]);

    assert!(c.open("areaModal"));
    assert_eq!(c.active().modals, vec!["areaModal"]);
    assert!(!c.is_open("nameModal"));
    assert!(c.is_open("areaModal"));
    assert!(!c.host().is_displayed("nameModal"));
    check_invariants(&c).unwrap();
}

#[test]
fn status_flow_must_start_at_first_step() {
    let mut c = venue_coordinator();

    assert!(!c.open("gfStatusConfirmModal"));
    assert!(c.active().is_empty());

    assert!(c.open("gfStatusModal"));
    assert!(c.open("gfStatusConfirmModal"));
    assert_eq!(
        c.active().modals,
        vec!["gfStatusModal", "gfStatusConfirmModal"]
    );
    check_invariants(&c).unwrap();
}

#[test]
fn status_flow_rejects_backward_steps() {
    let mut c = venue_coordinator();
    assert!(c.open("gfStatusModal"));
    assert!(c.open("gfStatusConfirmModal"));
    assert!(c.close("gfStatusModal"));

    assert_eq!(
        c.try_open("gfStatusModal", OpenOptions::new()).unwrap_err(),
        OverlayError::OrderViolation {
            id: "gfStatusModal",
            order: 1,
            top: "gfStatusConfirmModal",
            top_order: 2,
        }
    );
    assert!(c.is_open("gfStatusConfirmModal"));
}

#[test]
fn status_flow_runs_all_four_steps_and_is_torn_down_as_a_group() {
    let mut c = venue_coordinator();
    for step in [
        "gfStatusModal",
        "gfStatusConfirmModal",
        "beerDetailsPromptModal",
        "reportModal",
    ] {
        assert!(c.open(step), "{step} should open");
    }
    let z: Vec<u32> = c
        .active()
        .modals
        .iter()
        .map(|id| c.z_index_of(id).unwrap())
        .collect();
    assert_eq!(z, vec![1000, 1010, 1020, 1030]);

    c.close_group("status", None);
    assert!(c.active().is_empty());
    assert!(!c.scroll_locked());
    check_invariants(&c).unwrap();
}

#[test]
fn unknown_surface_is_harmless() {
    let mut c = venue_coordinator();
    assert!(!c.open("unknownId"));
    assert!(c.active().all.is_empty());
    assert!(c.host().calls().is_empty());
}

#[test]
fn results_overlay_views() {
    let mut c = venue_coordinator();
    assert!(c.open("resultsOverlay"));
    assert_eq!(c.get_internal_view("resultsOverlay"), Some("list"));

    assert!(c.toggle_internal_view("resultsOverlay", "map"));
    assert_eq!(c.get_internal_view("resultsOverlay"), Some("map"));
    assert!(c.is_open("resultsOverlay"));
    assert_eq!(c.active().overlays, vec!["resultsOverlay"]);
    assert_eq!(
        c.host().element("resultsMapContainer").unwrap().display,
        "block"
    );
    assert_eq!(
        c.host().element("resultsListContainer").unwrap().display,
        "none"
    );
    check_invariants(&c).unwrap();
}

#[test]
fn age_gate_block_cycle() {
    let mut c = venue_coordinator();
    c.block("ageGateModal");
    assert!(!c.open("ageGateModal"));
    c.unblock("ageGateModal");
    assert!(c.open("ageGateModal"));
}

#[test]
fn reopen_runs_refresh_callback_once() {
    let mut c = venue_coordinator();
    assert!(c.open("pointsModal"));

    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    assert!(c.open_with(
        "pointsModal",
        OpenOptions::new().on_open(move |_, _| seen.set(seen.get() + 1))
    ));
    assert_eq!(count.get(), 1);
    assert_eq!(c.active().all, vec!["pointsModal"]);
}

#[test]
fn primary_sections_swap_and_restore_home() {
    let mut c = venue_coordinator();
    assert!(c.open("resultsOverlay"));
    assert!(!c.host().home_visible());

    assert!(c.open("communityHubOverlay"));
    assert_eq!(c.active().overlays, vec!["communityHubOverlay"]);
    assert_eq!(c.get_internal_view("communityHubOverlay"), Some("feed"));

    assert!(c.open("venueDetailsOverlay"));
    assert_eq!(
        c.active().overlays,
        vec!["communityHubOverlay", "venueDetailsOverlay"]
    );

    c.close_all_overlays();
    assert!(c.host().home_visible());
    check_invariants(&c).unwrap();
}

#[test]
fn escape_walks_down_the_stacks() {
    let mut c = venue_coordinator();
    assert!(c.open("resultsOverlay"));
    assert!(c.open("gfStatusModal"));
    assert!(c.open("gfStatusConfirmModal"));

    assert_eq!(c.handle_input(&InputEvent::Escape), Some("gfStatusConfirmModal"));
    assert_eq!(c.handle_input(&InputEvent::Escape), Some("gfStatusModal"));
    assert_eq!(c.handle_input(&InputEvent::Escape), Some("resultsOverlay"));
    assert_eq!(c.handle_input(&InputEvent::Escape), None);
    assert!(!c.scroll_locked());
}

#[test]
fn age_gate_ignores_escape_and_backdrop() {
    let mut c = venue_coordinator();
    assert!(c.open("ageGateModal"));
    assert_eq!(c.handle_input(&InputEvent::Escape), None);
    assert_eq!(c.handle_input(&InputEvent::backdrop("ageGateModal")), None);
    assert!(c.is_open("ageGateModal"));
}

#[test]
fn cookie_banner_keeps_pinned_z_index() {
    let mut c = venue_coordinator();
    assert!(c.open("cookieConsent"));
    assert!(c.open("resultsOverlay"));
    assert_eq!(c.host().z_index("cookieConsent"), Some(10_000));
    assert_eq!(c.host().z_index("resultsOverlay"), Some(810));
    assert_eq!(c.host().element("cookieConsent").unwrap().display, "block");
}

#[test]
fn cookie_banner_does_not_count_as_an_open_overlay() {
    let mut c = venue_coordinator();
    c.configure(ConfigPatch::new().allow_modal_over_overlay(false));
    assert!(c.open("cookieConsent"));
    assert!(c.open("nameModal"));
    assert_eq!(c.active().overlays, vec!["cookieConsent"]);
    assert_eq!(c.active().modals, vec!["nameModal"]);

    assert!(c.open("resultsOverlay"));
    assert!(!c.open("areaModal"));
    check_invariants(&c).unwrap();
}

#[test]
fn escape_reaches_overlays_under_the_cookie_banner() {
    let mut c = venue_coordinator();
    assert!(c.open("resultsOverlay"));
    assert!(c.open("cookieConsent"));

    assert_eq!(c.handle_input(&InputEvent::Escape), Some("resultsOverlay"));
    assert!(c.is_open("cookieConsent"));
    assert_eq!(c.handle_input(&InputEvent::Escape), None);
    assert!(c.is_open("cookieConsent"));
}

#[test]
fn onboarding_opens_over_overlays_when_policy_forbids_modals() {
    let mut c = venue_coordinator();
    c.configure(ConfigPatch::new().allow_modal_over_overlay(false));
    assert!(c.open("resultsOverlay"));
    assert!(!c.open("nameModal"));
    assert!(c.open("welcomeModal"));
    assert!(c.open("nicknameModal"));
    assert_eq!(c.active().modals, vec!["nicknameModal"]);
}

#[test]
fn late_loader_sees_stale_token() {
    let mut c = venue_coordinator();
    let pending = Rc::new(Cell::new(None));
    let slot = Rc::clone(&pending);
    assert!(c.open_with(
        "breweriesOverlay",
        OpenOptions::new().on_open(move |_, ctx| slot.set(Some(ctx.token)))
    ));
    let token = pending.take().unwrap();
    assert!(token.is_current());

    assert!(c.close("breweriesOverlay"));
    assert!(c.open("breweriesOverlay"));
    assert!(!token.is_current(), "loader from the first cycle must not write");
}

#[test]
fn scroll_lock_calls_only_on_transitions() {
    let mut c = venue_coordinator();
    assert!(c.open("resultsOverlay"));
    assert!(c.open("nameModal"));
    assert!(c.open("areaModal"));
    c.close_all();

    let locks: Vec<HostCall> = c
        .host()
        .calls()
        .iter()
        .filter(|call| matches!(call, HostCall::ScrollLocked(_)))
        .cloned()
        .collect();
    assert_eq!(
        locks,
        vec![HostCall::ScrollLocked(true), HostCall::ScrollLocked(false)]
    );
}
