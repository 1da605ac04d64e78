#![forbid(unsafe_code)]

//! Reference coordinators and property-test plumbing.
//!
//! [`PROPERTY_SURFACES`] is a compact registry exercising every rule the
//! coordinator enforces: a four-step stackable sequence, an exclusive pair,
//! a pinned z-index, a priority modal, exclusive primary sections with
//! internal views, a plain overlay and a banner. [`op_strategy`] generates
//! random operations over it and [`check_invariants`] verifies the
//! coordinator after each one.

use clbt_overlay::catalog::venue_registry;
use clbt_overlay::testing::RecordingHost;
use clbt_overlay::{
    ConfigPatch, InputEvent, OpenOptions, OverlayCoordinator, PRIMARY_GROUP, Registry,
    SurfaceDescriptor, SurfaceKind, SurfaceView,
};
use proptest::prelude::*;

/// Coordinator over the venue finder catalog with every element present.
#[must_use]
pub fn venue_coordinator() -> OverlayCoordinator<RecordingHost> {
    let registry = venue_registry().expect("venue catalog validates");
    let host = RecordingHost::for_registry(&registry);
    OverlayCoordinator::new(registry, host)
}

/// Coordinator over `surfaces` with every element present.
#[must_use]
pub fn coordinator_with(surfaces: &[SurfaceDescriptor]) -> OverlayCoordinator<RecordingHost> {
    let registry = Registry::new(surfaces.iter().copied()).expect("fixture registry validates");
    let host = RecordingHost::for_registry(&registry);
    OverlayCoordinator::new(registry, host)
}

pub const SEQUENCE_GROUP: &str = "sequence";
pub const PICK_GROUP: &str = "pick";

const SECTION_VIEWS: &[SurfaceView] = &[
    SurfaceView::new("list", "sectionList"),
    SurfaceView::new("map", "sectionMap"),
];

/// Registry used by the property suites.
pub const PROPERTY_SURFACES: &[SurfaceDescriptor] = &[
    SurfaceDescriptor::modal("step1", SEQUENCE_GROUP).stackable(1),
    SurfaceDescriptor::modal("step2", SEQUENCE_GROUP).stackable(2),
    SurfaceDescriptor::modal("step3", SEQUENCE_GROUP).stackable(3),
    SurfaceDescriptor::modal("step4", SEQUENCE_GROUP).stackable(4),
    SurfaceDescriptor::modal("pickA", PICK_GROUP).exclusive(),
    SurfaceDescriptor::modal("pickB", PICK_GROUP).exclusive(),
    SurfaceDescriptor::modal("loose", "misc"),
    SurfaceDescriptor::modal("pinned", "misc").z_index(7000),
    SurfaceDescriptor::modal("urgent", "alerts")
        .priority()
        .close_on_escape(false),
    SurfaceDescriptor::overlay("sectionA", PRIMARY_GROUP)
        .exclusive()
        .views(SECTION_VIEWS, "list"),
    SurfaceDescriptor::overlay("sectionB", PRIMARY_GROUP).exclusive(),
    SurfaceDescriptor::overlay("panel", "panel"),
    SurfaceDescriptor::banner("notice", "notice").close_on_backdrop(false),
];

/// Groups in which every member is exclusive.
const EXCLUSIVE_GROUPS: &[&str] = &[PICK_GROUP, PRIMARY_GROUP];

#[must_use]
pub fn property_coordinator() -> OverlayCoordinator<RecordingHost> {
    coordinator_with(PROPERTY_SURFACES)
}

/// One coordinator operation.
#[derive(Debug, Clone)]
pub enum Op {
    Open(&'static str),
    OpenView(&'static str, &'static str),
    Close(&'static str),
    CloseGroup(&'static str),
    CloseAll,
    CloseAllModals,
    CloseAllOverlays,
    Block(&'static str),
    Unblock(&'static str),
    BlockGroup(&'static str),
    ToggleView(&'static str, &'static str),
    Escape,
    Backdrop(&'static str),
    Configure(ConfigPatch),
}

fn id_strategy() -> impl Strategy<Value = &'static str> {
    let mut ids: Vec<&'static str> = PROPERTY_SURFACES.iter().map(|d| d.id).collect();
    ids.push("unknownId");
    prop::sample::select(ids)
}

fn group_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        SEQUENCE_GROUP,
        PICK_GROUP,
        PRIMARY_GROUP,
        "misc",
        "panel",
        "nowhere",
    ])
}

fn view_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["list", "map", "grid"])
}

/// Random operation over [`PROPERTY_SURFACES`], weighted toward opens.
pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => id_strategy().prop_map(Op::Open),
        2 => (id_strategy(), view_strategy()).prop_map(|(id, v)| Op::OpenView(id, v)),
        4 => id_strategy().prop_map(Op::Close),
        1 => group_strategy().prop_map(Op::CloseGroup),
        1 => Just(Op::CloseAll),
        1 => Just(Op::CloseAllModals),
        1 => Just(Op::CloseAllOverlays),
        1 => id_strategy().prop_map(Op::Block),
        2 => id_strategy().prop_map(Op::Unblock),
        1 => group_strategy().prop_map(Op::BlockGroup),
        1 => (id_strategy(), view_strategy()).prop_map(|(id, v)| Op::ToggleView(id, v)),
        2 => Just(Op::Escape),
        1 => id_strategy().prop_map(Op::Backdrop),
        1 => (any::<bool>(), any::<bool>()).prop_map(|(multiple, over)| Op::Configure(
            ConfigPatch::new()
                .allow_multiple_modals(multiple)
                .allow_modal_over_overlay(over)
        )),
    ]
}

/// Apply `op`, discarding its return value.
pub fn apply(coordinator: &mut OverlayCoordinator<RecordingHost>, op: &Op) {
    match *op {
        Op::Open(id) => {
            coordinator.open(id);
        }
        Op::OpenView(id, view) => {
            coordinator.open_with(id, OpenOptions::new().view(view));
        }
        Op::Close(id) => {
            coordinator.close(id);
        }
        Op::CloseGroup(group) => coordinator.close_group(group, None),
        Op::CloseAll => coordinator.close_all(),
        Op::CloseAllModals => coordinator.close_all_modals(),
        Op::CloseAllOverlays => coordinator.close_all_overlays(),
        Op::Block(id) => {
            coordinator.block(id);
        }
        Op::Unblock(id) => {
            coordinator.unblock(id);
        }
        Op::BlockGroup(group) => coordinator.block_group(group),
        Op::ToggleView(id, view) => {
            coordinator.toggle_internal_view(id, view);
        }
        Op::Escape => {
            coordinator.handle_input(&InputEvent::Escape);
        }
        Op::Backdrop(id) => {
            coordinator.handle_input(&InputEvent::backdrop(id));
        }
        Op::Configure(patch) => coordinator.configure(patch),
    }
}

/// Check every structural invariant of the coordinator and its projection.
pub fn check_invariants(c: &OverlayCoordinator<RecordingHost>) -> Result<(), String> {
    let active = c.active();
    let host = c.host();

    let mut seen = active.all.clone();
    seen.sort_unstable();
    seen.dedup();
    if seen.len() != active.all.len() {
        return Err(format!("duplicate surface in {:?}", active.all));
    }

    let locked = !active.all.is_empty();
    if c.scroll_locked() != locked || host.scroll_locked() != locked {
        return Err(format!(
            "scroll lock {}/{} with {} open",
            c.scroll_locked(),
            host.scroll_locked(),
            active.all.len()
        ));
    }

    for group in EXCLUSIVE_GROUPS {
        let open: Vec<&str> = active
            .all
            .iter()
            .copied()
            .filter(|id| c.registry().get(id).is_some_and(|d| d.group == *group))
            .collect();
        if open.len() > 1 {
            return Err(format!("exclusive group '{group}' has {open:?} open"));
        }
    }

    let orders: Vec<u32> = active
        .modals
        .iter()
        .filter_map(|id| c.registry().get(id))
        .filter(|d| d.stackable)
        .map(|d| d.order)
        .collect();
    if orders.windows(2).any(|w| w[0] > w[1]) {
        return Err(format!("sequence out of order: {orders:?}"));
    }

    for stack in [&active.modals, &active.overlays] {
        let mut last: Vec<(SurfaceKind, u32)> = Vec::new();
        for &id in stack {
            let expected = c.z_index_of(id);
            if host.z_index(id) != expected {
                return Err(format!(
                    "'{id}' has z {:?} in the document but {expected:?} computed",
                    host.z_index(id)
                ));
            }
            let Some(desc) = c.registry().get(id) else {
                return Err(format!("'{id}' is open but not registered"));
            };
            if desc.z_index.is_some() {
                continue;
            }
            let Some(z) = expected else {
                return Err(format!("'{id}' is open without a z-index"));
            };
            match last.iter_mut().find(|(kind, _)| *kind == desc.kind) {
                Some((_, prev)) if z <= *prev => {
                    return Err(format!("z-order not increasing at '{id}' in {stack:?}"));
                }
                Some((_, prev)) => *prev = z,
                None => last.push((desc.kind, z)),
            }
        }
    }

    for desc in c.registry().iter() {
        if host.is_displayed(desc.id) != c.is_open(desc.id) {
            return Err(format!(
                "'{}' displayed={} open={}",
                desc.id,
                host.is_displayed(desc.id),
                c.is_open(desc.id)
            ));
        }
    }

    let primary_open = active
        .all
        .iter()
        .any(|id| c.registry().get(id).is_some_and(SurfaceDescriptor::is_primary));
    if host.home_visible() == primary_open {
        return Err(format!(
            "home visible={} with primary open={primary_open}",
            host.home_visible()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_build() {
        let c = property_coordinator();
        assert_eq!(c.registry().len(), PROPERTY_SURFACES.len());
        assert!(check_invariants(&c).is_ok());

        let venue = venue_coordinator();
        assert!(venue.registry().contains("resultsOverlay"));
    }

    #[test]
    fn invariants_hold_after_scripted_ops() {
        let mut c = property_coordinator();
        for op in [
            Op::Open("sectionA"),
            Op::Open("step1"),
            Op::Open("pinned"),
            Op::Open("step2"),
            Op::Open("pickA"),
            Op::Open("pickB"),
            Op::Escape,
            Op::Block("step1"),
            Op::CloseAll,
        ] {
            apply(&mut c, &op);
            check_invariants(&c).unwrap();
        }
    }
}
