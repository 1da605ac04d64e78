#![forbid(unsafe_code)]

//! Surface catalog for the venue finder.
//!
//! Groups:
//!
//! | Group | Rule | Members |
//! |-------|------|---------|
//! | `primary` | full-screen sections, hide home | results, breweries, community hub, venue details |
//! | `search-input` | exclusive | name / area / beer / brewery search modals |
//! | `status` | stackable 1..=4 | gluten-free status update flow |
//! | `onboarding` | exclusive, priority | age gate, welcome, nickname |
//! | `consent` | pinned banner | cookie consent |

use crate::descriptor::{PRIMARY_GROUP, SurfaceDescriptor, SurfaceView};
use crate::registry::{Registry, RegistryError};

pub const SEARCH_INPUT_GROUP: &str = "search-input";
pub const STATUS_GROUP: &str = "status";
pub const ONBOARDING_GROUP: &str = "onboarding";
pub const CONSENT_GROUP: &str = "consent";

const RESULTS_VIEWS: &[SurfaceView] = &[
    SurfaceView::new("list", "resultsListContainer"),
    SurfaceView::new("map", "resultsMapContainer"),
];

const COMMUNITY_VIEWS: &[SurfaceView] = &[
    SurfaceView::new("feed", "communityFeedView"),
    SurfaceView::new("leaderboard", "communityLeaderboardView"),
];

/// Every surface the venue finder page declares.
pub const VENUE_SURFACES: &[SurfaceDescriptor] = &[
    // App sections
    SurfaceDescriptor::overlay("resultsOverlay", PRIMARY_GROUP)
        .exclusive()
        .views(RESULTS_VIEWS, "list"),
    SurfaceDescriptor::overlay("breweriesOverlay", PRIMARY_GROUP).exclusive(),
    SurfaceDescriptor::overlay("communityHubOverlay", PRIMARY_GROUP)
        .exclusive()
        .views(COMMUNITY_VIEWS, "feed"),
    SurfaceDescriptor::overlay("venueDetailsOverlay", PRIMARY_GROUP),
    SurfaceDescriptor::overlay("fullMapOverlay", "map"),
    // Search inputs
    SurfaceDescriptor::modal("nameModal", SEARCH_INPUT_GROUP).exclusive(),
    SurfaceDescriptor::modal("areaModal", SEARCH_INPUT_GROUP).exclusive(),
    SurfaceDescriptor::modal("beerModal", SEARCH_INPUT_GROUP).exclusive(),
    SurfaceDescriptor::modal("breweryModal", SEARCH_INPUT_GROUP).exclusive(),
    // Gluten-free status update flow
    SurfaceDescriptor::modal("gfStatusModal", STATUS_GROUP).stackable(1),
    SurfaceDescriptor::modal("gfStatusConfirmModal", STATUS_GROUP).stackable(2),
    SurfaceDescriptor::modal("beerDetailsPromptModal", STATUS_GROUP).stackable(3),
    SurfaceDescriptor::modal("reportModal", STATUS_GROUP).stackable(4),
    // Onboarding
    SurfaceDescriptor::modal("ageGateModal", ONBOARDING_GROUP)
        .exclusive()
        .priority()
        .close_on_escape(false)
        .close_on_backdrop(false),
    SurfaceDescriptor::modal("welcomeModal", ONBOARDING_GROUP)
        .exclusive()
        .priority(),
    SurfaceDescriptor::modal("nicknameModal", ONBOARDING_GROUP)
        .exclusive()
        .priority(),
    // Utilities
    SurfaceDescriptor::modal("manualVenueEntryModal", "forms"),
    SurfaceDescriptor::modal("pointsModal", "gamification"),
    SurfaceDescriptor::banner("cookieConsent", CONSENT_GROUP)
        .z_index(10_000)
        .close_on_escape(false)
        .close_on_backdrop(false),
];

/// Validated registry of [`VENUE_SURFACES`].
pub fn venue_registry() -> Result<Registry, RegistryError> {
    Registry::new(VENUE_SURFACES.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_validates() {
        let registry = venue_registry().unwrap();
        assert_eq!(registry.len(), VENUE_SURFACES.len());
    }

    #[test]
    fn status_flow_is_a_four_step_sequence() {
        let registry = venue_registry().unwrap();
        let orders: Vec<u32> = registry
            .group_members(STATUS_GROUP)
            .filter(|d| d.stackable)
            .map(|d| d.order)
            .collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
        assert_eq!(registry.first_order(STATUS_GROUP), Some(1));
    }

    #[test]
    fn search_inputs_are_exclusive_modals() {
        let registry = venue_registry().unwrap();
        assert!(
            registry
                .group_members(SEARCH_INPUT_GROUP)
                .all(|d| d.exclusive && d.kind.is_modal())
        );
    }

    #[test]
    fn onboarding_surfaces_are_priority() {
        let registry = venue_registry().unwrap();
        assert!(registry.group_members(ONBOARDING_GROUP).all(|d| d.priority));
    }
}
