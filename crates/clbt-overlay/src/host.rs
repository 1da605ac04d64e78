#![forbid(unsafe_code)]

//! Document adapter the coordinator projects its state onto.
//!
//! The coordinator never reads visual state back from the host. Its active
//! stacks are the single source of truth; every call here is a one-way
//! side effect. Swapping the host (a real DOM, a recording fake) is how the
//! coordinator is exercised without a browser.

use crate::descriptor::SurfaceView;

/// Class applied to an open surface's element.
pub const ACTIVE_CLASS: &str = "active";

/// `display` value of a closed surface.
pub const HIDDEN_DISPLAY: &str = "none";

/// Side-effect sink for surface visibility, stacking and page state.
///
/// Implementations must tolerate calls for ids whose element is missing;
/// the coordinator checks [`has_element`](Self::has_element) before opening
/// but not before closing.
pub trait SurfaceHost {
    /// Whether the document contains an element with this id.
    fn has_element(&self, id: &str) -> bool;

    /// Set `display` to `display` and add [`ACTIVE_CLASS`].
    fn show(&mut self, id: &str, display: &'static str);

    /// Set `display` to [`HIDDEN_DISPLAY`] and remove [`ACTIVE_CLASS`].
    fn hide(&mut self, id: &str);

    fn set_z_index(&mut self, id: &str, z: u32);

    /// Lock or unlock page scrolling.
    fn set_scroll_locked(&mut self, locked: bool);

    /// Show or hide the home background section.
    fn set_home_visible(&mut self, visible: bool);

    /// Show the container of `active` and hide every other view of `surface`.
    ///
    /// Returns `false` if any view container is missing.
    fn show_view(&mut self, surface: &str, active: &SurfaceView, views: &[SurfaceView]) -> bool;
}
