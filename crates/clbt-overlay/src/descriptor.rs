#![forbid(unsafe_code)]

//! Static surface descriptors.
//!
//! A [`SurfaceDescriptor`] is the compiled-in rule set for one dialog-like
//! surface: what it is, which group it belongs to, and how it interacts with
//! the other members of that group. Descriptors are `Copy` and built through
//! `const fn` builders so a whole application registry can live in a `const`
//! table.
//!
//! # Example
//!
//! ```
//! use clbt_overlay::descriptor::{SurfaceDescriptor, SurfaceView};
//!
//! const VIEWS: &[SurfaceView] = &[
//!     SurfaceView::new("list", "resultsListContainer"),
//!     SurfaceView::new("map", "resultsMapContainer"),
//! ];
//!
//! const RESULTS: SurfaceDescriptor = SurfaceDescriptor::overlay("resultsOverlay", "primary")
//!     .exclusive()
//!     .views(VIEWS, "list");
//!
//! assert!(RESULTS.has_internal_views());
//! assert!(RESULTS.is_primary());
//! ```

use core::fmt;

/// Group name for full-screen app sections that replace the home view.
pub const PRIMARY_GROUP: &str = "primary";

/// What kind of surface a descriptor names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Dialog rendered above everything else; tracked in the modal stack.
    Modal,
    /// Full-area panel; tracked in the overlay stack.
    Overlay,
    /// Non-modal strip (consent notices and the like); tracked with overlays.
    Banner,
}

impl SurfaceKind {
    /// CSS `display` value used when the surface is shown.
    #[must_use]
    pub const fn display(self) -> &'static str {
        match self {
            Self::Modal | Self::Overlay => "flex",
            Self::Banner => "block",
        }
    }

    /// Whether surfaces of this kind live in the modal stack.
    #[inline]
    #[must_use]
    pub const fn is_modal(self) -> bool {
        matches!(self, Self::Modal)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Modal => "modal",
            Self::Overlay => "overlay",
            Self::Banner => "banner",
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named sub-view inside a surface and the element that hosts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceView {
    /// View name callers toggle by (e.g. `"list"`, `"map"`).
    pub name: &'static str,
    /// Id of the container element shown when this view is active.
    pub element: &'static str,
}

impl SurfaceView {
    #[must_use]
    pub const fn new(name: &'static str, element: &'static str) -> Self {
        Self { name, element }
    }
}

/// Rules for a single registered surface.
///
/// # Invariants
///
/// - `views` is empty iff `default_view` is `None` (checked by
///   [`Registry::new`](crate::registry::Registry::new)).
/// - `order` is only meaningful when `stackable` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceDescriptor {
    /// Element id and registry key.
    pub id: &'static str,
    pub kind: SurfaceKind,
    /// Label used for mutual exclusion and group-wide closes.
    pub group: &'static str,
    /// Opening this surface closes every other open member of its group.
    pub exclusive: bool,
    /// May open alongside other group members, in forward `order` only.
    pub stackable: bool,
    /// Position inside a stackable sequence.
    pub order: u32,
    /// May open while overlays are active even when policy forbids it.
    pub priority: bool,
    /// Fixed stacking value; `None` means computed from stack position.
    pub z_index: Option<u32>,
    /// Sub-views toggled independently of open/close.
    pub views: &'static [SurfaceView],
    /// View selected whenever the surface opens.
    pub default_view: Option<&'static str>,
    /// Escape closes this surface when it is on top.
    pub close_on_escape: bool,
    /// A click on this surface's backdrop closes it.
    pub close_on_backdrop: bool,
}

impl SurfaceDescriptor {
    /// Create a plain descriptor with no group rules.
    #[must_use]
    pub const fn new(id: &'static str, kind: SurfaceKind, group: &'static str) -> Self {
        Self {
            id,
            kind,
            group,
            exclusive: false,
            stackable: false,
            order: 0,
            priority: false,
            z_index: None,
            views: &[],
            default_view: None,
            close_on_escape: true,
            close_on_backdrop: true,
        }
    }

    #[must_use]
    pub const fn modal(id: &'static str, group: &'static str) -> Self {
        Self::new(id, SurfaceKind::Modal, group)
    }

    #[must_use]
    pub const fn overlay(id: &'static str, group: &'static str) -> Self {
        Self::new(id, SurfaceKind::Overlay, group)
    }

    #[must_use]
    pub const fn banner(id: &'static str, group: &'static str) -> Self {
        Self::new(id, SurfaceKind::Banner, group)
    }

    /// Mark the surface as exclusive within its group.
    #[must_use]
    pub const fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }

    /// Make the surface a step of its group's stackable sequence.
    #[must_use]
    pub const fn stackable(mut self, order: u32) -> Self {
        self.stackable = true;
        self.order = order;
        self
    }

    /// Allow the surface to open over active overlays regardless of policy.
    #[must_use]
    pub const fn priority(mut self) -> Self {
        self.priority = true;
        self
    }

    /// Pin the surface to a fixed z-index.
    #[must_use]
    pub const fn z_index(mut self, z: u32) -> Self {
        self.z_index = Some(z);
        self
    }

    /// Declare internal sub-views and the one selected on open.
    #[must_use]
    pub const fn views(mut self, views: &'static [SurfaceView], default: &'static str) -> Self {
        self.views = views;
        self.default_view = Some(default);
        self
    }

    /// Set whether Escape closes the surface.
    #[must_use]
    pub const fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    /// Set whether a backdrop click closes the surface.
    #[must_use]
    pub const fn close_on_backdrop(mut self, close: bool) -> Self {
        self.close_on_backdrop = close;
        self
    }

    #[inline]
    #[must_use]
    pub const fn has_internal_views(&self) -> bool {
        !self.views.is_empty()
    }

    /// Look up one of this surface's views by name.
    #[must_use]
    pub fn view(&self, name: &str) -> Option<&'static SurfaceView> {
        self.views.iter().find(|v| v.name == name)
    }

    /// Whether the surface is a full-screen app section.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.group == PRIMARY_GROUP
    }
}
