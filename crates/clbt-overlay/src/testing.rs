#![forbid(unsafe_code)]

//! In-memory [`SurfaceHost`] that records every side effect.
//!
//! Available to this crate's unit tests and, with the `test-helpers` feature,
//! to downstream test suites.

use ahash::AHashMap;

use crate::descriptor::SurfaceView;
use crate::host::{ACTIVE_CLASS, HIDDEN_DISPLAY, SurfaceHost};
use crate::registry::Registry;

/// Visual state of one fake element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementState {
    pub display: &'static str,
    pub classes: Vec<&'static str>,
    pub z_index: Option<u32>,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            display: HIDDEN_DISPLAY,
            classes: Vec::new(),
            z_index: None,
        }
    }
}

impl ElementState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.classes.contains(&ACTIVE_CLASS)
    }
}

/// One recorded host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Show(String),
    Hide(String),
    ZIndex(String, u32),
    ScrollLocked(bool),
    HomeVisible(bool),
    View { surface: String, view: String },
}

/// Recording fake document.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    elements: AHashMap<String, ElementState>,
    scroll_locked: bool,
    home_visible: bool,
    calls: Vec<HostCall>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingHost {
    /// Empty document: scroll unlocked, home visible.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: AHashMap::new(),
            scroll_locked: false,
            home_visible: true,
            calls: Vec::new(),
        }
    }

    /// Document containing exactly `ids`.
    #[must_use]
    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut host = Self::new();
        for id in ids {
            host.add_element(id);
        }
        host
    }

    /// Document containing every surface and view container in `registry`.
    #[must_use]
    pub fn for_registry(registry: &Registry) -> Self {
        let mut host = Self::new();
        for desc in registry.iter() {
            host.add_element(desc.id);
            for view in desc.views {
                host.add_element(view.element);
            }
        }
        host
    }

    pub fn add_element(&mut self, id: impl Into<String>) {
        self.elements.entry(id.into()).or_default();
    }

    pub fn remove_element(&mut self, id: &str) {
        self.elements.remove(id);
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&ElementState> {
        self.elements.get(id)
    }

    /// Whether `id` is shown with the active class.
    #[must_use]
    pub fn is_displayed(&self, id: &str) -> bool {
        self.element(id)
            .is_some_and(|e| e.display != HIDDEN_DISPLAY && e.is_active())
    }

    #[must_use]
    pub fn z_index(&self, id: &str) -> Option<u32> {
        self.element(id).and_then(|e| e.z_index)
    }

    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    #[must_use]
    pub fn home_visible(&self) -> bool {
        self.home_visible
    }

    #[must_use]
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl SurfaceHost for RecordingHost {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn show(&mut self, id: &str, display: &'static str) {
        self.calls.push(HostCall::Show(id.to_owned()));
        if let Some(el) = self.elements.get_mut(id) {
            el.display = display;
            if !el.is_active() {
                el.classes.push(ACTIVE_CLASS);
            }
        }
    }

    fn hide(&mut self, id: &str) {
        self.calls.push(HostCall::Hide(id.to_owned()));
        if let Some(el) = self.elements.get_mut(id) {
            el.display = HIDDEN_DISPLAY;
            el.classes.retain(|c| *c != ACTIVE_CLASS);
        }
    }

    fn set_z_index(&mut self, id: &str, z: u32) {
        self.calls.push(HostCall::ZIndex(id.to_owned(), z));
        if let Some(el) = self.elements.get_mut(id) {
            el.z_index = Some(z);
        }
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.calls.push(HostCall::ScrollLocked(locked));
        self.scroll_locked = locked;
    }

    fn set_home_visible(&mut self, visible: bool) {
        self.calls.push(HostCall::HomeVisible(visible));
        self.home_visible = visible;
    }

    fn show_view(&mut self, surface: &str, active: &SurfaceView, views: &[SurfaceView]) -> bool {
        self.calls.push(HostCall::View {
            surface: surface.to_owned(),
            view: active.name.to_owned(),
        });
        if views.iter().any(|v| !self.elements.contains_key(v.element)) {
            return false;
        }
        for view in views {
            if let Some(el) = self.elements.get_mut(view.element) {
                el.display = if view.name == active.name {
                    "block"
                } else {
                    HIDDEN_DISPLAY
                };
            }
        }
        true
    }
}
