#![forbid(unsafe_code)]

//! [`SurfaceHost`] over the live document.
//!
//! # DOM contract
//!
//! - Open: inline `display` is the kind's display value and the element has
//!   class `active`.
//! - Closed: inline `display: none`, no `active` class.
//! - Scroll lock: `overflow: hidden` on `<body>` plus class
//!   [`DomHost::SCROLL_LOCK_CLASS`].
//! - Home section: inline `display: none` while hidden, inline display
//!   removed while visible so the stylesheet decides.
//!
//! # Failure Modes
//!
//! Style writes that the browser rejects are logged at `warn` and skipped.
//! Calls for ids with no element are ignored.

use clbt_overlay::{ACTIVE_CLASS, HIDDEN_DISPLAY, SurfaceHost, SurfaceView};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

/// Document-backed host.
#[derive(Debug, Clone)]
pub struct DomHost {
    document: Document,
    home_section: Option<String>,
}

impl DomHost {
    /// Id of the home background section.
    pub const DEFAULT_HOME_SECTION: &'static str = "homeSection";
    /// Class set on `<body>` while scroll is locked.
    pub const SCROLL_LOCK_CLASS: &'static str = "modal-open";

    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            home_section: Some(Self::DEFAULT_HOME_SECTION.to_owned()),
        }
    }

    /// Host over `window.document`.
    #[must_use]
    pub fn from_window() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    #[must_use]
    pub fn with_home_section(mut self, id: Option<&str>) -> Self {
        self.home_section = id.map(str::to_owned);
        self
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}

fn check(op: &'static str, id: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn!(target: "clbt_web", op, surface = id, ?err, "DOM write rejected");
    }
}

fn set_display(el: &HtmlElement, display: &str) -> Result<(), JsValue> {
    el.style().set_property("display", display)
}

fn set_active(el: &HtmlElement, active: bool) -> Result<(), JsValue> {
    el.class_list()
        .toggle_with_force(ACTIVE_CLASS, active)
        .map(drop)
}

impl SurfaceHost for DomHost {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn show(&mut self, id: &str, display: &'static str) {
        if let Some(el) = self.element(id) {
            check("show", id, set_display(&el, display));
            check("show", id, set_active(&el, true));
        }
    }

    fn hide(&mut self, id: &str) {
        if let Some(el) = self.element(id) {
            check("hide", id, set_display(&el, HIDDEN_DISPLAY));
            check("hide", id, set_active(&el, false));
        }
    }

    fn set_z_index(&mut self, id: &str, z: u32) {
        if let Some(el) = self.element(id) {
            check(
                "z-index",
                id,
                el.style().set_property("z-index", &z.to_string()),
            );
        }
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        let Some(body) = self.document.body() else {
            return;
        };
        let style = body.style();
        let result = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(drop)
        };
        check("scroll-lock", "body", result);
        check(
            "scroll-lock",
            "body",
            body.class_list()
                .toggle_with_force(Self::SCROLL_LOCK_CLASS, locked)
                .map(drop),
        );
    }

    fn set_home_visible(&mut self, visible: bool) {
        let Some(id) = self.home_section.as_deref() else {
            return;
        };
        let Some(el) = self.element(id) else {
            return;
        };
        let result = if visible {
            el.style().remove_property("display").map(drop)
        } else {
            set_display(&el, HIDDEN_DISPLAY)
        };
        check("home", id, result);
    }

    fn show_view(&mut self, surface: &str, active: &SurfaceView, views: &[SurfaceView]) -> bool {
        let Some(containers) = views
            .iter()
            .map(|view| self.element(view.element).map(|el| (view, el)))
            .collect::<Option<Vec<_>>>()
        else {
            return false;
        };
        for (view, el) in containers {
            let selected = view.name == active.name;
            check(
                "view",
                surface,
                set_display(&el, if selected { "block" } else { HIDDEN_DISPLAY }),
            );
            check("view", surface, set_active(&el, selected));
        }
        true
    }
}
