#![forbid(unsafe_code)]

//! Page-level Escape and backdrop-click listeners.
//!
//! Listeners are attached to the document once per coordinator and detached
//! when [`PageListeners`] is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use clbt_overlay::{InputEvent, OverlayCoordinator};
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, KeyboardEvent, MouseEvent};

use crate::backdrop::resolve_backdrop;
use crate::dom::DomHost;

pub(crate) type Shared = Rc<RefCell<OverlayCoordinator<DomHost>>>;

/// Installed document listeners.
pub struct PageListeners {
    document: Document,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    click: Closure<dyn FnMut(MouseEvent)>,
}

impl PageListeners {
    pub(crate) fn install(document: &Document, coordinator: &Shared) -> Result<Self, JsValue> {
        let keys = Rc::clone(coordinator);
        let keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let Some(input) = InputEvent::from_key(&event.key()) else {
                return;
            };
            route(&keys, &input);
        });

        let clicks = Rc::clone(coordinator);
        let click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let surface = {
                let Ok(c) = clicks.try_borrow() else {
                    return;
                };
                resolve_backdrop(
                    c.registry(),
                    &target.id(),
                    &target.class_name(),
                    ancestor_ids(&target),
                )
            };
            if let Some(surface) = surface {
                route(&clicks, &InputEvent::backdrop(surface));
            }
        });

        document
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        document.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;

        Ok(Self {
            document: document.clone(),
            keydown,
            click,
        })
    }
}

impl Drop for PageListeners {
    fn drop(&mut self) {
        let _ = self.document.remove_event_listener_with_callback(
            "keydown",
            self.keydown.as_ref().unchecked_ref(),
        );
        let _ = self
            .document
            .remove_event_listener_with_callback("click", self.click.as_ref().unchecked_ref());
    }
}

fn ancestor_ids(target: &Element) -> impl Iterator<Item = String> {
    std::iter::successors(target.parent_element(), |el| el.parent_element()).map(|el| el.id())
}

fn route(coordinator: &Shared, input: &InputEvent) {
    let Ok(mut c) = coordinator.try_borrow_mut() else {
        warn!(target: "clbt_web", ?input, "coordinator busy, input dropped");
        return;
    };
    if let Some(closed) = c.handle_input(input) {
        debug!(target: "clbt_web", surface = closed, ?input, "closed by input");
    }
}
