//! JavaScript handle to the page coordinator.
//!
//! Caller modules hold one `OverlayManager` for the page session:
//!
//! ```js
//! const overlays = new OverlayManager();
//! overlays.config({ allowModalOverOverlay: false });
//! overlays.open("breweriesOverlay", (data, generation) => {
//!   loadBreweries().then((list) => {
//!     if (overlays.isCurrent("breweriesOverlay", generation)) render(list);
//!   });
//! });
//! ```
//!
//! `on_open` callbacks run after the coordinator borrow is released, so they
//! may call back into the manager.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use clbt_overlay::catalog::venue_registry;
use clbt_overlay::{ConfigPatch, OpenOptions, OverlayCoordinator};
use js_sys::{Array, Function, JSON, Object, Reflect};
use tracing::level_filters::LevelFilter;
use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::console;
use crate::dom::DomHost;
use crate::listeners::{PageListeners, Shared};

/// Route `tracing` output to the browser console. Call once at startup.
#[wasm_bindgen(js_name = installConsoleLogging)]
pub fn install_console_logging(debug: bool) -> bool {
    console::install(if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    })
}

#[wasm_bindgen]
pub struct OverlayManager {
    inner: Shared,
    _listeners: PageListeners,
}

#[wasm_bindgen]
impl OverlayManager {
    /// Coordinator over the venue finder catalog and `window.document`.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<OverlayManager, JsValue> {
        let host = DomHost::from_window().ok_or_else(|| JsValue::from_str("no document"))?;
        let registry = venue_registry().map_err(|err| JsValue::from_str(&err.to_string()))?;
        let document = host.document().clone();
        let inner: Shared = Rc::new(RefCell::new(OverlayCoordinator::new(registry, host)));
        let listeners = PageListeners::install(&document, &inner)?;
        Ok(Self {
            inner,
            _listeners: listeners,
        })
    }

    /// Open `id`. `on_open` is called as `on_open(data, generation)`.
    pub fn open(
        &self,
        id: &str,
        on_open: Option<Function>,
        view: Option<String>,
        data: JsValue,
    ) -> bool {
        let opened_cycle = Rc::new(Cell::new(None));
        let mut options = OpenOptions::<DomHost>::new();
        if let Some(view) = view {
            options = options.view(view);
        }
        if on_open.is_some() {
            let slot = Rc::clone(&opened_cycle);
            options = options.on_open(move |_, ctx| slot.set(Some(ctx.token.generation())));
        }

        let Some(opened) = self.with("open", |c| c.open_with(id, options)) else {
            return false;
        };

        if let (Some(callback), Some(generation)) = (on_open, opened_cycle.take()) {
            // Generations stay well inside f64's exact integer range.
            let generation = JsValue::from_f64(generation as f64);
            if let Err(err) = callback.call2(&JsValue::NULL, &data, &generation) {
                warn!(target: "clbt_web", surface = id, ?err, "on_open callback threw");
            }
        }
        opened
    }

    pub fn close(&self, id: &str) -> bool {
        self.with("close", |c| c.close(id)).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = closeAll)]
    pub fn close_all(&self) {
        self.with("closeAll", OverlayCoordinator::close_all);
    }

    #[wasm_bindgen(js_name = closeAllModals)]
    pub fn close_all_modals(&self) {
        self.with("closeAllModals", OverlayCoordinator::close_all_modals);
    }

    #[wasm_bindgen(js_name = closeAllOverlays)]
    pub fn close_all_overlays(&self) {
        self.with("closeAllOverlays", OverlayCoordinator::close_all_overlays);
    }

    #[wasm_bindgen(js_name = closeGroup)]
    pub fn close_group(&self, group: &str, except: Option<String>) {
        self.with("closeGroup", |c| c.close_group(group, except.as_deref()));
    }

    pub fn block(&self, id: &str) {
        self.with("block", |c| c.block(id));
    }

    pub fn unblock(&self, id: &str) {
        self.with("unblock", |c| c.unblock(id));
    }

    #[wasm_bindgen(js_name = blockGroup)]
    pub fn block_group(&self, group: &str) {
        self.with("blockGroup", |c| c.block_group(group));
    }

    #[wasm_bindgen(js_name = unblockGroup)]
    pub fn unblock_group(&self, group: &str) {
        self.with("unblockGroup", |c| c.unblock_group(group));
    }

    #[wasm_bindgen(js_name = isBlocked)]
    pub fn is_blocked(&self, id: &str) -> bool {
        self.inner.try_borrow().is_ok_and(|c| c.is_blocked(id))
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self, id: &str) -> bool {
        self.inner.try_borrow().is_ok_and(|c| c.is_open(id))
    }

    /// `{ modals, overlays, all }`, each bottom to top.
    #[wasm_bindgen(js_name = getActive)]
    pub fn get_active(&self) -> Result<Object, JsValue> {
        let active = self
            .inner
            .try_borrow()
            .map_err(|_| JsValue::from_str("coordinator busy"))?
            .active();
        let out = Object::new();
        for (key, ids) in [
            ("modals", &active.modals),
            ("overlays", &active.overlays),
            ("all", &active.all),
        ] {
            let array: Array = ids.iter().map(|id| JsValue::from_str(id)).collect();
            Reflect::set(&out, &JsValue::from_str(key), &array)?;
        }
        Ok(out)
    }

    #[wasm_bindgen(js_name = toggleInternalView)]
    pub fn toggle_internal_view(&self, id: &str, view: &str) -> bool {
        self.with("toggleInternalView", |c| c.toggle_internal_view(id, view))
            .unwrap_or(false)
    }

    #[wasm_bindgen(js_name = getInternalView)]
    pub fn get_internal_view(&self, id: &str) -> Option<String> {
        let c = self.inner.try_borrow().ok()?;
        c.get_internal_view(id).map(str::to_owned)
    }

    /// Merge `{ allowMultipleModals?, allowModalOverOverlay?, debugMode? }`.
    pub fn config(&self, options: &JsValue) -> Result<(), JsValue> {
        let json = String::from(JSON::stringify(options)?);
        let patch =
            ConfigPatch::from_json(&json).map_err(|err| JsValue::from_str(&err.to_string()))?;
        self.with("config", |c| c.configure(patch));
        Ok(())
    }

    /// Whether `generation` is still the live open cycle of `id`.
    #[wasm_bindgen(js_name = isCurrent)]
    pub fn is_current(&self, id: &str, generation: f64) -> bool {
        self.inner
            .try_borrow()
            .is_ok_and(|c| c.is_current_generation(id, generation as u64))
    }

    /// One-line state dump for the console.
    pub fn snapshot(&self) -> String {
        self.inner
            .try_borrow()
            .map(|c| c.snapshot().to_string())
            .unwrap_or_default()
    }
}

impl OverlayManager {
    fn with<R>(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut OverlayCoordinator<DomHost>) -> R,
    ) -> Option<R> {
        match self.inner.try_borrow_mut() {
            Ok(mut c) => Some(f(&mut *c)),
            Err(_) => {
                warn!(target: "clbt_web", op, "coordinator busy, call ignored");
                None
            }
        }
    }
}
