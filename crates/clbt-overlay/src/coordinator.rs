#![forbid(unsafe_code)]

//! Overlay/modal stacking coordinator.
//!
//! The `OverlayCoordinator` tracks which surfaces are open, enforces the
//! group rules from the [`Registry`], assigns z-indices and owns the page
//! scroll lock. It is constructed once per page session and handed to every
//! caller module.
//!
//! # Invariants
//!
//! - A surface id appears at most once across both stacks.
//! - Within an exclusive group at most one surface is open.
//! - Within a stackable group, open `order` values are non-decreasing from
//!   bottom to top.
//! - Page scroll is locked iff at least one surface is open.
//! - The home section is hidden iff a `primary` surface is open.
//! - Within each stack, z-order is strictly increasing among surfaces of the
//!   same kind unless a surface pins its z-index in the registry. Banners
//!   share the overlay stack but sit on their own lower layer.
//!
//! # Failure Modes
//!
//! Every refusal is an [`OverlayError`]. The boolean operations log it
//! (`error!` for missing elements, `warn!` otherwise) and return `false`;
//! nothing panics. A refused open mutates nothing, except that an exclusive
//! surface clears its group before the overlay-policy and sequence checks run.
//! Closing a surface that is not open is a successful no-op.
//!
//! # Re-entrancy
//!
//! `on_open` callbacks receive the coordinator mutably and run after every
//! stack, z-index and scroll update for the open has been applied, so a
//! nested `open`/`close` from inside a callback is an ordinary call.

use std::any::Any;
use std::fmt;

use ahash::{AHashMap, AHashSet};
use tracing::{debug, error, warn};

use crate::config::{ConfigPatch, CoordinatorConfig};
use crate::descriptor::{SurfaceDescriptor, SurfaceKind};
use crate::error::OverlayError;
use crate::host::SurfaceHost;
use crate::input::InputEvent;
use crate::registry::Registry;
use crate::snapshot::{ActiveSurfaces, CoordinatorSnapshot};
use crate::token::{Generations, SurfaceToken};
use crate::zindex::{ZLayer, compute_z_index};

/// Callback run after a surface becomes visible (or is refreshed).
pub type OnOpen<H> = Box<dyn FnOnce(&mut OverlayCoordinator<H>, OpenContext)>;

/// What an `on_open` callback is told about the open.
#[derive(Debug)]
pub struct OpenContext {
    /// Token for the open cycle; check `is_current()` before late writes.
    pub token: SurfaceToken,
    /// Caller data passed through [`OpenOptions::data`].
    pub data: Option<Box<dyn Any>>,
    /// `true` when the surface was already open and only its content is
    /// being refreshed.
    pub refreshed: bool,
}

/// Options for [`OverlayCoordinator::open_with`].
pub struct OpenOptions<H: SurfaceHost> {
    on_open: Option<OnOpen<H>>,
    view: Option<String>,
    data: Option<Box<dyn Any>>,
}

impl<H: SurfaceHost> Default for OpenOptions<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: SurfaceHost> fmt::Debug for OpenOptions<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenOptions")
            .field("on_open", &self.on_open.is_some())
            .field("view", &self.view)
            .field("data", &self.data.is_some())
            .finish()
    }
}

impl<H: SurfaceHost> OpenOptions<H> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            on_open: None,
            view: None,
            data: None,
        }
    }

    /// Run `f` once the surface is visible, or immediately if it already is.
    #[must_use]
    pub fn on_open(
        mut self,
        f: impl FnOnce(&mut OverlayCoordinator<H>, OpenContext) + 'static,
    ) -> Self {
        self.on_open = Some(Box::new(f));
        self
    }

    /// Select this internal view instead of the default one on open.
    #[must_use]
    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    /// Attach caller data handed to the `on_open` callback.
    #[must_use]
    pub fn data(mut self, data: impl Any) -> Self {
        self.data = Some(Box::new(data));
        self
    }
}

/// The page-session surface coordinator.
pub struct OverlayCoordinator<H: SurfaceHost> {
    registry: Registry,
    host: H,
    config: CoordinatorConfig,
    /// Open modals, bottom to top.
    modals: Vec<&'static str>,
    /// Open overlays and banners, bottom to top.
    overlays: Vec<&'static str>,
    blocked: AHashSet<&'static str>,
    views: AHashMap<&'static str, &'static str>,
    generations: Generations,
    scroll_locked: bool,
    home_visible: bool,
}

impl<H: SurfaceHost + fmt::Debug> fmt::Debug for OverlayCoordinator<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayCoordinator")
            .field("host", &self.host)
            .field("config", &self.config)
            .field("modals", &self.modals)
            .field("overlays", &self.overlays)
            .field("blocked", &self.blocked)
            .finish_non_exhaustive()
    }
}

impl<H: SurfaceHost> OverlayCoordinator<H> {
    /// Create a coordinator with default policy. Nothing is open.
    pub fn new(registry: Registry, host: H) -> Self {
        Self::with_config(registry, host, CoordinatorConfig::default())
    }

    pub fn with_config(registry: Registry, host: H, config: CoordinatorConfig) -> Self {
        Self {
            registry,
            host,
            config,
            modals: Vec::new(),
            overlays: Vec::new(),
            blocked: AHashSet::new(),
            views: AHashMap::new(),
            generations: Generations::default(),
            scroll_locked: false,
            home_visible: true,
        }
    }

    // --- Accessors ---

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> CoordinatorConfig {
        self.config
    }

    /// Merge a partial policy update.
    pub fn configure(&mut self, patch: ConfigPatch) {
        self.config.apply(patch);
        debug!(target: "clbt_overlay", config = ?self.config, "configuration updated");
    }

    // --- Open ---

    /// Open `id` with no options. Returns `false` on any refusal.
    pub fn open(&mut self, id: &str) -> bool {
        self.open_with(id, OpenOptions::new())
    }

    /// Open `id`, logging and returning `false` on any refusal.
    pub fn open_with(&mut self, id: &str, options: OpenOptions<H>) -> bool {
        match self.try_open(id, options) {
            Ok(_) => true,
            Err(err) => {
                self.report("open", &err);
                false
            }
        }
    }

    /// Open `id`, returning the token for the open cycle.
    ///
    /// Preconditions are evaluated in order: registered, not blocked, already
    /// open (refresh), element present, exclusive group cleared, overlay
    /// policy, stack sequence.
    pub fn try_open(
        &mut self,
        id: &str,
        options: OpenOptions<H>,
    ) -> Result<SurfaceToken, OverlayError> {
        let desc = *self.lookup(id)?;
        let id = desc.id;

        if self.blocked.contains(id) {
            return Err(OverlayError::Blocked(id));
        }

        if self.is_open(id) {
            debug!(target: "clbt_overlay", surface = id, "already open, refreshing");
            let token = self.generations.current(id);
            self.run_on_open(options, token.clone(), true);
            return Ok(token);
        }

        if !self.host.has_element(id) {
            return Err(OverlayError::MissingElement(id));
        }

        if desc.exclusive {
            self.close_group(desc.group, Some(id));
        }

        if desc.kind.is_modal()
            && !self.config.allow_modal_over_overlay
            && self.overlay_open()
            && !desc.priority
        {
            return Err(OverlayError::ModalOverOverlay(id));
        }

        if desc.stackable {
            self.check_sequence(&desc)?;
        }

        if desc.kind.is_modal() && !self.config.allow_multiple_modals {
            self.close_other_modals(&desc);
        }

        self.host.show(id, desc.kind.display());
        self.stack_mut(desc.kind).push(id);
        self.restack();
        self.sync_page_state();

        let token = self.generations.begin(id);
        if desc.has_internal_views() {
            self.reset_view(&desc, options.view.as_deref());
        }

        debug!(
            target: "clbt_overlay",
            surface = id,
            kind = %desc.kind,
            group = desc.group,
            generation = token.generation(),
            "opened"
        );
        self.trace_state("open");

        self.run_on_open(options, token.clone(), false);
        Ok(token)
    }

    fn check_sequence(&self, desc: &SurfaceDescriptor) -> Result<(), OverlayError> {
        let top = self
            .stack(desc.kind)
            .iter()
            .rev()
            .filter_map(|open| self.registry.get(open))
            .find(|d| d.group == desc.group && d.stackable);

        match top {
            Some(top) if desc.order < top.order => Err(OverlayError::OrderViolation {
                id: desc.id,
                order: desc.order,
                top: top.id,
                top_order: top.order,
            }),
            Some(_) => Ok(()),
            None => match self.registry.first_order(desc.group) {
                Some(first) if desc.order > first => Err(OverlayError::FirstStepRequired {
                    id: desc.id,
                    order: desc.order,
                    first,
                }),
                _ => Ok(()),
            },
        }
    }

    fn close_other_modals(&mut self, desc: &SurfaceDescriptor) {
        let others: Vec<&'static str> = self
            .modals
            .iter()
            .copied()
            .filter(|open| {
                let same_sequence = desc.stackable
                    && self
                        .registry
                        .get(open)
                        .is_some_and(|d| d.stackable && d.group == desc.group);
                !same_sequence
            })
            .collect();
        for open in others {
            self.close_registered(open);
        }
    }

    fn run_on_open(&mut self, options: OpenOptions<H>, token: SurfaceToken, refreshed: bool) {
        let OpenOptions { on_open, data, .. } = options;
        if let Some(callback) = on_open {
            callback(
                self,
                OpenContext {
                    token,
                    data,
                    refreshed,
                },
            );
        }
    }

    // --- Close ---

    /// Close `id`. Returns `false` only for unregistered ids.
    pub fn close(&mut self, id: &str) -> bool {
        match self.try_close(id) {
            Ok(_) => true,
            Err(err) => {
                self.report("close", &err);
                false
            }
        }
    }

    /// Close `id`, returning whether it was open.
    pub fn try_close(&mut self, id: &str) -> Result<bool, OverlayError> {
        let id = self.lookup(id)?.id;
        Ok(self.close_registered(id))
    }

    fn close_registered(&mut self, id: &'static str) -> bool {
        let removed = remove_id(&mut self.modals, id) || remove_id(&mut self.overlays, id);
        if !removed {
            return false;
        }

        self.host.hide(id);
        self.generations.end(id);
        self.restack();
        self.sync_page_state();

        debug!(target: "clbt_overlay", surface = id, "closed");
        self.trace_state("close");
        true
    }

    /// Close every open surface in `group`, skipping `except`.
    pub fn close_group(&mut self, group: &str, except: Option<&str>) {
        let targets: Vec<&'static str> = self
            .modals
            .iter()
            .chain(&self.overlays)
            .copied()
            .filter(|&id| Some(id) != except)
            .filter(|id| self.registry.get(id).is_some_and(|d| d.group == group))
            .collect();
        for id in targets {
            self.close_registered(id);
        }
    }

    /// Close every open modal, top first.
    pub fn close_all_modals(&mut self) {
        while let Some(&top) = self.modals.last() {
            self.close_registered(top);
        }
    }

    /// Close every open overlay and banner, top first.
    pub fn close_all_overlays(&mut self) {
        while let Some(&top) = self.overlays.last() {
            self.close_registered(top);
        }
    }

    /// Close every modal, then every overlay.
    pub fn close_all(&mut self) {
        self.close_all_modals();
        self.close_all_overlays();
    }

    // --- Blocking ---

    /// Forbid `id` from opening; closes it if open.
    pub fn block(&mut self, id: &str) -> bool {
        match self.lookup(id) {
            Ok(desc) => {
                let id = desc.id;
                self.blocked.insert(id);
                self.close_registered(id);
                debug!(target: "clbt_overlay", surface = id, "blocked");
                true
            }
            Err(err) => {
                self.report("block", &err);
                false
            }
        }
    }

    pub fn unblock(&mut self, id: &str) -> bool {
        match self.lookup(id) {
            Ok(desc) => {
                let id = desc.id;
                self.blocked.remove(id);
                debug!(target: "clbt_overlay", surface = id, "unblocked");
                true
            }
            Err(err) => {
                self.report("unblock", &err);
                false
            }
        }
    }

    /// Block every registered member of `group`.
    pub fn block_group(&mut self, group: &str) {
        let members: Vec<&'static str> =
            self.registry.group_members(group).map(|d| d.id).collect();
        if members.is_empty() {
            warn!(target: "clbt_overlay", group, "block_group: group has no members");
        }
        for id in members {
            self.blocked.insert(id);
            self.close_registered(id);
        }
    }

    pub fn unblock_group(&mut self, group: &str) {
        let registry = &self.registry;
        self.blocked
            .retain(|id| registry.get(id).is_none_or(|d| d.group != group));
    }

    #[must_use]
    pub fn is_blocked(&self, id: &str) -> bool {
        self.blocked.contains(id)
    }

    // --- Internal views ---

    /// Switch `id` to `view`, leaving its open state alone.
    pub fn toggle_internal_view(&mut self, id: &str, view: &str) -> bool {
        match self.try_toggle_internal_view(id, view) {
            Ok(_) => true,
            Err(err) => {
                self.report("toggle_internal_view", &err);
                false
            }
        }
    }

    pub fn try_toggle_internal_view(
        &mut self,
        id: &str,
        view: &str,
    ) -> Result<&'static str, OverlayError> {
        let desc = *self.lookup(id)?;
        if !desc.has_internal_views() {
            return Err(OverlayError::NoInternalViews(desc.id));
        }
        let target = desc.view(view).ok_or_else(|| OverlayError::UnknownView {
            surface: desc.id,
            view: view.to_owned(),
        })?;

        if !self.host.show_view(desc.id, target, desc.views) {
            return Err(OverlayError::MissingElement(target.element));
        }
        self.views.insert(desc.id, target.name);
        debug!(target: "clbt_overlay", surface = desc.id, view = target.name, "view switched");
        Ok(target.name)
    }

    /// Recorded view of `id`, falling back to its default view.
    #[must_use]
    pub fn get_internal_view(&self, id: &str) -> Option<&'static str> {
        let desc = self.registry.get(id)?;
        self.views.get(desc.id).copied().or(desc.default_view)
    }

    fn reset_view(&mut self, desc: &SurfaceDescriptor, requested: Option<&str>) {
        let requested = requested.and_then(|name| {
            let found = desc.view(name);
            if found.is_none() {
                warn!(
                    target: "clbt_overlay",
                    surface = desc.id,
                    view = name,
                    "requested view not declared, using default"
                );
            }
            found
        });
        let Some(view) = requested.or_else(|| desc.default_view.and_then(|d| desc.view(d)))
        else {
            return;
        };
        self.views.insert(desc.id, view.name);
        if !self.host.show_view(desc.id, view, desc.views) {
            error!(
                target: "clbt_overlay",
                surface = desc.id,
                element = view.element,
                "view container missing"
            );
        }
    }

    // --- Input ---

    /// Route page-level input. Returns the surface that closed, if any.
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<&'static str> {
        match event {
            InputEvent::Escape => {
                let top = self
                    .modals
                    .last()
                    .copied()
                    .or_else(|| self.top_dismissable_overlay())?;
                let closable = self.registry.get(top).is_some_and(|d| d.close_on_escape);
                if closable && self.close_registered(top) {
                    Some(top)
                } else {
                    None
                }
            }
            InputEvent::BackdropClick { surface } => {
                let desc = *self.registry.get(surface)?;
                let id = desc.id;
                if desc.close_on_backdrop && self.close_registered(id) {
                    Some(id)
                } else {
                    None
                }
            }
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn is_open(&self, id: &str) -> bool {
        self.modals.iter().chain(&self.overlays).any(|&open| open == id)
    }

    #[must_use]
    pub fn active(&self) -> ActiveSurfaces {
        ActiveSurfaces::new(&self.modals, &self.overlays)
    }

    #[must_use]
    pub fn top_modal(&self) -> Option<&'static str> {
        self.modals.last().copied()
    }

    #[must_use]
    pub fn top_overlay(&self) -> Option<&'static str> {
        self.overlays.last().copied()
    }

    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Whether a token for `id` at `generation` still belongs to the live cycle.
    #[must_use]
    pub fn is_current_generation(&self, id: &str, generation: u64) -> bool {
        self.is_open(id) && self.generations.value(id) == generation
    }

    /// Z-index currently assigned to an open surface.
    #[must_use]
    pub fn z_index_of(&self, id: &str) -> Option<u32> {
        let desc = self.registry.get(id)?;
        let position = self.stack(desc.kind).iter().position(|&open| open == id)?;
        Some(compute_z_index(
            ZLayer::of(desc.kind),
            position,
            desc.z_index,
        ))
    }

    #[must_use]
    pub fn snapshot(&self) -> CoordinatorSnapshot {
        let with_z = |stack: &[&'static str]| -> Vec<(&'static str, u32)> {
            stack
                .iter()
                .filter_map(|&id| self.z_index_of(id).map(|z| (id, z)))
                .collect()
        };
        let mut blocked: Vec<&'static str> = self.blocked.iter().copied().collect();
        blocked.sort_unstable();
        let mut views: Vec<(&'static str, &'static str)> =
            self.views.iter().map(|(&s, &v)| (s, v)).collect();
        views.sort_unstable();

        CoordinatorSnapshot {
            modals: with_z(&self.modals),
            overlays: with_z(&self.overlays),
            blocked,
            views,
            scroll_locked: self.scroll_locked,
            home_visible: self.home_visible,
        }
    }

    // --- Internals ---

    fn lookup(&self, id: &str) -> Result<&SurfaceDescriptor, OverlayError> {
        self.registry
            .get(id)
            .ok_or_else(|| OverlayError::UnknownSurface(id.to_owned()))
    }

    /// Whether a non-banner overlay is open.
    fn overlay_open(&self) -> bool {
        self.overlays
            .iter()
            .any(|id| self.registry.get(id).is_some_and(|d| d.kind == SurfaceKind::Overlay))
    }

    /// Topmost open overlay, looking through banners.
    fn top_dismissable_overlay(&self) -> Option<&'static str> {
        self.overlays
            .iter()
            .rev()
            .copied()
            .find(|id| self.registry.get(id).is_some_and(|d| d.kind != SurfaceKind::Banner))
    }

    fn stack(&self, kind: SurfaceKind) -> &[&'static str] {
        if kind.is_modal() {
            &self.modals
        } else {
            &self.overlays
        }
    }

    fn stack_mut(&mut self, kind: SurfaceKind) -> &mut Vec<&'static str> {
        if kind.is_modal() {
            &mut self.modals
        } else {
            &mut self.overlays
        }
    }

    /// Reassign z-indices to both stacks from their current positions.
    fn restack(&mut self) {
        let Self {
            registry,
            host,
            modals,
            overlays,
            ..
        } = self;
        for stack in [&*modals, &*overlays] {
            for (position, &id) in stack.iter().enumerate() {
                let Some(desc) = registry.get(id) else {
                    continue;
                };
                host.set_z_index(id, compute_z_index(ZLayer::of(desc.kind), position, desc.z_index));
            }
        }
    }

    /// Project scroll lock and home visibility from the stacks.
    fn sync_page_state(&mut self) {
        let lock = !self.modals.is_empty() || !self.overlays.is_empty();
        if lock != self.scroll_locked {
            self.scroll_locked = lock;
            self.host.set_scroll_locked(lock);
        }

        let primary_open = self
            .modals
            .iter()
            .chain(&self.overlays)
            .any(|id| self.registry.get(id).is_some_and(SurfaceDescriptor::is_primary));
        let home_visible = !primary_open;
        if home_visible != self.home_visible {
            self.home_visible = home_visible;
            self.host.set_home_visible(home_visible);
        }
    }

    fn report(&self, op: &'static str, err: &OverlayError) {
        if err.is_fault() {
            error!(target: "clbt_overlay", op, %err, "surface operation failed");
        } else {
            warn!(target: "clbt_overlay", op, %err, "surface operation refused");
        }
    }

    fn trace_state(&self, op: &'static str) {
        if self.config.debug_mode {
            debug!(target: "clbt_overlay", op, state = %self.snapshot(), "coordinator state");
        }
    }
}

fn remove_id(stack: &mut Vec<&'static str>, id: &str) -> bool {
    match stack.iter().position(|&open| open == id) {
        Some(idx) => {
            stack.remove(idx);
            true
        }
        None => false,
    }
}
