#![forbid(unsafe_code)]

//! Open/close cycle tokens.
//!
//! Every successful open starts a new generation for the surface and hands
//! out a [`SurfaceToken`]. Closing the surface advances the generation, so a
//! content loader that finishes late can ask the token whether its cycle is
//! still the live one before touching the surface.
//!
//! Tokens share the generation cell with the coordinator (`Rc<Cell<_>>`),
//! so checking one never needs a borrow of the coordinator itself.

use std::cell::Cell;
use std::rc::Rc;

use ahash::AHashMap;

/// Handle to one open cycle of a surface.
#[derive(Debug, Clone)]
pub struct SurfaceToken {
    surface: &'static str,
    generation: u64,
    live: Rc<Cell<u64>>,
}

impl SurfaceToken {
    #[must_use]
    pub fn surface(&self) -> &'static str {
        self.surface
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the surface is still in the cycle this token was issued for.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.live.get() == self.generation
    }
}

/// Per-surface generation counters.
#[derive(Debug, Default)]
pub(crate) struct Generations {
    cells: AHashMap<&'static str, Rc<Cell<u64>>>,
}

impl Generations {
    fn cell(&mut self, id: &'static str) -> &Rc<Cell<u64>> {
        self.cells.entry(id).or_default()
    }

    /// Start a new open cycle.
    pub(crate) fn begin(&mut self, id: &'static str) -> SurfaceToken {
        let cell = self.cell(id);
        cell.set(cell.get().wrapping_add(1));
        SurfaceToken {
            surface: id,
            generation: cell.get(),
            live: Rc::clone(cell),
        }
    }

    /// Token for the cycle in progress.
    pub(crate) fn current(&mut self, id: &'static str) -> SurfaceToken {
        let cell = self.cell(id);
        SurfaceToken {
            surface: id,
            generation: cell.get(),
            live: Rc::clone(cell),
        }
    }

    /// End the cycle in progress; its tokens go stale.
    pub(crate) fn end(&mut self, id: &'static str) {
        let cell = self.cell(id);
        cell.set(cell.get().wrapping_add(1));
    }

    /// Current raw generation, `0` if the surface never opened.
    pub(crate) fn value(&self, id: &str) -> u64 {
        self.cells.get(id).map_or(0, |c| c.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_current_until_end() {
        let mut gens = Generations::default();
        let token = gens.begin("resultsOverlay");
        assert!(token.is_current());
        assert_eq!(token.surface(), "resultsOverlay");

        gens.end("resultsOverlay");
        assert!(!token.is_current());
    }

    #[test]
    fn reopen_issues_fresh_generation() {
        let mut gens = Generations::default();
        let first = gens.begin("nameModal");
        gens.end("nameModal");
        let second = gens.begin("nameModal");

        assert_ne!(first.generation(), second.generation());
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn current_matches_begin() {
        let mut gens = Generations::default();
        let opened = gens.begin("nameModal");
        let refreshed = gens.current("nameModal");
        assert_eq!(opened.generation(), refreshed.generation());
        assert!(refreshed.is_current());
        assert_eq!(gens.value("nameModal"), opened.generation());
        assert_eq!(gens.value("never"), 0);
    }

    #[test]
    fn surfaces_are_independent() {
        let mut gens = Generations::default();
        let a = gens.begin("a");
        let _b = gens.begin("b");
        gens.end("b");
        assert!(a.is_current());
    }
}
