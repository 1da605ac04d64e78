#![forbid(unsafe_code)]

//! Point-in-time view of coordinator state for debugging.

use core::fmt;

/// Currently open surfaces, bottom of each stack first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSurfaces {
    pub modals: Vec<&'static str>,
    pub overlays: Vec<&'static str>,
    /// Modals followed by overlays.
    pub all: Vec<&'static str>,
}

impl ActiveSurfaces {
    pub(crate) fn new(modals: &[&'static str], overlays: &[&'static str]) -> Self {
        Self {
            modals: modals.to_vec(),
            overlays: overlays.to_vec(),
            all: modals.iter().chain(overlays).copied().collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Full coordinator state, including computed z-indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinatorSnapshot {
    /// `(id, z-index)` bottom to top.
    pub modals: Vec<(&'static str, u32)>,
    /// `(id, z-index)` bottom to top.
    pub overlays: Vec<(&'static str, u32)>,
    /// Sorted.
    pub blocked: Vec<&'static str>,
    /// `(surface, view)`, sorted by surface.
    pub views: Vec<(&'static str, &'static str)>,
    pub scroll_locked: bool,
    pub home_visible: bool,
}

impl fmt::Display for CoordinatorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn stack(f: &mut fmt::Formatter<'_>, entries: &[(&str, u32)]) -> fmt::Result {
            f.write_str("[")?;
            for (i, (id, z)) in entries.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{id}@{z}")?;
            }
            f.write_str("]")
        }

        f.write_str("modals=")?;
        stack(f, &self.modals)?;
        f.write_str(" overlays=")?;
        stack(f, &self.overlays)?;
        write!(f, " blocked={:?}", self.blocked)?;
        if !self.views.is_empty() {
            f.write_str(" views=")?;
            for (i, (surface, view)) in self.views.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{surface}:{view}")?;
            }
        }
        write!(
            f,
            " scroll_locked={} home_visible={}",
            self.scroll_locked, self.home_visible
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_all_is_modals_then_overlays() {
        let active = ActiveSurfaces::new(&["a", "b"], &["c"]);
        assert_eq!(active.all, vec!["a", "b", "c"]);
        assert!(!active.is_empty());
        assert!(ActiveSurfaces::default().is_empty());
    }

    #[test]
    fn display_format() {
        let snap = CoordinatorSnapshot {
            modals: vec![("nameModal", 1000)],
            overlays: vec![("resultsOverlay", 800)],
            blocked: vec!["ageGateModal"],
            views: vec![("resultsOverlay", "map")],
            scroll_locked: true,
            home_visible: false,
        };
        assert_eq!(
            snap.to_string(),
            "modals=[nameModal@1000] overlays=[resultsOverlay@800] \
             blocked=[\"ageGateModal\"] views=resultsOverlay:map \
             scroll_locked=true home_visible=false"
        );
    }
}
