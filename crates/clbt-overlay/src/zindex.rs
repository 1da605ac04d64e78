#![forbid(unsafe_code)]

//! Z-index assignment.
//!
//! Stacking values are a pure function of the surface's layer, its position
//! in its stack, and an optional registry override. Later positions always get
//! strictly larger values, so a surface opened after another renders above it.

use crate::descriptor::SurfaceKind;

/// Base z-index for banners.
pub const BANNER_BASE_Z: u32 = 500;

/// Base z-index for overlays.
pub const OVERLAY_BASE_Z: u32 = 800;

/// Base z-index for the modal layer.
pub const MODAL_BASE_Z: u32 = 1000;

/// Z-index increment between stacked surfaces (leaves room for internal layers).
pub const Z_INCREMENT: u32 = 10;

/// Stacking layer a surface is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZLayer {
    Banner,
    Overlay,
    Modal,
}

impl ZLayer {
    #[must_use]
    pub const fn of(kind: SurfaceKind) -> Self {
        match kind {
            SurfaceKind::Modal => Self::Modal,
            SurfaceKind::Overlay => Self::Overlay,
            SurfaceKind::Banner => Self::Banner,
        }
    }

    #[must_use]
    pub const fn base(self) -> u32 {
        match self {
            Self::Banner => BANNER_BASE_Z,
            Self::Overlay => OVERLAY_BASE_Z,
            Self::Modal => MODAL_BASE_Z,
        }
    }
}

/// Compute the z-index for the surface at `position` (0 = bottom) of its stack.
///
/// An explicit override always wins. Computed values saturate instead of
/// wrapping.
#[must_use]
pub fn compute_z_index(layer: ZLayer, position: usize, explicit: Option<u32>) -> u32 {
    if let Some(z) = explicit {
        return z;
    }
    let step = u32::try_from(position)
        .unwrap_or(u32::MAX)
        .saturating_mul(Z_INCREMENT);
    layer.base().saturating_add(step)
}
