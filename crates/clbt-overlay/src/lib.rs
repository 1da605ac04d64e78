#![forbid(unsafe_code)]

//! Overlay and modal stacking coordinator for the venue finder front end.
//!
//! # Overview
//!
//! - [`Registry`]: validated table of [`SurfaceDescriptor`]s keyed by id.
//! - [`OverlayCoordinator`]: tracks open surfaces, enforces group rules,
//!   assigns z-indices and owns the page scroll lock.
//! - [`SurfaceHost`]: the document adapter the coordinator projects onto.
//! - [`catalog`]: the application's own surfaces.
//!
//! # Example
//!
//! ```ignore
//! use clbt_overlay::catalog::venue_registry;
//! use clbt_overlay::testing::RecordingHost;
//! use clbt_overlay::OverlayCoordinator;
//!
//! let registry = venue_registry().unwrap();
//! let host = RecordingHost::for_registry(&registry);
//! let mut overlays = OverlayCoordinator::new(registry, host);
//!
//! assert!(overlays.open("nameModal"));
//! assert!(overlays.open("areaModal"));
//! assert_eq!(overlays.active().modals, vec!["areaModal"]);
//!
//! // A status update must start at its first step.
//! assert!(!overlays.open("gfStatusConfirmModal"));
//! assert!(overlays.open("gfStatusModal"));
//! assert!(overlays.open("gfStatusConfirmModal"));
//! ```
//!
//! `RecordingHost` needs the `test-helpers` feature outside this crate's own
//! tests; in the browser the host is `clbt_web::DomHost`.

pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod descriptor;
pub mod error;
pub mod host;
pub mod input;
pub mod registry;
pub mod snapshot;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;
pub mod token;
pub mod zindex;

pub use config::{ConfigPatch, CoordinatorConfig};
pub use coordinator::{OnOpen, OpenContext, OpenOptions, OverlayCoordinator};
pub use descriptor::{PRIMARY_GROUP, SurfaceDescriptor, SurfaceKind, SurfaceView};
pub use error::OverlayError;
pub use host::{ACTIVE_CLASS, HIDDEN_DISPLAY, SurfaceHost};
pub use input::InputEvent;
pub use registry::{Registry, RegistryError};
pub use snapshot::{ActiveSurfaces, CoordinatorSnapshot};
pub use token::SurfaceToken;
pub use zindex::{ZLayer, compute_z_index};
