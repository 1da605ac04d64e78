//! Browser binding for the CLBT overlay coordinator.
//!
//! - [`DomHost`]: [`SurfaceHost`](clbt_overlay::SurfaceHost) over `web-sys`.
//! - `PageListeners`: document-level Escape and backdrop-click routing.
//! - [`OverlayManager`]: the `wasm-bindgen` handle page scripts call.
//! - [`console`]: `tracing` layer writing to the browser console.
//!
//! Only [`backdrop`] and [`console`] build on native targets; everything
//! touching the DOM is `wasm32`-only.

pub mod backdrop;
pub mod console;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod handle;
#[cfg(target_arch = "wasm32")]
mod listeners;

#[cfg(target_arch = "wasm32")]
pub use dom::DomHost;
#[cfg(target_arch = "wasm32")]
pub use handle::{OverlayManager, install_console_logging};
#[cfg(target_arch = "wasm32")]
pub use listeners::PageListeners;
