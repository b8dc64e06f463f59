//! Editor View - Headless host for typewriter scrolling.
//!
//! Implements `ViewHost` with fixed line-height geometry, an in-memory
//! content style and a manually pumped animation-frame queue, so the
//! plugins can run without a window.

pub mod headless;

pub use headless::HeadlessView;
