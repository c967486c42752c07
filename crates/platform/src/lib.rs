//! CPU detection and capabilities for the farmhash workspace.
//!
//! This crate is the single source of truth for CPU feature detection.
//! Kernel selection elsewhere in the workspace queries [`caps()`] instead of
//! doing ad-hoc detection.
//!
//! # Core Type
//!
//! - [`Caps`]: what instructions can run on this machine.
//!
//! # Design
//!
//! 1. **One API**: algorithms query `platform::caps()`.
//! 2. **Zero-cost when possible**: features enabled at compile time
//!    (`-C target-feature=...`) are folded in via `cfg!`.
//! 3. **Cached otherwise**: runtime detection runs once and is cached in a
//!    `OnceLock` (std) or an atomic word (no_std).
//! 4. **Conservative**: a feature that cannot be determined is reported as
//!    absent, never as an error. Under Miri all runtime features read as
//!    absent so no SIMD intrinsics are interpreted.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::{Arch, Caps};
pub use detect::caps_static;

/// Get detected CPU capabilities.
///
/// This is the main entry point for capability-based dispatch.
///
/// # Caching
///
/// - With `std`: the result is cached in a `OnceLock` (one-time detection).
/// - Without `std`: cached in an atomic word after the first call.
///
/// Safe to call repeatedly from any thread; detection itself is
/// side-effect-free.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::caps()
}

/// Initialize with user-supplied capabilities.
///
/// Call this before any call to [`caps()`] to bypass runtime detection.
/// Useful for bare metal environments, deployments where the CPU is known,
/// and testing specific dispatch paths.
#[inline]
pub fn init_with_caps(caps: Caps) {
  detect::set_caps_override(Some(caps));
}

/// Set or clear the capabilities override.
///
/// When set, [`caps()`] returns the override value instead of detecting.
/// Pass `None` to clear the override and resume detection. Thread-safe, but
/// intended to be called early in program initialization.
#[inline]
pub fn set_caps_override(value: Option<Caps>) {
  detect::set_caps_override(value);
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  detect::has_override()
}
