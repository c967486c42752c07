//! Backend crate: kernel dispatch primitives for the farmhash workspace.
//!
//! This crate provides the foundation for the acceleration subsystem:
//!
//! - **Tiers**: the ordered ladder of instruction-set assumption levels
//!   ([`KernelTier`])
//! - **Dispatch**: ordered candidate lists resolved against detected CPU
//!   capabilities ([`dispatch::select`])
//! - **Caching**: at-most-once kernel-table initialization ([`OnceCache`])
//!
//! # Architecture
//!
//! The dispatch system has two paths:
//!
//! 1. **Compile-time selection** (zero-cost): when target features are known
//!    at compile time (`-C target-feature=...`), `platform::caps_static()`
//!    already contains them and resolution folds to the matching tier.
//!
//! 2. **Runtime selection** (cached): for generic binaries, the dispatcher
//!    detects CPU features once and caches the selected kernel table.
//!    Subsequent calls are a single indirect call.
//!
//! Algorithm crates register kernels as an ordered list of
//! [`dispatch::Candidate`]s, best first, with a portable fallback
//! (`Caps::NONE`) last so selection is total.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod cache;
pub mod dispatch;
pub mod tier;

pub use cache::OnceCache;
pub use dispatch::{Candidate, Selected, select};
// Re-export platform types for convenience.
pub use platform;
pub use tier::KernelTier;
