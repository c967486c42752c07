//! FarmHash family of fast non-cryptographic hashes (**NOT CRYPTO**).
//!
//! One stable API over a matrix of kernels compiled per instruction-set
//! tier (portable, SSSE3, SSE4.1, SSE4.2, AES-NI, AVX). A runtime
//! dispatcher probes the CPU once and forwards every call to the highest
//! tier the hardware fully supports. Tiers differ in speed only: **every
//! tier computes identical digests**, so values are stable across machines,
//! processes, and upgrades of this crate's kernel matrix.
//!
//! These hashes are suitable for hash tables, sharding, deduplication, and
//! fingerprints. They are **not** suitable for signatures, MACs, password
//! hashing, or any adversarial setting.
//!
//! # Example
//!
//! ```
//! let h = farmhash::hash64(b"hello, dispatch");
//! assert_eq!(h, farmhash::hash64(b"hello, dispatch"));
//!
//! // Empty input is a valid, fixed digest.
//! assert_eq!(farmhash::hash64(b""), 0x9ae1_6a3b_2f90_404f);
//! ```
//!
//! # Digest widths
//!
//! - [`hash32`] / [`hash32_with_seed`]
//! - [`hash64`] / [`hash64_with_seed`] / [`hash64_with_seeds`]
//! - [`hash128`] / [`hash128_with_seed`] (a native `u128`; the `(low,
//!   high)` halves are exposed by [`uint128`])
//!
//! The `fingerprint*` aliases document value stability for callers that
//! persist digests.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

#[doc(hidden)]
pub mod dispatch;
#[doc(hidden)]
pub mod kernels;
pub mod uint128;

#[cfg(feature = "std")]
mod hasher;
mod scalar;

#[cfg(feature = "std")]
pub use hasher::{FarmHashBuildHasher, FarmHasher};
pub use traits::FastHash;

pub use crate::dispatch::kernel_name;

/// FarmHash 32-bit hash of `data`.
#[inline]
#[must_use]
pub fn hash32(data: &[u8]) -> u32 {
  dispatch::hash32(data)
}

/// FarmHash 32-bit hash of `data` with a seed.
#[inline]
#[must_use]
pub fn hash32_with_seed(data: &[u8], seed: u32) -> u32 {
  dispatch::hash32_with_seed(data, seed)
}

/// FarmHash 64-bit hash of `data`.
///
/// The empty input hashes to `0x9ae16a3b2f90404f`.
#[inline]
#[must_use]
pub fn hash64(data: &[u8]) -> u64 {
  dispatch::hash64(data)
}

/// FarmHash 64-bit hash of `data` with a seed.
#[inline]
#[must_use]
pub fn hash64_with_seed(data: &[u8], seed: u64) -> u64 {
  dispatch::hash64_with_seeds(data, scalar::K2, seed)
}

/// FarmHash 64-bit hash of `data` with two seeds.
#[inline]
#[must_use]
pub fn hash64_with_seeds(data: &[u8], seed0: u64, seed1: u64) -> u64 {
  dispatch::hash64_with_seeds(data, seed0, seed1)
}

/// FarmHash 128-bit hash of `data`.
///
/// Digest packing is `(high << 64) | low`; see [`uint128`].
#[inline]
#[must_use]
pub fn hash128(data: &[u8]) -> u128 {
  let (lo, hi) = dispatch::hash128(data);
  uint128::from_halves(lo, hi)
}

/// FarmHash 128-bit hash of `data` with a 128-bit seed.
#[inline]
#[must_use]
pub fn hash128_with_seed(data: &[u8], seed: u128) -> u128 {
  let (lo, hi) = dispatch::hash128_with_seed(data, (uint128::low64(seed), uint128::high64(seed)));
  uint128::from_halves(lo, hi)
}

/// Fingerprint of `data`: a 32-bit value stable across machines and
/// library versions. Identical to [`hash32`].
#[inline]
#[must_use]
pub fn fingerprint32(data: &[u8]) -> u32 {
  hash32(data)
}

/// Fingerprint of `data`: a 64-bit value stable across machines and
/// library versions. Identical to [`hash64`].
#[inline]
#[must_use]
pub fn fingerprint64(data: &[u8]) -> u64 {
  hash64(data)
}

/// Fingerprint of `data`: a 128-bit value stable across machines and
/// library versions. Identical to [`hash128`].
#[inline]
#[must_use]
pub fn fingerprint128(data: &[u8]) -> u128 {
  hash128(data)
}

// ─────────────────────────────────────────────────────────────────────────────
// FastHash impls
// ─────────────────────────────────────────────────────────────────────────────

/// Marker type for the 32-bit hash.
#[derive(Clone, Copy, Debug, Default)]
pub struct FarmHash32;

/// Marker type for the 64-bit hash.
#[derive(Clone, Copy, Debug, Default)]
pub struct FarmHash64;

/// Marker type for the 128-bit hash.
#[derive(Clone, Copy, Debug, Default)]
pub struct FarmHash128;

impl FastHash for FarmHash32 {
  const OUTPUT_SIZE: usize = 4;
  const NAME: &'static str = "farmhash32";
  type Output = u32;
  type Seed = u32;

  #[inline]
  fn hash(data: &[u8]) -> u32 {
    hash32(data)
  }

  #[inline]
  fn hash_with_seed(seed: u32, data: &[u8]) -> u32 {
    hash32_with_seed(data, seed)
  }
}

impl FastHash for FarmHash64 {
  const OUTPUT_SIZE: usize = 8;
  const NAME: &'static str = "farmhash64";
  type Output = u64;
  type Seed = u64;

  #[inline]
  fn hash(data: &[u8]) -> u64 {
    hash64(data)
  }

  #[inline]
  fn hash_with_seed(seed: u64, data: &[u8]) -> u64 {
    hash64_with_seed(data, seed)
  }
}

impl FastHash for FarmHash128 {
  const OUTPUT_SIZE: usize = 16;
  const NAME: &'static str = "farmhash128";
  type Output = u128;
  type Seed = u128;

  #[inline]
  fn hash(data: &[u8]) -> u128 {
    hash128(data)
  }

  #[inline]
  fn hash_with_seed(seed: u128, data: &[u8]) -> u128 {
    hash128_with_seed(data, seed)
  }
}
