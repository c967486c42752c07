//! Kernel acceleration tiers.
//!
//! Tiers mirror the build matrix of the hash kernels: each level assumes
//! the instruction-set extensions of the levels below it plus one more.
//! Higher tiers run faster; every tier computes identical digests.
//!
//! # Tier Overview
//!
//! | Tier | Assumes |
//! |------|---------|
//! | 0 | Portable — baseline, always available |
//! | 1 | SSE2 + SSSE3 |
//! | 2 | ... + SSE4.1 |
//! | 3 | ... + SSE4.2 |
//! | 4 | ... + AES-NI |
//! | 5 | ... + AVX |
//!
//! The ladder describes what each *kernel build* assumes, not what real
//! CPUs guarantee: hardware may report AES-NI without AVX, or mask flags
//! under virtualization. Selection therefore always checks a tier's
//! **full** requirement set against detected capabilities and never infers
//! one flag from another.

use core::fmt;

use platform::{Caps, caps::x86};

/// Kernel acceleration tier.
///
/// Tiers are ordered from lowest (always available) to highest (fastest,
/// most stringent requirements). `Ord` follows that ladder, so comparisons
/// like `tier >= KernelTier::Sse42` check acceleration level directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum KernelTier {
  /// Tier 0: portable scalar implementation. Always available, always
  /// correct; the dispatch fallback.
  #[default]
  Portable = 0,

  /// Tier 1: assumes SSSE3 (and the x86_64 SSE2 baseline).
  Ssse3 = 1,

  /// Tier 2: additionally assumes SSE4.1.
  Sse41 = 2,

  /// Tier 3: additionally assumes SSE4.2.
  Sse42 = 3,

  /// Tier 4: additionally assumes AES-NI.
  Aesni = 4,

  /// Tier 5: additionally assumes AVX.
  Avx = 5,
}

impl KernelTier {
  /// All tiers in ascending order.
  pub const ALL: [Self; 6] = [
    Self::Portable,
    Self::Ssse3,
    Self::Sse41,
    Self::Sse42,
    Self::Aesni,
    Self::Avx,
  ];

  /// Convert to numeric value.
  #[inline]
  #[must_use]
  pub const fn as_u8(self) -> u8 {
    self as u8
  }

  /// Human-readable tier name.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      Self::Ssse3 => "ssse3",
      Self::Sse41 => "sse41",
      Self::Sse42 => "sse42",
      Self::Aesni => "aesni",
      Self::Avx => "avx",
    }
  }

  /// The full capability set a kernel compiled at this tier assumes.
  ///
  /// Each set is spelled out explicitly; dispatch checks it in full with
  /// [`Caps::has`], so a CPU reporting an unusual flag combination (for
  /// example AES-NI without AVX) selects exactly the highest tier it can
  /// actually run.
  #[inline]
  #[must_use]
  pub const fn required_caps(self) -> Caps {
    match self {
      Self::Portable => Caps::NONE,
      Self::Ssse3 => x86::SSE2.union(x86::SSSE3),
      Self::Sse41 => x86::SSE2.union(x86::SSSE3).union(x86::SSE41),
      Self::Sse42 => x86::SSE2.union(x86::SSSE3).union(x86::SSE41).union(x86::SSE42),
      Self::Aesni => x86::SSE2
        .union(x86::SSSE3)
        .union(x86::SSE41)
        .union(x86::SSE42)
        .union(x86::AESNI),
      Self::Avx => x86::SSE2
        .union(x86::SSSE3)
        .union(x86::SSE41)
        .union(x86::SSE42)
        .union(x86::AESNI)
        .union(x86::AVX),
    }
  }

  /// Check if this tier requires runtime capability detection.
  ///
  /// The portable tier is always available; every other tier must verify
  /// hardware support before use.
  #[inline]
  #[must_use]
  pub const fn requires_runtime_detection(self) -> bool {
    !matches!(self, Self::Portable)
  }
}

impl fmt::Display for KernelTier {
  #[inline]
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tier_ordering() {
    assert!(KernelTier::Portable < KernelTier::Ssse3);
    assert!(KernelTier::Ssse3 < KernelTier::Sse41);
    assert!(KernelTier::Sse41 < KernelTier::Sse42);
    assert!(KernelTier::Sse42 < KernelTier::Aesni);
    assert!(KernelTier::Aesni < KernelTier::Avx);
  }

  #[test]
  fn tier_values() {
    assert_eq!(KernelTier::Portable.as_u8(), 0);
    assert_eq!(KernelTier::Ssse3.as_u8(), 1);
    assert_eq!(KernelTier::Sse41.as_u8(), 2);
    assert_eq!(KernelTier::Sse42.as_u8(), 3);
    assert_eq!(KernelTier::Aesni.as_u8(), 4);
    assert_eq!(KernelTier::Avx.as_u8(), 5);
  }

  #[test]
  fn tier_names() {
    assert_eq!(KernelTier::Portable.name(), "portable");
    assert_eq!(KernelTier::Sse41.name(), "sse41");
    assert_eq!(KernelTier::Avx.name(), "avx");
  }

  #[test]
  fn requirements_grow_monotonically() {
    for pair in KernelTier::ALL.windows(2) {
      let lower = pair[0].required_caps();
      let higher = pair[1].required_caps();
      assert!(higher.has(lower), "{} should assume all of {}", pair[1], pair[0]);
      assert_eq!(higher.count(), lower.count() + 1, "each tier adds exactly one flag");
    }
  }

  #[test]
  fn portable_requires_nothing() {
    assert!(Caps::NONE.has(KernelTier::Portable.required_caps()));
    assert!(!KernelTier::Portable.requires_runtime_detection());
    assert!(KernelTier::Avx.requires_runtime_detection());
  }

  #[test]
  fn default_is_portable() {
    assert_eq!(KernelTier::default(), KernelTier::Portable);
  }
}
