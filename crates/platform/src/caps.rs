//! CPU capability representation.
//!
//! [`Caps`] is a bitset of ISA extensions. It answers the question: "what
//! instructions can I legally run on this machine?" The bits are
//! x86-focused because that is where the kernel variants live; on other
//! architectures detection simply reports the empty set and dispatch falls
//! back to the portable kernel.

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities: a 64-bit feature bitset.
///
/// This is the core type for capability-based dispatch. Use
/// [`has()`](Caps::has) to check whether a full requirement set is
/// available.
///
/// # Thread Safety
///
/// `Caps` is `Copy`, `Send`, and `Sync`; it can be freely shared across
/// threads.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) u64);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self(0);

  /// Create a capability set with a single bit set.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    Self(1u64 << (bit & 63))
  }

  /// Check if all features in `required` are present.
  ///
  /// This is the core dispatch check. A candidate kernel is eligible only
  /// when its **entire** requirement set is a subset of the detected caps;
  /// nothing here assumes one feature implies another.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0 & required.0) == required.0
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Intersection of two capability sets.
  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    Self(self.0 & other.0)
  }

  /// Check if the capability set is empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Count the number of features present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0.count_ones()
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitAnd for Caps {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self::Output {
    self.intersection(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl core::fmt::Debug for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str("Caps{")?;
    let mut first = true;
    for &(flag, name) in NAMED_FLAGS {
      if self.has(flag) {
        if !first {
          f.write_str("|")?;
        }
        f.write_str(name)?;
        first = false;
      }
    }
    f.write_str("}")
  }
}

/// Flag/name pairs for diagnostics, in ascending bit order.
const NAMED_FLAGS: &[(Caps, &str)] = &[
  (x86::SSE2, "sse2"),
  (x86::SSSE3, "ssse3"),
  (x86::SSE41, "sse4.1"),
  (x86::SSE42, "sse4.2"),
  (x86::AESNI, "aesni"),
  (x86::AVX, "avx"),
  (x86::AVX2, "avx2"),
  (x86::PCLMULQDQ, "pclmulqdq"),
  (x86::POPCNT, "popcnt"),
];

// ─────────────────────────────────────────────────────────────────────────────
// Architecture Identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  X86,
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    #[cfg(target_arch = "x86_64")]
    {
      Self::X86_64
    }
    #[cfg(target_arch = "x86")]
    {
      Self::X86
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "x86")))]
    {
      Self::Other
    }
  }

  /// Returns the human-readable name for this architecture.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::X86 => "x86",
      Self::Other => "other",
    }
  }
}

impl core::fmt::Display for Arch {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86/x86_64 Features
// ─────────────────────────────────────────────────────────────────────────────

/// x86/x86_64 CPU features.
///
/// Covers the SSE/AVX ladder used by the kernel tiers plus a few adjacent
/// flags that detection reports for diagnostics. The constants are plain
/// `Caps` values so requirement sets compose with `|`.
pub mod x86 {
  use super::Caps;

  // ─── SSE Family ───
  pub const SSE2: Caps = Caps::bit(0);
  pub const SSSE3: Caps = Caps::bit(1);
  pub const SSE41: Caps = Caps::bit(2);
  pub const SSE42: Caps = Caps::bit(3);

  // ─── Crypto / AVX ───
  pub const AESNI: Caps = Caps::bit(4);
  pub const AVX: Caps = Caps::bit(5);
  pub const AVX2: Caps = Caps::bit(6);
  pub const PCLMULQDQ: Caps = Caps::bit(7);

  // ─── Misc ───
  pub const POPCNT: Caps = Caps::bit(8);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn none_is_empty() {
    assert!(Caps::NONE.is_empty());
    assert_eq!(Caps::NONE.count(), 0);
  }

  #[test]
  fn has_requires_full_set() {
    let detected = x86::SSE2 | x86::SSSE3 | x86::SSE41;
    assert!(detected.has(x86::SSE2));
    assert!(detected.has(x86::SSE2 | x86::SSE41));
    assert!(!detected.has(x86::SSE42));
    assert!(!detected.has(x86::SSE41 | x86::SSE42));
    // The empty requirement is always satisfied.
    assert!(Caps::NONE.has(Caps::NONE));
    assert!(detected.has(Caps::NONE));
  }

  #[test]
  fn set_operations() {
    let a = x86::SSE2 | x86::AESNI;
    let b = x86::AESNI | x86::AVX;
    assert_eq!(a.union(b).count(), 3);
    assert_eq!(a.intersection(b), x86::AESNI);
    assert_eq!(a | b, a.union(b));
    assert_eq!(a & b, a.intersection(b));
  }

  #[test]
  fn flags_are_distinct() {
    let all = [
      x86::SSE2,
      x86::SSSE3,
      x86::SSE41,
      x86::SSE42,
      x86::AESNI,
      x86::AVX,
      x86::AVX2,
      x86::PCLMULQDQ,
      x86::POPCNT,
    ];
    for (i, &a) in all.iter().enumerate() {
      assert_eq!(a.count(), 1);
      for &b in &all[i + 1..] {
        assert!(a.intersection(b).is_empty());
      }
    }
  }

  #[test]
  fn debug_lists_feature_names() {
    extern crate alloc;

    let caps = x86::SSE2 | x86::AVX;
    let s = alloc::format!("{caps:?}");
    assert!(s.contains("sse2"));
    assert!(s.contains("avx"));
    assert!(!s.contains("aesni"));
  }

  #[test]
  fn arch_name_matches_target() {
    #[cfg(target_arch = "x86_64")]
    assert_eq!(Arch::current().name(), "x86_64");
    #[cfg(not(any(target_arch = "x86_64", target_arch = "x86")))]
    assert_eq!(Arch::current().name(), "other");
  }
}
