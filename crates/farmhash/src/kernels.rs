//! Kernel variants and function tables.
//!
//! The scalar implementation in [`crate::scalar`] is the single source of
//! truth for the family's semantics. On x86/x86_64 it is additionally
//! monomorphized once per instruction-set tier under `#[target_feature]`,
//! letting the compiler emit SSSE3/SSE4.1/SSE4.2/AES-NI/AVX code from the
//! same bodies. Each tier lives in its own module, so every variant gets
//! distinct symbols and all of them link into one binary.
//!
//! Dispatch code addresses kernels through [`KernelId`] and the `*_fn`
//! tables below and must check [`required_caps`] before calling anything
//! but [`KernelId::Portable`].

use backend::KernelTier;
use platform::Caps;

use crate::scalar;

pub type Hash32Fn = fn(&[u8]) -> u32;
pub type Hash32SeedFn = fn(&[u8], u32) -> u32;
pub type Hash64Fn = fn(&[u8]) -> u64;
pub type Hash64SeedsFn = fn(&[u8], u64, u64) -> u64;
pub type Hash128Fn = fn(&[u8]) -> (u64, u64);
pub type Hash128SeedFn = fn(&[u8], u64, u64) -> (u64, u64);

/// Identifier of one compiled kernel set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KernelId {
  Portable = 0,
  #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
  Ssse3 = 1,
  #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
  Sse41 = 2,
  #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
  Sse42 = 3,
  #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
  Aesni = 4,
  #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
  Avx = 5,
}

/// All kernel ids compiled into this binary, ascending tier order.
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
pub const ALL: &[KernelId] = &[
  KernelId::Portable,
  KernelId::Ssse3,
  KernelId::Sse41,
  KernelId::Sse42,
  KernelId::Aesni,
  KernelId::Avx,
];

/// All kernel ids compiled into this binary, ascending tier order.
#[cfg(not(any(target_arch = "x86_64", target_arch = "x86")))]
pub const ALL: &[KernelId] = &[KernelId::Portable];

impl KernelId {
  /// The tier this kernel set was compiled for.
  #[inline]
  #[must_use]
  pub const fn tier(self) -> KernelTier {
    match self {
      Self::Portable => KernelTier::Portable,
      #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
      Self::Ssse3 => KernelTier::Ssse3,
      #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
      Self::Sse41 => KernelTier::Sse41,
      #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
      Self::Sse42 => KernelTier::Sse42,
      #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
      Self::Aesni => KernelTier::Aesni,
      #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
      Self::Avx => KernelTier::Avx,
    }
  }

  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    self.tier().name()
  }
}

/// Look up a kernel id by its tier name.
#[must_use]
pub fn id_from_name(name: &str) -> Option<KernelId> {
  ALL.iter().copied().find(|id| name == id.as_str())
}

/// The capability set that must be present before this kernel may run.
#[inline]
#[must_use]
pub const fn required_caps(id: KernelId) -> Caps {
  id.tier().required_caps()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tier instantiation
// ─────────────────────────────────────────────────────────────────────────────
//
// One module per tier, all generated from the same macro. The original
// library built this matrix by recompiling one translation unit under a
// growing set of -m flags with a namespace per tier; `#[target_feature]`
// plus module paths is the same matrix expressed in the type system.

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
macro_rules! tier_kernels {
  ($mod_name:ident, $tier:ident, $features:literal) => {
    pub(crate) mod $mod_name {
      #![allow(unsafe_code)]

      use backend::KernelTier;

      use crate::scalar;

      #[target_feature(enable = $features)]
      unsafe fn hash32_tf(data: &[u8]) -> u32 {
        scalar::hash32(data)
      }

      #[target_feature(enable = $features)]
      unsafe fn hash32_seed_tf(data: &[u8], seed: u32) -> u32 {
        scalar::hash32_with_seed(data, seed)
      }

      #[target_feature(enable = $features)]
      unsafe fn hash64_tf(data: &[u8]) -> u64 {
        scalar::hash64(data)
      }

      #[target_feature(enable = $features)]
      unsafe fn hash64_seeds_tf(data: &[u8], seed0: u64, seed1: u64) -> u64 {
        scalar::hash64_with_seeds(data, seed0, seed1)
      }

      #[target_feature(enable = $features)]
      unsafe fn hash128_tf(data: &[u8]) -> (u64, u64) {
        scalar::hash128(data)
      }

      #[target_feature(enable = $features)]
      unsafe fn hash128_seed_tf(data: &[u8], seed_lo: u64, seed_hi: u64) -> (u64, u64) {
        scalar::hash128_with_seed(data, (seed_lo, seed_hi))
      }

      #[inline]
      pub(crate) fn hash32(data: &[u8]) -> u32 {
        debug_assert!(platform::caps().has(KernelTier::$tier.required_caps()));
        // SAFETY: published by dispatch only after the tier's capability
        // set was verified against the running CPU.
        unsafe { hash32_tf(data) }
      }

      #[inline]
      pub(crate) fn hash32_with_seed(data: &[u8], seed: u32) -> u32 {
        debug_assert!(platform::caps().has(KernelTier::$tier.required_caps()));
        // SAFETY: as above.
        unsafe { hash32_seed_tf(data, seed) }
      }

      #[inline]
      pub(crate) fn hash64(data: &[u8]) -> u64 {
        debug_assert!(platform::caps().has(KernelTier::$tier.required_caps()));
        // SAFETY: as above.
        unsafe { hash64_tf(data) }
      }

      #[inline]
      pub(crate) fn hash64_with_seeds(data: &[u8], seed0: u64, seed1: u64) -> u64 {
        debug_assert!(platform::caps().has(KernelTier::$tier.required_caps()));
        // SAFETY: as above.
        unsafe { hash64_seeds_tf(data, seed0, seed1) }
      }

      #[inline]
      pub(crate) fn hash128(data: &[u8]) -> (u64, u64) {
        debug_assert!(platform::caps().has(KernelTier::$tier.required_caps()));
        // SAFETY: as above.
        unsafe { hash128_tf(data) }
      }

      #[inline]
      pub(crate) fn hash128_with_seed(data: &[u8], seed_lo: u64, seed_hi: u64) -> (u64, u64) {
        debug_assert!(platform::caps().has(KernelTier::$tier.required_caps()));
        // SAFETY: as above.
        unsafe { hash128_seed_tf(data, seed_lo, seed_hi) }
      }
    }
  };
}

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
tier_kernels!(ssse3, Ssse3, "ssse3");
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
tier_kernels!(sse41, Sse41, "ssse3,sse4.1");
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
tier_kernels!(sse42, Sse42, "ssse3,sse4.1,sse4.2");
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
tier_kernels!(aesni, Aesni, "ssse3,sse4.1,sse4.2,aes");
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
tier_kernels!(avx, Avx, "ssse3,sse4.1,sse4.2,aes,avx");

// Portable entries are the scalar functions themselves; adapters below only
// exist where the signatures differ.

fn portable_hash128_with_seed(data: &[u8], seed_lo: u64, seed_hi: u64) -> (u64, u64) {
  scalar::hash128_with_seed(data, (seed_lo, seed_hi))
}

// ─────────────────────────────────────────────────────────────────────────────
// Function tables
// ─────────────────────────────────────────────────────────────────────────────

#[must_use]
pub fn hash32_fn(id: KernelId) -> Hash32Fn {
  match id {
    KernelId::Portable => scalar::hash32,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Ssse3 => ssse3::hash32,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Sse41 => sse41::hash32,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Sse42 => sse42::hash32,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Aesni => aesni::hash32,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Avx => avx::hash32,
  }
}

#[must_use]
pub fn hash32_seed_fn(id: KernelId) -> Hash32SeedFn {
  match id {
    KernelId::Portable => scalar::hash32_with_seed,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Ssse3 => ssse3::hash32_with_seed,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Sse41 => sse41::hash32_with_seed,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Sse42 => sse42::hash32_with_seed,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Aesni => aesni::hash32_with_seed,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Avx => avx::hash32_with_seed,
  }
}

#[must_use]
pub fn hash64_fn(id: KernelId) -> Hash64Fn {
  match id {
    KernelId::Portable => scalar::hash64,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Ssse3 => ssse3::hash64,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Sse41 => sse41::hash64,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Sse42 => sse42::hash64,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Aesni => aesni::hash64,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Avx => avx::hash64,
  }
}

#[must_use]
pub fn hash64_seeds_fn(id: KernelId) -> Hash64SeedsFn {
  match id {
    KernelId::Portable => scalar::hash64_with_seeds,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Ssse3 => ssse3::hash64_with_seeds,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Sse41 => sse41::hash64_with_seeds,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Sse42 => sse42::hash64_with_seeds,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Aesni => aesni::hash64_with_seeds,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Avx => avx::hash64_with_seeds,
  }
}

#[must_use]
pub fn hash128_fn(id: KernelId) -> Hash128Fn {
  match id {
    KernelId::Portable => scalar::hash128,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Ssse3 => ssse3::hash128,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Sse41 => sse41::hash128,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Sse42 => sse42::hash128,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Aesni => aesni::hash128,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Avx => avx::hash128,
  }
}

#[must_use]
pub fn hash128_seed_fn(id: KernelId) -> Hash128SeedFn {
  match id {
    KernelId::Portable => portable_hash128_with_seed,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Ssse3 => ssse3::hash128_with_seed,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Sse41 => sse41::hash128_with_seed,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Sse42 => sse42::hash128_with_seed,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Aesni => aesni::hash128_with_seed,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    KernelId::Avx => avx::hash128_with_seed,
  }
}
