//! Runtime CPU detection.
//!
//! Provides the cached [`caps()`] entry point. It combines:
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (CPUID on x86/x86_64, `std` only)
//! - Caching (`OnceLock` with `std`, an atomic word without)
//! - User-supplied overrides for bare metal and testing
//! - A Miri fallback that always reports the empty set
//!
//! Detection never fails: a feature that cannot be determined is reported
//! as absent, which at worst selects a slower, always-correct kernel.

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::caps::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Override Support
// ─────────────────────────────────────────────────────────────────────────────
//
// The override is a single atomic word plus a flag, which works identically
// on std and no_std targets. It takes precedence over detection and over the
// detection cache.

static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
static OVERRIDE_BITS: AtomicU64 = AtomicU64::new(0);

pub(crate) fn set_caps_override(value: Option<Caps>) {
  match value {
    Some(caps) => {
      OVERRIDE_BITS.store(caps.0, Ordering::Release);
      OVERRIDE_SET.store(true, Ordering::Release);
    }
    None => {
      OVERRIDE_SET.store(false, Ordering::Release);
    }
  }
}

#[inline]
pub(crate) fn has_override() -> bool {
  OVERRIDE_SET.load(Ordering::Acquire)
}

#[inline]
fn get_override() -> Option<Caps> {
  if !OVERRIDE_SET.load(Ordering::Acquire) {
    return None;
  }
  Some(Caps(OVERRIDE_BITS.load(Ordering::Acquire)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Cached Detection
// ─────────────────────────────────────────────────────────────────────────────

#[inline]
pub(crate) fn caps() -> Caps {
  if let Some(over) = get_override() {
    return over;
  }

  // Under Miri, report no features so no SIMD path is ever interpreted.
  #[cfg(miri)]
  {
    Caps::NONE
  }

  #[cfg(not(miri))]
  {
    cached()
  }
}

#[cfg(all(feature = "std", not(miri)))]
fn cached() -> Caps {
  static CACHE: std::sync::OnceLock<Caps> = std::sync::OnceLock::new();
  *CACHE.get_or_init(detect)
}

#[cfg(all(not(feature = "std"), not(miri)))]
fn cached() -> Caps {
  // no_std cache: one atomic word, with bit 63 reserved as the "filled"
  // marker. Detection is idempotent, so a benign race where two threads
  // both detect and store is harmless.
  const FILLED: u64 = 1u64 << 63;
  static CACHE: AtomicU64 = AtomicU64::new(0);

  let cached = CACHE.load(Ordering::Acquire);
  if cached & FILLED != 0 {
    return Caps(cached & !FILLED);
  }
  let detected = detect();
  CACHE.store(detected.0 | FILLED, Ordering::Release);
  detected
}

/// Detect capabilities: compile-time baseline plus runtime CPUID.
#[cfg(not(miri))]
fn detect() -> Caps {
  #[allow(unused_mut)]
  let mut caps = caps_static();

  #[cfg(all(target_arch = "x86_64", feature = "std"))]
  {
    caps |= cpuid_x86_64();
  }

  #[cfg(all(target_arch = "x86", feature = "std"))]
  {
    caps |= cpuid_x86_32();
  }

  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// Compile-Time Static Detection
// ─────────────────────────────────────────────────────────────────────────────

/// Returns CPU capabilities known at compile time.
///
/// Detects features enabled via `-C target-feature=...` or
/// `-C target-cpu=native`. Returns a `const` value, so the compiler
/// eliminates all runtime checks. For generic binaries that must run on
/// multiple CPUs, use [`caps()`](crate::caps()) instead.
#[inline(always)]
#[must_use]
pub const fn caps_static() -> Caps {
  #[allow(unused_macros)]
  macro_rules! detect {
    ($caps:ident; $($feature:literal => $cap:expr),+ $(,)?) => {
      $(if cfg!(target_feature = $feature) { $caps = $caps.union($cap); })+
    };
  }

  #[allow(unused_mut)]
  let mut result = Caps::NONE;

  #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
  {
    use crate::caps::x86;

    detect!(result;
      "sse2" => x86::SSE2,
      "ssse3" => x86::SSSE3,
      "sse4.1" => x86::SSE41,
      "sse4.2" => x86::SSE42,
      "aes" => x86::AESNI,
      "avx" => x86::AVX,
      "avx2" => x86::AVX2,
      "pclmulqdq" => x86::PCLMULQDQ,
      "popcnt" => x86::POPCNT,
    );
  }

  result
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime x86 Detection
// ─────────────────────────────────────────────────────────────────────────────

/// Runtime x86_64 feature detection using CPUID.
///
/// **Critical**: AVX-class features are gated on OSXSAVE plus XGETBV(XCR0)
/// to verify the OS saves and restores YMM state. CPUID reports what the
/// CPU supports, not what the OS allows; without this check an AVX kernel
/// could SIGILL.
#[cfg(all(target_arch = "x86_64", feature = "std", not(miri)))]
#[allow(unsafe_code)]
fn cpuid_x86_64() -> Caps {
  use core::arch::x86_64::{__cpuid, __cpuid_count, _xgetbv};

  use crate::caps::x86;

  // XCR0 bits 1-2: XMM (SSE) + YMM (AVX) state.
  const XCR0_AVX_MASK: u64 = 0x6;

  let mut caps = Caps::NONE;

  // CPUID leaf 1: processor info and feature bits.
  let cpuid1 = __cpuid(1);

  // OSXSAVE (bit 27): OS has set CR4.OSXSAVE and supports XSAVE/XGETBV.
  let osxsave = cpuid1.ecx & (1 << 27) != 0;
  let xcr0 = if osxsave {
    // SAFETY: XGETBV is valid when OSXSAVE is set (checked above).
    unsafe { _xgetbv(0) }
  } else {
    0
  };
  let os_avx = (xcr0 & XCR0_AVX_MASK) == XCR0_AVX_MASK;

  // ECX features (leaf 1), no OS gating needed.
  if cpuid1.ecx & (1 << 1) != 0 {
    caps |= x86::PCLMULQDQ;
  }
  if cpuid1.ecx & (1 << 9) != 0 {
    caps |= x86::SSSE3;
  }
  if cpuid1.ecx & (1 << 19) != 0 {
    caps |= x86::SSE41;
  }
  if cpuid1.ecx & (1 << 20) != 0 {
    caps |= x86::SSE42;
  }
  if cpuid1.ecx & (1 << 23) != 0 {
    caps |= x86::POPCNT;
  }
  if cpuid1.ecx & (1 << 25) != 0 {
    caps |= x86::AESNI;
  }

  // EDX features (leaf 1). SSE2 is architectural on x86_64 but reported
  // anyway so the bitset is self-consistent.
  if cpuid1.edx & (1 << 26) != 0 {
    caps |= x86::SSE2;
  }

  // AVX-class features require OS support for YMM state.
  if os_avx {
    if cpuid1.ecx & (1 << 28) != 0 {
      caps |= x86::AVX;
    }
    let cpuid7 = __cpuid_count(7, 0);
    if cpuid7.ebx & (1 << 5) != 0 {
      caps |= x86::AVX2;
    }
  }

  caps
}

/// Runtime x86 (32-bit) feature detection using CPUID.
#[cfg(all(target_arch = "x86", feature = "std", not(miri)))]
#[allow(unsafe_code)]
fn cpuid_x86_32() -> Caps {
  use core::arch::x86::{__cpuid, _xgetbv};

  use crate::caps::x86;

  const XCR0_AVX_MASK: u64 = 0x6;

  let mut caps = Caps::NONE;

  // SSE2 is not guaranteed on 32-bit x86; ask the standard library first,
  // which also confirms CPUID itself is usable.
  if !std::arch::is_x86_feature_detected!("sse2") {
    return caps;
  }
  caps |= x86::SSE2;

  // SAFETY: CPUID exists on every CPU that reports SSE2.
  let cpuid1 = unsafe { __cpuid(1) };

  let osxsave = cpuid1.ecx & (1 << 27) != 0;
  let xcr0 = if osxsave {
    // SAFETY: XGETBV is valid when OSXSAVE is set (checked above).
    unsafe { _xgetbv(0) }
  } else {
    0
  };
  let os_avx = (xcr0 & XCR0_AVX_MASK) == XCR0_AVX_MASK;

  if cpuid1.ecx & (1 << 1) != 0 {
    caps |= x86::PCLMULQDQ;
  }
  if cpuid1.ecx & (1 << 9) != 0 {
    caps |= x86::SSSE3;
  }
  if cpuid1.ecx & (1 << 19) != 0 {
    caps |= x86::SSE41;
  }
  if cpuid1.ecx & (1 << 20) != 0 {
    caps |= x86::SSE42;
  }
  if cpuid1.ecx & (1 << 23) != 0 {
    caps |= x86::POPCNT;
  }
  if cpuid1.ecx & (1 << 25) != 0 {
    caps |= x86::AESNI;
  }
  if os_avx && cpuid1.ecx & (1 << 28) != 0 {
    caps |= x86::AVX;
  }

  caps
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn detection_is_idempotent() {
    let a = caps();
    let b = caps();
    assert_eq!(a, b);
  }

  #[test]
  fn static_caps_subset_of_detected() {
    // Everything the compiler assumed must actually be present.
    assert!(caps().has(caps_static()));
  }

  #[cfg(all(target_arch = "x86_64", feature = "std", not(miri)))]
  #[test]
  fn x86_64_reports_sse2() {
    assert!(caps().has(crate::caps::x86::SSE2));
  }

  // The override path mutates process-global state, so it is tested in its
  // own integration binary (tests/override.rs) rather than here.
}
