//! Kernel dispatch: candidate lists and selection.
//!
//! - [`Candidate`]: a kernel (or kernel id) with capability requirements
//! - [`Selected`]: the result of selection
//! - [`select`]: choose the best candidate for the detected capabilities
//!
//! Candidates are ordered best first. Selection returns the first candidate
//! whose **entire** requirement set is satisfied — requirements are explicit
//! flag sets, so an exotic CPU (say, AES-NI reported without AVX) simply
//! lands on the highest tier it can actually run. The final candidate must
//! be a portable fallback with `Caps::NONE`, making selection total: there
//! is no "unsupported CPU" outcome.
//!
//! ```ignore
//! use backend::dispatch::{Candidate, select};
//! use platform::{Caps, caps::x86};
//!
//! let selected = select(platform::caps(), &[
//!   Candidate::new("sse41", x86::SSE2 | x86::SSSE3 | x86::SSE41, sse41_kernel),
//!   Candidate::new("portable", Caps::NONE, portable_kernel),
//! ]);
//! ```

use platform::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Core Types
// ─────────────────────────────────────────────────────────────────────────────

/// A candidate kernel with capability requirements.
///
/// The payload is generic: function pointers and kernel ids both work.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<F> {
  /// Human-readable name for diagnostics (e.g., "sse42").
  pub name: &'static str,
  /// Required CPU capabilities. Must be a subset of detected caps.
  pub requires: Caps,
  /// The candidate payload.
  pub value: F,
}

impl<F> Candidate<F> {
  /// Create a new candidate.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, requires: Caps, value: F) -> Self {
    Self { name, requires, value }
  }
}

/// The result of kernel selection.
#[derive(Clone, Copy, Debug)]
pub struct Selected<F> {
  /// Human-readable name of the selected candidate.
  pub name: &'static str,
  /// The selected payload.
  pub value: F,
}

impl<F> Selected<F> {
  /// Create a new selected result.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, value: F) -> Self {
    Self { name, value }
  }
}

/// Select the best candidate from an ordered list.
///
/// Returns the first candidate whose `requires` is satisfied by `caps`.
/// Selection is deterministic for fixed `caps`.
///
/// # Panics
///
/// Panics if `candidates` is empty or no candidate matches. A well-formed
/// list ends with a portable fallback (`requires = Caps::NONE`), which
/// always matches.
#[inline]
#[must_use]
pub fn select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Selected<F> {
  for candidate in candidates {
    if caps.has(candidate.requires) {
      return Selected::new(candidate.name, candidate.value);
    }
  }

  panic!("no matching kernel; candidate list must end with a portable fallback");
}

#[cfg(test)]
mod tests {
  use platform::caps::x86;

  use super::*;

  type HashFn = fn(&[u8]) -> u64;

  fn portable_hash(_data: &[u8]) -> u64 {
    1
  }

  fn fast_hash(_data: &[u8]) -> u64 {
    2
  }

  #[test]
  fn candidate_creation() {
    let c: Candidate<HashFn> = Candidate::new("test", Caps::NONE, portable_hash);
    assert_eq!(c.name, "test");
    assert!(c.requires.is_empty());
  }

  #[test]
  fn empty_caps_fall_back_to_portable() {
    let candidates: &[Candidate<HashFn>] = &[
      Candidate::new("fast", x86::SSE2 | x86::SSSE3, fast_hash),
      Candidate::new("portable", Caps::NONE, portable_hash),
    ];

    let selected = select(Caps::NONE, candidates);
    assert_eq!(selected.name, "portable");
    assert_eq!((selected.value)(&[]), 1);
  }

  #[test]
  fn full_requirements_select_best() {
    let candidates: &[Candidate<HashFn>] = &[
      Candidate::new("fast", x86::SSE2 | x86::SSSE3, fast_hash),
      Candidate::new("portable", Caps::NONE, portable_hash),
    ];

    let selected = select(x86::SSE2 | x86::SSSE3 | x86::SSE41, candidates);
    assert_eq!(selected.name, "fast");
    assert_eq!((selected.value)(&[]), 2);
  }

  #[test]
  fn partial_requirements_are_skipped() {
    // SSSE3 alone is not enough for a candidate that also needs SSE4.1.
    let candidates: &[Candidate<HashFn>] = &[
      Candidate::new("sse41", x86::SSSE3 | x86::SSE41, fast_hash),
      Candidate::new("ssse3", x86::SSSE3, fast_hash),
      Candidate::new("portable", Caps::NONE, portable_hash),
    ];

    let selected = select(x86::SSSE3, candidates);
    assert_eq!(selected.name, "ssse3");
  }

  #[test]
  #[should_panic(expected = "portable fallback")]
  fn missing_fallback_panics() {
    let candidates: &[Candidate<HashFn>] = &[Candidate::new("fast", x86::AVX, fast_hash)];
    let _ = select(Caps::NONE, candidates);
  }
}
