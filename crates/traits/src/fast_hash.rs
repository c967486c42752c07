//! Fast non-cryptographic hash traits (**NOT CRYPTO**).

use core::fmt::Debug;

/// A fast non-cryptographic hash.
///
/// These hashes are suitable for hash tables, sharding, fingerprints, and
/// other non-adversarial settings. They are **not** suitable for signatures,
/// MACs, password hashing, or untrusted inputs where collision attacks
/// matter.
///
/// The trait is intentionally one-shot: the hash of a byte sequence is a
/// pure function of the bytes (and an optional seed). Streaming adapters are
/// exposed as concrete types by the algorithm crates.
///
/// `hash` and `hash_with_seed` are both required: in the FarmHash family the
/// unseeded form is a distinct function, not the zero-seeded one, so neither
/// can be derived from the other.
pub trait FastHash {
  /// Output size in bytes.
  const OUTPUT_SIZE: usize;

  /// Short algorithm name for diagnostics and benches.
  const NAME: &'static str;

  /// Hash output type.
  type Output: Copy + Eq + Debug + Default;

  /// Seed type.
  type Seed: Copy + Debug + Default;

  /// Compute the unseeded hash of `data`.
  #[must_use]
  fn hash(data: &[u8]) -> Self::Output;

  /// Compute the hash of `data` using `seed`.
  #[must_use]
  fn hash_with_seed(seed: Self::Seed, data: &[u8]) -> Self::Output;
}
