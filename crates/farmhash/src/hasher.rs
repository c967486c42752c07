//! `core::hash::Hasher` adapter (**NOT CRYPTO**).
//!
//! Lets `HashMap` and friends key on FarmHash64. `Hasher::write` may be
//! called many times per key, and FarmHash is a one-shot function, so the
//! adapter buffers written bytes and hashes once in `finish`. That makes it
//! a good fit for keys and a poor fit for hashing large streams; use
//! [`crate::hash64`] directly for bulk data.

use core::hash::{BuildHasher, Hasher};

use std::vec::Vec;

/// Streaming adapter over [`crate::hash64`].
#[derive(Clone, Debug, Default)]
pub struct FarmHasher {
  buf: Vec<u8>,
}

impl FarmHasher {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }
}

impl Hasher for FarmHasher {
  #[inline]
  fn write(&mut self, bytes: &[u8]) {
    self.buf.extend_from_slice(bytes);
  }

  #[inline]
  fn finish(&self) -> u64 {
    crate::hash64(&self.buf)
  }
}

/// `BuildHasher` producing [`FarmHasher`]s.
///
/// Note that FarmHash is not keyed: this build-hasher provides no
/// HashDoS resistance. Use it where speed and value stability matter and
/// inputs are trusted.
#[derive(Clone, Copy, Debug, Default)]
pub struct FarmHashBuildHasher;

impl BuildHasher for FarmHashBuildHasher {
  type Hasher = FarmHasher;

  #[inline]
  fn build_hasher(&self) -> FarmHasher {
    FarmHasher::new()
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;
  use std::hash::{BuildHasher as _, Hasher as _};

  use super::*;

  #[test]
  fn chunked_writes_match_one_shot() {
    let data = b"the quick brown fox jumps over the lazy dog";

    let mut h = FarmHasher::new();
    h.write(&data[..7]);
    h.write(&data[7..30]);
    h.write(&data[30..]);
    assert_eq!(h.finish(), crate::hash64(data));

    let mut h2 = FarmHashBuildHasher.build_hasher();
    h2.write(data);
    assert_eq!(h2.finish(), crate::hash64(data));
  }

  #[test]
  fn works_as_a_map_hasher() {
    let mut map: HashMap<&str, u32, FarmHashBuildHasher> = HashMap::with_hasher(FarmHashBuildHasher);
    map.insert("a", 1);
    map.insert("b", 2);
    assert_eq!(map.get("a"), Some(&1));
    assert_eq!(map.get("b"), Some(&2));
  }
}
