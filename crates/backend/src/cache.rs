//! Lazy caching for resolved kernel tables.
//!
//! [`OnceCache`] holds a small `Copy` value initialized at most once, with
//! the same semantics as `std::sync::OnceLock` but usable from `no_std`
//! targets.
//!
//! # Caching Strategy
//!
//! - **std**: `OnceLock` for thread-safe lazy initialization
//! - **no_std with atomics**: atomic state machine with spin publication
//! - **no_std without atomics**: per-call computation (single-threaded
//!   targets only)

#[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
use core::cell::UnsafeCell;
#[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
use core::mem::MaybeUninit;

/// A cache for a resolved kernel table (or any small `Copy` value).
///
/// Guarantees at-most-one initialization on targets with atomics: despite
/// concurrent first use from multiple threads, exactly one initializer runs
/// and its result is visible to all subsequent readers.
pub struct OnceCache<T: Copy> {
  #[cfg(feature = "std")]
  inner: std::sync::OnceLock<T>,

  #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
  state: core::sync::atomic::AtomicU8,
  #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
  value: UnsafeCell<MaybeUninit<T>>,

  #[cfg(all(not(feature = "std"), not(target_has_atomic = "ptr")))]
  _marker: core::marker::PhantomData<T>,
}

// SAFETY: sharing is sound because:
// - std: OnceLock handles synchronization
// - no_std with atomics: the state machine publishes the value with
//   release/acquire ordering before any reader dereferences it
// - no_std without atomics: the target is single-threaded
#[allow(unsafe_code)]
unsafe impl<T: Copy + Send + Sync> Send for OnceCache<T> {}
#[allow(unsafe_code)]
unsafe impl<T: Copy + Send + Sync> Sync for OnceCache<T> {}

impl<T: Copy> OnceCache<T> {
  #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
  const UNINIT: u8 = 0;
  #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
  const INITING: u8 = 1;
  #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
  const READY: u8 = 2;

  /// Create a new empty cache.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      #[cfg(feature = "std")]
      inner: std::sync::OnceLock::new(),

      #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
      state: core::sync::atomic::AtomicU8::new(Self::UNINIT),
      #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
      value: UnsafeCell::new(MaybeUninit::uninit()),

      #[cfg(all(not(feature = "std"), not(target_has_atomic = "ptr")))]
      _marker: core::marker::PhantomData,
    }
  }

  /// Get the cached value, initializing with `f` if not yet set.
  ///
  /// On targets with atomics the initializer runs at most once; on targets
  /// without atomics it runs on every call (single-threaded embedded, where
  /// that is the only option).
  #[inline]
  pub fn get_or_init(&self, f: impl FnOnce() -> T) -> T {
    #[cfg(feature = "std")]
    {
      *self.inner.get_or_init(f)
    }

    #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
    {
      use core::sync::atomic::Ordering;

      let state = self.state.load(Ordering::Acquire);
      if state == Self::READY {
        // SAFETY: the value is initialized once state is READY.
        #[allow(unsafe_code)]
        return unsafe { (*self.value.get()).assume_init() };
      }

      if state == Self::UNINIT
        && self
          .state
          .compare_exchange(Self::UNINIT, Self::INITING, Ordering::AcqRel, Ordering::Acquire)
          .is_ok()
      {
        let value = f();
        // SAFETY: we hold exclusive access during the INITING state.
        #[allow(unsafe_code)]
        unsafe {
          (*self.value.get()).write(value);
        }
        self.state.store(Self::READY, Ordering::Release);
        return value;
      }

      // Another thread is initializing; wait for publication.
      while self.state.load(Ordering::Acquire) != Self::READY {
        core::hint::spin_loop();
      }
      // SAFETY: the value is initialized once state is READY.
      #[allow(unsafe_code)]
      unsafe {
        (*self.value.get()).assume_init()
      }
    }

    #[cfg(all(not(feature = "std"), not(target_has_atomic = "ptr")))]
    {
      f()
    }
  }
}

impl<T: Copy> Default for OnceCache<T> {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn caches_first_value() {
    static CACHE: OnceCache<u64> = OnceCache::new();

    let first = CACHE.get_or_init(|| 42);
    assert_eq!(first, 42);

    // Second initializer must not replace the cached value.
    let second = CACHE.get_or_init(|| 99);
    assert_eq!(second, 42);
  }

  #[cfg(feature = "std")]
  #[test]
  fn initializes_exactly_once_under_contention() {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::vec::Vec;

    static CACHE: OnceCache<u32> = OnceCache::new();
    static CALLS: AtomicU32 = AtomicU32::new(0);

    let handles: Vec<_> = (0..8)
      .map(|_| {
        std::thread::spawn(|| {
          CACHE.get_or_init(|| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            7
          })
        })
      })
      .collect();

    for h in handles {
      assert_eq!(h.join().unwrap(), 7);
    }
    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
  }
}
