//! Runtime kernel selection.
//!
//! Resolution happens once per process: the candidate ladder is walked from
//! the highest tier down and the first candidate whose full capability set
//! is satisfied wins, with the portable kernel as the terminal fallback.
//! The resolved function table is cached in a [`OnceCache`], so concurrent
//! first use performs exactly one resolution and every later call is a
//! single indirect call.

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
use backend::KernelTier;
use backend::{
  OnceCache,
  dispatch::{Candidate, select},
};
use platform::Caps;

use crate::kernels::{self, KernelId};

/// The resolved kernel set: one entry per public operation.
#[derive(Clone, Copy)]
struct ActiveKernels {
  name: &'static str,
  hash32: kernels::Hash32Fn,
  hash32_seed: kernels::Hash32SeedFn,
  hash64: kernels::Hash64Fn,
  hash64_seeds: kernels::Hash64SeedsFn,
  hash128: kernels::Hash128Fn,
  hash128_seed: kernels::Hash128SeedFn,
}

static ACTIVE: OnceCache<ActiveKernels> = OnceCache::new();

/// Candidates, best tier first, portable fallback last.
///
/// Requirements are the tiers' full capability sets; a CPU with a gap in
/// the ladder (AES-NI masked, say) lands on the highest tier it can run.
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
const CANDIDATES: &[Candidate<KernelId>] = &[
  Candidate::new("avx", KernelTier::Avx.required_caps(), KernelId::Avx),
  Candidate::new("aesni", KernelTier::Aesni.required_caps(), KernelId::Aesni),
  Candidate::new("sse42", KernelTier::Sse42.required_caps(), KernelId::Sse42),
  Candidate::new("sse41", KernelTier::Sse41.required_caps(), KernelId::Sse41),
  Candidate::new("ssse3", KernelTier::Ssse3.required_caps(), KernelId::Ssse3),
  Candidate::new("portable", Caps::NONE, KernelId::Portable),
];

/// Candidates, best tier first, portable fallback last.
#[cfg(not(any(target_arch = "x86_64", target_arch = "x86")))]
const CANDIDATES: &[Candidate<KernelId>] = &[Candidate::new(
  "portable",
  Caps::NONE,
  KernelId::Portable,
)];

/// Resolve the kernel id for a capability set. Pure and deterministic.
#[must_use]
pub fn resolve(caps: Caps) -> KernelId {
  select(caps, CANDIDATES).value
}

fn table_for(id: KernelId) -> ActiveKernels {
  ActiveKernels {
    name: id.as_str(),
    hash32: kernels::hash32_fn(id),
    hash32_seed: kernels::hash32_seed_fn(id),
    hash64: kernels::hash64_fn(id),
    hash64_seeds: kernels::hash64_seeds_fn(id),
    hash128: kernels::hash128_fn(id),
    hash128_seed: kernels::hash128_seed_fn(id),
  }
}

/// `FARMHASH_FORCE_KERNEL=<name>` pins resolution to a named kernel, but
/// only when the running CPU actually supports it; anything else falls
/// through to normal detection.
#[cfg(feature = "std")]
fn forced_kernel(caps: Caps) -> Option<KernelId> {
  let name = std::env::var("FARMHASH_FORCE_KERNEL").ok()?;
  let id = kernels::id_from_name(name.trim())?;
  caps.has(kernels::required_caps(id)).then_some(id)
}

#[inline]
fn active() -> ActiveKernels {
  ACTIVE.get_or_init(|| {
    let caps = platform::caps();

    #[cfg(feature = "std")]
    if let Some(id) = forced_kernel(caps) {
      return table_for(id);
    }

    table_for(resolve(caps))
  })
}

/// Name of the kernel the dispatcher resolved to (e.g. `"avx"`).
#[inline]
#[must_use]
pub fn kernel_name() -> &'static str {
  active().name
}

#[inline]
#[must_use]
pub(crate) fn hash32(data: &[u8]) -> u32 {
  (active().hash32)(data)
}

#[inline]
#[must_use]
pub(crate) fn hash32_with_seed(data: &[u8], seed: u32) -> u32 {
  (active().hash32_seed)(data, seed)
}

#[inline]
#[must_use]
pub(crate) fn hash64(data: &[u8]) -> u64 {
  (active().hash64)(data)
}

#[inline]
#[must_use]
pub(crate) fn hash64_with_seeds(data: &[u8], seed0: u64, seed1: u64) -> u64 {
  (active().hash64_seeds)(data, seed0, seed1)
}

#[inline]
#[must_use]
pub(crate) fn hash128(data: &[u8]) -> (u64, u64) {
  (active().hash128)(data)
}

#[inline]
#[must_use]
pub(crate) fn hash128_with_seed(data: &[u8], seed: (u64, u64)) -> (u64, u64) {
  (active().hash128_seed)(data, seed.0, seed.1)
}
