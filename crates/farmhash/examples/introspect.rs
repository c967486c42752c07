//! Kernel introspection: verify which kernel tier is active.
//!
//! Run with: `cargo run --example introspect -p farmhash`

use farmhash::kernels::{ALL, required_caps};

fn main() {
  println!("=== FarmHash Kernel Introspection ===\n");

  let caps = platform::caps();
  println!("Detected capabilities: {caps:?}\n");

  println!("Kernel tiers compiled into this binary:");
  for &id in ALL {
    let runnable = caps.has(required_caps(id));
    let mark = if runnable { "yes" } else { " no" };
    println!("  {:>8}  runnable: {mark}", id.as_str());
  }
  println!();

  println!("Dispatcher resolved to: {}", farmhash::kernel_name());
  println!();

  // The selection is per-process; every call goes through the same tier.
  let data = b"introspection sample";
  println!("hash32  = {:#010x}", farmhash::hash32(data));
  println!("hash64  = {:#018x}", farmhash::hash64(data));
  println!("hash128 = {:#034x}", farmhash::hash128(data));
}
