use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn inputs() -> Vec<(usize, Vec<u8>)> {
  // Sizes chosen to exercise every short-input path, the loop entry, and
  // large-buffer throughput.
  let sizes = [0usize, 4, 8, 16, 24, 32, 64, 65, 128, 256, 1024, 16 * 1024, 1024 * 1024];
  sizes
    .into_iter()
    .map(|len| {
      let mut v = vec![0u8; len];
      for (i, b) in v.iter_mut().enumerate() {
        *b = (i as u8).wrapping_mul(31).wrapping_add(7);
      }
      (len, v)
    })
    .collect()
}

fn oneshot(c: &mut Criterion) {
  let inputs = inputs();
  let mut group = c.benchmark_group(format!("farmhash/{}", farmhash::kernel_name()));

  for (len, data) in &inputs {
    group.throughput(Throughput::Bytes(*len as u64));

    group.bench_with_input(BenchmarkId::new("hash32", len), data, |b, d| {
      b.iter(|| black_box(farmhash::hash32(black_box(d))))
    });
    group.bench_with_input(BenchmarkId::new("hash64", len), data, |b, d| {
      b.iter(|| black_box(farmhash::hash64(black_box(d))))
    });
    group.bench_with_input(BenchmarkId::new("hash64_seeded", len), data, |b, d| {
      b.iter(|| black_box(farmhash::hash64_with_seed(black_box(d), 0x5eed)))
    });
    group.bench_with_input(BenchmarkId::new("hash128", len), data, |b, d| {
      b.iter(|| black_box(farmhash::hash128(black_box(d))))
    });
  }

  group.finish();
}

criterion_group!(benches, oneshot);
criterion_main!(benches);
