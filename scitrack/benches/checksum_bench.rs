use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fs;
use std::hint::black_box;
use std::time::Duration;

use scitrack::{file_hexdigest, text_hexdigest, DeferredLogger};

fn configure_criterion() -> Criterion {
  Criterion::default()
    .sample_size(30)
    .measurement_time(Duration::from_secs(5))
    .warm_up_time(Duration::from_secs(2))
}

fn fasta(len: usize) -> String {
  let mut out = String::with_capacity(len + len / 60 + 16);
  out.push_str(">bench sequence\n");
  let bases = b"ACGT";
  for i in 0..len {
    out.push(bases[i % 4] as char);
    if i % 60 == 59 {
      out.push('\n');
    }
  }
  out
}

// ============================================================================
// Checksums
// ============================================================================

fn bench_file_hexdigest(c: &mut Criterion) {
  let dir = tempfile::tempdir().unwrap();
  let mut group = c.benchmark_group("file_hexdigest");

  for size in [1_024usize, 64 * 1_024, 1_024 * 1_024] {
    let path = dir.path().join(format!("seq-{}.fasta", size));
    fs::write(&path, fasta(size)).unwrap();

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_with_input(BenchmarkId::from_parameter(size), &path, |b, path| {
      b.iter(|| black_box(file_hexdigest(path).unwrap()))
    });
  }
  group.finish();
}

fn bench_text_hexdigest(c: &mut Criterion) {
  let mut group = c.benchmark_group("text_hexdigest");

  for size in [1_024usize, 64 * 1_024] {
    let text = fasta(size);
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
      b.iter(|| black_box(text_hexdigest(text)))
    });
  }
  group.finish();
}

// ============================================================================
// Logger
// ============================================================================

fn bench_buffered_messages(c: &mut Criterion) {
  c.bench_function("log_message_buffered_1000", |b| {
    b.iter(|| {
      let mut logger = DeferredLogger::new();
      for i in 0..1_000 {
        logger.log_message(i, Some("step")).unwrap();
      }
      black_box(logger.pending())
    })
  });
}

criterion_group! {
  name = benches;
  config = configure_criterion();
  targets =
    bench_file_hexdigest,
    bench_text_hexdigest,
    bench_buffered_messages,
}

criterion_main!(benches);
