//! Benchmarks for sluice-core extraction.
//!
//! Covers the budgeted copier on its own and full extractions of in-memory
//! archives into temporary directories.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use sluice_core::ByteBudget;
use sluice_core::ExtractionRequest;
use sluice_core::Extractor;
use sluice_core::copy::CopyBuffer;
use sluice_core::copy::copy_budgeted;
use sluice_core::formats::TarEntries;
use sluice_core::formats::ZipEntries;
use sluice_core::test_utils::TarTestBuilder;
use sluice_core::test_utils::ZipTestBuilder;
use std::hint::black_box;
use std::io::Cursor;
use tempfile::TempDir;

fn many_small_files_zip(file_count: usize) -> Vec<u8> {
    (0..file_count)
        .fold(ZipTestBuilder::new(), |builder, i| {
            builder.add_file(&format!("file{i:04}.txt"), format!("content{i}").as_bytes())
        })
        .build()
}

fn nested_dirs_zip(depth: usize, files_per_dir: usize) -> Vec<u8> {
    let mut builder = ZipTestBuilder::new();
    let mut prefix = String::new();
    for _ in 0..depth {
        for i in 0..files_per_dir {
            builder = builder.add_file(&format!("{prefix}file{i}.txt"), b"content");
        }
        prefix.push_str("subdir/");
    }
    builder.build()
}

fn extract_zip(data: &[u8]) {
    let temp = TempDir::new().unwrap();
    let mut source = ZipEntries::new(Cursor::new(data)).unwrap();
    let request = ExtractionRequest::new("bench.zip", temp.path(), 0);
    Extractor::new().extract(&mut source, &request).unwrap();
}

fn benchmark_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_budgeted");

    for size_kb in [4, 64, 1024] {
        let data = vec![0xAB_u8; size_kb * 1024];
        group.throughput(Throughput::Bytes(data.len() as u64));

        group.bench_with_input(BenchmarkId::new("size_kb", size_kb), &data, |b, data| {
            let mut buffer = CopyBuffer::new();
            b.iter(|| {
                let outcome = copy_budgeted(
                    &data[..],
                    std::io::sink(),
                    ByteBudget::Remaining(u64::MAX),
                    &mut buffer,
                )
                .unwrap();
                black_box(outcome)
            });
        });
    }

    group.finish();
}

fn benchmark_many_small_files(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_small_files");

    for file_count in [100, 1000] {
        let zip_data = many_small_files_zip(file_count);
        group.throughput(Throughput::Elements(file_count as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(file_count),
            &zip_data,
            |b, data| b.iter(|| extract_zip(data)),
        );
    }

    group.finish();
}

fn benchmark_large_files(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_files");

    for size_mb in [1, 10] {
        let size_bytes = size_mb * 1024 * 1024;
        let payload = vec![0xAB_u8; size_bytes];
        group.throughput(Throughput::Bytes(size_bytes as u64));

        let stored = ZipTestBuilder::new().add_file("large.bin", &payload).build();
        group.bench_with_input(BenchmarkId::new("stored_mb", size_mb), &stored, |b, data| {
            b.iter(|| extract_zip(data));
        });

        let deflated = ZipTestBuilder::new()
            .add_deflated_file("large.bin", &payload)
            .build();
        group.bench_with_input(
            BenchmarkId::new("deflate_mb", size_mb),
            &deflated,
            |b, data| b.iter(|| extract_zip(data)),
        );
    }

    group.finish();
}

fn benchmark_nested_directories(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_directories");

    for depth in [5, 10, 20] {
        let zip_data = nested_dirs_zip(depth, 2);
        group.throughput(Throughput::Elements(depth as u64 * 2));

        group.bench_with_input(BenchmarkId::from_parameter(depth), &zip_data, |b, data| {
            b.iter(|| extract_zip(data));
        });
    }

    group.finish();
}

fn benchmark_tar(c: &mut Criterion) {
    let data = (0..500)
        .fold(TarTestBuilder::new(), |builder, i| {
            builder.add_file(&format!("dir{}/file{i}.txt", i % 10), &[0x11; 512])
        })
        .build();

    c.bench_function("tar_500_files", |b| {
        b.iter(|| {
            let temp = TempDir::new().unwrap();
            let mut archive = tar::Archive::new(Cursor::new(&data));
            let mut source = TarEntries::new(&mut archive).unwrap();
            let request = ExtractionRequest::new("bench.tar", temp.path(), 0);
            Extractor::new().extract(&mut source, &request).unwrap();
        });
    });
}

criterion_group!(
    benches,
    benchmark_copy,
    benchmark_many_small_files,
    benchmark_large_files,
    benchmark_nested_directories,
    benchmark_tar
);
criterion_main!(benches);
