use aptamux_core::catalog::Catalog;
use aptamux_core::config::AssayConfig;
use aptamux_core::types::Protein;
use aptamux_core::AssayAnalyzer;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

const RESIDUES: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

/// Deterministic synthetic catalog: each protein is a different stride
/// through the residue alphabet, so every sequence has a distinct motif set.
fn synthetic_catalog(num_proteins: usize, sequence_length: usize) -> Catalog {
    let proteins = (0..num_proteins)
        .map(|index| {
            let stride = index % (RESIDUES.len() - 1) + 1;
            let sequence: String = (0..sequence_length)
                .map(|position| RESIDUES[(position * stride + index) % RESIDUES.len()] as char)
                .collect();
            Protein {
                id: format!("SYN{:04}", index),
                sequence,
                abundance: 1.0 + index as f64 * 0.1,
            }
        })
        .collect();
    Catalog::new(proteins).unwrap()
}

fn bench_assay_run(c: &mut Criterion) {
    let catalog = synthetic_catalog(32, 40);

    let mut group = c.benchmark_group("assay_run");
    for num_spots in [50usize, 200, 500] {
        group.throughput(Throughput::Elements(num_spots as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_spots),
            &num_spots,
            |b, &num_spots| {
                let config = AssayConfig {
                    num_spots,
                    quiet: true,
                    ..Default::default()
                };
                let analyzer = AssayAnalyzer::new(config);
                b.iter(|| {
                    let results = analyzer.run(black_box(&catalog)).unwrap();
                    black_box(results.confusion.accuracy())
                });
            },
        );
    }
    group.finish();
}

fn bench_catalog_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_scale");
    for num_proteins in [8usize, 64, 256] {
        let catalog = synthetic_catalog(num_proteins, 40);
        group.throughput(Throughput::Elements(num_proteins as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_proteins),
            &catalog,
            |b, catalog| {
                let config = AssayConfig {
                    num_spots: 100,
                    quiet: true,
                    ..Default::default()
                };
                let analyzer = AssayAnalyzer::new(config);
                b.iter(|| {
                    let results = analyzer.run(black_box(catalog)).unwrap();
                    black_box(results.identifications.len())
                });
            },
        );
    }
    group.finish();
}

fn configure_criterion() -> Criterion {
    Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .warm_up_time(Duration::from_secs(2))
        .sample_size(20)
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = bench_assay_run, bench_catalog_scale
}
criterion_main!(benches);
