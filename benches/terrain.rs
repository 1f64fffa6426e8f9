use criterion::{black_box, criterion_group, criterion_main, Criterion};
use heightbands::terrain::{classify_grid, ShorelineCleanup};
use heightbands::{MapSeed, SeedOffset, TerrainGenerator, ThresholdTable};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("Map Generation");
    let generator = TerrainGenerator::default();
    let table = ThresholdTable::default();

    for &size in &[64, 128, 256] {
        group.bench_function(format!("generate_{}", size), |b| {
            b.iter(|| {
                black_box(
                    generator
                        .generate_seeded(size, size, MapSeed(42), &table)
                        .unwrap(),
                );
            });
        });
    }

    group.finish();
}

fn bench_cleanup(c: &mut Criterion) {
    let mut group = c.benchmark_group("Shoreline Cleanup");
    let generator = TerrainGenerator::default();
    let table = ThresholdTable::default();
    let cleanup = ShorelineCleanup::default();

    for &size in &[64, 128, 256] {
        group.bench_function(format!("cleanup_{}", size), |b| {
            let offset = SeedOffset::from_seed(MapSeed(42), 1024);
            let field = generator.sample_field(size, size, offset).unwrap();
            let raw = classify_grid(&field, &table);
            b.iter(|| {
                let mut bands = raw.clone();
                black_box(cleanup.run(&mut bands));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_cleanup);
criterion_main!(benches);
