//! Benchmarks for TextTiling segmentation.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tiles::{TextTiler, TilingConfig};

/// Build paragraph-structured text of roughly `size` bytes, rotating
/// through several topics so the cohesion curve has real valleys.
fn sample_text(size: usize) -> String {
    let topics = [
        "The chef simmered the fragrant broth and folded herbs into the sauce. \
         Kneading dough builds the gluten that makes bread chewy. ",
        "Distant galaxies recede as spacetime itself expands between them. \
         Neutron stars compress stellar matter into city-sized spheres. ",
        "Midfielders press high to win the ball back in the final third. \
         A disciplined back line compresses the space between defenders. ",
        "Interest rates ripple through mortgage markets within weeks. \
         Central banks balance inflation targets against employment. ",
    ];

    let mut text = String::with_capacity(size + 256);
    let mut topic = 0;
    while text.len() < size {
        // One paragraph per topic, repeated enough to pass the minimum
        // paragraph length.
        for _ in 0..4 {
            text.push_str(topics[topic % topics.len()]);
        }
        text.push_str("\n\n");
        topic += 1;
    }
    text
}

fn bench_tile(c: &mut Criterion) {
    let mut group = c.benchmark_group("texttiling");

    for size in [1_000, 10_000, 100_000] {
        let text = sample_text(size);
        let tiler = TextTiler::new(TilingConfig::default());

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("tile", size), &text, |b, text| {
            b.iter(|| tiler.tile_or_single(black_box(text)));
        });
    }

    group.finish();
}

fn bench_small_pseudosentences(c: &mut Criterion) {
    let mut group = c.benchmark_group("texttiling_fine");

    let text = sample_text(10_000);
    let tiler = TextTiler::new(TilingConfig::new(10, 6));

    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_with_input(BenchmarkId::new("tile", "w10_k6"), &text, |b, text| {
        b.iter(|| tiler.tile_or_single(black_box(text)));
    });

    group.finish();
}

criterion_group!(benches, bench_tile, bench_small_pseudosentences);
criterion_main!(benches);
