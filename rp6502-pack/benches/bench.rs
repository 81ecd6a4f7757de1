use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rp6502_pack::{
    encode::{pack_bitmap, pack_sprites, pack_sprites_to_vec, pack_tiles_to_vec},
    quantize::AdaptiveQuantizer,
    Rgb888,
};

fn strip(frame_size: u32, frame_count: u32) -> (u32, u32, Vec<Rgb888>) {
    let width = frame_size * frame_count;
    let pixels = (0..frame_size)
        .flat_map(|y| {
            (0..width).map(move |x| [(x * 3) as u8, (y * 5) as u8, ((x ^ y) * 7) as u8])
        })
        .collect();
    (width, frame_size, pixels)
}

fn frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame strips");

    for (frame_size, frame_count) in [(8, 16), (16, 16), (32, 8), (64, 4)] {
        let (width, height, pixels) = strip(frame_size, frame_count);
        let name = format!("{frame_count}x{frame_size}px");

        group.throughput(criterion::Throughput::Elements(pixels.len() as u64));
        group.bench_with_input(BenchmarkId::new("sprites_to_vec", &name), &pixels, |b, input| {
            let mut out = Vec::with_capacity(input.len() * 2);
            b.iter(|| {
                out.clear();
                pack_sprites_to_vec(width, height, input, &mut out)
            })
        });
        group.bench_with_input(BenchmarkId::new("sprites_std", &name), &pixels, |b, input| {
            let mut out = Vec::with_capacity(input.len() * 2);
            b.iter(|| {
                out.clear();
                pack_sprites(width, height, input, &mut out)
            })
        });
        group.bench_with_input(BenchmarkId::new("tiles_to_vec", &name), &pixels, |b, input| {
            let mut out = Vec::with_capacity(input.len() / 2);
            b.iter(|| {
                out.clear();
                pack_tiles_to_vec(width, height, input, &mut out)
            })
        });
    }
}

fn bitmap(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitmap");

    for size in [64, 160] {
        let (width, height, pixels) = strip(size, 2);
        group.throughput(criterion::Throughput::Elements(pixels.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("pack_bitmap", format!("{width}x{height}")),
            &pixels,
            |b, input| b.iter(|| pack_bitmap(width, height, input, &AdaptiveQuantizer::default())),
        );
    }
}

criterion_group!(benches, frames, bitmap);
criterion_main!(benches);
