//! Benchmarks for ILDA encode/decode and animation conversion.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use ilda_codec::{
    AnimationPoint, ConverterConfig, SectionConverter, decode_file, encode_file,
};

fn build_converter(frames: u16, points_per_frame: usize) -> SectionConverter {
    let mut converter = SectionConverter::new(ConverterConfig::default()).unwrap();
    for f in 0..frames {
        // Leave every fourth frame empty so hold frames are exercised.
        if f % 4 == 3 {
            continue;
        }
        let points = (0..points_per_frame)
            .map(|i| {
                let t = (i as f32 / points_per_frame as f32) * std::f32::consts::TAU + f as f32 * 0.05;
                AnimationPoint::new(
                    (t.cos() * 20000.0) as i16,
                    (t.sin() * 20000.0) as i16,
                    (65535.0, (i % 256) as f32 * 256.0, 0.0),
                )
            })
            .collect();
        converter.set_frame(f, points);
    }
    converter.set_frame(frames, Vec::new());
    converter
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for points in [64, 512, 4096] {
        let sections = build_converter(120, points).to_sections().unwrap();
        let bytes = encode_file(&sections).unwrap();

        group.bench_with_input(BenchmarkId::new("encode", points), &points, |b, _| {
            b.iter(|| encode_file(black_box(&sections)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("decode", points), &points, |b, _| {
            b.iter(|| decode_file(black_box(&bytes)));
        });
    }

    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let converter = build_converter(600, 256);
    c.bench_function("convert_600_frames", |b| {
        b.iter(|| black_box(&converter).to_sections().unwrap());
    });
}

criterion_group!(benches, bench_codec, bench_convert);
criterion_main!(benches);
