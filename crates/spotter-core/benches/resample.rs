use criterion::{black_box, criterion_group, criterion_main, Criterion};

use spotter_core::{ArrayImage, Rgb};

fn camera_frame(width: usize, height: usize) -> ArrayImage {
    ArrayImage::from_fn(width, height, |x, y| {
        Rgb::new(
            x as f64 / width as f64,
            y as f64 / height as f64,
            ((x ^ y) & 0xff) as f64 / 255.0,
        )
    })
}

fn bench_resample(c: &mut Criterion) {
    let source = camera_frame(640, 480);
    let window = source.bounds().smallest_containing_box(1.0);
    let mut dest = ArrayImage::new(416, 416);

    c.bench_function("resample_640x480_to_416x416", |b| {
        b.iter(|| {
            dest.write_from_window(black_box(&source), black_box(window));
        })
    });

    let mut thumb = ArrayImage::new(64, 64);
    c.bench_function("resample_640x480_to_64x64", |b| {
        b.iter(|| {
            thumb.write_from_window(black_box(&source), black_box(window));
        })
    });
}

criterion_group!(benches, bench_resample);
criterion_main!(benches);
