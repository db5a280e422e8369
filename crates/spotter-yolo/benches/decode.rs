use criterion::{black_box, criterion_group, criterion_main, Criterion};

use spotter_yolo::{Decoder, OutputTensor};

/// Deterministic tensor shaped like a tiny-YOLOv3 output: 2535 rows over
/// 80 classes, boxes scattered on a 416x416 canvas with a mix of
/// objectness scores around the default threshold.
fn synthetic_output(rows: usize, classes: usize) -> OutputTensor {
    let row_len = 5 + classes;
    let mut data = Vec::with_capacity(rows * row_len);
    let mut state = 0x2545f4914f6cdd1d_u64;
    let mut next = move || {
        // xorshift; plenty for spreading boxes around.
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 40) as f32 / 16777216.0
    };

    for _ in 0..rows {
        let x = next() * 400.0;
        let y = next() * 400.0;
        let w = 8.0 + next() * 120.0;
        let h = 8.0 + next() * 120.0;
        data.extend_from_slice(&[x, y, x + w, y + h, next()]);
        for _ in 0..classes {
            data.push(next());
        }
    }

    OutputTensor::from_shape(&[1, rows, row_len], data).unwrap()
}

fn bench_decode(c: &mut Criterion) {
    let tensor = synthetic_output(2535, 80);
    let decoder = Decoder::new(80);

    c.bench_function("decode_2535_rows_80_classes", |b| {
        b.iter(|| decoder.decode(black_box(&tensor)).unwrap())
    });

    let sparse = synthetic_output(507, 20);
    let sparse_decoder = Decoder::new(20);
    c.bench_function("decode_507_rows_20_classes", |b| {
        b.iter(|| sparse_decoder.decode(black_box(&sparse)).unwrap())
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
