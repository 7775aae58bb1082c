use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trace_pack::packed;

fn bench_packed(c: &mut Criterion) {
    let mut values: Vec<i64> = (0..63).map(|s| (1i64 << s) - 1).collect();
    values.extend((0..64).map(|s| -1i64 << s));

    c.bench_function("packed_encode", |b| {
        let mut buf = Vec::with_capacity(values.len() * packed::MAX_WIDTH);
        b.iter(|| {
            buf.clear();
            let mut at = 0;
            for &v in &values {
                at = packed::encode_into(&mut buf, at, black_box(v));
            }
            at
        })
    });

    let mut buf = Vec::new();
    let mut at = 0;
    for &v in &values {
        at = packed::encode_into(&mut buf, at, v);
    }
    let encoded = &buf[..at];

    c.bench_function("packed_decode", |b| {
        b.iter(|| {
            let mut at = 0;
            let mut sum = 0i64;
            while at < encoded.len() {
                let (v, next) = packed::decode(black_box(encoded), at).unwrap();
                sum = sum.wrapping_add(v);
                at = next;
            }
            sum
        })
    });
}

criterion_group!(benches, bench_packed);
criterion_main!(benches);
