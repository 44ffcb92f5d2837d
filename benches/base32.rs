use criterion::{black_box, criterion_group, criterion_main, Criterion};

use wirecodec::encoding::base32;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("base32 encode hello", |b| {
        b.iter(|| base32::encode(black_box(b"hello")))
    });
    c.bench_function("base32 encode 1 KiB", |b| {
        let data = vec![0xa5; 1024];
        b.iter(|| base32::encode(black_box(&data)))
    });
    c.bench_function("base32 decode foobar", |b| {
        b.iter(|| base32::decode(black_box("MZXW6YTBOI======")))
    });
    c.bench_function("base32 decode 1 KiB", |b| {
        let encoded = base32::encode(&vec![0xa5; 1024]);
        b.iter(|| base32::decode(black_box(&encoded)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
