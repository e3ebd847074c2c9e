use criterion::{Criterion, criterion_group, criterion_main};
use js_hostarray::{ArrayIndexOf, HostArray, Value};
use std::hint::black_box;

fn bench_index_of(c: &mut Criterion) {
    let values: Vec<i32> = (0..10_000).collect();
    let index_of = ArrayIndexOf::new(HostArray::of_ints(&values));

    c.bench_function("index_of_hit_last", |b| {
        b.iter(|| index_of.call(black_box(&[Value::Number(9_999.0)])).unwrap())
    });

    c.bench_function("index_of_miss", |b| {
        b.iter(|| index_of.call(black_box(&[Value::Number(-5.0)])).unwrap())
    });
}

criterion_group!(benches, bench_index_of);
criterion_main!(benches);
