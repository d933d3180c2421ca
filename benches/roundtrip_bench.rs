use criterion::{criterion_group, criterion_main, Criterion};

use treble::prelude::*;

#[derive(Clone, PartialEq, Debug)]
struct Reading {
    sensor: String,
    value: f64,
    samples: Vec<i32>,
}

impl Reading {
    fn new(sensor: String, value: f64, samples: Vec<i32>) -> Self {
        Self {
            sensor,
            value,
            samples,
        }
    }
}

fn reading_codec() -> impl Codec<Value = Reading> {
    CodecBuilder::group3(
        STRING.not_empty().configure("sensor", |r: &Reading| &r.sensor),
        DOUBLE.configure("value", |r: &Reading| &r.value),
        INTEGER.list().configure("samples", |r: &Reading| &r.samples),
    )
    .create(Reading::new)
}

fn sample_reading() -> Reading {
    Reading::new("thermocouple-7".to_owned(), 21.5, (0..64).collect())
}

fn encode_bench(c: &mut Criterion) {
    let p = PlainProvider;
    let codec = reading_codec();
    let value = sample_reading();
    c.bench_function("grouped_encode", |b| {
        b.iter(|| codec.encode_start(&p, p.empty(), &value).unwrap())
    });
}

fn decode_bench(c: &mut Criterion) {
    let p = PlainProvider;
    let codec = reading_codec();
    let element = codec
        .encode_start(&p, p.empty(), &sample_reading())
        .unwrap();
    c.bench_function("grouped_decode", |b| {
        b.iter(|| codec.decode_start(&p, &element).unwrap())
    });
}

fn list_bench(c: &mut Criterion) {
    let p = PlainProvider;
    let codec = INTEGER.list();
    let value: Vec<i32> = (0..1024).collect();
    c.bench_function("integer_list_roundtrip", |b| {
        b.iter(|| {
            let element = codec.encode_start(&p, p.empty(), &value).unwrap();
            codec.decode_start(&p, &element).unwrap()
        })
    });
}

criterion_group!(benches, encode_bench, decode_bench, list_bench);
criterion_main!(benches);
