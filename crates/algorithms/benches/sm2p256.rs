//! Benchmarks for the SM2 primitive layer
//!
//! Measures the hot paths: field multiplication on the Solinas reduction,
//! scalar-point multiplication, and SM3 throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use guomi_algorithms::ec::sm2p256::{self, FieldElement, Scalar};
use guomi_algorithms::hash::HashFunction;
use guomi_algorithms::Sm3;
use rand::rngs::OsRng;

fn bench_field_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("sm2p256_field");

    let a = FieldElement::from_hex("32C4AE2C1F1981195F9904466A39C9948FE30BBFF2660BE1715A4589334C74C7")
        .expect("valid field element");
    let b = FieldElement::from_hex("BC3736A2F4F6779C59BDCEE36B692153D0A9877CC62A474002DF32E52139F0A0")
        .expect("valid field element");

    group.bench_function("mul", |bench| {
        bench.iter(|| black_box(a.mul(black_box(&b))));
    });
    group.bench_function("square", |bench| {
        bench.iter(|| black_box(a.square()));
    });
    group.bench_function("invert", |bench| {
        bench.iter(|| black_box(a.invert().expect("non-zero element")));
    });

    group.finish();
}

fn bench_point_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("sm2p256_point");
    group.sample_size(20);

    let mut rng = OsRng;
    let scalar = Scalar::random(&mut rng);
    let g = sm2p256::base_point_g();
    let q = sm2p256::scalar_mult_base_g(&Scalar::random(&mut rng));

    group.bench_function("mul_base", |bench| {
        bench.iter(|| black_box(g.mul(scalar.as_bigint())));
    });
    group.bench_function("mul_arbitrary", |bench| {
        bench.iter(|| black_box(q.mul(scalar.as_bigint())));
    });

    group.finish();
}

fn bench_sm3(c: &mut Criterion) {
    let mut group = c.benchmark_group("sm3");

    for size in [64usize, 1024, 16 * 1024] {
        let data = vec![0xA5u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("digest_{}", size), |bench| {
            bench.iter(|| {
                let mut hasher = <Sm3 as HashFunction>::new();
                hasher.update(black_box(&data)).expect("update");
                black_box(hasher.finalize().expect("finalize"))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_field_mul, bench_point_mul, bench_sm3);
criterion_main!(benches);
