use cencrypt::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

const KEY_SIZES: [(usize, &str); 3] = [(16, "AES-128"), (24, "AES-192"), (32, "AES-256")];
const DATA_SIZES: [usize; 4] = [16, 256, 1024, 16384];

fn bench_aes_ctr(c: &mut Criterion) {
    let mut group = c.benchmark_group("AES-CTR");

    for size in DATA_SIZES.iter() {
        let data = vec![0u8; *size];
        group.throughput(Throughput::Bytes(*size as u64));

        for (key_len, label) in KEY_SIZES.iter() {
            group.bench_with_input(BenchmarkId::new(*label, size), size, |b, _| {
                let mut cryptor = CtrModeCryptor::new();
                cryptor.initialize_with_iv(&vec![0u8; *key_len], &[0u8; 8]).unwrap();
                let mut buffer = data.clone();
                b.iter(|| {
                    cryptor.process(black_box(&mut buffer)).unwrap();
                });
            });
        }
    }

    group.finish();
}

fn bench_aes_cbc(c: &mut Criterion) {
    let mut group = c.benchmark_group("AES-CBC");
    let paddings = [
        (PaddingScheme::NoPadding, "NoPadding"),
        (PaddingScheme::Pkcs5, "PKCS5"),
        (PaddingScheme::Cts, "CTS"),
    ];

    for size in DATA_SIZES.iter() {
        let data = vec![0u8; *size];
        group.throughput(Throughput::Bytes(*size as u64));

        for (padding, label) in paddings.iter() {
            group.bench_with_input(BenchmarkId::new(*label, size), size, |b, _| {
                let mut cryptor = CbcModeCryptor::with_padding(*padding);
                cryptor.initialize_with_iv(&[0u8; 16], &[0u8; 16]).unwrap();
                b.iter(|| {
                    let _ = cryptor.encrypt(black_box(&data));
                });
            });
        }
    }

    group.finish();
}

fn bench_subsamples(c: &mut Criterion) {
    let mut group = c.benchmark_group("CENC-subsamples");

    // A 16 KiB video sample: a short clear NAL header ahead of each protected run
    let layout: Vec<Subsample> = (0..16).map(|_| Subsample::new(5, 1019)).collect();
    let mut sample = vec![0u8; 16 * 1024];
    group.throughput(Throughput::Bytes(sample.len() as u64));

    group.bench_function("AES-128-16x1KiB", |b| {
        let mut cryptor = CtrModeCryptor::new();
        cryptor.initialize_with_iv(&[0u8; 16], &[0u8; 8]).unwrap();
        b.iter(|| {
            cryptor.process_subsamples(black_box(&mut sample), &layout).unwrap();
            cryptor.update_iv().unwrap();
        });
    });

    group.finish();
}

fn bench_key_schedule_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("AES-CTR-per-sample");

    let sample = vec![0u8; 256];
    let samples = 100;

    // Keep the key schedule and only advance the IV between samples
    group.bench_function("AES-128-update-iv", |b| {
        let mut cryptor = CtrModeCryptor::new();
        cryptor.initialize_with_iv(&[0u8; 16], &[0u8; 8]).unwrap();

        b.iter(|| {
            for _ in 0..samples {
                let _ = cryptor.encrypt(black_box(&sample));
                cryptor.update_iv().unwrap();
            }
        });
    });

    group.bench_function("AES-128-reinitialize", |b| {
        b.iter(|| {
            let mut iv = 0u64;
            for _ in 0..samples {
                // Expand the key for every sample (naive approach)
                let mut cryptor = CtrModeCryptor::new();
                cryptor
                    .initialize_with_iv(&[0u8; 16], &iv.to_be_bytes())
                    .unwrap();
                let _ = cryptor.encrypt(black_box(&sample));
                iv += 1;
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_aes_ctr,
    bench_aes_cbc,
    bench_subsamples,
    bench_key_schedule_reuse
);
criterion_main!(benches);
