//! Throughput Benchmark for wirekv
//!
//! This benchmark measures the performance of the frame codec and the store
//! under various workloads.

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;
use wirekv::commands::CommandHandler;
use wirekv::protocol::{decode_request, encode_request, encode_response, Status};
use wirekv::storage::Store;

fn request(parts: &[&[u8]]) -> Vec<u8> {
    let args: Vec<Bytes> = parts.iter().map(|p| Bytes::copy_from_slice(p)).collect();
    let mut buf = Vec::new();
    encode_request(&args, &mut buf).unwrap();
    buf
}

/// Benchmark request decoding
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(1));

    let small = request(&[b"get", b"user:1001"]);
    group.bench_function("decode_get", |b| {
        b.iter(|| black_box(decode_request(black_box(&small)).unwrap()));
    });

    let value = vec![0xabu8; 1024];
    let large = request(&[b"set", b"user:1001", &value]);
    group.bench_function("decode_set_1k", |b| {
        b.iter(|| black_box(decode_request(black_box(&large)).unwrap()));
    });

    // Partial frame: the decoder's need-more-data fast path
    group.bench_function("decode_partial", |b| {
        b.iter(|| black_box(decode_request(black_box(&large[..6])).unwrap()));
    });

    group.finish();
}

/// Benchmark frame encoding
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Elements(1));

    let args = vec![
        Bytes::from_static(b"set"),
        Bytes::from_static(b"user:1001"),
        Bytes::from(vec![0xabu8; 1024]),
    ];
    group.bench_function("encode_request_1k", |b| {
        b.iter(|| {
            let mut buf = Vec::new();
            encode_request(black_box(&args), &mut buf).unwrap();
            black_box(buf);
        });
    });

    let payload = vec![0xcdu8; 1024];
    group.bench_function("encode_response_1k", |b| {
        b.iter(|| {
            let mut buf = Vec::new();
            encode_response(Status::Ok, black_box(&payload), &mut buf);
            black_box(buf);
        });
    });

    group.finish();
}

/// Benchmark dispatch end to end (decode -> execute -> encode)
fn bench_dispatch(c: &mut Criterion) {
    let store = Arc::new(Store::new());
    let handler = CommandHandler::new(Arc::clone(&store));

    // Pre-populate
    for i in 0..10_000 {
        store.set(
            Bytes::from(format!("key:{}", i)),
            Bytes::from(format!("value:{}", i)),
        );
    }

    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_existing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let wire = request(&[b"get", format!("key:{}", i % 10_000).as_bytes()]);
            let (args, _) = decode_request(&wire).unwrap().unwrap();
            let response = handler.execute(&args);
            let mut out = Vec::new();
            response.encode_into(&mut out);
            black_box(out);
            i += 1;
        });
    });

    group.bench_function("set_small", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let wire = request(&[b"set", format!("new:{}", i).as_bytes(), b"value"]);
            let (args, _) = decode_request(&wire).unwrap().unwrap();
            black_box(handler.execute(&args));
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark raw store operations
fn bench_store(c: &mut Criterion) {
    let store = Arc::new(Store::new());

    for i in 0..100_000 {
        store.set(
            Bytes::from(format!("key:{}", i)),
            Bytes::from(format!("value:{}", i)),
        );
    }

    let mut group = c.benchmark_group("store");
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_existing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = Bytes::from(format!("key:{}", i % 100_000));
            black_box(store.get(&key));
            i += 1;
        });
    });

    group.bench_function("get_missing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = Bytes::from(format!("missing:{}", i));
            black_box(store.get(&key));
            i += 1;
        });
    });

    group.bench_function("set_small", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = Bytes::from(format!("key:{}", i));
            store.set(key, Bytes::from("small_value"));
            i += 1;
        });
    });

    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode, bench_dispatch, bench_store);

criterion_main!(benches);
