//! Reference adapter benchmarks

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use storage_conformance::adapter::{MemoryAdapter, StorageAdapter, WriteOptions};

fn benchmark_write_read(c: &mut Criterion) {
    let storage = MemoryAdapter::new();
    let data = Bytes::from(vec![0u8; 1024]);

    c.bench_function("write_1kb", |b| {
        b.iter(|| {
            storage
                .write("bench/file.bin", black_box(data.clone()), &WriteOptions::default())
                .unwrap();
        })
    });

    storage
        .write("bench/file.bin", data, &WriteOptions::default())
        .unwrap();
    c.bench_function("read_1kb", |b| {
        b.iter(|| {
            let _contents = black_box(storage.read("bench/file.bin").unwrap());
        })
    });
}

fn benchmark_listing(c: &mut Criterion) {
    let storage = MemoryAdapter::new();
    for i in 0..100 {
        storage
            .write(
                &format!("tree/dir-{}/file-{}.txt", i % 10, i),
                Bytes::from("payload"),
                &WriteOptions::default(),
            )
            .unwrap();
    }

    c.bench_function("list_recursive_100", |b| {
        b.iter(|| {
            let _entries = black_box(storage.list_contents("", true).unwrap());
        })
    });
}

criterion_group!(benches, benchmark_write_read, benchmark_listing);
criterion_main!(benches);
