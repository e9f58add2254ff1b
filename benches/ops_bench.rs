use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use bufmeta::{layout, BufferGeometry, BufferHandle, MetadataKind, MetadataValue};

fn benchmark_set_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("MetadataOps");
    group.throughput(Throughput::Elements(1));

    let handle = BufferHandle::allocate("bench").unwrap();

    group.bench_function("set_refresh_rate", |b| {
        b.iter(|| bufmeta::set(&handle, &MetadataValue::RefreshRate(59.94)).unwrap());
    });

    group.bench_function("set_buffer_geometry", |b| {
        let value = MetadataValue::BufferGeometry(BufferGeometry {
            width: 1920,
            height: 1080,
            format: 1,
        });
        b.iter(|| bufmeta::set(&handle, &value).unwrap());
    });

    bufmeta::set(&handle, &MetadataValue::RefreshRate(59.94)).unwrap();
    group.bench_function("get_refresh_rate", |b| {
        b.iter(|| bufmeta::get(&handle, MetadataKind::RefreshRate).unwrap());
    });

    group.finish();
}

fn benchmark_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("MetadataCopy");
    group.throughput(Throughput::Bytes(layout::RECORD_SIZE as u64));

    let source = BufferHandle::allocate("bench-src").unwrap();
    let destination = BufferHandle::allocate("bench-dst").unwrap();
    bufmeta::set(&source, &MetadataValue::VideoTimestamp(1)).unwrap();

    group.bench_function("copy_full_record", |b| {
        b.iter(|| bufmeta::copy(&source, &destination).unwrap());
    });

    group.finish();
}

criterion_group!(benches, benchmark_set_get, benchmark_copy);
criterion_main!(benches);
