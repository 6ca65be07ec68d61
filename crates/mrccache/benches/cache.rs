use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mrccache::{CacheConfig, ResponseCache};
use mrckv::MemoryStore;
use tempfile::TempDir;

fn populated(count: usize) -> ResponseCache<MemoryStore> {
    let mut cache = ResponseCache::open(MemoryStore::new(), CacheConfig::default()).unwrap();
    for i in 0..count {
        cache
            .write(
                &format!("question numero {} sur le programme economique", i),
                "Une réponse suffisamment longue pour ressembler à un vrai message.",
            )
            .unwrap();
    }
    cache
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("exact_hit", |b| {
        let mut cache = populated(50);
        b.iter(|| {
            black_box(cache.read("question numero 42 sur le programme economique"));
        });
    });

    group.bench_function("fuzzy_hit", |b| {
        let mut cache = populated(50);
        b.iter(|| {
            black_box(cache.read("le programme economique"));
        });
    });

    group.bench_function("full_scan_miss", |b| {
        let mut cache = populated(50);
        b.iter(|| {
            black_box(cache.read("aucune correspondance possible ici"));
        });
    });

    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("write_at_capacity_memory", |b| {
        let mut cache = populated(100);
        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.write(&format!("nouvelle question {}", counter), "réponse").ok());
            counter += 1;
        });
    });

    group.bench_function("write_at_capacity_file", |b| {
        let dir = TempDir::new().unwrap();
        let store = mrckv::FileStore::open(dir.path()).unwrap();
        let mut cache = ResponseCache::open(store, CacheConfig::default()).unwrap();
        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.write(&format!("nouvelle question {}", counter), "réponse").ok());
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(benches, bench_read, bench_write);
criterion_main!(benches);
