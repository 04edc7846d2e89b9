use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lazystream::Record;
use lazystream::tui::application::search_service::SearchService;
use lazystream::tui::domain::message_store::MessageStore;
use std::sync::Arc;

fn create_test_data(num_records: usize) -> Vec<Arc<Record>> {
    let mut store = MessageStore::new();
    store.append_batch(
        (0..num_records)
            .map(|i| {
                Record::new(
                    (i % 3) as i32,
                    i as i64,
                    format!(
                        r#"{{"id":{i},"user":"user-{}","event":"order placed","message":"Message {i} with some test content"}}"#,
                        i % 97
                    ),
                )
                .with_key(format!("key-{i}"))
            })
            .collect(),
    );
    store.snapshot()
}

fn benchmark_fuzzy_search(c: &mut Criterion) {
    let records = create_test_data(50_000);
    let service = SearchService::new();

    c.bench_function("fuzzy_search_50000", |b| {
        b.iter(|| service.rank(&records, black_box("user-42 order")));
    });
}

fn benchmark_no_match_search(c: &mut Criterion) {
    let records = create_test_data(50_000);
    let service = SearchService::new();

    c.bench_function("fuzzy_search_no_match_50000", |b| {
        b.iter(|| service.rank(&records, black_box("zzzzqqq")));
    });
}

fn benchmark_empty_query(c: &mut Criterion) {
    let records = create_test_data(50_000);
    let service = SearchService::new();

    c.bench_function("empty_query_50000", |b| {
        b.iter(|| service.rank(&records, black_box("")));
    });
}

fn benchmark_store_append(c: &mut Criterion) {
    c.bench_function("store_append_batch_10000", |b| {
        b.iter(|| {
            let mut store = MessageStore::new();
            store.append_batch(
                (0..10_000)
                    .map(|i| Record::new(0, i, black_box("payload")))
                    .collect(),
            );
            store.len()
        });
    });
}

criterion_group!(
    benches,
    benchmark_fuzzy_search,
    benchmark_no_match_search,
    benchmark_empty_query,
    benchmark_store_append
);
criterion_main!(benches);
