//! Performance benchmarks for Bandersnatch core operations
//!
//! Run with: `cargo bench -p bandersnatch-core`
//!
//! These benchmarks measure the reporting path end to end:
//! - Seeding 1000 monsters into the in-memory engine
//! - Materializing the collection as a Frame
//! - HTML table export and scatter chart construction

use bandersnatch_core::chart::chart;
use bandersnatch_core::db::{Database, DocumentClient};
use bandersnatch_core::models::{Frame, MonsterGenerator, RecordGenerator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tokio::runtime::Runtime;

const MONSTERS: usize = 1000;

/// Setup a fresh in-memory collection
async fn setup_test_db() -> Database {
    let client = DocumentClient::in_memory().await.unwrap();
    Database::open(&client, "monsters").await.unwrap()
}

fn bench_seed(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    c.bench_function("seed_1000_monsters", |b| {
        b.iter(|| {
            rt.block_on(async {
                let db = setup_test_db().await;
                db.seed(black_box(MONSTERS)).await.unwrap();
            })
        })
    });
}

fn bench_dataframe(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let db = rt.block_on(async {
        let db = setup_test_db().await;
        db.seed(MONSTERS).await.unwrap();
        db
    });

    c.bench_function("dataframe_1000_monsters", |b| {
        b.iter(|| rt.block_on(async { black_box(db.dataframe().await.unwrap()) }))
    });
}

fn bench_exports(c: &mut Criterion) {
    let records = MonsterGenerator::seeded(1).generate(MONSTERS);
    let frame = Frame::from_records(&records);

    c.bench_function("html_table_1000_rows", |b| {
        b.iter(|| black_box(frame.to_html()))
    });

    c.bench_function("scatter_chart_1000_rows", |b| {
        b.iter(|| black_box(chart(&frame, "Health", "Energy", "Type").unwrap()))
    });
}

criterion_group!(benches, bench_seed, bench_dataframe, bench_exports);
criterion_main!(benches);
