use cdss::{filter_by_point, filter_by_polygon, records_to_dataframe, LonLat, Polygon, Record};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

fn stations(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let mut record = Record::new();
            record.insert("abbrev".into(), json!(format!("ST{i:05}")));
            record.insert("longitude".into(), json!(-109.0 + (i % 700) as f64 * 0.01));
            record.insert("latitude".into(), json!(37.0 + (i / 700) as f64 * 0.01));
            record.insert("measValue".into(), json!(i as f64 * 0.5));
            record.insert("measDate".into(), json!("2024-05-01T00:00:00"));
            record
        })
        .collect()
}

fn bench_spatial(c: &mut Criterion) {
    let records = stations(50_000);
    let polygon = Polygon::new(vec![
        LonLat(-106.0, 38.0),
        LonLat(-104.0, 38.0),
        LonLat(-104.0, 40.0),
        LonLat(-106.0, 39.5),
    ])
    .unwrap();

    c.bench_function("filter_by_polygon", |b| {
        b.iter(|| filter_by_polygon(black_box(records.clone()), &polygon))
    });
    c.bench_function("filter_by_point", |b| {
        b.iter(|| filter_by_point(black_box(records.clone()), LonLat(-105.0, 39.0), 20.0))
    });
}

fn bench_frame(c: &mut Criterion) {
    let records = stations(50_000);
    c.bench_function("records_to_dataframe", |b| {
        b.iter(|| records_to_dataframe(black_box(&records)))
    });
}

criterion_group!(benches, bench_spatial, bench_frame);
criterion_main!(benches);
