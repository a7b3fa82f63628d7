use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use prsa_processor::models::RawRecord;
use prsa_processor::processors::{MonthlyAggregator, Normalizer, StationPartitioner};

// Synthetic hourly records covering `days` days for `station_count` stations.
fn create_test_records(station_count: usize, days: usize) -> Vec<RawRecord> {
    const WIND: [&str; 4] = ["N", "E", "S", "W"];
    let mut records = Vec::with_capacity(station_count * days * 24);

    for station_id in 1..=station_count {
        for day in 0..days {
            for hour in 0..24 {
                let base = 10.0 + day as f64 * 0.1 + station_id as f64;
                records.push(RawRecord {
                    no: (day * 24 + hour + 1) as u32,
                    year: 2013,
                    month: 1 + (day / 28) as u32,
                    day: 1 + (day % 28) as u32,
                    hour: hour as u32,
                    pm25: Some(base),
                    pm10: Some(base * 1.5),
                    so2: Some(base * 0.2),
                    no2: Some(base * 0.8),
                    co: Some(base * 20.0),
                    o3: Some(base * 0.9),
                    temperature: Some(5.0),
                    pressure: Some(1020.0),
                    dew_point: Some(-5.0),
                    rainfall: Some(if hour % 7 == 0 { 0.4 } else { 0.0 }),
                    wind_label: Some(WIND[(day + hour) % WIND.len()].to_string()),
                    wind_speed: Some(2.5),
                    station: format!("Station{}", station_id),
                });
            }
        }
    }

    records
}

fn benchmark_normalizer(c: &mut Criterion) {
    let raw = create_test_records(4, 56);

    c.bench_function("normalize_hourly", |b| {
        b.iter(|| {
            let normalizer = Normalizer::new();
            let clean = normalizer.normalize(&raw).unwrap();
            black_box(clean.len())
        })
    });
}

fn benchmark_monthly_aggregation(c: &mut Criterion) {
    let raw = create_test_records(1, 56);
    let clean = Normalizer::new().normalize(&raw).unwrap();

    c.bench_function("aggregate_monthly", |b| {
        b.iter(|| {
            let aggregator = MonthlyAggregator::new();
            let months = aggregator.aggregate(&clean).unwrap();
            black_box(months.len())
        })
    });
}

fn benchmark_varying_station_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean_and_aggregate_by_stations");

    for &station_count in &[2, 6, 12] {
        group.bench_with_input(
            BenchmarkId::new("stations", station_count),
            &station_count,
            |b, &station_count| {
                let raw = create_test_records(station_count, 56);

                b.iter(|| {
                    let clean = Normalizer::new().normalize(&raw).unwrap();
                    let partitions = StationPartitioner::new().partition(clean).unwrap();
                    let aggregator = MonthlyAggregator::new();
                    let mut total = 0;
                    for records in partitions.values() {
                        total += aggregator.aggregate(records).unwrap().len();
                    }
                    black_box(total)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_normalizer,
    benchmark_monthly_aggregation,
    benchmark_varying_station_counts
);
criterion_main!(benches);
