use chrono::{Duration, NaiveDate, NaiveTime};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dosekit::kinetics::{all_series, concentration, SeriesOptions};
use dosekit::prelude::*;
use std::hint::black_box;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
}

/// Weekly doses of one or more medications over `years`
fn build_history(years: i64, medications: &[&str]) -> DoseHistory {
    let today = start() + Duration::days(365 * years);
    let protocols: Vec<DosingProtocol> = medications
        .iter()
        .map(|m| {
            DosingProtocol::builder(m, start())
                .dose(1.0)
                .weekly()
                .half_life_hours(144.0)
                .build()
                .unwrap()
        })
        .collect();
    DoseHistory::new(rebuild(
        &protocols,
        &DoseHistory::default(),
        &ProjectionOptions::new(today),
    ))
}

fn bench_single_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("concentration_point");

    for years in [1, 3, 5] {
        let doses: Vec<(NaiveDate, f64)> = (0..52 * years)
            .map(|w| (start() + Duration::weeks(w), 1.0))
            .collect();
        let now = (start() + Duration::days(365 * years)).and_time(NaiveTime::MIN);

        group.bench_with_input(BenchmarkId::from_parameter(years), &years, |b, _| {
            b.iter(|| {
                let level = concentration(black_box(doses.iter().copied()), 168.0, now);
                black_box(level);
            });
        });
    }

    group.finish();
}

fn bench_daily_series(c: &mut Criterion) {
    let history = build_history(2, &["semaglutide"]);
    let options = SeriesOptions::daily(start(), start() + Duration::days(730));

    c.bench_function("level_series_two_years_daily", |b| {
        b.iter(|| {
            let series = black_box(&history).level_series("semaglutide", black_box(&options));
            black_box(series);
        });
    });
}

fn bench_all_series(c: &mut Criterion) {
    let history = build_history(2, &["semaglutide", "tirzepatide", "retatrutide", "cagrilintide"]);
    let options = SeriesOptions::daily(start(), start() + Duration::days(730));

    c.bench_function("all_series_four_medications", |b| {
        b.iter(|| {
            let series = all_series(black_box(&history), black_box(&options));
            black_box(series);
        });
    });
}

criterion_group!(
    benches,
    bench_single_point,
    bench_daily_series,
    bench_all_series,
);
criterion_main!(benches);
