use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dosekit::prelude::*;
use std::hint::black_box;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
}

/// A titration ladder of `steps` four-week protocols followed by open-ended maintenance
fn titration_ladder(steps: i64) -> Vec<DosingProtocol> {
    let mut protocols: Vec<DosingProtocol> = (0..steps)
        .map(|i| {
            let from = start() + Duration::weeks(4 * i);
            DosingProtocol::builder("tirzepatide", from)
                .dose(2.5 * (i + 1) as f64)
                .times_per_week(2.0)
                .until(from + Duration::days(27))
                .phase(Phase::Titration)
                .build()
                .unwrap()
        })
        .collect();
    protocols.push(
        DosingProtocol::builder("tirzepatide", start() + Duration::weeks(4 * steps))
            .dose(15.0)
            .times_per_week(2.0)
            .phase(Phase::Maintenance)
            .build()
            .unwrap(),
    );
    protocols
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild_after_years");
    let protocols = titration_ladder(6);

    for years in [1, 3, 5] {
        let options = ProjectionOptions::new(start() + Duration::days(365 * years));
        let history = DoseHistory::new(rebuild(&protocols, &DoseHistory::default(), &options));

        group.bench_with_input(BenchmarkId::from_parameter(years), &years, |b, _| {
            b.iter(|| {
                let records = rebuild(black_box(&protocols), black_box(&history), &options);
                black_box(records);
            });
        });
    }

    group.finish();
}

fn bench_incremental(c: &mut Criterion) {
    let protocols = titration_ladder(6);
    let options = ProjectionOptions::new(start() + Duration::days(365 * 3));
    let existing = rebuild(&protocols, &DoseHistory::default(), &options);

    c.bench_function("project_nothing_new", |b| {
        b.iter(|| {
            let doses = project(black_box(&protocols), black_box(&existing), &options);
            black_box(doses);
        });
    });
}

criterion_group!(benches, bench_rebuild, bench_incremental);
criterion_main!(benches);
