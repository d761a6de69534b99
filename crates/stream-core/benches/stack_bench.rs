use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stream_core::{transform, DoseRecord, InsideOutSilhouette, StackLayout};

fn synthetic(days: u32, vaccines: usize) -> Vec<DoseRecord> {
    let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or_default();
    let mut out = Vec::with_capacity(days as usize * vaccines);
    for k in 0..vaccines {
        let mut total = 0u64;
        for d in 0..days {
            total += ((d as u64 * 37 + k as u64 * 101) % 500) * 10;
            out.push(DoseRecord::new(
                start.checked_add_days(chrono::Days::new(d.into())),
                "Japan",
                format!("vaccine-{k}"),
                total,
            ));
        }
    }
    out
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    for &(days, vaccines) in &[(365u32, 4usize), (730, 12)] {
        let data = synthetic(days, vaccines);
        group.bench_function(format!("{days}d_{vaccines}v"), |b| {
            b.iter(|| black_box(transform(black_box(&data))))
        });
    }
    group.finish();
}

fn bench_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("inside_out_silhouette");
    for &(days, vaccines) in &[(365u32, 4usize), (730, 12)] {
        let table = transform(&synthetic(days, vaccines));
        group.bench_function(format!("{days}d_{vaccines}v"), |b| {
            b.iter(|| black_box(InsideOutSilhouette.stack(&table.keys, &table.rows)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transform, bench_stack);
criterion_main!(benches);
