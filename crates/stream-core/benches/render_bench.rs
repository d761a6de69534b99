use anyhow::Result;
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stream_core::{ChartEvent, DoseRecord, RenderContext, RenderOptions, Surface, Theme};

const VACCINES: [&str; 6] = ["Pfizer/BioNTech", "Moderna", "Oxford/AstraZeneca", "Johnson&Johnson", "Sinovac", "Novavax"];

fn synthetic(days: u32) -> Vec<DoseRecord> {
    let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or_default();
    let mut out = Vec::with_capacity(days as usize * VACCINES.len());
    for (k, v) in VACCINES.iter().enumerate() {
        let mut total = 0u64;
        for d in 0..days {
            let wave = ((d as f64 / 30.0 + k as f64).sin() + 1.2) * 1_000.0 * (k + 1) as f64;
            total += wave as u64;
            out.push(DoseRecord::new(start.checked_add_days(chrono::Days::new(d.into())), "Japan", *v, total));
        }
    }
    out
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");
    for &days in &[90u32, 365u32] {
        group.bench_function(format!("streams_{days}d"), |b| {
            let data = synthetic(days);
            let mut ctx = RenderContext::new(&data, Surface::for_viewport(800, 700, Default::default()), Theme::light());
            ctx.dispatch(ChartEvent::LocationChanged { location: "Japan".into(), records: data });
            let opts = RenderOptions { draw_labels: false };
            b.iter(|| -> Result<()> {
                let bytes = ctx.scene().render_to_png_bytes(&opts)?;
                black_box(bytes);
                Ok(())
            });
        });
    }
    group.finish();
}

fn bench_hover(c: &mut Criterion) {
    let data = synthetic(365);
    let mut ctx = RenderContext::new(&data, Surface::default(), Theme::light());
    ctx.dispatch(ChartEvent::LocationChanged { location: "Japan".into(), records: data });
    c.bench_function("pointer_moved_redraw", |b| {
        let mut x = 10.0;
        b.iter(|| {
            x = if x > 1260.0 { 10.0 } else { x + 7.0 };
            ctx.dispatch(ChartEvent::PointerMoved { x, y: 315.0 });
            black_box(ctx.tooltip().is_some());
        });
    });
}

criterion_group!(benches, bench_render, bench_hover);
criterion_main!(benches);
