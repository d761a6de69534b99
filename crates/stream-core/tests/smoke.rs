// File: crates/stream-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test: CSV text in, PNG and SVG out.

use stream_core::{parse_csv, Dashboard, RenderOptions, Surface, Theme};

const CSV: &str = "\
location,date,vaccine,total_vaccinations
Japan,2021-02-17,Pfizer/BioNTech,125
Japan,2021-02-18,Pfizer/BioNTech,1000
Japan,2021-02-19,Pfizer/BioNTech,2500
Japan,2021-05-24,Moderna,1200
Japan,2021-05-25,Moderna,4000
Japan,2021-05-26,Moderna,9000
Italy,2021-02-17,Moderna,300
";

#[test]
fn render_smoke_png() {
    let records = parse_csv(CSV.as_bytes()).expect("parse");
    let dash = Dashboard::load(records, "Japan", Surface::default(), Theme::light());
    let scene = dash.context().scene();

    let opts = RenderOptions::default();
    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();

    scene.render_to_png(&opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = scene.render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn render_smoke_svg() {
    let records = parse_csv(CSV.as_bytes()).expect("parse");
    let dash = Dashboard::load(records, "Japan", Surface::default(), Theme::light());
    let svg = dash.context().scene().to_svg();

    assert!(svg.starts_with("<svg "));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("class=\"area-path\"").count(), 2);
    assert!(svg.contains("data-key=\"Pfizer/BioNTech\""));
    assert!(svg.contains("clip-path=\"url(#clip)\""));
    // about fourteen weeks of data, so the axes tick on Sundays
    assert!(svg.contains(">Feb 21<"));
}
