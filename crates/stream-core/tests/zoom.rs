// File: crates/stream-core/tests/zoom.rs
// Purpose: Zoom transform limits and translate constraints.

use stream_core::scale::TimeScale;
use stream_core::{ZoomBehavior, ZoomTransform};

fn behavior() -> ZoomBehavior {
    ZoomBehavior::new((0.0, 1280.0), (10.0, 1270.0))
}

#[test]
fn zoom_keeps_the_anchor_fixed() {
    let b = behavior();
    let t = b.scale_to(ZoomTransform::IDENTITY, 4.0, 640.0);
    assert_eq!(t.k, 4.0);
    assert!((t.invert_x(640.0) - 640.0).abs() < 1e-9);
}

#[test]
fn scale_is_clamped() {
    let b = behavior();
    assert_eq!(b.scale_to(ZoomTransform::IDENTITY, 100.0, 0.0).k, 32.0);
    assert_eq!(b.scale_to(ZoomTransform::IDENTITY, 0.01, 0.0).k, 0.5);
    let mut t = ZoomTransform::IDENTITY;
    for _ in 0..100 {
        t = b.wheel(t, -120.0, 300.0);
    }
    assert_eq!(t.k, 32.0);
}

#[test]
fn zoomed_out_content_is_centred() {
    let b = behavior();
    let t = b.scale_to(ZoomTransform::IDENTITY, 0.5, 100.0);
    let mid = (t.apply_x(10.0) + t.apply_x(1270.0)) / 2.0;
    assert!((mid - 640.0).abs() < 1e-9, "mid = {mid}");
}

#[test]
fn pan_cannot_leave_the_extent() {
    let b = behavior();
    let zoomed = b.scale_to(ZoomTransform::IDENTITY, 2.0, 640.0);
    let right = b.pan(zoomed, 10_000.0);
    assert!((right.invert_x(0.0) - 10.0).abs() < 1e-9);
    let left = b.pan(zoomed, -10_000.0);
    assert!((left.invert_x(1280.0) - 1270.0).abs() < 1e-9);
    assert_eq!(b.pan(ZoomTransform::IDENTITY, 250.0), ZoomTransform::IDENTITY);
}

#[test]
fn rescale_narrows_the_domain() {
    let x = TimeScale::from_logical((0.0, 100.0), (0.0, 1000.0));
    let t = ZoomTransform { k: 2.0, x: -500.0 };
    let z = x.rescale(&t);
    assert!((z.d0 - 25.0).abs() < 1e-9);
    assert!((z.d1 - 75.0).abs() < 1e-9);
    assert_eq!((z.r0, z.r1), (0.0, 1000.0));
}
