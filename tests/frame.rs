use vertex_gallery::color::Rgb;
use vertex_gallery::frame::{plan_frame, FrameStats, FrameUniforms};
use vertex_gallery::primitive::PrimitiveMode;
use vertex_gallery::settings::Settings;
use vertex_gallery::vertex_index::VertexIndices;

#[test]
fn plan_uploads_only_when_the_count_changes() {
    let mut settings = Settings::default();
    let mut indices = VertexIndices::with_count(settings.count);

    let plan = plan_frame(&mut indices, &settings);
    assert!(!plan.reupload);
    assert_eq!(plan.draw_count, settings.count);

    settings.set_count(5001);
    settings.primitive = PrimitiveMode::Lines;
    let plan = plan_frame(&mut indices, &settings);
    assert!(plan.reupload);
    assert_eq!(plan.mode, PrimitiveMode::Lines);
    assert_eq!(plan.draw_count, 5000);
    assert_eq!(indices.len(), 5001);

    let plan = plan_frame(&mut indices, &settings);
    assert!(!plan.reupload);
}

#[test]
fn mode_changes_apply_on_the_next_plan() {
    let mut settings = Settings::default();
    settings.set_count(1000);
    let mut indices = VertexIndices::with_count(1000);
    settings.primitive = PrimitiveMode::Triangles;
    let plan = plan_frame(&mut indices, &settings);
    assert_eq!(plan.draw_count, 999);
    assert!(!plan.reupload);
}

#[test]
fn uniforms_carry_seconds_resolution_and_normalized_pointer() {
    let mut settings = Settings::default();
    settings.background = Rgb::new(10, 20, 30);

    let u = FrameUniforms::compute(2500.0, (1600, 1200), (200.0, 450.0), (800.0, 600.0), &settings);
    assert!((u.time - 2.5).abs() < 1e-6);
    assert_eq!(u.resolution, [1600.0, 1200.0]);
    assert_eq!(u.mouse, [0.25, 0.75]);
    assert_eq!(u.vertex_count, 10_000.0);
    assert_eq!(u.background, [10.0, 20.0, 30.0, 255.0]);
}

#[test]
fn zero_sized_canvas_gives_a_zero_pointer() {
    let settings = Settings::default();
    let u = FrameUniforms::compute(0.0, (0, 0), (10.0, 10.0), (0.0, 0.0), &settings);
    assert_eq!(u.mouse, [0.0, 0.0]);
}

#[test]
fn stats_report_once_per_second() {
    let mut stats = FrameStats::default();
    let mut reports = Vec::new();
    for i in 0..=120 {
        if let Some(fps) = stats.tick(i as f64 * 1000.0 / 60.0) {
            reports.push(fps);
        }
    }
    assert_eq!(stats.frames(), 121);
    assert_eq!(reports.len(), 2);
    for fps in reports {
        assert!((fps - 61.0).abs() < 1.5, "fps {fps}");
    }
}
