use vertex_gallery::color::Rgb;
use vertex_gallery::viewport::{display_size, resize_target, CanvasStyle};

#[test]
fn display_size_scales_by_device_pixel_ratio() {
    assert_eq!(display_size(800, 600, 1.0), (800, 600));
    assert_eq!(display_size(800, 600, 2.0), (1600, 1200));
    assert_eq!(display_size(333, 101, 1.5), (499, 151));
}

#[test]
fn display_size_tolerates_odd_inputs() {
    assert_eq!(display_size(-5, 10, 1.0), (0, 10));
    assert_eq!(display_size(100, 100, 0.0), (100, 100));
    assert_eq!(display_size(100, 100, f64::NAN), (100, 100));
}

#[test]
fn resize_follows_the_display_on_the_next_check() {
    let mut backing = (300, 150);
    let displayed = display_size(800, 600, 2.0);

    let target = resize_target(backing, displayed).expect("first check resizes");
    backing = target;
    assert_eq!(backing, (1600, 1200));
    assert_eq!(resize_target(backing, displayed), None);

    let shrunk = display_size(400, 300, 2.0);
    assert_eq!(resize_target(backing, shrunk), Some((800, 600)));
}

#[test]
fn default_canvas_is_800_by_600() {
    let style = CanvasStyle::default();
    assert_eq!((style.width, style.height), ("800px", "600px"));
}

#[test]
fn colors_parse_and_render_for_css_and_uniforms() {
    let color: Rgb = "#0a141e".parse().expect("hex color");
    assert_eq!(color, Rgb::new(10, 20, 30));
    assert_eq!(color.css(), "rgb(10,20,30)");
    assert_eq!(color.to_string(), "#0a141e");
    assert_eq!(Rgb::from_u32(0xff0a141e), color);
    assert_eq!(color.to_u32(), 0x0a141e);
    assert!("#zzzzzz".parse::<Rgb>().is_err());
    assert!("fff".parse::<Rgb>().is_err());
}
