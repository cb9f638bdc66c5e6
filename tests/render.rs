use image::{DynamicImage, ImageFormat, RgbaImage};
use planmarker::draw::{
    Annotation, Background, FixedAdvanceMeasure, PlanCanvas, RenderStyle, hit_test,
    render_annotations,
};
use planmarker::util::Point;
use std::io::Cursor;

fn surface(width: i32, height: i32) -> cairo::ImageSurface {
    cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap()
}

/// Premultiplied `(a, r, g, b)` at a pixel.
fn pixel(surface: &mut cairo::ImageSurface, x: usize, y: usize) -> (u8, u8, u8, u8) {
    surface.flush();
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let offset = y * stride + x * 4;
    let px = u32::from_ne_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ]);
    (
        (px >> 24) as u8,
        (px >> 16) as u8,
        (px >> 8) as u8,
        px as u8,
    )
}

fn draw(surface: &cairo::ImageSurface, annotations: &[Annotation]) {
    let ctx = cairo::Context::new(surface).unwrap();
    render_annotations(&ctx, annotations, &RenderStyle::default());
}

#[test]
fn socket_marker_is_red_disc_with_white_glyph() {
    let mut target = surface(100, 100);
    draw(&target, &[Annotation::Socket { x: 50.0, y: 50.0 }]);

    // Between the glyph ring and the center stroke
    let (a, r, g, b) = pixel(&mut target, 50, 41);
    assert_eq!(a, 255);
    assert!(r > 200 && g < 100 && b < 100, "expected red, got {r},{g},{b}");

    // On the glyph ring
    let (a, r, g, b) = pixel(&mut target, 50, 37);
    assert_eq!(a, 255);
    assert!(r > 200 && g > 150 && b > 150, "expected white, got {r},{g},{b}");

    // Outside the disc
    assert_eq!(pixel(&mut target, 50, 30).0, 0);
}

#[test]
fn frame_is_hollow() {
    let mut target = surface(100, 100);
    draw(
        &target,
        &[Annotation::Frame {
            x: 20.0,
            y: 20.0,
            width: 60.0,
            height: 40.0,
            color: Some("#3b82f6".to_string()),
        }],
    );

    let (a, r, _, b) = pixel(&mut target, 20, 40);
    assert!(a > 200);
    assert!(b > r);
    assert_eq!(pixel(&mut target, 50, 40).0, 0);
}

#[test]
fn negative_frame_renders_like_normalized_one() {
    let mut forward = surface(100, 100);
    let mut backward = surface(100, 100);
    draw(
        &forward,
        &[Annotation::Frame {
            x: 20.0,
            y: 20.0,
            width: 60.0,
            height: 40.0,
            color: None,
        }],
    );
    draw(
        &backward,
        &[Annotation::Frame {
            x: 80.0,
            y: 60.0,
            width: -60.0,
            height: -40.0,
            color: None,
        }],
    );

    for (x, y) in [(20, 40), (80, 40), (50, 20), (50, 60), (50, 40)] {
        assert_eq!(pixel(&mut forward, x, y), pixel(&mut backward, x, y));
    }
}

#[test]
fn drawn_arrow_is_hit_where_it_is_painted() {
    let arrow = Annotation::Arrow {
        x: 0.0,
        y: 50.0,
        x2: 100.0,
        y2: 50.0,
        color: None,
    };
    let mut target = surface(120, 100);
    draw(&target, std::slice::from_ref(&arrow));

    assert!(pixel(&mut target, 50, 50).0 > 200);
    assert_eq!(pixel(&mut target, 50, 70).0, 0);

    let style = RenderStyle::default();
    let measure = FixedAdvanceMeasure { advance_ratio: 0.5 };
    let annotations = [arrow];
    assert_eq!(
        hit_test(&annotations, Point::new(50.0, 50.0), 10.0, &style, &measure),
        Some(0)
    );
    assert_eq!(
        hit_test(&annotations, Point::new(50.0, 70.0), 10.0, &style, &measure),
        None
    );
}

#[test]
fn arrowhead_is_filled_near_tip() {
    let mut target = surface(120, 100);
    draw(
        &target,
        &[Annotation::Arrow {
            x: 0.0,
            y: 50.0,
            x2: 100.0,
            y2: 50.0,
            color: None,
        }],
    );
    // Inside the head's triangle, off the shaft
    assert!(pixel(&mut target, 92, 53).0 > 200);
    // Mirrored point past the tip stays empty
    assert_eq!(pixel(&mut target, 108, 53).0, 0);
}

#[test]
fn text_label_leaves_ink() {
    let mut target = surface(200, 80);
    draw(
        &target,
        &[Annotation::Text {
            x: 10.0,
            y: 50.0,
            text: "HALL".to_string(),
            color: "#FFFFFF".to_string(),
            font_size: 32.0,
        }],
    );

    let mut inked = 0;
    for y in 20..55 {
        for x in 10..120 {
            if pixel(&mut target, x, y).0 > 0 {
                inked += 1;
            }
        }
    }
    assert!(inked > 50, "expected label ink, found {inked} pixels");
}

#[test]
fn canvas_paints_background_under_annotations() {
    let image = RgbaImage::from_pixel(64, 48, image::Rgba([0, 200, 0, 255]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    let background = Background::from_bytes(&bytes).unwrap();

    let mut canvas = PlanCanvas::new(RenderStyle::default());
    let painted = canvas
        .repaint(
            Some(&background),
            &[Annotation::Line {
                x: 0.0,
                y: 10.0,
                x2: 64.0,
                y2: 10.0,
                color: Some("#ef4444".to_string()),
            }],
            None,
        )
        .unwrap();
    assert!(painted);

    let png = canvas.encode("image/png").unwrap().1;
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (64, 48));
    assert_eq!(decoded.get_pixel(5, 30).0, [0, 200, 0, 255]);
    let line = decoded.get_pixel(5, 10).0;
    assert!(line[0] > 200 && line[1] < 100);
}
