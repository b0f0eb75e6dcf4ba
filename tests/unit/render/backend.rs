use super::*;
use crate::foundation::core::Canvas;
use crate::foundation::frame::SceneFrame;
use crate::scene::shapes::rectangle;
use crate::style::color::{RED, WHITE};

fn renderer() -> Renderer {
    Renderer::with_fontdb(usvg::fontdb::Database::new())
}

fn frame_state(items: Vec<crate::scene::mobject::Leaf>) -> FrameState {
    FrameState {
        frame: SceneFrame::for_canvas(Canvas {
            width: 16,
            height: 16,
        }),
        background: RED,
        items,
    }
}

#[test]
fn background_fills_the_canvas() {
    let frame = renderer().render_state(&frame_state(vec![])).unwrap();
    assert_eq!((frame.width, frame.height), (16, 16));
    assert_eq!(frame.data.len(), 16 * 16 * 4);
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(0, 0), Some([252, 98, 85, 255]));
    assert_eq!(frame.pixel(15, 15), Some([252, 98, 85, 255]));
    assert_eq!(frame.pixel(16, 0), None);
}

#[test]
fn filled_shapes_cover_their_pixels() {
    // 2 px per unit: a 2x2 square covers pixels 6..10 around the center.
    let fs = frame_state(vec![rectangle(2.0, 2.0).fill(WHITE, 1.0).stroke_width(0.0)]);
    let frame = renderer().render_state(&fs).unwrap();
    assert_eq!(frame.pixel(8, 8), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(1, 1), Some([252, 98, 85, 255]));
}

#[test]
fn text_without_fonts_does_not_fail() {
    let fs = frame_state(vec![crate::scene::mobject::Leaf::text("hello", 24.0)]);
    assert!(renderer().render_state(&fs).is_ok());
}

#[test]
fn malformed_svg_is_a_render_error() {
    let err = renderer().render_svg("<svg").unwrap_err();
    assert!(err.to_string().starts_with("render error:"));
}

#[test]
fn zero_canvas_is_rejected() {
    let mut fs = frame_state(vec![]);
    fs.frame.canvas.width = 0;
    assert!(renderer().render_state(&fs).is_err());
}
