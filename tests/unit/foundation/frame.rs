use super::*;

fn hd() -> SceneFrame {
    SceneFrame::for_canvas(Canvas {
        width: 1280,
        height: 720,
    })
}

#[test]
fn frame_follows_canvas_aspect() {
    let f = hd();
    assert_eq!(f.height, FRAME_HEIGHT);
    assert!((f.width - 8.0 * 16.0 / 9.0).abs() < 1e-9);
    assert!((f.px_per_unit() - 90.0).abs() < 1e-9);
}

#[test]
fn origin_maps_to_canvas_center_and_y_flips() {
    let f = hd();
    let c = f.point_to_px(ORIGIN);
    assert!((c.x - 640.0).abs() < 1e-9);
    assert!((c.y - 360.0).abs() < 1e-9);

    let top_right = f.point_to_px(pt(f.right(), f.top()));
    assert!((top_right.x - 1280.0).abs() < 1e-9);
    assert!(top_right.y.abs() < 1e-9);

    let below = f.point_to_px(pt(0.0, -1.0));
    assert!(below.y > c.y);
}
