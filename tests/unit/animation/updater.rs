use super::*;
use crate::foundation::core::Canvas;
use crate::foundation::frame::SceneFrame;
use crate::scene::shapes::circle;

fn scene_with_circle() -> (SceneState, MobjectId) {
    let mut s = SceneState::new(SceneFrame::for_canvas(Canvas {
        width: 320,
        height: 180,
    }));
    let c = s.insert(circle(1.0));
    s.add(&[c]).unwrap();
    (s, c)
}

#[test]
fn drift_is_inactive_before_attachment() {
    let (mut s, c) = scene_with_circle();
    let u = Attached {
        target: c,
        since_secs: 2.0,
        updater: Updater::Drift {
            velocity: Vec2::new(1.0, 0.0),
            wrap: None,
        },
    };
    u.apply(&mut s, 1.0).unwrap();
    assert_eq!(s.center(c).unwrap().x, 0.0);
    u.apply(&mut s, 3.5).unwrap();
    assert!((s.center(c).unwrap().x - 1.5).abs() < 1e-9);
}

#[test]
fn drift_wraps_per_axis() {
    assert!((wrap_axis(1.25, 2.0) + 0.75).abs() < 1e-12);
    assert!((wrap_axis(-0.5, 2.0) + 0.5).abs() < 1e-12);
    assert_eq!(wrap_axis(7.0, 0.0), 7.0);
}

#[test]
fn pulse_scales_each_leaf_about_its_center() {
    let (mut s, c) = scene_with_circle();
    let u = Attached {
        target: c,
        since_secs: 0.0,
        updater: Updater::Pulse {
            freq_hz: 1.0,
            amplitude: 0.5,
        },
    };
    // sin(2π * 0.25) = 1
    u.apply(&mut s, 0.25).unwrap();
    assert!((s.width(c).unwrap() - 3.0).abs() < 1e-6);
    assert!(s.center(c).unwrap().to_vec2().hypot() < 1e-9);
}

#[test]
fn hidden_targets_are_skipped() {
    let (mut s, c) = scene_with_circle();
    s.remove(&[c]).unwrap();
    let u = Attached {
        target: c,
        since_secs: 0.0,
        updater: Updater::Drift {
            velocity: Vec2::new(1.0, 1.0),
            wrap: None,
        },
    };
    u.apply(&mut s, 5.0).unwrap();
    assert_eq!(s.center(c).unwrap().x, 0.0);
}
