use super::*;
use crate::animation::anims::Animation;
use crate::animation::updater::Updater;
use crate::foundation::core::{Canvas, Fps, Vec2};
use crate::scene::director::Scene;
use crate::scene::shapes::{circle, rectangle};

fn scene() -> Scene {
    Scene::new(
        "sample",
        Canvas {
            width: 320,
            height: 180,
        },
        Fps::new(10, 1).unwrap(),
        0,
    )
}

#[test]
fn segment_start_is_base_and_end_is_next_base() {
    let mut s = scene();
    let a = s.insert(circle(1.0));
    s.add(&[a]).unwrap();
    s.play(vec![Animation::animate(a, move |st| st.shift(a, Vec2::new(2.0, 0.0)))])
        .unwrap();
    s.wait(1.0).unwrap();
    let tl = s.finish().unwrap();

    let start = tl.state_at(0.0).unwrap();
    assert_eq!(start, tl.segments[0].base);
    let end = tl.state_at(1.0).unwrap();
    assert_eq!(end, tl.segments[1].base);
    assert!((end.center(a).unwrap().x - 2.0).abs() < 1e-9);
}

#[test]
fn past_the_end_shows_final_state() {
    let mut s = scene();
    let a = s.insert(circle(1.0));
    s.play(vec![Animation::fade_in(a)]).unwrap();
    s.play(vec![Animation::fade_out(a)]).unwrap();
    let tl = s.finish().unwrap();
    assert!(tl.sample(5.0).unwrap().items.is_empty());
    assert_eq!(tl.sample(1.0).unwrap().items.len(), 1);
}

#[test]
fn invisible_leaves_are_not_drawn() {
    let mut s = scene();
    let a = s.insert(rectangle(1.0, 1.0));
    s.play(vec![Animation::fade_in(a)]).unwrap();
    let tl = s.finish().unwrap();
    assert!(tl.sample_frame(FrameIndex(0)).unwrap().items.is_empty());
    assert_eq!(tl.sample_frame(FrameIndex(5)).unwrap().items.len(), 1);
}

#[test]
fn updaters_use_absolute_time() {
    let mut s = scene();
    let a = s.insert(circle(1.0));
    s.add(&[a]).unwrap();
    s.wait(1.0).unwrap();
    s.add_updater(
        a,
        Updater::Drift {
            velocity: Vec2::new(1.0, 0.0),
            wrap: None,
        },
    )
    .unwrap();
    s.wait(2.0).unwrap();
    let tl = s.finish().unwrap();
    assert!(tl.state_at(0.5).unwrap().center(a).unwrap().x.abs() < 1e-9);
    assert!((tl.state_at(2.5).unwrap().center(a).unwrap().x - 1.5).abs() < 1e-9);
}
