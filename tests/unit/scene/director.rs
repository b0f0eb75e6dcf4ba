use super::*;
use crate::foundation::frame::RIGHT;
use crate::scene::shapes::circle;

fn scene() -> Scene {
    Scene::new(
        "test",
        Canvas {
            width: 320,
            height: 180,
        },
        Fps::new(30, 1).unwrap(),
        7,
    )
}

#[test]
fn play_without_animations_is_an_error() {
    let mut s = scene();
    let err = s.play(vec![]).unwrap_err();
    assert!(err.to_string().starts_with("animation error:"));
}

#[test]
fn non_positive_run_times_are_rejected() {
    let mut s = scene();
    let c = s.insert(circle(1.0));
    assert!(s.play_for(0.0, vec![Animation::fade_in(c)]).is_err());
    assert!(s.play(vec![Animation::fade_in(c).run_time(-1.0)]).is_err());
    assert!(s.wait(-0.5).is_err());
}

#[test]
fn play_lasts_as_long_as_longest_animation() {
    let mut s = scene();
    let a = s.insert(circle(1.0));
    let b = s.insert(circle(0.5));
    s.play(vec![
        Animation::fade_in(a).run_time(0.5),
        Animation::fade_in(b).run_time(2.0),
    ])
    .unwrap();
    s.wait(1.0).unwrap();
    s.wait(0.0).unwrap();
    assert_eq!(s.time(), 3.0);

    let tl = s.finish().unwrap();
    assert_eq!(tl.segments.len(), 2);
    assert_eq!(tl.segments[0].tracks[0].end, 0.25);
    assert!(tl.segments[1].is_wait());
}

#[test]
fn introducers_add_and_fade_out_removes() {
    let mut s = scene();
    let a = s.insert(circle(1.0));
    s.play(vec![Animation::create(a)]).unwrap();
    assert_eq!(s.mobjects(), &[a]);
    s.play(vec![Animation::fade_out(a)]).unwrap();
    assert!(s.mobjects().is_empty());
}

#[test]
fn animate_targets_are_displayed_and_mutated() {
    let mut s = scene();
    let a = s.insert(circle(1.0));
    s.play(vec![Animation::animate(a, move |st| st.shift(a, RIGHT))])
        .unwrap();
    assert!(s.is_displayed(a));
    assert!((s.center(a).unwrap().x - 1.0).abs() < 1e-9);
}

#[test]
fn flash_does_not_touch_the_display_list() {
    let mut s = scene();
    let a = s.insert(circle(1.0));
    s.play(vec![Animation::flash(a)]).unwrap();
    assert!(s.mobjects().is_empty());
}

#[test]
fn rng_streams_are_deterministic() {
    let s = scene();
    let mut a = s.rng(1);
    let mut b = s.rng(1);
    let mut c = s.rng(2);
    let x = a.next_u64();
    assert_eq!(x, b.next_u64());
    assert_ne!(x, c.next_u64());
}

#[test]
fn updaters_need_known_targets() {
    let mut s = scene();
    let err = s
        .add_updater(
            MobjectId(99),
            Updater::Pulse {
                freq_hz: 1.0,
                amplitude: 0.1,
            },
        )
        .unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}
