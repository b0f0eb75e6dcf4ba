use super::*;
use crate::foundation::core::Canvas;
use crate::foundation::frame::{SceneFrame, UP};
use crate::scene::mobject::Geometry;
use crate::scene::shapes::{circle, line, rectangle};

fn state() -> SceneState {
    SceneState::new(SceneFrame::for_canvas(Canvas {
        width: 640,
        height: 360,
    }))
}

fn resolve_one(base: &SceneState, anim: Animation) -> (Vec<Track>, SceneState) {
    let mut r = Resolver::new(base.clone());
    r.resolve(anim, 0.0, 1.0, None).unwrap();
    r.finish().unwrap()
}

fn sampled(base: &SceneState, tracks: &[Track], alpha: f64) -> SceneState {
    let mut s = base.clone();
    for t in tracks {
        t.apply(&mut s, alpha).unwrap();
    }
    s
}

#[test]
fn fade_in_ramps_opacity_and_arrives_from_shift() {
    let mut base = state();
    let c = base.insert(circle(1.0));
    base.add(&[c]).unwrap();
    let (tracks, end) = resolve_one(&base, Animation::fade_in(c).shift(UP).rate(RateFunc::Linear));

    let s = sampled(&base, &tracks, 0.5);
    assert!((s.leaf(c).unwrap().opacity - 0.5).abs() < 1e-9);
    assert!((s.center(c).unwrap().y + 0.5).abs() < 1e-9);

    let s1 = sampled(&base, &tracks, 1.0);
    assert_eq!(s1.leaf(c).unwrap(), end.leaf(c).unwrap());
}

#[test]
fn fade_out_removes_at_finish_but_keeps_leaf() {
    let mut base = state();
    let c = base.insert(circle(1.0));
    base.add(&[c]).unwrap();
    let (_, end) = resolve_one(&base, Animation::fade_out(c));
    assert!(end.mobjects().is_empty());
    assert_eq!(end.leaf(c).unwrap().opacity, 1.0);
}

#[test]
fn create_staggers_leaves() {
    let mut base = state();
    let a = base.insert(line(Point::ORIGIN, Point::new(1.0, 0.0)));
    let b = base.insert(line(Point::ORIGIN, Point::new(0.0, 1.0)));
    let g = base.group(&[a, b]).unwrap();
    base.add(&[g]).unwrap();
    let (tracks, _) = resolve_one(&base, Animation::create(g).rate(RateFunc::Linear));

    let s = sampled(&base, &tracks, 0.25);
    assert!((s.leaf(a).unwrap().reveal - 0.5).abs() < 1e-9);
    assert_eq!(s.leaf(b).unwrap().reveal, 0.0);

    let s = sampled(&base, &tracks, 0.75);
    assert_eq!(s.leaf(a).unwrap().reveal, 1.0);
    assert!((s.leaf(b).unwrap().reveal - 0.5).abs() < 1e-9);
}

#[test]
fn flash_lines_exist_only_mid_flight() {
    let base = state();
    let (tracks, end) = resolve_one(&base, Animation::flash_at(Point::ORIGIN).num_lines(8));
    assert!(end.mobjects().is_empty());
    assert!(sampled(&base, &tracks, 0.0).mobjects().is_empty());
    assert!(sampled(&base, &tracks, 1.0).mobjects().is_empty());

    let mid = sampled(&base, &tracks, 0.5);
    assert_eq!(mid.displayed_leaves().unwrap().len(), 8);
}

#[test]
fn animate_calls_merge_into_one_morph() {
    let mut base = state();
    let c = base.insert(circle(1.0));
    base.add(&[c]).unwrap();
    let mut r = Resolver::new(base.clone());
    r.resolve(
        Animation::animate(c, move |s| s.shift(c, Vec2::new(2.0, 0.0))),
        0.0,
        1.0,
        None,
    )
    .unwrap();
    r.resolve(
        Animation::animate(c, move |s| s.set_opacity(c, 0.5)),
        0.0,
        1.0,
        None,
    )
    .unwrap();
    let (tracks, end) = r.finish().unwrap();
    assert_eq!(tracks.len(), 1);
    assert!((end.center(c).unwrap().x - 2.0).abs() < 1e-9);
    assert_eq!(end.leaf(c).unwrap().opacity, 0.5);

    let s = sampled(&base, &tracks, 1.0);
    assert_eq!(s.leaf(c).unwrap(), end.leaf(c).unwrap());
}

#[test]
fn transform_replaces_source_with_target_copy() {
    let mut base = state();
    let src = base.insert(Leaf::text("3", 52.0));
    let dst = base.insert(Leaf::text("4", 52.0));
    base.add(&[src]).unwrap();
    let (tracks, end) = resolve_one(&base, Animation::transform(src, dst));

    let leaves = end.leaves(src).unwrap();
    assert_eq!(leaves.len(), 1);
    let Geometry::Text(t) = &end.leaf(leaves[0]).unwrap().geometry else {
        panic!("expected text");
    };
    assert_eq!(t.content, "4");
    assert!(!end.is_displayed(dst));

    let mid = sampled(&base, &tracks, 0.5);
    assert_eq!(mid.displayed_leaves().unwrap().len(), 2);
}

#[test]
fn transform_without_geometry_is_an_error() {
    let mut base = state();
    let a = base.insert(circle(1.0));
    let empty = base.group(&[]).unwrap();
    let mut r = Resolver::new(base);
    let err = r
        .resolve(Animation::transform(a, empty), 0.0, 1.0, None)
        .unwrap_err();
    assert!(err.to_string().starts_with("animation error:"));
}

#[test]
fn rotate_commits_full_angle() {
    let mut base = state();
    let r = base.insert(rectangle(2.0, 1.0));
    base.add(&[r]).unwrap();
    let (tracks, end) = resolve_one(
        &base,
        Animation::rotate(r, std::f64::consts::FRAC_PI_2).rate(RateFunc::Linear),
    );
    assert!((end.width(r).unwrap() - 1.0).abs() < 1e-9);
    let s = sampled(&base, &tracks, 1.0);
    assert!((s.width(r).unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn lagged_start_scales_sub_windows() {
    let mut base = state();
    let a = base.insert(circle(1.0));
    let b = base.insert(circle(1.0));
    base.add(&[a, b]).unwrap();
    let (tracks, _) = resolve_one(
        &base,
        Animation::lagged_start(vec![Animation::fade_in(a), Animation::fade_in(b)], 0.5),
    );
    assert_eq!(tracks.len(), 2);
    assert!((tracks[0].end - 1.0 / 1.5).abs() < 1e-9);
    assert!((tracks[1].start - 0.5 / 1.5).abs() < 1e-9);
    assert_eq!(tracks[1].end, 1.0);
}

#[test]
fn absolute_tracks_run_before_relative_ones() {
    let mut base = state();
    let a = base.insert(circle(1.0));
    base.add(&[a]).unwrap();
    let mut r = Resolver::new(base.clone());
    r.resolve(Animation::fade_in(a), 0.0, 1.0, None).unwrap();
    r.resolve(
        Animation::animate(a, move |s| s.shift(a, Vec2::new(1.0, 0.0))),
        0.0,
        1.0,
        None,
    )
    .unwrap();
    let (tracks, _) = r.finish().unwrap();
    assert!(tracks[0].effect.is_absolute());

    let mid = sampled(&base, &tracks, 0.5);
    assert!(mid.leaf(a).unwrap().opacity < 1.0);
}

#[test]
fn wave_returns_to_rest() {
    let mut base = state();
    let l = base.insert(line(Point::new(-1.0, 0.0), Point::new(1.0, 0.0)));
    // straight two-point lines still bend
    base.add(&[l]).unwrap();
    let (tracks, _) = resolve_one(&base, Animation::apply_wave(l));
    let mid = sampled(&base, &tracks, 0.5);
    assert!(mid.bounding_box(l).unwrap().height() > 0.05);
    let end = sampled(&base, &tracks, 1.0);
    assert!(end.bounding_box(l).unwrap().height() < 1e-9);
}

#[test]
fn there_and_back_morph_commits_the_start_state() {
    let mut base = state();
    let c = base.insert(circle(1.0));
    base.add(&[c]).unwrap();
    let mut r = Resolver::new(base.clone());
    r.resolve(
        Animation::animate(c, move |s| s.shift(c, Vec2::new(4.0, 0.0))),
        0.0,
        1.0,
        Some(RateFunc::ThereAndBack),
    )
    .unwrap();
    let (tracks, end) = r.finish().unwrap();

    assert!((sampled(&base, &tracks, 0.5).center(c).unwrap().x - 4.0).abs() < 1e-9);
    assert_eq!(end.leaf(c).unwrap(), base.leaf(c).unwrap());
    assert_eq!(sampled(&base, &tracks, 1.0).leaf(c).unwrap(), end.leaf(c).unwrap());
}

#[test]
fn there_and_back_rotation_ends_unrotated() {
    let mut base = state();
    let r = base.insert(rectangle(2.0, 1.0));
    base.add(&[r]).unwrap();
    let (tracks, end) = resolve_one(
        &base,
        Animation::rotate(r, std::f64::consts::FRAC_PI_2).rate(RateFunc::ThereAndBack),
    );
    assert!((end.width(r).unwrap() - 2.0).abs() < 1e-9);
    assert!((sampled(&base, &tracks, 0.5).width(r).unwrap() - 1.0).abs() < 1e-9);
    assert!((sampled(&base, &tracks, 1.0).width(r).unwrap() - 2.0).abs() < 1e-9);
}

#[test]
fn there_and_back_fade_out_keeps_target_displayed() {
    let mut base = state();
    let c = base.insert(circle(1.0));
    base.add(&[c]).unwrap();
    let (_, end) = resolve_one(&base, Animation::fade_out(c).rate(RateFunc::ThereAndBack));
    assert!(end.is_displayed(c));
}

#[test]
fn animate_after_transform_retargets_the_transform() {
    let mut base = state();
    let a = base.insert(circle(1.0));
    let b = base.insert(circle(1.0));
    base.shift(b, Vec2::new(0.0, 2.0)).unwrap();
    base.add(&[a]).unwrap();
    let mut r = Resolver::new(base.clone());
    r.resolve(Animation::transform(a, b), 0.0, 1.0, Some(RateFunc::Linear))
        .unwrap();
    r.resolve(
        Animation::animate(a, move |s| s.shift(a, Vec2::new(2.0, 0.0))),
        0.0,
        1.0,
        Some(RateFunc::Linear),
    )
    .unwrap();
    let (tracks, end) = r.finish().unwrap();
    assert_eq!(tracks.len(), 1);

    let mid = sampled(&base, &tracks, 0.5).center(a).unwrap();
    assert!((mid.x - 1.0).abs() < 1e-9 && (mid.y - 1.0).abs() < 1e-9);
    let last = sampled(&base, &tracks, 1.0).center(a).unwrap();
    let committed = end.center(a).unwrap();
    assert!((last.x - 2.0).abs() < 1e-9 && (last.y - 2.0).abs() < 1e-9);
    assert!((committed - last).hypot() < 1e-9);
}

#[test]
fn animate_after_group_transform_keeps_every_pair() {
    let mut base = state();
    let a = base.insert(circle(1.0));
    let b1 = base.insert(circle(0.5));
    let b2 = base.insert(rectangle(1.0, 1.0));
    let b = base.group(&[b1, b2]).unwrap();
    base.add(&[a]).unwrap();
    let mut r = Resolver::new(base.clone());
    r.resolve(Animation::transform(a, b), 0.0, 1.0, None).unwrap();
    r.resolve(
        Animation::animate(a, move |s| s.shift(a, Vec2::new(3.0, 0.0))),
        0.0,
        1.0,
        None,
    )
    .unwrap();
    let (tracks, end) = r.finish().unwrap();
    assert_eq!(tracks.len(), 1);
    let Effect::Transform { pairs, .. } = &tracks[0].effect else {
        panic!("expected transform");
    };
    assert_eq!(pairs.len(), 2);

    let s = sampled(&base, &tracks, 1.0);
    assert!((s.center(a).unwrap().x - 3.0).abs() < 1e-9);
    assert!((end.center(a).unwrap().x - 3.0).abs() < 1e-9);
}
