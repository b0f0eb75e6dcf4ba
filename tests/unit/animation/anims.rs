use super::*;

fn id(n: usize) -> MobjectId {
    MobjectId(n)
}

#[test]
fn default_run_time_is_one_second() {
    assert_eq!(Animation::fade_in(id(0)).natural_run_time(), 1.0);
    assert_eq!(Animation::write(id(0)).run_time(0.8).natural_run_time(), 0.8);
}

#[test]
fn apply_wave_defaults_to_two_seconds() {
    assert_eq!(Animation::apply_wave(id(0)).natural_run_time(), 2.0);
}

#[test]
fn lagged_start_spans_overlapping_windows() {
    let anims = vec![
        Animation::fade_in(id(0)),
        Animation::fade_in(id(1)),
        Animation::fade_in(id(2)),
    ];
    let w = lagged_windows(&anims, 0.25);
    assert_eq!(w, vec![(0.0, 1.0), (0.25, 1.25), (0.5, 1.5)]);
    assert_eq!(Animation::lagged_start(anims, 0.25).natural_run_time(), 1.5);
}

#[test]
fn setters_only_apply_to_matching_kinds() {
    let a = Animation::fade_in(id(0)).num_lines(40).about(Point::ORIGIN);
    assert_eq!(a.name(), "FadeIn");
    let AnimKind::FadeIn { shift, scale, .. } = a.kind else {
        panic!("kind changed");
    };
    assert_eq!(shift, Vec2::ZERO);
    assert_eq!(scale, 1.0);

    let f = Animation::flash(id(3)).num_lines(20).flash_radius(1.5);
    let AnimKind::Flash {
        num_lines,
        flash_radius,
        line_length,
        ..
    } = f.kind
    else {
        panic!("expected flash");
    };
    assert_eq!(num_lines, 20);
    assert_eq!(flash_radius, 1.5);
    assert_eq!(line_length, 0.2);
}

#[test]
fn indicate_defaults_to_there_and_back() {
    let a = Animation::indicate(id(0));
    assert_eq!(a.rate, Some(RateFunc::ThereAndBack));
    assert_eq!(a.kind.target(), Some(id(0)));
}

#[test]
fn introducers_are_the_reveal_family() {
    assert!(Animation::create(id(0)).kind.is_introducer());
    assert!(!Animation::fade_out(id(0)).kind.is_introducer());
    assert!(!Animation::transform(id(0), id(1)).kind.is_introducer());
}
