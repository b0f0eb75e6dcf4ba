use super::*;

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(4)).is_err());
    let r = FrameRange::new(FrameIndex(2), FrameIndex(6)).unwrap();
    assert_eq!(r.len_frames(), 4);
    assert!(r.contains(FrameIndex(2)));
    assert!(!r.contains(FrameIndex(6)));
    assert_eq!(r.clamp(FrameIndex(100)), FrameIndex(5));
    assert_eq!(r.clamp(FrameIndex(0)), FrameIndex(2));
}

#[test]
fn empty_range_clamps_to_start() {
    let r = FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap();
    assert!(r.is_empty());
    assert_eq!(r.clamp(FrameIndex(9)), FrameIndex(3));
}

#[test]
fn fps_validation_and_conversions() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());

    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_floor(1.0), 30);
    assert_eq!(fps.secs_to_frames_ceil(0.5), 15);
    assert_eq!(fps.secs_to_frames_ceil(0.51), 16);
    assert!((fps.frames_to_secs(15) - 0.5).abs() < 1e-12);

    let ntsc = Fps::new(30_000, 1001).unwrap();
    assert!((ntsc.as_f64() - 29.97).abs() < 0.01);
}

#[test]
fn ceil_tolerates_summed_decimal_durations() {
    let fps = Fps::new(30, 1).unwrap();
    let secs = 0.1 + 0.2 + 0.3 + 0.4;
    assert_eq!(fps.secs_to_frames_ceil(secs), 30);
}
