use super::*;
use crate::style::color::BLACK;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(30, 1).unwrap(),
        background: BLACK,
    }
}

#[test]
fn flatten_premul_alpha_0_returns_bg() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_premul_alpha_255_is_identity() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn flatten_half_alpha_blends() {
    let src = vec![128u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [0, 0, 254, 255]).unwrap();
    assert_eq!(dst, vec![128, 0, 127, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &[0u8; 4], [0, 0, 0, 255]).is_err());
}

#[test]
fn mp4_geometry_must_be_even_and_non_zero() {
    assert!(validate_mp4_config(&cfg(64, 36)).is_ok());
    assert!(validate_mp4_config(&cfg(0, 36)).is_err());
    assert!(validate_mp4_config(&cfg(63, 36)).is_err());
    assert!(validate_mp4_config(&cfg(64, 35)).is_err());
}

#[test]
fn frame_order_must_strictly_increase() {
    assert!(check_frame_order(None, FrameIndex(5)).is_ok());
    assert!(check_frame_order(Some(FrameIndex(5)), FrameIndex(6)).is_ok());
    assert!(check_frame_order(Some(FrameIndex(5)), FrameIndex(5)).is_err());
    assert!(check_frame_order(Some(FrameIndex(5)), FrameIndex(2)).is_err());
}

#[test]
fn push_before_begin_is_an_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    let err = sink.push_frame(FrameIndex(0), &frame).unwrap_err();
    assert!(err.to_string().contains("not started"));
    assert!(sink.end().is_err());
}

#[test]
fn odd_canvas_fails_before_spawning() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(dir.path().join("out.mp4")));
    let err = sink.begin(cfg(15, 16)).unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}

#[test]
fn ensure_parent_dir_creates_nested_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("a/b/c.mp4");
    ensure_parent_dir(&target).unwrap();
    assert!(dir.path().join("a/b").is_dir());
    ensure_parent_dir(Path::new("bare.mp4")).unwrap();
}
