use super::*;
use crate::scene::mobject::Geometry;
use crate::scene::shapes::circle;
use crate::style::color::WHITE;
use crate::timeline::sample::FrameState;

/// 64x36 at 10 fps keeps the recordings cheap.
pub(crate) fn tiny() -> SceneConfig {
    SceneConfig {
        canvas: Canvas {
            width: 64,
            height: 36,
        },
        fps: Fps { num: 10, den: 1 },
        seed: 0,
    }
}

/// Contents of every visible text leaf, in draw order.
pub(crate) fn texts(fs: &FrameState) -> Vec<String> {
    fs.items
        .iter()
        .filter_map(|l| match &l.geometry {
            Geometry::Text(t) => Some(t.content.clone()),
            Geometry::Path(_) => None,
        })
        .collect()
}

#[test]
fn every_scene_records_a_valid_timeline() {
    for id in SceneId::all() {
        let tl = id.build(&tiny()).unwrap();
        tl.validate().unwrap();
        assert_eq!(tl.title, id.title());
        assert_eq!(tl.canvas(), tiny().canvas);
        assert!(tl.duration_frames() >= (tl.duration_secs() * 10.0).floor() as u64);
    }
}

#[test]
fn names_match_between_display_and_serde() {
    for id in SceneId::all() {
        let json = serde_json::to_string(id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: SceneId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, *id);
    }
    assert_eq!(SceneId::StReveal.to_string(), "st_reveal");
    assert_eq!(SceneId::RaceCondition.to_string(), "race_condition");
}

#[test]
fn titles_are_distinct() {
    let mut titles: Vec<_> = SceneId::all().iter().map(|id| id.title()).collect();
    titles.sort_unstable();
    titles.dedup();
    assert_eq!(titles.len(), SceneId::all().len());
}

#[test]
fn config_comes_from_render_config() {
    let rc = RenderConfig {
        width: 320,
        height: 180,
        fps_num: 24,
        seed: 9,
        ..RenderConfig::default()
    };
    let cfg = SceneConfig::from_render_config(&rc).unwrap();
    assert_eq!(
        cfg.canvas,
        Canvas {
            width: 320,
            height: 180
        }
    );
    assert_eq!(cfg.fps, Fps { num: 24, den: 1 });
    assert_eq!(cfg.seed, 9);
    assert_eq!(SceneConfig::default().canvas.width, 1280);
}

#[test]
fn label_uses_the_main_face() {
    let l = label("hi", 20.0, WHITE);
    match l.geometry {
        Geometry::Text(t) => assert_eq!(t.family.as_deref(), Some(MAIN_FONT)),
        Geometry::Path(_) => panic!("label is text"),
    }
}

#[test]
fn top_level_skips_nested_ids() {
    let mut s = tiny().scene("t");
    let a = s.insert(circle(1.0));
    let b = s.insert(circle(0.5));
    let g = s.group(&[a, b]).unwrap();
    let c = s.insert(circle(0.2));
    s.add(&[a, g, c]).unwrap();
    assert_eq!(top_level(&s).unwrap(), vec![g, c]);
}
