//! Race condition on a rate-limit counter, then the same counter guarded by an atomic script.
//!
//! Act one lets two requests read-then-increment through a gap and break the limit. Act two
//! runs increment, check and rollback as one block and the counter stays within the limit.

use std::f64::consts::TAU;

use crate::{
    animation::anims::Animation,
    animation::updater::Updater,
    foundation::core::{Point, Vec2},
    foundation::error::StoryResult,
    foundation::frame::{DL, DOWN, DR, LEFT, RIGHT, UL, UP, UR, pt},
    scene::director::Scene,
    scene::mobject::{Leaf, MobjectId},
    scene::shapes::{circle, line, rectangle, rounded_rectangle},
    scene::state::SceneState,
    scenes::{SceneConfig, SceneId, top_level},
    style::color::Color,
    timeline::model::Timeline,
};

const LIMIT: &str = "LIMIT: 5";
const PULSE_RATE: f64 = 0.8;

struct Palette {
    bg: Color,
    primary: Color,
    secondary: Color,
    accent: Color,
    warning: Color,
    text: Color,
}

impl Palette {
    fn new() -> StoryResult<Self> {
        Ok(Self {
            bg: Color::hex("#0f1419")?,
            primary: Color::hex("#3b82f6")?,
            secondary: Color::hex("#10b981")?,
            accent: Color::hex("#ef4444")?,
            warning: Color::hex("#f59e0b")?,
            text: Color::hex("#f3f4f6")?,
        })
    }
}

fn text(content: &str, size: f64, color: Color) -> Leaf {
    Leaf::text(content, size).color(color)
}

struct Counter {
    ring: MobjectId,
    value: MobjectId,
    caption: MobjectId,
    group: MobjectId,
}

/// Circle with a big number and a "COUNTER" caption, centered on `at`.
fn counter(st: &mut SceneState, p: &Palette, value: &str, at: Point) -> StoryResult<Counter> {
    let ring = st.insert(
        circle(0.8)
            .color(p.primary)
            .fill_opacity(0.2)
            .stroke_width(3.0),
    );
    let value = st.insert(text(value, 52.0, p.primary));
    let caption = st.insert(text("COUNTER", 20.0, p.text));
    st.next_to(caption, ring, UP, 0.2)?;
    let group = st.group(&[ring, value, caption])?;
    st.move_to(group, at)?;
    Ok(Counter {
        ring,
        value,
        caption,
        group,
    })
}

/// Number leaf sitting on the counter ring, for `Transform` targets.
fn digit(st: &mut SceneState, c: &Counter, value: &str, color: Color) -> StoryResult<MobjectId> {
    let d = st.insert(text(value, 52.0, color));
    let at = st.center(c.ring)?;
    st.move_to(d, at)?;
    Ok(d)
}

/// "LIMIT" pill under the counter.
fn limit_pill(st: &mut SceneState, p: &Palette, c: &Counter) -> StoryResult<MobjectId> {
    let bg = st.insert(
        rounded_rectangle(2.0, 0.6, 0.2)
            .color(p.secondary)
            .fill_opacity(0.2)
            .stroke_width(2.0),
    );
    let caption = st.insert(text(LIMIT, 22.0, p.secondary));
    let g = st.group(&[bg, caption])?;
    st.next_to(g, c.group, DOWN, 0.4)?;
    Ok(g)
}

/// Request card `[bg, [arrow, caption]]` centered on `at`; returns `(bg, card)`.
fn request(
    st: &mut SceneState,
    p: &Palette,
    n: u32,
    color: Color,
    at: Point,
) -> StoryResult<(MobjectId, MobjectId)> {
    let bg = st.insert(
        rounded_rectangle(2.8, 1.2, 0.15)
            .color(color)
            .fill_opacity(0.25)
            .stroke_width(4.0),
    );
    let caption = st.insert(text(&format!("Request {n}"), 26.0, p.text).bold());
    let arrow = st.insert(text("→", 36.0, color));
    st.next_to(arrow, caption, LEFT, 0.2)?;
    let content = st.group(&[arrow, caption])?;
    let c = st.center(bg)?;
    st.move_to(content, c)?;
    let card = st.group(&[bg, content])?;
    st.move_to(card, at)?;
    Ok((bg, card))
}

/// Corner-to-corner stroke over `over`, half of an X.
fn slash(
    st: &mut SceneState,
    over: MobjectId,
    from: Vec2,
    to: Vec2,
    color: Color,
) -> StoryResult<MobjectId> {
    let a = st.corner(over, from)?;
    let b = st.corner(over, to)?;
    Ok(st.insert(line(a, b).color(color).stroke_width(6.0)))
}

fn background(s: &mut Scene, p: &Palette) -> StoryResult<()> {
    let mut grid = Vec::new();
    for i in (-8..=8).step_by(2) {
        let x = f64::from(i);
        grid.push(s.insert(
            line(pt(x, -5.0), pt(x, 5.0)).stroke(p.primary, 0.5, 0.08),
        ));
        let y = x / 2.0;
        grid.push(s.insert(
            line(pt(-14.0, y), pt(14.0, y)).stroke(p.primary, 0.5, 0.08),
        ));
    }
    let grid = s.group(&grid)?;

    let mut rings = Vec::new();
    for (x, y) in [(4.0, 2.0), (-5.0, -1.5), (3.0, -2.5), (-4.0, 1.8)] {
        let r = s.insert(circle(1.5).stroke(p.secondary, 1.0, 0.06));
        s.move_to(r, pt(x, y))?;
        rings.push(r);
    }
    let rings = s.group(&rings)?;

    s.add(&[grid, rings])?;
    s.add_updater(
        grid,
        Updater::Drift {
            velocity: Vec2::new(0.008, -0.005),
            wrap: Some(Vec2::new(2.0, 2.0)),
        },
    )?;
    s.add_updater(
        rings,
        Updater::Pulse {
            freq_hz: PULSE_RATE / TAU,
            amplitude: 0.03,
        },
    )
}

/// Bold title at the top, written under a wide flash.
fn headline(s: &mut Scene, title: MobjectId, run_time: f64, flash: Animation) -> StoryResult<()> {
    s.to_edge(title, UP, 0.4)?;
    s.play_for(
        run_time,
        vec![
            Animation::write(title),
            flash.num_lines(20).flash_radius(1.5),
        ],
    )?;
    s.wait(0.3)
}

fn resize_ring(ring: MobjectId, factor: f64, color: Option<Color>) -> Animation {
    Animation::animate(ring, move |st| {
        st.scale(ring, factor)?;
        match color {
            Some(c) => st.set_color(ring, c),
            None => Ok(()),
        }
    })
}

fn recolor(id: MobjectId, c: Color) -> Animation {
    Animation::animate(id, move |st| st.set_color(id, c))
}

fn problem(s: &mut Scene, p: &Palette) -> StoryResult<()> {
    let title = s.insert(text("Race Condition Problem", 44.0, p.text).bold());
    headline(
        s,
        title,
        0.8,
        Animation::flash(title).color(p.primary).line_length(0.3),
    )?;

    let c = counter(s, p, "3", pt(0.0, 2.2))?;
    let limit = limit_pill(s, p, &c)?;
    s.play_for(
        0.7,
        vec![
            Animation::grow_from_center(c.ring),
            Animation::fade_in(c.value).scale(0.5),
            Animation::write(c.caption),
        ],
    )?;
    s.play(vec![Animation::fade_in(limit).shift(UP * 0.2).run_time(0.5)])?;
    s.wait(0.2)?;

    let (req1_bg, req1) = request(s, p, 1, p.primary, pt(-4.0, -0.8))?;
    let (req2_bg, req2) = request(s, p, 2, p.secondary, pt(4.0, -0.8))?;
    s.play(vec![Animation::fade_in(req1).shift(RIGHT * 0.5).run_time(0.6)])?;
    s.play(vec![Animation::fade_in(req2).shift(LEFT * 0.5).run_time(0.6)])?;
    s.wait(0.2)?;

    // Request 1 reads and increments
    let action1 = s.insert(text("INCREMENT", 20.0, p.primary).bold());
    s.next_to(action1, req1, DOWN, 0.4)?;
    s.play_for(
        0.5,
        vec![Animation::write(action1), recolor(req1_bg, p.warning)],
    )?;

    let (from, to) = (s.top(req1)?, s.bottom(c.group)?);
    let line1 = s.insert(line(from, to).color(p.primary).stroke_width(3.0));
    s.play(vec![Animation::create(line1).run_time(0.3)])?;

    let four = digit(s, &c, "4", p.primary)?;
    s.play_for(
        0.5,
        vec![
            Animation::transform(c.value, four),
            Animation::flash(c.ring).color(p.primary).num_lines(12),
            resize_ring(c.ring, 1.15, Some(p.warning)),
        ],
    )?;
    s.play(vec![resize_ring(c.ring, 1.0 / 1.15, Some(p.primary)).run_time(0.3)])?;
    s.play(vec![Animation::fade_out(line1).run_time(0.2)])?;
    s.wait(0.15)?;

    // The gap between read and check
    let gap = s.insert(
        rectangle(12.0, 1.5)
            .color(p.warning)
            .fill_opacity(0.3)
            .stroke_width(0.0),
    );
    s.move_to(gap, pt(0.0, 0.5))?;
    let gap_text = s.insert(text("THE GAP", 36.0, p.warning).bold());
    let gc = s.center(gap)?;
    s.move_to(gap_text, gc)?;
    s.play_for(
        0.6,
        vec![Animation::fade_in(gap).scale(1.2), Animation::write(gap_text)],
    )?;

    let gap_bottom = s.bottom(gap)?;
    let mut arrows = Vec::with_capacity(2);
    for (from, side) in [(pt(-2.5, -1.0), LEFT), (pt(2.5, -1.0), RIGHT)] {
        let a = s.arrow(from, gap_bottom + side, 0.25)?;
        s.set_color(a, p.warning)?;
        let shaft = s.child(a, 0)?;
        s.set_stroke_width(shaft, 5.0)?;
        arrows.push(a);
    }
    s.play_for(0.4, arrows.iter().map(|a| Animation::create(*a)).collect())?;
    s.wait(0.2)?;

    // Request 2 sneaks in
    let action2 = s.insert(text("SNEAK IN!", 20.0, p.accent).bold());
    s.next_to(action2, req2, DOWN, 0.4)?;
    s.play_for(
        0.5,
        vec![
            Animation::write(action2),
            recolor(req2_bg, p.accent),
            Animation::animate(req2, move |st| st.shift(req2, UP * 0.1)),
        ],
    )?;
    s.play(vec![
        Animation::animate(req2, move |st| st.shift(req2, DOWN * 0.1)).run_time(0.2),
    ])?;

    let (from, to) = (s.top(req2)?, s.bottom(c.group)?);
    let line2 = s.insert(line(from, to).color(p.secondary).stroke_width(3.0));
    s.play(vec![Animation::create(line2).run_time(0.3)])?;

    let five = digit(s, &c, "5", p.secondary)?;
    s.play_for(
        0.5,
        vec![
            Animation::transform(c.value, five),
            Animation::flash(c.ring).color(p.secondary).num_lines(12),
            resize_ring(c.ring, 1.15, Some(p.accent)),
        ],
    )?;
    s.play(vec![resize_ring(c.ring, 1.0 / 1.15, None).run_time(0.3)])?;
    s.play(vec![Animation::fade_out(line2).run_time(0.2)])?;
    s.wait(0.15)?;

    // Request 1 checks too late
    let check = s.insert(text("CHECK & GO!", 20.0, p.accent).bold());
    let ac = s.center(action1)?;
    s.move_to(check, ac)?;
    s.play(vec![Animation::transform(action1, check).run_time(0.4)])?;

    let six = digit(s, &c, "6", p.accent)?;
    s.play_for(
        0.6,
        vec![
            Animation::transform(c.value, six),
            recolor(c.ring, p.accent),
            Animation::flash(c.ring)
                .color(p.accent)
                .num_lines(20)
                .line_length(0.6),
        ],
    )?;

    let error = s.insert(text("LIMIT BROKEN!", 38.0, p.accent).bold());
    s.move_to(error, pt(0.0, -2.5))?;
    let cross1 = slash(s, error, UL, DR, p.accent)?;
    let cross2 = slash(s, error, UR, DL, p.accent)?;
    s.play_for(
        0.8,
        vec![
            Animation::write(error),
            Animation::create(cross1),
            Animation::create(cross2),
            Animation::flash(error)
                .color(p.accent)
                .num_lines(16)
                .line_length(0.8),
        ],
    )?;
    s.wait(0.6)?;

    let everything = top_level(s)?;
    s.play_for(
        0.9,
        everything
            .into_iter()
            .map(|id| Animation::fade_out(id).shift(DOWN * 0.5))
            .collect(),
    )?;
    s.wait(0.4)
}

fn solution(s: &mut Scene, p: &Palette) -> StoryResult<()> {
    let title = s.insert(text("Atomic Operation Solution", 44.0, p.secondary).bold());
    headline(s, title, 0.9, Animation::flash(title).color(p.secondary))?;

    let c = counter(s, p, "4", pt(0.0, 2.5))?;
    let limit = limit_pill(s, p, &c)?;
    s.play_for(
        0.8,
        vec![
            Animation::grow_from_center(c.ring),
            Animation::fade_in(c.value).scale(0.5),
            Animation::write(c.caption),
            Animation::fade_in(limit).shift(UP * 0.2),
        ],
    )?;
    s.wait(0.2)?;

    // The atomic block
    let block = s.insert(
        rounded_rectangle(7.0, 4.0, 0.25)
            .color(p.secondary)
            .fill_opacity(0.1)
            .stroke_width(5.0),
    );
    s.move_to(block, pt(0.0, -0.5))?;
    let star = s.insert(text("*", 40.0, p.secondary).bold());
    let script = s.insert(text("LUA SCRIPT", 28.0, p.secondary).bold());
    let badge = s.insert(text("ATOMIC", 20.0, p.warning).bold());
    let heading = s.group(&[star, script, badge])?;
    s.arrange(heading, RIGHT, 0.2)?;
    s.next_to(heading, block, UP, 0.3)?;
    s.play_for(
        0.9,
        vec![
            Animation::create(block),
            Animation::fade_in(heading).shift(UP * 0.2),
            Animation::flash(block).color(p.secondary).num_lines(16),
        ],
    )?;
    s.wait(0.2)?;

    let step_rows = [
        ("1. INCREMENT", p.primary),
        ("2. CHECK LIMIT", p.warning),
        ("3. ROLLBACK", p.secondary),
    ];
    let mut steps = Vec::with_capacity(step_rows.len());
    let mut step_bgs = Vec::with_capacity(step_rows.len());
    for (caption, color) in step_rows {
        let bg = s.insert(
            rounded_rectangle(5.0, 0.7, 0.1)
                .color(color)
                .fill_opacity(0.25)
                .stroke_width(3.0),
        );
        let t = s.insert(text(caption, 22.0, p.text).bold());
        let bc = s.center(bg)?;
        s.move_to(t, bc)?;
        steps.push(s.group(&[bg, t])?);
        step_bgs.push(bg);
    }
    let stack = s.group(&steps)?;
    s.arrange(stack, DOWN, 0.25)?;
    let center = s.center(block)?;
    s.move_to(stack, center)?;

    let mut links = Vec::with_capacity(steps.len() - 1);
    for pair in steps.windows(2) {
        let (from, to) = (s.bottom(pair[0])?, s.top(pair[1])?);
        links.push(s.insert(line(from, to).color(p.secondary).stroke_width(3.0)));
    }
    let links = s.group(&links)?;

    s.play(vec![
        Animation::lagged_start(
            steps
                .iter()
                .map(|step| Animation::fade_in(*step).shift(RIGHT * 0.3))
                .collect(),
            0.15,
        )
        .run_time(1.0),
    ])?;
    s.play(vec![Animation::create(links).run_time(0.5)])?;
    s.wait(0.3)?;

    let shield = s.insert(
        circle(0.5)
            .color(p.secondary)
            .fill_opacity(0.3)
            .stroke_width(5.0),
    );
    s.next_to(shield, block, DOWN, 0.5)?;
    let ok = s.insert(text("OK", 32.0, p.secondary).bold());
    let sc = s.center(shield)?;
    s.move_to(ok, sc)?;
    let no_gaps = s.insert(text("NO GAPS | NO RACE", 28.0, p.secondary).bold());
    s.next_to(no_gaps, shield, RIGHT, 0.4)?;
    s.play_for(
        0.8,
        vec![
            Animation::grow_from_center(shield),
            Animation::write(ok),
            Animation::write(no_gaps),
            Animation::flash(shield).color(p.secondary).num_lines(12),
        ],
    )?;
    s.wait(0.3)?;

    // Run the block one step at a time
    let highlight = |i: usize, color: Color, extra: Vec<Animation>| -> Vec<Animation> {
        let (step, bg) = (steps[i], step_bgs[i]);
        let mut v = vec![
            Animation::animate(step, move |st| st.scale(step, 1.1)),
            Animation::animate(bg, move |st| st.set_fill_opacity(bg, 0.5)),
            Animation::flash(step).color(color).num_lines(8),
        ];
        v.extend(extra);
        v
    };
    let settle = |i: usize| -> Vec<Animation> {
        let (step, bg) = (steps[i], step_bgs[i]);
        vec![
            Animation::animate(step, move |st| st.scale(step, 1.0 / 1.1)),
            Animation::animate(bg, move |st| st.set_fill_opacity(bg, 0.25)),
        ]
    };

    s.play_for(0.5, highlight(0, p.primary, Vec::new()))?;
    let five = digit(s, &c, "5", p.primary)?;
    s.play_for(
        0.5,
        vec![
            Animation::transform(c.value, five),
            Animation::flash(c.ring).color(p.primary).num_lines(10),
        ],
    )?;
    s.play_for(0.3, settle(0))?;
    s.wait(0.2)?;

    s.play_for(
        0.5,
        highlight(1, p.warning, vec![recolor(c.ring, p.warning)]),
    )?;
    s.play_for(0.3, settle(1))?;
    s.wait(0.2)?;

    s.play_for(0.5, highlight(2, p.secondary, Vec::new()))?;
    let four = digit(s, &c, "4", p.secondary)?;
    s.play_for(
        0.7,
        vec![
            Animation::transform(c.value, four),
            recolor(c.ring, p.secondary),
            Animation::flash(c.ring)
                .color(p.secondary)
                .num_lines(16)
                .line_length(0.5),
        ],
    )?;
    s.play_for(0.3, settle(2))?;
    s.wait(0.3)?;

    let victory = s.insert(text("STATE PROTECTED!", 36.0, p.secondary).bold());
    s.move_to(victory, pt(0.0, -3.2))?;
    s.play_for(
        0.8,
        vec![
            Animation::write(victory),
            Animation::flash(victory)
                .color(p.secondary)
                .num_lines(20)
                .flash_radius(1.2),
        ],
    )?;
    s.wait(0.8)?;

    let everything = top_level(s)?;
    s.play_for(
        1.0,
        everything
            .into_iter()
            .map(|id| Animation::fade_out(id).shift(UP * 0.3).scale(0.9))
            .collect(),
    )
}

pub(crate) fn build(cfg: &SceneConfig) -> StoryResult<Timeline> {
    let p = Palette::new()?;
    let mut s = cfg.scene(SceneId::RaceCondition.title());
    s.set_background(p.bg);

    background(&mut s, &p)?;
    problem(&mut s, &p)?;
    solution(&mut s, &p)?;

    s.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/race_condition.rs"]
mod tests;
