//! SFU: five peers shouting across a full mesh, then one forwarding unit in the middle.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::{
    animation::anims::Animation,
    animation::rate::RateFunc,
    foundation::core::Vec2,
    foundation::error::StoryResult,
    foundation::frame::{DOWN, MED_LARGE_BUFF, UL, UP, pt},
    scene::shapes::{circle, line, rounded_rectangle},
    scenes::{SceneConfig, SceneId, label},
    style::color::{Color, WHITE},
    timeline::model::Timeline,
};

const USERS: usize = 5;
const RING_RADIUS: f64 = 2.5;
/// Standard deviation of the endpoint jitter in the "shouting" wiggle.
const JITTER: f64 = 0.05;

struct Palette {
    bg: Color,
    node: Color,
    sfu: Color,
    chaos: Color,
    clean: Color,
    text: Color,
}

impl Palette {
    fn new() -> StoryResult<Self> {
        Ok(Self {
            bg: Color::hex("#0F172A")?,
            node: Color::hex("#38BDF8")?,
            sfu: Color::hex("#FBBF24")?,
            chaos: Color::hex("#F471B5")?,
            clean: Color::hex("#34D399")?,
            text: Color::hex("#F8FAFC")?,
        })
    }
}

pub(crate) fn build(cfg: &SceneConfig) -> StoryResult<Timeline> {
    let p = Palette::new()?;
    let mut s = cfg.scene(SceneId::Sfu.title());
    s.set_background(p.bg);
    let mut rng = s.rng(1);

    let title = s.insert(label("SFU", 70.0, p.sfu).bold());
    let subtitle = s.insert(label("Selective Forwarding Unit", 30.0, p.text));
    s.next_to(subtitle, title, DOWN, 0.3)?;
    s.play_for(
        1.0,
        vec![
            Animation::write(title),
            Animation::fade_in(subtitle).shift(UP * 0.2),
        ],
    )?;
    s.wait(0.5)?;

    let header = s.group(&[title, subtitle])?;
    s.play(vec![
        Animation::animate(header, move |st| {
            st.scale(header, 0.5)?;
            st.to_corner(header, UL, MED_LARGE_BUFF)
        })
        .run_time(0.8),
    ])?;

    let metaphor = s.insert(label("The Traffic Controller", 36.0, p.sfu));
    s.to_edge(metaphor, UP, MED_LARGE_BUFF)?;
    s.play(vec![Animation::write(metaphor)])?;

    // Full mesh
    let mut users = Vec::with_capacity(USERS);
    for i in 0..USERS {
        let dot = s.insert(circle(0.3).color(p.node).fill(p.node, 0.2).stroke_width(4.0));
        let number = s.insert(label(&(i + 1).to_string(), 20.0, p.text));
        let user = s.group(&[dot, number])?;
        let angle = i as f64 * TAU / USERS as f64 + FRAC_PI_2;
        s.move_to(user, pt(angle.cos() * RING_RADIUS, angle.sin() * RING_RADIUS))?;
        users.push(user);
    }
    let ring = s.group(&users)?;
    s.play(vec![Animation::fade_in(ring).scale(0.8)])?;

    let mut centers = Vec::with_capacity(USERS);
    for u in &users {
        centers.push(s.center(*u)?);
    }
    let mut chaos = Vec::new();
    for i in 0..USERS {
        for j in i + 1..USERS {
            chaos.push(s.insert(line(centers[i], centers[j]).color(p.chaos).stroke(p.chaos, 2.0, 0.6)));
        }
    }
    let mesh = s.group(&chaos)?;

    let chaos_label = s.insert(label("Mesh Network: Chaos", 24.0, p.chaos));
    s.next_to(chaos_label, ring, DOWN, 0.5)?;

    s.play(vec![Animation::create(mesh).lag_ratio(0.1).run_time(1.5)])?;
    s.play(vec![Animation::fade_in(chaos_label).shift(UP * 0.2)])?;

    let mut wiggle = Vec::with_capacity(chaos.len());
    for &l in &chaos {
        let start = s.start(l)? + Vec2::new(rng.gaussian(), rng.gaussian()) * JITTER;
        let end = s.end(l)? + Vec2::new(rng.gaussian(), rng.gaussian()) * JITTER;
        wiggle.push(Animation::animate(l, move |st| {
            st.put_start_and_end_on(l, start, end)
        }));
    }
    s.play_with(0.5, RateFunc::ThereAndBack, wiggle)?;
    s.wait(0.5)?;

    s.play_for(
        0.8,
        vec![
            Animation::fade_out(mesh),
            Animation::fade_out(chaos_label),
            Animation::fade_out(metaphor),
        ],
    )?;

    // Star topology
    let sfu_box = s.insert(
        rounded_rectangle(1.2, 1.2, 0.2)
            .color(p.sfu)
            .stroke_width(6.0)
            .fill(p.sfu, 0.15),
    );
    let sfu_text = s.insert(label("SFU", 24.0, p.sfu).bold());
    let box_center = s.center(sfu_box)?;
    s.move_to(sfu_text, box_center)?;
    let sfu_node = s.group(&[sfu_box, sfu_text])?;
    s.play(vec![Animation::grow_from_center(sfu_node).run_time(0.8)])?;

    let hub = s.center(sfu_node)?;
    let mut uploads = Vec::with_capacity(USERS);
    for u in &users {
        let from = s.center(*u)?;
        uploads.push(s.insert(line(from, hub).color(p.clean).stroke(p.clean, 3.0, 0.5)));
    }
    let uploads = s.group(&uploads)?;
    s.play(vec![Animation::create(uploads).run_time(1.0)])?;

    s.play(vec![Animation::indicate(sfu_node).color(WHITE).scale(1.1)])?;
    let clean = p.clean;
    s.play(vec![
        Animation::animate(uploads, move |st| {
            st.set_stroke(uploads, clean, 6.0)?;
            st.set_stroke_opacity(uploads, 0.8)
        })
        .run_time(0.8),
    ])?;

    // Savings
    let final_text = s.insert(label("Huge Bandwidth Saved", 32.0, p.clean).bold());
    let backdrop = s.background_rectangle(final_text, p.bg, 0.2, 0.9)?;
    let banner = s.group(&[backdrop, final_text])?;
    s.move_to(banner, pt(0.0, -2.5))?;
    s.play(vec![Animation::write(banner).run_time(0.8)])?;

    s.play_for(1.5, vec![Animation::apply_wave(uploads).amplitude(0.1)])?;
    s.wait(2.0)?;

    s.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/sfu.rs"]
mod tests;
