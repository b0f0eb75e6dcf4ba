//! WebRTC: the relay server gets crossed out in favor of a direct peer-to-peer link.

use crate::{
    animation::anims::Animation,
    foundation::error::StoryResult,
    foundation::frame::{DOWN, LEFT, RIGHT, SMALL_BUFF, UP, pt},
    scene::mobject::MobjectId,
    scene::shapes::{circle, dashed_line, line, rectangle, rounded_rectangle},
    scene::state::SceneState,
    scenes::{SceneConfig, SceneId, label},
    style::color::{Color, WHITE},
    timeline::model::Timeline,
};

struct Palette {
    bg: Color,
    browser: Color,
    server: Color,
    p2p: Color,
    text: Color,
    reject: Color,
}

impl Palette {
    fn new() -> StoryResult<Self> {
        Ok(Self {
            bg: Color::hex("#0F172A")?,
            browser: Color::hex("#3B82F6")?,
            server: Color::hex("#F97316")?,
            p2p: Color::hex("#2DD4BF")?,
            text: Color::hex("#FFFFFF")?,
            reject: Color::hex("#EF4444")?,
        })
    }
}

/// Rounded window with a soft glow and a caption: `[glow, icon, caption]`.
fn browser(st: &mut SceneState, p: &Palette, caption: &str) -> StoryResult<MobjectId> {
    let icon = st.insert(
        rounded_rectangle(2.5, 1.8, 0.3)
            .color(p.browser)
            .stroke_width(4.0)
            .fill(p.browser, 0.2),
    );
    let glow = st.copy(icon)?;
    st.set_stroke_width(glow, 8.0)?;
    st.set_stroke_opacity(glow, 0.3)?;
    let caption = st.insert(label(caption, 24.0, p.text).bold());
    st.next_to(caption, icon, DOWN, SMALL_BUFF)?;
    st.group(&[glow, icon, caption])
}

/// Three stacked rack units with status lights, captioned above.
fn server(st: &mut SceneState, p: &Palette, caption: &str) -> StoryResult<MobjectId> {
    let r1 = st.insert(
        rectangle(1.5, 0.4)
            .color(p.server)
            .stroke_width(3.0)
            .fill(p.server, 0.3),
    );
    let r2 = st.copy(r1)?;
    st.next_to(r2, r1, UP, 0.05)?;
    let r3 = st.copy(r1)?;
    st.next_to(r3, r2, UP, 0.05)?;

    let mut lights = Vec::with_capacity(3);
    for unit in [r1, r2, r3] {
        let light = st.insert(circle(0.05).color(p.server).fill_opacity(1.0));
        let at = st.right(unit)? + LEFT * 0.2;
        st.move_to(light, at)?;
        lights.push(light);
    }
    let lights = st.group(&lights)?;
    let rack = st.group(&[r1, r2, r3, lights])?;

    let caption = st.insert(label(caption, 20.0, p.server));
    st.next_to(caption, rack, UP, SMALL_BUFF)?;
    st.group(&[rack, caption])
}

pub(crate) fn build(cfg: &SceneConfig) -> StoryResult<Timeline> {
    let p = Palette::new()?;
    let mut s = cfg.scene(SceneId::Webrtc.title());
    s.set_background(p.bg);

    // Hook
    let title = s.insert(
        label("WebRTC", 80.0, p.p2p)
            .bold()
            .stroke(p.p2p, 1.0, 0.5),
    );
    let subtitle = s.insert(label("The backbone of it all.", 32.0, p.text));
    s.next_to(subtitle, title, DOWN, 0.5)?;

    s.play(vec![Animation::write(title).run_time(0.8)])?;
    s.play(vec![Animation::fade_in(subtitle).shift(UP * 0.3).run_time(0.8)])?;
    s.wait(0.5)?;

    let header = s.group(&[title, subtitle])?;
    s.play(vec![
        Animation::animate(header, move |st| {
            st.scale(header, 0.6)?;
            st.to_edge(header, UP, 0.5)
        })
        .run_time(1.0),
    ])?;

    // Browsers
    let browser_a = browser(&mut s, &p, "Browser A")?;
    s.to_edge(browser_a, LEFT, 2.0)?;
    let browser_b = browser(&mut s, &p, "Browser B")?;
    s.to_edge(browser_b, RIGHT, 2.0)?;
    s.play_for(
        0.8,
        vec![
            Animation::grow_from_center(browser_a),
            Animation::grow_from_center(browser_b),
        ],
    )?;

    // The middleman
    let relay = server(&mut s, &p, "Middleman Server")?;
    s.move_to(relay, pt(0.0, 0.2))?;

    let (a_top, relay_left) = (s.top(browser_a)?, s.left(relay)?);
    let path_in = s.insert(dashed_line(a_top, relay_left).color(p.server).opacity(0.6));
    let (relay_right, b_top) = (s.right(relay)?, s.top(browser_b)?);
    let path_out = s.insert(dashed_line(relay_right, b_top).color(p.server).opacity(0.6));

    s.play(vec![Animation::fade_in(relay).shift(DOWN * 0.5).run_time(0.7)])?;
    s.play_for(
        1.0,
        vec![Animation::create(path_in), Animation::create(path_out)],
    )?;
    s.wait(0.3)?;

    // Reject it
    let cross = s.cross(relay)?;
    s.set_stroke(cross, p.reject, 8.0)?;
    let no_text = s.insert(label("NO Middleman!", 28.0, p.reject).bold());
    s.next_to(no_text, relay, DOWN, SMALL_BUFF)?;
    let no_text = s.with_background(no_text, p.bg, 0.8)?;

    s.play_for(
        0.7,
        vec![
            Animation::create(cross),
            Animation::write(no_text),
            Animation::fade_out(path_in),
            Animation::fade_out(path_out),
            Animation::animate(browser_a, move |st| st.set_opacity(browser_a, 0.5)),
            Animation::animate(browser_b, move |st| st.set_opacity(browser_b, 0.5)),
        ],
    )?;
    s.play_for(
        0.5,
        vec![
            Animation::fade_out(relay),
            Animation::fade_out(cross),
            Animation::fade_out(no_text),
            Animation::animate(browser_a, move |st| st.set_opacity(browser_a, 1.0)),
            Animation::animate(browser_b, move |st| st.set_opacity(browser_b, 1.0)),
        ],
    )?;

    // Direct link
    let (a_right, b_left) = (s.right(browser_a)?, s.left(browser_b)?);
    let beam = s.insert(line(a_right, b_left).color(p.p2p).stroke_width(10.0));
    let glow = s.copy(beam)?;
    s.set_stroke_width(glow, 20.0)?;
    s.set_stroke_opacity(glow, 0.3)?;
    let link = s.group(&[glow, beam])?;

    let link_label = s.insert(label("P2P Direct WebRTC", 28.0, p.p2p).bold());
    s.next_to(link_label, link, UP, SMALL_BUFF)?;

    s.play(vec![
        Animation::grow_from_center(link)
            .color(p.p2p)
            .run_time(1.0),
    ])?;
    s.play(vec![Animation::fade_in(link_label).shift(DOWN * 0.2)])?;
    s.play(vec![
        Animation::apply_wave(link).amplitude(0.2).run_time(1.0),
        Animation::indicate(link_label).color(WHITE).scale(1.1),
    ])?;
    s.wait(2.0)?;

    s.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/webrtc.rs"]
mod tests;
