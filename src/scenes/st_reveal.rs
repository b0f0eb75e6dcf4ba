//! "ST" logo reveal with particles, a spinning hexagon frame and glitch flashes.

use std::f64::consts::{FRAC_PI_6, PI, TAU};

use crate::{
    animation::anims::Animation,
    animation::rate::RateFunc,
    foundation::core::Vec2,
    foundation::error::{StoryError, StoryResult},
    foundation::frame::{DOWN, LEFT, ORIGIN, RIGHT, pt},
    foundation::math::Rng64,
    scene::mobject::{Leaf, MobjectId},
    scene::shapes::{circle, line, regular_polygon},
    scene::state::SceneState,
    scenes::{SceneConfig, SceneId},
    style::color::Color,
    timeline::model::Timeline,
};

/// Default text size scaled up 3.5x.
const LETTER_SIZE: f64 = 48.0 * 3.5;
const INWARD_PARTICLES: usize = 25;
const OUTWARD_PARTICLES: usize = 20;
const BINARY_DIGITS: usize = 15;
const GLITCH_LINES: usize = 8;
const GLITCH_FLASHES: usize = 4;
const GLITCH_HOLD: f64 = 0.05;

struct Palette {
    bg: Color,
    pink: Color,
    violet: Color,
    blue: Color,
    mint: Color,
    amber: Color,
}

impl Palette {
    fn new() -> StoryResult<Self> {
        Ok(Self {
            bg: Color::hex("#0a0e27")?,
            pink: Color::hex("#ff006e")?,
            violet: Color::hex("#8338ec")?,
            blue: Color::hex("#3a86ff")?,
            mint: Color::hex("#06ffa5")?,
            amber: Color::hex("#ffbe0b")?,
        })
    }
}

fn letter(st: &mut SceneState, ch: &str, gradient: &[Color]) -> StoryResult<MobjectId> {
    let id = st.insert(Leaf::text(ch, LETTER_SIZE).font("Arial Black").bold());
    st.set_color_by_gradient(id, gradient)?;
    Ok(id)
}

fn particles(
    st: &mut SceneState,
    rng: &mut Rng64,
    n: usize,
    radius: f64,
    colors: &[Color],
    opacity: f64,
    spread: Option<f64>,
) -> StoryResult<Vec<MobjectId>> {
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let Some(c) = rng.choose(colors).copied() else {
            return Err(StoryError::validation("particle palette is empty"));
        };
        let dot = st.insert(circle(radius).color(c).fill_opacity(opacity).stroke_width(0.0));
        if let Some(r) = spread {
            let at = pt(rng.uniform(-r, r), rng.uniform(-r, r));
            st.move_to(dot, at)?;
        }
        out.push(dot);
    }
    Ok(out)
}

pub(crate) fn build(cfg: &SceneConfig) -> StoryResult<Timeline> {
    let p = Palette::new()?;
    let mut s = cfg.scene(SceneId::StReveal.title());
    s.set_background(p.bg);
    let mut rng = s.rng(1);

    let s_letter = letter(&mut s, "S", &[p.pink, p.violet])?;
    let t_letter = letter(&mut s, "T", &[p.blue, p.mint])?;
    let logo = s.group(&[s_letter, t_letter])?;
    s.arrange(logo, RIGHT, 0.2)?;
    s.move_to(logo, ORIGIN)?;

    let palette4 = [p.pink, p.violet, p.blue, p.mint];
    let inward = particles(&mut s, &mut rng, INWARD_PARTICLES, 0.15, &palette4, 0.8, Some(4.0))?;
    let inward_group = s.group(&inward)?;

    let hexagon = s.insert(regular_polygon(6).color(p.mint).stroke_width(4.0));
    s.scale(hexagon, 2.8)?;
    s.rotate(hexagon, FRAC_PI_6)?;

    let mut digits = Vec::with_capacity(BINARY_DIGITS);
    for _ in 0..BINARY_DIGITS {
        let bits: String = (0..3)
            .map(|_| if rng.below(2) == 0 { '0' } else { '1' })
            .collect();
        let d = s.insert(
            Leaf::text(bits, 20.0)
                .font("Courier New")
                .color(p.mint)
                .opacity(0.4),
        );
        let at = pt(rng.uniform(-5.0, 5.0), rng.uniform(-3.0, 4.0));
        s.move_to(d, at)?;
        digits.push(d);
    }
    let binary = s.group(&digits)?;

    let mut glitch = Vec::with_capacity(GLITCH_LINES);
    for i in 0..GLITCH_LINES {
        let y = -3.0 + 6.0 * i as f64 / (GLITCH_LINES - 1) as f64;
        glitch.push(s.insert(
            line(pt(-6.0, y), pt(6.0, y))
                .color(p.pink)
                .stroke_width(2.0)
                .opacity(0.0),
        ));
    }

    // Binary rain
    s.add(&[binary])?;
    s.play_with(
        1.0,
        RateFunc::Linear,
        vec![Animation::animate(binary, move |st| {
            st.shift(binary, DOWN * 2.0)?;
            st.set_opacity(binary, 0.2)
        })],
    )?;

    // Implosion
    s.add(&[inward_group])?;
    let implode = inward
        .iter()
        .map(|&c| {
            Animation::animate(c, move |st| {
                st.move_to(c, ORIGIN)?;
                st.set_opacity(c, 0.0)
            })
        })
        .collect();
    s.play_with(0.8, RateFunc::RushInto, implode)?;

    // Letters burst in over offset ghosts
    let s_ghost = s.copy(s_letter)?;
    s.set_color(s_ghost, p.pink)?;
    s.shift(s_ghost, LEFT * 0.1)?;
    let t_ghost = s.copy(t_letter)?;
    s.set_color(t_ghost, p.blue)?;
    s.shift(t_ghost, RIGHT * 0.1)?;
    s.add(&[s_ghost, t_ghost])?;
    s.play_for(
        0.3,
        vec![
            Animation::fade_in(s_letter).scale(1.5),
            Animation::fade_in(t_letter).scale(1.5),
        ],
    )?;
    s.remove(&[s_ghost, t_ghost])?;

    // Hexagon frame
    s.play_with(0.8, RateFunc::Smooth, vec![Animation::create(hexagon)])?;
    s.play_for(
        1.2,
        vec![
            Animation::rotate(hexagon, TAU).rate(RateFunc::Linear),
            Animation::animate(logo, move |st| {
                st.scale(logo, 1.15)?;
                st.set_opacity(logo, 0.9)
            }),
        ],
    )?;

    // Scan-line glitches
    for &g in glitch.iter().take(GLITCH_FLASHES) {
        s.add(&[g])?;
        s.set_opacity(g, 0.8)?;
        s.wait(GLITCH_HOLD)?;
        s.remove(&[g])?;
    }

    // Color shift
    let (mint, amber, pink, violet) = (p.mint, p.amber, p.pink, p.violet);
    s.play_for(
        0.5,
        vec![
            Animation::animate(s_letter, move |st| {
                st.set_color_by_gradient(s_letter, &[mint, amber])
            }),
            Animation::animate(t_letter, move |st| {
                st.set_color_by_gradient(t_letter, &[pink, violet])
            }),
            Animation::animate(hexagon, move |st| st.set_color(hexagon, amber)),
        ],
    )?;

    s.play_for(
        0.6,
        vec![
            Animation::animate(logo, move |st| st.scale(logo, 1.0 / 1.15)),
            Animation::rotate(hexagon, -PI).rate(RateFunc::Smooth),
        ],
    )?;

    s.play_for(
        0.4,
        [s_letter, t_letter]
            .into_iter()
            .map(|l| Animation::flash(l).color(p.mint).line_length(0.3))
            .collect(),
    )?;
    s.wait(0.4)?;

    // Explosion
    let outward = particles(&mut s, &mut rng, OUTWARD_PARTICLES, 0.1, &[p.pink, p.mint], 0.9, None)?;
    let outward_group = s.group(&outward)?;
    s.add(&[outward_group])?;
    let mut finale: Vec<Animation> = outward
        .iter()
        .map(|&c| {
            let v = Vec2::new(rng.uniform(-5.0, 5.0), rng.uniform(-5.0, 5.0));
            Animation::animate(c, move |st| {
                st.shift(c, v)?;
                st.set_opacity(c, 0.0)
            })
        })
        .collect();
    finale.push(Animation::fade_out(logo));
    finale.push(Animation::fade_out(hexagon));
    finale.push(Animation::fade_out(binary));
    s.play_with(0.7, RateFunc::RushFrom, finale)?;

    s.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/st_reveal.rs"]
mod tests;
