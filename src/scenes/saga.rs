//! Saga choreography: two bookings race for one discount and the loser is compensated.

use std::f64::consts::{PI, TAU};

use crate::{
    animation::anims::Animation,
    foundation::core::Vec2,
    foundation::error::StoryResult,
    foundation::frame::{DL, DOWN, DR, LEFT, RIGHT, SMALL_BUFF, UL, UP, UR, pt},
    scene::mobject::{Leaf, MobjectId},
    scene::shapes::{arc, circle, dashed_line, ellipse, line, rounded_rectangle},
    scene::state::SceneState,
    scenes::{SceneConfig, SceneId, label},
    style::color::Color,
    timeline::model::Timeline,
};

struct Palette {
    bg: Color,
    node: Color,
    sec: Color,
    db: Color,
    success: Color,
    fail: Color,
    text: Color,
    gray: Color,
}

impl Palette {
    fn new() -> StoryResult<Self> {
        Ok(Self {
            bg: Color::hex("#0F172A")?,
            node: Color::hex("#38BDF8")?,
            sec: Color::hex("#FBBF24")?,
            db: Color::hex("#F471B5")?,
            success: Color::hex("#34D399")?,
            fail: Color::hex("#F87171")?,
            text: Color::hex("#F8FAFC")?,
            gray: Color::hex("#64748B")?,
        })
    }
}

struct Service {
    frame: MobjectId,
    name: MobjectId,
    icon: MobjectId,
    group: MobjectId,
}

/// Rounded box with a two-line name and an icon above it, shifted by `offset`.
fn service(
    st: &mut SceneState,
    name: &str,
    icon: Leaf,
    color: Color,
    offset: Vec2,
) -> StoryResult<Service> {
    let frame = st.insert(
        rounded_rectangle(2.8, 1.8, 0.15)
            .color(color)
            .stroke_width(3.0)
            .fill_opacity(0.1),
    );
    let name = st.insert(label(name, 18.0, color));
    let at = st.center(frame)?;
    st.move_to(name, at)?;
    let icon = st.insert(icon);
    st.next_to(icon, name, UP, 0.15)?;
    let group = st.group(&[frame, name, icon])?;
    st.shift(group, offset)?;
    Ok(Service {
        frame,
        name,
        icon,
        group,
    })
}

/// Database cylinder outline: top ellipse, two walls and the bottom half-rim.
fn cylinder(st: &mut SceneState, color: Color) -> StoryResult<MobjectId> {
    let stroke = |l: Leaf| l.color(color).stroke_width(3.0);
    let top = st.insert(stroke(ellipse(1.3, 0.45)));
    let left = st.insert(stroke(line(pt(-0.65, 0.0), pt(-0.65, -0.9))));
    let right = st.insert(stroke(line(pt(0.65, 0.0), pt(0.65, -0.9))));
    let rim = st.insert(stroke(arc(0.65, PI, PI)));
    st.stretch(rim, 0.35, 1)?;
    st.shift(rim, DOWN * 0.9)?;
    st.group(&[top, left, right, rim])
}

/// Circle badge with a bold initial.
fn user(st: &mut SceneState, initial: &str, color: Color, at: Vec2) -> StoryResult<MobjectId> {
    let ring = st.insert(
        circle(0.35)
            .color(color)
            .fill_opacity(0.2)
            .stroke_width(3.0),
    );
    let letter = st.insert(Leaf::text(initial, 20.0).color(color).bold());
    let g = st.group(&[ring, letter])?;
    st.move_to(g, at.to_point())?;
    Ok(g)
}

fn x_stroke(
    st: &mut SceneState,
    over: MobjectId,
    from: Vec2,
    to: Vec2,
    color: Color,
) -> StoryResult<MobjectId> {
    let (a, b) = (st.corner(over, from)?, st.corner(over, to)?);
    Ok(st.insert(line(a, b).color(color).stroke_width(4.0)))
}

pub(crate) fn build(cfg: &SceneConfig) -> StoryResult<Timeline> {
    let p = Palette::new()?;
    let mut s = cfg.scene(SceneId::Saga.title());
    s.set_background(p.bg);

    let status = s.insert(label("", 22.0, p.text));
    s.to_edge(status, DOWN, 0.4)?;
    s.add(&[status])?;

    // Title
    let title = s.insert(label("Saga Choreography", 48.0, p.node).bold());
    let subtitle = s.insert(label("Decentralized Transaction Management", 20.0, p.gray));
    s.next_to(subtitle, title, DOWN, SMALL_BUFF)?;

    s.play(vec![Animation::fade_in(title).shift(UP * 0.3).run_time(0.5)])?;
    s.play(vec![Animation::fade_in(subtitle).run_time(0.4)])?;
    s.wait(0.3)?;
    s.play_for(
        0.5,
        vec![
            Animation::fade_out(subtitle),
            Animation::animate(title, move |st| {
                st.scale(title, 0.5)?;
                st.to_corner(title, UL, 0.3)
            }),
        ],
    )?;

    // Services
    let booking = service(
        &mut s,
        "Booking\nService",
        Leaf::text("📅", 28.0),
        p.node,
        LEFT * 3.5 + UP * 0.3,
    )?;
    let discount = service(
        &mut s,
        "Discount\nService",
        Leaf::text("%", 32.0),
        p.sec,
        RIGHT * 3.5 + UP * 0.3,
    )?;
    s.play_for(
        0.6,
        vec![
            Animation::fade_in(booking.group).shift(RIGHT * 0.5),
            Animation::fade_in(discount.group).shift(LEFT * 0.5),
        ],
    )?;

    let no_global = s.insert(label("No Global Transaction ⚠️", 16.0, p.fail).italic());
    s.move_to(no_global, pt(0.0, 2.0))?;
    s.play(vec![Animation::fade_in(no_global).shift(DOWN * 0.2).run_time(0.5)])?;
    s.wait(0.3)?;

    // Quota store
    let outline = cylinder(&mut s, p.db)?;
    s.shift(outline, DOWN * 2.2)?;
    let db_name = s.insert(label("Redis", 16.0, p.db).bold());
    s.next_to(db_name, outline, LEFT, 0.3)?;
    let oc = s.center(outline)?;
    let quota_caption = s.insert(label("Quota:", 14.0, p.gray));
    s.move_to(quota_caption, oc + UP * 0.15)?;
    let quota = s.insert(label("1", 36.0, p.success).bold());
    s.move_to(quota, oc + DOWN * 0.2)?;
    let redis = s.group(&[outline, db_name, quota_caption, quota])?;
    s.play(vec![Animation::fade_in(redis).shift(UP * 0.3).run_time(0.6)])?;
    s.wait(0.3)?;

    // Two users
    let user_a = user(&mut s, "A", p.success, Vec2::new(-3.5, 2.5))?;
    let user_b = user(&mut s, "B", p.fail, Vec2::new(3.5, 2.5))?;
    s.play_for(
        0.5,
        vec![
            Animation::fade_in(user_a).scale(0.5),
            Animation::fade_in(user_b).scale(0.5),
        ],
    )?;
    s.play(vec![Animation::fade_out(no_global).run_time(0.3)])?;

    // Step 1: both book
    let booking_top = s.top(booking.frame)?;
    let (a_bottom, b_bottom) = (s.bottom(user_a)?, s.bottom(user_b)?);
    let arrow_a = s.arrow(a_bottom, booking_top + LEFT * 0.3, 0.1)?;
    s.set_color(arrow_a, p.success)?;
    let arrow_b = s.arrow(b_bottom, booking_top + RIGHT * 0.3, 0.1)?;
    s.set_color(arrow_b, p.fail)?;
    for a in [arrow_a, arrow_b] {
        let shaft = s.child(a, 0)?;
        s.set_stroke_width(shaft, 4.0)?;
    }
    s.play_for(
        0.5,
        vec![Animation::grow_arrow(arrow_a), Animation::grow_arrow(arrow_b)],
    )?;
    s.play_for(
        0.3,
        vec![
            Animation::fade_out(booking.icon),
            Animation::fade_out(booking.name),
        ],
    )?;

    let bc = s.center(booking.frame)?;
    let pending_a = s.insert(label("A: Pending", 16.0, p.success));
    s.move_to(pending_a, bc + UP * 0.3)?;
    let pending_b = s.insert(label("B: Pending", 16.0, p.fail));
    s.move_to(pending_b, bc + DOWN * 0.3)?;
    s.play_for(
        0.4,
        vec![
            Animation::fade_in(pending_a).shift(DOWN * 0.2),
            Animation::fade_in(pending_b).shift(DOWN * 0.2),
        ],
    )?;
    s.wait(0.2)?;

    // Step 2: the booking emits an event
    let from = s.right(booking.frame)? + UP * 0.3;
    let to = s.left(discount.frame)? + UP * 0.3;
    let event = s.curved_arrow(from, to, -TAU / 5.0)?;
    s.set_color(event, p.text)?;
    let event_arc = s.child(event, 0)?;
    s.set_stroke_width(event_arc, 3.0)?;
    let event_label = s.insert(label("OrderCreated", 15.0, p.text).italic());
    s.next_to(event_label, event, UP, 0.1)?;
    s.play_for(
        0.6,
        vec![Animation::create(event), Animation::write(event_label)],
    )?;
    s.play_for(
        0.3,
        vec![Animation::fade_out(arrow_a), Animation::fade_out(arrow_b)],
    )?;

    // Step 3: both claim the last quota slot
    let d_bottom = s.bottom(discount.frame)?;
    let r_top = s.top(redis)?;
    let claim_a = s.insert(
        dashed_line(d_bottom + LEFT * 0.5, r_top + LEFT * 0.3)
            .color(p.success)
            .stroke_width(3.0),
    );
    let claim_b = s.insert(
        dashed_line(d_bottom + RIGHT * 0.5, r_top + RIGHT * 0.3)
            .color(p.fail)
            .stroke_width(3.0),
    );
    s.play_for(
        0.5,
        vec![Animation::create(claim_a), Animation::create(claim_b)],
    )?;

    s.play_for(
        0.5,
        vec![
            Animation::indicate(quota).color(p.success).scale(1.3),
            Animation::animate(claim_a, move |st| st.set_stroke_width(claim_a, 5.0)),
        ],
    )?;

    let zero = s.insert(label("0", 36.0, p.fail).bold());
    let qc = s.center(quota)?;
    s.move_to(zero, qc)?;
    s.play(vec![Animation::transform(quota, zero).run_time(0.4)])?;
    s.wait(0.2)?;

    s.play_for(
        0.5,
        vec![
            Animation::flash(quota).color(p.fail).flash_radius(0.5),
            Animation::animate(claim_b, move |st| st.set_stroke_width(claim_b, 5.0)),
        ],
    )?;

    let x_mark = s.insert(Leaf::text("❌", 40.0).color(p.fail));
    s.next_to(x_mark, discount.frame, RIGHT, 0.3)?;
    s.play(vec![Animation::fade_in(x_mark).scale(0.3).run_time(0.4)])?;
    s.wait(0.3)?;
    s.play_for(
        0.3,
        vec![
            Animation::fade_out(claim_a),
            Animation::fade_out(claim_b),
            Animation::fade_out(x_mark),
        ],
    )?;

    // Step 4: compensation
    let from = s.left(discount.frame)? + DOWN * 0.3;
    let to = s.right(booking.frame)? + DOWN * 0.3;
    let rollback = s.curved_arrow(from, to, -TAU / 5.0)?;
    s.set_color(rollback, p.fail)?;
    let rollback_arc = s.child(rollback, 0)?;
    s.set_stroke_width(rollback_arc, 4.0)?;
    let rollback_label = s.insert(label("DiscountFailed", 15.0, p.fail).bold().italic());
    s.next_to(rollback_label, rollback, DOWN, 0.1)?;
    s.play_for(
        0.6,
        vec![Animation::create(rollback), Animation::write(rollback_label)],
    )?;

    let strike1 = x_stroke(&mut s, pending_b, UL, DR, p.fail)?;
    let strike2 = x_stroke(&mut s, pending_b, UR, DL, p.fail)?;
    s.play_for(
        0.4,
        vec![Animation::create(strike1), Animation::create(strike2)],
    )?;

    let cancelled = s.insert(label("CANCELLED", 13.0, p.fail).bold());
    let pb = s.center(pending_b)?;
    s.move_to(cancelled, pb)?;
    s.play_for(
        0.3,
        vec![Animation::fade_out(pending_b), Animation::fade_in(cancelled)],
    )?;

    let tick = s.insert(Leaf::text("✓", 24.0).color(p.success).bold());
    s.next_to(tick, pending_a, RIGHT, 0.2)?;
    let confirmed = s.insert(label("CONFIRMED", 13.0, p.success).bold());
    s.next_to(confirmed, pending_a, DOWN, 0.2)?;
    s.play_for(
        0.5,
        vec![
            Animation::fade_in(tick).scale(0.5),
            Animation::fade_in(confirmed).shift(UP * 0.1),
        ],
    )?;
    s.wait(0.4)?;

    // Finale
    s.play_for(
        0.5,
        [event, event_label, rollback, rollback_label, redis, user_a, user_b]
            .into_iter()
            .map(Animation::fade_out)
            .collect(),
    )?;

    let a_box = s.surrounding_rectangle(&[pending_a, tick, confirmed], 0.15, 0.1)?;
    s.set_color(a_box, p.success)?;
    let b_box = s.surrounding_rectangle(&[cancelled, strike1, strike2], 0.15, 0.1)?;
    s.set_color(b_box, p.fail)?;
    s.play_for(0.5, vec![Animation::create(a_box), Animation::create(b_box)])?;
    s.wait(0.3)?;

    let moral = s.insert(label("Saga: Each service handles its own rollback", 24.0, p.text));
    let aside = s.insert(label("No central coordinator needed", 20.0, p.gray));
    let message = s.group(&[moral, aside])?;
    s.arrange(message, DOWN, 0.2)?;
    s.to_edge(message, DOWN, 0.5)?;
    s.play(vec![Animation::transform(status, message).run_time(0.5)])?;
    s.wait(1.5)?;

    s.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/saga.rs"]
mod tests;
