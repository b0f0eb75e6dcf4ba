//! Resolved animation tracks.
//!
//! A play command is resolved once, at build time, into a list of [`Track`]s. Each track is plain
//! data (serializable for `dump`) that can be applied to a clone of the segment's base state at
//! any progress value. Resolution also advances a working state to what the scene looks like
//! after the play, which becomes the next segment's base.

use serde::{Deserialize, Serialize};

use crate::{
    animation::anims::{AnimKind, Animation, FlashCenter, lagged_windows},
    animation::rate::RateFunc,
    foundation::core::{Point, Vec2},
    foundation::error::{StoryError, StoryResult},
    scene::mobject::{Geometry, Leaf, LeafBlend, MobjectId, Node, blend_leaves},
    scene::path_ops,
    scene::shapes,
    scene::state::SceneState,
    style::color::Color,
};

/// One leaf interpolated between two snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MorphLeaf {
    /// Leaf being morphed.
    pub id: MobjectId,
    /// Value at the start of the window.
    pub from: Leaf,
    /// Value at the end of the window.
    pub to: Leaf,
}

/// What a track does to the scene at a given progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Interpolate leaves between two snapshots.
    Morph {
        /// Changed leaves.
        leaves: Vec<MorphLeaf>,
    },
    /// Replace `source` with leaves blended toward the leaves of `target`.
    Transform {
        /// Displayed mobject being transformed.
        source: MobjectId,
        /// Mobject whose shape and paint `source` takes on.
        target: MobjectId,
        /// Paired leaves, source first.
        pairs: Vec<(Leaf, Leaf)>,
    },
    /// Opacity ramp with optional travel and scale.
    Fade {
        /// Faded mobject.
        target: MobjectId,
        /// `true` for a fade in.
        incoming: bool,
        /// Travel offset.
        shift: Vec2,
        /// Scale at the invisible end.
        scale: f64,
    },
    /// Progressive drawing; each leaf gets its own staggered sub-window.
    Reveal {
        /// Revealed mobject.
        target: MobjectId,
        /// Leaf stagger.
        lag_ratio: f64,
    },
    /// Scale up from zero about a pivot.
    Grow {
        /// Grown mobject.
        target: MobjectId,
        /// Pivot.
        about: Point,
        /// Start color.
        point_color: Option<Color>,
    },
    /// Rotation about a pivot.
    Rotate {
        /// Rotated mobject.
        target: MobjectId,
        /// Total angle in radians.
        angle: f64,
        /// Pivot.
        about: Point,
    },
    /// Scale-and-recolor pulse.
    Indicate {
        /// Indicated mobject.
        target: MobjectId,
        /// Highlight color.
        color: Color,
        /// Peak scale.
        scale_factor: f64,
    },
    /// Transient radial lines.
    Flash {
        /// Center.
        center: Point,
        /// Line color.
        color: Color,
        /// Number of lines.
        num_lines: usize,
        /// Length of each line.
        line_length: f64,
        /// Distance from the center to the inner end of each line.
        flash_radius: f64,
        /// Stroke width.
        stroke_width: f64,
    },
    /// Traveling vertical bump.
    Wave {
        /// Waved mobject.
        target: MobjectId,
        /// Bump height.
        amplitude: f64,
    },
}

/// Width of the visible portion of a passing flash, as a fraction of the line.
const FLASH_TIME_WIDTH: f64 = 1.0;
/// Width of the `ApplyWave` bump relative to the mobject width.
const WAVE_TIME_WIDTH: f64 = 1.0;
/// Pieces per segment when bending a path with `ApplyWave`.
const WAVE_SUBDIVISIONS: usize = 24;

impl Effect {
    /// Absolute effects overwrite leaf values, so they run before relative ones.
    pub(crate) fn is_absolute(&self) -> bool {
        matches!(self, Self::Morph { .. } | Self::Transform { .. })
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Self::Morph { .. } => "morph",
            Self::Transform { .. } => "transform",
            Self::Fade { .. } => "fade",
            Self::Reveal { .. } => "reveal",
            Self::Grow { .. } => "grow",
            Self::Rotate { .. } => "rotate",
            Self::Indicate { .. } => "indicate",
            Self::Flash { .. } => "flash",
            Self::Wave { .. } => "wave",
        }
    }
}

/// An effect scheduled over a window of its segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Window start as a fraction of the segment.
    pub start: f64,
    /// Window end as a fraction of the segment.
    pub end: f64,
    /// Rate function.
    pub rate: RateFunc,
    /// Effect.
    pub effect: Effect,
}

impl Track {
    /// Linear progress through this track's window at segment progress `alpha`.
    pub fn local(&self, alpha: f64) -> f64 {
        let span = self.end - self.start;
        if span <= 1e-12 {
            return if alpha >= self.end { 1.0 } else { 0.0 };
        }
        ((alpha - self.start) / span).clamp(0.0, 1.0)
    }

    /// Apply this track to `state` at segment progress `alpha`.
    pub(crate) fn apply(&self, state: &mut SceneState, alpha: f64) -> StoryResult<()> {
        let u = self.local(alpha);
        let p = self.rate.apply(u);
        match &self.effect {
            Effect::Morph { leaves } => {
                for m in leaves {
                    let blended = blend_leaves(&m.from, &m.to, p);
                    place_blend(state, m.id, blended)?;
                }
            }
            Effect::Transform { source, pairs, .. } => {
                let mut ids = Vec::with_capacity(pairs.len() * 2);
                for (a, b) in pairs {
                    match blend_leaves(a, b, p) {
                        LeafBlend::Single(l) => ids.push(state.insert(l)),
                        LeafBlend::Cross(x, y) => {
                            ids.push(state.insert(x));
                            ids.push(state.insert(y));
                        }
                    }
                }
                replace_node(state, *source, Node::Group(ids))?;
            }
            Effect::Fade {
                target,
                incoming,
                shift,
                scale,
            } => {
                let (k, offset, sc) = if *incoming {
                    (p, -*shift * (1.0 - p), scale + (1.0 - scale) * p)
                } else {
                    (1.0 - p, *shift * p, 1.0 + (scale - 1.0) * p)
                };
                if (sc - 1.0).abs() > 1e-12
                    && let Ok(c) = state.center(*target)
                {
                    state.scale_about(*target, sc, c)?;
                }
                if offset.hypot() > 0.0 {
                    state.shift(*target, offset)?;
                }
                for l in state.leaves(*target)? {
                    state.leaf_mut(l)?.opacity *= k;
                }
            }
            Effect::Reveal { target, lag_ratio } => {
                let leaves = state.leaves(*target)?;
                let n = leaves.len();
                let full = (n.saturating_sub(1)) as f64 * lag_ratio + 1.0;
                for (i, l) in leaves.into_iter().enumerate() {
                    let lo = i as f64 * lag_ratio / full;
                    let hi = (i as f64 * lag_ratio + 1.0) / full;
                    let sub = ((u - lo) / (hi - lo)).clamp(0.0, 1.0);
                    state.leaf_mut(l)?.reveal *= self.rate.apply(sub);
                }
            }
            Effect::Grow {
                target,
                about,
                point_color,
            } => {
                state.scale_about(*target, p, *about)?;
                if let Some(pc) = point_color {
                    for l in state.leaves(*target)? {
                        let style = &mut state.leaf_mut(l)?.style;
                        style.stroke = pc.lerp(style.stroke, p);
                        style.fill = pc.lerp(style.fill, p);
                    }
                }
            }
            Effect::Rotate {
                target,
                angle,
                about,
            } => {
                state.rotate_about(*target, angle * p, *about)?;
            }
            Effect::Indicate {
                target,
                color,
                scale_factor,
            } => {
                if let Ok(c) = state.center(*target) {
                    state.scale_about(*target, 1.0 + (scale_factor - 1.0) * p, c)?;
                }
                for l in state.leaves(*target)? {
                    let style = &mut state.leaf_mut(l)?.style;
                    style.stroke = style.stroke.lerp(*color, p);
                    style.fill = style.fill.lerp(*color, p);
                }
            }
            Effect::Flash {
                center,
                color,
                num_lines,
                line_length,
                flash_radius,
                stroke_width,
            } => {
                let head = p * (1.0 + FLASH_TIME_WIDTH);
                let upper = head.clamp(0.0, 1.0);
                let lower = (head - FLASH_TIME_WIDTH).clamp(0.0, 1.0);
                if upper - lower <= 1e-9 {
                    return Ok(());
                }
                let n = (*num_lines).max(1);
                let mut ids = Vec::with_capacity(n);
                for i in 0..n {
                    let dir = Vec2::from_angle(std::f64::consts::TAU * i as f64 / n as f64);
                    let a = *center + dir * (flash_radius + line_length * lower);
                    let b = *center + dir * (flash_radius + line_length * upper);
                    ids.push(state.insert(shapes::line(a, b).color(*color).stroke_width(*stroke_width)));
                }
                let g = state.group(&ids)?;
                state.add(&[g])?;
            }
            Effect::Wave { target, amplitude } => {
                let r = state.bounding_box(*target)?;
                let (x0, w) = (r.x0, r.width().max(1e-9));
                let head = p * (1.0 + WAVE_TIME_WIDTH);
                let amp = *amplitude;
                let bump = move |q: Point| {
                    let u = (q.x - x0) / w;
                    let s = ((head - u) / WAVE_TIME_WIDTH).clamp(0.0, 1.0);
                    q + Vec2::new(0.0, amp * (std::f64::consts::PI * s).sin())
                };
                for l in state.leaves(*target)? {
                    let leaf = state.leaf_mut(l)?;
                    if let Geometry::Path(path) = &mut leaf.geometry {
                        *path = path_ops::subdivide(path, WAVE_SUBDIVISIONS);
                    }
                    leaf.map_points(bump);
                }
            }
        }
        Ok(())
    }

    /// Commit the end state of this track to the working state.
    ///
    /// The end state is the value of the rate function at 1, so `ThereAndBack` commits nothing.
    pub(crate) fn finish(&self, state: &mut SceneState) -> StoryResult<()> {
        let end = self.rate.apply(1.0);
        let lands = end > 1e-9;
        match &self.effect {
            Effect::Morph { leaves } => {
                for m in leaves {
                    place_blend(state, m.id, blend_leaves(&m.from, &m.to, end))?;
                }
            }
            Effect::Transform { source, target, .. } if lands => {
                let copy = state.copy(*target)?;
                let node = state.node(copy)?.clone();
                replace_node(state, *source, node)?;
            }
            Effect::Fade {
                target,
                incoming: false,
                ..
            } if lands => state.remove(&[*target])?,
            Effect::Rotate {
                target,
                angle,
                about,
            } => state.rotate_about(*target, angle * end, *about)?,
            Effect::Fade {
                target,
                incoming: true,
                ..
            }
            | Effect::Reveal { target, .. }
            | Effect::Grow { target, .. }
                if !lands =>
            {
                state.remove(&[*target])?;
            }
            Effect::Transform { .. }
            | Effect::Fade { .. }
            | Effect::Reveal { .. }
            | Effect::Grow { .. }
            | Effect::Indicate { .. }
            | Effect::Flash { .. }
            | Effect::Wave { .. } => {}
        }
        Ok(())
    }
}

fn replace_node(state: &mut SceneState, id: MobjectId, node: Node) -> StoryResult<()> {
    let slot = state
        .nodes
        .get_mut(id.0)
        .ok_or_else(|| StoryError::validation(format!("unknown mobject {}", id.0)))?;
    *slot = node;
    Ok(())
}

fn place_blend(state: &mut SceneState, id: MobjectId, blended: LeafBlend) -> StoryResult<()> {
    match blended {
        LeafBlend::Single(l) => *state.leaf_mut(id)? = l,
        LeafBlend::Cross(a, b) => {
            let a = state.insert(a);
            let b = state.insert(b);
            replace_node(state, id, Node::Group(vec![a, b]))?;
        }
    }
    Ok(())
}

/// Pair the leaves of `source` with those of `target`. Extra leaves on either side fade against
/// the last leaf of the other side.
fn pair_leaves(
    state: &SceneState,
    source: MobjectId,
    target: MobjectId,
) -> StoryResult<Vec<(Leaf, Leaf)>> {
    let src: Vec<Leaf> = state
        .leaves(source)?
        .into_iter()
        .map(|l| state.leaf(l).cloned())
        .collect::<StoryResult<_>>()?;
    let dst: Vec<Leaf> = state
        .leaves(target)?
        .into_iter()
        .map(|l| state.leaf(l).cloned())
        .collect::<StoryResult<_>>()?;
    let (Some(src_last), Some(dst_last)) = (src.last(), dst.last()) else {
        return Err(StoryError::animation("Transform needs drawable source and target"));
    };
    let n = src.len().max(dst.len());
    let mut pairs = Vec::with_capacity(n);
    for i in 0..n {
        let pair = match (src.get(i), dst.get(i)) {
            (Some(a), Some(b)) => (a.clone(), b.clone()),
            (Some(a), None) => (a.clone(), dst_last.clone().opacity(0.0)),
            (None, Some(b)) => (src_last.clone().opacity(0.0), b.clone()),
            (None, None) => break,
        };
        pairs.push(pair);
    }
    Ok(pairs)
}

/// Morph leaves that belong to the result of an earlier `Transform` in the same play retarget that
/// transform instead, so the source travels to the mutated target.
fn fold_into_transforms(
    tracks: &mut [Track],
    before: &SceneState,
    leaves: &mut Vec<MorphLeaf>,
) -> StoryResult<()> {
    let mut seen = Vec::new();
    for track in tracks.iter_mut().rev() {
        if leaves.is_empty() {
            break;
        }
        let Effect::Transform { source, pairs, .. } = &mut track.effect else {
            continue;
        };
        if seen.contains(source) {
            continue;
        }
        seen.push(*source);
        let held = before.leaves(*source)?;
        for (k, id) in held.iter().enumerate() {
            let Some(pos) = leaves.iter().position(|m| m.id == *id) else {
                continue;
            };
            let m = leaves.remove(pos);
            if k + 1 == held.len() {
                for pair in pairs.iter_mut().skip(k + 1) {
                    pair.1 = m.to.clone().opacity(0.0);
                }
            }
            if let Some(pair) = pairs.get_mut(k) {
                pair.1 = m.to;
            }
        }
    }
    Ok(())
}

struct PendingMorph {
    start: f64,
    end: f64,
    rate: RateFunc,
    before: SceneState,
    after: SceneState,
}

/// Resolves the animations of one play command into tracks.
pub(crate) struct Resolver {
    working: SceneState,
    tracks: Vec<Track>,
    pending: Option<PendingMorph>,
}

impl Resolver {
    /// Start resolving against `base`.
    pub(crate) fn new(base: SceneState) -> Self {
        Self {
            working: base,
            tracks: Vec::new(),
            pending: None,
        }
    }

    /// Resolve one animation over `[start, end]` of the segment.
    pub(crate) fn resolve(
        &mut self,
        anim: Animation,
        start: f64,
        end: f64,
        rate_override: Option<RateFunc>,
    ) -> StoryResult<()> {
        let rate = rate_override.or(anim.rate).unwrap_or_default();

        if let AnimKind::Animate { build, .. } = anim.kind {
            let same = self
                .pending
                .as_ref()
                .is_some_and(|p| p.start == start && p.end == end && p.rate == rate);
            if !same {
                self.flush()?;
                self.pending = Some(PendingMorph {
                    start,
                    end,
                    rate,
                    before: self.working.clone(),
                    after: self.working.clone(),
                });
            }
            if let Some(p) = self.pending.as_mut() {
                build(&mut p.after)?;
            }
            return Ok(());
        }
        self.flush()?;

        let effect = match anim.kind {
            AnimKind::Animate { .. } => return Ok(()),
            AnimKind::LaggedStart { anims, lag_ratio } => {
                if anims.is_empty() {
                    return Err(StoryError::animation("LaggedStart needs at least one animation"));
                }
                let windows = lagged_windows(&anims, lag_ratio);
                let total = windows.iter().map(|(_, e)| *e).fold(0.0, f64::max);
                if total <= 0.0 {
                    return Err(StoryError::animation("LaggedStart has zero length"));
                }
                let span = end - start;
                for (sub, (ws, we)) in anims.into_iter().zip(windows) {
                    let sub_override = rate_override.or(sub.rate).or(anim.rate);
                    self.resolve(
                        sub,
                        start + span * ws / total,
                        start + span * we / total,
                        sub_override,
                    )?;
                }
                return Ok(());
            }
            AnimKind::FadeIn {
                target,
                shift,
                scale,
            } => Effect::Fade {
                target,
                incoming: true,
                shift,
                scale,
            },
            AnimKind::FadeOut {
                target,
                shift,
                scale,
            } => Effect::Fade {
                target,
                incoming: false,
                shift,
                scale,
            },
            AnimKind::Write { target } => {
                let n = self.working.leaves(target)?.len();
                let lag_ratio = if n > 1 { (4.0 / n as f64).min(0.2) } else { 0.0 };
                Effect::Reveal { target, lag_ratio }
            }
            AnimKind::Create { target, lag_ratio } => Effect::Reveal { target, lag_ratio },
            AnimKind::GrowFromCenter {
                target,
                point_color,
            } => Effect::Grow {
                target,
                about: self.working.center(target)?,
                point_color,
            },
            AnimKind::GrowArrow { target } => Effect::Grow {
                target,
                about: self.working.start(target)?,
                point_color: None,
            },
            AnimKind::Transform { source, target } => Effect::Transform {
                source,
                target,
                pairs: pair_leaves(&self.working, source, target)?,
            },
            AnimKind::Rotate {
                target,
                angle,
                about,
            } => Effect::Rotate {
                target,
                angle,
                about: match about {
                    Some(p) => p,
                    None => self.working.center(target)?,
                },
            },
            AnimKind::Indicate {
                target,
                color,
                scale_factor,
            } => Effect::Indicate {
                target,
                color,
                scale_factor,
            },
            AnimKind::Flash {
                center,
                color,
                num_lines,
                line_length,
                flash_radius,
                stroke_width,
            } => Effect::Flash {
                center: match center {
                    FlashCenter::Point(p) => p,
                    FlashCenter::Mobject(id) => self.working.center(id)?,
                },
                color,
                num_lines,
                line_length,
                flash_radius,
                stroke_width,
            },
            AnimKind::ApplyWave { target, amplitude } => Effect::Wave { target, amplitude },
        };
        self.push(Track {
            start,
            end,
            rate,
            effect,
        })
    }

    fn push(&mut self, track: Track) -> StoryResult<()> {
        track.finish(&mut self.working)?;
        tracing::trace!(
            effect = track.effect.kind_name(),
            start = track.start,
            end = track.end,
            "resolved track"
        );
        self.tracks.push(track);
        Ok(())
    }

    fn flush(&mut self) -> StoryResult<()> {
        let Some(p) = self.pending.take() else {
            return Ok(());
        };
        let mut leaves = Vec::new();
        for (i, node) in p.before.nodes.iter().enumerate() {
            if let (Node::Leaf(from), Some(Node::Leaf(to))) = (node, p.after.nodes.get(i))
                && from != to
            {
                leaves.push(MorphLeaf {
                    id: MobjectId(i),
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }
        fold_into_transforms(&mut self.tracks, &p.before, &mut leaves)?;
        self.working = p.after;
        if leaves.is_empty() {
            return Ok(());
        }
        let leaves_len = leaves.len();
        let track = Track {
            start: p.start,
            end: p.end,
            rate: p.rate,
            effect: Effect::Morph { leaves },
        };
        track.finish(&mut self.working)?;
        tracing::trace!(
            leaves = leaves_len,
            start = track.start,
            end = track.end,
            "resolved morph"
        );
        self.tracks.push(track);
        Ok(())
    }

    /// Finish resolution: absolute tracks first, then relative ones, each in play order.
    pub(crate) fn finish(mut self) -> StoryResult<(Vec<Track>, SceneState)> {
        self.flush()?;
        let (mut tracks, relative): (Vec<Track>, Vec<Track>) = self
            .tracks
            .into_iter()
            .partition(|t| t.effect.is_absolute());
        tracks.extend(relative);
        Ok((tracks, self.working))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/track.rs"]
mod tests;
