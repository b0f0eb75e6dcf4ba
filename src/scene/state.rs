use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{Affine, Point, Rect, Vec2},
    foundation::error::{StoryError, StoryResult},
    foundation::frame::SceneFrame,
    scene::mobject::{Geometry, Leaf, MobjectId, Node},
    scene::path_ops,
    scene::shapes,
    style::color::Color,
};

/// The scene-graph arena plus the display list.
///
/// Nodes are never freed; ids stay valid for the life of the state and of every clone of it.
/// The display list holds top-level ids in draw order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    pub(crate) frame: SceneFrame,
    pub(crate) nodes: Vec<Node>,
    pub(crate) display: Vec<MobjectId>,
}

fn sign(x: f64) -> f64 {
    if x > 1e-12 {
        1.0
    } else if x < -1e-12 {
        -1.0
    } else {
        0.0
    }
}

/// Point of `r` in direction `dir`, per axis: min, center, or max.
fn critical_point(r: Rect, dir: Vec2) -> Point {
    let c = r.center();
    Point::new(
        c.x + sign(dir.x) * r.width() * 0.5,
        c.y + sign(dir.y) * r.height() * 0.5,
    )
}

impl SceneState {
    /// Empty state on `frame`.
    pub fn new(frame: SceneFrame) -> Self {
        Self {
            frame,
            nodes: Vec::new(),
            display: Vec::new(),
        }
    }

    /// Visible frame.
    pub fn frame(&self) -> SceneFrame {
        self.frame
    }

    // ---- arena -------------------------------------------------------------------------------

    /// Store a leaf. It is not displayed until added.
    pub fn insert(&mut self, leaf: Leaf) -> MobjectId {
        self.nodes.push(Node::Leaf(leaf));
        MobjectId(self.nodes.len() - 1)
    }

    /// Group existing nodes, in draw order.
    pub fn group(&mut self, children: &[MobjectId]) -> StoryResult<MobjectId> {
        for c in children {
            self.node(*c)?;
        }
        self.nodes.push(Node::Group(children.to_vec()));
        Ok(MobjectId(self.nodes.len() - 1))
    }

    /// Append children to an existing group.
    pub fn push_children(&mut self, group: MobjectId, children: &[MobjectId]) -> StoryResult<()> {
        for c in children {
            self.node(*c)?;
        }
        match self.node_mut(group)? {
            Node::Group(kids) => {
                kids.extend_from_slice(children);
                Ok(())
            }
            Node::Leaf(_) => Err(StoryError::validation(format!(
                "mobject {} is not a group",
                group.0
            ))),
        }
    }

    /// Node lookup.
    pub fn node(&self, id: MobjectId) -> StoryResult<&Node> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| StoryError::validation(format!("unknown mobject {}", id.0)))
    }

    fn node_mut(&mut self, id: MobjectId) -> StoryResult<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| StoryError::validation(format!("unknown mobject {}", id.0)))
    }

    /// Leaf lookup; fails for groups.
    pub fn leaf(&self, id: MobjectId) -> StoryResult<&Leaf> {
        match self.node(id)? {
            Node::Leaf(l) => Ok(l),
            Node::Group(_) => Err(StoryError::validation(format!(
                "mobject {} is a group, not a leaf",
                id.0
            ))),
        }
    }

    /// Mutable leaf lookup; fails for groups.
    pub fn leaf_mut(&mut self, id: MobjectId) -> StoryResult<&mut Leaf> {
        match self.node_mut(id)? {
            Node::Leaf(l) => Ok(l),
            Node::Group(_) => Err(StoryError::validation(format!(
                "mobject {} is a group, not a leaf",
                id.0
            ))),
        }
    }

    /// Direct children of a group; empty for leaves.
    pub fn children(&self, id: MobjectId) -> StoryResult<&[MobjectId]> {
        match self.node(id)? {
            Node::Leaf(_) => Ok(&[]),
            Node::Group(c) => Ok(c),
        }
    }

    /// `i`-th child of a group.
    pub fn child(&self, id: MobjectId, i: usize) -> StoryResult<MobjectId> {
        self.children(id)?.get(i).copied().ok_or_else(|| {
            StoryError::validation(format!("mobject {} has no child {i}", id.0))
        })
    }

    /// Every leaf under `id` in draw order, each once.
    pub fn leaves(&self, id: MobjectId) -> StoryResult<Vec<MobjectId>> {
        let mut out = Vec::new();
        let mut seen = vec![false; self.nodes.len()];
        self.collect_leaves(id, &mut out, &mut seen)?;
        Ok(out)
    }

    fn collect_leaves(
        &self,
        id: MobjectId,
        out: &mut Vec<MobjectId>,
        seen: &mut [bool],
    ) -> StoryResult<()> {
        match self.node(id)? {
            Node::Leaf(_) => {
                if !seen[id.0] {
                    seen[id.0] = true;
                    out.push(id);
                }
            }
            Node::Group(kids) => {
                for k in kids {
                    self.collect_leaves(*k, out, seen)?;
                }
            }
        }
        Ok(())
    }

    /// `id` and every node below it.
    pub(crate) fn family(&self, id: MobjectId) -> StoryResult<Vec<MobjectId>> {
        let mut out = vec![id];
        let mut i = 0;
        while i < out.len() {
            for k in self.children(out[i])? {
                if !out.contains(k) {
                    out.push(*k);
                }
            }
            i += 1;
        }
        Ok(out)
    }

    /// Deep-copy the subtree at `id` into fresh ids.
    pub fn copy(&mut self, id: MobjectId) -> StoryResult<MobjectId> {
        let mut memo = HashMap::new();
        self.copy_rec(id, &mut memo)
    }

    fn copy_rec(
        &mut self,
        id: MobjectId,
        memo: &mut HashMap<MobjectId, MobjectId>,
    ) -> StoryResult<MobjectId> {
        if let Some(done) = memo.get(&id) {
            return Ok(*done);
        }
        let new = match self.node(id)?.clone() {
            Node::Leaf(l) => self.insert(l),
            Node::Group(kids) => {
                let mut copied = Vec::with_capacity(kids.len());
                for k in kids {
                    copied.push(self.copy_rec(k, memo)?);
                }
                self.nodes.push(Node::Group(copied));
                MobjectId(self.nodes.len() - 1)
            }
        };
        memo.insert(id, new);
        Ok(new)
    }

    // ---- compound shapes ---------------------------------------------------------------------

    /// Straight arrow group `[shaft, tip]`.
    pub fn arrow(&mut self, start: Point, end: Point, buff: f64) -> StoryResult<MobjectId> {
        let (shaft, tip) = shapes::arrow_parts(start, end, buff);
        let a = self.insert(shaft);
        let b = self.insert(tip);
        self.group(&[a, b])
    }

    /// Curved arrow group `[arc, tip]`.
    pub fn curved_arrow(&mut self, start: Point, end: Point, angle: f64) -> StoryResult<MobjectId> {
        let (shaft, tip) = shapes::curved_arrow_parts(start, end, angle);
        let a = self.insert(shaft);
        let b = self.insert(tip);
        self.group(&[a, b])
    }

    /// Rectangle around the union of `targets`, padded by `buff`.
    pub fn surrounding_rectangle(
        &mut self,
        targets: &[MobjectId],
        buff: f64,
        corner_radius: f64,
    ) -> StoryResult<MobjectId> {
        let r = self.union_box(targets)?.inflate(buff, buff);
        Ok(self.insert(shapes::rect_outline(r, corner_radius)))
    }

    /// Red X over `target`.
    pub fn cross(&mut self, target: MobjectId) -> StoryResult<MobjectId> {
        let r = self.bounding_box(target)?;
        let (a, b) = shapes::cross_parts(r);
        let red = crate::style::color::RED;
        let a = self.insert(a.color(red).stroke_width(6.0));
        let b = self.insert(b.color(red).stroke_width(6.0));
        self.group(&[a, b])
    }

    /// Filled backdrop behind `target`.
    pub fn background_rectangle(
        &mut self,
        target: MobjectId,
        color: Color,
        buff: f64,
        opacity: f64,
    ) -> StoryResult<MobjectId> {
        let r = self.bounding_box(target)?.inflate(buff, buff);
        let l = shapes::rect_outline(r, 0.0)
            .fill(color, opacity)
            .stroke(color, 0.0, 0.0);
        Ok(self.insert(l))
    }

    /// Wrap `target` in a new group `[backdrop, target]` and return the group.
    pub fn with_background(
        &mut self,
        target: MobjectId,
        color: Color,
        opacity: f64,
    ) -> StoryResult<MobjectId> {
        let bg = self.background_rectangle(target, color, 0.1, opacity)?;
        self.group(&[bg, target])
    }

    // ---- queries -----------------------------------------------------------------------------

    /// Union of the leaf bounds under `id`.
    pub fn bounding_box(&self, id: MobjectId) -> StoryResult<Rect> {
        self.union_box(&[id])
    }

    fn union_box(&self, ids: &[MobjectId]) -> StoryResult<Rect> {
        let mut acc: Option<Rect> = None;
        for id in ids {
            for l in self.leaves(*id)? {
                if let Some(r) = self.leaf(l)?.bounds() {
                    acc = Some(acc.map_or(r, |a| a.union(r)));
                }
            }
        }
        acc.ok_or_else(|| StoryError::layout("mobject has no geometry"))
    }

    /// Bounding-box center.
    pub fn center(&self, id: MobjectId) -> StoryResult<Point> {
        Ok(self.bounding_box(id)?.center())
    }

    /// Critical point of the bounding box in `dir` (per-axis sign).
    pub fn corner(&self, id: MobjectId, dir: Vec2) -> StoryResult<Point> {
        Ok(critical_point(self.bounding_box(id)?, dir))
    }

    /// Top-center point.
    pub fn top(&self, id: MobjectId) -> StoryResult<Point> {
        self.corner(id, Vec2::new(0.0, 1.0))
    }

    /// Bottom-center point.
    pub fn bottom(&self, id: MobjectId) -> StoryResult<Point> {
        self.corner(id, Vec2::new(0.0, -1.0))
    }

    /// Left-center point.
    pub fn left(&self, id: MobjectId) -> StoryResult<Point> {
        self.corner(id, Vec2::new(-1.0, 0.0))
    }

    /// Right-center point.
    pub fn right(&self, id: MobjectId) -> StoryResult<Point> {
        self.corner(id, Vec2::new(1.0, 0.0))
    }

    /// Bounding-box width.
    pub fn width(&self, id: MobjectId) -> StoryResult<f64> {
        Ok(self.bounding_box(id)?.width())
    }

    /// Bounding-box height.
    pub fn height(&self, id: MobjectId) -> StoryResult<f64> {
        Ok(self.bounding_box(id)?.height())
    }

    /// First point of the first path under `id`.
    pub fn start(&self, id: MobjectId) -> StoryResult<Point> {
        for l in self.leaves(id)? {
            if let Geometry::Path(p) = &self.leaf(l)?.geometry
                && let Some(s) = path_ops::start_point(p)
            {
                return Ok(s);
            }
        }
        Err(StoryError::layout(format!("mobject {} has no path", id.0)))
    }

    /// Last point of the last path under `id`. Closed paths (arrow tips) end where they start.
    pub fn end(&self, id: MobjectId) -> StoryResult<Point> {
        for l in self.leaves(id)?.into_iter().rev() {
            if let Geometry::Path(p) = &self.leaf(l)?.geometry {
                let e = if path_ops::is_closed(p) {
                    path_ops::start_point(p)
                } else {
                    path_ops::end_point(p)
                };
                if let Some(e) = e {
                    return Ok(e);
                }
            }
        }
        Err(StoryError::layout(format!("mobject {} has no path", id.0)))
    }

    // ---- transforms --------------------------------------------------------------------------

    /// Apply `a` to every leaf under `id`.
    pub fn apply_affine(&mut self, id: MobjectId, a: Affine) -> StoryResult<()> {
        for l in self.leaves(id)? {
            self.leaf_mut(l)?.apply_affine(a);
        }
        Ok(())
    }

    /// Translate.
    pub fn shift(&mut self, id: MobjectId, v: Vec2) -> StoryResult<()> {
        self.apply_affine(id, Affine::translate(v))
    }

    /// Move the bounding-box center to `p`.
    pub fn move_to(&mut self, id: MobjectId, p: Point) -> StoryResult<()> {
        let c = self.center(id)?;
        self.shift(id, p - c)
    }

    /// Move to the frame center.
    pub fn center_on_frame(&mut self, id: MobjectId) -> StoryResult<()> {
        self.move_to(id, Point::ORIGIN)
    }

    /// Scale about the bounding-box center.
    pub fn scale(&mut self, id: MobjectId, factor: f64) -> StoryResult<()> {
        let c = self.center(id)?;
        self.scale_about(id, factor, c)
    }

    /// Scale about `about`.
    pub fn scale_about(&mut self, id: MobjectId, factor: f64, about: Point) -> StoryResult<()> {
        self.apply_affine(id, about_point(Affine::scale(factor), about))
    }

    /// Stretch along one axis (`0` = x, `1` = y) about the center.
    pub fn stretch(&mut self, id: MobjectId, factor: f64, axis: usize) -> StoryResult<()> {
        let c = self.center(id)?;
        let a = if axis == 0 {
            Affine::scale_non_uniform(factor, 1.0)
        } else {
            Affine::scale_non_uniform(1.0, factor)
        };
        self.apply_affine(id, about_point(a, c))
    }

    /// Rotate counter-clockwise about the center.
    pub fn rotate(&mut self, id: MobjectId, angle: f64) -> StoryResult<()> {
        let c = self.center(id)?;
        self.rotate_about(id, angle, c)
    }

    /// Rotate counter-clockwise about `about`.
    pub fn rotate_about(&mut self, id: MobjectId, angle: f64, about: Point) -> StoryResult<()> {
        self.apply_affine(id, about_point(Affine::rotate(angle), about))
    }

    /// Move, rotate and scale so the path runs from `start` to `end`.
    pub fn put_start_and_end_on(
        &mut self,
        id: MobjectId,
        start: Point,
        end: Point,
    ) -> StoryResult<()> {
        let s0 = self.start(id)?;
        let e0 = self.end(id)?;
        let from = e0 - s0;
        let to = end - start;
        if from.hypot() < 1e-12 {
            return self.shift(id, start - s0);
        }
        let scale = to.hypot() / from.hypot();
        let angle = to.atan2() - from.atan2();
        let a = Affine::translate(start.to_vec2())
            * Affine::rotate(angle)
            * Affine::scale(scale)
            * Affine::translate(-s0.to_vec2());
        self.apply_affine(id, a)
    }

    // ---- layout ------------------------------------------------------------------------------

    /// Place `id` beside `target` in direction `dir`, separated by `buff`.
    pub fn next_to(
        &mut self,
        id: MobjectId,
        target: MobjectId,
        dir: Vec2,
        buff: f64,
    ) -> StoryResult<()> {
        let r = self.bounding_box(target)?;
        self.next_to_rect(id, r, dir, buff)
    }

    /// Place `id` beside a point.
    pub fn next_to_point(
        &mut self,
        id: MobjectId,
        p: Point,
        dir: Vec2,
        buff: f64,
    ) -> StoryResult<()> {
        self.next_to_rect(id, Rect::from_points(p, p), dir, buff)
    }

    fn next_to_rect(&mut self, id: MobjectId, r: Rect, dir: Vec2, buff: f64) -> StoryResult<()> {
        let target = critical_point(r, dir);
        let mine = self.corner(id, -dir)?;
        self.shift(id, target - mine + dir * buff)
    }

    /// Push against a frame edge, leaving `buff`.
    pub fn to_edge(&mut self, id: MobjectId, dir: Vec2, buff: f64) -> StoryResult<()> {
        let f = self.frame;
        let target = Vec2::new(sign(dir.x) * f.width * 0.5, sign(dir.y) * f.height * 0.5);
        let mine = self.corner(id, dir)?.to_vec2();
        let v = target - mine - dir * buff;
        self.shift(id, Vec2::new(v.x * sign(dir.x).abs(), v.y * sign(dir.y).abs()))
    }

    /// Push into a frame corner.
    pub fn to_corner(&mut self, id: MobjectId, dir: Vec2, buff: f64) -> StoryResult<()> {
        self.to_edge(id, dir, buff)
    }

    /// Line the children of a group up along `dir`, `buff` apart, keeping the group's center.
    pub fn arrange(&mut self, id: MobjectId, dir: Vec2, buff: f64) -> StoryResult<()> {
        let c = self.center(id)?;
        let kids = self.children(id)?.to_vec();
        for pair in kids.windows(2) {
            self.next_to(pair[1], pair[0], dir, buff)?;
        }
        self.move_to(id, c)
    }

    /// Align the `dir` edge of `id` with the same edge of `target`.
    pub fn align_to(&mut self, id: MobjectId, target: MobjectId, dir: Vec2) -> StoryResult<()> {
        let t = self.corner(target, dir)?;
        let m = self.corner(id, dir)?;
        let v = t - m;
        self.shift(id, Vec2::new(v.x * sign(dir.x).abs(), v.y * sign(dir.y).abs()))
    }

    // ---- paint -------------------------------------------------------------------------------

    fn for_each_leaf(&mut self, id: MobjectId, mut f: impl FnMut(&mut Leaf)) -> StoryResult<()> {
        for l in self.leaves(id)? {
            f(self.leaf_mut(l)?);
        }
        Ok(())
    }

    /// Stroke and fill color.
    pub fn set_color(&mut self, id: MobjectId, c: Color) -> StoryResult<()> {
        self.for_each_leaf(id, |l| l.style.set_color(c))
    }

    /// Fill color and opacity.
    pub fn set_fill(&mut self, id: MobjectId, c: Color, opacity: f64) -> StoryResult<()> {
        self.for_each_leaf(id, |l| {
            l.style.fill = c;
            l.style.fill_opacity = opacity;
            l.style.gradient = None;
        })
    }

    /// Fill opacity only.
    pub fn set_fill_opacity(&mut self, id: MobjectId, opacity: f64) -> StoryResult<()> {
        self.for_each_leaf(id, |l| l.style.fill_opacity = opacity)
    }

    /// Stroke color and width.
    pub fn set_stroke(&mut self, id: MobjectId, c: Color, width: f64) -> StoryResult<()> {
        self.for_each_leaf(id, |l| {
            l.style.stroke = c;
            l.style.stroke_width = width;
        })
    }

    /// Stroke width only.
    pub fn set_stroke_width(&mut self, id: MobjectId, width: f64) -> StoryResult<()> {
        self.for_each_leaf(id, |l| l.style.stroke_width = width)
    }

    /// Stroke opacity only.
    pub fn set_stroke_opacity(&mut self, id: MobjectId, opacity: f64) -> StoryResult<()> {
        self.for_each_leaf(id, |l| l.style.stroke_opacity = opacity)
    }

    /// Overall opacity multiplier.
    pub fn set_opacity(&mut self, id: MobjectId, opacity: f64) -> StoryResult<()> {
        let o = opacity.clamp(0.0, 1.0);
        self.for_each_leaf(id, |l| l.opacity = o)
    }

    /// Left-to-right fill gradient on every leaf.
    pub fn set_color_by_gradient(&mut self, id: MobjectId, colors: &[Color]) -> StoryResult<()> {
        match colors {
            [] => Err(StoryError::validation("gradient needs at least one color")),
            [c] => self.set_color(id, *c),
            _ => self.for_each_leaf(id, |l| {
                l.style.stroke = colors[0];
                l.style.gradient = Some(colors.to_vec());
            }),
        }
    }

    // ---- display list ------------------------------------------------------------------------

    /// Top-level ids in draw order.
    pub fn mobjects(&self) -> &[MobjectId] {
        &self.display
    }

    /// Add to the top of the display list, moving ids that are already present.
    pub fn add(&mut self, ids: &[MobjectId]) -> StoryResult<()> {
        for id in ids {
            self.node(*id)?;
        }
        self.display.retain(|d| !ids.contains(d));
        self.display.extend_from_slice(ids);
        Ok(())
    }

    /// Add to the bottom of the display list.
    pub fn add_to_back(&mut self, ids: &[MobjectId]) -> StoryResult<()> {
        for id in ids {
            self.node(*id)?;
        }
        self.display.retain(|d| !ids.contains(d));
        let mut front = ids.to_vec();
        front.append(&mut self.display);
        self.display = front;
        Ok(())
    }

    /// `true` when `id` is drawn, directly or as part of a displayed group.
    pub fn is_displayed(&self, id: MobjectId) -> bool {
        self.display.iter().any(|d| {
            self.family(*d)
                .map(|fam| fam.contains(&id))
                .unwrap_or(false)
        })
    }

    /// Add `id` unless it is already drawn.
    pub(crate) fn ensure_displayed(&mut self, id: MobjectId) -> StoryResult<()> {
        if self.is_displayed(id) {
            return Ok(());
        }
        self.add(&[id])
    }

    /// Remove `ids` and their descendants from the display list. Displayed groups containing a
    /// removed node are replaced by their remaining children.
    pub fn remove(&mut self, ids: &[MobjectId]) -> StoryResult<()> {
        let mut doomed = Vec::new();
        for id in ids {
            for f in self.family(*id)? {
                if !doomed.contains(&f) {
                    doomed.push(f);
                }
            }
        }
        let current = std::mem::take(&mut self.display);
        let mut out = Vec::with_capacity(current.len());
        self.restructure(&current, &doomed, &mut out)?;
        self.display = out;
        Ok(())
    }

    fn restructure(
        &self,
        list: &[MobjectId],
        remove: &[MobjectId],
        out: &mut Vec<MobjectId>,
    ) -> StoryResult<()> {
        for id in list {
            if remove.contains(id) {
                continue;
            }
            let fam = self.family(*id)?;
            if fam.iter().any(|f| remove.contains(f)) {
                let kids = self.children(*id)?.to_vec();
                self.restructure(&kids, remove, out)?;
            } else {
                out.push(*id);
            }
        }
        Ok(())
    }

    /// Every displayed leaf in draw order.
    pub fn displayed_leaves(&self) -> StoryResult<Vec<MobjectId>> {
        let mut out = Vec::new();
        let mut seen = vec![false; self.nodes.len()];
        for d in &self.display {
            self.collect_leaves(*d, &mut out, &mut seen)?;
        }
        Ok(out)
    }
}

/// `a` conjugated so it acts about `p`.
pub(crate) fn about_point(a: Affine, p: Point) -> Affine {
    Affine::translate(p.to_vec2()) * a * Affine::translate(-p.to_vec2())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/state.rs"]
mod tests;
