use crate::{
    animation::rate::RateFunc,
    foundation::core::{Point, Vec2},
    foundation::error::StoryResult,
    scene::mobject::MobjectId,
    scene::state::SceneState,
    style::color::Color,
};

/// Mutation applied by [`Animation::animate`] to a copy of the scene state.
pub type AnimateFn = Box<dyn FnOnce(&mut SceneState) -> StoryResult<()>>;

/// Default highlight color of `Indicate` and `Flash` (`#FFFF00`).
pub const HIGHLIGHT: Color = Color::rgba(1.0, 1.0, 0.0, 1.0);

/// Where a flash is centered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum FlashCenter {
    /// A fixed scene point.
    Point(Point),
    /// The center of a mobject when the play starts.
    Mobject(MobjectId),
}

/// What an animation does.
pub(crate) enum AnimKind {
    /// Fade a mobject in, optionally arriving from `-shift` and from `scale`.
    FadeIn {
        target: MobjectId,
        shift: Vec2,
        scale: f64,
    },
    /// Fade a mobject out and remove it from the display list.
    FadeOut {
        target: MobjectId,
        shift: Vec2,
        scale: f64,
    },
    /// Handwriting reveal: left-to-right wipe for text, stroke drawing for paths.
    Write { target: MobjectId },
    /// Partial stroke drawing by arc length; `lag_ratio` staggers the leaves.
    Create { target: MobjectId, lag_ratio: f64 },
    /// Scale up from nothing about the center.
    GrowFromCenter {
        target: MobjectId,
        point_color: Option<Color>,
    },
    /// Scale up from the start point of an arrow.
    GrowArrow { target: MobjectId },
    /// Morph `source` into the shape and paint of `target`.
    Transform {
        source: MobjectId,
        target: MobjectId,
    },
    /// Interpolate every leaf toward the state produced by `build`.
    Animate { target: MobjectId, build: AnimateFn },
    /// Rotate by `angle` radians about `about` (the center when `None`).
    Rotate {
        target: MobjectId,
        angle: f64,
        about: Option<Point>,
    },
    /// Briefly scale up and recolor.
    Indicate {
        target: MobjectId,
        color: Color,
        scale_factor: f64,
    },
    /// Radial lines flashing outward from a center.
    Flash {
        center: FlashCenter,
        color: Color,
        num_lines: usize,
        line_length: f64,
        flash_radius: f64,
        stroke_width: f64,
    },
    /// A bump traveling left to right across the mobject.
    ApplyWave { target: MobjectId, amplitude: f64 },
    /// Sub-animations started one after another, overlapping by `1 - lag_ratio`.
    LaggedStart {
        anims: Vec<Animation>,
        lag_ratio: f64,
    },
}

impl std::fmt::Debug for AnimKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl AnimKind {
    /// Short name used in logs and errors.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::FadeIn { .. } => "FadeIn",
            Self::FadeOut { .. } => "FadeOut",
            Self::Write { .. } => "Write",
            Self::Create { .. } => "Create",
            Self::GrowFromCenter { .. } => "GrowFromCenter",
            Self::GrowArrow { .. } => "GrowArrow",
            Self::Transform { .. } => "Transform",
            Self::Animate { .. } => "Animate",
            Self::Rotate { .. } => "Rotate",
            Self::Indicate { .. } => "Indicate",
            Self::Flash { .. } => "Flash",
            Self::ApplyWave { .. } => "ApplyWave",
            Self::LaggedStart { .. } => "LaggedStart",
        }
    }

    /// The mobject this animation acts on, if any.
    pub(crate) fn target(&self) -> Option<MobjectId> {
        match self {
            Self::FadeIn { target, .. }
            | Self::FadeOut { target, .. }
            | Self::Write { target }
            | Self::Create { target, .. }
            | Self::GrowFromCenter { target, .. }
            | Self::GrowArrow { target }
            | Self::Animate { target, .. }
            | Self::Rotate { target, .. }
            | Self::Indicate { target, .. }
            | Self::ApplyWave { target, .. } => Some(*target),
            Self::Transform { source, .. } => Some(*source),
            Self::Flash { .. } | Self::LaggedStart { .. } => None,
        }
    }

    /// Introducers bring their target to the top of the display list.
    pub(crate) fn is_introducer(&self) -> bool {
        matches!(
            self,
            Self::FadeIn { .. }
                | Self::Write { .. }
                | Self::Create { .. }
                | Self::GrowFromCenter { .. }
                | Self::GrowArrow { .. }
        )
    }
}

/// One animation with its timing.
///
/// Built with the constructors below and refined with the chained setters, e.g.
/// `Animation::fade_in(id).shift(UP * 0.3).run_time(0.5)`. Setters that do not apply to the
/// animation kind are ignored.
#[derive(Debug)]
pub struct Animation {
    pub(crate) kind: AnimKind,
    pub(crate) run_time: Option<f64>,
    pub(crate) rate: Option<RateFunc>,
}

impl Animation {
    fn new(kind: AnimKind) -> Self {
        Self {
            kind,
            run_time: None,
            rate: None,
        }
    }

    /// Fade in.
    pub fn fade_in(target: MobjectId) -> Self {
        Self::new(AnimKind::FadeIn {
            target,
            shift: Vec2::ZERO,
            scale: 1.0,
        })
    }

    /// Fade out and remove.
    pub fn fade_out(target: MobjectId) -> Self {
        Self::new(AnimKind::FadeOut {
            target,
            shift: Vec2::ZERO,
            scale: 1.0,
        })
    }

    /// Write.
    pub fn write(target: MobjectId) -> Self {
        Self::new(AnimKind::Write { target })
    }

    /// Create, drawing the leaves one after another.
    pub fn create(target: MobjectId) -> Self {
        Self::new(AnimKind::Create {
            target,
            lag_ratio: 1.0,
        })
    }

    /// Grow from the center.
    pub fn grow_from_center(target: MobjectId) -> Self {
        Self::new(AnimKind::GrowFromCenter {
            target,
            point_color: None,
        })
    }

    /// Grow an arrow from its start.
    pub fn grow_arrow(target: MobjectId) -> Self {
        Self::new(AnimKind::GrowArrow { target })
    }

    /// Morph `source` into `target`. `target` itself is never displayed.
    pub fn transform(source: MobjectId, target: MobjectId) -> Self {
        Self::new(AnimKind::Transform { source, target })
    }

    /// Animate the mutations `build` applies.
    pub fn animate(
        target: MobjectId,
        build: impl FnOnce(&mut SceneState) -> StoryResult<()> + 'static,
    ) -> Self {
        Self::new(AnimKind::Animate {
            target,
            build: Box::new(build),
        })
    }

    /// Rotate about the center.
    pub fn rotate(target: MobjectId, angle: f64) -> Self {
        Self::new(AnimKind::Rotate {
            target,
            angle,
            about: None,
        })
    }

    /// Indicate (yellow, 1.2x).
    pub fn indicate(target: MobjectId) -> Self {
        Self::new(AnimKind::Indicate {
            target,
            color: HIGHLIGHT,
            scale_factor: 1.2,
        })
        .rate(RateFunc::ThereAndBack)
    }

    /// Flash around a mobject's center.
    pub fn flash(target: MobjectId) -> Self {
        Self::flash_from(FlashCenter::Mobject(target))
    }

    /// Flash around a fixed point.
    pub fn flash_at(point: Point) -> Self {
        Self::flash_from(FlashCenter::Point(point))
    }

    fn flash_from(center: FlashCenter) -> Self {
        Self::new(AnimKind::Flash {
            center,
            color: HIGHLIGHT,
            num_lines: 12,
            line_length: 0.2,
            flash_radius: 0.1,
            stroke_width: 3.0,
        })
    }

    /// Traveling wave, 0.2 units high, two seconds long.
    pub fn apply_wave(target: MobjectId) -> Self {
        Self::new(AnimKind::ApplyWave {
            target,
            amplitude: 0.2,
        })
        .run_time(2.0)
    }

    /// Stagger `anims` so each starts `lag_ratio` of the way into the previous one.
    pub fn lagged_start(anims: Vec<Animation>, lag_ratio: f64) -> Self {
        Self::new(AnimKind::LaggedStart { anims, lag_ratio })
    }

    /// Explicit duration in seconds.
    pub fn run_time(mut self, secs: f64) -> Self {
        self.run_time = Some(secs);
        self
    }

    /// Rate function.
    pub fn rate(mut self, rate: RateFunc) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Arrival offset for `FadeIn`, departure offset for `FadeOut`.
    pub fn shift(mut self, v: Vec2) -> Self {
        if let AnimKind::FadeIn { shift, .. } | AnimKind::FadeOut { shift, .. } = &mut self.kind {
            *shift = v;
        }
        self
    }

    /// Start scale for `FadeIn`, end scale for `FadeOut`, peak scale for `Indicate`.
    pub fn scale(mut self, s: f64) -> Self {
        match &mut self.kind {
            AnimKind::FadeIn { scale, .. } | AnimKind::FadeOut { scale, .. } => *scale = s,
            AnimKind::Indicate { scale_factor, .. } => *scale_factor = s,
            _ => {}
        }
        self
    }

    /// Color for `Indicate` and `Flash`, start color for `GrowFromCenter`.
    pub fn color(mut self, c: Color) -> Self {
        match &mut self.kind {
            AnimKind::Indicate { color, .. } | AnimKind::Flash { color, .. } => *color = c,
            AnimKind::GrowFromCenter { point_color, .. } => *point_color = Some(c),
            _ => {}
        }
        self
    }

    /// Leaf stagger for `Create`.
    pub fn lag_ratio(mut self, r: f64) -> Self {
        match &mut self.kind {
            AnimKind::Create { lag_ratio, .. } | AnimKind::LaggedStart { lag_ratio, .. } => {
                *lag_ratio = r
            }
            _ => {}
        }
        self
    }

    /// Pivot for `Rotate`.
    pub fn about(mut self, p: Point) -> Self {
        if let AnimKind::Rotate { about, .. } = &mut self.kind {
            *about = Some(p);
        }
        self
    }

    /// Line count for `Flash`.
    pub fn num_lines(mut self, n: usize) -> Self {
        if let AnimKind::Flash { num_lines, .. } = &mut self.kind {
            *num_lines = n;
        }
        self
    }

    /// Line length for `Flash`.
    pub fn line_length(mut self, len: f64) -> Self {
        if let AnimKind::Flash { line_length, .. } = &mut self.kind {
            *line_length = len;
        }
        self
    }

    /// Inner radius for `Flash`.
    pub fn flash_radius(mut self, r: f64) -> Self {
        if let AnimKind::Flash { flash_radius, .. } = &mut self.kind {
            *flash_radius = r;
        }
        self
    }

    /// Height of the `ApplyWave` bump.
    pub fn amplitude(mut self, a: f64) -> Self {
        if let AnimKind::ApplyWave { amplitude, .. } = &mut self.kind {
            *amplitude = a;
        }
        self
    }

    /// Name of the animation kind, e.g. `"FadeIn"`.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Duration this animation asks for: its own run time, or the staggered span of a
    /// `LaggedStart`, or one second.
    pub fn natural_run_time(&self) -> f64 {
        if let Some(rt) = self.run_time {
            return rt;
        }
        match &self.kind {
            AnimKind::LaggedStart { anims, lag_ratio } => lagged_windows(anims, *lag_ratio)
                .iter()
                .map(|(_, e)| *e)
                .fold(0.0, f64::max),
            _ => 1.0,
        }
    }
}

/// Start and end of each sub-animation in seconds, before any run-time override.
pub(crate) fn lagged_windows(anims: &[Animation], lag_ratio: f64) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(anims.len());
    let mut start = 0.0;
    for a in anims {
        let end = start + a.natural_run_time();
        out.push((start, end));
        start += (end - start) * lag_ratio;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anims.rs"]
mod tests;
