use std::ops::{Deref, DerefMut};

use crate::{
    animation::anims::{AnimKind, Animation},
    animation::rate::RateFunc,
    animation::track::Resolver,
    animation::updater::{Attached, Updater},
    foundation::core::{Canvas, Fps},
    foundation::error::{StoryError, StoryResult},
    foundation::frame::SceneFrame,
    foundation::math::Rng64,
    scene::mobject::MobjectId,
    scene::state::SceneState,
    style::color::{BLACK, Color},
    timeline::model::{Segment, Timeline},
};

/// Records play and wait commands into a [`Timeline`].
///
/// Dereferences to the live [`SceneState`], so construction, layout and instant `add`/`remove`
/// calls go straight to the scene graph between plays.
pub struct Scene {
    title: String,
    state: SceneState,
    fps: Fps,
    background: Color,
    segments: Vec<Segment>,
    updaters: Vec<Attached>,
    time_secs: f64,
    seed: u64,
}

impl Deref for Scene {
    type Target = SceneState;

    fn deref(&self) -> &SceneState {
        &self.state
    }
}

impl DerefMut for Scene {
    fn deref_mut(&mut self) -> &mut SceneState {
        &mut self.state
    }
}

impl Scene {
    /// Empty scene on a black background.
    pub fn new(title: impl Into<String>, canvas: Canvas, fps: Fps, seed: u64) -> Self {
        Self {
            title: title.into(),
            state: SceneState::new(SceneFrame::for_canvas(canvas)),
            fps,
            background: BLACK,
            segments: Vec::new(),
            updaters: Vec::new(),
            time_secs: 0.0,
            seed,
        }
    }

    /// Background fill.
    pub fn set_background(&mut self, c: Color) {
        self.background = c;
    }

    /// Current scene time in seconds.
    pub fn time(&self) -> f64 {
        self.time_secs
    }

    /// Deterministic generator for this scene, derived from the seed and `stream`.
    pub fn rng(&self, stream: u64) -> Rng64 {
        Rng64::new(self.seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Attach time-driven motion to `target` from now on.
    pub fn add_updater(&mut self, target: MobjectId, updater: Updater) -> StoryResult<()> {
        self.state.node(target)?;
        self.updaters.push(Attached {
            target,
            since_secs: self.time_secs,
            updater,
        });
        Ok(())
    }

    /// Play `anims` together; the play lasts as long as the longest one.
    pub fn play(&mut self, anims: Vec<Animation>) -> StoryResult<()> {
        self.run_play(anims, None, None)
    }

    /// Play `anims` together, each stretched to `secs`.
    pub fn play_for(&mut self, secs: f64, anims: Vec<Animation>) -> StoryResult<()> {
        self.run_play(anims, Some(secs), None)
    }

    /// Play `anims` together over `secs` with one rate function for all.
    pub fn play_with(
        &mut self,
        secs: f64,
        rate: RateFunc,
        anims: Vec<Animation>,
    ) -> StoryResult<()> {
        self.run_play(anims, Some(secs), Some(rate))
    }

    /// Hold the current state.
    pub fn wait(&mut self, secs: f64) -> StoryResult<()> {
        if secs.is_nan() || secs < 0.0 {
            return Err(StoryError::animation(format!("wait duration {secs} is negative")));
        }
        if secs == 0.0 {
            return Ok(());
        }
        tracing::debug!(start = self.time_secs, duration = secs, "wait");
        self.segments.push(Segment {
            start_secs: self.time_secs,
            duration_secs: secs,
            base: self.state.clone(),
            tracks: Vec::new(),
        });
        self.time_secs += secs;
        Ok(())
    }

    fn prepare_display(&mut self, kind: &AnimKind) -> StoryResult<()> {
        match kind {
            AnimKind::LaggedStart { anims, .. } => {
                for a in anims {
                    self.prepare_display(&a.kind)?;
                }
                Ok(())
            }
            k if k.is_introducer() => match k.target() {
                Some(t) => self.state.add(&[t]),
                None => Ok(()),
            },
            k => match k.target() {
                Some(t) => self.state.ensure_displayed(t),
                None => Ok(()),
            },
        }
    }

    fn run_play(
        &mut self,
        anims: Vec<Animation>,
        run_time: Option<f64>,
        rate: Option<RateFunc>,
    ) -> StoryResult<()> {
        if anims.is_empty() {
            return Err(StoryError::animation("play needs at least one animation"));
        }
        let times: Vec<f64> = anims
            .iter()
            .map(|a| run_time.unwrap_or_else(|| a.natural_run_time()))
            .collect();
        if let Some(bad) = times.iter().find(|t| t.is_nan() || **t <= 0.0) {
            return Err(StoryError::animation(format!("run time {bad} must be positive")));
        }
        let duration = times.iter().copied().fold(0.0, f64::max);

        for a in &anims {
            self.prepare_display(&a.kind)?;
        }
        let names: Vec<&'static str> = anims.iter().map(Animation::name).collect();

        let base = self.state.clone();
        let mut resolver = Resolver::new(base.clone());
        for (a, rt) in anims.into_iter().zip(times) {
            resolver.resolve(a, 0.0, rt / duration, rate)?;
        }
        let (tracks, end) = resolver.finish()?;

        tracing::debug!(
            start = self.time_secs,
            duration,
            tracks = tracks.len(),
            anims = ?names,
            "play"
        );
        self.segments.push(Segment {
            start_secs: self.time_secs,
            duration_secs: duration,
            base,
            tracks,
        });
        self.state = end;
        self.time_secs += duration;
        Ok(())
    }

    /// Seal the recording.
    pub fn finish(self) -> StoryResult<Timeline> {
        let tl = Timeline {
            title: self.title,
            frame: self.state.frame(),
            fps: self.fps,
            background: self.background,
            segments: self.segments,
            updaters: self.updaters,
            final_state: self.state,
            seed: self.seed,
        };
        tl.validate()?;
        Ok(tl)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/director.rs"]
mod tests;
