use std::collections::HashMap;

use rayon::prelude::*;

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{StoryError, StoryResult},
    render::backend::{FrameRGBA, Renderer, rasterize},
    render::fingerprint::{FrameFingerprint, fingerprint_svg},
    render::svg::frame_to_svg,
    timeline::model::Timeline,
};

#[derive(Clone, Debug)]
/// Threading and chunking controls for multi-frame rendering.
pub struct RenderThreading {
    /// Enable parallel rendering when `true`.
    pub parallel: bool,
    /// Chunk size in frames for batched scheduling.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
    /// Render identical frames once per chunk.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated rendering counters.
pub struct RenderStats {
    /// Total requested frames.
    pub frames_total: u64,
    /// Frames that were actually rasterized.
    pub frames_rendered: u64,
    /// Frames reused via static-frame elision.
    pub frames_elided: u64,
}

impl RenderStats {
    fn absorb(&mut self, other: RenderStats) {
        self.frames_total += other.frames_total;
        self.frames_rendered += other.frames_rendered;
        self.frames_elided += other.frames_elided;
    }
}

/// Render `range` of `tl` and stream the frames into `sink`.
///
/// The sink receives frames in strictly increasing index order regardless of `threading`; the
/// pixels are identical in sequential and parallel mode.
#[tracing::instrument(
    level = "debug",
    skip(tl, renderer, sink, threading),
    fields(start = range.start.0, end = range.end.0, parallel = threading.parallel)
)]
pub fn render_range(
    tl: &Timeline,
    renderer: &Renderer,
    range: FrameRange,
    sink: &mut dyn FrameSink,
    threading: &RenderThreading,
) -> StoryResult<RenderStats> {
    if range.is_empty() {
        return Err(StoryError::validation("render range must be non-empty"));
    }
    let total = tl.duration_frames();
    if range.end.0 > total {
        return Err(StoryError::validation(format!(
            "render range end {} is past the timeline's {total} frames",
            range.end.0
        )));
    }

    let canvas = tl.canvas();
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: tl.fps,
        background: tl.background,
    })?;

    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };
    let chunk_size = normalized_chunk_size(threading.chunk_size);

    let mut stats = RenderStats::default();
    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let out = render_chunk(
            tl,
            renderer,
            chunk_start,
            chunk_end,
            threading.static_frame_elision,
            pool.as_ref(),
        )?;
        for (i, &u) in out.frame_to_unique.iter().enumerate() {
            let frame = out.unique_frames.get(u).ok_or_else(|| {
                StoryError::render("internal error: unique frame index out of range")
            })?;
            sink.push_frame(FrameIndex(chunk_start + i as u64), frame)?;
        }
        tracing::debug!(
            chunk_start,
            chunk_end,
            rendered = out.stats.frames_rendered,
            elided = out.stats.frames_elided,
            "chunk done"
        );
        stats.absorb(out.stats);
        chunk_start = chunk_end;
    }

    sink.end()?;
    Ok(stats)
}

struct ChunkOut {
    unique_frames: Vec<FrameRGBA>,
    frame_to_unique: Vec<usize>,
    stats: RenderStats,
}

fn render_chunk(
    tl: &Timeline,
    renderer: &Renderer,
    start: u64,
    end: u64,
    elide: bool,
    pool: Option<&rayon::ThreadPool>,
) -> StoryResult<ChunkOut> {
    let sample = |f: u64| -> StoryResult<String> {
        Ok(frame_to_svg(&tl.sample_frame(FrameIndex(f))?))
    };
    let svgs: Vec<String> = match pool {
        Some(pool) => pool.install(|| {
            (start..end)
                .into_par_iter()
                .map(sample)
                .collect::<StoryResult<Vec<_>>>()
        })?,
        None => (start..end).map(sample).collect::<StoryResult<Vec<_>>>()?,
    };

    let mut frame_to_unique = Vec::with_capacity(svgs.len());
    let mut unique_indices = Vec::<usize>::new();
    if elide {
        let mut seen = HashMap::<FrameFingerprint, usize>::new();
        for (i, svg) in svgs.iter().enumerate() {
            let slot = *seen.entry(fingerprint_svg(svg)).or_insert_with(|| {
                unique_indices.push(i);
                unique_indices.len() - 1
            });
            frame_to_unique.push(slot);
        }
    } else {
        unique_indices.extend(0..svgs.len());
        frame_to_unique.extend(0..svgs.len());
    }

    let rendered: Vec<StoryResult<FrameRGBA>> = match pool {
        Some(pool) => pool.install(|| {
            unique_indices
                .par_iter()
                .map_init(|| renderer.options(), |opts, &i| rasterize(&svgs[i], opts))
                .collect()
        }),
        None => {
            let opts = renderer.options();
            unique_indices
                .iter()
                .map(|&i| rasterize(&svgs[i], &opts))
                .collect()
        }
    };
    let mut unique_frames = Vec::with_capacity(rendered.len());
    for item in rendered {
        unique_frames.push(item?);
    }

    let total = svgs.len() as u64;
    let rendered_count = unique_frames.len() as u64;
    Ok(ChunkOut {
        unique_frames,
        frame_to_unique,
        stats: RenderStats {
            frames_total: total,
            frames_rendered: rendered_count,
            frames_elided: total.saturating_sub(rendered_count),
        },
    })
}

fn build_thread_pool(threads: Option<usize>) -> StoryResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(StoryError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| StoryError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
