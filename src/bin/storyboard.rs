use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storyboard::{
    FfmpegSink, FfmpegSinkOpts, FrameIndex, FrameRange, PngSequenceSink, Quality, RenderConfig,
    Renderer, SceneConfig, SceneId, Timeline,
};

#[derive(Parser, Debug)]
#[command(name = "storyboard", version, about = "Render the explainer scenes")]
struct Cli {
    /// Default log filter (`error`, `warn`, `info`, `debug`, `trace`). `RUST_LOG` wins when set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List scene ids, titles and durations.
    List,
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a PNG sequence.
    Frames(FramesArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Write the recorded timeline as JSON.
    Dump(DumpArgs),
    /// Write the SVG document drawn at one instant.
    Svg(SvgArgs),
}

#[derive(Args, Debug)]
struct SceneOpts {
    /// Scene to build.
    #[arg(long, value_enum)]
    scene: SceneId,

    /// Render config JSON. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Size and frame-rate preset.
    #[arg(long, value_enum)]
    quality: Option<Quality>,

    /// Seed for the scene's random streams.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneOpts,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Render chunks on a rayon pool.
    #[arg(long)]
    parallel: bool,

    /// Worker count for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per scheduling chunk.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Rasterize every frame even when it repeats the previous one.
    #[arg(long)]
    no_elision: bool,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneOpts,

    /// Directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// First frame (inclusive).
    #[arg(long)]
    start: Option<u64>,

    /// Last frame (exclusive). Defaults to the end of the scene.
    #[arg(long)]
    end: Option<u64>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneOpts,

    /// Frame index (0-based).
    #[arg(long, conflicts_with = "time", required_unless_present = "time")]
    frame: Option<u64>,

    /// Scene time in seconds.
    #[arg(long)]
    time: Option<f64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct DumpArgs {
    #[command(flatten)]
    scene: SceneOpts,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SvgArgs {
    #[command(flatten)]
    scene: SceneOpts,

    /// Scene time in seconds.
    #[arg(long)]
    time: f64,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.cmd {
        Command::List => cmd_list(),
        Command::Render(args) => cmd_render(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Dump(args) => cmd_dump(args),
        Command::Svg(args) => cmd_svg(args),
    }
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(_) => EnvFilter::try_from_default_env().context("parse RUST_LOG")?,
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("parse --log-level '{level}'"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Config file, then flags.
fn load_config(opts: &SceneOpts) -> anyhow::Result<RenderConfig> {
    let mut cfg = match &opts.config {
        Some(path) => RenderConfig::from_path(path)?,
        None => RenderConfig::default(),
    };
    if let Some(q) = opts.quality {
        cfg.apply_quality(q);
    }
    if let Some(seed) = opts.seed {
        cfg.seed = seed;
    }
    Ok(cfg)
}

fn build(opts: &SceneOpts, cfg: &RenderConfig) -> anyhow::Result<Timeline> {
    cfg.validate().context("invalid render config")?;
    let scene_cfg = SceneConfig::from_render_config(cfg)?;
    let tl = opts
        .scene
        .build(&scene_cfg)
        .with_context(|| format!("build scene '{}'", opts.scene))?;
    tracing::info!(
        scene = %opts.scene,
        secs = tl.duration_secs(),
        frames = tl.duration_frames(),
        "timeline ready"
    );
    Ok(tl)
}

fn cmd_list() -> anyhow::Result<()> {
    let cfg = SceneConfig::default();
    for id in SceneId::all() {
        let tl = id.build(&cfg).with_context(|| format!("build scene '{id}'"))?;
        println!("{id:<16} {:>6.1}s  {}", tl.duration_secs(), id.title());
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.scene)?;
    cfg.parallel |= args.parallel;
    if args.threads.is_some() {
        cfg.threads = args.threads;
    }
    if let Some(n) = args.chunk_size {
        cfg.chunk_size = n;
    }
    if args.no_elision {
        cfg.static_frame_elision = false;
    }
    cfg.validate_for_video().context("invalid render config")?;
    if !storyboard::is_ffmpeg_on_path() {
        anyhow::bail!("ffmpeg was not found on PATH");
    }

    let tl = build(&args.scene, &cfg)?;
    let renderer = Renderer::new(&cfg.font_dirs);
    let range = FrameRange::new(FrameIndex(0), FrameIndex(tl.duration_frames()))?;
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&args.out));
    let stats = storyboard::render_range(&tl, &renderer, range, &mut sink, &cfg.threading())
        .with_context(|| format!("render '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {} rasterized)",
        args.out.display(),
        stats.frames_total,
        stats.frames_rendered
    );
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    let tl = build(&args.scene, &cfg)?;
    let renderer = Renderer::new(&cfg.font_dirs);

    let end = args.end.unwrap_or_else(|| tl.duration_frames());
    let range = FrameRange::new(FrameIndex(args.start.unwrap_or(0)), FrameIndex(end))?;
    let mut sink = PngSequenceSink::new(&args.out_dir);
    storyboard::render_range(&tl, &renderer, range, &mut sink, &cfg.threading())
        .with_context(|| format!("write frames to '{}'", args.out_dir.display()))?;

    eprintln!("wrote {} frames to {}", sink.written(), args.out_dir.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    let tl = build(&args.scene, &cfg)?;
    let renderer = Renderer::new(&cfg.font_dirs);

    let frame = match (args.frame, args.time) {
        (Some(f), _) => renderer.render_frame(&tl, FrameIndex(f))?,
        (None, Some(t)) => renderer.render_state(&tl.sample(t)?)?,
        (None, None) => anyhow::bail!("either --frame or --time is required"),
    };
    storyboard::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    let tl = build(&args.scene, &cfg)?;
    let json = tl.to_json()?;
    match &args.out {
        Some(path) => {
            write_text(path, &json)?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    let tl = build(&args.scene, &cfg)?;
    let svg = storyboard::frame_to_svg(&tl.sample(args.time)?);
    write_text(&args.out, &svg)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    storyboard::ensure_parent_dir(path)?;
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))
}
