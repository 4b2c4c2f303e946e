use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, bail};
use clap::{ArgAction, Parser, Subcommand};
use vignette::{
    CameraStyle, CameraTrajectory, FrameClock, Fps, JsonCatalog, ManualClock, ShowOutcome, Stage,
    StageFrame, StageOpts, TracingNarrator, TrajectoryParams,
};

#[derive(Parser, Debug)]
#[command(name = "vignette", version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the topics in a catalog file.
    Topics(TopicsArgs),
    /// Play a show headlessly on a simulated clock, one JSON line per activation.
    Play(PlayArgs),
    /// Print the pose a camera style reaches after a given time.
    Pose(PoseArgs),
}

#[derive(Parser, Debug)]
struct TopicsArgs {
    /// Catalog JSON.
    #[arg(long)]
    catalog: PathBuf,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Catalog JSON.
    #[arg(long)]
    catalog: PathBuf,

    /// Topic to stage.
    #[arg(long)]
    topic: String,

    /// Stage options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated seconds to run.
    #[arg(long, default_value_t = 30.0)]
    seconds: f64,

    /// Override the tick rate (ticks per second).
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Parser, Debug)]
struct PoseArgs {
    /// Camera style name (e.g. orbit-slow).
    #[arg(long)]
    style: CameraStyle,

    /// Stage time in seconds.
    #[arg(long, default_value_t = 0.0)]
    t: f64,

    /// Tick rate used to integrate smoothed styles.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seed for handheld jitter.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Topics(args) => cmd_topics(args),
        Command::Play(args) => cmd_play(args),
        Command::Pose(args) => cmd_pose(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_topics(args: TopicsArgs) -> anyhow::Result<()> {
    let catalog = JsonCatalog::from_path(&args.catalog)
        .with_context(|| format!("load catalog '{}'", args.catalog.display()))?;
    let mut out = std::io::stdout().lock();
    for name in catalog.catalog().topic_names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let catalog = JsonCatalog::from_path(&args.catalog)
        .with_context(|| format!("load catalog '{}'", args.catalog.display()))?;
    let mut opts = match &args.config {
        Some(path) => StageOpts::from_path(path)
            .with_context(|| format!("load stage options '{}'", path.display()))?,
        None => StageOpts::default(),
    };
    if let Some(fps) = args.fps {
        opts.tick_fps = Fps::new(fps, 1)?;
    }
    if !(args.seconds.is_finite() && args.seconds >= 0.0) {
        bail!("--seconds must be a non-negative number");
    }
    let ticks = opts.tick_fps.secs_to_frames_floor(args.seconds);

    let clock = ManualClock::new();
    let mut stage = Stage::new(
        opts,
        Arc::new(catalog),
        Box::new(TracingNarrator::new()),
        Box::new(clock.clone()),
    )?;

    let outcome = stage
        .start_show(&args.topic)
        .with_context(|| format!("start show for topic \"{}\"", args.topic))?;
    if outcome == ShowOutcome::Ignored {
        bail!("--topic must not be blank");
    }

    let dt = stage.tick_secs();
    let step = Duration::from_secs_f64(dt);
    let mut out = std::io::stdout().lock();
    let mut activations = 0u64;
    let mut announce = true;

    for _ in 0..ticks {
        if stage.poll_autoplay() {
            announce = true;
        }
        let frame = stage.tick(dt)?;
        if announce {
            activations += 1;
            writeln!(out, "{}", activation_line(&frame))?;
            announce = false;
        }
        clock.advance(step);
    }

    let summary = serde_json::json!({
        "event": "summary",
        "ticks": ticks,
        "activations": activations,
        "state": stage.snapshot(),
    });
    writeln!(out, "{summary}")?;
    stage.shutdown();
    Ok(())
}

fn activation_line(frame: &StageFrame) -> serde_json::Value {
    let scene = frame.scene.as_deref();
    serde_json::json!({
        "event": "activate",
        "tick": frame.tick.0,
        "elapsed_secs": frame.elapsed_secs,
        "index": frame.active,
        "title": scene.map(|s| s.title.as_str()),
        "camera_style": scene.map(|s| s.camera_style.as_str()),
        "environment": scene.map(|s| s.environment.as_str()),
        "title_color": scene.map(|s| s.palette.title_color().to_hex()),
        "pose": frame.pose,
    })
}

fn cmd_pose(args: PoseArgs) -> anyhow::Result<()> {
    let fps = Fps::new(args.fps, 1)?;
    if !(args.t.is_finite() && args.t >= 0.0) {
        bail!("--t must be a non-negative number");
    }
    let mut clock = FrameClock::new(
        CameraTrajectory::new(TrajectoryParams::default()),
        args.seed,
    );
    let samples = fps.secs_to_frames_floor(args.t) + 1;
    let mut last = None;
    for _ in 0..samples {
        last = Some(clock.advance(Some(args.style), fps.frame_duration_secs())?);
    }
    let Some((tick, t, pose)) = last else {
        bail!("no samples taken");
    };
    let line = serde_json::json!({
        "style": args.style.as_str(),
        "tick": tick.0,
        "t": t,
        "pose": pose,
    });
    writeln!(std::io::stdout().lock(), "{line}")?;
    Ok(())
}
