use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "aviary", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize a creature's frame strip and write it as a PNG.
    Sheet(SheetArgs),
    /// Run a scene headlessly and print a JSON summary.
    Simulate(SimulateArgs),
    /// List built-in palettes.
    Presets,
}

#[derive(Parser, Debug)]
struct SheetArgs {
    /// Creature kind: bird, butterfly or owl.
    #[arg(long)]
    kind: String,

    /// Palette preset; defaults to the creature's own.
    #[arg(long)]
    preset: Option<String>,

    /// Frames in the loop; defaults to the creature's own.
    #[arg(long)]
    frames: Option<u32>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of host ticks to run.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Override the scene's tick interval (ms).
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Write every tick's agent snapshots to this JSON file.
    #[arg(long)]
    trace: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct TraceFrame {
    t_ms: u64,
    agents: Vec<aviary::AgentSnapshot>,
}

#[derive(serde::Serialize)]
struct Summary {
    elapsed_ms: u64,
    agents: usize,
    sheets: usize,
    cache: aviary::CacheStats,
    stats: aviary::FlockStats,
    agents_final: Vec<aviary::AgentSnapshot>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Sheet(args) => cmd_sheet(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Presets => cmd_presets(),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_sheet(args: SheetArgs) -> anyhow::Result<()> {
    let kind = aviary::CreatureKind::from_name(&args.kind)
        .with_context(|| format!("unknown creature kind '{}'", args.kind))?;
    let palette = match &args.preset {
        Some(name) => {
            aviary::preset(name)
                .with_context(|| format!("unknown palette preset '{name}'"))?
                .colors
        }
        None => aviary::default_preset_for(kind).colors,
    };
    let mut req = aviary::SynthRequest::for_creature(kind, palette);
    if let Some(frames) = args.frames {
        req = req.with_frame_count(frames);
    }

    let mut cache = aviary::SheetCache::new();
    let mut synth =
        aviary::FrameSynthesizer::new(aviary::create_backend(aviary::BackendKind::Cpu));
    let handle = synth.synthesize(&mut cache, &req)?;
    let raster = handle.sheet.raster();

    ensure_parent(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &raster.to_straight_rgba8(),
        raster.width,
        raster.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames of {}x{}, key {})",
        args.out.display(),
        handle.sheet.frame_count(),
        handle.sheet.frame_width(),
        handle.sheet.frame_height(),
        handle.sheet.key()
    );
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let mut scene = aviary::SceneConfig::from_path(&args.in_path)?;
    if let Some(tick_ms) = args.tick_ms {
        anyhow::ensure!(tick_ms > 0, "--tick-ms must be > 0");
        scene.tick_ms = tick_ms;
    }

    let mut cache = aviary::SheetCache::new();
    let mut synth =
        aviary::FrameSynthesizer::new(aviary::create_backend(aviary::BackendKind::Cpu));
    let (mut flock, _ids) =
        scene.build(&mut synth, &mut cache, Box::new(aviary::ThreadRandom::new()))?;

    let mut trace = Vec::new();
    for _ in 0..args.ticks {
        flock.tick(scene.tick_ms);
        if args.trace.is_some() {
            trace.push(TraceFrame {
                t_ms: flock.now_ms(),
                agents: flock.snapshot(),
            });
        }
    }

    if let Some(path) = &args.trace {
        ensure_parent(path)?;
        let f = std::fs::File::create(path)
            .with_context(|| format!("create trace '{}'", path.display()))?;
        serde_json::to_writer(std::io::BufWriter::new(f), &trace)
            .with_context(|| format!("write trace '{}'", path.display()))?;
    }

    let summary = Summary {
        elapsed_ms: flock.now_ms(),
        agents: flock.len(),
        sheets: cache.sheet_count(),
        cache: cache.stats(),
        stats: flock.stats(),
        agents_final: flock.snapshot(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    for name in aviary::PRESET_NAMES {
        let p = aviary::preset(name).with_context(|| format!("missing preset '{name}'"))?;
        println!("{:<14} {}", p.name, p.kind);
    }
    Ok(())
}
