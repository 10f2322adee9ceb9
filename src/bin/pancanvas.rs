use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use pancanvas::{
    AudioTrack, BilinearReflect, Camera, CancelToken, ChannelOrder, Element, FrameSink,
    NextPlacement, PlacementOutcome, PngSequenceSink, RandomPlacement, RasterPainter,
    RawStreamSink, RenderOpts, RenderThreading, Rgba8, Scene,
    assets::decode::{load_image, save_png},
    render::debug::{OutlineStyle, draw_grid, outline_elements},
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "pancanvas", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scatter images over a new artboard without overlaps and write the scene JSON.
    Scatter(ScatterArgs),
    /// Draw a scene JSON onto a PNG.
    Compose(ComposeArgs),
    /// Fly a keyframed camera over a canvas PNG.
    Render(RenderArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    /// Uniform random positions anywhere on the artboard.
    Random,
    /// Each image searches outward from the last placed one.
    Next,
}

#[derive(Parser, Debug)]
struct ScatterArgs {
    /// Images to place, in order.
    #[arg(required = true)]
    images: Vec<PathBuf>,

    #[arg(long)]
    width: u32,

    #[arg(long)]
    height: u32,

    /// Output scene JSON.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = Strategy::Random)]
    strategy: Strategy,

    /// Keep this many pixels clear of the artboard edge.
    #[arg(long, default_value_t = 0.0)]
    margin: f64,

    /// Minimum gap between bounding boxes.
    #[arg(long, default_value_t = 0.0)]
    min_distance: f64,

    /// Attempts per image before giving up on it.
    #[arg(long)]
    attempts: Option<u32>,

    /// Seed for reproducible layouts.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Directory that relative image paths resolve against. Defaults to the scene's directory.
    #[arg(long)]
    assets_root: Option<PathBuf>,

    /// Background as r,g,b,a.
    #[arg(long, value_delimiter = ',', num_args = 4, default_values_t = [255u8, 255, 255, 255])]
    background: Vec<u8>,

    /// Overlay a grid with this spacing in pixels.
    #[arg(long)]
    grid: Option<u32>,

    /// Outline object and bounding boxes.
    #[arg(long)]
    outline: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderArg {
    Rgba,
    Bgra,
    Rgb,
    Bgr,
}

impl From<OrderArg> for ChannelOrder {
    fn from(o: OrderArg) -> Self {
        match o {
            OrderArg::Rgba => ChannelOrder::Rgba,
            OrderArg::Bgra => ChannelOrder::Bgra,
            OrderArg::Rgb => ChannelOrder::Rgb,
            OrderArg::Bgr => ChannelOrder::Bgr,
        }
    }
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Source canvas PNG.
    #[arg(long)]
    canvas: PathBuf,

    /// Camera JSON.
    #[arg(long)]
    camera: PathBuf,

    /// Directory for a PNG sequence.
    #[arg(long, conflicts_with = "raw", required_unless_present = "raw")]
    out_dir: Option<PathBuf>,

    /// Raw frame stream path, `-` for stdout.
    #[arg(long)]
    raw: Option<PathBuf>,

    /// Channel order of the raw stream.
    #[arg(long, value_enum, default_value_t = OrderArg::Rgba)]
    order: OrderArg,

    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Seconds. Defaults to the last camera position keyframe.
    #[arg(long)]
    duration: Option<f64>,

    /// Audio file for whatever muxes the output.
    #[arg(long)]
    audio: Option<PathBuf>,

    /// Render frames on a rayon thread pool.
    #[arg(long)]
    parallel: bool,

    #[arg(long)]
    threads: Option<usize>,

    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Scatter(args) => cmd_scatter(args),
        Command::Compose(args) => cmd_compose(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_scatter(args: ScatterArgs) -> anyhow::Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let cancel = CancelToken::new();
    let mut scene = Scene::new(args.width, args.height);
    let mut skipped = 0usize;

    for path in &args.images {
        let element = Element::image_from_path(path)?;
        let reference = match args.strategy {
            Strategy::Next => scene.last_positioned(),
            Strategy::Random => None,
        };
        let (id, outcome) = match reference {
            Some(reference) => {
                let opts = NextPlacement {
                    reference: Some(reference),
                    minimum_distance: args.min_distance,
                    artboard_margin: args.margin,
                    max_attempts: args.attempts,
                    ..NextPlacement::default()
                };
                scene.place_next(element, &opts, &mut rng, &cancel)?
            }
            None => {
                let opts = RandomPlacement {
                    constrain_to_artboard: true,
                    artboard_margin: args.margin,
                    collision: true,
                    minimum_distance: args.min_distance,
                    max_attempts: args.attempts.unwrap_or(100),
                    ..RandomPlacement::default()
                };
                scene.place_random(element, &opts, &mut rng, &cancel)?
            }
        };
        if let PlacementOutcome::Exhausted { attempts } = outcome {
            tracing::warn!(image = %path.display(), id = id.0, attempts, "no free spot, left unplaced");
            skipped += 1;
        }
    }

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    scene.save_json(&args.out)?;
    tracing::info!(
        placed = scene.len() - skipped,
        skipped,
        out = %args.out.display(),
        "wrote scene"
    );
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let mut scene = Scene::from_path(&args.in_path)?;
    let root = match &args.assets_root {
        Some(root) => root.clone(),
        None => args
            .in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    scene.load_images(&root)?;

    let bg: [u8; 4] = args
        .background
        .as_slice()
        .try_into()
        .context("background must have four components")?;
    let mut painter = RasterPainter::with_background(scene.width(), scene.height(), Rgba8::from(bg));
    scene.compose(&mut painter)?;

    let mut canvas = painter.into_canvas();
    if let Some(spacing) = args.grid {
        draw_grid(&mut canvas, spacing, Rgba8::new(128, 128, 128, 96))?;
    }
    if args.outline {
        outline_elements(&mut canvas, &scene, OutlineStyle::default());
    }

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    save_png(&canvas, &args.out)?;
    tracing::info!(out = %args.out.display(), "wrote canvas");
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let source = load_image(&args.canvas)?;
    let camera = Camera::from_path(&args.camera)?;

    let mut sink: Box<dyn FrameSink> = match (&args.out_dir, &args.raw) {
        (_, Some(raw)) if raw.as_os_str() == "-" => {
            Box::new(RawStreamSink::new(std::io::stdout(), args.order.into()))
        }
        (_, Some(raw)) => {
            let file =
                File::create(raw).with_context(|| format!("create '{}'", raw.display()))?;
            Box::new(RawStreamSink::new(BufWriter::new(file), args.order.into()))
        }
        (Some(dir), None) => Box::new(PngSequenceSink::new(dir)),
        (None, None) => anyhow::bail!("one of --out-dir or --raw is required"),
    };

    let opts = RenderOpts {
        fps: args.fps,
        duration: args.duration,
        threading: RenderThreading {
            parallel: args.parallel,
            chunk_size: args.chunk_size,
            threads: args.threads,
        },
        audio: args.audio.map(|path| AudioTrack { path }),
    };
    let stats = pancanvas::render_sequence(
        &camera,
        &source,
        &BilinearReflect::default(),
        sink.as_mut(),
        &opts,
        &CancelToken::new(),
    )?;
    tracing::info!(frames = stats.frames_rendered, "render finished");
    Ok(())
}
