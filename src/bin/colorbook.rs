use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::SeedableRng;

use colorbook::{
    ColoringConfig, ColoringSession, DisplayRect, FixedViewport, OutlineArt, OutlineCatalog,
    Point, Rgba8, Tool, ToolState,
};

#[derive(Parser, Debug)]
#[command(name = "colorbook", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scripted input session and export the picture as PNG.
    Paint(PaintArgs),
    /// List the outlines available in a library.
    Catalog(CatalogArgs),
}

#[derive(Parser, Debug)]
struct PaintArgs {
    /// Session config JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Library root containing `images/manifest.json`.
    #[arg(long, default_value = ".")]
    library: PathBuf,

    /// Use this SVG instead of picking from the library.
    #[arg(long)]
    outline: Option<PathBuf>,

    /// Input script: JSON array of ops.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Device pixel ratio of the simulated display.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Seed for picking outlines.
    #[arg(long)]
    seed: Option<u64>,

    /// Output PNG path.
    #[arg(long, default_value = colorbook::DEFAULT_EXPORT_FILE_NAME)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct CatalogArgs {
    /// Library root containing `images/manifest.json`.
    #[arg(long, default_value = ".")]
    library: PathBuf,
}

/// One scripted input. Pointer positions are in display pixels.
#[derive(serde::Deserialize, Debug)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
enum ScriptOp {
    Tool {
        tool: Tool,
    },
    Color {
        color: Rgba8,
    },
    Size {
        size: f64,
    },
    Down {
        x: Option<f64>,
        y: Option<f64>,
    },
    Move {
        x: Option<f64>,
        y: Option<f64>,
    },
    Up,
    Cancel,
    Resize {
        width: Option<f64>,
        height: Option<f64>,
        dpr: Option<f64>,
    },
    Clear,
    NewImage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Paint(args) => cmd_paint(args),
        Command::Catalog(args) => cmd_catalog(args),
    }
}

fn cmd_paint(args: PaintArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => ColoringConfig::from_json_file(path)?,
        None => ColoringConfig::default(),
    };
    let ops = match &args.script {
        Some(path) => read_script(path)?,
        None => Vec::new(),
    };

    let display = DisplayRect::from_size(
        f64::from(config.logical_width),
        f64::from(config.logical_height),
    );
    let mut tools = config.default_tool_state();
    let mut session = ColoringSession::new(config, FixedViewport::new(display, args.dpr))?;
    session.attach()?;

    let catalog = OutlineCatalog::load(&args.library);
    let mut rng = match args.seed {
        Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
        None => rand::rngs::StdRng::from_os_rng(),
    };
    match &args.outline {
        Some(path) => session.set_outline(OutlineArt::from_svg_file(path)?)?,
        None => {
            let entry = session.new_image(&catalog, &mut rng)?;
            tracing::info!(entry, "picked outline");
        }
    }

    for op in ops {
        apply_op(&mut session, &mut tools, &catalog, &mut rng, op)?;
    }

    session.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn apply_op(
    session: &mut ColoringSession<FixedViewport>,
    tools: &mut ToolState,
    catalog: &OutlineCatalog,
    rng: &mut rand::rngs::StdRng,
    op: ScriptOp,
) -> anyhow::Result<()> {
    match op {
        ScriptOp::Tool { tool } => tools.tool = tool,
        ScriptOp::Color { color } => tools.color = color,
        ScriptOp::Size { size } => tools.brush_size = size,
        ScriptOp::Down { x, y } => {
            let effect = session.pointer_down(client(x, y), tools)?;
            tracing::debug!(?effect, "down");
        }
        ScriptOp::Move { x, y } => {
            let effect = session.pointer_move(client(x, y), tools)?;
            tracing::debug!(?effect, "move");
        }
        ScriptOp::Up => {
            session.pointer_up();
        }
        ScriptOp::Cancel => {
            session.pointer_cancel();
        }
        ScriptOp::Resize { width, height, dpr } => {
            let vp = session.viewport_mut();
            let mut display = vp.display;
            if let Some(w) = width {
                display.width = w;
            }
            if let Some(h) = height {
                display.height = h;
            }
            vp.set_display(display);
            if let Some(dpr) = dpr {
                vp.set_dpr(dpr);
            }
            let effect = session.resize_now()?;
            tracing::debug!(?effect, "resize");
        }
        ScriptOp::Clear => session.clear_paint(),
        ScriptOp::NewImage => {
            let entry = session.new_image(catalog, rng)?;
            tracing::info!(entry, "picked outline");
        }
    }
    Ok(())
}

fn client(x: Option<f64>, y: Option<f64>) -> Option<Point> {
    Some(Point::new(x?, y?))
}

fn read_script(path: &Path) -> anyhow::Result<Vec<ScriptOp>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read script '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse script '{}'", path.display()))
}

fn cmd_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let catalog = OutlineCatalog::load(&args.library);
    tracing::info!(source = ?catalog.source(), "catalog loaded");
    for entry in catalog.entries() {
        println!("{entry}");
    }
    Ok(())
}
