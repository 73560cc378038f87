/// termshapes - draw 3D wireframe shapes in the terminal
///
/// Loads a shape description (or uses the built-in cube) and renders it with
/// half-cell glyphs. Logs go to a file since the terminal is taken over.
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;
use termshapes_core::{
    Command, GlyphSet, OcclusionMode, RenderOptions, RenderParams, Shape, StepSizes,
};
use termshapes_terminal::{AppError, TerminalApp};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "termshapes", version, about = "Draw 3D wireframe shapes in the terminal")]
struct Cli {
    /// Shape description file; the built-in cube is used when omitted
    path: Option<PathBuf>,

    /// Samples per edge
    #[arg(long)]
    density: Option<usize>,

    /// Initial occlusion mode: none, approximate, convex or convex-rear-visible
    #[arg(long, default_value = "none")]
    occlusion: OcclusionMode,

    /// Glyph set: ascii or blocks
    #[arg(long, default_value = "ascii")]
    glyphs: GlyphSet,

    /// Where to write logs
    #[arg(long, default_value = "termshapes.log")]
    log_file: PathBuf,

    /// Start with autorotation on
    #[arg(long)]
    autorotate: bool,
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut params = RenderParams::default();
    if let Some(density) = cli.density {
        params = params.with_edge_density(density);
    }

    let shape = match &cli.path {
        Some(path) => Shape::load(path, &params)?,
        None => Shape::cube(&params),
    };
    let options = RenderOptions {
        mode: cli.occlusion,
        glyphs: cli.glyphs,
        ..RenderOptions::for_shape(&shape)
    };

    let mut app = TerminalApp::new(shape, params, StepSizes::default(), options)?;
    if cli.autorotate {
        app.apply(Command::ToggleAutoRotate)?;
    }
    app.run()
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli.log_file) {
        eprintln!("error: could not open log file {}: {e}", cli.log_file.display());
        process::exit(1);
    }

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "termshapes exited with an error");
        eprintln!("error: {e}");
        process::exit(1);
    }
}
