mod input;
mod renderer;
mod surface;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tabpip_core::ViewportConfig;
use tabpip_protocol::Size;
use tracing_subscriber::EnvFilter;

use crate::surface::TestCard;

#[derive(Parser)]
#[command(name = "tabpip")]
#[command(about = "Preview the tabpip pan/zoom viewport in a terminal")]
#[command(version)]
struct Cli {
    /// Intrinsic size of the simulated capture, as WIDTHxHEIGHT
    #[arg(long, default_value = "1920x1080", value_parser = parse_size)]
    surface: Size,

    /// Viewport config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write tracing output to this file (the terminal is in use)
    #[arg(long)]
    log: Option<PathBuf>,
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let w: u32 = w.trim().parse().map_err(|e| format!("bad width {w:?}: {e}"))?;
    let h: u32 = h.trim().parse().map_err(|e| format!("bad height {h:?}: {e}"))?;
    if w == 0 || h == 0 {
        return Err(format!("size must be non-zero, got {w}x{h}"));
    }
    Ok(Size::new(f64::from(w), f64::from(h)))
}

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log {
        init_logging(path)?;
    }

    let config = match &cli.config {
        Some(path) => {
            let data = std::fs::read(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            ViewportConfig::from_json(&data)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => ViewportConfig::default(),
    };

    tracing::info!(
        surface_w = cli.surface.width,
        surface_h = cli.surface.height,
        "starting terminal preview"
    );
    renderer::run_tui(TestCard::new(cli.surface), &config)
}
