//! VisualCoin CLI - render market treemaps from data files.

#![allow(clippy::doc_markdown, clippy::needless_pass_by_value)]

mod config;
mod input;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::{Config, Overrides};
use input::load_groups;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use visualcoin::{
    diagnose, Canvas, RasterCanvas, Rect, SeededColors, Severity, TreemapLayout, TreemapRenderer,
    TreemapView,
};

#[derive(Parser)]
#[command(name = "visualcoin")]
#[command(about = "Render cryptocurrency market treemaps grouped by exchange")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Configuration file (TOML)
    #[arg(short, long, env = "VISUALCOIN_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct SizeArgs {
    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render market data to a PNG image
    Render {
        /// Market data file (.json, .yaml, .yml, or - for JSON on stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        size: SizeArgs,

        /// Seed for reproducible item colors
        #[arg(long)]
        seed: Option<u64>,

        /// TTF/OTF font used for labels
        #[arg(long)]
        font: Option<PathBuf>,
    },

    /// Print the computed rectangles as JSON
    Layout {
        /// Market data file (.json, .yaml, .yml, or - for JSON on stdin)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        size: SizeArgs,

        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Report problems in market data
    Check {
        /// Market data file (.json, .yaml, .yml, or - for JSON on stdin)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            input,
            output,
            size,
            seed,
            font,
        } => {
            let config = config.with_overrides(Overrides {
                width: size.width,
                height: size.height,
                seed,
                font,
            })?;
            render(&config, &input, &output)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Layout {
            input,
            size,
            compact,
        } => {
            let config = config.with_overrides(Overrides {
                width: size.width,
                height: size.height,
                ..Overrides::default()
            })?;
            println!("{}", layout_json(&config, &input, compact)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { input } => {
            let errors = check(&input)?;
            Ok(if errors > 0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}

fn render(config: &Config, input: &Path, output: &Path) -> Result<()> {
    let groups = load_groups(input)?;

    let mut canvas = RasterCanvas::new(config.canvas.width, config.canvas.height)?;
    if let Some(font) = &config.colors.font {
        let font = RasterCanvas::load_font(font)
            .with_context(|| format!("loading font {}", font.display()))?;
        canvas = canvas.with_font(font);
    } else {
        warn!("no font configured, labels will be omitted");
    }

    let mut view = TreemapView::new(canvas.size())
        .with_layout(TreemapLayout::with_options(config.layout))
        .with_renderer(TreemapRenderer::with_style(config.style.clone()));
    if let Some(seed) = config.colors.seed {
        view.set_colors(SeededColors::new(seed));
    }
    view.set_data(groups);

    let painted = view.render(Some(&mut canvas)).unwrap_or(0);
    canvas
        .save_png(output)
        .with_context(|| format!("writing {}", output.display()))?;

    info!(
        painted,
        width = config.canvas.width,
        height = config.canvas.height,
        output = %output.display(),
        "treemap rendered"
    );
    Ok(())
}

fn layout_json(config: &Config, input: &Path, compact: bool) -> Result<String> {
    let groups = load_groups(input)?;
    let bounds = Rect::new(
        0.0,
        0.0,
        config.canvas.width as f32,
        config.canvas.height as f32,
    );
    let scene = TreemapLayout::with_options(config.layout).layout(&groups, bounds);
    let json = if compact {
        serde_json::to_string(&scene)?
    } else {
        serde_json::to_string_pretty(&scene)?
    };
    Ok(json)
}

/// Print diagnostics and return how many are errors.
fn check(input: &Path) -> Result<usize> {
    let groups = load_groups(input)?;
    let diagnostics = diagnose(&groups);

    let mut errors = 0;
    for diagnostic in &diagnostics {
        let label = match diagnostic.severity() {
            Severity::Error => {
                errors += 1;
                "error"
            }
            Severity::Warning => "warning",
        };
        println!("{label}: {diagnostic}");
    }

    let items: usize = groups.iter().map(|g| g.items.len()).sum();
    println!(
        "{}: {} groups, {} items, {} errors, {} warnings",
        input.display(),
        groups.len(),
        items,
        errors,
        diagnostics.len() - errors
    );

    Ok(errors)
}
