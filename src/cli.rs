use crate::HierarchyChart;
use crate::config::load_config;
use crate::ir::HierarchyInput;
use crate::layout_dump::{layout_dump_json, write_layout_dump};
use crate::render::{write_output_png, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dlc", version, about = "Render an agent recruitment hierarchy as a tree chart")]
pub struct Args {
    /// Input hierarchy JSON ({"root": ..., "rows": [...]}) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, layout, viewport)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Initial zoom, clamped to the configured range
    #[arg(short = 'z', long = "zoom")]
    pub zoom: Option<f32>,

    /// Zoom-in steps applied after the initial zoom
    #[arg(long = "zoomIn", default_value_t = 0)]
    pub zoom_in: u32,

    /// Zoom-out steps applied after the initial zoom
    #[arg(long = "zoomOut", default_value_t = 0)]
    pub zoom_out: u32,

    /// Minimum canvas width (e.g. the screen width)
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Log layout details to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.viewport.min_width = width.max(0.0);
    }
    if let Some(zoom) = args.zoom {
        config.viewport.initial_zoom = zoom;
    }

    let input = read_input(args.input.as_deref())?;
    debug!(rows = input.rows.len(), "read hierarchy input");

    let mut chart = HierarchyChart::build(input, &config)?;
    for _ in 0..args.zoom_in {
        chart.zoom_in();
    }
    for _ in 0..args.zoom_out {
        chart.zoom_out();
    }
    info!(
        nodes = chart.layout.node_count(),
        edges = chart.edges.len(),
        zoom = chart.viewport.zoom(),
        "hierarchy chart ready"
    );

    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&chart.to_svg(&config), args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            config.render.width = chart.viewport.scaled_width();
            config.render.height = chart.viewport.scaled_height();
            write_output_png(&chart.to_svg(&config), &output, &config.render)?;
        }
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_layout_dump(path, &chart)?,
            None => println!("{}", layout_dump_json(&chart)?),
        },
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<HierarchyInput> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(HierarchyInput::from_path(path)?);
    }
    Ok(HierarchyInput::from_reader(io::stdin().lock())?)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
