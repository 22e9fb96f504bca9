use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use polygrid::{ClassifyMode, Grid, Point};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;

#[derive(Parser)]
#[command(name = "polygrid-cli")]
#[command(about = "Grid-accelerated point-in-polygon queries")]
struct Cmd {
    /// Log grid construction details
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Args, Clone)]
struct GridArgs {
    /// Polygon file: header line, then one `x,y` per line, first == last
    #[arg(long)]
    polygon: PathBuf,
    /// Cells per side
    #[arg(long, default_value_t = 64)]
    grid_size: usize,
    /// Use coordinates as loaded (skip centering and unit-area scaling)
    #[arg(long)]
    raw: bool,
    /// Resolve mixed cells with the full winding-number test
    #[arg(long)]
    exact: bool,
}

impl GridArgs {
    fn mode(&self) -> ClassifyMode {
        if self.exact {
            ClassifyMode::Exact
        } else {
            ClassifyMode::AssumeLocalConvex
        }
    }

    fn params(&self) -> serde_json::Value {
        json!({
            "polygon": self.polygon.to_string_lossy(),
            "grid_size": self.grid_size,
            "raw": self.raw,
            "exact": self.exact,
        })
    }
}

#[derive(Subcommand)]
enum Action {
    /// Classify points given on the command line; prints JSON to stdout
    Classify {
        #[command(flatten)]
        grid: GridArgs,
        /// Query points as `x,y`
        #[arg(required = true, allow_hyphen_values = true)]
        points: Vec<String>,
    },
    /// Classify a points file in parallel and write the results as JSON
    Batch {
        #[command(flatten)]
        grid: GridArgs,
        #[arg(long)]
        points: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write the flattened cell labels as JSON
    Labels {
        #[command(flatten)]
        grid: GridArgs,
        #[arg(long)]
        out: PathBuf,
        /// Emit binary {0,1} codes with mixed cells pre-resolved
        #[arg(long)]
        biased: bool,
    },
}

#[derive(Serialize)]
struct Classified {
    x: f64,
    y: f64,
    outside: bool,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Classify { grid, points } => classify(&grid, &points),
        Action::Batch { grid, points, out } => batch(&grid, &points, &out),
        Action::Labels { grid, out, biased } => labels(&grid, &out, biased),
    }
}

fn build_grid(args: &GridArgs) -> Result<Grid> {
    let poly = io::read_polygon(&args.polygon, args.raw)?;
    let grid = Grid::init(&poly, args.grid_size)
        .with_context(|| format!("building grid for {}", args.polygon.display()))?;
    let [_, interior, exterior, mixed] = grid.label_counts();
    tracing::info!(
        edges = poly.num_edges(),
        grid_size = args.grid_size,
        interior,
        exterior,
        mixed,
        "grid"
    );
    Ok(grid)
}

fn classify(args: &GridArgs, points: &[String]) -> Result<()> {
    let grid = build_grid(args)?;
    let mut rows = Vec::with_capacity(points.len());
    for s in points {
        let p = io::parse_point(s)?;
        let outside = grid.classify_with(p, args.mode())?;
        rows.push(Classified {
            x: p.x,
            y: p.y,
            outside,
        });
    }
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn batch(args: &GridArgs, points: &Path, out: &Path) -> Result<()> {
    let grid = build_grid(args)?;
    let pts: Vec<Point> = io::read_points(points)?;
    let outside = grid.classify_batch_with(&pts, args.mode())?;
    tracing::info!(
        points = pts.len(),
        outside = outside.iter().filter(|&&o| o).count(),
        "batch"
    );
    let doc = json!({ "grid_size": args.grid_size, "outside": outside });
    write_json(out, &doc)?;
    let mut params = args.params();
    params["points"] = json!(points.to_string_lossy());
    provenance::write_sidecar(out, params)?;
    Ok(())
}

fn labels(args: &GridArgs, out: &Path, biased: bool) -> Result<()> {
    let grid = build_grid(args)?;
    if biased {
        write_json(out, &grid.biased_labels()?)?;
    } else {
        write_json(out, &grid.label_view()?)?;
    }
    let mut params = args.params();
    params["biased"] = json!(biased);
    provenance::write_sidecar(out, params)?;
    Ok(())
}

fn write_json<T: Serialize>(out: &Path, value: &T) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))
}
