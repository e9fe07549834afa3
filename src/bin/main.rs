use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn, LevelFilter};
use naca_mesh::airfoil::{generate_boundary, Naca00xx, DEFAULT_THICKNESS};
use naca_mesh::logging::{self, ColorChoice};
use naca_mesh::mesher::{ElementKind, GmshCli, MeshOptions, Mesher, DEFAULT_CHARACTERISTIC_LENGTH};
use naca_mesh::output::{
    check_overwrite, display_available, ensure_parent_dir, export_kind, format_size,
    validate_output_path, write_boundary_export, Overwrite,
};
use naca_mesh::params::{Parameters, DEFAULT_NUM_POINTS};
use std::env;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Generate a 2D unstructured mesh around a NACA 00xx airfoil using Gmsh
#[derive(Parser)]
#[command(name = "naca-mesh")]
#[command(version, long_about = None)]
#[command(after_help = "Example: naca-mesh --num-points 200 --output airfoil.msh")]
struct Cli {
    /// Number of points along each airfoil surface (at least 2)
    #[arg(long, default_value_t = DEFAULT_NUM_POINTS as u64, value_parser = clap::value_parser!(u64).range(2..))]
    num_points: u64,

    /// Maximum thickness as a fraction of the chord
    #[arg(long, default_value_t = DEFAULT_THICKNESS)]
    thickness: f64,

    /// Path to save the mesh. Files ending in .json or .xyz receive the boundary points instead.
    /// If omitted, the mesh is generated but not saved
    #[arg(long)]
    output: Option<PathBuf>,

    /// Overwrite an existing output file without asking
    #[arg(long)]
    force: bool,

    /// Open the saved mesh in the Gmsh user interface
    #[arg(long)]
    preview: bool,

    /// Recombine triangles into quadrangles
    #[arg(long)]
    quads: bool,

    /// Target element size along the boundary
    #[arg(long, default_value_t = DEFAULT_CHARACTERISTIC_LENGTH)]
    characteristic_length: f64,

    /// The gmsh program to run
    #[arg(long, default_value = "gmsh")]
    gmsh: PathBuf,

    /// Disable coloured log output (also disabled by setting NO_COLOR)
    #[arg(long)]
    no_color: bool,

    /// Log more detail, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let no_color = env::var("NO_COLOR").ok();
    logging::init_with_level(level, ColorChoice::resolve(cli.no_color, no_color.as_deref()));

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let params = Parameters {
        num_points: usize::try_from(cli.num_points).context("--num-points is too large")?,
        thickness: cli.thickness,
        characteristic_length: cli.characteristic_length,
    };
    params.validate()?;

    let output = match &cli.output {
        Some(raw) => match prepare_output(raw, cli.force)? {
            Some(p) => Some(p),
            None => {
                info!("not overwriting, nothing was generated");
                return Ok(());
            }
        },
        None => None,
    };

    let profile = Naca00xx::new(params.thickness);

    let start = Instant::now();
    let boundary = generate_boundary(&profile, params.num_points)?;
    info!(
        "generated {} boundary points in {:.2?}",
        boundary.len(),
        start.elapsed()
    );

    if let Some(path) = output.as_deref() {
        if cli.preview && export_kind(path).is_some() {
            warn!("preview skipped: preview needs a mesh output, not a boundary export");
        }
        let written = write_boundary_export(path, &boundary, params.thickness)
            .with_context(|| format!("could not write '{}'", path.display()))?;
        if written {
            return Ok(());
        }
    }

    let options = MeshOptions {
        characteristic_length: params.characteristic_length,
        element: if cli.quads {
            ElementKind::Quad
        } else {
            ElementKind::Triangle
        },
        ..Default::default()
    };
    let mesher = GmshCli::new(&cli.gmsh);

    info!("generating mesh for {} points using {}", boundary.len(), cli.gmsh.display());
    let start = Instant::now();
    let report = mesher
        .mesh(&boundary, &options, output.as_deref())
        .context("mesh generation failed")?;
    info!("mesh generation finished in {:.2?}", start.elapsed());
    if let Some(stats) = report.statistics {
        info!("Mesh statistics: {}", stats);
    }

    match (&report.output, report.size_bytes) {
        (Some(p), Some(size)) => {
            info!("mesh written to {} ({})", p.display(), format_size(size));
            info!("view the mesh using '{} {}'", cli.gmsh.display(), p.display());
        }
        _ => warn!("no output file specified, the mesh was not saved. Use --output to save it"),
    }

    if cli.preview {
        match &report.output {
            Some(p) if display_available(|k| env::var(k).ok()) => {
                info!("opening preview...");
                mesher.preview(p).context("preview failed")?;
            }
            Some(_) => warn!("preview skipped: no display detected"),
            None => warn!("preview skipped: there is no saved mesh to open"),
        }
    }

    Ok(())
}

/// Resolves the requested output path and confirms it may be written. Returns None if the user
/// declined to overwrite an existing file.
fn prepare_output(raw: &Path, force: bool) -> Result<Option<PathBuf>> {
    let home = env::var_os("HOME").map(PathBuf::from);
    let (path, notes) = validate_output_path(raw, home.as_deref());
    for note in notes.iter() {
        warn!("{}", note);
    }

    let interactive = io::stdin().is_terminal() && io::stderr().is_terminal();
    let decision = check_overwrite(&path, force, interactive, io::stdin().lock(), io::stderr())?;
    if decision == Overwrite::Declined {
        return Ok(None);
    }

    ensure_parent_dir(&path)
        .with_context(|| format!("could not create the directory for '{}'", path.display()))?;
    Ok(Some(path))
}
