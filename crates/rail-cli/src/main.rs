//! rail-cli — command-line front end for the rail travel-time routing engine.
//!
//! Reads a merged ride-edge CSV and a transfer-overrides CSV, builds the
//! line-indexed routing graph, and writes one or more of: an all-pairs travel
//! time matrix, a single-source travel time list, and a contour-band JSON
//! file for a visualization layer.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use rayon::prelude::*;

use rail_export::{write_all_pairs, write_contour_json, write_single_source, TravelTimeRow};
use rail_graph::{contour_bin, GraphBuilder};
use rail_ingest::{load_ride_edges, load_transfer_overrides, StationCatalog};

// ── CLI surface ───────────────────────────────────────────────────────────────

const DEFAULT_TRANSFER_SEC: i64 = 180;
const DEFAULT_DWELL_SEC: i64 = 40;

/// Fastest travel times across a multi-line rail network.
#[derive(Parser, Debug)]
#[command(name = "rail-cli", version, about)]
struct Cli {
    /// Ride-edge CSV: one row per edge or one row per stop along a line.
    #[arg(long)]
    merged_csv: PathBuf,

    /// Per-station or per-line-pair transfer penalty CSV.
    #[arg(long)]
    transfer_times_csv: PathBuf,

    /// Transfer seconds charged when no override applies.
    #[arg(long, default_value_t = DEFAULT_TRANSFER_SEC)]
    default_transfer_sec: i64,

    /// Dwell seconds charged at every intermediate ride stop.
    #[arg(long, default_value_t = DEFAULT_DWELL_SEC)]
    dwell_sec: i64,

    /// Write the full all-pairs matrix here. Defaults to `all_pairs.csv` when
    /// neither `--source-station` nor `--contour-thresholds` is given.
    #[arg(long)]
    out_all: Option<PathBuf>,

    /// Restrict the run to fastest times from a single station.
    #[arg(long)]
    source_station: Option<String>,

    /// Single-source output path. Defaults to `<source>_times.csv`.
    #[arg(long)]
    out_single: Option<PathBuf>,

    /// Station coordinates (JSON array of `{name, lat, lng}`), required for
    /// contour banding.
    #[arg(long)]
    station_coords_csv: Option<PathBuf>,

    /// Ascending minute thresholds for contour banding, e.g. `10,20,30`.
    /// Requires `--source-station` and `--station-coords-csv`.
    #[arg(long, value_delimiter = ',')]
    contour_thresholds: Option<Vec<i64>>,

    /// Contour band output path, required when `--contour-thresholds` is given.
    #[arg(long)]
    out_contour: Option<PathBuf>,

    /// Raise log verbosity. Repeatable: `-v` = info, `-vv` = debug.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("error: {err:#}");
        std::process::exit(exit_code_for(&err));
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn run(cli: &Cli) -> Result<()> {
    // 1. Validate the contour-banding flag combination up front — cheaper to
    //    fail here than after loading the whole graph.
    if cli.contour_thresholds.is_some() {
        if cli.source_station.is_none() || cli.station_coords_csv.is_none() {
            bail!("--contour-thresholds requires --source-station and --station-coords-csv");
        }
        if cli.out_contour.is_none() {
            bail!("--out-contour is required when --contour-thresholds is given");
        }
    }

    // 2. Load ride edges and transfer overrides.
    let started = Instant::now();
    let (edges, edge_stats) = load_ride_edges(&cli.merged_csv)
        .with_context(|| format!("loading ride edges from {}", cli.merged_csv.display()))?;
    info!(
        "loaded {} ride edges from {} ({} dropped rows, {} duplicate edges)",
        edges.len(),
        cli.merged_csv.display(),
        edge_stats.dropped_rows,
        edge_stats.duplicate_edges
    );

    let (overrides, transfer_stats) = load_transfer_overrides(&cli.transfer_times_csv)
        .with_context(|| format!("loading transfer overrides from {}", cli.transfer_times_csv.display()))?;
    info!(
        "loaded {} per-station and {} pair transfer overrides from {} ({} dropped rows, {} duplicates)",
        transfer_stats.per_station_defaults,
        transfer_stats.pair_overrides,
        cli.transfer_times_csv.display(),
        transfer_stats.dropped_rows,
        transfer_stats.duplicate_overrides
    );

    // 3. Build the routing graph.
    let mut builder = GraphBuilder::new();
    builder.add_ride_edges(&edges);
    let graph = builder.build(&overrides, cli.default_transfer_sec);
    info!("built graph: {} stations, {} nodes", graph.station_count(), graph.node_count());

    // 4. Decide which outputs were asked for. With no explicit output flag at
    //    all, default to the all-pairs matrix — this keeps a bare two-flag
    //    invocation useful.
    let want_all = cli.out_all.is_some() || (cli.source_station.is_none() && cli.contour_thresholds.is_none());

    let mut rows_written = 0usize;

    if want_all {
        let out_path = cli.out_all.clone().unwrap_or_else(|| PathBuf::from("all_pairs.csv"));
        let stations = graph.sorted_station_names();
        let rows: Vec<TravelTimeRow> = stations
            .into_par_iter()
            .flat_map(|src| match graph.times_from(src, cli.dwell_sec) {
                Ok(times) => times
                    .into_iter()
                    .map(|(dst, seconds)| TravelTimeRow {
                        src_station: src.to_string(),
                        dst_station: dst,
                        seconds,
                    })
                    .collect(),
                Err(_) => Vec::new(),
            })
            .collect();
        write_all_pairs(&out_path, &rows)
            .with_context(|| format!("writing all-pairs matrix to {}", out_path.display()))?;
        info!("wrote {} rows to {}", rows.len(), out_path.display());
        rows_written += rows.len();
    }

    if let Some(source) = &cli.source_station {
        let times = graph
            .times_from(source, cli.dwell_sec)
            .with_context(|| format!("computing travel times from {source}"))?;

        let out_path = cli
            .out_single
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{source}_times.csv")));
        write_single_source(&out_path, source, &times)
            .with_context(|| format!("writing single-source times to {}", out_path.display()))?;
        info!("wrote {} rows to {}", times.len(), out_path.display());
        rows_written += times.len();

        if let (Some(thresholds), Some(coords_path), Some(out_contour)) =
            (&cli.contour_thresholds, &cli.station_coords_csv, &cli.out_contour)
        {
            let catalog = StationCatalog::load(coords_path)
                .with_context(|| format!("loading station coordinates from {}", coords_path.display()))?;
            let bands = contour_bin(source, thresholds, &times, &catalog);
            write_contour_json(out_contour, &bands)
                .with_context(|| format!("writing contour bands to {}", out_contour.display()))?;
            info!("wrote {} contour bands to {}", bands.len(), out_contour.display());
        }
    }

    println!(
        "rail-cli: {rows_written} rows written in {:.2}s ({} stations, {} nodes)",
        started.elapsed().as_secs_f64(),
        graph.station_count(),
        graph.node_count()
    );
    Ok(())
}

/// Maps a failure back to the exit code a calling script can branch on:
/// 2 for an unreadable or unrecognized input file, 3 for an empty result
/// set, 1 for anything else.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<rail_ingest::IngestError>() {
        return match e {
            rail_ingest::IngestError::InputUnreadable { .. }
            | rail_ingest::IngestError::EncodingUndetected { .. }
            | rail_ingest::IngestError::SchemaUndetected { .. } => 2,
            rail_ingest::IngestError::Csv(_) | rail_ingest::IngestError::Json(_) => 2,
        };
    }
    if let Some(rail_export::ExportError::EmptyOutput(_)) = err.downcast_ref::<rail_export::ExportError>() {
        return 3;
    }
    if let Some(rail_graph::GraphError::StationNotFound(_) | rail_graph::GraphError::StationIsolated(_)) =
        err.downcast_ref::<rail_graph::GraphError>()
    {
        return 2;
    }
    1
}
