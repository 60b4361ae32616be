//! Entry point for the heat map viewer.
//!
//! This Dioxus desktop application loads the export dataset and the world
//! geometry once, then recolors the map for each searched NCM. With
//! `--export` it renders the map to an SVG file instead of opening a window.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use dioxus::prelude::*;
use tracing_subscriber::EnvFilter;

use heatmap_core::geometry::{load_regions, project_regions, DEFAULT_GEOMETRY_URL, DEFAULT_OBJECT};
use heatmap_core::{load_dataset, CollisionPolicy, DataSource, Dataset, Mercator, Metric};
use heatmap_viewer::components::App;
use heatmap_viewer::config::{self, ViewerConfig, DEFAULT_DATASET_PATH};
use heatmap_viewer::export;
use heatmap_viewer::state::AppState;

/// CSS styles embedded at compile time.
const STYLES_CSS: &str = include_str!("../assets/styles.css");

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "heatmap-viewer")]
#[command(about = "Choropleth of export statistics by NCM product code")]
struct Args {
    /// Trade dataset CSV (path or http(s) URL)
    #[arg(short, long, default_value = DEFAULT_DATASET_PATH)]
    data: String,

    /// World geometry, TopoJSON or GeoJSON (path or http(s) URL)
    #[arg(short, long, default_value = DEFAULT_GEOMETRY_URL)]
    geometry: String,

    /// TopoJSON object holding the country geometries
    #[arg(long, default_value = DEFAULT_OBJECT)]
    object: String,

    /// NCM to search as soon as the dataset is loaded
    #[arg(short, long)]
    ncm: Option<String>,

    /// Metric used for coloring (VL_FOB or KG_LIQUIDO)
    #[arg(short, long, default_value = "VL_FOB", value_parser = Metric::from_str)]
    metric: Metric,

    /// Sum records that map to the same country instead of keeping the last one
    #[arg(long)]
    aggregate: bool,

    /// Render the map to this SVG file and exit without opening a window
    #[arg(long, value_name = "SVG")]
    export: Option<PathBuf>,
}

impl From<Args> for ViewerConfig {
    fn from(args: Args) -> Self {
        Self {
            data: DataSource::from(args.data.as_str()),
            geometry: DataSource::from(args.geometry.as_str()),
            object: args.object,
            initial_ncm: args.ncm,
            metric: args.metric,
            collision: if args.aggregate {
                CollisionPolicy::Sum
            } else {
                CollisionPolicy::Overwrite
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut args = Args::parse();
    let export_path = args.export.take();
    let viewer_config = ViewerConfig::from(args);

    if let Some(path) = export_path {
        let runtime = tokio::runtime::Runtime::new()?;
        let summary = runtime.block_on(export::export_svg(&viewer_config, &path))?;
        tracing::info!(
            "Wrote {} ({} of {} regions colored)",
            path.display(),
            summary.colored,
            summary.regions
        );
        return Ok(());
    }

    tracing::info!("Starting Heat Map Viewer");
    config::install(viewer_config);

    // Launch the Dioxus desktop app
    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title("Export Heat Map")
                        .with_inner_size(LogicalSize::new(1280, 900)),
                )
                .with_custom_head(format!("<style>{}</style>", STYLES_CSS)),
        )
        .launch(RootApp);

    Ok(())
}

/// Root application component that owns the one-time loads.
#[component]
fn RootApp() -> Element {
    let state = use_signal(|| {
        let cfg = config::config();
        AppState::new(cfg.metric, cfg.collision)
    });

    // Dataset: absent until this resolves, then searched once if --ncm was given
    let _dataset = use_resource(move || {
        let mut state = state;

        async move {
            let cfg = config::config();
            let dataset = load_dataset(&cfg.data).await.unwrap_or_else(|e| {
                tracing::warn!("Dataset load failed ({}): {}", cfg.data, e);
                Dataset::default()
            });

            let mut state = state.write();
            state.set_dataset(dataset);
            if let Some(ncm) = &cfg.initial_ncm {
                state.set_query(ncm);
                state.search();
            }
        }
    });

    // Geometry: projected once, colored on every render
    let _geometry = use_resource(move || {
        let mut state = state;

        async move {
            let cfg = config::config();
            let shapes = match load_regions(&cfg.geometry, &cfg.object).await {
                Ok(regions) => project_regions(&regions, &Mercator::default()),
                Err(e) => {
                    tracing::warn!("Geometry load failed ({}): {}", cfg.geometry, e);
                    Vec::new()
                }
            };

            state.write().set_shapes(shapes);
        }
    });

    rsx! {
        App { state }
    }
}
