mod analysis;
mod app;
mod util;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use analysis::{DEFAULT_DEPTH, ProjectionConfig};

/// Interactive polymetric view of a module dependency graph.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Reconstruction data set with `modules` and `requires`.
    #[arg(default_value = "reconstruction.json")]
    dataset: PathBuf,

    /// Number of leading name segments kept when collapsing modules.
    #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = parse_depth)]
    depth: usize,

    /// Start with external dependencies included.
    #[arg(long)]
    include_external: bool,

    /// Start with node labels hidden.
    #[arg(long)]
    hide_names: bool,
}

fn parse_depth(value: &str) -> Result<usize, String> {
    let depth: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a whole number"))?;
    if depth == 0 {
        return Err("depth must be at least 1".to_owned());
    }
    Ok(depth)
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let view_options = app::ViewOptions {
        projection: ProjectionConfig {
            include_external: args.include_external,
            depth: args.depth,
        },
        show_names: !args.hide_names,
    };
    tracing::info!(
        dataset = %args.dataset.display(),
        depth = args.depth,
        include_external = args.include_external,
        "starting polymetric view"
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Polymetric view",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::PolymetricApp::new(
                cc,
                args.dataset.clone(),
                view_options,
            )))
        }),
    )
}
