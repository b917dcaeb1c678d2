use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Pos2, Vec2};

use crate::analysis::{ModuleDetails, ProjectedGraph, ProjectionConfig, RawGraph, Selection, load_dataset};

mod graph;
mod physics;
mod render_utils;
mod ui;

use physics::Simulation;

/// Startup options taken from the command line.
#[derive(Clone, Copy, Debug)]
pub struct ViewOptions {
    pub projection: ProjectionConfig,
    pub show_names: bool,
}

pub struct PolymetricApp {
    options: ViewOptions,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<RawGraph, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    dataset: RawGraph,
    config: ProjectionConfig,
    show_names: bool,
    max_depth: usize,
    projected: Arc<ProjectedGraph>,
    selection: Selection,
    module_filter: String,
    selected: Option<String>,
    pan: Vec2,
    zoom: f32,
    live_physics: bool,
    drag: Option<usize>,
    graph_dirty: bool,
    render_graph_revision: u64,
    graph_cache: Option<RenderGraph>,
    derived_cache: Option<DerivedGraph>,
    details_cache: Option<DetailsCache>,
    top_modules: Vec<(String, f64)>,
    top_artifacts: Vec<(String, String, f64)>,
    visible_node_count: usize,
    visible_edge_count: usize,
}

/// Projected graph restricted to the selection, cached per key.
struct DerivedGraph {
    key: DerivedGraphKey,
    graph: Arc<ProjectedGraph>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct DerivedGraphKey {
    config: ProjectionConfig,
    selection: BTreeSet<String>,
}

struct DetailsCache {
    key: DetailsCacheKey,
    details: ModuleDetails,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct DetailsCacheKey {
    selected_id: Option<String>,
    depth: usize,
}

/// One simulation run. Dropped as a whole when the data set changes.
struct RenderGraph {
    nodes: Vec<RenderNode>,
    edges: Vec<(usize, usize)>,
    index_by_id: HashMap<String, usize>,
    simulation: Simulation,
    view_scratch: ViewScratch,
}

struct ViewScratch {
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
    visible_indices: Vec<usize>,
    visible_mask: Vec<bool>,
}

struct RenderNode {
    id: String,
    complexity: f64,
    radius: f32,
    world_pos: Vec2,
    velocity: Vec2,
    pin: Pin,
}

/// Per-node position override used while a node is dragged.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Pin {
    Free,
    Pinned(Vec2),
}

impl RenderNode {
    fn is_finite(&self) -> bool {
        self.world_pos.is_finite()
    }

    /// Pins the node and moves it there right away, so a held node follows
    /// the pointer even while the simulation is paused.
    fn hold_at(&mut self, position: Vec2) {
        self.pin = Pin::Pinned(position);
        self.world_pos = position;
        self.velocity = Vec2::ZERO;
    }
}

impl PolymetricApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dataset_path: PathBuf, options: ViewOptions) -> Self {
        Self {
            options,
            state: AppState::Loading {
                rx: Self::spawn_load(dataset_path),
            },
        }
    }

    fn spawn_load(dataset_path: PathBuf) -> Receiver<Result<RawGraph, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_dataset(&dataset_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }
}

impl eframe::App for PolymetricApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(dataset)) => {
                        tracing::info!(
                            modules = dataset.modules.len(),
                            requires = dataset.requires.len(),
                            "dataset loaded"
                        );
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            dataset,
                            self.options,
                        ))));
                    }
                    Ok(Err(error)) => {
                        tracing::error!(%error, "dataset could not be loaded");
                        transition = Some(AppState::Error(error));
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error(
                            "Background load worker disconnected".to_owned(),
                        ));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading module graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the module dataset");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                });
            }
            AppState::Ready(model) => model.show(ctx),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
