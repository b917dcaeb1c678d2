mod complexity;
mod graph;
mod name;
mod parse;
mod projection;
mod selection;

pub use complexity::{ModuleDetails, module_details};
pub use graph::RawGraph;
pub use parse::load_dataset;
pub use projection::{
    DEFAULT_DEPTH, ProjectedGraph, ProjectionConfig, project, restrict_to_selection,
};
pub use selection::{Selection, filter_module_names};
