use super::graph::{Artifact, Module, RawGraph};

#[derive(Clone, Debug, PartialEq)]
pub struct SubmoduleComplexity {
    pub module_name: String,
    pub mccabe_complexity: f64,
}

/// Detail record shown for the activated module.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModuleDetails {
    pub module_name: String,
    pub external: bool,
    pub mccabe: Vec<Artifact>,
    pub module_complexity: f64,
    pub submodules: Vec<SubmoduleComplexity>,
}

impl ModuleDetails {
    pub fn submodules_complexity(&self) -> f64 {
        self.submodules
            .iter()
            .map(|submodule| submodule.mccabe_complexity)
            .sum()
    }

    /// Aggregate used for node sizing.
    ///
    /// The module's own artifact sum is counted twice: once through
    /// `module_complexity` and once through `mccabe`. Node radii are
    /// calibrated against this value, so keep it unless sizing changes too.
    pub fn node_total_complexity(&self) -> f64 {
        self.module_complexity + self.mccabe.iter().map(|a| a.complexity).sum::<f64>()
    }
}

pub fn module_complexity(module: Option<&Module>) -> f64 {
    module.map(Module::complexity).unwrap_or(0.0)
}

/// Raw modules collapsed into `selected` at `depth`, excluding a module
/// named exactly `selected`. Dataset order.
pub fn submodule_breakdown(
    selected: &str,
    modules: &[Module],
    depth: usize,
) -> Vec<SubmoduleComplexity> {
    modules
        .iter()
        .filter(|module| {
            module.name.capped(depth) == selected && module.name.as_str() != selected
        })
        .map(|module| SubmoduleComplexity {
            module_name: module.name.to_string(),
            mccabe_complexity: module.complexity(),
        })
        .collect()
}

pub fn module_details(selected: Option<&str>, graph: &RawGraph, depth: usize) -> ModuleDetails {
    let Some(selected) = selected else {
        return ModuleDetails::default();
    };

    let module = graph.find_module(selected);
    ModuleDetails {
        module_name: selected.to_owned(),
        external: module.is_some_and(|module| module.external),
        mccabe: module.map(|module| module.mccabe.clone()).unwrap_or_default(),
        module_complexity: module_complexity(module),
        submodules: submodule_breakdown(selected, &graph.modules, depth),
    }
}
