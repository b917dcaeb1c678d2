use std::cmp::Ordering;

use serde::Deserialize;

use super::name::ModuleName;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Artifact {
    pub artifact: String,
    pub complexity: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Module {
    #[serde(rename = "moduleName")]
    pub name: ModuleName,
    pub external: bool,
    pub mccabe: Vec<Artifact>,
}

impl Module {
    /// Sum of artifact complexities.
    pub fn complexity(&self) -> f64 {
        self.mccabe.iter().map(|artifact| artifact.complexity).sum()
    }
}

/// Directed "requires" relation, stored in the dataset as `[from, to]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "(String, String)")]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl From<(String, String)> for Edge {
    fn from((from, to): (String, String)) -> Self {
        Self { from, to }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawGraph {
    pub modules: Vec<Module>,
    pub requires: Vec<Edge>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RankedArtifact {
    pub module_name: String,
    pub artifact: String,
    pub complexity: f64,
}

impl RawGraph {
    pub fn find_module(&self, name: &str) -> Option<&Module> {
        self.modules
            .iter()
            .find(|module| module.name.as_str() == name)
    }

    /// Deepest hierarchy among internal modules, never below 1.
    pub fn max_internal_depth(&self) -> usize {
        self.modules
            .iter()
            .filter(|module| !module.external)
            .map(|module| module.name.segment_count())
            .max()
            .unwrap_or(1)
            .max(1)
    }

    pub fn top_modules_by_complexity(&self, limit: usize) -> Vec<(&Module, f64)> {
        let mut ranked = self
            .modules
            .iter()
            .map(|module| (module, module.complexity()))
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| descending(a.1, b.1));
        ranked.truncate(limit);
        ranked
    }

    pub fn top_artifacts_by_complexity(&self, limit: usize) -> Vec<RankedArtifact> {
        let mut ranked = self
            .modules
            .iter()
            .flat_map(|module| {
                module.mccabe.iter().map(|artifact| RankedArtifact {
                    module_name: module.name.to_string(),
                    artifact: artifact.artifact.clone(),
                    complexity: artifact.complexity,
                })
            })
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| descending(a.complexity, b.complexity));
        ranked.truncate(limit);
        ranked
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn module(name: &str, external: bool, complexities: &[f64]) -> Module {
        Module {
            name: ModuleName::parse(name),
            external,
            mccabe: complexities
                .iter()
                .enumerate()
                .map(|(index, complexity)| Artifact {
                    artifact: format!("f{index}"),
                    complexity: *complexity,
                })
                .collect(),
        }
    }

    #[test]
    fn module_complexity_sums_artifacts() {
        assert_eq!(module("a", false, &[3.0, 4.5]).complexity(), 7.5);
        assert_eq!(module("a", false, &[]).complexity(), 0.0);
    }

    #[test]
    fn max_internal_depth_ignores_external_modules() {
        let graph = RawGraph {
            modules: vec![
                module("a.b", false, &[]),
                module("x.y.z.w", true, &[]),
                module("a.b.c", false, &[]),
            ],
            requires: Vec::new(),
        };
        assert_eq!(graph.max_internal_depth(), 3);
        assert_eq!(RawGraph::default().max_internal_depth(), 1);
    }

    #[test]
    fn rankings_are_descending_and_truncated() {
        let graph = RawGraph {
            modules: vec![
                module("low", false, &[1.0]),
                module("high", false, &[10.0, 2.0]),
                module("mid", false, &[5.0]),
            ],
            requires: Vec::new(),
        };

        let top = graph
            .top_modules_by_complexity(2)
            .into_iter()
            .map(|(module, complexity)| (module.name.to_string(), complexity))
            .collect::<Vec<_>>();
        assert_eq!(top, vec![("high".to_owned(), 12.0), ("mid".to_owned(), 5.0)]);

        let artifacts = graph.top_artifacts_by_complexity(3);
        let values = artifacts.iter().map(|a| a.complexity).collect::<Vec<_>>();
        assert_eq!(values, vec![10.0, 5.0, 2.0]);
        assert_eq!(artifacts[0].module_name, "high");
    }
}
