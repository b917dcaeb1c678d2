use std::collections::BTreeSet;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::projection::ProjectedGraph;

/// Modules the user chose to keep on the canvas.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    names: BTreeSet<String>,
}

impl Selection {
    pub fn all_of(graph: &ProjectedGraph) -> Self {
        Self {
            names: graph.module_names().map(str::to_owned).collect(),
        }
    }

    pub fn names(&self) -> &BTreeSet<String> {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn toggle(&mut self, name: &str) {
        if !self.names.remove(name) {
            self.names.insert(name.to_owned());
        }
    }

    /// Empty selection becomes everything, anything else becomes empty.
    pub fn toggle_all(&mut self, graph: &ProjectedGraph) {
        if self.names.is_empty() {
            *self = Self::all_of(graph);
        } else {
            self.names.clear();
        }
    }

    /// Adds every module required by a selected module.
    pub fn add_dependencies(&mut self, graph: &ProjectedGraph) {
        let added = graph
            .requires
            .iter()
            .filter(|edge| self.names.contains(&edge.from))
            .map(|edge| edge.to.clone())
            .collect::<Vec<_>>();
        self.names.extend(added);
    }

    /// Adds every module that requires a selected module.
    pub fn add_dependents(&mut self, graph: &ProjectedGraph) {
        let added = graph
            .requires
            .iter()
            .filter(|edge| self.names.contains(&edge.to))
            .map(|edge| edge.from.clone())
            .collect::<Vec<_>>();
        self.names.extend(added);
    }
}

/// Checklist rows matching `query`; an empty query keeps every row.
pub fn filter_module_names<'a>(graph: &'a ProjectedGraph, query: &str) -> Vec<&'a str> {
    let query = query.trim();
    if query.is_empty() {
        return graph.module_names().collect();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    graph
        .module_names()
        .filter(|name| matcher.fuzzy_match(name, query).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::graph::Edge;
    use crate::analysis::graph::tests::module;

    fn graph() -> ProjectedGraph {
        ProjectedGraph {
            modules: vec![
                module("core", false, &[]),
                module("web", false, &[]),
                module("cli", false, &[]),
                module("utils", false, &[]),
            ],
            requires: vec![
                Edge::new("web", "core"),
                Edge::new("cli", "web"),
                Edge::new("core", "utils"),
            ],
        }
    }

    fn selection(names: &[&str]) -> Selection {
        let mut selection = Selection::default();
        for name in names {
            selection.toggle(name);
        }
        selection
    }

    #[test]
    fn toggle_all_flips_between_everything_and_nothing() {
        let graph = graph();
        let mut selection = Selection::all_of(&graph);
        assert_eq!(selection.len(), 4);

        selection.toggle_all(&graph);
        assert_eq!(selection.len(), 0);

        selection.toggle_all(&graph);
        assert_eq!(selection, Selection::all_of(&graph));
    }

    #[test]
    fn toggle_removes_and_reinserts() {
        let mut selection = selection(&["web"]);
        selection.toggle("web");
        assert!(!selection.contains("web"));
        selection.toggle("web");
        assert!(selection.contains("web"));
    }

    #[test]
    fn dependencies_follow_outgoing_edges_one_step() {
        let mut selection = selection(&["web"]);
        selection.add_dependencies(&graph());
        let names = selection.names().iter().cloned().collect::<Vec<_>>();
        assert_eq!(names, vec!["core", "web"]);
    }

    #[test]
    fn dependents_follow_incoming_edges_one_step() {
        let mut selection = selection(&["core"]);
        selection.add_dependents(&graph());
        let names = selection.names().iter().cloned().collect::<Vec<_>>();
        assert_eq!(names, vec!["core", "web"]);
    }

    #[test]
    fn checklist_filter_is_fuzzy() {
        let graph = graph();
        assert_eq!(filter_module_names(&graph, "").len(), 4);
        assert_eq!(filter_module_names(&graph, "UTL"), vec!["utils"]);
        assert!(filter_module_names(&graph, "zzz").is_empty());
    }
}
