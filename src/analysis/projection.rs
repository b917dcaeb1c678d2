use std::collections::{BTreeSet, HashSet};

use super::graph::{Edge, Module, RawGraph};
use super::name::cap_str;

pub const DEFAULT_DEPTH: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProjectionConfig {
    pub include_external: bool,
    pub depth: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            include_external: false,
            depth: DEFAULT_DEPTH,
        }
    }
}

/// Deduplicated, depth-capped module/edge set ready for layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectedGraph {
    pub modules: Vec<Module>,
    pub requires: Vec<Edge>,
}

impl ProjectedGraph {
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|module| module.name.as_str())
    }
}

pub fn project(graph: &RawGraph, config: ProjectionConfig) -> ProjectedGraph {
    project_parts(&graph.modules, &graph.requires, config)
}

/// Narrows an already projected graph to `selection`, keeping edges
/// consistent with the remaining modules.
pub fn restrict_to_selection(
    projected: &ProjectedGraph,
    selection: &BTreeSet<String>,
    config: ProjectionConfig,
) -> ProjectedGraph {
    let selected = projected
        .modules
        .iter()
        .filter(|module| selection.contains(module.name.as_str()))
        .cloned()
        .collect::<Vec<_>>();

    project_parts(&selected, &projected.requires, config)
}

fn project_parts(modules: &[Module], requires: &[Edge], config: ProjectionConfig) -> ProjectedGraph {
    let mut seen = HashSet::with_capacity(modules.len());
    let mut projected_modules = Vec::with_capacity(modules.len());

    for module in modules {
        if module.external && !config.include_external {
            continue;
        }

        if !seen.insert(module.name.capped(config.depth)) {
            continue;
        }

        projected_modules.push(Module {
            name: module.name.cap(config.depth),
            external: module.external,
            mccabe: module.mccabe.clone(),
        });
    }

    let mut seen_edges = HashSet::with_capacity(requires.len());
    let mut projected_requires = Vec::new();

    for edge in requires {
        let from = cap_str(&edge.from, config.depth);
        let to = cap_str(&edge.to, config.depth);

        if from == to || !seen.contains(from) || !seen.contains(to) {
            continue;
        }

        if seen_edges.insert((from, to)) {
            projected_requires.push(Edge::new(from, to));
        }
    }

    ProjectedGraph {
        modules: projected_modules,
        requires: projected_requires,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::graph::tests::module;

    fn raw(modules: Vec<Module>, requires: &[(&str, &str)]) -> RawGraph {
        RawGraph {
            modules,
            requires: requires
                .iter()
                .map(|(from, to)| Edge::new(*from, *to))
                .collect(),
        }
    }

    fn config(depth: usize, include_external: bool) -> ProjectionConfig {
        ProjectionConfig {
            include_external,
            depth,
        }
    }

    fn names(graph: &ProjectedGraph) -> Vec<&str> {
        graph.module_names().collect()
    }

    fn assert_well_formed(graph: &ProjectedGraph) {
        let unique = graph.module_names().collect::<HashSet<_>>();
        assert_eq!(unique.len(), graph.modules.len(), "duplicate module names");
        for edge in &graph.requires {
            assert_ne!(edge.from, edge.to);
            assert!(unique.contains(edge.from.as_str()));
            assert!(unique.contains(edge.to.as_str()));
        }
    }

    #[test]
    fn collapsed_siblings_drop_self_loop() {
        let graph = raw(
            vec![module("a.b", false, &[3.0]), module("a.c", false, &[5.0])],
            &[("a.b", "a.c")],
        );
        let projected = project(&graph, config(1, true));

        assert_eq!(names(&projected), vec!["a"]);
        assert!(projected.requires.is_empty());
        // first occurrence is the representative
        assert_eq!(projected.modules[0].mccabe[0].complexity, 3.0);
    }

    #[test]
    fn external_modules_and_their_edges_are_hidden_by_default() {
        let graph = raw(
            vec![
                module("app.core", false, &[]),
                module("app.web", false, &[]),
                module("requests", true, &[]),
            ],
            &[("app.web", "app.core"), ("app.web", "requests")],
        );

        let internal = project(&graph, ProjectionConfig::default());
        assert_eq!(names(&internal), vec!["app.core", "app.web"]);
        assert_eq!(internal.requires, vec![Edge::new("app.web", "app.core")]);

        let with_external = project(&graph, config(2, true));
        assert_eq!(with_external.requires.len(), 2);
        assert_well_formed(&with_external);
    }

    #[test]
    fn capped_edges_are_deduplicated_and_dangling_ones_pruned() {
        let graph = raw(
            vec![
                module("a.x.one", false, &[]),
                module("a.x.two", false, &[]),
                module("b.y", false, &[]),
            ],
            &[
                ("a.x.one", "b.y.deep"),
                ("a.x.two", "b.y"),
                ("a.x.one", "missing.module"),
                ("b.y", "a.x.one"),
            ],
        );
        let projected = project(&graph, config(2, false));

        assert_eq!(names(&projected), vec!["a.x", "b.y"]);
        assert_eq!(
            projected.requires,
            vec![Edge::new("a.x", "b.y"), Edge::new("b.y", "a.x")]
        );
        assert_well_formed(&projected);
    }

    #[test]
    fn depth_beyond_hierarchy_is_a_no_op() {
        let graph = raw(
            vec![module("a.b", false, &[]), module("c", false, &[])],
            &[("a.b", "c")],
        );
        let projected = project(&graph, config(9, false));
        assert_eq!(names(&projected), vec!["a.b", "c"]);
        assert_eq!(projected.requires, vec![Edge::new("a.b", "c")]);
    }

    #[test]
    fn zero_depth_collapses_everything_into_one_node() {
        let graph = raw(
            vec![module("a.b", false, &[]), module("c", false, &[])],
            &[("a.b", "c"), ("c", "a.b")],
        );
        let projected = project(&graph, config(0, false));
        assert_eq!(names(&projected), vec![""]);
        assert!(projected.requires.is_empty());
    }

    #[test]
    fn zero_depth_result_reprojects_at_any_depth() {
        let graph = raw(
            vec![module("a.b", false, &[]), module("c", false, &[])],
            &[("a.b", "c")],
        );
        let collapsed = project(&graph, config(0, false));
        let reprojected = project(
            &RawGraph {
                modules: collapsed.modules.clone(),
                requires: collapsed.requires.clone(),
            },
            config(1, false),
        );
        assert_eq!(names(&reprojected), vec![""]);
        assert!(reprojected.requires.is_empty());
    }

    #[test]
    fn reprojection_is_idempotent() {
        let graph = raw(
            vec![
                module("p.q.r", false, &[1.0]),
                module("p.q.s", false, &[2.0]),
                module("p.t", false, &[]),
                module("ext.lib", true, &[]),
            ],
            &[("p.q.r", "p.t"), ("p.t", "p.q.s"), ("p.q.s", "ext.lib")],
        );

        for depth in 1..4 {
            for include_external in [false, true] {
                let cfg = config(depth, include_external);
                let once = project(&graph, cfg);
                let twice = project(
                    &RawGraph {
                        modules: once.modules.clone(),
                        requires: once.requires.clone(),
                    },
                    cfg,
                );
                assert_eq!(once, twice);
                assert_well_formed(&once);
            }
        }
    }

    #[test]
    fn empty_dataset_projects_to_empty_graph() {
        let projected = project(&RawGraph::default(), ProjectionConfig::default());
        assert!(projected.modules.is_empty());
        assert!(projected.requires.is_empty());
    }

    #[test]
    fn restriction_drops_edges_to_unselected_modules() {
        let graph = raw(
            vec![
                module("a.one", false, &[]),
                module("b.two", false, &[]),
                module("c.three", false, &[]),
            ],
            &[("a.one", "b.two"), ("b.two", "c.three"), ("a.one", "c.three")],
        );
        let cfg = config(2, false);
        let projected = project(&graph, cfg);
        let selection = ["a.one", "c.three"]
            .into_iter()
            .map(str::to_owned)
            .collect::<BTreeSet<_>>();

        let restricted = restrict_to_selection(&projected, &selection, cfg);
        assert_eq!(names(&restricted), vec!["a.one", "c.three"]);
        assert_eq!(restricted.requires, vec![Edge::new("a.one", "c.three")]);
        assert_well_formed(&restricted);
    }
}
