//! VerifyCircularDependencies: packages must form an acyclic import graph.
//!
//! Nodes are packages, edges are resolved imports. A DFS with an explicit
//! recursion stack finds back-edges; each back-edge is reported once per
//! unordered package pair, at the use declaration that closes the cycle.

use std::collections::HashSet;

use indexmap::IndexMap;

use super::Linker;
use crate::diagnostics::DiagnosticKind;
use crate::scope::{LocalId, PackageId, ScopeTree};

/// An import edge out of a package, remembered with the file that declared it.
#[derive(Clone, Copy)]
struct Edge {
    target: PackageId,
    local: LocalId,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Unvisited,
    OnStack,
    Done,
}

impl Linker<'_> {
    pub(super) fn verify_circular_dependencies(&mut self) {
        let graph = build_graph(self.tree);
        let mut finder = CycleFinder {
            tree: self.tree,
            graph: &graph,
            state: vec![State::Unvisited; self.tree.packages().len()],
            stack: Vec::new(),
            reported: HashSet::new(),
            cycles: Vec::new(),
        };
        for &package in graph.keys() {
            if finder.state[package.index()] == State::Unvisited {
                finder.visit(package);
            }
        }

        let cycles = finder.cycles;
        tracing::debug!(cycles = cycles.len(), "import graph checked");
        for cycle in cycles {
            self.report_cycle(cycle);
        }
    }

    fn report_cycle(&mut self, cycle: Cycle) {
        let importer = self.tree.local(cycle.importer);
        let imported = self.tree.local(cycle.imported);
        let Some(import) = importer.import_of(cycle.target) else {
            return;
        };
        self.diagnostics
            .report(&importer.file, DiagnosticKind::CircularDependency, import.span)
            .message(format!("`{}` and `{}`", importer.file, imported.file))
            .emit();
    }
}

/// Adjacency map ordered by package path; edges deduplicated per target
/// (first declaring file wins) and ordered by target path.
fn build_graph(tree: &ScopeTree) -> IndexMap<PackageId, Vec<Edge>> {
    let mut packages: Vec<_> = tree.packages().iter().collect();
    packages.sort_by(|a, b| a.path.cmp(&b.path));

    let mut graph = IndexMap::new();
    for package in packages {
        let mut edges: Vec<Edge> = Vec::new();
        for &local in &package.locals {
            for target in tree.local(local).resolved_packages() {
                if edges.iter().all(|e| e.target != target) {
                    edges.push(Edge { target, local });
                }
            }
        }
        edges.sort_by(|a, b| tree.package(a.target).path.cmp(&tree.package(b.target).path));
        graph.insert(package.id, edges);
    }
    graph
}

struct Cycle {
    /// File whose import closes the cycle.
    importer: LocalId,
    /// Package that import points back to.
    target: PackageId,
    /// File in `target` whose import lies on the cycle.
    imported: LocalId,
}

struct CycleFinder<'a> {
    tree: &'a ScopeTree,
    graph: &'a IndexMap<PackageId, Vec<Edge>>,
    state: Vec<State>,
    /// Packages on the current DFS path, with the edge taken out of each.
    stack: Vec<(PackageId, Option<Edge>)>,
    reported: HashSet<(PackageId, PackageId)>,
    cycles: Vec<Cycle>,
}

impl CycleFinder<'_> {
    fn visit(&mut self, package: PackageId) {
        self.state[package.index()] = State::OnStack;
        self.stack.push((package, None));

        let graph = self.graph;
        let edges = graph.get(&package).map(Vec::as_slice).unwrap_or_default();
        for &edge in edges {
            if let Some(top) = self.stack.last_mut() {
                top.1 = Some(edge);
            }
            match self.state[edge.target.index()] {
                State::Unvisited => self.visit(edge.target),
                State::OnStack => self.back_edge(package, edge),
                State::Done => {}
            }
        }

        self.stack.pop();
        self.state[package.index()] = State::Done;
    }

    fn back_edge(&mut self, from: PackageId, edge: Edge) {
        let pair = if from < edge.target {
            (from, edge.target)
        } else {
            (edge.target, from)
        };
        if !self.reported.insert(pair) {
            return;
        }

        let imported = self
            .stack
            .iter()
            .find(|(package, _)| *package == edge.target)
            .and_then(|(_, taken)| *taken)
            .map_or(edge.local, |taken| taken.local);

        tracing::trace!(
            from = %self.tree.package(from).path,
            to = %self.tree.package(edge.target).path,
            "import cycle"
        );
        self.cycles.push(Cycle {
            importer: edge.local,
            target: edge.target,
            imported,
        });
    }
}
