//! The planner: turns a root graph plus its named sources into an
//! execution-ready [`Plan`].
//!
//! A plan is a topological ordering of every graph transitively reachable
//! from the root (via a main source that is itself a graph, a `run`
//! source slot bound to a graph, or a join's right-hand side), together
//! with enough refcounting information to decide which of those graphs
//! must be eagerly materialized before their dependents can run
//! (`spec.md` §4.2: "a graph referenced from more than one place must be
//! materialized once and shared").

use crate::error::{CascadeError, Result};
use crate::graph::{Graph, MainSource};
use crate::graph_id::GraphId;
use crate::source::{Source, Sources};
use std::collections::{HashMap, HashSet};

/// A graph's resolved execution plan.
pub(crate) struct Plan {
    /// Every graph transitively required by the root, in dependency
    /// order (a graph's dependencies precede it).
    pub(crate) order: Vec<Graph>,
    /// How many distinct places reference each graph (by id): a direct
    /// `create_from`/join edge, or a `run` source slot bound to it.
    pub(crate) refcount: HashMap<GraphId, usize>,
    /// How many graphs declare the given name as their main source --
    /// used to decide whether an external source iterator needs to be
    /// buffered so more than one graph can read it.
    pub(crate) name_usages: HashMap<String, usize>,
}

impl Plan {
    pub(crate) fn needs_materialize(&self, id: GraphId) -> bool {
        self.refcount.get(&id).copied().unwrap_or(0) > 1
    }
}

/// Build a [`Plan`] for running `root` against `sources`.
///
/// Does not itself validate that every named source `root` (or a graph
/// it transitively depends on) reads from is present in `sources` --
/// an unknown name surfaces as [`CascadeError::Config`] once the
/// runner tries to resolve that graph's input stream.
///
/// # Errors
/// Returns [`CascadeError::Config`] if a graph dependency cycle is
/// found.
pub(crate) fn plan(root: &Graph, sources: &Sources) -> Result<Plan> {
    let mut visited: HashSet<GraphId> = HashSet::new();
    let mut visiting: HashSet<GraphId> = HashSet::new();
    let mut order: Vec<Graph> = Vec::new();
    let mut refcount: HashMap<GraphId, usize> = HashMap::new();
    let mut name_usages: HashMap<String, usize> = HashMap::new();

    // Visit every graph a `run` source slot points at first, in a
    // deterministic (sorted-by-name) order, so the resulting plan does
    // not depend on the caller's HashMap iteration order.
    let mut graph_sources: Vec<(&String, &Graph)> = sources
        .iter()
        .filter_map(|(name, src)| match src {
            Source::Graph(g) => Some((name, g)),
            Source::Iter(_) => None,
        })
        .collect();
    graph_sources.sort_by(|a, b| a.0.cmp(b.0));

    for (_, g) in &graph_sources {
        visit(g, sources, &mut visited, &mut visiting, &mut order, &mut refcount, &mut name_usages)?;
    }
    visit(root, sources, &mut visited, &mut visiting, &mut order, &mut refcount, &mut name_usages)?;

    Ok(Plan {
        order,
        refcount,
        name_usages,
    })
}

/// Post-order DFS: push `g` onto `order` only after everything it
/// depends on is already there, and bump the refcount of each
/// dependency once per distinct referencing edge.
#[allow(clippy::too_many_arguments)]
fn visit(
    g: &Graph,
    sources: &Sources,
    visited: &mut HashSet<GraphId>,
    visiting: &mut HashSet<GraphId>,
    order: &mut Vec<Graph>,
    refcount: &mut HashMap<GraphId, usize>,
    name_usages: &mut HashMap<String, usize>,
) -> Result<()> {
    let id = g.id();
    if visited.contains(&id) {
        return Ok(());
    }
    if !visiting.insert(id) {
        return Err(CascadeError::config(
            "graph dependency cycle detected while planning",
        ));
    }

    if let MainSource::Name(name) = g.main_source() {
        *name_usages.entry(name.clone()).or_insert(0) += 1;
    }

    for dep in out_edges(g, sources)? {
        visit(&dep, sources, visited, visiting, order, refcount, name_usages)?;
        *refcount.entry(dep.id()).or_insert(0) += 1;
    }

    visiting.remove(&id);
    visited.insert(id);
    order.push(g.clone());
    Ok(())
}

/// The other graphs `g` reads from: its main source (if a graph, whether
/// directly via `create_from` or indirectly via a named `run` source
/// slot bound to a graph) and every join's right-hand side.
fn out_edges(g: &Graph, sources: &Sources) -> Result<Vec<Graph>> {
    let mut edges = Vec::new();

    match g.main_source() {
        MainSource::Name(name) => {
            if let Some(Source::Graph(dep)) = sources.get(&name) {
                edges.push(dep.clone());
            }
        }
        MainSource::Graph(dep) => edges.push(dep.clone()),
    }

    for node in g.nodes() {
        if let Some(other) = node.joined_graph() {
            edges.push(other.clone());
        }
    }

    Ok(edges)
}
