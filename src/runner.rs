//! The execution entry point: plans a graph, then walks the plan in
//! topological order, materializing any graph referenced from more than
//! one place and streaming the rest.

use crate::engine;
use crate::error::{CascadeError, Result};
use crate::graph::{Graph, MainSource};
use crate::graph_id::GraphId;
use crate::planner;
use crate::record::Record;
use crate::source::{Source, Sources};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A boxed, not-`Send` iterator of fallible records -- the currency the
/// whole engine passes between operators.
pub type RecordIter = Box<dyn Iterator<Item = Result<Record>>>;

/// A graph's resolved output: either eagerly materialized (because more
/// than one place reads it) or held as a single lazy stream for its sole
/// consumer.
pub(crate) enum GraphOutput {
    Buffered(Rc<Vec<Record>>),
    Streaming(RefCell<Option<RecordIter>>),
}

impl GraphOutput {
    /// Produce a fresh iterator over this output. A buffered output can
    /// be iterated any number of times; a streaming output can only be
    /// drawn from once -- pulling it a second time would mean the
    /// planner under-counted its refcount, which is a bug, not a user
    /// error.
    pub(crate) fn stream(&self) -> RecordIter {
        match self {
            GraphOutput::Buffered(records) => Box::new(BufferedIter {
                records: Rc::clone(records),
                pos: 0,
            }),
            GraphOutput::Streaming(cell) => cell
                .borrow_mut()
                .take()
                .expect("a streaming graph output must have exactly one consumer"),
        }
    }
}

struct BufferedIter {
    records: Rc<Vec<Record>>,
    pos: usize,
}

impl Iterator for BufferedIter {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.get(self.pos)?.clone();
        self.pos += 1;
        Some(Ok(record))
    }
}

/// An external (non-graph) source, wrapped so every graph naming it can
/// share the same underlying data.
pub(crate) enum RawSource {
    /// Only one graph names this source: read it through once, directly.
    Single(RefCell<Option<Box<dyn Iterator<Item = Record>>>>),
    /// More than one graph names this source: buffered eagerly so each
    /// reader gets its own independent cursor.
    Shared(Rc<Vec<Record>>),
}

impl RawSource {
    pub(crate) fn stream(&self) -> RecordIter {
        match self {
            RawSource::Single(cell) => {
                let iter = cell
                    .borrow_mut()
                    .take()
                    .expect("an unshared source must have exactly one consumer");
                Box::new(iter.map(Ok))
            }
            RawSource::Shared(records) => Box::new(BufferedIter {
                records: Rc::clone(records),
                pos: 0,
            }),
        }
    }
}

/// Run `root` against `sources`, returning a lazy iterator over its
/// output records.
///
/// Every graph transitively referenced from `root` (directly, through
/// `create_from`, a named source bound to a graph, or a join's
/// right-hand side) is planned and, if referenced from more than one
/// place, eagerly materialized before `root` itself runs -- so an error
/// inside a shared upstream graph surfaces from this call, while an
/// error inside an unshared upstream graph only surfaces once the
/// returned iterator is actually pulled.
///
/// # Errors
/// Returns [`CascadeError::Config`] if `root` or any of its dependencies
/// names a source absent from `sources`, or if the graph dependencies
/// form a cycle. Returns [`CascadeError::Order`] if a reduce or join
/// input is not sorted on its key. Returns [`CascadeError::User`] if a
/// mapper, reducer, or folder returns an error, for graphs materialized
/// as part of this call; an unshared graph's user errors surface lazily
/// from the returned iterator instead.
pub fn run(root: &Graph, sources: Sources) -> Result<RecordIter> {
    let plan = planner::plan(root, &sources)?;

    let mut graph_sources: HashMap<String, Graph> = HashMap::new();
    let mut raw_sources: HashMap<String, RawSource> = HashMap::new();
    for (name, source) in sources {
        match source {
            Source::Graph(g) => {
                graph_sources.insert(name, g);
            }
            Source::Iter(iter) => {
                let shared = plan.name_usages.get(&name).copied().unwrap_or(0) > 1;
                let raw = if shared {
                    RawSource::Shared(Rc::new(iter.collect()))
                } else {
                    RawSource::Single(RefCell::new(Some(iter)))
                };
                raw_sources.insert(name, raw);
            }
        }
    }

    // Every graph in the plan is executed in dependency order, root
    // included, so a graph that (unusually) depends on the root itself
    // through a named source binding still finds it in `outputs`.
    let mut outputs: HashMap<GraphId, GraphOutput> = HashMap::new();
    for g in &plan.order {
        let id = g.id();
        let stream = resolve_stream(g, &graph_sources, &raw_sources, &outputs)?;
        tracing::debug!(
            graph = id.raw(),
            materialize = plan.needs_materialize(id),
            "executing graph"
        );
        let output = if plan.needs_materialize(id) {
            let records: Vec<Record> = stream.collect::<Result<_>>()?;
            GraphOutput::Buffered(Rc::new(records))
        } else {
            GraphOutput::Streaming(RefCell::new(Some(stream)))
        };
        outputs.insert(id, output);
    }

    Ok(outputs.remove(&root.id()).expect("root was just planned").stream())
}

fn resolve_stream(
    g: &Graph,
    graph_sources: &HashMap<String, Graph>,
    raw_sources: &HashMap<String, RawSource>,
    outputs: &HashMap<GraphId, GraphOutput>,
) -> Result<RecordIter> {
    let base: RecordIter = match g.main_source() {
        MainSource::Name(name) => {
            if let Some(dep) = graph_sources.get(&name) {
                outputs
                    .get(&dep.id())
                    .expect("dependency already executed")
                    .stream()
            } else if let Some(raw) = raw_sources.get(&name) {
                raw.stream()
            } else {
                return Err(CascadeError::config(format!("unknown source `{name}`")));
            }
        }
        MainSource::Graph(dep) => outputs
            .get(&dep.id())
            .expect("dependency already executed")
            .stream(),
    };

    g.nodes()
        .into_iter()
        .try_fold(base, |stream, node| engine::apply(stream, node, outputs))
}
