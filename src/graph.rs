//! The graph builder: a mutable, append-only pipeline of operators
//! rooted at a single main source.
//!
//! A [`Graph`] is a cheap-to-clone handle (an `Rc` around shared
//! interior-mutable state). Cloning a `Graph` does not copy its
//! pipeline -- it shares it, which is exactly what lets two downstream
//! consumers (e.g. a direct reader and a joiner) refer to "the same
//! graph" and be recognized as such by the planner via [`GraphId`].

use crate::error::{CascadeError, Result};
use crate::graph_id::GraphId;
use crate::node::{JoinStrategy, OperatorNode};
use crate::record::{KeySpec, Record};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Where a graph reads its input from.
#[derive(Clone)]
pub(crate) enum MainSource {
    /// The name of an external input supplied to `run`.
    Name(String),
    /// Another graph's output.
    Graph(Graph),
}

pub(crate) struct GraphInner {
    pub(crate) id: GraphId,
    pub(crate) main_source: MainSource,
    pub(crate) nodes: Vec<OperatorNode>,
}

/// A graph: an ordered sequence of operators with one main source.
///
/// Build one with [`Graph::create`] and extend it with `add_map`,
/// `add_reduce`, `add_sort`, `add_fold`, and `add_join`. Appending never
/// triggers planning or execution; the graph is only interpreted when
/// it (or a graph downstream of it) is passed to [`crate::run`].
#[derive(Clone)]
pub struct Graph {
    pub(crate) inner: Rc<RefCell<GraphInner>>,
}

impl Graph {
    fn new(main_source: MainSource) -> Self {
        Self {
            inner: Rc::new(RefCell::new(GraphInner {
                id: GraphId::fresh(),
                main_source,
                nodes: Vec::new(),
            })),
        }
    }

    /// Create a graph rooted at the named external input `source`,
    /// supplied later to `run`.
    #[must_use]
    pub fn create(source: impl Into<String>) -> Self {
        Self::new(MainSource::Name(source.into()))
    }

    /// Create a graph rooted at another graph's output.
    #[must_use]
    pub fn create_from(source: &Graph) -> Self {
        Self::new(MainSource::Graph(source.clone()))
    }

    pub(crate) fn id(&self) -> GraphId {
        self.inner.borrow().id
    }

    /// A clone of this graph's main source descriptor.
    pub(crate) fn main_source(&self) -> MainSource {
        self.inner.borrow().main_source.clone()
    }

    /// A clone of this graph's operator sequence, in declared order.
    pub(crate) fn nodes(&self) -> Vec<OperatorNode> {
        self.inner.borrow().nodes.clone()
    }

    /// Append a map operator. `mapper` receives an owned copy of each
    /// upstream record and returns zero or more replacement records.
    pub fn add_map<F>(&self, mapper: F) -> &Self
    where
        F: Fn(Record) -> Result<Vec<Record>> + 'static,
    {
        self.inner
            .borrow_mut()
            .nodes
            .push(OperatorNode::Map(Arc::new(mapper)));
        self
    }

    /// Append a reduce operator, grouping consecutive records sharing
    /// the same key value. `reduce_by` is a field name or tuple of
    /// field names; it must not be empty.
    ///
    /// # Errors
    /// Returns [`CascadeError::Config`] if `reduce_by` is empty.
    pub fn add_reduce<F>(&self, reducer: F, reduce_by: impl Into<KeySpec>) -> Result<&Self>
    where
        F: Fn(Record, &mut dyn Iterator<Item = Result<Record>>) -> Result<Vec<Record>> + 'static,
    {
        let key = reduce_by.into();
        if key.is_empty() {
            return Err(CascadeError::config(
                "add_reduce: reduce_by must name at least one field",
            ));
        }
        self.inner
            .borrow_mut()
            .nodes
            .push(OperatorNode::Reduce(Arc::new(reducer), key));
        Ok(self)
    }

    /// Append a sort operator. `sort_by` is a field name or tuple of
    /// field names; it must not be empty.
    ///
    /// # Errors
    /// Returns [`CascadeError::Config`] if `sort_by` is empty.
    pub fn add_sort(&self, sort_by: impl Into<KeySpec>) -> Result<&Self> {
        let key = sort_by.into();
        if key.is_empty() {
            return Err(CascadeError::config(
                "add_sort: sort_by must name at least one field",
            ));
        }
        self.inner.borrow_mut().nodes.push(OperatorNode::Sort(key));
        Ok(self)
    }

    /// Append a fold operator. `folder` consumes the whole upstream
    /// iterator (in any manner) and returns exactly one record.
    pub fn add_fold<F>(&self, folder: F) -> &Self
    where
        F: Fn(&mut dyn Iterator<Item = Result<Record>>) -> Result<Record> + 'static,
    {
        self.inner
            .borrow_mut()
            .nodes
            .push(OperatorNode::Fold(Arc::new(folder)));
        self
    }

    /// Append a sorted-merge join against `other`. An empty `join_by`
    /// means the entire input on both sides is treated as one group.
    pub fn add_join(
        &self,
        other: &Graph,
        join_by: impl Into<KeySpec>,
        strategy: JoinStrategy,
    ) -> &Self {
        self.inner.borrow_mut().nodes.push(OperatorNode::Join {
            other: other.clone(),
            key: join_by.into(),
            strategy,
        });
        self
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Graph")
            .field("id", &inner.id)
            .field("nodes", &inner.nodes.len())
            .finish()
    }
}
