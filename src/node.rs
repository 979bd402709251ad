//! The operator taxonomy: the six node shapes a [`Graph`](crate::graph::Graph)
//! can hold, per `spec.md` §3's "Operator node".
//!
//! Every node but `Init` is appended by the graph builder
//! ([`crate::graph`]); `Init` itself is synthesized by the planner at
//! `run` time once the graph's main source has been resolved to either
//! an external iterable or another graph's buffered result.

use crate::error::Result;
use crate::graph::Graph;
use crate::record::{KeySpec, Record};
use std::sync::Arc;

/// A mapper: takes one record, yields zero or more.
///
/// Execution is single-threaded (`spec.md` §5), so user callables are
/// plain `Rc`-friendly closures rather than `Send + Sync` trait
/// objects.
pub type Mapper = Arc<dyn Fn(Record) -> Result<Vec<Record>>>;

/// A reducer: takes the key's record and a cursor over the group's
/// remaining records, yields zero or more output records. The cursor
/// may be partially consumed -- the engine, not the reducer, owns group
/// boundaries (see [`crate::engine::reduce`]).
pub type Reducer =
    Arc<dyn Fn(Record, &mut dyn Iterator<Item = Result<Record>>) -> Result<Vec<Record>>>;

/// A folder: consumes the whole upstream iterator in any manner it
/// likes and returns exactly one record.
pub type Folder = Arc<dyn Fn(&mut dyn Iterator<Item = Result<Record>>) -> Result<Record>>;

/// Join strategy: which unmatched sides are emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinStrategy {
    Inner,
    Left,
    Right,
    Outer,
}

impl JoinStrategy {
    /// Whether unmatched left-only groups are emitted.
    pub(crate) fn add_left_only(self) -> bool {
        matches!(self, JoinStrategy::Left | JoinStrategy::Outer)
    }

    /// Whether unmatched right-only groups are emitted.
    pub(crate) fn add_right_only(self) -> bool {
        matches!(self, JoinStrategy::Right | JoinStrategy::Outer)
    }
}

/// One operator in a graph's pipeline, appended in order after the
/// (implicit, planner-assigned) `Init`.
#[derive(Clone)]
pub enum OperatorNode {
    Map(Mapper),
    Reduce(Reducer, KeySpec),
    Sort(KeySpec),
    Fold(Folder),
    Join {
        other: Graph,
        key: KeySpec,
        strategy: JoinStrategy,
    },
}

impl OperatorNode {
    /// The other graph this node depends on, if any -- used by the
    /// planner to walk join edges (`spec.md` §4.2 step 1).
    pub(crate) fn joined_graph(&self) -> Option<&Graph> {
        match self {
            OperatorNode::Join { other, .. } => Some(other),
            _ => None,
        }
    }
}
