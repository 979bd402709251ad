//! The lazy operator engine: one small iterator adapter per node shape.
//!
//! Each submodule implements exactly one [`OperatorNode`] variant as an
//! `Iterator<Item = Result<Record>>` built on top of its upstream
//! iterator.

mod fold;
mod join;
mod map;
mod reduce;
mod sort;

use crate::error::Result;
use crate::graph_id::GraphId;
use crate::node::OperatorNode;
use crate::record::Record;
use crate::runner::GraphOutput;
use std::collections::HashMap;

pub(crate) type RecordIter = Box<dyn Iterator<Item = Result<Record>>>;

/// Apply one operator node to an upstream stream, producing the
/// downstream stream. `outputs` is consulted only by `Join`, to fetch
/// its already-executed right-hand side.
pub(crate) fn apply(
    upstream: RecordIter,
    node: OperatorNode,
    outputs: &HashMap<GraphId, GraphOutput>,
) -> Result<RecordIter> {
    Ok(match node {
        OperatorNode::Map(mapper) => Box::new(map::MapIter::new(upstream, mapper)),
        OperatorNode::Sort(key) => Box::new(sort::SortIter::new(upstream, key)),
        OperatorNode::Reduce(reducer, key) => Box::new(reduce::ReduceIter::new(upstream, reducer, key)),
        OperatorNode::Fold(folder) => Box::new(fold::FoldIter::new(upstream, folder)),
        OperatorNode::Join { other, key, strategy } => {
            let right = outputs
                .get(&other.id())
                .expect("join right-hand side already executed")
                .stream();
            Box::new(join::JoinIter::new(upstream, right, key, strategy))
        }
    })
}
