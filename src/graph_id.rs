//! Stable identity for [`Graph`](crate::graph::Graph) values.
//!
//! A `Graph` handle is a cheaply-cloneable `Rc` around shared, mutable
//! state (see [`crate::graph`]). Two clones of the same handle must be
//! recognized as *the same graph* by the planner so that diamond
//! dependencies (one graph read from two different places) are counted
//! correctly rather than treated as unrelated graphs. `GraphId` is the
//! opaque, `Copy`, hashable token that makes that comparison cheap.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Unique identifier assigned to a graph when it is created.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GraphId(u64);

impl GraphId {
    /// Allocate a fresh, globally unique id.
    pub(crate) fn fresh() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The underlying numeric value, useful for debugging/logging.
    pub fn raw(&self) -> u64 {
        self.0
    }
}
