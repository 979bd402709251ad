//! The external inputs a `run` call supplies by name.

use crate::graph::Graph;
use crate::record::Record;
use std::collections::HashMap;

/// One named input to `run`: either a caller-supplied once-iterable of
/// records, or another graph whose output should be used as that name
/// (`spec.md` §4.2: "values may also be graphs, meaning 'run this
/// graph and use its result as the named source'").
pub enum Source {
    Iter(Box<dyn Iterator<Item = Record>>),
    Graph(Graph),
}

impl Source {
    /// Wrap any `Iterator<Item = Record>` as a named source.
    pub fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Record>,
        I::IntoIter: 'static,
    {
        Source::Iter(Box::new(iter.into_iter()))
    }
}

impl From<Graph> for Source {
    fn from(g: Graph) -> Self {
        Source::Graph(g)
    }
}

/// The `name -> input` mapping passed to `run`.
pub type Sources = HashMap<String, Source>;
