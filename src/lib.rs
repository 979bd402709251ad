//! # Cascade
//!
//! A library for building and executing MapReduce-style computation
//! graphs over streams of records.
//!
//! A [`Graph`] is a declarative, lazily-interpreted pipeline: you build
//! it by chaining `add_map`/`add_reduce`/`add_sort`/`add_fold`/`add_join`
//! calls onto a source name or another graph, then hand the root graph
//! (plus its named external [`Source`]s) to [`run`]. Nothing executes
//! until `run` is called, and `run`'s own output is itself a lazy
//! iterator -- pulling a record from it is what actually drives the
//! graph.
//!
//! ## Quick start
//!
//! ```
//! use cascade::{run, Graph, Record, Source};
//!
//! # fn main() -> cascade::Result<()> {
//! let graph = Graph::create("lines");
//! graph.add_map(|r| {
//!     let text = r.get("text").and_then(|v| match v {
//!         cascade::Value::Str(s) => Some(s.clone()),
//!         _ => None,
//!     }).unwrap_or_default();
//!     Ok(text
//!         .split_whitespace()
//!         .map(|w| Record::from([("word", w.into())]))
//!         .collect())
//! });
//! graph.add_sort("word")?;
//! graph.add_reduce(
//!     |key, group| {
//!         let mut out = key;
//!         out.set("count", group.count() as i64);
//!         Ok(vec![out])
//!     },
//!     "word",
//! )?;
//!
//! let mut sources = cascade::Sources::new();
//! sources.insert(
//!     "lines".to_string(),
//!     Source::from_iter(vec![Record::from([("text", "a b a".into())])]),
//! );
//!
//! for record in run(&graph, sources)? {
//!     let _record = record?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! Building a graph only appends operator nodes to an in-memory
//! structure; nothing runs yet. [`run`] does the real work in two
//! phases:
//! 1. The [`planner`] walks every graph transitively reachable from the
//!    root, topologically orders them, and decides -- by refcounting how
//!    many places reference each one -- which must be eagerly
//!    materialized to be shared safely, and which can stay a single lazy
//!    stream.
//! 2. The [`runner`] executes that plan in order, handing each graph's
//!    operator sequence to the [`engine`] one node at a time; `engine`
//!    is where `Map`/`Sort`/`Reduce`/`Fold`/`Join` are actually
//!    implemented as iterator adapters.
//!
//! ## Module overview
//!
//! - [`record`] -- the dynamic [`Record`]/[`Value`] data model and key
//!   extraction ([`KeySpec`]/[`KeyValue`]).
//! - [`graph`] -- the [`Graph`] builder.
//! - [`node`] -- the operator node taxonomy ([`OperatorNode`],
//!   [`JoinStrategy`]) and user-callable type aliases.
//! - [`source`] -- the external [`Source`]/[`Sources`] types `run` takes.
//! - [`planner`] -- topological ordering and materialization planning.
//! - [`runner`] -- the `run` entry point and per-graph output sharing.
//! - [`engine`] -- the five operator iterator adapters.
//! - [`error`] -- [`CascadeError`] and the crate's [`Result`] alias.
//! - [`testing`] -- assertions, builders, and fixtures for testing
//!   graphs.

mod engine;
mod error;
mod graph;
mod graph_id;
mod node;
mod planner;
mod record;
mod runner;
mod source;

pub mod testing;

pub use error::{CascadeError, Result};
pub use graph::Graph;
pub use node::{Folder, JoinStrategy, Mapper, Reducer};
pub use record::{KeySpec, KeyValue, Record, Value, compare_keys};
pub use runner::{RecordIter, run};
pub use source::{Source, Sources};
