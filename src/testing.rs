//! Testing utilities for graphs built with this crate.
//!
//! - [`assertions`] -- compare record collections against expected
//!   results.
//! - [`builders`] -- build [`Record`](crate::Record) vectors fluently.
//! - [`fixtures`] -- pre-built sample datasets for common scenarios.
//!
//! ```
//! use cascade::testing::{assertions::assert_records_unordered_equal, builders::RecordBuilder};
//!
//! let actual = vec![RecordBuilder::new().set("word", "a").set("count", 2i64).build()];
//! let expected = vec![RecordBuilder::new().set("count", 2i64).set("word", "a").build()];
//! assert_records_unordered_equal(&actual, &expected);
//! ```

pub mod assertions;
pub mod builders;
pub mod fixtures;
