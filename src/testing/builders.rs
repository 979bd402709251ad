//! Fluent builders for constructing test records.

use crate::record::{Record, Value};

/// Builds a single [`Record`] one field at a time.
#[derive(Default)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            record: Record::new(),
        }
    }

    #[must_use]
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.record.set(field, value);
        self
    }

    #[must_use]
    pub fn build(self) -> Record {
        self.record
    }
}

/// Builds a `Vec<Record>` by accumulating rows, each described as a
/// list of `(field, value)` pairs.
#[derive(Default)]
pub struct RecordsBuilder {
    records: Vec<Record>,
}

impl RecordsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append one record built from `fields`.
    #[must_use]
    pub fn add_row<const N: usize>(mut self, fields: [(&str, Value); N]) -> Self {
        self.records.push(Record::from(fields));
        self
    }

    /// Append an already-built record.
    #[must_use]
    pub fn add(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    #[must_use]
    pub fn build(self) -> Vec<Record> {
        self.records
    }
}
