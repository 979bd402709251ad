//! The `Sort` operator: a stable sort on a key, materialized eagerly on
//! the first pull (there is no way to emit the first output record
//! without having seen the whole input).

use crate::error::Result;
use crate::record::{KeySpec, Record};
use std::vec::IntoIter;

pub(crate) struct SortIter<I> {
    upstream: Option<I>,
    key: KeySpec,
    sorted: Option<IntoIter<Record>>,
}

impl<I> SortIter<I> {
    pub(crate) fn new(upstream: I, key: KeySpec) -> Self {
        Self {
            upstream: Some(upstream),
            key,
            sorted: None,
        }
    }
}

impl<I: Iterator<Item = Result<Record>>> Iterator for SortIter<I> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.sorted.is_none() {
            let upstream = self.upstream.take().expect("sort materializes exactly once");
            let mut records = Vec::new();
            for item in upstream {
                match item {
                    Ok(record) => records.push(record),
                    Err(err) => {
                        self.sorted = Some(Vec::new().into_iter());
                        return Some(Err(err));
                    }
                }
            }
            records.sort_by(|a, b| self.key.value_of(a).cmp(&self.key.value_of(b)));
            self.sorted = Some(records.into_iter());
        }
        self.sorted.as_mut().unwrap().next().map(Ok)
    }
}
