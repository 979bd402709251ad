//! The `Map` operator: one input record in, zero or more output records
//! out, with no memory of prior records.

use crate::error::Result;
use crate::node::Mapper;
use crate::record::Record;
use std::collections::VecDeque;

pub(crate) struct MapIter<I> {
    upstream: I,
    mapper: Mapper,
    pending: VecDeque<Record>,
    done: bool,
}

impl<I> MapIter<I> {
    pub(crate) fn new(upstream: I, mapper: Mapper) -> Self {
        Self {
            upstream,
            mapper,
            pending: VecDeque::new(),
            done: false,
        }
    }
}

impl<I: Iterator<Item = Result<Record>>> Iterator for MapIter<I> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Some(Ok(record));
            }
            if self.done {
                return None;
            }
            match self.upstream.next() {
                None => {
                    self.done = true;
                    return None;
                }
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                Some(Ok(record)) => match (self.mapper)(record) {
                    Ok(outputs) => self.pending.extend(outputs),
                    Err(err) => {
                        self.done = true;
                        return Some(Err(err));
                    }
                },
            }
        }
    }
}
