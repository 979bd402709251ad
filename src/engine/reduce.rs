//! The `Reduce` operator: groups contiguous runs of equal-key records and
//! invokes the reducer once per group with a cursor over the remainder.
//!
//! Input must already be sorted (or at least grouped) on the reduce key;
//! `spec.md` §4.3 makes this the caller's responsibility and requires it
//! be checked at runtime rather than silently producing wrong groups.

use crate::error::{CascadeError, Result};
use crate::node::Reducer;
use crate::record::{KeySpec, KeyValue, Record};
use std::collections::VecDeque;
use std::iter::Peekable;

pub(crate) struct ReduceIter<I: Iterator<Item = Result<Record>>> {
    upstream: Peekable<I>,
    reducer: Reducer,
    key: KeySpec,
    pending: VecDeque<Record>,
    last_key: Option<KeyValue>,
    done: bool,
}

impl<I: Iterator<Item = Result<Record>>> ReduceIter<I> {
    pub(crate) fn new(upstream: I, reducer: Reducer, key: KeySpec) -> Self {
        Self {
            upstream: upstream.peekable(),
            reducer,
            key,
            pending: VecDeque::new(),
            last_key: None,
            done: false,
        }
    }
}

/// The cursor a reducer call is given over its group's remaining
/// records. It stops at the group boundary rather than reaching into
/// the next group, regardless of how much of it the reducer actually
/// consumes.
struct GroupCursor<'a, I: Iterator<Item = Result<Record>>> {
    upstream: &'a mut Peekable<I>,
    key: &'a KeySpec,
    group_key: &'a KeyValue,
}

impl<I: Iterator<Item = Result<Record>>> Iterator for GroupCursor<'_, I> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.upstream.peek() {
            Some(Ok(record)) if self.key.value_of(record) == *self.group_key => {
                self.upstream.next()
            }
            _ => None,
        }
    }
}

impl<I: Iterator<Item = Result<Record>>> Iterator for ReduceIter<I> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Some(Ok(record));
            }
            if self.done {
                return None;
            }

            let group_key = match self.upstream.peek() {
                None => {
                    self.done = true;
                    return None;
                }
                Some(Err(_)) => {
                    self.done = true;
                    return Some(Err(self.upstream.next().unwrap().unwrap_err()));
                }
                Some(Ok(record)) => self.key.value_of(record),
            };

            if let Some(last) = &self.last_key {
                if group_key < *last {
                    self.done = true;
                    return Some(Err(CascadeError::order(
                        "reduce input is not sorted ascending on its key",
                    )));
                }
            }
            self.last_key = Some(group_key.clone());
            let key_record = self.key.key_record(&group_key);

            let outcome = {
                let mut cursor = GroupCursor {
                    upstream: &mut self.upstream,
                    key: &self.key,
                    group_key: &group_key,
                };
                (self.reducer)(key_record, &mut cursor)
            };

            // Drain whatever the reducer left unconsumed so the next
            // iteration starts at the true group boundary.
            while matches!(self.upstream.peek(), Some(Ok(record)) if self.key.value_of(record) == group_key)
            {
                self.upstream.next();
            }

            match outcome {
                Ok(outputs) => self.pending.extend(outputs),
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
