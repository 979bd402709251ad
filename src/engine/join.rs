//! The `Join` operator: a sorted-merge join between two inputs, both
//! required to be non-strictly ascending on the join key
//! (`spec.md` §4.3).
//!
//! Column collisions are resolved the way `spec.md` §4.3 describes: a
//! right-hand field that is part of the join key is dropped (the left
//! copy already carries it); a right-hand field absent from the left is
//! copied as-is; a right-hand field that collides with a non-key left
//! field is stored under a `.`-prefixed name.

use crate::error::{CascadeError, Result};
use crate::node::JoinStrategy;
use crate::record::{KeySpec, KeyValue, Record};
use crate::runner::RecordIter;
use std::collections::VecDeque;
use std::iter::Peekable;

pub(crate) struct JoinIter {
    left: Peekable<RecordIter>,
    right: Peekable<RecordIter>,
    key: KeySpec,
    strategy: JoinStrategy,
    pending: VecDeque<Record>,
    last_left_key: Option<KeyValue>,
    last_right_key: Option<KeyValue>,
    done: bool,
}

impl JoinIter {
    pub(crate) fn new(
        left: RecordIter,
        right: RecordIter,
        key: KeySpec,
        strategy: JoinStrategy,
    ) -> Self {
        Self {
            left: left.peekable(),
            right: right.peekable(),
            key,
            strategy,
            pending: VecDeque::new(),
            last_left_key: None,
            last_right_key: None,
            done: false,
        }
    }

    /// Pull the next contiguous same-key group off `side`, checking that
    /// it does not regress `last`. Returns `None` once `side` is
    /// exhausted.
    fn take_group(
        &mut self,
        side: Side,
    ) -> Option<std::result::Result<(KeyValue, Vec<Record>), CascadeError>> {
        let key = self.key.clone();
        let (it, last) = match side {
            Side::Left => (&mut self.left, &mut self.last_left_key),
            Side::Right => (&mut self.right, &mut self.last_right_key),
        };
        match it.peek() {
            None => None,
            Some(Err(_)) => Some(Err(it.next().unwrap().unwrap_err())),
            Some(Ok(record)) => {
                let group_key = key.value_of(record);
                if let Some(prev) = last {
                    if group_key < *prev {
                        return Some(Err(CascadeError::order(
                            "join input is not sorted ascending on its key",
                        )));
                    }
                }
                *last = Some(group_key.clone());
                let mut group = Vec::new();
                while matches!(it.peek(), Some(Ok(r)) if key.value_of(r) == group_key) {
                    group.push(it.next().unwrap().unwrap());
                }
                Some(Ok((group_key, group)))
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl Iterator for JoinIter {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Some(Ok(record));
            }
            if self.done {
                return None;
            }

            let left_peek = self.left.peek().is_some();
            let right_peek = self.right.peek().is_some();

            if !left_peek && !right_peek {
                self.done = true;
                return None;
            }

            if !right_peek {
                // Left exhausted the right side; drain the rest of left.
                match self.take_group(Side::Left) {
                    None => {
                        self.done = true;
                        return None;
                    }
                    Some(Err(err)) => {
                        self.done = true;
                        return Some(Err(err));
                    }
                    Some(Ok((_, group))) => {
                        if self.strategy.add_left_only() {
                            self.pending.extend(group);
                        }
                        continue;
                    }
                }
            }

            if !left_peek {
                match self.take_group(Side::Right) {
                    None => {
                        self.done = true;
                        return None;
                    }
                    Some(Err(err)) => {
                        self.done = true;
                        return Some(Err(err));
                    }
                    Some(Ok((_, group))) => {
                        if self.strategy.add_right_only() {
                            self.pending.extend(group);
                        }
                        continue;
                    }
                }
            }

            if matches!(self.left.peek(), Some(Err(_))) {
                self.done = true;
                return Some(Err(self.left.next().unwrap().unwrap_err()));
            }
            if matches!(self.right.peek(), Some(Err(_))) {
                self.done = true;
                return Some(Err(self.right.next().unwrap().unwrap_err()));
            }

            let left_key = self.key.value_of(self.left.peek().unwrap().as_ref().unwrap());
            let right_key = self.key.value_of(self.right.peek().unwrap().as_ref().unwrap());

            if left_key < right_key {
                match self.take_group(Side::Left) {
                    Some(Err(err)) => {
                        self.done = true;
                        return Some(Err(err));
                    }
                    Some(Ok((_, group))) => {
                        if self.strategy.add_left_only() {
                            self.pending.extend(group);
                        }
                        continue;
                    }
                    None => unreachable!("left was known non-empty"),
                }
            }

            if right_key < left_key {
                match self.take_group(Side::Right) {
                    Some(Err(err)) => {
                        self.done = true;
                        return Some(Err(err));
                    }
                    Some(Ok((_, group))) => {
                        if self.strategy.add_right_only() {
                            self.pending.extend(group);
                        }
                        continue;
                    }
                    None => unreachable!("right was known non-empty"),
                }
            }

            let left_group = match self.take_group(Side::Left) {
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                Some(Ok((_, group))) => group,
                None => unreachable!("left was known non-empty"),
            };
            let right_group = match self.take_group(Side::Right) {
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                Some(Ok((_, group))) => group,
                None => unreachable!("right was known non-empty"),
            };

            for l in &left_group {
                for r in &right_group {
                    self.pending.push_back(merge(&self.key, l, r));
                }
            }
        }
    }
}

/// Merge one matched left/right pair into a single output record.
fn merge(key: &KeySpec, left: &Record, right: &Record) -> Record {
    let mut out = left.clone();
    for (field, value) in right.iter() {
        if key.fields().iter().any(|f| f == field) {
            continue;
        }
        if out.contains(field) {
            out.set(format!(".{field}"), value.clone());
        } else {
            out.set(field, value.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_drops_key_fields_from_the_right_side() {
        let key = KeySpec::from("k");
        let left = Record::from([("k", 1.into()), ("a", 10.into())]);
        let right = Record::from([("k", 1.into()), ("b", 20.into())]);
        let merged = merge(&key, &left, &right);
        assert_eq!(merged.get("k"), Some(&crate::record::Value::Int(1)));
        assert_eq!(merged.get("a"), Some(&crate::record::Value::Int(10)));
        assert_eq!(merged.get("b"), Some(&crate::record::Value::Int(20)));
    }

    #[test]
    fn merge_prefixes_colliding_non_key_right_fields() {
        let key = KeySpec::from("k");
        let left = Record::from([("k", 1.into()), ("v", 10.into())]);
        let right = Record::from([("k", 1.into()), ("v", 20.into())]);
        let merged = merge(&key, &left, &right);
        assert_eq!(merged.get("v"), Some(&crate::record::Value::Int(10)));
        assert_eq!(merged.get(".v"), Some(&crate::record::Value::Int(20)));
    }
}
