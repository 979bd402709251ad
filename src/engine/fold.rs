//! The `Fold` operator: consumes the entire upstream in one call and
//! yields exactly one output record.

use crate::error::Result;
use crate::node::Folder;
use crate::record::Record;

pub(crate) struct FoldIter<I> {
    upstream: Option<I>,
    folder: Folder,
    emitted: bool,
}

impl<I> FoldIter<I> {
    pub(crate) fn new(upstream: I, folder: Folder) -> Self {
        Self {
            upstream: Some(upstream),
            folder,
            emitted: false,
        }
    }
}

impl<I: Iterator<Item = Result<Record>>> Iterator for FoldIter<I> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted {
            return None;
        }
        self.emitted = true;
        let mut upstream = self.upstream.take().expect("fold consumes exactly once");
        Some((self.folder)(&mut upstream))
    }
}
