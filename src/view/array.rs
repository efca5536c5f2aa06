use std::iter::FusedIterator;
use std::slice;

use super::Value;
use crate::error::Error;
use crate::types::{Document, ValueRef};
use crate::Result;

/// Borrowed array record.
#[derive(Clone, Copy)]
pub struct Array<'a> {
    doc: &'a Document<'a>,
    items: &'a [ValueRef],
}

impl<'a> Array<'a> {
    pub(crate) fn new(doc: &'a Document<'a>, items: &'a [ValueRef]) -> Self {
        Self { doc, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value<'a>> {
        self.items
            .get(index)
            .map(|node| Value::new(self.doc, *node))
    }

    pub fn at(&self, index: usize) -> Result<Value<'a>> {
        self.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// Elements in document order. The iterator is cheap to clone, so a sequence can
    /// be restarted by iterating again.
    pub fn iter(&self) -> ArrayIter<'a> {
        ArrayIter {
            doc: self.doc,
            inner: self.items.iter(),
        }
    }
}

impl PartialEq for Array<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<'a> IntoIterator for Array<'a> {
    type Item = Value<'a>;
    type IntoIter = ArrayIter<'a>;

    fn into_iter(self) -> ArrayIter<'a> {
        self.iter()
    }
}

impl<'a> IntoIterator for &Array<'a> {
    type Item = Value<'a>;
    type IntoIter = ArrayIter<'a>;

    fn into_iter(self) -> ArrayIter<'a> {
        self.iter()
    }
}

#[derive(Clone)]
pub struct ArrayIter<'a> {
    doc: &'a Document<'a>,
    inner: slice::Iter<'a, ValueRef>,
}

impl<'a> Iterator for ArrayIter<'a> {
    type Item = Value<'a>;

    fn next(&mut self) -> Option<Value<'a>> {
        self.inner.next().map(|node| Value::new(self.doc, *node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for ArrayIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|node| Value::new(self.doc, *node))
    }
}

impl ExactSizeIterator for ArrayIter<'_> {}

impl FusedIterator for ArrayIter<'_> {}
