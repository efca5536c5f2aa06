use std::collections::HashMap;
use std::fmt;

use smol_str::SmolStr;

use crate::constants::MAX_INDEX_LIMIT;
use crate::error::Error;
use crate::types::{Document, Member, Span, ValueRef};
use crate::Result;

/// Names one arena or pool, used when reporting sizes and overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArenaKind {
    Ints,
    Floats,
    Strings,
    Text,
    Arrays,
    Items,
    Objects,
    Members,
}

impl ArenaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ArenaKind::Ints => "ints",
            ArenaKind::Floats => "floats",
            ArenaKind::Strings => "strings",
            ArenaKind::Text => "text",
            ArenaKind::Arrays => "arrays",
            ArenaKind::Items => "items",
            ArenaKind::Objects => "objects",
            ArenaKind::Members => "members",
        }
    }
}

impl fmt::Display for ArenaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArenaStats {
    pub ints: usize,
    pub floats: usize,
    pub strings: usize,
    pub text_bytes: usize,
    pub arrays: usize,
    pub items: usize,
    pub objects: usize,
    pub members: usize,
}

impl ArenaStats {
    /// Sizes in emission order.
    pub fn entries(&self) -> [(ArenaKind, usize); 8] {
        [
            (ArenaKind::Ints, self.ints),
            (ArenaKind::Floats, self.floats),
            (ArenaKind::Text, self.text_bytes),
            (ArenaKind::Strings, self.strings),
            (ArenaKind::Arrays, self.arrays),
            (ArenaKind::Items, self.items),
            (ArenaKind::Objects, self.objects),
            (ArenaKind::Members, self.members),
        ]
    }

    /// Number of arena-backed values (null and booleans are inline and not counted).
    pub fn values(&self) -> usize {
        self.ints + self.floats + self.strings + self.arrays + self.objects
    }
}

/// Append-only storage filled by the builder.
#[derive(Debug, Default)]
pub struct Arenas {
    ints: Vec<i64>,
    floats: Vec<f64>,
    text: String,
    strings: Vec<Span>,
    arrays: Vec<Span>,
    items: Vec<ValueRef>,
    objects: Vec<Span>,
    members: Vec<Member>,
    interned: HashMap<SmolStr, u32>,
}

impl Arenas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self, root: ValueRef) -> Document<'_> {
        Document {
            ints: &self.ints,
            floats: &self.floats,
            text: &self.text,
            strings: &self.strings,
            arrays: &self.arrays,
            items: &self.items,
            objects: &self.objects,
            members: &self.members,
            root,
        }
    }

    pub(crate) fn push_int(&mut self, value: i64) -> Result<ValueRef> {
        let index = next_index(ArenaKind::Ints, self.ints.len())?;
        self.ints.push(value);
        Ok(ValueRef::int(index))
    }

    pub(crate) fn push_float(&mut self, value: f64) -> Result<ValueRef> {
        let index = next_index(ArenaKind::Floats, self.floats.len())?;
        self.floats.push(value);
        Ok(ValueRef::float(index))
    }

    /// Appends `value` to the string arena, or returns the index of an equal string
    /// already stored when `dedupe` is set.
    pub(crate) fn push_str(&mut self, value: &str, dedupe: bool) -> Result<u32> {
        if dedupe {
            if let Some(index) = self.interned.get(value) {
                return Ok(*index);
            }
        }
        let index = next_index(ArenaKind::Strings, self.strings.len())?;
        let span = window(ArenaKind::Text, self.text.len(), value.len())?;
        self.text.push_str(value);
        self.strings.push(span);
        if dedupe {
            self.interned.insert(SmolStr::new(value), index);
        }
        Ok(index)
    }

    pub(crate) fn str(&self, index: u32) -> Option<&str> {
        let span = self.strings.get(index as usize)?;
        self.text.get(span.range())
    }

    /// Claims the next array slot; the record is filled by [`Arenas::finish_array`].
    pub(crate) fn reserve_array(&mut self) -> Result<u32> {
        let index = next_index(ArenaKind::Arrays, self.arrays.len())?;
        self.arrays.push(Span::EMPTY);
        Ok(index)
    }

    pub(crate) fn finish_array(&mut self, index: u32, children: &[ValueRef]) -> Result<ValueRef> {
        let span = window(ArenaKind::Items, self.items.len(), children.len())?;
        self.items.extend_from_slice(children);
        self.arrays[index as usize] = span;
        Ok(ValueRef::array(index))
    }

    pub(crate) fn reserve_object(&mut self) -> Result<u32> {
        let index = next_index(ArenaKind::Objects, self.objects.len())?;
        self.objects.push(Span::EMPTY);
        Ok(index)
    }

    pub(crate) fn finish_object(&mut self, index: u32, members: &[Member]) -> Result<ValueRef> {
        let span = window(ArenaKind::Members, self.members.len(), members.len())?;
        self.members.extend_from_slice(members);
        self.objects[index as usize] = span;
        Ok(ValueRef::object(index))
    }

    /// Drops build-only state; the arenas are read-only from here on.
    pub(crate) fn freeze(mut self, root: ValueRef) -> ArenaDocument {
        self.interned = HashMap::new();
        ArenaDocument { arenas: self, root }
    }
}

fn next_index(kind: ArenaKind, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| overflow(kind, len.saturating_add(1)))
}

fn window(kind: ArenaKind, start: usize, len: usize) -> Result<Span> {
    let end = start.saturating_add(len);
    if end > MAX_INDEX_LIMIT {
        return Err(overflow(kind, end));
    }
    Ok(Span::new(start as u32, len as u32))
}

fn overflow(kind: ArenaKind, count: usize) -> Error {
    Error::EmissionOverflow {
        kind,
        count,
        limit: MAX_INDEX_LIMIT,
    }
}

/// Frozen result of one build pass.
#[derive(Debug)]
pub struct ArenaDocument {
    arenas: Arenas,
    root: ValueRef,
}

impl ArenaDocument {
    /// Borrowed view of the arenas; no data is copied.
    pub fn document(&self) -> Document<'_> {
        self.arenas.document(self.root)
    }

    pub fn root_ref(&self) -> ValueRef {
        self.root
    }

    pub fn stats(&self) -> ArenaStats {
        self.document().stats()
    }
}
