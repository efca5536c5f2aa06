use std::ops::Range;

use super::Kind;

/// Reference to one node: its kind plus an index into that kind's arena.
///
/// Null and booleans carry no arena entry; a boolean's index is the value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRef {
    kind: Kind,
    index: u32,
}

impl ValueRef {
    pub const NULL: ValueRef = ValueRef::new(Kind::Null, 0);
    pub const FALSE: ValueRef = ValueRef::new(Kind::Bool, 0);
    pub const TRUE: ValueRef = ValueRef::new(Kind::Bool, 1);

    pub const fn new(kind: Kind, index: u32) -> Self {
        Self { kind, index }
    }

    pub const fn bool(value: bool) -> Self {
        if value {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }

    pub const fn int(index: u32) -> Self {
        Self::new(Kind::Int, index)
    }

    pub const fn float(index: u32) -> Self {
        Self::new(Kind::Float, index)
    }

    pub const fn string(index: u32) -> Self {
        Self::new(Kind::String, index)
    }

    pub const fn array(index: u32) -> Self {
        Self::new(Kind::Array, index)
    }

    pub const fn object(index: u32) -> Self {
        Self::new(Kind::Object, index)
    }

    pub const fn kind(self) -> Kind {
        self.kind
    }

    pub const fn index(self) -> u32 {
        self.index
    }

    pub(crate) fn slot(self) -> usize {
        self.index as usize
    }
}

/// Window `start..start + len` into one of the pools (`text`, `items` or `members`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub len: u32,
}

impl Span {
    pub const EMPTY: Span = Span::new(0, 0);

    pub const fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    pub fn range(self) -> Range<usize> {
        let start = self.start as usize;
        start..start + self.len as usize
    }

    /// `true` when the window ends inside a pool of `pool_len` entries.
    pub fn fits(self, pool_len: usize) -> bool {
        (self.start as u64 + self.len as u64) <= pool_len as u64
    }
}

/// One object entry: the key's string index and the bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Member {
    pub key: u32,
    pub value: ValueRef,
}

impl Member {
    pub const fn new(key: u32, value: ValueRef) -> Self {
        Self { key, value }
    }
}
