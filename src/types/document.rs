use super::{Kind, Member, Span, ValueRef};
use crate::arena::ArenaStats;
use crate::error::Error;
use crate::view::Value;
use crate::Result;

/// Frozen arenas of one JSON document.
///
/// Every field is a borrowed slice so a document can be written out as a
/// `static` struct literal and used without any load-time work. Layout:
///
/// * `ints` / `floats`: scalar numbers, addressed by `ValueRef::int(i)` / `ValueRef::float(i)`.
/// * `text`: the bytes of every string, concatenated.
/// * `strings`: one byte window into `text` per string, addressed by `ValueRef::string(i)`
///   and by `Member::key`.
/// * `arrays`: one window into `items` per array, in document order.
/// * `objects`: one window into `members` per object, in insertion order.
/// * `root`: the top-level node.
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    pub ints: &'a [i64],
    pub floats: &'a [f64],
    pub text: &'a str,
    pub strings: &'a [Span],
    pub arrays: &'a [Span],
    pub items: &'a [ValueRef],
    pub objects: &'a [Span],
    pub members: &'a [Member],
    pub root: ValueRef,
}

impl<'a> Document<'a> {
    pub fn root(&'a self) -> Value<'a> {
        Value::new(self, self.root)
    }

    pub fn value(&'a self, node: ValueRef) -> Value<'a> {
        Value::new(self, node)
    }

    pub fn int(&self, index: u32) -> Option<i64> {
        self.ints.get(index as usize).copied()
    }

    pub fn float(&self, index: u32) -> Option<f64> {
        self.floats.get(index as usize).copied()
    }

    pub fn str(&self, index: u32) -> Option<&'a str> {
        let span = self.strings.get(index as usize)?;
        self.text.get(span.range())
    }

    pub fn array(&self, index: u32) -> Option<&'a [ValueRef]> {
        let span = self.arrays.get(index as usize)?;
        self.items.get(span.range())
    }

    pub fn object(&self, index: u32) -> Option<&'a [Member]> {
        let span = self.objects.get(index as usize)?;
        self.members.get(span.range())
    }

    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            ints: self.ints.len(),
            floats: self.floats.len(),
            strings: self.strings.len(),
            text_bytes: self.text.len(),
            arrays: self.arrays.len(),
            items: self.items.len(),
            objects: self.objects.len(),
            members: self.members.len(),
        }
    }

    /// Checks that every window and reference stays inside its arena.
    ///
    /// Documents produced by the builder always pass; this is meant for hand-written
    /// or externally produced arenas.
    pub fn validate(&self) -> Result<()> {
        self.check_ref("root", self.root)?;

        for (idx, span) in self.strings.iter().enumerate() {
            let in_bounds = span.fits(self.text.len()) && self.text.get(span.range()).is_some();
            if !in_bounds {
                return Err(Error::malformed(
                    format!("strings[{idx}]"),
                    "window is outside the text blob or splits a UTF-8 sequence",
                ));
            }
        }
        for (idx, span) in self.arrays.iter().enumerate() {
            if !span.fits(self.items.len()) {
                return Err(Error::malformed(
                    format!("arrays[{idx}]"),
                    "window is outside the item pool",
                ));
            }
        }
        for (idx, span) in self.objects.iter().enumerate() {
            if !span.fits(self.members.len()) {
                return Err(Error::malformed(
                    format!("objects[{idx}]"),
                    "window is outside the member pool",
                ));
            }
        }
        for (idx, item) in self.items.iter().enumerate() {
            self.check_ref(&format!("items[{idx}]"), *item)?;
        }
        for (idx, member) in self.members.iter().enumerate() {
            if member.key as usize >= self.strings.len() {
                return Err(Error::malformed(
                    format!("members[{idx}]"),
                    "key does not reference a string",
                ));
            }
            self.check_ref(&format!("members[{idx}]"), member.value)?;
        }
        Ok(())
    }

    fn check_ref(&self, path: &str, node: ValueRef) -> Result<()> {
        let limit = match node.kind() {
            Kind::Null => 1,
            Kind::Bool => 2,
            Kind::Int => self.ints.len(),
            Kind::Float => self.floats.len(),
            Kind::String => self.strings.len(),
            Kind::Array => self.arrays.len(),
            Kind::Object => self.objects.len(),
        };
        if node.slot() < limit {
            Ok(())
        } else {
            Err(Error::malformed(
                path,
                format!(
                    "{} index {} is outside an arena of {limit}",
                    node.kind(),
                    node.index()
                ),
            ))
        }
    }
}
