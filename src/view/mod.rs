//! Read-only navigation over a [`Document`].
//!
//! Every operation is an index lookup into the arenas: nothing is parsed, copied
//! or allocated on the success path, and no operation can mutate the document.

mod array;
mod index;
mod json;
mod object;

use std::fmt;

use crate::error::Error;
use crate::types::{Document, Kind, ValueRef};
use crate::Result;

pub use array::{Array, ArrayIter};
pub use index::Index;
pub use object::{Keys, Object, ObjectIter, Values};

/// One node of a document.
#[derive(Clone, Copy)]
pub struct Value<'a> {
    doc: &'a Document<'a>,
    node: ValueRef,
}

impl<'a> Value<'a> {
    pub(crate) fn new(doc: &'a Document<'a>, node: ValueRef) -> Self {
        Self { doc, node }
    }

    pub fn kind(&self) -> Kind {
        self.node.kind()
    }

    pub fn node(&self) -> ValueRef {
        self.node
    }

    pub fn document(&self) -> &'a Document<'a> {
        self.doc
    }

    pub fn is_null(&self) -> bool {
        self.kind() == Kind::Null
    }

    pub fn is_bool(&self) -> bool {
        self.kind() == Kind::Bool
    }

    pub fn is_i64(&self) -> bool {
        self.kind() == Kind::Int
    }

    pub fn is_f64(&self) -> bool {
        self.kind() == Kind::Float
    }

    pub fn is_number(&self) -> bool {
        self.kind().is_number()
    }

    pub fn is_string(&self) -> bool {
        self.kind() == Kind::String
    }

    pub fn is_array(&self) -> bool {
        self.kind() == Kind::Array
    }

    pub fn is_object(&self) -> bool {
        self.kind() == Kind::Object
    }

    pub fn is_structured(&self) -> bool {
        self.kind().is_structured()
    }

    pub fn is_primitive(&self) -> bool {
        !self.is_structured()
    }

    fn require(&self, expected: Kind) -> Result<()> {
        if self.kind() == expected {
            Ok(())
        } else {
            Err(Error::type_mismatch(expected, self.kind()))
        }
    }

    fn dangling(&self) -> Error {
        Error::malformed(
            format!("{}[{}]", self.kind(), self.node.index()),
            "reference points outside its arena",
        )
    }

    pub fn as_bool(&self) -> Result<bool> {
        self.require(Kind::Bool)?;
        Ok(self.node.index() != 0)
    }

    /// Integer content. Floats are rejected, even integral ones; use
    /// [`Value::as_i64_lossy`] to narrow explicitly.
    pub fn as_i64(&self) -> Result<i64> {
        self.require(Kind::Int)?;
        self.doc
            .int(self.node.index())
            .ok_or_else(|| self.dangling())
    }

    /// Integer content, truncating floats toward zero and saturating at the `i64` bounds.
    pub fn as_i64_lossy(&self) -> Result<i64> {
        match self.kind() {
            Kind::Int => self.as_i64(),
            Kind::Float => self.as_f64().map(|value| value as i64),
            found => Err(Error::type_mismatch(Kind::Int, found)),
        }
    }

    /// Float content; integers are widened.
    pub fn as_f64(&self) -> Result<f64> {
        match self.kind() {
            Kind::Float => self
                .doc
                .float(self.node.index())
                .ok_or_else(|| self.dangling()),
            Kind::Int => self.as_i64().map(|value| value as f64),
            found => Err(Error::type_mismatch(Kind::Float, found)),
        }
    }

    pub fn as_str(&self) -> Result<&'a str> {
        self.require(Kind::String)?;
        self.doc
            .str(self.node.index())
            .ok_or_else(|| self.dangling())
    }

    pub fn as_array(&self) -> Result<Array<'a>> {
        self.require(Kind::Array)?;
        let items = self
            .doc
            .array(self.node.index())
            .ok_or_else(|| self.dangling())?;
        Ok(Array::new(self.doc, items))
    }

    pub fn as_object(&self) -> Result<Object<'a>> {
        self.require(Kind::Object)?;
        let members = self
            .doc
            .object(self.node.index())
            .ok_or_else(|| self.dangling())?;
        Ok(Object::new(self.doc, members))
    }

    /// Element count for arrays and objects, 0 for null and 1 for any other scalar.
    pub fn size(&self) -> usize {
        match self.kind() {
            Kind::Null => 0,
            Kind::Array => self.as_array().map_or(0, |array| array.len()),
            Kind::Object => self.as_object().map_or(0, |object| object.len()),
            _ => 1,
        }
    }

    /// Looks up an array position (`usize`) or object key (`&str`).
    ///
    /// # Examples
    /// ```
    /// let built = json_arena::build_from_str(r#"{"list":[10,20]}"#).unwrap();
    /// let doc = built.document();
    /// let second = doc.root().at("list").unwrap().at(1).unwrap();
    /// assert_eq!(second.as_i64().unwrap(), 20);
    /// ```
    pub fn at<I: Index>(&self, index: I) -> Result<Value<'a>> {
        index.index_into(*self)
    }

    pub fn get<I: Index>(&self, index: I) -> Option<Value<'a>> {
        self.at(index).ok()
    }

    /// `false` for anything that is not an object.
    pub fn contains(&self, key: &str) -> bool {
        self.as_object()
            .map(|object| object.contains_key(key))
            .unwrap_or(false)
    }

    /// Resolves an RFC 6901 JSON pointer such as `/glossary/title` or `/items/0`.
    pub fn pointer(&self, pointer: &str) -> Option<Value<'a>> {
        if pointer.is_empty() {
            return Some(*self);
        }
        let rest = pointer.strip_prefix('/')?;
        let mut current = *self;
        for token in rest.split('/') {
            current = match current.kind() {
                Kind::Object => {
                    let object = current.as_object().ok()?;
                    if token.contains('~') {
                        let key = token.replace("~1", "/").replace("~0", "~");
                        object.get(&key)?
                    } else {
                        object.get(token)?
                    }
                }
                Kind::Array => {
                    let position = parse_array_token(token)?;
                    current.as_array().ok()?.get(position)?
                }
                _ => return None,
            };
        }
        Some(current)
    }
}

fn parse_array_token(token: &str) -> Option<usize> {
    if token.is_empty() || (token.len() > 1 && token.starts_with('0')) {
        return None;
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Kinds must match. Objects compare as sets of keys, each key bound to its first
/// value, so member order and repeated keys do not affect equality.
impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        if self.kind() != other.kind() {
            return false;
        }
        match self.kind() {
            Kind::Null => true,
            Kind::Bool => self.as_bool().ok() == other.as_bool().ok(),
            Kind::Int => self.as_i64().ok() == other.as_i64().ok(),
            Kind::Float => match (self.as_f64(), other.as_f64()) {
                (Ok(left), Ok(right)) => left == right,
                _ => false,
            },
            Kind::String => self.as_str().ok() == other.as_str().ok(),
            Kind::Array => match (self.as_array(), other.as_array()) {
                (Ok(left), Ok(right)) => left == right,
                _ => false,
            },
            Kind::Object => match (self.as_object(), other.as_object()) {
                (Ok(left), Ok(right)) => left == right,
                _ => false,
            },
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({self})", self.kind())
    }
}
