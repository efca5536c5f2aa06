//! Single-pass flattening of a parsed JSON tree into arenas.
//!
//! The builder is driven by serde events rather than by a materialized tree, so
//! objects keep every member in source order, duplicate keys included.
//!
//! With serde_json's `arbitrary_precision` feature every number that does not fit
//! `u64`/`i64` arrives as a one-entry map holding its literal text, so `-0`, `42.0`
//! and integers beyond 64 bits are classified from the token itself.

mod path;

use std::fmt;
use std::io::Read;

use serde::de::{self, DeserializeSeed, Deserializer, EnumAccess, MapAccess, SeqAccess, Visitor};
use smallvec::SmallVec;

use crate::arena::{ArenaDocument, Arenas};
use crate::error::Error;
use crate::num::{
    classify_f64, classify_i128, classify_token, classify_u128, classify_u64, Classified,
};
use crate::options::BuildOptions;
use crate::types::{Member, ValueRef};
use crate::Result;

pub use path::PathSegment;

/// Key under which serde_json hands over the raw text of a number.
const NUMBER_TOKEN_KEY: &str = "$serde_json::private::Number";

/// Owns the arenas for the duration of one pass.
#[derive(Debug)]
pub struct Builder {
    arenas: Arenas,
    options: BuildOptions,
    path: SmallVec<[PathSegment; 16]>,
    failure: Option<Error>,
}

impl Builder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            arenas: Arenas::new(),
            options,
            path: SmallVec::new(),
            failure: None,
        }
    }

    /// Flattens whatever `deserializer` yields. Errors raised by the deserializer
    /// itself are reported as [`Error::Parse`] without a location.
    pub fn build<'de, D>(mut self, deserializer: D) -> Result<ArenaDocument>
    where
        D: Deserializer<'de>,
    {
        match self.visit_root(deserializer) {
            Ok(root) => Ok(self.finish(root)),
            Err(err) => Err(self.take_failure().unwrap_or_else(|| Error::Parse {
                message: err.to_string(),
                location: None,
            })),
        }
    }

    fn visit_root<'de, D>(&mut self, deserializer: D) -> std::result::Result<ValueRef, D::Error>
    where
        D: Deserializer<'de>,
    {
        NodeSeed { builder: self }.deserialize(deserializer)
    }

    fn take_failure(&mut self) -> Option<Error> {
        self.failure.take()
    }

    fn finish(self, root: ValueRef) -> ArenaDocument {
        let document = self.arenas.freeze(root);
        let stats = document.stats();
        tracing::info!(
            values = stats.values(),
            arrays = stats.arrays,
            objects = stats.objects,
            strings = stats.strings,
            "JSON values processed"
        );
        document
    }

    /// Stores `err` as the outcome of the pass and hands serde a message-only copy.
    fn record<E: de::Error>(&mut self, err: Error) -> E {
        let message = err.to_string();
        self.failure = Some(err);
        E::custom(message)
    }

    fn malformed<E: de::Error>(&mut self, message: &str) -> E {
        let err = Error::malformed(path::pointer(&self.path), message);
        self.record(err)
    }

    /// The path holds one segment per open container.
    fn check_depth<E: de::Error>(&mut self) -> std::result::Result<(), E> {
        let max_depth = self.options.max_depth;
        if self.path.len() < max_depth {
            return Ok(());
        }
        Err(self.malformed(&format!("nesting exceeds {max_depth} levels")))
    }
}

fn finish_json<T>(builder: &mut Builder, outcome: serde_json::Result<T>) -> Result<T> {
    outcome.map_err(|err| builder.take_failure().unwrap_or_else(|| err.into()))
}

#[tracing::instrument(level = "debug", skip_all, fields(bytes = input.len()))]
pub fn from_str(input: &str, options: &BuildOptions) -> Result<ArenaDocument> {
    let mut deserializer = serde_json::Deserializer::from_str(input);
    deserializer.disable_recursion_limit();
    let mut builder = Builder::new(options.clone());
    let outcome = builder.visit_root(&mut deserializer);
    let root = finish_json(&mut builder, outcome)?;
    deserializer.end()?;
    Ok(builder.finish(root))
}

#[tracing::instrument(level = "debug", skip_all, fields(bytes = input.len()))]
pub fn from_slice(input: &[u8], options: &BuildOptions) -> Result<ArenaDocument> {
    let mut deserializer = serde_json::Deserializer::from_slice(input);
    deserializer.disable_recursion_limit();
    let mut builder = Builder::new(options.clone());
    let outcome = builder.visit_root(&mut deserializer);
    let root = finish_json(&mut builder, outcome)?;
    deserializer.end()?;
    Ok(builder.finish(root))
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn from_reader<R: Read>(reader: R, options: &BuildOptions) -> Result<ArenaDocument> {
    let mut deserializer = serde_json::Deserializer::from_reader(reader);
    deserializer.disable_recursion_limit();
    let mut builder = Builder::new(options.clone());
    let outcome = builder.visit_root(&mut deserializer);
    let root = finish_json(&mut builder, outcome)?;
    deserializer.end()?;
    Ok(builder.finish(root))
}

/// Flattens an already parsed tree. `serde_json::Map` has unique keys, so duplicate
/// keys only survive when building from text.
#[tracing::instrument(level = "debug", skip_all)]
pub fn from_value(value: &serde_json::Value, options: &BuildOptions) -> Result<ArenaDocument> {
    let mut builder = Builder::new(options.clone());
    let outcome = builder.visit_root(value);
    let root = finish_json(&mut builder, outcome)?;
    Ok(builder.finish(root))
}

struct NodeSeed<'b> {
    builder: &'b mut Builder,
}

impl NodeSeed<'_> {
    fn number<E: de::Error>(self, number: Classified) -> std::result::Result<ValueRef, E> {
        let pushed = match number {
            Classified::Int(value) => self.builder.arenas.push_int(value),
            Classified::Float(value) => self.builder.arenas.push_float(value),
        };
        pushed.map_err(|err| self.builder.record(err))
    }
}

impl<'de> DeserializeSeed<'de> for NodeSeed<'_> {
    type Value = ValueRef;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<ValueRef, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for NodeSeed<'_> {
    type Value = ValueRef;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<ValueRef, E> {
        Ok(ValueRef::NULL)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<ValueRef, E> {
        Ok(ValueRef::NULL)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<ValueRef, D::Error>
    where
        D: Deserializer<'de>,
    {
        DeserializeSeed::deserialize(self, deserializer)
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> std::result::Result<ValueRef, D::Error>
    where
        D: Deserializer<'de>,
    {
        DeserializeSeed::deserialize(self, deserializer)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<ValueRef, E> {
        Ok(ValueRef::bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<ValueRef, E> {
        self.number(Classified::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<ValueRef, E> {
        self.number(classify_u64(value))
    }

    fn visit_i128<E: de::Error>(self, value: i128) -> std::result::Result<ValueRef, E> {
        self.number(classify_i128(value))
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> std::result::Result<ValueRef, E> {
        self.number(classify_u128(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<ValueRef, E> {
        match classify_f64(value) {
            Some(number) => self.number(number),
            None => Err(self.builder.malformed("number is not finite")),
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<ValueRef, E> {
        let dedupe = self.builder.options.dedupe_strings;
        match self.builder.arenas.push_str(value, dedupe) {
            Ok(index) => Ok(ValueRef::string(index)),
            Err(err) => Err(self.builder.record(err)),
        }
    }

    fn visit_bytes<E: de::Error>(self, _value: &[u8]) -> std::result::Result<ValueRef, E> {
        Err(self.builder.malformed("byte strings have no JSON representation"))
    }

    fn visit_enum<A>(self, _data: A) -> std::result::Result<ValueRef, A::Error>
    where
        A: EnumAccess<'de>,
    {
        Err(self.builder.malformed("enum variants have no JSON representation"))
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<ValueRef, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let builder = self.builder;
        builder.check_depth::<A::Error>()?;
        let index = match builder.arenas.reserve_array() {
            Ok(index) => index,
            Err(err) => return Err(builder.record(err)),
        };

        let mut children: SmallVec<[ValueRef; 8]> = SmallVec::new();
        loop {
            builder.path.push(PathSegment::Index(children.len()));
            let next = seq.next_element_seed(NodeSeed {
                builder: &mut *builder,
            })?;
            builder.path.pop();
            match next {
                Some(child) => children.push(child),
                None => break,
            }
        }

        match builder.arenas.finish_array(index, &children) {
            Ok(node) => Ok(node),
            Err(err) => Err(builder.record(err)),
        }
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<ValueRef, A::Error>
    where
        A: MapAccess<'de>,
    {
        let builder = self.builder;
        let mut next_key = match map.next_key_seed(FirstKeySeed {
            builder: &mut *builder,
        })? {
            Some(FirstKey::NumberToken) => {
                let number = map.next_value_seed(NumberTokenSeed)?;
                return NodeSeed { builder }.number(number);
            }
            Some(FirstKey::Key(key)) => Some(key),
            None => None,
        };

        builder.check_depth::<A::Error>()?;
        let index = match builder.arenas.reserve_object() {
            Ok(index) => index,
            Err(err) => return Err(builder.record(err)),
        };

        let mut members: SmallVec<[Member; 8]> = SmallVec::new();
        while let Some(key) = next_key {
            let segment = PathSegment::key(builder.arenas.str(key).unwrap_or_default());
            builder.path.push(segment);
            let value = map.next_value_seed(NodeSeed {
                builder: &mut *builder,
            })?;
            builder.path.pop();
            members.push(Member::new(key, value));
            next_key = map.next_key_seed(KeySeed {
                builder: &mut *builder,
            })?;
        }

        match builder.arenas.finish_object(index, &members) {
            Ok(node) => Ok(node),
            Err(err) => Err(builder.record(err)),
        }
    }
}

/// Interns an object key into the string arena.
struct KeySeed<'b> {
    builder: &'b mut Builder,
}

impl<'de> DeserializeSeed<'de> for KeySeed<'_> {
    type Value = u32;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(self)
    }
}

impl<'de> Visitor<'de> for KeySeed<'_> {
    type Value = u32;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string key")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<u32, E> {
        let dedupe = self.builder.options.dedupe_strings;
        self.builder
            .arenas
            .push_str(value, dedupe)
            .map_err(|err| self.builder.record(err))
    }
}

enum FirstKey {
    Key(u32),
    NumberToken,
}

/// Reads the first key of a map, telling number tokens apart from real objects.
struct FirstKeySeed<'b> {
    builder: &'b mut Builder,
}

impl<'de> DeserializeSeed<'de> for FirstKeySeed<'_> {
    type Value = FirstKey;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<FirstKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(self)
    }
}

impl<'de> Visitor<'de> for FirstKeySeed<'_> {
    type Value = FirstKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string key")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<FirstKey, E> {
        if value == NUMBER_TOKEN_KEY {
            return Ok(FirstKey::NumberToken);
        }
        KeySeed {
            builder: self.builder,
        }
        .visit_str(value)
        .map(FirstKey::Key)
    }
}

/// Classifies the literal text of a number.
struct NumberTokenSeed;

impl<'de> DeserializeSeed<'de> for NumberTokenSeed {
    type Value = Classified;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Classified, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(self)
    }
}

impl<'de> Visitor<'de> for NumberTokenSeed {
    type Value = Classified;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON number")
    }

    // Left unrecorded so serde_json attaches the token's location.
    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Classified, E> {
        classify_token(value).ok_or_else(|| E::custom(format!("number out of range: {value}")))
    }
}
