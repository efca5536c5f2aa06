use std::iter::FusedIterator;
use std::slice;

use super::Value;
use crate::error::Error;
use crate::types::{Document, Member};
use crate::Result;

/// Borrowed object record. Members keep source order and may repeat a key;
/// lookups resolve to the first occurrence.
#[derive(Clone, Copy)]
pub struct Object<'a> {
    doc: &'a Document<'a>,
    members: &'a [Member],
}

impl<'a> Object<'a> {
    pub(crate) fn new(doc: &'a Document<'a>, members: &'a [Member]) -> Self {
        Self { doc, members }
    }

    /// Number of members, repeated keys included.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn key_of(&self, member: &Member) -> &'a str {
        self.doc.str(member.key).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<Value<'a>> {
        self.members
            .iter()
            .find(|member| self.key_of(member) == key)
            .map(|member| Value::new(self.doc, member.value))
    }

    pub fn at(&self, key: &str) -> Result<Value<'a>> {
        self.get(key).ok_or_else(|| Error::KeyNotFound {
            key: key.to_string(),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.members.iter().any(|member| self.key_of(member) == key)
    }

    /// `(key, value)` pairs in insertion order, duplicates included.
    pub fn iter(&self) -> ObjectIter<'a> {
        ObjectIter {
            doc: self.doc,
            inner: self.members.iter(),
        }
    }

    pub fn keys(&self) -> Keys<'a> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'a> {
        Values { inner: self.iter() }
    }

    /// Members whose key has not appeared earlier in the record.
    fn first_bindings(&self) -> impl Iterator<Item = (&'a str, Value<'a>)> + '_ {
        self.iter().enumerate().filter_map(move |(position, (key, value))| {
            let repeated = self.members[..position]
                .iter()
                .any(|earlier| self.key_of(earlier) == key);
            (!repeated).then_some((key, value))
        })
    }
}

/// Key sets must match and each key's first value must be equal; order is ignored.
///
/// Keys are matched by linear scans, so comparing two objects of `n` members costs
/// `O(n²)` key comparisons and allocates nothing.
impl PartialEq for Object<'_> {
    fn eq(&self, other: &Self) -> bool {
        let mut left_keys = 0;
        for (key, value) in self.first_bindings() {
            left_keys += 1;
            match other.get(key) {
                Some(found) if found == value => {}
                _ => return false,
            }
        }
        other.first_bindings().count() == left_keys
    }
}

impl<'a> IntoIterator for Object<'a> {
    type Item = (&'a str, Value<'a>);
    type IntoIter = ObjectIter<'a>;

    fn into_iter(self) -> ObjectIter<'a> {
        self.iter()
    }
}

impl<'a> IntoIterator for &Object<'a> {
    type Item = (&'a str, Value<'a>);
    type IntoIter = ObjectIter<'a>;

    fn into_iter(self) -> ObjectIter<'a> {
        self.iter()
    }
}

#[derive(Clone)]
pub struct ObjectIter<'a> {
    doc: &'a Document<'a>,
    inner: slice::Iter<'a, Member>,
}

impl<'a> ObjectIter<'a> {
    fn pair(&self, member: &Member) -> (&'a str, Value<'a>) {
        (
            self.doc.str(member.key).unwrap_or_default(),
            Value::new(self.doc, member.value),
        )
    }
}

impl<'a> Iterator for ObjectIter<'a> {
    type Item = (&'a str, Value<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let member = self.inner.next()?;
        Some(self.pair(member))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for ObjectIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let member = self.inner.next_back()?;
        Some(self.pair(member))
    }
}

impl ExactSizeIterator for ObjectIter<'_> {}

impl FusedIterator for ObjectIter<'_> {}

#[derive(Clone)]
pub struct Keys<'a> {
    inner: ObjectIter<'a>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Keys<'_> {}

#[derive(Clone)]
pub struct Values<'a> {
    inner: ObjectIter<'a>,
}

impl<'a> Iterator for Values<'a> {
    type Item = Value<'a>;

    fn next(&mut self) -> Option<Value<'a>> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Values<'_> {}

#[cfg(test)]
mod tests {
    use crate::build_from_str;
    use crate::error::{Error, ErrorKind};

    #[rstest::rstest]
    fn test_keys_follow_insertion_order() {
        let built = build_from_str(r#"{"b":1,"a":2}"#).unwrap();
        let doc = built.document();
        let object = doc.root().as_object().unwrap();

        let keys: Vec<&str> = object.keys().collect();
        assert_eq!(keys, ["b", "a"]);
        let values: Vec<i64> = object.values().map(|v| v.as_i64().unwrap()).collect();
        assert_eq!(values, [1, 2]);
    }

    #[rstest::rstest]
    fn test_first_occurrence_wins() {
        let built = build_from_str(r#"{"k":1,"k":2}"#).unwrap();
        let doc = built.document();
        let object = doc.root().as_object().unwrap();

        assert_eq!(object.at("k").unwrap().as_i64().unwrap(), 1);
        assert_eq!(object.len(), 2);
        let pairs: Vec<(&str, i64)> = object
            .iter()
            .map(|(key, value)| (key, value.as_i64().unwrap()))
            .collect();
        assert_eq!(pairs, [("k", 1), ("k", 2)]);
    }

    #[rstest::rstest]
    fn test_missing_key() {
        let built = build_from_str(r#"{"present":true}"#).unwrap();
        let doc = built.document();
        let object = doc.root().as_object().unwrap();

        assert!(object.contains_key("present"));
        assert!(!object.contains_key("absent"));
        let err = object.at("absent").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyNotFound);
        assert!(matches!(err, Error::KeyNotFound { ref key } if key == "absent"));
    }

    #[rstest::rstest]
    #[case(r#"{"a":1,"b":2}"#, r#"{"b":2,"a":1}"#, true)]
    #[case(r#"{"a":1}"#, r#"{"a":1,"b":2}"#, false)]
    #[case(r#"{"a":1,"b":2}"#, r#"{"a":1}"#, false)]
    #[case(r#"{"a":1}"#, r#"{"a":2}"#, false)]
    #[case(r#"{"k":1,"k":2}"#, r#"{"k":1}"#, true)]
    #[case(r#"{"k":1,"k":2}"#, r#"{"k":2}"#, false)]
    #[case(r#"{"a":1,"a":2}"#, r#"{"a":1,"b":2}"#, false)]
    fn test_object_equality(#[case] left: &str, #[case] right: &str, #[case] equal: bool) {
        let left = build_from_str(left).unwrap();
        let right = build_from_str(right).unwrap();
        let (left_doc, right_doc) = (left.document(), right.document());
        assert_eq!(left_doc.root() == right_doc.root(), equal);
        assert_eq!(right_doc.root() == left_doc.root(), equal);
    }
}
