use super::Value;
use crate::error::Error;
use crate::types::Kind;
use crate::Result;

/// Types that can address a child of a [`Value`]: `usize` positions into arrays and
/// string keys into objects.
pub trait Index: private::Sealed {
    #[doc(hidden)]
    fn index_into<'a>(&self, value: Value<'a>) -> Result<Value<'a>>;
}

impl Index for usize {
    fn index_into<'a>(&self, value: Value<'a>) -> Result<Value<'a>> {
        match value.kind() {
            Kind::Array => value.as_array()?.at(*self),
            found => Err(Error::type_mismatch(Kind::Array, found)),
        }
    }
}

impl Index for str {
    fn index_into<'a>(&self, value: Value<'a>) -> Result<Value<'a>> {
        match value.kind() {
            Kind::Object => value.as_object()?.at(self),
            found => Err(Error::type_mismatch(Kind::Object, found)),
        }
    }
}

impl Index for String {
    fn index_into<'a>(&self, value: Value<'a>) -> Result<Value<'a>> {
        self.as_str().index_into(value)
    }
}

impl<T> Index for &T
where
    T: ?Sized + Index,
{
    fn index_into<'a>(&self, value: Value<'a>) -> Result<Value<'a>> {
        (**self).index_into(value)
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T> Sealed for &T where T: ?Sized + Sealed {}
}
