mod document;
mod kind;
mod refs;

pub use document::Document;
pub use kind::Kind;
pub use refs::{Member, Span, ValueRef};
