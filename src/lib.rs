pub mod arena;
pub mod build;
pub mod constants;
pub mod emit;
pub mod error;
pub mod num;
pub mod options;
pub mod text;
pub mod types;
pub mod view;

use std::io::Read;

pub use crate::arena::{ArenaDocument, ArenaKind, ArenaStats, Arenas};
pub use crate::build::Builder;
pub use crate::emit::{emit, emit_to_writer};
pub use crate::error::{Error, ErrorKind, Location};
pub use crate::options::{BuildOptions, EmitOptions, SizeMode};
pub use crate::types::{Document, Kind, Member, Span, ValueRef};
pub use crate::view::{Array, ArrayIter, Index, Keys, Object, ObjectIter, Value, Values};

pub type Result<T> = std::result::Result<T, Error>;

pub fn build_from_str(input: &str) -> Result<ArenaDocument> {
    build_from_str_with_options(input, &BuildOptions::default())
}

pub fn build_from_str_with_options(input: &str, options: &BuildOptions) -> Result<ArenaDocument> {
    build::from_str(input, options)
}

pub fn build_from_slice(input: &[u8]) -> Result<ArenaDocument> {
    build_from_slice_with_options(input, &BuildOptions::default())
}

pub fn build_from_slice_with_options(
    input: &[u8],
    options: &BuildOptions,
) -> Result<ArenaDocument> {
    build::from_slice(input, options)
}

pub fn build_from_reader<R: Read>(reader: R) -> Result<ArenaDocument> {
    build_from_reader_with_options(reader, &BuildOptions::default())
}

pub fn build_from_reader_with_options<R: Read>(
    reader: R,
    options: &BuildOptions,
) -> Result<ArenaDocument> {
    build::from_reader(reader, options)
}

pub fn build_from_value(value: &serde_json::Value) -> Result<ArenaDocument> {
    build_from_value_with_options(value, &BuildOptions::default())
}

pub fn build_from_value_with_options(
    value: &serde_json::Value,
    options: &BuildOptions,
) -> Result<ArenaDocument> {
    build::from_value(value, options)
}

/// Builds `input` and emits it as Rust source in one step.
///
/// # Examples
/// ```
/// use json_arena::EmitOptions;
///
/// let source = json_arena::compile_str(r#"{"answer":42}"#, &EmitOptions::new("config")).unwrap();
/// assert!(source.contains("pub mod config {"));
/// assert!(source.contains("pub static DOCUMENT: Document<'static>"));
/// ```
pub fn compile_str(input: &str, options: &EmitOptions) -> Result<String> {
    compile_str_with_options(input, &BuildOptions::default(), options)
}

pub fn compile_str_with_options(
    input: &str,
    build_options: &BuildOptions,
    emit_options: &EmitOptions,
) -> Result<String> {
    let built = build::from_str(input, build_options)?;
    emit::emit(&built.document(), emit_options)
}
