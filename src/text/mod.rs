pub mod string;

pub use string::{escape_str_into, write_str_literal};
