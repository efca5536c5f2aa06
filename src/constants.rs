/// Per-arena entry cap applied in [`SizeMode::Standard`](crate::SizeMode).
pub const DEFAULT_ARENA_LIMIT: usize = 1 << 24;

/// Widest index a [`ValueRef`](crate::ValueRef) or [`Span`](crate::Span) can hold.
pub const MAX_INDEX_LIMIT: usize = u32::MAX as usize;

/// Deepest array/object nesting accepted by the builder.
pub const DEFAULT_MAX_DEPTH: usize = 512;

pub const DEFAULT_DOCUMENT_NAME: &str = "document";

pub const DEFAULT_CRATE_PATH: &str = "::json_arena";

pub const GENERATED_HEADER: &str = "// @generated by json2rs. Do not edit.";

pub const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "try", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield",
];

#[inline]
pub fn is_keyword(s: &str) -> bool {
    RUST_KEYWORDS.contains(&s)
}

/// Returns `None` when `name` can be used as a module identifier, otherwise the reason it cannot.
pub fn identifier_problem(name: &str) -> Option<&'static str> {
    let bytes = name.as_bytes();
    let first = match bytes.first() {
        Some(first) => *first,
        None => return Some("name is empty"),
    };
    if !first.is_ascii_alphabetic() && first != b'_' {
        return Some("name must start with an ASCII letter or underscore");
    }
    if !bytes[1..].iter().all(|b| b.is_ascii_alphanumeric() || *b == b'_') {
        return Some("name may only contain ASCII letters, digits and underscores");
    }
    if name == "_" {
        return Some("name cannot be a lone underscore");
    }
    if is_keyword(name) {
        return Some("name is a reserved Rust keyword");
    }
    None
}
