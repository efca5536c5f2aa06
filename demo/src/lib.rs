//! Documents compiled by `build.rs` and embedded as `static` data.
//!
//! Each module exposes `DOCUMENT` and `root()`:
//!
//! ```
//! let title = json_arena_demo::glossary::root()
//!     .pointer("/glossary/title")
//!     .and_then(|value| value.as_str().ok());
//! assert_eq!(title, Some("example glossary"));
//! ```

include!(concat!(env!("OUT_DIR"), "/glossary.rs"));
include!(concat!(env!("OUT_DIR"), "/glossary_large.rs"));
include!(concat!(env!("OUT_DIR"), "/mixed.rs"));

/// The `GlossSeeAlso` list of the glossary document.
pub fn see_also() -> Vec<&'static str> {
    glossary::root()
        .pointer("/glossary/GlossDiv/GlossList/GlossEntry/GlossDef/GlossSeeAlso")
        .and_then(|value| value.as_array().ok())
        .map(|items| items.iter().filter_map(|item| item.as_str().ok()).collect())
        .unwrap_or_default()
}
