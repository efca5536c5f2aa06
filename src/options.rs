use crate::constants::{
    DEFAULT_ARENA_LIMIT, DEFAULT_CRATE_PATH, DEFAULT_DOCUMENT_NAME, DEFAULT_MAX_DEPTH,
    MAX_INDEX_LIMIT,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Store each distinct string once and share its index.
    pub dedupe_strings: bool,
    /// Arrays and objects nested deeper than this are rejected.
    pub max_depth: usize,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dedupe_strings(mut self, dedupe_strings: bool) -> Self {
        self.dedupe_strings = dedupe_strings;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            dedupe_strings: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Size class of the emitted artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeMode {
    /// Arenas are inlined as slice literals and capped at [`DEFAULT_ARENA_LIMIT`].
    #[default]
    Standard,
    /// Arenas are hoisted into sized statics and may use the full u32 index range.
    Large,
}

impl SizeMode {
    pub fn arena_limit(self) -> usize {
        match self {
            SizeMode::Standard => DEFAULT_ARENA_LIMIT,
            SizeMode::Large => MAX_INDEX_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Identifier of the generated module.
    pub name: String,
    /// Path through which the generated code reaches this crate.
    pub crate_path: String,
    pub mode: SizeMode,
    pub arena_limit: Option<usize>,
}

impl EmitOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_crate_path(mut self, crate_path: impl Into<String>) -> Self {
        self.crate_path = crate_path.into();
        self
    }

    pub fn with_mode(mut self, mode: SizeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_large(self, large: bool) -> Self {
        self.with_mode(if large {
            SizeMode::Large
        } else {
            SizeMode::Standard
        })
    }

    pub fn with_arena_limit(mut self, arena_limit: Option<usize>) -> Self {
        self.arena_limit = arena_limit;
        self
    }

    /// Cap actually enforced: the explicit override if any, never beyond the u32 index range.
    pub fn effective_arena_limit(&self) -> usize {
        self.arena_limit
            .unwrap_or_else(|| self.mode.arena_limit())
            .min(MAX_INDEX_LIMIT)
    }
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_DOCUMENT_NAME.to_string(),
            crate_path: DEFAULT_CRATE_PATH.to_string(),
            mode: SizeMode::default(),
            arena_limit: None,
        }
    }
}
