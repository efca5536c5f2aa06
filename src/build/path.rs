use smol_str::SmolStr;

/// One step from the root to the node currently being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Index(usize),
    Key(SmolStr),
}

impl PathSegment {
    pub fn key(key: &str) -> Self {
        PathSegment::Key(SmolStr::new(key))
    }
}

/// Renders `segments` as an RFC 6901 JSON pointer; the root renders as `<root>`.
pub(crate) fn pointer(segments: &[PathSegment]) -> String {
    if segments.is_empty() {
        return "<root>".to_string();
    }
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        match segment {
            PathSegment::Index(index) => {
                let mut buffer = itoa::Buffer::new();
                out.push_str(buffer.format(*index));
            }
            PathSegment::Key(key) => {
                for ch in key.chars() {
                    match ch {
                        '~' => out.push_str("~0"),
                        '/' => out.push_str("~1"),
                        _ => out.push(ch),
                    }
                }
            }
        }
    }
    out
}
