use crate::error::Error;
use crate::num::number::format_f64_literal;
use crate::text::write_str_literal;
use crate::Result;

const INDENT_UNIT: &str = "    ";

/// Line-oriented buffer for generated Rust source.
pub(crate) struct SourceWriter {
    buffer: String,
    depth: usize,
    indent_cache: Vec<String>,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            depth: 0,
            indent_cache: vec![String::new()],
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    pub fn write_newline(&mut self) {
        self.buffer.push('\n');
    }

    pub fn write_indent(&mut self) {
        if self.depth == 0 {
            return;
        }
        if self.depth >= self.indent_cache.len() {
            self.extend_indent_cache(self.depth);
        }
        self.buffer.push_str(&self.indent_cache[self.depth]);
    }

    /// Writes one indented line.
    pub fn line(&mut self, s: &str) {
        if !s.is_empty() {
            self.write_indent();
            self.write_str(s);
        }
        self.write_newline();
    }

    pub fn open(&mut self, s: &str) {
        self.line(s);
        self.depth += 1;
    }

    pub fn close(&mut self, s: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(s);
    }

    pub fn write_u32(&mut self, value: u32) {
        let mut buffer = itoa::Buffer::new();
        self.buffer.push_str(buffer.format(value));
    }

    pub fn write_i64(&mut self, value: i64) {
        // `-9223372036854775808` would be parsed as negating an overflowing literal.
        if value == i64::MIN {
            self.buffer.push_str("i64::MIN");
            return;
        }
        let mut buffer = itoa::Buffer::new();
        self.buffer.push_str(buffer.format(value));
    }

    pub fn write_f64(&mut self, value: f64, position: usize) -> Result<()> {
        match format_f64_literal(value) {
            Some(literal) => {
                self.buffer.push_str(&literal);
                Ok(())
            }
            None => Err(Error::malformed(
                format!("floats[{position}]"),
                "non-finite numbers have no literal form",
            )),
        }
    }

    pub fn write_str_literal(&mut self, value: &str) {
        write_str_literal(&mut self.buffer, value);
    }

    fn extend_indent_cache(&mut self, depth: usize) {
        while self.indent_cache.len() <= depth {
            let next = match self.indent_cache.last() {
                Some(last) => format!("{last}{INDENT_UNIT}"),
                None => String::new(),
            };
            self.indent_cache.push(next);
        }
    }
}
