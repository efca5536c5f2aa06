//! Serializes frozen arenas as Rust source.
//!
//! The artifact is a module holding one `static DOCUMENT: Document<'static>` whose
//! fields are the arenas written out in order, so loading it runs no code. Within
//! the module, `root()` returns the top-level [`Value`](crate::Value).

pub(crate) mod writer;

use std::io::Write;

use crate::constants::{identifier_problem, GENERATED_HEADER};
use crate::error::Error;
use crate::options::{EmitOptions, SizeMode};
use crate::types::{Document, Kind, Member, Span, ValueRef};
use crate::Result;

use writer::SourceWriter;

#[tracing::instrument(level = "debug", skip_all, fields(name = %options.name, mode = ?options.mode))]
pub fn emit(document: &Document<'_>, options: &EmitOptions) -> Result<String> {
    check_options(options)?;
    check_limits(document, options.effective_arena_limit())?;
    document.validate()?;

    let mut emitter = Emitter {
        writer: SourceWriter::new(),
        document,
        options,
    };
    emitter.write_module()?;
    let source = emitter.writer.finish();
    tracing::debug!(bytes = source.len(), "artifact emitted");
    Ok(source)
}

/// Emits into `writer` only once the whole artifact has been produced.
pub fn emit_to_writer<W: Write>(
    mut writer: W,
    document: &Document<'_>,
    options: &EmitOptions,
) -> Result<()> {
    let source = emit(document, options)?;
    writer.write_all(source.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn check_options(options: &EmitOptions) -> Result<()> {
    if let Some(reason) = identifier_problem(&options.name) {
        return Err(Error::InvalidName {
            name: options.name.clone(),
            reason,
        });
    }
    let path_ok = !options.crate_path.is_empty()
        && options
            .crate_path
            .trim_start_matches("::")
            .split("::")
            .all(|segment| segment == "crate" || identifier_problem(segment).is_none());
    if !path_ok {
        return Err(Error::InvalidName {
            name: options.crate_path.clone(),
            reason: "crate path must be a `::`-separated list of identifiers",
        });
    }
    Ok(())
}

fn check_limits(document: &Document<'_>, limit: usize) -> Result<()> {
    for (kind, count) in document.stats().entries() {
        if count > limit {
            return Err(Error::EmissionOverflow { kind, count, limit });
        }
    }
    Ok(())
}

struct Emitter<'e, 'a> {
    writer: SourceWriter,
    document: &'e Document<'a>,
    options: &'e EmitOptions,
}

impl Emitter<'_, '_> {
    fn write_module(&mut self) -> Result<()> {
        let name = self.options.name.as_str();
        let crate_path = self.options.crate_path.as_str();
        let large = self.options.mode == SizeMode::Large;

        self.writer.line(GENERATED_HEADER);
        self.writer.line("");
        self.writer
            .line("#[allow(unused_imports, non_snake_case, clippy::all)]");
        self.writer.open(&format!("pub mod {name} {{"));
        self.writer.line(&format!(
            "use {crate_path}::{{Document, Member, Span, Value, ValueRef}};"
        ));
        self.writer.line("");

        if large {
            self.write_hoisted_arenas()?;
        }

        self.writer
            .open("pub static DOCUMENT: Document<'static> = Document {");
        if large {
            for (field, item) in [
                ("ints", "&INTS"),
                ("floats", "&FLOATS"),
                ("text", "TEXT"),
                ("strings", "&STRINGS"),
                ("arrays", "&ARRAYS"),
                ("items", "&ITEMS"),
                ("objects", "&OBJECTS"),
                ("members", "&MEMBERS"),
            ] {
                self.writer.line(&format!("{field}: {item},"));
            }
        } else {
            self.write_inline_arenas()?;
        }
        self.writer.write_indent();
        self.writer.write_str("root: ");
        self.write_ref(self.document.root);
        self.writer.write_str(",");
        self.writer.write_newline();
        self.writer.close("};");
        self.writer.line("");

        self.writer
            .line(&format!("/// Root of the embedded `{name}` document."));
        self.writer.open("pub fn root() -> Value<'static> {");
        self.writer.line("DOCUMENT.root()");
        self.writer.close("}");
        self.writer.close("}");
        Ok(())
    }

    fn write_inline_arenas(&mut self) -> Result<()> {
        let doc = self.document;

        self.open_list("ints: &[", doc.ints.len());
        for value in doc.ints {
            self.writer.write_indent();
            self.writer.write_i64(*value);
            self.writer.write_str(",");
            self.writer.write_newline();
        }
        self.close_list("],", doc.ints.len());

        self.write_floats("floats: &[", "],")?;

        self.writer.write_indent();
        self.writer.write_str("text: ");
        self.writer.write_str_literal(doc.text);
        self.writer.write_str(",");
        self.writer.write_newline();

        self.write_spans("strings: &[", doc.strings, "],");
        self.write_spans("arrays: &[", doc.arrays, "],");
        self.write_refs("items: &[", doc.items, "],");
        self.write_spans("objects: &[", doc.objects, "],");
        self.write_members("members: &[", doc.members, "],");
        Ok(())
    }

    /// Large documents keep each arena in its own sized static.
    fn write_hoisted_arenas(&mut self) -> Result<()> {
        let doc = self.document;

        self.open_list(&format!("static INTS: [i64; {}] = [", doc.ints.len()), doc.ints.len());
        for value in doc.ints {
            self.writer.write_indent();
            self.writer.write_i64(*value);
            self.writer.write_str(",");
            self.writer.write_newline();
        }
        self.close_list("];", doc.ints.len());

        self.write_floats(&format!("static FLOATS: [f64; {}] = [", doc.floats.len()), "];")?;

        self.writer.write_indent();
        self.writer.write_str("const TEXT: &str = ");
        self.writer.write_str_literal(doc.text);
        self.writer.write_str(";");
        self.writer.write_newline();

        self.write_spans(
            &format!("static STRINGS: [Span; {}] = [", doc.strings.len()),
            doc.strings,
            "];",
        );
        self.write_spans(
            &format!("static ARRAYS: [Span; {}] = [", doc.arrays.len()),
            doc.arrays,
            "];",
        );
        self.write_refs(
            &format!("static ITEMS: [ValueRef; {}] = [", doc.items.len()),
            doc.items,
            "];",
        );
        self.write_spans(
            &format!("static OBJECTS: [Span; {}] = [", doc.objects.len()),
            doc.objects,
            "];",
        );
        self.write_members(
            &format!("static MEMBERS: [Member; {}] = [", doc.members.len()),
            doc.members,
            "];",
        );
        self.writer.line("");
        Ok(())
    }

    /// Empty lists stay on the opening line (`&[]`).
    fn open_list(&mut self, head: &str, len: usize) {
        if len == 0 {
            self.writer.write_indent();
            self.writer.write_str(head);
        } else {
            self.writer.open(head);
        }
    }

    fn close_list(&mut self, tail: &str, len: usize) {
        if len == 0 {
            self.writer.write_str(tail);
            self.writer.write_newline();
        } else {
            self.writer.close(tail);
        }
    }

    fn write_floats(&mut self, head: &str, tail: &str) -> Result<()> {
        let floats = self.document.floats;
        self.open_list(head, floats.len());
        for (position, value) in floats.iter().enumerate() {
            self.writer.write_indent();
            self.writer.write_f64(*value, position)?;
            self.writer.write_str(",");
            self.writer.write_newline();
        }
        self.close_list(tail, floats.len());
        Ok(())
    }

    fn write_spans(&mut self, head: &str, spans: &[Span], tail: &str) {
        self.open_list(head, spans.len());
        for span in spans {
            self.writer.write_indent();
            self.writer.write_str("Span::new(");
            self.writer.write_u32(span.start);
            self.writer.write_str(", ");
            self.writer.write_u32(span.len);
            self.writer.write_str("),");
            self.writer.write_newline();
        }
        self.close_list(tail, spans.len());
    }

    fn write_refs(&mut self, head: &str, refs: &[ValueRef], tail: &str) {
        self.open_list(head, refs.len());
        for node in refs {
            self.writer.write_indent();
            self.write_ref(*node);
            self.writer.write_str(",");
            self.writer.write_newline();
        }
        self.close_list(tail, refs.len());
    }

    fn write_members(&mut self, head: &str, members: &[Member], tail: &str) {
        self.open_list(head, members.len());
        for member in members {
            self.writer.write_indent();
            self.writer.write_str("Member::new(");
            self.writer.write_u32(member.key);
            self.writer.write_str(", ");
            self.write_ref(member.value);
            self.writer.write_str("),");
            self.writer.write_newline();
        }
        self.close_list(tail, members.len());
    }

    fn write_ref(&mut self, node: ValueRef) {
        let constructor = match node.kind() {
            Kind::Null => {
                self.writer.write_str("ValueRef::NULL");
                return;
            }
            Kind::Bool => {
                self.writer.write_str(if node.index() == 0 {
                    "ValueRef::FALSE"
                } else {
                    "ValueRef::TRUE"
                });
                return;
            }
            Kind::Int => "ValueRef::int(",
            Kind::Float => "ValueRef::float(",
            Kind::String => "ValueRef::string(",
            Kind::Array => "ValueRef::array(",
            Kind::Object => "ValueRef::object(",
        };
        self.writer.write_str(constructor);
        self.writer.write_u32(node.index());
        self.writer.write_str(")");
    }
}
