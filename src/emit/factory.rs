//! The factory renderer.
//!
//! Renders one `create<Kind>` function per kind and one `update<Kind>`
//! function per kind with children, inside the configured namespaces.
//! Parameter lists and update conditions wrap at the configured column.

use crate::{
    analysis::{FieldClass, FieldDescriptor, SyntaxNodeKind},
    config::Config,
};

use super::writer::TextWriter;

/// Renders the factory file for the kinds, in the given order.
pub fn emit_factory(kinds: &[SyntaxNodeKind], config: &Config) -> String {
    let mut emitter = FactoryEmitter::new(config);
    emitter.emit_file(kinds);
    emitter.writer.into_text()
}

struct FactoryEmitter<'c> {
    writer: TextWriter,
    config: &'c Config,
}

impl<'c> FactoryEmitter<'c> {
    fn new(config: &'c Config) -> Self {
        Self {
            writer: TextWriter::new(config.output.new_line, config.output.indent_size),
            config,
        }
    }

    fn line(&mut self, text: &str) {
        self.writer.write(text);
        self.writer.write_line();
    }

    fn emit_file(&mut self, kinds: &[SyntaxNodeKind]) {
        let config = self.config;
        let output = &config.output;
        self.line("// <auto-generated />");
        for path in &output.references {
            self.line(&format!("/// <reference path=\"{path}\" />"));
        }
        for (i, namespace) in output.namespaces.iter().enumerate() {
            let export = if i == 0 { "" } else { "export " };
            self.line(&format!("{export}namespace {namespace} {{"));
            self.writer.increase_indent();
        }

        self.emit_helpers();
        for kind in kinds {
            if kind.name == output.root_kind {
                continue;
            }
            self.emit_create(kind);
            self.emit_update(kind);
        }

        for _ in &output.namespaces {
            self.writer.decrease_indent();
            self.line("}");
        }
    }

    fn emit_helpers(&mut self) {
        let config = self.config;
        let node = &config.well_known.node;
        let modifiers_array = &config.well_known.modifiers_array;
        let helpers = format!(
            "\
function setModifiers(node: {node}, modifiers: {modifiers_array}) {{
    if (modifiers) {{
        node.flags |= modifiers.flags;
        node.modifiers = modifiers;
    }}
}}
function updateFrom<T extends {node}>(oldNode: T, newNode: T): T {{
    let flags = oldNode.flags;
    if (oldNode.modifiers) {{
        flags &= oldNode.modifiers.flags;
    }}

    if (newNode.modifiers) {{
        flags |= newNode.modifiers.flags;
    }}

    newNode.flags = flags;
    newNode.pos = oldNode.pos;
    newNode.end = oldNode.end;
    newNode.parent = oldNode.parent;
    return newNode;
}}"
        );
        // Empty lines keep the indentation of the line before them.
        let mut depth = 0;
        for line in helpers.lines() {
            let text = line.trim_start();
            if !text.is_empty() {
                depth = (line.len() - text.len()) / 4;
            }
            for _ in 0..depth {
                self.writer.increase_indent();
            }
            if text.is_empty() {
                self.writer.write_indent();
                self.writer.write_line();
            } else {
                self.line(text);
            }
            for _ in 0..depth {
                self.writer.decrease_indent();
            }
        }
    }

    /// Writes `text`, breaking the line first if it would reach the wrap
    /// column. The first break indents the continuation lines once.
    fn write_wrapped(&mut self, text: &str, wrapped: &mut bool) {
        if self.writer.column() + text.chars().count() >= self.config.output.column_wrap {
            self.writer.write_line();
            if !*wrapped {
                *wrapped = true;
                self.writer.increase_indent();
            }
        }
        self.writer.write(text);
    }

    /// Ends a header line, undoing the continuation indent.
    fn end_wrapped(&mut self, wrapped: bool) {
        self.writer.write_line();
        if wrapped {
            self.writer.decrease_indent();
        }
    }

    fn emit_create(&mut self, kind: &SyntaxNodeKind) {
        let decl = &kind.declaring_type;
        let config = self.config;
        let kind_enum = &config.well_known.kind_enum;

        self.writer.write(&format!("export function create{}(", kind.name));
        let mut wrapped = false;
        for (i, member) in kind.members.iter().enumerate() {
            if i > 0 {
                self.writer.write(", ");
            }
            let param = format!("{}?: {}", member.param_name(), member.type_text);
            self.write_wrapped(&param, &mut wrapped);
        }
        self.write_wrapped(&format!("): {decl} {{"), &mut wrapped);
        self.end_wrapped(wrapped);

        self.writer.increase_indent();
        if kind.members.is_empty() {
            self.line(&format!("return createNode<{decl}>({kind_enum}.{});", kind.name));
        } else {
            self.line(&format!("let node = createNode<{decl}>({kind_enum}.{});", kind.name));
            let guarded = kind.members.len() > 1;
            if guarded {
                self.line("if (arguments.length) {");
                self.writer.increase_indent();
            }
            for member in &kind.members {
                let statement = match member.class {
                    FieldClass::ModifiersArray => {
                        format!("setModifiers(node, {});", member.param_name())
                    }
                    _ => format!("node.{} = {};", member.name, member.param_name()),
                };
                self.line(&statement);
            }
            if guarded {
                self.writer.decrease_indent();
                self.line("}");
            }
            self.line("return node;");
        }
        self.writer.decrease_indent();
        self.line("}");
    }

    fn emit_update(&mut self, kind: &SyntaxNodeKind) {
        let compared: Vec<&FieldDescriptor> = kind
            .members
            .iter()
            .filter(|member| !member.is_factory_only)
            .collect();
        if !kind.has_children || compared.is_empty() {
            return;
        }
        let decl = &kind.declaring_type;

        self.writer
            .write(&format!("export function update{}(node: {decl}", kind.name));
        let mut wrapped = false;
        for member in &compared {
            self.writer.write(", ");
            let param = format!("{}: {}", member.param_name(), member.type_text);
            self.write_wrapped(&param, &mut wrapped);
        }
        self.write_wrapped(&format!("): {decl} {{"), &mut wrapped);
        self.end_wrapped(wrapped);
        self.writer.increase_indent();

        self.writer.write("if (");
        let mut wrapped = false;
        for (i, member) in compared.iter().enumerate() {
            if i > 0 {
                self.writer.write(" || ");
            }
            let condition = format!("{} !== node.{}", member.param_name(), member.name);
            self.write_wrapped(&condition, &mut wrapped);
        }
        self.writer.write(") {");
        self.end_wrapped(wrapped);

        self.writer.increase_indent();
        let arguments: Vec<String> = kind
            .members
            .iter()
            .map(|member| {
                if member.is_factory_only {
                    format!("node.{}", member.name)
                } else {
                    member.param_name().to_owned()
                }
            })
            .collect();
        self.line(&format!(
            "let newNode = create{}({});",
            kind.name,
            arguments.join(", ")
        ));
        self.line("return updateFrom(node, newNode);");
        self.writer.decrease_indent();
        self.line("}");
        self.line("return node;");
        self.writer.decrease_indent();
        self.line("}");
    }
}
