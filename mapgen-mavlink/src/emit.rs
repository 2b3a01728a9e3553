//! TypeScript emission for a validated definition.

use std::collections::HashSet;

use crate::{
    model::{COMMAND_ENUM, Definition, Deprecation, Entry, Enum, Field, Message},
    naming::{entry_name, member_access, to_camel_case, to_pascal_case},
    writer::TsWriter,
};

/// Write the whole module: header, enums, commands, messages, registries.
pub fn emit_definition(w: &mut TsWriter<'_>, def: &Definition, module_name: &str) {
    emit_header(w, def, module_name);

    for e in def.enums.values() {
        emit_enum(w, e);
    }

    if let Some(commands) = def.enums.values().find(|e| e.is_commands()) {
        for entry in &commands.entries {
            emit_command(w, commands, entry);
        }
    }

    for message in def.messages.values() {
        emit_message(w, def, message);
    }

    emit_registries(w, def);
}

fn emit_header(w: &mut TsWriter<'_>, def: &Definition, module_name: &str) {
    w.line(&format!("// Generated from {}.xml, do not edit", module_name));
    if !def.includes.is_empty() {
        w.line(&format!("// includes: {}", def.includes.join(", ")));
    }
    if let Some(version) = def.version {
        w.line(&format!("// version: {}", version));
    }
    if let Some(dialect) = def.dialect {
        w.line(&format!("// dialect: {}", dialect));
    }
    w.blank();
}

fn deprecation_tag(deprecated: Option<&Deprecation>) -> Option<String> {
    deprecated.map(|d| {
        let mut tag = String::from("@deprecated");
        if let Some(since) = &d.since {
            tag.push_str(&format!(" since {}", since));
        }
        if let Some(replaced_by) = &d.replaced_by {
            tag.push_str(&format!(", replaced by {}", replaced_by));
        }
        if !d.note.is_empty() {
            tag.push_str(&format!("; {}", d.note));
        }
        tag
    })
}

fn emit_enum(w: &mut TsWriter<'_>, e: &Enum) {
    w.jsdoc(
        [Some(e.description.clone()), deprecation_tag(e.deprecated.as_ref())]
            .into_iter()
            .flatten(),
    );
    w.line(&format!("export enum {} {{", to_pascal_case(&e.name)))
        .indent();
    for entry in &e.entries {
        w.jsdoc(
            [
                Some(entry.description.clone()),
                entry.wip.then(|| "@wip".to_string()),
                deprecation_tag(entry.deprecated.as_ref()),
            ]
            .into_iter()
            .flatten(),
        );
        w.line(&format!(
            "{} = {},",
            entry_name(&e.name, &entry.name),
            entry.value
        ));
    }
    w.dedent().line("}").blank();
}

/// Getter name for a command parameter, from its label.
fn param_accessor(label: &str) -> String {
    let snake: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let name = to_camel_case(&snake);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("param{}", name)
    } else {
        name
    }
}

pub fn command_class_name(entry: &Entry) -> String {
    let name = to_pascal_case(&entry_name(COMMAND_ENUM, &entry.name).replace('\'', ""));
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{}{}Command", to_pascal_case(COMMAND_ENUM), name)
    } else {
        format!("{}Command", name)
    }
}

fn emit_command(w: &mut TsWriter<'_>, commands: &Enum, entry: &Entry) {
    let enum_type = to_pascal_case(&commands.name);
    w.jsdoc(
        [
            Some(entry.description.clone()),
            deprecation_tag(entry.deprecated.as_ref()),
        ]
        .into_iter()
        .flatten(),
    );
    w.line(&format!(
        "export class {} extends CommandLong {{",
        command_class_name(entry)
    ))
    .indent()
    .line("constructor(targetSystem = 1, targetComponent = 1) {")
    .indent()
    .line("super()")
    .line("this.targetSystem = targetSystem")
    .line("this.targetComponent = targetComponent")
    .line(&format!(
        "this.command = {} as number",
        member_access(&enum_type, &commands.name, &entry.name)
    ))
    .dedent()
    .line("}");

    let mut seen = HashSet::new();
    for param in &entry.params {
        let Some(label) = param.label.as_deref() else {
            continue;
        };
        let accessor = param_accessor(label);
        if accessor.is_empty() || !seen.insert(accessor.clone()) {
            continue;
        }
        w.blank().jsdoc(
            [
                Some(param.description.clone()),
                param.units.as_ref().map(|u| format!("@units {}", u)),
            ]
            .into_iter()
            .flatten(),
        );
        w.line(&format!("get {}() {{", accessor))
            .indent()
            .line(&format!("return this._param{}", param.index))
            .dedent()
            .line("}")
            .line(&format!("set {}(value: number) {{", accessor))
            .indent()
            .line(&format!("this._param{} = value", param.index))
            .dedent()
            .line("}");
    }

    w.dedent().line("}").blank();
}

/// TypeScript type and initial value of a message field.
fn field_type(def: &Definition, field: &Field) -> (String, String) {
    let local_enum = field
        .enum_name
        .as_deref()
        .filter(|name| def.enums.contains_key(*name))
        .map(to_pascal_case);

    match (field.ty.array_length, local_enum) {
        _ if field.ty.is_string() => ("string".to_string(), "''".to_string()),
        (Some(_), _) => (format!("{}[]", field.ty.base.ts_type()), "[]".to_string()),
        (None, Some(enum_type)) => (enum_type.clone(), format!("0 as {}", enum_type)),
        (None, None) if field.ty.base.ts_type() == "bigint" => {
            ("bigint".to_string(), "BigInt(0)".to_string())
        }
        (None, None) => ("number".to_string(), "0".to_string()),
    }
}

fn emit_message(w: &mut TsWriter<'_>, def: &Definition, message: &Message) {
    w.jsdoc(
        [
            Some(message.description.clone()),
            message.wip.then(|| "@wip".to_string()),
            deprecation_tag(message.deprecated.as_ref()),
        ]
        .into_iter()
        .flatten(),
    );
    w.line(&format!(
        "export class {} extends MavLinkData {{",
        to_pascal_case(&message.name)
    ))
    .indent()
    .line(&format!("static MSG_ID = {}", message.id))
    .line(&format!("static MSG_NAME = '{}'", message.name))
    .line(&format!("static PAYLOAD_LENGTH = {}", message.payload_length()));
    if let Some(magic) = message.magic_number() {
        w.line(&format!("static MAGIC_NUMBER = {}", magic));
    }

    w.blank().line("static FIELDS = [").indent();
    let mut offset = 0;
    for field in message.wire_fields() {
        w.line(&format!(
            "new MavLinkPacketField('{}', '{}', {}, {}, {}, '{}', '{}'),",
            field.name,
            to_camel_case(&field.name),
            offset,
            field.extension,
            field.ty.size(),
            field.ty.display_name(),
            field.units.as_deref().unwrap_or("")
        ));
        offset += field.ty.size();
    }
    w.dedent().line("]").blank();

    w.line("constructor() {").indent().line("super()");
    for field in &message.fields {
        let (_, initial) = field_type(def, field);
        w.line(&format!("this.{} = {}", to_camel_case(&field.name), initial));
    }
    w.dedent().line("}");

    for field in &message.fields {
        let (ty, _) = field_type(def, field);
        w.blank().jsdoc(
            [
                Some(field.description.clone()),
                field.units.as_ref().map(|u| format!("Units: {}", u)),
            ]
            .into_iter()
            .flatten(),
        );
        w.line(&format!("{}: {}", to_camel_case(&field.name), ty));
    }

    w.dedent().line("}").blank();
}

fn emit_registries(w: &mut TsWriter<'_>, def: &Definition) {
    w.line("export const REGISTRY: MavLinkPacketRegistry = {")
        .indent();
    for message in def.messages.values() {
        w.line(&format!(
            "'{}': {},",
            message.name,
            to_pascal_case(&message.name)
        ));
    }
    w.dedent().line("}");

    if let Some(commands) = def.enums.values().find(|e| e.is_commands()) {
        let enum_type = to_pascal_case(&commands.name);
        w.blank()
            .line("export const COMMANDS: MavLinkCommandRegistry = {")
            .indent();
        for entry in &commands.entries {
            w.line(&format!(
                "[{}]: {},",
                member_access(&enum_type, &commands.name, &entry.name),
                command_class_name(entry)
            ));
        }
        w.dedent().line("}");
    }
}
