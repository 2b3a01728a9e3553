//! MAVLink XML engine for `mapgen-core`.
//!
//! Reads one MAVLink dialect definition and emits a TypeScript module with its
//! enums, command classes, message classes and registries. Each message's
//! CRC_EXTRA byte is reported as its magic number.

mod crc;
mod emit;
mod error;
pub mod model;
pub mod naming;
pub mod writer;
mod xml;

use mapgen_core::{
    CommandDescriptor, Descriptors, Engine, EnumDescriptor, LineSink, MessageDescriptor,
};
use tracing::debug;

pub use crc::X25;
pub use error::Error;
pub use model::Definition;

use crate::writer::TsWriter;

/// Engine turning MAVLink XML into TypeScript.
#[derive(Debug, Default, Clone, Copy)]
pub struct MavlinkEngine;

impl MavlinkEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for MavlinkEngine {
    type Error = Error;

    fn generate(
        &self,
        source: &str,
        sink: &mut dyn LineSink,
        module_name: &str,
    ) -> Result<Descriptors, Error> {
        let def = Definition::parse(source)?;
        debug!(
            module = module_name,
            enums = def.enums.len(),
            messages = def.messages.len(),
            "parsed definition"
        );

        emit::emit_definition(&mut TsWriter::new(sink), &def, module_name);

        Ok(describe(&def))
    }
}

fn describe(def: &Definition) -> Descriptors {
    let enums = def
        .enums
        .values()
        .map(|e| EnumDescriptor {
            name: e.name.clone(),
            entries: e.entries.iter().map(|entry| entry.name.clone()).collect(),
        })
        .collect();

    let commands = def
        .enums
        .values()
        .filter(|e| e.is_commands())
        .flat_map(|e| &e.entries)
        .map(|entry| CommandDescriptor {
            name: entry.name.clone(),
            id: entry.value,
        })
        .collect();

    let messages = def
        .messages
        .values()
        .map(|m| MessageDescriptor::new(m.id, m.name.clone(), m.magic_number()))
        .collect();

    Descriptors {
        enums,
        commands,
        messages,
    }
}

#[cfg(test)]
mod tests {
    use mapgen_core::LineBuffer;

    use super::*;

    const MINIMAL: &str = r#"<?xml version="1.0"?>
<mavlink>
  <version>3</version>
  <enums>
    <enum name="MAV_CMD">
      <entry value="400" name="MAV_CMD_COMPONENT_ARM_DISARM">
        <description>Arms / Disarms a component</description>
        <param index="1" label="Arm">0: disarm, 1: arm</param>
      </entry>
    </enum>
  </enums>
  <messages>
    <message id="0" name="HEARTBEAT">
      <field type="uint8_t" name="type">Type.</field>
      <field type="uint8_t" name="autopilot">Autopilot.</field>
      <field type="uint8_t" name="base_mode">Mode.</field>
      <field type="uint32_t" name="custom_mode">Custom mode.</field>
      <field type="uint8_t" name="system_status">Status.</field>
      <field type="uint8_t_mavlink_version" name="mavlink_version">Version.</field>
    </message>
    <message id="300" name="PROTOCOL_VERSION">
      <wip/>
      <field type="uint16_t" name="version">Version.</field>
    </message>
  </messages>
</mavlink>"#;

    #[test]
    fn test_generate_reports_descriptors() {
        let mut sink = LineBuffer::new();
        let descriptors = MavlinkEngine::new()
            .generate(MINIMAL, &mut sink, "minimal")
            .unwrap();

        assert_eq!(descriptors.enums.len(), 1);
        assert_eq!(descriptors.enums[0].entries, vec!["MAV_CMD_COMPONENT_ARM_DISARM"]);
        assert_eq!(
            descriptors.commands,
            vec![CommandDescriptor {
                name: "MAV_CMD_COMPONENT_ARM_DISARM".to_string(),
                id: 400,
            }]
        );
        assert_eq!(
            descriptors.messages,
            vec![
                MessageDescriptor::new(0, "HEARTBEAT", Some(50)),
                MessageDescriptor::new(300, "PROTOCOL_VERSION", None),
            ]
        );
    }

    #[test]
    fn test_generate_emits_into_sink() {
        let mut sink = LineBuffer::new();
        MavlinkEngine::new()
            .generate(MINIMAL, &mut sink, "minimal")
            .unwrap();
        let lines = sink.drain();

        assert_eq!(lines[0], "// Generated from minimal.xml, do not edit");
        assert!(lines.contains(&"  static MAGIC_NUMBER = 50".to_string()));
        assert!(lines.contains(&"export class ComponentArmDisarmCommand extends CommandLong {".to_string()));
        assert_eq!(lines.last().unwrap(), "}");
    }

    #[test]
    fn test_invalid_xml_emits_nothing() {
        let mut sink = LineBuffer::new();
        let err = MavlinkEngine::new()
            .generate("<mavlink><messages><message id=\"a\"/>", &mut sink, "broken")
            .unwrap_err();

        assert!(matches!(err, Error::Xml(_)));
        assert!(sink.is_empty());
    }
}
