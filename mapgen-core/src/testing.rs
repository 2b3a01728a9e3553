//! Test engines for exercising the batch driver without a real schema.

use thiserror::Error;

use crate::engine::{Descriptors, Engine, LineSink, MessageDescriptor};

#[derive(Debug, Error)]
#[error("{0}")]
pub struct TestEngineError(pub String);

/// Echoes its input back and declares one message per line.
///
/// Each non-empty source line reads `id:NAME:magic`, with `-` for a missing
/// magic number. Output is a `// <module>` header followed by the source lines.
pub struct EchoEngine;

impl Engine for EchoEngine {
    type Error = TestEngineError;

    fn generate(
        &self,
        source: &str,
        sink: &mut dyn LineSink,
        module_name: &str,
    ) -> Result<Descriptors, Self::Error> {
        sink.append_line(&format!("// {}", module_name));

        let mut descriptors = Descriptors::default();
        for line in source.lines().filter(|l| !l.trim().is_empty()) {
            sink.append_line(line);
            descriptors.messages.push(parse_message(line)?);
        }
        Ok(descriptors)
    }
}

fn parse_message(line: &str) -> Result<MessageDescriptor, TestEngineError> {
    let invalid = || TestEngineError(format!("invalid message line '{}'", line));
    let mut parts = line.split(':');
    let (Some(id), Some(name), Some(magic)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let id = id.trim().parse().map_err(|_| invalid())?;
    let magic = match magic.trim() {
        "-" => None,
        value => Some(value.parse().map_err(|_| invalid())?),
    };
    Ok(MessageDescriptor::new(id, name.trim(), magic))
}

/// Rejects every input.
pub struct FailingEngine;

impl Engine for FailingEngine {
    type Error = TestEngineError;

    fn generate(
        &self,
        _source: &str,
        _sink: &mut dyn LineSink,
        _module_name: &str,
    ) -> Result<Descriptors, Self::Error> {
        Err(TestEngineError("unexpected end of definition".to_string()))
    }
}
