//! Contract between the batch driver and a code-generation engine.
//!
//! An engine turns the source text of one definition file into lines of
//! target-language code, pushed into a [`LineSink`], and reports what it
//! declared through [`Descriptors`].

/// Capability to receive emitted lines, one call per line.
pub trait LineSink {
    /// Append one line of output.
    fn append_line(&mut self, line: &str);
}

/// In-memory sink drained by the invoker once the engine returns.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Take every collected line, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl LineSink for LineBuffer {
    fn append_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// An enumeration declared by a definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: String,
    /// Entry names in declaration order.
    pub entries: Vec<String>,
}

/// A command declared by a definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub name: String,
    pub id: u32,
}

/// A message declared by a definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDescriptor {
    /// Message id, unique within one file.
    pub id: u32,
    pub name: String,
    /// Magic number, absent when the engine does not assign one.
    pub magic: Option<u8>,
}

impl MessageDescriptor {
    pub fn new(id: u32, name: impl Into<String>, magic: Option<u8>) -> Self {
        Self {
            id,
            name: name.into(),
            magic,
        }
    }
}

/// Everything an engine declared while generating one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptors {
    pub enums: Vec<EnumDescriptor>,
    pub commands: Vec<CommandDescriptor>,
    pub messages: Vec<MessageDescriptor>,
}

/// A code-generation engine.
///
/// Implementations must call [`LineSink::append_line`] once per emitted line,
/// in final order. The sink is only borrowed for the duration of the call.
pub trait Engine {
    type Error: std::error::Error + Send + Sync + 'static;

    fn generate(
        &self,
        source: &str,
        sink: &mut dyn LineSink,
        module_name: &str,
    ) -> Result<Descriptors, Self::Error>;
}
