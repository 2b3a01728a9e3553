//! Consolidated message id → magic number registry.

use std::collections::BTreeMap;

use tracing::warn;

use crate::engine::MessageDescriptor;

/// Magic numbers collected across a batch, keyed by message id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MagicNumberRegistry {
    entries: BTreeMap<u32, u8>,
}

impl MagicNumberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: u32) -> Option<u8> {
        self.entries.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u8)> + '_ {
        self.entries.iter().map(|(id, magic)| (*id, *magic))
    }
}

/// Fold one file's messages into the registry.
///
/// Messages without a magic number are skipped. A later value for an id
/// replaces the earlier one.
pub fn fold_messages(
    mut registry: MagicNumberRegistry,
    messages: &[MessageDescriptor],
) -> MagicNumberRegistry {
    for message in messages {
        let Some(magic) = message.magic else {
            continue;
        };
        let previous = registry.entries.insert(message.id, magic);
        if previous.is_some_and(|p| p != magic) {
            warn!(
                id = message.id,
                name = %message.name,
                previous = ?previous,
                magic,
                "magic number overridden by later definition"
            );
        }
    }
    registry
}

/// Render the registry as a TypeScript module.
pub fn generate_magic_numbers(registry: &MagicNumberRegistry) -> String {
    let mut out = String::from("export const MSG_ID_MAGIC_NUMBER: Record<string, number> = {\n");
    for (id, magic) in registry.iter() {
        out.push_str(&format!("  '{}': {},\n", id, magic));
    }
    out.push_str("}\n");
    out
}
