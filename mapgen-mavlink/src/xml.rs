//! Serde mapping of the MAVLink XML definition format.
//!
//! Only the parts the generator reads are mapped; unknown elements and
//! attributes are ignored.

use serde::{Deserialize, de::IgnoredAny};

use crate::Error;

/// Root `<mavlink>` element.
#[derive(Debug, Default, Deserialize)]
pub struct DefinitionXml {
    #[serde(rename = "include", default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub dialect: Option<u32>,
    #[serde(default)]
    pub enums: EnumsXml,
    #[serde(default)]
    pub messages: MessagesXml,
}

impl DefinitionXml {
    pub fn parse(source: &str) -> Result<Self, Error> {
        Ok(quick_xml::de::from_str(source)?)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EnumsXml {
    #[serde(rename = "enum", default)]
    pub items: Vec<EnumXml>,
}

#[derive(Debug, Deserialize)]
pub struct EnumXml {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@bitmask", default)]
    pub bitmask: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub deprecated: Option<DeprecatedXml>,
    #[serde(rename = "entry", default)]
    pub entries: Vec<EntryXml>,
}

#[derive(Debug, Deserialize)]
pub struct EntryXml {
    #[serde(rename = "@name")]
    pub name: String,
    /// Decimal or `0x` hex; continues from the previous entry when missing.
    #[serde(rename = "@value", default)]
    pub value: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "param", default)]
    pub params: Vec<ParamXml>,
    #[serde(default)]
    pub deprecated: Option<DeprecatedXml>,
    #[serde(default)]
    pub wip: Option<IgnoredAny>,
}

#[derive(Debug, Deserialize)]
pub struct ParamXml {
    #[serde(rename = "@index")]
    pub index: u8,
    #[serde(rename = "@label", default)]
    pub label: Option<String>,
    #[serde(rename = "@units", default)]
    pub units: Option<String>,
    #[serde(rename = "@reserved", default)]
    pub reserved: bool,
    #[serde(rename = "$text", default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeprecatedXml {
    #[serde(rename = "@since", default)]
    pub since: Option<String>,
    #[serde(rename = "@replaced_by", default)]
    pub replaced_by: Option<String>,
    #[serde(rename = "$text", default)]
    pub note: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MessagesXml {
    #[serde(rename = "message", default)]
    pub items: Vec<MessageXml>,
}

#[derive(Debug, Deserialize)]
pub struct MessageXml {
    #[serde(rename = "@id")]
    pub id: u32,
    #[serde(rename = "@name")]
    pub name: String,
    /// Children in document order; `<extensions/>` splits base fields from
    /// extension fields.
    #[serde(rename = "$value", default)]
    pub items: Vec<MessageItemXml>,
}

#[derive(Debug, Deserialize)]
pub enum MessageItemXml {
    #[serde(rename = "description")]
    Description(String),
    #[serde(rename = "field")]
    Field(FieldXml),
    #[serde(rename = "extensions")]
    Extensions,
    #[serde(rename = "wip")]
    Wip,
    #[serde(rename = "deprecated")]
    Deprecated(DeprecatedXml),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct FieldXml {
    #[serde(rename = "@type")]
    pub ty: String,
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@enum", default)]
    pub enum_name: Option<String>,
    #[serde(rename = "@units", default)]
    pub units: Option<String>,
    #[serde(rename = "$text", default)]
    pub description: String,
}
