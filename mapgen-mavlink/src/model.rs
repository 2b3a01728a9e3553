//! Validated definition model built from the XML mapping.

use indexmap::IndexMap;

use crate::{
    Error,
    crc::X25,
    xml::{DefinitionXml, DeprecatedXml, EnumXml, MessageItemXml, MessageXml},
};

/// Scalar field types of the MAVLink wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Char,
    Int8,
    UInt8,
    /// `uint8_t_mavlink_version`, filled in by the protocol layer.
    MavlinkVersion,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float,
    Int64,
    UInt64,
    Double,
}

impl BaseType {
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "char" => Self::Char,
            "int8_t" => Self::Int8,
            "uint8_t" => Self::UInt8,
            "uint8_t_mavlink_version" => Self::MavlinkVersion,
            "int16_t" => Self::Int16,
            "uint16_t" => Self::UInt16,
            "int32_t" => Self::Int32,
            "uint32_t" => Self::UInt32,
            "float" => Self::Float,
            "int64_t" => Self::Int64,
            "uint64_t" => Self::UInt64,
            "double" => Self::Double,
            _ => return None,
        })
    }

    /// Type name as it enters the CRC_EXTRA calculation.
    pub fn c_name(self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::Int8 => "int8_t",
            Self::UInt8 | Self::MavlinkVersion => "uint8_t",
            Self::Int16 => "int16_t",
            Self::UInt16 => "uint16_t",
            Self::Int32 => "int32_t",
            Self::UInt32 => "uint32_t",
            Self::Float => "float",
            Self::Int64 => "int64_t",
            Self::UInt64 => "uint64_t",
            Self::Double => "double",
        }
    }

    pub fn size(self) -> usize {
        match self {
            Self::Char | Self::Int8 | Self::UInt8 | Self::MavlinkVersion => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float => 4,
            Self::Int64 | Self::UInt64 | Self::Double => 8,
        }
    }

    pub fn ts_type(self) -> &'static str {
        match self {
            Self::Int64 | Self::UInt64 => "bigint",
            _ => "number",
        }
    }
}

/// A field type, optionally a fixed-size array (`char[16]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldType {
    pub base: BaseType,
    pub array_length: Option<u8>,
}

impl FieldType {
    /// Size in bytes on the wire.
    pub fn size(&self) -> usize {
        self.base.size() * self.array_length.map_or(1, usize::from)
    }

    pub fn is_string(&self) -> bool {
        self.base == BaseType::Char && self.array_length.is_some()
    }

    /// `uint8_t[4]`, with the version marker type collapsed to `uint8_t`.
    pub fn display_name(&self) -> String {
        match self.array_length {
            Some(len) => format!("{}[{}]", self.base.c_name(), len),
            None => self.base.c_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
    pub enum_name: Option<String>,
    pub units: Option<String>,
    pub description: String,
    pub extension: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deprecation {
    pub since: Option<String>,
    pub replaced_by: Option<String>,
    pub note: String,
}

impl From<DeprecatedXml> for Deprecation {
    fn from(d: DeprecatedXml) -> Self {
        Self {
            since: d.since,
            replaced_by: d.replaced_by,
            note: d.note,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
    pub wip: bool,
    pub deprecated: Option<Deprecation>,
}

impl Message {
    /// Fields in wire order: base fields stably sorted by element size,
    /// largest first, then extension fields as declared.
    pub fn wire_fields(&self) -> Vec<&Field> {
        let mut base: Vec<&Field> = self.fields.iter().filter(|f| !f.extension).collect();
        base.sort_by(|a, b| b.ty.base.size().cmp(&a.ty.base.size()));
        base.extend(self.fields.iter().filter(|f| f.extension));
        base
    }

    /// Length of the payload without extensions.
    pub fn payload_length(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| !f.extension)
            .map(|f| f.ty.size())
            .sum()
    }

    /// CRC_EXTRA seed byte of the message.
    pub fn crc_extra(&self) -> u8 {
        let mut crc = X25::new();
        crc.accumulate(self.name.as_bytes()).accumulate(b" ");
        for field in self.wire_fields().into_iter().filter(|f| !f.extension) {
            crc.accumulate(field.ty.base.c_name().as_bytes())
                .accumulate(b" ")
                .accumulate(field.name.as_bytes())
                .accumulate(b" ");
            if let Some(len) = field.ty.array_length {
                crc.accumulate(&[len]);
            }
        }
        crc.fold()
    }

    /// Magic number published for the message; unstable messages get none.
    pub fn magic_number(&self) -> Option<u8> {
        (!self.wip).then(|| self.crc_extra())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub index: u8,
    pub label: Option<String>,
    pub units: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub value: u32,
    pub description: String,
    /// Non-reserved command parameters.
    pub params: Vec<Param>,
    pub wip: bool,
    pub deprecated: Option<Deprecation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub name: String,
    pub description: String,
    pub bitmask: bool,
    pub entries: Vec<Entry>,
    pub deprecated: Option<Deprecation>,
}

/// Name of the enum whose entries are commands.
pub const COMMAND_ENUM: &str = "MAV_CMD";

impl Enum {
    pub fn is_commands(&self) -> bool {
        self.name == COMMAND_ENUM
    }
}

/// One definition file after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub includes: Vec<String>,
    pub version: Option<u32>,
    pub dialect: Option<u32>,
    /// Enums by name, in declaration order.
    pub enums: IndexMap<String, Enum>,
    /// Messages by id, in declaration order.
    pub messages: IndexMap<u32, Message>,
}

impl Definition {
    pub fn parse(source: &str) -> Result<Self, Error> {
        DefinitionXml::parse(source)?.try_into()
    }
}

impl TryFrom<DefinitionXml> for Definition {
    type Error = Error;

    fn try_from(xml: DefinitionXml) -> Result<Self, Error> {
        let mut enums: IndexMap<String, Enum> = IndexMap::new();
        for e in xml.enums.items {
            let e = convert_enum(e)?;
            // Repeated enum blocks extend the first one.
            match enums.get_mut(&e.name) {
                Some(existing) => existing.entries.extend(e.entries),
                None => {
                    enums.insert(e.name.clone(), e);
                }
            }
        }

        let mut messages: IndexMap<u32, Message> = IndexMap::new();
        for m in xml.messages.items {
            let m = convert_message(m)?;
            if let Some(first) = messages.get(&m.id) {
                return Err(Error::DuplicateMessageId {
                    id: m.id,
                    first: first.name.clone(),
                    second: m.name,
                });
            }
            messages.insert(m.id, m);
        }

        Ok(Self {
            includes: xml.includes,
            version: xml.version,
            dialect: xml.dialect,
            enums,
            messages,
        })
    }
}

fn convert_enum(xml: EnumXml) -> Result<Enum, Error> {
    let mut next = 0u32;
    let mut entries = Vec::with_capacity(xml.entries.len());

    for entry in xml.entries {
        let value = match entry.value.as_deref() {
            Some(raw) => parse_value(raw).ok_or_else(|| Error::InvalidEnumValue {
                name: xml.name.clone(),
                entry: entry.name.clone(),
                value: raw.to_string(),
            })?,
            None => next,
        };
        next = value.wrapping_add(1);

        let mut params: Vec<Param> = entry
            .params
            .into_iter()
            .filter(|p| !p.reserved)
            .map(|p| Param {
                index: p.index,
                label: p.label,
                units: p.units,
                description: p.description,
            })
            .collect();
        params.sort_by_key(|p| p.index);

        entries.push(Entry {
            name: entry.name,
            value,
            description: entry.description,
            params,
            wip: entry.wip.is_some(),
            deprecated: entry.deprecated.map(Into::into),
        });
    }

    Ok(Enum {
        name: xml.name,
        description: xml.description,
        bitmask: xml.bitmask,
        entries,
        deprecated: xml.deprecated.map(Into::into),
    })
}

fn parse_value(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}

fn convert_message(xml: MessageXml) -> Result<Message, Error> {
    let mut message = Message {
        id: xml.id,
        name: xml.name,
        description: String::new(),
        fields: Vec::new(),
        wip: false,
        deprecated: None,
    };

    let mut extension = false;
    for item in xml.items {
        match item {
            MessageItemXml::Description(text) => message.description = text,
            MessageItemXml::Extensions => extension = true,
            MessageItemXml::Wip => message.wip = true,
            MessageItemXml::Deprecated(d) => message.deprecated = Some(d.into()),
            MessageItemXml::Other => {}
            MessageItemXml::Field(field) => {
                let ty = parse_field_type(&field.ty).map_err(|kind| match kind {
                    TypeError::Unknown => Error::UnknownType {
                        message: message.name.clone(),
                        field: field.name.clone(),
                        ty: field.ty.clone(),
                    },
                    TypeError::ArrayLength => Error::InvalidArrayLength {
                        message: message.name.clone(),
                        field: field.name.clone(),
                        ty: field.ty.clone(),
                    },
                })?;
                message.fields.push(Field {
                    name: field.name,
                    ty,
                    enum_name: field.enum_name,
                    units: field.units,
                    description: field.description,
                    extension,
                });
            }
        }
    }

    Ok(message)
}

enum TypeError {
    Unknown,
    ArrayLength,
}

fn parse_field_type(raw: &str) -> Result<FieldType, TypeError> {
    let (base, array_length) = match raw.split_once('[') {
        Some((base, rest)) => {
            let len = rest
                .strip_suffix(']')
                .and_then(|n| n.trim().parse::<u8>().ok())
                .filter(|n| *n > 0)
                .ok_or(TypeError::ArrayLength)?;
            (base, Some(len))
        }
        None => (raw, None),
    };

    let base = BaseType::parse(base.trim()).ok_or(TypeError::Unknown)?;
    Ok(FieldType { base, array_length })
}
