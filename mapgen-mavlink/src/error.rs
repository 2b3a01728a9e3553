use miette::Diagnostic;
use thiserror::Error;

/// Failures while interpreting a MAVLink definition.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid definition: {0}")]
    #[diagnostic(code(mavlink::xml))]
    Xml(#[from] quick_xml::DeError),

    #[error("unknown type '{ty}' for field '{field}' of message {message}")]
    #[diagnostic(
        code(mavlink::unknown_type),
        help("valid types are int8_t..int64_t, uint8_t..uint64_t, char, float, double")
    )]
    UnknownType {
        message: String,
        field: String,
        ty: String,
    },

    #[error("invalid array length in '{ty}' for field '{field}' of message {message}")]
    #[diagnostic(code(mavlink::array_length), help("array lengths must be between 1 and 255"))]
    InvalidArrayLength {
        message: String,
        field: String,
        ty: String,
    },

    #[error("invalid value '{value}' for entry {entry} of enum {name}")]
    #[diagnostic(code(mavlink::enum_value))]
    InvalidEnumValue {
        name: String,
        entry: String,
        value: String,
    },

    #[error("message id {id} is declared by both {first} and {second}")]
    #[diagnostic(code(mavlink::duplicate_message))]
    DuplicateMessageId {
        id: u32,
        first: String,
        second: String,
    },
}
