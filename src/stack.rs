//! VM stack items as returned by simulated execution.
//!
//! Nodes serialise stack items as `{"type": "<Tag>", "value": ...}` with
//! integers as decimal strings and byte strings as base64. [`StackItem`] is the
//! closed set of those tags; an unknown tag is rejected when the collaborator
//! response is deserialised, so decode sites only ever match known variants.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use num_bigint::BigInt;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One typed value from the VM evaluation stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStackItem", into = "RawStackItem")]
pub enum StackItem {
    Any,
    Pointer(u64),
    Boolean(bool),
    Integer(BigInt),
    ByteString(Vec<u8>),
    Buffer(Vec<u8>),
    Array(Vec<StackItem>),
    Struct(Vec<StackItem>),
    Map(Vec<(StackItem, StackItem)>),
    InteropInterface,
}

impl StackItem {
    /// Wire tag of this item.
    pub fn type_name(&self) -> &'static str {
        match self {
            StackItem::Any => "Any",
            StackItem::Pointer(_) => "Pointer",
            StackItem::Boolean(_) => "Boolean",
            StackItem::Integer(_) => "Integer",
            StackItem::ByteString(_) => "ByteString",
            StackItem::Buffer(_) => "Buffer",
            StackItem::Array(_) => "Array",
            StackItem::Struct(_) => "Struct",
            StackItem::Map(_) => "Map",
            StackItem::InteropInterface => "InteropInterface",
        }
    }

    /// Ordered children of an `Array` or `Struct`.
    pub fn as_items(&self) -> Option<&[StackItem]> {
        match self {
            StackItem::Array(items) | StackItem::Struct(items) => Some(items),
            _ => None,
        }
    }

    /// Raw bytes of a `ByteString` or `Buffer`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            StackItem::ByteString(bytes) | StackItem::Buffer(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Integer view following VM conversion rules.
    ///
    /// Byte strings are read as little-endian two's complement, with the empty
    /// string being zero.
    pub fn as_integer(&self) -> Option<BigInt> {
        match self {
            StackItem::Integer(value) => Some(value.clone()),
            StackItem::Boolean(flag) => Some(BigInt::from(u8::from(*flag))),
            StackItem::ByteString(bytes) | StackItem::Buffer(bytes) => {
                Some(BigInt::from_signed_bytes_le(bytes))
            }
            StackItem::Any
            | StackItem::Pointer(_)
            | StackItem::Array(_)
            | StackItem::Struct(_)
            | StackItem::Map(_)
            | StackItem::InteropInterface => None,
        }
    }

    /// True for null, empty byte strings, zero and `false`.
    pub fn is_null_or_empty(&self) -> bool {
        match self {
            StackItem::Any => true,
            StackItem::Boolean(flag) => !flag,
            StackItem::Integer(value) => value.is_zero(),
            StackItem::ByteString(bytes) | StackItem::Buffer(bytes) => bytes.is_empty(),
            StackItem::Pointer(_)
            | StackItem::Array(_)
            | StackItem::Struct(_)
            | StackItem::Map(_)
            | StackItem::InteropInterface => false,
        }
    }
}

// ── wire form ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct RawStackItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<JsonValue>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawMapEntry {
    key: StackItem,
    value: StackItem,
}

impl TryFrom<RawStackItem> for StackItem {
    type Error = String;

    fn try_from(raw: RawStackItem) -> Result<Self, Self::Error> {
        let value = raw.value.unwrap_or(JsonValue::Null);
        match raw.kind.as_str() {
            "Any" => Ok(StackItem::Any),
            "InteropInterface" => Ok(StackItem::InteropInterface),
            "Boolean" => match value {
                JsonValue::Bool(flag) => Ok(StackItem::Boolean(flag)),
                JsonValue::String(s) if s.eq_ignore_ascii_case("true") => {
                    Ok(StackItem::Boolean(true))
                }
                JsonValue::String(s) if s.eq_ignore_ascii_case("false") => {
                    Ok(StackItem::Boolean(false))
                }
                other => Err(format!("Boolean stack item with value {}", other)),
            },
            "Integer" => parse_integer(&value).map(StackItem::Integer),
            "Pointer" => value
                .as_u64()
                .map(StackItem::Pointer)
                .ok_or_else(|| format!("Pointer stack item with value {}", value)),
            "ByteString" => parse_base64(&value).map(StackItem::ByteString),
            "Buffer" => parse_base64(&value).map(StackItem::Buffer),
            "Array" => parse_items(value).map(StackItem::Array),
            "Struct" => parse_items(value).map(StackItem::Struct),
            "Map" => {
                let entries: Vec<RawMapEntry> = match value {
                    JsonValue::Null => Vec::new(),
                    other => serde_json::from_value(other).map_err(|e| e.to_string())?,
                };
                Ok(StackItem::Map(
                    entries.into_iter().map(|e| (e.key, e.value)).collect(),
                ))
            }
            other => Err(format!("Unknown stack item type: {}", other)),
        }
    }
}

impl From<StackItem> for RawStackItem {
    fn from(item: StackItem) -> Self {
        let kind = item.type_name().to_string();
        let value = match item {
            StackItem::Any | StackItem::InteropInterface => None,
            StackItem::Pointer(p) => Some(JsonValue::from(p)),
            StackItem::Boolean(flag) => Some(JsonValue::Bool(flag)),
            StackItem::Integer(value) => Some(JsonValue::String(value.to_string())),
            StackItem::ByteString(bytes) | StackItem::Buffer(bytes) => {
                Some(JsonValue::String(BASE64.encode(bytes)))
            }
            StackItem::Array(items) | StackItem::Struct(items) => Some(JsonValue::Array(
                items
                    .into_iter()
                    .filter_map(|i| serde_json::to_value(i).ok())
                    .collect(),
            )),
            StackItem::Map(entries) => Some(JsonValue::Array(
                entries
                    .into_iter()
                    .filter_map(|(key, value)| serde_json::to_value(RawMapEntry { key, value }).ok())
                    .collect(),
            )),
        };
        RawStackItem { kind, value }
    }
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn parse_integer(value: &JsonValue) -> Result<BigInt, String> {
    let text = match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        other => return Err(format!("Integer stack item with value {}", other)),
    };
    text.trim()
        .parse::<BigInt>()
        .map_err(|e| format!("Integer stack item {:?}: {}", text, e))
}

fn parse_base64(value: &JsonValue) -> Result<Vec<u8>, String> {
    match value {
        JsonValue::Null => Ok(Vec::new()),
        JsonValue::String(s) => BASE64
            .decode(s)
            .map_err(|e| format!("Invalid base64 {:?}: {}", s, e)),
        other => Err(format!("Byte string stack item with value {}", other)),
    }
}

fn parse_items(value: JsonValue) -> Result<Vec<StackItem>, String> {
    match value {
        JsonValue::Null => Ok(Vec::new()),
        JsonValue::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(|e| e.to_string()))
            .collect(),
        other => Err(format!("Expected array of stack items, got {}", other)),
    }
}
