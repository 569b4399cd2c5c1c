//! The fixed primitive type set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Built-in value types. Anything else in a value-type position must resolve
/// to a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Timestamp,
    Duration,
    List,
    Map,
}

impl Primitive {
    pub const ALL: [Primitive; 16] = [
        Primitive::String,
        Primitive::Bool,
        Primitive::Int8,
        Primitive::Int16,
        Primitive::Int32,
        Primitive::Int64,
        Primitive::Uint8,
        Primitive::Uint16,
        Primitive::Uint32,
        Primitive::Uint64,
        Primitive::Float32,
        Primitive::Float64,
        Primitive::Timestamp,
        Primitive::Duration,
        Primitive::List,
        Primitive::Map,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Bool => "bool",
            Primitive::Int8 => "int8",
            Primitive::Int16 => "int16",
            Primitive::Int32 => "int32",
            Primitive::Int64 => "int64",
            Primitive::Uint8 => "uint8",
            Primitive::Uint16 => "uint16",
            Primitive::Uint32 => "uint32",
            Primitive::Uint64 => "uint64",
            Primitive::Float32 => "float32",
            Primitive::Float64 => "float64",
            Primitive::Timestamp => "timestamp",
            Primitive::Duration => "duration",
            Primitive::List => "list",
            Primitive::Map => "map",
        }
    }

    /// Parse a primitive keyword. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    pub fn is_collection(self) -> bool {
        matches!(self, Primitive::List | Primitive::Map)
    }

    pub fn is_signed_integer(self) -> bool {
        matches!(
            self,
            Primitive::Int8 | Primitive::Int16 | Primitive::Int32 | Primitive::Int64
        )
    }

    pub fn is_unsigned_integer(self) -> bool {
        matches!(
            self,
            Primitive::Uint8 | Primitive::Uint16 | Primitive::Uint32 | Primitive::Uint64
        )
    }

    pub fn is_integer(self) -> bool {
        self.is_signed_integer() || self.is_unsigned_integer()
    }

    pub fn is_float(self) -> bool {
        matches!(self, Primitive::Float32 | Primitive::Float64)
    }

    /// Whether values of this type may be used as map keys.
    pub fn is_valid_map_key(self) -> bool {
        matches!(self, Primitive::String | Primitive::Bool) || self.is_integer()
    }

    /// Number of type arguments this primitive takes.
    pub fn arity(self) -> usize {
        match self {
            Primitive::List => 1,
            Primitive::Map => 2,
            _ => 0,
        }
    }

    /// Inclusive value range for integer primitives.
    ///
    /// `uint64` is capped at `i64::MAX` since integer literals are `i64`.
    pub fn integer_range(self) -> Option<(i64, i64)> {
        let range = match self {
            Primitive::Int8 => (i8::MIN as i64, i8::MAX as i64),
            Primitive::Int16 => (i16::MIN as i64, i16::MAX as i64),
            Primitive::Int32 => (i32::MIN as i64, i32::MAX as i64),
            Primitive::Int64 => (i64::MIN, i64::MAX),
            Primitive::Uint8 => (0, u8::MAX as i64),
            Primitive::Uint16 => (0, u16::MAX as i64),
            Primitive::Uint32 => (0, u32::MAX as i64),
            Primitive::Uint64 => (0, i64::MAX),
            _ => return None,
        };
        Some(range)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Primitive {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(())
    }
}
