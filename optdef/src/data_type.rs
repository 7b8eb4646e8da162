//
// DHCP-RS - Option Definition
//   Copyright (C) 2024-2025, Toshiaki Takada
//

use std::fmt;
use std::mem::size_of;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use common::DhcpError;

/// Scalar data types an option, or a record field, may carry.
#[derive(PartialEq, Eq, Copy, Clone, Hash)]
pub enum ScalarType {
    Empty,
    Boolean,
    Int8,
    Int16,
    Int32,
    UInt8,
    UInt16,
    UInt32,
    Ipv4Address,
    Ipv6Address,
    String,
    Fqdn,

    /// Marker, see the record field list of the definition.
    Record,
}

impl ScalarType {
    /// Return on-wire width in bytes, None for variable width types.
    pub fn width(&self) -> Option<usize> {
        match self {
            ScalarType::Empty => Some(0),
            ScalarType::Boolean => Some(size_of::<u8>()),
            ScalarType::Int8 => Some(size_of::<i8>()),
            ScalarType::Int16 => Some(size_of::<i16>()),
            ScalarType::Int32 => Some(size_of::<i32>()),
            ScalarType::UInt8 => Some(size_of::<u8>()),
            ScalarType::UInt16 => Some(size_of::<u16>()),
            ScalarType::UInt32 => Some(size_of::<u32>()),
            ScalarType::Ipv4Address => Some(size_of::<Ipv4Addr>()),
            ScalarType::Ipv6Address => Some(size_of::<Ipv6Addr>()),
            ScalarType::String |
            ScalarType::Fqdn |
            ScalarType::Record => None,
        }
    }

    /// String and FQDN.
    pub fn is_variable_width(&self) -> bool {
        matches!(self, ScalarType::String | ScalarType::Fqdn)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self,
                 ScalarType::Int8 | ScalarType::Int16 | ScalarType::Int32 |
                 ScalarType::UInt8 | ScalarType::UInt16 | ScalarType::UInt32)
    }

    /// Return textual name used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Empty => "empty",
            ScalarType::Boolean => "boolean",
            ScalarType::Int8 => "int8",
            ScalarType::Int16 => "int16",
            ScalarType::Int32 => "int32",
            ScalarType::UInt8 => "uint8",
            ScalarType::UInt16 => "uint16",
            ScalarType::UInt32 => "uint32",
            ScalarType::Ipv4Address => "ipv4-address",
            ScalarType::Ipv6Address => "ipv6-address",
            ScalarType::String => "string",
            ScalarType::Fqdn => "fqdn",
            ScalarType::Record => "record",
        }
    }
}

impl fmt::Debug for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ScalarType {
    type Err = DhcpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "empty" => Ok(ScalarType::Empty),
            "boolean" => Ok(ScalarType::Boolean),
            "int8" => Ok(ScalarType::Int8),
            "int16" => Ok(ScalarType::Int16),
            "int32" => Ok(ScalarType::Int32),
            "uint8" => Ok(ScalarType::UInt8),
            "uint16" => Ok(ScalarType::UInt16),
            "uint32" => Ok(ScalarType::UInt32),
            "ipv4-address" => Ok(ScalarType::Ipv4Address),
            "ipv6-address" => Ok(ScalarType::Ipv6Address),
            "string" => Ok(ScalarType::String),
            "fqdn" => Ok(ScalarType::Fqdn),
            "record" => Ok(ScalarType::Record),
            _ => Err(DhcpError::InvalidValue(format!("unknown data type '{}'", s))),
        }
    }
}
