//
// DHCP-RS - Option Definition
//   Copyright (C) 2024-2025, Toshiaki Takada
//
// Codec:
//  Convert textual values into their wire form for a given data type, and
//  wire form back into typed values.  Integers are network byte order.
//

use std::fmt;
use std::mem::size_of;
use std::net::{Ipv4Addr, Ipv6Addr};

use common::DhcpError;
use common::encode::*;

use crate::data_type::ScalarType;

/// Maximum length of a single label and of a whole domain name.
const FQDN_MAX_LABEL_LEN: usize = 63;
const FQDN_MAX_LEN: usize = 255;

/// Integer types an option may carry as a value.
pub trait IntType: Copy + fmt::Debug + Into<IntValue> + TryFrom<i64> {
    /// Corresponding scalar type.
    const TYPE: ScalarType;

    /// Width on the wire.
    const WIDTH: usize;

    /// Read value from the first WIDTH bytes, caller checks the length.
    fn from_be_slice(data: &[u8]) -> Self;

    /// Append value to buffer.
    fn encode(self, buf: &mut Vec<u8>) -> usize;
}

/// Decoded integer value.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum IntValue {
    U8(u8),
    U16(u16),
    U32(u32),
    I8(i8),
    I16(i16),
    I32(i32),
}

impl IntValue {
    /// Append value to buffer.
    pub fn encode(&self, buf: &mut Vec<u8>) -> usize {
        match *self {
            IntValue::U8(v) => v.encode(buf),
            IntValue::U16(v) => v.encode(buf),
            IntValue::U32(v) => v.encode(buf),
            IntValue::I8(v) => v.encode(buf),
            IntValue::I16(v) => v.encode(buf),
            IntValue::I32(v) => v.encode(buf),
        }
    }
}

impl fmt::Display for IntValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntValue::U8(v) => write!(f, "{}", v),
            IntValue::U16(v) => write!(f, "{}", v),
            IntValue::U32(v) => write!(f, "{}", v),
            IntValue::I8(v) => write!(f, "{}", v),
            IntValue::I16(v) => write!(f, "{}", v),
            IntValue::I32(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! int_type {
    ($t:ty, $scalar:ident, $variant:ident) => {
        impl IntType for $t {
            const TYPE: ScalarType = ScalarType::$scalar;
            const WIDTH: usize = size_of::<$t>();

            fn from_be_slice(data: &[u8]) -> Self {
                let mut bytes = [0u8; size_of::<$t>()];
                bytes.copy_from_slice(&data[..size_of::<$t>()]);
                <$t>::from_be_bytes(bytes)
            }

            fn encode(self, buf: &mut Vec<u8>) -> usize {
                encode_data(buf, &self.to_be_bytes())
            }
        }

        impl From<$t> for IntValue {
            fn from(v: $t) -> IntValue {
                IntValue::$variant(v)
            }
        }
    };
}

int_type!(u8, UInt8, U8);
int_type!(u16, UInt16, U16);
int_type!(u32, UInt32, U32);
int_type!(i8, Int8, I8);
int_type!(i16, Int16, I16);
int_type!(i32, Int32, I32);

/// Typed value of a single data field.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Value {
    Empty,
    Bool(bool),
    Int(IntValue),
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    String(String),
    Fqdn(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Ipv4(v) => write!(f, "{}", v),
            Value::Ipv6(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Fqdn(v) => write!(f, "{}", v),
        }
    }
}

/// Parse integer and check it fits in the target type.
pub fn lexical_cast<T: IntType>(s: &str) -> Result<T, DhcpError> {
    let v: i64 = s.parse().map_err(|_| {
        DhcpError::InvalidValue(format!("unable to convert '{}' to {}", s, T::TYPE))
    })?;

    T::try_from(v).map_err(|_| {
        DhcpError::InvalidValue(format!("value '{}' out of range for {}", s, T::TYPE))
    })
}

fn lexical_cast_bool(s: &str) -> Result<bool, DhcpError> {
    match s {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(DhcpError::InvalidValue(format!("unable to convert '{}' to boolean", s))),
    }
}

fn is_label_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_'
}

/// Encode domain name as a sequence of length prefixed labels.
pub fn encode_fqdn(buf: &mut Vec<u8>, s: &str) -> Result<usize, DhcpError> {
    if s.is_empty() {
        return Err(DhcpError::InvalidValue(String::from("empty domain name")))
    }

    let mut wire = Vec::new();
    let name = s.strip_suffix('.').unwrap_or(s);
    if !name.is_empty() {
        for label in name.split('.') {
            if label.is_empty() {
                return Err(DhcpError::InvalidValue(format!("empty label in domain name '{}'", s)))
            }
            if label.len() > FQDN_MAX_LABEL_LEN {
                return Err(DhcpError::InvalidValue(format!("label too long in domain name '{}'", s)))
            }
            if !label.bytes().all(is_label_char) {
                return Err(DhcpError::InvalidValue(format!("invalid character in domain name '{}'", s)))
            }
            encode_u8(&mut wire, label.len() as u8);
            encode_data(&mut wire, label.as_bytes());
        }
    }
    encode_u8(&mut wire, 0);

    if wire.len() > FQDN_MAX_LEN {
        return Err(DhcpError::InvalidValue(format!("domain name '{}' too long", s)))
    }

    Ok(encode_data(buf, &wire))
}

/// Decode domain name, return the name and number of bytes consumed.
pub fn decode_fqdn(data: &[u8]) -> Result<(String, usize), DhcpError> {
    let mut labels = Vec::new();
    let mut pos = 0;

    loop {
        if pos >= data.len() {
            return Err(DhcpError::InvalidValue(String::from("domain name is not terminated")))
        }
        let len = data[pos] as usize;
        if len == 0 {
            pos += 1;
            break;
        }
        if len > FQDN_MAX_LABEL_LEN {
            return Err(DhcpError::InvalidValue(format!("invalid label length {} in domain name", len)))
        }
        if pos + 1 + len > data.len() {
            return Err(DhcpError::InvalidValue(String::from("truncated label in domain name")))
        }
        let label = &data[pos + 1..pos + 1 + len];
        if !label.iter().all(|c| is_label_char(*c)) {
            return Err(DhcpError::InvalidValue(String::from("invalid character in domain name label")))
        }
        labels.push(String::from_utf8_lossy(label).into_owned());
        pos += 1 + len;
    }

    if pos > FQDN_MAX_LEN {
        return Err(DhcpError::InvalidValue(format!("domain name too long {}", pos)))
    }

    if labels.is_empty() {
        Ok((String::from("."), pos))
    } else {
        Ok((labels.join("."), pos))
    }
}

/// Encode textual value of the given type and append it to buffer.
pub fn encode_value(buf: &mut Vec<u8>, s: &str, t: ScalarType) -> Result<usize, DhcpError> {
    match t {
        ScalarType::Boolean => Ok(encode_u8(buf, lexical_cast_bool(s)? as u8)),
        ScalarType::Int8 => Ok(lexical_cast::<i8>(s)?.encode(buf)),
        ScalarType::Int16 => Ok(lexical_cast::<i16>(s)?.encode(buf)),
        ScalarType::Int32 => Ok(lexical_cast::<i32>(s)?.encode(buf)),
        ScalarType::UInt8 => Ok(lexical_cast::<u8>(s)?.encode(buf)),
        ScalarType::UInt16 => Ok(lexical_cast::<u16>(s)?.encode(buf)),
        ScalarType::UInt32 => Ok(lexical_cast::<u32>(s)?.encode(buf)),
        ScalarType::Ipv4Address => match s.parse::<Ipv4Addr>() {
            Ok(addr) => Ok(encode_ipv4(buf, addr)),
            Err(_) => Err(DhcpError::InvalidValue(format!("'{}' is not a valid IPv4 address", s))),
        },
        ScalarType::Ipv6Address => match s.parse::<Ipv6Addr>() {
            Ok(addr) => Ok(encode_ipv6(buf, addr)),
            Err(_) => Err(DhcpError::InvalidValue(format!("'{}' is not a valid IPv6 address", s))),
        },
        ScalarType::String => Ok(encode_data(buf, s.as_bytes())),
        ScalarType::Fqdn => encode_fqdn(buf, s),
        ScalarType::Empty |
        ScalarType::Record => {
            Err(DhcpError::InvalidValue(format!("data type {} can't be encoded from a value", t)))
        }
    }
}

/// Encode textual value of the given type.
pub fn encode(s: &str, t: ScalarType) -> Result<Vec<u8>, DhcpError> {
    let mut buf = Vec::new();
    encode_value(&mut buf, s, t)?;
    Ok(buf)
}

fn decode_int<T: IntType>(data: &[u8]) -> Result<(Value, usize), DhcpError> {
    if data.len() < T::WIDTH {
        Err(DhcpError::SizeMismatch(format!("{} bytes too short for {}", data.len(), T::TYPE)))
    } else {
        Ok((Value::Int(T::from_be_slice(data).into()), T::WIDTH))
    }
}

/// Decode one value of the given type from the front of data.
///
/// String consumes all of data; other types consume their own width.
pub(crate) fn decode_value(data: &[u8], t: ScalarType) -> Result<(Value, usize), DhcpError> {
    let short = |t: ScalarType| {
        DhcpError::SizeMismatch(format!("{} bytes too short for {}", data.len(), t))
    };

    match t {
        ScalarType::Empty => Ok((Value::Empty, 0)),
        ScalarType::Boolean => match decode_u8(data).map_err(|_| short(t))? {
            0 => Ok((Value::Bool(false), 1)),
            1 => Ok((Value::Bool(true), 1)),
            v => Err(DhcpError::InvalidValue(format!("invalid boolean value {}", v))),
        },
        ScalarType::Int8 => decode_int::<i8>(data),
        ScalarType::Int16 => decode_int::<i16>(data),
        ScalarType::Int32 => decode_int::<i32>(data),
        ScalarType::UInt8 => decode_int::<u8>(data),
        ScalarType::UInt16 => decode_int::<u16>(data),
        ScalarType::UInt32 => decode_int::<u32>(data),
        ScalarType::Ipv4Address => {
            Ok((Value::Ipv4(decode_ipv4(data).map_err(|_| short(t))?), size_of::<Ipv4Addr>()))
        }
        ScalarType::Ipv6Address => {
            Ok((Value::Ipv6(decode_ipv6(data).map_err(|_| short(t))?), size_of::<Ipv6Addr>()))
        }
        ScalarType::String => match std::str::from_utf8(data) {
            Ok(s) => Ok((Value::String(s.to_string()), data.len())),
            Err(_) => Err(DhcpError::InvalidValue(String::from("string is not valid UTF-8"))),
        },
        ScalarType::Fqdn => {
            let (name, len) = decode_fqdn(data)?;
            Ok((Value::Fqdn(name), len))
        }
        ScalarType::Record => {
            Err(DhcpError::InvalidValue(String::from("record can't be decoded as a single value")))
        }
    }
}

///
/// Unit tests.
///
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_encode_integers() {
        assert_eq!(encode("42", ScalarType::UInt16).unwrap(), [0x00, 0x2a]);
        assert_eq!(encode("-1", ScalarType::Int32).unwrap(), [0xff, 0xff, 0xff, 0xff]);
        assert_eq!(encode("255", ScalarType::UInt8).unwrap(), [0xff]);
        assert_eq!(encode("-128", ScalarType::Int8).unwrap(), [0x80]);

        match encode("300", ScalarType::UInt8) {
            Err(DhcpError::InvalidValue(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
        match encode("-1", ScalarType::UInt16) {
            Err(DhcpError::InvalidValue(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
        match encode("12ab", ScalarType::UInt32) {
            Err(DhcpError::InvalidValue(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }

    #[test]
    pub fn test_encode_boolean() {
        assert_eq!(encode("true", ScalarType::Boolean).unwrap(), [1]);
        assert_eq!(encode("false", ScalarType::Boolean).unwrap(), [0]);
        assert_eq!(encode("1", ScalarType::Boolean).unwrap(), [1]);

        match encode("True", ScalarType::Boolean) {
            Err(DhcpError::InvalidValue(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }

    #[test]
    pub fn test_encode_addresses() {
        assert_eq!(encode("192.0.2.1", ScalarType::Ipv4Address).unwrap(), [192, 0, 2, 1]);
        assert_eq!(encode("2001:db8::1", ScalarType::Ipv6Address).unwrap().len(), 16);

        match encode("2001:db8::1", ScalarType::Ipv4Address) {
            Err(DhcpError::InvalidValue(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
        match encode("192.0.2.1", ScalarType::Ipv6Address) {
            Err(DhcpError::InvalidValue(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }

    #[test]
    pub fn test_encode_string() {
        assert_eq!(encode("hello", ScalarType::String).unwrap(), b"hello");
        assert_eq!(encode("", ScalarType::String).unwrap(), b"");
    }

    #[test]
    pub fn test_encode_fqdn() {
        assert_eq!(encode("example.com", ScalarType::Fqdn).unwrap(),
                   [7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0]);
        assert_eq!(encode("example.com.", ScalarType::Fqdn).unwrap(),
                   encode("example.com", ScalarType::Fqdn).unwrap());
        assert_eq!(encode(".", ScalarType::Fqdn).unwrap(), [0]);

        let long = "x".repeat(64);
        for bad in ["", "a..b", "bad label.com", long.as_str()] {
            match encode(bad, ScalarType::Fqdn) {
                Err(DhcpError::InvalidValue(_)) => {}
                res => assert!(false, "Unexpected for '{}': {:?}", bad, res),
            }
        }
    }

    #[test]
    pub fn test_encode_not_encodable() {
        match encode("", ScalarType::Empty) {
            Err(DhcpError::InvalidValue(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
        match encode("1", ScalarType::Record) {
            Err(DhcpError::InvalidValue(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }

    #[test]
    pub fn test_decode_roundtrip() {
        let cases = [
            ("true", ScalarType::Boolean, Value::Bool(true)),
            ("-5", ScalarType::Int8, Value::Int(IntValue::I8(-5))),
            ("-1000", ScalarType::Int16, Value::Int(IntValue::I16(-1000))),
            ("-100000", ScalarType::Int32, Value::Int(IntValue::I32(-100000))),
            ("200", ScalarType::UInt8, Value::Int(IntValue::U8(200))),
            ("65535", ScalarType::UInt16, Value::Int(IntValue::U16(65535))),
            ("4000000000", ScalarType::UInt32, Value::Int(IntValue::U32(4000000000))),
            ("10.0.0.1", ScalarType::Ipv4Address, Value::Ipv4("10.0.0.1".parse().unwrap())),
            ("2001:db8::5", ScalarType::Ipv6Address, Value::Ipv6("2001:db8::5".parse().unwrap())),
            ("some text", ScalarType::String, Value::String(String::from("some text"))),
            ("www.example.org", ScalarType::Fqdn, Value::Fqdn(String::from("www.example.org"))),
        ];

        for (text, t, expected) in cases {
            let wire = encode(text, t).unwrap();
            let (v, len) = decode_value(&wire, t).unwrap();
            assert_eq!(v, expected);
            assert_eq!(len, wire.len());
            assert_eq!(v.to_string(), text);
        }
    }

    #[test]
    pub fn test_decode_errors() {
        match decode_value(&[0, 1], ScalarType::UInt32) {
            Err(DhcpError::SizeMismatch(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
        match decode_value(&[2], ScalarType::Boolean) {
            Err(DhcpError::InvalidValue(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
        match decode_value(&[3, b'c', b'o'], ScalarType::Fqdn) {
            Err(DhcpError::InvalidValue(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
        match decode_value(&[3, b'c', b'o', b'm'], ScalarType::Fqdn) {
            Err(DhcpError::InvalidValue(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }

    #[test]
    pub fn test_decode_fqdn_label_chars() {
        let (name, len) = decode_fqdn(&[5, b'h', b'o', b's', b't', b'-', 2, b'a', b'_', 0]).unwrap();
        assert_eq!(name, "host-.a_");
        assert_eq!(len, 10);

        for wire in [[3, b'a', b'.', b'b', 0], [3, b'a', b' ', b'b', 0], [3, b'a', 0xc3, 0xa9, 0]] {
            match decode_fqdn(&wire) {
                Err(DhcpError::InvalidValue(_)) => {}
                res => assert!(false, "Unexpected for {:?}: {:?}", wire, res),
            }
        }
    }
}
