//
// DHCP-RS - Option Definition
//   Copyright (C) 2024-2025, Toshiaki Takada
//

use std::fmt;
use std::mem::size_of;
use std::net::{Ipv4Addr, Ipv6Addr};

use common::*;
use common::encode::*;
use common::option::*;

use crate::codec::*;
use crate::data_type::ScalarType;
use crate::definition::OptionDefinition;

/// DHCPv6 IA_NA/IA_PD payload length.
pub const OPTION6_IA_LEN: usize = 12;

/// DHCPv6 IAADDR payload length.
pub const OPTION6_IAADDR_LEN: usize = 24;

/// Option carrying a list of IPv4 addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionAddrList4 {
    code: u16,
    addrs: Vec<Ipv4Addr>,
}

impl OptionAddrList4 {
    pub fn new_from(code: u16, data: &[u8]) -> Result<OptionAddrList4, DhcpError> {
        let size = size_of::<Ipv4Addr>();
        if data.len() % size != 0 {
            return Err(DhcpError::SizeMismatch(format!("IPv4 address list length {} is not a multiple of {}", data.len(), size)))
        }

        let mut addrs = Vec::new();
        for offset in (0..data.len()).step_by(size) {
            addrs.push(decode_ipv4(&data[offset..])?);
        }
        Ok(OptionAddrList4 { code, addrs })
    }

    pub fn addrs(&self) -> &[Ipv4Addr] {
        &self.addrs
    }
}

/// Option carrying a list of IPv6 addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionAddrList6 {
    code: u16,
    addrs: Vec<Ipv6Addr>,
}

impl OptionAddrList6 {
    pub fn new_from(code: u16, data: &[u8]) -> Result<OptionAddrList6, DhcpError> {
        let size = size_of::<Ipv6Addr>();
        if data.len() % size != 0 {
            return Err(DhcpError::SizeMismatch(format!("IPv6 address list length {} is not a multiple of {}", data.len(), size)))
        }

        let mut addrs = Vec::new();
        for offset in (0..data.len()).step_by(size) {
            addrs.push(decode_ipv6(&data[offset..])?);
        }
        Ok(OptionAddrList6 { code, addrs })
    }

    pub fn addrs(&self) -> &[Ipv6Addr] {
        &self.addrs
    }
}

/// DHCPv6 Identity Association (IA_NA, IA_PD).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionIa {
    pub code: u16,

    /// Identity Association ID.
    pub iaid: u32,

    /// Renew time.
    pub t1: u32,

    /// Rebind time.
    pub t2: u32,
}

impl OptionIa {
    pub fn new_from(code: u16, data: &[u8]) -> Result<OptionIa, DhcpError> {
        if data.len() != OPTION6_IA_LEN {
            return Err(DhcpError::SizeMismatch(format!("IA option {} length {}, expected {}", code, data.len(), OPTION6_IA_LEN)))
        }

        Ok(OptionIa {
            code,
            iaid: decode_u32(data)?,
            t1: decode_u32(&data[4..])?,
            t2: decode_u32(&data[8..])?,
        })
    }
}

/// DHCPv6 IA Address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionIaAddr {
    pub code: u16,

    /// IPv6 address.
    pub addr: Ipv6Addr,

    /// Preferred lifetime.
    pub preferred: u32,

    /// Valid lifetime.
    pub valid: u32,
}

impl OptionIaAddr {
    pub fn new_from(code: u16, data: &[u8]) -> Result<OptionIaAddr, DhcpError> {
        if data.len() != OPTION6_IAADDR_LEN {
            return Err(DhcpError::SizeMismatch(format!("IAADDR option {} length {}, expected {}", code, data.len(), OPTION6_IAADDR_LEN)))
        }

        Ok(OptionIaAddr {
            code,
            addr: decode_ipv6(data)?,
            preferred: decode_u32(&data[16..])?,
            valid: decode_u32(&data[20..])?,
        })
    }
}

/// Option carrying a single integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionInt {
    universe: Universe,
    code: u16,
    value: IntValue,
}

impl OptionInt {
    pub fn new_from<T: IntType>(universe: Universe, code: u16, data: &[u8]) -> Result<OptionInt, DhcpError> {
        if data.len() != T::WIDTH {
            return Err(DhcpError::SizeMismatch(format!("option {} length {}, expected {} for {}", code, data.len(), T::WIDTH, T::TYPE)))
        }

        Ok(OptionInt {
            universe,
            code,
            value: T::from_be_slice(data).into(),
        })
    }

    pub fn value(&self) -> IntValue {
        self.value
    }
}

/// Option carrying an array of integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionIntArray {
    universe: Universe,
    code: u16,
    values: Vec<IntValue>,
}

impl OptionIntArray {
    pub fn new_from<T: IntType>(universe: Universe, code: u16, data: &[u8]) -> Result<OptionIntArray, DhcpError> {
        if data.is_empty() || data.len() % T::WIDTH != 0 {
            return Err(DhcpError::SizeMismatch(format!("option {} length {} is not a positive multiple of {} for {}", code, data.len(), T::WIDTH, T::TYPE)))
        }

        let values = data.chunks(T::WIDTH)
            .map(|chunk| T::from_be_slice(chunk).into())
            .collect();
        Ok(OptionIntArray { universe, code, values })
    }

    pub fn values(&self) -> &[IntValue] {
        &self.values
    }
}

/// Option laid out by its definition: a record, a non integer scalar, or
/// an array of any type.  Data fields are kept in wire form and decoded
/// on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionCustom {
    universe: Universe,
    code: u16,

    /// Data fields with their types, in wire order.
    fields: Vec<(ScalarType, Vec<u8>)>,

    /// Sub-options of the encapsulated space.
    options: Vec<GenericOption>,
}

impl OptionCustom {
    /// Split data into fields described by the definition.
    ///
    /// The definition must have passed validation.
    pub fn new_from(def: &OptionDefinition, universe: Universe, code: u16, data: &[u8]) -> Result<OptionCustom, DhcpError> {
        let mut fields = Vec::new();
        let mut b = data;

        if def.array_type() {
            while b.len() > 0 {
                b = take_field(def.option_type(), b, &mut fields)?;
            }
        } else if def.option_type() == ScalarType::Record {
            for t in def.record_fields() {
                b = take_field(*t, b, &mut fields)?;
            }
        } else if def.option_type() != ScalarType::Empty {
            b = take_field(def.option_type(), b, &mut fields)?;
        }

        let options = if def.encapsulated_space().is_some() {
            unpack_options(universe, b)?
        } else if b.len() > 0 {
            return Err(DhcpError::SizeMismatch(format!("option {} has {} bytes past its data fields", code, b.len())))
        } else {
            Vec::new()
        };

        Ok(OptionCustom { universe, code, fields, options })
    }

    pub fn fields_count(&self) -> usize {
        self.fields.len()
    }

    /// Decode data field at index.
    pub fn read_value(&self, index: usize) -> Result<Value, DhcpError> {
        match self.fields.get(index) {
            Some((t, data)) => Ok(decode_value(data, *t)?.0),
            None => Err(DhcpError::InvalidValue(format!("option {} has no data field {}", self.code, index))),
        }
    }

    /// Decode all data fields.
    pub fn values(&self) -> Result<Vec<Value>, DhcpError> {
        (0..self.fields.len()).map(|i| self.read_value(i)).collect()
    }

    pub fn options(&self) -> &[GenericOption] {
        &self.options
    }
}

/// Split the next field of type t off the front of data, check its value
/// and keep it.  Return the rest of data.
fn take_field<'a>(t: ScalarType, data: &'a [u8], fields: &mut Vec<(ScalarType, Vec<u8>)>) -> Result<&'a [u8], DhcpError> {
    let len = field_len(t, data)?;
    decode_value(&data[..len], t)?;
    fields.push((t, data[..len].to_vec()));
    Ok(&data[len..])
}

/// Number of bytes the next field of type t takes at the front of data.
/// A string takes the rest, which may be empty.
fn field_len(t: ScalarType, data: &[u8]) -> Result<usize, DhcpError> {
    match t {
        ScalarType::String => Ok(data.len()),
        ScalarType::Fqdn => Ok(decode_fqdn(data)?.1),
        _ => match t.width() {
            Some(width) if data.len() >= width => Ok(width),
            Some(width) => {
                Err(DhcpError::SizeMismatch(format!("{} bytes too short for {} of {} bytes", data.len(), t, width)))
            }
            None => Err(DhcpError::InvalidValue(format!("data field of type {} has no length", t))),
        },
    }
}

/// DHCP option instances produced by the factories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DhcpOption {
    /// Opaque payload.
    Generic(GenericOption),

    /// List of IPv4 addresses.
    AddrList4(OptionAddrList4),

    /// List of IPv6 addresses.
    AddrList6(OptionAddrList6),

    /// DHCPv6 IA_NA or IA_PD.
    Ia(OptionIa),

    /// DHCPv6 IAADDR.
    IaAddr(OptionIaAddr),

    /// Single integer.
    Int(OptionInt),

    /// Array of integers.
    IntArray(OptionIntArray),

    /// Laid out by an option definition.
    Custom(OptionCustom),
}

impl DhcpOption {
    pub fn universe(&self) -> Universe {
        match self {
            DhcpOption::Generic(o) => o.universe(),
            DhcpOption::AddrList4(_) => Universe::V4,
            DhcpOption::AddrList6(_) |
            DhcpOption::Ia(_) |
            DhcpOption::IaAddr(_) => Universe::V6,
            DhcpOption::Int(o) => o.universe,
            DhcpOption::IntArray(o) => o.universe,
            DhcpOption::Custom(o) => o.universe,
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            DhcpOption::Generic(o) => o.code(),
            DhcpOption::AddrList4(o) => o.code,
            DhcpOption::AddrList6(o) => o.code,
            DhcpOption::Ia(o) => o.code,
            DhcpOption::IaAddr(o) => o.code,
            DhcpOption::Int(o) => o.code,
            DhcpOption::IntArray(o) => o.code,
            DhcpOption::Custom(o) => o.code,
        }
    }

    /// Return payload in wire form, without option header.
    pub fn data(&self) -> Result<Vec<u8>, DhcpError> {
        let mut buf = Vec::new();
        match self {
            DhcpOption::Generic(o) => {
                encode_data(&mut buf, o.data());
            }
            DhcpOption::AddrList4(o) => {
                for addr in &o.addrs {
                    encode_ipv4(&mut buf, *addr);
                }
            }
            DhcpOption::AddrList6(o) => {
                for addr in &o.addrs {
                    encode_ipv6(&mut buf, *addr);
                }
            }
            DhcpOption::Ia(o) => {
                encode_u32(&mut buf, o.iaid);
                encode_u32(&mut buf, o.t1);
                encode_u32(&mut buf, o.t2);
            }
            DhcpOption::IaAddr(o) => {
                encode_ipv6(&mut buf, o.addr);
                encode_u32(&mut buf, o.preferred);
                encode_u32(&mut buf, o.valid);
            }
            DhcpOption::Int(o) => {
                o.value.encode(&mut buf);
            }
            DhcpOption::IntArray(o) => {
                for v in &o.values {
                    v.encode(&mut buf);
                }
            }
            DhcpOption::Custom(o) => {
                for (_, data) in &o.fields {
                    encode_data(&mut buf, data);
                }
                for sub in &o.options {
                    sub.pack(&mut buf)?;
                }
            }
        }
        Ok(buf)
    }

    /// Write option with header into buffer.
    pub fn pack(&self, buf: &mut Vec<u8>) -> Result<usize, DhcpError> {
        pack_option(self.universe(), self.code(), &self.data()?, buf)
    }
}

impl fmt::Display for DhcpOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

///
/// Unit tests.
///
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_option_addr_list4() {
        let data: [u8; 8] = [192, 168, 1, 1, 192, 168, 1, 2];
        match OptionAddrList4::new_from(3, &data) {
            Err(e) => assert!(false, "Error: {:?}", e),
            Ok(opt) => {
                assert_eq!(opt.addrs(), [
                    "192.168.1.1".parse::<Ipv4Addr>().unwrap(),
                    "192.168.1.2".parse::<Ipv4Addr>().unwrap()
                ]);
            }
        }

        match OptionAddrList4::new_from(3, &data[..7]) {
            Err(DhcpError::SizeMismatch(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }

    #[test]
    pub fn test_option_int() {
        let data: [u8; 2] = [0x12, 0x34];
        let opt = OptionInt::new_from::<u16>(Universe::V6, 8, &data).unwrap();
        assert_eq!(opt.value(), IntValue::U16(0x1234));

        match OptionInt::new_from::<u16>(Universe::V6, 8, &data[..1]) {
            Err(DhcpError::SizeMismatch(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }

    #[test]
    pub fn test_option_int_array() {
        let data: [u8; 4] = [0x00, 0x17, 0x00, 0x18];
        let opt = OptionIntArray::new_from::<u16>(Universe::V6, 6, &data).unwrap();
        assert_eq!(opt.values(), [IntValue::U16(23), IntValue::U16(24)]);

        match OptionIntArray::new_from::<u16>(Universe::V6, 6, &[]) {
            Err(DhcpError::SizeMismatch(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }

    #[test]
    pub fn test_option_pack() {
        let opt = DhcpOption::Ia(OptionIa { code: 3, iaid: 1, t1: 2, t2: 3 });
        let mut buf = Vec::new();
        assert_eq!(opt.pack(&mut buf).unwrap(), 16);
        assert_eq!(buf, [0, 3, 0, 12, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3]);

        let opt = DhcpOption::Int(OptionInt::new_from::<u8>(Universe::V4, 23, &[64]).unwrap());
        let mut buf = Vec::new();
        assert_eq!(opt.pack(&mut buf).unwrap(), 3);
        assert_eq!(buf, [23, 1, 64]);
    }

    #[test]
    pub fn test_option_custom_record() {
        let mut def = OptionDefinition::new("foo", 100, ScalarType::Record, false);
        def.add_record_field(ScalarType::UInt16);
        def.add_record_field(ScalarType::Ipv4Address);
        def.add_record_field(ScalarType::String);

        let data: [u8; 9] = [0x00, 0x2a, 10, 0, 0, 1, b'a', b'b', b'c'];
        let opt = OptionCustom::new_from(&def, Universe::V4, 100, &data).unwrap();
        assert_eq!(opt.fields_count(), 3);
        assert_eq!(opt.read_value(0).unwrap(), Value::Int(IntValue::U16(42)));
        assert_eq!(opt.read_value(1).unwrap(), Value::Ipv4("10.0.0.1".parse().unwrap()));
        assert_eq!(opt.read_value(2).unwrap(), Value::String(String::from("abc")));

        match opt.read_value(3) {
            Err(DhcpError::InvalidValue(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }

        match OptionCustom::new_from(&def, Universe::V4, 100, &data[..5]) {
            Err(DhcpError::SizeMismatch(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }

    #[test]
    pub fn test_option_custom_trailing_bytes() {
        let def = OptionDefinition::new("bar", 101, ScalarType::Ipv4Address, false);
        let data: [u8; 5] = [10, 0, 0, 1, 7];
        match OptionCustom::new_from(&def, Universe::V4, 101, &data) {
            Err(DhcpError::SizeMismatch(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }

    #[test]
    pub fn test_option_custom_bad_field_value() {
        let def = OptionDefinition::new("ip-forwarding", 19, ScalarType::Boolean, false);
        match OptionCustom::new_from(&def, Universe::V4, 19, &[2]) {
            Err(DhcpError::InvalidValue(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
        assert_eq!(OptionCustom::new_from(&def, Universe::V4, 19, &[1]).unwrap().read_value(0).unwrap(),
                   Value::Bool(true));

        let def = OptionDefinition::new("host-name", 12, ScalarType::String, false);
        match OptionCustom::new_from(&def, Universe::V4, 12, &[b'a', 0xff]) {
            Err(DhcpError::InvalidValue(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }

    #[test]
    pub fn test_option_custom_suboptions() {
        let def = OptionDefinition::new_encapsulated("vendor", 43, ScalarType::Empty, "vendor-space");
        let data: [u8; 7] = [1, 2, 0xaa, 0xbb, 2, 1, 0xcc];
        let opt = DhcpOption::Custom(OptionCustom::new_from(&def, Universe::V4, 43, &data).unwrap());
        match &opt {
            DhcpOption::Custom(custom) => {
                assert_eq!(custom.fields_count(), 0);
                assert_eq!(custom.options().len(), 2);
                assert_eq!(custom.options()[1].data(), [0xcc]);
            }
            _ => assert!(false, "Unexpected: {:?}", opt),
        }
        assert_eq!(opt.data().unwrap(), data);
    }
}
