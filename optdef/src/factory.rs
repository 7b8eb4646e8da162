//
// DHCP-RS - Option Definition
//   Copyright (C) 2024-2025, Toshiaki Takada
//
// Factory:
//  Build option instances of well known formats from a wire buffer.
//

use log::trace;

use common::*;
use common::option::GenericOption;

use crate::codec::IntType;
use crate::options::*;

/// Check the caller's universe against the one a factory is written for.
pub fn sanity_check_universe(expected: Universe, actual: Universe) -> Result<(), DhcpError> {
    if expected != actual {
        Err(DhcpError::UniverseMismatch { expected, actual })
    } else {
        Ok(())
    }
}

/// Option without data.
pub fn factory_empty(universe: Universe, code: u16) -> DhcpOption {
    trace!("factory_empty {:?} {}", universe, code);
    DhcpOption::Generic(GenericOption::new(universe, code, Vec::new()))
}

/// Option with an opaque payload.
pub fn factory_generic(universe: Universe, code: u16, data: &[u8]) -> DhcpOption {
    trace!("factory_generic {:?} {} len {}", universe, code, data.len());
    DhcpOption::Generic(GenericOption::new(universe, code, data.to_vec()))
}

/// DHCPv4 option with a list of IPv4 addresses.
pub fn factory_addr_list4(universe: Universe, code: u16, data: &[u8]) -> Result<DhcpOption, DhcpError> {
    sanity_check_universe(Universe::V4, universe)?;
    Ok(DhcpOption::AddrList4(OptionAddrList4::new_from(code, data)?))
}

/// DHCPv6 option with a list of IPv6 addresses.
pub fn factory_addr_list6(universe: Universe, code: u16, data: &[u8]) -> Result<DhcpOption, DhcpError> {
    sanity_check_universe(Universe::V6, universe)?;
    Ok(DhcpOption::AddrList6(OptionAddrList6::new_from(code, data)?))
}

/// DHCPv6 IA_NA or IA_PD, exactly 12 bytes.
pub fn factory_ia6(universe: Universe, code: u16, data: &[u8]) -> Result<DhcpOption, DhcpError> {
    sanity_check_universe(Universe::V6, universe)?;
    Ok(DhcpOption::Ia(OptionIa::new_from(code, data)?))
}

/// DHCPv6 IAADDR, exactly 24 bytes.
pub fn factory_iaaddr6(universe: Universe, code: u16, data: &[u8]) -> Result<DhcpOption, DhcpError> {
    sanity_check_universe(Universe::V6, universe)?;
    Ok(DhcpOption::IaAddr(OptionIaAddr::new_from(code, data)?))
}

/// Option with a single integer of type T.
pub fn factory_integer<T: IntType>(universe: Universe, code: u16, data: &[u8]) -> Result<DhcpOption, DhcpError> {
    trace!("factory_integer {:?} {} {}", universe, code, T::TYPE);
    Ok(DhcpOption::Int(OptionInt::new_from::<T>(universe, code, data)?))
}

/// Option with an array of integers of type T.
pub fn factory_integer_array<T: IntType>(universe: Universe, code: u16, data: &[u8]) -> Result<DhcpOption, DhcpError> {
    trace!("factory_integer_array {:?} {} {}", universe, code, T::TYPE);
    Ok(DhcpOption::IntArray(OptionIntArray::new_from::<T>(universe, code, data)?))
}

///
/// Unit tests.
///
#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::IntValue;

    #[test]
    pub fn test_factory_empty() {
        let opt = factory_empty(Universe::V6, 14);
        assert_eq!(opt.code(), 14);
        assert_eq!(opt.universe(), Universe::V6);
        assert!(opt.data().unwrap().is_empty());
    }

    #[test]
    pub fn test_factory_generic() {
        let opt = factory_generic(Universe::V4, 43, &[1, 2, 3]);
        assert_eq!(opt.data().unwrap(), [1, 2, 3]);
    }

    #[test]
    pub fn test_factory_addr_list4() {
        let data: [u8; 8] = [10, 0, 0, 1, 10, 0, 0, 2];
        match factory_addr_list4(Universe::V4, 3, &data) {
            Ok(DhcpOption::AddrList4(opt)) => assert_eq!(opt.addrs().len(), 2),
            res => assert!(false, "Unexpected: {:?}", res),
        }

        match factory_addr_list4(Universe::V4, 3, &data[..7]) {
            Err(DhcpError::SizeMismatch(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }

        match factory_addr_list4(Universe::V6, 3, &data) {
            Err(DhcpError::UniverseMismatch { expected: Universe::V4, actual: Universe::V6 }) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }

    #[test]
    pub fn test_factory_addr_list6() {
        let data = [0u8; 32];
        match factory_addr_list6(Universe::V6, 23, &data) {
            Ok(DhcpOption::AddrList6(opt)) => assert_eq!(opt.addrs().len(), 2),
            res => assert!(false, "Unexpected: {:?}", res),
        }

        match factory_addr_list6(Universe::V6, 23, &data[..20]) {
            Err(DhcpError::SizeMismatch(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }

        match factory_addr_list6(Universe::V4, 23, &data) {
            Err(DhcpError::UniverseMismatch { .. }) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }

    #[test]
    pub fn test_factory_ia6() {
        let data: [u8; 13] = [0, 0, 0, 1, 0, 0, 0x0e, 0x10, 0, 0, 0x1c, 0x20, 0];
        match factory_ia6(Universe::V6, 3, &data[..12]) {
            Ok(DhcpOption::Ia(opt)) => {
                assert_eq!(opt.iaid, 1);
                assert_eq!(opt.t1, 3600);
                assert_eq!(opt.t2, 7200);
            }
            res => assert!(false, "Unexpected: {:?}", res),
        }

        for len in [11, 13] {
            match factory_ia6(Universe::V6, 3, &data[..len]) {
                Err(DhcpError::SizeMismatch(_)) => {}
                res => assert!(false, "Unexpected for {}: {:?}", len, res),
            }
        }

        match factory_ia6(Universe::V4, 3, &data[..12]) {
            Err(DhcpError::UniverseMismatch { .. }) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }

    #[test]
    pub fn test_factory_iaaddr6() {
        let mut data = vec![0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
        data.extend_from_slice(&[0, 0, 0x0e, 0x10, 0, 0, 0x1c, 0x20]);
        match factory_iaaddr6(Universe::V6, 5, &data) {
            Ok(DhcpOption::IaAddr(opt)) => {
                assert_eq!(opt.addr, "2001:db8::1".parse::<std::net::Ipv6Addr>().unwrap());
                assert_eq!(opt.preferred, 3600);
                assert_eq!(opt.valid, 7200);
            }
            res => assert!(false, "Unexpected: {:?}", res),
        }

        match factory_iaaddr6(Universe::V6, 5, &data[..23]) {
            Err(DhcpError::SizeMismatch(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }

        match factory_iaaddr6(Universe::V4, 5, &data) {
            Err(DhcpError::UniverseMismatch { .. }) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }

    #[test]
    pub fn test_factory_integer() {
        let data: [u8; 5] = [0x12, 0x34, 0x56, 0x78, 0x9a];
        match factory_integer::<u32>(Universe::V4, 51, &data[..4]) {
            Ok(DhcpOption::Int(opt)) => assert_eq!(opt.value(), IntValue::U32(0x12345678)),
            res => assert!(false, "Unexpected: {:?}", res),
        }

        for len in [3, 5] {
            match factory_integer::<u32>(Universe::V4, 51, &data[..len]) {
                Err(DhcpError::SizeMismatch(_)) => {}
                res => assert!(false, "Unexpected for {}: {:?}", len, res),
            }
        }

        match factory_integer::<i16>(Universe::V6, 100, &[0xff, 0xfe]) {
            Ok(DhcpOption::Int(opt)) => assert_eq!(opt.value(), IntValue::I16(-2)),
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }

    #[test]
    pub fn test_factory_integer_array() {
        let data: [u8; 3] = [1, 3, 6];
        match factory_integer_array::<u8>(Universe::V4, 55, &data) {
            Ok(DhcpOption::IntArray(opt)) => {
                assert_eq!(opt.values(), [IntValue::U8(1), IntValue::U8(3), IntValue::U8(6)]);
            }
            res => assert!(false, "Unexpected: {:?}", res),
        }

        match factory_integer_array::<u16>(Universe::V6, 6, &data) {
            Err(DhcpError::SizeMismatch(_)) => {}
            res => assert!(false, "Unexpected: {:?}", res),
        }
    }
}
