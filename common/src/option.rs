//
// DHCP-RS - Common
//   Copyright (C) 2024-2025, Toshiaki Takada
//
// Option:
//  Generic option container.  It knows nothing about the payload, only how
//  to frame it with a code and length header for its universe.
//

use crate::*;
use crate::encode::*;

/// DHCPv4 Option header length.
const DHCP4_OPTION_HLEN: usize = 2;

/// DHCPv6 Option header length.
const DHCP6_OPTION_HLEN: usize = 4;

/// DHCPv4 Pad and End options, which carry no length field.
const DHCP4_OPTION_PAD: u8 = 0;
const DHCP4_OPTION_END: u8 = 255;

/// Return option header length for a universe.
pub fn option_header_len(universe: Universe) -> usize {
    match universe {
        Universe::V4 => DHCP4_OPTION_HLEN,
        Universe::V6 => DHCP6_OPTION_HLEN,
    }
}

/// Opaque option, code and raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericOption {
    /// Universe.
    universe: Universe,

    /// Option code.
    code: u16,

    /// Payload.
    data: Vec<u8>,
}

impl GenericOption {
    pub fn new(universe: Universe, code: u16, data: Vec<u8>) -> GenericOption {
        GenericOption {
            universe,
            code,
            data,
        }
    }

    pub fn universe(&self) -> Universe {
        self.universe
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Write option with header into buffer.
    pub fn pack(&self, buf: &mut Vec<u8>) -> Result<usize, DhcpError> {
        pack_option(self.universe, self.code, &self.data, buf)
    }
}

/// Write code, length and payload into buffer.
pub fn pack_option(universe: Universe, code: u16, data: &[u8], buf: &mut Vec<u8>) -> Result<usize, DhcpError> {
    match universe {
        Universe::V4 => {
            if code > u8::MAX as u16 {
                return Err(DhcpError::EncodeError(format!("DHCPv4 option code {} > 255", code)))
            }
            if data.len() > u8::MAX as usize {
                return Err(DhcpError::EncodeError(format!("DHCPv4 option {} payload too long {}", code, data.len())))
            }
            encode_u8(buf, code as u8);
            encode_u8(buf, data.len() as u8);
        }
        Universe::V6 => {
            if data.len() > u16::MAX as usize {
                return Err(DhcpError::EncodeError(format!("DHCPv6 option {} payload too long {}", code, data.len())))
            }
            encode_u16(buf, code);
            encode_u16(buf, data.len() as u16);
        }
    }
    encode_data(buf, data);

    Ok(option_header_len(universe) + data.len())
}

/// Parse back-to-back options from buffer.
pub fn unpack_options(universe: Universe, buf: &[u8]) -> Result<Vec<GenericOption>, DhcpError> {
    let hlen = option_header_len(universe);
    let mut vec = Vec::new();
    let mut b = buf;

    while b.len() > 0 {
        if universe == Universe::V4 {
            if b[0] == DHCP4_OPTION_PAD {
                b = &b[1..];
                continue;
            }
            if b[0] == DHCP4_OPTION_END {
                break;
            }
        }
        if b.len() < hlen {
            return Err(DhcpError::DecodeError(format!("truncated option header, {} bytes left", b.len())))
        }

        let (code, len) = match universe {
            Universe::V4 => (decode_u8(b)? as u16, decode_u8(&b[1..])? as usize),
            Universe::V6 => (decode_u16(b)?, decode_u16(&b[2..])? as usize),
        };
        if b.len() < hlen + len {
            return Err(DhcpError::DecodeError(format!("option {} length {} exceeds buffer {}", code, len, b.len() - hlen)))
        }

        vec.push(GenericOption::new(universe, code, b[hlen..hlen + len].to_vec()));
        b = &b[hlen + len..];
    }

    Ok(vec)
}
