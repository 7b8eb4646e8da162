//
// DHCP-RS - Common
//   Copyright (C) 2024-2025, Toshiaki Takada
//
// Encode:
//  Low level utility functions to put arbitrary value into a growing buffer,
//  or get it back from a slice.  All integer values are network byte order
//  on the wire.
//

use std::mem::size_of;
use std::net::Ipv4Addr;
use std::net::Ipv6Addr;

use crate::DhcpError;

/// Append arbitrary number of bytes to buffer.
pub fn encode_data(buf: &mut Vec<u8>, data: &[u8]) -> usize {
    buf.extend_from_slice(data);
    data.len()
}

/// Encode u8 value into buffer.
pub fn encode_u8(buf: &mut Vec<u8>, v: u8) -> usize {
    buf.push(v);
    size_of::<u8>()
}

/// Encode u16 value into buffer.
pub fn encode_u16(buf: &mut Vec<u8>, v: u16) -> usize {
    encode_data(buf, &v.to_be_bytes())
}

/// Encode u32 value into buffer.
pub fn encode_u32(buf: &mut Vec<u8>, v: u32) -> usize {
    encode_data(buf, &v.to_be_bytes())
}

/// Encode IPv4 address into buffer.
pub fn encode_ipv4(buf: &mut Vec<u8>, v: Ipv4Addr) -> usize {
    encode_data(buf, &v.octets())
}

/// Encode IPv6 address into buffer.
pub fn encode_ipv6(buf: &mut Vec<u8>, v: Ipv6Addr) -> usize {
    encode_data(buf, &v.octets())
}

/// Return u8 value in host byte order.
pub fn decode_u8(data: &[u8]) -> Result<u8, DhcpError> {
    if data.len() < size_of::<u8>() {
        Err(DhcpError::InsufficientBufferSize(format!("data.len() == {:?} < size_of::<u8>() {:?}", data.len(), size_of::<u8>())))
    } else {
        Ok(data[0])
    }
}

/// Return u16 value in host byte order.
pub fn decode_u16(data: &[u8]) -> Result<u16, DhcpError> {
    if data.len() < size_of::<u16>() {
        Err(DhcpError::InsufficientBufferSize(format!("data.len() == {:?} < size_of::<u16>() {:?}", data.len(), size_of::<u16>())))
    } else {
        Ok((data[0] as u16) << 8 | data[1] as u16)
    }
}

/// Return u32 value in host byte order.
pub fn decode_u32(data: &[u8]) -> Result<u32, DhcpError> {
    if data.len() < size_of::<u32>() {
        Err(DhcpError::InsufficientBufferSize(format!("data.len() == {:?} < size_of::<u32>() {:?}", data.len(), size_of::<u32>())))
    } else {
        Ok((data[0] as u32) << 24 | (data[1] as u32) << 16 | (data[2] as u32) << 8 | data[3] as u32)
    }
}

/// Return Ipv4Addr.
pub fn decode_ipv4(data: &[u8]) -> Result<Ipv4Addr, DhcpError> {
    if data.len() < size_of::<Ipv4Addr>() {
        Err(DhcpError::InsufficientBufferSize(format!("data.len() == {:?} < size_of::<Ipv4Addr>() {:?}", data.len(), size_of::<Ipv4Addr>())))
    } else {
        Ok(Ipv4Addr::new(data[0], data[1], data[2], data[3]))
    }
}

/// Return Ipv6Addr.
pub fn decode_ipv6(data: &[u8]) -> Result<Ipv6Addr, DhcpError> {
    if data.len() < size_of::<Ipv6Addr>() {
        Err(DhcpError::InsufficientBufferSize(format!("data.len() == {:?} < size_of::<Ipv6Addr>() {:?}", data.len(), size_of::<Ipv6Addr>())))
    } else {
        let mut octets = [0u8; 16];
        octets.copy_from_slice(&data[..16]);
        Ok(Ipv6Addr::from(octets))
    }
}
