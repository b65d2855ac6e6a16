//! The packet codec: IPv4/ICMP header representations, the Internet checksum
//! and the encode/decode entry points. Pure, no I/O.

pub mod checksum;

mod icmp;
mod ipv4;

pub use self::icmp::{
    encode, IcmpHeader, ADDRESS_MASK_REPLY, ADDRESS_MASK_REQUEST, ICMP_HEADER_LEN,
};
pub use self::ipv4::Ipv4Header;

use crate::priv_prelude::*;
use thiserror::Error;

const IPV4_HEADER_MIN_LEN: usize = 20;

/// Why a received datagram could not be interpreted.
///
/// Either kind means "discard and keep listening"; the state machines never
/// surface these to their callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("datagram shorter than its declared headers")]
    Truncated,
    #[error("ICMP checksum mismatch")]
    ChecksumMismatch,
}

/// Split a received IP datagram into its IPv4 header, ICMP header and ICMP
/// payload, verifying the ICMP checksum along the way.
pub fn decode(datagram: Bytes) -> Result<(Ipv4Header, IcmpHeader, Bytes), ParseError> {
    if datagram.len() < IPV4_HEADER_MIN_LEN {
        return Err(ParseError::Truncated);
    }
    let header_len = (datagram[0] & 0x0f) as usize * 4;
    if header_len < IPV4_HEADER_MIN_LEN || datagram.len() < header_len + ICMP_HEADER_LEN {
        return Err(ParseError::Truncated);
    }

    let segment = datagram.slice(header_len..);
    // A valid segment, stored checksum included, sums to 0xffff.
    if checksum::data(&segment) != !0 {
        return Err(ParseError::ChecksumMismatch);
    }

    let ipv4_header = Ipv4Header::from_bytes(datagram.slice(..header_len));
    let icmp_header = IcmpHeader::from_bytes(&segment);
    let payload = segment.slice(ICMP_HEADER_LEN..);
    Ok((ipv4_header, icmp_header, payload))
}
