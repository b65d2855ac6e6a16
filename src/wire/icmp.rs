use crate::priv_prelude::*;

/// ICMP address-mask request, RFC 950 message type 17.
pub const ADDRESS_MASK_REQUEST: u8 = 17;
/// ICMP address-mask reply, RFC 950 message type 18.
pub const ADDRESS_MASK_REPLY: u8 = 18;

/// Length of the fixed ICMP header.
pub const ICMP_HEADER_LEN: usize = 8;

/// The fixed eight-byte ICMP header.
///
/// In the address-mask exchange `code`, `identifier` and `sequence_number`
/// are always zero on send; they are still parsed from received segments so
/// the sequence number can be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcmpHeader {
    pub ty: u8,
    pub code: u8,
    pub checksum: u16,
    pub identifier: u16,
    pub sequence_number: u16,
}

impl IcmpHeader {
    /// Header for an outgoing address-mask message of the given type. The
    /// checksum field is filled in by [`encode`].
    pub fn address_mask(ty: u8) -> IcmpHeader {
        IcmpHeader {
            ty,
            code: 0,
            checksum: 0,
            identifier: 0,
            sequence_number: 0,
        }
    }

    pub(crate) fn from_bytes(segment: &[u8]) -> IcmpHeader {
        IcmpHeader {
            ty: segment[0],
            code: segment[1],
            checksum: u16::from_be_bytes([segment[2], segment[3]]),
            identifier: u16::from_be_bytes([segment[4], segment[5]]),
            sequence_number: u16::from_be_bytes([segment[6], segment[7]]),
        }
    }
}

/// Serialize an ICMP segment: header fields in network byte order, payload
/// appended, checksum computed over the whole segment with the checksum field
/// zeroed and then written at offset 2.
pub fn encode(header: &IcmpHeader, payload: &[u8]) -> Bytes {
    let mut buffer = BytesMut::zeroed(ICMP_HEADER_LEN + payload.len());
    buffer[0] = header.ty;
    buffer[1] = header.code;
    buffer[4..6].copy_from_slice(&header.identifier.to_be_bytes());
    buffer[6..8].copy_from_slice(&header.sequence_number.to_be_bytes());
    buffer[ICMP_HEADER_LEN..].copy_from_slice(payload);

    let checksum = !checksum::data(&buffer);
    buffer[2..4].copy_from_slice(&checksum.to_be_bytes());
    buffer.freeze()
}
