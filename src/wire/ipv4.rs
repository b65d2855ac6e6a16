use crate::priv_prelude::*;

/// Read-only view of an IPv4 header at the front of a received datagram.
///
/// Raw ICMP sockets hand us whole IP datagrams on receive but the kernel
/// writes the IP header on send, so this type is only ever parsed, never
/// built.
#[derive(Clone, PartialEq)]
pub struct Ipv4Header {
    buffer: Bytes,
}

impl fmt::Debug for Ipv4Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Ipv4Header")
            .field("source_addr", &self.source_addr())
            .field("dest_addr", &self.dest_addr())
            .field("ttl", &self.ttl())
            .field("protocol", &self.protocol())
            .finish()
    }
}

impl Ipv4Header {
    /// Wrap the header bytes of a datagram. The caller (the codec's `decode`)
    /// has already checked that the buffer covers the declared header length.
    pub(crate) fn from_bytes(buffer: Bytes) -> Ipv4Header {
        Ipv4Header { buffer }
    }

    pub fn version(&self) -> u8 {
        self.buffer[0] >> 4
    }

    /// Header length in bytes (low nibble of the first byte, times four).
    pub fn header_len(&self) -> usize {
        (self.buffer[0] & 0x0f) as usize * 4
    }

    pub fn total_len(&self) -> u16 {
        u16::from_be_bytes([self.buffer[2], self.buffer[3]])
    }

    pub fn ttl(&self) -> u8 {
        self.buffer[8]
    }

    pub fn protocol(&self) -> u8 {
        self.buffer[9]
    }

    pub fn checksum(&self) -> u16 {
        u16::from_be_bytes([self.buffer[10], self.buffer[11]])
    }

    pub fn source_addr(&self) -> Ipv4Addr {
        Ipv4Addr::new(
            self.buffer[12],
            self.buffer[13],
            self.buffer[14],
            self.buffer[15],
        )
    }

    pub fn dest_addr(&self) -> Ipv4Addr {
        Ipv4Addr::new(
            self.buffer[16],
            self.buffer[17],
            self.buffer[18],
            self.buffer[19],
        )
    }
}
