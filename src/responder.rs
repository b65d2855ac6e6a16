use crate::priv_prelude::*;
use crate::socket::Transport;

/// A decoded address-mask request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskRequest {
    /// Address of the requesting host; the reply goes back here.
    pub source: Ipv4Addr,
    /// TTL of the request datagram on arrival.
    pub ttl: u8,
    /// Sequence number from the request header.
    pub sequence_number: u16,
    /// Request payload read as an address, `0.0.0.0` when shorter than four
    /// bytes. Short requests are still answered.
    pub probe_addr: Ipv4Addr,
    /// ICMP segment length (datagram minus the IP header).
    pub segment_len: usize,
}

/// Answers every address-mask request with a configured subnet mask.
///
/// Runs forever: listen, validate, reply, listen again. Anything that is not
/// a well-formed address-mask request is discarded, and a failed reply send
/// only costs that one reply.
pub struct Responder<T> {
    transport: T,
    mask: Ipv4Addr,
}

impl<T: Transport> Responder<T> {
    pub fn new(transport: T, mask: Ipv4Addr) -> Responder<T> {
        Responder { transport, mask }
    }

    /// Serve requests until the socket itself fails.
    pub async fn run(&mut self) -> io::Result<Infallible> {
        let mut buffer = vec![0u8; MAX_DATAGRAM_LEN];
        loop {
            let len = self.transport.recv(&mut buffer).await?;
            let datagram = Bytes::copy_from_slice(&buffer[..len]);
            let request = match parse_request(datagram) {
                Some(request) => request,
                None => continue,
            };
            println!(
                "{} bytes from {}: icmp_seq={}, ttl = {}, ip = {}",
                request.segment_len,
                request.source,
                request.sequence_number,
                request.ttl,
                request.probe_addr,
            );

            let header = IcmpHeader::address_mask(wire::ADDRESS_MASK_REPLY);
            let reply = wire::encode(&header, &self.mask.octets());
            if let Err(err) = self.transport.send_to(&reply, request.source).await {
                warn!("failed to send reply to {}: {}", request.source, err);
            }
        }
    }
}

/// Interpret a received datagram as an address-mask request; `None` for
/// malformed datagrams and every other ICMP type.
fn parse_request(datagram: Bytes) -> Option<MaskRequest> {
    let len = datagram.len();
    let (ipv4_header, icmp_header, payload) = match wire::decode(datagram) {
        Ok(parts) => parts,
        Err(err) => {
            debug!("discarding datagram: {}", err);
            return None;
        }
    };
    if icmp_header.ty != wire::ADDRESS_MASK_REQUEST {
        debug!("ignoring ICMP type {}", icmp_header.ty);
        return None;
    }
    let probe_addr = if payload.len() >= 4 {
        Ipv4Addr::new(payload[0], payload[1], payload[2], payload[3])
    } else {
        Ipv4Addr::UNSPECIFIED
    };
    Some(MaskRequest {
        source: ipv4_header.source_addr(),
        ttl: ipv4_header.ttl(),
        sequence_number: icmp_header.sequence_number,
        probe_addr,
        segment_len: len - ipv4_header.header_len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use net_literals::ipv4;

    fn request_datagram(source: Ipv4Addr, ttl: u8, ty: u8, payload: &[u8]) -> Bytes {
        let segment = wire::encode(&IcmpHeader::address_mask(ty), payload);
        let mut buffer = BytesMut::zeroed(20 + segment.len());
        buffer[0] = 0x45;
        let total_len = buffer.len() as u16;
        buffer[2..4].copy_from_slice(&total_len.to_be_bytes());
        buffer[8] = ttl;
        buffer[9] = 1;
        buffer[12..16].copy_from_slice(&source.octets());
        buffer[16..20].copy_from_slice(&[192, 168, 54, 1]);
        buffer[20..].copy_from_slice(&segment);
        buffer.freeze()
    }

    #[test]
    fn parses_a_valid_request() {
        let source = ipv4!("192.168.54.11");
        let datagram =
            request_datagram(source, 64, wire::ADDRESS_MASK_REQUEST, &[192, 168, 54, 11]);
        let request = parse_request(datagram).unwrap();
        assert_eq!(request.source, source);
        assert_eq!(request.ttl, 64);
        assert_eq!(request.sequence_number, 0);
        assert_eq!(request.probe_addr, ipv4!("192.168.54.11"));
        assert_eq!(request.segment_len, 12);
    }

    #[test]
    fn echo_requests_are_not_answered() {
        let source = ipv4!("192.168.54.11");
        // Standard ping, type 8. Must be silently dropped.
        let datagram = request_datagram(source, 64, 8, &[0; 4]);
        assert_eq!(parse_request(datagram), None);
    }

    #[test]
    fn short_payload_reads_as_unspecified() {
        let source = ipv4!("192.168.54.11");
        let datagram = request_datagram(source, 64, wire::ADDRESS_MASK_REQUEST, &[1, 2]);
        let request = parse_request(datagram).unwrap();
        assert_eq!(request.probe_addr, Ipv4Addr::UNSPECIFIED);
    }

    #[test]
    fn corrupt_requests_are_dropped() {
        let source = ipv4!("192.168.54.11");
        let datagram =
            request_datagram(source, 64, wire::ADDRESS_MASK_REQUEST, &[192, 168, 54, 11]);
        let mut corrupted = BytesMut::from(&datagram[..]);
        corrupted[21] ^= 0xff;
        assert_eq!(parse_request(corrupted.freeze()), None);
    }
}
