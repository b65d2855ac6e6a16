use crate::priv_prelude::*;
use crate::socket::Transport;
use net_literals::ipv4;

/// How long to wait for a reply before declaring a timeout.
pub const REPLY_TIMEOUT: Duration = Duration::from_secs(5);
/// Pause between a timeout notice and the next request.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Probe value carried in the request payload when none is configured.
const DEFAULT_PROBE_ADDR: Ipv4Addr = ipv4!("192.168.54.11");

/// Where the requester is in its exchange. Transitions happen in exactly one
/// place, the dispatch loop in [`Requester::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequesterState {
    Idle,
    Sending,
    AwaitingReply { deadline: Instant },
    TimedOut { retry_at: Instant },
    Replied,
}

/// A decoded address-mask reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskReply {
    /// The subnet mask carried in the reply payload.
    pub mask: Ipv4Addr,
    /// Address of the host that answered.
    pub source: Ipv4Addr,
    /// TTL of the reply datagram on arrival.
    pub ttl: u8,
    /// Sequence number echoed in the reply header.
    pub sequence_number: u16,
    /// ICMP segment length (datagram minus the IP header).
    pub segment_len: usize,
}

/// Sends address-mask requests to one destination and waits for the mask.
///
/// One exchange: send the request, wait up to [`REPLY_TIMEOUT`] for a valid
/// reply while discarding unrelated ICMP traffic, and on timeout print a
/// notice, pause [`RETRY_DELAY`] and send again. There is no retry limit; the
/// first valid reply ends the exchange.
pub struct Requester<T> {
    transport: T,
    destination: Ipv4Addr,
    probe_addr: Ipv4Addr,
    state: RequesterState,
}

impl<T: Transport> Requester<T> {
    pub fn new(transport: T, destination: Ipv4Addr) -> Requester<T> {
        Requester {
            transport,
            destination,
            probe_addr: DEFAULT_PROBE_ADDR,
            state: RequesterState::Idle,
        }
    }

    /// Set the 4-byte probe value carried in the request payload.
    pub fn probe_addr(mut self, probe_addr: Ipv4Addr) -> Self {
        self.probe_addr = probe_addr;
        self
    }

    pub fn state(&self) -> RequesterState {
        self.state
    }

    /// Drive the exchange to completion. Returns the first valid reply; runs
    /// forever if no host ever answers. Only socket failures are errors —
    /// malformed datagrams are discarded and the wait continues.
    pub async fn run(&mut self) -> io::Result<MaskReply> {
        loop {
            match self.state {
                RequesterState::Idle => {
                    self.state = RequesterState::Sending;
                }
                RequesterState::Sending => {
                    let deadline = self.send_request().await?;
                    self.state = RequesterState::AwaitingReply { deadline };
                }
                RequesterState::AwaitingReply { deadline } => match self.await_reply(deadline).await? {
                    Some(reply) => {
                        self.state = RequesterState::Replied;
                        println!(
                            "{} bytes from {}: icmp_seq={}, ttl = {}, mask = {}",
                            reply.segment_len,
                            reply.source,
                            reply.sequence_number,
                            reply.ttl,
                            reply.mask,
                        );
                        return Ok(reply);
                    }
                    None => {
                        println!("Request timed out");
                        self.state = RequesterState::TimedOut {
                            retry_at: Instant::now() + RETRY_DELAY,
                        };
                    }
                },
                RequesterState::TimedOut { retry_at } => {
                    time::sleep_until(retry_at).await;
                    self.state = RequesterState::Sending;
                }
                RequesterState::Replied => unreachable!("run returned on reply"),
            }
        }
    }

    async fn send_request(&mut self) -> io::Result<Instant> {
        let header = IcmpHeader::address_mask(wire::ADDRESS_MASK_REQUEST);
        let segment = wire::encode(&header, &self.probe_addr.octets());
        self.transport.send_to(&segment, self.destination).await?;
        Ok(Instant::now() + REPLY_TIMEOUT)
    }

    /// Receive until a valid address-mask reply arrives or the deadline
    /// passes. `None` means the deadline won. Dropping the un-elected select
    /// arm is what cancels the timer on the reply path.
    async fn await_reply(&mut self, deadline: Instant) -> io::Result<Option<MaskReply>> {
        let mut buffer = vec![0u8; MAX_DATAGRAM_LEN];
        loop {
            let len = tokio::select! {
                res = self.transport.recv(&mut buffer) => res?,
                () = time::sleep_until(deadline) => return Ok(None),
            };
            let datagram = Bytes::copy_from_slice(&buffer[..len]);
            if let Some(reply) = parse_reply(datagram) {
                return Ok(Some(reply));
            }
        }
    }
}

/// Interpret a received datagram as an address-mask reply. `None` covers
/// every discard case: malformed datagrams, foreign ICMP types, and replies
/// too short to carry a mask.
fn parse_reply(datagram: Bytes) -> Option<MaskReply> {
    let len = datagram.len();
    let (ipv4_header, icmp_header, payload) = match wire::decode(datagram) {
        Ok(parts) => parts,
        Err(err) => {
            debug!("discarding datagram: {}", err);
            return None;
        }
    };
    if icmp_header.ty != wire::ADDRESS_MASK_REPLY {
        debug!("ignoring ICMP type {}", icmp_header.ty);
        return None;
    }
    if payload.len() < 4 {
        debug!("address-mask reply with short payload");
        return None;
    }
    Some(MaskReply {
        mask: Ipv4Addr::new(payload[0], payload[1], payload[2], payload[3]),
        source: ipv4_header.source_addr(),
        ttl: ipv4_header.ttl(),
        sequence_number: icmp_header.sequence_number,
        segment_len: len - ipv4_header.header_len(),
    })
}
