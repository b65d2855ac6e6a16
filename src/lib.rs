//! ICMP address-mask discovery. *Currently linux-only*.
//!
//! This crate implements the legacy ICMP address-mask exchange (RFC 950
//! message types 17 and 18) over raw sockets. A [`Requester`] sends an
//! address-mask request to a destination host and retries on a fixed 5s/1s
//! schedule until a reply carrying the subnet mask arrives. A [`Responder`]
//! listens for such requests forever and answers each one with a configured
//! mask.
//!
//! The [`wire`] module holds the packet codec: a read-only
//! [`Ipv4Header`](wire::Ipv4Header) view over received datagrams, the
//! [`IcmpHeader`](wire::IcmpHeader) codec and the RFC 1071 Internet checksum.
//! Both state machines talk to the network through the [`Transport`] trait,
//! implemented for real traffic by [`IcmpSocket`] (a raw ICMP socket, which
//! requires `CAP_NET_RAW` or root). Tests substitute a channel-backed mock.

pub mod wire;

mod error;
mod priv_prelude;
mod requester;
mod responder;
mod socket;

pub use crate::error::Error;
pub use crate::requester::{MaskReply, Requester, RequesterState};
pub use crate::responder::{MaskRequest, Responder};
pub use crate::socket::{IcmpSocket, Transport};

/// Largest datagram either state machine will accept in one receive.
pub const MAX_DATAGRAM_LEN: usize = 65536;
