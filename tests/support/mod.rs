//! Test doubles: a channel-backed [`Transport`] and a builder for the IPv4
//! datagrams the kernel would normally prepend on receive.

#![allow(dead_code)]

use std::io;
use std::net::Ipv4Addr;

use maskprobe::wire::checksum;
use maskprobe::Transport;
use tokio::sync::mpsc;

/// In-memory stand-in for a raw ICMP socket. Segments sent by the state
/// machine come out of [`Wires::sent`]; datagrams pushed into
/// [`Wires::deliver`] are returned from `recv`.
pub struct MockTransport {
    sent_tx: mpsc::UnboundedSender<(Vec<u8>, Ipv4Addr)>,
    recv_rx: mpsc::UnboundedReceiver<Vec<u8>>,
}

/// The harness side of a [`MockTransport`].
pub struct Wires {
    pub sent: mpsc::UnboundedReceiver<(Vec<u8>, Ipv4Addr)>,
    pub deliver: mpsc::UnboundedSender<Vec<u8>>,
}

pub fn mock_transport() -> (MockTransport, Wires) {
    let (sent_tx, sent_rx) = mpsc::unbounded_channel();
    let (deliver_tx, recv_rx) = mpsc::unbounded_channel();
    let transport = MockTransport { sent_tx, recv_rx };
    let wires = Wires {
        sent: sent_rx,
        deliver: deliver_tx,
    };
    (transport, wires)
}

impl Transport for MockTransport {
    async fn send_to(&mut self, segment: &[u8], destination: Ipv4Addr) -> io::Result<usize> {
        self.sent_tx
            .send((segment.to_vec(), destination))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "harness hung up"))?;
        Ok(segment.len())
    }

    async fn recv(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        match self.recv_rx.recv().await {
            Some(datagram) => {
                buffer[..datagram.len()].copy_from_slice(&datagram);
                Ok(datagram.len())
            }
            // A closed delivery channel models a network that has gone
            // silent, not a socket error.
            None => std::future::pending().await,
        }
    }
}

/// Wrap an ICMP segment in a minimal IPv4 header, playing the role of the IP
/// layer between the two mock sockets.
pub fn ip_datagram(source: Ipv4Addr, dest: Ipv4Addr, ttl: u8, segment: &[u8]) -> Vec<u8> {
    let mut buffer = vec![0u8; 20 + segment.len()];
    buffer[0] = 0x45;
    let total_len = buffer.len() as u16;
    buffer[2..4].copy_from_slice(&total_len.to_be_bytes());
    buffer[8] = ttl;
    buffer[9] = 1;
    buffer[12..16].copy_from_slice(&source.octets());
    buffer[16..20].copy_from_slice(&dest.octets());
    let header_checksum = !checksum::data(&buffer[..20]);
    buffer[10..12].copy_from_slice(&header_checksum.to_be_bytes());
    buffer[20..].copy_from_slice(segment);
    buffer
}
