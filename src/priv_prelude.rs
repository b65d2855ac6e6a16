#![allow(unused_imports)]

pub use std::convert::Infallible;
pub use std::net::Ipv4Addr;
pub use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};
pub use std::time::Duration;
pub use std::{fmt, io, mem};

pub use bytes::{Bytes, BytesMut};
pub use log::{debug, warn};
pub use tokio::io::unix::AsyncFd;
pub use tokio::time::{self, Instant};

pub use crate::wire::{self, checksum, IcmpHeader, Ipv4Header, ParseError};
pub use crate::MAX_DATAGRAM_LEN;
