use crate::priv_prelude::*;

/// Byte-level send/receive used by the state machines.
///
/// `recv` yields whole IP datagrams (IPv4 header included), as a raw ICMP
/// socket does; `send_to` takes a bare ICMP segment, the kernel prepends the
/// IP header. Implemented for live traffic by [`IcmpSocket`] and by
/// channel-backed mocks in the tests.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send_to(&mut self, segment: &[u8], destination: Ipv4Addr) -> io::Result<usize>;
    async fn recv(&mut self, buffer: &mut [u8]) -> io::Result<usize>;
}

/// A non-blocking raw ICMPv4 socket driven by the tokio reactor.
pub struct IcmpSocket {
    fd: AsyncFd<OwnedFd>,
}

impl IcmpSocket {
    /// Open a raw ICMPv4 socket. Requires `CAP_NET_RAW` (or root); without
    /// it the kernel refuses the socket and the error propagates to the
    /// caller as fatal.
    pub fn new() -> io::Result<IcmpSocket> {
        let raw_fd = unsafe {
            libc::socket(
                libc::AF_INET,
                libc::SOCK_RAW | libc::SOCK_NONBLOCK | libc::SOCK_CLOEXEC,
                libc::IPPROTO_ICMP,
            )
        };
        if raw_fd < 0 {
            let err = io::Error::last_os_error();
            return Err(io::Error::new(err.kind(), "opening raw ICMP socket"));
        }
        let fd = unsafe { OwnedFd::from_raw_fd(raw_fd) };
        let fd = AsyncFd::new(fd)?;
        Ok(IcmpSocket { fd })
    }
}

impl Transport for IcmpSocket {
    async fn send_to(&mut self, segment: &[u8], destination: Ipv4Addr) -> io::Result<usize> {
        let addr = libc::sockaddr_in {
            sin_family: libc::AF_INET as libc::sa_family_t,
            sin_port: 0,
            sin_addr: libc::in_addr {
                s_addr: u32::from(destination).to_be(),
            },
            sin_zero: [0; 8],
        };
        loop {
            let mut guard = self.fd.writable().await?;
            match guard.try_io(|fd| {
                let res = unsafe {
                    libc::sendto(
                        fd.as_raw_fd(),
                        segment.as_ptr() as *const libc::c_void,
                        segment.len(),
                        0,
                        &addr as *const libc::sockaddr_in as *const libc::sockaddr,
                        mem::size_of::<libc::sockaddr_in>() as libc::socklen_t,
                    )
                };
                if res < 0 {
                    let err = io::Error::last_os_error();
                    return Err(err);
                }
                Ok(res as usize)
            }) {
                Ok(Ok(n)) => return Ok(n),
                Ok(Err(err)) => return Err(err),
                Err(_would_block) => continue,
            }
        }
    }

    async fn recv(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        loop {
            let mut guard = self.fd.readable().await?;
            match guard.try_io(|fd| {
                let res = unsafe {
                    libc::recv(
                        fd.as_raw_fd(),
                        buffer.as_mut_ptr() as *mut libc::c_void,
                        buffer.len(),
                        0,
                    )
                };
                if res < 0 {
                    let err = io::Error::last_os_error();
                    return Err(err);
                }
                Ok(res as usize)
            }) {
                Ok(Ok(n)) => return Ok(n),
                Ok(Err(err)) => return Err(err),
                Err(_would_block) => continue,
            }
        }
    }
}
