//! `maskprobe-client <host>` — ask a host for its subnet mask.

use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::process;

use maskprobe::{Error, IcmpSocket, Requester};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "maskprobe-client".to_owned());
    let host = match (args.next(), args.next()) {
        (Some(host), None) => host,
        _ => {
            eprintln!("Usage: {} <host>", program);
            process::exit(1);
        }
    };

    if let Err(err) = run(&host).await {
        eprintln!("Exception: {}", err);
    }
}

async fn run(host: &str) -> Result<(), Error> {
    let destination = resolve(host).await?;
    let socket = IcmpSocket::new()?;
    let mut requester = Requester::new(socket, destination);
    let _reply = requester.run().await?;
    Ok(())
}

async fn resolve(host: &str) -> Result<Ipv4Addr, Error> {
    if let Ok(addr) = host.parse::<Ipv4Addr>() {
        return Ok(addr);
    }
    let addrs = tokio::net::lookup_host((host, 0))
        .await
        .map_err(|_| Error::Resolve(host.to_owned()))?;
    addrs
        .filter_map(|addr| match addr {
            SocketAddr::V4(v4) => Some(*v4.ip()),
            SocketAddr::V6(_) => None,
        })
        .next()
        .ok_or_else(|| Error::Resolve(host.to_owned()))
}
