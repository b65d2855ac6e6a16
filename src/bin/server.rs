//! `maskprobe-server` — answer address-mask requests with a fixed mask.

use std::convert::Infallible;
use std::net::Ipv4Addr;

use maskprobe::{Error, IcmpSocket, Responder};
use net_literals::ipv4;

// Placeholder mask, matching the original deployment; a production setup
// would read this from the serving interface's configuration.
const RESPONDER_MASK: Ipv4Addr = ipv4!("255.255.255.0");

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    match run().await {
        Ok(never) => match never {},
        Err(err) => eprintln!("Exception: {}", err),
    }
}

async fn run() -> Result<Infallible, Error> {
    let socket = IcmpSocket::new()?;
    let mut responder = Responder::new(socket, RESPONDER_MASK);
    let never = responder.run().await?;
    Ok(never)
}
