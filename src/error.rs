use crate::priv_prelude::*;
use thiserror::Error;

/// Fatal errors: anything that stops an exchange outright, as opposed to a
/// malformed datagram (which the state machines silently discard).
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot resolve host {0}")]
    Resolve(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
