//! Byte-stream transports and the channel boundary the session talks through.

use crate::error::Result;
use crate::protocol::Handshake;

pub mod in_memory;
pub mod link;
pub mod stream;
pub mod tcp;

pub use link::{Link, LinkEvent};

/// A connected, reliable, ordered byte stream to the other peer.
///
/// The handshake runs on the transport directly; afterwards it is turned into
/// a [`Link`] and only fixed-size frames flow.
#[async_trait::async_trait]
pub trait Transport: Send {
    async fn send_handshake(&mut self, handshake: &Handshake) -> Result<()>;
    async fn recv_handshake(&mut self) -> Result<Handshake>;
    /// Hand the stream to the reader and writer tasks.
    fn into_link(self: Box<Self>) -> Link;
}
