use tokio::io::DuplexStream;

use crate::transport::stream::StreamTransport;

/// Buffer size of each direction of the in-process pipe.
const PIPE_CAPACITY: usize = 1024;

pub type InMemoryTransport = StreamTransport<DuplexStream>;

impl StreamTransport<DuplexStream> {
    /// Two transports connected to each other inside the process.
    pub fn pair() -> (Self, Self) {
        let (a, b) = tokio::io::duplex(PIPE_CAPACITY);
        (Self::new(a), Self::new(b))
    }
}
