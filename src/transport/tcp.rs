use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream};
use tokio::time::{timeout, Duration};

use crate::error::{Result, SessionError};
use crate::transport::stream::StreamTransport;

/// Timeout for establishing an outbound connection (10 seconds).
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub type TcpTransport = StreamTransport<TcpStream>;

fn refused(addr: &str, source: std::io::Error) -> SessionError {
    SessionError::ConnectionRefused {
        addr: addr.to_string(),
        source,
    }
}

impl StreamTransport<TcpStream> {
    fn from_stream(stream: TcpStream) -> Self {
        // Two-byte frames must not sit in Nagle's buffer.
        if let Err(e) = stream.set_nodelay(true) {
            log::debug!("could not disable Nagle: {}", e);
        }
        Self::new(stream)
    }

    /// Connect to a listening peer.
    pub async fn connect(addr: &str) -> Result<Self> {
        let stream = timeout(CONNECT_TIMEOUT, TcpStream::connect(addr))
            .await
            .map_err(|_| refused(addr, std::io::ErrorKind::TimedOut.into()))?
            .map_err(|e| refused(addr, e))?;
        log::info!("connected to {}", addr);
        Ok(Self::from_stream(stream))
    }

    /// Accept one peer on an already bound listener.
    pub async fn accept(listener: &TcpListener) -> Result<(Self, SocketAddr)> {
        let local = listener
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "listener".to_string());
        let (stream, peer) = listener.accept().await.map_err(|e| refused(&local, e))?;
        log::info!("peer connected from {}", peer);
        Ok((Self::from_stream(stream), peer))
    }

    /// Bind `addr`, accept exactly one peer and stop listening.
    pub async fn listen_once(addr: &str) -> Result<(Self, SocketAddr)> {
        let listener = TcpListener::bind(addr).await.map_err(|e| refused(addr, e))?;
        log::info!("waiting for a peer on {}", addr);
        Self::accept(&listener).await
    }
}
