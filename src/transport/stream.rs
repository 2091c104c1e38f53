use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{timeout, Duration};

use crate::error::{Result, SessionError};
use crate::protocol::{Handshake, MAX_HANDSHAKE_SIZE};
use crate::transport::{Link, Transport};

/// Default timeout for the handshake exchange (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Map an I/O failure on an established stream to a session error.
pub(crate) fn connection_lost(e: &std::io::Error) -> SessionError {
    let reason = match e.kind() {
        std::io::ErrorKind::UnexpectedEof => "Connection closed by peer".to_string(),
        std::io::ErrorKind::ConnectionReset => "Connection reset by peer".to_string(),
        std::io::ErrorKind::BrokenPipe => "Connection closed by peer".to_string(),
        _ => format!("I/O error: {}", e),
    };
    SessionError::ConnectionLost(reason)
}

/// [`Transport`] over any async byte stream.
pub struct StreamTransport<S> {
    stream: S,
    timeout_duration: Duration,
    max_handshake_size: u32,
}

impl<S> StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(stream: S) -> Self {
        Self::with_timeout(stream, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(stream: S, timeout_duration: Duration) -> Self {
        Self {
            stream,
            timeout_duration,
            max_handshake_size: MAX_HANDSHAKE_SIZE,
        }
    }
}

#[async_trait::async_trait]
impl<S> Transport for StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    async fn send_handshake(&mut self, handshake: &Handshake) -> Result<()> {
        let data = bincode::serialize(handshake)
            .map_err(|e| SessionError::Handshake(format!("Serialization error: {}", e)))?;
        if data.len() as u32 > self.max_handshake_size {
            return Err(SessionError::Handshake(format!(
                "Handshake too large: {} bytes (max: {})",
                data.len(),
                self.max_handshake_size
            )));
        }

        let limit = self.timeout_duration;
        let stream = &mut self.stream;
        let send_op = async move {
            let len = (data.len() as u32).to_be_bytes();
            stream.write_all(&len).await.map_err(|e| connection_lost(&e))?;
            stream.write_all(&data).await.map_err(|e| connection_lost(&e))?;
            stream.flush().await.map_err(|e| connection_lost(&e))
        };
        timeout(limit, send_op)
            .await
            .map_err(|_| SessionError::Handshake(format!("Send timeout after {:?}", limit)))?
    }

    async fn recv_handshake(&mut self) -> Result<Handshake> {
        let max = self.max_handshake_size;
        let limit = self.timeout_duration;
        let stream = &mut self.stream;
        let recv_op = async move {
            let mut len_buf = [0u8; 4];
            stream
                .read_exact(&mut len_buf)
                .await
                .map_err(|e| connection_lost(&e))?;
            let len = u32::from_be_bytes(len_buf);
            if len == 0 || len > max {
                return Err(SessionError::Handshake(format!(
                    "Invalid handshake length: {} bytes (max: {})",
                    len, max
                )));
            }
            let mut buf = vec![0u8; len as usize];
            stream
                .read_exact(&mut buf)
                .await
                .map_err(|e| connection_lost(&e))?;
            bincode::deserialize::<Handshake>(&buf)
                .map_err(|e| SessionError::Handshake(format!("Deserialization error: {}", e)))
        };
        timeout(limit, recv_op)
            .await
            .map_err(|_| SessionError::Handshake(format!("Receive timeout after {:?}", limit)))?
    }

    fn into_link(self: Box<Self>) -> Link {
        let this = *self;
        Link::spawn(this.stream)
    }
}
