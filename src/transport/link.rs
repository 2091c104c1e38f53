//! Reader and writer tasks around a stream, exposed to the session as channels.
//!
//! The reader blocks on the next frame and forwards it; a read failure is
//! reported once as [`LinkEvent::Closed`] and ends the task. The session never
//! touches the stream itself.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::{Result, SessionError};
use crate::protocol::{Frame, FRAME_LEN};
use crate::transport::stream::connection_lost;

const QUEUE_DEPTH: usize = 16;

/// Something that arrived from the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    Frame(Frame),
    /// The stream failed or was closed; no further events follow.
    Closed(String),
}

pub struct Link {
    outbound: Option<mpsc::Sender<Frame>>,
    inbound: mpsc::Receiver<LinkEvent>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

fn describe(e: &std::io::Error) -> String {
    match connection_lost(e) {
        SessionError::ConnectionLost(reason) => reason,
        other => other.to_string(),
    }
}

impl Link {
    /// Split `stream` and start the reader and writer tasks.
    pub fn spawn<S>(stream: S) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (mut read_half, mut write_half) = tokio::io::split(stream);
        let (out_tx, mut out_rx) = mpsc::channel::<Frame>(QUEUE_DEPTH);
        let (in_tx, in_rx) = mpsc::channel::<LinkEvent>(QUEUE_DEPTH);

        let reader_tx = in_tx.clone();
        let reader = tokio::spawn(async move {
            loop {
                let mut frame = [0u8; FRAME_LEN];
                match read_half.read_exact(&mut frame).await {
                    Ok(_) => {
                        log::trace!("frame in: {:02x?}", frame);
                        if reader_tx.send(LinkEvent::Frame(frame)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        let _ = reader_tx.send(LinkEvent::Closed(describe(&e))).await;
                        break;
                    }
                }
            }
        });

        let writer = tokio::spawn(async move {
            while let Some(frame) = out_rx.recv().await {
                log::trace!("frame out: {:02x?}", frame);
                let written = match write_half.write_all(&frame).await {
                    Ok(()) => write_half.flush().await,
                    Err(e) => Err(e),
                };
                if let Err(e) = written {
                    let _ = in_tx.send(LinkEvent::Closed(describe(&e))).await;
                    return;
                }
            }
            let _ = write_half.shutdown().await;
        });

        Self {
            outbound: Some(out_tx),
            inbound: in_rx,
            reader,
            writer,
        }
    }

    /// Queue a frame for the writer task.
    pub async fn send(&mut self, frame: Frame) -> Result<()> {
        let tx = self
            .outbound
            .as_ref()
            .ok_or_else(|| SessionError::ConnectionLost("Link is closed".to_string()))?;
        tx.send(frame)
            .await
            .map_err(|_| SessionError::ConnectionLost("Writer task stopped".to_string()))
    }

    /// Wait for the next event from the peer.
    pub async fn recv(&mut self) -> LinkEvent {
        self.inbound
            .recv()
            .await
            .unwrap_or_else(|| LinkEvent::Closed("Reader task stopped".to_string()))
    }

    /// Flush queued frames, shut down our write side and stop reading.
    pub async fn close(mut self) {
        self.outbound.take();
        let _ = (&mut self.writer).await;
        self.reader.abort();
    }
}

impl Drop for Link {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
