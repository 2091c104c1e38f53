//! Errors for the networked session.

use thiserror::Error;

use crate::core::GameError;
use crate::protocol::{FrameError, Handshake};

/// Result type alias using [`SessionError`].
pub type Result<T> = std::result::Result<T, SessionError>;

/// Everything that can end or prevent a networked game.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Listening or connecting failed before the game started. May be retried.
    #[error("Cannot connect to {addr}: {source}")]
    ConnectionRefused {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The stream failed or closed during the session.
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// The peers are not configured for the same game.
    #[error("Fleet mismatch: local {local:?}, remote {remote:?}")]
    FleetMismatch { local: Handshake, remote: Handshake },

    /// The fleet exchange could not be completed.
    #[error("Handshake failed: {0}")]
    Handshake(String),

    /// The peer speaks another protocol version.
    #[error("Protocol version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: u8, actual: u8 },

    /// A frame could not be decoded.
    #[error("Malformed frame: {0}")]
    MalformedFrame(#[from] FrameError),

    /// The peer sent a frame while it was not its turn to talk.
    #[error("Unexpected frame {0:?}")]
    UnexpectedFrame([u8; 2]),

    /// The engine rejected an operation.
    #[error("Game error: {0}")]
    Engine(#[from] GameError),

    /// The local player gave up.
    #[error("Player forfeited the game")]
    Forfeit,
}
