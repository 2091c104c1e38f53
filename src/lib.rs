#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod core;
pub mod protocol;

#[cfg(feature = "std")]
pub mod error;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod shell;
#[cfg(feature = "std")]
pub mod transport;

pub use crate::core::*;
pub use protocol::*;

#[cfg(feature = "std")]
pub use error::SessionError;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use session::{Role, Session};
#[cfg(feature = "std")]
pub use shell::{CliShell, ScriptedShell, Shell, ShellEvent};
#[cfg(feature = "std")]
pub use transport::{
    in_memory::InMemoryTransport, tcp::TcpTransport, Link, LinkEvent, Transport,
};
