//! A network abstraction layer for embedded systems
//!
//! This module provides the traits the HTTP server consumes from the
//! surrounding TCP/IP stack: byte-stream I/O on accepted sockets, a
//! non-blocking listener and a readiness multiplexer. Implementations live in
//! the application (or board support crate), never in this library.
//!

#![allow(missing_docs)]
#![deny(unsafe_code)]

/// Common error types for network operations
pub mod error;

/// Application layer protocol implementations
pub mod application;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Close, Interest, Listen, Read, Select, Tcp, Write};
}

// Core synchronous traits
pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read data from the connection without blocking.
    ///
    /// `Ok(0)` means no data is pending right now. A disconnected peer is
    /// reported through an error or through [`Tcp::is_connected`].
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the connection without blocking, returning how many
    /// bytes the transport accepted
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;
}

pub trait Close {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Close the connection
    fn close(self) -> Result<(), Self::Error>;
}

/// A synchronous connection
pub trait Connection: Read + Write + Close {}

/// An accepted TCP socket.
pub trait Tcp: Connection {
    /// Number of bytes the transport can accept right now without blocking.
    fn tx_space(&self) -> usize;
    /// Whether the peer is still connected.
    fn is_connected(&self) -> bool;
}

/// A listening socket (server side).
pub trait Listen {
    /// Associated connection type
    type Connection: Tcp;
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Accept one pending connection without blocking.
    ///
    /// Returns `Ok(None)` when nothing is waiting.
    fn accept(&mut self) -> Result<Option<Self::Connection>, Self::Error>;
}

/// Readiness conditions a socket can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interest(u8);

impl Interest {
    /// No interest at all.
    pub const NONE: Interest = Interest(0);
    /// The socket has data to read.
    pub const READABLE: Interest = Interest(0b001);
    /// The socket can accept more data.
    pub const WRITABLE: Interest = Interest(0b010);
    /// The socket is in an error state.
    pub const ERROR: Interest = Interest(0b100);
    /// Every condition.
    pub const ALL: Interest = Interest(0b111);

    /// Union of two interests.
    pub const fn add(self, other: Interest) -> Interest {
        Interest(self.0 | other.0)
    }

    /// `self` without the bits of `other`.
    pub const fn remove(self, other: Interest) -> Interest {
        Interest(self.0 & !other.0)
    }

    /// Whether every bit of `other` is set in `self`.
    pub const fn contains(self, other: Interest) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl core::ops::BitOr for Interest {
    type Output = Interest;

    fn bitor(self, rhs: Interest) -> Interest {
        self.add(rhs)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Interest {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Interest({=u8:b})", self.0)
    }
}

/// A readiness multiplexer over sockets of type `S`.
///
/// The listening socket is registered by the implementation itself; a ready
/// listener makes [`select`](Select::select) return `true` like any other
/// socket.
pub trait Select<S> {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Add `interest` to the conditions watched for `socket`.
    fn register(&mut self, socket: &S, interest: Interest) -> Result<(), Self::Error>;
    /// Stop watching `interest` for `socket`.
    fn deregister(&mut self, socket: &S, interest: Interest) -> Result<(), Self::Error>;
    /// Wait up to `timeout_ms` for any registered socket to become ready.
    ///
    /// Returns whether anything is ready. This is the only call allowed to
    /// block.
    fn select(&mut self, timeout_ms: u32) -> Result<bool, Self::Error>;
    /// Wake a blocked [`select`](Select::select) early.
    ///
    /// Must never do anything beyond interrupting the wait.
    fn signal(&self) -> Result<(), Self::Error>;
}
