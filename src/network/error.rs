//! Common error types for network operations

/// A common error type for network operations.
///
/// This enum defines a set of common errors that can occur while serving
/// connections. It is designed to be simple and portable for `no_std`
/// environments.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// An operation was attempted on a connection that is not open.
    NotOpen,
    /// An error occurred during a write operation.
    WriteError,
    /// An error occurred during a read operation.
    ReadError,
    /// The connection was closed.
    ConnectionClosed,
    /// A protocol-specific error occurred.
    ProtocolError,
    /// The readiness multiplexer failed.
    SelectError,
    /// The listening socket failed to accept.
    AcceptError,
    /// A fixed-capacity table or buffer is full.
    CapacityExceeded,
    /// The configuration could not be parsed.
    InvalidConfig,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            Error::NotOpen => "connection not open",
            Error::WriteError => "write failed",
            Error::ReadError => "read failed",
            Error::ConnectionClosed => "connection closed",
            Error::ProtocolError => "protocol error",
            Error::SelectError => "select failed",
            Error::AcceptError => "accept failed",
            Error::CapacityExceeded => "capacity exceeded",
            Error::InvalidConfig => "invalid configuration",
        };
        f.write_str(text)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::NotOpen => defmt::write!(f, "NotOpen"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::ConnectionClosed => defmt::write!(f, "ConnectionClosed"),
            Error::ProtocolError => defmt::write!(f, "ProtocolError"),
            Error::SelectError => defmt::write!(f, "SelectError"),
            Error::AcceptError => defmt::write!(f, "AcceptError"),
            Error::CapacityExceeded => defmt::write!(f, "CapacityExceeded"),
            Error::InvalidConfig => defmt::write!(f, "InvalidConfig"),
        }
    }
}
