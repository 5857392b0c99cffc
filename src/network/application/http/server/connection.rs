//! Per-client connection state.

use super::command::Command;
use super::config::{RX_BUFFER_SIZE, TX_BUFFER_SIZE};
use super::reader;
use crate::network::application::http::resource::Resources;
use crate::network::error::Error;
use crate::network::{Interest, Select, Tcp};

/// Outcome of driving a connection one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepResult {
    /// Nothing completed; wait for more readiness events.
    Continue,
    /// A request was recognised and dispatched.
    Consumed,
    /// The request was malformed; a 4xx went out if possible. Fatal.
    ProtocolError,
    /// The transport failed or the peer went away. Fatal.
    PeerClosed,
}

impl StepResult {
    /// Whether the connection must be torn down.
    pub fn is_fatal(self) -> bool {
        matches!(self, StepResult::ProtocolError | StepResult::PeerClosed)
    }
}

/// The registered resource a request resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// No resource selected.
    #[default]
    None,
    /// Index into the static file table.
    File(usize),
    /// Index into the handler table.
    Handler(usize),
}

/// State of one accepted client.
///
/// Owns its socket and both of its buffers; nothing is shared with other
/// connections.
pub struct ClientConnection<S> {
    pub(super) socket: S,
    pub(super) command: Option<Command>,
    pub(super) target: Target,
    /// Bytes sent (GET) or received (POST) so far.
    pub(super) file_offset: usize,
    /// Size of the file being sent or of the body being received.
    pub(super) bytes_expected: usize,
    /// Length advertised in the next response header.
    pub(super) content_length: usize,
    pub(super) headers_sent: bool,
    pub(super) content_type: Option<&'static str>,
    pub(super) request_buffer: [u8; RX_BUFFER_SIZE],
    pub(super) request_length: usize,
    /// The head of the request in flight has been parsed. Informational: the
    /// reader keys off `command`, this only mirrors it for inspection.
    pub(super) headers_complete: bool,
    pub(super) tx_buffer: [u8; TX_BUFFER_SIZE],
}

impl<S> core::fmt::Debug for ClientConnection<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClientConnection")
            .field("command", &self.command)
            .field("target", &self.target)
            .field("file_offset", &self.file_offset)
            .field("bytes_expected", &self.bytes_expected)
            .field("content_length", &self.content_length)
            .field("headers_sent", &self.headers_sent)
            .field("content_type", &self.content_type)
            .field("request_length", &self.request_length)
            .field("headers_complete", &self.headers_complete)
            .finish_non_exhaustive()
    }
}

impl<S> ClientConnection<S> {
    pub(super) fn new(socket: S) -> Self {
        Self {
            socket,
            command: None,
            target: Target::None,
            file_offset: 0,
            bytes_expected: 0,
            content_length: 0,
            headers_sent: false,
            content_type: None,
            request_buffer: [0; RX_BUFFER_SIZE],
            request_length: 0,
            headers_complete: false,
            tx_buffer: [0; TX_BUFFER_SIZE],
        }
    }

    /// The client socket.
    pub fn socket(&self) -> &S {
        &self.socket
    }

    /// The command in flight, if any.
    pub fn command(&self) -> Option<Command> {
        self.command
    }

    /// Resource the command in flight resolved to.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Whether the connection is waiting for a new request.
    pub fn is_idle(&self) -> bool {
        self.command.is_none()
    }

    /// Bytes of the current transfer moved so far.
    pub fn file_offset(&self) -> usize {
        self.file_offset
    }

    /// Total bytes of the current transfer.
    pub fn bytes_expected(&self) -> usize {
        self.bytes_expected
    }

    /// Bytes of an incomplete request head buffered so far.
    pub fn request_length(&self) -> usize {
        self.request_length
    }

    /// Whether the head of the request in flight was received in full.
    pub fn headers_complete(&self) -> bool {
        self.headers_complete
    }

    /// Whether the status line of the current response has gone out.
    pub fn headers_sent(&self) -> bool {
        self.headers_sent
    }

    /// Return to idle, ready for the next request on the same socket.
    pub(super) fn clear(&mut self) {
        self.command = None;
        self.target = Target::None;
        self.file_offset = 0;
        self.bytes_expected = 0;
        self.content_length = 0;
        self.headers_sent = false;
        self.content_type = None;
        self.request_length = 0;
        self.headers_complete = false;
    }

    pub(super) fn into_socket(self) -> S {
        self.socket
    }
}

impl<S: Tcp> ClientConnection<S> {
    /// Drive the connection one step.
    pub(super) fn step<M: Select<S>>(
        &mut self,
        resources: &Resources<'_>,
        selector: &mut M,
    ) -> StepResult {
        if !self.socket.is_connected() {
            return StepResult::PeerClosed;
        }

        let outcome = match self.command {
            None => reader::on_readable(self, resources, selector),
            Some(command) => command.resume(self, resources, selector),
        };

        outcome.unwrap_or_else(|error| {
            debug!("client transport error: {}", error);
            StepResult::PeerClosed
        })
    }

    pub(super) fn watch<M: Select<S>>(&self, selector: &mut M, interest: Interest) -> Result<(), Error> {
        selector
            .register(&self.socket, interest)
            .map_err(|_| Error::SelectError)
    }

    pub(super) fn unwatch<M: Select<S>>(
        &self,
        selector: &mut M,
        interest: Interest,
    ) -> Result<(), Error> {
        selector
            .deregister(&self.socket, interest)
            .map_err(|_| Error::SelectError)
    }
}
