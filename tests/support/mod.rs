//! Scripted transport used by the server integration tests.
//!
//! A [`Client`] is the test's end of a mock socket: it queues inbound
//! segments, inspects what the server wrote and controls how much transmit
//! space the socket reports. The server's end is a [`MockSocket`] sharing the
//! same [`Wire`].

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use emberhttp::network::error::Error;
use emberhttp::network::{Close, Connection, Interest, Listen, Read, Select, Tcp, Write};

/// Transmit space reported when the test does not limit it.
pub const UNLIMITED_TX_SPACE: usize = 64 * 1024;

#[derive(Debug, Default)]
pub struct Wire {
    /// Segments waiting to be read; one read never crosses a segment.
    inbound: VecDeque<Vec<u8>>,
    outbound: Vec<u8>,
    /// `None` reports [`UNLIMITED_TX_SPACE`]; writes use up a limited budget
    /// and never exceed it.
    tx_budget: Option<usize>,
    /// Bytes the transport takes in regardless of the space it reports.
    accept_limit: Option<usize>,
    disconnected: bool,
    read_error: bool,
    closed: bool,
    reads: usize,
}

#[derive(Debug)]
pub struct MockSocket {
    id: usize,
    wire: Rc<RefCell<Wire>>,
}

impl MockSocket {
    pub fn id(&self) -> usize {
        self.id
    }
}

impl Read for MockSocket {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut wire = self.wire.borrow_mut();
        wire.reads += 1;
        if wire.read_error {
            return Err(Error::ReadError);
        }
        let Some(mut segment) = wire.inbound.pop_front() else {
            return Ok(0);
        };

        let len = segment.len().min(buf.len());
        buf[..len].copy_from_slice(&segment[..len]);
        if len < segment.len() {
            segment.drain(..len);
            wire.inbound.push_front(segment);
        }
        Ok(len)
    }
}

impl Write for MockSocket {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let mut wire = self.wire.borrow_mut();
        if wire.closed || wire.disconnected {
            return Err(Error::WriteError);
        }
        let accepted = buf
            .len()
            .min(wire.tx_budget.unwrap_or(usize::MAX))
            .min(wire.accept_limit.unwrap_or(usize::MAX));
        if let Some(budget) = wire.tx_budget.as_mut() {
            *budget -= accepted;
        }
        if let Some(limit) = wire.accept_limit.as_mut() {
            *limit -= accepted;
        }
        wire.outbound.extend_from_slice(&buf[..accepted]);
        Ok(accepted)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Close for MockSocket {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        self.wire.borrow_mut().closed = true;
        Ok(())
    }
}

impl Connection for MockSocket {}

impl Tcp for MockSocket {
    fn tx_space(&self) -> usize {
        self.wire.borrow().tx_budget.unwrap_or(UNLIMITED_TX_SPACE)
    }

    fn is_connected(&self) -> bool {
        !self.wire.borrow().disconnected
    }
}

/// The test's end of a mock connection.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: usize,
    wire: Rc<RefCell<Wire>>,
}

impl Client {
    /// Queue one inbound segment.
    pub fn send(&self, bytes: &[u8]) {
        self.wire.borrow_mut().inbound.push_back(bytes.to_vec());
    }

    /// Everything the server wrote so far.
    pub fn output(&self) -> Vec<u8> {
        self.wire.borrow().outbound.clone()
    }

    /// Drain what the server wrote so far.
    pub fn take_output(&self) -> Vec<u8> {
        std::mem::take(&mut self.wire.borrow_mut().outbound)
    }

    /// Limit the transmit space to `bytes` until written off.
    pub fn set_tx_space(&self, bytes: usize) {
        self.wire.borrow_mut().tx_budget = Some(bytes);
    }

    /// Accept at most `bytes` more in total while still reporting the full
    /// transmit space.
    pub fn limit_accepted(&self, bytes: usize) {
        self.wire.borrow_mut().accept_limit = Some(bytes);
    }

    pub fn unlimit_tx_space(&self) {
        self.wire.borrow_mut().tx_budget = None;
    }

    pub fn disconnect(&self) {
        self.wire.borrow_mut().disconnected = true;
    }

    pub fn fail_reads(&self) {
        self.wire.borrow_mut().read_error = true;
    }

    /// Whether the server closed its end.
    pub fn is_closed(&self) -> bool {
        self.wire.borrow().closed
    }

    /// Inbound segments the server has not read yet.
    pub fn pending_segments(&self) -> usize {
        self.wire.borrow().inbound.len()
    }

    pub fn reads(&self) -> usize {
        self.wire.borrow().reads
    }
}

#[derive(Debug)]
pub struct MockListener {
    pending: Rc<RefCell<VecDeque<MockSocket>>>,
    fail: Rc<Cell<bool>>,
}

impl Listen for MockListener {
    type Connection = MockSocket;
    type Error = Error;

    fn accept(&mut self) -> Result<Option<Self::Connection>, Self::Error> {
        if self.fail.get() {
            return Err(Error::AcceptError);
        }
        Ok(self.pending.borrow_mut().pop_front())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Register,
    Deregister,
}

/// One call made on the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call {
    pub socket: usize,
    pub op: Op,
    pub interest: Interest,
}

#[derive(Debug)]
pub struct RecordingSelector {
    calls: Rc<RefCell<Vec<Call>>>,
    signals: Rc<Cell<usize>>,
    selects: Rc<Cell<usize>>,
    fail: Rc<Cell<bool>>,
}

impl Select<MockSocket> for RecordingSelector {
    type Error = Error;

    fn register(&mut self, socket: &MockSocket, interest: Interest) -> Result<(), Self::Error> {
        self.calls.borrow_mut().push(Call {
            socket: socket.id,
            op: Op::Register,
            interest,
        });
        Ok(())
    }

    fn deregister(&mut self, socket: &MockSocket, interest: Interest) -> Result<(), Self::Error> {
        self.calls.borrow_mut().push(Call {
            socket: socket.id,
            op: Op::Deregister,
            interest,
        });
        Ok(())
    }

    fn select(&mut self, _timeout_ms: u32) -> Result<bool, Self::Error> {
        self.selects.set(self.selects.get() + 1);
        if self.fail.get() {
            return Err(Error::SelectError);
        }
        Ok(true)
    }

    fn signal(&self) -> Result<(), Self::Error> {
        self.signals.set(self.signals.get() + 1);
        Ok(())
    }
}

/// Shared view of a listener and selector handed to a server.
#[derive(Debug, Default)]
pub struct Network {
    pending: Rc<RefCell<VecDeque<MockSocket>>>,
    calls: Rc<RefCell<Vec<Call>>>,
    signals: Rc<Cell<usize>>,
    selects: Rc<Cell<usize>>,
    fail_accept: Rc<Cell<bool>>,
    fail_select: Rc<Cell<bool>>,
    next_id: Cell<usize>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener(&self) -> MockListener {
        MockListener {
            pending: Rc::clone(&self.pending),
            fail: Rc::clone(&self.fail_accept),
        }
    }

    pub fn selector(&self) -> RecordingSelector {
        RecordingSelector {
            calls: Rc::clone(&self.calls),
            signals: Rc::clone(&self.signals),
            selects: Rc::clone(&self.selects),
            fail: Rc::clone(&self.fail_select),
        }
    }

    /// Queue a new connection on the listener.
    pub fn connect(&self) -> Client {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let wire = Rc::new(RefCell::new(Wire::default()));
        self.pending.borrow_mut().push_back(MockSocket {
            id,
            wire: Rc::clone(&wire),
        });
        Client { id, wire }
    }

    /// Selector calls made for `socket`, in order.
    pub fn calls_for(&self, socket: usize) -> Vec<(Op, Interest)> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.socket == socket)
            .map(|call| (call.op, call.interest))
            .collect()
    }

    pub fn count(&self, socket: usize, op: Op, interest: Interest) -> usize {
        self.calls_for(socket)
            .into_iter()
            .filter(|&call| call == (op, interest))
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn pending_accepts(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn signals(&self) -> usize {
        self.signals.get()
    }

    pub fn selects(&self) -> usize {
        self.selects.get()
    }

    pub fn fail_accept(&self, fail: bool) {
        self.fail_accept.set(fail);
    }

    pub fn fail_select(&self, fail: bool) {
        self.fail_select.set(fail);
    }
}

/// Length of the header block of a 200 response.
pub fn ok_header_len(content_type: &str, content_length: usize) -> usize {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: {content_type}\r\nConnection: keep-alive\r\nContent-Length: {content_length}\r\n\r\n"
    )
    .len()
}

/// A response as seen on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub reason: String,
    pub content_type: String,
    pub content_length: usize,
    pub body: Vec<u8>,
}

/// Split a byte stream into complete responses.
///
/// Panics on anything that is not a well-formed response, so tests fail
/// loudly on corrupt output.
pub fn parse_responses(mut bytes: &[u8]) -> Vec<Response> {
    let mut responses = Vec::new();
    while !bytes.is_empty() {
        let head_end = bytes
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("response head terminator")
            + 4;
        let head = std::str::from_utf8(&bytes[..head_end]).expect("ascii head");
        let mut lines = head.split("\r\n");

        let status_line = lines.next().expect("status line");
        let rest = status_line
            .strip_prefix("HTTP/1.1 ")
            .expect("HTTP/1.1 status line");
        let (code, reason) = rest.split_once(' ').expect("code and reason");

        let mut content_type = String::new();
        let mut content_length = None;
        for line in lines.filter(|line| !line.is_empty()) {
            let (name, value) = line.split_once(": ").expect("header line");
            match name {
                "Content-Type" => content_type = value.to_string(),
                "Content-Length" => content_length = Some(value.parse().expect("length")),
                "Connection" => assert_eq!(value, "keep-alive"),
                other => panic!("unexpected header {other}"),
            }
        }
        let content_length = content_length.expect("Content-Length header");
        let body = bytes[head_end..head_end + content_length].to_vec();

        responses.push(Response {
            status: code.parse().expect("numeric status"),
            reason: reason.to_string(),
            content_type,
            content_length,
            body,
        });
        bytes = &bytes[head_end + content_length..];
    }
    responses
}
