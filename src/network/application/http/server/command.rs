//! Dispatch of recognised requests to the GET and POST state machines.

use core::ops::Range;

use super::connection::{ClientConnection, StepResult};
use super::{get, post};
use crate::network::application::http::method::Method;
use crate::network::application::http::parser::RequestHead;
use crate::network::application::http::resource::Resources;
use crate::network::error::Error;
use crate::network::{Select, Tcp};

/// A request being served on a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Serving a GET: dynamic render or static file stream.
    Get,
    /// Serving a POST: receiving the body, then rendering the reply.
    Post,
}

impl Command {
    /// The command serving `method`, or `None` for methods without one.
    pub fn from_method(method: Method) -> Option<Command> {
        match method {
            Method::Get => Some(Command::Get),
            Method::Post => Some(Command::Post),
            _ => None,
        }
    }

    /// The method this command serves.
    pub fn method(self) -> Method {
        match self {
            Command::Get => Method::Get,
            Command::Post => Method::Post,
        }
    }

    /// Begin serving a freshly parsed request.
    ///
    /// `body` is the range of the receive buffer holding bytes that arrived
    /// after the header terminator.
    pub(super) fn start<S: Tcp, M: Select<S>>(
        self,
        conn: &mut ClientConnection<S>,
        resources: &Resources<'_>,
        selector: &mut M,
        head: &RequestHead,
        body: Range<usize>,
    ) -> Result<StepResult, Error> {
        match self {
            Command::Get => get::start(conn, resources, selector, head),
            Command::Post => post::start(conn, resources, selector, head, body),
        }
    }

    /// Continue a command left in flight by an earlier step.
    pub(super) fn resume<S: Tcp, M: Select<S>>(
        self,
        conn: &mut ClientConnection<S>,
        resources: &Resources<'_>,
        selector: &mut M,
    ) -> Result<StepResult, Error> {
        match self {
            Command::Get => get::resume(conn, resources, selector),
            Command::Post => post::resume(conn, resources, selector),
        }
    }
}
