//! Request accumulation for idle connections.

use super::command::Command;
use super::config::RX_BUFFER_SIZE;
use super::connection::{ClientConnection, StepResult};
use super::response;
use crate::network::application::http::parser;
use crate::network::application::http::resource::Resources;
use crate::network::application::http::status::Status;
use crate::network::error::Error;
use crate::network::{Select, Tcp};

/// Read once into the request buffer and dispatch a complete request.
///
/// The terminator scan restarts from byte 0 on every call, so a terminator
/// straddling two reads is never missed. Body bytes that arrived with the head
/// are handed to the command rather than dropped.
pub(super) fn on_readable<S: Tcp, M: Select<S>>(
    conn: &mut ClientConnection<S>,
    resources: &Resources<'_>,
    selector: &mut M,
) -> Result<StepResult, Error> {
    let filled = conn.request_length;
    let received = conn
        .socket
        .read(&mut conn.request_buffer[filled..])
        .map_err(|_| Error::ReadError)?;
    if received == 0 {
        return Ok(StepResult::Continue);
    }
    conn.request_length = (filled + received).min(RX_BUFFER_SIZE);

    let buffered = &conn.request_buffer[..conn.request_length];
    let Some(head_end) = parser::find_terminator(buffered) else {
        if conn.request_length == RX_BUFFER_SIZE {
            warn!("request head exceeds {} bytes", RX_BUFFER_SIZE);
            return reject(conn);
        }
        trace!("partial request head, {} bytes", conn.request_length);
        return Ok(StepResult::Continue);
    };
    conn.headers_complete = true;

    let head = match parser::parse_head(buffered, head_end) {
        Ok(head) => head,
        Err(error) => {
            debug!("rejected request head: {}", error);
            return reject(conn);
        }
    };
    let Some(command) = Command::from_method(head.method) else {
        debug!("unsupported method {}", head.method);
        return reject(conn);
    };

    let body = head.head_end..conn.request_length;
    conn.request_length = 0;
    command.start(conn, resources, selector, &head, body)
}

fn reject<S: Tcp>(conn: &mut ClientConnection<S>) -> Result<StepResult, Error> {
    response::reply(conn, Status::BadRequest)?;
    Ok(StepResult::ProtocolError)
}
