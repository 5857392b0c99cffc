//! POST: the body is streamed into the handler, then its reply is sent.

use core::ops::Range;

use super::command::Command;
use super::config::{RX_BUFFER_SIZE, TX_BUFFER_SIZE};
use super::connection::{ClientConnection, StepResult, Target};
use super::response;
use crate::network::application::http::method::Method;
use crate::network::application::http::parser::RequestHead;
use crate::network::application::http::resource::{Handler, HandlerError, Resources};
use crate::network::application::http::status::Status;
use crate::network::error::Error;
use crate::network::{Interest, Select, Tcp};

/// Content type of every POST reply.
const REPLY_CONTENT_TYPE: &str = "text/plain";

pub(super) fn start<S: Tcp, M: Select<S>>(
    conn: &mut ClientConnection<S>,
    resources: &Resources<'_>,
    selector: &mut M,
    head: &RequestHead,
    body: Range<usize>,
) -> Result<StepResult, Error> {
    conn.command = Some(Command::Post);

    let path = &conn.request_buffer[head.path.clone()];
    let Some((index, handler)) = resources
        .find_handler(Method::Post, path)
        .and_then(|index| resources.handler(index).map(|handler| (index, handler)))
    else {
        response::reply(conn, Status::NotFound)?;
        return Ok(StepResult::Consumed);
    };
    let content_length = head.content_length;
    conn.target = Target::Handler(index);
    conn.file_offset = 0;
    conn.bytes_expected = content_length;

    // Body bytes that shared a segment with the head; anything past
    // Content-Length is not part of this request.
    let available = body.len().min(content_length);
    if available > 0 && consume(conn, handler, body.start..body.start + available).is_err() {
        return abort(conn);
    }

    if conn.file_offset < conn.bytes_expected {
        trace!("POST body {} of {} bytes", conn.file_offset, conn.bytes_expected);
        conn.watch(selector, Interest::READABLE)?;
        return Ok(StepResult::Consumed);
    }

    finalize(conn, handler, selector)?;
    Ok(StepResult::Consumed)
}

pub(super) fn resume<S: Tcp, M: Select<S>>(
    conn: &mut ClientConnection<S>,
    resources: &Resources<'_>,
    selector: &mut M,
) -> Result<StepResult, Error> {
    let handler = match conn.target {
        Target::Handler(index) => resources.handler(index),
        _ => None,
    };
    let Some(handler) = handler else {
        conn.clear();
        return Ok(StepResult::Continue);
    };

    let remaining = conn.bytes_expected - conn.file_offset;
    if remaining > 0 {
        let wanted = remaining.min(RX_BUFFER_SIZE);
        let received = conn
            .socket
            .read(&mut conn.request_buffer[..wanted])
            .map_err(|_| Error::ReadError)?;
        if received == 0 {
            return Ok(StepResult::Continue);
        }
        if consume(conn, handler, 0..received.min(wanted)).is_err() {
            return abort(conn);
        }
        if conn.file_offset < conn.bytes_expected {
            return Ok(StepResult::Continue);
        }
    }

    finalize(conn, handler, selector)?;
    Ok(StepResult::Consumed)
}

/// Hand one chunk of the receive buffer to the handler.
fn consume<S>(
    conn: &mut ClientConnection<S>,
    handler: &Handler<'_>,
    chunk: Range<usize>,
) -> Result<(), HandlerError> {
    let len = chunk.len();
    handler.formatter.format(&mut [], &conn.request_buffer[chunk])?;
    conn.file_offset += len;
    Ok(())
}

/// The handler rejected body data while more may still be in flight, so the
/// connection cannot be reused.
fn abort<S: Tcp>(conn: &mut ClientConnection<S>) -> Result<StepResult, Error> {
    warn!("POST handler rejected body at offset {}", conn.file_offset);
    response::reply(conn, Status::InternalServerError)?;
    Ok(StepResult::ProtocolError)
}

/// Ask the handler for its reply once the whole body is in.
fn finalize<S: Tcp, M: Select<S>>(
    conn: &mut ClientConnection<S>,
    handler: &Handler<'_>,
    selector: &mut M,
) -> Result<(), Error> {
    let written = match handler.formatter.format(&mut conn.tx_buffer, &[]) {
        Ok(written) => written.min(TX_BUFFER_SIZE),
        Err(_) => {
            warn!("POST handler failed to render a reply");
            return response::reply(conn, Status::InternalServerError);
        }
    };

    response::send_buffered(conn, written, REPLY_CONTENT_TYPE)?;

    // Read interest stays: it is the idle registration.
    conn.unwatch(selector, Interest::WRITABLE)?;
    conn.clear();
    Ok(())
}
