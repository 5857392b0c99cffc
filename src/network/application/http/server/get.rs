//! GET: dynamic handlers rendered in one pass, static files streamed.

use super::command::Command;
use super::config::TX_BUFFER_SIZE;
use super::connection::{ClientConnection, StepResult, Target};
use super::response;
use crate::network::application::http::method::Method;
use crate::network::application::http::mime;
use crate::network::application::http::parser::RequestHead;
use crate::network::application::http::resource::{Resources, StaticFile};
use crate::network::application::http::status::Status;
use crate::network::error::Error;
use crate::network::{Interest, Select, Tcp};

pub(super) fn start<S: Tcp, M: Select<S>>(
    conn: &mut ClientConnection<S>,
    resources: &Resources<'_>,
    selector: &mut M,
    head: &RequestHead,
) -> Result<StepResult, Error> {
    conn.command = Some(Command::Get);

    let path = &conn.request_buffer[head.path.clone()];
    let content_type = mime::from_path(path);

    if let Some(index) = resources.find_handler(Method::Get, path) {
        render(conn, resources, selector, index, content_type, head.head_end)?;
        return Ok(StepResult::Consumed);
    }

    let Some((index, size)) = resources
        .find_file(path)
        .and_then(|index| resources.file(index).map(|file| (index, file.size())))
    else {
        response::reply(conn, Status::NotFound)?;
        return Ok(StepResult::Consumed);
    };

    conn.target = Target::File(index);
    conn.file_offset = 0;
    conn.bytes_expected = size;
    conn.content_length = size;
    conn.content_type = Some(content_type);
    response::send_header(conn, Status::Ok)?;

    // No request data is expected until the file is out.
    conn.unwatch(selector, Interest::READABLE)?;
    stream(conn, resources, selector)?;
    Ok(StepResult::Consumed)
}

pub(super) fn resume<S: Tcp, M: Select<S>>(
    conn: &mut ClientConnection<S>,
    resources: &Resources<'_>,
    selector: &mut M,
) -> Result<StepResult, Error> {
    stream(conn, resources, selector)
}

/// Run a GET handler once and send its output with the header.
fn render<S: Tcp, M: Select<S>>(
    conn: &mut ClientConnection<S>,
    resources: &Resources<'_>,
    selector: &mut M,
    index: usize,
    content_type: &'static str,
    head_end: usize,
) -> Result<(), Error> {
    let Some(handler) = resources.handler(index) else {
        return response::reply(conn, Status::InternalServerError);
    };
    conn.target = Target::Handler(index);

    let written = match handler
        .formatter
        .format(&mut conn.tx_buffer, &conn.request_buffer[..head_end])
    {
        Ok(written) => written.min(TX_BUFFER_SIZE),
        Err(_) => {
            warn!("GET handler failed");
            return response::reply(conn, Status::InternalServerError);
        }
    };

    response::send_buffered(conn, written, content_type)?;

    conn.unwatch(selector, Interest::WRITABLE)?;
    conn.clear();
    Ok(())
}

/// Push as much of the target file as the transport accepts right now.
fn stream<S: Tcp, M: Select<S>>(
    conn: &mut ClientConnection<S>,
    resources: &Resources<'_>,
    selector: &mut M,
) -> Result<StepResult, Error> {
    let file: &StaticFile<'_> = match conn.target {
        Target::File(index) => match resources.file(index) {
            Some(file) => file,
            None => {
                conn.clear();
                return Ok(StepResult::Continue);
            }
        },
        _ => {
            conn.clear();
            return Ok(StepResult::Continue);
        }
    };

    loop {
        let remaining = conn.bytes_expected - conn.file_offset;
        let chunk = conn.socket.tx_space().min(remaining).min(TX_BUFFER_SIZE);
        if chunk == 0 {
            break;
        }

        let offset = conn.file_offset;
        conn.tx_buffer[..chunk].copy_from_slice(&file.data[offset..offset + chunk]);
        let sent = conn
            .socket
            .write(&conn.tx_buffer[..chunk])
            .map_err(|_| Error::WriteError)?;
        if sent == 0 {
            break;
        }
        conn.file_offset += sent.min(chunk);
    }

    if conn.file_offset < conn.bytes_expected {
        trace!("streamed {} of {} bytes", conn.file_offset, conn.bytes_expected);
        conn.watch(selector, Interest::WRITABLE)?;
        return Ok(StepResult::Continue);
    }

    debug!("file transfer complete, {} bytes", conn.bytes_expected);
    conn.unwatch(selector, Interest::WRITABLE)?;
    conn.watch(selector, Interest::READABLE)?;
    conn.clear();
    Ok(StepResult::Consumed)
}
