//! Status line, headers and buffered bodies.

use core::fmt::Write as _;

use heapless::String;

use super::config::HEADER_BUFFER_SIZE;
use super::connection::ClientConnection;
use crate::network::application::http::mime::DEFAULT_CONTENT_TYPE;
use crate::network::application::http::status::Status;
use crate::network::error::Error;
use crate::network::Tcp;

/// Build the status line and the fixed header set.
///
/// A non-200 status never advertises the content metadata of an aborted
/// transfer: type and length are reset before the header is built.
fn build_header<S>(
    conn: &mut ClientConnection<S>,
    status: Status,
) -> Result<String<HEADER_BUFFER_SIZE>, Error> {
    if status != Status::Ok {
        conn.content_type = None;
        conn.content_length = 0;
    }

    let mut header: String<HEADER_BUFFER_SIZE> = String::new();
    write!(
        header,
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nConnection: keep-alive\r\nContent-Length: {}\r\n\r\n",
        status.code(),
        status.reason(),
        conn.content_type.unwrap_or(DEFAULT_CONTENT_TYPE),
        conn.content_length,
    )
    .map_err(|_| Error::WriteError)?;
    Ok(header)
}

/// Send the status line and the fixed header set in one write.
///
/// The whole block must fit one transmit call. Partial header writes are not
/// retried; a short write is reported as [`Error::WriteError`].
pub(super) fn send_header<S: Tcp>(
    conn: &mut ClientConnection<S>,
    status: Status,
) -> Result<(), Error> {
    let header = build_header(conn, status)?;
    let accepted = conn
        .socket
        .write(header.as_bytes())
        .map_err(|_| Error::WriteError)?;
    if accepted < header.len() {
        warn!("short header write, {} of {} bytes", accepted, header.len());
        return Err(Error::WriteError);
    }
    conn.headers_sent = true;
    Ok(())
}

/// Send the first `len` bytes of the connection's send buffer.
///
/// The length was already advertised, so anything short of `len` is a
/// [`Error::WriteError`].
pub(super) fn send_body<S: Tcp>(conn: &mut ClientConnection<S>, len: usize) -> Result<(), Error> {
    if len == 0 {
        return Ok(());
    }
    let accepted = conn
        .socket
        .write(&conn.tx_buffer[..len])
        .map_err(|_| Error::WriteError)?;
    if accepted < len {
        warn!("short body write, {} of {} bytes", accepted, len);
        return Err(Error::WriteError);
    }
    Ok(())
}

/// Send a 200 whose body is the first `written` bytes of the send buffer.
///
/// The body is cut so that header and body together fit the transmit space
/// reported now. The header is sized with the uncut length, which is never
/// shorter than the one finally sent.
pub(super) fn send_buffered<S: Tcp>(
    conn: &mut ClientConnection<S>,
    written: usize,
    content_type: &'static str,
) -> Result<(), Error> {
    conn.content_type = Some(content_type);
    conn.content_length = written;
    let header_len = build_header(conn, Status::Ok)?.len();

    let room = conn.socket.tx_space().saturating_sub(header_len);
    conn.content_length = written.min(room);
    send_header(conn, Status::Ok)?;
    let len = conn.content_length;
    send_body(conn, len)
}

/// Answer with a header-only response and return to idle.
pub(super) fn reply<S: Tcp>(conn: &mut ClientConnection<S>, status: Status) -> Result<(), Error> {
    debug!("replying {}", status.code());
    let sent = send_header(conn, status);
    conn.clear();
    sent
}
