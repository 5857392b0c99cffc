//! Request head parsing.
//!
//! Everything here is a pure function over a byte slice, so the server can
//! run it on a partially filled receive buffer as often as it likes. Nothing
//! mutates the buffer; the path is returned as a range into it.

use core::ops::Range;

use super::method::Method;

/// The sequence that terminates a header block.
pub const TERMINATOR: &[u8; 4] = b"\r\n\r\n";

const CONTENT_LENGTH: &[u8] = b"content-length:";

/// Why a complete header block was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// The request line does not start with a known method token.
    UnknownMethod,
    /// The request line has no path after the method.
    MalformedRequestLine,
    /// A POST request without a usable `Content-Length`.
    MissingContentLength,
}

/// The parts of a request head the server acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    /// Request method.
    pub method: Method,
    /// Location of the path within the parsed buffer.
    pub path: Range<usize>,
    /// Declared body length. Only looked up for POST, where it is mandatory;
    /// other methods carry 0.
    pub content_length: usize,
    /// Offset just past the terminator; body bytes start here.
    pub head_end: usize,
}

/// Find the header terminator in `buf`, scanning from the first byte.
///
/// Returns the offset just past the terminator. The scan always covers the
/// whole buffer, so a terminator split across earlier reads is still found.
pub fn find_terminator(buf: &[u8]) -> Option<usize> {
    buf.windows(TERMINATOR.len())
        .position(|window| window == TERMINATOR)
        .map(|start| start + TERMINATOR.len())
}

/// Parse the head of a request whose terminator ends at `head_end`.
pub fn parse_head(buf: &[u8], head_end: usize) -> Result<RequestHead, ParseError> {
    let head = &buf[..head_end];
    let (method, path_start) = Method::parse(head).ok_or(ParseError::UnknownMethod)?;

    let path_len = head[path_start..]
        .iter()
        .position(|&b| b.is_ascii_whitespace() || b.is_ascii_control())
        .unwrap_or(head.len() - path_start);
    if path_len == 0 {
        return Err(ParseError::MalformedRequestLine);
    }
    let path = path_start..path_start + path_len;

    let content_length = match method {
        Method::Post => {
            let headers = header_block(head);
            content_length(headers).ok_or(ParseError::MissingContentLength)?
        }
        _ => 0,
    };

    Ok(RequestHead {
        method,
        path,
        content_length,
        head_end,
    })
}

/// The header lines between the request line and the terminator.
fn header_block(head: &[u8]) -> &[u8] {
    match head.windows(2).position(|w| w == b"\r\n") {
        Some(eol) => &head[eol + 2..],
        None => &[],
    }
}

/// Look up `Content-Length` in a block of header lines.
///
/// The field name is compared case-insensitively; the value must be decimal
/// digits, optionally surrounded by spaces or tabs. Returns `None` when the
/// field is absent, empty, malformed or does not fit in `usize`.
pub fn content_length(headers: &[u8]) -> Option<usize> {
    headers
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .find(|line| {
            line.len() >= CONTENT_LENGTH.len()
                && line[..CONTENT_LENGTH.len()].eq_ignore_ascii_case(CONTENT_LENGTH)
        })
        .and_then(|line| parse_decimal(trim(&line[CONTENT_LENGTH.len()..])))
}

fn trim(mut value: &[u8]) -> &[u8] {
    while let [b' ' | b'\t', rest @ ..] = value {
        value = rest;
    }
    while let [rest @ .., b' ' | b'\t'] = value {
        value = rest;
    }
    value
}

fn parse_decimal(digits: &[u8]) -> Option<usize> {
    if digits.is_empty() {
        return None;
    }
    digits.iter().try_fold(0usize, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(usize::from(b - b'0'))
    })
}
