//! Registered resources.
//!
//! Static files and dynamic handlers are registered once at start-up into
//! fixed-capacity tables. The server takes ownership of the populated
//! [`Resources`] and only reads it afterwards; connections refer to entries by
//! index.

use heapless::Vec;

use super::method::Method;
use crate::network::error::Error;

/// Maximum number of static files that can be registered.
pub const MAX_FILES: usize = 16;

/// Maximum number of dynamic handlers that can be registered.
pub const MAX_HANDLERS: usize = 16;

/// Error reported by a [`Formatter`]; answered with 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandlerError;

/// Produces response bytes or consumes request body bytes.
///
/// The server calls a formatter in two patterns:
///
/// - with a non-empty `input` and an empty `output` to deliver one chunk of a
///   POST body;
/// - with an `output` buffer to render the response body, returning how many
///   bytes were written. For GET the input is the raw request head; for POST
///   it is empty.
///
/// Any `Fn(&mut [u8], &[u8]) -> Result<usize, HandlerError>` is a formatter;
/// user context is whatever the closure captures.
pub trait Formatter {
    /// Run the formatter once.
    fn format(&self, output: &mut [u8], input: &[u8]) -> Result<usize, HandlerError>;
}

impl<F> Formatter for F
where
    F: Fn(&mut [u8], &[u8]) -> Result<usize, HandlerError>,
{
    fn format(&self, output: &mut [u8], input: &[u8]) -> Result<usize, HandlerError> {
        self(output, input)
    }
}

/// A file served verbatim from memory.
#[derive(Debug, Clone, Copy)]
pub struct StaticFile<'r> {
    /// Exact request path, e.g. `/index.html`.
    pub path: &'r str,
    /// File contents.
    pub data: &'r [u8],
}

impl StaticFile<'_> {
    /// File size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A dynamic handler bound to a method and a path.
#[derive(Clone, Copy)]
pub struct Handler<'r> {
    /// Method the handler answers to.
    pub method: Method,
    /// Exact request path.
    pub path: &'r str,
    /// The formatter producing the response.
    pub formatter: &'r dyn Formatter,
}

impl core::fmt::Debug for Handler<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Handler")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// The ordered tables of static files and dynamic handlers.
///
/// Lookups return the first match in registration order.
#[derive(Debug, Default)]
pub struct Resources<'r> {
    files: Vec<StaticFile<'r>, MAX_FILES>,
    handlers: Vec<Handler<'r>, MAX_HANDLERS>,
}

impl<'r> Resources<'r> {
    /// Create empty tables.
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Register a static file.
    ///
    /// Returns [`Error::CapacityExceeded`] once [`MAX_FILES`] files are
    /// registered.
    pub fn register_file(&mut self, path: &'r str, data: &'r [u8]) -> Result<(), Error> {
        self.files
            .push(StaticFile { path, data })
            .map_err(|_| Error::CapacityExceeded)
    }

    /// Register a dynamic handler.
    ///
    /// Handlers take precedence over static files registered at the same path.
    /// Returns [`Error::CapacityExceeded`] once [`MAX_HANDLERS`] handlers are
    /// registered.
    pub fn register_handler(
        &mut self,
        method: Method,
        path: &'r str,
        formatter: &'r dyn Formatter,
    ) -> Result<(), Error> {
        self.handlers
            .push(Handler {
                method,
                path,
                formatter,
            })
            .map_err(|_| Error::CapacityExceeded)
    }

    /// Index of the first static file registered at `path`.
    pub fn find_file(&self, path: &[u8]) -> Option<usize> {
        self.files.iter().position(|f| f.path.as_bytes() == path)
    }

    /// Index of the first handler registered for `method` at `path`.
    pub fn find_handler(&self, method: Method, path: &[u8]) -> Option<usize> {
        self.handlers
            .iter()
            .position(|h| h.method == method && h.path.as_bytes() == path)
    }

    /// Static file at `index`.
    pub fn file(&self, index: usize) -> Option<&StaticFile<'r>> {
        self.files.get(index)
    }

    /// Handler at `index`.
    pub fn handler(&self, index: usize) -> Option<&Handler<'r>> {
        self.handlers.get(index)
    }

    /// Registered static files, in order.
    pub fn files(&self) -> &[StaticFile<'r>] {
        &self.files
    }

    /// Registered handlers, in order.
    pub fn handlers(&self) -> &[Handler<'r>] {
        &self.handlers
    }
}
