//! HTTP/1.1 server engine for embedded systems.
//!
//! This module provides a lightweight HTTP server designed specifically for
//! embedded systems and `no_std` environments. It focuses on predictable memory
//! usage and on never blocking the single loop that serves every client.
//!
//! # Features
//!
//! - HTTP/1.1 request line and header block parsing
//! - Fixed-size per-connection buffers for predictable memory usage
//! - GET for static files (streamed with backpressure) and dynamic handlers
//! - POST with the request body streamed chunk by chunk into a handler
//! - Keep-alive connections, one request in flight per connection
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Selector     │───▶│    Registry     │───▶│  Request Reader │
//! │  (bounded wait) │    │  (fixed slots)  │    │  (CRLFCRLF scan)│
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                                                        │
//!                                                        ▼
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ Response Writer │◀───│   GET / POST    │◀───│   Dispatcher    │
//! │ (header + body) │    │    commands     │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Usage
//!
//! Register resources, then hand them to a [`server::Server`] along with a
//! listening socket and a selector provided by the TCP/IP stack:
//!
//! ```rust
//! use emberhttp::network::application::http::{HandlerError, Method, Resources};
//!
//! let echo = |out: &mut [u8], input: &[u8]| -> Result<usize, HandlerError> {
//!     let len = input.len().min(out.len());
//!     out[..len].copy_from_slice(&input[..len]);
//!     Ok(len)
//! };
//!
//! let mut resources = Resources::new();
//! resources.register_file("/hello.txt", b"hello").unwrap();
//! resources.register_handler(Method::Post, "/echo", &echo).unwrap();
//! assert!(resources.find_file(b"/hello.txt").is_some());
//! ```

/// Request method table.
pub mod method;

/// Content type lookup by file extension.
pub mod mime;

/// Request head parsing over byte slices.
pub mod parser;

/// Registered static files and dynamic handlers.
pub mod resource;

/// The connection-driving server.
pub mod server;

/// Response status codes and reason phrases.
pub mod status;

pub use method::Method;
pub use parser::{ParseError, RequestHead};
pub use resource::{Formatter, Handler, HandlerError, Resources, StaticFile};
pub use server::{Config, Server, StepResult};
pub use status::Status;
