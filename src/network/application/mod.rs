//! # Application Layer Network Protocols
//!
//! This module contains the application layer (OSI Layer 7) protocol engines
//! built on the core network traits.
//!
//! ## Available Protocols
//!
//! - **[`http`]**: HTTP/1.1 server engine for serving files and handler output
//!
//! ## Design Principles
//!
//! - **Connection Agnostic**: Work with any type implementing [`Tcp`](crate::network::Tcp)
//! - **No-std Compatible**: Designed for embedded systems without heap allocation
//! - **Resource Conscious**: Use fixed-size buffers and minimal memory
//! - **Non-blocking**: Never stall the loop that drives every connection

/// HTTP server implementation.
///
/// Serves registered static files and dynamic handlers over GET and POST,
/// driving every client from a single readiness loop.
pub mod http;
