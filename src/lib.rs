//! # emberhttp - embedded HTTP server engine
//!
//! A small HTTP/1.1 server engine for devices running a lightweight TCP/IP
//! stack. One execution context drives every client connection through a
//! readiness (select-style) multiplexer, with fixed-size per-connection memory
//! and no heap allocation.
//!
//! ## Features
//!
//! - **Incremental request buffering**: requests split across any number of
//!   non-blocking reads are reassembled without losing or duplicating bytes
//! - **GET**: static files streamed with backpressure, or dynamic handlers
//!   rendered in one pass
//! - **POST**: request bodies streamed chunk by chunk into a handler, so bodies
//!   may be larger than the receive buffer
//! - **Bounded memory**: every buffer is sized at compile time
//! - **Transport agnostic**: the socket layer and the multiplexer are traits
//!   implemented by the surrounding application
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! emberhttp = "0.1.0"
//! ```
//!
//! ### Registering resources
//!
//! ```rust
//! use emberhttp::network::application::http::{HandlerError, Method, Resources};
//!
//! static INDEX: &[u8] = b"<h1>It works</h1>";
//!
//! let uptime = |out: &mut [u8], _input: &[u8]| -> Result<usize, HandlerError> {
//!     let reply = b"42";
//!     out[..reply.len()].copy_from_slice(reply);
//!     Ok(reply.len())
//! };
//!
//! let mut resources = Resources::new();
//! resources.register_file("/index.html", INDEX).unwrap();
//! resources.register_handler(Method::Get, "/uptime", &uptime).unwrap();
//! ```
//!
//! The populated [`Resources`](network::application::http::Resources) are then
//! handed to a [`Server`](network::application::http::server::Server) together
//! with a listening socket and a selector from your TCP/IP stack.
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Linux-based IoT devices (Raspberry Pi, etc.)
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

/// Network abstraction layer and the HTTP server built on it.
///
/// This module contains the transport traits consumed by the server and the
/// application layer protocol implementation.
pub mod network;
