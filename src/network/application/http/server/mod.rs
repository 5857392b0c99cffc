//! The connection-driving server.
//!
//! A [`Server`] owns a listening socket, a readiness selector and a fixed
//! [`Registry`] of client slots. Every call to [`Server::poll`] is one loop
//! iteration:
//!
//! 1. wait on the selector for at most the configured timeout,
//! 2. if anything became ready, accept at most one pending client,
//! 3. drive every occupied slot once, in slot order, releasing any slot whose
//!    step turned out fatal.
//!
//! The selector wait is the only call allowed to block. Everything else talks
//! to the transport without blocking, so a slow client never stalls the
//! others.
//!
//! # Example
//!
//! ```rust,ignore
//! use core::sync::atomic::AtomicBool;
//! use emberhttp::network::application::http::{Config, Resources, Server};
//!
//! static RUNNING: AtomicBool = AtomicBool::new(true);
//!
//! let resources = Resources::new();
//! let mut server: Server<'_, _, _, 4> =
//!     Server::new(Config::default(), &resources, stack.listen(80)?, stack.selector());
//! server.run(&RUNNING)?;
//! server.shutdown();
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

use super::resource::Resources;
use crate::network::error::Error;
use crate::network::{Close, Listen, Select};

mod command;
mod connection;
mod get;
mod post;
mod reader;
mod response;

/// Configuration and sizing constants.
pub mod config;

/// Fixed table of client slots.
pub mod registry;

pub use command::Command;
pub use config::{
    Config, DEFAULT_MAX_CLIENTS, DEFAULT_SELECT_TIMEOUT_MS, HEADER_BUFFER_SIZE, RX_BUFFER_SIZE,
    TX_BUFFER_SIZE,
};
pub use connection::{ClientConnection, StepResult, Target};
pub use registry::{Registry, SlotId};

/// An HTTP server serving up to `N` clients.
///
/// `'r` is the lifetime of the registered resources, `L` the listening socket
/// and `M` the selector watching the accepted sockets.
pub struct Server<'r, L, M, const N: usize>
where
    L: Listen,
    M: Select<L::Connection>,
{
    config: Config,
    resources: &'r Resources<'r>,
    listener: L,
    selector: M,
    registry: Registry<L::Connection, N>,
}

impl<'r, L, M, const N: usize> core::fmt::Debug for Server<'r, L, M, N>
where
    L: Listen,
    M: Select<L::Connection>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Server")
            .field("config", &self.config)
            .field("resources", &self.resources)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl<'r, L, M, const N: usize> Server<'r, L, M, N>
where
    L: Listen,
    M: Select<L::Connection>,
{
    /// Create a server over an already listening socket.
    ///
    /// `config.max_clients` is clamped to `N`.
    pub fn new(config: Config, resources: &'r Resources<'r>, listener: L, selector: M) -> Self {
        let registry = Registry::new(config.max_clients);
        info!(
            "http server ready, {} client slots, {} ms select timeout",
            registry.capacity(),
            config.select_timeout_ms
        );
        Self {
            config,
            resources,
            listener,
            selector,
            registry,
        }
    }

    /// Run one loop iteration.
    ///
    /// Only a selector failure is reported; accept failures are logged and
    /// per-connection failures tear down that connection alone.
    pub fn poll(&mut self) -> Result<(), Error> {
        let ready = self
            .selector
            .select(self.config.select_timeout_ms)
            .map_err(|_| Error::SelectError)?;

        if ready {
            self.accept_one();
        }

        for slot in self.registry.occupied() {
            let Some(conn) = self.registry.get_mut(slot) else {
                continue;
            };
            let outcome = conn.step(self.resources, &mut self.selector);
            if outcome.is_fatal() {
                debug!("slot {} finished with {}", slot.index(), outcome);
                self.registry.release(slot, &mut self.selector);
            }
        }

        Ok(())
    }

    /// Loop [`poll`](Self::poll) while `running` is set.
    ///
    /// Clearing the flag stops the loop after the iteration in progress; pair
    /// it with [`signal`](Self::signal) to cut the selector wait short.
    pub fn run(&mut self, running: &AtomicBool) -> Result<(), Error> {
        while running.load(Ordering::Acquire) {
            self.poll()?;
        }
        info!("http server loop stopped");
        Ok(())
    }

    /// Wake a blocked selector wait.
    pub fn signal(&self) -> Result<(), Error> {
        self.selector.signal().map_err(|_| Error::SelectError)
    }

    /// Release every client slot.
    ///
    /// Responses still in flight are dropped without being flushed.
    pub fn shutdown(&mut self) {
        for slot in self.registry.occupied() {
            self.registry.release(slot, &mut self.selector);
        }
        info!("http server shut down");
    }

    /// Server configuration, with `max_clients` as given.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registered files and handlers.
    pub fn resources(&self) -> &'r Resources<'r> {
        self.resources
    }

    /// Client slots.
    pub fn registry(&self) -> &Registry<L::Connection, N> {
        &self.registry
    }

    pub fn selector(&self) -> &M {
        &self.selector
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    fn accept_one(&mut self) {
        let socket = match self.listener.accept() {
            Ok(Some(socket)) => socket,
            Ok(None) => return,
            Err(_) => {
                warn!("accept failed");
                return;
            }
        };

        if let Err(socket) = self.registry.accept(socket, &mut self.selector) {
            if socket.close().is_err() {
                warn!("failed to close rejected client");
            }
        }
    }
}
