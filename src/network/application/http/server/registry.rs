//! Fixed table of client slots.
//!
//! The slot array is sized at compile time; the number of slots actually
//! handed out is the configured client limit, clamped to that size. A slot
//! owns its connection (socket and buffers) from accept until release.

use core::array;

use super::connection::ClientConnection;
use crate::network::{Close, Interest, Select, Tcp};

/// Position of a connection in the [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotId(pub(super) usize);

impl SlotId {
    /// Index of the slot in the table.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Client slots of a server.
pub struct Registry<S, const N: usize> {
    slots: [Option<ClientConnection<S>>; N],
    capacity: usize,
}

impl<S, const N: usize> core::fmt::Debug for Registry<S, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

impl<S, const N: usize> Registry<S, N> {
    /// Create an empty registry handing out at most `max_clients` slots.
    pub fn new(max_clients: usize) -> Self {
        Self {
            slots: array::from_fn(|_| None),
            capacity: max_clients.min(N),
        }
    }

    /// Number of usable slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every usable slot is taken.
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// The connection in `slot`, if occupied.
    pub fn get(&self, slot: SlotId) -> Option<&ClientConnection<S>> {
        self.slots.get(slot.0).and_then(Option::as_ref)
    }

    pub(super) fn get_mut(&mut self, slot: SlotId) -> Option<&mut ClientConnection<S>> {
        self.slots.get_mut(slot.0).and_then(Option::as_mut)
    }

    /// Occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &ClientConnection<S>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|conn| (SlotId(index), conn)))
    }

    /// Ids of the occupied slots, in slot order.
    pub(super) fn occupied(&self) -> heapless::Vec<SlotId, N> {
        self.iter().map(|(slot, _)| slot).collect()
    }
}

impl<S: Tcp, const N: usize> Registry<S, N> {
    /// Place a freshly accepted socket in the first free slot and watch it for
    /// requests.
    ///
    /// The socket is handed back when no slot is free or the selector refuses
    /// it; the caller is expected to close it.
    pub fn accept<M: Select<S>>(&mut self, socket: S, selector: &mut M) -> Result<SlotId, S> {
        let Some(index) = self.slots[..self.capacity]
            .iter()
            .position(Option::is_none)
        else {
            warn!("no free client slot");
            return Err(socket);
        };

        if selector
            .register(&socket, Interest::READABLE | Interest::ERROR)
            .is_err()
        {
            warn!("failed to register client socket");
            return Err(socket);
        }

        self.slots[index] = Some(ClientConnection::new(socket));
        debug!("client accepted into slot {}", index);
        Ok(SlotId(index))
    }

    /// Tear down the connection in `slot` and free it.
    ///
    /// Deregistration and close failures are logged; the slot is freed
    /// regardless.
    pub fn release<M: Select<S>>(&mut self, slot: SlotId, selector: &mut M) {
        let Some(conn) = self.slots.get_mut(slot.0).and_then(Option::take) else {
            return;
        };

        if selector.deregister(conn.socket(), Interest::ALL).is_err() {
            warn!("failed to deregister slot {}", slot.0);
        }
        if conn.into_socket().close().is_err() {
            warn!("failed to close slot {}", slot.0);
        }
        debug!("slot {} released", slot.0);
    }
}
