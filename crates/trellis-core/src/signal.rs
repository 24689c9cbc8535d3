//! Signal/slot system for Trellis.
//!
//! Signals are emitted by objects when their state changes, and connected
//! slots (callbacks) are invoked synchronously, in connection order, on the
//! emitting thread.
//!
//! # Key Types
//!
//! - [`Signal<Args>`]: a list of slots called with `&Args` on every emit
//! - [`ConnectionId`]: names one connected slot
//! - [`ConnectionGuard`]: scoped connection, removed when the guard drops
//!
//! # Reentrancy
//!
//! The connection list is snapshotted before slots run, so a slot may
//! connect, disconnect or even emit on the same signal without deadlocking.
//! Connections made during an emission are first invoked by the next one.
//!
//! # Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let selected = Signal::<usize>::new();
//!
//! let id = selected.connect(|index| {
//!     println!("option {index} selected");
//! });
//!
//! selected.emit(2);
//! assert!(selected.disconnect(id));
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::error::SignalError;

new_key_type! {
    /// Key of one slot inside a [`Signal`].
    ///
    /// Pass it to [`Signal::disconnect`] to remove that slot.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// Connected slots plus the sequence number handed to the next connection.
///
/// Slotmap keys are reused after a disconnect, so iteration order says
/// nothing about connection order; `emit` sorts by sequence instead.
struct Connections<Args> {
    slots: SlotMap<ConnectionId, (u64, Slot<Args>)>,
    next_seq: u64,
}

/// An observable event carrying a value of type `Args`.
///
/// # Type Parameter
///
/// - `Args`: what slots receive by reference; `()` for bare notifications,
///   a tuple when more than one value travels together.
pub struct Signal<Args> {
    connections: Mutex<Connections<Args>>,
    /// While set, `emit` is a no-op.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// A signal without slots.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Connections {
                slots: SlotMap::with_key(),
                next_seq: 0,
            }),
            blocked: AtomicBool::new(false),
        }
    }

    /// Add `slot`; it runs after every slot connected before it.
    ///
    /// Keep the returned id to disconnect later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = {
            let mut connections = self.connections.lock();
            let seq = connections.next_seq;
            connections.next_seq += 1;
            connections.slots.insert((seq, Arc::new(slot)))
        };
        tracing::trace!(target: "trellis_core::signal", ?id, "slot connected");
        id
    }

    /// Remove one slot.
    ///
    /// Returns `false` when `id` was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().slots.remove(id).is_some()
    }

    /// Disconnect a slot, reporting an unknown ID as an error.
    pub fn try_disconnect(&self, id: ConnectionId) -> Result<(), SignalError> {
        if self.disconnect(id) {
            Ok(())
        } else {
            Err(SignalError::InvalidConnection)
        }
    }

    /// Remove every slot.
    pub fn disconnect_all(&self) {
        self.connections.lock().slots.clear();
    }

    pub fn connection_count(&self) -> usize {
        self.connections.lock().slots.len()
    }

    /// Suppress (or re-enable) emission.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// If the signal is blocked, this does nothing.
    #[tracing::instrument(skip_all, target = "trellis_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "trellis_core::signal", "signal blocked, skipping emit");
            return;
        }

        let mut ordered: Vec<(u64, Slot<Args>)> =
            self.connections.lock().slots.values().cloned().collect();
        ordered.sort_unstable_by_key(|&(seq, _)| seq);
        let slots: Vec<Slot<Args>> = ordered.into_iter().map(|(_, slot)| slot).collect();
        tracing::trace!(target: "trellis_core::signal", connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }

    /// Connect a slot that is disconnected when the returned guard is dropped.
    ///
    /// The guard only holds a weak reference, so it never keeps the signal alive.
    pub fn connect_scoped<F>(self: &Arc<Self>, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            signal: Arc::downgrade(self),
            id,
        }
    }
}

/// RAII guard that disconnects its slot when dropped.
pub struct ConnectionGuard<Args: 'static> {
    signal: Weak<Signal<Args>>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if let Some(signal) = self.signal.upgrade() {
            signal.disconnect(self.id);
        }
    }
}

static_assertions::assert_impl_all!(Signal<String>: Send, Sync);
static_assertions::assert_impl_all!(ConnectionGuard<i32>: Send, Sync);
