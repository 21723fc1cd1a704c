use std::sync::mpsc::{SyncSender, TrySendError};

use tracing::trace;

use crate::train::snapshot::Snapshot;

/// Receives snapshots from the training loop.
///
/// Called synchronously from inside the loop; implementations must return
/// quickly.
pub trait Observer {
    fn observe(&mut self, snapshot: Snapshot);
}

impl<F: FnMut(Snapshot)> Observer for F {
    fn observe(&mut self, snapshot: Snapshot) {
        self(snapshot)
    }
}

/// Ignores every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl Observer for Discard {
    fn observe(&mut self, _snapshot: Snapshot) {}
}

/// Forwards snapshots into a bounded channel without ever blocking.
///
/// When the buffer is full or the receiver is gone the snapshot is dropped
/// and counted.
#[derive(Debug)]
pub struct ChannelObserver {
    tx: SyncSender<Snapshot>,
    dropped: usize,
}

impl ChannelObserver {
    pub fn new(tx: SyncSender<Snapshot>) -> ChannelObserver {
        ChannelObserver { tx, dropped: 0 }
    }

    /// Snapshots that could not be delivered so far.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl Observer for ChannelObserver {
    fn observe(&mut self, snapshot: Snapshot) {
        match self.tx.try_send(snapshot) {
            Ok(()) => {}
            Err(TrySendError::Full(s)) => {
                self.dropped += 1;
                trace!(iteration = s.iteration, "snapshot buffer full, dropping");
            }
            Err(TrySendError::Disconnected(s)) => {
                self.dropped += 1;
                trace!(iteration = s.iteration, "snapshot receiver gone, dropping");
            }
        }
    }
}
