//! Per-entity synchronization state
//!
//! ```text
//!            Mutate               Confirm (last in flight)
//!   Synced ─────────▶ Pending(n) ─────────────────────────▶ Synced
//!                        │ Reject
//!                        ▼
//!                    Reverting ── Refetched ──▶ Synced
//! ```

/// Where an entity stands relative to the server's copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// Local copy matches the last known server state
    #[default]
    Synced,
    /// Optimistic changes applied locally, `in_flight` requests unsettled
    PendingMutation { in_flight: u32 },
    /// A request failed; the local copy waits for an authoritative refetch
    Reverting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent {
    /// An optimistic change was applied and its request sent
    Mutate,
    /// A request succeeded
    Confirm,
    /// A request failed
    Reject,
    /// The authoritative collection replaced the local one
    Refetched,
}

impl SyncState {
    /// Total transition function; overlapping mutations are allowed.
    pub fn on(self, event: SyncEvent) -> SyncState {
        use SyncEvent::*;
        use SyncState::*;

        match (self, event) {
            (_, Refetched) => Synced,
            (Reverting, _) => Reverting,
            (_, Reject) => Reverting,
            (Synced, Mutate) => PendingMutation { in_flight: 1 },
            (PendingMutation { in_flight }, Mutate) => PendingMutation {
                in_flight: in_flight + 1,
            },
            (PendingMutation { in_flight }, Confirm) if in_flight > 1 => PendingMutation {
                in_flight: in_flight - 1,
            },
            (PendingMutation { .. }, Confirm) => Synced,
            (Synced, Confirm) => Synced,
        }
    }

    pub fn is_synced(&self) -> bool {
        matches!(self, SyncState::Synced)
    }
}
