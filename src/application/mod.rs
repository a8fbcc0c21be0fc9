//! Application layer - store polling and the watch cycle

pub mod store_poller;
pub mod watch_cycle;

#[cfg(test)]
pub(crate) mod testing;

pub use store_poller::{StorePoller, StoreReport};
pub use watch_cycle::{CycleSummary, WatchCycle};
