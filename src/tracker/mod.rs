pub mod consistency;

pub use consistency::{ConsistencyTracker, FetchStatus, FetchTicket, Snapshot};
