//! Client side I/O: the WebSocket transport and the persisted name.

pub mod name_store;
pub mod transport;

pub use name_store::{FileNameStore, MemoryNameStore, NameStore};
pub use transport::{TransportEvent, TransportHandle};
