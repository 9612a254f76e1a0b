//! Domain layer: identifiers, display names, relay events and the roster.
//!
//! These types are shared by the relay and the chat widget. The relay
//! broadcasts [`RelayEvent`]s through the [`EventBus`] and tracks live
//! connections in the [`Roster`]; the widget only needs [`DisplayName`].

pub mod connection_id;
pub mod display_name;
pub mod event_bus;
pub mod relay_event;
pub mod roster;

pub use connection_id::ConnectionId;
pub use display_name::DisplayName;
pub use event_bus::EventBus;
pub use relay_event::{Origin, RelayEvent};
pub use roster::Roster;
