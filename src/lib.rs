//! # parlor
//!
//! A terminal chat widget that exchanges raw WebSocket text frames, and
//! the small relay it talks to.
//!
//! The widget opens one connection at startup, announces the user's
//! display name as its first frame, renders inbound frames as left-hand
//! bubbles and its own messages as right-hand bubbles, and shows a
//! dismissible banner when the connection closes. The relay forwards
//! frames between widgets.
//!
//! ## Architecture
//!
//! ```text
//! parlor-chat                              parlor-relay
//!     │                                        │
//!     ├── TUI runtime (tui/)                   ├── WS Handler (relay/)
//!     │     crossterm keys, ratatui render     ├── Operator console
//!     ├── ChatWidget (widget/)                 │
//!     │     pure events -> actions             ├── EventBus (domain/)
//!     ├── Transport + NameStore (client/)      ├── Roster (domain/)
//!     │                                        │
//!     └──────────── ws text frames ────────────┘
//! ```

pub mod app_state;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod relay;
pub mod tui;
pub mod widget;
