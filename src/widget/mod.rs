//! Chat widget view model.
//!
//! A pure state machine: it consumes [`WidgetEvent`]s and produces
//! [`WidgetAction`]s, with no terminal or socket dependencies. The
//! [`crate::tui`] module renders it and feeds it events.

pub mod action;
pub mod app;
pub mod banner;
pub mod event;
pub mod input;
pub mod message;
pub mod name_prompt;
pub mod state;

pub use action::WidgetAction;
pub use app::ChatWidget;
pub use banner::{Banner, BannerPhase, BannerTiming};
pub use event::WidgetEvent;
pub use input::{InputBuffer, KeyInput};
pub use message::{Bubble, Side};
pub use name_prompt::{NamePrompt, PromptOutcome};
pub use state::ConnectionState;
