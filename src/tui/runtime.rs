//! Terminal runtime for the chat widget.
//!
//! Drives the event loop: keyboard events from crossterm, transport
//! events from the WebSocket task and a render tick all feed the
//! [`ChatWidget`]; the resulting [`WidgetAction`]s are executed here.

use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};

use super::keys::convert_key;
use crate::client::{NameStore, TransportHandle};
use crate::config::ClientConfig;
use crate::error::ChatError;
use crate::widget::{BannerTiming, ChatWidget, WidgetAction, WidgetEvent};

/// Interval between ticks; bounds banner timing precision.
const TICK: Duration = Duration::from_millis(100);

/// Whether the loop keeps going after a batch of actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running; redraw if `render` is set.
    Continue {
        /// A redraw was requested.
        render: bool,
    },
    /// Leave the loop.
    Quit,
}

/// Executes widget actions against the transport and the name store.
///
/// Send and store failures are logged and otherwise ignored.
pub fn apply_actions<S: NameStore>(
    actions: Vec<WidgetAction>,
    transport: &TransportHandle,
    store: &S,
) -> Flow {
    let mut render = false;
    for action in actions {
        match action {
            WidgetAction::Render => render = true,
            WidgetAction::SendFrame(text) => {
                if let Err(e) = transport.send(text) {
                    tracing::warn!(error = %e, "dropping outbound frame");
                }
            }
            WidgetAction::StoreName(name) => {
                if let Err(e) = store.store(&name) {
                    tracing::warn!(error = %e, "could not persist display name");
                }
            }
            WidgetAction::Quit => return Flow::Quit,
        }
    }
    Flow::Continue { render }
}

/// Owns the terminal in raw mode on the alternate screen and restores it
/// on drop.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl std::fmt::Debug for TerminalGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalGuard").finish_non_exhaustive()
    }
}

impl TerminalGuard {
    fn enter() -> Result<Self, ChatError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self { terminal })
    }

    fn draw(&mut self, widget: &ChatWidget) -> Result<(), ChatError> {
        self.terminal.draw(|frame| super::render(frame, widget))?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Runs the chat widget until the user quits.
///
/// Opens the transport to `config.server_url` once; a closed connection
/// leaves the widget running with its banner so the scrollback can still
/// be read.
///
/// # Errors
///
/// Returns [`ChatError::Io`] if the terminal cannot be driven.
pub async fn run<S: NameStore>(config: &ClientConfig, store: S) -> Result<(), ChatError> {
    let stored_name = store.load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable stored name");
        None
    });
    let timing = BannerTiming {
        dismiss_after: config.banner_dismiss_after,
        fade: config.banner_fade,
    };
    let mut widget = ChatWidget::new(stored_name, timing);

    let (transport, mut transport_events) = TransportHandle::open(config.server_url.clone());
    let mut terminal = TerminalGuard::enter()?;
    let mut key_events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK);

    terminal.draw(&widget)?;

    loop {
        let actions = tokio::select! {
            maybe_event = key_events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    convert_key(key).map_or_else(Vec::new, |key| {
                        widget.handle(WidgetEvent::Key(key), Instant::now())
                    })
                }
                Some(Ok(Event::Resize(_, _))) => widget.handle(WidgetEvent::Resize, Instant::now()),
                Some(Ok(_)) => Vec::new(),
                Some(Err(e)) => return Err(e.into()),
                None => vec![WidgetAction::Quit],
            },
            Some(event) = transport_events.recv() => {
                widget.handle(event.into(), Instant::now())
            }
            _ = ticker.tick() => widget.handle(WidgetEvent::Tick, Instant::now()),
        };

        match apply_actions(actions, &transport, &store) {
            Flow::Quit => break,
            Flow::Continue { render: true } => terminal.draw(&widget)?,
            Flow::Continue { render: false } => {}
        }
    }

    drop(terminal);
    transport.close().await;
    Ok(())
}
