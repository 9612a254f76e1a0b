//! Chat widget state machine.
//!
//! [`ChatWidget`] holds everything the view shows (scrollback, input
//! field, banner, name prompt, connection state) and is completely
//! decoupled from the terminal and the socket. It consumes
//! [`WidgetEvent`]s together with the current [`Instant`] and produces
//! [`WidgetAction`]s for the runtime to execute.

use std::time::Instant;

use super::banner::{Banner, BannerPhase, BannerTiming};
use super::input::{InputBuffer, KeyInput};
use super::message::Bubble;
use super::name_prompt::{NamePrompt, PromptOutcome};
use super::{ConnectionState, WidgetAction, WidgetEvent};
use crate::domain::DisplayName;

/// Lines scrolled by `PageUp`/`PageDown`.
const PAGE_LINES: usize = 10;

/// Chat widget state machine.
#[derive(Debug, Clone)]
pub struct ChatWidget {
    connection: ConnectionState,
    name: Option<DisplayName>,
    name_sent: bool,
    prompt: Option<NamePrompt>,
    scrollback: Vec<Bubble>,
    input: InputBuffer,
    scroll_back: usize,
    banner: Option<Banner>,
    banner_phase: Option<BannerPhase>,
    banner_timing: BannerTiming,
}

impl ChatWidget {
    /// Creates the widget. Without a stored name the name prompt is shown
    /// and blocks chatting until it is answered.
    #[must_use]
    pub fn new(stored_name: Option<DisplayName>, banner_timing: BannerTiming) -> Self {
        let prompt = stored_name.is_none().then(NamePrompt::new);
        Self {
            connection: ConnectionState::Connecting,
            name: stored_name,
            name_sent: false,
            prompt,
            scrollback: Vec::new(),
            input: InputBuffer::new(),
            scroll_back: 0,
            banner: None,
            banner_phase: None,
            banner_timing,
        }
    }

    /// Processes an event and returns actions.
    pub fn handle(&mut self, event: WidgetEvent, now: Instant) -> Vec<WidgetAction> {
        match event {
            WidgetEvent::Opened => {
                self.connection = ConnectionState::Open;
                let mut actions = self.flush_name();
                actions.push(WidgetAction::Render);
                actions
            }
            WidgetEvent::FrameReceived(text) => {
                self.scrollback.push(Bubble::received(text));
                self.scroll_back = 0;
                vec![WidgetAction::Render]
            }
            WidgetEvent::TransportError(message) => {
                tracing::warn!(error = %message, "transport error");
                vec![]
            }
            WidgetEvent::Closed { reason } => {
                self.connection = ConnectionState::Closed;
                self.show_banner(Banner::for_close(reason.as_deref(), now, self.banner_timing), now);
                vec![WidgetAction::Render]
            }
            WidgetEvent::Key(key) => self.handle_key(key, now),
            WidgetEvent::Tick => self.tick(now),
            WidgetEvent::Resize => vec![WidgetAction::Render],
        }
    }

    fn handle_key(&mut self, key: KeyInput, now: Instant) -> Vec<WidgetAction> {
        match key {
            KeyInput::Quit => return vec![WidgetAction::Quit],
            KeyInput::Esc => return self.dismiss_banner(now),
            _ => {}
        }

        if let Some(prompt) = &mut self.prompt {
            return match prompt.key(key) {
                PromptOutcome::Editing => vec![WidgetAction::Render],
                PromptOutcome::Submitted(name) => self.accept_name(name),
            };
        }

        match key {
            KeyInput::Enter | KeyInput::Send => self.send(),
            KeyInput::Up => self.scroll_by(1, true),
            KeyInput::PageUp => self.scroll_by(PAGE_LINES, true),
            KeyInput::Down => self.scroll_by(1, false),
            KeyInput::PageDown => self.scroll_by(PAGE_LINES, false),
            other => {
                if self.input.edit(other) {
                    vec![WidgetAction::Render]
                } else {
                    vec![]
                }
            }
        }
    }

    fn accept_name(&mut self, name: DisplayName) -> Vec<WidgetAction> {
        self.prompt = None;
        self.name = Some(name.clone());
        let mut actions = self.flush_name();
        actions.push(WidgetAction::StoreName(name));
        actions.push(WidgetAction::Render);
        actions
    }

    /// Emits the name frame once, as soon as there is a name and an open
    /// connection.
    fn flush_name(&mut self) -> Vec<WidgetAction> {
        match &self.name {
            Some(name) if !self.name_sent && self.connection == ConnectionState::Open => {
                self.name_sent = true;
                vec![WidgetAction::SendFrame(name.to_string())]
            }
            _ => vec![],
        }
    }

    fn send(&mut self) -> Vec<WidgetAction> {
        if self.prompt.is_some()
            || self.input.is_blank()
            || self.connection != ConnectionState::Open
        {
            return vec![];
        }
        let text = self.input.take();
        self.scrollback.push(Bubble::sent(text.clone()));
        self.scroll_back = 0;
        vec![WidgetAction::SendFrame(text), WidgetAction::Render]
    }

    fn scroll_by(&mut self, lines: usize, back: bool) -> Vec<WidgetAction> {
        self.scroll_back = if back {
            self.scroll_back.saturating_add(lines)
        } else {
            self.scroll_back.saturating_sub(lines)
        };
        vec![WidgetAction::Render]
    }

    fn show_banner(&mut self, banner: Banner, now: Instant) {
        self.banner_phase = Some(banner.phase(now));
        self.banner = Some(banner);
    }

    fn dismiss_banner(&mut self, now: Instant) -> Vec<WidgetAction> {
        let Some(banner) = &mut self.banner else {
            return vec![];
        };
        banner.dismiss(now);
        let _ = self.tick(now);
        vec![WidgetAction::Render]
    }

    fn tick(&mut self, now: Instant) -> Vec<WidgetAction> {
        let Some(banner) = &self.banner else {
            return vec![];
        };
        let phase = banner.phase(now);
        if self.banner_phase == Some(phase) {
            return vec![];
        }
        if phase == BannerPhase::Removed {
            self.banner = None;
            self.banner_phase = None;
        } else {
            self.banner_phase = Some(phase);
        }
        vec![WidgetAction::Render]
    }

    /// Current connection state.
    #[must_use]
    pub const fn connection_state(&self) -> ConnectionState {
        self.connection
    }

    /// Display name, once known.
    #[must_use]
    pub const fn name(&self) -> Option<&DisplayName> {
        self.name.as_ref()
    }

    /// The name prompt, while it blocks the chat.
    #[must_use]
    pub const fn prompt(&self) -> Option<&NamePrompt> {
        self.prompt.as_ref()
    }

    /// All bubbles, oldest first.
    #[must_use]
    pub fn scrollback(&self) -> &[Bubble] {
        &self.scrollback
    }

    /// The chat input field.
    #[must_use]
    pub const fn input(&self) -> &InputBuffer {
        &self.input
    }

    /// Lines scrolled back from the newest message.
    #[must_use]
    pub const fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    /// The banner and its phase, while one is shown.
    #[must_use]
    pub fn banner(&self) -> Option<(&Banner, BannerPhase)> {
        self.banner.as_ref().zip(self.banner_phase)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::widget::banner::DEFAULT_CLOSE_MESSAGE;
    use crate::widget::message::Side;

    fn name(raw: &str) -> DisplayName {
        let Ok(name) = DisplayName::parse(raw) else {
            panic!("valid name");
        };
        name
    }

    fn type_text(widget: &mut ChatWidget, text: &str, now: Instant) {
        for c in text.chars() {
            let _ = widget.handle(WidgetEvent::Key(KeyInput::Char(c)), now);
        }
    }

    fn frames(actions: &[WidgetAction]) -> Vec<&str> {
        actions
            .iter()
            .filter_map(|a| match a {
                WidgetAction::SendFrame(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn open_widget(now: Instant) -> ChatWidget {
        let mut widget = ChatWidget::new(Some(name("alice")), BannerTiming::default());
        let _ = widget.handle(WidgetEvent::Opened, now);
        widget
    }

    #[test]
    fn stored_name_is_sent_once_on_open() {
        let now = Instant::now();
        let mut widget = ChatWidget::new(Some(name("alice")), BannerTiming::default());
        assert!(widget.prompt().is_none());

        let actions = widget.handle(WidgetEvent::Opened, now);
        assert_eq!(frames(&actions), vec!["alice"]);
        assert_eq!(widget.connection_state(), ConnectionState::Open);

        let again = widget.handle(WidgetEvent::Opened, now);
        assert!(frames(&again).is_empty());
    }

    #[test]
    fn send_appends_right_bubble_and_transmits_raw_text() {
        let now = Instant::now();
        let mut widget = open_widget(now);
        type_text(&mut widget, " hi there ", now);

        let actions = widget.handle(WidgetEvent::Key(KeyInput::Enter), now);
        assert_eq!(frames(&actions), vec![" hi there "]);
        assert_eq!(widget.scrollback(), &[Bubble::sent(" hi there ")]);
        assert_eq!(widget.input().text(), "");
    }

    #[test]
    fn enter_and_send_key_are_equivalent() {
        let now = Instant::now();
        let mut by_enter = open_widget(now);
        let mut by_send = open_widget(now);
        type_text(&mut by_enter, "same", now);
        type_text(&mut by_send, "same", now);

        let enter_actions = by_enter.handle(WidgetEvent::Key(KeyInput::Enter), now);
        let send_actions = by_send.handle(WidgetEvent::Key(KeyInput::Send), now);
        assert_eq!(frames(&send_actions), vec!["same"]);
        assert_eq!(enter_actions, send_actions);
        assert_eq!(by_enter.scrollback(), by_send.scrollback());
        assert_eq!(by_send.input().text(), "");
    }

    #[test]
    fn empty_or_blank_input_sends_nothing() {
        let now = Instant::now();
        let mut widget = open_widget(now);
        assert!(widget.handle(WidgetEvent::Key(KeyInput::Send), now).is_empty());

        type_text(&mut widget, "   ", now);
        assert!(widget.handle(WidgetEvent::Key(KeyInput::Enter), now).is_empty());
        assert!(widget.scrollback().is_empty());
        assert_eq!(widget.input().text(), "   ");
    }

    #[test]
    fn other_keys_never_send() {
        let now = Instant::now();
        let mut widget = open_widget(now);
        type_text(&mut widget, "draft", now);
        for key in [KeyInput::Tab, KeyInput::Up, KeyInput::Down, KeyInput::Left, KeyInput::Home] {
            let actions = widget.handle(WidgetEvent::Key(key), now);
            assert!(frames(&actions).is_empty());
        }
        assert!(widget.scrollback().is_empty());
        assert_eq!(widget.input().text(), "draft");
    }

    #[test]
    fn sending_before_open_is_refused() {
        let now = Instant::now();
        let mut widget = ChatWidget::new(Some(name("alice")), BannerTiming::default());
        type_text(&mut widget, "early", now);
        assert!(widget.handle(WidgetEvent::Key(KeyInput::Send), now).is_empty());
        assert_eq!(widget.input().text(), "early");
    }

    #[test]
    fn inbound_frames_append_left_bubbles_in_order() {
        let now = Instant::now();
        let mut widget = open_widget(now);
        for text in ["one", "two", "three"] {
            let _ = widget.handle(WidgetEvent::FrameReceived(text.to_string()), now);
        }
        let texts: Vec<&str> = widget.scrollback().iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
        assert!(widget.scrollback().iter().all(|b| b.side == Side::Received));
    }

    #[test]
    fn prompt_blocks_chat_until_name_submitted() {
        let now = Instant::now();
        let mut widget = ChatWidget::new(None, BannerTiming::default());
        let _ = widget.handle(WidgetEvent::Opened, now);
        assert!(widget.prompt().is_some());

        type_text(&mut widget, "bob", now);
        assert_eq!(widget.input().text(), "");

        let actions = widget.handle(WidgetEvent::Key(KeyInput::Enter), now);
        assert_eq!(frames(&actions), vec!["bob"]);
        assert!(actions.contains(&WidgetAction::StoreName(name("bob"))));
        assert!(widget.prompt().is_none());
        assert_eq!(widget.name(), Some(&name("bob")));
    }

    #[test]
    fn blank_prompt_submit_keeps_overlay() {
        let now = Instant::now();
        let mut widget = ChatWidget::new(None, BannerTiming::default());
        let _ = widget.handle(WidgetEvent::Opened, now);
        let actions = widget.handle(WidgetEvent::Key(KeyInput::Enter), now);
        assert!(frames(&actions).is_empty());
        assert!(widget.prompt().is_some());
    }

    #[test]
    fn name_submitted_before_open_is_sent_on_open() {
        let now = Instant::now();
        let mut widget = ChatWidget::new(None, BannerTiming::default());
        type_text(&mut widget, "carol", now);

        let actions = widget.handle(WidgetEvent::Key(KeyInput::Enter), now);
        assert!(frames(&actions).is_empty());
        assert!(actions.contains(&WidgetAction::StoreName(name("carol"))));

        let actions = widget.handle(WidgetEvent::Opened, now);
        assert_eq!(frames(&actions), vec!["carol"]);
    }

    #[test]
    fn close_shows_reason_banner_then_removes_it() {
        let t0 = Instant::now();
        let timing = BannerTiming::default();
        let mut widget = open_widget(t0);

        let _ = widget.handle(
            WidgetEvent::Closed {
                reason: Some("server shutting down".to_string()),
            },
            t0,
        );
        assert_eq!(widget.connection_state(), ConnectionState::Closed);
        let Some((banner, BannerPhase::Visible)) = widget.banner() else {
            panic!("expected a visible banner");
        };
        assert_eq!(banner.text(), "server shutting down");

        let fading_at = t0 + timing.dismiss_after;
        assert_eq!(widget.handle(WidgetEvent::Tick, fading_at), vec![WidgetAction::Render]);
        assert!(matches!(widget.banner(), Some((_, BannerPhase::Fading))));
        assert!(widget.handle(WidgetEvent::Tick, fading_at).is_empty());

        let gone_at = fading_at + timing.fade;
        let _ = widget.handle(WidgetEvent::Tick, gone_at);
        assert!(widget.banner().is_none());
    }

    #[test]
    fn close_without_reason_uses_default_text() {
        let t0 = Instant::now();
        let mut widget = open_widget(t0);
        let _ = widget.handle(WidgetEvent::Closed { reason: None }, t0);
        let Some((banner, _)) = widget.banner() else {
            panic!("expected a banner");
        };
        assert_eq!(banner.text(), DEFAULT_CLOSE_MESSAGE);
    }

    #[test]
    fn dismissing_banner_fades_it_early() {
        let t0 = Instant::now();
        let timing = BannerTiming::default();
        let mut widget = open_widget(t0);
        let _ = widget.handle(WidgetEvent::Closed { reason: None }, t0);

        let t1 = t0 + Duration::from_millis(100);
        let _ = widget.handle(WidgetEvent::Key(KeyInput::Esc), t1);
        assert!(matches!(widget.banner(), Some((_, BannerPhase::Fading))));

        let _ = widget.handle(WidgetEvent::Tick, t1 + timing.fade);
        assert!(widget.banner().is_none());
    }

    #[test]
    fn sending_after_close_is_refused() {
        let now = Instant::now();
        let mut widget = open_widget(now);
        let _ = widget.handle(WidgetEvent::Closed { reason: None }, now);
        type_text(&mut widget, "anyone?", now);
        assert!(widget.handle(WidgetEvent::Key(KeyInput::Send), now).is_empty());
    }

    #[test]
    fn transport_errors_are_not_user_visible() {
        let now = Instant::now();
        let mut widget = open_widget(now);
        let actions = widget.handle(WidgetEvent::TransportError("reset".to_string()), now);
        assert!(actions.is_empty());
        assert!(widget.banner().is_none());
    }

    #[test]
    fn scrolling_snaps_back_on_new_message() {
        let now = Instant::now();
        let mut widget = open_widget(now);
        let _ = widget.handle(WidgetEvent::Key(KeyInput::PageUp), now);
        assert_eq!(widget.scroll_back(), PAGE_LINES);
        let _ = widget.handle(WidgetEvent::Key(KeyInput::Down), now);
        assert_eq!(widget.scroll_back(), PAGE_LINES - 1);

        let _ = widget.handle(WidgetEvent::FrameReceived("new".to_string()), now);
        assert_eq!(widget.scroll_back(), 0);
    }

    #[test]
    fn quit_key_quits_even_with_prompt() {
        let now = Instant::now();
        let mut widget = ChatWidget::new(None, BannerTiming::default());
        assert_eq!(
            widget.handle(WidgetEvent::Key(KeyInput::Quit), now),
            vec![WidgetAction::Quit]
        );
    }
}
