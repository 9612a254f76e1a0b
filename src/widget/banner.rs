//! Transient disconnect banner.
//!
//! A [`Banner`] is visible until its dismiss delay elapses or the user
//! closes it, then fades for a fixed duration, then is gone. Its phase is a
//! pure function of the current [`Instant`].

use std::time::{Duration, Instant};

/// Text shown when the peer closed without a reason.
pub const DEFAULT_CLOSE_MESSAGE: &str = "server connection closed";

/// Banner timing knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerTiming {
    /// Time the banner stays fully visible.
    pub dismiss_after: Duration,
    /// Length of the fade before removal.
    pub fade: Duration,
}

impl Default for BannerTiming {
    fn default() -> Self {
        Self {
            dismiss_after: Duration::from_millis(5000),
            fade: Duration::from_millis(400),
        }
    }
}

/// Lifecycle phase of a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerPhase {
    /// Fully shown.
    Visible,
    /// Fading out.
    Fading,
    /// Gone; the owner should drop it.
    Removed,
}

/// A dismissible notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    text: String,
    shown_at: Instant,
    dismissed_at: Option<Instant>,
    timing: BannerTiming,
}

impl Banner {
    /// Shows `text` starting at `now`.
    #[must_use]
    pub fn new(text: impl Into<String>, now: Instant, timing: BannerTiming) -> Self {
        Self {
            text: text.into(),
            shown_at: now,
            dismissed_at: None,
            timing,
        }
    }

    /// Banner for a closed connection: the reason if non-empty, else
    /// [`DEFAULT_CLOSE_MESSAGE`].
    #[must_use]
    pub fn for_close(reason: Option<&str>, now: Instant, timing: BannerTiming) -> Self {
        let text = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_CLOSE_MESSAGE);
        Self::new(text, now, timing)
    }

    /// Banner text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Starts the fade now, unless it already started.
    pub fn dismiss(&mut self, now: Instant) {
        if self.phase(now) == BannerPhase::Visible {
            self.dismissed_at = Some(now);
        }
    }

    /// Phase at `now`.
    #[must_use]
    pub fn phase(&self, now: Instant) -> BannerPhase {
        let fade_from = self
            .dismissed_at
            .unwrap_or_else(|| self.shown_at + self.timing.dismiss_after);
        if now < fade_from {
            BannerPhase::Visible
        } else if now < fade_from + self.timing.fade {
            BannerPhase::Fading
        } else {
            BannerPhase::Removed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMING: BannerTiming = BannerTiming {
        dismiss_after: Duration::from_secs(5),
        fade: Duration::from_millis(500),
    };

    #[test]
    fn auto_dismisses_after_delay_and_fade() {
        let t0 = Instant::now();
        let banner = Banner::new("bye", t0, TIMING);
        assert_eq!(banner.phase(t0), BannerPhase::Visible);
        assert_eq!(banner.phase(t0 + Duration::from_millis(4999)), BannerPhase::Visible);
        assert_eq!(banner.phase(t0 + Duration::from_secs(5)), BannerPhase::Fading);
        assert_eq!(banner.phase(t0 + Duration::from_millis(5499)), BannerPhase::Fading);
        assert_eq!(banner.phase(t0 + Duration::from_millis(5500)), BannerPhase::Removed);
    }

    #[test]
    fn explicit_dismiss_fades_early() {
        let t0 = Instant::now();
        let mut banner = Banner::new("bye", t0, TIMING);
        let t1 = t0 + Duration::from_secs(1);
        banner.dismiss(t1);
        assert_eq!(banner.phase(t1), BannerPhase::Fading);
        assert_eq!(banner.phase(t1 + Duration::from_millis(500)), BannerPhase::Removed);
    }

    #[test]
    fn dismiss_during_fade_does_not_restart_it() {
        let t0 = Instant::now();
        let mut banner = Banner::new("bye", t0, TIMING);
        banner.dismiss(t0 + Duration::from_millis(5200));
        assert_eq!(banner.phase(t0 + Duration::from_millis(5500)), BannerPhase::Removed);
    }

    #[test]
    fn close_banner_prefers_reason() {
        let t0 = Instant::now();
        assert_eq!(Banner::for_close(Some("maintenance"), t0, TIMING).text(), "maintenance");
        assert_eq!(Banner::for_close(Some("  "), t0, TIMING).text(), DEFAULT_CLOSE_MESSAGE);
        assert_eq!(Banner::for_close(None, t0, TIMING).text(), DEFAULT_CLOSE_MESSAGE);
    }
}
