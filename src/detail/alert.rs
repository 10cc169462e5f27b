//! # Transient Alert
//!
//! A self-dismissing notice. Shown with a message, it hides itself once
//! [`ALERT_TIMEOUT`] has elapsed and emits [`AlertTimedOut`] exactly once so
//! its owner can clear its own flag.
//!
//! The alert is plain state driven by [`tokio::time::Instant`]; the
//! presentation layer renders [`TransientAlert::phase`] and never triggers
//! the transition itself.
//!
//! Showing an alert that is already visible replaces its message but keeps
//! the original deadline: the timer is one-shot per appearance.

use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// How long an alert stays on screen.
pub const ALERT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Visual style of an alert. Failed mutations are the only thing the
/// dashboard alerts on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlertKind {
    #[default]
    Danger,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Danger => "danger",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPhase {
    Hidden,
    Shown { deadline: Instant },
}

/// Completion signal emitted when a shown alert times out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertTimedOut;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientAlert {
    kind: AlertKind,
    message: String,
    phase: AlertPhase,
}

impl Default for TransientAlert {
    fn default() -> Self {
        Self {
            kind: AlertKind::default(),
            message: String::new(),
            phase: AlertPhase::Hidden,
        }
    }
}

impl TransientAlert {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the alert as of `now`.
    pub fn show_at(&mut self, kind: AlertKind, message: impl Into<String>, now: Instant) {
        self.kind = kind;
        self.message = message.into();
        if self.phase == AlertPhase::Hidden {
            self.phase = AlertPhase::Shown {
                deadline: now + ALERT_TIMEOUT,
            };
        }
    }

    pub fn show(&mut self, kind: AlertKind, message: impl Into<String>) {
        self.show_at(kind, message, Instant::now());
    }

    /// Performs `Shown -> Hidden` if the deadline has passed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<AlertTimedOut> {
        match self.phase {
            AlertPhase::Shown { deadline } if now >= deadline => {
                self.phase = AlertPhase::Hidden;
                Some(AlertTimedOut)
            }
            _ => None,
        }
    }

    /// Sleeps until the deadline, then times the alert out.
    ///
    /// Returns `None` immediately if the alert is hidden.
    pub async fn wait_for_timeout(&mut self) -> Option<AlertTimedOut> {
        let AlertPhase::Shown { deadline } = self.phase else {
            return None;
        };
        tokio::time::sleep_until(deadline).await;
        self.poll(Instant::now())
    }

    /// Hides the alert without emitting a completion signal.
    pub fn dismiss(&mut self) {
        self.phase = AlertPhase::Hidden;
    }

    pub fn phase(&self) -> AlertPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.phase, AlertPhase::Shown { .. })
    }

    pub fn kind(&self) -> AlertKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_hides_after_timeout() {
        let mut alert = TransientAlert::new();
        let start = Instant::now();
        alert.show_at(AlertKind::Danger, "Product not found", start);
        assert!(alert.is_visible());

        assert_eq!(alert.poll(start + Duration::from_millis(1999)), None);
        assert!(alert.is_visible());

        assert_eq!(alert.poll(start + ALERT_TIMEOUT), Some(AlertTimedOut));
        assert_eq!(alert.phase(), AlertPhase::Hidden);

        // The completion signal fires once.
        assert_eq!(alert.poll(start + Duration::from_secs(10)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reshow_keeps_first_deadline() {
        let mut alert = TransientAlert::new();
        let start = Instant::now();
        alert.show_at(AlertKind::Danger, "first", start);
        alert.show_at(
            AlertKind::Danger,
            "second",
            start + Duration::from_millis(500),
        );

        assert_eq!(alert.message(), "second");
        assert_eq!(
            alert.phase(),
            AlertPhase::Shown {
                deadline: start + ALERT_TIMEOUT
            }
        );
        assert_eq!(alert.poll(start + ALERT_TIMEOUT), Some(AlertTimedOut));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_timeout_uses_clock() {
        let mut alert = TransientAlert::new();
        let start = Instant::now();
        alert.show(AlertKind::Danger, "boom");

        assert_eq!(alert.wait_for_timeout().await, Some(AlertTimedOut));
        assert!(Instant::now() - start >= ALERT_TIMEOUT);
        assert!(!alert.is_visible());

        assert_eq!(alert.wait_for_timeout().await, None);
    }

    #[test]
    fn test_kind_strings() {
        assert_eq!(AlertKind::Danger.to_string(), "danger");
        assert_eq!(AlertKind::default(), AlertKind::Danger);
    }
}
