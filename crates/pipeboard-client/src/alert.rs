//! Transient alert stack
//!
//! Every failed client operation records exactly one alert. Alerts stay
//! visible for [`ALERT_TTL`], fade for [`ALERT_FADE`], and are pruned once
//! expired. The host UI is expected to poll [`AlertStack::active`] and render
//! whatever is live; nothing here touches a display directly.

use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use web_time::Instant;

/// How long an alert stays fully visible
pub const ALERT_TTL: Duration = Duration::from_secs(5);

/// Fade-out period after the visible window, before removal
pub const ALERT_FADE: Duration = Duration::from_millis(150);

/// A single transient notification
#[derive(Debug, Clone)]
pub struct Alert {
    /// Message displayed to the user
    pub message: String,
    created_at: Instant,
}

/// Display phase of an alert at a given point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPhase {
    /// Within the visible window
    Visible,
    /// Past the visible window, fading out
    Fading,
    /// Past the fade window, due for removal
    Expired,
}

impl Alert {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            created_at: Instant::now(),
        }
    }

    #[cfg(test)]
    fn with_created_at(message: &str, created_at: Instant) -> Self {
        Self {
            message: message.to_string(),
            created_at,
        }
    }

    /// Time elapsed since the alert was created
    pub fn age(&self) -> Duration {
        self.phase_age(Instant::now())
    }

    /// Current display phase
    pub fn phase(&self) -> AlertPhase {
        self.phase_at(Instant::now())
    }

    fn phase_age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    fn phase_at(&self, now: Instant) -> AlertPhase {
        let age = self.phase_age(now);
        if age < ALERT_TTL {
            AlertPhase::Visible
        } else if age < ALERT_TTL + ALERT_FADE {
            AlertPhase::Fading
        } else {
            AlertPhase::Expired
        }
    }
}

/// Sink for failure notifications
///
/// Seam for tests and alternative frontends; [`AlertStack`] is the default
/// implementation.
pub trait AlertSink: Send + Sync {
    /// Record one alert
    fn push(&self, message: &str);
}

/// Ordered stack of live alerts
#[derive(Debug, Default)]
pub struct AlertStack {
    alerts: Mutex<Vec<Alert>>,
}

impl AlertStack {
    /// Create an empty alert stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared process-wide stack, created lazily on first use
    ///
    /// Clients built without an explicit sink record their alerts here.
    pub fn global() -> Arc<AlertStack> {
        static GLOBAL: OnceLock<Arc<AlertStack>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(AlertStack::new())).clone()
    }

    /// Prune expired alerts and return the live ones, oldest first
    pub fn active(&self) -> Vec<Alert> {
        let now = Instant::now();
        let mut alerts = self.lock();
        alerts.retain(|alert| alert.phase_at(now) != AlertPhase::Expired);
        alerts.clone()
    }

    /// Number of recorded alerts, including ones not yet pruned
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the stack holds no alerts
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop all alerts
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Alert>> {
        self.alerts.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AlertSink for AlertStack {
    fn push(&self, message: &str) {
        self.lock().push(Alert::new(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_active_preserve_order() {
        let stack = AlertStack::new();
        stack.push("first");
        stack.push("second");

        let active = stack.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].message, "first");
        assert_eq!(active[1].message, "second");
    }

    #[test]
    fn test_phase_transitions() {
        let start = Instant::now();
        let alert = Alert::with_created_at("msg", start);

        assert_eq!(alert.phase_at(start), AlertPhase::Visible);
        assert_eq!(
            alert.phase_at(start + ALERT_TTL - Duration::from_millis(1)),
            AlertPhase::Visible
        );
        assert_eq!(alert.phase_at(start + ALERT_TTL), AlertPhase::Fading);
        assert_eq!(
            alert.phase_at(start + ALERT_TTL + ALERT_FADE),
            AlertPhase::Expired
        );
    }

    #[test]
    fn test_active_prunes_expired() {
        let stack = AlertStack::new();
        let past = Instant::now()
            .checked_sub(ALERT_TTL + ALERT_FADE + Duration::from_secs(1))
            .expect("Clock should predate the alert window");
        let expired = Alert::with_created_at("old", past);
        stack.lock().push(expired);
        stack.push("fresh");

        let active = stack.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "fresh");
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_clear() {
        let stack = AlertStack::new();
        stack.push("one");
        stack.clear();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_global_is_shared() {
        assert!(Arc::ptr_eq(&AlertStack::global(), &AlertStack::global()));
    }
}
