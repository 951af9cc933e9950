//! Transient alert banner.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const DEFAULT_ALERT_TTL: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_ALERTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Info,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub raised_at: Instant,
}

/// Most recent alerts, newest last.
#[derive(Debug, Clone)]
pub struct AlertBanner {
    alerts: VecDeque<Alert>,
    ttl: Duration,
    max: usize,
}

impl Default for AlertBanner {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_TTL, DEFAULT_MAX_ALERTS)
    }
}

impl AlertBanner {
    pub fn new(ttl: Duration, max: usize) -> Self {
        Self {
            alerts: VecDeque::new(),
            ttl,
            max: max.max(1),
        }
    }

    pub fn push(&mut self, kind: AlertKind, message: impl Into<String>) {
        self.push_at(kind, message, Instant::now());
    }

    pub fn push_at(&mut self, kind: AlertKind, message: impl Into<String>, now: Instant) {
        self.alerts.push_back(Alert {
            kind,
            message: message.into(),
            raised_at: now,
        });
        while self.alerts.len() > self.max {
            self.alerts.pop_front();
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(AlertKind::Success, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(AlertKind::Info, message);
    }

    pub fn danger(&mut self, message: impl Into<String>) {
        self.push(AlertKind::Danger, message);
    }

    /// Drop alerts older than the lifetime.
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.alerts
            .retain(|a| now.saturating_duration_since(a.raised_at) < ttl);
    }

    pub fn alerts(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn count(&self, kind: AlertKind) -> usize {
        self.alerts.iter().filter(|a| a.kind == kind).count()
    }
}
