//! Time-of-day access restriction.
//!
//! A [`RestrictedWindow`] describes when access is restricted, a
//! [`GateScope`] describes which paths are affected. [`AccessGate`]
//! combines both into an allow/deny decision for a single request.

use chrono::NaiveTime;
use kaiwa_shared::time::format_time_of_day;

/// Paths denied during the window in the `messaging` scope
pub const DEFAULT_GATED_PREFIXES: [&str; 3] = ["/api/conversations/", "/api/messages/", "/chats/"];

/// Paths still allowed during the window in the `all-except-exempt` scope
pub const DEFAULT_EXEMPT_PREFIXES: [&str; 3] = ["/admin/", "/api/token/", "/api/token/refresh/"];

/// Daily restricted time range. Both bounds are inclusive.
///
/// When `start` is not before `end` the window wraps midnight, e.g.
/// 21:00–06:00 restricts the evening and the early morning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestrictedWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl RestrictedWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Whether `now` falls inside the restricted window
    pub fn contains(&self, now: NaiveTime) -> bool {
        if self.start < self.end {
            self.start <= now && now <= self.end
        } else {
            now >= self.start || now <= self.end
        }
    }

    /// Plain-text explanation returned with a denied request
    pub fn denial_message(&self) -> String {
        let start = format_time_of_day(self.start);
        let end = format_time_of_day(self.end);
        format!(
            "Access to messaging service is restricted between {start} and {end}. \
             Please try again during allowed hours ({end} to {start})."
        )
    }
}

/// Which request paths the window applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateScope {
    /// Only paths under one of the prefixes are restricted
    Messaging { gated_prefixes: Vec<String> },
    /// Every path is restricted except those under one of the prefixes
    AllExceptExempt { exempt_prefixes: Vec<String> },
}

impl GateScope {
    /// `messaging` scope with [`DEFAULT_GATED_PREFIXES`]
    pub fn messaging_default() -> Self {
        Self::Messaging {
            gated_prefixes: DEFAULT_GATED_PREFIXES.map(String::from).to_vec(),
        }
    }

    /// `all-except-exempt` scope with [`DEFAULT_EXEMPT_PREFIXES`]
    pub fn all_except_exempt_default() -> Self {
        Self::AllExceptExempt {
            exempt_prefixes: DEFAULT_EXEMPT_PREFIXES.map(String::from).to_vec(),
        }
    }

    pub fn is_gated(&self, path: &str) -> bool {
        match self {
            Self::Messaging { gated_prefixes } => gated_prefixes
                .iter()
                .any(|prefix| path_has_prefix(path, prefix)),
            Self::AllExceptExempt { exempt_prefixes } => !exempt_prefixes
                .iter()
                .any(|prefix| path_has_prefix(path, prefix)),
        }
    }
}

/// Prefix match where a prefix ending in `/` also matches the bare path
/// (`/api/messages/` matches `/api/messages`).
fn path_has_prefix(path: &str, prefix: &str) -> bool {
    if path.starts_with(prefix) {
        return true;
    }
    match prefix.strip_suffix('/') {
        Some(bare) if !bare.is_empty() => path == bare,
        _ => false,
    }
}

/// Outcome of [`AccessGate::check`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Deny with the plain-text explanation
    Deny(String),
}

/// Restricted window plus the scope of paths it applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGate {
    pub window: RestrictedWindow,
    pub scope: GateScope,
}

impl AccessGate {
    pub fn new(window: RestrictedWindow, scope: GateScope) -> Self {
        Self { window, scope }
    }

    pub fn check(&self, now: NaiveTime, path: &str) -> AccessDecision {
        if self.window.contains(now) && self.scope.is_gated(path) {
            AccessDecision::Deny(self.window.denial_message())
        } else {
            AccessDecision::Allow
        }
    }
}
