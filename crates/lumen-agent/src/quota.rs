// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-window request quota keyed by sender.
//!
//! Each sender gets `max_requests` admissions per window. The window starts
//! at the first admitted request and resets once it has fully elapsed.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use lumen_config::model::QuotaConfig;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const SWEEP_EVERY_CHECKS: u64 = 256;

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: u32,
}

/// Result of a quota check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    Allowed,
    Denied { retry_after: Duration },
}

/// Per-sender fixed-window quota shared across request handlers.
#[derive(Debug, Clone)]
pub struct QuotaGuard {
    window: Duration,
    max_requests: u32,
    windows: Arc<DashMap<String, Window>>,
    checks: Arc<AtomicU64>,
}

impl QuotaGuard {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            windows: Arc::new(DashMap::new()),
            checks: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn from_config(config: &QuotaConfig) -> Self {
        Self::new(
            Duration::from_secs(config.window_minutes.saturating_mul(60)),
            config.max_requests,
        )
    }

    /// Counts one request from `sender` against its window.
    pub fn check(&self, sender: &str) -> QuotaDecision {
        self.check_at(sender, Instant::now())
    }

    fn check_at(&self, sender: &str, now: Instant) -> QuotaDecision {
        if self.max_requests == 0 {
            return QuotaDecision::Denied {
                retry_after: self.window.max(Duration::from_secs(1)),
            };
        }

        let decision = match self.windows.entry(sender.to_string()) {
            Entry::Occupied(mut occupied) => {
                let state = occupied.get_mut();
                let elapsed = now.duration_since(state.started_at);
                if elapsed >= self.window {
                    state.started_at = now;
                    state.count = 1;
                    QuotaDecision::Allowed
                } else if state.count < self.max_requests {
                    state.count += 1;
                    QuotaDecision::Allowed
                } else {
                    QuotaDecision::Denied {
                        retry_after: self.window.saturating_sub(elapsed),
                    }
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Window {
                    started_at: now,
                    count: 1,
                });
                QuotaDecision::Allowed
            }
        };

        let seen = self.checks.fetch_add(1, Ordering::Relaxed) + 1;
        if seen % SWEEP_EVERY_CHECKS == 0 {
            self.sweep_at(now);
        }
        decision
    }

    /// Drops windows that have fully elapsed.
    pub fn sweep(&self) {
        self.sweep_at(Instant::now());
    }

    fn sweep_at(&self, now: Instant) {
        let before = self.windows.len();
        self.windows
            .retain(|_, state| now.duration_since(state.started_at) < self.window);
        let removed = before.saturating_sub(self.windows.len());
        if removed > 0 {
            debug!(removed, "swept expired quota windows");
        }
    }

    /// Number of senders with a live window.
    pub fn tracked_senders(&self) -> usize {
        self.windows.len()
    }

    /// Sweeps expired windows once per window length until `cancel` fires.
    pub fn spawn_sweeper(&self, cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
        let guard = self.clone();
        let period = self.window.max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => guard.sweep(),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn thirty_first_request_in_window_is_denied() {
        let guard = QuotaGuard::new(HOUR, 30);
        let start = Instant::now();
        for i in 0..30 {
            let at = start + Duration::from_secs(i);
            assert_eq!(guard.check_at("peer", at), QuotaDecision::Allowed, "request {i}");
        }
        let decision = guard.check_at("peer", start + Duration::from_secs(600));
        assert_eq!(
            decision,
            QuotaDecision::Denied {
                retry_after: Duration::from_secs(3000)
            }
        );
    }

    #[test]
    fn senders_are_counted_independently() {
        let guard = QuotaGuard::new(HOUR, 1);
        let now = Instant::now();
        assert_eq!(guard.check_at("a", now), QuotaDecision::Allowed);
        assert_eq!(guard.check_at("b", now), QuotaDecision::Allowed);
        assert!(matches!(guard.check_at("a", now), QuotaDecision::Denied { .. }));
    }

    #[test]
    fn window_resets_after_it_elapses() {
        let guard = QuotaGuard::new(HOUR, 1);
        let start = Instant::now();
        assert_eq!(guard.check_at("peer", start), QuotaDecision::Allowed);
        assert!(matches!(
            guard.check_at("peer", start + Duration::from_secs(10)),
            QuotaDecision::Denied { .. }
        ));
        assert_eq!(guard.check_at("peer", start + HOUR), QuotaDecision::Allowed);
    }

    #[test]
    fn sweep_drops_only_expired_windows() {
        let guard = QuotaGuard::new(HOUR, 5);
        let start = Instant::now();
        guard.check_at("old", start);
        guard.check_at("new", start + Duration::from_secs(1800));
        guard.sweep_at(start + HOUR);
        assert_eq!(guard.tracked_senders(), 1);
    }

    #[test]
    fn from_config_converts_minutes() {
        let guard = QuotaGuard::from_config(&QuotaConfig {
            window_minutes: 60,
            max_requests: 30,
        });
        assert_eq!(guard.window, HOUR);
        assert_eq!(guard.max_requests, 30);
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_runs_until_cancelled() {
        let guard = QuotaGuard::new(Duration::from_secs(60), 5);
        guard.check("peer");
        let cancel = CancellationToken::new();
        let handle = guard.spawn_sweeper(cancel.clone());

        tokio::time::sleep(Duration::from_secs(121)).await;
        assert_eq!(guard.tracked_senders(), 0);

        cancel.cancel();
        handle.await.unwrap();
    }
}
