//! Session registry - intake sessions keyed by conversation id
//!
//! Each conversation is serialized by its transport, so handlers clone the
//! session, mutate it and write it back.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Duration;
use dashmap::DashMap;
use tracing::{debug, info};

use crate::application::intake::IntakeSession;
use crate::shared::shutdown::ShutdownSignal;

pub struct SessionRegistry {
    sessions: DashMap<String, IntakeSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn shared() -> SharedSessionRegistry {
        Arc::new(Self::new())
    }

    /// Snapshot of a session, if one exists.
    pub fn get(&self, session_id: &str) -> Option<IntakeSession> {
        self.sessions.get(session_id).map(|s| s.clone())
    }

    /// Store (or replace) a session.
    pub fn put(&self, session_id: impl Into<String>, session: IntakeSession) {
        self.sessions.insert(session_id.into(), session);
    }

    /// Discard a session. Safe to call for unknown ids.
    pub fn remove(&self, session_id: &str) {
        if self.sessions.remove(session_id).is_some() {
            debug!(session_id, "Session removed");
        }
    }

    pub fn count(&self) -> usize {
        self.sessions.len()
    }

    /// Evict sessions idle longer than `ttl`. Returns how many were removed.
    /// Counted inside the retain pass; concurrent inserts do not skew it.
    pub fn sweep_stale(&self, ttl: Duration) -> usize {
        let evicted = AtomicUsize::new(0);
        self.sessions.retain(|_, session| {
            if session.is_stale(ttl) {
                evicted.fetch_add(1, Ordering::Relaxed);
                false
            } else {
                true
            }
        });
        evicted.into_inner()
    }

    /// Spawn the periodic TTL sweep. Best-effort housekeeping; stops on
    /// shutdown.
    pub fn start_sweeper(
        self: &Arc<Self>,
        ttl: Duration,
        interval: std::time::Duration,
        shutdown: ShutdownSignal,
    ) -> tokio::task::JoinHandle<()> {
        let registry = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {
                        let evicted = registry.sweep_stale(ttl);
                        if evicted > 0 {
                            info!(evicted, "Evicted stale intake sessions");
                        }
                    }
                    _ = shutdown.wait() => break,
                }
            }
        })
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe session registry
pub type SharedSessionRegistry = Arc<SessionRegistry>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn sweep_evicts_only_stale_sessions() {
        let registry = SessionRegistry::new();
        let fresh = IntakeSession::new(1);
        let mut stale = IntakeSession::new(2);
        stale.last_activity = Utc::now() - Duration::hours(2);

        registry.put("fresh", fresh);
        registry.put("stale", stale);

        let evicted = registry.sweep_stale(Duration::minutes(60));
        assert_eq!(evicted, 1);
        assert!(registry.get("fresh").is_some());
        assert!(registry.get("stale").is_none());
    }

    #[test]
    fn sweep_count_is_exact_under_concurrent_inserts() {
        let registry = SessionRegistry::shared();
        for i in 0..50 {
            let mut stale = IntakeSession::new(i);
            stale.last_activity = Utc::now() - Duration::hours(2);
            registry.put(format!("stale-{}", i), stale);
        }

        let writer = {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for i in 0..500 {
                    registry.put(format!("fresh-{}", i), IntakeSession::new(i));
                }
            })
        };

        let mut evicted = 0;
        while evicted < 50 {
            evicted += registry.sweep_stale(Duration::minutes(60));
        }
        writer.join().unwrap();
        evicted += registry.sweep_stale(Duration::minutes(60));

        assert_eq!(evicted, 50);
        assert_eq!(registry.count(), 500);
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let registry = SessionRegistry::new();
        registry.remove("missing");
        assert_eq!(registry.count(), 0);
    }
}
