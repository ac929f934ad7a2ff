//! Heartbeat tracking and timeout-based eviction.
//!
//! Clients only poll, so a missing heartbeat is the only disconnect signal.
//! Active evictions must go through the room's leave path so that host
//! transfer and queue promotion apply; stale queue entries are simply dropped.

use time::{Duration, OffsetDateTime};

use crate::domain::membership::Roster;
use crate::domain::player::{Player, PlayerId};
use crate::domain::rules::LIVENESS_TIMEOUT_SECS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivenessPolicy {
    timeout: Duration,
}

impl LivenessPolicy {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Strictly older than the timeout counts as stale.
    pub fn is_stale(&self, player: &Player, now: OffsetDateTime) -> bool {
        now - player.last_heartbeat > self.timeout
    }
}

impl Default for LivenessPolicy {
    fn default() -> Self {
        Self::new(Duration::seconds(LIVENESS_TIMEOUT_SECS))
    }
}

impl Roster {
    /// Refresh the heartbeat of an active or queued player.
    /// Returns `false` (no-op) for unknown ids.
    pub fn touch(&mut self, id: &PlayerId, now: OffsetDateTime) -> bool {
        if let Some(player) = self.active_mut().iter_mut().find(|p| &p.id == id) {
            player.last_heartbeat = now;
            return true;
        }
        if let Some(player) = self.queue_mut().iter_mut().find(|p| &p.id == id) {
            player.last_heartbeat = now;
            return true;
        }
        false
    }

    /// Active players whose heartbeat has expired, in join order.
    pub fn stale_active(&self, policy: &LivenessPolicy, now: OffsetDateTime) -> Vec<PlayerId> {
        self.active()
            .iter()
            .filter(|p| policy.is_stale(p, now))
            .map(|p| p.id.clone())
            .collect()
    }

    /// Drop expired queue entries and return their ids.
    pub fn drop_stale_queued(
        &mut self,
        policy: &LivenessPolicy,
        now: OffsetDateTime,
    ) -> Vec<PlayerId> {
        let mut dropped = Vec::new();
        self.queue_mut().retain(|p| {
            if policy.is_stale(p, now) {
                dropped.push(p.id.clone());
                false
            } else {
                true
            }
        });
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> OffsetDateTime {
        OffsetDateTime::UNIX_EPOCH + Duration::seconds(secs)
    }

    fn player(id: &str, secs: i64) -> Player {
        Player::new(PlayerId::from(id), id, at(secs))
    }

    #[test]
    fn exactly_at_timeout_is_not_stale() {
        let policy = LivenessPolicy::default();
        let p = player("a", 0);
        assert!(!policy.is_stale(&p, at(600)));
        assert!(policy.is_stale(&p, at(601)));
    }

    #[test]
    fn touch_refreshes_active_and_queued() {
        let mut roster = Roster::new(1);
        roster.admit(player("a", 0));
        roster.admit(player("b", 0));

        assert!(roster.touch(&PlayerId::from("a"), at(500)));
        assert!(roster.touch(&PlayerId::from("b"), at(500)));
        assert!(!roster.touch(&PlayerId::from("ghost"), at(500)));

        let policy = LivenessPolicy::default();
        assert!(roster.stale_active(&policy, at(1000)).is_empty());
        assert!(roster.drop_stale_queued(&policy, at(1000)).is_empty());
    }

    #[test]
    fn stale_entries_are_reported_and_dropped() {
        let mut roster = Roster::new(1);
        roster.admit(player("a", 0));
        roster.admit(player("b", 0));
        roster.admit(player("c", 400));

        let policy = LivenessPolicy::default();
        assert_eq!(
            roster.stale_active(&policy, at(700)),
            vec![PlayerId::from("a")]
        );
        assert_eq!(
            roster.drop_stale_queued(&policy, at(700)),
            vec![PlayerId::from("b")]
        );
        assert_eq!(roster.queue_position(&PlayerId::from("c")), Some(1));
    }
}
