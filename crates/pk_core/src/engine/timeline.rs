//! Timed transitions on the simulation clock.
//!
//! A single pending `(kind, ready_at)` slot replaces fire-and-forget
//! timers. Scheduling overwrites the slot; `cancel` clears it, so an aborted
//! or restarted match never sees a stale transition.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Round setup finished → Aiming
    BeginPlayerTurn,
    /// Player outcome message done → KeeperTurn
    BeginKeeperTurn,
    /// Opponent finished aiming → OpponentShot
    TakeOpponentShot,
    /// Opponent outcome message done → next round or GameOver
    FinishRound,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingTransition {
    pub kind: TransitionKind,
    pub ready_at: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    now: f64,
    pending: Option<PendingTransition>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation time (s)
    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advance the clock. Non-finite or negative deltas are ignored.
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.now += f64::from(dt);
        }
    }

    /// Schedule `kind` to fire `delay_s` from now, replacing anything pending
    pub fn schedule(&mut self, kind: TransitionKind, delay_s: f32) {
        if let Some(old) = self.pending {
            log::warn!("replacing pending transition {:?} with {:?}", old.kind, kind);
        }
        let ready_at = self.now + f64::from(delay_s.max(0.0));
        log::debug!("transition {:?} scheduled at t={:.3}", kind, ready_at);
        self.pending = Some(PendingTransition { kind, ready_at });
    }

    pub fn cancel(&mut self) -> Option<PendingTransition> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<PendingTransition> {
        self.pending
    }

    /// Take the pending transition if its time has come
    pub fn take_due(&mut self) -> Option<TransitionKind> {
        match self.pending {
            Some(p) if p.ready_at <= self.now => {
                self.pending = None;
                Some(p.kind)
            }
            _ => None,
        }
    }

    /// Reset the clock to zero and drop anything pending
    pub fn reset(&mut self) {
        self.now = 0.0;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_when_due() {
        let mut tl = Timeline::new();
        tl.schedule(TransitionKind::BeginPlayerTurn, 1.0);

        tl.advance(0.5);
        assert_eq!(tl.take_due(), None);

        tl.advance(0.5);
        assert_eq!(tl.take_due(), Some(TransitionKind::BeginPlayerTurn));
        assert_eq!(tl.take_due(), None);
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut tl = Timeline::new();
        tl.schedule(TransitionKind::FinishRound, 0.2);
        assert!(tl.cancel().is_some());
        tl.advance(1.0);
        assert_eq!(tl.take_due(), None);
    }

    #[test]
    fn test_schedule_replaces_pending() {
        let mut tl = Timeline::new();
        tl.schedule(TransitionKind::BeginKeeperTurn, 0.1);
        tl.schedule(TransitionKind::TakeOpponentShot, 2.0);
        tl.advance(0.5);
        assert_eq!(tl.take_due(), None);
        assert_eq!(tl.pending().map(|p| p.kind), Some(TransitionKind::TakeOpponentShot));
    }

    #[test]
    fn test_bad_dt_ignored() {
        let mut tl = Timeline::new();
        tl.advance(f32::NAN);
        tl.advance(-1.0);
        assert_eq!(tl.now(), 0.0);
    }

    #[test]
    fn test_zero_delay_is_due_immediately() {
        let mut tl = Timeline::new();
        tl.advance(3.0);
        tl.schedule(TransitionKind::BeginPlayerTurn, 0.0);
        assert_eq!(tl.take_due(), Some(TransitionKind::BeginPlayerTurn));
        tl.reset();
        assert_eq!(tl.now(), 0.0);
        assert!(tl.pending().is_none());
    }
}
