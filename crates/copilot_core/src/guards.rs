//! Cooldowns and in-flight gates.
//!
//! Both live on the engine session that owns them — never in module-level
//! statics — so independent sessions (and tests) don't share state.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::types::Resource;

// ---------------------------------------------------------------------------
// Purchase cooldowns
// ---------------------------------------------------------------------------

/// Per-resource timestamp of the last successful purchase. A resource may
/// not be purchased again until the window elapses, independent of how often
/// prices are re-evaluated.
#[derive(Debug)]
pub struct CooldownTracker {
    window: Duration,
    last: HashMap<Resource, Instant>,
}

impl CooldownTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: HashMap::new(),
        }
    }

    /// Stamp a successful purchase. Only called on success — a failed
    /// purchase stays retry-eligible.
    pub fn start(&mut self, resource: Resource, now: Instant) {
        self.last.insert(resource, now);
    }

    pub fn active(&self, resource: Resource, now: Instant) -> bool {
        self.last
            .get(&resource)
            .is_some_and(|last| now.duration_since(*last) < self.window)
    }

    /// Time left on the window, for status reporting.
    pub fn remaining(&self, resource: Resource, now: Instant) -> Option<Duration> {
        let last = self.last.get(&resource)?;
        self.window.checked_sub(now.duration_since(*last))
    }
}

// ---------------------------------------------------------------------------
// In-flight gates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    InFlight,
}

/// Re-entrancy guard for one resource's purchase path.
///
/// Stops an async action from being triggered twice before its own result
/// returns — e.g. two rapid price updates both observing a favorable price
/// before the first purchase resolves. Held across a suspension point; the
/// holder must call `finish` on every path.
#[derive(Debug)]
pub struct ResourceGate {
    state: GateState,
}

impl ResourceGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Idle,
        }
    }

    /// Transition `Idle → InFlight`. Returns false if already in flight;
    /// the caller then no-ops silently rather than erroring.
    pub fn try_begin(&mut self) -> bool {
        if self.state == GateState::InFlight {
            return false;
        }
        self.state = GateState::InFlight;
        true
    }

    pub fn finish(&mut self) {
        self.state = GateState::Idle;
    }

    pub fn state(&self) -> GateState {
        self.state
    }
}

impl Default for ResourceGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_blocks_until_window_elapses() {
        let mut cooldowns = CooldownTracker::new(Duration::from_secs(180));
        let t0 = Instant::now();
        assert!(!cooldowns.active(Resource::Fuel, t0));

        cooldowns.start(Resource::Fuel, t0);
        assert!(cooldowns.active(Resource::Fuel, t0 + Duration::from_secs(179)));
        assert!(!cooldowns.active(Resource::Fuel, t0 + Duration::from_secs(180)));
    }

    #[test]
    fn cooldowns_are_per_resource() {
        let mut cooldowns = CooldownTracker::new(Duration::from_secs(180));
        let t0 = Instant::now();
        cooldowns.start(Resource::Fuel, t0);
        assert!(cooldowns.active(Resource::Fuel, t0));
        assert!(!cooldowns.active(Resource::Co2, t0));
    }

    #[test]
    fn remaining_shrinks_and_expires() {
        let mut cooldowns = CooldownTracker::new(Duration::from_secs(180));
        let t0 = Instant::now();
        cooldowns.start(Resource::Co2, t0);
        let left = cooldowns
            .remaining(Resource::Co2, t0 + Duration::from_secs(60))
            .expect("window still open");
        assert_eq!(left, Duration::from_secs(120));
        assert_eq!(
            cooldowns.remaining(Resource::Co2, t0 + Duration::from_secs(300)),
            None
        );
    }

    #[test]
    fn gate_rejects_reentry_until_finished() {
        let mut gate = ResourceGate::new();
        assert!(gate.try_begin());
        assert_eq!(gate.state(), GateState::InFlight);
        assert!(!gate.try_begin());

        gate.finish();
        assert_eq!(gate.state(), GateState::Idle);
        assert!(gate.try_begin());
    }
}
