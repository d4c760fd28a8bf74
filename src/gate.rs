//! Frame-count launch throttling.
//!
//! All show timing is measured in frames, not wall-clock seconds.  A
//! [`FrameGate`] is the single place that counts them: swap its counting rule
//! for a delta-time accumulator and the entity models are unaffected.

/// Counts frames up to a period, then fires on the first frame its condition holds.
///
/// While the counter is below the period each poll increments it.  Once it has
/// reached the period the gate stops counting and evaluates its condition on
/// every poll; a passing condition fires the gate and resets the counter.  With
/// an always-true condition the gate therefore fires once every `period + 1`
/// polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGate {
    period: u32,
    elapsed: u32,
}

impl FrameGate {
    pub fn new(period: u32) -> Self {
        Self { period, elapsed: 0 }
    }

    /// Poll once per frame.  Returns `true` when the gate fires.
    ///
    /// `ready` is only evaluated once the period has elapsed.
    pub fn poll(&mut self, ready: impl FnOnce() -> bool) -> bool {
        if self.elapsed >= self.period {
            if ready() {
                self.elapsed = 0;
                return true;
            }
            false
        } else {
            self.elapsed += 1;
            false
        }
    }

    /// Whether the period has elapsed and the gate is waiting on its condition.
    pub fn is_armed(&self) -> bool {
        self.elapsed >= self.period
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }
}
