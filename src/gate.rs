use crate::scheduler::{Clock, Scheduler};
use std::time::Duration;
use tracing::debug;

const STEP: Duration = Duration::from_secs(1);

/// Where the pause gate currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    /// Seconds left on the countdown
    Counting(u32),
    /// Countdown finished, content hidden, button not yet shown
    Hidden,
    /// "Continue" button visible
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateEvent {
    Step,
    Reveal,
}

/// Countdown shown before the app opens
pub struct PauseGate {
    seconds: u32,
    reveal_delay: Duration,
    scheduler: Scheduler<GateEvent>,
    phase: GatePhase,
}

impl PauseGate {
    pub fn new(seconds: u32, reveal_delay: Duration, clock: Box<dyn Clock>) -> Self {
        let mut gate = Self {
            seconds,
            reveal_delay,
            scheduler: Scheduler::new(clock),
            phase: GatePhase::Hidden,
        };
        gate.restart();
        gate
    }

    /// Start the countdown over, dropping any pending step
    pub fn restart(&mut self) {
        self.scheduler.clear();
        debug!(seconds = self.seconds, "pause gate started");
        self.enter(self.seconds);
    }

    fn enter(&mut self, remaining: u32) {
        if remaining == 0 {
            self.phase = GatePhase::Hidden;
            self.scheduler.schedule(self.reveal_delay, GateEvent::Reveal);
        } else {
            self.phase = GatePhase::Counting(remaining);
            self.scheduler.schedule(STEP, GateEvent::Step);
        }
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn can_continue(&self) -> bool {
        self.phase == GatePhase::Ready
    }

    /// Fraction of the countdown still left, 1.0 at start
    pub fn progress(&self) -> f64 {
        match self.phase {
            GatePhase::Counting(left) if self.seconds > 0 => f64::from(left) / f64::from(self.seconds),
            _ => 0.0,
        }
    }

    /// Apply due steps. Returns true if the phase changed.
    pub fn advance(&mut self) -> bool {
        let before = self.phase;
        for event in self.scheduler.pop_due() {
            match (event, self.phase) {
                (GateEvent::Step, GatePhase::Counting(left)) => self.enter(left - 1),
                (GateEvent::Reveal, GatePhase::Hidden) => self.phase = GatePhase::Ready,
                _ => {}
            }
        }
        before != self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::ManualClock;

    const REVEAL: Duration = Duration::from_millis(500);

    fn create_gate(seconds: u32) -> (PauseGate, ManualClock) {
        let clock = ManualClock::new();
        (PauseGate::new(seconds, REVEAL, Box::new(clock.clone())), clock)
    }

    #[test]
    fn test_counts_down_each_second() {
        let (mut gate, clock) = create_gate(5);
        assert_eq!(gate.phase(), GatePhase::Counting(5));
        assert_eq!(gate.progress(), 1.0);

        clock.advance(Duration::from_millis(999));
        assert!(!gate.advance());

        clock.advance(Duration::from_millis(1));
        assert!(gate.advance());
        assert_eq!(gate.phase(), GatePhase::Counting(4));
        assert!(!gate.can_continue());
    }

    #[test]
    fn test_reveals_button_after_delay() {
        let (mut gate, clock) = create_gate(2);

        for _ in 0..2 {
            clock.advance(STEP);
            gate.advance();
        }
        assert_eq!(gate.phase(), GatePhase::Hidden);
        assert!(!gate.can_continue());

        clock.advance(REVEAL);
        gate.advance();
        assert_eq!(gate.phase(), GatePhase::Ready);
        assert!(gate.can_continue());
    }

    #[test]
    fn test_late_tick_catches_up_one_step_at_a_time() {
        let (mut gate, clock) = create_gate(3);

        // A stalled loop only ever sees one step due; the next is scheduled from "now"
        clock.advance(Duration::from_secs(10));
        gate.advance();
        assert_eq!(gate.phase(), GatePhase::Counting(2));
    }

    #[test]
    fn test_restart() {
        let (mut gate, clock) = create_gate(1);
        clock.advance(STEP);
        gate.advance();
        clock.advance(REVEAL);
        gate.advance();
        assert!(gate.can_continue());

        gate.restart();
        assert_eq!(gate.phase(), GatePhase::Counting(1));

        // Half a second in, the fresh countdown has not moved yet
        clock.advance(REVEAL);
        gate.advance();
        assert_eq!(gate.phase(), GatePhase::Counting(1));
    }

    #[test]
    fn test_zero_seconds_skips_countdown() {
        let (mut gate, clock) = create_gate(0);
        assert_eq!(gate.phase(), GatePhase::Hidden);
        assert_eq!(gate.progress(), 0.0);

        clock.advance(REVEAL);
        gate.advance();
        assert!(gate.can_continue());
    }
}
