use crate::*;

/// Enforces a minimum time between two accepted reps, only the most recent rep is remembered.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefractoryGate
{
    /// In seconds.
    min_time_between_reps: f64,

    last_rep_time: Option<Timestamp>,
}

impl RefractoryGate
{
    pub const fn new(min_time_between_reps: f64) -> Self {
        RefractoryGate { min_time_between_reps, last_rep_time: None }
    }

    /// Can a rep completing at `at` be accepted?
    /// 
    pub fn can_detect_rep(&self, at: Timestamp) -> bool {
        match self.last_rep_time {
            None => true,
            Some(last) => at - last >= self.min_time_between_reps,
        }
    }

    pub fn record_rep(&mut self, at: Timestamp) {
        self.last_rep_time = Some(at);
    }

    pub fn reset(&mut self) {
        self.last_rep_time = None;
    }

    /// In seconds; `None` if no rep was recorded since the last reset.
    /// 
    pub fn time_since_last_rep(&self, from: Timestamp) -> Option<f64> {
        self.last_rep_time.map(|last| from - last)
    }

    pub fn last_rep_time(&self) -> Option<Timestamp> {
        self.last_rep_time
    }

    pub fn min_time_between_reps(&self) -> f64 {
        self.min_time_between_reps
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    pub fn test_first_rep_always_allowed() {
        let gate = RefractoryGate::new(0.8);
        assert!(gate.can_detect_rep(0.0));
        assert_eq!(gate.time_since_last_rep(5.0), None);
    }

    #[test]
    pub fn test_window_is_enforced() {
        let mut gate = RefractoryGate::new(0.8);
        gate.record_rep(10.0);

        for dt in [0.0, 0.1, 0.5, 0.79] {
            assert!(!gate.can_detect_rep(10.0 + dt), "accepted after {}s", dt);
        }
        assert!(gate.can_detect_rep(10.8));
        assert!(gate.can_detect_rep(12.0));
        assert!(approx_eq(gate.time_since_last_rep(10.5).unwrap(), 0.5, 1e-12));
    }

    #[test]
    pub fn test_record_twice_is_idempotent() {
        let mut gate = RefractoryGate::new(0.8);
        gate.record_rep(3.0);
        let once = gate;
        gate.record_rep(3.0);
        assert_eq!(gate, once);
    }

    #[test]
    pub fn test_reset_forgets_last_rep() {
        let mut gate = RefractoryGate::new(0.8);
        gate.record_rep(3.0);
        gate.reset();
        assert_eq!(gate.last_rep_time(), None);
        assert!(gate.can_detect_rep(3.1));
    }
}
