use crate::*;

/// Receives detector events synchronously from within [`RepDetection::process`]. Within one call
/// each hook fires at most once, in the order unrack, phase change, rep.
/// 
pub trait RepObserver
{
    /// A new movement started from idle.
    fn on_unrack(&mut self) {}

    fn on_phase_change(&mut self, _phase: MotionPhase) {}

    fn on_rep(&mut self, _rep: &RepRecord) {}
}

/// No listener attached.
impl RepObserver for () {}

impl<O: RepObserver + ?Sized> RepObserver for &mut O
{
    fn on_unrack(&mut self) {
        (**self).on_unrack()
    }

    fn on_phase_change(&mut self, phase: MotionPhase) {
        (**self).on_phase_change(phase)
    }

    fn on_rep(&mut self, rep: &RepRecord) {
        (**self).on_rep(rep)
    }
}
