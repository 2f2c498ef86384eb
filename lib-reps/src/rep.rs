use crate::*;

/// A completed repetition that passed the refractory gate.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepRecord
{
    /// In m/s; highest velocity of the concentric excursion.
    pub peak_velocity: f64,

    /// In m/s; mean propulsive velocity, i.e. the average of all positive velocity samples of the
    /// excursion.
    pub mean_velocity: f64,

    /// In meters; range covered during the excursion.
    pub displacement: f64,

    pub start_time: Timestamp,
    pub peak_time: Timestamp,
    pub end_time: Timestamp,

    /// Reps that fail the refractory gate are never reported, kept for consumers that store the
    /// verdicts next to each other.
    pub refractory_passed: bool,

    /// `None` when the detector has no range-of-motion bounds configured.
    pub rom: Option<RomValidation>,
}

impl RepRecord
{
    /// Does this rep count? Ungraded reps always do.
    /// 
    pub fn is_valid(&self) -> bool {
        self.refractory_passed && self.rom.map_or(true, |rom| rom.is_valid)
    }

    /// In seconds; start of the excursion until the eccentric threshold was crossed. For lifts
    /// that start with the eccentric part this includes the descent.
    /// 
    pub fn excursion_duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// In seconds.
    /// 
    pub fn time_to_peak(&self) -> f64 {
        self.peak_time - self.start_time
    }

    pub fn displacement_in(&self, unit: DisplacementUnit) -> f64 {
        unit.from_meters(self.displacement)
    }
}
