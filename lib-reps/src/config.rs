use crate::*;

/// Where the range-of-motion bounds come from. Both forms describe an inclusive `[min, max]` band
/// in the given unit.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RomConfig
{
    Bounds { min: f64, max: f64, unit: DisplacementUnit },

    /// `min = target * (1 - tolerance)`, `max = target * (1 + tolerance)`
    Target { target: f64, tolerance: f64, unit: DisplacementUnit },
}

/// Settings for a [`RepDetector`], every field has the default used on a 50 Hz wrist/bar sensor.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig
{
    /// In Hz; rate at which samples are delivered, the integration step is `1 / sample_rate_hz`.
    pub sample_rate_hz: f64,

    /// Smoothing/look-ahead window of the detector, never less than [`MIN_LOOK_AHEAD_SAMPLES`].
    pub look_ahead_samples: usize,

    /// In m/s²; acceleration needed to leave idle.
    pub movement_threshold: f64,

    /// In m/s; velocity magnitude that counts as concentric (or eccentric when negative) motion.
    pub concentric_threshold: f64,

    /// In m/s; the velocity peak must exceed this before the rep peak can be confirmed.
    pub min_peak_threshold: f64,

    /// Amount of consecutive decreasing velocity samples that confirm the concentric peak.
    pub peak_confirmation_ticks: u32,

    /// In m/s; below this (together with `stop_accel_threshold`) the bar is considered at rest.
    pub stop_velocity_threshold: f64,

    /// In m/s².
    pub stop_accel_threshold: f64,

    /// In seconds; an excursion can not come to rest before it lasted this long.
    pub min_movement_duration: f64,

    /// In seconds; excursions still open after this long are abandoned.
    pub max_movement_duration: f64,

    /// In seconds; refractory period between two accepted reps.
    pub min_time_between_reps: f64,

    /// In m/s²; finite samples beyond this magnitude are clamped.
    pub max_abs_accel_ms2: f64,

    /// Optional range-of-motion grading, `None` leaves reps ungraded.
    pub rom: Option<RomConfig>,
}

pub const MIN_LOOK_AHEAD_SAMPLES: usize = 5;

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            sample_rate_hz: 50.0,
            look_ahead_samples: MIN_LOOK_AHEAD_SAMPLES,
            movement_threshold: 3.5,
            concentric_threshold: 0.15,
            min_peak_threshold: 0.2,
            peak_confirmation_ticks: 1,
            stop_velocity_threshold: 0.12,
            stop_accel_threshold: 2.0,
            min_movement_duration: 0.3,
            max_movement_duration: 3.0,
            min_time_between_reps: 0.8,
            max_abs_accel_ms2: 160.0,
            rom: None,
        }
    }
}

impl DetectorConfig
{
    /// Checks the configuration for values the detector can not work with.
    /// 
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive_finite(self.sample_rate_hz) {
            return Err(ConfigError::NonPositiveSampleRate(self.sample_rate_hz));
        }

        let positive = [
            ("movement_threshold", self.movement_threshold),
            ("concentric_threshold", self.concentric_threshold),
            ("min_peak_threshold", self.min_peak_threshold),
            ("stop_velocity_threshold", self.stop_velocity_threshold),
            ("stop_accel_threshold", self.stop_accel_threshold),
            ("max_movement_duration", self.max_movement_duration),
            ("max_abs_accel_ms2", self.max_abs_accel_ms2),
        ];
        for (name, value) in positive {
            if !is_positive_finite(value) {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }

        let non_negative = [
            ("min_movement_duration", self.min_movement_duration),
            ("min_time_between_reps", self.min_time_between_reps),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }

        if self.min_movement_duration >= self.max_movement_duration {
            return Err(ConfigError::MovementDurationOrder {
                min: self.min_movement_duration,
                max: self.max_movement_duration,
            });
        }

        if let Some(rom) = &self.rom {
            RangeOfMotionGate::from_config(rom)?;
        }

        Ok(())
    }

    /// Look-ahead window actually used by the detector.
    /// 
    #[inline]
    pub fn effective_look_ahead(&self) -> usize {
        self.look_ahead_samples.max(MIN_LOOK_AHEAD_SAMPLES)
    }

    /// In seconds; integration time step.
    /// 
    #[inline]
    pub fn sample_interval(&self) -> f64 {
        1.0 / self.sample_rate_hz
    }
}
