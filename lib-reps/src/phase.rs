use crate::*;
use cfg_if::cfg_if;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MotionPhase
{
    #[default]
    Idle,

    /// Eccentric; moving down.
    Descending,

    /// Concentric; moving up.
    Ascending,

    /// A rep was accepted on this tick. It stays the current phase until the next sample, which
    /// continues as `Descending` (or `Idle`), so a single sample never fires two phase changes.
    Completed,
}

impl MotionPhase
{
    pub fn is_moving(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Everything that happened while processing one sample.
/// 
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transition
{
    /// A movement started from idle on this tick.
    pub unracked: bool,

    /// New phase, if it differs from the phase before the tick.
    pub phase: Option<MotionPhase>,

    pub rep: Option<RepRecord>,
}

/// Segments the integrated motion into excursions and decides when a rep is complete.
/// 
/// A rep is recognised once the concentric velocity has peaked (the first decrease after it
/// exceeded `min_peak_threshold`) and the velocity then crosses `-concentric_threshold`. The
/// caller's gates are consulted before the rep is accepted.
/// 
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseStateMachine
{
    config: DetectorConfig,

    /// In Hz; may differ from `config.sample_rate_hz` after a runtime change.
    sample_rate_hz: f64,

    /// In seconds; integration step derived from the sample rate.
    dt: f64,

    phase: MotionPhase,

    integrator: VelocityIntegrator,

    /// Velocity after the previous tick, used to spot the peak.
    prev_velocity: f64,

    /// The concentric peak of the current excursion has been confirmed.
    peak_reached: bool,

    /// Consecutive ticks of decreasing velocity after the peak.
    decreasing_ticks: u32,

    /// Positive velocity samples of the current excursion.
    propulsive: RunningMean,

    /// Lowest and highest displacement of the current excursion.
    travel: RangeTracker,

    /// In m/s²; acceleration used on the last tick.
    #[cfg(feature = "debug")]
    pub accel_ms2: f64,
}

impl PhaseStateMachine
{
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(PhaseStateMachine {
            sample_rate_hz: config.sample_rate_hz,
            dt: config.sample_interval(),
            config,
            phase: MotionPhase::Idle,
            integrator: VelocityIntegrator::new(),
            prev_velocity: 0.0,
            peak_reached: false,
            decreasing_ticks: 0,
            propulsive: RunningMean::new(),
            travel: RangeTracker::new(),
            #[cfg(feature = "debug")]
            accel_ms2: 0.0,
        })
    }

    /// Processes one acceleration sample (in m/s², gravity removed) taken at `now`.
    /// 
    pub fn step(
        &mut self,
        accel_ms2: f64,
        now: Timestamp,
        refractory: &mut RefractoryGate,
        rom: Option<&RangeOfMotionGate>,
    ) -> Transition {
        let mut transition = Transition::default();
        let previous = self.phase;

        cfg_if!{ if #[cfg(feature = "debug")] {
            self.accel_ms2 = accel_ms2;
        }}

        // Completed only lasts for the tick that accepted the rep.
        if self.phase == MotionPhase::Completed {
            self.phase = MotionPhase::Descending;
        }

        let velocity = if self.phase == MotionPhase::Idle {
            if libm::fabs(accel_ms2) <= self.config.movement_threshold {
                return transition;
            }

            self.begin_movement(now);
            transition.unracked = true;

            let velocity = self.advance(accel_ms2);
            self.phase = if velocity > 0.0 { MotionPhase::Ascending } else { MotionPhase::Descending };
            log::debug!("Movement started at {:.3}s ({:.2} m/s²)", now, accel_ms2);
            velocity
        } else {
            self.advance(accel_ms2)
        };

        if self.phase == MotionPhase::Descending && velocity > self.config.concentric_threshold {
            self.phase = MotionPhase::Ascending;
            self.clear_concentric();
        }

        if self.phase == MotionPhase::Ascending {
            self.track_peak(velocity, now);

            if velocity < -self.config.concentric_threshold {
                if self.peak_reached {
                    transition.rep = self.complete_rep(now, refractory, rom);
                } else {
                    // Peak never confirmed, the next ascent measures its own peak.
                    self.phase = MotionPhase::Descending;
                    self.clear_concentric();
                }
            }
        }

        if self.phase != MotionPhase::Completed {
            self.check_stop(accel_ms2, velocity, now);
        }

        self.prev_velocity = self.integrator.velocity();

        if self.phase != previous {
            log::debug!("Phase {:?} -> {:?} at {:.3}s", previous, self.phase, now);
            transition.phase = Some(self.phase);
        }

        transition
    }

    /// Changes the integration step for all following samples.
    /// 
    pub fn set_sample_rate_hz(&mut self, sample_rate_hz: f64) -> Result<(), ConfigError> {
        if !is_positive_finite(sample_rate_hz) {
            return Err(ConfigError::NonPositiveSampleRate(sample_rate_hz));
        }
        self.sample_rate_hz = sample_rate_hz;
        self.dt = 1.0 / sample_rate_hz;
        Ok(())
    }

    /// Drops the current movement and returns to idle, a sample rate changed at runtime goes back
    /// to the configured one.
    /// 
    pub fn reset(&mut self) {
        self.go_idle();
        self.sample_rate_hz = self.config.sample_rate_hz;
        self.dt = self.config.sample_interval();
        self.decreasing_ticks = 0;

        cfg_if!{ if #[cfg(feature = "debug")] {
            self.accel_ms2 = 0.0;
        }}
    }

    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    pub fn velocity(&self) -> f64 {
        self.integrator.velocity()
    }

    pub fn displacement(&self) -> f64 {
        self.integrator.displacement()
    }

    pub fn peak_velocity(&self) -> f64 {
        self.integrator.peak_velocity()
    }

    pub fn peak_reached(&self) -> bool {
        self.peak_reached
    }

    pub fn integrator(&self) -> &VelocityIntegrator {
        &self.integrator
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    fn advance(&mut self, accel_ms2: f64) -> f64 {
        let (velocity, displacement) = self.integrator.integrate(accel_ms2, self.dt);
        if velocity > 0.0 {
            self.propulsive.push(velocity);
        }
        self.travel.push(displacement);
        velocity
    }

    fn begin_movement(&mut self, now: Timestamp) {
        self.integrator.begin(now);
        self.start_measuring();
        self.prev_velocity = 0.0;
    }

    /// Resets the per-excursion statistics, displacement is measured from the current position.
    /// 
    fn start_measuring(&mut self) {
        self.propulsive.reset();
        self.travel.reset();
        self.travel.push(0.0);
        self.clear_concentric();
    }

    fn clear_concentric(&mut self) {
        self.peak_reached = false;
        self.decreasing_ticks = 0;
        self.integrator.clear_peak();
    }

    fn track_peak(&mut self, velocity: f64, now: Timestamp) {
        if self.integrator.track_peak(now) {
            self.decreasing_ticks = 0;
            return;
        }

        if velocity < self.prev_velocity {
            self.decreasing_ticks += 1;
        } else {
            self.decreasing_ticks = 0;
        }

        let confirmation = self.config.peak_confirmation_ticks.max(1);
        if !self.peak_reached
            && self.integrator.peak_velocity() > self.config.min_peak_threshold
            && self.decreasing_ticks >= confirmation
        {
            self.peak_reached = true;
            log::debug!("Concentric peak {:.3} m/s confirmed at {:.3}s", self.integrator.peak_velocity(), now);
        }
    }

    fn complete_rep(
        &mut self,
        now: Timestamp,
        refractory: &mut RefractoryGate,
        rom: Option<&RangeOfMotionGate>,
    ) -> Option<RepRecord> {
        if !refractory.can_detect_rep(now) {
            log::debug!(
                "Rep candidate at {:.3}s dropped, only {:.3}s since the last rep",
                now, refractory.time_since_last_rep(now).unwrap_or(0.0)
            );
            self.clear_concentric();
            return None;
        }

        let displacement = self.travel.span();
        let rep = RepRecord {
            peak_velocity: self.integrator.peak_velocity(),
            mean_velocity: self.propulsive.mean(),
            displacement,
            start_time: self.integrator.movement_start().unwrap_or(now),
            peak_time: self.integrator.peak_time().unwrap_or(now),
            end_time: now,
            refractory_passed: true,
            rom: rom.map(|gate| gate.validate_meters(displacement)),
        };
        refractory.record_rep(now);

        log::info!(
            "Rep at {:.3}s: peak {:.3} m/s, mean {:.3} m/s, displacement {:.3} m, valid: {}",
            now, rep.peak_velocity, rep.mean_velocity, rep.displacement, rep.is_valid()
        );

        cfg_if!{ if #[cfg(feature = "csv")] {
            println!(
                "rep,{},{},{},{},{},{}",
                rep.start_time, rep.peak_time, rep.end_time,
                rep.peak_velocity, rep.mean_velocity, rep.displacement
            );
        }}

        // The eccentric motion continues as the next excursion.
        self.phase = MotionPhase::Completed;
        self.integrator.restart_excursion(now);
        self.start_measuring();

        Some(rep)
    }

    fn check_stop(&mut self, accel_ms2: f64, velocity: f64, now: Timestamp) {
        if !self.phase.is_moving() {
            return;
        }

        let elapsed = self.integrator.elapsed(now);
        if elapsed > self.config.max_movement_duration {
            log::warn!("Movement abandoned after {:.2}s without completing a rep", elapsed);
            self.go_idle();
        } else if libm::fabs(velocity) < self.config.stop_velocity_threshold
            && libm::fabs(accel_ms2) < self.config.stop_accel_threshold
            && elapsed > self.config.min_movement_duration
        {
            self.go_idle();
        }
    }

    fn go_idle(&mut self) {
        self.integrator.zero();
        self.propulsive.reset();
        self.travel.reset();
        self.clear_concentric();
        self.prev_velocity = 0.0;
        self.phase = MotionPhase::Idle;
    }
}
