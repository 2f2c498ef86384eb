use crate::*;

/// What the detector did with an incoming sample.
/// 
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleVerdict
{
    Accepted,

    /// The magnitude exceeded `max_abs_accel_ms2` and was limited to it.
    Clamped,

    /// NaN or infinite, ignored entirely.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport
{
    pub verdict: SampleVerdict,

    /// Phase after the sample was processed.
    pub phase: MotionPhase,

    pub rep: Option<RepRecord>,
}

/// Observable state of a detector, two detectors that went through a reset compare equal.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorState
{
    pub phase: MotionPhase,
    pub velocity: f64,
    pub displacement: f64,
    pub peak_velocity: f64,
    pub peak_reached: bool,
    pub last_rep_time: Option<Timestamp>,
    pub rep_count: u32,
}

/// Capabilities every rep detector offers to the transport and presentation layers, regardless of
/// the sensor it works on.
/// 
pub trait RepDetection
{
    fn sample_rate_hz(&self) -> f64;

    /// Takes effect from the next sample on, past samples are not reinterpreted.
    fn set_sample_rate_hz(&mut self, sample_rate_hz: f64) -> Result<(), ConfigError>;

    fn look_ahead_samples(&self) -> usize;

    /// Timestamp of the most recently accepted rep.
    fn last_rep_time(&self) -> Option<Timestamp>;

    fn phase(&self) -> MotionPhase;

    /// Feeds one vertical acceleration reading in g.
    fn process(&mut self, accel_z: f64, timestamp: Timestamp, is_calibrated: bool) -> TickReport;

    /// Back to the state right after construction, including the sample rate. Safe to call
    /// mid-movement.
    fn reset(&mut self);
}

/// Accelerometer based rep detector. Owns the phase state machine and both gates, and reports
/// events to an observer `O`.
/// 
/// One detector handles one sensor stream from a single execution context, detectors never share
/// state.
/// 
pub struct RepDetector<O: RepObserver = ()>
{
    config: DetectorConfig,
    look_ahead_samples: usize,
    machine: PhaseStateMachine,
    refractory: RefractoryGate,
    rom: Option<RangeOfMotionGate>,
    observer: O,

    /// Reps accepted since construction or the last reset.
    rep_count: u32,
}

impl RepDetector<()>
{
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        RepDetector::with_observer(config, ())
    }
}

impl<O: RepObserver> RepDetector<O>
{
    pub fn with_observer(config: DetectorConfig, observer: O) -> Result<Self, ConfigError> {
        let machine = PhaseStateMachine::new(config)?;
        let rom = match &config.rom {
            Some(rom) => Some(RangeOfMotionGate::from_config(rom)?),
            None => None,
        };

        Ok(RepDetector {
            look_ahead_samples: config.effective_look_ahead(),
            refractory: RefractoryGate::new(config.min_time_between_reps),
            config,
            machine,
            rom,
            observer,
            rep_count: 0,
        })
    }

    pub fn process_sample(&mut self, sample: &AccelerationSample) -> TickReport {
        if !sample.is_finite() {
            log::warn!("Ignoring non-finite sample {:?}", sample);
            return TickReport {
                verdict: SampleVerdict::Rejected,
                phase: self.machine.phase(),
                rep: None,
            };
        }

        let raw = sample.to_ms2();
        let accel_ms2 = clamp_abs(raw, self.config.max_abs_accel_ms2);
        let verdict = if accel_ms2 != raw { SampleVerdict::Clamped } else { SampleVerdict::Accepted };

        let transition = self.machine.step(
            accel_ms2,
            sample.timestamp,
            &mut self.refractory,
            self.rom.as_ref(),
        );

        if transition.unracked {
            self.observer.on_unrack();
        }
        if let Some(phase) = transition.phase {
            self.observer.on_phase_change(phase);
        }
        if let Some(rep) = &transition.rep {
            self.rep_count += 1;
            self.observer.on_rep(rep);
        }

        TickReport {
            verdict,
            phase: self.machine.phase(),
            rep: transition.rep,
        }
    }

    /// Runs a recorded series of samples through the detector, returns how many reps were
    /// accepted.
    /// 
    pub fn process_batch(&mut self, samples: &[AccelerationSample]) -> usize {
        samples.iter()
            .filter(|sample| self.process_sample(sample).rep.is_some())
            .count()
    }

    pub fn state(&self) -> DetectorState {
        DetectorState {
            phase: self.machine.phase(),
            velocity: self.machine.velocity(),
            displacement: self.machine.displacement(),
            peak_velocity: self.machine.peak_velocity(),
            peak_reached: self.machine.peak_reached(),
            last_rep_time: self.refractory.last_rep_time(),
            rep_count: self.rep_count,
        }
    }

    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    pub fn velocity(&self) -> f64 {
        self.machine.velocity()
    }

    pub fn displacement(&self) -> f64 {
        self.machine.displacement()
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn state_machine(&self) -> &PhaseStateMachine {
        &self.machine
    }

    pub fn refractory_gate(&self) -> &RefractoryGate {
        &self.refractory
    }

    pub fn rom_gate(&self) -> Option<&RangeOfMotionGate> {
        self.rom.as_ref()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }
}

impl<O: RepObserver> RepDetection for RepDetector<O>
{
    fn sample_rate_hz(&self) -> f64 {
        self.machine.sample_rate_hz()
    }

    fn set_sample_rate_hz(&mut self, sample_rate_hz: f64) -> Result<(), ConfigError> {
        self.machine.set_sample_rate_hz(sample_rate_hz)?;
        log::info!("Sample rate set to {} Hz", sample_rate_hz);
        Ok(())
    }

    fn look_ahead_samples(&self) -> usize {
        self.look_ahead_samples
    }

    fn last_rep_time(&self) -> Option<Timestamp> {
        self.refractory.last_rep_time()
    }

    fn phase(&self) -> MotionPhase {
        self.machine.phase()
    }

    fn process(&mut self, accel_z: f64, timestamp: Timestamp, is_calibrated: bool) -> TickReport {
        self.process_sample(&AccelerationSample::new(accel_z, timestamp, is_calibrated))
    }

    fn reset(&mut self) {
        self.machine.reset();
        self.refractory.reset();
        self.rep_count = 0;
        log::debug!("Detector reset");
    }
}
