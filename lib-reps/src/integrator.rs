use crate::*;

/// Integrates linear acceleration into velocity and displacement with a fixed time step (explicit
/// Euler). Also remembers the highest velocity reached in the current concentric excursion.
/// 
/// The state is thrown away whenever the detector goes back to idle, drift accumulated during a
/// movement is never carried over to the next one.
/// 
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VelocityIntegrator
{
    /// In m/s.
    velocity: f64,

    /// In meters; displacement since the start of the current excursion.
    displacement: f64,

    /// In m/s; highest velocity of the current concentric excursion.
    peak_velocity: f64,

    /// When `peak_velocity` was reached.
    peak_time: Option<Timestamp>,

    /// Start of the current excursion, `None` while idle.
    movement_start: Option<Timestamp>,
}

impl VelocityIntegrator
{
    pub const fn new() -> Self {
        VelocityIntegrator {
            velocity: 0.0,
            displacement: 0.0,
            peak_velocity: 0.0,
            peak_time: None,
            movement_start: None,
        }
    }

    /// Applies one time step of `dt` seconds and returns the new `(velocity, displacement)`.
    /// 
    #[inline]
    pub fn integrate(&mut self, accel_ms2: f64, dt: f64) -> (f64, f64) {
        self.velocity += accel_ms2 * dt;
        self.displacement += self.velocity * dt;
        (self.velocity, self.displacement)
    }

    /// Starts a new movement from rest.
    /// 
    pub fn begin(&mut self, at: Timestamp) {
        self.zero();
        self.movement_start = Some(at);
    }

    /// Starts the next excursion of an ongoing movement. Velocity is kept since the sensor is
    /// still moving, displacement and peak are measured from here on.
    /// 
    pub fn restart_excursion(&mut self, at: Timestamp) {
        self.displacement = 0.0;
        self.clear_peak();
        self.movement_start = Some(at);
    }

    /// Raises the stored peak if the current velocity is higher, returns whether it did.
    /// 
    pub fn track_peak(&mut self, at: Timestamp) -> bool {
        if self.velocity > self.peak_velocity {
            self.peak_velocity = self.velocity;
            self.peak_time = Some(at);
            return true;
        }
        false
    }

    pub fn clear_peak(&mut self) {
        self.peak_velocity = 0.0;
        self.peak_time = None;
    }

    /// Forces all state back to rest.
    /// 
    pub fn zero(&mut self) {
        *self = VelocityIntegrator::new();
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn displacement(&self) -> f64 {
        self.displacement
    }

    pub fn peak_velocity(&self) -> f64 {
        self.peak_velocity
    }

    pub fn peak_time(&self) -> Option<Timestamp> {
        self.peak_time
    }

    pub fn movement_start(&self) -> Option<Timestamp> {
        self.movement_start
    }

    /// In seconds; time since the current excursion started, `0.0` while idle.
    /// 
    pub fn elapsed(&self, now: Timestamp) -> f64 {
        self.movement_start.map_or(0.0, |start| now - start)
    }
}
