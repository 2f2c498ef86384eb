use crate::*;

/// One vertical acceleration reading as delivered by the sensor transport.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelerationSample
{
    /// In g; vertical acceleration. When `is_calibrated` is set the sensor bias (and with it
    /// gravity) has already been removed, otherwise the raw reading still includes 1 g of gravity.
    pub value_g: f64,

    pub timestamp: Timestamp,

    pub is_calibrated: bool,
}

impl AccelerationSample
{
    pub const fn new(value_g: f64, timestamp: Timestamp, is_calibrated: bool) -> Self {
        AccelerationSample { value_g, timestamp, is_calibrated }
    }

    /// Builds an already calibrated sample from an acceleration in m/s².
    /// 
    pub fn from_ms2(accel_ms2: f64, timestamp: Timestamp) -> Self {
        AccelerationSample::new(ms2_to_g(accel_ms2), timestamp, true)
    }

    /// Linear acceleration in m/s². Uncalibrated readings fall back to subtracting a nominal 1 g.
    /// 
    pub fn to_ms2(&self) -> f64 {
        let linear_g = if self.is_calibrated { self.value_g } else { self.value_g - 1.0 };
        g_to_ms2(linear_g)
    }

    /// NaN or infinite readings would permanently corrupt the integrated state.
    /// 
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.value_g.is_finite() && self.timestamp.is_finite()
    }
}
