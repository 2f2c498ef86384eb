
/// Incrementally computed arithmetic mean, does not keep the individual samples around so it can
/// be used on the sensor tick without allocating.
/// 
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningMean
{
    sum: f64,
    count: u32,
}

impl RunningMean
{
    pub const fn new() -> Self {
        RunningMean { sum: 0.0, count: 0 }
    }

    #[inline]
    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Amount of values pushed since construction or the last reset.
    /// 
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Mean of all pushed values, or `0.0` if nothing was pushed yet.
    /// 
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    pub fn reset(&mut self) {
        *self = RunningMean::new();
    }
}

/// Keeps track of the smallest and largest value seen, e.g. the lowest and highest point reached
/// during a movement.
/// 
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeTracker
{
    bounds: Option<(f64, f64)>,
}

impl RangeTracker
{
    pub const fn new() -> Self {
        RangeTracker { bounds: None }
    }

    #[inline]
    pub fn push(&mut self, value: f64) {
        self.bounds = match self.bounds {
            None => Some((value, value)),
            Some((min, max)) => Some((libm::fmin(min, value), libm::fmax(max, value))),
        };
    }

    pub fn min(&self) -> Option<f64> {
        self.bounds.map(|(min, _)| min)
    }

    pub fn max(&self) -> Option<f64> {
        self.bounds.map(|(_, max)| max)
    }

    /// Distance between the extremes, `0.0` while empty.
    /// 
    pub fn span(&self) -> f64 {
        match self.bounds {
            Some((min, max)) => max - min,
            None => 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.bounds = None;
    }
}
