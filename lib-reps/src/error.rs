use core::{error::Error, fmt};

/// Misconfiguration found while building a detector or one of its gates. These are programming or
/// settings errors so they are reported once at construction instead of on the sample path.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError
{
    NonPositiveSampleRate(f64),
    InvalidThreshold { name: &'static str, value: f64 },
    MovementDurationOrder { min: f64, max: f64 },
    InvalidRomBounds { min: f64, max: f64 },
    InvalidTolerance(f64),
    InvalidTarget(f64),
}

impl Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NonPositiveSampleRate(hz) => write!(f, "Sample rate must be positive, got {} Hz", hz),
            Self::InvalidThreshold { name, value } => write!(f, "Invalid value for {}: {}", name, value),
            Self::MovementDurationOrder { min, max } => write!(
                f, "Minimum movement duration {}s must be below the maximum {}s", min, max
            ),
            Self::InvalidRomBounds { min, max } => write!(f, "Invalid range of motion bounds [{}-{}]", min, max),
            Self::InvalidTolerance(tol) => write!(f, "Range of motion tolerance must be in [0, 1), got {}", tol),
            Self::InvalidTarget(target) => write!(f, "Range of motion target must be positive, got {}", target),
        }
    }
}
