use core::fmt;
use crate::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplacementUnit
{
    Meters,
    Millimeters,
}

impl DisplacementUnit
{
    /// Multiplier that converts a value in this unit to meters.
    /// 
    pub const fn factor(&self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Millimeters => 0.001,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Millimeters => "mm",
        }
    }

    #[inline]
    pub fn to_meters(&self, value: f64) -> f64 {
        value * self.factor()
    }

    #[inline]
    pub fn from_meters(&self, meters: f64) -> f64 {
        meters / self.factor()
    }
}

/// Checks whether the displacement of a rep lies within an inclusive `[min, max]` band. The gate
/// carries no mutable state so one instance can be shared between detectors.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeOfMotionGate
{
    min: f64,
    max: f64,
    unit: DisplacementUnit,
}

impl RangeOfMotionGate
{
    pub fn new(min: f64, max: f64, unit: DisplacementUnit) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(ConfigError::InvalidRomBounds { min, max });
        }
        Ok(RangeOfMotionGate { min, max, unit })
    }

    /// Band of `target ± tolerance * target`, e.g. a 0.5 m target with a 0.2 tolerance accepts
    /// anything between 0.4 and 0.6 m.
    /// 
    pub fn from_target(target: f64, tolerance: f64, unit: DisplacementUnit) -> Result<Self, ConfigError> {
        if !is_positive_finite(target) {
            return Err(ConfigError::InvalidTarget(target));
        }
        if !tolerance.is_finite() || !(0.0..1.0).contains(&tolerance) {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        RangeOfMotionGate::new(target * (1.0 - tolerance), target * (1.0 + tolerance), unit)
    }

    pub fn from_config(config: &RomConfig) -> Result<Self, ConfigError> {
        match *config {
            RomConfig::Bounds { min, max, unit } => RangeOfMotionGate::new(min, max, unit),
            RomConfig::Target { target, tolerance, unit } => RangeOfMotionGate::from_target(target, tolerance, unit),
        }
    }

    /// `displacement` is expressed in the gate's unit.
    /// 
    #[inline]
    pub fn is_valid(&self, displacement: f64) -> bool {
        displacement >= self.min && displacement <= self.max
    }

    pub fn validate(&self, displacement: f64) -> RomValidation {
        RomValidation {
            is_valid: self.is_valid(displacement),
            displacement,
            min: self.min,
            max: self.max,
            unit: self.unit,
        }
    }

    /// Grades a displacement measured in meters, e.g. straight from the integrator.
    /// 
    pub fn validate_meters(&self, meters: f64) -> RomValidation {
        self.validate(self.unit.from_meters(meters))
    }

    pub fn to_meters(&self, displacement: f64) -> f64 {
        self.unit.to_meters(displacement)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn unit(&self) -> DisplacementUnit {
        self.unit
    }
}

/// Outcome of a range-of-motion check. A failed check is advisory, the rep is still reported.
/// 
/// Displays as a human readable message, e.g. `Displacement 0.15m outside range [0.20-0.80m]`.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RomValidation
{
    pub is_valid: bool,
    pub displacement: f64,
    pub min: f64,
    pub max: f64,
    pub unit: DisplacementUnit,
}

impl fmt::Display for RomValidation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = self.unit.label();
        let verdict = if self.is_valid { "within" } else { "outside" };
        write!(
            f, "Displacement {:.2}{} {} range [{:.2}-{:.2}{}]",
            self.displacement, label, verdict, self.min, self.max, label
        )
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn meters_gate() -> RangeOfMotionGate {
        RangeOfMotionGate::new(0.20, 0.80, DisplacementUnit::Meters).unwrap()
    }

    #[test]
    pub fn test_bounds_are_inclusive() {
        let gate = meters_gate();
        assert!(gate.is_valid(0.20));
        assert!(gate.is_valid(0.80));
        assert!(gate.is_valid(0.5));
        assert!(!gate.is_valid(0.20 - 1e-9));
        assert!(!gate.is_valid(0.80 + 1e-9));
    }

    #[test]
    pub fn test_failure_message() {
        let result = meters_gate().validate(0.15);
        assert!(!result.is_valid);

        let message = result.to_string();
        assert!(message.contains("0.15m"), "{}", message);
        assert!(message.contains("[0.20-0.80m]"), "{}", message);
    }

    #[test]
    pub fn test_millimeter_gate() {
        let gate = RangeOfMotionGate::new(200.0, 800.0, DisplacementUnit::Millimeters).unwrap();
        assert!(approx_eq(gate.to_meters(450.0), 0.45, 1e-12));

        let result = gate.validate_meters(0.45);
        assert!(result.is_valid);
        assert!(approx_eq(result.displacement, 450.0, 1e-9));

        let message = gate.validate(150.0).to_string();
        assert!(message.contains("150.00mm"), "{}", message);
        assert!(message.contains("[200.00-800.00mm]"), "{}", message);
    }

    #[test]
    pub fn test_target_with_tolerance() {
        let gate = RangeOfMotionGate::from_target(0.5, 0.2, DisplacementUnit::Meters).unwrap();
        assert!(approx_eq(gate.min(), 0.4, 1e-12));
        assert!(approx_eq(gate.max(), 0.6, 1e-12));
        assert!(gate.is_valid(0.55));
        assert!(!gate.is_valid(0.35));
    }

    #[test]
    pub fn test_misconfiguration_fails_fast() {
        assert_eq!(
            RangeOfMotionGate::new(0.8, 0.2, DisplacementUnit::Meters),
            Err(ConfigError::InvalidRomBounds { min: 0.8, max: 0.2 })
        );
        assert_eq!(
            RangeOfMotionGate::from_target(0.5, 1.5, DisplacementUnit::Meters),
            Err(ConfigError::InvalidTolerance(1.5))
        );
        assert_eq!(
            RangeOfMotionGate::from_target(0.0, 0.1, DisplacementUnit::Meters),
            Err(ConfigError::InvalidTarget(0.0))
        );
    }
}
