#![cfg_attr(not(test), no_std)]

pub mod float_utils;
pub use float_utils::*;

pub mod stats;
pub use stats::*;


/// Standard gravity as used for converting accelerometer readings, which are reported in g, into
/// m/s². 
/// 
pub const G_TO_MS2: f64 = 9.81;

/// Converts an acceleration in g to m/s².
/// 
#[inline]
pub fn g_to_ms2(g: f64) -> f64 {
    g * G_TO_MS2
}

/// Converts an acceleration in m/s² to g.
/// 
#[inline]
pub fn ms2_to_g(ms2: f64) -> f64 {
    ms2 / G_TO_MS2
}
