#![cfg_attr(not(any(test, feature = "csv")), no_std)]

//! Turns a stream of vertical acceleration samples from a wearable sensor into validated
//! resistance-training repetitions.
//! 
//! Every sample is integrated into velocity and displacement, a phase state machine splits the
//! motion into eccentric/concentric excursions and every completed excursion is checked by a
//! refractory gate (minimum time between reps) and an optional range-of-motion gate before it is
//! reported as a [`RepRecord`].
//! 

use math::*;

pub mod error;
pub use error::*;

pub mod config;
pub use config::*;

pub mod sample;
pub use sample::*;

pub mod integrator;
pub use integrator::*;

pub mod refractory;
pub use refractory::*;

pub mod rom;
pub use rom::*;

pub mod rep;
pub use rep::*;

pub mod observer;
pub use observer::*;

pub mod phase;
pub use phase::*;

pub mod detector;
pub use detector::*;

/// Seconds on a monotonic clock, as delivered by the sensor transport.
/// 
pub type Timestamp = f64;

#[cfg(test)]
mod tests;
