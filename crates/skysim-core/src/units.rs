//! Physical unit conventions.
//!
//! Maps and harmonic coefficients cross the storage boundary in Kelvin and
//! are served in micro-Kelvin. The scaling is part of the public contract,
//! not an implementation detail, so it lives here under a name rather than
//! as a literal at call sites.

/// Kelvin to micro-Kelvin scaling applied to every thermodynamic map or
/// coefficient set entering the core.
pub const KELVIN_TO_MICROKELVIN: f64 = 1e6;

/// Full-sky solid angle in square degrees (4π steradians).
pub const FULL_SKY_DEG2: f64 = 129_600.0 / std::f64::consts::PI;
