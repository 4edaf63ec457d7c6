//! Field selectors for harmonic and pixel-space data.
//!
//! Storage containers address their contents by numbered slots; code never
//! passes those numbers around. All per-field requests go through these
//! enums, and the slot numbering lives in a single lookup table owned by the
//! storage seam.

use serde::{Deserialize, Serialize};

/// A harmonic-space CMB field, as stored per realization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CmbField {
    /// Temperature anisotropy coefficients.
    Temperature,
    /// E-mode polarization coefficients.
    EMode,
    /// B-mode polarization coefficients.
    BMode,
    /// Lensing potential coefficients (unlensed input realizations only).
    LensingPotential,
}

impl CmbField {
    /// Whether this field carries thermodynamic units (Kelvin natively) and
    /// therefore takes the micro-Kelvin boundary scaling. The lensing
    /// potential is dimensionless.
    pub fn is_thermodynamic(&self) -> bool {
        !matches!(self, CmbField::LensingPotential)
    }
}

impl std::fmt::Display for CmbField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CmbField::Temperature => write!(f, "temperature"),
            CmbField::EMode => write!(f, "e_mode"),
            CmbField::BMode => write!(f, "b_mode"),
            CmbField::LensingPotential => write!(f, "lensing_potential"),
        }
    }
}

/// A pixel-space Stokes component.
///
/// Doubles as the noise-channel discriminator handed to the phase source:
/// temperature, Q and U noise are independent streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StokesField {
    /// Stokes I / temperature.
    Temperature,
    /// Stokes Q.
    Q,
    /// Stokes U.
    U,
}

impl StokesField {
    /// Stable discriminator used when deriving per-channel noise streams.
    pub fn discriminator(&self) -> u32 {
        match self {
            StokesField::Temperature => 0,
            StokesField::Q => 1,
            StokesField::U => 2,
        }
    }
}

impl std::fmt::Display for StokesField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StokesField::Temperature => write!(f, "temperature"),
            StokesField::Q => write!(f, "q"),
            StokesField::U => write!(f, "u"),
        }
    }
}
