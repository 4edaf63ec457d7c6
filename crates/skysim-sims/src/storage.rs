//! Storage seams: path templates, reader traits and the slot tables.
//!
//! Persistence itself (FITS in production deployments) lives behind the
//! [`AlmReader`] and [`MapReader`] traits. A single container file per
//! realization holds several numbered slots; the mapping from named fields
//! to slot numbers is owned here and nowhere else.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use skysim_core::{Alm, CmbField, SimError, StokesField};

/// Placeholder that [`PathTemplate`] substitutes with the zero-padded index.
const INDEX_PLACEHOLDER: &str = "{index}";

/// An index-parameterized storage location.
///
/// The pattern contains a single `{index}` placeholder which resolves to the
/// simulation index, zero-padded to `pad` digits. The pattern string itself
/// is the opaque configuration carried in identity keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathTemplate {
    pattern: String,
    pad: usize,
}

impl PathTemplate {
    /// Creates a template. The pattern must contain `{index}` exactly once.
    pub fn new(pattern: impl Into<String>, pad: usize) -> Result<Self, SimError> {
        let pattern = pattern.into();
        if pattern.matches(INDEX_PLACEHOLDER).count() != 1 {
            return Err(SimError::config(format!(
                "path template {:?} must contain {} exactly once",
                pattern, INDEX_PLACEHOLDER
            )));
        }
        Ok(Self { pattern, pad })
    }

    /// The raw pattern string, for identity keys.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Resolves the template for a simulation index.
    pub fn resolve(&self, index: u32) -> PathBuf {
        let formatted = format!("{:0width$}", index, width = self.pad);
        PathBuf::from(self.pattern.replacen(INDEX_PLACEHOLDER, &formatted, 1))
    }
}

/// Reads harmonic coefficients out of a numbered container slot.
///
/// Implementations are expected to signal [`SimError::DataNotFound`] for a
/// missing file or slot and to return coefficients in native (Kelvin) units;
/// callers own unit scaling.
pub trait AlmReader: Send + Sync {
    /// Reads the coefficient set stored in `slot` of the container at `path`.
    fn read_alm(&self, path: &Path, slot: u32) -> Result<Alm, SimError>;
}

/// Reads a pixelized map out of a numbered container slot, in native units.
pub trait MapReader: Send + Sync {
    /// Reads the map stored in `slot` of the container at `path`.
    fn read_map(&self, path: &Path, slot: u32) -> Result<Vec<f64>, SimError>;
}

/// Slot of a harmonic field inside a per-realization coefficient container.
pub fn alm_slot(field: CmbField) -> u32 {
    match field {
        CmbField::Temperature => 1,
        CmbField::EMode => 2,
        CmbField::BMode => 3,
        CmbField::LensingPotential => 4,
    }
}

/// Slot of a Stokes component inside a map container.
pub fn map_slot(field: StokesField) -> u32 {
    match field {
        StokesField::Temperature => 0,
        StokesField::Q => 1,
        StokesField::U => 2,
    }
}

impl<T: AlmReader + ?Sized> AlmReader for &T {
    fn read_alm(&self, path: &Path, slot: u32) -> Result<Alm, SimError> {
        (**self).read_alm(path, slot)
    }
}

impl<T: AlmReader + ?Sized> AlmReader for std::sync::Arc<T> {
    fn read_alm(&self, path: &Path, slot: u32) -> Result<Alm, SimError> {
        (**self).read_alm(path, slot)
    }
}

impl<T: MapReader + ?Sized> MapReader for &T {
    fn read_map(&self, path: &Path, slot: u32) -> Result<Vec<f64>, SimError> {
        (**self).read_map(path, slot)
    }
}

impl<T: MapReader + ?Sized> MapReader for std::sync::Arc<T> {
    fn read_map(&self, path: &Path, slot: u32) -> Result<Vec<f64>, SimError> {
        (**self).read_map(path, slot)
    }
}
