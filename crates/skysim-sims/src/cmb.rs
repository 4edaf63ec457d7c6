//! Indexed harmonic CMB input libraries.
//!
//! Two variants exist, mirroring how input realization sets are published:
//! lensed scalar coefficients (temperature, E, B) and unlensed coefficients,
//! which additionally carry the lensing potential. Coefficients come out of
//! storage in Kelvin and are served in micro-Kelvin; the lensing potential is
//! dimensionless and passes through unscaled.

use skysim_core::{
    Alm, CmbField, IdentityKey, IdentityKeyProvider, IdentityValue, SimError,
    KELVIN_TO_MICROKELVIN,
};

use crate::storage::{alm_slot, AlmReader, PathTemplate};

/// Indexed provider of harmonic CMB coefficients, unit-scaled.
///
/// Only synthetic realizations live here; observed data is the
/// [`ObservedDataAdapter`](crate::observed::ObservedDataAdapter)'s business,
/// which is why the index type is `u32` rather than
/// [`SimulationId`](skysim_core::SimulationId).
pub trait CmbAlmSource: IdentityKeyProvider + Send + Sync {
    /// Coefficients for `field` of realization `index`, in micro-Kelvin
    /// (lensing potential: dimensionless).
    fn alm(&self, index: u32, field: CmbField) -> Result<Alm, SimError>;
}

fn read_scaled<R: AlmReader>(
    reader: &R,
    paths: &PathTemplate,
    index: u32,
    field: CmbField,
) -> Result<Alm, SimError> {
    let mut alm = reader.read_alm(&paths.resolve(index), alm_slot(field))?;
    if field.is_thermodynamic() {
        alm.scale(KELVIN_TO_MICROKELVIN);
    }
    Ok(alm)
}

/// Lensed scalar CMB input library (temperature, E-mode, B-mode).
#[derive(Debug, Clone)]
pub struct LensedCmbSource<R> {
    reader: R,
    paths: PathTemplate,
}

impl<R: AlmReader> LensedCmbSource<R> {
    /// Creates a source reading per-realization containers through `paths`.
    pub fn new(reader: R, paths: PathTemplate) -> Self {
        Self { reader, paths }
    }

    /// The container location template.
    pub fn paths(&self) -> &PathTemplate {
        &self.paths
    }
}

impl<R: AlmReader> CmbAlmSource for LensedCmbSource<R> {
    fn alm(&self, index: u32, field: CmbField) -> Result<Alm, SimError> {
        if field == CmbField::LensingPotential {
            return Err(SimError::FieldNotSupported {
                field,
                source: "lensed scalar cmb inputs",
            });
        }
        read_scaled(&self.reader, &self.paths, index, field)
    }
}

impl<R> IdentityKeyProvider for LensedCmbSource<R> {
    fn identity_key(&self) -> IdentityKey {
        IdentityKey::new().with(
            "sim_lib",
            IdentityValue::Tag("lensed scalar cmb inputs".into()),
        )
    }
}

/// Unlensed scalar CMB input library (temperature, E-mode, B-mode and the
/// lensing potential).
#[derive(Debug, Clone)]
pub struct UnlensedCmbSource<R> {
    reader: R,
    paths: PathTemplate,
}

impl<R: AlmReader> UnlensedCmbSource<R> {
    /// Creates a source reading per-realization containers through `paths`.
    pub fn new(reader: R, paths: PathTemplate) -> Self {
        Self { reader, paths }
    }

    /// The container location template.
    pub fn paths(&self) -> &PathTemplate {
        &self.paths
    }
}

impl<R: AlmReader> CmbAlmSource for UnlensedCmbSource<R> {
    fn alm(&self, index: u32, field: CmbField) -> Result<Alm, SimError> {
        read_scaled(&self.reader, &self.paths, index, field)
    }
}

impl<R> IdentityKeyProvider for UnlensedCmbSource<R> {
    fn identity_key(&self) -> IdentityKey {
        IdentityKey::new().with(
            "sim_lib",
            IdentityValue::Tag("unlensed scalar cmb inputs".into()),
        )
    }
}

impl<S: CmbAlmSource + ?Sized> CmbAlmSource for &S {
    fn alm(&self, index: u32, field: CmbField) -> Result<Alm, SimError> {
        (**self).alm(index, field)
    }
}
