//! Observed-data adapter.
//!
//! Serves fixed, previously observed temperature and polarization maps in
//! place of synthetic realizations, and composes `signal + noise` map
//! realizations for synthetic ids. Unlike the harmonic libraries, this
//! source stores already-pixelized maps, so no synthesis is involved; maps
//! are read, summed and unit-scaled.

use std::path::{Path, PathBuf};

use skysim_core::{
    IdentityKey, IdentityKeyProvider, IdentityValue, PolarizationMap, Resolution, SimError,
    SimulationId, SkyMap, StokesField, KELVIN_TO_MICROKELVIN,
};

use crate::storage::{map_slot, MapReader, PathTemplate};

/// Map library backed by three fixed data sources: indexed signal
/// realizations, a matching indexed noise realization set, and one
/// unindexed observed dataset.
#[derive(Debug, Clone)]
pub struct ObservedDataAdapter<R> {
    reader: R,
    signal: PathTemplate,
    noise: PathTemplate,
    observed: PathBuf,
}

impl<R: MapReader> ObservedDataAdapter<R> {
    /// Creates an adapter over the three backing locations.
    pub fn new(
        reader: R,
        signal: PathTemplate,
        noise: PathTemplate,
        observed: impl Into<PathBuf>,
    ) -> Self {
        Self {
            reader,
            signal,
            noise,
            observed: observed.into(),
        }
    }

    fn read_scaled(&self, path: &Path, field: StokesField) -> Result<SkyMap, SimError> {
        let pixels = self.reader.read_map(path, map_slot(field))?;
        let resolution = Resolution::from_npix(pixels.len())?;
        let mut map = SkyMap::from_pixels(resolution, pixels)?;
        map.scale(KELVIN_TO_MICROKELVIN);
        Ok(map)
    }

    /// `signal + noise` for one synthetic realization, micro-Kelvin.
    fn synthetic_map(&self, index: u32, field: StokesField) -> Result<SkyMap, SimError> {
        let mut map = self.read_scaled(&self.signal.resolve(index), field)?;
        map.add(&self.read_scaled(&self.noise.resolve(index), field)?)?;
        Ok(map)
    }

    /// Temperature map for an id. The observed id yields the observed
    /// dataset; synthetic ids yield `signal + noise` realizations.
    pub fn temperature_map(&self, id: SimulationId) -> Result<SkyMap, SimError> {
        match id {
            SimulationId::Observed => self.observed_temperature(),
            SimulationId::Synthetic(index) => {
                self.synthetic_map(index, StokesField::Temperature)
            }
        }
    }

    /// Polarization (Q, U) pair for an id, with the same routing as
    /// [`temperature_map`](Self::temperature_map).
    pub fn polarization_map(&self, id: SimulationId) -> Result<PolarizationMap, SimError> {
        match id {
            SimulationId::Observed => self.observed_polarization(),
            SimulationId::Synthetic(index) => PolarizationMap::new(
                self.synthetic_map(index, StokesField::Q)?,
                self.synthetic_map(index, StokesField::U)?,
            ),
        }
    }

    /// The observed temperature map, micro-Kelvin.
    pub fn observed_temperature(&self) -> Result<SkyMap, SimError> {
        self.read_scaled(&self.observed, StokesField::Temperature)
    }

    /// The observed (Q, U) pair, micro-Kelvin.
    pub fn observed_polarization(&self) -> Result<PolarizationMap, SimError> {
        PolarizationMap::new(
            self.read_scaled(&self.observed, StokesField::Q)?,
            self.read_scaled(&self.observed, StokesField::U)?,
        )
    }
}

impl<R> IdentityKeyProvider for ObservedDataAdapter<R> {
    fn identity_key(&self) -> IdentityKey {
        IdentityKey::new()
            .with("cmbs", IdentityValue::Text(self.signal.pattern().into()))
            .with("noise", IdentityValue::Text(self.noise.pattern().into()))
            .with(
                "data",
                IdentityValue::Text(self.observed.display().to_string()),
            )
    }
}
