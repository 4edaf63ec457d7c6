//! In-memory stand-ins for the storage and transform collaborators.
//!
//! Production deployments read FITS containers and call a spherical
//! transform engine; the suites here swap both for deterministic in-memory
//! doubles so every test input is fully controlled.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use num_complex::Complex64;

use skysim_core::{Alm, CmbField, Resolution, SimError, SkyMap, StokesField, TransferFunction};
use skysim_sims::cmb::LensedCmbSource;
use skysim_sims::phase::PixelPhaseLibrary;
use skysim_sims::storage::{alm_slot, map_slot, AlmReader, MapReader, PathTemplate};
use skysim_sims::synth::NoiseAugmentedSynthesizer;
use skysim_sims::transform::SphericalTransform;

/// Deterministic, closed-form coefficient fill for a given realization and
/// container slot. Values are in Kelvin, like the archives the production
/// reader serves. The m = 0 block stays real, as for a real-valued field.
pub fn kelvin_alm(index: u32, slot: u32, lmax: usize) -> Alm {
    let mut alm = Alm::zeros(lmax);
    for m in 0..=lmax {
        for l in m..=lmax {
            let w = 0.1 * ((l + 1) * (m + 2)) as f64 * f64::from(slot + 3) * f64::from(index + 5);
            let re = 1e-6 * w.sin();
            let im = if m == 0 { 0.0 } else { 1e-6 * w.cos() };
            alm.set(l, m, Complex64::new(re, im));
        }
    }
    alm
}

/// Alm archive holding a fixed set of realizations behind a path template.
pub struct SyntheticAlmArchive {
    template: PathTemplate,
    lmax: usize,
    containers: HashMap<(PathBuf, u32), Alm>,
}

impl SyntheticAlmArchive {
    /// Builds an archive with containers for `indices`, each holding the
    /// four standard slots.
    pub fn new(template: PathTemplate, lmax: usize, indices: &[u32]) -> Self {
        let mut containers = HashMap::new();
        for &index in indices {
            let path = template.resolve(index);
            for slot in 1..=4u32 {
                containers.insert((path.clone(), slot), kelvin_alm(index, slot, lmax));
            }
        }
        Self {
            template,
            lmax,
            containers,
        }
    }

    /// Default archive: indices 0..count behind a conventional template.
    pub fn with_count(count: u32) -> Self {
        let indices: Vec<u32> = (0..count).collect();
        Self::new(
            PathTemplate::new("/sims/cmb_alm_mc_{index}.fits", 4).unwrap(),
            8,
            &indices,
        )
    }

    /// The archive's template, for wiring sources.
    pub fn template(&self) -> PathTemplate {
        self.template.clone()
    }

    /// The raw stored (Kelvin) coefficients for a field, bypassing sources.
    pub fn stored_alm(&self, index: u32, field: CmbField) -> Alm {
        kelvin_alm(index, alm_slot(field), self.lmax)
    }
}

impl AlmReader for SyntheticAlmArchive {
    fn read_alm(&self, path: &Path, slot: u32) -> Result<Alm, SimError> {
        self.containers
            .get(&(path.to_path_buf(), slot))
            .cloned()
            .ok_or_else(|| SimError::not_found(path, format!("no container slot {}", slot)))
    }
}

/// Map store holding (path, slot) -> Kelvin pixel vectors.
#[derive(Default)]
pub struct MemoryMapStore {
    maps: HashMap<(PathBuf, u32), Vec<f64>>,
}

impl MemoryMapStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the T/Q/U slots of one container.
    pub fn insert_container(&mut self, path: impl Into<PathBuf>, t: Vec<f64>, q: Vec<f64>, u: Vec<f64>) {
        let path = path.into();
        self.maps
            .insert((path.clone(), map_slot(StokesField::Temperature)), t);
        self.maps.insert((path.clone(), map_slot(StokesField::Q)), q);
        self.maps.insert((path, map_slot(StokesField::U)), u);
    }
}

impl MapReader for MemoryMapStore {
    fn read_map(&self, path: &Path, slot: u32) -> Result<Vec<f64>, SimError> {
        self.maps
            .get(&(path.to_path_buf(), slot))
            .cloned()
            .ok_or_else(|| SimError::not_found(path, format!("no container slot {}", slot)))
    }
}

/// Deterministic linear stand-in for the spherical transform engine.
///
/// Not a real transform: each pixel receives a fixed linear combination of
/// the coefficients, which preserves exactly the properties the synthesizer
/// relies on (linearity, determinism, resolution-sized output).
pub struct LinearTransform;

impl LinearTransform {
    fn project(alm: &Alm, resolution: Resolution, shift: f64) -> Vec<f64> {
        (0..resolution.npix())
            .map(|p| {
                alm.coeffs()
                    .iter()
                    .enumerate()
                    .map(|(k, c)| {
                        let angle = 2.0 * PI * ((p + 1) * (k + 3)) as f64 / 257.0 + shift;
                        c.re * angle.cos() + c.im * angle.sin()
                    })
                    .sum()
            })
            .collect()
    }
}

impl SphericalTransform for LinearTransform {
    fn synthesize(&self, alm: &Alm, resolution: Resolution) -> Result<SkyMap, SimError> {
        SkyMap::from_pixels(resolution, Self::project(alm, resolution, 0.0))
    }

    fn synthesize_spin2(
        &self,
        elm: &Alm,
        blm: &Alm,
        resolution: Resolution,
    ) -> Result<(SkyMap, SkyMap), SimError> {
        // Q and U each mix both E and B, like the real spin-2 transform.
        let e0 = Self::project(elm, resolution, 0.0);
        let e1 = Self::project(elm, resolution, 0.7);
        let b0 = Self::project(blm, resolution, 0.0);
        let b1 = Self::project(blm, resolution, 0.7);
        let q: Vec<f64> = e0.iter().zip(&b1).map(|(e, b)| e - b).collect();
        let u: Vec<f64> = e1.iter().zip(&b0).map(|(e, b)| e + b).collect();
        Ok((
            SkyMap::from_pixels(resolution, q)?,
            SkyMap::from_pixels(resolution, u)?,
        ))
    }
}

/// A smooth, monotonically falling transfer function up to `lmax`.
pub fn cosine_transfer(lmax: usize) -> Vec<f64> {
    (0..=lmax)
        .map(|l| (0.5 * PI * l as f64 / (lmax + 1) as f64).cos())
        .collect()
}

/// The standard wiring the integration suites share: a lensed source over a
/// four-realization archive, the linear engine, a falling transfer function
/// and a phase library at nside 4.
pub fn standard_synthesizer(
    phase_seed: u32,
    nlev_t: f64,
    nlev_p: f64,
) -> NoiseAugmentedSynthesizer<LensedCmbSource<SyntheticAlmArchive>, LinearTransform, PixelPhaseLibrary>
{
    let resolution = Resolution::new(4).unwrap();
    let archive = SyntheticAlmArchive::with_count(4);
    let template = archive.template();
    NoiseAugmentedSynthesizer::new(
        LensedCmbSource::new(archive, template),
        LinearTransform,
        TransferFunction::new(cosine_transfer(8)),
        nlev_t,
        nlev_p,
        PixelPhaseLibrary::new(phase_seed, resolution),
        resolution,
    )
    .expect("standard wiring is consistent")
}
