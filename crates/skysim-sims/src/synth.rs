//! Noise-augmented map synthesis.
//!
//! Combines an injected harmonic CMB source, an instrument transfer function
//! and a deterministic pixel-noise stream into final temperature and Q/U
//! maps. Signal is convolved in the harmonic domain, synthesized at the
//! target resolution, then noise scaled to the configured level is added in
//! pixel space.

use skysim_core::{
    CmbField, IdentityKey, IdentityKeyProvider, IdentityValue, PolarizationMap, Resolution,
    SimError, SkyMap, StokesField, TransferFunction,
};

use crate::cmb::CmbAlmSource;
use crate::phase::NoisePhaseSource;
use crate::transform::SphericalTransform;

/// Simulation library producing signal + homogeneous-noise maps.
///
/// For fixed construction parameters and a fixed index, repeated calls are
/// bit-identical: the only randomness is what the phase source derives
/// deterministically from (index, channel).
#[derive(Debug, Clone)]
pub struct NoiseAugmentedSynthesizer<C, T, P> {
    cmb: C,
    engine: T,
    transf: TransferFunction,
    nlev_t: f64,
    nlev_p: f64,
    phases: P,
    resolution: Resolution,
}

impl<C, T, P> NoiseAugmentedSynthesizer<C, T, P>
where
    C: CmbAlmSource,
    T: SphericalTransform,
    P: NoisePhaseSource,
{
    /// Creates a synthesizer.
    ///
    /// `nlev_t` and `nlev_p` are the temperature and polarization noise
    /// levels in micro-Kelvin arcmin. The phase source must draw at the
    /// target resolution; a mismatch is a configuration error, caught here
    /// rather than on the first map request.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cmb: C,
        engine: T,
        transf: TransferFunction,
        nlev_t: f64,
        nlev_p: f64,
        phases: P,
        resolution: Resolution,
    ) -> Result<Self, SimError> {
        if phases.resolution() != resolution {
            return Err(SimError::config(format!(
                "phase source draws at {} but the synthesizer targets {}",
                phases.resolution(),
                resolution
            )));
        }
        Ok(Self {
            cmb,
            engine,
            transf,
            nlev_t,
            nlev_p,
            phases,
            resolution,
        })
    }

    /// Target resolution of produced maps.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Fetches and length-checks the noise realization for a channel.
    fn noise(&self, index: u32, channel: StokesField) -> Result<Vec<f64>, SimError> {
        let noise = self.phases.realization(index, channel)?;
        if noise.len() != self.resolution.npix() {
            return Err(SimError::ResolutionMismatch {
                expected: self.resolution.npix(),
                actual: noise.len(),
            });
        }
        Ok(noise)
    }

    /// Beam-convolved signal-only temperature map for a realization.
    pub fn signal_temperature_map(&self, index: u32) -> Result<SkyMap, SimError> {
        let tlm = self.cmb.alm(index, CmbField::Temperature)?;
        self.engine
            .synthesize(&tlm.convolved(&self.transf), self.resolution)
    }

    /// Temperature map for a realization: convolved signal plus scaled
    /// noise.
    pub fn temperature_map(&self, index: u32) -> Result<SkyMap, SimError> {
        let mut map = self.signal_temperature_map(index)?;
        let sigma = self.resolution.pixel_noise_sigma(self.nlev_t);
        map.add_scaled(&self.noise(index, StokesField::Temperature)?, sigma)?;
        Ok(map)
    }

    /// Beam-convolved signal-only (Q, U) pair for a realization.
    pub fn signal_polarization_map(&self, index: u32) -> Result<PolarizationMap, SimError> {
        let elm = self.cmb.alm(index, CmbField::EMode)?;
        let blm = self.cmb.alm(index, CmbField::BMode)?;
        let (q, u) = self.engine.synthesize_spin2(
            &elm.convolved(&self.transf),
            &blm.convolved(&self.transf),
            self.resolution,
        )?;
        PolarizationMap::new(q, u)
    }

    /// Polarization map pair for a realization. Q and U come out of one
    /// joint spin-2 synthesis and receive independent noise realizations,
    /// both scaled by the polarization noise level.
    pub fn polarization_map(&self, index: u32) -> Result<PolarizationMap, SimError> {
        let mut pol = self.signal_polarization_map(index)?;
        let sigma = self.resolution.pixel_noise_sigma(self.nlev_p);
        pol.q
            .add_scaled(&self.noise(index, StokesField::Q)?, sigma)?;
        pol.u
            .add_scaled(&self.noise(index, StokesField::U)?, sigma)?;
        Ok(pol)
    }
}

impl<C, T, P: NoisePhaseSource> IdentityKeyProvider for NoiseAugmentedSynthesizer<C, T, P> {
    fn identity_key(&self) -> IdentityKey {
        IdentityKey::new()
            .with("transf", IdentityValue::Digest(self.transf.digest()))
            .with("nlev_t", IdentityValue::Float(self.nlev_t as f32))
            .with("nlev_p", IdentityValue::Float(self.nlev_p as f32))
            .with(
                "pix_phas",
                IdentityValue::Nested(self.phases.identity_key()),
            )
    }
}
