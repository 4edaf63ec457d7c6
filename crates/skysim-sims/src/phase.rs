//! Deterministic pixel-noise phases.
//!
//! A phase source hands out reproducible per-pixel random values keyed by
//! (simulation index, noise channel). Realizations must be zero-mean and
//! unit-variance per pixel at the source's declared resolution; the
//! synthesizer scales them to physical noise, it never reshapes their
//! statistics.

use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_pcg::Pcg32;

use skysim_core::{IdentityKey, IdentityKeyProvider, IdentityValue, Resolution, SimError, StokesField};

/// Deterministic per-pixel random values, indexed by simulation id and
/// noise channel.
///
/// # Contract
///
/// - Same (index, channel, source configuration) in, bit-identical values
///   out, across calls, threads and processes.
/// - Values are zero-mean, unit-variance white noise in pixel space.
/// - Every realization has exactly `resolution().npix()` entries.
pub trait NoisePhaseSource: IdentityKeyProvider + Send + Sync {
    /// The fixed resolution realizations are drawn at.
    fn resolution(&self) -> Resolution;

    /// The realization for `(index, channel)`.
    fn realization(&self, index: u32, channel: StokesField) -> Result<Vec<f64>, SimError>;
}

/// Deterministic phase library backed by per-stream PCG generators.
///
/// Each `(index, channel)` pair gets its own generator, seeded by hashing
/// the library seed together with the index and the channel discriminator.
/// Streams are therefore independent of each other and of call order.
#[derive(Debug, Clone)]
pub struct PixelPhaseLibrary {
    seed: u32,
    resolution: Resolution,
}

impl PixelPhaseLibrary {
    /// Creates a library drawing at the given resolution.
    pub fn new(seed: u32, resolution: Resolution) -> Self {
        Self { seed, resolution }
    }

    /// The library seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Derives the stream seed for an `(index, channel)` pair using BLAKE3.
    fn stream_seed(&self, index: u32, channel: StokesField) -> u64 {
        let mut input = Vec::with_capacity(12);
        input.extend_from_slice(&self.seed.to_le_bytes());
        input.extend_from_slice(&index.to_le_bytes());
        input.extend_from_slice(&channel.discriminator().to_le_bytes());
        let hash = blake3::hash(&input);
        let bytes: [u8; 8] = hash.as_bytes()[0..8].try_into().expect("blake3 output is 32 bytes");
        u64::from_le_bytes(bytes)
    }
}

impl NoisePhaseSource for PixelPhaseLibrary {
    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn realization(&self, index: u32, channel: StokesField) -> Result<Vec<f64>, SimError> {
        let mut rng = Pcg32::seed_from_u64(self.stream_seed(index, channel));
        let npix = self.resolution.npix();
        let mut values = Vec::with_capacity(npix);
        for _ in 0..npix {
            values.push(rng.sample::<f64, _>(StandardNormal));
        }
        Ok(values)
    }
}

impl IdentityKeyProvider for PixelPhaseLibrary {
    fn identity_key(&self) -> IdentityKey {
        IdentityKey::new()
            .with("seed", IdentityValue::Int(i64::from(self.seed)))
            .with(
                "nside",
                IdentityValue::Int(i64::from(self.resolution.nside())),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> PixelPhaseLibrary {
        PixelPhaseLibrary::new(42, Resolution::new(8).unwrap())
    }

    #[test]
    fn test_realizations_are_deterministic() {
        let lib = library();
        let a = lib.realization(3, StokesField::Q).unwrap();
        let b = lib.realization(3, StokesField::Q).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_streams_differ_across_indices_and_channels() {
        let lib = library();
        let base = lib.realization(0, StokesField::Temperature).unwrap();
        let other_index = lib.realization(1, StokesField::Temperature).unwrap();
        let other_channel = lib.realization(0, StokesField::Q).unwrap();
        assert_ne!(base, other_index);
        assert_ne!(base, other_channel);
    }

    #[test]
    fn test_streams_differ_across_seeds() {
        let a = library().realization(0, StokesField::U).unwrap();
        let b = PixelPhaseLibrary::new(43, Resolution::new(8).unwrap())
            .realization(0, StokesField::U)
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_realization_length_matches_resolution() {
        let lib = library();
        let r = lib.realization(9, StokesField::Temperature).unwrap();
        assert_eq!(r.len(), lib.resolution().npix());
    }

    #[test]
    fn test_samples_are_roughly_standard_normal() {
        // One realization at nside 16 gives 3072 samples; with unit variance
        // the sample mean has sigma ~ 0.018 and the sample variance
        // sigma ~ 0.026. Bounds below are ~5 sigma.
        let lib = PixelPhaseLibrary::new(7, Resolution::new(16).unwrap());
        let r = lib.realization(0, StokesField::Temperature).unwrap();
        let n = r.len() as f64;
        let mean = r.iter().sum::<f64>() / n;
        let var = r.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
        assert!(mean.abs() < 0.1, "sample mean {} too far from 0", mean);
        assert!((var - 1.0).abs() < 0.15, "sample variance {} too far from 1", var);
    }

    #[test]
    fn test_identity_key_contents() {
        let key = library().identity_key();
        assert_eq!(key.get("seed"), Some(&IdentityValue::Int(42)));
        assert_eq!(key.get("nside"), Some(&IdentityValue::Int(8)));
    }
}
