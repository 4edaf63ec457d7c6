//! HEALPix resolution and pixel-noise conversions.

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::units::FULL_SKY_DEG2;

/// A HEALPix map resolution.
///
/// `nside` must be a power of two. The pixel count is `12 * nside^2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resolution {
    nside: u32,
}

impl Resolution {
    /// Creates a resolution, validating the HEALPix nside constraint.
    pub fn new(nside: u32) -> Result<Self, SimError> {
        if nside == 0 || !nside.is_power_of_two() {
            return Err(SimError::config(format!(
                "nside must be a positive power of two, got {}",
                nside
            )));
        }
        Ok(Self { nside })
    }

    /// Recovers a resolution from a full-sky pixel count, if `npix` is
    /// `12 * nside^2` for a valid nside.
    pub fn from_npix(npix: usize) -> Result<Self, SimError> {
        let err = || {
            SimError::config(format!(
                "{} pixels is not a full-sky HEALPix map size",
                npix
            ))
        };
        if npix == 0 || npix % 12 != 0 {
            return Err(err());
        }
        let nside = ((npix / 12) as f64).sqrt().round() as u32;
        let res = Self::new(nside).map_err(|_| err())?;
        if res.npix() != npix {
            return Err(err());
        }
        Ok(res)
    }

    /// The HEALPix nside parameter.
    pub fn nside(&self) -> u32 {
        self.nside
    }

    /// Number of pixels in a full-sky map at this resolution.
    pub fn npix(&self) -> usize {
        12 * (self.nside as usize) * (self.nside as usize)
    }

    /// Solid angle of one pixel in square degrees.
    pub fn pixel_area_deg2(&self) -> f64 {
        FULL_SKY_DEG2 / self.npix() as f64
    }

    /// Converts a homogeneous noise level in micro-Kelvin arcmin into the
    /// per-pixel standard deviation at this resolution:
    /// `sigma_pixel = nlev / sqrt(pixel_area_deg2) / 60`.
    pub fn pixel_noise_sigma(&self, nlev_uk_arcmin: f64) -> f64 {
        nlev_uk_arcmin / self.pixel_area_deg2().sqrt() / 60.0
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "nside {}", self.nside)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npix() {
        assert_eq!(Resolution::new(1).unwrap().npix(), 12);
        assert_eq!(Resolution::new(16).unwrap().npix(), 3072);
        assert_eq!(Resolution::new(2048).unwrap().npix(), 50_331_648);
    }

    #[test]
    fn test_from_npix() {
        assert_eq!(Resolution::from_npix(12).unwrap().nside(), 1);
        assert_eq!(Resolution::from_npix(3072).unwrap().nside(), 16);
        assert_eq!(Resolution::from_npix(50_331_648).unwrap().nside(), 2048);
        for npix in [0usize, 11, 13, 24, 3071] {
            assert!(Resolution::from_npix(npix).is_err());
        }
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        assert!(Resolution::new(0).is_err());
        assert!(Resolution::new(3).is_err());
        assert!(Resolution::new(12).is_err());
        assert!(Resolution::new(2047).is_err());
    }

    #[test]
    fn test_pixel_area_at_nside_2048() {
        // hp.nside2pixarea(2048, degrees=True)
        let res = Resolution::new(2048).unwrap();
        assert!((res.pixel_area_deg2() - 8.196_227_004_015_301e-4).abs() < 1e-15);
    }

    #[test]
    fn test_noise_sigma_scales_linearly_with_level() {
        let res = Resolution::new(64).unwrap();
        let s1 = res.pixel_noise_sigma(35.0);
        let s2 = res.pixel_noise_sigma(70.0);
        assert!((s2 / s1 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_noise_sigma_reference_value() {
        // nlev / sqrt(pixarea_deg2) / 60 at nside 2048, 35 uK-arcmin
        let res = Resolution::new(2048).unwrap();
        let sigma = res.pixel_noise_sigma(35.0);
        let expected = 35.0 / res.pixel_area_deg2().sqrt() / 60.0;
        assert_eq!(sigma, expected);
        assert!((sigma - 20.375_571_784_890_084).abs() < 1e-9);
    }
}
