//! Pixelized sky map containers.

use crate::error::SimError;
use crate::resolution::Resolution;

/// A full-sky scalar map in micro-Kelvin, one value per HEALPix pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyMap {
    resolution: Resolution,
    pixels: Vec<f64>,
}

impl SkyMap {
    /// Wraps a pixel vector, validating its length against the resolution.
    pub fn from_pixels(resolution: Resolution, pixels: Vec<f64>) -> Result<Self, SimError> {
        if pixels.len() != resolution.npix() {
            return Err(SimError::ResolutionMismatch {
                expected: resolution.npix(),
                actual: pixels.len(),
            });
        }
        Ok(Self { resolution, pixels })
    }

    /// The map's resolution.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Pixel values, RING-ordered.
    pub fn pixels(&self) -> &[f64] {
        &self.pixels
    }

    /// Consumes the map, returning the pixel vector.
    pub fn into_pixels(self) -> Vec<f64> {
        self.pixels
    }

    /// Multiplies every pixel by a real factor (unit conversions).
    pub fn scale(&mut self, factor: f64) {
        for p in &mut self.pixels {
            *p *= factor;
        }
    }

    /// Adds `sigma * noise[p]` to every pixel. The noise slice length must
    /// match the map's pixel count.
    pub fn add_scaled(&mut self, noise: &[f64], sigma: f64) -> Result<(), SimError> {
        if noise.len() != self.pixels.len() {
            return Err(SimError::ResolutionMismatch {
                expected: self.pixels.len(),
                actual: noise.len(),
            });
        }
        for (p, n) in self.pixels.iter_mut().zip(noise) {
            *p += sigma * n;
        }
        Ok(())
    }

    /// Adds another map elementwise. Resolutions must agree.
    pub fn add(&mut self, other: &SkyMap) -> Result<(), SimError> {
        if other.resolution != self.resolution {
            return Err(SimError::ResolutionMismatch {
                expected: self.pixels.len(),
                actual: other.pixels.len(),
            });
        }
        for (p, o) in self.pixels.iter_mut().zip(&other.pixels) {
            *p += o;
        }
        Ok(())
    }
}

/// A linear-polarization map pair (Stokes Q and U), produced jointly by
/// spin-2 synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarizationMap {
    /// Stokes Q.
    pub q: SkyMap,
    /// Stokes U.
    pub u: SkyMap,
}

impl PolarizationMap {
    /// Pairs two maps, validating that their resolutions agree.
    pub fn new(q: SkyMap, u: SkyMap) -> Result<Self, SimError> {
        if q.resolution() != u.resolution() {
            return Err(SimError::config(format!(
                "Q and U maps disagree on resolution ({} vs {})",
                q.resolution(),
                u.resolution()
            )));
        }
        Ok(Self { q, u })
    }

    /// The pair's common resolution.
    pub fn resolution(&self) -> Resolution {
        self.q.resolution()
    }
}
