//! Seam for the spherical-harmonic transform engine.
//!
//! The transform's numerics (FFT-on-sphere, pixelization) live outside this
//! crate; simulation libraries only depend on these call shapes.

use skysim_core::{Alm, Resolution, SimError, SkyMap};

/// Inverse spherical-harmonic transforms at a target resolution.
pub trait SphericalTransform: Send + Sync {
    /// Synthesizes a scalar map from spin-0 coefficients.
    fn synthesize(&self, alm: &Alm, resolution: Resolution) -> Result<SkyMap, SimError>;

    /// Synthesizes the Stokes (Q, U) pair jointly from E/B-mode coefficients
    /// via the spin-2 transform. Q and U are not independent scalar
    /// syntheses; implementations must produce them together.
    fn synthesize_spin2(
        &self,
        elm: &Alm,
        blm: &Alm,
        resolution: Resolution,
    ) -> Result<(SkyMap, SkyMap), SimError>;
}

impl<T: SphericalTransform + ?Sized> SphericalTransform for &T {
    fn synthesize(&self, alm: &Alm, resolution: Resolution) -> Result<SkyMap, SimError> {
        (**self).synthesize(alm, resolution)
    }

    fn synthesize_spin2(
        &self,
        elm: &Alm,
        blm: &Alm,
        resolution: Resolution,
    ) -> Result<(SkyMap, SkyMap), SimError> {
        (**self).synthesize_spin2(elm, blm, resolution)
    }
}

impl<T: SphericalTransform + ?Sized> SphericalTransform for std::sync::Arc<T> {
    fn synthesize(&self, alm: &Alm, resolution: Resolution) -> Result<SkyMap, SimError> {
        (**self).synthesize(alm, resolution)
    }

    fn synthesize_spin2(
        &self,
        elm: &Alm,
        blm: &Alm,
        resolution: Resolution,
    ) -> Result<(SkyMap, SkyMap), SimError> {
        (**self).synthesize_spin2(elm, blm, resolution)
    }
}
