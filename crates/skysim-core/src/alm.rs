//! Harmonic coefficient container.
//!
//! Coefficients are stored in the standard triangular layout: for a maximum
//! multipole `lmax`, entry `(l, m)` with `0 <= m <= l <= lmax` lives at index
//! `m * (2 * lmax + 1 - m) / 2 + l`, and the container holds
//! `(lmax + 1) * (lmax + 2) / 2` complex values.
//!
//! Instances are ephemeral: produced on demand by a source, folded into a
//! map, then dropped. Nothing in the core caches them.

use num_complex::Complex64;

use crate::error::SimError;
use crate::transfer::TransferFunction;

/// Spherical-harmonic coefficients of a scalar or spin-weighted field.
#[derive(Debug, Clone, PartialEq)]
pub struct Alm {
    lmax: usize,
    coeffs: Vec<Complex64>,
}

impl Alm {
    /// Creates a zero-filled coefficient set up to `lmax`.
    pub fn zeros(lmax: usize) -> Self {
        Self {
            lmax,
            coeffs: vec![Complex64::new(0.0, 0.0); Self::len_for_lmax(lmax)],
        }
    }

    /// Wraps an existing coefficient vector, validating that its length is a
    /// triangular size consistent with some `lmax`.
    pub fn from_coeffs(coeffs: Vec<Complex64>) -> Result<Self, SimError> {
        let lmax = Self::lmax_for_len(coeffs.len()).ok_or_else(|| {
            SimError::config(format!(
                "coefficient vector of length {} is not a valid triangular size",
                coeffs.len()
            ))
        })?;
        Ok(Self { lmax, coeffs })
    }

    /// Number of coefficients stored for a given `lmax`.
    pub fn len_for_lmax(lmax: usize) -> usize {
        (lmax + 1) * (lmax + 2) / 2
    }

    /// Recovers `lmax` from a coefficient count, if the count is triangular.
    pub fn lmax_for_len(len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        // Invert len = (lmax + 1)(lmax + 2) / 2.
        let lmax = ((((8 * len + 1) as f64).sqrt() - 3.0) / 2.0).round() as usize;
        (Self::len_for_lmax(lmax) == len).then_some(lmax)
    }

    /// Maximum multipole.
    pub fn lmax(&self) -> usize {
        self.lmax
    }

    /// Number of stored coefficients.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Whether the container is empty (never true for a valid instance).
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Flat coefficient slice in triangular order.
    pub fn coeffs(&self) -> &[Complex64] {
        &self.coeffs
    }

    fn index(&self, l: usize, m: usize) -> usize {
        debug_assert!(m <= l && l <= self.lmax);
        m * (2 * self.lmax + 1 - m) / 2 + l
    }

    /// Coefficient at `(l, m)`.
    #[inline]
    pub fn get(&self, l: usize, m: usize) -> Complex64 {
        self.coeffs[self.index(l, m)]
    }

    /// Overwrites the coefficient at `(l, m)`.
    #[inline]
    pub fn set(&mut self, l: usize, m: usize, value: Complex64) {
        let idx = self.index(l, m);
        self.coeffs[idx] = value;
    }

    /// Multiplies every coefficient by a real factor (unit conversions).
    pub fn scale(&mut self, factor: f64) {
        for c in &mut self.coeffs {
            *c *= factor;
        }
    }

    /// Returns a copy convolved with a transfer function: each `(l, m)`
    /// coefficient is multiplied by the response at `l`. Multipoles past the
    /// end of the transfer function get zero response.
    pub fn convolved(&self, transf: &TransferFunction) -> Alm {
        let mut out = self.clone();
        for m in 0..=out.lmax {
            for l in m..=out.lmax {
                let idx = out.index(l, m);
                out.coeffs[idx] *= transf.factor(l);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_lmax_round_trip() {
        for lmax in 0..64 {
            let len = Alm::len_for_lmax(lmax);
            assert_eq!(Alm::lmax_for_len(len), Some(lmax));
        }
    }

    #[test]
    fn test_non_triangular_lengths_rejected() {
        for len in [0usize, 2, 4, 5, 7, 11] {
            assert_eq!(Alm::lmax_for_len(len), None);
            assert!(Alm::from_coeffs(vec![Complex64::new(0.0, 0.0); len]).is_err());
        }
    }

    #[test]
    fn test_triangular_indexing_visits_every_slot_once() {
        let lmax = 7;
        let mut alm = Alm::zeros(lmax);
        let mut seen = vec![false; alm.len()];
        for m in 0..=lmax {
            for l in m..=lmax {
                let idx = alm.index(l, m);
                assert!(!seen[idx], "index collision at l={}, m={}", l, m);
                seen[idx] = true;
            }
        }
        assert!(seen.into_iter().all(|s| s));
    }

    #[test]
    fn test_get_set() {
        let mut alm = Alm::zeros(4);
        alm.set(3, 2, Complex64::new(1.5, -0.5));
        assert_eq!(alm.get(3, 2), Complex64::new(1.5, -0.5));
        assert_eq!(alm.get(3, 1), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_scale() {
        let mut alm = Alm::zeros(2);
        alm.set(2, 0, Complex64::new(2.0, -1.0));
        alm.scale(1e6);
        assert_eq!(alm.get(2, 0), Complex64::new(2e6, -1e6));
    }

    #[test]
    fn test_convolved_applies_per_multipole_factor() {
        let mut alm = Alm::zeros(3);
        for m in 0..=3usize {
            for l in m..=3usize {
                alm.set(l, m, Complex64::new(1.0, 1.0));
            }
        }
        let transf = TransferFunction::new(vec![1.0, 0.5, 0.25, 0.125]);
        let conv = alm.convolved(&transf);
        assert_eq!(conv.get(0, 0), Complex64::new(1.0, 1.0));
        assert_eq!(conv.get(1, 1), Complex64::new(0.5, 0.5));
        assert_eq!(conv.get(2, 1), Complex64::new(0.25, 0.25));
        assert_eq!(conv.get(3, 3), Complex64::new(0.125, 0.125));
    }

    #[test]
    fn test_convolved_zeroes_multipoles_past_transfer_end() {
        let mut alm = Alm::zeros(5);
        alm.set(5, 0, Complex64::new(3.0, 0.0));
        alm.set(1, 0, Complex64::new(3.0, 0.0));
        let transf = TransferFunction::new(vec![1.0, 1.0]);
        let conv = alm.convolved(&transf);
        assert_eq!(conv.get(1, 0), Complex64::new(3.0, 0.0));
        assert_eq!(conv.get(5, 0), Complex64::new(0.0, 0.0));
    }
}
