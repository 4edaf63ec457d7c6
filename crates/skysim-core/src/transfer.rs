//! Instrument transfer functions.

/// Combined beam and pixel-window response, one real factor per multipole.
///
/// Immutable once constructed; shared by reference across synthesis calls.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    factors: Vec<f64>,
}

impl TransferFunction {
    /// Wraps per-multipole response factors, `factors[l]` applying at
    /// multipole `l`.
    pub fn new(factors: Vec<f64>) -> Self {
        Self { factors }
    }

    /// Response at multipole `l`; zero past the declared range, matching the
    /// convolution convention of [`crate::Alm::convolved`].
    #[inline]
    pub fn factor(&self, l: usize) -> f64 {
        self.factors.get(l).copied().unwrap_or(0.0)
    }

    /// Highest multipole with a declared response, or `None` when empty.
    pub fn lmax(&self) -> Option<usize> {
        self.factors.len().checked_sub(1)
    }

    /// The raw factor table.
    pub fn factors(&self) -> &[f64] {
        &self.factors
    }

    /// Content digest of the factor table: BLAKE3 over the little-endian
    /// byte image, as a 64-character lowercase hex string. This is the
    /// array's representative inside identity keys.
    pub fn digest(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for f in &self.factors {
            hasher.update(&f.to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}
