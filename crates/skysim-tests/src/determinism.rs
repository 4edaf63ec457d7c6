//! Determinism verification harness.
//!
//! Simulation outputs must be bit-reproducible: same configuration, same
//! index, identical pixels, down to the last bit. The helpers here run a
//! producer several times, hash each run and report the first differing
//! pixel when reproducibility is violated.

use skysim_core::{PolarizationMap, SkyMap};

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced bit-identical pixels.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// BLAKE3 hash of the first run's pixel bytes (all runs should match).
    pub hash: String,
    /// If non-deterministic, the first difference found.
    pub diff: Option<PixelDiff>,
}

/// First pixel difference found between two runs.
#[derive(Debug, Clone)]
pub struct PixelDiff {
    /// Index of the differing run (the first run is the reference).
    pub run: usize,
    /// Pixel position of the difference.
    pub pixel: usize,
    /// Value from the reference run.
    pub expected: f64,
    /// Value from the differing run.
    pub actual: f64,
}

impl DeterminismResult {
    /// Panics with a readable message if any run differed.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.diff {
            panic!(
                "run {} differs at pixel {}: {} != {} (reference hash {})",
                diff.run, diff.pixel, diff.actual, diff.expected, self.hash
            );
        }
    }
}

/// BLAKE3 hash of a pixel buffer's little-endian byte image.
pub fn pixel_hash(pixels: &[f64]) -> String {
    let mut hasher = blake3::Hasher::new();
    for p in pixels {
        hasher.update(&p.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

fn first_diff(reference: &[f64], other: &[f64], run: usize) -> Option<PixelDiff> {
    reference
        .iter()
        .zip(other)
        .position(|(a, b)| a.to_bits() != b.to_bits())
        .map(|pixel| PixelDiff {
            run,
            pixel,
            expected: reference[pixel],
            actual: other[pixel],
        })
}

/// Runs `produce` `runs` times and verifies bit-identical pixel buffers.
pub fn verify_determinism<F>(mut produce: F, runs: usize) -> DeterminismResult
where
    F: FnMut() -> Vec<f64>,
{
    assert!(runs >= 2, "need at least two runs to compare");
    let reference = produce();
    let hash = pixel_hash(&reference);
    for run in 1..runs {
        let other = produce();
        if other.len() != reference.len() {
            return DeterminismResult {
                is_deterministic: false,
                runs,
                hash,
                diff: Some(PixelDiff {
                    run,
                    pixel: reference.len().min(other.len()),
                    expected: f64::NAN,
                    actual: f64::NAN,
                }),
            };
        }
        if let Some(diff) = first_diff(&reference, &other, run) {
            return DeterminismResult {
                is_deterministic: false,
                runs,
                hash,
                diff: Some(diff),
            };
        }
    }
    DeterminismResult {
        is_deterministic: true,
        runs,
        hash,
        diff: None,
    }
}

/// [`verify_determinism`] over a map-producing closure.
pub fn verify_map_determinism<F>(mut produce: F, runs: usize) -> DeterminismResult
where
    F: FnMut() -> SkyMap,
{
    verify_determinism(|| produce().into_pixels(), runs)
}

/// [`verify_determinism`] over a (Q, U)-producing closure, comparing the
/// concatenated pair so a difference in either component is caught.
pub fn verify_polarization_determinism<F>(mut produce: F, runs: usize) -> DeterminismResult
where
    F: FnMut() -> PolarizationMap,
{
    verify_determinism(
        || {
            let pol = produce();
            let mut pixels = pol.q.into_pixels();
            pixels.extend(pol.u.into_pixels());
            pixels
        },
        runs,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_runs_verify() {
        let result = verify_determinism(|| vec![1.0, 2.0, 3.0], 3);
        assert!(result.is_deterministic);
        assert!(result.diff.is_none());
        assert_eq!(result.hash, pixel_hash(&[1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_differing_run_is_reported_with_position() {
        let mut calls = 0;
        let result = verify_determinism(
            move || {
                calls += 1;
                if calls == 1 {
                    vec![1.0, 2.0]
                } else {
                    vec![1.0, 2.5]
                }
            },
            2,
        );
        assert!(!result.is_deterministic);
        let diff = result.diff.expect("diff expected");
        assert_eq!(diff.pixel, 1);
        assert_eq!(diff.expected, 2.0);
        assert_eq!(diff.actual, 2.5);
    }

    #[test]
    fn test_negative_zero_is_not_positive_zero() {
        // Bit-level comparison, not numeric comparison.
        let mut calls = 0;
        let result = verify_determinism(
            move || {
                calls += 1;
                if calls == 1 {
                    vec![0.0]
                } else {
                    vec![-0.0]
                }
            },
            2,
        );
        assert!(!result.is_deterministic);
    }
}
