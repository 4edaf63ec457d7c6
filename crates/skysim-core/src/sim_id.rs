//! Simulation identifiers.
//!
//! External data products and legacy tooling encode "use the real observed
//! data" as index −1. Inside skysim that convention exists only at the raw
//! boundary: everything past [`SimulationId::from_raw`] works with an
//! explicit sum type, so a sentinel can never leak into path formatting or
//! seed derivation.

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Raw integer reserved system-wide for observed data.
pub const OBSERVED_SENTINEL: i64 = -1;

/// Identifies which realization a simulation library should serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationId {
    /// A synthetic realization. Indices are opaque and stable: the same
    /// index always selects the same realization.
    Synthetic(u32),
    /// The fixed, previously observed dataset.
    Observed,
}

impl SimulationId {
    /// Decodes a raw integer index as used by external catalogs.
    ///
    /// `-1` is the observed-data sentinel; non-negative values are synthetic
    /// indices. Anything else is rejected rather than formatted into a
    /// storage path.
    pub fn from_raw(raw: i64) -> Result<Self, SimError> {
        match raw {
            OBSERVED_SENTINEL => Ok(SimulationId::Observed),
            n if (0..=i64::from(u32::MAX)).contains(&n) => Ok(SimulationId::Synthetic(n as u32)),
            other => Err(SimError::InvalidIndex(other)),
        }
    }

    /// Encodes this id back into the raw integer convention.
    pub fn to_raw(self) -> i64 {
        match self {
            SimulationId::Synthetic(n) => i64::from(n),
            SimulationId::Observed => OBSERVED_SENTINEL,
        }
    }

    /// Returns the synthetic index, if any.
    pub fn synthetic_index(self) -> Option<u32> {
        match self {
            SimulationId::Synthetic(n) => Some(n),
            SimulationId::Observed => None,
        }
    }

    /// Whether this id selects the observed dataset.
    pub fn is_observed(self) -> bool {
        matches!(self, SimulationId::Observed)
    }
}

impl std::fmt::Display for SimulationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationId::Synthetic(n) => write!(f, "sim {}", n),
            SimulationId::Observed => write!(f, "observed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_round_trip() {
        for raw in [-1i64, 0, 1, 299, 4096] {
            let id = SimulationId::from_raw(raw).unwrap();
            assert_eq!(id.to_raw(), raw);
        }
    }

    #[test]
    fn test_sentinel_decodes_to_observed() {
        assert_eq!(
            SimulationId::from_raw(-1).unwrap(),
            SimulationId::Observed
        );
        assert!(SimulationId::from_raw(-1).unwrap().is_observed());
    }

    #[test]
    fn test_negative_non_sentinel_is_rejected() {
        for raw in [-2i64, -100, i64::MIN] {
            match SimulationId::from_raw(raw) {
                Err(SimError::InvalidIndex(n)) => assert_eq!(n, raw),
                other => panic!("expected InvalidIndex, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_out_of_range_positive_is_rejected() {
        assert!(SimulationId::from_raw(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_synthetic_index_accessor() {
        assert_eq!(SimulationId::Synthetic(7).synthetic_index(), Some(7));
        assert_eq!(SimulationId::Observed.synthetic_index(), None);
    }
}
