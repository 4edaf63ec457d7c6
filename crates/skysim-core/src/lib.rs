//! skysim Core Library
//!
//! This crate provides the domain types, unit conventions and identity
//! hashing shared by all skysim simulation libraries.
//!
//! # Overview
//!
//! A skysim simulation library hands out sky maps (temperature and Q/U
//! polarization) keyed by a [`SimulationId`]. Everything a library produces
//! is a pure function of its construction-time configuration plus the
//! requested id, and every library describes that configuration as an
//! [`IdentityKey`] so external caches can detect when outputs would change.
//!
//! # Example
//!
//! ```
//! use skysim_core::{Alm, Resolution, TransferFunction};
//! use skysim_core::identity::{IdentityKey, IdentityValue};
//!
//! let res = Resolution::new(16).unwrap();
//! assert_eq!(res.npix(), 3072);
//!
//! let transf = TransferFunction::new(vec![1.0, 0.9, 0.7]);
//! let mut key = IdentityKey::new();
//! key.insert("transf", IdentityValue::Digest(transf.digest()));
//! assert_eq!(key.digest().len(), 64);
//! ```
//!
//! # Modules
//!
//! - [`alm`]: harmonic coefficient container and per-multipole convolution
//! - [`error`]: the error taxonomy shared by all simulation libraries
//! - [`field`]: field selectors for harmonic and pixel-space data
//! - [`identity`]: structured configuration keys and canonical hashing
//! - [`map`]: pixelized sky map containers
//! - [`resolution`]: HEALPix resolution and pixel-noise conversions
//! - [`sim_id`]: simulation identifiers and the raw-index boundary protocol
//! - [`transfer`]: instrument transfer functions
//! - [`units`]: physical unit conventions

pub mod alm;
pub mod error;
pub mod field;
pub mod identity;
pub mod map;
pub mod resolution;
pub mod sim_id;
pub mod transfer;
pub mod units;

// Re-export commonly used types at the crate root
pub use alm::Alm;
pub use error::SimError;
pub use field::{CmbField, StokesField};
pub use identity::{IdentityKey, IdentityKeyProvider, IdentityValue};
pub use map::{PolarizationMap, SkyMap};
pub use resolution::Resolution;
pub use sim_id::SimulationId;
pub use transfer::TransferFunction;
pub use units::KELVIN_TO_MICROKELVIN;
