//! skysim Simulation Libraries
//!
//! Deterministic, reproducible sky-map data for CMB analysis pipelines.
//! Maps are served per [`SimulationId`](skysim_core::SimulationId): synthetic
//! realizations are composed on demand from stored harmonic coefficients, an
//! instrument transfer function and a deterministic pixel-noise stream, while
//! the observed-data id routes to a fixed dataset.
//!
//! # Determinism
//!
//! Every library output is a pure function of (construction parameters,
//! simulation id, field). Two calls with the same inputs are bit-identical:
//! there is no internal caching, no interior mutability and no randomness
//! beyond what the phase source deterministically derives from the id and
//! the noise channel. Configuration changes are detectable through the
//! [`IdentityKeyProvider`](skysim_core::IdentityKeyProvider) contract.
//!
//! # Collaborator seams
//!
//! FITS persistence and the spherical-harmonic transform engine stay outside
//! this crate, behind the [`storage::AlmReader`], [`storage::MapReader`] and
//! [`transform::SphericalTransform`] traits.
//!
//! # Example
//!
//! ```no_run
//! use skysim_core::{Resolution, TransferFunction};
//! use skysim_sims::cmb::LensedCmbSource;
//! use skysim_sims::phase::PixelPhaseLibrary;
//! use skysim_sims::storage::PathTemplate;
//! use skysim_sims::synth::NoiseAugmentedSynthesizer;
//! # use std::path::Path;
//! # use skysim_core::{Alm, SimError};
//! # struct FitsAlmReader;
//! # impl skysim_sims::storage::AlmReader for FitsAlmReader {
//! #     fn read_alm(&self, _: &Path, _: u32) -> Result<Alm, SimError> { unimplemented!() }
//! # }
//! # struct Engine;
//! # impl skysim_sims::transform::SphericalTransform for Engine {
//! #     fn synthesize(&self, _: &Alm, _: Resolution) -> Result<skysim_core::SkyMap, SimError> { unimplemented!() }
//! #     fn synthesize_spin2(&self, _: &Alm, _: &Alm, _: Resolution) -> Result<(skysim_core::SkyMap, skysim_core::SkyMap), SimError> { unimplemented!() }
//! # }
//!
//! let res = Resolution::new(2048)?;
//! let cmb = LensedCmbSource::new(
//!     FitsAlmReader,
//!     PathTemplate::new("/sims/lensed_cmb_alm_mc_{index}.fits", 4)?,
//! );
//! let synth = NoiseAugmentedSynthesizer::new(
//!     cmb,
//!     Engine,
//!     TransferFunction::new(vec![1.0; 2049]),
//!     35.0,
//!     55.0,
//!     PixelPhaseLibrary::new(42, res),
//!     res,
//! )?;
//! let _tmap = synth.temperature_map(17)?;
//! # Ok::<(), SimError>(())
//! ```

pub mod cmb;
pub mod observed;
pub mod phase;
pub mod storage;
pub mod synth;
pub mod transform;

// Re-export main types for convenience
pub use cmb::{CmbAlmSource, LensedCmbSource, UnlensedCmbSource};
pub use observed::ObservedDataAdapter;
pub use phase::{NoisePhaseSource, PixelPhaseLibrary};
pub use storage::{AlmReader, MapReader, PathTemplate};
pub use synth::NoiseAugmentedSynthesizer;
pub use transform::SphericalTransform;
