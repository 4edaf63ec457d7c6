//! Error-taxonomy tests.
//!
//! Failures must surface as the right variant and propagate unmodified:
//! a wrong or missing simulation is never masked as a valid one.

use skysim_core::{
    CmbField, IdentityKey, IdentityKeyProvider, IdentityValue, Resolution, SimError, StokesField,
    TransferFunction,
};
use skysim_sims::cmb::{CmbAlmSource, LensedCmbSource, UnlensedCmbSource};
use skysim_sims::phase::{NoisePhaseSource, PixelPhaseLibrary};
use skysim_sims::synth::NoiseAugmentedSynthesizer;
use skysim_tests::fixtures::{cosine_transfer, LinearTransform, SyntheticAlmArchive};

fn lensed_source() -> LensedCmbSource<SyntheticAlmArchive> {
    let archive = SyntheticAlmArchive::with_count(2);
    let template = archive.template();
    LensedCmbSource::new(archive, template)
}

#[test]
fn test_lensing_potential_is_exclusive_to_the_unlensed_source() {
    match lensed_source().alm(0, CmbField::LensingPotential) {
        Err(SimError::FieldNotSupported { field, source }) => {
            assert_eq!(field, CmbField::LensingPotential);
            assert!(source.contains("lensed"));
        }
        other => panic!("expected FieldNotSupported, got {:?}", other),
    }

    let archive = SyntheticAlmArchive::with_count(2);
    let template = archive.template();
    let unlensed = UnlensedCmbSource::new(archive, template);
    assert!(unlensed.alm(0, CmbField::LensingPotential).is_ok());
}

#[test]
fn test_missing_realization_propagates_as_data_not_found() {
    let source = lensed_source();
    assert!(matches!(
        source.alm(17, CmbField::Temperature),
        Err(SimError::DataNotFound { .. })
    ));

    // The same failure comes through the synthesizer unmodified.
    let resolution = Resolution::new(4).unwrap();
    let synth = NoiseAugmentedSynthesizer::new(
        lensed_source(),
        LinearTransform,
        TransferFunction::new(cosine_transfer(8)),
        35.0,
        55.0,
        PixelPhaseLibrary::new(1, resolution),
        resolution,
    )
    .unwrap();
    assert!(matches!(
        synth.temperature_map(17),
        Err(SimError::DataNotFound { .. })
    ));
    assert!(matches!(
        synth.polarization_map(17),
        Err(SimError::DataNotFound { .. })
    ));
}

#[test]
fn test_mismatched_phase_resolution_fails_at_construction() {
    let result = NoiseAugmentedSynthesizer::new(
        lensed_source(),
        LinearTransform,
        TransferFunction::new(cosine_transfer(8)),
        35.0,
        55.0,
        PixelPhaseLibrary::new(1, Resolution::new(8).unwrap()),
        Resolution::new(4).unwrap(),
    );
    assert!(matches!(
        result.map(|_| ()),
        Err(SimError::Configuration(_))
    ));
}

/// A phase source whose realizations are shorter than it declares.
struct LyingPhaseSource {
    declared: Resolution,
}

impl NoisePhaseSource for LyingPhaseSource {
    fn resolution(&self) -> Resolution {
        self.declared
    }

    fn realization(&self, _index: u32, _channel: StokesField) -> Result<Vec<f64>, SimError> {
        Ok(vec![0.0; 7])
    }
}

impl IdentityKeyProvider for LyingPhaseSource {
    fn identity_key(&self) -> IdentityKey {
        IdentityKey::new().with("lying", IdentityValue::Tag("yes".into()))
    }
}

#[test]
fn test_short_noise_realization_is_a_resolution_mismatch() {
    let resolution = Resolution::new(4).unwrap();
    let synth = NoiseAugmentedSynthesizer::new(
        lensed_source(),
        LinearTransform,
        TransferFunction::new(cosine_transfer(8)),
        35.0,
        55.0,
        LyingPhaseSource {
            declared: resolution,
        },
        resolution,
    )
    .unwrap();
    match synth.temperature_map(0) {
        Err(SimError::ResolutionMismatch { expected, actual }) => {
            assert_eq!(expected, 192);
            assert_eq!(actual, 7);
        }
        other => panic!("expected ResolutionMismatch, got {:?}", other.map(|_| ())),
    }
}
