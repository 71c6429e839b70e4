//! Velocity observation method classification
//!
//! The method is a function of the number of sub-observations alone, except
//! for single observations where the sample position decides between 0.5,
//! 0.6 and surface methods. Sample positions are compared exactly.

use crate::app::models::{VelocityObservationMethod, VerticalItem};
use crate::constants::{POINT_FIVE_DEPTH, POINT_SIX_DEPTH, is_equal};

/// Classify the observation method of a vertical from its sub-observations
pub fn classify_observation_method(observations: &[VerticalItem]) -> VelocityObservationMethod {
    match observations {
        [single] => classify_single_observation(single.sample_position),
        _ => classify_by_count(observations.len()),
    }
}

/// Method for a vertical sampled at a single position
pub fn classify_single_observation(sample_position: f64) -> VelocityObservationMethod {
    if is_equal(sample_position, POINT_FIVE_DEPTH) {
        VelocityObservationMethod::OneAtPointFive
    } else if is_equal(sample_position, POINT_SIX_DEPTH) {
        VelocityObservationMethod::OneAtPointSix
    } else {
        VelocityObservationMethod::Surface
    }
}

/// Method implied by a multi-point observation count
pub fn classify_by_count(count: usize) -> VelocityObservationMethod {
    match count {
        2 => VelocityObservationMethod::OneAtPointTwoAndPointEight,
        3 => VelocityObservationMethod::OneAtPointTwoPointSixAndPointEight,
        5 => VelocityObservationMethod::FivePoint,
        6 => VelocityObservationMethod::SixPoint,
        11 => VelocityObservationMethod::ElevenPoint,
        _ => VelocityObservationMethod::Unclassified,
    }
}
