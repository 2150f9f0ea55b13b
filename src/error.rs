use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("body {index} has invalid mass {mass}, masses must be positive and finite")]
    InvalidMass { index: usize, mass: f64 },

    #[error("anchor index {index} is out of range for {len} bodies")]
    AnchorOutOfRange { index: usize, len: usize },

    #[error("belt center index {index} is out of range for {len} bodies")]
    BeltCenterOutOfRange { index: usize, len: usize },

    #[error("belt radii must satisfy 0 < inner <= outer, got inner = {inner}, outer = {outer}")]
    InvalidBeltRadii { inner: f64, outer: f64 },

    #[error("belt masses must satisfy 0 < min <= max, got min = {min}, max = {max}")]
    InvalidBeltMass { min: f64, max: f64 },

    #[error("substeps must be at least 1")]
    ZeroSubsteps,

    #[error("frame step h0 must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("body {index} became non-finite at t = {t}")]
    NonFinite { index: usize, t: f64 },
}

pub type Result<T, E = SimError> = std::result::Result<T, E>;
