//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - frame step size and end time,
//! - gravitational constant, softening length and minimum-distance floor,
//! - anchored body indices and the scenario seed

use crate::configuration::config::ParametersConfig;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub t_end: f64, // time end (headless runs)
    pub h0: f64, // frame step size, split into engine.substeps
    pub G: f64, // gravitational constant
    pub softening: f64, // softening length epsilon
    pub min_dist: f64, // pairs closer than this contribute nothing
    pub anchors: Vec<usize>, // bodies that never receive acceleration
    pub seed: u64, // deterministic seed for generated bodies
}

impl From<&ParametersConfig> for Parameters {
    fn from(cfg: &ParametersConfig) -> Self {
        Self {
            t_end: cfg.t_end,
            h0: cfg.h0,
            G: cfg.G,
            softening: cfg.softening,
            min_dist: cfg.min_dist,
            anchors: cfg.anchors.clone(),
            seed: cfg.seed,
        }
    }
}

/// Same defaults as an omitted `parameters:` block
impl Default for Parameters {
    fn default() -> Self {
        Self::from(&ParametersConfig::default())
    }
}
