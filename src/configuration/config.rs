//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator choice, sub-steps and drift reporting
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`BodyConfig`]       – initial state for each body
//! - [`BeltConfig`]       – optional seeded belt of small bodies
//! - [`ViewConfig`]       – viewer scale and trail length
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Everything except `bodies` may be omitted and falls back to the defaults
//! below.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   integrator: "rk4"       # or "verlet"
//!   substeps: 8             # integrator calls per frame
//!   energy_interval: 120    # frames between drift reports
//!
//! parameters:
//!   h0: 0.0166667           # frame step, divided by substeps
//!   t_end: 60.0             # headless run length
//!   G: 100.0
//!   softening: 1.0          # epsilon, 0 disables softening
//!   min_dist: 0.01          # pairs closer than this are ignored
//!   anchors: [0]            # bodies that receive no acceleration
//!   seed: 42
//!
//! bodies:
//!   - x: [ 0.0, 0.0 ]
//!     m: 10000.0
//!   - x: [ 260.0, 0.0 ]
//!     v: [ 0.0, 62.017 ]
//!     m: 20.0
//!     color: [ 0.4, 0.7, 1.0 ]
//!
//! belt:
//!   center: 0
//!   count: 150
//!   inner_radius: 380.0
//!   outer_radius: 440.0
//!   mass_min: 0.5
//!   mass_max: 3.0
//! ```

use serde::Deserialize;

/// Which integrator method used by the engine
/// integrator: "rk4"` or `integrator: "verlet"
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[serde(rename = "rk4")] // Classical 4th-order Runge–Kutta, four force evaluations per step
    #[default]
    Rk4,

    #[serde(rename = "verlet")] // Velocity Verlet, symplectic, two force evaluations per step
    Verlet,
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub integrator: IntegratorConfig, // Time integrator used for advancing the system state
    pub substeps: u32, // Integrator calls per frame, each with h0 / substeps
    pub energy_interval: u64, // Frames between energy drift reports, 0 disables them
    pub drift_warn: f64, // Relative drift that turns a report into a warning
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            integrator: IntegratorConfig::Rk4,
            substeps: 8,
            energy_interval: 120,
            drift_warn: 0.01,
        }
    }
}

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub t_end: f64,   // time end for headless runs
    pub h0: f64,      // frame time step
    pub G: f64,       // gravitational constant
    pub softening: f64, // softening length - keeps forces finite at small separations
    pub min_dist: f64, // minimum-distance floor for force and potential
    pub anchors: Vec<usize>, // indices of bodies held free of acceleration
    pub seed: u64,    // deterministic seed to make generated bodies reproducible
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            t_end: 60.0,
            h0: 1.0 / 60.0,
            G: 100.0,
            softening: 1.0,
            min_dist: 0.01,
            anchors: Vec::new(),
            seed: 42,
        }
    }
}

/// Configuration for a single body’s initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // Initial position in simulation units
    #[serde(default)]
    pub v: [f64; 2], // Initial velocity, at rest when omitted
    pub m: f64,      // Mass of the body, must be positive
    #[serde(default)]
    pub color: Option<[f32; 3]>, // sRGB override for the viewer
}

/// Ring of small bodies on circular orbits around `center`
#[derive(Deserialize, Debug, Clone)]
pub struct BeltConfig {
    #[serde(default)]
    pub center: usize, // index of the body the belt orbits
    pub count: usize,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub mass_min: f64,
    pub mass_max: f64,
}

/// Viewer settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ViewConfig {
    pub scale: f32, // pixels per simulation unit
    pub trail_length: usize, // positions kept per trail, 0 disables trails
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            trail_length: 300,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // Integrator and stepping policy
    #[serde(default)]
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub bodies: Vec<BodyConfig>, // List of bodies that define the initial state of the system
    #[serde(default)]
    pub belt: Option<BeltConfig>, // Generated bodies appended after `bodies`
    #[serde(default)]
    pub view: ViewConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }
}
