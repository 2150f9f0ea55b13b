//! High-level runtime engine settings
//!
//! Selects the integrator, the number of physics sub-steps per frame and how
//! often energy drift is reported while a `Scenario` runs

use crate::configuration::config::{EngineConfig, IntegratorConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub integrator: IntegratorConfig, // rk4 or verlet
    pub substeps: u32, // integrator calls per frame
    pub energy_interval: u64, // frames between drift reports, 0 = never
    pub drift_warn: f64, // relative drift above which reports become warnings
}

impl From<&EngineConfig> for Engine {
    fn from(cfg: &EngineConfig) -> Self {
        Self {
            integrator: cfg.integrator,
            substeps: cfg.substeps,
            energy_interval: cfg.energy_interval,
            drift_warn: cfg.drift_warn,
        }
    }
}

/// Same defaults as an omitted `engine:` block
impl Default for Engine {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}
