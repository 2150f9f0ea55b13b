pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, System, State, NVec2};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity};
pub use simulation::integrator::{rk4_integrator, verlet_integrator, integrate};
pub use simulation::energy::{kinetic_energy, potential_energy, total_energy, relative_drift, EnergyMonitor};
pub use simulation::scenario::{Scenario, generate_belt};

pub use configuration::config::{IntegratorConfig, EngineConfig, ParametersConfig, BodyConfig, BeltConfig, ViewConfig, ScenarioConfig};

pub use visualization::{viewer2d::{run_2d, ViewSettings}, style::{visual_radius, mass_color, trail_alpha}};

pub use benchmark::benchmark::{bench_gravity, bench_rk4};

pub use error::{SimError, Result};
