//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`AccelSet`)
//! - the energy monitor seeded with the initial energy
//!
//! `Scenario` is also the simulation driver: it owns the body state
//! exclusively, runs the sub-steps of each frame and checks the result.
//! It is inserted into Bevy as a `Resource` by the viewer.

use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{BeltConfig, BodyConfig, ScenarioConfig};
use crate::error::{Result, SimError};
use crate::simulation::energy::{total_energy, EnergyMonitor};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::integrator::integrate;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, System};

/// Fully-initialized simulation and its driver state
///
/// In Bevy terms, this is inserted as a `Resource`; one system steps it and
/// the others only read `system` afterwards
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
    pub energy: EnergyMonitor,
    pub frame: u64,
}

impl Scenario {
    /// Validate the inputs, register gravity and record the initial energy
    pub fn new(engine: Engine, parameters: Parameters, bodies: Vec<Body>) -> Result<Self> {
        for (index, b) in bodies.iter().enumerate() {
            if !(b.m > 0.0 && b.m.is_finite()) {
                return Err(SimError::InvalidMass { index, mass: b.m });
            }
        }
        if let Some(&index) = parameters.anchors.iter().find(|&&i| i >= bodies.len()) {
            return Err(SimError::AnchorOutOfRange { index, len: bodies.len() });
        }
        if engine.substeps == 0 {
            return Err(SimError::ZeroSubsteps);
        }
        if !(parameters.h0 > 0.0 && parameters.h0.is_finite()) {
            return Err(SimError::InvalidTimeStep(parameters.h0));
        }

        // Forces: construct an AccelSet and register Newtonian gravity
        let forces = AccelSet::new().with(NewtonianGravity {
            G: parameters.G,
            softening: parameters.softening,
            min_dist: parameters.min_dist,
        });

        let system = System::new(bodies);
        let energy = EnergyMonitor::new(total_energy(&system, parameters.G, parameters.min_dist));

        Ok(Self {
            engine,
            parameters,
            system,
            forces,
            energy,
            frame: 0,
        })
    }

    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self> {
        // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
        let mut bodies: Vec<Body> = cfg.bodies.iter().map(|bc: &BodyConfig| Body {
            x: NVec2::new(bc.x[0], bc.x[1]),
            v: NVec2::new(bc.v[0], bc.v[1]),
            m: bc.m,
        }).collect();

        // Parameters and engine (runtime) from their configs
        let parameters = Parameters::from(&cfg.parameters);
        let engine = Engine::from(&cfg.engine);

        if let Some(belt) = &cfg.belt {
            let center = bodies.get(belt.center).cloned().ok_or(SimError::BeltCenterOutOfRange {
                index: belt.center,
                len: bodies.len(),
            })?;
            let mut rng = StdRng::seed_from_u64(parameters.seed);
            bodies.extend(generate_belt(&center, belt, parameters.G, &mut rng)?);
        }

        let scenario = Self::new(engine, parameters, bodies)?;
        log::info!(
            "built scenario: {} bodies, {:?}, {} substeps, E0 = {:.6e}",
            scenario.system.len(),
            scenario.engine.integrator,
            scenario.engine.substeps,
            scenario.energy.initial,
        );
        Ok(scenario)
    }

    /// Length of one integrator call
    pub fn substep_dt(&self) -> f64 {
        self.parameters.h0 / self.engine.substeps as f64
    }

    pub fn total_energy(&self) -> f64 {
        total_energy(&self.system, self.parameters.G, self.parameters.min_dist)
    }

    /// Advance one frame of `h0` in `substeps` integrator calls
    ///
    /// Fails with [`SimError::NonFinite`] as soon as any body leaves the
    /// finite range; the state is left as it was after the failing sub-step
    pub fn step_frame(&mut self) -> Result<()> {
        let dt = self.substep_dt();
        for _ in 0..self.engine.substeps {
            integrate(self.engine.integrator, &mut self.system, &self.forces, dt, &self.parameters.anchors);
            if let Some(index) = self.system.first_non_finite() {
                return Err(SimError::NonFinite { index, t: self.system.t });
            }
        }

        self.frame += 1;
        let interval = self.engine.energy_interval;
        if interval > 0 && self.frame % interval == 0 {
            self.report_energy();
        }
        Ok(())
    }

    /// Sample the energy, log the drift and return it
    pub fn report_energy(&mut self) -> f64 {
        let drift = self.energy.record(self.total_energy());
        if drift > self.engine.drift_warn {
            log::warn!(
                "t = {:.3}: energy drift {:.3e} exceeds {:.1e}",
                self.system.t,
                drift,
                self.engine.drift_warn
            );
        } else {
            log::info!("t = {:.3}: E = {:.6e}, drift {:.3e}", self.system.t, self.energy.current, drift);
        }
        drift
    }

    /// Step whole frames until `t_end` is reached, then report the energy once more
    pub fn run_until(&mut self, t_end: f64) -> Result<EnergyMonitor> {
        // t_end / h0 can land an ulp above a whole number of frames
        let remaining = (t_end - self.system.t) / self.parameters.h0;
        let frames = (remaining - 1e-9).ceil().max(0.0) as u64;
        log::debug!("running {frames} frames to t = {t_end}");

        for _ in 0..frames {
            self.step_frame()?;
        }
        self.report_energy();
        Ok(self.energy)
    }
}

/// Bodies on circular orbits around `center`, radius and mass drawn uniformly
#[allow(non_snake_case)]
pub fn generate_belt<R: Rng>(center: &Body, cfg: &BeltConfig, G: f64, rng: &mut R) -> Result<Vec<Body>> {
    // rand's inclusive float ranges panic on infinite bounds
    if !(cfg.inner_radius > 0.0 && cfg.outer_radius.is_finite() && cfg.inner_radius <= cfg.outer_radius) {
        return Err(SimError::InvalidBeltRadii {
            inner: cfg.inner_radius,
            outer: cfg.outer_radius,
        });
    }
    if !(cfg.mass_min > 0.0 && cfg.mass_max.is_finite() && cfg.mass_min <= cfg.mass_max) {
        return Err(SimError::InvalidBeltMass {
            min: cfg.mass_min,
            max: cfg.mass_max,
        });
    }

    let bodies = (0..cfg.count).map(|_| {
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let r = rng.gen_range(cfg.inner_radius..=cfg.outer_radius);
        let m = rng.gen_range(cfg.mass_min..=cfg.mass_max);

        let radial = NVec2::new(angle.cos(), angle.sin());
        let tangent = NVec2::new(-angle.sin(), angle.cos());
        let speed = (G * center.m / r).sqrt();

        Body::new(center.x + r * radial, center.v + speed * tangent, m)
    }).collect();

    Ok(bodies)
}
