//! Energy diagnostics used to monitor integration stability
//!
//! Total mechanical energy = kinetic + pairwise Newtonian potential. The
//! potential uses the same minimum-distance floor as the force model but no
//! softening.

use super::states::System;

/// Sum of 1/2 m |v|^2 over all bodies
pub fn kinetic_energy(sys: &System) -> f64 {
    sys.bodies.iter().map(|b| 0.5 * b.m * b.v.norm_squared()).sum()
}

/// Sum of -G m_i m_j / r over unordered pairs, skipping pairs at or below `min_dist`
#[allow(non_snake_case)]
pub fn potential_energy(sys: &System, G: f64, min_dist: f64) -> f64 {
    let n = sys.bodies.len();
    let mut potential = 0.0;

    for i in 0..n {
        let bi = &sys.bodies[i];
        for j in (i + 1)..n {
            let bj = &sys.bodies[j];
            let dist = (bj.x - bi.x).norm();
            if dist > min_dist {
                potential -= G * bi.m * bj.m / dist;
            }
        }
    }

    potential
}

#[allow(non_snake_case)]
pub fn total_energy(sys: &System, G: f64, min_dist: f64) -> f64 {
    kinetic_energy(sys) + potential_energy(sys, G, min_dist)
}

/// |e - e0| / |e0|, or the absolute difference when `e0` is zero
pub fn relative_drift(e0: f64, e: f64) -> f64 {
    let diff = (e - e0).abs();
    if e0 == 0.0 {
        diff
    } else {
        diff / e0.abs()
    }
}

/// Tracks drift against the energy recorded when the monitor was created
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyMonitor {
    pub initial: f64,
    pub current: f64,
    pub max_drift: f64,
}

impl EnergyMonitor {
    pub fn new(initial: f64) -> Self {
        Self {
            initial,
            current: initial,
            max_drift: 0.0,
        }
    }

    /// Record a new energy sample and return its drift
    pub fn record(&mut self, energy: f64) -> f64 {
        self.current = energy;
        let drift = self.drift();
        if drift > self.max_drift || drift.is_nan() {
            self.max_drift = drift;
        }
        drift
    }

    pub fn drift(&self) -> f64 {
        relative_drift(self.initial, self.current)
    }
}
