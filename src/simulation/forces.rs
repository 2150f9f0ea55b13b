//! Force / acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait, the summing `AccelSet` and direct
//! Newtonian gravity with softening and a minimum-distance floor

use crate::simulation::states::{System, NVec2};

/// Collection of acceleration terms (gravity, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total accelerations for all bodies in `sys` evaluated at `positions`
    /// - masses come from `sys`, positions from the snapshot being evaluated
    /// - `out[i]` will be set to the sum of contributions from all terms
    ///
    /// # Panics
    /// If `positions` or `out` is not exactly one entry per body
    pub fn accumulate_accels(&self, sys: &System, positions: &[NVec2], out: &mut [NVec2]) {
        assert_eq!(positions.len(), sys.bodies.len(), "positions must hold one entry per body");
        assert_eq!(out.len(), sys.bodies.len(), "out must hold one entry per body");

        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.acceleration(sys, positions, out);
        }
    }

    /// Allocating variant of [`AccelSet::accumulate_accels`]
    pub fn accels(&self, sys: &System, positions: &[NVec2]) -> Vec<NVec2> {
        let mut out = vec![NVec2::zeros(); sys.bodies.len()];
        self.accumulate_accels(sys, positions, &mut out);
        out
    }
}

/// Trait for acceleration sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body.
/// `positions` is indexed like `sys.bodies` and may differ from the stored
/// positions (integrator stages)
pub trait Acceleration {
    fn acceleration(&self, sys: &System, positions: &[NVec2], out: &mut [NVec2]);
}

/// Newtonian gravity with softening
/// `softening` smooths close encounters; pairs whose softened distance falls
/// at or below `min_dist` are skipped entirely
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub softening: f64, // softening length epsilon (not squared)
    pub min_dist: f64, // distance floor
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, sys: &System, positions: &[NVec2], out: &mut [NVec2]) {
        let n = sys.bodies.len();
        debug_assert_eq!(positions.len(), n);
        debug_assert_eq!(out.len(), n);
        if n == 0 { // No bodies, return
            return;
        }

        let eps2 = self.softening * self.softening;

        // Loop over every ordered pair (i, j), i != j. Each body sums its own
        // row in a fixed order so results are reproducible bit for bit
        for i in 0..n {
            let xi = positions[i]; // position of body i at this stage

            for j in 0..n {
                // A body never pulls on itself
                if i == j {
                    continue;
                }

                // d is the displacement vector from i to j,
                // so i feels a pull along +d
                let d = positions[j] - xi;

                // Softened squared distance: |d|^2 + eps^2
                let dist_sq = d.norm_squared() + eps2;
                let dist = dist_sq.sqrt();

                // Collision-avoidance clamp, not a merge
                if dist <= self.min_dist {
                    continue;
                }

                // a_i += (d / dist) * G * m_j / dist^2
                let magnitude = self.G * sys.bodies[j].m / dist_sq;
                out[i] += (d / dist) * magnitude;
            }
        }
    }
}
