//! Core state types for the N-body simulation.
//!
//! - `Body` / `System` hold the physical state owned by the driver
//! - `State` is a transient (positions, velocities) snapshot used by the
//!   integrators between stages
//!
//! A system holds the list of bodies and the current simulation time `t`.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass, > 0
}

impl Body {
    pub fn new(x: NVec2, v: NVec2, m: f64) -> Self {
        Self { x, v, m }
    }

    /// Body at rest at `x`
    pub fn at_rest(x: NVec2, m: f64) -> Self {
        Self::new(x, NVec2::zeros(), m)
    }

    pub fn is_finite(&self) -> bool {
        self.x.iter().chain(self.v.iter()).all(|c| c.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub bodies: Vec<Body>, // ordered, index-stable collection of bodies
    pub t: f64, // time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Copy of the current positions and velocities
    pub fn snapshot(&self) -> State {
        State {
            positions: self.bodies.iter().map(|b| b.x).collect(),
            velocities: self.bodies.iter().map(|b| b.v).collect(),
        }
    }

    /// Index of the first body whose position or velocity is NaN/infinite
    pub fn first_non_finite(&self) -> Option<usize> {
        self.bodies.iter().position(|b| !b.is_finite())
    }
}

/// Positions and velocities indexed like `System::bodies`
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub positions: Vec<NVec2>,
    pub velocities: Vec<NVec2>,
}

impl State {
    /// `self + h * (dx, dv)` per body
    pub fn advanced(&self, dx: &[NVec2], dv: &[NVec2], h: f64) -> State {
        State {
            positions: self.positions.iter().zip(dx).map(|(x, d)| *x + h * *d).collect(),
            velocities: self.velocities.iter().zip(dv).map(|(v, d)| *v + h * *d).collect(),
        }
    }
}
