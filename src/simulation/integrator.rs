//! Fixed-step time integrators for the N-body system
//!
//! Provides the classical fourth-order Runge-Kutta stepper and a
//! velocity-Verlet stepper, both driven by `AccelSet`. Anchored bodies
//! (given per call) receive zero acceleration but still attract the others

use super::states::{System, State, NVec2};
use super::forces::AccelSet;
use crate::configuration::config::IntegratorConfig;

/// Accelerations at `positions`, with anchored bodies held at zero
fn eval_accels(sys: &System, forces: &AccelSet, positions: &[NVec2], anchors: &[usize]) -> Vec<NVec2> {
    let mut acc = forces.accels(sys, positions);
    for &i in anchors {
        if let Some(a) = acc.get_mut(i) {
            *a = NVec2::zeros();
        }
    }
    acc
}

/// Advance the system by one step `dt` using classical RK4
/// Four force evaluations per step. Stage states live only inside this call;
/// positions, velocities and `sys.t` are written back once at the end
pub fn rk4_integrator(sys: &mut System, forces: &AccelSet, dt: f64, anchors: &[usize]) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let half_dt = 0.5 * dt;

    // s0: state at the start of the interval
    let s0 = sys.snapshot();

    // k1: derivatives at s0 (dx/dt = v, dv/dt = a)
    let k1_acc = eval_accels(sys, forces, &s0.positions, anchors);
    let k1_vel = s0.velocities.clone();

    // s1 = s0 + dt/2 * k1, then k2 at the midpoint
    let s1 = s0.advanced(&k1_vel, &k1_acc, half_dt);
    let k2_acc = eval_accels(sys, forces, &s1.positions, anchors);
    let k2_vel = s1.velocities;

    // s2 = s0 + dt/2 * k2, then k3 at the midpoint
    let s2 = s0.advanced(&k2_vel, &k2_acc, half_dt);
    let k3_acc = eval_accels(sys, forces, &s2.positions, anchors);
    let k3_vel = s2.velocities;

    // s3 = s0 + dt * k3, then k4 at the end point
    let s3 = s0.advanced(&k3_vel, &k3_acc, dt);
    let k4_acc = eval_accels(sys, forces, &s3.positions, anchors);
    let k4_vel = s3.velocities;

    // Weighted average (k1 + 2 k2 + 2 k3 + k4) / 6
    let w = dt / 6.0;
    let State { positions, velocities } = s0;
    for (i, (b, (x0, v0))) in sys.bodies.iter_mut().zip(positions.into_iter().zip(velocities)).enumerate() {
        b.x = x0 + w * (k1_vel[i] + 2.0 * k2_vel[i] + 2.0 * k3_vel[i] + k4_vel[i]);
        b.v = v0 + w * (k1_acc[i] + 2.0 * k2_acc[i] + 2.0 * k3_acc[i] + k4_acc[i]);
    }

    sys.t += dt;
}

/// Advance the system by one step using velocity-Verlet
/// Uses two force evaluations per step and updates positions, velocities,
/// and `sys.t` in-place
pub fn verlet_integrator(sys: &mut System, forces: &AccelSet, dt: f64, anchors: &[usize]) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let half_dt = 0.5 * dt;

    // a_n at the current positions
    let positions: Vec<NVec2> = sys.bodies.iter().map(|b| b.x).collect();
    let a_old = eval_accels(sys, forces, &positions, anchors);

    // Kick: v_n+1/2 = v_n + (dt/2) a_n
    for (b, a) in sys.bodies.iter_mut().zip(a_old.iter()) {
        b.v += half_dt * *a;
    }

    // Drift: x_n+1 = x_n + dt v_n+1/2
    for b in sys.bodies.iter_mut() {
        b.x += dt * b.v;
    }

    sys.t += dt;

    // a_n+1 from x_n+1
    let positions: Vec<NVec2> = sys.bodies.iter().map(|b| b.x).collect();
    let a_new = eval_accels(sys, forces, &positions, anchors);

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) a_n+1
    for (b, a) in sys.bodies.iter_mut().zip(a_new.iter()) {
        b.v += half_dt * *a;
    }
}

/// Advance one step with the configured method
pub fn integrate(method: IntegratorConfig, sys: &mut System, forces: &AccelSet, dt: f64, anchors: &[usize]) {
    match method {
        IntegratorConfig::Rk4 => rk4_integrator(sys, forces, dt, anchors),
        IntegratorConfig::Verlet => verlet_integrator(sys, forces, dt, anchors),
    }
}
