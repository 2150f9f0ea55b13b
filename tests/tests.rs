use gravsim::simulation::states::{Body, System, NVec2};
use gravsim::simulation::forces::{AccelSet, NewtonianGravity};
use gravsim::simulation::integrator::{rk4_integrator, verlet_integrator};
use gravsim::simulation::energy::{kinetic_energy, potential_energy, total_energy, relative_drift, EnergyMonitor};

use std::f64::consts::TAU;

const G: f64 = 100.0;
const M: f64 = 10000.0;
const R: f64 = 260.0;
const MIN_DIST: f64 = 0.01;

/// Build a simple 2-body System separated along x-axis
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    System::new(vec![
        Body::at_rest(NVec2::new(-dist / 2.0, 0.0), m1),
        Body::at_rest(NVec2::new(dist / 2.0, 0.0), m2),
    ])
}

/// Build a gravity term + AccelSet
pub fn gravity_set(g: f64, softening: f64) -> AccelSet {
    AccelSet::new().with(NewtonianGravity {
        G: g,
        softening,
        min_dist: MIN_DIST,
    })
}

/// Central mass at the origin, planet of mass `m` at (R, 0) moving on the
/// circular orbit around a fixed center
pub fn circular_orbit(m: f64) -> System {
    System::new(vec![
        Body::at_rest(NVec2::zeros(), M),
        Body::new(NVec2::new(R, 0.0), NVec2::new(0.0, circular_speed()), m),
    ])
}

fn circular_speed() -> f64 {
    (G * M / R).sqrt()
}

fn period() -> f64 {
    TAU * R / circular_speed()
}

fn accels(forces: &AccelSet, sys: &System) -> Vec<NVec2> {
    let positions: Vec<NVec2> = sys.bodies.iter().map(|b| b.x).collect();
    forces.accels(sys, &positions)
}

/// Integrate exactly `t` in `n` equal rk4 steps
fn rk4_for(sys: &mut System, forces: &AccelSet, t: f64, n: usize, anchors: &[usize]) {
    let dt = t / n as f64;
    for _ in 0..n {
        rk4_integrator(sys, forces, dt, anchors);
    }
}

/// Explicit Euler, first-order baseline
fn euler_for(sys: &mut System, forces: &AccelSet, t: f64, n: usize, anchors: &[usize]) {
    let dt = t / n as f64;
    for _ in 0..n {
        let mut acc = accels(forces, sys);
        for &i in anchors {
            acc[i] = NVec2::zeros();
        }
        for (b, a) in sys.bodies.iter_mut().zip(acc) {
            b.x += dt * b.v;
            b.v += dt * a;
        }
        sys.t += dt;
    }
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let sys = two_body_system(10.0, 2.0, 3.0);
    let forces = gravity_set(0.1, 0.0);

    let acc = accels(&forces, &sys);
    let net = acc[0] * sys.bodies[0].m + acc[1] * sys.bodies[1].m;

    assert!(net.norm() < 1e-12, "Net momentum not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let sys = two_body_system(2.0, 1.0, 1.0);
    let forces = gravity_set(0.1, 0.0);

    let acc = accels(&forces, &sys);
    let dx = sys.bodies[1].x - sys.bodies[0].x;

    assert!(acc[0].dot(&dx) > 0.0, "Acceleration is not toward second body");
    assert!(acc[1].dot(&dx) < 0.0, "Acceleration is not toward first body");
}

#[test]
fn gravity_inverse_square_law() {
    let forces = gravity_set(0.1, 0.0);

    let acc_r = accels(&forces, &two_body_system(1.0, 1.0, 1.0));
    let acc_2r = accels(&forces, &two_body_system(2.0, 1.0, 1.0));

    let ratio = acc_r[0].norm() / acc_2r[0].norm();

    assert!((ratio - 4.0).abs() < 1e-9, "Expected 4x, got {}", ratio);
}

#[test]
fn gravity_magnitude_matches_newton() {
    let sys = two_body_system(R, 1.0, M);
    let forces = gravity_set(G, 0.0);

    let acc = accels(&forces, &sys);
    let expected = G * M / (R * R);

    assert!((acc[0].norm() - expected).abs() < 1e-12 * expected);
}

#[test]
fn gravity_lone_body_feels_nothing() {
    let sys = System::new(vec![Body::new(NVec2::new(3.0, -4.0), NVec2::new(1.0, 1.0), 50.0)]);

    for softening in [0.0, 1.0, 25.0] {
        let acc = accels(&gravity_set(G, softening), &sys);
        assert_eq!(acc, vec![NVec2::zeros()]);
    }
}

#[test]
fn gravity_self_term_excluded_with_many_bodies() {
    // Symmetric ring: the center body's pulls cancel, so any self term would show up
    let mut bodies = vec![Body::at_rest(NVec2::zeros(), 7.0)];
    for k in 0..4 {
        let angle = k as f64 * TAU / 4.0;
        bodies.push(Body::at_rest(NVec2::new(angle.cos(), angle.sin()) * 10.0, 1.0));
    }
    let sys = System::new(bodies);

    let acc = accels(&gravity_set(G, 1.0), &sys);

    assert!(acc[0].norm() < 1e-12, "center acceleration {:?}", acc[0]);
}

#[test]
fn gravity_clamps_pairs_below_min_distance() {
    let forces = gravity_set(G, 0.0);

    for dist in [0.0, 0.001, 0.005] {
        let acc = accels(&forces, &two_body_system(dist, 10.0, 10.0));
        assert_eq!(acc, vec![NVec2::zeros(); 2], "dist = {dist}");
    }
}

#[test]
fn gravity_softening_prevents_blowup() {
    let softening = 1.0;
    let m = 10.0;
    let sys = two_body_system(1e-9, m, m);

    let acc = accels(&gravity_set(G, softening), &sys);

    assert!(acc[0].iter().all(|c| c.is_finite()));
    // max of d / (d^2 + eps^2)^(3/2) is below 1 / eps^2
    assert!(acc[0].norm() <= G * m / (softening * softening), "Softening failed; acceleration too large");

    // The same pair just above the floor without softening is far stronger
    let hard = accels(&gravity_set(G, 0.0), &two_body_system(0.02, m, m));
    assert!(hard[0].norm() > 100.0 * G * m / (softening * softening));
}

#[test]
fn gravity_softening_weakens_close_pairs() {
    let sys = two_body_system(2.0, 1.0, 1.0);

    let hard = accels(&gravity_set(G, 0.0), &sys);
    let soft = accels(&gravity_set(G, 1.0), &sys);

    assert!(soft[0].norm() < hard[0].norm());
}

#[test]
fn gravity_empty_set_is_zero() {
    let sys = two_body_system(5.0, 1.0, 1.0);
    let acc = accels(&AccelSet::new(), &sys);

    assert_eq!(acc, vec![NVec2::zeros(); 2]);
}

#[test]
#[should_panic(expected = "one entry per body")]
fn gravity_rejects_short_position_slice() {
    let sys = two_body_system(5.0, 1.0, 1.0);
    let positions = vec![sys.bodies[0].x];

    gravity_set(G, 1.0).accels(&sys, &positions);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn rk4_free_body_moves_in_straight_line() {
    let mut sys = System::new(vec![Body::new(NVec2::new(1.0, 2.0), NVec2::new(3.0, -1.0), 1.0)]);
    let forces = gravity_set(G, 1.0);

    rk4_integrator(&mut sys, &forces, 0.5, &[]);

    assert!((sys.bodies[0].x - NVec2::new(2.5, 1.5)).norm() < 1e-12);
    assert_eq!(sys.bodies[0].v, NVec2::new(3.0, -1.0));
    assert_eq!(sys.t, 0.5);
}

#[test]
fn rk4_empty_system_is_noop() {
    let mut sys = System::new(Vec::new());
    rk4_integrator(&mut sys, &gravity_set(G, 1.0), 0.1, &[]);

    assert!(sys.is_empty());
    assert_eq!(sys.t, 0.0);
}

#[test]
fn rk4_keeps_masses_and_order() {
    let mut sys = circular_orbit(10.0);
    let before = sys.clone();

    rk4_for(&mut sys, &gravity_set(G, 1.0), 1.0, 60, &[]);

    assert_eq!(sys.len(), before.len());
    for (a, b) in sys.bodies.iter().zip(&before.bodies) {
        assert_eq!(a.m, b.m);
    }
    // the planet is still the one far from the origin
    assert!(sys.bodies[1].x.norm() > 200.0);
}

#[test]
fn rk4_anchor_stays_put() {
    let mut sys = circular_orbit(500.0);
    let forces = gravity_set(G, 1.0);

    rk4_for(&mut sys, &forces, 2.0, 480, &[0]);

    assert_eq!(sys.bodies[0].x, NVec2::zeros());
    assert_eq!(sys.bodies[0].v, NVec2::zeros());
    assert!((sys.bodies[1].x - NVec2::new(R, 0.0)).norm() > 1.0);
}

#[test]
fn rk4_unanchored_center_is_pulled() {
    let mut sys = circular_orbit(500.0);
    let forces = gravity_set(G, 1.0);

    rk4_for(&mut sys, &forces, 2.0, 480, &[]);

    assert!(sys.bodies[0].v.norm() > 0.0);
    assert!(sys.bodies[0].x.norm() > 0.0);
}

#[test]
fn rk4_energy_stable_over_several_orbits() {
    let dt = 1.0 / 240.0;
    let steps = (3.0 * period() / dt).ceil() as usize;

    for anchors in [vec![0], vec![]] {
        let mut sys = circular_orbit(10.0);
        let forces = gravity_set(G, 1.0);
        let e0 = total_energy(&sys, G, MIN_DIST);

        for _ in 0..steps {
            rk4_integrator(&mut sys, &forces, dt, &anchors);
        }

        let drift = relative_drift(e0, total_energy(&sys, G, MIN_DIST));
        assert!(drift < 1e-2, "anchors {:?}: drift {}", anchors, drift);
    }
}

#[test]
fn rk4_orbit_closes_after_one_period() {
    let mut sys = circular_orbit(1.0);
    let forces = gravity_set(G, 0.0);
    let start = sys.bodies[1].clone();

    let t = period();
    let n = (t * 240.0).ceil() as usize;
    rk4_for(&mut sys, &forces, t, n, &[0]);

    let end = &sys.bodies[1];
    assert!((end.x - start.x).norm() < 1e-3 * R, "position off by {}", (end.x - start.x).norm());
    assert!((end.v - start.v).norm() < 1e-3 * circular_speed());
}

/// Distance from the exact circular solution after a quarter orbit
fn quarter_orbit_error(n: usize, step: fn(&mut System, &AccelSet, f64, usize, &[usize])) -> f64 {
    let mut sys = circular_orbit(1.0);
    let forces = gravity_set(G, 0.0);

    let t = period() / 4.0;
    step(&mut sys, &forces, t, n, &[0]);

    let omega = circular_speed() / R;
    let exact = NVec2::new((omega * t).cos(), (omega * t).sin()) * R;
    (sys.bodies[1].x - exact).norm()
}

#[test]
fn rk4_is_fourth_order() {
    let coarse = quarter_orbit_error(16, rk4_for);
    let fine = quarter_orbit_error(32, rk4_for);
    let ratio = coarse / fine;

    assert!(ratio > 12.0 && ratio < 20.0, "rk4 error ratio {ratio} (errors {coarse}, {fine})");

    let euler_ratio = quarter_orbit_error(16, euler_for) / quarter_orbit_error(32, euler_for);
    assert!(euler_ratio > 1.5 && euler_ratio < 2.5, "euler error ratio {euler_ratio}");
}

#[test]
fn rk4_is_deterministic() {
    let run = || {
        let mut bodies = Vec::new();
        for i in 0..12 {
            let i_f = i as f64;
            bodies.push(Body::new(
                NVec2::new((i_f * 0.37).sin() * 200.0, (i_f * 0.13).cos() * 200.0),
                NVec2::new((i_f * 0.71).cos() * 5.0, (i_f * 0.29).sin() * 5.0),
                1.0 + i_f,
            ));
        }
        let mut sys = System::new(bodies);
        rk4_for(&mut sys, &gravity_set(G, 1.0), 5.0, 600, &[0]);
        sys
    };

    assert_eq!(run(), run());
}

#[test]
fn verlet_keeps_circular_orbit_energy() {
    let dt = 1.0 / 240.0;
    let steps = period().div_euclid(dt) as usize;
    let mut sys = circular_orbit(10.0);
    let forces = gravity_set(G, 0.0);
    let e0 = total_energy(&sys, G, MIN_DIST);

    for _ in 0..steps {
        verlet_integrator(&mut sys, &forces, dt, &[0]);
    }

    assert!(relative_drift(e0, total_energy(&sys, G, MIN_DIST)) < 1e-3);
    assert_eq!(sys.bodies[0].x, NVec2::zeros());
}

// ==================================================================================
// Energy tests
// ==================================================================================

#[test]
fn energy_kinetic_sums_bodies() {
    let sys = System::new(vec![
        Body::new(NVec2::zeros(), NVec2::new(3.0, 4.0), 2.0),
        Body::new(NVec2::new(100.0, 0.0), NVec2::new(0.0, -1.0), 4.0),
    ]);

    // 0.5 * 2 * 25 + 0.5 * 4 * 1
    assert_eq!(kinetic_energy(&sys), 27.0);
}

#[test]
fn energy_potential_of_pair() {
    let sys = two_body_system(4.0, 2.0, 3.0);

    assert!((potential_energy(&sys, G, MIN_DIST) - (-G * 6.0 / 4.0)).abs() < 1e-12);
}

#[test]
fn energy_potential_counts_each_pair_once() {
    let sys = System::new(vec![
        Body::at_rest(NVec2::new(0.0, 0.0), 1.0),
        Body::at_rest(NVec2::new(1.0, 0.0), 1.0),
        Body::at_rest(NVec2::new(0.0, 1.0), 1.0),
    ]);

    let expected = -G * (1.0 + 1.0 + 1.0 / 2f64.sqrt());
    assert!((potential_energy(&sys, G, MIN_DIST) - expected).abs() < 1e-12);
}

#[test]
fn energy_clamps_pairs_below_min_distance() {
    let mut sys = two_body_system(0.005, 10.0, 10.0);
    sys.bodies[0].v = NVec2::new(1.0, 0.0);

    assert_eq!(potential_energy(&sys, G, MIN_DIST), 0.0);
    assert_eq!(total_energy(&sys, G, MIN_DIST), 5.0);

    let coincident = two_body_system(0.0, 10.0, 10.0);
    assert_eq!(total_energy(&coincident, G, MIN_DIST), 0.0);
}

#[test]
fn energy_circular_orbit_is_bound() {
    let sys = circular_orbit(10.0);
    let e = total_energy(&sys, G, MIN_DIST);

    // virial: E = -G M m / (2 r) for a fixed center
    let expected = -G * M * 10.0 / (2.0 * R);
    assert!((e - expected).abs() < 1e-9 * expected.abs());
}

#[test]
fn energy_relative_drift() {
    assert_eq!(relative_drift(-100.0, -99.0), 0.01);
    assert_eq!(relative_drift(-100.0, -100.0), 0.0);
    assert_eq!(relative_drift(0.0, 0.5), 0.5);
}

#[test]
fn energy_monitor_tracks_worst_drift() {
    let mut monitor = EnergyMonitor::new(-100.0);

    assert_eq!(monitor.record(-98.0), 0.02);
    assert_eq!(monitor.record(-99.5), 0.005);

    assert_eq!(monitor.current, -99.5);
    assert_eq!(monitor.max_drift, 0.02);
    assert_eq!(monitor.drift(), 0.005);
}
