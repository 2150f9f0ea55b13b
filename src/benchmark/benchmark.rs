use std::time::Instant;

use crate::simulation::states::{Body, System, NVec2};
use crate::simulation::params::Parameters;
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::integrator::{rk4_integrator, verlet_integrator};

/// Deterministic spiral of `n` unit masses, no rand needed
fn make_system(n: usize) -> System {
    let bodies = (0..n).map(|i| {
        let i_f = i as f64;
        let x = NVec2::new(
            (i_f * 0.37).sin() * 500.0,
            (i_f * 0.13).cos() * 500.0,
        );
        Body::at_rest(x, 1.0)
    }).collect();

    System::new(bodies)
}

fn gravity(params: &Parameters) -> AccelSet {
    AccelSet::new().with(NewtonianGravity {
        G: params.G,
        softening: params.softening,
        min_dist: params.min_dist,
    })
}

/// Time a single force evaluation for growing body counts
pub fn bench_gravity() {
    let params = Parameters::default();
    let forces = gravity(&params);

    for n in [100, 200, 400, 800, 1600] {
        let sys = make_system(n);
        let positions: Vec<NVec2> = sys.bodies.iter().map(|b| b.x).collect();
        let mut out = vec![NVec2::zeros(); n];

        // Warm up
        forces.accumulate_accels(&sys, &positions, &mut out);

        let t0 = Instant::now();
        forces.accumulate_accels(&sys, &positions, &mut out);
        let secs = t0.elapsed().as_secs_f64();

        log::info!("N = {n:5}, force evaluation = {secs:8.6} s");
    }
}

/// Time rk4 against verlet per step; rk4 costs four force evaluations, verlet two
pub fn bench_rk4() {
    let params = Parameters::default();
    let forces = gravity(&params);
    let dt = params.h0 / 8.0;
    let steps = 3;

    for n in [100, 200, 400, 800, 1600] {
        let template = make_system(n);

        let mut sys_rk4 = template.clone();
        rk4_integrator(&mut sys_rk4, &forces, dt, &[]); // warm-up
        let t0 = Instant::now();
        for _ in 0..steps {
            rk4_integrator(&mut sys_rk4, &forces, dt, &[]);
        }
        let rk4_ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let mut sys_verlet = template.clone();
        verlet_integrator(&mut sys_verlet, &forces, dt, &[]);
        let t1 = Instant::now();
        for _ in 0..steps {
            verlet_integrator(&mut sys_verlet, &forces, dt, &[]);
        }
        let verlet_ms = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        log::info!("N = {n:5}, rk4 step = {rk4_ms:9.3} ms, verlet step = {verlet_ms:9.3} ms");
    }
}
