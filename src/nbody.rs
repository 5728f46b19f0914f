//! 2D direct-sum N-body step.
//!
//! One call advances every body by a single semi-implicit Euler step:
//! accelerations come from the pairwise softened Newtonian sum, velocities
//! are kicked first and positions are drifted with the new velocity.
//!
//! The force loop is O(N^2) and dominates the cost. Softening `eps` is added
//! to the squared separation, so coincident bodies feel zero force instead of
//! an infinite one.

use nalgebra::Vector2;
use rand::Rng;
use rayon::prelude::*;
use tracing::trace;

use crate::error::{KernelError, Result};

pub type NVec2 = Vector2<f64>;

/// Newtonian gravitational constant in SI units.
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11;
/// Softening added to the squared separation when the caller does not pick one.
pub const DEFAULT_SOFTENING: f64 = 1e-9;

/// Lowest mass produced by [`initialize_bodies`].
pub const MIN_MASS: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64,   // mass
}

impl Body {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64, m: f64) -> Self {
        Self {
            x: NVec2::new(x, y),
            v: NVec2::new(vx, vy),
            m,
        }
    }
}

/// Physical constants for a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    pub g: f64,
    pub softening: f64,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            g: GRAVITATIONAL_CONSTANT,
            softening: DEFAULT_SOFTENING,
        }
    }
}

impl StepParams {
    fn validate(&self) -> Result<()> {
        if self.softening.is_nan() || self.softening <= 0.0 || self.softening.is_infinite() {
            return Err(KernelError::InvalidSoftening(self.softening));
        }
        Ok(())
    }
}

/// Sampling ranges for [`initialize_bodies`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitBounds {
    pub box_size: f64,
    pub max_mass: f64,
}

impl Default for InitBounds {
    fn default() -> Self {
        Self {
            box_size: 1000.0,
            max_mass: 1.0,
        }
    }
}

/// Random fixture: positions in `[0, box_size)^2`, velocities in `[-1, 1]^2`,
/// masses in `[0.1, max_mass]`.
pub fn initialize_bodies<R: Rng + ?Sized>(
    n: usize,
    bounds: InitBounds,
    rng: &mut R,
) -> Result<Vec<Body>> {
    let InitBounds { box_size, max_mass } = bounds;
    let box_ok = box_size.is_finite() && box_size > 0.0;
    let mass_ok = max_mass.is_finite() && max_mass >= MIN_MASS;
    if !box_ok || !mass_ok {
        return Err(KernelError::InvalidBounds { box_size, max_mass });
    }

    let mut bodies = Vec::with_capacity(n);
    for _ in 0..n {
        bodies.push(Body::new(
            rng.gen_range(0.0..box_size),
            rng.gen_range(0.0..box_size),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(MIN_MASS..=max_mass),
        ));
    }
    Ok(bodies)
}

/// Net acceleration on body `i` from every other body.
#[inline]
fn acceleration_on(i: usize, bodies: &[Body], g: f64, softening: f64) -> NVec2 {
    let xi = bodies[i].x;
    let mut a = NVec2::zeros();
    for (j, bj) in bodies.iter().enumerate() {
        if i == j {
            continue;
        }
        let r = bj.x - xi;
        let d = (r.dot(&r) + softening).sqrt();
        let coef = g * bj.m / (d * d * d);
        a += r * coef;
    }
    a
}

#[inline]
fn kick_drift(body: &Body, a: NVec2, dt: f64) -> Body {
    let v = body.v + a * dt;
    Body {
        x: body.x + v * dt,
        v,
        m: body.m,
    }
}

/// Advances `bodies` one step of length `dt`. The input is left untouched.
pub fn nbody_step(bodies: &[Body], dt: f64, params: StepParams) -> Result<Vec<Body>> {
    params.validate()?;
    trace!(n = bodies.len(), dt, "nbody_step");

    let StepParams { g, softening } = params;
    let accels: Vec<NVec2> = (0..bodies.len())
        .map(|i| acceleration_on(i, bodies, g, softening))
        .collect();

    Ok(bodies
        .iter()
        .zip(&accels)
        .map(|(b, &a)| kick_drift(b, a, dt))
        .collect())
}

/// [`nbody_step`] with the force loop split across the rayon pool. Each
/// body's sum runs in the same order, so results match the sequential step.
pub fn nbody_step_parallel(bodies: &[Body], dt: f64, params: StepParams) -> Result<Vec<Body>> {
    params.validate()?;
    trace!(n = bodies.len(), dt, "nbody_step_parallel");

    let StepParams { g, softening } = params;
    Ok(bodies
        .par_iter()
        .enumerate()
        .map(|(i, b)| kick_drift(b, acceleration_on(i, bodies, g, softening), dt))
        .collect())
}
