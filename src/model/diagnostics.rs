//! Whole-system quantities that an exact solution would conserve.
//!
//! None of these feed back into the simulation; they exist so a run can
//! report how far the integrator has drifted.

use nalgebra::{Point2, Vector2};

use crate::astro::{Body, NEWTON_G};

/// A snapshot of the conserved quantities of a set of bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics {
    pub center_of_mass: Point2<f64>,
    pub momentum: Vector2<f64>,
    pub energy: f64,
}

impl Diagnostics {
    pub fn of(bodies: &[Body]) -> Self {
        Diagnostics {
            center_of_mass: center_of_mass(bodies),
            momentum: total_momentum(bodies),
            energy: total_energy(bodies),
        }
    }

    /// Relative change in energy from `baseline` to `self`.
    pub fn energy_drift(&self, baseline: &Diagnostics) -> f64 {
        let difference = (self.energy - baseline.energy).abs();
        if baseline.energy != 0.0 {
            difference / baseline.energy.abs()
        } else {
            difference
        }
    }
}

pub fn total_mass(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::mass).sum()
}

/// Mass-weighted mean position. The origin if there are no bodies.
pub fn center_of_mass(bodies: &[Body]) -> Point2<f64> {
    let mass = total_mass(bodies);
    if mass == 0.0 {
        return Point2::origin();
    }

    let weighted: Vector2<f64> = bodies
        .iter()
        .map(|body| body.mass() * body.position().coords)
        .sum();
    Point2::from(weighted / mass)
}

pub fn total_momentum(bodies: &[Body]) -> Vector2<f64> {
    bodies
        .iter()
        .map(|body| body.mass() * body.velocity())
        .sum()
}

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies
        .iter()
        .map(|body| 0.5 * body.mass() * body.velocity().norm_squared())
        .sum()
}

/// Gravitational potential energy, counting each pair once.
pub fn potential_energy(bodies: &[Body]) -> f64 {
    let mut energy = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            energy -= NEWTON_G * a.mass() * b.mass() / a.distance_to(b);
        }
    }
    energy
}

pub fn total_energy(bodies: &[Body]) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies)
}
