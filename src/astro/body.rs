use nalgebra::{Point2, Vector2};

use super::NEWTON_G;
use crate::gui::Canvas;

#[derive(Debug, Clone)]
pub struct Body {
    position: Point2<f64>,
    velocity: Vector2<f64>,
    // Never changes after construction
    mass: f64,
    name: String,
}

impl Body {
    pub fn new(position: Point2<f64>, velocity: Vector2<f64>, mass: f64, name: &str) -> Self {
        Body {
            position,
            velocity,
            mass,
            name: name.to_owned(),
        }
    }

    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    pub fn velocity(&self) -> Vector2<f64> {
        self.velocity
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distance between the centers of the two bodies. Only meaningful for two
    /// distinct bodies; asking a body for its distance to itself gives zero,
    /// and every force computation divides by this.
    pub fn distance_to(&self, other: &Body) -> f64 {
        let dx = self.position.x - other.position.x;
        let dy = self.position.y - other.position.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Magnitude of the gravitational pull that `other` exerts on this body.
    pub fn force_exerted_by(&self, other: &Body) -> f64 {
        // Multiply the masses first, so that a.force_exerted_by(b) and
        // b.force_exerted_by(a) agree to the last bit.
        let distance = self.distance_to(other);
        NEWTON_G * (self.mass * other.mass) / distance / distance
    }

    pub fn force_exerted_by_x(&self, other: &Body) -> f64 {
        let dx = self.position.x - other.position.x;
        -self.force_exerted_by(other) * dx / self.distance_to(other)
    }

    pub fn force_exerted_by_y(&self, other: &Body) -> f64 {
        let dy = self.position.y - other.position.y;
        -self.force_exerted_by(other) * dy / self.distance_to(other)
    }

    /// Sums the x-component of the pull of every body in `bodies`, skipping
    /// this body itself. The skip is by identity: an identical copy of this
    /// body elsewhere in memory still counts.
    pub fn net_force_exerted_by_x(&self, bodies: &[Body]) -> f64 {
        self.others(bodies)
            .map(|other| self.force_exerted_by_x(other))
            .sum()
    }

    pub fn net_force_exerted_by_y(&self, bodies: &[Body]) -> f64 {
        self.others(bodies)
            .map(|other| self.force_exerted_by_y(other))
            .sum()
    }

    pub fn net_force_exerted_by(&self, bodies: &[Body]) -> Vector2<f64> {
        Vector2::new(
            self.net_force_exerted_by_x(bodies),
            self.net_force_exerted_by_y(bodies),
        )
    }

    fn others<'a>(&'a self, bodies: &'a [Body]) -> impl Iterator<Item = &'a Body> {
        bodies.iter().filter(move |other| !std::ptr::eq(*other, self))
    }

    /// Advances this body by one semi-implicit Euler step: the velocity is
    /// updated from the force first, and the new velocity moves the position.
    pub fn update(&mut self, dt: f64, force_x: f64, force_y: f64) {
        let acceleration = Vector2::new(force_x / self.mass, force_y / self.mass);
        self.velocity += dt * acceleration;
        self.position += dt * self.velocity;
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw(&self.position, &self.name);
    }
}
