use nalgebra::Vector2;

use std::time::Duration;

use super::diagnostics::Diagnostics;
use super::report::Report;
use super::Universe;
use crate::astro::Body;
use crate::gui::Canvas;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// How long to simulate for, in seconds
    pub total_time: f64,
    /// Length of a single step, in seconds
    pub timestep: f64,
    /// How long to hold each rendered frame
    pub frame_delay: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            total_time: 157_788_000.0, // five years
            timestep: 25_000.0,
            frame_delay: Duration::from_millis(10),
        }
    }
}

/// Steps a fixed set of bodies forward in time with direct pairwise gravity.
pub struct Simulator {
    universe: Universe,
    config: SimulationConfig,
    time: f64,
}

impl Simulator {
    pub fn new(universe: Universe, config: SimulationConfig) -> Self {
        Simulator {
            universe,
            config,
            time: 0.0,
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.universe.bodies
    }

    pub fn radius(&self) -> f64 {
        self.universe.radius
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn is_finished(&self) -> bool {
        self.time >= self.config.total_time
    }

    /// The net force on every body, in order, all computed from the current
    /// positions.
    pub fn compute_net_forces(&self) -> Vec<Vector2<f64>> {
        let bodies = self.bodies();
        bodies
            .iter()
            .map(|body| body.net_force_exerted_by(bodies))
            .collect()
    }

    // Every force has to be known before anybody moves; otherwise later
    // bodies would be pulled towards where earlier ones are going to be.
    fn advance_bodies(&mut self) {
        let forces = self.compute_net_forces();
        let dt = self.config.timestep;
        for (body, force) in self.universe.bodies.iter_mut().zip(forces) {
            body.update(dt, force.x, force.y);
        }
    }

    /// Advances the whole system by one timestep, without drawing anything.
    pub fn step(&mut self) {
        self.advance_bodies();
        self.time += self.config.timestep;
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.draw_background();
        for body in self.bodies() {
            body.draw(canvas);
        }
        canvas.present(self.config.frame_delay);
    }

    /// Runs until the configured total time has elapsed, rendering a frame
    /// after every step. Returns the number of steps taken.
    pub fn run(&mut self, canvas: &mut dyn Canvas) -> usize {
        tracing::info!(
            bodies = self.bodies().len(),
            total_time = self.config.total_time,
            timestep = self.config.timestep,
            "starting simulation"
        );
        let initial = Diagnostics::of(self.bodies());
        tracing::debug!(?initial, "initial state");

        canvas.set_scale(self.radius());

        let mut steps = 0;
        while !self.is_finished() {
            self.advance_bodies();
            self.render(canvas);
            self.time += self.config.timestep;
            steps += 1;
            tracing::trace!(time = self.time, "step {}", steps);
        }

        let last = Diagnostics::of(self.bodies());
        tracing::debug!(?last, "final state");
        tracing::info!(
            steps,
            time = self.time,
            energy_drift = last.energy_drift(&initial),
            "simulation finished"
        );
        steps
    }

    pub fn report(&self) -> Report<'_> {
        Report {
            radius: self.radius(),
            bodies: self.bodies(),
        }
    }

    pub fn into_universe(self) -> Universe {
        self.universe
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::Point2;

    use super::*;
    use crate::consts::{
        get_circular_velocity, EARTH_MASS, EARTH_ORBIT_RADIUS, EARTH_ORBIT_SPEED, SUN_MASS,
    };
    use crate::gui::{NullCanvas, RecordingCanvas};
    use crate::model::diagnostics::center_of_mass;

    fn config(total_time: f64, timestep: f64) -> SimulationConfig {
        SimulationConfig {
            total_time,
            timestep,
            frame_delay: Duration::from_millis(0),
        }
    }

    fn sun_and_earth() -> Universe {
        Universe {
            radius: 2.5e11,
            bodies: vec![
                Body::new(
                    Point2::new(EARTH_ORBIT_RADIUS, 0.0),
                    Vector2::new(0.0, EARTH_ORBIT_SPEED),
                    EARTH_MASS,
                    "earth.gif",
                ),
                Body::new(Point2::origin(), Vector2::zeros(), SUN_MASS, "sun.gif"),
            ],
        }
    }

    #[test]
    fn test_zero_time_changes_nothing() {
        let universe = sun_and_earth();
        let mut simulator = Simulator::new(universe.clone(), config(0.0, 25000.0));
        let mut canvas = RecordingCanvas::default();

        assert_eq!(simulator.run(&mut canvas), 0);
        assert_eq!(simulator.time(), 0.0);
        assert_eq!(canvas.frames, 0);
        for (before, after) in universe.bodies.iter().zip(simulator.bodies()) {
            assert_eq!(before.position(), after.position());
            assert_eq!(before.velocity(), after.velocity());
        }
    }

    #[test]
    fn test_step_count() {
        // 0, 10, 20, 30 are all below 35; 40 is not
        let mut simulator = Simulator::new(sun_and_earth(), config(35.0, 10.0));
        assert_eq!(simulator.run(&mut NullCanvas), 4);
        assert_eq!(simulator.time(), 40.0);
        assert!(simulator.is_finished());
    }

    #[test]
    fn test_empty_universe_still_advances_time() {
        let universe = Universe {
            radius: 1.0,
            bodies: vec![],
        };
        let mut simulator = Simulator::new(universe, config(3.0, 1.0));
        let mut canvas = RecordingCanvas::default();

        assert_eq!(simulator.run(&mut canvas), 3);
        assert_eq!(simulator.time(), 3.0);
        assert_eq!(canvas.frames, 3);
        assert!(canvas.drawn.is_empty());
    }

    #[test]
    fn test_lone_body_stays_put() {
        let universe = Universe {
            radius: 1.0,
            bodies: vec![Body::new(
                Point2::new(4.0, -2.0),
                Vector2::zeros(),
                SUN_MASS,
                "sun.gif",
            )],
        };
        let mut simulator = Simulator::new(universe, config(1e6, 1e3));
        for _ in 0..100 {
            simulator.step();
            assert_eq!(simulator.bodies()[0].position(), Point2::new(4.0, -2.0));
            assert_eq!(simulator.bodies()[0].velocity(), Vector2::zeros());
        }
    }

    #[test]
    fn test_forces_come_from_one_snapshot() {
        // If forces were computed from partially updated state, running the
        // same system in reverse order would give a different answer.
        let universe = sun_and_earth();
        let mut reversed = universe.clone();
        reversed.bodies.reverse();

        let mut forward = Simulator::new(universe, config(25000.0 * 10.0, 25000.0));
        let mut backward = Simulator::new(reversed, config(25000.0 * 10.0, 25000.0));
        forward.run(&mut NullCanvas);
        backward.run(&mut NullCanvas);

        let forward = forward.bodies();
        let backward = backward.bodies();
        assert_eq!(forward[0].position(), backward[1].position());
        assert_eq!(forward[1].position(), backward[0].position());
        assert_eq!(forward[0].velocity(), backward[1].velocity());
    }

    #[test]
    fn test_first_step_matches_hand_computation() {
        let universe = sun_and_earth();
        let dt = 25000.0;
        let earth = &universe.bodies[0];
        let sun = &universe.bodies[1];

        let fx = earth.force_exerted_by_x(sun);
        let vx = dt * (fx / EARTH_MASS);
        let x = EARTH_ORBIT_RADIUS + dt * vx;
        let y = dt * EARTH_ORBIT_SPEED;

        let mut simulator = Simulator::new(universe.clone(), config(dt, dt));
        simulator.step();
        let earth = &simulator.bodies()[0];
        assert_eq!(earth.velocity(), Vector2::new(vx, EARTH_ORBIT_SPEED));
        assert_eq!(earth.position(), Point2::new(x, y));
    }

    #[test]
    fn test_symmetric_pair_keeps_center_of_mass() {
        let mass = 1e30;
        let radius = 1e9;
        // Each body circles the midpoint at half the separation
        let speed = get_circular_velocity(radius, mass / 4.0);
        let universe = Universe {
            radius: 2.0 * radius,
            bodies: vec![
                Body::new(Point2::new(radius, 0.0), Vector2::new(0.0, speed), mass, "a"),
                Body::new(Point2::new(-radius, 0.0), Vector2::new(0.0, -speed), mass, "b"),
            ],
        };

        let mut simulator = Simulator::new(universe, config(1e4, 100.0));
        while !simulator.is_finished() {
            simulator.step();
            let center = center_of_mass(simulator.bodies());
            assert_abs_diff_eq!(center.x, 0.0, epsilon = 1e-3);
            assert_abs_diff_eq!(center.y, 0.0, epsilon = 1e-3);
        }

        // And they really did move
        let a = simulator.bodies()[0].position();
        assert!((a - Point2::new(radius, 0.0)).norm() > radius / 10.0);
        assert_relative_eq!(a.coords.norm(), radius, max_relative = 0.05);
    }

    #[test]
    fn test_render_draws_every_body_in_order() {
        let simulator = Simulator::new(sun_and_earth(), config(0.0, 1.0));
        let mut canvas = RecordingCanvas::default();
        simulator.render(&mut canvas);

        assert_eq!(canvas.backgrounds, 1);
        assert_eq!(canvas.frames, 1);
        let labels: Vec<&str> = canvas.drawn.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(labels, vec!["earth.gif", "sun.gif"]);
    }

    #[test]
    fn test_run_sets_scale_and_renders_each_step() {
        let mut simulator = Simulator::new(sun_and_earth(), config(50000.0, 25000.0));
        let mut canvas = RecordingCanvas::default();
        simulator.run(&mut canvas);

        assert_eq!(canvas.radius, Some(2.5e11));
        assert_eq!(canvas.frames, 2);
        assert_eq!(canvas.drawn.len(), 4);
        // The last frame shows the final state
        assert_eq!(canvas.drawn[2].0, simulator.bodies()[0].position());
    }
}
