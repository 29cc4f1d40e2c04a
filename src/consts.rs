use crate::astro::NEWTON_G;

// Same values as data/planets.txt
pub const SUN_MASS: f64 = 1.989e30;
pub const EARTH_MASS: f64 = 5.974e24;
pub const EARTH_ORBIT_RADIUS: f64 = 1.496e11;
pub const EARTH_ORBIT_SPEED: f64 = 2.98e4;

pub fn get_circular_velocity(radius: f64, central_mass: f64) -> f64 {
    (NEWTON_G * central_mass / radius).sqrt()
}

