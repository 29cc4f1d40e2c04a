//! Point-mass gravitation.
//!
//! The important struct in this module is [Body], a single mass moving in the
//! plane. Bodies know how to compute the pull of other bodies on themselves,
//! and how to integrate their own motion one step at a time.

mod body;

// Newton's gravitational constant, in N m^2 / kg^2
pub const NEWTON_G: f64 = 6.67e-11;

pub use body::Body;
