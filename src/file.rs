use nalgebra::{Point2, Vector2};
use thiserror::Error;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::SplitAsciiWhitespace;

use crate::astro::Body;
use crate::model::Universe;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input ended early, expected {what}")]
    MissingToken { what: String },

    #[error("could not parse {what} from {token:?}")]
    InvalidNumber { what: String, token: String },

    #[error("{what} must be finite, got {value}")]
    NonFinite { what: String, value: f64 },

    #[error("body {name:?} must have a positive mass, got {mass}")]
    NonPositiveMass { name: String, mass: f64 },

    #[error("bodies {first:?} and {second:?} start at the same position")]
    CoincidentBodies { first: String, second: String },
}

/// Reads a universe from a file. The format is a whitespace-separated list of
/// tokens; line breaks carry no meaning:
///
/// ```text
/// <number of bodies>
/// <display radius>
/// <x> <y> <x velocity> <y velocity> <mass> <label>    (once per body)
/// ```
pub fn read_file(filename: impl AsRef<Path>) -> Result<Universe, LoadError> {
    let path = filename.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;

    let universe = parse_universe(&contents)?;
    tracing::info!(
        path = %path.display(),
        bodies = universe.bodies.len(),
        radius = universe.radius,
        "loaded universe"
    );
    Ok(universe)
}

/// Reads only the display radius, without loading any bodies.
pub fn read_radius(filename: impl AsRef<Path>) -> Result<f64, LoadError> {
    let path = filename.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;

    let mut tokens = Tokens::new(&contents);
    tokens.next_count("body count")?;
    tokens.next_f64("radius")
}

pub fn parse_universe(contents: &str) -> Result<Universe, LoadError> {
    let mut tokens = Tokens::new(contents);

    let count = tokens.next_count("body count")?;
    let radius = tokens.next_f64("radius")?;

    // The count is untrusted; bodies are only stored once they have been read.
    let mut bodies: Vec<Body> = Vec::new();
    for i in 0..count {
        let body = tokens.next_body(i)?;
        if body.mass() <= 0.0 {
            return Err(LoadError::NonPositiveMass {
                name: body.name().to_owned(),
                mass: body.mass(),
            });
        }
        if let Some(other) = bodies.iter().find(|other| other.position() == body.position()) {
            return Err(LoadError::CoincidentBodies {
                first: other.name().to_owned(),
                second: body.name().to_owned(),
            });
        }
        bodies.push(body);
    }

    let leftover = tokens.remaining();
    if leftover > 0 {
        tracing::warn!(leftover, "ignoring tokens after the last body");
    }

    Ok(Universe { radius, bodies })
}

struct Tokens<'a> {
    fields: SplitAsciiWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(contents: &'a str) -> Self {
        Tokens {
            fields: contents.split_ascii_whitespace(),
        }
    }

    fn next_string(&mut self, what: &str) -> Result<&'a str, LoadError> {
        self.fields.next().ok_or_else(|| LoadError::MissingToken {
            what: what.to_owned(),
        })
    }

    fn next_count(&mut self, what: &str) -> Result<usize, LoadError> {
        let token = self.next_string(what)?;
        token.parse().map_err(|_| LoadError::InvalidNumber {
            what: what.to_owned(),
            token: token.to_owned(),
        })
    }

    fn next_f64(&mut self, what: &str) -> Result<f64, LoadError> {
        let token = self.next_string(what)?;
        let value: f64 = token.parse().map_err(|_| LoadError::InvalidNumber {
            what: what.to_owned(),
            token: token.to_owned(),
        })?;

        if !value.is_finite() {
            return Err(LoadError::NonFinite {
                what: what.to_owned(),
                value,
            });
        }
        Ok(value)
    }

    fn next_body(&mut self, index: usize) -> Result<Body, LoadError> {
        let what = |field: &str| format!("{} of body {}", field, index);

        let x = self.next_f64(&what("x position"))?;
        let y = self.next_f64(&what("y position"))?;
        let vx = self.next_f64(&what("x velocity"))?;
        let vy = self.next_f64(&what("y velocity"))?;
        let mass = self.next_f64(&what("mass"))?;
        let name = self.next_string(&what("label"))?;

        Ok(Body::new(
            Point2::new(x, y),
            Vector2::new(vx, vy),
            mass,
            name,
        ))
    }

    fn remaining(self) -> usize {
        self.fields.count()
    }
}
