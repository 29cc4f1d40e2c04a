//! Drawing surfaces the simulation can render onto.
//!
//! The physics never talks to a display directly. It only sees a [Canvas],
//! which can be a real window ([WindowCanvas]), an image on disk
//! ([PlotCanvas]), or nothing at all ([NullCanvas]).

use nalgebra::Point2;

use std::time::Duration;

mod plot;
mod window;

pub use plot::PlotCanvas;
pub use window::WindowCanvas;

pub trait Canvas {
    /// Sets the visible region to the square [-radius, radius] on both axes.
    fn set_scale(&mut self, radius: f64);

    /// Called once at the start of every frame, before any body is drawn.
    fn draw_background(&mut self) {}

    fn draw(&mut self, position: &Point2<f64>, label: &str);

    /// Finishes the current frame, then waits for `delay`.
    fn present(&mut self, delay: Duration);
}

/// A canvas that throws everything away.
#[derive(Debug, Default)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn set_scale(&mut self, _: f64) {}

    fn draw(&mut self, _: &Point2<f64>, _: &str) {}

    fn present(&mut self, _: Duration) {}
}

/// A canvas that remembers what it was asked to draw, without ever sleeping.
///
/// Meant for headless checks of what a run renders. It keeps every position
/// drawn over the whole run, so it is not suited to long interactive runs.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub radius: Option<f64>,
    pub drawn: Vec<(Point2<f64>, String)>,
    pub backgrounds: usize,
    pub frames: usize,
}

impl Canvas for RecordingCanvas {
    fn set_scale(&mut self, radius: f64) {
        self.radius = Some(radius);
    }

    fn draw_background(&mut self) {
        self.backgrounds += 1;
    }

    fn draw(&mut self, position: &Point2<f64>, label: &str) {
        self.drawn.push((*position, label.to_owned()));
    }

    fn present(&mut self, _: Duration) {
        self.frames += 1;
    }
}
