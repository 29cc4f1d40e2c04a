use nalgebra::Point2;
use plotters::prelude::*;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::Canvas;

#[derive(Debug)]
struct Trail {
    label: String,
    points: Vec<(f64, f64)>,
}

/// Collects every body's path over the run and draws them all into one PNG.
///
/// Bodies are matched across frames by draw order, which is stable because
/// the set of bodies never changes during a run.
#[derive(Debug)]
pub struct PlotCanvas {
    path: PathBuf,
    size: u32,
    radius: f64,
    trails: Vec<Trail>,
    next_trail: usize,
    frames: usize,
}

impl PlotCanvas {
    pub fn new(path: impl AsRef<Path>, size: u32) -> Self {
        PlotCanvas {
            path: path.as_ref().to_owned(),
            size,
            radius: 1.0,
            trails: Vec::new(),
            next_trail: 0,
            frames: 0,
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        let root = BitMapBackend::new(&self.path, (self.size, self.size)).into_drawing_area();
        root.fill(&BLACK)?;

        let r = self.radius;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .build_cartesian_2d(-r..r, -r..r)?;

        for (i, trail) in self.trails.iter().enumerate() {
            let color = Palette99::pick(i).to_rgba();

            chart
                .draw_series(LineSeries::new(trail.points.iter().copied(), &color))?
                .label(trail.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));

            if let Some(&last) = trail.points.last() {
                chart.draw_series(std::iter::once(Circle::new(last, 4, color.filled())))?;
            }
        }

        chart
            .configure_series_labels()
            .background_style(&BLACK)
            .border_style(&WHITE)
            .label_font(("sans-serif", 12).into_font().color(&WHITE))
            .draw()?;

        root.present()?;
        tracing::info!(path = %self.path.display(), frames = self.frames, "wrote trajectory plot");
        Ok(())
    }
}

impl Canvas for PlotCanvas {
    fn set_scale(&mut self, radius: f64) {
        self.radius = radius.abs();
    }

    fn draw(&mut self, position: &Point2<f64>, label: &str) {
        if self.trails.len() <= self.next_trail {
            self.trails.push(Trail {
                label: label.to_owned(),
                points: Vec::new(),
            });
        }
        self.trails[self.next_trail]
            .points
            .push((position.x, position.y));
        self.next_trail += 1;
    }

    // Nothing is shown until `save`, so there is nothing to wait for.
    fn present(&mut self, _: Duration) {
        self.next_trail = 0;
        self.frames += 1;
    }
}
