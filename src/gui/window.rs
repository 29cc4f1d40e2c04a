use kiss3d::scene::PlanarSceneNode;
use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Translation2};

use std::path::Path;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use super::Canvas;

const BODY_SIZE: f32 = 6.0;
const FRAME_COLOR: [f32; 3] = [0.3, 0.3, 0.3];
const LABEL_SIZE: f32 = 30.0;
const LABEL_COLOR: [f32; 3] = [0.8, 0.8, 0.8];
const BODY_COLORS: [[f32; 3]; 6] = [
    [0.35, 0.55, 1.0],
    [1.0, 0.45, 0.3],
    [0.75, 0.75, 0.75],
    [1.0, 0.9, 0.3],
    [0.95, 0.75, 0.45],
    [0.5, 0.9, 0.6],
];

/// Animates bodies in a kiss3d window.
///
/// Every body is a flat circle. Circles are handed out in draw order, so the
/// nth body drawn in a frame reuses the nth circle from the previous frame.
/// Each circle is captioned with its body's label, minus any file extension.
pub struct WindowCanvas {
    window: Window,
    font: Rc<Font>,
    circles: Vec<PlanarSceneNode>,
    next_circle: usize,
    radius: f64,
    open: bool,
}

impl WindowCanvas {
    pub fn new(title: &str, size: u32) -> Self {
        let mut window = Window::new_with_size(title, size, size);
        window.set_background_color(0.0, 0.0, 0.0);

        WindowCanvas {
            window,
            font: Font::default(),
            circles: Vec::new(),
            next_circle: 0,
            radius: 1.0,
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    // Pixels per simulation unit, so that [-radius, radius] fits the smaller
    // side of the window.
    fn pixels_per_unit(&self) -> f64 {
        let side = self.window.width().min(self.window.height()) as f64;
        side / 2.0 / self.radius
    }

    fn to_screen(&self, position: &Point2<f64>) -> Point2<f32> {
        let scale = self.pixels_per_unit();
        Point2::new((position.x * scale) as f32, (position.y * scale) as f32)
    }

    fn circle(&mut self, index: usize) -> &mut PlanarSceneNode {
        while self.circles.len() <= index {
            let [r, g, b] = BODY_COLORS[self.circles.len() % BODY_COLORS.len()];
            let mut circle = self.window.add_circle(BODY_SIZE);
            circle.set_color(r, g, b);
            self.circles.push(circle);
        }
        &mut self.circles[index]
    }
}

impl Canvas for WindowCanvas {
    fn set_scale(&mut self, radius: f64) {
        self.radius = radius.abs();
    }

    fn draw_background(&mut self) {
        if !self.open {
            return;
        }

        // Outline of the visible region
        let corners = [
            Point2::new(-self.radius, -self.radius),
            Point2::new(self.radius, -self.radius),
            Point2::new(self.radius, self.radius),
            Point2::new(-self.radius, self.radius),
        ];
        let color = Point3::from(FRAME_COLOR);
        for (i, start) in corners.iter().enumerate() {
            let end = corners[(i + 1) % corners.len()];
            let (start, end) = (self.to_screen(start), self.to_screen(&end));
            self.window.draw_planar_line(&start, &end, &color);
        }
    }

    fn draw(&mut self, position: &Point2<f64>, label: &str) {
        if !self.open {
            return;
        }

        let screen = self.to_screen(position);
        let index = self.next_circle;
        self.next_circle += 1;
        self.circle(index)
            .set_local_translation(Translation2::new(screen.x, screen.y));

        let anchor = text_anchor(
            &screen,
            self.window.width(),
            self.window.height(),
            self.window.scale_factor() as f32,
        );
        self.window.draw_text(
            caption(label),
            &anchor,
            LABEL_SIZE,
            &self.font,
            &Point3::from(LABEL_COLOR),
        );
    }

    fn present(&mut self, delay: Duration) {
        self.next_circle = 0;
        if !self.open {
            return;
        }

        if !self.window.render() {
            tracing::info!("window closed; continuing without rendering");
            self.open = false;
            return;
        }
        thread::sleep(delay);
    }
}

fn caption(label: &str) -> &str {
    Path::new(label)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(label)
}

// Planar scene coordinates are centered with y up; text is placed in physical
// pixels from the top left corner. The caption sits just right of the circle.
fn text_anchor(screen: &Point2<f32>, width: u32, height: u32, scale_factor: f32) -> Point2<f32> {
    let x = width as f32 / 2.0 + screen.x + BODY_SIZE;
    let y = height as f32 / 2.0 - screen.y;
    Point2::new(x * scale_factor, y * scale_factor)
}
