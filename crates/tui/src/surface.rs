use ratatui::style::Color;
use tabpip_protocol::{Point, Size};

/// Colour bars across the top two thirds (75% SMPTE order).
const BARS: [(u8, u8, u8); 7] = [
    (191, 191, 191),
    (191, 191, 0),
    (0, 191, 191),
    (0, 191, 0),
    (191, 0, 191),
    (191, 0, 0),
    (0, 0, 191),
];

/// Number of checker cells across the bottom strip.
const CHECKER_COLUMNS: f64 = 16.0;

/// Synthetic stand-in for a captured video frame.
///
/// Colour bars on top and a checkerboard below, with a one-pixel white
/// border so the edges are visible while panning.
#[derive(Debug, Clone, Copy)]
pub struct TestCard {
    size: Size,
}

impl TestCard {
    pub fn new(size: Size) -> Self {
        Self { size }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Colour at a surface pixel, or `None` outside the frame.
    pub fn color_at(&self, p: Point) -> Option<Color> {
        let Size { width, height } = self.size;
        if p.x < 0.0 || p.y < 0.0 || p.x >= width || p.y >= height {
            return None;
        }
        if p.x < 1.0 || p.y < 1.0 || p.x >= width - 1.0 || p.y >= height - 1.0 {
            return Some(Color::White);
        }

        if p.y < height * 2.0 / 3.0 {
            let idx = ((p.x / width) * BARS.len() as f64) as usize;
            let (r, g, b) = BARS[idx.min(BARS.len() - 1)];
            return Some(Color::Rgb(r, g, b));
        }

        let cell = width / CHECKER_COLUMNS;
        let col = (p.x / cell) as u64;
        let row = ((p.y - height * 2.0 / 3.0) / cell) as u64;
        Some(if (col + row) % 2 == 0 {
            Color::Rgb(235, 235, 235)
        } else {
            Color::Rgb(16, 16, 16)
        })
    }
}

/// Map an untransformed layout point in the container to a surface pixel,
/// with the surface letterboxed the way `object-fit: contain` places it.
pub fn layout_to_surface(layout: Point, container: Size, surface: Size) -> Point {
    let fit = (container.width / surface.width).min(container.height / surface.height);
    let origin_x = (container.width - surface.width * fit) / 2.0;
    let origin_y = (container.height - surface.height * fit) / 2.0;
    Point::new((layout.x - origin_x) / fit, (layout.y - origin_y) / fit)
}
