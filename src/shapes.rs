//! Hard-edged raster primitives painted straight onto an RGBA canvas.
//!
//! Coordinates live in pixel space: the centre of pixel `(x, y)` sits at
//! `(x, y)`, and integer bounding boxes include both of their edges. Every
//! primitive overwrites the pixels it covers (there is no blending) and
//! silently clips anything outside the canvas. Smooth edges come from the
//! supersampling step in [`crate::badge`], not from here.

use image::{Rgba, RgbaImage};

/// A point in canvas pixel space.
pub type Point = (f32, f32);

/// Inclusive pixel bounding box covering `x0..=x1` by `y0..=y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BBox {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Square box reaching `radius` pixels out from a centre pixel.
    pub fn around(cx: i32, cy: i32, radius: i32) -> Self {
        Self::new(cx - radius, cy - radius, cx + radius, cy + radius)
    }

    fn center(&self) -> Point {
        (
            (self.x0 + self.x1) as f32 / 2.0,
            (self.y0 + self.y1) as f32 / 2.0,
        )
    }

    // Half of the covered extent, counting the outer half of each edge pixel.
    fn half_extent(&self) -> Point {
        (
            (self.x1 - self.x0) as f32 / 2.0 + 0.5,
            (self.y1 - self.y0) as f32 / 2.0 + 0.5,
        )
    }
}

/// Returns the six vertices of a regular hexagon with vertex 0 pointing up.
///
/// Vertex `i` sits at `60·i − 90` degrees, stepping clockwise on screen.
pub fn hex_points(cx: f32, cy: f32, radius: f32) -> [Point; 6] {
    std::array::from_fn(|i| {
        let angle = (60.0 * i as f32 - 90.0).to_radians();
        (cx + radius * angle.cos(), cy + radius * angle.sin())
    })
}

pub fn fill_hexagon(canvas: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    fill_polygon(canvas, &hex_points(cx, cy, radius), color);
}

/// Fill a polygon using a scanline sweep over pixel centres.
pub fn fill_polygon(canvas: &mut RgbaImage, vertices: &[Point], color: Rgba<u8>) {
    if vertices.len() < 3 {
        return;
    }

    let (min_y, max_y) = vertices
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));

    let width = canvas.width() as i32;
    let height = canvas.height() as i32;
    let y_start = (min_y.ceil() as i32).max(0);
    let y_end = (max_y.floor() as i32).min(height - 1);

    // Reused across scanlines
    let mut crossings: Vec<f32> = Vec::with_capacity(vertices.len());
    let n = vertices.len();

    for y in y_start..=y_end {
        let yf = y as f32;
        crossings.clear();

        for i in 0..n {
            let (x1, y1) = vertices[i];
            let (x2, y2) = vertices[(i + 1) % n];

            // Half-open so a shared vertex is only counted once
            if (y1 <= yf && y2 > yf) || (y2 <= yf && y1 > yf) {
                crossings.push(x1 + (yf - y1) / (y2 - y1) * (x2 - x1));
            }
        }

        crossings.sort_by(|a, b| a.total_cmp(b));
        for span in crossings.chunks_exact(2) {
            let x_start = (span[0].ceil() as i32).max(0);
            let x_end = (span[1].floor() as i32).min(width - 1);
            for x in x_start..=x_end {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

pub fn fill_rect(canvas: &mut RgbaImage, bounds: BBox, color: Rgba<u8>) {
    fill_where(canvas, bounds, color, |_, _| true);
}

/// Fill the ellipse inscribed in `bounds`.
pub fn fill_ellipse(canvas: &mut RgbaImage, bounds: BBox, color: Rgba<u8>) {
    let (cx, cy) = bounds.center();
    let (rx, ry) = bounds.half_extent();

    fill_where(canvas, bounds, color, |x, y| {
        let nx = (x - cx) / rx;
        let ny = (y - cy) / ry;
        nx * nx + ny * ny <= 1.0
    });
}

/// Fill `bounds` with each corner rounded off by a quarter circle of `radius`.
pub fn fill_rounded_rect(canvas: &mut RgbaImage, bounds: BBox, radius: i32, color: Rgba<u8>) {
    let radius = radius
        .min((bounds.x1 - bounds.x0) / 2)
        .min((bounds.y1 - bounds.y0) / 2)
        .max(0);
    let limit = (radius as f32 + 0.5).powi(2);

    // Corner circle centres
    let left = (bounds.x0 + radius) as f32;
    let right = (bounds.x1 - radius) as f32;
    let top = (bounds.y0 + radius) as f32;
    let bottom = (bounds.y1 - radius) as f32;

    fill_where(canvas, bounds, color, |x, y| {
        let dx = (left - x).max(x - right).max(0.0);
        let dy = (top - y).max(y - bottom).max(0.0);
        dx * dx + dy * dy <= limit
    });
}

/// Stroke the segment `from → to` with butt ends.
///
/// The stroke covers exactly `width` pixels across an axis-aligned segment.
pub fn stroke_line(canvas: &mut RgbaImage, from: Point, to: Point, width: i32, color: Rgba<u8>) {
    let (x0, y0) = from;
    let (dx, dy) = (to.0 - x0, to.1 - y0);
    let length_sq = dx * dx + dy * dy;
    if length_sq <= f32::EPSILON || width <= 0 {
        return;
    }

    let length = length_sq.sqrt();
    let half = width as f32 / 2.0;
    let bounds = BBox::new(
        (x0.min(to.0) - half).floor() as i32,
        (y0.min(to.1) - half).floor() as i32,
        (x0.max(to.0) + half).ceil() as i32,
        (y0.max(to.1) + half).ceil() as i32,
    );

    fill_where(canvas, bounds, color, |x, y| {
        let along = ((x - x0) * dx + (y - y0) * dy) / length_sq;
        let across = ((x - x0) * dy - (y - y0) * dx) / length;
        (0.0..=1.0).contains(&along) && across >= -half && across < half
    });
}

/// Stroke part of the ellipse inscribed in `bounds`, `width` pixels inward.
///
/// Angles are in degrees, measured clockwise from 3 o'clock. The arc runs
/// from `start` to `end`, wrapping through 360 when `end <= start`.
pub fn stroke_arc(
    canvas: &mut RgbaImage,
    bounds: BBox,
    start: f32,
    end: f32,
    width: i32,
    color: Rgba<u8>,
) {
    let (cx, cy) = bounds.center();
    let (rx, ry) = bounds.half_extent();
    let (inner_rx, inner_ry) = (rx - width as f32, ry - width as f32);
    let start = start.rem_euclid(360.0);
    let mut end = end.rem_euclid(360.0);
    if end <= start {
        end += 360.0;
    }

    fill_where(canvas, bounds, color, |x, y| {
        let (px, py) = (x - cx, y - cy);
        let outer = (px / rx).powi(2) + (py / ry).powi(2) <= 1.0;
        let inner = inner_rx > 0.0
            && inner_ry > 0.0
            && (px / inner_rx).powi(2) + (py / inner_ry).powi(2) < 1.0;
        if !outer || inner {
            return false;
        }

        let mut angle = py.atan2(px).to_degrees().rem_euclid(360.0);
        if angle < start {
            angle += 360.0;
        }
        angle <= end
    });
}

// Paint every pixel of `bounds` (clipped to the canvas) whose centre passes `covers`.
fn fill_where<F>(canvas: &mut RgbaImage, bounds: BBox, color: Rgba<u8>, covers: F)
where
    F: Fn(f32, f32) -> bool,
{
    let x_start = bounds.x0.max(0);
    let y_start = bounds.y0.max(0);
    let x_end = bounds.x1.min(canvas.width() as i32 - 1);
    let y_end = bounds.y1.min(canvas.height() as i32 - 1);

    for y in y_start..=y_end {
        for x in x_start..=x_end {
            if covers(x as f32, y as f32) {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Rgba<u8> = Rgba([10, 20, 30, 255]);

    fn painted(canvas: &RgbaImage) -> usize {
        canvas.pixels().filter(|p| p[3] != 0).count()
    }

    #[test]
    fn hexagon_vertex_zero_points_up() {
        let points = hex_points(0.0, 0.0, 10.0);
        assert!(points[0].0.abs() < 1e-4);
        assert!((points[0].1 + 10.0).abs() < 1e-4);
    }

    #[test]
    fn hexagon_vertices_are_equidistant() {
        for (x, y) in hex_points(0.0, 0.0, 37.5) {
            assert!(((x * x + y * y).sqrt() - 37.5).abs() < 1e-3);
        }
    }

    #[test]
    fn hexagon_steps_clockwise_from_top() {
        let points = hex_points(50.0, 50.0, 20.0);
        // Vertex 1 is upper right, vertex 3 is straight down
        assert!(points[1].0 > 50.0 && points[1].1 < 50.0);
        assert!((points[3].0 - 50.0).abs() < 1e-3);
        assert!((points[3].1 - 70.0).abs() < 1e-3);
    }

    #[test]
    fn filled_hexagon_covers_center_not_corners() {
        let mut canvas = RgbaImage::new(40, 40);
        fill_hexagon(&mut canvas, 20.0, 20.0, 15.0, INK);
        assert_eq!(*canvas.get_pixel(20, 20), INK);
        assert_eq!(*canvas.get_pixel(20, 6), INK);
        assert_eq!(canvas.get_pixel(0, 0)[3], 0);
        assert_eq!(canvas.get_pixel(39, 39)[3], 0);
        // Pointy top leaves the upper-left area empty
        assert_eq!(canvas.get_pixel(8, 8)[3], 0);
    }

    #[test]
    fn rect_is_clipped_to_canvas() {
        let mut canvas = RgbaImage::new(4, 4);
        fill_rect(&mut canvas, BBox::new(-5, -5, 2, 2), INK);
        assert_eq!(painted(&canvas), 9);
    }

    #[test]
    fn shapes_fully_outside_are_ignored() {
        let mut canvas = RgbaImage::new(8, 8);
        fill_rect(&mut canvas, BBox::new(20, 20, 30, 30), INK);
        fill_ellipse(&mut canvas, BBox::around(-10, -10, 3), INK);
        fill_hexagon(&mut canvas, -50.0, 4.0, 10.0, INK);
        assert_eq!(painted(&canvas), 0);
    }

    #[test]
    fn ellipse_pixel_counts() {
        let mut canvas = RgbaImage::new(11, 11);
        fill_ellipse(&mut canvas, BBox::around(5, 5, 0), INK);
        assert_eq!(painted(&canvas), 1);

        let mut canvas = RgbaImage::new(11, 11);
        fill_ellipse(&mut canvas, BBox::around(5, 5, 2), INK);
        assert_eq!(painted(&canvas), 21);
    }

    #[test]
    fn rounded_rect_trims_corners() {
        let mut canvas = RgbaImage::new(10, 10);
        fill_rounded_rect(&mut canvas, BBox::new(0, 0, 9, 9), 3, INK);
        assert_eq!(canvas.get_pixel(0, 0)[3], 0);
        assert_eq!(canvas.get_pixel(9, 9)[3], 0);
        assert_eq!(*canvas.get_pixel(0, 5), INK);
        assert_eq!(*canvas.get_pixel(5, 5), INK);
    }

    #[test]
    fn line_width_is_exact() {
        let mut canvas = RgbaImage::new(12, 12);
        stroke_line(&mut canvas, (2.0, 5.0), (8.0, 5.0), 2, INK);
        assert_eq!(painted(&canvas), 14);

        let mut canvas = RgbaImage::new(12, 12);
        stroke_line(&mut canvas, (4.0, 9.0), (4.0, 1.0), 1, INK);
        assert_eq!(painted(&canvas), 9);
        assert!((1..=9).all(|y| *canvas.get_pixel(4, y) == INK));
    }

    #[test]
    fn zero_length_line_draws_nothing() {
        let mut canvas = RgbaImage::new(6, 6);
        stroke_line(&mut canvas, (3.0, 3.0), (3.0, 3.0), 2, INK);
        assert_eq!(painted(&canvas), 0);
    }

    #[test]
    fn arc_from_180_to_0_is_the_top_half() {
        let mut canvas = RgbaImage::new(21, 21);
        stroke_arc(&mut canvas, BBox::around(10, 10, 8), 180.0, 0.0, 2, INK);
        assert_eq!(*canvas.get_pixel(10, 2), INK);
        assert_eq!(*canvas.get_pixel(2, 10), INK);
        assert_eq!(*canvas.get_pixel(18, 10), INK);
        assert_eq!(canvas.get_pixel(10, 18)[3], 0);
        // Stroke goes inward only
        assert_eq!(canvas.get_pixel(10, 10)[3], 0);
        assert_eq!(canvas.get_pixel(10, 6)[3], 0);
    }
}
