//! The hexagonal padlock badge.
//!
//! A badge is painted hard-edged onto a canvas [`SUPERSAMPLE_FACTOR`] times
//! the requested size and then downscaled with Lanczos3, which is what gives
//! the hexagon edges and the shackle arc their smooth outline.

use crate::palette::{Palette, TRANSPARENT};
use crate::shapes::{
    fill_ellipse, fill_hexagon, fill_rect, fill_rounded_rect, hex_points, stroke_arc,
    stroke_line, BBox,
};
use image::{imageops, imageops::FilterType, Rgba, Rgba32FImage, RgbaImage};
use tracing::debug;

/// Sizes written by a default run.
pub const ICON_SIZES: [u32; 4] = [16, 32, 48, 128];

pub const SUPERSAMPLE_FACTOR: u32 = 4;

/// Smallest size whose hexagon layers still shrink strictly.
pub const MIN_ICON_SIZE: u32 = 16;
/// Largest size rendered; its canvas is 4096² before downscaling.
pub const MAX_ICON_SIZE: u32 = 1024;

/// Smallest icon that gets the first circuit node.
pub const FIRST_NODE_MIN_SIZE: u32 = 32;
/// Smallest icon that gets the second circuit node.
pub const SECOND_NODE_MIN_SIZE: u32 = 48;

// Badge centre sits a little above the middle of the canvas
const CENTER_Y_RATIO: f32 = 0.47;
const BASE_RADIUS_RATIO: f32 = 0.42;
const RING_RATIO: f32 = 0.78;
const ACCENT_RATIO: f32 = 0.72;
const INNER_RING_RATIO: f32 = 0.50;
const CORE_RATIO: f32 = 0.44;
const LOCK_DISC_RATIO: f32 = 0.28;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeStyle {
    pub palette: Palette,
    pub first_node_min_size: u32,
    pub second_node_min_size: u32,
}

impl Default for BadgeStyle {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            first_node_min_size: FIRST_NODE_MIN_SIZE,
            second_node_min_size: SECOND_NODE_MIN_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexLayer {
    pub radius: i32,
    pub color: Rgba<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceDirection {
    Up,
    Right,
}

/// A dot on the badge rim with a short trace leaving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitNode {
    pub x: i32,
    pub y: i32,
    pub outer_radius: i32,
    pub inner_radius: i32,
    pub trace_length: i32,
    pub trace_width: i32,
    pub direction: TraceDirection,
}

/// Every dimension of one render pass, in supersampled canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeLayout {
    pub target_size: u32,
    pub canvas_size: u32,
    pub center: (i32, i32),
    pub base_radius: i32,
    /// Back to front, strictly shrinking
    pub hex_layers: Vec<HexLayer>,
    pub lock_disc_radius: i32,
    pub lock_scale: f32,
    pub circuit_nodes: Vec<CircuitNode>,
}

impl BadgeLayout {
    pub fn new(target_size: u32, style: &BadgeStyle) -> Self {
        let palette = &style.palette;
        let canvas_size = target_size * SUPERSAMPLE_FACTOR;
        let size = canvas_size as f32;

        let cx = (canvas_size / 2) as i32;
        let cy = (size * CENTER_Y_RATIO) as i32;
        let base_radius = (size * BASE_RADIUS_RATIO) as i32;
        let base = base_radius as f32;
        let ring_radius = (base * RING_RATIO) as i32;

        let hex_layers = vec![
            HexLayer {
                radius: base_radius,
                color: palette.primary,
            },
            HexLayer {
                radius: ring_radius,
                color: palette.light,
            },
            HexLayer {
                radius: (base * ACCENT_RATIO) as i32,
                color: palette.accent,
            },
            HexLayer {
                radius: (base * INNER_RING_RATIO) as i32,
                color: palette.light,
            },
            HexLayer {
                radius: (base * CORE_RATIO) as i32,
                color: palette.dark,
            },
        ];

        let lock_scale = base / 100.0;
        let circuit_nodes =
            circuit_nodes(target_size, style, (cx, cy), ring_radius, lock_scale);

        Self {
            target_size,
            canvas_size,
            center: (cx, cy),
            base_radius,
            hex_layers,
            lock_disc_radius: (base * LOCK_DISC_RATIO) as i32,
            lock_scale,
            circuit_nodes,
        }
    }
}

fn circuit_nodes(
    target_size: u32,
    style: &BadgeStyle,
    (cx, cy): (i32, i32),
    ring_radius: i32,
    scale: f32,
) -> Vec<CircuitNode> {
    let mut nodes = Vec::with_capacity(2);
    if target_size < style.first_node_min_size {
        return nodes;
    }

    let rim = hex_points(cx as f32, cy as f32, ring_radius as f32);
    let midpoint = |a: usize, b: usize| {
        (
            ((rim[a].0 + rim[b].0) / 2.0) as i32,
            ((rim[a].1 + rim[b].1) / 2.0) as i32,
        )
    };
    let node = |(x, y): (i32, i32), direction| CircuitNode {
        x,
        y,
        outer_radius: scaled(4.0, scale),
        inner_radius: scaled(2.0, scale),
        trace_length: scaled(10.0, scale),
        trace_width: scaled(2.0, scale).max(1),
        direction,
    };

    // Upper-right edge, trace heading up
    nodes.push(node(midpoint(0, 1), TraceDirection::Up));

    if target_size >= style.second_node_min_size {
        // Right edge, pulled inward, trace heading right
        let (x, y) = midpoint(1, 2);
        nodes.push(node((x - scaled(4.0, scale), y), TraceDirection::Right));
    }

    nodes
}

// Lock and node proportions are truncated like every other integer dimension.
fn scaled(units: f32, scale: f32) -> i32 {
    (units * scale) as i32
}

/// Render the badge at `target_size × target_size`.
pub fn render_badge(target_size: u32, style: &BadgeStyle) -> RgbaImage {
    let layout = BadgeLayout::new(target_size, style);
    debug!(
        target_size,
        canvas_size = layout.canvas_size,
        base_radius = layout.base_radius,
        circuit_nodes = layout.circuit_nodes.len(),
        "rendering badge"
    );

    let canvas = paint(&layout, &style.palette);
    downscale(&canvas, target_size)
}

/// Paint the layout onto a fresh transparent canvas, back to front.
pub fn paint(layout: &BadgeLayout, palette: &Palette) -> RgbaImage {
    let mut canvas =
        RgbaImage::from_pixel(layout.canvas_size, layout.canvas_size, TRANSPARENT);
    let (cx, cy) = layout.center;

    for layer in &layout.hex_layers {
        fill_hexagon(
            &mut canvas,
            cx as f32,
            cy as f32,
            layer.radius as f32,
            layer.color,
        );
    }

    fill_ellipse(
        &mut canvas,
        BBox::around(cx, cy, layout.lock_disc_radius),
        palette.light,
    );

    let scale = layout.lock_scale;
    draw_lock(&mut canvas, cx, cy - scaled(2.0, scale), scale, palette);

    for node in &layout.circuit_nodes {
        draw_circuit_node(&mut canvas, node, palette);
    }

    canvas
}

/// Draw a padlock centred at `(cx, cy)`. All parts are fixed multiples of `scale`.
fn draw_lock(canvas: &mut RgbaImage, cx: i32, cy: i32, scale: f32, palette: &Palette) {
    let shackle_half_width = scaled(6.0, scale);
    let shackle_height = scaled(8.0, scale);
    let stroke = scaled(2.5, scale).max(2);

    // Shackle legs
    fill_rect(
        canvas,
        BBox::new(
            cx - shackle_half_width,
            cy - shackle_height,
            cx - shackle_half_width + stroke,
            cy,
        ),
        palette.light,
    );
    fill_rect(
        canvas,
        BBox::new(
            cx + shackle_half_width - stroke,
            cy - shackle_height,
            cx + shackle_half_width,
            cy,
        ),
        palette.light,
    );

    // Shackle bow
    stroke_arc(
        canvas,
        BBox::new(
            cx - shackle_half_width,
            cy - shackle_height - scaled(2.0, scale),
            cx + shackle_half_width,
            cy - shackle_height + scaled(6.0, scale),
        ),
        180.0,
        0.0,
        stroke,
        palette.light,
    );

    let body_half_width = scaled(8.0, scale);
    fill_rounded_rect(
        canvas,
        BBox::new(
            cx - body_half_width,
            cy - scaled(1.0, scale),
            cx + body_half_width,
            cy + scaled(9.0, scale),
        ),
        scaled(2.0, scale),
        palette.light,
    );

    // Keyhole
    let hole_radius = scaled(2.0, scale);
    let hole_cy = cy + scaled(2.5, scale);
    fill_ellipse(canvas, BBox::around(cx, hole_cy, hole_radius), palette.dark);

    let bar_half_width = scaled(1.0, scale).max(1);
    fill_rect(
        canvas,
        BBox::new(
            cx - bar_half_width,
            hole_cy,
            cx + bar_half_width,
            hole_cy + scaled(3.0, scale),
        ),
        palette.dark,
    );
}

fn draw_circuit_node(canvas: &mut RgbaImage, node: &CircuitNode, palette: &Palette) {
    fill_ellipse(
        canvas,
        BBox::around(node.x, node.y, node.outer_radius),
        palette.light,
    );
    fill_ellipse(
        canvas,
        BBox::around(node.x, node.y, node.inner_radius),
        palette.primary,
    );

    let (x, y, r) = (node.x as f32, node.y as f32, node.outer_radius as f32);
    let length = node.trace_length as f32;
    let (from, to) = match node.direction {
        TraceDirection::Up => ((x, y - r), (x, y - r - length)),
        TraceDirection::Right => ((x + r, y), (x + r + length, y)),
    };
    stroke_line(canvas, from, to, node.trace_width, palette.light);
}

/// Downscale a supersampled canvas with Lanczos3 on premultiplied alpha.
///
/// Premultiplying keeps the transparent surroundings from bleeding black into
/// the badge edge.
pub fn downscale(canvas: &RgbaImage, target_size: u32) -> RgbaImage {
    let premultiplied = Rgba32FImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let [r, g, b, a] = canvas.get_pixel(x, y).0.map(|c| c as f32 / 255.0);
        Rgba([r * a, g * a, b * a, a])
    });

    let resized = imageops::resize(
        &premultiplied,
        target_size,
        target_size,
        FilterType::Lanczos3,
    );

    RgbaImage::from_fn(target_size, target_size, |x, y| {
        let [r, g, b, a] = resized.get_pixel(x, y).0.map(|c| c.clamp(0.0, 1.0));
        let alpha = to_channel(a);
        if alpha == 0 {
            return TRANSPARENT;
        }
        Rgba([to_channel(r / a), to_channel(g / a), to_channel(b / a), alpha])
    })
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
