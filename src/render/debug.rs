//! Overlays for checking layouts by eye: a coordinate grid and element outlines.

use crate::{
    foundation::{
        core::{FrameRGBA, Point, Rect, Rgba8},
        error::{PanError, PanResult},
    },
    render::paint::over,
    scene::artboard::Scene,
};

/// One-pixel grid lines every `spacing` pixels, starting at 0.
pub fn draw_grid(canvas: &mut FrameRGBA, spacing: u32, color: Rgba8) -> PanResult<()> {
    if spacing == 0 {
        return Err(PanError::validation("grid spacing must be > 0"));
    }
    let px = color.to_array();
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            if x % spacing == 0 || y % spacing == 0 {
                blend(canvas, x as i64, y as i64, px);
            }
        }
    }
    Ok(())
}

/// Axis-aligned outline, `thickness` pixels wide, drawn inside `rect`.
pub fn stroke_rect(canvas: &mut FrameRGBA, rect: Rect, color: Rgba8, thickness: u32) {
    let px = color.to_array();
    let t = i64::from(thickness.max(1));
    let (x0, y0) = (rect.x0.floor() as i64, rect.y0.floor() as i64);
    let (x1, y1) = (rect.x1.ceil() as i64, rect.y1.ceil() as i64);
    let (cw, ch) = (i64::from(canvas.width), i64::from(canvas.height));
    for y in y0.max(0)..y1.min(ch) {
        for x in x0.max(0)..x1.min(cw) {
            let edge = x < x0 + t || x >= x1 - t || y < y0 + t || y >= y1 - t;
            if edge {
                blend(canvas, x, y, px);
            }
        }
    }
}

/// Closed polyline through `points`.
pub fn stroke_polygon(canvas: &mut FrameRGBA, points: &[Point], color: Rgba8) {
    let px = color.to_array();
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        stroke_line(canvas, *a, b, px);
    }
}

fn stroke_line(canvas: &mut FrameRGBA, a: Point, b: Point, px: [u8; 4]) {
    let d = b - a;
    let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0) as i64;
    for s in 0..=steps {
        let p = a + d * (s as f64 / steps as f64);
        blend(canvas, p.x.floor() as i64, p.y.floor() as i64, px);
    }
}

fn blend(canvas: &mut FrameRGBA, x: i64, y: i64, px: [u8; 4]) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if let Some(d) = canvas.pixel(x, y) {
        canvas.put_pixel(x, y, over(d, px));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OutlineStyle {
    /// Rotated object box.
    pub object_box: Option<Rgba8>,
    /// Axis-aligned bounding box used for collisions.
    pub bounding_box: Option<Rgba8>,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self {
            object_box: Some(Rgba8::new(0, 160, 255, 255)),
            bounding_box: Some(Rgba8::new(255, 64, 64, 255)),
        }
    }
}

/// Outline every element with complete geometry. Returns how many were drawn.
pub fn outline_elements(canvas: &mut FrameRGBA, scene: &Scene, style: OutlineStyle) -> usize {
    let mut drawn = 0;
    for element in scene.elements() {
        let g = &element.geometry;
        let (Ok(vertices), Ok(bounds)) = (g.absolute_vertices(), g.absolute_bounding_box()) else {
            continue;
        };
        if let Some(c) = style.bounding_box {
            stroke_rect(canvas, bounds, c, 1);
        }
        if let Some(c) = style.object_box {
            stroke_polygon(canvas, &vertices, c);
        }
        drawn += 1;
    }
    drawn
}

#[cfg(test)]
#[path = "../../tests/unit/render/debug.rs"]
mod tests;
