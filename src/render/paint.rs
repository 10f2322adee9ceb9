use crate::{
    elements::text::{TextContent, TextRasterizer},
    foundation::{
        core::{Affine, FrameRGBA, Point, Rect, Rgba8},
        error::{PanError, PanResult},
    },
    geometry::element::Geometry,
};

/// Drawing capability handed to [`Element::draw`](crate::elements::element::Element::draw).
pub trait Painter {
    /// Draw `image` stretched over the element's object box, rotated and
    /// placed by its geometry.
    fn draw_image(&mut self, geometry: &Geometry, image: &FrameRGBA) -> PanResult<()>;

    fn draw_text(&mut self, geometry: &Geometry, content: &TextContent) -> PanResult<()>;
}

/// CPU painter compositing elements onto an owned RGBA8 canvas with
/// straight-alpha source-over.
pub struct RasterPainter {
    canvas: FrameRGBA,
    text: Option<Box<dyn TextRasterizer>>,
}

impl std::fmt::Debug for RasterPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterPainter")
            .field("width", &self.canvas.width)
            .field("height", &self.canvas.height)
            .field("text", &self.text.is_some())
            .finish()
    }
}

impl RasterPainter {
    pub fn new(canvas: FrameRGBA) -> Self {
        Self { canvas, text: None }
    }

    pub fn with_background(width: u32, height: u32, color: Rgba8) -> Self {
        Self::new(FrameRGBA::filled(width, height, color))
    }

    pub fn with_text_rasterizer(mut self, rasterizer: Box<dyn TextRasterizer>) -> Self {
        self.text = Some(rasterizer);
        self
    }

    pub fn canvas(&self) -> &FrameRGBA {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut FrameRGBA {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> FrameRGBA {
        self.canvas
    }

    /// Composite `src` so that it covers `local` in element space, mapped to
    /// the canvas by `to_canvas`. Nearest-neighbour sampling.
    fn blit(&mut self, to_canvas: Affine, local: Rect, src: &FrameRGBA) -> PanResult<()> {
        if src.is_empty() || local.width() <= 0.0 || local.height() <= 0.0 {
            return Ok(());
        }
        let det = to_canvas.determinant();
        if !det.is_finite() || det.abs() < 1e-12 {
            return Err(PanError::render("element transform is not invertible"));
        }
        let to_local = to_canvas.inverse();

        let corners = [
            Point::new(local.x0, local.y0),
            Point::new(local.x1, local.y0),
            Point::new(local.x1, local.y1),
            Point::new(local.x0, local.y1),
        ]
        .map(|p| to_canvas * p);
        let mut bounds = Rect::from_points(corners[0], corners[0]);
        for c in &corners[1..] {
            bounds = bounds.union_pt(*c);
        }
        let x0 = bounds.x0.floor().max(0.0) as u32;
        let y0 = bounds.y0.floor().max(0.0) as u32;
        let x1 = (bounds.x1.ceil().max(0.0) as u32).min(self.canvas.width);
        let y1 = (bounds.y1.ceil().max(0.0) as u32).min(self.canvas.height);

        let sx = f64::from(src.width) / local.width();
        let sy = f64::from(src.height) / local.height();
        for y in y0..y1 {
            for x in x0..x1 {
                let q = to_local * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if q.x < local.x0 || q.x >= local.x1 || q.y < local.y0 || q.y >= local.y1 {
                    continue;
                }
                let u = (((q.x - local.x0) * sx) as u32).min(src.width - 1);
                let v = (((q.y - local.y0) * sy) as u32).min(src.height - 1);
                let Some(s) = src.pixel(u, v) else {
                    continue;
                };
                if let Some(d) = self.canvas.pixel(x, y) {
                    self.canvas.put_pixel(x, y, over(d, s));
                }
            }
        }
        Ok(())
    }
}

impl Painter for RasterPainter {
    fn draw_image(&mut self, geometry: &Geometry, image: &FrameRGBA) -> PanResult<()> {
        let local = geometry
            .object_box()
            .and_then(|b| b.complete())
            .ok_or_else(|| PanError::missing_geometry("image needs a complete object_box"))?;
        self.blit(geometry.to_affine()?, local, image)
    }

    fn draw_text(&mut self, geometry: &Geometry, content: &TextContent) -> PanResult<()> {
        let Some(rasterizer) = &self.text else {
            tracing::warn!(text = %content.text, "no text rasterizer configured, skipping text");
            return Ok(());
        };
        let stamp = rasterizer.rasterize(content)?;
        self.blit(geometry.to_affine()?, stamp.local, &stamp.pixels)
    }
}

/// Straight-alpha source-over.
pub fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u32::from(src[3]);
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let da = u32::from(dst[3]);
    // Alpha scaled by 255 to keep the division exact until the end.
    let a255 = sa * 255 + da * (255 - sa);
    let mut out = [0u8; 4];
    for i in 0..3 {
        let num = u32::from(src[i]) * sa * 255 + u32::from(dst[i]) * da * (255 - sa);
        out[i] = ((num + a255 / 2) / a255) as u8;
    }
    out[3] = ((a255 + 127) / 255) as u8;
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
