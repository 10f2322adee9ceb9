use rayon::prelude::*;

use crate::foundation::{
    core::{Affine, FrameRGBA, Point, Resolution},
    error::{PanError, PanResult},
};

/// Warps a source buffer into an output frame.
///
/// `transform` maps source coordinates to output coordinates; implementations
/// invert it to find the source sample for every output pixel.
pub trait Resampler: Send + Sync {
    fn sample(&self, src: &FrameRGBA, transform: Affine, out: Resolution) -> PanResult<FrameRGBA>;
}

/// Bilinear filtering with mirrored borders (`cba|abc|cba`), so samples
/// outside the source repeat nearby content instead of going black.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BilinearReflect {
    /// Resample rows on the rayon pool.
    pub parallel_rows: bool,
}

impl Default for BilinearReflect {
    fn default() -> Self {
        Self {
            parallel_rows: true,
        }
    }
}

impl Resampler for BilinearReflect {
    fn sample(&self, src: &FrameRGBA, transform: Affine, out: Resolution) -> PanResult<FrameRGBA> {
        if src.is_empty() {
            return Err(PanError::render("cannot resample an empty source"));
        }
        let det = transform.determinant();
        if !det.is_finite() || det.abs() < 1e-12 {
            return Err(PanError::render(format!(
                "camera transform is not invertible (determinant {det})"
            )));
        }
        let inv = transform.inverse();
        let width = out.width() as usize;
        let mut data = vec![0u8; out.pixel_count() * 4];

        let fill_row = |(y, row): (usize, &mut [u8])| {
            for x in 0..width {
                let p = inv * Point::new(x as f64, y as f64);
                let px = bilinear_reflect(src, p);
                row[x * 4..x * 4 + 4].copy_from_slice(&px);
            }
        };
        if self.parallel_rows {
            data.par_chunks_mut(width * 4).enumerate().for_each(fill_row);
        } else {
            data.chunks_mut(width * 4).enumerate().for_each(fill_row);
        }
        FrameRGBA::new(out.width(), out.height(), data)
    }
}

/// Mirror an index into `[0, n)`, repeating the edge pixel.
pub(crate) fn reflect(i: i64, n: i64) -> usize {
    let period = 2 * n;
    let m = i.rem_euclid(period);
    let m = if m < n { m } else { period - 1 - m };
    m as usize
}

fn bilinear_reflect(src: &FrameRGBA, p: Point) -> [u8; 4] {
    let (w, h) = (i64::from(src.width), i64::from(src.height));
    let fx = p.x.floor();
    let fy = p.y.floor();
    let tx = p.x - fx;
    let ty = p.y - fy;
    let (x0, y0) = (fx as i64, fy as i64);

    let xs = [reflect(x0, w), reflect(x0.saturating_add(1), w)];
    let ys = [reflect(y0, h), reflect(y0.saturating_add(1), h)];
    let stride = src.width as usize * 4;
    let at = |x: usize, y: usize, c: usize| f64::from(src.data[y * stride + x * 4 + c]);

    let mut out = [0u8; 4];
    for (c, slot) in out.iter_mut().enumerate() {
        let top = at(xs[0], ys[0], c) * (1.0 - tx) + at(xs[1], ys[0], c) * tx;
        let bottom = at(xs[0], ys[1], c) * (1.0 - tx) + at(xs[1], ys[1], c) * tx;
        let v = top * (1.0 - ty) + bottom * ty;
        *slot = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/resample.rs"]
mod tests;
