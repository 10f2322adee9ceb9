use smallvec::SmallVec;

use crate::foundation::error::{PanError, PanResult};

type Samples = SmallVec<[f64; 8]>;

/// Shape-preserving piecewise cubic Hermite interpolant (PCHIP).
///
/// Slopes follow Fritsch–Carlson: interior knots take the weighted harmonic
/// mean of the neighbouring secants (zero at local extrema), end knots use a
/// one-sided three-point estimate clamped to keep the curve monotone. Between
/// two knots the curve never leaves the range of their values. Outside the
/// sampled range the boundary value is returned.
#[derive(Clone, Debug, PartialEq)]
pub struct MonotoneCubic {
    xs: Samples,
    ys: Samples,
    slopes: Samples,
}

impl MonotoneCubic {
    /// `xs` must be finite and strictly increasing; `ys` finite and the same length.
    pub fn new(xs: &[f64], ys: &[f64]) -> PanResult<Self> {
        if xs.is_empty() {
            return Err(PanError::validation("interpolant needs at least one sample"));
        }
        if xs.len() != ys.len() {
            return Err(PanError::validation(format!(
                "interpolant has {} times but {} values",
                xs.len(),
                ys.len()
            )));
        }
        if xs.iter().chain(ys).any(|v| !v.is_finite()) {
            return Err(PanError::validation("interpolant samples must be finite"));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PanError::validation(
                "interpolant times must be strictly increasing",
            ));
        }
        Ok(Self::from_sorted(xs, ys))
    }

    /// Caller guarantees the [`Self::new`] preconditions.
    pub(crate) fn from_sorted(xs: &[f64], ys: &[f64]) -> Self {
        let xs: Samples = xs.iter().copied().collect();
        let ys: Samples = ys.iter().copied().collect();
        let slopes = pchip_slopes(&xs, &ys);
        Self { xs, ys, slopes }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn slopes(&self) -> &[f64] {
        &self.slopes
    }

    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();
        // Written so NaN falls into the first branch.
        if !(x > self.xs[0]) {
            return self.ys[0];
        }
        if x >= self.xs[n - 1] {
            return self.ys[n - 1];
        }
        let i = (self.xs.partition_point(|&v| v <= x) - 1).min(n - 2);
        let h = self.xs[i + 1] - self.xs[i];
        let t = (x - self.xs[i]) / h;
        let t2 = t * t;
        let t3 = t2 * t;
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;
        h00 * self.ys[i]
            + h10 * h * self.slopes[i]
            + h01 * self.ys[i + 1]
            + h11 * h * self.slopes[i + 1]
    }
}

fn pchip_slopes(xs: &[f64], ys: &[f64]) -> Samples {
    let n = xs.len();
    if n == 1 {
        return smallvec::smallvec![0.0];
    }
    let h: Samples = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let m: Samples = (0..n - 1).map(|k| (ys[k + 1] - ys[k]) / h[k]).collect();
    if n == 2 {
        return smallvec::smallvec![m[0], m[0]];
    }

    let mut d: Samples = smallvec::smallvec![0.0; n];
    for k in 1..n - 1 {
        let (m0, m1) = (m[k - 1], m[k]);
        if m0 == 0.0 || m1 == 0.0 || m0.signum() != m1.signum() {
            continue;
        }
        let w1 = 2.0 * h[k] + h[k - 1];
        let w2 = h[k] + 2.0 * h[k - 1];
        d[k] = (w1 + w2) / (w1 / m0 + w2 / m1);
    }
    d[0] = edge_slope(h[0], h[1], m[0], m[1]);
    d[n - 1] = edge_slope(h[n - 2], h[n - 3], m[n - 2], m[n - 3]);
    d
}

/// One-sided three-point end slope, clamped to preserve shape.
fn edge_slope(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if sign(d) != sign(m0) {
        0.0
    } else if sign(m0) != sign(m1) && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}

fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Several [`MonotoneCubic`] channels sharing one time axis.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelInterpolant {
    channels: SmallVec<[MonotoneCubic; 2]>,
}

impl ChannelInterpolant {
    /// `rows[i]` holds every channel's value at `times[i]`.
    pub fn new(times: &[f64], rows: &[SmallVec<[f64; 2]>]) -> PanResult<Self> {
        let width = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != width) {
            return Err(PanError::validation("keyframe rows differ in channel count"));
        }
        let channels = (0..width)
            .map(|c| {
                let ys: Samples = rows.iter().map(|r| r[c]).collect();
                MonotoneCubic::new(times, &ys)
            })
            .collect::<PanResult<_>>()?;
        Ok(Self { channels })
    }

    pub(crate) fn from_sorted(times: &[f64], rows: &[SmallVec<[f64; 2]>]) -> Self {
        let width = rows.first().map_or(0, |r| r.len());
        let channels = (0..width)
            .map(|c| {
                let ys: Samples = rows.iter().map(|r| r[c]).collect();
                MonotoneCubic::from_sorted(times, &ys)
            })
            .collect();
        Self { channels }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn eval(&self, t: f64) -> SmallVec<[f64; 2]> {
        self.channels.iter().map(|c| c.eval(t)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
