use crate::foundation::{
    core::{Rect, Vec2},
    error::PanResult,
    validate,
};

/// An axis-aligned box whose edges may be individually unset.
///
/// Whenever both edges of a pair are set the box keeps `left <= right` and
/// `top <= bottom`, swapping on write instead of rejecting input. Unset edges
/// survive every operation unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ObjectBox {
    left: Option<f64>,
    top: Option<f64>,
    right: Option<f64>,
    bottom: Option<f64>,
}

impl ObjectBox {
    /// A fully populated box. Non-finite edges are rejected.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> PanResult<Self> {
        Self::partial([Some(left), Some(top), Some(right), Some(bottom)])
    }

    /// A box from `[left, top, right, bottom]` where any edge may be unset.
    pub fn partial(edges: [Option<f64>; 4]) -> PanResult<Self> {
        let edges = validate::fixed_optional::<4>(&edges, "object box")?;
        Ok(Self::normalized(edges))
    }

    /// A box from a dynamically sized sequence; anything but four entries fails.
    pub fn from_slice(edges: &[Option<f64>]) -> PanResult<Self> {
        let edges = validate::fixed_optional::<4>(edges, "object box")?;
        Ok(Self::normalized(edges))
    }

    fn normalized([left, top, right, bottom]: [Option<f64>; 4]) -> Self {
        let (left, right) = ordered(left, right);
        let (top, bottom) = ordered(top, bottom);
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn left(&self) -> Option<f64> {
        self.left
    }

    pub fn top(&self) -> Option<f64> {
        self.top
    }

    pub fn right(&self) -> Option<f64> {
        self.right
    }

    pub fn bottom(&self) -> Option<f64> {
        self.bottom
    }

    pub fn edges(&self) -> [Option<f64>; 4] {
        [self.left, self.top, self.right, self.bottom]
    }

    pub fn with_left(self, v: f64) -> PanResult<Self> {
        Self::partial([Some(v), self.top, self.right, self.bottom])
    }

    pub fn with_top(self, v: f64) -> PanResult<Self> {
        Self::partial([self.left, Some(v), self.right, self.bottom])
    }

    pub fn with_right(self, v: f64) -> PanResult<Self> {
        Self::partial([self.left, self.top, Some(v), self.bottom])
    }

    pub fn with_bottom(self, v: f64) -> PanResult<Self> {
        Self::partial([self.left, self.top, self.right, Some(v)])
    }

    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }

    /// The box as a [`Rect`] when all four edges are set.
    pub fn complete(&self) -> Option<Rect> {
        Some(Rect::new(self.left?, self.top?, self.right?, self.bottom?))
    }

    /// Shift every set edge by `offset`.
    pub fn translate(self, offset: Vec2) -> Self {
        Self {
            left: self.left.map(|v| v + offset.x),
            top: self.top.map(|v| v + offset.y),
            right: self.right.map(|v| v + offset.x),
            bottom: self.bottom.map(|v| v + offset.y),
        }
    }

    /// Grow each set edge outward by `amount`. A negative amount shrinks the box;
    /// shrinking past a pair's midpoint swaps that pair.
    pub fn inflate(self, amount: f64) -> PanResult<Self> {
        let amount = validate::finite(amount, "inflate amount")?;
        Self::partial([
            self.left.map(|v| v - amount),
            self.top.map(|v| v - amount),
            self.right.map(|v| v + amount),
            self.bottom.map(|v| v + amount),
        ])
    }

    pub fn size(&self) -> Option<(f64, f64)> {
        let r = self.complete()?;
        Some((r.width(), r.height()))
    }

    pub fn area(&self) -> Option<f64> {
        self.size().map(|(w, h)| w * h)
    }
}

impl From<Rect> for ObjectBox {
    fn from(r: Rect) -> Self {
        Self::normalized([Some(r.x0), Some(r.y0), Some(r.x1), Some(r.y1)])
    }
}

fn ordered(lo: Option<f64>, hi: Option<f64>) -> (Option<f64>, Option<f64>) {
    match (lo, hi) {
        (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/object_box.rs"]
mod tests;
