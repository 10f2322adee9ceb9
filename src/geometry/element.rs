use crate::{
    foundation::{
        core::{Affine, Point, Rect},
        error::{PanError, PanResult},
        math::normalize_radians,
        validate,
    },
    geometry::object_box::ObjectBox,
};

/// Position, local extent and rotation of a placed element.
///
/// Only the three inputs are stored. Vertices and every box derived from them
/// are recomputed on each read, so they can never go stale.
///
/// Rotation convention: local point `(x, y)` maps to
/// `(x cos a - y sin a, x sin a + y cos a)`, i.e. [`Affine::rotate`]. On a
/// y-down canvas a positive angle turns clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    position: Option<Point>,
    object_box: Option<ObjectBox>,
    angle: Option<f64>,
}

impl Geometry {
    pub fn builder() -> GeometryBuilder {
        GeometryBuilder::default()
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn x(&self) -> Option<f64> {
        self.position.map(|p| p.x)
    }

    pub fn y(&self) -> Option<f64> {
        self.position.map(|p| p.y)
    }

    pub fn object_box(&self) -> Option<ObjectBox> {
        self.object_box
    }

    /// Angle in radians, always within `[0, 2π)` when set.
    pub fn angle(&self) -> Option<f64> {
        self.angle
    }

    pub fn set_position(&mut self, position: Option<Point>) -> PanResult<()> {
        if let Some(p) = position {
            validate::finite(p.x, "position.x")?;
            validate::finite(p.y, "position.y")?;
        }
        self.position = position;
        Ok(())
    }

    /// Parse a position from a dynamic sequence of exactly two numbers.
    pub fn position_from_slice(values: &[f64]) -> PanResult<Point> {
        let [x, y] = validate::fixed_finite::<2>(values, "position")?;
        Ok(Point::new(x, y))
    }

    pub fn set_object_box(&mut self, object_box: Option<ObjectBox>) {
        self.object_box = object_box;
    }

    pub fn set_left(&mut self, v: f64) -> PanResult<()> {
        self.object_box = Some(self.object_box.unwrap_or_default().with_left(v)?);
        Ok(())
    }

    pub fn set_top(&mut self, v: f64) -> PanResult<()> {
        self.object_box = Some(self.object_box.unwrap_or_default().with_top(v)?);
        Ok(())
    }

    pub fn set_right(&mut self, v: f64) -> PanResult<()> {
        self.object_box = Some(self.object_box.unwrap_or_default().with_right(v)?);
        Ok(())
    }

    pub fn set_bottom(&mut self, v: f64) -> PanResult<()> {
        self.object_box = Some(self.object_box.unwrap_or_default().with_bottom(v)?);
        Ok(())
    }

    /// Set the rotation in radians; the stored value is wrapped into `[0, 2π)`.
    pub fn set_angle(&mut self, angle: Option<f64>) -> PanResult<()> {
        self.angle = match angle {
            Some(a) => Some(normalize_radians(validate::finite(a, "angle")?)),
            None => None,
        };
        Ok(())
    }

    pub fn with_position(mut self, position: Point) -> PanResult<Self> {
        self.set_position(Some(position))?;
        Ok(self)
    }

    /// Translate `bx` to `position`, leaving unset edges unset.
    ///
    /// Pure: previews a box at a hypothetical position without touching any element.
    pub fn calculate_absolute_box(position: Point, bx: ObjectBox) -> ObjectBox {
        bx.translate(position.to_vec2())
    }

    fn complete_box(&self) -> PanResult<Rect> {
        let bx = self
            .object_box
            .ok_or_else(|| PanError::missing_geometry("object_box is not set"))?;
        bx.complete()
            .ok_or_else(|| PanError::missing_geometry("object_box has unset edges"))
    }

    fn required_angle(&self) -> PanResult<f64> {
        self.angle
            .ok_or_else(|| PanError::missing_geometry("angle is not set"))
    }

    fn required_position(&self) -> PanResult<Point> {
        self.position
            .ok_or_else(|| PanError::missing_geometry("position is not set"))
    }

    /// Object-box corners (top-left, top-right, bottom-right, bottom-left)
    /// rotated about the local origin.
    pub fn vertices(&self) -> PanResult<[Point; 4]> {
        let r = self.complete_box()?;
        let rot = Affine::rotate(self.required_angle()?);
        Ok([
            rot * Point::new(r.x0, r.y0),
            rot * Point::new(r.x1, r.y0),
            rot * Point::new(r.x1, r.y1),
            rot * Point::new(r.x0, r.y1),
        ])
    }

    pub fn absolute_vertices(&self) -> PanResult<[Point; 4]> {
        let offset = self.required_position()?.to_vec2();
        Ok(self.vertices()?.map(|v| v + offset))
    }

    /// Axis-aligned envelope of [`Self::vertices`], in local coordinates.
    pub fn bounding_box(&self) -> PanResult<Rect> {
        let [first, rest @ ..] = self.vertices()?;
        let mut r = Rect::from_points(first, first);
        for v in rest {
            r = r.union_pt(v);
        }
        Ok(r)
    }

    pub fn absolute_object_box(&self) -> PanResult<ObjectBox> {
        let position = self.required_position()?;
        let bx = self
            .object_box
            .ok_or_else(|| PanError::missing_geometry("object_box is not set"))?;
        Ok(Self::calculate_absolute_box(position, bx))
    }

    pub fn absolute_bounding_box(&self) -> PanResult<Rect> {
        let position = self.required_position()?;
        Ok(self.bounding_box()? + position.to_vec2())
    }

    /// Bounding box this element would have at `position`.
    pub fn bounding_box_at(&self, position: Point) -> PanResult<Rect> {
        Ok(self.bounding_box()? + position.to_vec2())
    }

    pub fn area(&self) -> Option<f64> {
        self.object_box?.area()
    }

    pub fn object_box_size(&self) -> Option<(f64, f64)> {
        self.object_box?.size()
    }

    pub fn bounding_box_size(&self) -> Option<(f64, f64)> {
        let r = self.bounding_box().ok()?;
        Some((r.width(), r.height()))
    }

    /// Local-to-canvas transform: rotate by the angle, then move to the position.
    pub fn to_affine(&self) -> PanResult<Affine> {
        let position = self.required_position()?;
        Ok(Affine::translate(position.to_vec2()) * Affine::rotate(self.required_angle()?))
    }
}

/// Validating builder for [`Geometry`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GeometryBuilder {
    position: Option<Point>,
    object_box: Option<[Option<f64>; 4]>,
    angle: Option<f64>,
}

impl GeometryBuilder {
    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    pub fn object_box(mut self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        self.object_box = Some([Some(left), Some(top), Some(right), Some(bottom)]);
        self
    }

    pub fn partial_box(mut self, edges: [Option<f64>; 4]) -> Self {
        self.object_box = Some(edges);
        self
    }

    pub fn angle(mut self, radians: f64) -> Self {
        self.angle = Some(radians);
        self
    }

    pub fn build(self) -> PanResult<Geometry> {
        let mut g = Geometry::default();
        g.set_position(self.position)?;
        g.set_object_box(self.object_box.map(ObjectBox::partial).transpose()?);
        g.set_angle(self.angle)?;
        Ok(g)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/element.rs"]
mod tests;
