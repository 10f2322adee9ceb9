use std::path::Path;

use rand::Rng;

use crate::{
    elements::element::{Element, ElementKind},
    foundation::{
        cancel::CancelToken,
        core::{Point, Rect, Vec2},
        error::{PanError, PanResult},
        validate,
    },
    render::paint::Painter,
};

/// Index of an element inside its [`Scene`]. Order is z-order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub usize);

/// Result of a retry-based placement.
///
/// Running out of attempts is an ordinary outcome, not an error; the
/// element keeps whatever position it had before the call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlacementOutcome {
    Placed(Point),
    Exhausted { attempts: u32 },
}

impl PlacementOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed(_))
    }

    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Placed(p) => Some(*p),
            Self::Exhausted { .. } => None,
        }
    }
}

/// Options for [`Scene::move_random`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RandomPlacement {
    /// Keep the element's object box inside the artboard, shrunk by `artboard_margin`.
    pub constrain_to_artboard: bool,
    pub artboard_margin: f64,
    /// Reject candidates whose bounding box touches another element.
    pub collision: bool,
    /// Restrict the collision scan to these elements. `None` scans the whole scene.
    pub among: Option<Vec<ElementId>>,
    pub minimum_distance: f64,
    pub max_attempts: u32,
}

impl Default for RandomPlacement {
    fn default() -> Self {
        Self {
            constrain_to_artboard: false,
            artboard_margin: 0.0,
            collision: false,
            among: None,
            minimum_distance: 0.0,
            max_attempts: 100,
        }
    }
}

/// Options for [`Scene::move_next`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NextPlacement {
    /// Element to search around. Defaults to the one just before the moved element.
    pub reference: Option<ElementId>,
    /// Fixed search direction in degrees. `None` picks a fresh direction per attempt.
    pub angle: Option<f64>,
    pub minimum_distance: f64,
    /// Require the whole bounding box to stay on the artboard.
    pub within_bounds_strict: bool,
    pub artboard_margin: f64,
    /// Defaults to `max(width, height)`.
    pub max_attempts: Option<u32>,
}

impl Default for NextPlacement {
    fn default() -> Self {
        Self {
            reference: None,
            angle: None,
            minimum_distance: 0.0,
            within_bounds_strict: true,
            artboard_margin: 0.0,
            max_attempts: None,
        }
    }
}

/// The artboard: fixed dimensions and an ordered list of owned elements.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub(crate) width: u32,
    pub(crate) height: u32,
    #[serde(default)]
    pub(crate) elements: Vec<Element>,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + use<> {
        (0..self.elements.len()).map(ElementId)
    }

    /// `(0, 0, width, height)`.
    pub fn artboard_box(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    pub fn add_element(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    /// The topmost element that has a position, a usable [`NextPlacement::reference`]
    /// when the preceding element could not be placed.
    pub fn last_positioned(&self) -> Option<ElementId> {
        self.elements
            .iter()
            .rposition(|e| e.geometry.position().is_some())
            .map(ElementId)
    }

    /// Id of an element borrowed from this scene.
    pub fn element_index(&self, element: &Element) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| std::ptr::eq(e, element))
            .map(ElementId)
    }

    fn index(&self, id: ElementId) -> PanResult<usize> {
        if id.0 < self.elements.len() {
            Ok(id.0)
        } else {
            Err(PanError::placement(format!(
                "element id {} out of range (scene has {} elements)",
                id.0,
                self.elements.len()
            )))
        }
    }

    /// True when `inner` grown by `inner_padding` fits inside `outer` shrunk by `outer_margin`.
    pub fn is_box_inside(inner: Rect, outer: Rect, outer_margin: f64, inner_padding: f64) -> bool {
        inner.x0 - inner_padding >= outer.x0 + outer_margin
            && inner.y0 - inner_padding >= outer.y0 + outer_margin
            && inner.x1 + inner_padding <= outer.x1 - outer_margin
            && inner.y1 + inner_padding <= outer.y1 - outer_margin
    }

    /// Separating-axis test: false only when a gap wider than
    /// `minimum_distance` exists horizontally or vertically.
    pub fn is_box_touching(a: Rect, b: Rect, minimum_distance: f64) -> bool {
        !(b.x1 + minimum_distance < a.x0
            || a.x1 + minimum_distance < b.x0
            || b.y1 + minimum_distance < a.y0
            || a.y1 + minimum_distance < b.y0)
    }

    pub fn move_to(&mut self, id: ElementId, position: Point) -> PanResult<()> {
        let index = self.index(id)?;
        self.elements[index].geometry.set_position(Some(position))
    }

    pub fn place(&mut self, element: Element, position: Point) -> PanResult<ElementId> {
        let id = self.add_element(element);
        self.move_to(id, position)?;
        Ok(id)
    }

    pub fn place_random<R: Rng + ?Sized>(
        &mut self,
        element: Element,
        opts: &RandomPlacement,
        rng: &mut R,
        cancel: &CancelToken,
    ) -> PanResult<(ElementId, PlacementOutcome)> {
        let id = self.add_element(element);
        let outcome = self.move_random(id, opts, rng, cancel)?;
        Ok((id, outcome))
    }

    pub fn place_next<R: Rng + ?Sized>(
        &mut self,
        element: Element,
        opts: &NextPlacement,
        rng: &mut R,
        cancel: &CancelToken,
    ) -> PanResult<(ElementId, PlacementOutcome)> {
        let id = self.add_element(element);
        let outcome = self.move_next(id, opts, rng, cancel)?;
        Ok((id, outcome))
    }

    /// Candidate ranges for a constrained random move, from the unrotated object box.
    fn random_region(&self, index: usize, margin: f64) -> PanResult<(f64, f64, f64, f64)> {
        let margin = validate::finite(margin, "artboard_margin")?;
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        if margin * 2.0 >= w || margin * 2.0 >= h {
            return Err(PanError::validation(format!(
                "artboard margin {margin} is too large for a {}x{} artboard",
                self.width, self.height
            )));
        }
        let bx = self.elements[index]
            .geometry
            .object_box()
            .and_then(|b| b.complete())
            .ok_or_else(|| {
                PanError::missing_geometry("constrained placement needs a complete object_box")
            })?;
        let (x0, x1) = (-bx.x0 + margin, w - bx.x1 - margin);
        let (y0, y1) = (-bx.y0 + margin, h - bx.y1 - margin);
        if x0 > x1 || y0 > y1 {
            return Err(PanError::validation(format!(
                "element of size {}x{} does not fit the artboard with margin {margin}",
                bx.width(),
                bx.height()
            )));
        }
        Ok((x0, x1, y0, y1))
    }

    /// No positioned element other than `index` touches `candidate`.
    fn is_clear(
        &self,
        index: usize,
        candidate: Rect,
        among: Option<&[ElementId]>,
        minimum_distance: f64,
    ) -> PanResult<bool> {
        let check = |other: usize| -> PanResult<bool> {
            if other == index {
                return Ok(true);
            }
            let geometry = &self.elements[other].geometry;
            if geometry.position().is_none() {
                return Ok(true);
            }
            let b = geometry.absolute_bounding_box()?;
            Ok(!Self::is_box_touching(candidate, b, minimum_distance))
        };
        match among {
            Some(ids) => {
                for id in ids {
                    if !check(self.index(*id)?)? {
                        return Ok(false);
                    }
                }
            }
            None => {
                for other in 0..self.elements.len() {
                    if !check(other)? {
                        return Ok(false);
                    }
                }
            }
        }
        Ok(true)
    }

    /// Move an element to a uniformly random position.
    ///
    /// Unconstrained candidates cover the whole artboard; constrained ones keep
    /// the unrotated object box inside the margin. With `collision`, candidates
    /// whose absolute bounding box touches another element are rejected.
    #[tracing::instrument(skip(self, opts, rng, cancel), fields(id = id.0))]
    pub fn move_random<R: Rng + ?Sized>(
        &mut self,
        id: ElementId,
        opts: &RandomPlacement,
        rng: &mut R,
        cancel: &CancelToken,
    ) -> PanResult<PlacementOutcome> {
        let index = self.index(id)?;
        let minimum_distance = validate::finite(opts.minimum_distance, "minimum_distance")?;
        let (x0, x1, y0, y1) = if opts.constrain_to_artboard {
            self.random_region(index, opts.artboard_margin)?
        } else {
            (0.0, f64::from(self.width), 0.0, f64::from(self.height))
        };
        let local_bounds = if opts.collision {
            Some(self.elements[index].geometry.bounding_box()?)
        } else {
            None
        };

        for attempt in 0..opts.max_attempts {
            cancel.check()?;
            let candidate = Point::new(rng.random_range(x0..=x1), rng.random_range(y0..=y1));
            if let Some(bounds) = local_bounds {
                let preview = bounds + candidate.to_vec2();
                if !self.is_clear(index, preview, opts.among.as_deref(), minimum_distance)? {
                    continue;
                }
            }
            self.elements[index].geometry.set_position(Some(candidate))?;
            tracing::debug!(attempt, x = candidate.x, y = candidate.y, "placed element");
            return Ok(PlacementOutcome::Placed(candidate));
        }

        tracing::debug!(attempts = opts.max_attempts, "random placement exhausted");
        Ok(PlacementOutcome::Exhausted {
            attempts: opts.max_attempts,
        })
    }

    /// Move an element next to a reference by searching outward from the
    /// reference position.
    ///
    /// The radius grows by `diagonal / max_attempts` per attempt. A candidate
    /// must stay on the artboard (when strict), clear the reference's bounding
    /// box, and clear every other positioned element.
    #[tracing::instrument(skip(self, opts, rng, cancel), fields(id = id.0))]
    pub fn move_next<R: Rng + ?Sized>(
        &mut self,
        id: ElementId,
        opts: &NextPlacement,
        rng: &mut R,
        cancel: &CancelToken,
    ) -> PanResult<PlacementOutcome> {
        let index = self.index(id)?;
        let reference = match opts.reference {
            Some(r) => self.index(r)?,
            None => index.checked_sub(1).ok_or_else(|| {
                PanError::placement("the first element has no preceding element to reference")
            })?,
        };
        if reference == index {
            return Err(PanError::placement("an element cannot be placed next to itself"));
        }
        let minimum_distance = validate::finite(opts.minimum_distance, "minimum_distance")?;
        let margin = validate::finite(opts.artboard_margin, "artboard_margin")?;

        let reference_geometry = &self.elements[reference].geometry;
        let origin = reference_geometry
            .position()
            .ok_or_else(|| PanError::missing_geometry("reference element has no position"))?;
        let reference_bounds = reference_geometry.absolute_bounding_box()?;
        let local_bounds = self.elements[index].geometry.bounding_box()?;

        let max_attempts = opts
            .max_attempts
            .unwrap_or_else(|| self.width.max(self.height));
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        let step = w.hypot(h) / f64::from(max_attempts.max(1));
        let fixed_direction = match opts.angle {
            Some(deg) => Some(Vec2::from_angle(
                validate::finite(deg, "angle")?.to_radians(),
            )),
            None => None,
        };
        let artboard = self.artboard_box();

        for attempt in 0..max_attempts {
            cancel.check()?;
            let distance = f64::from(attempt + 1) * step;
            let direction = fixed_direction
                .unwrap_or_else(|| Vec2::from_angle(rng.random_range(0.0..std::f64::consts::TAU)));
            let candidate = origin + direction * distance;
            let preview = local_bounds + candidate.to_vec2();

            if opts.within_bounds_strict && !Self::is_box_inside(preview, artboard, margin, 0.0) {
                continue;
            }
            if Self::is_box_touching(preview, reference_bounds, minimum_distance) {
                continue;
            }
            if !self.is_clear(index, preview, None, minimum_distance)? {
                continue;
            }
            self.elements[index].geometry.set_position(Some(candidate))?;
            tracing::debug!(attempt, distance, "placed element next to reference");
            return Ok(PlacementOutcome::Placed(candidate));
        }

        tracing::debug!(attempts = max_attempts, "next placement exhausted");
        Ok(PlacementOutcome::Exhausted {
            attempts: max_attempts,
        })
    }

    /// Decode pixels for image elements that only carry a path.
    /// Relative paths resolve against `root`. Returns how many were loaded.
    pub fn load_images(&mut self, root: &Path) -> PanResult<usize> {
        let mut loaded = 0;
        for element in &mut self.elements {
            if let ElementKind::Image(content) = &mut element.kind
                && content.pixels.is_none()
                && content.path.is_some()
            {
                content.load(root)?;
                loaded += 1;
            }
        }
        tracing::debug!(loaded, "loaded scene images");
        Ok(loaded)
    }

    /// Draw every element in z-order. Unpositioned elements are skipped.
    pub fn compose(&self, painter: &mut dyn Painter) -> PanResult<()> {
        for element in &self.elements {
            if element.geometry.position().is_none() {
                continue;
            }
            element.draw(painter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/artboard.rs"]
mod tests;
