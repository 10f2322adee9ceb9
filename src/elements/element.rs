use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    assets::decode::load_image,
    elements::text::{TextContent, TextMetrics},
    foundation::{
        core::FrameRGBA,
        error::{PanError, PanResult},
        validate,
    },
    geometry::{element::Geometry, object_box::ObjectBox},
    render::paint::Painter,
};

/// A canvas element: shared geometry plus a variant payload.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(
    try_from = "crate::elements::record::ElementRecord",
    into = "crate::elements::record::ElementRecord"
)]
pub struct Element {
    pub geometry: Geometry,
    pub kind: ElementKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ElementKind {
    /// Geometry only; draws nothing. Useful for reserved regions and viewboxes.
    Blank,
    Text(TextContent),
    Image(ImageContent),
}

/// Image payload. Pixels are loaded eagerly or re-attached from `path`.
#[derive(Clone, Debug, Default)]
pub struct ImageContent {
    pub path: Option<PathBuf>,
    pub pixels: Option<Arc<FrameRGBA>>,
}

impl PartialEq for ImageContent {
    fn eq(&self, other: &Self) -> bool {
        let same_pixels = match (&self.pixels, &other.pixels) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a == b,
            (None, None) => true,
            _ => false,
        };
        self.path == other.path && same_pixels
    }
}

impl ImageContent {
    /// Decode `path` (resolved against `root` when relative) into `pixels`.
    pub fn load(&mut self, root: &Path) -> PanResult<()> {
        let Some(path) = &self.path else {
            return Err(PanError::validation("image element has no path to load"));
        };
        let full = if path.is_absolute() {
            path.clone()
        } else {
            root.join(path)
        };
        self.pixels = Some(Arc::new(load_image(&full)?));
        Ok(())
    }
}

impl Element {
    pub fn new(geometry: Geometry, kind: ElementKind) -> Self {
        Self { geometry, kind }
    }

    pub fn blank(geometry: Geometry) -> Self {
        Self::new(geometry, ElementKind::Blank)
    }

    /// A text element whose object box is measured by `metrics` and grown by
    /// the content padding. Angle starts at 0.
    pub fn text(content: TextContent, metrics: &dyn TextMetrics) -> PanResult<Self> {
        let mut el = Self::new(Geometry::default(), ElementKind::Text(content));
        el.geometry.set_angle(Some(0.0))?;
        el.remeasure(metrics)?;
        Ok(el)
    }

    /// An image element. The object box defaults to `(0, 0, width, height)`.
    pub fn image(pixels: Arc<FrameRGBA>, path: Option<PathBuf>) -> PanResult<Self> {
        let object_box = ObjectBox::new(
            0.0,
            0.0,
            f64::from(pixels.width),
            f64::from(pixels.height),
        )?;
        let mut geometry = Geometry::default();
        geometry.set_object_box(Some(object_box));
        geometry.set_angle(Some(0.0))?;
        Ok(Self::new(
            geometry,
            ElementKind::Image(ImageContent {
                path,
                pixels: Some(pixels),
            }),
        ))
    }

    pub fn image_from_path(path: impl Into<PathBuf>) -> PanResult<Self> {
        let path = path.into();
        let pixels = Arc::new(load_image(&path)?);
        Self::image(pixels, Some(path))
    }

    pub fn as_text(&self) -> Option<&TextContent> {
        match &self.kind {
            ElementKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextContent> {
        match &mut self.kind {
            ElementKind::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Re-seed a text element's object box after its text or font changed.
    pub fn remeasure(&mut self, metrics: &dyn TextMetrics) -> PanResult<()> {
        let ElementKind::Text(content) = &self.kind else {
            return Err(PanError::validation("only text elements can be measured"));
        };
        let rect = metrics.measure(&content.text, &content.font, content.anchor, content.align)?;
        let mut object_box = ObjectBox::from(rect);
        if let Some(pad) = content.padding {
            object_box = object_box.inflate(validate::finite(pad, "text padding")?)?;
        }
        self.geometry.set_object_box(Some(object_box));
        Ok(())
    }

    pub fn draw(&self, painter: &mut dyn Painter) -> PanResult<()> {
        match &self.kind {
            ElementKind::Blank => Ok(()),
            ElementKind::Text(content) => painter.draw_text(&self.geometry, content),
            ElementKind::Image(content) => {
                let pixels = content.pixels.as_ref().ok_or_else(|| {
                    PanError::validation("image element has no pixels; load it before drawing")
                })?;
                painter.draw_image(&self.geometry, pixels)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/elements/element.rs"]
mod tests;
