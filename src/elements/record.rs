//! JSON-facing shape of an [`Element`]. Arity and finiteness are checked when
//! a record is turned back into an element.

use std::path::PathBuf;

use crate::{
    elements::{
        element::{Element, ElementKind, ImageContent},
        text::TextContent,
    },
    foundation::error::{PanError, PanResult},
    geometry::{element::Geometry, object_box::ObjectBox},
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct ElementRecord {
    #[serde(flatten)]
    kind: KindRecord,
    #[serde(default)]
    position: Option<Vec<f64>>,
    #[serde(default)]
    object_box: Option<Vec<Option<f64>>>,
    #[serde(default)]
    angle: Option<f64>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum KindRecord {
    Blank,
    Text(TextContent),
    Image {
        #[serde(default)]
        image_path: Option<PathBuf>,
    },
}

impl TryFrom<ElementRecord> for Element {
    type Error = PanError;

    fn try_from(rec: ElementRecord) -> PanResult<Self> {
        let mut geometry = Geometry::default();
        if let Some(p) = rec.position {
            geometry.set_position(Some(Geometry::position_from_slice(&p)?))?;
        }
        if let Some(b) = rec.object_box {
            geometry.set_object_box(Some(ObjectBox::from_slice(&b)?));
        }
        geometry.set_angle(rec.angle)?;

        let kind = match rec.kind {
            KindRecord::Blank => ElementKind::Blank,
            KindRecord::Text(t) => ElementKind::Text(t),
            KindRecord::Image { image_path } => ElementKind::Image(ImageContent {
                path: image_path,
                pixels: None,
            }),
        };
        Ok(Element::new(geometry, kind))
    }
}

impl From<Element> for ElementRecord {
    fn from(el: Element) -> Self {
        let g = el.geometry;
        let kind = match el.kind {
            ElementKind::Blank => KindRecord::Blank,
            ElementKind::Text(t) => KindRecord::Text(t),
            ElementKind::Image(i) => KindRecord::Image {
                image_path: i.path,
            },
        };
        Self {
            kind,
            position: g.position().map(|p| vec![p.x, p.y]),
            object_box: g.object_box().map(|b| b.edges().to_vec()),
            angle: g.angle(),
        }
    }
}
