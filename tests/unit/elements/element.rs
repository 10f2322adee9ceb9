use std::sync::Arc;

use super::*;
use crate::{
    elements::text::{FontSpec, MonospaceMetrics},
    foundation::core::{Point, Rgba8},
};

#[derive(Default)]
struct RecordingPainter {
    images: Vec<(u32, u32)>,
    texts: Vec<String>,
}

impl Painter for RecordingPainter {
    fn draw_image(&mut self, _geometry: &Geometry, image: &FrameRGBA) -> PanResult<()> {
        self.images.push((image.width, image.height));
        Ok(())
    }

    fn draw_text(&mut self, _geometry: &Geometry, content: &TextContent) -> PanResult<()> {
        self.texts.push(content.text.clone());
        Ok(())
    }
}

#[test]
fn text_element_box_comes_from_metrics_plus_padding() {
    let content = TextContent::new("abcd", FontSpec::new("mono", 10.0).unwrap()).with_padding(3.0);
    let el = Element::text(content, &MonospaceMetrics::default()).unwrap();
    let b = el.geometry.object_box().unwrap();
    assert_eq!(b.size(), Some((30.0, 16.0)));
    assert_eq!(el.geometry.angle(), Some(0.0));
    assert_eq!(el.geometry.position(), None);
}

#[test]
fn padding_larger_than_half_the_text_keeps_box_ordered() {
    let content = TextContent::new("hello", FontSpec::new("mono", 10.0).unwrap()).with_padding(-40.0);
    let el = Element::text(content, &MonospaceMetrics::default()).unwrap();
    let [l, t, r, b] = el.geometry.object_box().unwrap().edges().map(Option::unwrap);
    assert!(l <= r, "left {l} > right {r}");
    assert!(t <= b, "top {t} > bottom {b}");
}

#[test]
fn non_finite_padding_is_rejected() {
    for pad in [f64::NAN, f64::INFINITY] {
        let content = TextContent::new("hello", FontSpec::new("mono", 10.0).unwrap()).with_padding(pad);
        assert!(matches!(
            Element::text(content, &MonospaceMetrics::default()),
            Err(PanError::Validation(_))
        ));
    }
}

#[test]
fn remeasure_follows_font_changes() {
    let mut el = Element::text(
        TextContent::new("ab", FontSpec::new("mono", 10.0).unwrap()),
        &MonospaceMetrics::default(),
    )
    .unwrap();
    el.as_text_mut().unwrap().font.size = 20.0;
    el.remeasure(&MonospaceMetrics::default()).unwrap();
    assert_eq!(el.geometry.object_box_size(), Some((24.0, 20.0)));

    let mut blank = Element::blank(Geometry::default());
    assert!(blank.remeasure(&MonospaceMetrics::default()).is_err());
}

#[test]
fn image_element_defaults_box_to_pixel_extent() {
    let px = Arc::new(FrameRGBA::filled(7, 3, Rgba8::WHITE));
    let el = Element::image(px, None).unwrap();
    assert_eq!(
        el.geometry.object_box().unwrap().edges(),
        [Some(0.0), Some(0.0), Some(7.0), Some(3.0)]
    );
}

#[test]
fn draw_dispatches_by_variant() {
    let mut painter = RecordingPainter::default();
    let img = Element::image(Arc::new(FrameRGBA::filled(2, 2, Rgba8::BLACK)), None).unwrap();
    let txt = Element::text(
        TextContent::new("hi", FontSpec::default()),
        &MonospaceMetrics::default(),
    )
    .unwrap();
    let blank = Element::blank(Geometry::default());

    for el in [&img, &txt, &blank] {
        el.draw(&mut painter).unwrap();
    }
    assert_eq!(painter.images, vec![(2, 2)]);
    assert_eq!(painter.texts, vec!["hi".to_string()]);
}

#[test]
fn unloaded_image_refuses_to_draw() {
    let el = Element::new(
        Geometry::default(),
        ElementKind::Image(ImageContent {
            path: Some("missing.png".into()),
            pixels: None,
        }),
    );
    let mut painter = RecordingPainter::default();
    assert!(matches!(
        el.draw(&mut painter),
        Err(PanError::Validation(_))
    ));
}

#[test]
fn record_round_trip_preserves_geometry_and_payload() {
    let mut el = Element::text(
        TextContent::new("lyric", FontSpec::default()).with_timing(100, 900),
        &MonospaceMetrics::default(),
    )
    .unwrap();
    el.geometry.set_position(Some(Point::new(12.5, -4.0))).unwrap();
    el.geometry.set_angle(Some(1.25)).unwrap();

    let json = serde_json::to_value(&el).unwrap();
    assert_eq!(json["kind"], "text");
    assert_eq!(json["text"], "lyric");
    assert_eq!(json["start_ms"], 100);

    let back: Element = serde_json::from_value(json).unwrap();
    assert_eq!(back, el);
}

#[test]
fn record_validation_rejects_bad_arity() {
    let bad_pos = r#"{"kind":"blank","position":[1.0,2.0,3.0]}"#;
    assert!(serde_json::from_str::<Element>(bad_pos).is_err());

    let bad_box = r#"{"kind":"blank","object_box":[1.0,2.0]}"#;
    assert!(serde_json::from_str::<Element>(bad_box).is_err());

    let partial =
        r#"{"kind":"image","image_path":"a.png","object_box":[5.0,null,1.0,null],"angle":-1.0}"#;
    let el: Element = serde_json::from_str(partial).unwrap();
    let b = el.geometry.object_box().unwrap();
    assert_eq!(b.edges(), [Some(1.0), None, Some(5.0), None]);
    assert!(el.geometry.angle().unwrap() > 0.0);
}
