use crate::{
    elements::{
        element::{Element, ElementKind},
        text::{FontSpec, MonospaceMetrics, TextContent},
    },
    foundation::{core::Point, error::PanError},
    scene::artboard::Scene,
};

#[test]
fn scene_json_round_trips() {
    let mut scene = Scene::new(640, 360);
    let text = Element::text(
        TextContent::new("hello", FontSpec::new("mono", 24.0).unwrap()).with_timing(0, 1200),
        &MonospaceMetrics::default(),
    )
    .unwrap();
    scene.place(text, Point::new(100.0, 80.0)).unwrap();
    scene.add_element(
        serde_json::from_str::<Element>(r#"{"kind":"image","image_path":"tiles/a.png"}"#).unwrap(),
    );

    let json = scene.to_json().unwrap();
    let back = Scene::from_json(&json).unwrap();
    assert_eq!(back, scene);
    assert_eq!(back.width(), 640);

    let value = scene.to_value().unwrap();
    assert_eq!(value["elements"][0]["position"], serde_json::json!([100.0, 80.0]));
    assert_eq!(value["elements"][1]["kind"], "image");
}

#[test]
fn scene_json_without_elements_is_empty() {
    let scene = Scene::from_json(r#"{"width": 10, "height": 20}"#).unwrap();
    assert!(scene.is_empty());
    assert_eq!(scene.artboard_box().height(), 20.0);
}

#[test]
fn malformed_records_are_serde_errors() {
    for bad in [
        r#"{"width": -1, "height": 20}"#,
        r#"{"width": 10, "height": 20, "elements": [{"kind": "blank", "angle": "x"}]}"#,
        r#"{"width": 10, "height": 20, "elements": [{"kind": "blank", "position": [1]}]}"#,
        r#"{"width": 10, "height": 20, "elements": [{"kind": "video"}]}"#,
    ] {
        assert!(matches!(Scene::from_json(bad), Err(PanError::Serde(_))), "{bad}");
    }
}

#[test]
fn loaded_images_reference_paths_relative_to_root() {
    let scene = Scene::from_json(
        r#"{"width": 10, "height": 10, "elements": [{"kind": "image", "image_path": "x.png"}]}"#,
    )
    .unwrap();
    match &scene.elements()[0].kind {
        ElementKind::Image(content) => {
            assert_eq!(content.path.as_deref(), Some(std::path::Path::new("x.png")));
            assert!(content.pixels.is_none());
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn missing_scene_file_is_an_io_error_naming_the_path() {
    let path = std::env::temp_dir().join(format!("pancanvas_no_scene_{}.json", std::process::id()));
    let err = Scene::from_path(&path).unwrap_err();
    assert!(matches!(err, PanError::Other(_)), "{err:?}");
    assert!(err.to_string().contains("pancanvas_no_scene_"), "{err}");

    let unwritable = path.join("nested").join("scene.json");
    assert!(matches!(Scene::new(4, 4).save_json(&unwritable), Err(PanError::Other(_))));
}
