use super::*;

fn camera() -> Camera {
    Camera::new(Resolution::new(640, 480).unwrap())
}

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn position_midpoint_between_two_keys() {
    let mut cam = camera();
    cam.add_position_keyframe(0.0, Point::new(0.0, 0.0)).unwrap();
    cam.add_position_keyframe(2.0, Point::new(4.0, 8.0)).unwrap();
    assert!(close(cam.get_position(1.0), Point::new(2.0, 4.0)));
    assert_eq!(cam.duration(), 2.0);
}

#[test]
fn rotation_midpoint_between_two_keys() {
    let mut cam = camera();
    cam.add_rotation_keyframe(0.0, 0.0).unwrap();
    cam.add_rotation_keyframe(2.0, 90.0).unwrap();
    assert!((cam.get_angle(1.0) - 45.0).abs() < 1e-9);
}

#[test]
fn empty_camera_uses_defaults() {
    let cam = camera();
    for t in [-3.0, 0.0, 0.5, 100.0] {
        assert_eq!(cam.get_position(t), Point::ZERO);
        assert_eq!(cam.get_angle(t), 0.0);
        assert_eq!(cam.get_zoom(t), 1.0);
    }
    assert_eq!(cam.duration(), 0.0);
}

#[test]
fn rotation_is_stored_wrapped() {
    let mut cam = camera();
    let key = cam.add_rotation_keyframe(1.0, 370.0).unwrap();
    assert_eq!(key.value.degrees(), 10.0);
    assert_eq!(cam.rotation_keyframes()[0].value.degrees(), 10.0);
}

#[test]
fn zoom_must_be_positive() {
    let mut cam = camera();
    assert!(cam.add_zoom_keyframe(0.0, 0.0).is_err());
    assert!(cam.add_zoom_keyframe(0.0, -1.0).is_err());
    assert!(cam.add_zoom_keyframe(0.0, 0.5).is_ok());
}

#[test]
fn add_keyframe_is_all_or_nothing() {
    let mut cam = camera();
    assert!(
        cam.add_keyframe(1.0, Some(Point::new(1.0, 1.0)), Some(30.0), Some(-2.0))
            .is_err()
    );
    assert!(cam.position_keyframes().is_empty());
    assert!(cam.rotation_keyframes().is_empty());

    cam.add_keyframe(1.0, Some(Point::new(1.0, 1.0)), None, Some(2.0))
        .unwrap();
    assert_eq!(cam.position_keyframes().len(), 1);
    assert!(cam.rotation_keyframes().is_empty());
    assert_eq!(cam.zoom_keyframes().len(), 1);
}

#[test]
fn frame_transform_centers_the_camera_point() {
    let mut cam = camera();
    cam.add_keyframe(0.0, Some(Point::new(1000.0, 700.0)), Some(33.0), Some(1.7))
        .unwrap();
    let m = cam.frame_transform(0.0);
    assert!(close(m * Point::new(1000.0, 700.0), Point::new(320.0, 240.0)));
}

#[test]
fn zoom_scales_distances_from_center() {
    let mut cam = camera();
    cam.add_keyframe(0.0, Some(Point::new(50.0, 50.0)), None, Some(2.0))
        .unwrap();
    let m = cam.frame_transform(0.0);
    assert!(close(m * Point::new(60.0, 50.0), Point::new(340.0, 240.0)));
}

#[test]
fn positive_angle_turns_view_counter_clockwise() {
    let mut cam = camera();
    cam.add_keyframe(0.0, Some(Point::ZERO), Some(90.0), None)
        .unwrap();
    let m = cam.frame_transform(0.0);
    // A source point to the right of the center shows up above it (y-down).
    assert!(close(m * Point::new(10.0, 0.0), Point::new(320.0, 230.0)));
}

#[test]
fn prepared_camera_samples_from_threads() {
    let mut cam = camera();
    for i in 0..5 {
        cam.add_position_keyframe(f64::from(i), Point::new(f64::from(i * i), 0.0))
            .unwrap();
    }
    cam.prepare();
    let cam = std::sync::Arc::new(cam);
    let handles: Vec<_> = (0..4)
        .map(|k| {
            let cam = cam.clone();
            std::thread::spawn(move || cam.get_position(f64::from(k) + 0.5))
        })
        .collect();
    for (k, h) in handles.into_iter().enumerate() {
        let p = h.join().unwrap();
        assert_eq!(p, cam.get_position(k as f64 + 0.5));
    }
}

#[test]
fn camera_json_round_trips() {
    let mut cam = camera();
    cam.add_keyframe(0.0, Some(Point::new(1.0, 2.0)), Some(350.0), Some(1.25))
        .unwrap();
    cam.add_position_keyframe(3.5, Point::new(-4.0, 8.0)).unwrap();
    let json = cam.to_json().unwrap();
    let back = Camera::from_json(&json).unwrap();
    assert_eq!(back, cam);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["resolution"], serde_json::json!([640, 480]));
    assert_eq!(value["position"][1]["value"], serde_json::json!([-4.0, 8.0]));
}

#[test]
fn camera_json_is_validated() {
    assert!(Camera::from_json(r#"{"resolution":[0,10]}"#).is_err());
    assert!(
        Camera::from_json(r#"{"resolution":[10,10],"zoom":[{"time":0,"value":0}]}"#).is_err()
    );
    let cam = Camera::from_json(r#"{"resolution":[10,10],"rotation":[{"time":0,"value":-90}]}"#)
        .unwrap();
    assert_eq!(cam.get_angle(5.0), 270.0);
}

#[test]
fn missing_camera_file_is_an_io_error_naming_the_path() {
    let path = std::env::temp_dir().join(format!("pancanvas_no_camera_{}.json", std::process::id()));
    let err = Camera::from_path(&path).unwrap_err();
    assert!(matches!(err, PanError::Other(_)), "{err:?}");
    assert!(err.to_string().contains("pancanvas_no_camera_"), "{err}");

    let unwritable = path.join("nested").join("camera.json");
    assert!(matches!(camera().save_json(&unwritable), Err(PanError::Other(_))));
}
