use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn unit_square_at(x: f64, y: f64, angle: f64) -> Geometry {
    Geometry::builder()
        .position(x, y)
        .object_box(-1.0, -1.0, 1.0, 1.0)
        .angle(angle)
        .build()
        .unwrap()
}

#[test]
fn angle_is_normalized_into_one_turn() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut g = Geometry::default();
    for _ in 0..5_000 {
        let a = rng.random_range(-100.0..=100.0);
        g.set_angle(Some(a)).unwrap();
        let stored = g.angle().unwrap();
        assert!((0.0..TAU).contains(&stored), "{a} stored as {stored}");
    }
    g.set_angle(Some(-FRAC_PI_2)).unwrap();
    assert!(close(g.angle().unwrap(), 3.0 * FRAC_PI_2));
    g.set_angle(None).unwrap();
    assert_eq!(g.angle(), None);
}

#[test]
fn non_finite_inputs_are_rejected() {
    let mut g = Geometry::default();
    assert!(matches!(
        g.set_angle(Some(f64::NAN)),
        Err(PanError::Validation(_))
    ));
    assert!(matches!(
        g.set_position(Some(Point::new(f64::INFINITY, 0.0))),
        Err(PanError::Validation(_))
    ));
    assert!(matches!(
        Geometry::position_from_slice(&[1.0, 2.0, 3.0]),
        Err(PanError::Validation(_))
    ));
    assert_eq!(
        Geometry::position_from_slice(&[1.0, 2.0]).unwrap(),
        Point::new(1.0, 2.0)
    );
}

#[test]
fn vertices_require_complete_box_and_angle() {
    let g = Geometry::builder()
        .object_box(0.0, 0.0, 1.0, 1.0)
        .build()
        .unwrap();
    assert!(matches!(g.vertices(), Err(PanError::MissingGeometry(_))));

    let g = Geometry::builder()
        .partial_box([Some(0.0), None, Some(1.0), Some(1.0)])
        .angle(0.0)
        .build()
        .unwrap();
    assert!(matches!(g.vertices(), Err(PanError::MissingGeometry(_))));
    assert!(matches!(g.bounding_box(), Err(PanError::MissingGeometry(_))));
}

#[test]
fn quarter_turn_rotates_corners_with_affine_convention() {
    let g = Geometry::builder()
        .object_box(0.0, 0.0, 2.0, 1.0)
        .angle(FRAC_PI_2)
        .build()
        .unwrap();
    let v = g.vertices().unwrap();
    // (2, 0) -> (0, 2) under x' = x cos a - y sin a, y' = x sin a + y cos a.
    assert!(close(v[1].x, 0.0) && close(v[1].y, 2.0));
    // (2, 1) -> (-1, 2)
    assert!(close(v[2].x, -1.0) && close(v[2].y, 2.0));

    let bb = g.bounding_box().unwrap();
    assert!(close(bb.x0, -1.0) && close(bb.y0, 0.0));
    assert!(close(bb.x1, 0.0) && close(bb.y1, 2.0));
}

#[test]
fn bounding_box_encloses_rotated_vertices() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..1_000 {
        let l = rng.random_range(-50.0..=0.0);
        let t = rng.random_range(-50.0..=0.0);
        let g = Geometry::builder()
            .object_box(l, t, l + rng.random_range(0.0..=80.0), t + 20.0)
            .angle(rng.random_range(0.0..=TAU))
            .build()
            .unwrap();
        let bb = g.bounding_box().unwrap();
        let verts = g.vertices().unwrap();
        for v in verts {
            assert!(v.x >= bb.x0 - 1e-9 && v.x <= bb.x1 + 1e-9);
            assert!(v.y >= bb.y0 - 1e-9 && v.y <= bb.y1 + 1e-9);
        }
        // tight: every edge of the envelope is hit by a vertex
        assert!(verts.iter().any(|v| close(v.x, bb.x0)));
        assert!(verts.iter().any(|v| close(v.y, bb.y1)));
    }
}

#[test]
fn diamond_bounding_box_grows_by_sqrt2() {
    let g = unit_square_at(0.0, 0.0, FRAC_PI_4);
    let bb = g.bounding_box().unwrap();
    let s = std::f64::consts::SQRT_2;
    assert!(close(bb.x0, -s) && close(bb.x1, s));
    assert!(close(bb.y0, -s) && close(bb.y1, s));
    assert_eq!(g.area(), Some(4.0));
}

#[test]
fn absolute_boxes_need_position() {
    let g = Geometry::builder()
        .object_box(0.0, 0.0, 1.0, 1.0)
        .angle(0.0)
        .build()
        .unwrap();
    assert!(matches!(
        g.absolute_bounding_box(),
        Err(PanError::MissingGeometry(_))
    ));
    assert!(matches!(
        g.absolute_object_box(),
        Err(PanError::MissingGeometry(_))
    ));

    let g = g.with_position(Point::new(10.0, 5.0)).unwrap();
    assert_eq!(
        g.absolute_bounding_box().unwrap(),
        Rect::new(10.0, 5.0, 11.0, 6.0)
    );
    let v = g.absolute_vertices().unwrap();
    assert_eq!(v[2], Point::new(11.0, 6.0));
}

#[test]
fn absolute_object_box_keeps_unset_edges_unset() {
    let mut g = Geometry::default();
    g.set_right(3.0).unwrap();
    g.set_top(-1.0).unwrap();
    g.set_position(Some(Point::new(2.0, 2.0))).unwrap();
    let abs = g.absolute_object_box().unwrap();
    assert_eq!(abs.edges(), [None, Some(1.0), Some(5.0), None]);
}

#[test]
fn calculate_absolute_box_round_trips() {
    let mut rng = StdRng::seed_from_u64(29);
    for _ in 0..2_000 {
        let p = Point::new(
            rng.random_range(-1e4..=1e4),
            rng.random_range(-1e4..=1e4),
        );
        let b = ObjectBox::new(
            rng.random_range(-100.0..=100.0),
            rng.random_range(-100.0..=100.0),
            rng.random_range(-100.0..=100.0),
            rng.random_range(-100.0..=100.0),
        )
        .unwrap();
        let abs = Geometry::calculate_absolute_box(p, b);
        let back = abs.translate(-p.to_vec2());
        for (a, e) in back.edges().iter().zip(b.edges()) {
            assert!((a.unwrap() - e.unwrap()).abs() < 1e-7);
        }
    }
}

#[test]
fn affine_matches_absolute_vertices() {
    let g = Geometry::builder()
        .position(40.0, -3.0)
        .object_box(-4.0, -2.0, 6.0, 2.0)
        .angle(0.7)
        .build()
        .unwrap();
    let m = g.to_affine().unwrap();
    let r = g.object_box().unwrap().complete().unwrap();
    let abs = g.absolute_vertices().unwrap();
    let p = m * Point::new(r.x0, r.y0);
    assert!(close(p.x, abs[0].x) && close(p.y, abs[0].y));
}

#[test]
fn sizes_and_preview_boxes() {
    let g = Geometry::builder()
        .object_box(0.0, 0.0, 4.0, 2.0)
        .angle(FRAC_PI_2)
        .build()
        .unwrap();
    assert_eq!(g.object_box_size(), Some((4.0, 2.0)));
    let (w, h) = g.bounding_box_size().unwrap();
    assert!(close(w, 2.0) && close(h, 4.0), "{w}x{h}");

    let preview = g.bounding_box_at(Point::new(10.0, 10.0)).unwrap();
    assert!(close(preview.x0, 8.0) && close(preview.y1, 14.0), "{preview:?}");
    assert!(g.position().is_none());
}
