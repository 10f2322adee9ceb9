use super::*;
use crate::{elements::element::Element, geometry::element::Geometry};

const RED: Rgba8 = Rgba8::new(255, 0, 0, 255);

fn painted(canvas: &FrameRGBA, bg: [u8; 4]) -> usize {
    canvas.data.chunks_exact(4).filter(|px| *px != bg).count()
}

#[test]
fn grid_marks_every_spacing_row_and_column() {
    let mut canvas = FrameRGBA::filled(4, 4, Rgba8::WHITE);
    draw_grid(&mut canvas, 2, RED).unwrap();
    assert_eq!(painted(&canvas, [255; 4]), 12);
    assert_eq!(canvas.pixel(2, 1), Some(RED.to_array()));
    assert_eq!(canvas.pixel(1, 1), Some([255; 4]));
}

#[test]
fn grid_rejects_zero_spacing() {
    let mut canvas = FrameRGBA::filled(4, 4, Rgba8::WHITE);
    let err = draw_grid(&mut canvas, 0, RED).unwrap_err();
    assert!(matches!(err, PanError::Validation(_)));
}

#[test]
fn rect_outline_leaves_interior_alone() {
    let mut canvas = FrameRGBA::filled(8, 6, Rgba8::WHITE);
    stroke_rect(&mut canvas, Rect::new(1.0, 1.0, 5.0, 4.0), RED, 1);
    assert_eq!(painted(&canvas, [255; 4]), 10);
    assert_eq!(canvas.pixel(2, 2), Some([255; 4]));
    assert_eq!(canvas.pixel(4, 3), Some(RED.to_array()));
}

#[test]
fn rect_outline_clips_to_canvas() {
    let mut canvas = FrameRGBA::filled(4, 4, Rgba8::WHITE);
    stroke_rect(&mut canvas, Rect::new(-3.0, -3.0, 2.0, 2.0), RED, 1);
    assert_eq!(painted(&canvas, [255; 4]), 3);
}

#[test]
fn polygon_closes_back_to_first_point() {
    let mut canvas = FrameRGBA::filled(6, 6, Rgba8::WHITE);
    let pts = [Point::new(1.0, 1.0), Point::new(4.0, 1.0), Point::new(4.0, 4.0)];
    stroke_polygon(&mut canvas, &pts, RED);
    // closing edge runs along the diagonal
    assert_eq!(canvas.pixel(2, 2), Some(RED.to_array()));
    assert_eq!(canvas.pixel(1, 3), Some([255; 4]));
}

#[test]
fn outlines_skip_unpositioned_elements() {
    let mut scene = Scene::new(20, 20);
    let geometry = Geometry::builder()
        .position(10.0, 10.0)
        .object_box(-3.0, -3.0, 3.0, 3.0)
        .angle(0.0)
        .build()
        .unwrap();
    scene.add_element(Element::blank(geometry));
    scene.add_element(Element::blank(
        Geometry::builder().object_box(-1.0, -1.0, 1.0, 1.0).build().unwrap(),
    ));

    let mut canvas = FrameRGBA::filled(20, 20, Rgba8::WHITE);
    let style = OutlineStyle {
        object_box: None,
        bounding_box: Some(RED),
    };
    assert_eq!(outline_elements(&mut canvas, &scene, style), 1);
    assert_eq!(canvas.pixel(7, 7), Some(RED.to_array()));
    assert_eq!(canvas.pixel(10, 10), Some([255; 4]));
}
