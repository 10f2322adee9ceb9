use super::*;

fn font(size: f64) -> FontSpec {
    FontSpec::new("mono", size).unwrap()
}

#[test]
fn anchors_parse_and_print() {
    let a = TextAnchor::parse("ls").unwrap();
    assert_eq!(a.horizontal, HorizontalAnchor::Left);
    assert_eq!(a.vertical, VerticalAnchor::Baseline);
    assert_eq!(String::from(a), "ls");
    assert_eq!(TextAnchor::default(), TextAnchor::parse("mm").unwrap());

    assert!(TextAnchor::parse("m").is_err());
    assert!(TextAnchor::parse("mmm").is_err());
    assert!(TextAnchor::parse("xm").is_err());
    assert!(TextAnchor::parse("mx").is_err());
}

#[test]
fn font_size_must_be_positive() {
    assert!(FontSpec::new("a", 0.0).is_err());
    assert!(FontSpec::new("a", f64::NAN).is_err());
}

#[test]
fn monospace_middle_anchor_centers_block() {
    let m = MonospaceMetrics::default();
    let r = m
        .measure("abcd", &font(10.0), TextAnchor::MIDDLE, TextAlign::Center)
        .unwrap();
    assert!((r.width() - 24.0).abs() < 1e-9);
    assert!((r.height() - 10.0).abs() < 1e-9);
    assert!((r.x0 + 12.0).abs() < 1e-9);
    assert!((r.y0 + 5.0).abs() < 1e-9);
}

#[test]
fn monospace_multiline_uses_widest_line() {
    let m = MonospaceMetrics::default();
    let r = m
        .measure(
            "ab\nabcdef",
            &font(10.0),
            TextAnchor::parse("lt").unwrap(),
            TextAlign::Left,
        )
        .unwrap();
    assert_eq!(r.x0, 0.0);
    assert_eq!(r.y0, 0.0);
    assert!((r.width() - 36.0).abs() < 1e-9);
    assert!((r.height() - 22.0).abs() < 1e-9);
}

#[test]
fn baseline_anchor_puts_ascent_above_origin() {
    let m = MonospaceMetrics::default();
    let r = m
        .measure(
            "x",
            &font(10.0),
            TextAnchor::parse("rs").unwrap(),
            TextAlign::Right,
        )
        .unwrap();
    assert!((r.x1).abs() < 1e-9);
    assert!((r.y0 + 8.0).abs() < 1e-9);
    assert!((r.y1 - 2.0).abs() < 1e-9);
}

#[test]
fn midpoint_needs_both_ends() {
    let c = TextContent::new("hi", FontSpec::default());
    assert_eq!(c.midpoint_ms(), None);
    let c = c.with_timing(1_000, 2_000);
    assert_eq!(c.midpoint_ms(), Some(1_500.0));
}

#[test]
fn text_content_json_uses_defaults() {
    let c: TextContent = serde_json::from_str(r#"{"text":"hey"}"#).unwrap();
    assert_eq!(c.anchor, TextAnchor::MIDDLE);
    assert_eq!(c.align, TextAlign::Center);
    assert_eq!(c.color, Rgba8::BLACK);
    assert_eq!(c.font, FontSpec::default());

    let bad = serde_json::from_str::<TextContent>(r#"{"text":"hey","anchor":"zz"}"#);
    assert!(bad.is_err());
}
