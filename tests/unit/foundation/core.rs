use super::*;

#[test]
fn hex_colors_parse_and_format() {
    let c = Rgba8::from_hex("#ff8000").unwrap();
    assert_eq!(c, Rgba8::rgb(255, 128, 0));
    assert_eq!(c.to_hex(), "#ff8000");

    let c = Rgba8::from_hex("#10203040").unwrap();
    assert_eq!(c, Rgba8::rgba(0x10, 0x20, 0x30, 0x40));
    assert_eq!(c.to_hex(), "#10203040");

    assert!(Rgba8::from_hex("ff8000").is_err());
    assert!(Rgba8::from_hex("#ff80").is_err());
    assert!(Rgba8::from_hex("#gg0000").is_err());
}

#[test]
fn colors_deserialize_from_hex_strings() {
    let c: Rgba8 = serde_json::from_str("\"#336699\"").unwrap();
    assert_eq!(c, Rgba8::rgb(0x33, 0x66, 0x99));
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#336699\"");
    assert!(serde_json::from_str::<Rgba8>("\"blue\"").is_err());
}

#[test]
fn bounds_reject_degenerate_or_non_finite() {
    assert!(Bounds::new(0.0, 10.0, 0.0, 10.0).is_ok());
    assert!(Bounds::new(10.0, 10.0, 0.0, 10.0).is_err());
    assert!(Bounds::new(0.0, 10.0, 5.0, 1.0).is_err());
    assert!(Bounds::new(0.0, f64::NAN, 0.0, 10.0).is_err());
}

#[test]
fn bounds_clamp_is_inclusive() {
    let b = Bounds::new(40.0, 760.0, 40.0, 360.0).unwrap();
    assert_eq!(b.clamp(Point::new(0.0, 400.0)), Point::new(40.0, 360.0));
    assert_eq!(b.clamp(Point::new(100.0, 100.0)), Point::new(100.0, 100.0));
    assert!(b.contains(Point::new(40.0, 360.0)));
    assert!(!b.contains(Point::new(39.9, 200.0)));
}

#[test]
fn bounds_use_camel_case_keys() {
    let b: Bounds =
        serde_json::from_str(r#"{"minX":40,"maxX":760,"minY":40,"maxY":360}"#).unwrap();
    assert_eq!(b.center(), Point::new(400.0, 200.0));
}

#[test]
fn transform_affine_places_sprite_center() {
    let t = Transform::at(Point::new(10.0, 20.0));
    assert_eq!(t.to_affine(0.0) * Point::ZERO, Point::new(10.0, 20.0));

    let t = Transform {
        bob: -2.0,
        ..Transform::at(Point::new(10.0, 20.0))
    };
    assert_eq!(t.to_affine(0.0) * Point::ZERO, Point::new(10.0, 18.0));
}
