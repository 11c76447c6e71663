use super::*;

#[test]
fn fnv_hash_is_stable_across_write_splits() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"aviary");
    let mut b = Fnv1a64::new_default();
    b.write_u8(b'a');
    b.write_bytes(b"viary");
    assert_eq!(a.finish(), b.finish());
    assert_ne!(a.finish(), Fnv1a64::OFFSET_BASIS);
}

#[test]
fn quad_bezier_hits_endpoints() {
    let s = Point::new(0.0, 0.0);
    let c = Point::new(50.0, 100.0);
    let e = Point::new(100.0, 0.0);
    assert_eq!(quad_bezier(s, c, e, 0.0), s);
    assert_eq!(quad_bezier(s, c, e, 1.0), e);
    let mid = quad_bezier(s, c, e, 0.5);
    assert!((mid.x - 50.0).abs() < 1e-9);
    assert!((mid.y - 50.0).abs() < 1e-9);
}

#[test]
fn angle_helpers_follow_y_down_convention() {
    let a = angle_between(Point::new(0.0, 0.0), Point::new(0.0, 10.0));
    assert!((a - PI / 2.0).abs() < 1e-12);
    assert!((wrap_angle(2.5 * PI) - PI / 2.0).abs() < 1e-12);
}

#[test]
fn lerp_point_midpoint() {
    let m = lerp_point(Point::new(0.0, 10.0), Point::new(10.0, 30.0), 0.5);
    assert_eq!(m, Point::new(5.0, 20.0));
}
