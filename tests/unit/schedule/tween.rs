use super::*;

#[test]
fn tween_runs_from_zero_to_one() {
    let t = Tween::new(100, 200, Ease::Linear);
    assert_eq!(t.value(0), 0.0);
    assert_eq!(t.value(100), 0.0);
    assert!((t.value(200) - 0.5).abs() < 1e-12);
    assert_eq!(t.value(300), 1.0);
    assert_eq!(t.value(10_000), 1.0);
    assert!(t.is_done(300));
    assert!(!t.is_done(299));
}

#[test]
fn yoyo_returns_to_start() {
    let t = Tween::new(0, 600, Ease::Linear).with_yoyo();
    assert_eq!(t.total_ms(), 1_200);
    assert_eq!(t.value(600), 1.0);
    assert!((t.value(900) - 0.5).abs() < 1e-12);
    assert_eq!(t.value(1_200), 0.0);
    assert!(t.is_done(1_200));
}

#[test]
fn zero_duration_is_clamped() {
    let t = Tween::new(0, 0, Ease::InOutSine);
    assert_eq!(t.duration_ms, 1);
    assert_eq!(t.value(1), 1.0);
}

#[test]
fn oscillation_is_periodic_and_bounded() {
    let o = Oscillation::new(0, 3.0, 700);
    assert!(o.offset(0).abs() < 1e-12);
    assert!((o.offset(175) - 3.0).abs() < 1e-9);
    assert!((o.offset(175) - o.offset(875)).abs() < 1e-9);
    for t in (0..3_000).step_by(13) {
        assert!(o.offset(t).abs() <= 3.0 + 1e-9);
    }
}
