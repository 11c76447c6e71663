use super::*;
use crate::motion::random::ThreadRandom;

#[test]
fn defaults_validate() {
    MotionConfig::default().validate().unwrap();
    AvoidanceConfig::default().validate().unwrap();
}

#[test]
fn partial_json_keeps_other_defaults() {
    let cfg: MotionConfig =
        serde_json::from_str(r#"{ "spiral_tick_ms": 25, "speed": { "min": 10.0, "max": 20.0 } }"#)
            .unwrap();
    assert_eq!(cfg.spiral_tick_ms, 25);
    assert_eq!(cfg.speed, Span::new(10.0, 20.0));
    assert_eq!(cfg.pause_ms, MotionConfig::default().pause_ms);
    cfg.validate().unwrap();
}

#[test]
fn inverted_or_zero_settings_are_rejected() {
    let mut cfg = MotionConfig {
        pause_ms: Span::new(3_000, 1_000),
        ..MotionConfig::default()
    };
    assert!(cfg.validate().unwrap_err().to_string().contains("pause_ms"));

    cfg = MotionConfig {
        spiral_tick_ms: 0,
        ..MotionConfig::default()
    };
    assert!(cfg.validate().is_err());

    cfg = MotionConfig {
        speed: Span::new(0.0, 10.0),
        ..MotionConfig::default()
    };
    assert!(cfg.validate().is_err());

    assert!(AvoidanceConfig { min_separation: 0.0 }.validate().is_err());
}

#[test]
fn travel_time_is_distance_over_speed_with_floor() {
    let cfg = MotionConfig::default();
    assert_eq!(cfg.travel_ms(600.0, 60.0), 10_000);
    assert_eq!(cfg.travel_ms(0.0, 60.0), cfg.min_travel_ms);
    assert_eq!(cfg.travel_ms(1.0, 60.0), cfg.min_travel_ms);
    assert_eq!(cfg.travel_ms(10.0, 0.0), cfg.min_travel_ms);
}

#[test]
fn spans_sample_inside_their_range() {
    let mut rng = ThreadRandom::seeded(11);
    let f = Span::new(15.0, 40.0);
    let m = Span::new(400u64, 1_200);
    for _ in 0..500 {
        assert!((15.0..=40.0).contains(&f.sample(&mut rng)));
        assert!((400..=1_200).contains(&m.sample(&mut rng)));
    }
    assert_eq!(Span::new(7u64, 7).sample(&mut rng), 7);
}

#[test]
fn timed_patterns_need_a_duration() {
    let cfg = MotionConfig {
        pause_ms: Span::new(0, 0),
        ..MotionConfig::default()
    };
    assert!(cfg.validate().is_err());
    let cfg = MotionConfig {
        spiral_duration_ms: Span::new(0, 10),
        ..MotionConfig::default()
    };
    assert!(cfg.validate().is_err());
}
