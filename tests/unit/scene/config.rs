use super::*;
use crate::motion::pattern::PatternKind;
use crate::motion::random::ThreadRandom;
use crate::synth::pose::CreatureKind;
use crate::synth::raster::{BackendKind, create_backend};

const SCENE: &str = r##"{
    "bounds": { "minX": 40, "maxX": 760, "minY": 40, "maxY": 360 },
    "tick_ms": 20,
    "motion": { "pause_ms": { "min": 500, "max": 800 } },
    "agents": [
        { "kind": "butterfly", "position": { "x": 100, "y": 100 }, "preset": "monarch" },
        { "kind": "butterfly", "position": { "x": 300, "y": 100 }, "preset": "monarch" },
        { "kind": "bird", "position": { "x": 500, "y": 200 }, "speed": 55,
          "patterns": ["drift", "pause"] },
        { "kind": "owl", "position": { "x": 700, "y": 300 },
          "colors": { "body": "#6b4f3a", "primary": "#8a6a4f", "secondary": "#e8d9c0" } }
    ]
}"##;

#[test]
fn parses_with_defaults() {
    let scene = SceneConfig::from_reader(SCENE.as_bytes()).unwrap();
    scene.validate().unwrap();
    assert_eq!(scene.tick_ms, 20);
    assert_eq!(scene.motion.pause_ms.min, 500);
    assert_eq!(scene.motion.spiral_tick_ms, 50);
    assert_eq!(scene.avoidance, Some(AvoidanceConfig::default()));
    assert_eq!(scene.agents.len(), 4);
    assert_eq!(scene.agents[2].speed, Some(55.0));
}

#[test]
fn null_avoidance_disables_it() {
    let json = r#"{ "bounds": { "minX": 0, "maxX": 10, "minY": 0, "maxY": 10 }, "avoidance": null }"#;
    let scene = SceneConfig::from_reader(json.as_bytes()).unwrap();
    assert!(scene.avoidance.is_none());
    assert_eq!(scene.tick_ms, 16);
}

#[test]
fn validation_names_the_offending_agent() {
    let mut scene = SceneConfig::from_reader(SCENE.as_bytes()).unwrap();
    scene.agents[3].preset = Some("dodo".into());
    scene.agents[3].colors = None;
    let err = scene.validate().unwrap_err();
    assert!(matches!(err, AviaryError::Config(_)));
    assert!(err.to_string().contains("agents[3]"), "{err}");

    let mut scene = SceneConfig::new(Bounds::new(0.0, 1.0, 0.0, 1.0).unwrap());
    scene.tick_ms = 0;
    assert!(scene.validate().is_err());
}

#[test]
fn bad_json_is_a_config_error() {
    let err = SceneConfig::from_reader("{ not json".as_bytes()).unwrap_err();
    assert!(err.to_string().starts_with("config error:"));
    let err = SceneConfig::from_reader(r#"{ "bounds": { "minX": 0 } }"#.as_bytes()).unwrap_err();
    assert!(matches!(err, AviaryError::Config(_)));
    let err = SceneConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("open scene JSON"));
}

#[test]
fn build_synthesizes_each_distinct_sheet_once() {
    let scene = SceneConfig::from_reader(SCENE.as_bytes()).unwrap();
    let mut cache = SheetCache::new();
    let mut synth = FrameSynthesizer::new(create_backend(BackendKind::Cpu));
    let (flock, ids) = scene
        .build(&mut synth, &mut cache, Box::new(ThreadRandom::seeded(1)))
        .unwrap();
    assert_eq!(ids.len(), 4);
    assert_eq!(cache.sheet_count(), 3);
    assert_eq!(cache.stats().sheets_built, 3);
    assert!(flock.agents().all(|a| a.appearance().is_animated()));

    let bird = flock.agent(ids[2]).unwrap();
    assert_eq!(bird.kind(), CreatureKind::Bird);
    assert_eq!(bird.controller().speed(), 55.0);
    assert!(
        [PatternKind::Drift, PatternKind::Pause].contains(&bird.pattern_kind())
    );
}

#[test]
fn build_without_a_rasterizer_still_spawns() {
    let scene = SceneConfig::from_reader(SCENE.as_bytes()).unwrap();
    let mut cache = SheetCache::new();
    let mut synth = FrameSynthesizer::new(create_backend(BackendKind::Disabled));
    let (flock, ids) = scene
        .build(&mut synth, &mut cache, Box::new(ThreadRandom::seeded(2)))
        .unwrap();
    assert_eq!(ids.len(), 4);
    assert_eq!(cache.sheet_count(), 0);
    assert_eq!(flock.stats().placeholders, 4);
}
