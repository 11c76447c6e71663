use super::*;
use crate::motion::pattern::PatternSet;
use crate::synth::palette::default_preset_for;
use crate::synth::raster::{CpuRasterBackend, Raster};
use crate::synth::sheet::{AnimationSheet, SheetKey};
use crate::synth::synthesizer::{FrameSynthesizer, SynthRequest};

fn bounds() -> Bounds {
    Bounds::new(40.0, 760.0, 40.0, 360.0).unwrap()
}

fn flock(seed: u64) -> Flock {
    Flock::new(bounds(), MotionConfig::default())
        .unwrap()
        .with_rng(Box::new(ThreadRandom::seeded(seed)))
}

fn only(kind: PatternKind) -> PatternSet {
    PatternSet::new([kind]).unwrap()
}

fn cache_with(kind: CreatureKind) -> SheetCache {
    let mut cache = SheetCache::new();
    let mut synth = FrameSynthesizer::new(Box::new(CpuRasterBackend::new()));
    let req = SynthRequest::for_creature(kind, default_preset_for(kind).colors);
    synth.synthesize(&mut cache, &req).unwrap();
    cache
}

#[test]
fn synthesized_agents_animate() {
    let cache = cache_with(CreatureKind::Bird);
    let mut f = flock(1);
    let id = f
        .spawn(
            AgentConfig::new(CreatureKind::Bird, Point::new(200.0, 200.0)),
            &cache,
        )
        .unwrap();
    let agent = f.agent(id).unwrap();
    assert!(agent.appearance().is_animated());
    assert_eq!(agent.current_frame_index(0), Some(0));

    // 12 fps -> frame 1 starts at 83.3 ms
    f.tick(100);
    let agent = f.agent(id).unwrap();
    assert_eq!(agent.current_frame_index(f.now_ms()), Some(1));
    let rect = agent.current_frame(f.now_ms()).unwrap();
    assert_eq!((rect.x, rect.width, rect.height), (48, 48, 32));
    assert_eq!(f.stats().spawned, 1);
}

#[test]
fn missing_animation_falls_back_to_first_frame() {
    let mut cache = SheetCache::new();
    let key = SheetKey::new("bare");
    cache
        .insert_sheet(AnimationSheet::new(
            key.clone(),
            CreatureKind::Owl,
            48,
            48,
            4,
            Raster {
                width: 192,
                height: 48,
                data: vec![0; 192 * 48 * 4],
            },
        ))
        .unwrap();

    let mut f = flock(2);
    let id = f
        .spawn(
            AgentConfig::new(CreatureKind::Owl, Point::new(100.0, 100.0)).with_sheet(key),
            &cache,
        )
        .unwrap();
    f.tick(1_000);
    let agent = f.agent(id).unwrap();
    assert!(matches!(agent.appearance(), Appearance::Static { .. }));
    assert_eq!(agent.current_frame_index(f.now_ms()), Some(0));
    assert_eq!(f.stats().static_fallbacks, 1);
}

#[test]
fn unsynthesized_agents_spawn_as_moving_placeholders() {
    let cache = SheetCache::new();
    let mut f = flock(3);
    let start = Point::new(400.0, 200.0);
    let id = f
        .spawn(
            AgentConfig::new(CreatureKind::Butterfly, start)
                .with_patterns(only(PatternKind::Drift))
                .with_speed(80.0),
            &cache,
        )
        .unwrap();
    assert!(matches!(f.agent(id).unwrap().appearance(), Appearance::Placeholder));
    assert_eq!(f.agent(id).unwrap().current_frame(0), None);
    for _ in 0..10 {
        f.tick(16);
    }
    assert_ne!(f.agent(id).unwrap().position(), start);
    assert_eq!(f.stats().placeholders, 1);
}

#[test]
fn invalid_agent_config_is_an_error() {
    let cache = SheetCache::new();
    let mut f = flock(4);
    let err = f
        .spawn(
            AgentConfig::new(CreatureKind::Bird, Point::ZERO).with_speed(-1.0),
            &cache,
        )
        .unwrap_err();
    assert!(matches!(err, AviaryError::Validation(_)));
    assert!(f.is_empty());
}

#[test]
fn destroy_cancels_every_callback() {
    let cache = SheetCache::new();
    let mut f = flock(5);
    let id = f
        .spawn(
            AgentConfig::new(CreatureKind::Butterfly, Point::new(300.0, 200.0))
                .with_patterns(only(PatternKind::Spiral)),
            &cache,
        )
        .unwrap();
    let other = f
        .spawn(
            AgentConfig::new(CreatureKind::Butterfly, Point::new(600.0, 200.0))
                .with_patterns(only(PatternKind::Pause)),
            &cache,
        )
        .unwrap();
    for _ in 0..10 {
        f.tick(16);
    }
    assert_eq!(f.pending_callbacks(id), 2);
    let before = f.stats();

    assert!(f.destroy(id));
    assert!(!f.destroy(id));
    assert_eq!(f.pending_callbacks(id), 0);
    assert!(f.agent(id).is_none());

    for _ in 0..500 {
        f.tick(16);
    }
    let after = f.stats();
    // Only the surviving pause agent's callbacks fired; nothing reached the destroyed one.
    assert_eq!(after.callbacks_dropped, before.callbacks_dropped);
    assert!(after.callbacks_fired > before.callbacks_fired);
    assert!(f.agent(other).is_some());
    assert_eq!(after.destroyed, 1);

    let err = f.force_pattern(id, PatternKind::Pause).unwrap_err();
    assert!(matches!(err, AviaryError::Validation(_)));
    let err = f.drift_to(id, Point::new(100.0, 100.0)).unwrap_err();
    assert!(matches!(err, AviaryError::Validation(_)));
}

#[test]
fn avoidance_pass_separates_close_agents() {
    let cache = SheetCache::new();
    let mut f = flock(6);
    let a = f
        .spawn(
            AgentConfig::new(CreatureKind::Owl, Point::new(400.0, 200.0))
                .with_patterns(only(PatternKind::Pause)),
            &cache,
        )
        .unwrap();
    let b = f
        .spawn(
            AgentConfig::new(CreatureKind::Owl, Point::new(410.0, 200.0))
                .with_patterns(only(PatternKind::Pause)),
            &cache,
        )
        .unwrap();
    let before = f.agent(a).unwrap().position().distance(f.agent(b).unwrap().position());
    assert_eq!(f.update(), 2);
    let after = f.agent(a).unwrap().position().distance(f.agent(b).unwrap().position());
    assert!(after > before);
    assert!((after - 36.0).abs() < 1e-9);
    assert_eq!(f.stats().avoidance_pushes, 2);

    // Already separated: nothing moves.
    assert_eq!(f.update(), 0);
}

#[test]
fn avoidance_at_the_boundary_still_separates() {
    let cache = SheetCache::new();
    let mut f = flock(7);
    let a = f
        .spawn(
            AgentConfig::new(CreatureKind::Owl, Point::new(40.0, 200.0))
                .with_patterns(only(PatternKind::Pause)),
            &cache,
        )
        .unwrap();
    let b = f
        .spawn(
            AgentConfig::new(CreatureKind::Owl, Point::new(50.0, 200.0))
                .with_patterns(only(PatternKind::Pause)),
            &cache,
        )
        .unwrap();
    f.update();
    let pa = f.agent(a).unwrap().position();
    let pb = f.agent(b).unwrap().position();
    assert_eq!(pa.x, 40.0);
    assert!(pa.distance(pb) > 10.0);
}

#[test]
fn avoidance_can_be_disabled() {
    let cache = SheetCache::new();
    let mut f = flock(8).with_avoidance(None).unwrap();
    for x in [400.0, 401.0] {
        f.spawn(
            AgentConfig::new(CreatureKind::Owl, Point::new(x, 200.0))
                .with_patterns(only(PatternKind::Pause)),
            &cache,
        )
        .unwrap();
    }
    assert_eq!(f.update(), 0);
    assert!(f.with_avoidance(Some(AvoidanceConfig { min_separation: -1.0 })).is_err());
}

#[test]
fn render_rotation_and_position() {
    let cache = SheetCache::new();
    let mut f = flock(9).with_avoidance(None).unwrap();
    let butterfly = f
        .spawn(
            AgentConfig::new(CreatureKind::Butterfly, Point::new(200.0, 200.0))
                .with_patterns(only(PatternKind::Pause)),
            &cache,
        )
        .unwrap();
    let owl = f
        .spawn(
            AgentConfig::new(CreatureKind::Owl, Point::new(300.0, 40.0))
                .with_patterns(only(PatternKind::Pause)),
            &cache,
        )
        .unwrap();
    f.drift_to(butterfly, Point::new(200.0, 300.0)).unwrap();
    f.drift_to(owl, Point::new(500.0, 40.0)).unwrap();
    f.tick(125);

    let b = f.agent(butterfly).unwrap();
    let expected = std::f64::consts::FRAC_PI_2 + CreatureKind::Butterfly.facing_offset();
    assert!((b.render_rotation() - expected).abs() < 1e-12);
    let o = f.agent(owl).unwrap();
    assert_eq!(o.render_rotation(), 0.0);

    // Bob never pushes the drawn sprite outside the boundary.
    for agent in f.agents() {
        assert!(f.bounds().contains(agent.render_position()));
    }
    let affine = b.render_affine();
    let origin = affine * Point::ZERO;
    assert!((origin - b.render_position()).hypot() < 1e-9);
}

#[test]
fn clear_tears_everything_down() {
    let cache = SheetCache::new();
    let mut f = flock(10);
    for i in 0..5 {
        f.spawn(
            AgentConfig::new(CreatureKind::Butterfly, Point::new(100.0 + 100.0 * f64::from(i), 200.0)),
            &cache,
        )
        .unwrap();
    }
    for _ in 0..50 {
        f.tick(20);
    }
    assert_eq!(f.snapshot().len(), 5);
    assert_eq!(f.clear(), 5);
    assert!(f.is_empty());
    for id in 1..=5 {
        assert_eq!(f.pending_callbacks(AgentId(id)), 0);
    }
    let dropped = f.stats().callbacks_dropped;
    f.tick(10_000);
    assert_eq!(f.stats().callbacks_dropped, dropped);
}

#[test]
fn selections_are_tallied() {
    let cache = SheetCache::new();
    let mut f = flock(11);
    f.spawn(
        AgentConfig::new(CreatureKind::Owl, Point::new(400.0, 200.0)),
        &cache,
    )
    .unwrap();
    for _ in 0..2_000 {
        f.tick(16);
    }
    let tally = f.stats().patterns;
    assert!(tally.total() > 5);
    assert_eq!(tally.get(PatternKind::Spiral), 0);
    assert_eq!(tally.get(PatternKind::Drift), 0);
    assert_eq!(tally.get(PatternKind::CurvedPath), 0);
}
