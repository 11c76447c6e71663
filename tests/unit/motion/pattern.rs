use super::*;
use crate::motion::random::ThreadRandom;

#[test]
fn empty_sets_are_rejected_and_duplicates_collapse() {
    assert!(PatternSet::new([]).is_err());
    let s = PatternSet::new([PatternKind::Pause, PatternKind::Pause, PatternKind::Float]).unwrap();
    assert_eq!(s.kinds(), &[PatternKind::Pause, PatternKind::Float]);
}

#[test]
fn creature_defaults() {
    assert_eq!(PatternSet::for_creature(CreatureKind::Butterfly), PatternSet::all());
    let bird = PatternSet::for_creature(CreatureKind::Bird);
    assert!(!bird.contains(PatternKind::Spiral));
    assert_eq!(bird.kinds().len(), 4);
    let owl = PatternSet::for_creature(CreatureKind::Owl);
    assert_eq!(owl.kinds(), &[PatternKind::Pause, PatternKind::Float]);
}

#[test]
fn pick_covers_every_member_and_nothing_else() {
    let set = PatternSet::for_creature(CreatureKind::Bird);
    let mut rng = ThreadRandom::seeded(5);
    let mut tally = PatternTally::default();
    for _ in 0..1_000 {
        let k = set.pick(&mut rng);
        assert!(set.contains(k));
        tally.record(k);
    }
    assert_eq!(tally.total(), 1_000);
    for k in set.kinds() {
        assert!(tally.get(*k) > 150, "{k} picked {} times", tally.get(*k));
    }
    assert_eq!(tally.get(PatternKind::Spiral), 0);
}

#[test]
fn set_serde_is_a_plain_list() {
    let s: PatternSet = serde_json::from_str(r#"["drift","curved_path"]"#).unwrap();
    assert_eq!(s.kinds(), &[PatternKind::Drift, PatternKind::CurvedPath]);
    assert_eq!(serde_json::to_string(&s).unwrap(), r#"["drift","curved_path"]"#);
    assert!(serde_json::from_str::<PatternSet>("[]").is_err());
}

#[test]
fn tally_serializes_as_named_counts() {
    let mut t = PatternTally::default();
    t.record(PatternKind::Spiral);
    t.record(PatternKind::Spiral);
    t.record(PatternKind::CurvedPath);
    let v = serde_json::to_value(t).unwrap();
    assert_eq!(v["spiral"], 2);
    assert_eq!(v["curved_path"], 1);
    assert_eq!(v["drift"], 0);
}
