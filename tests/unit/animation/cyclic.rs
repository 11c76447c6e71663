use super::*;

fn anim(repeat: Repeat) -> CyclicAnimation {
    CyclicAnimation {
        name: "butterfly-x:flutter".to_string(),
        sheet: SheetKey::new("butterfly-x"),
        frame_count: 8,
        frame_rate: 16.0,
        repeat,
    }
}

#[test]
fn infinite_loop_wraps_frame_index() {
    let a = anim(Repeat::Infinite);
    assert_eq!(a.frame_duration_ms(), 62.5);
    assert_eq!(a.frame_at(0), 0);
    assert_eq!(a.frame_at(62), 0);
    assert_eq!(a.frame_at(63), 1);
    assert_eq!(a.frame_at(499), 7);
    assert_eq!(a.frame_at(500), 0);
    assert_eq!(a.frame_at(500 * 1000 + 63), 1);
}

#[test]
fn finite_repeat_holds_last_frame() {
    let a = anim(Repeat::Times(2));
    assert_eq!(a.frame_at(500), 0);
    assert_eq!(a.frame_at(999), 7);
    assert_eq!(a.frame_at(5_000), 7);
}

#[test]
fn validation_rejects_empty_or_stalled_animations() {
    assert!(CyclicAnimation::looping("a", SheetKey::new("s"), 0, 12.0).is_err());
    assert!(CyclicAnimation::looping("a", SheetKey::new("s"), 4, 0.0).is_err());
    assert!(CyclicAnimation::looping("", SheetKey::new("s"), 4, 12.0).is_err());
    assert!(CyclicAnimation::looping("a", SheetKey::new("s"), 4, 12.0).is_ok());
}

#[test]
fn registry_create_is_idempotent() {
    let mut reg = AnimationRegistry::new();
    let (first, created) = reg.create(anim(Repeat::Infinite)).unwrap();
    assert!(created);

    let mut other = anim(Repeat::Infinite);
    other.frame_rate = 99.0;
    let (second, created) = reg.create(other).unwrap();
    assert!(!created);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.frame_rate, 16.0);
    assert_eq!(reg.len(), 1);
    assert!(reg.contains("butterfly-x:flutter"));
}
