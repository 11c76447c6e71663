use super::*;

fn drain(s: &mut Scheduler<u32, &'static str>, now: u64) -> Vec<(u32, &'static str)> {
    let mut out = Vec::new();
    while let Some(f) = s.pop_due(now) {
        out.push((f.owner, f.event));
    }
    out
}

#[test]
fn after_fires_once_when_due() {
    let mut s = Scheduler::new();
    s.after(0, 100, 1u32, "a");
    assert!(drain(&mut s, 99).is_empty());
    assert_eq!(drain(&mut s, 100), vec![(1, "a")]);
    assert!(drain(&mut s, 1_000).is_empty());
    assert!(s.is_empty());
}

#[test]
fn due_order_then_scheduling_order() {
    let mut s = Scheduler::new();
    s.after(0, 50, 1u32, "late");
    s.after(0, 10, 2, "early");
    s.after(0, 10, 3, "early-second");
    assert_eq!(
        drain(&mut s, 50),
        vec![(2, "early"), (3, "early-second"), (1, "late")]
    );
}

#[test]
fn every_repeats_exact_count() {
    let mut s = Scheduler::new();
    s.every(0, 50, 3, 7u32, "tick");
    let mut fired = Vec::new();
    for now in (0..=400).step_by(10) {
        while let Some(f) = s.pop_due(now) {
            fired.push(f.due_ms);
        }
    }
    assert_eq!(fired, vec![50, 100, 150]);
    assert_eq!(s.pending_for(7), 0);
}

#[test]
fn every_catches_up_inside_one_long_tick() {
    let mut s = Scheduler::new();
    s.every(0, 50, 4, 1u32, "tick");
    assert_eq!(drain(&mut s, 175).len(), 3);
    assert_eq!(s.pending_for(1), 1);
}

#[test]
fn zero_repeats_schedule_nothing() {
    let mut s: Scheduler<u32, &str> = Scheduler::new();
    let id = s.every(0, 50, 0, 1, "tick");
    assert!(!s.is_pending(id));
    assert!(s.is_empty());
}

#[test]
fn cancel_prevents_firing() {
    let mut s = Scheduler::new();
    let id = s.after(0, 10, 1u32, "a");
    s.after(0, 20, 1, "b");
    assert!(s.cancel(id));
    assert!(!s.cancel(id));
    assert_eq!(drain(&mut s, 100), vec![(1, "b")]);
}

#[test]
fn cancel_owner_drops_only_that_owner() {
    let mut s = Scheduler::new();
    s.after(0, 10, 1u32, "a");
    s.every(0, 10, 5, 1, "tick");
    s.after(0, 10, 2, "b");
    assert_eq!(s.pending_for(1), 2);
    assert_eq!(s.cancel_owner(1), 2);
    assert_eq!(s.pending_for(1), 0);
    assert_eq!(drain(&mut s, 100), vec![(2, "b")]);
}

#[test]
fn next_due_skips_cancelled_entries() {
    let mut s = Scheduler::new();
    let a = s.after(0, 10, 1u32, "a");
    s.after(0, 30, 1, "b");
    assert_eq!(s.next_due(), Some(10));
    s.cancel(a);
    assert_eq!(s.next_due(), Some(30));
}
