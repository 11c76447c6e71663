use std::f64::consts::FRAC_PI_2;

use crate::animation::ease::Ease;
use crate::foundation::core::{Bounds, Point, Transform, Vec2};
use crate::foundation::math::{angle_between, lerp_point, quad_bezier, wrap_angle};
use crate::motion::config::MotionConfig;
use crate::motion::pattern::{FloatStage, Pattern, PatternKind, PatternSet, PatternTally};
use crate::motion::random::RandomSource;
use crate::scene::agent::AgentId;
use crate::schedule::scheduler::Scheduler;
use crate::schedule::tween::{Oscillation, Tween};

/// Deferred work a controller schedules against itself.
///
/// `epoch` names the pattern run that scheduled it; events from an earlier run are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionEvent {
    /// Drift rest elapsed.
    Reselect {
        /// Pattern run that scheduled it.
        epoch: u64,
    },
    /// One spiral angle increment.
    SpiralStep {
        /// Pattern run that scheduled it.
        epoch: u64,
    },
    /// Spiral duration elapsed.
    SpiralEnd {
        /// Pattern run that scheduled it.
        epoch: u64,
    },
    /// Pause duration elapsed.
    PauseEnd {
        /// Pattern run that scheduled it.
        epoch: u64,
    },
}

impl MotionEvent {
    /// Pattern run that scheduled the event.
    pub fn epoch(self) -> u64 {
        match self {
            Self::Reselect { epoch }
            | Self::SpiralStep { epoch }
            | Self::SpiralEnd { epoch }
            | Self::PauseEnd { epoch } => epoch,
        }
    }
}

pub(crate) type MotionScheduler = Scheduler<AgentId, MotionEvent>;

/// Host capabilities lent to a controller for one call.
pub(crate) struct MotionCtx<'a> {
    pub now_ms: u64,
    pub scheduler: &'a mut MotionScheduler,
    pub rng: &'a mut dyn RandomSource,
    pub tally: &'a mut PatternTally,
}

/// Everything needed to start a controller.
#[derive(Clone, Debug)]
pub(crate) struct ControllerSetup {
    pub bounds: Bounds,
    pub config: MotionConfig,
    pub patterns: PatternSet,
    /// Fixed travel speed in px/s; drawn from `config.speed` when absent.
    pub speed: Option<f64>,
    pub transform: Transform,
}

/// Autonomous pattern state machine owning one agent's transform.
///
/// There is always exactly one running [`Pattern`]. Every pattern ends by selecting the next
/// one, either from a scheduled event or from [`MotionController::step`] when its tween
/// completes, so the loop never stalls.
#[derive(Clone, Debug)]
pub struct MotionController {
    owner: AgentId,
    bounds: Bounds,
    config: MotionConfig,
    patterns: PatternSet,
    speed: f64,
    transform: Transform,
    pattern: Pattern,
    epoch: u64,
    busy_until_ms: u64,
}

impl MotionController {
    /// Build the controller and select its first pattern.
    pub(crate) fn start(owner: AgentId, setup: ControllerSetup, ctx: &mut MotionCtx<'_>) -> Self {
        let speed = setup
            .speed
            .unwrap_or_else(|| setup.config.speed.sample(&mut *ctx.rng));
        let mut transform = setup.transform;
        transform.position = setup.bounds.clamp(transform.position);
        transform.bob = 0.0;

        let mut controller = Self {
            owner,
            bounds: setup.bounds,
            config: setup.config,
            patterns: setup.patterns,
            speed,
            transform,
            pattern: Pattern::Pause {
                bob: Oscillation::new(ctx.now_ms, 0.0, 1),
            },
            epoch: 0,
            busy_until_ms: ctx.now_ms,
        };
        controller.select(ctx);
        controller
    }

    /// Agent this controller moves.
    pub fn owner(&self) -> AgentId {
        self.owner
    }

    /// Boundary every position is clamped to.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Tunables in use.
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Repertoire selection draws from.
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Travel speed in px/s.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Current transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Current logical position, bob excluded.
    pub fn position(&self) -> Point {
        self.transform.position
    }

    /// Current heading, `atan2(dy, dx)` with y down.
    pub fn heading(&self) -> f64 {
        self.transform.heading
    }

    /// Running pattern and its scratch state.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Kind of the running pattern.
    pub fn pattern_kind(&self) -> PatternKind {
        self.pattern.kind()
    }

    /// Counter bumped on every pattern change.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// When the running pattern is expected to hand over to the next one.
    pub fn busy_until_ms(&self) -> u64 {
        self.busy_until_ms
    }

    /// Pick the next pattern uniformly from the agent's repertoire.
    pub(crate) fn select(&mut self, ctx: &mut MotionCtx<'_>) -> PatternKind {
        let kind = self.patterns.pick(&mut *ctx.rng);
        self.enter(kind, None, ctx);
        kind
    }

    /// Abandon the running pattern and start `kind`, even if it is outside the repertoire.
    pub(crate) fn force(&mut self, kind: PatternKind, ctx: &mut MotionCtx<'_>) {
        self.enter(kind, None, ctx);
    }

    /// Start a drift towards a chosen target.
    pub(crate) fn drift_to(&mut self, target: Point, ctx: &mut MotionCtx<'_>) {
        self.enter(PatternKind::Drift, Some(target), ctx);
    }

    fn enter(&mut self, kind: PatternKind, target: Option<Point>, ctx: &mut MotionCtx<'_>) {
        // Whatever the previous pattern scheduled is void from here on.
        ctx.scheduler.cancel_owner(self.owner);
        self.epoch += 1;
        self.transform.bob = 0.0;
        ctx.tally.record(kind);

        let now = ctx.now_ms;
        let epoch = self.epoch;
        let origin = self.transform.position;
        let cfg = &self.config;

        self.pattern = match kind {
            PatternKind::Drift => {
                let target = self
                    .bounds
                    .clamp(target.unwrap_or_else(|| ctx.rng.point_in(&self.bounds)));
                let distance = origin.distance(target);
                let travel = Tween::new(now, cfg.travel_ms(distance, self.speed), Ease::InOutSine);
                if distance > 0.0 {
                    self.transform.heading = angle_between(origin, target);
                }
                self.busy_until_ms = travel.end_ms();
                Pattern::Drift {
                    start: origin,
                    target,
                    travel,
                    bob: Oscillation::new(now, cfg.drift_bob.amplitude, cfg.drift_bob.period_ms),
                    arrived: false,
                }
            }
            PatternKind::Spiral => {
                let radius = cfg.spiral_radius.sample(&mut *ctx.rng);
                let duration = cfg.spiral_duration_ms.sample(&mut *ctx.rng);
                let repeats = u32::try_from(duration / cfg.spiral_tick_ms.max(1)).unwrap_or(u32::MAX);
                let tick_task = ctx.scheduler.every(
                    now,
                    cfg.spiral_tick_ms,
                    repeats,
                    self.owner,
                    MotionEvent::SpiralStep { epoch },
                );
                ctx.scheduler
                    .after(now, duration, self.owner, MotionEvent::SpiralEnd { epoch });
                self.busy_until_ms = now.saturating_add(duration);
                Pattern::Spiral {
                    center: origin,
                    radius,
                    angle: 0.0,
                    tick_task,
                }
            }
            PatternKind::Float => {
                let rise = cfg.float_rise.sample(&mut *ctx.rng);
                let offset = cfg.float_offset.sample(&mut *ctx.rng);
                let bounce = Tween::new(now, cfg.float_rise_ms, Ease::InOutSine).with_yoyo();
                let across = Tween::new(bounce.end_ms(), cfg.float_offset_ms, Ease::InOutSine);
                self.busy_until_ms = across.end_ms();
                Pattern::Float {
                    origin,
                    rise,
                    offset,
                    stage: FloatStage::Rise,
                    bounce,
                    across,
                    last: origin,
                }
            }
            PatternKind::Pause => {
                let duration = cfg.pause_ms.sample(&mut *ctx.rng);
                ctx.scheduler
                    .after(now, duration, self.owner, MotionEvent::PauseEnd { epoch });
                self.busy_until_ms = now.saturating_add(duration);
                Pattern::Pause {
                    bob: Oscillation::new(now, cfg.pause_bob.amplitude, cfg.pause_bob.period_ms),
                }
            }
            PatternKind::CurvedPath => {
                let control = ctx.rng.point_in(&self.bounds);
                let target = ctx.rng.point_in(&self.bounds);
                let travel = Tween::new(
                    now,
                    cfg.travel_ms(origin.distance(target), self.speed),
                    Ease::InOutSine,
                );
                self.busy_until_ms = travel.end_ms();
                Pattern::CurvedPath {
                    start: origin,
                    control,
                    target,
                    travel,
                    last: origin,
                }
            }
        };

        tracing::trace!(
            agent = %self.owner,
            pattern = %kind,
            epoch,
            until_ms = self.busy_until_ms,
            "pattern selected"
        );
    }

    /// Deliver a scheduled event. Returns `false` when the event belongs to an earlier pattern
    /// run or does not apply to the running one; such events change nothing.
    pub(crate) fn handle(&mut self, event: MotionEvent, ctx: &mut MotionCtx<'_>) -> bool {
        if event.epoch() != self.epoch {
            return false;
        }
        match event {
            MotionEvent::Reselect { .. } => {
                if !matches!(self.pattern, Pattern::Drift { arrived: true, .. }) {
                    return false;
                }
                self.select(ctx);
            }
            MotionEvent::SpiralStep { .. } => {
                let Pattern::Spiral {
                    center,
                    radius,
                    angle,
                    ..
                } = &mut self.pattern
                else {
                    return false;
                };
                *angle += self.config.spiral_step_rad;
                let p = Point::new(
                    center.x + angle.cos() * *radius,
                    center.y + angle.sin() * *radius * self.config.spiral_compression,
                );
                self.transform.heading = wrap_angle(*angle + FRAC_PI_2);
                self.transform.position = self.bounds.clamp(p);
            }
            MotionEvent::SpiralEnd { .. } => {
                let Pattern::Spiral { tick_task, .. } = self.pattern else {
                    return false;
                };
                ctx.scheduler.cancel(tick_task);
                self.select(ctx);
            }
            MotionEvent::PauseEnd { .. } => {
                if !matches!(self.pattern, Pattern::Pause { .. }) {
                    return false;
                }
                self.select(ctx);
            }
        }
        true
    }

    /// Advance tween-driven motion to `ctx.now_ms`.
    ///
    /// A tween that ended before `now` hands over at its own end time, and the next pattern
    /// is advanced from there, so a coarse host tick never leaves the agent idle.
    pub(crate) fn step(&mut self, ctx: &mut MotionCtx<'_>) {
        let now = ctx.now_ms;
        while let Some(end_ms) = self.advance(now, ctx) {
            ctx.now_ms = end_ms;
            self.select(ctx);
            ctx.now_ms = now;
        }
    }

    /// Move the running pattern to `now`. Returns the end time of a tween that has finished.
    fn advance(&mut self, now: u64, ctx: &mut MotionCtx<'_>) -> Option<u64> {
        match &mut self.pattern {
            Pattern::Drift {
                start,
                target,
                travel,
                bob,
                arrived,
            } => {
                self.transform.bob = bob.offset(now);
                if !*arrived {
                    if travel.is_done(now) {
                        *arrived = true;
                        self.transform.position = self.bounds.clamp(*target);
                        let end = travel.end_ms();
                        let rest = self.config.drift_rest_ms.sample(&mut *ctx.rng);
                        ctx.scheduler.after(
                            end,
                            rest,
                            self.owner,
                            MotionEvent::Reselect { epoch: self.epoch },
                        );
                        self.busy_until_ms = end.saturating_add(rest);
                    } else {
                        let p = lerp_point(*start, *target, travel.value(now));
                        self.transform.position = self.bounds.clamp(p);
                    }
                }
                None
            }
            Pattern::Spiral { .. } => None,
            Pattern::Pause { bob } => {
                self.transform.bob = bob.offset(now);
                None
            }
            Pattern::Float {
                origin,
                rise,
                offset,
                stage,
                bounce,
                across,
                last,
            } => {
                if *stage == FloatStage::Rise && bounce.is_done(now) {
                    *stage = FloatStage::Across;
                }
                let p = match stage {
                    FloatStage::Rise => Point::new(origin.x, origin.y - *rise * bounce.value(now)),
                    FloatStage::Across => {
                        Point::new(origin.x + *offset * across.value(now), origin.y)
                    }
                };
                let p = self.bounds.clamp(p);
                if p != *last {
                    self.transform.heading = angle_between(*last, p);
                }
                *last = p;
                self.transform.position = p;
                across.is_done(now).then_some(across.end_ms())
            }
            Pattern::CurvedPath {
                start,
                control,
                target,
                travel,
                last,
            } => {
                let p = self
                    .bounds
                    .clamp(quad_bezier(*start, *control, *target, travel.value(now)));
                if p != *last {
                    self.transform.heading = angle_between(*last, p);
                }
                *last = p;
                self.transform.position = p;
                travel.is_done(now).then_some(travel.end_ms())
            }
        }
    }

    /// Displace the agent, then clamp back into bounds.
    pub(crate) fn nudge(&mut self, delta: Vec2) {
        self.transform.position = self.bounds.clamp(self.transform.position + delta);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/controller.rs"]
mod tests;
