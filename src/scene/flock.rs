use std::collections::BTreeMap;

use crate::foundation::core::{Bounds, Point, Transform, Vec2};
use crate::foundation::error::{AviaryError, AviaryResult};
use crate::motion::avoidance::avoidance_offsets;
use crate::motion::config::{AvoidanceConfig, MotionConfig};
use crate::motion::controller::{ControllerSetup, MotionController, MotionCtx, MotionScheduler};
use crate::motion::pattern::{PatternKind, PatternTally};
use crate::motion::random::{RandomSource, ThreadRandom};
use crate::scene::agent::{Agent, AgentConfig, AgentId, Appearance};
use crate::schedule::clock::VirtualClock;
use crate::synth::cache::SheetCache;
use crate::synth::pose::CreatureKind;

/// Counters accumulated over a flock's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct FlockStats {
    /// Agents spawned.
    pub spawned: u64,
    /// Agents destroyed.
    pub destroyed: u64,
    /// Agents spawned without any synthesized sheet.
    pub placeholders: u64,
    /// Agents showing a single frame because their animation was missing.
    pub static_fallbacks: u64,
    /// Scheduled callbacks delivered to a live agent's current pattern.
    pub callbacks_fired: u64,
    /// Callbacks that found their agent gone or their pattern already replaced.
    pub callbacks_dropped: u64,
    /// Agent displacements applied by the avoidance pass.
    pub avoidance_pushes: u64,
    /// Pattern selections per kind.
    pub patterns: PatternTally,
}

/// Per-agent state captured after a tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AgentSnapshot {
    /// Agent handle.
    pub id: AgentId,
    /// Creature kind.
    pub kind: CreatureKind,
    /// Running pattern.
    pub pattern: PatternKind,
    /// Logical x.
    pub x: f64,
    /// Logical y.
    pub y: f64,
    /// Heading in radians.
    pub heading: f64,
    /// Visual vertical offset.
    pub bob: f64,
    /// Sprite rotation to draw with.
    pub rotation: f64,
    /// Sheet frame to draw; `None` for placeholders.
    pub frame: Option<u32>,
}

/// Host of many independently moving agents sharing one clock and scheduler.
///
/// Each [`Flock::tick`] runs due scheduled callbacks and every controller's tween step until
/// nothing more falls due, then the avoidance pass.
pub struct Flock {
    bounds: Bounds,
    motion: MotionConfig,
    avoidance: Option<AvoidanceConfig>,
    clock: VirtualClock,
    scheduler: MotionScheduler,
    rng: Box<dyn RandomSource>,
    agents: BTreeMap<AgentId, Agent>,
    next_id: u64,
    stats: FlockStats,
}

impl Flock {
    /// Flock with OS-seeded randomness and default avoidance.
    pub fn new(bounds: Bounds, motion: MotionConfig) -> AviaryResult<Self> {
        bounds.validate()?;
        motion.validate()?;
        Ok(Self {
            bounds,
            motion,
            avoidance: Some(AvoidanceConfig::default()),
            clock: VirtualClock::new(),
            scheduler: MotionScheduler::new(),
            rng: Box::new(ThreadRandom::new()),
            agents: BTreeMap::new(),
            next_id: 1,
            stats: FlockStats::default(),
        })
    }

    /// Replace the random source.
    pub fn with_rng(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Set or disable (`None`) the avoidance pass.
    pub fn with_avoidance(mut self, avoidance: Option<AvoidanceConfig>) -> AviaryResult<Self> {
        if let Some(cfg) = &avoidance {
            cfg.validate()?;
        }
        self.avoidance = avoidance;
        Ok(self)
    }

    /// Current clock time.
    pub fn now_ms(&self) -> u64 {
        self.clock.now()
    }

    /// Default boundary for spawned agents.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Tunables given to new controllers.
    pub fn motion_config(&self) -> &MotionConfig {
        &self.motion
    }

    /// Avoidance settings, if the pass is on.
    pub fn avoidance(&self) -> Option<&AvoidanceConfig> {
        self.avoidance.as_ref()
    }

    /// Lifetime counters.
    pub fn stats(&self) -> FlockStats {
        self.stats
    }

    /// Number of live agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no agent is live.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Live agent by handle.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Live agents in spawn order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Handles of live agents in spawn order.
    pub fn ids(&self) -> Vec<AgentId> {
        self.agents.keys().copied().collect()
    }

    /// Scheduled callbacks still pending for `id`.
    pub fn pending_callbacks(&self, id: AgentId) -> usize {
        self.scheduler.pending_for(id)
    }

    /// Add a creature and start its controller.
    ///
    /// Invalid configs are rejected. Missing visuals are not: an agent whose animation was
    /// never registered shows frame 0 of its sheet, and one without a sheet is spawned as a
    /// placeholder.
    pub fn spawn(&mut self, cfg: AgentConfig, cache: &SheetCache) -> AviaryResult<AgentId> {
        cfg.validate()?;

        let id = AgentId(self.next_id);
        self.next_id += 1;
        let appearance = self.resolve_appearance(id, &cfg, cache);

        let setup = ControllerSetup {
            bounds: cfg.bounds.unwrap_or(self.bounds),
            config: self.motion.clone(),
            patterns: cfg.pattern_set(),
            speed: cfg.speed,
            transform: Transform {
                scale: cfg.scale,
                ..Transform::at(cfg.position)
            },
        };
        let now = self.clock.now();
        let mut ctx = MotionCtx {
            now_ms: now,
            scheduler: &mut self.scheduler,
            rng: &mut *self.rng,
            tally: &mut self.stats.patterns,
        };
        let controller = MotionController::start(id, setup, &mut ctx);
        tracing::debug!(
            agent = %id,
            kind = %cfg.kind,
            pattern = %controller.pattern_kind(),
            speed = controller.speed(),
            "agent spawned"
        );

        self.agents
            .insert(id, Agent::new(id, cfg.kind, appearance, controller, now));
        self.stats.spawned += 1;
        Ok(id)
    }

    fn resolve_appearance(
        &mut self,
        id: AgentId,
        cfg: &AgentConfig,
        cache: &SheetCache,
    ) -> Appearance {
        let key = match cfg.sheet_key() {
            Ok(key) => key,
            Err(err) => {
                tracing::warn!(agent = %id, error = %err, "no sheet key; spawning placeholder");
                self.stats.placeholders += 1;
                return Appearance::Placeholder;
            }
        };
        let Some(sheet) = cache.sheet(&key) else {
            tracing::warn!(
                agent = %id,
                key = %key,
                "sheet was never synthesized; spawning placeholder"
            );
            self.stats.placeholders += 1;
            return Appearance::Placeholder;
        };
        match cache.require_animation(&key.animation_name(sheet.kind())) {
            Ok(animation) => Appearance::Animated { sheet, animation },
            Err(err) => {
                tracing::warn!(agent = %id, error = %err, "falling back to a static frame");
                self.stats.static_fallbacks += 1;
                Appearance::Static { sheet }
            }
        }
    }

    /// Remove an agent and cancel everything it scheduled. Returns `false` if it was not live.
    pub fn destroy(&mut self, id: AgentId) -> bool {
        if self.agents.remove(&id).is_none() {
            return false;
        }
        let cancelled = self.scheduler.cancel_owner(id);
        self.stats.destroyed += 1;
        tracing::debug!(agent = %id, cancelled, "agent destroyed");
        true
    }

    /// Destroy every agent, e.g. when the owning scene tears down.
    pub fn clear(&mut self) -> usize {
        let ids = self.ids();
        ids.into_iter().filter(|id| self.destroy(*id)).count()
    }

    /// Advance time by `dt_ms` and run one full update.
    ///
    /// Callbacks and tween steps alternate until nothing is due at or before the new time:
    /// a pattern that finishes inside the tick may schedule work that is itself already due.
    pub fn tick(&mut self, dt_ms: u64) {
        let now = self.clock.advance(dt_ms);

        loop {
            self.fire_due(now);
            self.step_all(now);
            if self.scheduler.next_due().is_none_or(|due| due > now) {
                break;
            }
        }

        self.update();
    }

    fn fire_due(&mut self, now: u64) {
        while let Some(fired) = self.scheduler.pop_due(now) {
            let Some(agent) = self.agents.get_mut(&fired.owner) else {
                // Owner destroyed after scheduling; nothing to do.
                self.stats.callbacks_dropped += 1;
                tracing::trace!(agent = %fired.owner, "callback for destroyed agent dropped");
                continue;
            };
            let mut ctx = MotionCtx {
                now_ms: fired.due_ms,
                scheduler: &mut self.scheduler,
                rng: &mut *self.rng,
                tally: &mut self.stats.patterns,
            };
            if agent.controller_mut().handle(fired.event, &mut ctx) {
                self.stats.callbacks_fired += 1;
            } else {
                self.stats.callbacks_dropped += 1;
            }
        }
    }

    fn step_all(&mut self, now: u64) {
        for agent in self.agents.values_mut() {
            let mut ctx = MotionCtx {
                now_ms: now,
                scheduler: &mut self.scheduler,
                rng: &mut *self.rng,
                tally: &mut self.stats.patterns,
            };
            agent.controller_mut().step(&mut ctx);
        }
    }

    /// Avoidance pass over all live agents. Returns how many agents were displaced.
    pub fn update(&mut self) -> usize {
        let Some(cfg) = self.avoidance else {
            return 0;
        };
        let positions: Vec<Point> = self.agents.values().map(Agent::position).collect();
        let offsets = avoidance_offsets(&positions, &cfg);

        let mut pushed = 0;
        for (agent, offset) in self.agents.values_mut().zip(offsets) {
            if offset != Vec2::ZERO {
                agent.controller_mut().nudge(offset);
                pushed += 1;
            }
        }
        self.stats.avoidance_pushes += pushed as u64;
        pushed
    }

    /// Interrupt an agent's running pattern with `kind`.
    pub fn force_pattern(&mut self, id: AgentId, kind: PatternKind) -> AviaryResult<()> {
        let now = self.clock.now();
        let agent = self.agents.get_mut(&id).ok_or_else(|| not_live(id))?;
        let mut ctx = MotionCtx {
            now_ms: now,
            scheduler: &mut self.scheduler,
            rng: &mut *self.rng,
            tally: &mut self.stats.patterns,
        };
        agent.controller_mut().force(kind, &mut ctx);
        Ok(())
    }

    /// Interrupt an agent with a drift towards `target`.
    pub fn drift_to(&mut self, id: AgentId, target: Point) -> AviaryResult<()> {
        let now = self.clock.now();
        let agent = self.agents.get_mut(&id).ok_or_else(|| not_live(id))?;
        let mut ctx = MotionCtx {
            now_ms: now,
            scheduler: &mut self.scheduler,
            rng: &mut *self.rng,
            tally: &mut self.stats.patterns,
        };
        agent.controller_mut().drift_to(target, &mut ctx);
        Ok(())
    }

    /// State of every live agent at the current time.
    pub fn snapshot(&self) -> Vec<AgentSnapshot> {
        let now = self.clock.now();
        self.agents
            .values()
            .map(|a| {
                let t = a.transform();
                AgentSnapshot {
                    id: a.id(),
                    kind: a.kind(),
                    pattern: a.pattern_kind(),
                    x: t.position.x,
                    y: t.position.y,
                    heading: t.heading,
                    bob: t.bob,
                    rotation: a.render_rotation(),
                    frame: a.current_frame_index(now),
                }
            })
            .collect()
    }
}

fn not_live(id: AgentId) -> AviaryError {
    AviaryError::validation(format!("{id} is not live"))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/flock.rs"]
mod tests;
