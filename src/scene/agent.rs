use std::fmt;
use std::sync::Arc;

use crate::animation::cyclic::CyclicAnimation;
use crate::foundation::core::{Affine, Bounds, Point, Transform};
use crate::foundation::error::{AviaryError, AviaryResult};
use crate::motion::controller::MotionController;
use crate::motion::pattern::{PatternKind, PatternSet};
use crate::synth::palette::{ColorConfig, default_preset_for, preset};
use crate::synth::pose::CreatureKind;
use crate::synth::sheet::{AnimationSheet, FrameRect, SheetKey};

/// Handle of a live agent inside a [`Flock`](crate::Flock).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

fn one() -> f64 {
    1.0
}

/// Spawn request for one creature.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AgentConfig {
    /// Creature to spawn.
    pub kind: CreatureKind,
    /// Spawn position, clamped into the agent's bounds.
    pub position: Point,

    /// Named palette; ignored when `colors` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Explicit palette; wins over `preset`.
    pub colors: Option<ColorConfig>,

    /// Fixed travel speed in px/s; drawn from the motion config when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default = "one")]
    /// Uniform render scale.
    pub scale: f64,

    /// Repertoire override; defaults to the creature's own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns: Option<PatternSet>,
    /// Boundary override; defaults to the scene's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    /// Play an explicitly named sheet instead of the palette-derived one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<SheetKey>,
}

impl AgentConfig {
    /// Config with the creature's default palette, repertoire and scale 1.
    pub fn new(kind: CreatureKind, position: Point) -> Self {
        Self {
            kind,
            position,
            preset: None,
            colors: None,
            speed: None,
            scale: 1.0,
            patterns: None,
            bounds: None,
            sheet: None,
        }
    }

    /// Fix the travel speed (px/s).
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Override the repertoire.
    pub fn with_patterns(mut self, patterns: PatternSet) -> Self {
        self.patterns = Some(patterns);
        self
    }

    /// Use an explicit palette.
    pub fn with_colors(mut self, colors: ColorConfig) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Use a named palette preset.
    pub fn with_preset(mut self, name: impl Into<String>) -> Self {
        self.preset = Some(name.into());
        self
    }

    /// Confine this agent to `bounds` instead of the scene boundary.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Play the sheet stored under `key`.
    pub fn with_sheet(mut self, key: SheetKey) -> Self {
        self.sheet = Some(key);
        self
    }

    /// Check position, speed, scale, palette and bounds.
    pub fn validate(&self) -> AviaryResult<()> {
        if !self.position.x.is_finite() || !self.position.y.is_finite() {
            return Err(AviaryError::validation("agent position must be finite"));
        }
        if let Some(speed) = self.speed
            && (!speed.is_finite() || speed <= 0.0)
        {
            return Err(AviaryError::validation("agent speed must be finite and > 0"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(AviaryError::validation("agent scale must be finite and > 0"));
        }
        if let Some(b) = &self.bounds {
            b.validate()?;
        }
        if self.colors.is_none()
            && let Some(name) = &self.preset
            && preset(name).is_none()
        {
            return Err(AviaryError::validation(format!("unknown palette preset '{name}'")));
        }
        Ok(())
    }

    /// Resolved palette: explicit colors, then the named preset, then the creature default.
    pub fn palette(&self) -> AviaryResult<ColorConfig> {
        if let Some(colors) = &self.colors {
            return Ok(colors.clone());
        }
        match &self.preset {
            Some(name) => preset(name)
                .map(|p| p.colors)
                .ok_or_else(|| AviaryError::validation(format!("unknown palette preset '{name}'"))),
            None => Ok(default_preset_for(self.kind).colors),
        }
    }

    /// Key of the sheet this agent plays.
    pub fn sheet_key(&self) -> AviaryResult<SheetKey> {
        match &self.sheet {
            Some(key) => Ok(key.clone()),
            None => Ok(SheetKey::derive(self.kind, &self.palette()?)),
        }
    }

    /// Repertoire the controller selects from.
    pub fn pattern_set(&self) -> PatternSet {
        self.patterns
            .clone()
            .unwrap_or_else(|| PatternSet::for_creature(self.kind))
    }
}

/// What an agent draws.
#[derive(Clone, Debug)]
pub enum Appearance {
    /// Looping animation over a synthesized sheet.
    Animated {
        /// Shared frame strip.
        sheet: Arc<AnimationSheet>,
        /// Playback descriptor over `sheet`.
        animation: Arc<CyclicAnimation>,
    },
    /// The animation was never registered; show frame 0 of the sheet.
    Static {
        /// Sheet whose first frame is shown.
        sheet: Arc<AnimationSheet>,
    },
    /// Nothing was synthesized for this agent. It still moves.
    Placeholder,
}

impl Appearance {
    /// Backing sheet, if any.
    pub fn sheet(&self) -> Option<&Arc<AnimationSheet>> {
        match self {
            Self::Animated { sheet, .. } | Self::Static { sheet } => Some(sheet),
            Self::Placeholder => None,
        }
    }

    /// Whether frames advance over time.
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Animated { .. })
    }
}

/// One live creature: its look plus the controller that moves it.
#[derive(Clone, Debug)]
pub struct Agent {
    id: AgentId,
    kind: CreatureKind,
    appearance: Appearance,
    controller: MotionController,
    spawned_at_ms: u64,
}

impl Agent {
    pub(crate) fn new(
        id: AgentId,
        kind: CreatureKind,
        appearance: Appearance,
        controller: MotionController,
        spawned_at_ms: u64,
    ) -> Self {
        Self {
            id,
            kind,
            appearance,
            controller,
            spawned_at_ms,
        }
    }

    /// Handle of this agent.
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Creature kind.
    pub fn kind(&self) -> CreatureKind {
        self.kind
    }

    /// What this agent draws.
    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// Controller owning the transform.
    pub fn controller(&self) -> &MotionController {
        &self.controller
    }

    pub(crate) fn controller_mut(&mut self) -> &mut MotionController {
        &mut self.controller
    }

    /// Current transform.
    pub fn transform(&self) -> &Transform {
        self.controller.transform()
    }

    /// Logical position, bob excluded.
    pub fn position(&self) -> Point {
        self.controller.position()
    }

    /// Heading in radians.
    pub fn heading(&self) -> f64 {
        self.controller.heading()
    }

    /// Running pattern.
    pub fn pattern_kind(&self) -> PatternKind {
        self.controller.pattern_kind()
    }

    /// Clock time of the spawn; animation playback counts from here.
    pub fn spawned_at_ms(&self) -> u64 {
        self.spawned_at_ms
    }

    /// Sheet frame index to draw at `now_ms`; `None` for placeholders.
    pub fn current_frame_index(&self, now_ms: u64) -> Option<u32> {
        match &self.appearance {
            Appearance::Animated { animation, .. } => {
                Some(animation.frame_at(now_ms.saturating_sub(self.spawned_at_ms)))
            }
            Appearance::Static { .. } => Some(0),
            Appearance::Placeholder => None,
        }
    }

    /// Source rectangle to draw at `now_ms`.
    pub fn current_frame(&self, now_ms: u64) -> Option<FrameRect> {
        let index = self.current_frame_index(now_ms)?;
        self.appearance.sheet()?.frame(index)
    }

    /// Where the sprite is drawn: the logical position plus the visual bob, kept in bounds.
    pub fn render_position(&self) -> Point {
        let t = self.controller.transform();
        self.controller
            .bounds()
            .clamp(Point::new(t.position.x, t.position.y + t.bob))
    }

    /// On-screen sprite rotation. Creatures that do not turn with their heading stay upright.
    pub fn render_rotation(&self) -> f64 {
        if self.kind.rotates_with_heading() {
            self.controller.heading() + self.kind.facing_offset()
        } else {
            0.0
        }
    }

    /// Affine placing a sprite centered on its local origin.
    pub fn render_affine(&self) -> Affine {
        let mut t = *self.controller.transform();
        t.position = self.render_position();
        t.bob = 0.0;
        if !self.kind.rotates_with_heading() {
            t.heading = 0.0;
            return t.to_affine(0.0);
        }
        t.to_affine(self.kind.facing_offset())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/agent.rs"]
mod tests;
